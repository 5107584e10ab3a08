//! Utility modules for file I/O and code page conversion.

pub mod encoding;
pub mod file_helper;
