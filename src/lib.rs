//! Diacritics Converter - convert legacy Czech/Slovak text files to UTF-8.
//!
//! This crate allows you to:
//! - Detect whether a file is UTF-8, WINDOWS-1250 or ISO-8859-2
//! - Remap WINDOWS-1250 / ISO-8859-2 bytes to UTF-8
//! - Write a `-utf8` copy next to the input file

pub mod app;
pub mod cli;
pub mod config;
pub mod core;
pub mod utils;

pub use crate::core::detector::{classify, detect, DetectError, Detection, Encoding};
pub use crate::utils::encoding::{remap_to_utf8, ConvertError};
