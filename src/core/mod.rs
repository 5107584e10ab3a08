//! Core logic: encoding detection and file conversion.

pub mod converter;
pub mod detector;
