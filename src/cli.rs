//! Command line arguments.

use std::path::PathBuf;

use clap::Parser;

/// Detect whether a text file is UTF-8, WINDOWS-1250 or ISO-8859-2 and
/// convert it to UTF-8.
#[derive(Debug, Parser)]
#[command(name = "diacritics-converter", version, about)]
pub struct Cli {
    /// File to convert
    pub input: PathBuf,

    /// Write the converted file here instead of `<name>-utf8.<ext>`
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Only print the detected encoding
    #[arg(short, long)]
    pub detect_only: bool,

    /// Print the result as JSON
    #[arg(long)]
    pub json: bool,

    /// Settings file (defaults to diacritics_config.json next to the executable)
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Overwrite an existing output file
    #[arg(short, long)]
    pub force: bool,

    /// Enable debug logging
    #[arg(short, long)]
    pub verbose: bool,
}
