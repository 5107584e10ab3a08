//! File system utility functions.
//!
//! Provides simple wrappers around std::fs for reading the input file and
//! naming and writing the converted copy.

use std::ffi::OsString;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Suffix inserted before the extension of converted files.
pub const DEFAULT_OUTPUT_SUFFIX: &str = "-utf8";

/// Check whether `a` and `b` name the same existing file.
///
/// Paths are canonicalized, so `dir/sub/../a.txt` matches `dir/a.txt`. A path
/// that does not exist yet never matches.
pub fn same_file(a: &Path, b: &Path) -> std::io::Result<bool> {
    if !a.exists() || !b.exists() {
        return Ok(false);
    }
    Ok(std::fs::canonicalize(a)? == std::fs::canonicalize(b)?)
}

/// Read the whole file into memory.
pub fn read_file(path: &Path) -> std::io::Result<Vec<u8>> {
    std::fs::read(path)
}

/// Write `data` to `path`.
///
/// Refuses to replace an existing file unless `overwrite` is set.
pub fn write_file(path: &Path, data: &[u8], overwrite: bool) -> std::io::Result<()> {
    let mut options = OpenOptions::new();
    options.write(true);
    if overwrite {
        options.create(true).truncate(true);
    } else {
        options.create_new(true);
    }
    let mut file = options.open(path)?;
    file.write_all(data)?;
    file.flush()
}

/// Insert `suffix` before the last extension of the file name.
///
/// `test.txt` becomes `test-utf8.txt`, `file` becomes `file-utf8` and
/// `archive.tar.gz` becomes `archive.tar-utf8.gz`. The result stays in the
/// input's directory.
///
/// A leading dot does not start an extension: `.profile` becomes
/// `.profile-utf8`, where the old Go tool produced `-utf8.profile`.
pub fn output_path(input: &Path, suffix: &str) -> PathBuf {
    let mut name = input.file_stem().map(OsString::from).unwrap_or_default();
    name.push(suffix);
    if let Some(ext) = input.extension() {
        name.push(".");
        name.push(ext);
    }

    input.with_file_name(name)
}
