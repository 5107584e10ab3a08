//! File converter that orchestrates detection, remapping, and output.
//!
//! Reads the whole input file, classifies it, and writes a UTF-8 copy next to
//! it unless the input is already UTF-8.

use std::path::{Path, PathBuf};

use serde::Serialize;
use thiserror::Error;
use tracing::{debug, info};

use crate::config::Config;
use crate::core::detector::{self, DetectError, Detection, Encoding};
use crate::utils::encoding::{self, ConvertError};
use crate::utils::file_helper;

#[derive(Debug, Error)]
pub enum ProcessError {
    #[error("cannot read '{path}': {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("cannot write '{path}': {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("output file '{0}' already exists (use --force to overwrite)")]
    OutputExists(PathBuf),
    #[error("output path '{0}' is the input file")]
    OutputIsInput(PathBuf),
    #[error("detecting encoding: {0}")]
    Detect(#[from] DetectError),
    #[error("converting to UTF-8: {0}")]
    Convert(#[from] ConvertError),
}

/// What happened to a single file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    /// Input carries a UTF-8 byte order mark; nothing written.
    AlreadyUtf8,
    /// Only detection was requested.
    DetectedOnly,
    Converted,
}

/// Result of processing a file.
#[derive(Debug, Clone, Serialize)]
pub struct ConversionResult {
    pub input: PathBuf,
    pub output: Option<PathBuf>,
    pub detection: Detection,
    pub outcome: Outcome,
    pub bytes_read: usize,
    pub bytes_written: usize,
}

impl ConversionResult {
    pub fn encoding(&self) -> Encoding {
        self.detection.encoding
    }
}

/// Per-run options that are not part of the persisted config.
#[derive(Debug, Clone, Default)]
pub struct ConvertOptions {
    pub output: Option<PathBuf>,
    pub detect_only: bool,
}

/// Converter that combines detection with code page remapping.
pub struct FileConverter {
    config: Config,
}

impl FileConverter {
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    fn remap(&self, data: &[u8], source: Encoding) -> Result<Vec<u8>, ConvertError> {
        if self.config.lossy {
            encoding::remap_to_utf8_lossy(data, source)
        } else {
            encoding::remap_to_utf8(data, source)
        }
    }

    /// Process a single file.
    pub fn process_file(
        &self,
        input: &Path,
        options: &ConvertOptions,
    ) -> Result<ConversionResult, ProcessError> {
        let data = file_helper::read_file(input).map_err(|source| ProcessError::Read {
            path: input.to_path_buf(),
            source,
        })?;
        debug!(path = %input.display(), len = data.len(), "read input");

        let mut result = ConversionResult {
            input: input.to_path_buf(),
            output: None,
            detection: detector::detect(&data)?,
            outcome: Outcome::DetectedOnly,
            bytes_read: data.len(),
            bytes_written: 0,
        };

        if result.encoding() == Encoding::Utf8 {
            result.outcome = Outcome::AlreadyUtf8;
            return Ok(result);
        }
        if options.detect_only {
            return Ok(result);
        }

        let output = options
            .output
            .clone()
            .unwrap_or_else(|| file_helper::output_path(input, &self.config.output_suffix));
        let aliases_input =
            file_helper::same_file(input, &output).map_err(|source| ProcessError::Read {
                path: output.clone(),
                source,
            })?;
        if aliases_input {
            return Err(ProcessError::OutputIsInput(output));
        }
        if !self.config.overwrite && output.exists() {
            return Err(ProcessError::OutputExists(output));
        }

        let converted = self.remap(&data, result.encoding())?;

        file_helper::write_file(&output, &converted, self.config.overwrite).map_err(|source| {
            if source.kind() == std::io::ErrorKind::AlreadyExists {
                ProcessError::OutputExists(output.clone())
            } else {
                ProcessError::Write {
                    path: output.clone(),
                    source,
                }
            }
        })?;
        info!(
            input = %input.display(),
            output = %output.display(),
            encoding = %result.encoding(),
            "converted"
        );

        result.bytes_written = converted.len();
        result.output = Some(output);
        result.outcome = Outcome::Converted;
        Ok(result)
    }
}

impl Default for FileConverter {
    fn default() -> Self {
        Self::new(Config::default())
    }
}
