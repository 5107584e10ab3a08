use anyhow::Context;

use crate::cli::Cli;
use crate::config::{ConfigError, ConfigManager};
use crate::core::converter::{ConversionResult, ConvertOptions, FileConverter, Outcome, ProcessError};

/// Exit status for usage, config, and file I/O errors.
pub const EXIT_IO_ERROR: u8 = 1;
/// Exit status for detection and conversion errors.
pub const EXIT_CONVERSION_ERROR: u8 = 3;

/// Main application state.
pub struct App {
    converter: FileConverter,
}

impl App {
    /// Load settings and apply command line overrides.
    pub fn new(cli: &Cli) -> Result<Self, ConfigError> {
        let config_manager = match &cli.config {
            Some(path) => ConfigManager::with_path(path),
            None => ConfigManager::new(),
        };
        let mut config = config_manager.load()?;
        if cli.force {
            config.overwrite = true;
        }

        Ok(Self {
            converter: FileConverter::new(config),
        })
    }

    /// Convert the file named on the command line and print the result.
    pub fn run(&self, cli: &Cli) -> anyhow::Result<ConversionResult> {
        let options = ConvertOptions {
            output: cli.output.clone(),
            detect_only: cli.detect_only,
        };
        let result = self.converter.process_file(&cli.input, &options)?;

        if cli.json {
            let json = serde_json::to_string_pretty(&result).context("serializing result")?;
            println!("{}", json);
        } else {
            print_report(&result);
        }

        Ok(result)
    }
}

fn print_report(result: &ConversionResult) {
    println!("Detected encoding: {}", result.encoding());
    match result.outcome {
        Outcome::AlreadyUtf8 => {
            println!("File is already in UTF-8 format. No conversion needed.");
        }
        Outcome::DetectedOnly => {}
        Outcome::Converted => {
            println!("Successfully converted '{}' to UTF-8", result.input.display());
            if let Some(output) = &result.output {
                println!("Output written to: {}", output.display());
            }
        }
    }
}

/// Map an error from [`run`] to the process exit status.
pub fn exit_code(err: &anyhow::Error) -> u8 {
    match err.downcast_ref::<ProcessError>() {
        Some(ProcessError::Detect(_) | ProcessError::Convert(_)) => EXIT_CONVERSION_ERROR,
        _ => EXIT_IO_ERROR,
    }
}

/// Load settings and convert the file named on the command line.
pub fn run(cli: &Cli) -> anyhow::Result<()> {
    let app = App::new(cli)?;
    app.run(cli)?;
    Ok(())
}
