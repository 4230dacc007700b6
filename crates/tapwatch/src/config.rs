// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Configuration for the tapwatch CLI
//!
//! This module provides the command-line configuration: where the TAP
//! stream comes from, how the summary is rendered, and logging options.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use tapwatch_core::MAX_CHUNK_SIZE;

/// Default number of bytes read per chunk
pub const DEFAULT_CHUNK_SIZE: usize = 8192;

/// tapwatch - follow a TAP stream and summarise it
#[derive(Parser, Debug, Clone)]
#[command(name = "tapwatch")]
#[command(version, about, long_about = None)]
pub struct Config {
    /// TAP file to read
    ///
    /// Reads standard input when omitted or when given as "-".
    pub input: Option<PathBuf>,

    /// Output format for the final summary
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text, env = "TAPWATCH_FORMAT")]
    pub format: OutputFormat,

    /// Number of bytes read per chunk
    #[arg(long, default_value_t = DEFAULT_CHUNK_SIZE, env = "TAPWATCH_CHUNK_SIZE")]
    pub chunk_size: usize,

    /// Show a live progress bar on stderr while the stream arrives
    #[arg(short, long, default_value = "false")]
    pub progress: bool,

    /// Enable verbose logging (debug level)
    ///
    /// Logs every classified line. Logs are written to stderr so that
    /// stdout only carries the summary.
    #[arg(short, long, default_value = "false")]
    pub verbose: bool,

    /// Quiet mode - suppress info-level logs
    ///
    /// Only errors and warnings will be logged.
    #[arg(short, long, default_value = "false")]
    pub quiet: bool,
}

/// Summary output formats
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable panels and totals
    #[default]
    Text,
    /// The full session summary as JSON
    Json,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            input: None,
            format: OutputFormat::Text,
            chunk_size: DEFAULT_CHUNK_SIZE,
            progress: false,
            verbose: false,
            quiet: false,
        }
    }
}

impl Config {
    /// Input file, or `None` for standard input
    #[must_use]
    pub fn input_path(&self) -> Option<&PathBuf> {
        self.input
            .as_ref()
            .filter(|path| path.as_os_str() != "-")
    }

    /// Validate the configuration
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The input path is specified but doesn't exist
    /// - The input path is a directory
    /// - The chunk size is zero or larger than `MAX_CHUNK_SIZE`
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(input) = self.input_path() {
            if !input.exists() {
                return Err(ConfigError::InputNotFound(input.clone()));
            }
            if input.is_dir() {
                return Err(ConfigError::InputIsDirectory(input.clone()));
            }
        }

        if self.chunk_size == 0 {
            return Err(ConfigError::ZeroChunkSize);
        }
        if self.chunk_size > MAX_CHUNK_SIZE {
            return Err(ConfigError::ChunkSizeTooLarge(self.chunk_size));
        }

        Ok(())
    }

    /// Get the log level based on verbose/quiet flags
    #[must_use]
    pub fn log_level(&self) -> tracing::Level {
        if self.verbose {
            tracing::Level::DEBUG
        } else if self.quiet {
            tracing::Level::WARN
        } else {
            tracing::Level::INFO
        }
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Input file not found
    #[error("Input file not found: {0}")]
    InputNotFound(PathBuf),

    /// Input path is a directory
    #[error("Input path is a directory: {0}")]
    InputIsDirectory(PathBuf),

    /// Chunk size of zero
    #[error("Chunk size must be at least 1 byte")]
    ZeroChunkSize,

    /// Chunk size above the read buffer limit
    #[error("Chunk size {0} exceeds the maximum of {max} bytes", max = MAX_CHUNK_SIZE)]
    ChunkSizeTooLarge(usize),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert!(config.input.is_none());
        assert_eq!(config.format, OutputFormat::Text);
        assert_eq!(config.chunk_size, DEFAULT_CHUNK_SIZE);
        assert!(!config.progress);
        assert!(!config.verbose);
        assert!(!config.quiet);
    }

    #[test]
    fn test_parse_matches_default() {
        let config = Config::try_parse_from(["tapwatch"]).expect("parse should succeed");
        assert_eq!(config.format, Config::default().format);
        assert_eq!(config.chunk_size, Config::default().chunk_size);
    }

    #[test]
    fn test_dash_means_stdin() {
        let config = Config {
            input: Some(PathBuf::from("-")),
            ..Default::default()
        };
        assert!(config.input_path().is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_input_path_custom() {
        let custom = PathBuf::from("/tmp/results.tap");
        let config = Config {
            input: Some(custom.clone()),
            ..Default::default()
        };
        assert_eq!(config.input_path(), Some(&custom));
    }

    #[test]
    fn test_log_level_default() {
        let config = Config::default();
        assert_eq!(config.log_level(), tracing::Level::INFO);
    }

    #[test]
    fn test_log_level_verbose() {
        let config = Config {
            verbose: true,
            ..Default::default()
        };
        assert_eq!(config.log_level(), tracing::Level::DEBUG);
    }

    #[test]
    fn test_log_level_quiet() {
        let config = Config {
            quiet: true,
            ..Default::default()
        };
        assert_eq!(config.log_level(), tracing::Level::WARN);
    }

    #[test]
    fn test_validate_nonexistent_input() {
        let config = Config {
            input: Some(PathBuf::from("/nonexistent/path/12345.tap")),
            ..Default::default()
        };
        let result = config.validate();
        assert!(matches!(result, Err(ConfigError::InputNotFound(_))));
    }

    #[test]
    fn test_validate_directory_input() {
        let config = Config {
            input: Some(std::env::temp_dir()),
            ..Default::default()
        };
        let result = config.validate();
        assert!(matches!(result, Err(ConfigError::InputIsDirectory(_))));
    }

    #[test]
    fn test_validate_zero_chunk_size() {
        let config = Config {
            chunk_size: 0,
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::ZeroChunkSize)));
    }

    #[test]
    fn test_validate_chunk_size_limit() {
        let config = Config {
            chunk_size: MAX_CHUNK_SIZE,
            ..Default::default()
        };
        assert!(config.validate().is_ok());

        let config = Config {
            chunk_size: MAX_CHUNK_SIZE + 1,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::ChunkSizeTooLarge(size)) if size == MAX_CHUNK_SIZE + 1
        ));
    }

    #[test]
    fn verify_cli() {
        use clap::CommandFactory;
        Config::command().debug_assert();
    }
}
