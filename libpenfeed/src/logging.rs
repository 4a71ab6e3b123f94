//! Centralized logging configuration for Penfeed front ends
//!
//! Provides consistent logging setup with support for:
//! - Text, JSON, and pretty-printed output
//! - Environment variable configuration
//! - Writing to stderr or to a log file (terminal UIs own stderr's screen)
//!
//! # Examples
//!
//! ```no_run
//! use libpenfeed::logging::{LoggingConfig, LogFormat, LogTarget};
//!
//! let config = LoggingConfig::new(LogFormat::Json, "info".to_string(), false)
//!     .with_target(LogTarget::File("/tmp/penfeed.log".into()));
//! config.init().expect("logging already initialized");
//! ```

use std::path::PathBuf;
use std::str::FromStr;

use tracing_subscriber::fmt::writer::BoxMakeWriter;

use crate::error::{PenfeedError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    /// Human-readable text output (no colors, for piping)
    Text,
    /// Machine-parseable JSON (one JSON object per line)
    Json,
    /// Pretty-printed with colors (for development)
    Pretty,
}

impl FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" => Ok(LogFormat::Text),
            "json" => Ok(LogFormat::Json),
            "pretty" => Ok(LogFormat::Pretty),
            other => Err(format!("unknown log format '{other}' (expected text, json or pretty)")),
        }
    }
}

impl std::fmt::Display for LogFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            LogFormat::Text => "text",
            LogFormat::Json => "json",
            LogFormat::Pretty => "pretty",
        };
        f.write_str(name)
    }
}

/// Where log lines go
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogTarget {
    Stderr,
    /// Append to this file, creating parent directories as needed
    File(PathBuf),
}

/// Configuration for logging initialization
pub struct LoggingConfig {
    pub format: LogFormat,
    pub level: String,
    pub verbose: bool,
    pub target: LogTarget,
}

impl LoggingConfig {
    /// Create a new logging configuration writing to stderr
    ///
    /// # Arguments
    ///
    /// * `format` - Log output format (text, json, or pretty)
    /// * `level` - Minimum log level (error, warn, info, debug, trace)
    /// * `verbose` - If true, defaults to debug level
    pub fn new(format: LogFormat, level: String, verbose: bool) -> Self {
        Self {
            format,
            level,
            verbose,
            target: LogTarget::Stderr,
        }
    }

    pub fn with_target(mut self, target: LogTarget) -> Self {
        self.target = target;
        self
    }

    fn make_writer(&self) -> Result<BoxMakeWriter> {
        match &self.target {
            LogTarget::Stderr => Ok(BoxMakeWriter::new(std::io::stderr)),
            LogTarget::File(path) => {
                let file_name = path.file_name().ok_or_else(|| {
                    PenfeedError::Logging(format!("log path has no file name: {}", path.display()))
                })?;
                let dir = match path.parent() {
                    Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
                    _ => PathBuf::from("."),
                };
                std::fs::create_dir_all(&dir).map_err(|e| {
                    PenfeedError::Logging(format!("cannot create {}: {}", dir.display(), e))
                })?;
                Ok(BoxMakeWriter::new(tracing_appender::rolling::never(
                    dir, file_name,
                )))
            }
        }
    }

    /// Initialize logging with the configured settings
    ///
    /// This should be called once at the start of your program.
    ///
    /// # Errors
    ///
    /// Fails if the log file cannot be prepared or a global subscriber is
    /// already installed.
    pub fn init(&self) -> Result<()> {
        use tracing_subscriber::EnvFilter;

        let filter = if self.verbose {
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"))
        } else {
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&self.level))
        };
        let writer = self.make_writer()?;
        let ansi = self.target == LogTarget::Stderr;

        let installed = match self.format {
            LogFormat::Json => tracing_subscriber::fmt()
                .json()
                .with_env_filter(filter)
                .with_writer(writer)
                .with_current_span(true)
                .with_span_list(true)
                .flatten_event(true)
                .with_target(true)
                .with_line_number(true)
                .with_file(true)
                .try_init(),
            LogFormat::Pretty => tracing_subscriber::fmt()
                .pretty()
                .with_env_filter(filter)
                .with_writer(writer)
                .with_ansi(ansi)
                .with_target(true)
                .with_line_number(true)
                .with_file(true)
                .try_init(),
            LogFormat::Text => tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(writer)
                .with_ansi(ansi)
                .with_target(false)
                .with_level(true)
                .try_init(),
        };

        installed.map_err(|e| PenfeedError::Logging(e.to_string()))
    }
}

/// Build a logging configuration from the environment
///
/// Respects `PENFEED_LOG_FORMAT` and `PENFEED_LOG_LEVEL`.
/// Falls back to text format with info level if not set.
pub fn config_from_env(verbose: bool) -> LoggingConfig {
    let format = std::env::var("PENFEED_LOG_FORMAT")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(LogFormat::Text);

    let level = std::env::var("PENFEED_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

    LoggingConfig::new(format, level, verbose)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    fn test_log_format_parses_any_case() {
        for (input, format) in [
            ("text", LogFormat::Text),
            ("JSON", LogFormat::Json),
            ("Pretty", LogFormat::Pretty),
        ] {
            assert_eq!(input.parse::<LogFormat>().unwrap(), format);
            assert_eq!(format.to_string(), input.to_lowercase());
        }
        assert!("xml".parse::<LogFormat>().is_err());
    }

    #[test]
    #[serial]
    fn test_config_from_env() {
        std::env::set_var("PENFEED_LOG_FORMAT", "json");
        std::env::set_var("PENFEED_LOG_LEVEL", "warn");
        let config = config_from_env(false);
        std::env::remove_var("PENFEED_LOG_FORMAT");
        std::env::remove_var("PENFEED_LOG_LEVEL");

        assert_eq!(config.format, LogFormat::Json);
        assert_eq!(config.level, "warn");
        assert_eq!(config.target, LogTarget::Stderr);
    }

    #[test]
    #[serial]
    fn test_bad_env_format_falls_back_to_text() {
        std::env::set_var("PENFEED_LOG_FORMAT", "xml");
        let config = config_from_env(true);
        std::env::remove_var("PENFEED_LOG_FORMAT");

        assert_eq!(config.format, LogFormat::Text);
        assert!(config.verbose);
    }

    #[test]
    fn test_file_target_creates_directory() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("pen.log");
        let config = LoggingConfig::new(LogFormat::Text, "info".to_string(), false)
            .with_target(LogTarget::File(path));

        assert!(config.make_writer().is_ok());
        assert!(dir.path().join("nested").is_dir());
    }

    #[test]
    fn test_target_without_file_name_rejected() {
        let config = LoggingConfig::new(LogFormat::Text, "info".to_string(), false)
            .with_target(LogTarget::File(PathBuf::from("/")));

        assert!(matches!(config.make_writer(), Err(PenfeedError::Logging(_))));
    }
}
