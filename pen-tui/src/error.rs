//! Error types for pen-tui
//!
//! Provides TUI-specific error types that wrap service layer errors
//! and terminal/IO errors for unified error handling.

use thiserror::Error;

/// TUI-specific errors
#[derive(Error, Debug)]
pub enum TuiError {
    /// Service layer error
    #[error("Service error: {0}")]
    Service(#[from] libpenfeed::PenfeedError),

    /// Terminal/IO error
    #[error("Terminal error: {0}")]
    Terminal(#[from] std::io::Error),
}

impl TuiError {
    /// Process exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            TuiError::Service(e) => e.exit_code(),
            TuiError::Terminal(_) => 1,
        }
    }
}

/// Result type for TUI operations
pub type Result<T> = std::result::Result<T, TuiError>;

#[cfg(test)]
mod tests {
    use super::*;
    use libpenfeed::error::ConfigError;

    #[test]
    fn test_service_error_keeps_library_exit_code() {
        let err = TuiError::Service(ConfigError::MissingField("store.url".to_string()).into());
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn test_terminal_error_exit_code() {
        let err = TuiError::Terminal(std::io::Error::new(std::io::ErrorKind::Other, "tty"));
        assert_eq!(err.exit_code(), 1);
    }
}
