//! Error types for Penfeed

use std::fmt;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, PenfeedError>;

#[derive(Error, Debug)]
pub enum PenfeedError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    #[error("Render error: {0}")]
    Render(#[from] askama::Error),

    #[error("Logging error: {0}")]
    Logging(String),
}

impl PenfeedError {
    /// Returns the appropriate exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            PenfeedError::Config(_) => 2,
            PenfeedError::Store(_) => 1,
            PenfeedError::Render(_) => 1,
            PenfeedError::Logging(_) => 1,
        }
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("Missing required field: {0}")]
    MissingField(String),

    #[error("Invalid value for {field}: {reason}")]
    InvalidValue { field: String, reason: String },
}

/// Store operation that failed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreOp {
    GetPosts,
    CreatePost,
}

impl fmt::Display for StoreOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreOp::GetPosts => write!(f, "get_posts"),
            StoreOp::CreatePost => write!(f, "create_post"),
        }
    }
}

/// A failed store call.
///
/// Network, service and validation failures are all reported the same way;
/// callers only ever learn that the call failed and why.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{op} failed: {reason}")]
pub struct StoreError {
    pub op: StoreOp,
    pub reason: String,
}

impl StoreError {
    pub fn new(op: StoreOp, reason: impl Into<String>) -> Self {
        Self {
            op,
            reason: reason.into(),
        }
    }
}
