//! Penfeed - a small blog front end over a remote post store
//!
//! This library holds everything a Penfeed front end needs: the post model,
//! the store interface and its adapters, the feed view, the composer
//! workflow and the shared loading indicator.

pub mod config;
pub mod error;
pub mod logging;
pub mod service;
pub mod store;
pub mod types;

// Re-export commonly used types
pub use config::Config;
pub use error::{PenfeedError, Result, StoreError};
pub use service::BlogService;
pub use store::PostStore;
pub use types::{NewPost, Post};
