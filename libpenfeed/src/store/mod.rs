//! Post store abstraction and implementations
//!
//! The post store is the service of record for posts: it assigns identity,
//! decides ordering and persists everything. Penfeed only ever lists posts
//! and creates new ones through the [`PostStore`] trait.
//!
//! # Examples
//!
//! ```no_run
//! use libpenfeed::store::{PostStore, http::HttpPostStore};
//!
//! # async fn example() -> Result<(), libpenfeed::StoreError> {
//! let store = HttpPostStore::new("http://127.0.0.1:8080/api");
//!
//! store.create_post("Hello", "<p>World</p>", "Alice").await?;
//! for post in store.get_posts().await? {
//!     println!("{} by {}", post.title, post.author);
//! }
//! # Ok(())
//! # }
//! ```

use async_trait::async_trait;

use crate::error::StoreError;
use crate::types::Post;

pub mod http;

// Mock store is available for all builds (not just tests) to support integration tests
pub mod mock;

/// Remote post store
#[async_trait]
pub trait PostStore: Send + Sync {
    /// Fetch every post, in the store's order
    ///
    /// # Errors
    ///
    /// Returns a [`StoreError`] on transport or service failure.
    async fn get_posts(&self) -> Result<Vec<Post>, StoreError>;

    /// Create a post
    ///
    /// Note the argument order: title, body, author. Stores may echo the
    /// created post back or return nothing.
    ///
    /// # Errors
    ///
    /// Returns a [`StoreError`] on transport, service or validation failure.
    async fn create_post(
        &self,
        title: &str,
        body: &str,
        author: &str,
    ) -> Result<Option<Post>, StoreError>;

    /// Short name for logs
    fn name(&self) -> &str;
}
