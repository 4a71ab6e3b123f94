//! Service layer for Penfeed
//!
//! Front ends talk to the post store only through this module.
//!
//! - `PostListView` (in [`feed`]): fetch and render the feed
//! - `PostComposer` (in [`composer`]): the create, reload, reset workflow
//! - `LoadingIndicator` (in [`loading`]): the shared busy flag bracketing store calls
//! - `RichTextEditor` (in [`editor`]): the seam to the body editor widget
//!
//! # Example
//!
//! ```no_run
//! use libpenfeed::{BlogService, Config};
//! use libpenfeed::service::composer::{ComposerState, Field};
//! use libpenfeed::service::editor::HtmlBuffer;
//! use libpenfeed::service::feed::Feed;
//!
//! # async fn example() -> libpenfeed::Result<()> {
//! let service = BlogService::new(&Config::load_or_default()?);
//!
//! let mut feed = Feed::default();
//! service.feed().reload(&mut feed).await;
//!
//! let state = ComposerState::new()
//!     .open()
//!     .set_field(Field::Title, "Hello".to_string())
//!     .set_field(Field::Author, "Alice".to_string());
//! let mut editor = HtmlBuffer::new("<p>World</p>");
//! let state = service.composer().submit(state, &mut editor, &mut feed).await;
//! assert!(!state.is_visible());
//! # Ok(())
//! # }
//! ```

pub mod composer;
pub mod editor;
pub mod feed;
pub mod loading;

use std::sync::Arc;

use self::composer::PostComposer;
use self::feed::{DateStyle, PostListView};
use self::loading::LoadingIndicator;
use crate::config::{Config, DisplayConfig};
use crate::error::Result;
use crate::store::http::HttpPostStore;
use crate::store::PostStore;

/// Main service facade
///
/// Owns the store handle and the loading indicator and hands out the feed
/// view and composer, which share both.
pub struct BlogService {
    store: Arc<dyn PostStore>,
    loading: LoadingIndicator,
    feed: PostListView,
    composer: PostComposer,
}

impl BlogService {
    /// Create a service talking to the HTTP store named in `config`
    pub fn new(config: &Config) -> Self {
        let store: Arc<dyn PostStore> = Arc::new(HttpPostStore::new(config.store.url.clone()));
        Self::from_store(store, &config.display)
    }

    /// Create a service over any store, useful for testing
    pub fn from_store(store: Arc<dyn PostStore>, display: &DisplayConfig) -> Self {
        let loading = LoadingIndicator::new();
        let feed = PostListView::new(
            Arc::clone(&store),
            loading.clone(),
            DateStyle::from(display),
        );
        let composer = PostComposer::new(Arc::clone(&store), loading.clone(), feed.clone());

        Self {
            store,
            loading,
            feed,
            composer,
        }
    }

    /// The feed view
    pub fn feed(&self) -> &PostListView {
        &self.feed
    }

    /// The composer workflow
    pub fn composer(&self) -> &PostComposer {
        &self.composer
    }

    /// The loading indicator shared by every store call
    pub fn loading(&self) -> &LoadingIndicator {
        &self.loading
    }

    /// Fetch the feed and render the container markup
    ///
    /// Unlike a reload, a store failure is returned rather than logged.
    pub async fn feed_html(&self) -> Result<String> {
        let feed = self.feed.try_fetch().await?;
        feed.to_html()
    }

    pub fn store_name(&self) -> &str {
        self.store.name()
    }
}
