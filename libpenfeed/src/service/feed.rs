//! Feed view
//!
//! Fetches posts from the store and renders them into a [`Feed`]: one
//! [`PostBlock`] per post, in store order, with a display date derived from
//! the post's nanosecond timestamp. Every render replaces the previous feed
//! wholesale.

use std::sync::Arc;

use askama::Template;
use chrono::{DateTime, Local, Utc};
use tracing::{debug, error};

use crate::config::{DisplayConfig, Zone};
use crate::error::{Result, StoreError};
use crate::store::PostStore;
use crate::types::{Post, NANOS_PER_MILLI};

use super::loading::LoadingIndicator;

/// Shown for timestamps outside chrono's date range
pub const INVALID_DATE: &str = "Invalid Date";

/// How post dates are displayed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateStyle {
    pub format: String,
    pub zone: Zone,
}

impl Default for DateStyle {
    fn default() -> Self {
        Self::from(&DisplayConfig::default())
    }
}

impl From<&DisplayConfig> for DateStyle {
    fn from(display: &DisplayConfig) -> Self {
        Self {
            format: display.date_format.clone(),
            zone: display.timezone,
        }
    }
}

impl DateStyle {
    pub fn utc(format: &str) -> Self {
        Self {
            format: format.to_string(),
            zone: Zone::Utc,
        }
    }

    /// Format a nanosecond timestamp
    pub fn format_nanos(&self, nanos: i64) -> String {
        self.format_millis(nanos / NANOS_PER_MILLI)
    }

    /// Format a millisecond timestamp
    pub fn format_millis(&self, millis: i64) -> String {
        let Some(utc) = DateTime::<Utc>::from_timestamp_millis(millis) else {
            return INVALID_DATE.to_string();
        };
        match self.zone {
            Zone::Utc => utc.format(&self.format).to_string(),
            Zone::Local => utc.with_timezone(&Local).format(&self.format).to_string(),
        }
    }
}

/// One rendered post
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostBlock {
    pub title: String,
    /// Author prefixed with "By "
    pub byline: String,
    pub date: String,
    /// Raw body markup, not escaped
    pub body_html: String,
}

impl PostBlock {
    pub fn render(post: &Post, dates: &DateStyle) -> Self {
        Self {
            title: post.title.clone(),
            byline: format!("By {}", post.author),
            date: dates.format_nanos(post.timestamp),
            body_html: post.body.clone(),
        }
    }
}

#[derive(Template)]
#[template(path = "feed.html")]
struct FeedTemplate<'a> {
    blocks: &'a [PostBlock],
}

/// The rendered list of posts
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Feed {
    blocks: Vec<PostBlock>,
}

impl Feed {
    /// Render posts in the order given
    pub fn render(posts: &[Post], dates: &DateStyle) -> Self {
        Self {
            blocks: posts.iter().map(|p| PostBlock::render(p, dates)).collect(),
        }
    }

    pub fn blocks(&self) -> &[PostBlock] {
        &self.blocks
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// Markup for the feed container
    ///
    /// Titles and bylines are escaped; bodies are inserted as-is.
    pub fn to_html(&self) -> Result<String> {
        Ok(FeedTemplate {
            blocks: &self.blocks,
        }
        .render()?)
    }
}

/// What a reload did to the feed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReloadOutcome {
    /// Fetch succeeded and the feed was replaced
    Replaced,
    /// Fetch failed and the previous feed was kept
    Kept,
}

/// Lists posts from the store
#[derive(Clone)]
pub struct PostListView {
    store: Arc<dyn PostStore>,
    loading: LoadingIndicator,
    dates: DateStyle,
}

impl PostListView {
    pub fn new(store: Arc<dyn PostStore>, loading: LoadingIndicator, dates: DateStyle) -> Self {
        Self {
            store,
            loading,
            dates,
        }
    }

    /// Fetch posts and render a fresh feed
    ///
    /// The loading indicator is visible for the duration of the store call.
    /// Failures are logged and yield `None`.
    pub async fn fetch(&self) -> Option<Feed> {
        match self.try_fetch().await {
            Ok(feed) => Some(feed),
            Err(e) => {
                error!(store = self.store.name(), error = %e, "Error loading posts");
                None
            }
        }
    }

    /// Like [`fetch`](Self::fetch), but hands the store error to the caller
    pub async fn try_fetch(&self) -> std::result::Result<Feed, StoreError> {
        let posts = {
            let _busy = self.loading.show();
            self.store.get_posts().await?
        };
        debug!(store = self.store.name(), count = posts.len(), "Loaded posts");
        Ok(Feed::render(&posts, &self.dates))
    }

    /// Replace `feed` with the store's current posts
    ///
    /// On failure `feed` is left exactly as it was.
    pub async fn reload(&self, feed: &mut Feed) -> ReloadOutcome {
        match self.fetch().await {
            Some(fresh) => {
                *feed = fresh;
                ReloadOutcome::Replaced
            }
            None => ReloadOutcome::Kept,
        }
    }
}
