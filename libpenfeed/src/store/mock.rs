//! Mock store implementation for testing
//!
//! An in-memory store that records every call it receives, including whether
//! the loading indicator was visible while the call ran. Either operation
//! can be switched to fail so error paths can be exercised without a network.

use async_trait::async_trait;
use std::sync::{Arc, Mutex};

use crate::error::{StoreError, StoreOp};
use crate::service::loading::LoadingIndicator;
use crate::store::PostStore;
use crate::types::Post;

/// A call the mock store received
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreCall {
    GetPosts,
    CreatePost {
        title: String,
        body: String,
        author: String,
    },
}

/// A call plus what the loading indicator showed while it ran
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedCall {
    pub call: StoreCall,
    /// `None` when no indicator is being observed
    pub loading_visible: Option<bool>,
}

#[derive(Default)]
struct MockInner {
    posts: Vec<Post>,
    calls: Vec<RecordedCall>,
    get_error: Option<String>,
    create_error: Option<String>,
    echo_created: bool,
    next_timestamp: i64,
    observed: Option<LoadingIndicator>,
}

/// In-memory post store
///
/// Clones share state, so a test can keep one handle while the service owns
/// another.
#[derive(Clone)]
pub struct MockStore {
    inner: Arc<Mutex<MockInner>>,
}

impl Default for MockStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MockStore {
    /// Create an empty store that succeeds and echoes created posts
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Mutex::new(MockInner {
                echo_created: true,
                next_timestamp: 1_700_000_000_000_000_000,
                ..Default::default()
            })),
        }
    }

    /// Create a store pre-populated with posts
    pub fn with_posts(posts: Vec<Post>) -> Self {
        let store = Self::new();
        store.lock().posts = posts;
        store
    }

    /// Create a store whose `get_posts` always fails
    pub fn failing_get(reason: &str) -> Self {
        let store = Self::new();
        store.set_get_error(Some(reason));
        store
    }

    /// Create a store whose `create_post` always fails
    pub fn failing_create(reason: &str) -> Self {
        let store = Self::new();
        store.set_create_error(Some(reason));
        store
    }

    /// Record the indicator's visibility on every call from now on
    pub fn observe(&self, indicator: &LoadingIndicator) {
        self.lock().observed = Some(indicator.clone());
    }

    pub fn set_get_error(&self, reason: Option<&str>) {
        self.lock().get_error = reason.map(str::to_string);
    }

    pub fn set_create_error(&self, reason: Option<&str>) {
        self.lock().create_error = reason.map(str::to_string);
    }

    /// Return `None` from `create_post` instead of the created post
    pub fn set_echo_created(&self, echo: bool) {
        self.lock().echo_created = echo;
    }

    /// Every call received so far, oldest first
    pub fn calls(&self) -> Vec<RecordedCall> {
        self.lock().calls.clone()
    }

    /// Calls without the indicator observations
    pub fn call_kinds(&self) -> Vec<StoreCall> {
        self.lock().calls.iter().map(|c| c.call.clone()).collect()
    }

    /// Posts currently held
    pub fn posts(&self) -> Vec<Post> {
        self.lock().posts.clone()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, MockInner> {
        // A panic inside a test holding the lock should not hide the original failure
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn record(inner: &mut MockInner, call: StoreCall) {
        let loading_visible = inner.observed.as_ref().map(|i| i.is_visible());
        inner.calls.push(RecordedCall {
            call,
            loading_visible,
        });
    }
}

#[async_trait]
impl PostStore for MockStore {
    async fn get_posts(&self) -> Result<Vec<Post>, StoreError> {
        let mut inner = self.lock();
        Self::record(&mut inner, StoreCall::GetPosts);

        if let Some(reason) = &inner.get_error {
            return Err(StoreError::new(StoreOp::GetPosts, reason.clone()));
        }
        Ok(inner.posts.clone())
    }

    async fn create_post(
        &self,
        title: &str,
        body: &str,
        author: &str,
    ) -> Result<Option<Post>, StoreError> {
        let mut inner = self.lock();
        Self::record(
            &mut inner,
            StoreCall::CreatePost {
                title: title.to_string(),
                body: body.to_string(),
                author: author.to_string(),
            },
        );

        if let Some(reason) = &inner.create_error {
            return Err(StoreError::new(StoreOp::CreatePost, reason.clone()));
        }

        let post = Post {
            title: title.to_string(),
            author: author.to_string(),
            body: body.to_string(),
            timestamp: inner.next_timestamp,
        };
        inner.next_timestamp += 1_000_000_000;
        inner.posts.push(post.clone());

        Ok(if inner.echo_created { Some(post) } else { None })
    }

    fn name(&self) -> &str {
        "mock"
    }
}
