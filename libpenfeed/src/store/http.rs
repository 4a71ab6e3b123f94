//! HTTP post store
//!
//! Talks JSON to a REST gateway in front of the store:
//!
//! - `GET {base}/posts` returns an array of posts
//! - `POST {base}/posts` with `{"title","body","author"}` returns the created
//!   post or an empty body

use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;

use crate::error::{StoreError, StoreOp};
use crate::store::PostStore;
use crate::types::Post;

/// Store reached over HTTP
///
/// No request timeout is configured; a hung store is the store's problem.
pub struct HttpPostStore {
    base_url: String,
    http: Client,
}

#[derive(Serialize)]
struct CreatePostBody<'a> {
    title: &'a str,
    body: &'a str,
    author: &'a str,
}

impl HttpPostStore {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(base_url, Client::new())
    }

    pub fn with_client(base_url: impl Into<String>, http: Client) -> Self {
        Self {
            base_url: base_url.into(),
            http,
        }
    }

    fn posts_url(&self) -> String {
        format!("{}/posts", self.base_url.trim_end_matches('/'))
    }
}

/// Turn a non-success response into a store error carrying the body text
async fn check_status(
    op: StoreOp,
    resp: reqwest::Response,
) -> Result<reqwest::Response, StoreError> {
    if resp.status().is_success() {
        return Ok(resp);
    }
    let status = resp.status();
    let body = resp.text().await.unwrap_or_default();
    let reason = if body.trim().is_empty() {
        format!("HTTP {}", status)
    } else {
        format!("HTTP {}: {}", status, body.trim())
    };
    Err(StoreError::new(op, reason))
}

#[async_trait]
impl PostStore for HttpPostStore {
    async fn get_posts(&self) -> Result<Vec<Post>, StoreError> {
        let op = StoreOp::GetPosts;
        let resp = self
            .http
            .get(self.posts_url())
            .send()
            .await
            .map_err(|e| StoreError::new(op, format!("request failed: {}", e)))?;
        let resp = check_status(op, resp).await?;

        resp.json::<Vec<Post>>()
            .await
            .map_err(|e| StoreError::new(op, format!("invalid response: {}", e)))
    }

    async fn create_post(
        &self,
        title: &str,
        body: &str,
        author: &str,
    ) -> Result<Option<Post>, StoreError> {
        let op = StoreOp::CreatePost;
        let resp = self
            .http
            .post(self.posts_url())
            .json(&CreatePostBody {
                title,
                body,
                author,
            })
            .send()
            .await
            .map_err(|e| StoreError::new(op, format!("request failed: {}", e)))?;
        let resp = check_status(op, resp).await?;

        let text = resp
            .text()
            .await
            .map_err(|e| StoreError::new(op, format!("failed to read response: {}", e)))?;
        if text.trim().is_empty() || text.trim() == "null" {
            return Ok(None);
        }
        serde_json::from_str::<Post>(&text)
            .map(Some)
            .map_err(|e| StoreError::new(op, format!("invalid response: {}", e)))
    }

    fn name(&self) -> &str {
        "http"
    }
}
