//! HTTP store tests against a mock server

use libpenfeed::error::StoreOp;
use libpenfeed::store::http::HttpPostStore;
use libpenfeed::store::PostStore;
use mockito::{Matcher, Server, ServerGuard};
use serde_json::json;

async fn server() -> ServerGuard {
    Server::new_async().await
}

fn store(server: &ServerGuard) -> HttpPostStore {
    let client = reqwest::Client::builder().no_proxy().build().unwrap();
    HttpPostStore::with_client(format!("{}/api", server.url()), client)
}

#[tokio::test]
async fn test_get_posts_parses_array_in_order() {
    let mut server = server().await;
    let mock = server
        .mock("GET", "/api/posts")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            r#"[{"title":"B","author":"x","body":"<p>b</p>","timestamp":2},
                {"title":"A","author":"y","body":"<p>a</p>","timestamp":"1"}]"#,
        )
        .create_async()
        .await;

    let posts = store(&server).get_posts().await.unwrap();

    mock.assert_async().await;
    assert_eq!(posts.len(), 2);
    assert_eq!(posts[0].title, "B");
    assert_eq!(posts[1].timestamp, 1);
}

#[tokio::test]
async fn test_create_post_sends_json_fields() {
    let mut server = server().await;
    let mock = server
        .mock("POST", "/api/posts")
        .match_header("content-type", "application/json")
        .match_body(Matcher::Json(json!({
            "title": "Hello",
            "body": "<p>World</p>",
            "author": "Alice",
        })))
        .with_status(201)
        .with_header("content-type", "application/json")
        .with_body(
            r#"{"title":"Hello","author":"Alice","body":"<p>World</p>","timestamp":1700000000000000000}"#,
        )
        .create_async()
        .await;

    let created = store(&server)
        .create_post("Hello", "<p>World</p>", "Alice")
        .await
        .unwrap();

    mock.assert_async().await;
    assert_eq!(created.unwrap().timestamp, 1_700_000_000_000_000_000);
}

#[tokio::test]
async fn test_create_post_with_empty_response() {
    let mut server = server().await;
    let mock = server
        .mock("POST", "/api/posts")
        .with_status(200)
        .create_async()
        .await;

    let created = store(&server).create_post("T", "B", "A").await.unwrap();

    mock.assert_async().await;
    assert!(created.is_none());
}

#[tokio::test]
async fn test_server_error_is_store_error() {
    let mut server = server().await;
    server
        .mock("GET", "/api/posts")
        .with_status(500)
        .with_body("database locked")
        .create_async()
        .await;

    let err = store(&server).get_posts().await.unwrap_err();

    assert_eq!(err.op, StoreOp::GetPosts);
    assert!(err.reason.contains("500"));
    assert!(err.reason.contains("database locked"));
}

#[tokio::test]
async fn test_rejected_create_is_store_error() {
    let mut server = server().await;
    server
        .mock("POST", "/api/posts")
        .with_status(400)
        .with_body(r#"{"error":"title required"}"#)
        .create_async()
        .await;

    let err = store(&server).create_post("", "", "").await.unwrap_err();

    assert_eq!(err.op, StoreOp::CreatePost);
    assert!(err.reason.contains("title required"));
}

#[tokio::test]
async fn test_malformed_body_is_store_error() {
    let mut server = server().await;
    server
        .mock("GET", "/api/posts")
        .with_status(200)
        .with_body("not json")
        .create_async()
        .await;

    let err = store(&server).get_posts().await.unwrap_err();

    assert!(err.reason.starts_with("invalid response"));
}
