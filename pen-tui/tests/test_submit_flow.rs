//! End-to-end flows through the reducer and the service handle
//!
//! Uses the in-memory store so the whole loop (reduce, run effect, apply
//! service events) can be driven without a terminal or network.

use std::sync::Arc;
use std::time::Duration;

use libpenfeed::config::DisplayConfig;
use libpenfeed::service::composer::{Field, Panel};
use libpenfeed::store::mock::{MockStore, StoreCall};
use libpenfeed::Post;
use pen_tui::app::{reduce, Action, AppState};
use pen_tui::services::{ServiceEvent, ServiceHandle};

fn post(title: &str) -> Post {
    Post {
        title: title.to_string(),
        author: "Alice".to_string(),
        body: "<p>Body</p>".to_string(),
        timestamp: 1_700_000_000_000_000_000,
    }
}

fn services(store: &MockStore) -> ServiceHandle {
    ServiceHandle::with_store(Arc::new(store.clone()), &DisplayConfig::default())
        .expect("service handle")
}

/// Reduce, start any requested work, then apply service events until the
/// store is idle again
fn dispatch_and_settle(state: AppState, action: Action, services: &ServiceHandle) -> AppState {
    let mut state = state;
    for event in services.try_events() {
        state = reduce(state, event.into());
    }
    state = reduce(state, Action::LoadingChanged(services.is_loading()));

    let mut state = reduce(state, action);
    let Some(effect) = state.effect.take() else {
        return state;
    };
    services.run(effect);

    loop {
        let event = services
            .next_event(Duration::from_secs(5))
            .expect("timed out waiting for the store");
        let finished = matches!(
            event,
            ServiceEvent::FeedLoaded(_) | ServiceEvent::FeedUnchanged | ServiceEvent::Submitted(_)
        );
        state = reduce(state, event.into());
        if finished {
            break;
        }
    }

    // The hide notification may trail the result
    let deadline = std::time::Instant::now() + Duration::from_secs(5);
    while state.loading && std::time::Instant::now() < deadline {
        if let Some(event) = services.next_event(Duration::from_millis(50)) {
            state = reduce(state, event.into());
        }
    }
    reduce(state, Action::LoadingChanged(services.is_loading()))
}

fn fill(state: AppState, title: &str, author: &str, body: &str) -> AppState {
    let state = reduce(state, Action::ComposerOpen);
    let state = reduce(
        state,
        Action::ComposerFieldChanged {
            field: Field::Title,
            value: title.to_string(),
        },
    );
    let state = reduce(
        state,
        Action::ComposerFieldChanged {
            field: Field::Author,
            value: author.to_string(),
        },
    );
    reduce(
        state,
        Action::ComposerFieldChanged {
            field: Field::Body,
            value: body.to_string(),
        },
    )
}

#[test]
fn test_startup_reload_fills_feed() {
    let store = MockStore::with_posts(vec![post("First"), post("Second")]);
    let services = services(&store);

    let state = dispatch_and_settle(AppState::new(), Action::FeedReloadRequested, &services);

    assert_eq!(state.feed.len(), 2);
    assert_eq!(state.feed.blocks()[0].title, "First");
    assert_eq!(state.feed.blocks()[1].title, "Second");
    assert!(!state.reload_in_flight);
    assert!(!state.loading);
}

#[test]
fn test_failed_reload_keeps_feed_and_allows_retry() {
    let store = MockStore::with_posts(vec![post("First")]);
    let services = services(&store);
    let state = dispatch_and_settle(AppState::new(), Action::FeedReloadRequested, &services);

    store.set_get_error(Some("HTTP 503"));
    let state = dispatch_and_settle(state, Action::FeedReloadRequested, &services);
    assert_eq!(state.feed.len(), 1);
    assert!(state.can_reload());

    store.set_get_error(None);
    let state = dispatch_and_settle(state, Action::FeedReloadRequested, &services);
    assert_eq!(state.feed.len(), 1);
    assert_eq!(store.call_kinds().len(), 3);
}

#[test]
fn test_submit_creates_then_reloads() {
    let store = MockStore::new();
    let services = services(&store);

    let state = fill(AppState::new(), "Hello", "Alice", "<p>World</p>");
    let state = dispatch_and_settle(state, Action::ComposerSubmitRequested, &services);

    assert_eq!(
        store.call_kinds(),
        vec![
            StoreCall::CreatePost {
                title: "Hello".to_string(),
                body: "<p>World</p>".to_string(),
                author: "Alice".to_string(),
            },
            StoreCall::GetPosts,
        ]
    );
    assert_eq!(state.composer.panel, Panel::Closed);
    assert!(state.composer.title.is_empty());
    assert!(state.composer.author.is_empty());
    assert_eq!(state.feed.len(), 1);
    assert_eq!(state.feed.blocks()[0].byline, "By Alice");
}

#[test]
fn test_failed_submit_keeps_fields() {
    let store = MockStore::failing_create("HTTP 500");
    let services = services(&store);

    let state = fill(AppState::new(), "Hello", "Alice", "<p>World</p>");
    let state = dispatch_and_settle(state, Action::ComposerSubmitRequested, &services);

    assert_eq!(state.composer.panel, Panel::Open);
    assert_eq!(state.composer.title, "Hello");
    assert_eq!(state.composer.author, "Alice");
    assert!(state.can_submit());
    // No reload after a failed create
    assert_eq!(store.call_kinds().len(), 1);
}

#[test]
fn test_indicator_visible_during_store_calls() {
    let store = MockStore::new();
    let services = services(&store);
    store.observe(services.loading());

    let state = fill(AppState::new(), "Hello", "Alice", "<p>World</p>");
    let state = dispatch_and_settle(state, Action::ComposerSubmitRequested, &services);

    let calls = store.calls();
    assert_eq!(calls.len(), 2);
    assert!(calls.iter().all(|c| c.loading_visible == Some(true)));
    assert!(!state.loading);
    assert!(!services.is_loading());
}

#[test]
fn test_two_reloads_yield_identical_feeds() {
    let store = MockStore::with_posts(vec![post("First"), post("Second")]);
    let services = services(&store);

    let first = dispatch_and_settle(AppState::new(), Action::FeedReloadRequested, &services);
    let second = dispatch_and_settle(first.clone(), Action::FeedReloadRequested, &services);

    assert_eq!(first.feed, second.feed);
}
