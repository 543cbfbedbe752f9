//! Shared helpers for the end-to-end tests.
//!
//! Each test talks to a real `HttpVideoApi` pointed at a mockito server, so
//! the whole path from `AppState` down to the wire is exercised.

#![allow(dead_code)]

use mockito::{Mock, ServerGuard};
use serde_json::{Value, json};
use std::sync::Arc;
use std::time::Duration;
use tubedeck::backends::HttpVideoApi;
use tubedeck::services::{AutoConfirm, MemoryCredentialStore};
use tubedeck::state::AppState;

pub struct TestApp {
    pub server: ServerGuard,
    pub app: AppState,
    pub store: Arc<MemoryCredentialStore>,
}

impl TestApp {
    pub async fn new() -> Self {
        Self::build(None, true).await
    }

    /// Starts with `token` already saved, as after a previous run.
    pub async fn with_saved_token(token: &str) -> Self {
        Self::build(Some(token), true).await
    }

    /// Declines every confirmation prompt.
    pub async fn declining() -> Self {
        Self::build(Some("T"), false).await
    }

    async fn build(token: Option<&str>, confirm: bool) -> Self {
        let server = mockito::Server::new_async().await;
        let api = HttpVideoApi::new(&server.url(), Some(Duration::from_secs(5)))
            .expect("mock server URL is valid");
        let store = Arc::new(match token {
            Some(token) => MemoryCredentialStore::with_token(token),
            None => MemoryCredentialStore::new(),
        });
        let app = AppState::new(Arc::new(api), store.clone(), Arc::new(AutoConfirm(confirm)));
        Self { server, app, store }
    }

    pub async fn mock_login(&mut self, response: Value) -> Mock {
        self.server
            .mock("POST", "/auth/login")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(response.to_string())
            .create_async()
            .await
    }

    pub async fn mock_videos(&mut self, token: &str, videos: Value) -> Mock {
        self.server
            .mock("GET", "/videos")
            .match_header("authorization", format!("Bearer {token}").as_str())
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(videos.to_string())
            .create_async()
            .await
    }

    pub async fn mock_status(&mut self, method: &str, path: &str, status: usize, body: Value) -> Mock {
        self.server
            .mock(method, path)
            .with_status(status)
            .with_header("content-type", "application/json")
            .with_body(body.to_string())
            .create_async()
            .await
    }
}

pub fn video_json(id: &str, title: &str) -> Value {
    json!({
        "_id": id,
        "title": title,
        "description": format!("about {title}"),
        "youtube_id": format!("yt-{id}"),
        "thumbnail_url": format!("https://img.youtube.com/vi/yt-{id}/hqdefault.jpg"),
        "is_active": true
    })
}
