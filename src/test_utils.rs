#![cfg(test)]

use async_trait::async_trait;
use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tokio::sync::Notify;

use crate::backends::VideoBackend;
use crate::backends::api::{ApiError, LoginResponse};
use crate::models::{Credential, NewVideo, UserProfile, Video, VideoId};
use crate::services::{AutoConfirm, Confirm, MemoryCredentialStore};
use crate::state::AppState;

pub fn video(id: &str, title: &str) -> Video {
    Video {
        id: VideoId::new(id),
        title: title.to_string(),
        description: format!("about {title}"),
        source_id: format!("yt-{id}"),
        thumbnail_url: None,
    }
}

struct ScriptedList {
    gate: Option<Arc<Notify>>,
    result: Result<Vec<Video>, ApiError>,
}

#[derive(Default)]
struct MockState {
    login_token: Option<String>,
    login_error: Option<ApiError>,
    videos: Vec<Video>,
    scripted_lists: VecDeque<ScriptedList>,
    list_error: Option<ApiError>,
    create_error: Option<ApiError>,
    delete_error: Option<ApiError>,
    delete_gate: Option<Arc<Notify>>,
    created: Vec<NewVideo>,
    deleted: Vec<VideoId>,
    tokens_seen: Vec<String>,
    calls: HashMap<&'static str, usize>,
    next_id: usize,
}

/// In-memory stand-in for the video API.
///
/// Behaves like a tiny server (create/delete change what list returns) and
/// can be scripted to fail or to hold a list response until released.
#[derive(Default)]
pub struct MockBackend {
    state: Mutex<MockState>,
}

impl std::fmt::Debug for MockBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("MockBackend")
    }
}

impl MockBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_videos(videos: Vec<Video>) -> Self {
        let backend = Self::new();
        backend.state().videos = videos;
        backend
    }

    fn state(&self) -> std::sync::MutexGuard<'_, MockState> {
        self.state.lock().unwrap()
    }

    fn record(&self, call: &'static str, credential: Option<&Credential>) {
        let mut state = self.state();
        *state.calls.entry(call).or_default() += 1;
        if let Some(credential) = credential {
            state.tokens_seen.push(credential.as_str().to_string());
        }
    }

    pub fn accept_logins_with(&self, token: &str) {
        self.state().login_token = Some(token.to_string());
    }

    pub fn fail_logins_with(&self, error: ApiError) {
        self.state().login_error = Some(error);
    }

    pub fn set_videos(&self, videos: Vec<Video>) {
        self.state().videos = videos;
    }

    pub fn fail_lists_with(&self, error: Option<ApiError>) {
        self.state().list_error = error;
    }

    pub fn fail_creates_with(&self, error: ApiError) {
        self.state().create_error = Some(error);
    }

    pub fn fail_deletes_with(&self, error: ApiError) {
        self.state().delete_error = Some(error);
    }

    /// Holds every delete until `gate` is notified.
    pub fn gate_deletes(&self, gate: Arc<Notify>) {
        self.state().delete_gate = Some(gate);
    }

    /// Queues a one-off list answer, optionally held until `gate` is notified.
    pub fn script_list(&self, gate: Option<Arc<Notify>>, result: Result<Vec<Video>, ApiError>) {
        self.state()
            .scripted_lists
            .push_back(ScriptedList { gate, result });
    }

    pub fn calls(&self, call: &str) -> usize {
        self.state().calls.get(call).copied().unwrap_or(0)
    }

    pub fn created(&self) -> Vec<NewVideo> {
        self.state().created.clone()
    }

    pub fn deleted(&self) -> Vec<VideoId> {
        self.state().deleted.clone()
    }

    pub fn tokens_seen(&self) -> Vec<String> {
        self.state().tokens_seen.clone()
    }
}

#[async_trait]
impl VideoBackend for MockBackend {
    async fn login(&self, _email: &str, _password: &str) -> Result<LoginResponse, ApiError> {
        self.record("login", None);
        let state = self.state();
        if let Some(error) = state.login_error.clone() {
            return Err(error);
        }
        Ok(LoginResponse {
            access_token: state.login_token.clone(),
        })
    }

    async fn signup(&self, _name: &str, email: &str, _password: &str) -> Result<String, ApiError> {
        self.record("signup", None);
        if email == "taken@x.com" {
            return Err(ApiError::from_status(
                400,
                r#"{"message": "User already exists"}"#,
            ));
        }
        Ok("User registered successfully".to_string())
    }

    async fn current_user(&self, credential: &Credential) -> Result<UserProfile, ApiError> {
        self.record("current_user", Some(credential));
        Ok(UserProfile {
            name: "Ann".to_string(),
            email: "a@x.com".to_string(),
        })
    }

    async fn list_videos(&self, credential: &Credential) -> Result<Vec<Video>, ApiError> {
        self.record("list_videos", Some(credential));
        let scripted = self.state().scripted_lists.pop_front();
        if let Some(ScriptedList { gate, result }) = scripted {
            if let Some(gate) = gate {
                gate.notified().await;
            }
            return result;
        }

        let state = self.state();
        match &state.list_error {
            Some(error) => Err(error.clone()),
            None => Ok(state.videos.clone()),
        }
    }

    async fn create_video(
        &self,
        credential: &Credential,
        video: &NewVideo,
    ) -> Result<(), ApiError> {
        self.record("create_video", Some(credential));
        let mut state = self.state();
        if let Some(error) = state.create_error.clone() {
            return Err(error);
        }
        state.next_id += 1;
        let id = format!("created-{}", state.next_id);
        state.videos.push(Video {
            id: VideoId::new(id),
            title: video.title.clone(),
            description: video.description.clone(),
            source_id: video.source_id.clone(),
            thumbnail_url: Some(video.thumbnail_url.clone()),
        });
        state.created.push(video.clone());
        Ok(())
    }

    async fn delete_video(&self, credential: &Credential, id: &VideoId) -> Result<(), ApiError> {
        self.record("delete_video", Some(credential));
        let gate = self.state().delete_gate.take();
        if let Some(gate) = gate {
            gate.notified().await;
        }

        let mut state = self.state();
        if let Some(error) = state.delete_error.clone() {
            return Err(error);
        }
        state.videos.retain(|video| &video.id != id);
        state.deleted.push(id.clone());
        Ok(())
    }

    fn stream_url(&self, id: &VideoId) -> String {
        format!("http://mock/video/{id}/stream")
    }
}

/// Confirmation answering `answer` and counting how often it was asked.
#[derive(Debug, Default)]
pub struct CountingConfirm {
    pub answer: bool,
    asked: AtomicUsize,
}

impl CountingConfirm {
    pub fn new(answer: bool) -> Self {
        Self {
            answer,
            asked: AtomicUsize::new(0),
        }
    }

    pub fn asked(&self) -> usize {
        self.asked.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Confirm for CountingConfirm {
    async fn confirm(&self, _message: &str) -> bool {
        self.asked.fetch_add(1, Ordering::SeqCst);
        self.answer
    }
}

/// App wired to `backend`, optionally with a saved token, answering `confirm` to prompts.
pub fn app_with(
    backend: Arc<MockBackend>,
    saved_token: Option<&str>,
    confirm: bool,
) -> (AppState, Arc<MemoryCredentialStore>) {
    let store = Arc::new(match saved_token {
        Some(token) => MemoryCredentialStore::with_token(token),
        None => MemoryCredentialStore::new(),
    });
    let app = AppState::new(backend, store.clone(), Arc::new(AutoConfirm(confirm)));
    app.restore();
    (app, store)
}
