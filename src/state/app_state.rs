use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::backends::VideoBackend;
use crate::core::projection;
use crate::core::viewmodels::{
    AddVideoForm, CollectionSynchronizer, LoginOutcome, MutationGateway, MutationOutcome,
    NowPlaying, PlaybackSelector, Property, PropertySubscriber, RefreshOutcome, SessionManager,
    StatusBoard,
};
use crate::models::{
    Credential, DisplayMode, OperationStatus, Session, StatusSnapshot, UserProfile, Video, VideoId,
    ViewState,
};
use crate::services::{Confirm, CredentialStore};

/// The single owned state object of the client.
///
/// Each piece of state has exactly one owner (session, collection, status,
/// view state, form); this type wires the owners together and is the only
/// place that sequences them, e.g. login → refresh or logout → clear.
/// Clones are cheap handles to the same state.
#[derive(Debug, Clone)]
pub struct AppState {
    session: SessionManager,
    collection: CollectionSynchronizer,
    mutations: MutationGateway,
    playback: PlaybackSelector,
    status: StatusBoard,
    view: Property<ViewState>,
}

impl AppState {
    pub fn new(
        backend: Arc<dyn VideoBackend>,
        store: Arc<dyn CredentialStore>,
        confirm: Arc<dyn Confirm>,
    ) -> Self {
        Self::with_status(backend, store, confirm, StatusBoard::new())
    }

    pub fn with_status(
        backend: Arc<dyn VideoBackend>,
        store: Arc<dyn CredentialStore>,
        confirm: Arc<dyn Confirm>,
        status: StatusBoard,
    ) -> Self {
        let session = SessionManager::new(backend.clone(), store, status.clone());
        let collection = CollectionSynchronizer::new(
            backend.clone(),
            session.session_property(),
            status.clone(),
        );
        let mutations = MutationGateway::new(
            backend.clone(),
            session.session_property(),
            collection.clone(),
            status.clone(),
            confirm,
        );
        let view = Property::new(ViewState::default(), "view_state");
        let playback = PlaybackSelector::new(backend, view.clone());

        Self {
            session,
            collection,
            mutations,
            playback,
            status,
            view,
        }
    }

    /// Picks up a persisted session and, if there is one, loads the collection.
    pub async fn initialize(&self) {
        if self.restore() {
            self.refresh().await;
        }
    }

    /// Adopts a persisted token without touching the network.
    pub fn restore(&self) -> bool {
        self.session.restore()
    }

    // === Session ===

    pub async fn login(&self, email: &str, password: &str) -> LoginOutcome {
        let outcome = self.session.login(email, password).await;
        if outcome == LoginOutcome::Authenticated {
            self.refresh().await;
        }
        outcome
    }

    /// Clears the credential, the collection and the player in one step.
    pub fn logout(&self) {
        self.session.logout();
        self.collection.invalidate();
        self.playback.deselect();
    }

    pub async fn register(&self, name: &str, email: &str, password: &str) -> bool {
        self.session.register(name, email, password).await
    }

    pub async fn profile(&self) -> Option<UserProfile> {
        self.session.profile().await
    }

    pub fn session(&self) -> Session {
        self.session.session()
    }

    pub fn is_authenticated(&self) -> bool {
        self.session.is_authenticated()
    }

    pub fn subscribe_session(&self) -> PropertySubscriber<Session> {
        self.session.subscribe()
    }

    fn expire_session(&self) {
        warn!("Server rejected the saved token, logging out");
        self.logout();
    }

    /// Expires the session only if `used` is still the active token. A
    /// rejection of a token the user already logged out of is ignored.
    fn expire_session_for(&self, used: Option<&Credential>) {
        if used.is_some() && self.session.credential().as_ref() == used {
            self.expire_session();
        } else {
            debug!("Ignoring rejection of a token that is no longer in use");
            self.status.clear_error();
        }
    }

    // === Collection ===

    pub async fn refresh(&self) -> RefreshOutcome {
        let outcome = self.collection.refresh().await;
        if outcome == RefreshOutcome::Unauthorized {
            self.expire_session();
        }
        outcome
    }

    pub fn videos(&self) -> Vec<Video> {
        self.collection.videos()
    }

    pub fn subscribe_videos(&self) -> PropertySubscriber<Vec<Video>> {
        self.collection.subscribe()
    }

    // === Mutations ===

    pub async fn add_video(
        &self,
        title: &str,
        description: &str,
        source_id: &str,
    ) -> MutationOutcome {
        let used = self.session.credential();
        let outcome = self.mutations.add_video(title, description, source_id).await;
        self.settle(outcome, used)
    }

    pub async fn submit_form(&self) -> MutationOutcome {
        let used = self.session.credential();
        let outcome = self.mutations.submit_form().await;
        self.settle(outcome, used)
    }

    pub async fn delete_video(&self, id: &VideoId) -> MutationOutcome {
        let used = self.session.credential();
        let outcome = self.mutations.delete_video(id).await;
        self.settle(outcome, used)
    }

    pub fn form(&self) -> AddVideoForm {
        self.mutations.form()
    }

    pub fn update_form(&self, edit: impl FnOnce(&mut AddVideoForm)) {
        self.mutations.update_form(edit);
    }

    /// `used` is the token the gateway read when the call started.
    fn settle(&self, outcome: MutationOutcome, used: Option<Credential>) -> MutationOutcome {
        match outcome {
            MutationOutcome::Unauthorized => self.expire_session_for(used.as_ref()),
            // The resync is generation-checked, so its token is still the active one.
            MutationOutcome::Completed(RefreshOutcome::Unauthorized) => self.expire_session(),
            _ => {}
        }
        outcome
    }

    // === View ===

    pub fn set_search_text(&self, text: impl Into<String>) {
        let text = text.into();
        self.view.update(|view| view.search_text = text);
    }

    pub fn toggle_sort_order(&self) {
        self.view.update(|view| view.sort_order = view.sort_order.toggled());
        info!("Sort order is now {:?}", self.view.with(|view| view.sort_order));
    }

    pub fn view_state(&self) -> ViewState {
        self.view.get()
    }

    pub fn subscribe_view(&self) -> PropertySubscriber<ViewState> {
        self.view.subscribe()
    }

    /// Filtered, sorted and capped list for the dashboard.
    pub fn dashboard(&self) -> Vec<Video> {
        self.collection
            .with_videos(|videos| self.view.with(|view| projection::project(videos, view)))
    }

    // === Playback ===

    pub fn select(&self, video: Video) {
        self.playback.select(video);
    }

    pub fn deselect(&self) {
        self.playback.deselect();
    }

    pub fn display_mode(&self) -> DisplayMode {
        self.playback.display_mode()
    }

    pub fn now_playing(&self) -> Option<NowPlaying> {
        self.playback.now_playing()
    }

    // === Status ===

    pub fn status(&self) -> OperationStatus {
        self.status.status()
    }

    pub fn status_snapshot(&self) -> StatusSnapshot {
        self.status.snapshot()
    }

    pub fn subscribe_status(&self) -> PropertySubscriber<StatusSnapshot> {
        self.status.subscribe()
    }
}
