use std::sync::Arc;
use tracing::{debug, info};

use super::Property;
use crate::backends::VideoBackend;
use crate::models::{DisplayMode, Video, ViewState};

/// What the player view renders.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NowPlaying {
    pub video: Video,
    pub stream_url: String,
}

/// Switches between the dashboard and the single-video player.
///
/// The selection is an owned copy taken at selection time; later refreshes
/// do not touch it.
#[derive(Debug, Clone)]
pub struct PlaybackSelector {
    backend: Arc<dyn VideoBackend>,
    view: Property<ViewState>,
}

impl PlaybackSelector {
    pub fn new(backend: Arc<dyn VideoBackend>, view: Property<ViewState>) -> Self {
        Self { backend, view }
    }

    pub fn select(&self, video: Video) {
        info!("Now playing '{}' ({})", video.title, video.id);
        self.view.update(|view| view.selected = Some(video));
    }

    pub fn deselect(&self) {
        self.view.update(|view| view.selected = None);
        debug!("Back to dashboard");
    }

    pub fn selected(&self) -> Option<Video> {
        self.view.with(|view| view.selected.clone())
    }

    pub fn display_mode(&self) -> DisplayMode {
        self.view.with(ViewState::display_mode)
    }

    pub fn now_playing(&self) -> Option<NowPlaying> {
        self.selected().map(|video| NowPlaying {
            stream_url: self.backend.stream_url(&video.id),
            video,
        })
    }
}
