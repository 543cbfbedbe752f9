use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::{debug, info};

use super::{Property, PropertySubscriber, StatusBoard};
use crate::backends::VideoBackend;
use crate::models::{Session, Video};
use crate::utils::AppError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshOutcome {
    /// No session; nothing was requested.
    Skipped,
    /// The collection now holds this many videos.
    Replaced(usize),
    /// A newer refresh or a logout superseded this one; its response was dropped.
    Stale,
    Failed,
    Unauthorized,
}

/// Owns the canonical collection and keeps it equal to the last server answer.
///
/// Every refresh is stamped with a generation. Only the response belonging
/// to the newest generation may replace the collection, so a slow reply can
/// never overwrite a fresher one.
#[derive(Debug, Clone)]
pub struct CollectionSynchronizer {
    backend: Arc<dyn VideoBackend>,
    session: Property<Session>,
    videos: Property<Vec<Video>>,
    status: StatusBoard,
    generation: Arc<AtomicU64>,
}

impl CollectionSynchronizer {
    pub fn new(
        backend: Arc<dyn VideoBackend>,
        session: Property<Session>,
        status: StatusBoard,
    ) -> Self {
        Self {
            backend,
            session,
            videos: Property::new(Vec::new(), "videos"),
            status,
            generation: Arc::new(AtomicU64::new(0)),
        }
    }

    pub fn videos(&self) -> Vec<Video> {
        self.videos.get()
    }

    pub fn with_videos<R>(&self, read: impl FnOnce(&[Video]) -> R) -> R {
        self.videos.with(|videos| read(videos.as_slice()))
    }

    pub fn subscribe(&self) -> PropertySubscriber<Vec<Video>> {
        self.videos.subscribe()
    }

    pub async fn refresh(&self) -> RefreshOutcome {
        let Some(credential) = self.session.with(|s| s.credential().cloned()) else {
            debug!("Skipping refresh without a session");
            return RefreshOutcome::Skipped;
        };

        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        debug!("Refreshing videos (generation {})", generation);
        self.status.begin_loading();

        let result = self.backend.list_videos(&credential).await;

        if self.generation.load(Ordering::SeqCst) != generation {
            debug!("Discarding stale video list (generation {})", generation);
            return RefreshOutcome::Stale;
        }
        self.status.end_loading();

        match result {
            Ok(videos) => {
                let count = videos.len();
                self.videos.set(videos);
                self.status.clear_error();
                info!("Loaded {} videos", count);
                RefreshOutcome::Replaced(count)
            }
            Err(e) => {
                let error = AppError::from_api("Failed to load videos", e);
                self.status.report(&error);
                if matches!(error, AppError::Unauthorized(_)) {
                    RefreshOutcome::Unauthorized
                } else {
                    RefreshOutcome::Failed
                }
            }
        }
    }

    /// Drops the collection and orphans any refresh still in flight.
    pub fn invalidate(&self) {
        self.generation.fetch_add(1, Ordering::SeqCst);
        self.videos.set(Vec::new());
        self.status.end_loading();
        debug!("Video collection invalidated");
    }
}
