use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;
use tracing::{debug, warn};

use super::{Property, PropertySubscriber};
use crate::constants::STATUS_DISPLAY_WINDOW;
use crate::models::{OperationStatus, StatusSnapshot};
use crate::utils::AppError;

/// Owner of the status line.
///
/// Success messages are transient: each one schedules its own removal after
/// the display window, and a newer message cancels the older removal.
#[derive(Debug, Clone)]
pub struct StatusBoard {
    snapshot: Property<StatusSnapshot>,
    success_epoch: Arc<AtomicU64>,
    window: Duration,
}

impl Default for StatusBoard {
    fn default() -> Self {
        Self::new()
    }
}

impl StatusBoard {
    pub fn new() -> Self {
        Self::with_window(STATUS_DISPLAY_WINDOW)
    }

    pub fn with_window(window: Duration) -> Self {
        Self {
            snapshot: Property::new(StatusSnapshot::default(), "status"),
            success_epoch: Arc::new(AtomicU64::new(0)),
            window,
        }
    }

    pub fn status(&self) -> OperationStatus {
        self.snapshot.with(StatusSnapshot::status)
    }

    pub fn snapshot(&self) -> StatusSnapshot {
        self.snapshot.get()
    }

    pub fn subscribe(&self) -> PropertySubscriber<StatusSnapshot> {
        self.snapshot.subscribe()
    }

    pub fn begin_loading(&self) {
        self.snapshot.update(|s| s.loading = true);
    }

    pub fn end_loading(&self) {
        self.snapshot.update(|s| s.loading = false);
    }

    pub fn clear_error(&self) {
        self.snapshot.update(|s| s.error = None);
    }

    /// Logs the failure and shows its user-facing message.
    pub fn report(&self, error: &AppError) {
        warn!("Operation failed: {}", error);
        let message = error.user_message();
        self.snapshot.update(|s| s.error = Some(message));
    }

    /// Shows a transient success message. Must be called inside a tokio runtime.
    pub fn succeed(&self, message: impl Into<String>) {
        let message = message.into();
        let epoch = self.success_epoch.fetch_add(1, Ordering::SeqCst) + 1;
        debug!("Showing success message '{}' (epoch {})", message, epoch);
        self.snapshot.update(|s| {
            s.error = None;
            s.success = Some(message);
        });

        let snapshot = self.snapshot.clone();
        let success_epoch = self.success_epoch.clone();
        let window = self.window;
        tokio::spawn(async move {
            tokio::time::sleep(window).await;
            if success_epoch.load(Ordering::SeqCst) == epoch {
                snapshot.update(|s| s.success = None);
            }
        });
    }
}
