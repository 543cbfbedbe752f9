use std::sync::Arc;
use tracing::{debug, info, warn};

use super::collection::RefreshOutcome;
use super::{CollectionSynchronizer, Property, PropertySubscriber, StatusBoard};
use crate::backends::VideoBackend;
use crate::models::{NewVideo, Session, VideoId};
use crate::services::Confirm;
use crate::utils::AppError;

/// Input fields of the add-video form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AddVideoForm {
    pub title: String,
    pub description: String,
    pub source_id: String,
}

impl AddVideoForm {
    pub fn is_complete(&self) -> bool {
        !self.title.is_empty() && !self.description.is_empty() && !self.source_id.is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MutationOutcome {
    /// Input failed validation; nothing was sent.
    Invalid,
    /// The user said no at the confirmation prompt.
    Declined,
    /// No session; nothing was sent.
    Skipped,
    Failed,
    Unauthorized,
    /// The server accepted the change and a resync ran.
    Completed(RefreshOutcome),
}

/// Writes through the remote API, then resyncs the collection.
///
/// Nothing is patched locally: the refresh that follows a successful write
/// is the only way the change reaches the collection.
#[derive(Clone)]
pub struct MutationGateway {
    backend: Arc<dyn VideoBackend>,
    session: Property<Session>,
    sync: CollectionSynchronizer,
    status: StatusBoard,
    confirm: Arc<dyn Confirm>,
    form: Property<AddVideoForm>,
}

impl std::fmt::Debug for MutationGateway {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MutationGateway")
            .field("form", &self.form)
            .finish_non_exhaustive()
    }
}

impl MutationGateway {
    pub fn new(
        backend: Arc<dyn VideoBackend>,
        session: Property<Session>,
        sync: CollectionSynchronizer,
        status: StatusBoard,
        confirm: Arc<dyn Confirm>,
    ) -> Self {
        Self {
            backend,
            session,
            sync,
            status,
            confirm,
            form: Property::new(AddVideoForm::default(), "add_video_form"),
        }
    }

    pub fn form(&self) -> AddVideoForm {
        self.form.get()
    }

    pub fn update_form(&self, edit: impl FnOnce(&mut AddVideoForm)) {
        self.form.update(edit);
    }

    pub fn subscribe_form(&self) -> PropertySubscriber<AddVideoForm> {
        self.form.subscribe()
    }

    /// Submits whatever is currently in the form.
    pub async fn submit_form(&self) -> MutationOutcome {
        let form = self.form.get();
        self.add_video(&form.title, &form.description, &form.source_id)
            .await
    }

    pub async fn add_video(
        &self,
        title: &str,
        description: &str,
        source_id: &str,
    ) -> MutationOutcome {
        let input = AddVideoForm {
            title: title.to_string(),
            description: description.to_string(),
            source_id: source_id.to_string(),
        };
        if !input.is_complete() {
            self.status.report(&AppError::Validation);
            return MutationOutcome::Invalid;
        }

        let Some(credential) = self.session.with(|s| s.credential().cloned()) else {
            warn!("Ignoring add_video without a session");
            return MutationOutcome::Skipped;
        };

        let video = NewVideo::new(input.title, input.description, input.source_id);
        match self.backend.create_video(&credential, &video).await {
            Ok(()) => {
                info!("Added video '{}'", title);
                self.form.set(AddVideoForm::default());
                self.status.succeed("Video added successfully");
                MutationOutcome::Completed(self.sync.refresh().await)
            }
            Err(e) => self.fail("Failed to add video", e),
        }
    }

    pub async fn delete_video(&self, id: &VideoId) -> MutationOutcome {
        let Some(credential) = self.session.with(|s| s.credential().cloned()) else {
            warn!("Ignoring delete_video without a session");
            return MutationOutcome::Skipped;
        };

        if !self.confirm.confirm("Delete this video?").await {
            debug!("Deletion of {} declined", id);
            return MutationOutcome::Declined;
        }

        match self.backend.delete_video(&credential, id).await {
            Ok(()) => {
                info!("Deleted video {}", id);
                self.status.succeed("Video deleted");
                MutationOutcome::Completed(self.sync.refresh().await)
            }
            Err(e) => self.fail("Failed to delete video", e),
        }
    }

    fn fail(&self, context: &'static str, source: crate::backends::ApiError) -> MutationOutcome {
        let error = AppError::from_api(context, source);
        self.status.report(&error);
        if matches!(error, AppError::Unauthorized(_)) {
            MutationOutcome::Unauthorized
        } else {
            MutationOutcome::Failed
        }
    }
}
