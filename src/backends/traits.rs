use async_trait::async_trait;

use super::api::{ApiError, LoginResponse};
use crate::models::{Credential, NewVideo, UserProfile, Video, VideoId};

/// Contract of the remote video API.
///
/// Every data call takes the bearer credential explicitly; the backend keeps
/// no session of its own.
#[async_trait]
pub trait VideoBackend: Send + Sync + std::fmt::Debug {
    /// `POST /auth/login`. A well-formed reply without a token is not an error.
    async fn login(&self, email: &str, password: &str) -> Result<LoginResponse, ApiError>;

    /// `POST /auth/signup`. Returns the server's acknowledgment message.
    async fn signup(&self, name: &str, email: &str, password: &str) -> Result<String, ApiError>;

    /// `GET /auth/me`
    async fn current_user(&self, credential: &Credential) -> Result<UserProfile, ApiError>;

    /// `GET /videos`, in server order.
    async fn list_videos(&self, credential: &Credential) -> Result<Vec<Video>, ApiError>;

    /// `POST /videos`. Any answer except 401/403 is accepted; status and body are ignored.
    async fn create_video(&self, credential: &Credential, video: &NewVideo)
    -> Result<(), ApiError>;

    /// `DELETE /videos/{id}`
    async fn delete_video(&self, credential: &Credential, id: &VideoId) -> Result<(), ApiError>;

    /// Location of the media stream for a video, for an external player.
    fn stream_url(&self, id: &VideoId) -> String;
}
