use async_trait::async_trait;
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, info, warn};
use url::Url;

use super::errors::ApiError;
use crate::backends::traits::VideoBackend;
use crate::models::{Credential, NewVideo, UserProfile, Video, VideoId};

#[derive(Debug, Serialize)]
struct LoginRequest<'a> {
    email: &'a str,
    password: &'a str,
}

#[derive(Debug, Serialize)]
struct SignupRequest<'a> {
    name: &'a str,
    email: &'a str,
    password: &'a str,
}

#[derive(Debug, Default, Deserialize)]
struct MessageResponse {
    #[serde(default)]
    message: Option<String>,
}

/// Reply of `POST /auth/login`. Rejected logins come back without a token.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct LoginResponse {
    #[serde(default)]
    pub access_token: Option<String>,
}

impl LoginResponse {
    pub fn credential(&self) -> Option<Credential> {
        self.access_token
            .as_deref()
            .filter(|token| !token.is_empty())
            .map(Credential::new)
    }
}

/// reqwest-backed client for the video API.
#[derive(Debug, Clone)]
pub struct HttpVideoApi {
    client: reqwest::Client,
    base_url: Url,
}

impl HttpVideoApi {
    /// `timeout` of `None` lets requests wait indefinitely.
    pub fn new(base_url: &str, timeout: Option<Duration>) -> Result<Self, ApiError> {
        let base_url = Url::parse(base_url.trim_end_matches('/'))
            .map_err(|e| ApiError::InvalidUrl(format!("{}: {}", base_url, e)))?;
        if base_url.cannot_be_a_base() {
            return Err(ApiError::InvalidUrl(base_url.to_string()));
        }

        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| ApiError::Other(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { client, base_url })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    async fn ensure_success(response: reqwest::Response) -> Result<reqwest::Response, ApiError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let url = response.url().clone();
        let body = response.text().await.unwrap_or_default();
        warn!(
            "Request to {} failed with status {}: {}",
            url,
            status,
            truncate_body(&body)
        );
        Err(ApiError::from_status(status.as_u16(), &body))
    }
}

// Bodies can be large HTML error pages; only a prefix goes to the log.
fn truncate_body(body: &str) -> &str {
    let end = body
        .char_indices()
        .nth(120)
        .map(|(index, _)| index)
        .unwrap_or(body.len());
    &body[..end]
}

#[async_trait]
impl VideoBackend for HttpVideoApi {
    async fn login(&self, email: &str, password: &str) -> Result<LoginResponse, ApiError> {
        let url = self.endpoint(&["auth", "login"]);
        info!("Attempting login at {}", url);

        let response = self
            .client
            .post(url)
            .json(&LoginRequest { email, password })
            .send()
            .await?;

        // Rejections still carry a JSON body; the missing token is what matters.
        let status = response.status();
        let body = response.text().await?;
        debug!("Login response status: {}", status);

        serde_json::from_str::<LoginResponse>(&body)
            .map_err(|e| ApiError::Parse(format!("login response: {}", e)))
    }

    async fn signup(&self, name: &str, email: &str, password: &str) -> Result<String, ApiError> {
        let url = self.endpoint(&["auth", "signup"]);
        info!("Registering account at {}", url);

        let response = self
            .client
            .post(url)
            .json(&SignupRequest {
                name,
                email,
                password,
            })
            .send()
            .await?;
        let response = Self::ensure_success(response).await?;

        let body = response.text().await?;
        let ack: MessageResponse = serde_json::from_str(&body).unwrap_or_default();
        Ok(ack
            .message
            .unwrap_or_else(|| "User registered successfully".to_string()))
    }

    async fn current_user(&self, credential: &Credential) -> Result<UserProfile, ApiError> {
        let response = self
            .client
            .get(self.endpoint(&["auth", "me"]))
            .bearer_auth(credential.as_str())
            .send()
            .await?;
        let response = Self::ensure_success(response).await?;

        response
            .json::<UserProfile>()
            .await
            .map_err(|e| ApiError::Parse(format!("profile: {}", e)))
    }

    async fn list_videos(&self, credential: &Credential) -> Result<Vec<Video>, ApiError> {
        let response = self
            .client
            .get(self.endpoint(&["videos"]))
            .bearer_auth(credential.as_str())
            .send()
            .await?;
        let response = Self::ensure_success(response).await?;

        let videos = response
            .json::<Vec<Video>>()
            .await
            .map_err(|e| ApiError::Parse(format!("video list: {}", e)))?;
        debug!("Fetched {} videos", videos.len());
        Ok(videos)
    }

    async fn create_video(
        &self,
        credential: &Credential,
        video: &NewVideo,
    ) -> Result<(), ApiError> {
        info!("Creating video '{}' ({})", video.title, video.source_id);

        let response = self
            .client
            .post(self.endpoint(&["videos"]))
            .bearer_auth(credential.as_str())
            .json(video)
            .send()
            .await?;

        // Any answer counts as accepted; the resync that follows shows what
        // the server actually stored. Only a refused token is an error.
        let status = response.status();
        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            return Self::ensure_success(response).await.map(|_| ());
        }
        if !status.is_success() {
            warn!("Create request answered with status {}, treating as accepted", status);
        }
        Ok(())
    }

    async fn delete_video(&self, credential: &Credential, id: &VideoId) -> Result<(), ApiError> {
        info!("Deleting video {}", id);

        let response = self
            .client
            .delete(self.endpoint(&["videos", id.as_str()]))
            .bearer_auth(credential.as_str())
            .send()
            .await?;
        Self::ensure_success(response).await?;
        Ok(())
    }

    fn stream_url(&self, id: &VideoId) -> String {
        self.endpoint(&["video", id.as_str(), "stream"]).to_string()
    }
}
