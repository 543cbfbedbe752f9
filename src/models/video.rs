use serde::{Deserialize, Serialize};

use super::VideoId;
use crate::constants::{PLACEHOLDER_THUMBNAIL_URL, THUMBNAIL_URL_PREFIX, THUMBNAIL_URL_SUFFIX};

/// A video record as served by `GET /videos`.
///
/// The server stores documents with a `_id` key and names the external
/// platform identifier `youtube_id`; both are mapped onto domain names here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Video {
    #[serde(rename = "_id", alias = "id")]
    pub id: VideoId,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(rename = "youtube_id", alias = "source_id", default)]
    pub source_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thumbnail_url: Option<String>,
}

impl Video {
    /// Thumbnail to render, falling back to a placeholder image.
    pub fn thumbnail(&self) -> &str {
        match self.thumbnail_url.as_deref() {
            Some(url) if !url.is_empty() => url,
            _ => PLACEHOLDER_THUMBNAIL_URL,
        }
    }
}

/// Body of a `POST /videos` request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewVideo {
    pub title: String,
    pub description: String,
    #[serde(rename = "youtube_id")]
    pub source_id: String,
    pub thumbnail_url: String,
}

impl NewVideo {
    pub fn new(
        title: impl Into<String>,
        description: impl Into<String>,
        source_id: impl Into<String>,
    ) -> Self {
        let source_id = source_id.into();
        Self {
            title: title.into(),
            description: description.into(),
            thumbnail_url: thumbnail_url_for(&source_id),
            source_id,
        }
    }
}

/// Derives the platform thumbnail for a source id.
pub fn thumbnail_url_for(source_id: &str) -> String {
    format!("{THUMBNAIL_URL_PREFIX}{source_id}{THUMBNAIL_URL_SUFFIX}")
}

/// Account summary returned by `GET /auth/me`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct UserProfile {
    #[serde(default)]
    pub name: String,
    pub email: String,
}
