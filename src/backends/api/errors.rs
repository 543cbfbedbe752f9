use thiserror::Error;

/// Typed error enum for video API operations
///
/// Separates authentication failures from transport trouble so callers can
/// decide between a forced logout and a generic failure message.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// The bearer token was refused (401, 403)
    #[error("Authentication failed: {message} (status: {status})")]
    Unauthorized { status: u16, message: String },

    /// Client error (400-499, excluding auth)
    #[error("Client error: {message} (status: {status})")]
    ClientError { status: u16, message: String },

    /// Server error (500+)
    #[error("Server error: {message} (status: {status})")]
    ServerError { status: u16, message: String },

    /// Network/connection errors (timeout, connection refused, etc.)
    #[error("Network error: {0}")]
    Network(String),

    /// Body could not be decoded
    #[error("Failed to parse response: {0}")]
    Parse(String),

    #[error("Invalid API URL: {0}")]
    InvalidUrl(String),

    #[error("API error: {0}")]
    Other(String),
}

impl ApiError {
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, ApiError::Unauthorized { .. })
    }

    /// Message the server attached to a refusal, if any.
    pub fn server_message(&self) -> Option<&str> {
        match self {
            ApiError::Unauthorized { message, .. }
            | ApiError::ClientError { message, .. }
            | ApiError::ServerError { message, .. }
                if !message.is_empty() =>
            {
                Some(message.as_str())
            }
            _ => None,
        }
    }

    /// Create an error from a reqwest error
    pub fn from_reqwest(error: reqwest::Error) -> Self {
        if error.is_timeout() {
            ApiError::Network(format!("Request timeout: {}", error))
        } else if error.is_connect() {
            ApiError::Network(format!("Connection failed: {}", error))
        } else if error.is_request() {
            ApiError::Network(format!("Request error: {}", error))
        } else if error.is_decode() {
            ApiError::Parse(error.to_string())
        } else {
            ApiError::Other(error.to_string())
        }
    }

    /// Create an error from an HTTP status code and response body
    pub fn from_status(status: u16, body: &str) -> Self {
        let message = extract_message(body);
        match status {
            401 | 403 => ApiError::Unauthorized { status, message },
            400..=499 => ApiError::ClientError { status, message },
            500..=599 => ApiError::ServerError { status, message },
            _ => ApiError::Other(format!("HTTP {}: {}", status, message)),
        }
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(error: reqwest::Error) -> Self {
        ApiError::from_reqwest(error)
    }
}

/// Pulls `error`/`message`/`msg` out of a JSON error body, else returns the raw text.
fn extract_message(body: &str) -> String {
    let trimmed = body.trim();
    if let Ok(serde_json::Value::Object(map)) = serde_json::from_str::<serde_json::Value>(trimmed) {
        for key in ["error", "message", "msg"] {
            if let Some(serde_json::Value::String(text)) = map.get(key) {
                return text.clone();
            }
        }
    }
    trimmed.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_status_classification() {
        assert!(ApiError::from_status(401, "").is_unauthorized());
        assert!(ApiError::from_status(403, "").is_unauthorized());
        assert!(matches!(
            ApiError::from_status(404, ""),
            ApiError::ClientError { status: 404, .. }
        ));
        assert!(matches!(
            ApiError::from_status(502, "bad gateway"),
            ApiError::ServerError { status: 502, .. }
        ));
    }

    #[test]
    fn test_server_message_extraction() {
        let error = ApiError::from_status(400, r#"{"message": "User already exists"}"#);
        assert_eq!(error.server_message(), Some("User already exists"));

        let error = ApiError::from_status(401, r#"{"msg": "Token has expired"}"#);
        assert_eq!(error.server_message(), Some("Token has expired"));

        let error = ApiError::from_status(500, "");
        assert_eq!(error.server_message(), None);

        let error = ApiError::from_status(500, "plain text");
        assert_eq!(error.server_message(), Some("plain text"));
    }
}
