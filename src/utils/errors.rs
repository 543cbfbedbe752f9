use thiserror::Error;

use crate::backends::ApiError;
use crate::services::CredentialError;

/// Failures of user-triggered operations.
///
/// None of these escape an operation: each is logged and turned into the
/// status line text by [`AppError::user_message`].
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Login response did not contain a token")]
    Auth,

    #[error("{context}: {source}")]
    Transport {
        context: &'static str,
        #[source]
        source: ApiError,
    },

    #[error("Required input fields are empty")]
    Validation,

    #[error("Session rejected by server: {0}")]
    Unauthorized(ApiError),

    #[error("Request refused: {0}")]
    Rejected(String),

    #[error("Credential store error: {0}")]
    Credential(#[from] CredentialError),
}

impl AppError {
    pub fn transport(context: &'static str, source: ApiError) -> Self {
        AppError::Transport { context, source }
    }

    /// Routes 401/403 to `Unauthorized`, everything else to `Transport`.
    pub fn from_api(context: &'static str, source: ApiError) -> Self {
        if source.is_unauthorized() {
            AppError::Unauthorized(source)
        } else {
            AppError::Transport { context, source }
        }
    }

    pub fn user_message(&self) -> String {
        match self {
            AppError::Auth => "Invalid login credentials".to_string(),
            AppError::Transport { context, .. } => (*context).to_string(),
            AppError::Validation => "Please fill all fields".to_string(),
            AppError::Unauthorized(_) => "Session expired, please log in again".to_string(),
            AppError::Rejected(message) => message.clone(),
            AppError::Credential(_) => "Could not access saved credentials".to_string(),
        }
    }
}
