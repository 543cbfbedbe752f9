use std::sync::Arc;
use tracing::{debug, error, info, warn};

use super::{Property, PropertySubscriber, StatusBoard};
use crate::backends::VideoBackend;
use crate::models::{Credential, Session, UserProfile};
use crate::services::CredentialStore;
use crate::utils::AppError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoginOutcome {
    Authenticated,
    /// The server answered without a token.
    Rejected,
    /// Transport failure or an answer that could not be read.
    Unreachable,
}

/// Owns the authentication state and the persisted credential.
#[derive(Debug, Clone)]
pub struct SessionManager {
    backend: Arc<dyn VideoBackend>,
    store: Arc<dyn CredentialStore>,
    session: Property<Session>,
    status: StatusBoard,
}

impl SessionManager {
    pub fn new(
        backend: Arc<dyn VideoBackend>,
        store: Arc<dyn CredentialStore>,
        status: StatusBoard,
    ) -> Self {
        Self {
            backend,
            store,
            session: Property::new(Session::Anonymous, "session"),
            status,
        }
    }

    /// Read handle shared with components that need the bearer token.
    pub fn session_property(&self) -> Property<Session> {
        self.session.clone()
    }

    pub fn session(&self) -> Session {
        self.session.get()
    }

    pub fn is_authenticated(&self) -> bool {
        self.session.with(Session::is_authenticated)
    }

    pub fn credential(&self) -> Option<Credential> {
        self.session.with(|s| s.credential().cloned())
    }

    pub fn subscribe(&self) -> PropertySubscriber<Session> {
        self.session.subscribe()
    }

    /// Adopts a persisted token without asking the server whether it is
    /// still valid. Returns whether the session is now authenticated.
    pub fn restore(&self) -> bool {
        match self.store.get() {
            Ok(Some(credential)) => {
                info!("Restored saved session");
                self.session.set(Session::Authenticated(credential));
                true
            }
            Ok(None) => {
                debug!("No saved session");
                false
            }
            Err(e) => {
                error!("Failed to read saved session: {}", e);
                false
            }
        }
    }

    /// Single attempt, no retry.
    pub async fn login(&self, email: &str, password: &str) -> LoginOutcome {
        info!("Logging in as {}", email);

        let response = match self.backend.login(email, password).await {
            Ok(response) => response,
            Err(e) => {
                self.status
                    .report(&AppError::transport("Server not reachable", e));
                return LoginOutcome::Unreachable;
            }
        };

        let Some(credential) = response.credential() else {
            self.status.report(&AppError::Auth);
            return LoginOutcome::Rejected;
        };

        if let Err(e) = self.store.set(&credential) {
            // The session still works for this run; it just won't survive a restart.
            warn!("Failed to persist token: {}", AppError::from(e));
        }
        self.session.set(Session::Authenticated(credential));
        self.status.clear_error();
        info!("Logged in as {}", email);
        LoginOutcome::Authenticated
    }

    /// Never fails. Callers are responsible for dropping session-scoped state.
    pub fn logout(&self) {
        if let Err(e) = self.store.clear() {
            warn!("Failed to clear saved token: {}", e);
        }
        self.session.set(Session::Anonymous);
        info!("Logged out");
    }

    /// Creates an account. The session stays anonymous; the user logs in next.
    pub async fn register(&self, name: &str, email: &str, password: &str) -> bool {
        if name.is_empty() || email.is_empty() || password.is_empty() {
            self.status.report(&AppError::Validation);
            return false;
        }

        match self.backend.signup(name, email, password).await {
            Ok(message) => {
                info!("Registered {}: {}", email, message);
                self.status.succeed("Account created, please log in");
                true
            }
            Err(e) => {
                let error = match e.server_message() {
                    Some(message) => AppError::Rejected(message.to_string()),
                    None => AppError::transport("Server not reachable", e),
                };
                self.status.report(&error);
                false
            }
        }
    }

    pub async fn profile(&self) -> Option<UserProfile> {
        let credential = self.credential()?;
        match self.backend.current_user(&credential).await {
            Ok(profile) => Some(profile),
            Err(e) => {
                warn!("Failed to load profile: {}", e);
                None
            }
        }
    }
}
