//! Admin access
//!
//! The admin role is a UI gate, not access control: every report is held
//! in-process and readable by anyone running the client. An
//! [`AdminSession`] can only be obtained through [`AdminService::login`],
//! and operations reserved for admins take one by reference.

use std::sync::Arc;

use secrecy::{ExposeSecret, SecretString};

use crate::config::AdminConfig;
use crate::error::{AuthError, Result};
use crate::service::events::{Event, EventBus};

/// Checks an admin credential pair
pub trait Authenticator: Send + Sync {
    fn verify(&self, username: &str, password: &str) -> bool;

    fn name(&self) -> &str;
}

/// A single fixed credential pair
///
/// This is a placeholder: the pair ships with the client, so anyone holding
/// the binary or the config file holds the credentials.
pub struct StaticCredentials {
    username: String,
    password: SecretString,
}

impl StaticCredentials {
    pub fn new(username: impl Into<String>, password: SecretString) -> Self {
        tracing::warn!(
            "Admin login uses static client-side credentials; this is not access control"
        );
        Self {
            username: username.into(),
            password,
        }
    }

    pub fn from_config(config: &AdminConfig) -> Self {
        Self::new(
            config.username.clone(),
            SecretString::from(config.password.clone()),
        )
    }
}

impl std::fmt::Debug for StaticCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StaticCredentials")
            .field("username", &self.username)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

impl Authenticator for StaticCredentials {
    fn verify(&self, username: &str, password: &str) -> bool {
        username == self.username && password == self.password.expose_secret()
    }

    fn name(&self) -> &str {
        "static"
    }
}

/// Proof that a login succeeded
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdminSession {
    username: String,
}

impl AdminSession {
    pub fn username(&self) -> &str {
        &self.username
    }
}

#[derive(Clone)]
pub struct AdminService {
    authenticator: Arc<dyn Authenticator>,
    events: EventBus,
}

impl AdminService {
    pub fn new(authenticator: Arc<dyn Authenticator>, events: EventBus) -> Self {
        Self {
            authenticator,
            events,
        }
    }

    /// Exchange a credential pair for a session
    ///
    /// Credentials are compared exactly, without trimming. There is no
    /// lockout after repeated failures.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidCredentials` for any mismatch, without
    /// saying which field was wrong.
    pub fn login(&self, username: &str, password: &str) -> Result<AdminSession> {
        if !self.authenticator.verify(username, password) {
            tracing::warn!(
                authenticator = self.authenticator.name(),
                "Admin login rejected"
            );
            return Err(AuthError::InvalidCredentials.into());
        }

        tracing::info!(username = %username, "Admin logged in");
        self.events.emit(Event::AdminLoggedIn);
        Ok(AdminSession {
            username: username.to_string(),
        })
    }

    /// End a session
    pub fn logout(&self, session: AdminSession) {
        tracing::info!(username = %session.username, "Admin logged out");
        self.events.emit(Event::AdminLoggedOut);
    }
}

#[cfg(test)]
pub(crate) fn test_session() -> AdminSession {
    AdminSession {
        username: "tester".to_string(),
    }
}
