//! Session lifecycle: token loading, profile verification, login,
//! registration, and logout.
//!
//! The `Session` owns the API client and the token store and is the only
//! writer of the client's bearer token. It is constructed once at startup
//! and passed by reference to whatever needs it; `initialize` must be
//! awaited before the first access decision.

// Allow dead code: state accessors for future use
#![allow(dead_code)]

use tracing::{debug, info, warn};

use crate::api::{ApiClient, ApiError};
use crate::models::{Credentials, RegisterRequest, UserProfile};

use super::TokenStore;

/// Authentication state, published to the rest of the application.
///
/// `Authenticated` carries the verified profile; it is populated only
/// while the client holds a token the server has accepted.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionState {
    /// Startup verification still in flight; no access decision yet.
    Initializing,
    Anonymous,
    Authenticated(UserProfile),
}

pub struct Session {
    client: ApiClient,
    store: TokenStore,
    state: SessionState,
}

impl Session {
    pub fn new(client: ApiClient, store: TokenStore) -> Self {
        Self {
            client,
            store,
            state: SessionState::Initializing,
        }
    }

    /// Resolve the startup state from the persisted token.
    ///
    /// A stored token that fails the profile check is treated as expired:
    /// it is cleared and the session becomes anonymous without raising
    /// anything to the caller. This is background reconciliation, not a
    /// user action.
    pub async fn initialize(&mut self) {
        let Some(token) = self.store.load() else {
            debug!("No stored token, starting anonymous");
            self.state = SessionState::Anonymous;
            return;
        };

        self.client.set_token(Some(token));
        match self.client.current_user().await {
            Ok(user) => {
                info!(user = %user.email, "Resumed session");
                self.state = SessionState::Authenticated(user);
            }
            Err(e) => {
                warn!(error = %e, "Stored token rejected, clearing session");
                if let Err(e) = self.store.clear() {
                    warn!(error = %e, "Failed to clear stored token");
                }
                self.client.set_token(None);
                self.state = SessionState::Anonymous;
            }
        }
    }

    /// Exchange credentials for a session. On success the token is
    /// persisted and attached to the client; on failure nothing changes.
    pub async fn login(&mut self, email: &str, password: &str) -> Result<UserProfile, ApiError> {
        // Credentials are held only for this request, never persisted
        let credentials = Credentials {
            email: email.to_string(),
            password: password.to_string(),
        };
        let response = self.client.login(&credentials).await?;

        if let Err(e) = self.store.save(&response.access_token) {
            // Degraded storage means the session won't survive a restart,
            // which is acceptable; this login still succeeds.
            warn!(error = %e, "Failed to persist token");
        }
        self.client.set_token(Some(response.access_token));
        info!(user = %response.user.email, "Logged in");
        self.state = SessionState::Authenticated(response.user.clone());
        Ok(response.user)
    }

    /// Create an account. Session state is untouched either way.
    pub async fn register(&mut self, request: &RegisterRequest) -> Result<(), ApiError> {
        self.client.register(request).await
    }

    /// Drop the session unconditionally: no server round-trip, succeeds
    /// even when already anonymous.
    pub fn logout(&mut self) {
        if let Err(e) = self.store.clear() {
            warn!(error = %e, "Failed to clear stored token");
        }
        self.client.set_token(None);
        if self.state != SessionState::Anonymous {
            info!("Logged out");
        }
        self.state = SessionState::Anonymous;
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn user(&self) -> Option<&UserProfile> {
        match &self.state {
            SessionState::Authenticated(user) => Some(user),
            _ => None,
        }
    }

    pub fn is_authenticated(&self) -> bool {
        matches!(self.state, SessionState::Authenticated(_))
    }

    pub fn is_loading(&self) -> bool {
        self.state == SessionState::Initializing
    }

    /// The configured client, for issuing API requests.
    pub fn client(&self) -> &ApiClient {
        &self.client
    }

    #[cfg(test)]
    fn stored_token(&self) -> Option<String> {
        self.store.load()
    }
}
