//! Session state machine
//!
//! ```text
//! Anonymous --restore (token present)--> Resolving --me ok--> Authenticated
//!                                        Resolving --me err--> Invalid --> Anonymous
//! Anonymous --login ok--> Resolving --me ok--> Authenticated --logout--> Anonymous
//!                           Resolving --me err--> Invalid --> Anonymous
//! ```
//!
//! `Authenticated` is only reached with a persisted token that the backend
//! has just validated. The session is passed explicitly to whoever needs
//! it; there is no global instance.

use std::sync::{Arc, RwLock};

use shared::client::UserInfo;

use crate::api::BackofficeApi;
use crate::error::{ClientError, ClientResult};
use crate::http::{HttpClient, NetworkHttpClient};
use crate::storage::TokenStore;

/// Lifecycle state of the session
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionState {
    Anonymous,
    Resolving,
    Authenticated(UserInfo),
    /// Transient: the stored token was rejected and is being cleared
    Invalid,
}

impl SessionState {
    pub fn user(&self) -> Option<&UserInfo> {
        match self {
            Self::Authenticated(user) => Some(user),
            _ => None,
        }
    }
}

/// Current user session
#[derive(Debug)]
pub struct Session<H: HttpClient = NetworkHttpClient> {
    api: Arc<BackofficeApi<H>>,
    tokens: Arc<dyn TokenStore>,
    state: RwLock<SessionState>,
}

impl<H: HttpClient> Session<H> {
    /// New anonymous session sharing the API client's token store
    pub fn new(api: Arc<BackofficeApi<H>>) -> Self {
        let tokens = api.http().token_store();
        Self {
            api,
            tokens,
            state: RwLock::new(SessionState::Anonymous),
        }
    }

    pub fn api(&self) -> &Arc<BackofficeApi<H>> {
        &self.api
    }

    pub fn state(&self) -> SessionState {
        self.state.read().unwrap_or_else(|e| e.into_inner()).clone()
    }

    pub fn user(&self) -> Option<UserInfo> {
        self.state().user().cloned()
    }

    pub fn is_authenticated(&self) -> bool {
        self.user().is_some()
    }

    fn transition(&self, next: SessionState) {
        let mut state = self.state.write().unwrap_or_else(|e| e.into_inner());
        tracing::debug!(from = ?*state, to = ?next, "Session transition");
        *state = next;
    }

    /// Resolve the persisted token into a user, if there is one.
    ///
    /// A rejected token is cleared silently; the caller only sees the
    /// session end up anonymous.
    pub async fn restore(&self) -> ClientResult<SessionState> {
        if self.tokens.load()?.is_none() {
            self.transition(SessionState::Anonymous);
            return Ok(SessionState::Anonymous);
        }

        self.transition(SessionState::Resolving);
        match self.api.me().await {
            Ok(identity) => {
                let user = UserInfo::from(identity);
                tracing::info!(username = %user.username, role = %user.role, "Session restored");
                self.transition(SessionState::Authenticated(user));
            }
            Err(e) => {
                tracing::info!("Stored token rejected, clearing session: {}", e);
                self.invalidate()?;
            }
        }
        Ok(self.state())
    }

    /// Drop a rejected token. The state ends `Anonymous` even when the
    /// token file cannot be removed; that error is returned afterwards.
    fn invalidate(&self) -> ClientResult<()> {
        self.transition(SessionState::Invalid);
        let cleared = self.tokens.clear();
        self.transition(SessionState::Anonymous);
        cleared
    }

    /// Log in, persist the token and resolve it through `/auth/me`.
    ///
    /// On bad credentials the session stays anonymous and the error carries
    /// the fixed "invalid credentials" message. A token the identity lookup
    /// rejects is cleared again and that lookup error is returned.
    pub async fn login(&self, username: &str, password: &str) -> ClientResult<UserInfo> {
        let response = match self.api.login(username, password).await {
            Ok(r) => r,
            Err(e) => {
                tracing::info!(username, "Login failed: {}", e);
                return Err(e);
            }
        };

        if response.access_token.is_empty() {
            return Err(ClientError::InvalidState("Empty access token".into()));
        }

        self.tokens.save(&response.access_token)?;
        self.transition(SessionState::Resolving);
        let identity = match self.api.me().await {
            Ok(identity) => identity,
            Err(e) => {
                tracing::info!(username, "Identity lookup after login failed: {}", e);
                self.invalidate()?;
                return Err(e);
            }
        };

        let user = UserInfo::from(identity);
        tracing::info!(username = %user.username, role = %user.role, "Logged in");
        self.transition(SessionState::Authenticated(user.clone()));
        Ok(user)
    }

    /// Clear the token and the user
    pub fn logout(&self) -> ClientResult<()> {
        self.tokens.clear()?;
        self.transition(SessionState::Anonymous);
        tracing::info!("Logged out");
        Ok(())
    }
}
