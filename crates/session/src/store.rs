//! Session store: owns the token pair and the authenticated identity
//!
//! All authentication transitions go through this type. It is constructed
//! once at process start and shared behind an `Arc`; views and the HTTP
//! wrapper only ever read the derived [`SessionState`].

use crate::error::SessionError;
use crate::tokens::{ACCESS_TOKEN_KEY, REFRESH_TOKEN_KEY, TokenStore};
use std::sync::{Arc, RwLock};
use tracing::{debug, info, warn};
use vidya_http::client::LoginChannel;
use vidya_http::types::{Identity, LoginRequest, RegisterRequest, RegisteredUser, Role, TokenPair};
use vidya_http::VidyaClient;

/// Snapshot of the session.
///
/// The identity is only present while a valid token pair is held, so
/// `is_authenticated()` and "identity present" cannot disagree.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SessionState {
    identity: Option<Identity>,
}

impl SessionState {
    /// Whether a user is currently authenticated.
    pub fn is_authenticated(&self) -> bool {
        self.identity.is_some()
    }

    /// The authenticated user's identity, if any.
    pub fn identity(&self) -> Option<&Identity> {
        self.identity.as_ref()
    }

    /// The authenticated user's role, if any.
    pub fn role(&self) -> Option<Role> {
        self.identity.as_ref().map(|identity| identity.role)
    }

    #[cfg(test)]
    pub(crate) fn with_identity(identity: Identity) -> Self {
        Self {
            identity: Some(identity),
        }
    }
}

/// Owns the current session: token pair, identity, and every transition
/// between unauthenticated and authenticated.
pub struct SessionStore {
    http: VidyaClient,
    tokens: Arc<dyn TokenStore>,
    state: RwLock<SessionState>,
    // Serializes refreshes so concurrent 401s coalesce into one exchange.
    refresh_gate: tokio::sync::Mutex<()>,
}

impl SessionStore {
    /// Create a store over the given client and token storage.
    ///
    /// The store starts unauthenticated; call [`SessionStore::restore`] to
    /// pick up a persisted session.
    pub fn new(http: VidyaClient, tokens: Arc<dyn TokenStore>) -> Self {
        Self {
            http,
            tokens,
            state: RwLock::new(SessionState::default()),
            refresh_gate: tokio::sync::Mutex::new(()),
        }
    }

    /// The underlying HTTP client.
    pub fn http(&self) -> &VidyaClient {
        &self.http
    }

    /// Snapshot of the current session state.
    pub fn state(&self) -> SessionState {
        self.state.read().expect("session state lock poisoned").clone()
    }

    /// Whether a user is currently authenticated.
    pub fn is_authenticated(&self) -> bool {
        self.state().is_authenticated()
    }

    /// The currently held access token, if any.
    pub fn access_token(&self) -> Option<String> {
        self.tokens.get(ACCESS_TOKEN_KEY)
    }

    /// Best-effort restore of a persisted session at startup.
    ///
    /// Any failure clears both persisted tokens and leaves the store
    /// unauthenticated; nothing surfaces to the caller.
    pub async fn restore(&self) {
        let Some(access) = self.tokens.get(ACCESS_TOKEN_KEY) else {
            debug!("no persisted access token; starting unauthenticated");
            return;
        };

        match self.http.me(&access).await {
            Ok(identity) => {
                info!(username = %identity.username, role = ?identity.role, "session restored");
                self.set_identity(identity);
            }
            Err(err) => {
                warn!(error = %err, "session restore failed; clearing persisted tokens");
                self.clear_tokens();
            }
        }
    }

    /// Authenticate with the backend.
    ///
    /// The standard user channel is tried first; if it rejects, the
    /// administrative channel is tried once with the same credentials. One
    /// form serves both kinds of account. If both channels reject, the
    /// caller sees a generic [`SessionError::InvalidCredentials`] with no
    /// hint of which check failed.
    pub async fn login(&self, identifier: &str, secret: &str) -> Result<Identity, SessionError> {
        let request = LoginRequest {
            username: identifier.to_owned(),
            password: secret.to_owned(),
        };

        let mut pair: Option<TokenPair> = None;
        for channel in LoginChannel::ORDERED {
            match self.http.login(channel, &request).await {
                Ok(tokens) => {
                    pair = Some(tokens);
                    break;
                }
                Err(err) => {
                    debug!(?channel, error = %err, "login channel rejected");
                }
            }
        }

        let Some(pair) = pair else {
            info!(username = %identifier, "login failed on all channels");
            return Err(SessionError::InvalidCredentials);
        };

        self.persist_tokens(&pair);

        // The session only becomes authenticated once the identity is known.
        // If that fetch fails, roll the tokens back so no half-open session
        // is left behind.
        let identity = match self.http.me(&pair.access).await {
            Ok(identity) => identity,
            Err(err) => {
                warn!(error = %err, "identity fetch after login failed; rolling back tokens");
                self.clear_tokens();
                return Err(err.into());
            }
        };

        info!(username = %identity.username, role = ?identity.role, "login succeeded");
        self.set_identity(identity.clone());
        Ok(identity)
    }

    /// Forward a registration payload to the backend.
    ///
    /// Does not mutate session state and does not log the new user in.
    pub async fn register(&self, profile: &RegisterRequest) -> Result<RegisteredUser, SessionError> {
        Ok(self.http.register(profile).await?)
    }

    /// Clear the persisted token pair and return to unauthenticated.
    ///
    /// Purely local; always succeeds and may be called repeatedly.
    pub fn logout(&self) {
        self.clear_tokens();
        info!("logged out");
    }

    /// Exchange the stored refresh token for a new access token.
    ///
    /// Persists and returns the new access token. Fails with
    /// [`SessionError::RefreshFailed`] if no refresh token is held or the
    /// backend rejects it.
    pub async fn refresh(&self) -> Result<String, SessionError> {
        let _gate = self.refresh_gate.lock().await;
        self.exchange_refresh().await
    }

    /// Single-flight refresh for 401 handling.
    ///
    /// `stale_access` is the token the caller just saw rejected. Callers
    /// that queue up behind an in-flight refresh reuse its result instead of
    /// issuing a second exchange, which also prevents a late refresh from
    /// overwriting a fresher token.
    pub async fn refresh_if_stale(&self, stale_access: &str) -> Result<String, SessionError> {
        let _gate = self.refresh_gate.lock().await;

        if let Some(current) = self.tokens.get(ACCESS_TOKEN_KEY) {
            if current != stale_access {
                debug!("access token already refreshed by a concurrent caller");
                return Ok(current);
            }
        }

        self.exchange_refresh().await
    }

    async fn exchange_refresh(&self) -> Result<String, SessionError> {
        let Some(refresh) = self.tokens.get(REFRESH_TOKEN_KEY) else {
            return Err(SessionError::RefreshFailed("no refresh token held".into()));
        };

        match self.http.refresh_token(&refresh).await {
            Ok(response) => {
                self.tokens.set(ACCESS_TOKEN_KEY, &response.access);
                debug!("access token refreshed");
                Ok(response.access)
            }
            Err(err) => Err(SessionError::RefreshFailed(err.to_string())),
        }
    }

    fn persist_tokens(&self, pair: &TokenPair) {
        self.tokens.set(ACCESS_TOKEN_KEY, &pair.access);
        self.tokens.set(REFRESH_TOKEN_KEY, &pair.refresh);
    }

    fn clear_tokens(&self) {
        self.tokens.remove(ACCESS_TOKEN_KEY);
        self.tokens.remove(REFRESH_TOKEN_KEY);
        self.state
            .write()
            .expect("session state lock poisoned")
            .identity = None;
    }

    fn set_identity(&self, identity: Identity) {
        self.state
            .write()
            .expect("session state lock poisoned")
            .identity = Some(identity);
    }
}

impl std::fmt::Debug for SessionStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionStore")
            .field("authenticated", &self.is_authenticated())
            .finish_non_exhaustive()
    }
}
