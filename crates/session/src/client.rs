//! Session-aware HTTP client
//!
//! Single point of egress for authenticated API calls. Attaches the current
//! access token to every request and handles token expiry transparently:
//! on a 401 the session is refreshed and the original request re-issued
//! exactly once, so callers never implement retry logic themselves.

use crate::store::SessionStore;
use reqwest::header;
use std::sync::Arc;
use tracing::{debug, warn};
use vidya_http::ClientError;

/// Callback invoked when the session is unrecoverable and the user must be
/// sent back to the login entry point. Injected by the embedding UI.
pub type UnauthorizedHook = Arc<dyn Fn() + Send + Sync>;

/// HTTP client wrapper bound to a [`SessionStore`].
///
/// Constructed once at startup and cloned freely; all clones share the same
/// session.
#[derive(Clone)]
pub struct SessionClient {
    store: Arc<SessionStore>,
    on_unauthorized: Option<UnauthorizedHook>,
}

impl SessionClient {
    /// Wrap the given session store.
    pub fn new(store: Arc<SessionStore>) -> Self {
        Self {
            store,
            on_unauthorized: None,
        }
    }

    /// Install the hook fired when the session cannot be recovered.
    pub fn with_unauthorized_hook(mut self, hook: UnauthorizedHook) -> Self {
        self.on_unauthorized = Some(hook);
        self
    }

    /// The shared session store.
    pub fn store(&self) -> &Arc<SessionStore> {
        &self.store
    }

    /// Create a request builder for the given endpoint.
    ///
    /// The access token is attached at send time, not here, so a retry after
    /// refresh picks up the fresh token.
    pub fn request(&self, method: reqwest::Method, path: &str) -> reqwest::RequestBuilder {
        self.store.http().request(method, path)
    }

    /// Execute a request, refreshing the session and retrying once on 401.
    ///
    /// The retry's outcome, success or failure, is returned as if it were
    /// the first attempt. If the refresh itself fails the session is torn
    /// down, the unauthorized hook fires, and the original 401 error is
    /// still propagated to the caller.
    pub async fn execute<T: serde::de::DeserializeOwned>(
        &self,
        request: reqwest::RequestBuilder,
    ) -> Result<T, ClientError> {
        let access = self.store.access_token();
        // Cloned before sending; None for non-replayable (streaming) bodies.
        let retry = request.try_clone();

        let err = match self.send(request, access.as_deref()).await {
            Ok(value) => return Ok(value),
            Err(err) if err.is_unauthorized() => err,
            Err(err) => return Err(err),
        };

        let refreshed = match access.as_deref() {
            Some(stale) => self.store.refresh_if_stale(stale).await,
            None => self.store.refresh().await,
        };

        match refreshed {
            Ok(new_access) => match retry {
                Some(retry) => {
                    debug!("retrying request with refreshed access token");
                    self.send(retry, Some(&new_access)).await
                }
                None => Err(err),
            },
            Err(refresh_err) => {
                warn!(error = %refresh_err, "session refresh failed; forcing logout");
                self.store.logout();
                if let Some(hook) = &self.on_unauthorized {
                    hook();
                }
                Err(err)
            }
        }
    }

    async fn send<T: serde::de::DeserializeOwned>(
        &self,
        request: reqwest::RequestBuilder,
        access: Option<&str>,
    ) -> Result<T, ClientError> {
        let request = match access {
            Some(access) => request.header(header::AUTHORIZATION, format!("Bearer {access}")),
            None => request,
        };
        self.store.http().execute(request).await
    }
}

impl std::fmt::Debug for SessionClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionClient")
            .field("store", &self.store)
            .field("has_unauthorized_hook", &self.on_unauthorized.is_some())
            .finish()
    }
}
