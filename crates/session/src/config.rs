//! Session configuration

use crate::client::SessionClient;
use crate::store::SessionStore;
use crate::tokens::{FileTokenStore, TokenStore};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use vidya_http::{ClientError, VidyaClient};

/// Default backend base URL for local development.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8000/api";

/// Environment variable overriding the backend base URL.
pub const BASE_URL_ENV: &str = "VIDYA_API_URL";

/// Environment variable overriding the token file location.
pub const TOKEN_PATH_ENV: &str = "VIDYA_TOKEN_FILE";

/// Configuration for constructing a session at process start.
#[derive(Clone, Debug)]
pub struct SessionConfig {
    /// Backend base URL; endpoint paths are appended to it.
    pub base_url: String,
    /// Per-request timeout.
    pub timeout: Option<Duration>,
    /// Token file location; `None` uses the platform default.
    pub token_path: Option<PathBuf>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_owned(),
            timeout: None,
            token_path: None,
        }
    }
}

impl SessionConfig {
    /// Defaults with environment overrides applied.
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Ok(url) = std::env::var(BASE_URL_ENV) {
            config.base_url = url;
        }
        if let Ok(path) = std::env::var(TOKEN_PATH_ENV) {
            config.token_path = Some(PathBuf::from(path));
        }
        config
    }

    /// Wire up the client, file-backed token storage and session store.
    ///
    /// The returned client shares one [`SessionStore`]; call
    /// [`SessionStore::restore`] on it before first render to pick up a
    /// persisted session.
    pub fn build(&self) -> Result<SessionClient, ClientError> {
        let tokens: Arc<dyn TokenStore> = Arc::new(match &self.token_path {
            Some(path) => FileTokenStore::open(path),
            None => FileTokenStore::open_default(),
        });
        self.build_with_tokens(tokens)
    }

    /// Wire up the session over caller-provided token storage.
    pub fn build_with_tokens(
        &self,
        tokens: Arc<dyn TokenStore>,
    ) -> Result<SessionClient, ClientError> {
        let mut builder = VidyaClient::builder().base_url(&self.base_url);
        if let Some(timeout) = self.timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder.build()?;
        let store = Arc::new(SessionStore::new(http, tokens));
        Ok(SessionClient::new(store))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tokens::MemoryTokenStore;

    #[test]
    fn default_points_at_local_backend() {
        let config = SessionConfig::default();
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert!(config.token_path.is_none());
    }

    #[test]
    fn build_starts_unauthenticated() {
        let client = SessionConfig::default()
            .build_with_tokens(Arc::new(MemoryTokenStore::new()))
            .unwrap();
        assert!(!client.store().is_authenticated());
    }
}
