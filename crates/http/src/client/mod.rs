//! VidyaSethu API client
//!
//! The client is deliberately stateless with respect to authentication:
//! callers supply an access token per request. Session ownership (token
//! persistence, refresh, 401 retry) belongs to `vidya-session`.

pub mod auth;

use crate::error::ClientError;
use reqwest::{Client, ClientBuilder, header};
use std::time::Duration;

const DEFAULT_USER_AGENT: &str = "vidya-client/0.1.0";

/// Low-level client for the VidyaSethu backend
#[derive(Debug, Clone)]
pub struct VidyaClient {
    client: Client,
    base_url: String,
}

impl VidyaClient {
    /// Create a client with default configuration.
    pub fn new(base_url: impl Into<String>) -> Result<Self, ClientError> {
        Self::builder().base_url(base_url).build()
    }

    /// Create a client builder.
    pub fn builder() -> VidyaClientBuilder {
        VidyaClientBuilder::default()
    }

    /// Get the base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Create a request builder without authentication.
    pub fn request(&self, method: reqwest::Method, path: &str) -> reqwest::RequestBuilder {
        let url = format!("{}{}", self.base_url, path);
        self.client.request(method, url)
    }

    /// Create a request builder carrying a bearer access token.
    pub fn request_with_token(
        &self,
        method: reqwest::Method,
        path: &str,
        access: &str,
    ) -> reqwest::RequestBuilder {
        self.request(method, path)
            .header(header::AUTHORIZATION, format!("Bearer {access}"))
    }

    /// Execute a request and decode the JSON response.
    pub async fn execute<T: serde::de::DeserializeOwned>(
        &self,
        request: reqwest::RequestBuilder,
    ) -> Result<T, ClientError> {
        let response = request.send().await?;
        let status = response.status();

        if status.is_success() {
            Ok(response.json().await?)
        } else {
            let message = response.text().await.unwrap_or_else(|_| status.to_string());
            tracing::debug!(status = status.as_u16(), "request rejected by backend");
            Err(ClientError::from_status(status, message))
        }
    }
}

/// Login channel the backend exposes; the standard channel serves regular
/// users, the administrative one superusers. One login form serves both.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoginChannel {
    User,
    Admin,
}

impl LoginChannel {
    /// Channels in the order they are tried during login.
    pub const ORDERED: [Self; 2] = [Self::User, Self::Admin];

    /// Endpoint path for this channel.
    pub fn path(self) -> &'static str {
        match self {
            Self::User => "/user-login/",
            Self::Admin => "/admin-login/",
        }
    }
}

/// Builder for [`VidyaClient`]
#[derive(Debug, Default)]
pub struct VidyaClientBuilder {
    base_url: Option<String>,
    timeout: Option<Duration>,
    user_agent: Option<String>,
}

impl VidyaClientBuilder {
    /// Set the base URL (required).
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Set the request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Set the user agent.
    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.user_agent = Some(agent.into());
        self
    }

    /// Build the client.
    pub fn build(self) -> Result<VidyaClient, ClientError> {
        let base_url = self
            .base_url
            .ok_or_else(|| ClientError::Configuration("base_url is required".into()))?;

        // Endpoint paths carry their own leading slash.
        let base_url = base_url.trim_end_matches('/').to_string();

        let mut client_builder = ClientBuilder::new()
            .user_agent(self.user_agent.unwrap_or_else(|| DEFAULT_USER_AGENT.into()));

        if let Some(timeout) = self.timeout {
            client_builder = client_builder.timeout(timeout);
        }

        let client = client_builder.build()?;

        Ok(VidyaClient { client, base_url })
    }
}
