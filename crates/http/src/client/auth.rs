//! Authentication endpoint methods

use super::{LoginChannel, VidyaClient};
use crate::error::ClientError;
use crate::types::{
    Identity, LoginRequest, RefreshRequest, RefreshResponse, RegisterRequest, RegisteredUser,
    TokenPair,
};

impl VidyaClient {
    /// Exchange credentials for a token pair on the given login channel.
    pub async fn login(
        &self,
        channel: LoginChannel,
        request: &LoginRequest,
    ) -> Result<TokenPair, ClientError> {
        let req = self
            .request(reqwest::Method::POST, channel.path())
            .json(request);
        self.execute(req).await
    }

    /// Obtain a fresh access token from a refresh token.
    pub async fn refresh_token(&self, refresh: &str) -> Result<RefreshResponse, ClientError> {
        let req = self
            .request(reqwest::Method::POST, "/token/refresh/")
            .json(&RefreshRequest {
                refresh: refresh.to_owned(),
            });
        self.execute(req).await
    }

    /// Fetch the identity the given access token belongs to.
    pub async fn me(&self, access: &str) -> Result<Identity, ClientError> {
        let req = self.request_with_token(reqwest::Method::GET, "/me/", access);
        self.execute(req).await
    }

    /// Register a new user. Does not log the user in.
    pub async fn register(&self, request: &RegisterRequest) -> Result<RegisteredUser, ClientError> {
        let req = self
            .request(reqwest::Method::POST, "/register/")
            .json(request);
        self.execute(req).await
    }
}
