//! Cloud account service.
//!
//! Owns the HTTP client and the token source, and hands out one
//! resource handle per API area.

use crate::account::MeResource;
use crate::auth::{StaticTokenSource, TokenSource};
use crate::client::AccountClient;
use crate::types::CloudAccountConfig;
use qeek_core::ApiError;

pub struct CloudAccountService<S: TokenSource = StaticTokenSource> {
    client: AccountClient,
    token_source: S,
}

impl<S: TokenSource> std::fmt::Debug for CloudAccountService<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CloudAccountService")
            .field("client", &self.client)
            .finish()
    }
}

impl CloudAccountService<StaticTokenSource> {
    /// A service using a fixed bearer token.
    pub fn with_token(config: &CloudAccountConfig, token: &str) -> Result<Self, ApiError> {
        Self::new(config, StaticTokenSource::new(token))
    }
}

impl<S: TokenSource> CloudAccountService<S> {
    pub fn new(config: &CloudAccountConfig, token_source: S) -> Result<Self, ApiError> {
        Ok(Self {
            client: AccountClient::new(config)?,
            token_source,
        })
    }

    pub fn client(&self) -> &AccountClient {
        &self.client
    }

    pub fn token_source(&self) -> &S {
        &self.token_source
    }

    /// The signed-in account.
    pub fn me(&self) -> MeResource<'_, S> {
        MeResource::new(self)
    }
}
