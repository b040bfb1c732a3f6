use crate::utils::error::Result;
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;

/// A Kroger resource addressable as `{ENDPOINT}` and `{ENDPOINT}/{id}`.
pub trait Resource: DeserializeOwned + Serialize + Send + 'static {
    const ENDPOINT: &'static str;
    /// Singular name used in logs and error messages.
    const NAME: &'static str;
}

/// Supplies bearer tokens to the client.
#[async_trait]
pub trait TokenProvider: Send + Sync {
    async fn access_token(&self) -> Result<String>;

    /// Drops any cached token so the next call fetches a new one.
    async fn invalidate(&self);
}
