use crate::config::ClientConfig;
use crate::core::client::error_message;
use crate::domain::ports::TokenProvider;
use crate::utils::error::{KrogerError, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::time::{Duration, Instant};
use tokio::sync::Mutex;

/// Tokens are refreshed this long before the server-side expiry.
const EXPIRY_MARGIN: Duration = Duration::from_secs(30);
const DEFAULT_EXPIRES_IN: u64 = 1800;
/// Upper bound on the lifetime honored from a token response.
const MAX_EXPIRES_IN: u64 = 86_400;

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    #[serde(default)]
    expires_in: Option<u64>,
    #[serde(default)]
    token_type: Option<String>,
}

#[derive(Debug, Clone)]
struct CachedToken {
    value: String,
    expires_at: Instant,
}

impl CachedToken {
    fn is_fresh(&self) -> bool {
        Instant::now() + EXPIRY_MARGIN < self.expires_at
    }
}

/// OAuth2 client-credentials grant against the Kroger token endpoint.
pub struct ClientCredentialsAuth {
    http: Client,
    token_url: String,
    client_id: String,
    client_secret: String,
    scopes: Vec<String>,
    cached: Mutex<Option<CachedToken>>,
}

impl ClientCredentialsAuth {
    pub fn new(http: Client, config: &ClientConfig) -> Self {
        Self {
            http,
            token_url: config.api.token_url(),
            client_id: config.credentials.client_id.clone(),
            client_secret: config.credentials.client_secret.clone(),
            scopes: config.credentials.scopes.clone(),
            cached: Mutex::new(None),
        }
    }

    async fn request_token(&self) -> Result<CachedToken> {
        let scope = self.scopes.join(" ");
        let mut form = vec![("grant_type", "client_credentials")];
        if !scope.is_empty() {
            form.push(("scope", scope.as_str()));
        }

        tracing::debug!("Requesting access token from {}", self.token_url);
        let response = self
            .http
            .post(&self.token_url)
            .basic_auth(&self.client_id, Some(&self.client_secret))
            .form(&form)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() || e.is_connect() {
                    KrogerError::from(e)
                } else {
                    KrogerError::AuthError {
                        message: format!("token request failed: {}", e),
                    }
                }
            })?;

        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            return Err(KrogerError::AuthError {
                message: format!("token endpoint returned {}: {}", status, error_message(status, &body)),
            });
        }

        let token: TokenResponse =
            serde_json::from_str(&body).map_err(|e| KrogerError::AuthError {
                message: format!("unreadable token response: {}", e),
            })?;

        if let Some(token_type) = token.token_type.as_deref() {
            if !token_type.eq_ignore_ascii_case("bearer") {
                tracing::warn!("Unexpected token type {:?}, using it as a bearer token", token_type);
            }
        }

        let expires_in = token
            .expires_in
            .unwrap_or(DEFAULT_EXPIRES_IN)
            .min(MAX_EXPIRES_IN);
        tracing::info!("Obtained access token (expires in {}s)", expires_in);

        Ok(CachedToken {
            value: token.access_token,
            expires_at: Instant::now() + Duration::from_secs(expires_in),
        })
    }
}

#[async_trait]
impl TokenProvider for ClientCredentialsAuth {
    async fn access_token(&self) -> Result<String> {
        // Held across the request so concurrent callers share one refresh.
        let mut cached = self.cached.lock().await;
        if let Some(token) = cached.as_ref().filter(|t| t.is_fresh()) {
            return Ok(token.value.clone());
        }

        let token = self.request_token().await?;
        let value = token.value.clone();
        *cached = Some(token);
        Ok(value)
    }

    async fn invalidate(&self) {
        self.cached.lock().await.take();
    }
}

/// A pre-issued token, e.g. one obtained through a user authorization flow.
#[derive(Clone)]
pub struct StaticToken(String);

impl StaticToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }
}

impl std::fmt::Debug for StaticToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("StaticToken(***)")
    }
}

#[async_trait]
impl TokenProvider for StaticToken {
    async fn access_token(&self) -> Result<String> {
        Ok(self.0.clone())
    }

    async fn invalidate(&self) {}
}
