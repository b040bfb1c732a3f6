pub mod env;
pub mod toml_config;

use crate::utils::error::Result;
use crate::utils::validation::{
    validate_non_empty_string, validate_range, validate_url, Validate,
};
use serde::{Deserialize, Serialize};

pub const DEFAULT_API_URL: &str = "https://api.kroger.com/v1";
pub const TOKEN_PATH: &str = "connect/oauth2/token";
pub const DEFAULT_PAGE_SIZE: usize = 10;
pub const MAX_PAGE_SIZE: usize = 50;
pub const MAX_RETRY_DELAY_MS: u64 = 60_000;

/// Scope required by the Products API.
pub const SCOPE_PRODUCT_COMPACT: &str = "product.compact";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClientConfig {
    pub credentials: Credentials,
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub http: HttpConfig,
}

#[derive(Clone, PartialEq, Serialize, Deserialize)]
pub struct Credentials {
    pub client_id: String,
    pub client_secret: String,
    #[serde(default)]
    pub scopes: Vec<String>,
}

// Keeps the secret out of debug logs.
impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("client_id", &self.client_id)
            .field("client_secret", &"***")
            .field("scopes", &self.scopes)
            .finish()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Defaults to `{base_url}/connect/oauth2/token`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token_url: Option<String>,
    /// Records requested per page (`filter.limit`).
    #[serde(default = "default_page_size")]
    pub page_size: usize,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            token_url: None,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl ApiConfig {
    pub fn token_url(&self) -> String {
        self.token_url.clone().unwrap_or_else(|| {
            format!("{}/{}", self.base_url.trim_end_matches('/'), TOKEN_PATH)
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HttpConfig {
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,
    #[serde(default = "default_retry_attempts")]
    pub retry_attempts: u32,
    #[serde(default = "default_retry_delay_ms")]
    pub retry_delay_ms: u64,
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_seconds: default_timeout_seconds(),
            retry_attempts: default_retry_attempts(),
            retry_delay_ms: default_retry_delay_ms(),
            user_agent: default_user_agent(),
        }
    }
}

fn default_base_url() -> String {
    DEFAULT_API_URL.to_string()
}

fn default_page_size() -> usize {
    DEFAULT_PAGE_SIZE
}

fn default_timeout_seconds() -> u64 {
    30
}

fn default_retry_attempts() -> u32 {
    3
}

fn default_retry_delay_ms() -> u64 {
    500
}

fn default_user_agent() -> String {
    "Kroger API Client".to_string()
}

impl ClientConfig {
    pub fn new(client_id: impl Into<String>, client_secret: impl Into<String>) -> Self {
        Self {
            credentials: Credentials {
                client_id: client_id.into(),
                client_secret: client_secret.into(),
                scopes: Vec::new(),
            },
            api: ApiConfig::default(),
            http: HttpConfig::default(),
        }
    }

    pub fn with_scopes<I, S>(mut self, scopes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.credentials.scopes = scopes.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.api.page_size = page_size;
        self
    }

    /// Points both the API and the token endpoint at `base_url`.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.api.base_url = base_url.into();
        self.api.token_url = None;
        self
    }

    pub fn with_token_url(mut self, token_url: impl Into<String>) -> Self {
        self.api.token_url = Some(token_url.into());
        self
    }

    pub fn with_timeout_seconds(mut self, timeout_seconds: u64) -> Self {
        self.http.timeout_seconds = timeout_seconds;
        self
    }

    pub fn with_retry(mut self, attempts: u32, delay_ms: u64) -> Self {
        self.http.retry_attempts = attempts;
        self.http.retry_delay_ms = delay_ms;
        self
    }

    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.http.user_agent = user_agent.into();
        self
    }
}

impl Validate for ClientConfig {
    fn validate(&self) -> Result<()> {
        validate_non_empty_string("credentials.client_id", &self.credentials.client_id)?;
        validate_non_empty_string("credentials.client_secret", &self.credentials.client_secret)?;
        for scope in &self.credentials.scopes {
            validate_non_empty_string("credentials.scopes", scope)?;
        }

        validate_url("api.base_url", &self.api.base_url)?;
        validate_url("api.token_url", &self.api.token_url())?;
        validate_range("api.page_size", self.api.page_size, 1, MAX_PAGE_SIZE)?;

        validate_range("http.timeout_seconds", self.http.timeout_seconds, 1, 600)?;
        validate_range("http.retry_attempts", self.http.retry_attempts, 0, 10)?;
        validate_range("http.retry_delay_ms", self.http.retry_delay_ms, 0, MAX_RETRY_DELAY_MS)?;
        validate_non_empty_string("http.user_agent", &self.http.user_agent)?;

        tracing::debug!("Client configuration validation passed");
        Ok(())
    }
}
