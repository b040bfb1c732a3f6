use crate::config::ClientConfig;
use crate::core::auth::ClientCredentialsAuth;
use crate::core::query::{LocationQuery, ProductQuery};
use crate::domain::ports::{Resource, TokenProvider};
use crate::domain::{Chain, Collection, DepartmentInfo, Envelope, Location, Product};
use crate::utils::error::{KrogerError, Result};
use crate::utils::validation::Validate;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, CONTENT_TYPE, USER_AGENT};
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use std::sync::Arc;
use std::time::Duration;
use url::Url;

#[derive(Debug, Clone, Copy)]
struct RetryPolicy {
    attempts: u32,
    delay: Duration,
}

impl RetryPolicy {
    /// Linear backoff: `delay`, `2 * delay`, ...
    fn backoff(&self, attempt: u32) -> Duration {
        self.delay.saturating_mul(attempt.saturating_add(1))
    }
}

/// Async client for the Kroger public API.
///
/// Cheap to clone; clones share the connection pool and the token cache.
#[derive(Clone)]
pub struct KrogerClient {
    http: Client,
    base_url: Url,
    page_size: usize,
    retry: RetryPolicy,
    auth: Arc<dyn TokenProvider>,
}

impl std::fmt::Debug for KrogerClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KrogerClient")
            .field("base_url", &self.base_url.as_str())
            .field("page_size", &self.page_size)
            .finish_non_exhaustive()
    }
}

impl KrogerClient {
    /// Validates `config` and authenticates with the client-credentials grant.
    pub fn new(config: ClientConfig) -> Result<Self> {
        config.validate()?;
        let http = build_http_client(&config)?;
        let auth = Arc::new(ClientCredentialsAuth::new(http.clone(), &config));
        Self::assemble(config, http, auth)
    }

    /// Like [`KrogerClient::new`] but with a caller-supplied token source.
    pub fn with_token_provider(
        config: ClientConfig,
        auth: Arc<dyn TokenProvider>,
    ) -> Result<Self> {
        config.validate()?;
        let http = build_http_client(&config)?;
        Self::assemble(config, http, auth)
    }

    fn assemble(config: ClientConfig, http: Client, auth: Arc<dyn TokenProvider>) -> Result<Self> {
        if config.credentials.scopes.is_empty() {
            tracing::warn!("No scopes provided!");
        }

        let base_url = Url::parse(&config.api.base_url).map_err(|e| {
            KrogerError::InvalidConfigValueError {
                field: "api.base_url".to_string(),
                value: config.api.base_url.clone(),
                reason: e.to_string(),
            }
        })?;
        if base_url.cannot_be_a_base() {
            return Err(KrogerError::InvalidConfigValueError {
                field: "api.base_url".to_string(),
                value: config.api.base_url.clone(),
                reason: "URL cannot be used as a base".to_string(),
            });
        }

        Ok(Self {
            http,
            base_url,
            page_size: config.api.page_size,
            retry: RetryPolicy {
                attempts: config.http.retry_attempts,
                delay: Duration::from_millis(config.http.retry_delay_ms),
            },
            auth,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// Searches products. Scope: `product.compact`.
    pub async fn search_products(&self, query: &ProductQuery) -> Result<Collection<Product>> {
        let params = query.to_params()?;
        self.search::<Product>(&params, query.top_n).await
    }

    /// Fetches one product by its 13-digit product id or UPC. Scope: `product.compact`.
    pub async fn get_product(&self, product_id: &str) -> Result<Product> {
        self.get::<Product>(product_id).await
    }

    pub async fn search_locations(&self, query: &LocationQuery) -> Result<Collection<Location>> {
        let params = query.to_params()?;
        self.search::<Location>(&params, query.top_n).await
    }

    pub async fn get_location(&self, location_id: &str) -> Result<Location> {
        self.get::<Location>(location_id).await
    }

    pub async fn list_chains(&self) -> Result<Vec<Chain>> {
        self.list::<Chain>().await
    }

    pub async fn get_chain(&self, name: &str) -> Result<Chain> {
        self.get::<Chain>(name).await
    }

    pub async fn list_departments(&self) -> Result<Vec<DepartmentInfo>> {
        self.list::<DepartmentInfo>().await
    }

    pub async fn get_department(&self, department_id: &str) -> Result<DepartmentInfo> {
        self.get::<DepartmentInfo>(department_id).await
    }

    /// `GET {ENDPOINT}/{id}`, unwrapping the single-record envelope.
    pub async fn get<T: Resource>(&self, id: &str) -> Result<T> {
        if id.trim().is_empty() {
            return Err(KrogerError::validation(format!("{} id cannot be empty", T::NAME)));
        }
        let url = self.endpoint(&[T::ENDPOINT, id.trim()])?;
        let envelope: Envelope<T> = self.get_json(url, &[]).await?;
        Ok(envelope.data)
    }

    /// `GET {ENDPOINT}` for unpaginated catalog listings.
    pub async fn list<T: Resource>(&self) -> Result<Vec<T>> {
        let url = self.endpoint(&[T::ENDPOINT])?;
        let envelope: Envelope<Vec<T>> = self.get_json(url, &[]).await?;
        Ok(envelope.data)
    }

    /// Walks `filter.start`/`filter.limit` pages until `top_n` records are
    /// collected or the result set is exhausted.
    pub async fn search<T: Resource>(&self, params: &[(&str, String)], top_n: usize) -> Result<Collection<T>> {
        let url = self.endpoint(&[T::ENDPOINT])?;
        let mut items: Vec<T> = Vec::new();
        let mut total: Option<u64> = None;
        let mut start: usize = 0;

        while items.len() < top_n {
            let limit = (top_n - items.len()).min(self.page_size);
            let mut page_params: Vec<(&str, String)> = params.to_vec();
            page_params.push(("filter.limit", limit.to_string()));
            page_params.push(("filter.start", start.to_string()));

            let envelope: Envelope<Vec<T>> = self.get_json(url.clone(), &page_params).await?;
            for warning in envelope.warnings() {
                tracing::warn!("Kroger API warning for {} search: {}", T::NAME, warning);
            }
            if let Some(reported) = envelope.total() {
                total = Some(reported);
            }

            let received = envelope.data.len();
            tracing::debug!(
                "Fetched {} {} records at offset {} (total: {:?})",
                received,
                T::NAME,
                start,
                total
            );
            items.extend(envelope.data);
            start += received;

            let exhausted = total.is_some_and(|t| start as u64 >= t);
            if received < limit || exhausted {
                break;
            }
        }

        items.truncate(top_n);
        Ok(Collection { items, total })
    }

    fn endpoint(&self, segments: &[&str]) -> Result<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| KrogerError::ConfigError {
                message: format!("base URL {} cannot be used as a base", self.base_url),
            })?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// Sends an authenticated GET, retrying transient failures and refreshing
    /// the token once on `401`.
    async fn get_json<R: DeserializeOwned>(&self, url: Url, params: &[(&str, String)]) -> Result<R> {
        let mut attempt: u32 = 0;
        let mut refreshed = false;

        loop {
            let token = self.auth.access_token().await?;
            tracing::debug!("GET {} (attempt {})", url, attempt + 1);

            let outcome = self
                .http
                .get(url.clone())
                .bearer_auth(&token)
                .query(params)
                .send()
                .await;

            let err = match outcome {
                Ok(response) => {
                    let status = response.status();
                    tracing::debug!("API response status: {}", status);

                    if status.is_success() {
                        let body = response.bytes().await?;
                        return serde_json::from_slice(&body).map_err(KrogerError::from);
                    }

                    if status == StatusCode::UNAUTHORIZED && !refreshed {
                        tracing::warn!("Access token rejected, requesting a new one");
                        self.auth.invalidate().await;
                        refreshed = true;
                        continue;
                    }

                    let body = response.text().await.unwrap_or_default();
                    KrogerError::HttpStatusError {
                        status: status.as_u16(),
                        message: error_message(status, &body),
                    }
                }
                Err(e) => KrogerError::from(e),
            };

            if err.is_retryable() && attempt < self.retry.attempts {
                let delay = self.retry.backoff(attempt);
                tracing::warn!(
                    "Request to {} failed ({}), retrying in {:?}",
                    url.path(),
                    err,
                    delay
                );
                tokio::time::sleep(delay).await;
                attempt += 1;
                continue;
            }

            return Err(err);
        }
    }
}

fn build_http_client(config: &ClientConfig) -> Result<Client> {
    let mut headers = HeaderMap::new();
    headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    headers.insert(
        USER_AGENT,
        HeaderValue::from_str(&config.http.user_agent).map_err(|e| {
            KrogerError::InvalidConfigValueError {
                field: "http.user_agent".to_string(),
                value: config.http.user_agent.clone(),
                reason: e.to_string(),
            }
        })?,
    );

    Ok(Client::builder()
        .default_headers(headers)
        .timeout(Duration::from_secs(config.http.timeout_seconds))
        .build()?)
}

/// Pulls a readable message out of a Kroger or OAuth error body.
pub(crate) fn error_message(status: StatusCode, body: &str) -> String {
    if let Ok(json) = serde_json::from_str::<serde_json::Value>(body) {
        let candidates = [
            json.pointer("/errors/reason"),
            json.pointer("/errors/0/reason"),
            json.pointer("/error_description"),
            json.pointer("/message"),
            json.pointer("/error"),
        ];
        if let Some(message) = candidates
            .into_iter()
            .flatten()
            .find_map(|v| v.as_str())
        {
            return message.to_string();
        }
    }

    let trimmed = body.trim();
    if trimmed.is_empty() {
        status
            .canonical_reason()
            .unwrap_or("unknown error")
            .to_string()
    } else {
        trimmed.chars().take(500).collect()
    }
}
