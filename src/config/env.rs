use crate::config::ClientConfig;
use crate::utils::error::{KrogerError, Result};
use crate::utils::validation::validate_required_field;

pub const CLIENT_ID_VAR: &str = "KROGER_CLIENT_ID";
pub const CLIENT_SECRET_VAR: &str = "KROGER_CLIENT_SECRET";
pub const SCOPES_VAR: &str = "KROGER_SCOPES";
pub const API_URL_VAR: &str = "KROGER_API_URL";
pub const PAGE_SIZE_VAR: &str = "KROGER_PAGE_SIZE";

impl ClientConfig {
    /// Reads `KROGER_CLIENT_ID` and `KROGER_CLIENT_SECRET` (required) plus
    /// optional `KROGER_SCOPES`, `KROGER_API_URL` and `KROGER_PAGE_SIZE`.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    pub(crate) fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let client_id = lookup(CLIENT_ID_VAR).filter(|v| !v.trim().is_empty());
        let client_secret = lookup(CLIENT_SECRET_VAR).filter(|v| !v.trim().is_empty());

        let mut config = ClientConfig::new(
            validate_required_field(CLIENT_ID_VAR, &client_id)?.clone(),
            validate_required_field(CLIENT_SECRET_VAR, &client_secret)?.clone(),
        );

        if let Some(scopes) = lookup(SCOPES_VAR) {
            config = config.with_scopes(parse_scopes(&scopes));
        }

        if let Some(api_url) = lookup(API_URL_VAR) {
            config = config.with_base_url(api_url);
        }

        if let Some(page_size) = lookup(PAGE_SIZE_VAR) {
            let parsed = page_size.trim().parse::<usize>().map_err(|_| {
                KrogerError::InvalidConfigValueError {
                    field: PAGE_SIZE_VAR.to_string(),
                    value: page_size.clone(),
                    reason: "Value must be a positive integer".to_string(),
                }
            })?;
            config = config.with_page_size(parsed);
        }

        Ok(config)
    }
}

/// Splits on whitespace or commas, e.g. `"product.compact cart.basic:write"`.
pub fn parse_scopes(raw: &str) -> Vec<String> {
    raw.split(|c: char| c == ',' || c.is_whitespace())
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| vars.get(name).cloned()
    }

    #[test]
    fn test_reads_all_variables() {
        let config = ClientConfig::from_lookup(lookup_from(&[
            (CLIENT_ID_VAR, "id"),
            (CLIENT_SECRET_VAR, "secret"),
            (SCOPES_VAR, "product.compact, cart.basic:write"),
            (API_URL_VAR, "http://localhost:1234/v1"),
            (PAGE_SIZE_VAR, "50"),
        ]))
        .unwrap();

        assert_eq!(config.credentials.client_id, "id");
        assert_eq!(
            config.credentials.scopes,
            vec!["product.compact", "cart.basic:write"]
        );
        assert_eq!(config.api.base_url, "http://localhost:1234/v1");
        assert_eq!(config.api.page_size, 50);
    }

    #[test]
    fn test_missing_client_id_names_the_variable() {
        let err = ClientConfig::from_lookup(lookup_from(&[(CLIENT_SECRET_VAR, "secret")]))
            .unwrap_err();
        match err {
            KrogerError::MissingConfigError { field } => assert_eq!(field, CLIENT_ID_VAR),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_blank_secret_counts_as_missing() {
        let err = ClientConfig::from_lookup(lookup_from(&[
            (CLIENT_ID_VAR, "id"),
            (CLIENT_SECRET_VAR, "   "),
        ]))
        .unwrap_err();
        assert!(matches!(err, KrogerError::MissingConfigError { .. }));
    }

    #[test]
    fn test_bad_page_size() {
        let err = ClientConfig::from_lookup(lookup_from(&[
            (CLIENT_ID_VAR, "id"),
            (CLIENT_SECRET_VAR, "secret"),
            (PAGE_SIZE_VAR, "ten"),
        ]))
        .unwrap_err();
        assert!(matches!(err, KrogerError::InvalidConfigValueError { .. }));
    }

    #[test]
    fn test_parse_scopes() {
        assert_eq!(parse_scopes("a b,c,,  d"), vec!["a", "b", "c", "d"]);
        assert!(parse_scopes("  ").is_empty());
    }
}
