use thiserror::Error;

#[derive(Error, Debug)]
pub enum KrogerError {
    #[error("API request failed: {0}")]
    ApiError(#[from] reqwest::Error),

    #[error("API returned {status}: {message}")]
    HttpStatusError { status: u16, message: String },

    #[error("Authentication failed: {message}")]
    AuthError { message: String },

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Missing configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Invalid value for {field} ({value}): {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Validation error: {message}")]
    ValidationError { message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Network,
    Authentication,
    Api,
    Data,
    Configuration,
    Usage,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl KrogerError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::ValidationError {
            message: message.into(),
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::ApiError(_) | Self::IoError(_) => ErrorCategory::Network,
            Self::AuthError { .. } => ErrorCategory::Authentication,
            Self::HttpStatusError { status, .. } if *status == 401 || *status == 403 => {
                ErrorCategory::Authentication
            }
            Self::HttpStatusError { .. } => ErrorCategory::Api,
            Self::SerializationError(_) => ErrorCategory::Data,
            Self::ConfigError { .. }
            | Self::MissingConfigError { .. }
            | Self::InvalidConfigValueError { .. } => ErrorCategory::Configuration,
            Self::ValidationError { .. } => ErrorCategory::Usage,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Network => ErrorSeverity::Medium,
            ErrorCategory::Api if self.is_retryable() => ErrorSeverity::Medium,
            ErrorCategory::Api | ErrorCategory::Data | ErrorCategory::Usage => ErrorSeverity::High,
            ErrorCategory::Authentication | ErrorCategory::Configuration => {
                ErrorSeverity::Critical
            }
        }
    }

    /// Whether repeating the same request may succeed.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::ApiError(e) => e.is_timeout() || e.is_connect(),
            Self::HttpStatusError { status, .. } => *status == 429 || *status >= 500,
            _ => false,
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            Self::ApiError(_) => "Check network connectivity and try again",
            Self::HttpStatusError { status: 404, .. } => "Check that the requested id exists",
            Self::HttpStatusError { status: 429, .. } => {
                "Rate limit reached; wait before sending more requests"
            }
            Self::HttpStatusError { status, .. } if *status >= 500 => {
                "The Kroger API is unavailable; try again later"
            }
            Self::HttpStatusError { status: 401 | 403, .. } | Self::AuthError { .. } => {
                "Verify the client id, client secret and requested scopes"
            }
            Self::HttpStatusError { .. } => "Check the request filters against the API reference",
            Self::SerializationError(_) => "The response did not match the expected shape",
            Self::IoError(_) => "Check that the file exists and is readable",
            Self::ConfigError { .. }
            | Self::MissingConfigError { .. }
            | Self::InvalidConfigValueError { .. } => "Fix the client configuration",
            Self::ValidationError { .. } => "Adjust the call arguments",
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            Self::ApiError(_) => "Could not reach the Kroger API".to_string(),
            Self::HttpStatusError { status, message } => {
                format!("The Kroger API rejected the request ({}): {}", status, message)
            }
            Self::AuthError { message } => format!("Could not authenticate: {}", message),
            Self::MissingConfigError { field } => {
                format!("Required setting '{}' is not set", field)
            }
            Self::InvalidConfigValueError { field, reason, .. } => {
                format!("Setting '{}' is invalid: {}", field, reason)
            }
            other => other.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, KrogerError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_errors_are_categorized() {
        let unauthorized = KrogerError::HttpStatusError {
            status: 401,
            message: "invalid token".to_string(),
        };
        assert_eq!(unauthorized.category(), ErrorCategory::Authentication);
        assert!(!unauthorized.is_retryable());

        let unavailable = KrogerError::HttpStatusError {
            status: 503,
            message: "down".to_string(),
        };
        assert_eq!(unavailable.category(), ErrorCategory::Api);
        assert!(unavailable.is_retryable());
        assert_eq!(unavailable.severity(), ErrorSeverity::Medium);

        let throttled = KrogerError::HttpStatusError {
            status: 429,
            message: "slow down".to_string(),
        };
        assert!(throttled.is_retryable());
    }

    #[test]
    fn test_validation_error_message() {
        let err = KrogerError::validation("too many terms");
        assert_eq!(err.category(), ErrorCategory::Usage);
        assert_eq!(err.severity(), ErrorSeverity::High);
        assert_eq!(err.to_string(), "Validation error: too many terms");
    }

    #[test]
    fn test_missing_config_is_critical() {
        let err = KrogerError::MissingConfigError {
            field: "KROGER_CLIENT_ID".to_string(),
        };
        assert_eq!(err.severity(), ErrorSeverity::Critical);
        assert!(err.user_friendly_message().contains("KROGER_CLIENT_ID"));
    }
}
