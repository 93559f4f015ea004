//! Error types for the provider adapter crate.

use thiserror::Error;

/// Errors that can occur while building a query, calling a vendor, or
/// normalizing its response.
///
/// There is no retry or fallback policy: the first failure in the
/// transform-extract-transform chain is terminal for the request.
#[derive(Error, Debug)]
pub enum ProviderError {
    /// The user-supplied parameters failed validation.
    /// Raised at query-construction time, before any network call.
    #[error("Invalid query: {0}")]
    InvalidQuery(String),

    /// The credential store has no usable token for the selected provider.
    #[error("Missing credential '{key}' for provider {provider}")]
    MissingCredential {
        /// The provider that needed the credential
        provider: String,
        /// The credential key that was looked up
        key: String,
    },

    /// The upstream response contained no usable payload.
    /// Zero result rows is an error, never an empty list.
    #[error("The request was returned empty")]
    EmptyData,

    /// The provider rate limited the request (HTTP 429).
    #[error("Rate limited: {provider}")]
    RateLimited {
        /// The provider that rate limited the request
        provider: String,
    },

    /// The request to the provider timed out.
    #[error("Timeout: {provider}")]
    Timeout {
        /// The provider that timed out
        provider: String,
    },

    /// A provider-specific error occurred (non-2xx status, malformed body).
    #[error("Provider error: {provider} - {message}")]
    Provider {
        /// The provider that returned the error
        provider: String,
        /// The error message from the provider
        message: String,
    },

    /// A network error occurred while communicating with a provider.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
}

impl ProviderError {
    /// Helper for the common provider-message case.
    pub(crate) fn provider(provider: &str, message: impl Into<String>) -> Self {
        Self::Provider {
            provider: provider.to_string(),
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_query_display() {
        let error = ProviderError::InvalidQuery("unknown action 'foo'".to_string());
        assert_eq!(format!("{}", error), "Invalid query: unknown action 'foo'");
    }

    #[test]
    fn test_missing_credential_display() {
        let error = ProviderError::MissingCredential {
            provider: "BENZINGA".to_string(),
            key: "benzinga_api_key".to_string(),
        };
        assert_eq!(
            format!("{}", error),
            "Missing credential 'benzinga_api_key' for provider BENZINGA"
        );
    }

    #[test]
    fn test_empty_data_display() {
        let error = ProviderError::EmptyData;
        assert_eq!(format!("{}", error), "The request was returned empty");
    }

    #[test]
    fn test_provider_error_display() {
        let error = ProviderError::provider("FMP", "HTTP 500");
        assert_eq!(format!("{}", error), "Provider error: FMP - HTTP 500");
    }

    #[test]
    fn test_rate_limited_display() {
        let error = ProviderError::RateLimited {
            provider: "FMP".to_string(),
        };
        assert_eq!(format!("{}", error), "Rate limited: FMP");
    }
}
