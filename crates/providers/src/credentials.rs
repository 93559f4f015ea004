//! Credential store for vendor API keys.
//!
//! Credentials are managed by the host application and passed by reference
//! into each extraction. Fetchers never own tokens.

use std::collections::HashMap;

use crate::errors::ProviderError;

/// Mapping from credential key (e.g. `fmp_api_key`) to secret token.
#[derive(Clone, Debug, Default)]
pub struct Credentials {
    tokens: HashMap<String, String>,
}

impl Credentials {
    /// Create an empty credential store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a credential, builder style.
    pub fn with(mut self, key: impl Into<String>, token: impl Into<String>) -> Self {
        self.insert(key, token);
        self
    }

    /// Add or replace a credential.
    pub fn insert(&mut self, key: impl Into<String>, token: impl Into<String>) {
        self.tokens.insert(key.into(), token.into());
    }

    /// Look up a credential by key.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.tokens.get(key).map(String::as_str)
    }

    /// Look up a credential, treating a missing or empty token as an error.
    pub fn require(&self, provider: &str, key: &str) -> Result<&str, ProviderError> {
        self.get(key)
            .filter(|token| !token.is_empty())
            .ok_or_else(|| ProviderError::MissingCredential {
                provider: provider.to_string(),
                key: key.to_string(),
            })
    }
}
