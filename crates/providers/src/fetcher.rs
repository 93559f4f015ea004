//! The three-step fetcher contract.
//!
//! Every (provider, model) pair implements the same fixed sequence: build a
//! validated query from a raw parameter bag, extract the raw rows over HTTP,
//! then normalize each row into the canonical record type.

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use crate::credentials::Credentials;
use crate::errors::ProviderError;

/// Build a validated query object from a raw parameter mapping.
///
/// Field aliasing, enum validation, and date-shape normalization all live in
/// the target type's serde impls; any mismatch surfaces as `InvalidQuery`.
pub fn parse_params<T: DeserializeOwned>(params: Map<String, Value>) -> Result<T, ProviderError> {
    serde_json::from_value(Value::Object(params))
        .map_err(|e| ProviderError::InvalidQuery(e.to_string()))
}

/// One provider/model pair: query transform, data extraction, data transform.
///
/// Implementations are stateless apart from a shared HTTP client. The steps
/// are invoked in fixed order by [`fetch`](Fetcher::fetch); callers that need
/// the intermediate values can drive them individually.
#[async_trait]
pub trait Fetcher: Send + Sync {
    /// Validated provider-specific query parameters.
    type Query: DeserializeOwned + Send + Sync;

    /// Normalized output record.
    type Record: Send;

    /// Provider identifier, e.g. "FMP" or "BENZINGA".
    fn provider_id(&self) -> &'static str;

    /// Build and validate the query from a raw parameter mapping.
    ///
    /// The default implementation is serde-only; fetchers with extra
    /// invariants (value ranges, cross-field checks) override and add them.
    fn transform_query(params: Map<String, Value>) -> Result<Self::Query, ProviderError> {
        parse_params(params)
    }

    /// Issue the HTTP request(s) and return the raw result rows.
    ///
    /// Fails with [`ProviderError::EmptyData`] when the upstream response
    /// contains no usable payload.
    async fn extract_data(
        &self,
        query: &Self::Query,
        credentials: &Credentials,
    ) -> Result<Vec<Value>, ProviderError>;

    /// Map each raw row into the normalized record type.
    fn transform_data(
        query: &Self::Query,
        raw: Vec<Value>,
    ) -> Result<Vec<Self::Record>, ProviderError>;

    /// Run the three steps in order.
    async fn fetch(
        &self,
        params: Map<String, Value>,
        credentials: &Credentials,
    ) -> Result<Vec<Self::Record>, ProviderError> {
        let query = Self::transform_query(params)?;
        let raw = self.extract_data(&query, credentials).await?;
        Self::transform_data(&query, raw)
    }
}
