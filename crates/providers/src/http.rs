//! Shared HTTP plumbing for the provider fetchers.

use std::time::Duration;

use futures::future::try_join_all;
use log::debug;
use reqwest::{Client, StatusCode, Url};
use serde::Serialize;
use serde_json::Value;

use crate::errors::ProviderError;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Build the HTTP client fetchers share.
pub(crate) fn client() -> Client {
    Client::builder()
        .timeout(REQUEST_TIMEOUT)
        .build()
        .unwrap_or_else(|_| Client::new())
}

/// Serialize a query object into querystring pairs.
///
/// Null fields are skipped; scalar values render as their wire strings.
pub(crate) fn query_pairs<T: Serialize>(query: &T) -> Result<Vec<(String, String)>, ProviderError> {
    let value = serde_json::to_value(query)
        .map_err(|e| ProviderError::InvalidQuery(e.to_string()))?;
    let Value::Object(map) = value else {
        return Err(ProviderError::InvalidQuery(
            "query must serialize to an object".to_string(),
        ));
    };

    let mut pairs = Vec::with_capacity(map.len());
    for (key, value) in map {
        let rendered = match value {
            Value::Null => continue,
            Value::String(s) => s,
            Value::Number(n) => n.to_string(),
            Value::Bool(b) => b.to_string(),
            other => {
                return Err(ProviderError::InvalidQuery(format!(
                    "parameter '{key}' does not flatten to a scalar: {other}"
                )))
            }
        };
        pairs.push((key, rendered));
    }
    Ok(pairs)
}

/// Issue one GET and parse the body as JSON.
///
/// Maps HTTP 429 to `RateLimited`, timeouts to `Timeout`, and any other
/// failure to `Provider`. The optional `redact` token is masked in logs.
pub(crate) async fn get_json(
    client: &Client,
    url: Url,
    provider: &'static str,
    redact: Option<&str>,
) -> Result<Value, ProviderError> {
    let shown = match redact {
        Some(token) if !token.is_empty() => url.as_str().replace(token, "***"),
        _ => url.as_str().to_string(),
    };
    debug!("{} request: {}", provider, shown);

    let response = client
        .get(url)
        .header("accept", "application/json")
        .send()
        .await
        .map_err(|e| {
            if e.is_timeout() {
                ProviderError::Timeout {
                    provider: provider.to_string(),
                }
            } else {
                ProviderError::provider(provider, e.to_string())
            }
        })?;

    let status = response.status();
    if status == StatusCode::TOO_MANY_REQUESTS {
        return Err(ProviderError::RateLimited {
            provider: provider.to_string(),
        });
    }
    if !status.is_success() {
        return Err(ProviderError::provider(provider, format!("HTTP {}", status)));
    }

    response
        .json::<Value>()
        .await
        .map_err(|e| ProviderError::provider(provider, format!("failed to parse response: {e}")))
}

/// Await a set of GETs together, preserving input order.
pub(crate) async fn get_json_all(
    client: &Client,
    urls: Vec<Url>,
    provider: &'static str,
    redact: Option<&str>,
) -> Result<Vec<Value>, ProviderError> {
    try_join_all(
        urls.into_iter()
            .map(|url| get_json(client, url, provider, redact)),
    )
    .await
}
