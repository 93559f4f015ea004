use std::sync::Arc;

use axum::{
    extract::{RawQuery, State},
    routing::get,
    Json, Router,
};
use finfeed_providers::{Fetcher, PriceTarget};
use serde_json::Value;

use crate::{
    api::shared::parse_raw_query,
    error::{ApiError, ApiResult},
    main_lib::AppState,
};

/// Analyst price targets from the selected provider.
///
/// The `provider` parameter picks the vendor (`fmp` by default, `benzinga`);
/// every other parameter passes through to that vendor's query schema.
async fn price_targets(
    State(state): State<Arc<AppState>>,
    RawQuery(raw): RawQuery,
) -> ApiResult<Json<Vec<PriceTarget>>> {
    let mut params = parse_raw_query(raw.as_deref());
    let provider = match params.remove("provider") {
        None => "fmp".to_string(),
        Some(Value::String(name)) => name,
        Some(other) => {
            return Err(ApiError::BadRequest(format!(
                "invalid provider selector: {other}"
            )))
        }
    };

    let records = match provider.as_str() {
        "fmp" => {
            state
                .fmp_price_targets
                .fetch(params, &state.credentials)
                .await?
        }
        "benzinga" => {
            state
                .benzinga_price_targets
                .fetch(params, &state.credentials)
                .await?
        }
        other => {
            return Err(ApiError::BadRequest(format!(
                "unknown provider '{other}' for price targets"
            )))
        }
    };
    Ok(Json(records))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/analyst/price-targets", get(price_targets))
}
