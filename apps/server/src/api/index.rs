use std::sync::Arc;

use axum::{
    extract::{RawQuery, State},
    routing::get,
    Json, Router,
};
use finfeed_providers::{Fetcher, IndexConstituent, IndexSnapshot};
use serde_json::{Map, Value};

use crate::{
    api::shared::parse_raw_query,
    error::{ApiError, ApiResult},
    main_lib::AppState,
};

/// Index data is served by FMP only; any other provider selector is rejected.
fn fmp_only(params: &mut Map<String, Value>) -> Result<(), ApiError> {
    match params.remove("provider") {
        None => Ok(()),
        Some(Value::String(name)) if name == "fmp" => Ok(()),
        Some(other) => Err(ApiError::BadRequest(format!(
            "unsupported provider {other} for index data"
        ))),
    }
}

async fn constituents(
    State(state): State<Arc<AppState>>,
    RawQuery(raw): RawQuery,
) -> ApiResult<Json<Vec<IndexConstituent>>> {
    let mut params = parse_raw_query(raw.as_deref());
    fmp_only(&mut params)?;
    let records = state
        .fmp_index_constituents
        .fetch(params, &state.credentials)
        .await?;
    Ok(Json(records))
}

async fn snapshots(
    State(state): State<Arc<AppState>>,
    RawQuery(raw): RawQuery,
) -> ApiResult<Json<Vec<IndexSnapshot>>> {
    let mut params = parse_raw_query(raw.as_deref());
    fmp_only(&mut params)?;
    let records = state
        .fmp_index_snapshots
        .fetch(params, &state.credentials)
        .await?;
    Ok(Json(records))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/index/constituents", get(constituents))
        .route("/index/snapshots", get(snapshots))
}
