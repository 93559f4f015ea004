use std::sync::Arc;

use finfeed_providers::{
    BenzingaPriceTargetFetcher, Credentials, FmpIndexConstituentsFetcher, FmpIndexSnapshotsFetcher,
    FmpPriceTargetFetcher,
};
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

use crate::config::Config;

pub struct AppState {
    pub credentials: Credentials,
    pub benzinga_price_targets: BenzingaPriceTargetFetcher,
    pub fmp_price_targets: FmpPriceTargetFetcher,
    pub fmp_index_constituents: FmpIndexConstituentsFetcher,
    pub fmp_index_snapshots: FmpIndexSnapshotsFetcher,
}

pub fn init_tracing() {
    let log_format = std::env::var("FF_LOG_FORMAT").unwrap_or_else(|_| "text".to_string());
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry().with(filter);

    if log_format.eq_ignore_ascii_case("json") {
        registry
            .with(fmt::layer().json().with_current_span(false))
            .init();
    } else {
        registry
            .with(fmt::layer().with_target(true).with_line_number(true))
            .init();
    }
}

pub fn build_state(config: &Config) -> anyhow::Result<Arc<AppState>> {
    let mut credentials = Credentials::new();
    if let Some(token) = &config.benzinga_api_key {
        credentials.insert("benzinga_api_key", token);
    }
    if let Some(token) = &config.fmp_api_key {
        credentials.insert("fmp_api_key", token);
    }

    Ok(Arc::new(AppState {
        credentials,
        benzinga_price_targets: BenzingaPriceTargetFetcher::new(),
        fmp_price_targets: FmpPriceTargetFetcher::new(),
        fmp_index_constituents: FmpIndexConstituentsFetcher::new(),
        fmp_index_snapshots: FmpIndexSnapshotsFetcher::new(),
    }))
}
