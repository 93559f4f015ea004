//! Financial Modeling Prep (FMP) provider implementation.
//!
//! This module covers three models:
//! - Price targets via /v4/price-target (or /v4/upgrades-downgrades)
//! - Index constituents via /v3/{index}_constituent
//! - Index snapshots via /v3/quotes/index
//!
//! FMP has no batch endpoint for price targets, so multi-symbol queries fan
//! out to one request per symbol and concatenate results in input order.

use async_trait::async_trait;
use chrono::{NaiveDateTime, NaiveTime};
use reqwest::{Client, Url};
use rust_decimal::Decimal;
use serde::Deserialize;
use serde_json::{Map, Value};
use tracing::debug;

use crate::credentials::Credentials;
use crate::errors::ProviderError;
use crate::fetcher::Fetcher;
use crate::http;
use crate::models::serde_util;
use crate::models::{
    CommaSeparated, IndexConstituent, IndexName, IndexSnapshot, PriceTarget, Timestamp,
};

const BASE_URL: &str = "https://financialmodelingprep.com/api";
const PROVIDER_ID: &str = "FMP";
const CREDENTIAL_KEY: &str = "fmp_api_key";

fn build_url(path: &str, params: &[(&str, &str)]) -> Result<Url, ProviderError> {
    Url::parse_with_params(&format!("{BASE_URL}/{path}"), params)
        .map_err(|e| ProviderError::provider(PROVIDER_ID, format!("failed to build URL: {e}")))
}

/// Flatten one JSON array body per request into a single row list,
/// preserving request order. Zero rows overall is an empty-data error.
fn collect_rows(bodies: Vec<Value>) -> Result<Vec<Value>, ProviderError> {
    let mut rows = Vec::new();
    for body in bodies {
        match body {
            Value::Array(batch) => rows.extend(batch),
            Value::Null => {}
            other => {
                return Err(ProviderError::provider(
                    PROVIDER_ID,
                    format!("unexpected response shape: {other}"),
                ))
            }
        }
    }
    if rows.is_empty() {
        return Err(ProviderError::EmptyData);
    }
    Ok(rows)
}

// ============================================================================
// Price targets
// ============================================================================

/// Validated query for FMP price targets.
#[derive(Clone, Debug, Deserialize)]
pub struct FmpPriceTargetQuery {
    /// Ticker symbol(s); each symbol becomes its own request
    pub symbol: CommaSeparated,

    /// Include rating upgrades and downgrades instead of raw price targets
    #[serde(default)]
    pub with_grade: bool,
}

impl FmpPriceTargetQuery {
    fn endpoint(&self) -> &'static str {
        if self.with_grade {
            "upgrades-downgrades"
        } else {
            "price-target"
        }
    }

    fn request_urls(&self, api_key: &str) -> Result<Vec<Url>, ProviderError> {
        self.symbol
            .items()
            .map(|symbol| {
                build_url(
                    &format!("v4/{}", self.endpoint()),
                    &[("symbol", symbol), ("apikey", api_key)],
                )
            })
            .collect()
    }
}

/// One raw price-target row as FMP reports it (camelCase keys).
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PriceTargetRow {
    symbol: String,
    #[serde(default)]
    published_date: Option<String>,
    #[serde(default, rename = "newsURL")]
    news_url: Option<String>,
    #[serde(default)]
    news_title: Option<String>,
    #[serde(default)]
    analyst_name: Option<String>,
    #[serde(default)]
    analyst_company: Option<String>,
    #[serde(default, deserialize_with = "serde_util::decimal_opt::deserialize")]
    price_target: Option<Decimal>,
    #[serde(default, deserialize_with = "serde_util::decimal_opt::deserialize")]
    adj_price_target: Option<Decimal>,
    #[serde(default, deserialize_with = "serde_util::decimal_opt::deserialize")]
    price_when_posted: Option<Decimal>,
    #[serde(default)]
    news_publisher: Option<String>,
    #[serde(default, rename = "newsBaseURL")]
    news_base_url: Option<String>,
    #[serde(default)]
    new_grade: Option<String>,
    #[serde(default)]
    previous_grade: Option<String>,
    #[serde(default)]
    grading_company: Option<String>,
}

impl PriceTargetRow {
    /// Parse the published timestamp, tolerating the stray newlines FMP
    /// occasionally embeds. Midnight-aligned values keep only the date.
    fn published(&self) -> Option<(chrono::NaiveDate, Option<NaiveTime>)> {
        let raw = self.published_date.as_ref()?;
        let cleaned = raw.replace('\n', "");
        let parsed = NaiveDateTime::parse_from_str(cleaned.trim(), "%Y-%m-%dT%H:%M:%S%.fZ")
            .or_else(|_| NaiveDateTime::parse_from_str(cleaned.trim(), "%Y-%m-%dT%H:%M:%S%.f"))
            .ok()?;
        let time = (parsed.time() != NaiveTime::MIN).then_some(parsed.time());
        Some((parsed.date(), time))
    }

    fn into_price_target(self) -> PriceTarget {
        let published = self.published();
        let analyst_firm = self.analyst_company.or(self.grading_company);
        PriceTarget {
            symbol: self.symbol,
            published_date: published.map(|(date, _)| date),
            published_time: published.and_then(|(_, time)| time),
            price_target: self.price_target,
            adj_price_target: self.adj_price_target,
            price_target_previous: None,
            previous_adj_price_target: None,
            price_when_posted: self.price_when_posted,
            analyst_name: self.analyst_name,
            analyst_firm,
            analyst_id: None,
            company_name: None,
            rating_current: self.new_grade,
            rating_previous: self.previous_grade,
            action: None,
            action_change: None,
            importance: None,
            notes: None,
            currency: None,
            news_title: self.news_title,
            news_publisher: self.news_publisher,
            url_news: self.news_url,
            url_analyst: None,
            news_base_url: self.news_base_url,
            id: None,
            last_updated: None,
        }
    }
}

/// FMP price target fetcher.
pub struct FmpPriceTargetFetcher {
    client: Client,
}

impl FmpPriceTargetFetcher {
    /// Create a new fetcher with its own HTTP client.
    pub fn new() -> Self {
        Self {
            client: http::client(),
        }
    }
}

impl Default for FmpPriceTargetFetcher {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Fetcher for FmpPriceTargetFetcher {
    type Query = FmpPriceTargetQuery;
    type Record = PriceTarget;

    fn provider_id(&self) -> &'static str {
        PROVIDER_ID
    }

    async fn extract_data(
        &self,
        query: &Self::Query,
        credentials: &Credentials,
    ) -> Result<Vec<Value>, ProviderError> {
        let api_key = credentials.require(PROVIDER_ID, CREDENTIAL_KEY)?;
        let urls = query.request_urls(api_key)?;
        debug!(requests = urls.len(), "FMP price target fan-out");

        let bodies = http::get_json_all(&self.client, urls, PROVIDER_ID, Some(api_key)).await?;
        collect_rows(bodies)
    }

    fn transform_data(
        _query: &Self::Query,
        raw: Vec<Value>,
    ) -> Result<Vec<Self::Record>, ProviderError> {
        raw.into_iter()
            .map(|row| {
                let row: PriceTargetRow = serde_json::from_value(row).map_err(|e| {
                    ProviderError::provider(PROVIDER_ID, format!("failed to parse price target: {e}"))
                })?;
                Ok(row.into_price_target())
            })
            .collect()
    }
}

// ============================================================================
// Index constituents
// ============================================================================

/// Validated query for index membership.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct FmpIndexConstituentsQuery {
    /// Which index to list
    #[serde(default)]
    pub index: IndexName,
}

/// One raw constituent row as FMP reports it.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ConstituentRow {
    symbol: String,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    sector: Option<String>,
    #[serde(default)]
    sub_sector: Option<String>,
    #[serde(default)]
    head_quarter: Option<String>,
    #[serde(default)]
    date_first_added: Option<String>,
    #[serde(default, deserialize_with = "serde_util::none_if_empty::deserialize")]
    cik: Option<String>,
    #[serde(default)]
    founded: Option<String>,
}

impl ConstituentRow {
    fn into_constituent(self) -> IndexConstituent {
        IndexConstituent {
            symbol: self.symbol,
            name: self.name,
            sector: self.sector,
            sub_sector: self.sub_sector,
            headquarters: self.head_quarter,
            // The vendor mixes dates with free text here; keep only real dates
            date_first_added: self
                .date_first_added
                .as_deref()
                .and_then(serde_util::parse_date),
            cik: self.cik,
            founded: self.founded,
        }
    }
}

/// FMP index constituents fetcher.
pub struct FmpIndexConstituentsFetcher {
    client: Client,
}

impl FmpIndexConstituentsFetcher {
    /// Create a new fetcher with its own HTTP client.
    pub fn new() -> Self {
        Self {
            client: http::client(),
        }
    }
}

impl Default for FmpIndexConstituentsFetcher {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Fetcher for FmpIndexConstituentsFetcher {
    type Query = FmpIndexConstituentsQuery;
    type Record = IndexConstituent;

    fn provider_id(&self) -> &'static str {
        PROVIDER_ID
    }

    async fn extract_data(
        &self,
        query: &Self::Query,
        credentials: &Credentials,
    ) -> Result<Vec<Value>, ProviderError> {
        let api_key = credentials.require(PROVIDER_ID, CREDENTIAL_KEY)?;
        let url = build_url(
            &format!("v3/{}", query.index.endpoint()),
            &[("apikey", api_key)],
        )?;
        let body = http::get_json(&self.client, url, PROVIDER_ID, Some(api_key)).await?;
        collect_rows(vec![body])
    }

    fn transform_data(
        _query: &Self::Query,
        raw: Vec<Value>,
    ) -> Result<Vec<Self::Record>, ProviderError> {
        raw.into_iter()
            .map(|row| {
                let row: ConstituentRow = serde_json::from_value(row).map_err(|e| {
                    ProviderError::provider(PROVIDER_ID, format!("failed to parse constituent: {e}"))
                })?;
                Ok(row.into_constituent())
            })
            .collect()
    }
}

// ============================================================================
// Index snapshots
// ============================================================================

/// Validated query for index snapshots. The endpoint takes no filters;
/// the vendor returns current levels for every index it knows.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct FmpIndexSnapshotsQuery {}

/// One raw index quote row as FMP reports it.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct IndexQuoteRow {
    symbol: String,
    #[serde(default)]
    name: Option<String>,
    #[serde(default, deserialize_with = "serde_util::decimal_opt::deserialize")]
    price: Option<Decimal>,
    #[serde(default, deserialize_with = "serde_util::decimal_opt::deserialize")]
    change: Option<Decimal>,
    #[serde(default, deserialize_with = "serde_util::decimal_opt::deserialize")]
    changes_percentage: Option<Decimal>,
    #[serde(default, deserialize_with = "serde_util::decimal_opt::deserialize")]
    day_low: Option<Decimal>,
    #[serde(default, deserialize_with = "serde_util::decimal_opt::deserialize")]
    day_high: Option<Decimal>,
    #[serde(default, deserialize_with = "serde_util::decimal_opt::deserialize")]
    year_low: Option<Decimal>,
    #[serde(default, deserialize_with = "serde_util::decimal_opt::deserialize")]
    year_high: Option<Decimal>,
    #[serde(default, deserialize_with = "serde_util::decimal_opt::deserialize")]
    market_cap: Option<Decimal>,
    #[serde(default, deserialize_with = "serde_util::decimal_opt::deserialize")]
    price_avg50: Option<Decimal>,
    #[serde(default, deserialize_with = "serde_util::decimal_opt::deserialize")]
    price_avg200: Option<Decimal>,
    #[serde(default, deserialize_with = "serde_util::decimal_opt::deserialize")]
    volume: Option<Decimal>,
    #[serde(default, deserialize_with = "serde_util::decimal_opt::deserialize")]
    avg_volume: Option<Decimal>,
    #[serde(default, deserialize_with = "serde_util::decimal_opt::deserialize")]
    open: Option<Decimal>,
    #[serde(default, deserialize_with = "serde_util::decimal_opt::deserialize")]
    previous_close: Option<Decimal>,
    #[serde(default)]
    exchange: Option<String>,
    #[serde(default, deserialize_with = "serde_util::unix_timestamp_opt::deserialize")]
    timestamp: Option<Timestamp>,
}

impl IndexQuoteRow {
    fn into_snapshot(self) -> IndexSnapshot {
        IndexSnapshot {
            symbol: self.symbol,
            name: self.name,
            price: self.price,
            change: self.change,
            change_percent: self.changes_percentage,
            day_low: self.day_low,
            day_high: self.day_high,
            year_low: self.year_low,
            year_high: self.year_high,
            market_cap: self.market_cap,
            price_avg_50: self.price_avg50,
            price_avg_200: self.price_avg200,
            volume: self.volume,
            avg_volume: self.avg_volume,
            open: self.open,
            previous_close: self.previous_close,
            exchange: self.exchange,
            timestamp: self.timestamp,
        }
    }
}

/// FMP index snapshots fetcher.
pub struct FmpIndexSnapshotsFetcher {
    client: Client,
}

impl FmpIndexSnapshotsFetcher {
    /// Create a new fetcher with its own HTTP client.
    pub fn new() -> Self {
        Self {
            client: http::client(),
        }
    }
}

impl Default for FmpIndexSnapshotsFetcher {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Fetcher for FmpIndexSnapshotsFetcher {
    type Query = FmpIndexSnapshotsQuery;
    type Record = IndexSnapshot;

    fn provider_id(&self) -> &'static str {
        PROVIDER_ID
    }

    async fn extract_data(
        &self,
        _query: &Self::Query,
        credentials: &Credentials,
    ) -> Result<Vec<Value>, ProviderError> {
        let api_key = credentials.require(PROVIDER_ID, CREDENTIAL_KEY)?;
        let url = build_url("v3/quotes/index", &[("apikey", api_key)])?;
        let body = http::get_json(&self.client, url, PROVIDER_ID, Some(api_key)).await?;
        collect_rows(vec![body])
    }

    fn transform_data(
        _query: &Self::Query,
        raw: Vec<Value>,
    ) -> Result<Vec<Self::Record>, ProviderError> {
        raw.into_iter()
            .map(|row| {
                let row: IndexQuoteRow = serde_json::from_value(row).map_err(|e| {
                    ProviderError::provider(PROVIDER_ID, format!("failed to parse index quote: {e}"))
                })?;
                Ok(row.into_snapshot())
            })
            .collect()
    }
}
