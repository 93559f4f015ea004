//! Benzinga analyst ratings provider implementation.
//!
//! Price targets come from the calendar/ratings endpoint, authenticated with
//! a `token` query parameter. Benzinga wraps result rows in a `ratings`
//! envelope and nests most filters under bracketed `parameters[...]` keys.

use chrono::{NaiveDate, NaiveTime};
use log::debug;
use reqwest::{Client, Url};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::credentials::Credentials;
use crate::errors::ProviderError;
use crate::fetcher::{parse_params, Fetcher};
use crate::http;
use crate::models::serde_util;
use crate::models::{CommaSeparated, PriceTarget, PriceTargetAction, RatingAction, Timestamp, UpdatedSince};

use async_trait::async_trait;

const BASE_URL: &str = "https://api.benzinga.com/api/v2.1/calendar/ratings";
const PROVIDER_ID: &str = "BENZINGA";
const CREDENTIAL_KEY: &str = "benzinga_api_key";

/// Page offsets past this are rejected by the vendor.
const MAX_PAGE: u32 = 100_000;

const DEFAULT_LIMIT: u32 = 100;

fn default_limit() -> u32 {
    DEFAULT_LIMIT
}

/// Validated query for Benzinga price targets.
///
/// Fields deserialize from their public names; serialization renames them to
/// the vendor's wire keys.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct BenzingaPriceTargetQuery {
    /// Ticker symbol(s); multiple symbols go out comma-joined in one request
    #[serde(
        default,
        rename(serialize = "parameters[tickers]"),
        skip_serializing_if = "Option::is_none"
    )]
    pub symbol: Option<CommaSeparated>,

    /// Number of results per page
    #[serde(default = "default_limit", rename(serialize = "pagesize"))]
    pub limit: u32,

    /// Page offset, 0 to 100000
    #[serde(default)]
    pub page: u32,

    /// Shorthand for start_date and end_date on the same day
    #[serde(
        default,
        rename(serialize = "parameters[date]"),
        skip_serializing_if = "Option::is_none"
    )]
    pub date: Option<NaiveDate>,

    /// Start of the date range (inclusive)
    #[serde(
        default,
        rename(serialize = "parameters[date_from]"),
        skip_serializing_if = "Option::is_none"
    )]
    pub start_date: Option<NaiveDate>,

    /// End of the date range (inclusive)
    #[serde(
        default,
        rename(serialize = "parameters[date_to]"),
        skip_serializing_if = "Option::is_none"
    )]
    pub end_date: Option<NaiveDate>,

    /// Only records updated at or after this point; accepts an epoch, a
    /// date, or a datetime, and goes out as epoch seconds
    #[serde(
        default,
        rename(serialize = "parameters[updated]"),
        skip_serializing_if = "Option::is_none"
    )]
    pub updated: Option<UpdatedSince>,

    /// Minimum importance level, 0 to 5
    #[serde(
        default,
        rename(serialize = "parameters[importance]"),
        skip_serializing_if = "Option::is_none"
    )]
    pub importance: Option<u8>,

    /// Filter by a specific rating action
    #[serde(
        default,
        rename(serialize = "parameters[action]"),
        skip_serializing_if = "Option::is_none"
    )]
    pub action: Option<RatingAction>,

    /// Analyst (person) ids, comma-joined
    #[serde(
        default,
        rename(serialize = "parameters[analyst_id]"),
        skip_serializing_if = "Option::is_none"
    )]
    pub analyst_ids: Option<CommaSeparated>,

    /// Firm ids, comma-joined
    #[serde(
        default,
        rename(serialize = "parameters[firm_id]"),
        skip_serializing_if = "Option::is_none"
    )]
    pub firm_ids: Option<CommaSeparated>,

    /// Response fields to include, comma-joined
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fields: Option<CommaSeparated>,
}

/// One raw rating row as Benzinga reports it.
///
/// Field names are the vendor's wire keys; the conversion into
/// [`PriceTarget`] is the alias map.
#[derive(Debug, Deserialize)]
struct RatingRow {
    ticker: String,
    #[serde(default)]
    date: Option<NaiveDate>,
    #[serde(default)]
    time: Option<NaiveTime>,
    #[serde(default, deserialize_with = "serde_util::decimal_opt::deserialize")]
    pt_current: Option<Decimal>,
    #[serde(default, deserialize_with = "serde_util::decimal_opt::deserialize")]
    adjusted_pt_current: Option<Decimal>,
    #[serde(default, deserialize_with = "serde_util::decimal_opt::deserialize")]
    pt_prior: Option<Decimal>,
    #[serde(default, deserialize_with = "serde_util::decimal_opt::deserialize")]
    adjusted_pt_prior: Option<Decimal>,
    #[serde(default)]
    analyst: Option<String>,
    #[serde(default)]
    analyst_name: Option<String>,
    #[serde(default)]
    analyst_id: Option<String>,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    rating_current: Option<String>,
    #[serde(default)]
    rating_prior: Option<String>,
    #[serde(default)]
    action_company: Option<RatingAction>,
    #[serde(default)]
    action_pt: Option<PriceTargetAction>,
    #[serde(default, deserialize_with = "serde_util::u8_opt::deserialize")]
    importance: Option<u8>,
    #[serde(default)]
    notes: Option<String>,
    #[serde(default)]
    currency: Option<String>,
    #[serde(default)]
    url: Option<String>,
    #[serde(default)]
    url_news: Option<String>,
    #[serde(default)]
    id: Option<String>,
    #[serde(default, deserialize_with = "serde_util::unix_timestamp_opt::deserialize")]
    updated: Option<Timestamp>,
}

impl RatingRow {
    fn into_price_target(self) -> PriceTarget {
        PriceTarget {
            symbol: self.ticker,
            published_date: self.date,
            published_time: self.time,
            price_target: self.pt_current,
            adj_price_target: self.adjusted_pt_current,
            price_target_previous: self.pt_prior,
            previous_adj_price_target: self.adjusted_pt_prior,
            price_when_posted: None,
            analyst_name: self.analyst_name,
            analyst_firm: self.analyst,
            analyst_id: self.analyst_id,
            company_name: self.name,
            rating_current: self.rating_current,
            rating_previous: self.rating_prior,
            action: self.action_company,
            action_change: self.action_pt,
            importance: self.importance,
            notes: self.notes,
            currency: self.currency,
            news_title: None,
            news_publisher: None,
            url_news: self.url_news,
            url_analyst: self.url,
            news_base_url: None,
            id: self.id,
            last_updated: self.updated,
        }
    }
}

/// Benzinga price target fetcher.
pub struct BenzingaPriceTargetFetcher {
    client: Client,
}

impl BenzingaPriceTargetFetcher {
    /// Create a new fetcher with its own HTTP client.
    pub fn new() -> Self {
        Self {
            client: http::client(),
        }
    }

    /// Pull the rating rows out of the response envelope.
    ///
    /// A missing or empty `ratings` array means the request matched nothing.
    fn ratings_from_body(body: Value) -> Result<Vec<Value>, ProviderError> {
        let rows = match body {
            Value::Object(mut envelope) => match envelope.remove("ratings") {
                Some(Value::Array(rows)) => rows,
                Some(Value::Null) | None => Vec::new(),
                Some(other) => {
                    return Err(ProviderError::provider(
                        PROVIDER_ID,
                        format!("unexpected ratings payload: {other}"),
                    ))
                }
            },
            other => {
                return Err(ProviderError::provider(
                    PROVIDER_ID,
                    format!("unexpected response shape: {other}"),
                ))
            }
        };

        if rows.is_empty() {
            return Err(ProviderError::EmptyData);
        }
        Ok(rows)
    }
}

impl Default for BenzingaPriceTargetFetcher {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Fetcher for BenzingaPriceTargetFetcher {
    type Query = BenzingaPriceTargetQuery;
    type Record = PriceTarget;

    fn provider_id(&self) -> &'static str {
        PROVIDER_ID
    }

    fn transform_query(params: Map<String, Value>) -> Result<Self::Query, ProviderError> {
        let query: BenzingaPriceTargetQuery = parse_params(params)?;
        if query.page > MAX_PAGE {
            return Err(ProviderError::InvalidQuery(format!(
                "page must be within 0..={MAX_PAGE}"
            )));
        }
        if let (Some(start), Some(end)) = (query.start_date, query.end_date) {
            if start > end {
                return Err(ProviderError::InvalidQuery(
                    "start_date is after end_date".to_string(),
                ));
            }
        }
        if query.importance.is_some_and(|level| level > 5) {
            return Err(ProviderError::InvalidQuery(
                "importance must be within 0..=5".to_string(),
            ));
        }
        Ok(query)
    }

    async fn extract_data(
        &self,
        query: &Self::Query,
        credentials: &Credentials,
    ) -> Result<Vec<Value>, ProviderError> {
        let token = credentials.require(PROVIDER_ID, CREDENTIAL_KEY)?;

        let mut pairs = http::query_pairs(query)?;
        pairs.push(("token".to_string(), token.to_string()));
        let url = Url::parse_with_params(BASE_URL, &pairs)
            .map_err(|e| ProviderError::provider(PROVIDER_ID, format!("failed to build URL: {e}")))?;

        let body = http::get_json(&self.client, url, PROVIDER_ID, Some(token)).await?;
        Self::ratings_from_body(body)
    }

    fn transform_data(
        _query: &Self::Query,
        raw: Vec<Value>,
    ) -> Result<Vec<Self::Record>, ProviderError> {
        let mut results = Vec::with_capacity(raw.len());
        for mut row in raw {
            if let Value::Object(map) = &mut row {
                // `url_calendar` duplicates `url` with a different host
                map.remove("url_calendar");
            }
            serde_util::null_empty_strings(&mut row);

            let rating: RatingRow = serde_json::from_value(row).map_err(|e| {
                ProviderError::provider(PROVIDER_ID, format!("failed to parse rating: {e}"))
            })?;
            results.push(rating.into_price_target());
        }

        debug!("Benzinga: transformed {} ratings", results.len());
        Ok(results)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;
    use serde_json::json;

    fn params(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            _ => panic!("expected object"),
        }
    }

    #[test]
    fn test_query_defaults() {
        let query = BenzingaPriceTargetFetcher::transform_query(params(json!({}))).unwrap();
        assert_eq!(query.limit, 100);
        assert_eq!(query.page, 0);
        assert!(query.symbol.is_none());
        assert!(query.action.is_none());
    }

    #[test]
    fn test_query_serializes_to_wire_keys() {
        let query = BenzingaPriceTargetFetcher::transform_query(params(json!({
            "symbol": ["AAPL", "MSFT"],
            "limit": 50,
            "start_date": "2024-01-01",
            "end_date": "2024-01-31",
            "action": "downgrades",
            "analyst_ids": ["a1", "a2"],
            "importance": 3
        })))
        .unwrap();

        let pairs = http::query_pairs(&query).unwrap();
        let get = |key: &str| {
            pairs
                .iter()
                .find(|(k, _)| k == key)
                .map(|(_, v)| v.as_str())
        };

        assert_eq!(get("parameters[tickers]"), Some("AAPL,MSFT"));
        assert_eq!(get("pagesize"), Some("50"));
        assert_eq!(get("parameters[date_from]"), Some("2024-01-01"));
        assert_eq!(get("parameters[date_to]"), Some("2024-01-31"));
        assert_eq!(get("parameters[action]"), Some("Downgrades"));
        assert_eq!(get("parameters[analyst_id]"), Some("a1,a2"));
        assert_eq!(get("parameters[importance]"), Some("3"));
        // unset optionals never reach the wire
        assert_eq!(get("parameters[date]"), None);
        assert_eq!(get("fields"), None);
    }

    #[test]
    fn test_query_updated_date_becomes_epoch() {
        let query = BenzingaPriceTargetFetcher::transform_query(params(json!({
            "updated": "2024-01-15"
        })))
        .unwrap();
        let pairs = http::query_pairs(&query).unwrap();
        let updated = pairs
            .iter()
            .find(|(k, _)| k == "parameters[updated]")
            .map(|(_, v)| v.clone())
            .unwrap();
        assert_eq!(updated, "1705276800");
    }

    #[test]
    fn test_query_unknown_action_fails() {
        let error = BenzingaPriceTargetFetcher::transform_query(params(json!({
            "action": "sidegrades"
        })))
        .unwrap_err();
        assert!(matches!(error, ProviderError::InvalidQuery(_)));
    }

    #[test]
    fn test_query_page_out_of_range_fails() {
        let error = BenzingaPriceTargetFetcher::transform_query(params(json!({
            "page": 100_001
        })))
        .unwrap_err();
        assert!(matches!(error, ProviderError::InvalidQuery(_)));
    }

    #[test]
    fn test_query_importance_out_of_range_fails() {
        let error = BenzingaPriceTargetFetcher::transform_query(params(json!({
            "importance": 6
        })))
        .unwrap_err();
        assert!(matches!(error, ProviderError::InvalidQuery(_)));
    }

    #[test]
    fn test_query_inverted_date_range_fails() {
        let error = BenzingaPriceTargetFetcher::transform_query(params(json!({
            "start_date": "2024-02-01",
            "end_date": "2024-01-01"
        })))
        .unwrap_err();
        assert!(matches!(error, ProviderError::InvalidQuery(_)));
    }

    #[test]
    fn test_empty_ratings_is_empty_data() {
        let error =
            BenzingaPriceTargetFetcher::ratings_from_body(json!({"ratings": []})).unwrap_err();
        assert!(matches!(error, ProviderError::EmptyData));

        let error = BenzingaPriceTargetFetcher::ratings_from_body(json!({})).unwrap_err();
        assert!(matches!(error, ProviderError::EmptyData));
    }

    #[test]
    fn test_ratings_envelope_unwraps_rows() {
        let rows =
            BenzingaPriceTargetFetcher::ratings_from_body(json!({"ratings": [{"ticker": "AAPL"}]}))
                .unwrap();
        assert_eq!(rows.len(), 1);
    }

    #[test]
    fn test_transform_data_full_row() {
        let query = BenzingaPriceTargetFetcher::transform_query(params(json!({}))).unwrap();
        let raw = vec![json!({
            "ticker": "AAPL",
            "date": "2024-01-15",
            "time": "08:33:54",
            "pt_current": "250.00",
            "pt_prior": "220.00",
            "adjusted_pt_current": "250.00",
            "adjusted_pt_prior": "",
            "analyst": "Morgan Stanley",
            "analyst_name": "Katy Huberty",
            "name": "Apple Inc.",
            "rating_current": "Overweight",
            "rating_prior": "Equal-Weight",
            "action_company": "Upgrades",
            "action_pt": "Raises",
            "importance": 4,
            "notes": "",
            "currency": "USD",
            "url": "https://www.benzinga.com/stock/aapl/ratings",
            "url_calendar": "https://www.benzinga.com/calendar",
            "id": "abc123",
            "updated": 1_705_276_800
        })];

        let records = BenzingaPriceTargetFetcher::transform_data(&query, raw).unwrap();
        assert_eq!(records.len(), 1);
        let record = &records[0];

        assert_eq!(record.symbol, "AAPL");
        assert_eq!(
            record.published_date,
            Some(NaiveDate::from_ymd_opt(2024, 1, 15).unwrap())
        );
        assert_eq!(record.price_target, Some(dec!(250.00)));
        assert_eq!(record.price_target_previous, Some(dec!(220.00)));
        // empty strings come through as None, not ""
        assert_eq!(record.previous_adj_price_target, None);
        assert_eq!(record.notes, None);
        assert_eq!(record.action, Some(RatingAction::Upgrades));
        assert_eq!(record.action_change, Some(PriceTargetAction::Raises));
        assert_eq!(record.analyst_firm, Some("Morgan Stanley".to_string()));
        assert_eq!(record.rating_previous, Some("Equal-Weight".to_string()));
        // midnight-aligned update collapses to a bare date
        assert_eq!(
            record.last_updated,
            Some(Timestamp::Date(NaiveDate::from_ymd_opt(2024, 1, 15).unwrap()))
        );
    }

    #[test]
    fn test_transform_data_drops_url_calendar() {
        let query = BenzingaPriceTargetFetcher::transform_query(params(json!({}))).unwrap();
        let raw = vec![json!({
            "ticker": "TSLA",
            "url": "https://www.benzinga.com/stock/tsla/ratings",
            "url_calendar": "https://www.benzinga.com/calendar"
        })];
        let records = BenzingaPriceTargetFetcher::transform_data(&query, raw).unwrap();
        assert_eq!(
            records[0].url_analyst,
            Some("https://www.benzinga.com/stock/tsla/ratings".to_string())
        );
    }

    #[test]
    fn test_transform_data_empty_action_is_none() {
        let query = BenzingaPriceTargetFetcher::transform_query(params(json!({}))).unwrap();
        let raw = vec![json!({"ticker": "NVDA", "action_company": ""})];
        let records = BenzingaPriceTargetFetcher::transform_data(&query, raw).unwrap();
        assert_eq!(records[0].action, None);
    }
}
