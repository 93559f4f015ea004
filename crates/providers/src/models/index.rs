//! Normalized index membership and snapshot records.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::timestamp::Timestamp;

/// A market index whose membership can be queried.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum IndexName {
    #[default]
    #[serde(rename = "dowjones")]
    DowJones,
    #[serde(rename = "sp500")]
    Sp500,
    #[serde(rename = "nasdaq")]
    Nasdaq,
}

impl IndexName {
    /// The vendor endpoint segment for this index.
    pub fn endpoint(&self) -> &'static str {
        match self {
            Self::DowJones => "dowjones_constituent",
            Self::Sp500 => "sp500_constituent",
            Self::Nasdaq => "nasdaq_constituent",
        }
    }
}

/// A normalized index membership row.
#[derive(Clone, Debug, Serialize)]
pub struct IndexConstituent {
    /// Ticker symbol of the constituent
    pub symbol: String,

    /// Company name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// GICS sector
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sector: Option<String>,

    /// GICS sub-sector
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sub_sector: Option<String>,

    /// Headquarters location
    #[serde(skip_serializing_if = "Option::is_none")]
    pub headquarters: Option<String>,

    /// Date the company joined the index
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_first_added: Option<NaiveDate>,

    /// SEC Central Index Key
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cik: Option<String>,

    /// Year the company was founded
    #[serde(skip_serializing_if = "Option::is_none")]
    pub founded: Option<String>,
}

/// A normalized current-level row for one index.
#[derive(Clone, Debug, Serialize)]
pub struct IndexSnapshot {
    /// Index symbol (e.g. "^GSPC")
    pub symbol: String,

    /// Index name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Current level
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<Decimal>,

    /// Change from the previous close
    #[serde(skip_serializing_if = "Option::is_none")]
    pub change: Option<Decimal>,

    /// Percent change from the previous close
    #[serde(skip_serializing_if = "Option::is_none")]
    pub change_percent: Option<Decimal>,

    /// Day low
    #[serde(skip_serializing_if = "Option::is_none")]
    pub day_low: Option<Decimal>,

    /// Day high
    #[serde(skip_serializing_if = "Option::is_none")]
    pub day_high: Option<Decimal>,

    /// 52-week low
    #[serde(skip_serializing_if = "Option::is_none")]
    pub year_low: Option<Decimal>,

    /// 52-week high
    #[serde(skip_serializing_if = "Option::is_none")]
    pub year_high: Option<Decimal>,

    /// Aggregate market cap, where the vendor reports one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub market_cap: Option<Decimal>,

    /// 50-day moving average
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price_avg_50: Option<Decimal>,

    /// 200-day moving average
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price_avg_200: Option<Decimal>,

    /// Session volume
    #[serde(skip_serializing_if = "Option::is_none")]
    pub volume: Option<Decimal>,

    /// Average volume
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avg_volume: Option<Decimal>,

    /// Session open
    #[serde(skip_serializing_if = "Option::is_none")]
    pub open: Option<Decimal>,

    /// Previous close
    #[serde(skip_serializing_if = "Option::is_none")]
    pub previous_close: Option<Decimal>,

    /// Listing exchange
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exchange: Option<String>,

    /// When the level was observed
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<Timestamp>,
}
