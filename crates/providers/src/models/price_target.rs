//! Normalized analyst price-target records.

use chrono::{NaiveDate, NaiveTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::timestamp::Timestamp;

/// Description of the change in rating from a firm's last rating.
///
/// Deserialization accepts either the public code (`"downgrades"`) or the
/// vendor wire string (`"Downgrades"`); serialization always emits the wire
/// string. Unknown values fail validation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum RatingAction {
    #[serde(rename = "Downgrades", alias = "downgrades")]
    Downgrades,
    #[serde(rename = "Maintains", alias = "maintains")]
    Maintains,
    #[serde(rename = "Reinstates", alias = "reinstates")]
    Reinstates,
    #[serde(rename = "Reiterates", alias = "reiterates")]
    Reiterates,
    #[serde(rename = "Upgrades", alias = "upgrades")]
    Upgrades,
    #[serde(rename = "Assumes", alias = "assumes")]
    Assumes,
    #[serde(rename = "Initiates Coverage On", alias = "initiates")]
    Initiates,
    #[serde(rename = "Terminates Coverage On", alias = "terminates")]
    Terminates,
    #[serde(rename = "Removes", alias = "removes")]
    Removes,
    #[serde(rename = "Suspends", alias = "suspends")]
    Suspends,
    #[serde(rename = "Firm Dissolved", alias = "firm_dissolved")]
    FirmDissolved,
}

impl RatingAction {
    /// Every supported action, in vendor documentation order.
    pub const ALL: [Self; 11] = [
        Self::Downgrades,
        Self::Maintains,
        Self::Reinstates,
        Self::Reiterates,
        Self::Upgrades,
        Self::Assumes,
        Self::Initiates,
        Self::Terminates,
        Self::Removes,
        Self::Suspends,
        Self::FirmDissolved,
    ];

    /// The exact string the vendor uses on the wire.
    pub fn as_wire_str(&self) -> &'static str {
        match self {
            Self::Downgrades => "Downgrades",
            Self::Maintains => "Maintains",
            Self::Reinstates => "Reinstates",
            Self::Reiterates => "Reiterates",
            Self::Upgrades => "Upgrades",
            Self::Assumes => "Assumes",
            Self::Initiates => "Initiates Coverage On",
            Self::Terminates => "Terminates Coverage On",
            Self::Removes => "Removes",
            Self::Suspends => "Suspends",
            Self::FirmDissolved => "Firm Dissolved",
        }
    }

    /// The public query code for this action.
    pub fn as_code(&self) -> &'static str {
        match self {
            Self::Downgrades => "downgrades",
            Self::Maintains => "maintains",
            Self::Reinstates => "reinstates",
            Self::Reiterates => "reiterates",
            Self::Upgrades => "upgrades",
            Self::Assumes => "assumes",
            Self::Initiates => "initiates",
            Self::Terminates => "terminates",
            Self::Removes => "removes",
            Self::Suspends => "suspends",
            Self::FirmDissolved => "firm_dissolved",
        }
    }
}

/// Description of the change in price target from a firm's last price target.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum PriceTargetAction {
    Announces,
    Maintains,
    Lowers,
    Raises,
    Removes,
    Adjusts,
}

/// A normalized analyst price-target record.
///
/// One row per rating event. All vendor-optional fields are `Option`; a
/// provider that does not report a field leaves it `None`.
#[derive(Clone, Debug, Serialize)]
pub struct PriceTarget {
    /// Ticker symbol the rating applies to
    pub symbol: String,

    /// Date the rating was published
    #[serde(skip_serializing_if = "Option::is_none")]
    pub published_date: Option<NaiveDate>,

    /// Time of day the rating was published, if known
    #[serde(skip_serializing_if = "Option::is_none")]
    pub published_time: Option<NaiveTime>,

    /// Current price target
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price_target: Option<Decimal>,

    /// Split-adjusted current price target
    #[serde(skip_serializing_if = "Option::is_none")]
    pub adj_price_target: Option<Decimal>,

    /// Previous price target
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price_target_previous: Option<Decimal>,

    /// Split-adjusted previous price target
    #[serde(skip_serializing_if = "Option::is_none")]
    pub previous_adj_price_target: Option<Decimal>,

    /// Last traded price at publication time
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price_when_posted: Option<Decimal>,

    /// Name of the analyst
    #[serde(skip_serializing_if = "Option::is_none")]
    pub analyst_name: Option<String>,

    /// Name of the analyst firm
    #[serde(skip_serializing_if = "Option::is_none")]
    pub analyst_firm: Option<String>,

    /// Vendor id of the analyst
    #[serde(skip_serializing_if = "Option::is_none")]
    pub analyst_id: Option<String>,

    /// Name of the company
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company_name: Option<String>,

    /// Current rating (e.g. "Overweight")
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rating_current: Option<String>,

    /// Previous rating
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rating_previous: Option<String>,

    /// Change in rating from the firm's last rating
    #[serde(skip_serializing_if = "Option::is_none")]
    pub action: Option<RatingAction>,

    /// Change in price target from the firm's last price target
    #[serde(skip_serializing_if = "Option::is_none")]
    pub action_change: Option<PriceTargetAction>,

    /// Subjective market importance, 0 (low) to 5 (high)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub importance: Option<u8>,

    /// Free-form notes attached to the rating
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,

    /// Currency of the price target
    #[serde(skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,

    /// Title of the news article announcing the rating
    #[serde(skip_serializing_if = "Option::is_none")]
    pub news_title: Option<String>,

    /// Publisher of the news article
    #[serde(skip_serializing_if = "Option::is_none")]
    pub news_publisher: Option<String>,

    /// URL of the news article
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url_news: Option<String>,

    /// URL of the vendor's analyst ratings page for this ticker
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url_analyst: Option<String>,

    /// Base URL of the news source
    #[serde(skip_serializing_if = "Option::is_none")]
    pub news_base_url: Option<String>,

    /// Vendor id of this entry
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    /// When the vendor last updated this entry
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_updated: Option<Timestamp>,
}

impl PriceTarget {
    /// Create a record with only the symbol set.
    pub fn new(symbol: impl Into<String>) -> Self {
        Self {
            symbol: symbol.into(),
            published_date: None,
            published_time: None,
            price_target: None,
            adj_price_target: None,
            price_target_previous: None,
            previous_adj_price_target: None,
            price_when_posted: None,
            analyst_name: None,
            analyst_firm: None,
            analyst_id: None,
            company_name: None,
            rating_current: None,
            rating_previous: None,
            action: None,
            action_change: None,
            importance: None,
            notes: None,
            currency: None,
            news_title: None,
            news_publisher: None,
            url_news: None,
            url_analyst: None,
            news_base_url: None,
            id: None,
            last_updated: None,
        }
    }
}
