//! Canonical record models shared by all providers.

mod index;
mod params;
mod price_target;
pub(crate) mod serde_util;
mod timestamp;

pub use index::{IndexConstituent, IndexName, IndexSnapshot};
pub use params::{CommaSeparated, UpdatedSince};
pub use price_target::{PriceTarget, PriceTargetAction, RatingAction};
pub use timestamp::Timestamp;
