//! FinFeed Providers Crate
//!
//! Provider adapters for the FinFeed aggregation service. Each upstream
//! vendor exposes one fetcher per data model; every fetcher follows the
//! same three-step contract.
//!
//! # Architecture
//!
//! ```text
//! +------------------+
//! |  Raw parameters  |  (user-supplied mapping)
//! +------------------+
//!          |
//!          v  transform_query
//! +------------------+
//! |  Vendor query    |  (validated, wire-aliased)
//! +------------------+
//!          |
//!          v  extract_data
//! +------------------+
//! |  Raw rows        |  (vendor JSON)
//! +------------------+
//!          |
//!          v  transform_data
//! +------------------+
//! |  Records         |  (normalized schema)
//! +------------------+
//! ```
//!
//! # Core Types
//!
//! - [`Fetcher`] - The transform/extract/transform contract
//! - [`Credentials`] - Externally managed API-key store
//! - [`PriceTarget`] - Normalized analyst price-target record
//! - [`IndexConstituent`] / [`IndexSnapshot`] - Normalized index records
//! - [`ProviderError`] - All failure modes, terminal per request

pub mod credentials;
pub mod errors;
pub mod fetcher;
pub mod models;
pub mod provider;

mod http;

// Re-export the public surface
pub use credentials::Credentials;
pub use errors::ProviderError;
pub use fetcher::Fetcher;
pub use models::{
    CommaSeparated, IndexConstituent, IndexName, IndexSnapshot, PriceTarget, PriceTargetAction,
    RatingAction, Timestamp, UpdatedSince,
};
pub use provider::benzinga::{BenzingaPriceTargetFetcher, BenzingaPriceTargetQuery};
pub use provider::fmp::{
    FmpIndexConstituentsFetcher, FmpIndexConstituentsQuery, FmpIndexSnapshotsFetcher,
    FmpIndexSnapshotsQuery, FmpPriceTargetFetcher, FmpPriceTargetQuery,
};
