//! `buyerscope-discovery` - buyer discovery and matching engine.
//!
//! Pure engine crate: interprets product queries, ranks a company catalog,
//! resolves uploaded company lists and prices enrichment requests.
//! No CLI or IO dependencies.

pub mod assumptions;
pub mod catalog;
pub mod config;
pub mod enrichment;
pub mod error;
pub mod estimate;
pub mod interpret;
pub mod model;
pub mod rank;
pub mod resolve;
pub mod summary;
mod suggest;

pub use assumptions::{AssumptionEdit, AssumptionSet, HsEntry};
pub use catalog::Catalog;
pub use config::DiscoveryConfig;
pub use enrichment::{advance_enrichment, commit_enrichment, mark_enriched};
pub use error::DiscoveryError;
pub use estimate::{estimate, estimate_with};
pub use interpret::{interpret, interpret_with};
pub use model::{Company, EnrichmentEstimate, RankedResultSet, UploadRow};
pub use rank::{rank, rank_with, RankOptions};
pub use resolve::{resolve, resolve_with};
pub use summary::summarize;
