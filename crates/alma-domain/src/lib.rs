//! ALMA Domain Layer
//!
//! Core value objects and pure business rules for the ALMA portfolio engine.
//! Apart from `uuid` for identifiers, this crate has no external dependencies
//! and performs no I/O.
//!
//! ## Key Concepts
//!
//! - **Intervention**: one social program record, read from an upstream store
//! - **Signals**: normalized quality metrics computed upstream for each record
//! - **Constraints**: per-invocation portfolio policy configuration
//! - **Assessment**: heuristic confidence, recommendations and risk flags
//!
//! ## Architecture
//!
//! - Categorical upstream text is normalized once, at ingestion, into closed enums
//! - Business rules only ever match on those enums
//! - The [`traits::SignalAccessor`] trait is the single boundary to the upstream store

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod assessment;
pub mod constraints;
pub mod id;
pub mod levels;
pub mod record;
pub mod signals;
pub mod traits;

// Re-exports for convenience
pub use assessment::{assess, InterventionScore, Recommendation, RiskFlag};
pub use constraints::PortfolioConstraints;
pub use id::InterventionId;
pub use levels::{
    EvidenceLevel, FundingStatus, HarmRiskLevel, ReplicationReadiness, ReviewStatus, Scalability,
};
pub use record::{InterventionRecord, SnapshotEntry};
pub use signals::PortfolioSignals;
pub use traits::SignalAccessor;
