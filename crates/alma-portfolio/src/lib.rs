//! ALMA Portfolio Engine
//!
//! Analytic core that turns a snapshot of intervention records and their
//! upstream signals into decision support for funders.
//!
//! # Overview
//!
//! - **Analyzer**: sorts interventions into five opportunity categories, each
//!   capped at a fixed size and ordered by portfolio score
//! - **Builder**: allocates a budget across categories using fixed bucket shares
//!   and reports diversification by type, geography and evidence level
//! - **Gap analyzer**: ranks jurisdictions, cohorts and program types by how
//!   underserved they are
//! - **Service**: [`PortfolioService`] fetches one snapshot per call from an
//!   injected [`alma_domain::SignalAccessor`] and runs the pure components
//!
//! All components are synchronous and side-effect free. Sparse records degrade
//! to empty or zero results; only a failing accessor is an error.
//!
//! # Usage
//!
//! ```
//! use alma_portfolio::{PortfolioConfig, PortfolioService};
//! use alma_store::MemoryStore;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let service = PortfolioService::new(MemoryStore::new(), PortfolioConfig::default())?;
//!
//! let analysis = service.analyze(None)?;
//! let plan = service.build_portfolio(1_000_000.0, None)?;
//! let gaps = service.identify_gaps()?;
//!
//! assert!(analysis.is_empty());
//! assert_eq!(plan.total_allocated, 0.0);
//! assert!(gaps.is_empty());
//! # Ok(())
//! # }
//! ```
//!
//! # Configuration
//!
//! The engine can be configured via TOML:
//!
//! ```toml
//! [constraints]
//! max_untested_allocation = 0.15
//! min_community_endorsed = 0.8
//! harm_risk_cap = "Medium"
//!
//! [analyzer]
//! category_limit = 10
//!
//! [[allocation.buckets]]
//! category = "ready_to_scale"
//! share = 0.6
//! max_records = 5
//!
//! [gaps]
//! coverage_ceiling = 10
//! underfunded_weight = 2
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

mod analyzer;
mod builder;
mod category;
mod config;
mod error;
mod gaps;
mod service;

pub use analyzer::{analyze_snapshot, rank_by_portfolio_score, PortfolioAnalysis};
pub use builder::{build_allocation, diversify, AllocationEntry, AllocationPlan, Diversification};
pub use category::OpportunityCategory;
pub use config::{
    AllocationPolicy, AnalyzerConfig, BucketRule, ConstraintsConfig, GapConfig, PortfolioConfig,
};
pub use error::PortfolioError;
pub use gaps::{find_gaps, GapAnalysis, GapDimension, GapEntry};
pub use service::PortfolioService;
