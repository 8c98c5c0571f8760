//! Configuration for portfolio operations
//!
//! Defines default constraints, the category size limit, the allocation
//! bucket policy and gap scoring parameters.

use crate::{OpportunityCategory, PortfolioError};
use alma_domain::constraints::{DEFAULT_MAX_UNTESTED_ALLOCATION, DEFAULT_MIN_COMMUNITY_ENDORSED};
use alma_domain::{HarmRiskLevel, PortfolioConstraints};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Configuration for the portfolio engine
///
/// # Examples
///
/// ```
/// use alma_portfolio::PortfolioConfig;
///
/// let config = PortfolioConfig::default();
/// assert_eq!(config.analyzer.category_limit, 10);
/// assert_eq!(config.allocation.buckets.len(), 3);
///
/// let config = PortfolioConfig::from_toml_str("[gaps]\ncoverage_ceiling = 5\n").unwrap();
/// assert_eq!(config.gaps.coverage_ceiling, 5);
/// assert_eq!(config.gaps.underfunded_weight, 2);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PortfolioConfig {
    /// Constraints used when a call supplies none
    pub constraints: ConstraintsConfig,

    /// Analyzer settings
    pub analyzer: AnalyzerConfig,

    /// Allocation bucket policy
    pub allocation: AllocationPolicy,

    /// Gap scoring settings
    pub gaps: GapConfig,
}

/// Serializable form of [`PortfolioConstraints`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConstraintsConfig {
    /// Maximum fraction of budget for untested interventions
    /// Default: 0.15
    pub max_untested_allocation: f64,

    /// Minimum fraction of budget for community-endorsed interventions
    /// Default: 0.8
    pub min_community_endorsed: f64,

    /// Highest tolerated harm risk, as upstream text
    /// Default: "Medium"
    pub harm_risk_cap: String,
}

impl Default for ConstraintsConfig {
    fn default() -> Self {
        Self {
            max_untested_allocation: DEFAULT_MAX_UNTESTED_ALLOCATION,
            min_community_endorsed: DEFAULT_MIN_COMMUNITY_ENDORSED,
            harm_risk_cap: HarmRiskLevel::Medium.label().to_string(),
        }
    }
}

impl ConstraintsConfig {
    /// Convert to domain constraints
    pub fn to_constraints(&self) -> PortfolioConstraints {
        PortfolioConstraints {
            max_untested_allocation: self.max_untested_allocation,
            min_community_endorsed: self.min_community_endorsed,
            harm_risk_cap: HarmRiskLevel::from_upstream(&self.harm_risk_cap),
        }
    }
}

impl From<&PortfolioConstraints> for ConstraintsConfig {
    fn from(constraints: &PortfolioConstraints) -> Self {
        Self {
            max_untested_allocation: constraints.max_untested_allocation,
            min_community_endorsed: constraints.min_community_endorsed,
            harm_risk_cap: constraints.harm_risk_cap.label().to_string(),
        }
    }
}

/// Analyzer settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalyzerConfig {
    /// Maximum entries kept per category
    /// Default: 10
    pub category_limit: usize,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self { category_limit: 10 }
    }
}

/// One allocation bucket: a share of budget split evenly across the top
/// records of a category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BucketRule {
    /// Category the bucket draws from
    pub category: OpportunityCategory,

    /// Fraction of total budget assigned to the bucket
    pub share: f64,

    /// Maximum records funded from the bucket
    pub max_records: usize,
}

impl BucketRule {
    /// Create a bucket rule
    pub fn new(category: OpportunityCategory, share: f64, max_records: usize) -> Self {
        Self {
            category,
            share,
            max_records,
        }
    }
}

/// Fixed-weight allocation strategy, applied bucket by bucket in order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AllocationPolicy {
    /// Buckets in allocation order
    pub buckets: Vec<BucketRule>,
}

impl Default for AllocationPolicy {
    /// Diversify across evidence maturity stages
    ///
    /// - 60% to up to 5 ready-to-scale programs
    /// - 25% to up to 3 underfunded high-evidence programs
    /// - 15% to up to 2 learning opportunities
    fn default() -> Self {
        Self {
            buckets: vec![
                BucketRule::new(OpportunityCategory::ReadyToScale, 0.60, 5),
                BucketRule::new(OpportunityCategory::UnderfundedHighEvidence, 0.25, 3),
                BucketRule::new(OpportunityCategory::LearningOpportunities, 0.15, 2),
            ],
        }
    }
}

impl AllocationPolicy {
    /// Sum of bucket shares
    pub fn total_share(&self) -> f64 {
        self.buckets.iter().map(|b| b.share).sum()
    }

    /// Check shares and bucket uniqueness
    pub fn validate(&self) -> Result<(), PortfolioError> {
        let mut seen = HashSet::new();
        for bucket in &self.buckets {
            if !(0.0..=1.0).contains(&bucket.share) {
                return Err(PortfolioError::Config(format!(
                    "share for {} must be in [0, 1], got {}",
                    bucket.category, bucket.share
                )));
            }
            if !seen.insert(bucket.category) {
                return Err(PortfolioError::Config(format!(
                    "duplicate allocation bucket for {}",
                    bucket.category
                )));
            }
        }

        // Allow for rounding in shares like 0.6 + 0.25 + 0.15
        let total = self.total_share();
        if total > 1.0 + 1e-9 {
            return Err(PortfolioError::Config(format!(
                "allocation shares sum to {}, which exceeds the whole budget",
                total
            )));
        }
        Ok(())
    }
}

/// Gap scoring settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GapConfig {
    /// Coverage at which a dimension value has no gap
    /// Default: 10
    pub coverage_ceiling: u32,

    /// Coverage weight of unfunded or at-risk records
    /// Default: 2
    pub underfunded_weight: u32,
}

impl Default for GapConfig {
    fn default() -> Self {
        Self {
            coverage_ceiling: 10,
            underfunded_weight: 2,
        }
    }
}

impl PortfolioConfig {
    /// Conservative preset: fewer records per bucket and a smaller learning share
    ///
    /// - 60% to up to 3 ready-to-scale programs
    /// - 25% to up to 2 underfunded high-evidence programs
    /// - 10% to 1 learning opportunity, 5% left unallocated
    pub fn conservative() -> Self {
        Self {
            allocation: AllocationPolicy {
                buckets: vec![
                    BucketRule::new(OpportunityCategory::ReadyToScale, 0.60, 3),
                    BucketRule::new(OpportunityCategory::UnderfundedHighEvidence, 0.25, 2),
                    BucketRule::new(OpportunityCategory::LearningOpportunities, 0.10, 1),
                ],
            },
            ..Self::default()
        }
    }

    /// Parse and validate a TOML document
    pub fn from_toml_str(s: &str) -> Result<Self, PortfolioError> {
        let config: Self = toml::from_str(s)
            .map_err(|e| PortfolioError::Config(format!("invalid portfolio config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Render as a TOML document
    pub fn to_toml_string(&self) -> Result<String, PortfolioError> {
        toml::to_string_pretty(self)
            .map_err(|e| PortfolioError::Config(format!("failed to serialize config: {}", e)))
    }

    /// Check every section
    pub fn validate(&self) -> Result<(), PortfolioError> {
        self.constraints
            .to_constraints()
            .validate()
            .map_err(PortfolioError::Config)?;

        if self.analyzer.category_limit == 0 {
            return Err(PortfolioError::Config(
                "analyzer.category_limit must be at least 1".to_string(),
            ));
        }

        self.allocation.validate()?;

        if self.gaps.coverage_ceiling == 0 {
            return Err(PortfolioError::Config(
                "gaps.coverage_ceiling must be at least 1".to_string(),
            ));
        }
        if self.gaps.underfunded_weight == 0 {
            return Err(PortfolioError::Config(
                "gaps.underfunded_weight must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}
