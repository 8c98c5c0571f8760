//! Portfolio constraints supplied per invocation

use crate::HarmRiskLevel;

/// Default cap on the share of budget going to untested interventions
pub const DEFAULT_MAX_UNTESTED_ALLOCATION: f64 = 0.15;

/// Default floor on the share of budget going to community-endorsed interventions
pub const DEFAULT_MIN_COMMUNITY_ENDORSED: f64 = 0.8;

/// Policy constraints for building a portfolio
///
/// These are carried through every operation and reported alongside results.
/// The allocation strategy itself uses fixed bucket shares and does not yet
/// enforce `min_community_endorsed` or `harm_risk_cap`.
#[derive(Debug, Clone, PartialEq)]
pub struct PortfolioConstraints {
    /// Maximum fraction of budget for untested interventions
    pub max_untested_allocation: f64,
    /// Minimum fraction of budget for community-endorsed interventions
    pub min_community_endorsed: f64,
    /// Highest harm risk tolerated without a mitigation plan
    pub harm_risk_cap: HarmRiskLevel,
}

impl Default for PortfolioConstraints {
    fn default() -> Self {
        Self {
            max_untested_allocation: DEFAULT_MAX_UNTESTED_ALLOCATION,
            min_community_endorsed: DEFAULT_MIN_COMMUNITY_ENDORSED,
            harm_risk_cap: HarmRiskLevel::Medium,
        }
    }
}

impl PortfolioConstraints {
    /// Check that both fractions lie in [0, 1]
    pub fn validate(&self) -> Result<(), String> {
        for (name, value) in [
            ("max_untested_allocation", self.max_untested_allocation),
            ("min_community_endorsed", self.min_community_endorsed),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(format!("{} must be in [0, 1], got {}", name, value));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_constraints() {
        let constraints = PortfolioConstraints::default();
        assert_eq!(constraints.max_untested_allocation, 0.15);
        assert_eq!(constraints.min_community_endorsed, 0.8);
        assert_eq!(constraints.harm_risk_cap, HarmRiskLevel::Medium);
        assert!(constraints.validate().is_ok());
    }

    #[test]
    fn test_out_of_range_fraction() {
        let constraints = PortfolioConstraints {
            max_untested_allocation: 1.5,
            ..Default::default()
        };
        let err = constraints.validate().unwrap_err();
        assert!(err.contains("max_untested_allocation"));
    }
}
