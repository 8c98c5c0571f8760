//! Opportunity categories the analyzer sorts interventions into

use alma_domain::{EvidenceLevel, InterventionRecord, PortfolioSignals};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Evidence strength above which an underfunded program is an opportunity
pub const UNDERFUNDED_EVIDENCE_MIN: f64 = 0.7;

/// Evidence strength below which a program counts as unproven
pub const UNPROVEN_EVIDENCE_MAX: f64 = 0.5;

/// Community authority above which an unproven program is promising
pub const PROMISING_AUTHORITY_MIN: f64 = 0.6;

/// Option value above which an unproven program is promising
pub const PROMISING_OPTION_VALUE_MIN: f64 = 0.6;

/// Evidence strength above which a program can scale
pub const SCALE_EVIDENCE_MIN: f64 = 0.8;

/// Community authority above which a program can scale
pub const SCALE_AUTHORITY_MIN: f64 = 0.7;

/// Option value above which an untested program is a learning opportunity
pub const LEARNING_OPTION_VALUE_MIN: f64 = 0.7;

/// Community authority above which an untested program is a learning opportunity
pub const LEARNING_AUTHORITY_MIN: f64 = 0.6;

/// Decision-relevant grouping of interventions
///
/// Categories are not exclusive: one intervention can belong to several.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OpportunityCategory {
    /// Strong evidence, little or precarious funding
    UnderfundedHighEvidence,
    /// Weak evidence but strong community backing and option value
    PromisingButUnproven,
    /// Strong evidence and authority with a replication playbook
    ReadyToScale,
    /// High harm risk or cultural review outstanding
    HighRiskFlagged,
    /// Untested programs worth evaluating
    LearningOpportunities,
}

impl OpportunityCategory {
    /// Every category, in reporting order
    pub const ALL: [OpportunityCategory; 5] = [
        OpportunityCategory::UnderfundedHighEvidence,
        OpportunityCategory::PromisingButUnproven,
        OpportunityCategory::ReadyToScale,
        OpportunityCategory::HighRiskFlagged,
        OpportunityCategory::LearningOpportunities,
    ];

    /// Snake-case key
    pub fn key(&self) -> &'static str {
        match self {
            OpportunityCategory::UnderfundedHighEvidence => "underfunded_high_evidence",
            OpportunityCategory::PromisingButUnproven => "promising_but_unproven",
            OpportunityCategory::ReadyToScale => "ready_to_scale",
            OpportunityCategory::HighRiskFlagged => "high_risk_flagged",
            OpportunityCategory::LearningOpportunities => "learning_opportunities",
        }
    }

    /// Human-readable title
    pub fn title(&self) -> &'static str {
        match self {
            OpportunityCategory::UnderfundedHighEvidence => "Underfunded, high evidence",
            OpportunityCategory::PromisingButUnproven => "Promising but unproven",
            OpportunityCategory::ReadyToScale => "Ready to scale",
            OpportunityCategory::HighRiskFlagged => "High risk flagged",
            OpportunityCategory::LearningOpportunities => "Learning opportunities",
        }
    }

    /// Parse a snake-case key (hyphens accepted)
    pub fn parse(s: &str) -> Option<Self> {
        let normalized = s.trim().to_lowercase().replace('-', "_");
        Self::ALL.into_iter().find(|c| c.key() == normalized)
    }

    /// Fixed rationale attached to allocations drawn from this category
    pub fn allocation_rationale(&self) -> &'static str {
        match self {
            OpportunityCategory::ReadyToScale => {
                "Ready to scale: High evidence + community authority + replication ready"
            }
            OpportunityCategory::UnderfundedHighEvidence => {
                "Underfunded opportunity: High evidence but lacks funding"
            }
            OpportunityCategory::LearningOpportunities => {
                "Learning opportunity: High potential but needs evidence building"
            }
            OpportunityCategory::PromisingButUnproven => {
                "Promising opportunity: Community backing and option value ahead of evidence"
            }
            OpportunityCategory::HighRiskFlagged => {
                "Flagged opportunity: Funded subject to a harm mitigation plan"
            }
        }
    }

    /// Membership rule for this category
    pub fn matches(&self, record: &InterventionRecord, signals: &PortfolioSignals) -> bool {
        match self {
            OpportunityCategory::UnderfundedHighEvidence => {
                signals.evidence_strength > UNDERFUNDED_EVIDENCE_MIN
                    && record
                        .current_funding
                        .as_ref()
                        .is_some_and(|f| f.is_underfunded())
            }
            OpportunityCategory::PromisingButUnproven => {
                signals.evidence_strength < UNPROVEN_EVIDENCE_MAX
                    && signals.community_authority > PROMISING_AUTHORITY_MIN
                    && signals.option_value > PROMISING_OPTION_VALUE_MIN
            }
            OpportunityCategory::ReadyToScale => {
                signals.evidence_strength > SCALE_EVIDENCE_MIN
                    && signals.community_authority > SCALE_AUTHORITY_MIN
                    && record
                        .replication_readiness
                        .as_ref()
                        .is_some_and(|r| r.has_playbook())
            }
            OpportunityCategory::HighRiskFlagged => record
                .harm_risk_level
                .as_ref()
                .is_some_and(|h| h.is_flagged()),
            OpportunityCategory::LearningOpportunities => {
                signals.option_value > LEARNING_OPTION_VALUE_MIN
                    && signals.community_authority > LEARNING_AUTHORITY_MIN
                    && record.evidence_is(&EvidenceLevel::Untested)
            }
        }
    }
}

impl fmt::Display for OpportunityCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl std::str::FromStr for OpportunityCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("Invalid opportunity category: {}", s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alma_domain::{FundingStatus, HarmRiskLevel, InterventionId, ReplicationReadiness};

    fn record() -> InterventionRecord {
        InterventionRecord::new(InterventionId::new(), "Program", "Diversion")
    }

    fn signals(evidence: f64, authority: f64, option: f64) -> PortfolioSignals {
        PortfolioSignals {
            evidence_strength: evidence,
            community_authority: authority,
            option_value: option,
            ..Default::default()
        }
    }

    #[test]
    fn test_parse_keys() {
        for category in OpportunityCategory::ALL {
            assert_eq!(OpportunityCategory::parse(category.key()), Some(category));
        }
        assert_eq!(
            OpportunityCategory::parse("Ready-To-Scale"),
            Some(OpportunityCategory::ReadyToScale)
        );
        assert!(OpportunityCategory::parse("everything").is_none());
    }

    #[test]
    fn test_underfunded_high_evidence() {
        let mut r = record();
        r.current_funding = Some(FundingStatus::PilotSeed);
        let c = OpportunityCategory::UnderfundedHighEvidence;
        assert!(c.matches(&r, &signals(0.71, 0.0, 0.0)));
        assert!(!c.matches(&r, &signals(0.7, 0.0, 0.0)));

        r.current_funding = Some(FundingStatus::Established);
        assert!(!c.matches(&r, &signals(0.9, 0.0, 0.0)));

        r.current_funding = None;
        assert!(!c.matches(&r, &signals(0.9, 0.0, 0.0)));
    }

    #[test]
    fn test_promising_but_unproven() {
        let c = OpportunityCategory::PromisingButUnproven;
        assert!(c.matches(&record(), &signals(0.4, 0.65, 0.65)));
        assert!(!c.matches(&record(), &signals(0.5, 0.65, 0.65)));
        assert!(!c.matches(&record(), &signals(0.4, 0.6, 0.65)));
    }

    #[test]
    fn test_ready_to_scale_requires_playbook() {
        let mut r = record();
        let c = OpportunityCategory::ReadyToScale;
        r.replication_readiness = Some(ReplicationReadiness::ReadyWithSupport);
        assert!(!c.matches(&r, &signals(0.9, 0.9, 0.0)));

        r.replication_readiness = Some(ReplicationReadiness::ReadyWithPlaybook);
        assert!(c.matches(&r, &signals(0.9, 0.9, 0.0)));
        assert!(!c.matches(&r, &signals(0.8, 0.9, 0.0)));
    }

    #[test]
    fn test_high_risk_flagged() {
        let mut r = record();
        let c = OpportunityCategory::HighRiskFlagged;
        assert!(!c.matches(&r, &PortfolioSignals::default()));

        r.harm_risk_level = Some(HarmRiskLevel::RequiresCulturalReview);
        assert!(c.matches(&r, &PortfolioSignals::default()));

        r.harm_risk_level = Some(HarmRiskLevel::Medium);
        assert!(!c.matches(&r, &PortfolioSignals::default()));
    }

    #[test]
    fn test_learning_opportunities() {
        let mut r = record();
        r.evidence_level = Some(EvidenceLevel::Untested);
        let c = OpportunityCategory::LearningOpportunities;
        assert!(c.matches(&r, &signals(0.1, 0.61, 0.71)));
        assert!(!c.matches(&r, &signals(0.1, 0.61, 0.7)));

        r.evidence_level = Some(EvidenceLevel::Promising);
        assert!(!c.matches(&r, &signals(0.1, 0.61, 0.71)));
    }

    #[test]
    fn test_nan_signals_never_match() {
        let nan = signals(f64::NAN, f64::NAN, f64::NAN);
        let mut r = record();
        r.current_funding = Some(FundingStatus::Unfunded);
        r.evidence_level = Some(EvidenceLevel::Untested);
        r.replication_readiness = Some(ReplicationReadiness::ReadyWithPlaybook);
        for category in OpportunityCategory::ALL {
            if category != OpportunityCategory::HighRiskFlagged {
                assert!(!category.matches(&r, &nan), "{} matched NaN signals", category);
            }
        }
    }
}
