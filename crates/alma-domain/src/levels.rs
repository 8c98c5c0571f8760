//! Categorical vocabularies for intervention records
//!
//! The upstream store keeps these fields as free text. Each type here closes
//! the known vocabulary into variants and keeps anything unrecognized in an
//! `Other` variant so nothing is lost. `from_upstream` is the only place raw
//! text is inspected; rules elsewhere match on variants.

/// Strength of the evidence base behind an intervention
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum EvidenceLevel {
    /// RCT or quasi-experimental, replicated
    Proven,
    /// Strong evaluation with positive outcomes
    Effective,
    /// Culturally grounded, community authority
    IndigenousLed,
    /// Community-endorsed, emerging evidence
    Promising,
    /// Theory or pilot stage
    Untested,
    /// Unrecognized upstream text
    Other(String),
}

impl EvidenceLevel {
    /// Normalize upstream text
    ///
    /// Upstream values carry a parenthesised gloss ("Proven (RCT/...)"), so
    /// matching is by substring, checked in priority order.
    pub fn from_upstream(raw: &str) -> Self {
        if raw.contains("Proven") {
            EvidenceLevel::Proven
        } else if raw.contains("Effective") {
            EvidenceLevel::Effective
        } else if raw.contains("Indigenous-led") {
            EvidenceLevel::IndigenousLed
        } else if raw.contains("Untested") {
            EvidenceLevel::Untested
        } else if raw.contains("Promising") {
            EvidenceLevel::Promising
        } else {
            EvidenceLevel::Other(raw.trim().to_string())
        }
    }

    /// Canonical upstream label
    pub fn label(&self) -> &str {
        match self {
            EvidenceLevel::Proven => "Proven (RCT/quasi-experimental, replicated)",
            EvidenceLevel::Effective => "Effective (strong evaluation, positive outcomes)",
            EvidenceLevel::IndigenousLed => {
                "Indigenous-led (culturally grounded, community authority)"
            }
            EvidenceLevel::Promising => "Promising (community-endorsed, emerging evidence)",
            EvidenceLevel::Untested => "Untested (theory/pilot stage)",
            EvidenceLevel::Other(raw) => raw,
        }
    }
}

/// Assessed risk of harm from an intervention
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum HarmRiskLevel {
    /// Low risk
    Low,
    /// Medium risk
    Medium,
    /// High risk, mitigation required
    High,
    /// Cultural safety assessment outstanding
    RequiresCulturalReview,
    /// Unrecognized upstream text
    Other(String),
}

impl HarmRiskLevel {
    /// Normalize upstream text (exact match after trimming)
    pub fn from_upstream(raw: &str) -> Self {
        match raw.trim() {
            "Low" => HarmRiskLevel::Low,
            "Medium" => HarmRiskLevel::Medium,
            "High" => HarmRiskLevel::High,
            "Requires cultural review" => HarmRiskLevel::RequiresCulturalReview,
            other => HarmRiskLevel::Other(other.to_string()),
        }
    }

    /// Canonical upstream label
    pub fn label(&self) -> &str {
        match self {
            HarmRiskLevel::Low => "Low",
            HarmRiskLevel::Medium => "Medium",
            HarmRiskLevel::High => "High",
            HarmRiskLevel::RequiresCulturalReview => "Requires cultural review",
            HarmRiskLevel::Other(raw) => raw,
        }
    }

    /// Whether the level needs attention before funding
    pub fn is_flagged(&self) -> bool {
        matches!(self, HarmRiskLevel::High | HarmRiskLevel::RequiresCulturalReview)
    }
}

/// Current funding situation of an intervention
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum FundingStatus {
    /// No funding
    Unfunded,
    /// Pilot or seed funding only
    PilotSeed,
    /// Established funding
    Established,
    /// Demand exceeds capacity
    Oversubscribed,
    /// At risk of closure
    AtRisk,
    /// Unrecognized upstream text
    Other(String),
}

impl FundingStatus {
    /// Normalize upstream text (exact match after trimming)
    pub fn from_upstream(raw: &str) -> Self {
        match raw.trim() {
            "Unfunded" => FundingStatus::Unfunded,
            "Pilot/seed" => FundingStatus::PilotSeed,
            "Established" => FundingStatus::Established,
            "Oversubscribed" => FundingStatus::Oversubscribed,
            "At-risk" => FundingStatus::AtRisk,
            other => FundingStatus::Other(other.to_string()),
        }
    }

    /// Canonical upstream label
    pub fn label(&self) -> &str {
        match self {
            FundingStatus::Unfunded => "Unfunded",
            FundingStatus::PilotSeed => "Pilot/seed",
            FundingStatus::Established => "Established",
            FundingStatus::Oversubscribed => "Oversubscribed",
            FundingStatus::AtRisk => "At-risk",
            FundingStatus::Other(raw) => raw,
        }
    }

    /// Unfunded, pilot/seed or at-risk
    pub fn is_underfunded(&self) -> bool {
        matches!(
            self,
            FundingStatus::Unfunded | FundingStatus::PilotSeed | FundingStatus::AtRisk
        )
    }

    /// Statuses that count double when measuring coverage gaps
    pub fn is_gap_weighted(&self) -> bool {
        matches!(self, FundingStatus::Unfunded | FundingStatus::AtRisk)
    }
}

/// How ready an intervention is to be replicated elsewhere
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ReplicationReadiness {
    /// Needs more development
    NotReady,
    /// Requires adaptation guidance
    ReadyWithSupport,
    /// Playbook available
    ReadyWithPlaybook,
    /// Community authority required before replication
    CommunityAuthorityRequired,
    /// Unrecognized upstream text
    Other(String),
}

impl ReplicationReadiness {
    /// Normalize upstream text (exact match after trimming)
    pub fn from_upstream(raw: &str) -> Self {
        match raw.trim() {
            "Not ready (needs more development)" => ReplicationReadiness::NotReady,
            "Ready with support (requires adaptation guidance)" => {
                ReplicationReadiness::ReadyWithSupport
            }
            "Ready (playbook available)" => ReplicationReadiness::ReadyWithPlaybook,
            "Community authority required" => ReplicationReadiness::CommunityAuthorityRequired,
            other => ReplicationReadiness::Other(other.to_string()),
        }
    }

    /// Canonical upstream label
    pub fn label(&self) -> &str {
        match self {
            ReplicationReadiness::NotReady => "Not ready (needs more development)",
            ReplicationReadiness::ReadyWithSupport => {
                "Ready with support (requires adaptation guidance)"
            }
            ReplicationReadiness::ReadyWithPlaybook => "Ready (playbook available)",
            ReplicationReadiness::CommunityAuthorityRequired => "Community authority required",
            ReplicationReadiness::Other(raw) => raw,
        }
    }

    /// Label contains "Ready" (case-sensitive, so "Not ready" is excluded)
    pub fn is_ready(&self) -> bool {
        self.label().contains("Ready")
    }

    /// Exactly "Ready (playbook available)"
    pub fn has_playbook(&self) -> bool {
        matches!(self, ReplicationReadiness::ReadyWithPlaybook)
    }
}

/// Geographic reach an intervention can scale to
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Scalability {
    /// Local only
    LocalOnly,
    /// Regional
    Regional,
    /// State-wide
    StateWide,
    /// National
    National,
    /// Depends on context
    ContextDependent,
    /// Unrecognized upstream text
    Other(String),
}

impl Scalability {
    /// Normalize upstream text (exact match after trimming)
    pub fn from_upstream(raw: &str) -> Self {
        match raw.trim() {
            "Local only" => Scalability::LocalOnly,
            "Regional" => Scalability::Regional,
            "State-wide" => Scalability::StateWide,
            "National" => Scalability::National,
            "Context-dependent" => Scalability::ContextDependent,
            other => Scalability::Other(other.to_string()),
        }
    }

    /// Canonical upstream label
    pub fn label(&self) -> &str {
        match self {
            Scalability::LocalOnly => "Local only",
            Scalability::Regional => "Regional",
            Scalability::StateWide => "State-wide",
            Scalability::National => "National",
            Scalability::ContextDependent => "Context-dependent",
            Scalability::Other(raw) => raw,
        }
    }
}

/// Editorial workflow state of a record
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ReviewStatus {
    /// Draft
    Draft,
    /// Under community review
    CommunityReview,
    /// Approved
    Approved,
    /// Published
    Published,
    /// Archived
    Archived,
    /// Unrecognized upstream text
    Other(String),
}

impl ReviewStatus {
    /// Normalize upstream text (exact match after trimming)
    pub fn from_upstream(raw: &str) -> Self {
        match raw.trim() {
            "Draft" => ReviewStatus::Draft,
            "Community Review" => ReviewStatus::CommunityReview,
            "Approved" => ReviewStatus::Approved,
            "Published" => ReviewStatus::Published,
            "Archived" => ReviewStatus::Archived,
            other => ReviewStatus::Other(other.to_string()),
        }
    }

    /// Canonical upstream label
    pub fn label(&self) -> &str {
        match self {
            ReviewStatus::Draft => "Draft",
            ReviewStatus::CommunityReview => "Community Review",
            ReviewStatus::Approved => "Approved",
            ReviewStatus::Published => "Published",
            ReviewStatus::Archived => "Archived",
            ReviewStatus::Other(raw) => raw,
        }
    }

    /// Approved or published records are the only ones the engine reads
    pub fn is_publishable(&self) -> bool {
        matches!(self, ReviewStatus::Approved | ReviewStatus::Published)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_evidence_level_substring_normalization() {
        assert_eq!(
            EvidenceLevel::from_upstream("Proven (RCT/quasi-experimental, replicated)"),
            EvidenceLevel::Proven
        );
        assert_eq!(EvidenceLevel::from_upstream("Effective"), EvidenceLevel::Effective);
        assert_eq!(
            EvidenceLevel::from_upstream("Indigenous-led (culturally grounded, community authority)"),
            EvidenceLevel::IndigenousLed
        );
        assert_eq!(
            EvidenceLevel::from_upstream("Untested (theory/pilot stage)"),
            EvidenceLevel::Untested
        );
        assert_eq!(
            EvidenceLevel::from_upstream("Anecdotal"),
            EvidenceLevel::Other("Anecdotal".to_string())
        );
    }

    #[test]
    fn test_evidence_level_priority() {
        // Proven wins over anything else mentioned in the same text
        assert_eq!(
            EvidenceLevel::from_upstream("Proven, previously Effective"),
            EvidenceLevel::Proven
        );
    }

    #[test]
    fn test_harm_risk_exact_match() {
        assert_eq!(HarmRiskLevel::from_upstream(" High "), HarmRiskLevel::High);
        assert_eq!(
            HarmRiskLevel::from_upstream("Requires cultural review"),
            HarmRiskLevel::RequiresCulturalReview
        );
        assert!(matches!(HarmRiskLevel::from_upstream("high"), HarmRiskLevel::Other(_)));
        assert!(HarmRiskLevel::High.is_flagged());
        assert!(!HarmRiskLevel::Medium.is_flagged());
    }

    #[test]
    fn test_funding_predicates() {
        assert!(FundingStatus::Unfunded.is_underfunded());
        assert!(FundingStatus::PilotSeed.is_underfunded());
        assert!(FundingStatus::AtRisk.is_underfunded());
        assert!(!FundingStatus::Established.is_underfunded());

        assert!(FundingStatus::Unfunded.is_gap_weighted());
        assert!(FundingStatus::AtRisk.is_gap_weighted());
        assert!(!FundingStatus::PilotSeed.is_gap_weighted());
    }

    #[test]
    fn test_replication_readiness() {
        assert!(ReplicationReadiness::ReadyWithPlaybook.is_ready());
        assert!(ReplicationReadiness::ReadyWithSupport.is_ready());
        assert!(!ReplicationReadiness::NotReady.is_ready());
        assert!(ReplicationReadiness::from_upstream("Ready soon").is_ready());

        assert!(ReplicationReadiness::ReadyWithPlaybook.has_playbook());
        assert!(!ReplicationReadiness::ReadyWithSupport.has_playbook());
    }

    #[test]
    fn test_labels_round_trip_through_normalization() {
        for level in [
            Scalability::LocalOnly,
            Scalability::Regional,
            Scalability::StateWide,
            Scalability::National,
            Scalability::ContextDependent,
        ] {
            assert_eq!(Scalability::from_upstream(level.label()), level);
        }
        for status in [FundingStatus::PilotSeed, FundingStatus::AtRisk] {
            assert_eq!(FundingStatus::from_upstream(status.label()), status);
        }
    }

    #[test]
    fn test_review_status_publishable() {
        assert!(ReviewStatus::Approved.is_publishable());
        assert!(ReviewStatus::Published.is_publishable());
        assert!(!ReviewStatus::Draft.is_publishable());
        assert!(!ReviewStatus::from_upstream("Community Review").is_publishable());
    }
}
