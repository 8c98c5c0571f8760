//! Intervention records - one social program each

use crate::{
    EvidenceLevel, FundingStatus, HarmRiskLevel, InterventionId, PortfolioSignals,
    ReplicationReadiness, ReviewStatus, Scalability,
};

/// A social program as read from the upstream store
///
/// Records are created and edited upstream; the engine only reads them.
/// Optional categorical fields that are absent never satisfy a rule.
#[derive(Debug, Clone, PartialEq)]
pub struct InterventionRecord {
    /// Unique identifier
    pub id: InterventionId,

    /// Program name
    pub name: String,

    /// Program type label (e.g. "Prevention", "Diversion")
    pub intervention_type: String,

    /// Free-text description
    pub description: String,

    /// Evidence base classification
    pub evidence_level: Option<EvidenceLevel>,

    /// Assessed harm risk
    pub harm_risk_level: Option<HarmRiskLevel>,

    /// Funding situation
    pub current_funding: Option<FundingStatus>,

    /// Readiness for replication
    pub replication_readiness: Option<ReplicationReadiness>,

    /// Reach the program can scale to
    pub scalability: Option<Scalability>,

    /// Who holds cultural authority over the program, if anyone
    pub cultural_authority: Option<String>,

    /// Years the program has operated
    pub years_operating: Option<u32>,

    /// Jurisdictions the program operates in (e.g. "NSW", "VIC")
    pub geography: Vec<String>,

    /// Populations the program serves
    pub target_cohort: Vec<String>,

    /// Editorial workflow state
    pub review_status: ReviewStatus,

    /// Risks recorded against the program upstream
    pub risks: Option<String>,

    /// Organization delivering the program
    pub operating_organization: Option<String>,
}

impl InterventionRecord {
    /// Create a record with the given identity and every optional field empty
    ///
    /// New records start as [`ReviewStatus::Draft`].
    pub fn new(id: InterventionId, name: impl Into<String>, intervention_type: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            intervention_type: intervention_type.into(),
            description: String::new(),
            evidence_level: None,
            harm_risk_level: None,
            current_funding: None,
            replication_readiness: None,
            scalability: None,
            cultural_authority: None,
            years_operating: None,
            geography: Vec::new(),
            target_cohort: Vec::new(),
            review_status: ReviewStatus::Draft,
            risks: None,
            operating_organization: None,
        }
    }

    /// Cultural authority is recorded and not blank
    pub fn has_cultural_authority(&self) -> bool {
        self.cultural_authority
            .as_deref()
            .is_some_and(|s| !s.trim().is_empty())
    }

    /// Evidence level matches the given variant
    pub fn evidence_is(&self, level: &EvidenceLevel) -> bool {
        self.evidence_level.as_ref() == Some(level)
    }

    /// Harm risk level matches the given variant
    pub fn harm_risk_is(&self, level: &HarmRiskLevel) -> bool {
        self.harm_risk_level.as_ref() == Some(level)
    }

    /// Funding status matches the given variant
    pub fn funding_is(&self, status: &FundingStatus) -> bool {
        self.current_funding.as_ref() == Some(status)
    }

    /// Label used when grouping by evidence level
    pub fn evidence_label(&self) -> &str {
        self.evidence_level
            .as_ref()
            .map(EvidenceLevel::label)
            .unwrap_or("Unknown")
    }
}

/// One record paired with its upstream signals
#[derive(Debug, Clone, PartialEq)]
pub struct SnapshotEntry {
    /// The intervention
    pub record: InterventionRecord,
    /// Its signals
    pub signals: PortfolioSignals,
}

impl SnapshotEntry {
    /// Pair a record with its signals
    pub fn new(record: InterventionRecord, signals: PortfolioSignals) -> Self {
        Self { record, signals }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_record_is_empty_draft() {
        let record = InterventionRecord::new(InterventionId::new(), "Yarning Circle", "Diversion");
        assert_eq!(record.name, "Yarning Circle");
        assert_eq!(record.intervention_type, "Diversion");
        assert_eq!(record.review_status, ReviewStatus::Draft);
        assert!(record.geography.is_empty());
        assert!(record.evidence_level.is_none());
    }

    #[test]
    fn test_blank_cultural_authority_is_absent() {
        let mut record = InterventionRecord::new(InterventionId::new(), "A", "Prevention");
        assert!(!record.has_cultural_authority());

        record.cultural_authority = Some("   ".to_string());
        assert!(!record.has_cultural_authority());

        record.cultural_authority = Some("Elders council".to_string());
        assert!(record.has_cultural_authority());
    }

    #[test]
    fn test_evidence_label_defaults_to_unknown() {
        let mut record = InterventionRecord::new(InterventionId::new(), "A", "Prevention");
        assert_eq!(record.evidence_label(), "Unknown");

        record.evidence_level = Some(EvidenceLevel::Proven);
        assert_eq!(record.evidence_label(), "Proven (RCT/quasi-experimental, replicated)");
    }
}
