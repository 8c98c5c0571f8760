//! Raw upstream rows and their conversion into domain entries

use crate::StoreError;
use alma_domain::{
    EvidenceLevel, FundingStatus, HarmRiskLevel, InterventionId, InterventionRecord,
    PortfolioSignals, ReplicationReadiness, ReviewStatus, Scalability, SnapshotEntry,
};
use serde::{Deserialize, Serialize};

/// One row of the upstream intervention table, with its signal columns
///
/// Everything except `id` may be missing or `null`. Conversion into a
/// [`SnapshotEntry`] is where upstream text gets normalized.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InterventionRow {
    /// UUID as text
    pub id: String,
    /// Program name
    #[serde(default)]
    pub name: Option<String>,
    /// Program type label
    #[serde(default, rename = "type")]
    pub intervention_type: Option<String>,
    /// Free-text description
    #[serde(default)]
    pub description: Option<String>,
    /// Evidence level text
    #[serde(default)]
    pub evidence_level: Option<String>,
    /// Harm risk text
    #[serde(default)]
    pub harm_risk_level: Option<String>,
    /// Funding status text
    #[serde(default)]
    pub current_funding: Option<String>,
    /// Replication readiness text
    #[serde(default)]
    pub replication_readiness: Option<String>,
    /// Scalability text
    #[serde(default)]
    pub scalability: Option<String>,
    /// Cultural authority holder, if any
    #[serde(default)]
    pub cultural_authority: Option<String>,
    /// Negative values are treated as unknown
    #[serde(default)]
    pub years_operating: Option<i64>,
    /// Jurisdictions
    #[serde(default)]
    pub geography: Option<Vec<String>>,
    /// Cohorts served
    #[serde(default)]
    pub target_cohort: Option<Vec<String>>,
    /// Review workflow state
    #[serde(default)]
    pub review_status: Option<String>,
    /// Recorded risks
    #[serde(default)]
    pub risks: Option<String>,
    /// Delivering organization
    #[serde(default)]
    pub operating_organization: Option<String>,
    /// Evidence strength signal
    #[serde(default)]
    pub evidence_strength_signal: Option<f64>,
    /// Community authority signal
    #[serde(default)]
    pub community_authority_signal: Option<f64>,
    /// Harm risk signal
    #[serde(default)]
    pub harm_risk_signal: Option<f64>,
    /// Implementation capability signal
    #[serde(default)]
    pub implementation_capability_signal: Option<f64>,
    /// Option value signal
    #[serde(default)]
    pub option_value_signal: Option<f64>,
    /// Composite portfolio score
    #[serde(default)]
    pub portfolio_score: Option<f64>,
}

/// Blank text counts as missing
fn present(value: Option<&str>) -> Option<&str> {
    value.filter(|s| !s.trim().is_empty())
}

fn owned(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.trim().is_empty())
}

/// Drop blank entries from a multi-valued column
fn labels(values: Option<Vec<String>>) -> Vec<String> {
    values
        .unwrap_or_default()
        .into_iter()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

impl InterventionRow {
    /// Create a row with only an id
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Default::default()
        }
    }

    /// Parse the row id
    pub fn parse_id(&self) -> Result<InterventionId, StoreError> {
        InterventionId::from_string(&self.id).map_err(StoreError::InvalidData)
    }

    /// Whether the row passes the approved/published filter
    pub fn is_publishable(&self) -> bool {
        present(self.review_status.as_deref())
            .map(ReviewStatus::from_upstream)
            .is_some_and(|s| s.is_publishable())
    }

    /// Signal columns, with missing values as 0.0
    pub fn signals(&self) -> PortfolioSignals {
        PortfolioSignals::from_optional(
            self.evidence_strength_signal,
            self.community_authority_signal,
            self.harm_risk_signal,
            self.implementation_capability_signal,
            self.option_value_signal,
            self.portfolio_score,
        )
    }

    /// Normalize into a domain entry
    ///
    /// Only an unparseable id is an error. A missing review status reads as
    /// draft.
    pub fn into_entry(self) -> Result<SnapshotEntry, StoreError> {
        let id = self.parse_id()?;
        let signals = self.signals();

        let mut record = InterventionRecord::new(
            id,
            self.name.unwrap_or_default(),
            self.intervention_type
                .map(|s| s.trim().to_string())
                .unwrap_or_default(),
        );
        record.description = self.description.unwrap_or_default();
        record.evidence_level = present(self.evidence_level.as_deref()).map(EvidenceLevel::from_upstream);
        record.harm_risk_level =
            present(self.harm_risk_level.as_deref()).map(HarmRiskLevel::from_upstream);
        record.current_funding =
            present(self.current_funding.as_deref()).map(FundingStatus::from_upstream);
        record.replication_readiness =
            present(self.replication_readiness.as_deref()).map(ReplicationReadiness::from_upstream);
        record.scalability = present(self.scalability.as_deref()).map(Scalability::from_upstream);
        record.cultural_authority = owned(self.cultural_authority);
        record.years_operating = self.years_operating.and_then(|y| u32::try_from(y).ok());
        record.geography = labels(self.geography);
        record.target_cohort = labels(self.target_cohort);
        record.review_status = present(self.review_status.as_deref())
            .map(ReviewStatus::from_upstream)
            .unwrap_or(ReviewStatus::Draft);
        record.risks = owned(self.risks);
        record.operating_organization = owned(self.operating_organization);

        Ok(SnapshotEntry::new(record, signals))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ID: &str = "0190f5c1-8b7a-7cde-9f00-1234567890ab";

    #[test]
    fn test_full_row_from_json() {
        let json = format!(
            r#"{{
                "id": "{}",
                "name": "Youth Justice Conferencing",
                "type": "Diversion",
                "evidence_level": "Proven (RCT/quasi-experimental, replicated)",
                "harm_risk_level": "Low",
                "current_funding": "Pilot/seed",
                "replication_readiness": "Ready (playbook available)",
                "scalability": "State-wide",
                "cultural_authority": "Elders council",
                "years_operating": 12,
                "geography": ["NSW", "VIC"],
                "target_cohort": ["10-17 year olds"],
                "review_status": "Published",
                "evidence_strength_signal": 0.9,
                "community_authority_signal": 0.8,
                "portfolio_score": 0.75
            }}"#,
            ID
        );
        let row: InterventionRow = serde_json::from_str(&json).unwrap();
        assert!(row.is_publishable());

        let entry = row.into_entry().unwrap();
        let record = &entry.record;
        assert_eq!(record.id.to_string(), ID);
        assert_eq!(record.intervention_type, "Diversion");
        assert_eq!(record.evidence_level, Some(EvidenceLevel::Proven));
        assert_eq!(record.current_funding, Some(FundingStatus::PilotSeed));
        assert_eq!(record.replication_readiness, Some(ReplicationReadiness::ReadyWithPlaybook));
        assert_eq!(record.years_operating, Some(12));
        assert_eq!(record.geography, vec!["NSW", "VIC"]);
        assert_eq!(record.review_status, ReviewStatus::Published);
        assert_eq!(entry.signals.evidence_strength, 0.9);
        assert_eq!(entry.signals.option_value, 0.0);
        assert_eq!(entry.signals.portfolio_score, 0.75);
    }

    #[test]
    fn test_sparse_row() {
        let json = format!(r#"{{"id": "{}", "geography": null, "evidence_level": null}}"#, ID);
        let row: InterventionRow = serde_json::from_str(&json).unwrap();
        assert!(!row.is_publishable());

        let entry = row.into_entry().unwrap();
        assert!(entry.record.geography.is_empty());
        assert!(entry.record.evidence_level.is_none());
        assert_eq!(entry.record.review_status, ReviewStatus::Draft);
        assert_eq!(entry.signals, PortfolioSignals::default());
    }

    #[test]
    fn test_blank_text_is_missing() {
        let mut row = InterventionRow::new(ID);
        row.cultural_authority = Some("   ".to_string());
        row.harm_risk_level = Some("".to_string());
        row.geography = Some(vec!["".to_string(), " QLD ".to_string()]);
        row.years_operating = Some(-3);

        let record = row.into_entry().unwrap().record;
        assert!(record.cultural_authority.is_none());
        assert!(!record.has_cultural_authority());
        assert!(record.harm_risk_level.is_none());
        assert_eq!(record.geography, vec!["QLD"]);
        assert!(record.years_operating.is_none());
    }

    #[test]
    fn test_bad_id_is_invalid_data() {
        let row = InterventionRow::new("not-a-uuid");
        assert!(matches!(row.into_entry(), Err(StoreError::InvalidData(_))));
    }

    #[test]
    fn test_missing_id_fails_to_parse() {
        let result: Result<InterventionRow, _> = serde_json::from_str(r#"{"name": "x"}"#);
        assert!(result.is_err());
    }
}
