//! Coverage gap analysis across geography, cohort and program type

use crate::GapConfig;
use alma_domain::{InterventionRecord, SnapshotEntry};
use std::collections::HashMap;
use std::fmt;

/// Dimension a gap is measured along
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GapDimension {
    /// Jurisdiction
    Geography,
    /// Target cohort
    Cohort,
    /// Intervention type
    InterventionType,
}

impl GapDimension {
    /// Every dimension, in reporting order
    pub const ALL: [GapDimension; 3] = [
        GapDimension::Geography,
        GapDimension::Cohort,
        GapDimension::InterventionType,
    ];

    /// Lower-case key
    pub fn key(&self) -> &'static str {
        match self {
            GapDimension::Geography => "geography",
            GapDimension::Cohort => "cohort",
            GapDimension::InterventionType => "type",
        }
    }
}

impl fmt::Display for GapDimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Gap score for one dimension value
#[derive(Debug, Clone, PartialEq)]
pub struct GapEntry {
    /// Dimension value (jurisdiction, cohort label or type label)
    pub key: String,
    /// Higher means more underserved; always in (0, coverage_ceiling]
    pub gap_score: f64,
}

/// Ranked gaps per dimension
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GapAnalysis {
    /// Gaps by jurisdiction
    pub geographic_gaps: Vec<GapEntry>,
    /// Gaps by target cohort
    pub cohort_gaps: Vec<GapEntry>,
    /// Gaps by intervention type
    pub type_gaps: Vec<GapEntry>,
}

impl GapAnalysis {
    /// Gaps for one dimension
    pub fn dimension(&self, dimension: GapDimension) -> &[GapEntry] {
        match dimension {
            GapDimension::Geography => &self.geographic_gaps,
            GapDimension::Cohort => &self.cohort_gaps,
            GapDimension::InterventionType => &self.type_gaps,
        }
    }

    /// No gaps in any dimension
    pub fn is_empty(&self) -> bool {
        GapDimension::ALL
            .iter()
            .all(|d| self.dimension(*d).is_empty())
    }
}

/// Coverage counts that remember first-seen order
#[derive(Debug, Default)]
struct Coverage {
    keys: Vec<String>,
    counts: HashMap<String, u32>,
}

impl Coverage {
    fn add(&mut self, key: &str, weight: u32) {
        match self.counts.get_mut(key) {
            Some(count) => *count = count.saturating_add(weight),
            None => {
                self.keys.push(key.to_string());
                self.counts.insert(key.to_string(), weight);
            }
        }
    }

    /// Rank by gap score, highest first; ties keep first-seen order
    fn into_gaps(self, ceiling: u32) -> Vec<GapEntry> {
        let Coverage { keys, counts } = self;
        let mut gaps: Vec<GapEntry> = keys
            .into_iter()
            .filter_map(|key| {
                let count = counts.get(&key).copied().unwrap_or(0);
                let gap = ceiling.saturating_sub(count);
                (gap > 0).then(|| GapEntry {
                    key,
                    gap_score: f64::from(gap),
                })
            })
            .collect();
        gaps.sort_by(|a, b| b.gap_score.total_cmp(&a.gap_score));
        gaps
    }
}

fn funding_weight(record: &InterventionRecord, config: &GapConfig) -> u32 {
    let weighted = record
        .current_funding
        .as_ref()
        .is_some_and(|f| f.is_gap_weighted());
    if weighted {
        config.underfunded_weight
    } else {
        1
    }
}

/// Score coverage gaps for a snapshot
///
/// Each dimension value starts at the coverage it is observed with; values
/// never seen in the snapshot are not reported. Unfunded and at-risk records
/// weigh more towards geography and cohort coverage.
///
/// # Examples
///
/// ```
/// use alma_portfolio::{find_gaps, GapConfig};
///
/// let gaps = find_gaps(&[], &GapConfig::default());
/// assert!(gaps.is_empty());
/// ```
pub fn find_gaps(snapshot: &[SnapshotEntry], config: &GapConfig) -> GapAnalysis {
    let mut geography = Coverage::default();
    let mut cohort = Coverage::default();
    let mut types = Coverage::default();

    for entry in snapshot {
        let record = &entry.record;
        let weight = funding_weight(record, config);

        for jurisdiction in &record.geography {
            geography.add(jurisdiction, weight);
        }
        for group in &record.target_cohort {
            cohort.add(group, weight);
        }
        if !record.intervention_type.trim().is_empty() {
            types.add(&record.intervention_type, 1);
        }
    }

    GapAnalysis {
        geographic_gaps: geography.into_gaps(config.coverage_ceiling),
        cohort_gaps: cohort.into_gaps(config.coverage_ceiling),
        type_gaps: types.into_gaps(config.coverage_ceiling),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alma_domain::{FundingStatus, InterventionId, PortfolioSignals};

    fn entry(
        kind: &str,
        geography: &[&str],
        cohort: &[&str],
        funding: Option<FundingStatus>,
    ) -> SnapshotEntry {
        let mut record = InterventionRecord::new(InterventionId::new(), "p", kind);
        record.geography = geography.iter().map(|s| s.to_string()).collect();
        record.target_cohort = cohort.iter().map(|s| s.to_string()).collect();
        record.current_funding = funding;
        SnapshotEntry::new(record, PortfolioSignals::default())
    }

    fn gap(gaps: &[GapEntry], key: &str) -> Option<f64> {
        gaps.iter().find(|g| g.key == key).map(|g| g.gap_score)
    }

    #[test]
    fn test_empty_snapshot() {
        assert!(find_gaps(&[], &GapConfig::default()).is_empty());
    }

    #[test]
    fn test_unfunded_weighting() {
        let snapshot = vec![entry(
            "Diversion",
            &["NSW", "VIC"],
            &["Young women"],
            Some(FundingStatus::Unfunded),
        )];
        let gaps = find_gaps(&snapshot, &GapConfig::default());
        assert_eq!(gap(&gaps.geographic_gaps, "NSW"), Some(8.0));
        assert_eq!(gap(&gaps.geographic_gaps, "VIC"), Some(8.0));
        assert_eq!(gap(&gaps.cohort_gaps, "Young women"), Some(8.0));
        // Type is never weighted
        assert_eq!(gap(&gaps.type_gaps, "Diversion"), Some(9.0));
    }

    #[test]
    fn test_pilot_seed_not_weighted() {
        let snapshot = vec![entry("Diversion", &["SA"], &[], Some(FundingStatus::PilotSeed))];
        let gaps = find_gaps(&snapshot, &GapConfig::default());
        assert_eq!(gap(&gaps.geographic_gaps, "SA"), Some(9.0));
    }

    #[test]
    fn test_saturated_values_dropped() {
        let snapshot: Vec<_> = (0..5)
            .map(|_| entry("Prevention", &["QLD"], &[], Some(FundingStatus::AtRisk)))
            .chain(std::iter::once(entry("Therapeutic", &["TAS"], &[], None)))
            .collect();
        let gaps = find_gaps(&snapshot, &GapConfig::default());
        assert_eq!(gap(&gaps.geographic_gaps, "QLD"), None);
        assert_eq!(gap(&gaps.geographic_gaps, "TAS"), Some(9.0));
        assert_eq!(gap(&gaps.type_gaps, "Prevention"), Some(5.0));
    }

    #[test]
    fn test_ranked_descending_with_first_seen_ties() {
        let snapshot = vec![
            entry("A", &["NSW"], &[], None),
            entry("B", &["NSW", "WA"], &[], None),
            entry("C", &["ACT"], &[], None),
            entry("C", &["NSW"], &[], None),
        ];
        let gaps = find_gaps(&snapshot, &GapConfig::default());
        let keys: Vec<_> = gaps.geographic_gaps.iter().map(|g| g.key.as_str()).collect();
        assert_eq!(keys, vec!["WA", "ACT", "NSW"]);
        let types: Vec<_> = gaps.type_gaps.iter().map(|g| g.key.as_str()).collect();
        assert_eq!(types, vec!["A", "B", "C"]);
    }

    #[test]
    fn test_missing_fields_contribute_nothing() {
        let snapshot = vec![entry("", &[], &[], None)];
        assert!(find_gaps(&snapshot, &GapConfig::default()).is_empty());
    }

    #[test]
    fn test_custom_ceiling() {
        let config = GapConfig {
            coverage_ceiling: 3,
            underfunded_weight: 3,
        };
        let snapshot = vec![
            entry("A", &["NT"], &[], Some(FundingStatus::Unfunded)),
            entry("A", &["WA"], &[], None),
        ];
        let gaps = find_gaps(&snapshot, &config);
        assert_eq!(gap(&gaps.geographic_gaps, "NT"), None);
        assert_eq!(gap(&gaps.geographic_gaps, "WA"), Some(2.0));
    }
}
