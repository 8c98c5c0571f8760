//! Portfolio builder: turns categorized opportunities into a budget allocation
//!
//! Buckets are filled in policy order. Each bucket takes a fixed share of the
//! total budget and splits it evenly over the top records of its category.
//! Buckets are independent, so a record listed in two categories is funded
//! once per bucket it appears in.

use crate::{AllocationPolicy, OpportunityCategory, PortfolioAnalysis};
use alma_domain::InterventionRecord;
use std::collections::BTreeMap;

/// One funded intervention
#[derive(Debug, Clone, PartialEq)]
pub struct AllocationEntry {
    /// The intervention
    pub record: InterventionRecord,
    /// Bucket the allocation came from
    pub bucket: OpportunityCategory,
    /// Amount allocated
    pub allocation: f64,
    /// Allocation as a percentage of total budget
    pub percentage: f64,
    /// Fixed rationale of the bucket
    pub rationale: &'static str,
}

/// Allocation summed by dimension value
///
/// `by_geography` counts a multi-jurisdiction record's full allocation under
/// each of its jurisdictions, so its values can sum to more than the total.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Diversification {
    /// Keyed by intervention type
    pub by_type: BTreeMap<String, f64>,
    /// Keyed by jurisdiction
    pub by_geography: BTreeMap<String, f64>,
    /// Keyed by evidence level label ("Unknown" when absent)
    pub by_evidence_level: BTreeMap<String, f64>,
}

/// Result of building a portfolio
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AllocationPlan {
    /// Budget the plan was built for
    pub total_budget: f64,
    /// Allocations in bucket order
    pub entries: Vec<AllocationEntry>,
    /// Sum of allocations, never more than the budget
    pub total_allocated: f64,
    /// Breakdown by type, geography and evidence level
    pub diversification: Diversification,
}

impl AllocationPlan {
    /// Budget left unallocated
    pub fn unallocated(&self) -> f64 {
        if self.total_budget > 0.0 {
            self.total_budget - self.total_allocated
        } else {
            0.0
        }
    }

    /// Entries drawn from one bucket
    pub fn entries_for(&self, bucket: OpportunityCategory) -> impl Iterator<Item = &AllocationEntry> {
        self.entries.iter().filter(move |e| e.bucket == bucket)
    }
}

/// Build an allocation plan from an analysis
///
/// A budget that is zero, negative or not finite yields entries with zero
/// allocation rather than an error.
pub fn build_allocation(
    total_budget: f64,
    analysis: &PortfolioAnalysis,
    policy: &AllocationPolicy,
) -> AllocationPlan {
    let fundable = total_budget.is_finite() && total_budget > 0.0;
    let mut remaining = if fundable { total_budget } else { 0.0 };
    let mut entries = Vec::new();

    for bucket in &policy.buckets {
        let candidates: Vec<_> = analysis
            .category(bucket.category)
            .iter()
            .take(bucket.max_records)
            .collect();
        if candidates.is_empty() {
            continue;
        }

        let per_record = if fundable {
            total_budget * bucket.share / candidates.len() as f64
        } else {
            0.0
        };

        for score in candidates {
            // Guard against rounding pushing the running total past the budget
            let allocation = per_record.min(remaining).max(0.0);
            remaining -= allocation;

            let percentage = if fundable {
                allocation / total_budget * 100.0
            } else {
                0.0
            };

            entries.push(AllocationEntry {
                record: score.record.clone(),
                bucket: bucket.category,
                allocation,
                percentage,
                rationale: bucket.category.allocation_rationale(),
            });
        }
    }

    let summed: f64 = entries.iter().map(|e| e.allocation).sum();
    let total_allocated = if fundable { summed.min(total_budget) } else { 0.0 };
    let diversification = diversify(&entries);

    AllocationPlan {
        total_budget,
        entries,
        total_allocated,
        diversification,
    }
}

/// Sum allocations by type, geography and evidence level
pub fn diversify(entries: &[AllocationEntry]) -> Diversification {
    let mut diversification = Diversification::default();

    for entry in entries {
        let record = &entry.record;

        let type_key = if record.intervention_type.trim().is_empty() {
            "Unknown"
        } else {
            record.intervention_type.as_str()
        };
        *diversification
            .by_type
            .entry(type_key.to_string())
            .or_insert(0.0) += entry.allocation;

        for jurisdiction in &record.geography {
            *diversification
                .by_geography
                .entry(jurisdiction.clone())
                .or_insert(0.0) += entry.allocation;
        }

        *diversification
            .by_evidence_level
            .entry(record.evidence_label().to_string())
            .or_insert(0.0) += entry.allocation;
    }

    diversification
}


#[cfg(test)]
mod proptests {
    use super::*;
    use alma_domain::{assess, InterventionId, PortfolioSignals, SnapshotEntry};
    use proptest::prelude::*;

    fn scores(n: usize, offset: u128) -> Vec<alma_domain::InterventionScore> {
        (0..n)
            .map(|i| {
                let record = InterventionRecord::new(
                    InterventionId::from_value(offset + i as u128),
                    "p",
                    "Diversion",
                );
                assess(&SnapshotEntry::new(record, PortfolioSignals::default()))
            })
            .collect()
    }

    proptest! {
        /// Property: total allocated never exceeds a non-negative budget
        #[test]
        fn test_total_within_budget(
            budget in 0.0f64..1e12,
            ready in 0usize..12,
            underfunded in 0usize..12,
            learning in 0usize..12,
        ) {
            let analysis = PortfolioAnalysis {
                ready_to_scale: scores(ready, 0),
                underfunded_high_evidence: scores(underfunded, 1000),
                learning_opportunities: scores(learning, 2000),
                ..Default::default()
            };
            let plan = build_allocation(budget, &analysis, &AllocationPolicy::default());
            prop_assert!(plan.total_allocated <= budget,
                "allocated {} of {}", plan.total_allocated, budget);
            prop_assert!(plan.entries.iter().all(|e| e.allocation >= 0.0));
            if ready + underfunded + learning == 0 {
                prop_assert!(plan.entries.is_empty());
                prop_assert_eq!(plan.total_allocated, 0.0);
            }
        }
    }
}
