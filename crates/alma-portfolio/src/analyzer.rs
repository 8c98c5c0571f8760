//! Portfolio analyzer: partitions a snapshot into opportunity categories

use crate::{AnalyzerConfig, OpportunityCategory};
use alma_domain::{assess, InterventionScore, SnapshotEntry};

/// Categorized view of a snapshot
///
/// Each list holds at most `category_limit` assessments, highest portfolio
/// score first.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PortfolioAnalysis {
    /// Strong evidence, little or precarious funding
    pub underfunded_high_evidence: Vec<InterventionScore>,
    /// Weak evidence but strong community backing and option value
    pub promising_but_unproven: Vec<InterventionScore>,
    /// Strong evidence and authority with a replication playbook
    pub ready_to_scale: Vec<InterventionScore>,
    /// High harm risk or cultural review outstanding
    pub high_risk_flagged: Vec<InterventionScore>,
    /// Untested programs worth evaluating
    pub learning_opportunities: Vec<InterventionScore>,
}

impl PortfolioAnalysis {
    /// Entries in one category
    pub fn category(&self, category: OpportunityCategory) -> &[InterventionScore] {
        match category {
            OpportunityCategory::UnderfundedHighEvidence => &self.underfunded_high_evidence,
            OpportunityCategory::PromisingButUnproven => &self.promising_but_unproven,
            OpportunityCategory::ReadyToScale => &self.ready_to_scale,
            OpportunityCategory::HighRiskFlagged => &self.high_risk_flagged,
            OpportunityCategory::LearningOpportunities => &self.learning_opportunities,
        }
    }

    fn category_mut(&mut self, category: OpportunityCategory) -> &mut Vec<InterventionScore> {
        match category {
            OpportunityCategory::UnderfundedHighEvidence => &mut self.underfunded_high_evidence,
            OpportunityCategory::PromisingButUnproven => &mut self.promising_but_unproven,
            OpportunityCategory::ReadyToScale => &mut self.ready_to_scale,
            OpportunityCategory::HighRiskFlagged => &mut self.high_risk_flagged,
            OpportunityCategory::LearningOpportunities => &mut self.learning_opportunities,
        }
    }

    /// All five categories are empty
    pub fn is_empty(&self) -> bool {
        OpportunityCategory::ALL
            .iter()
            .all(|c| self.category(*c).is_empty())
    }

    /// Per-category sizes, in reporting order
    pub fn sizes(&self) -> [(OpportunityCategory, usize); 5] {
        OpportunityCategory::ALL.map(|c| (c, self.category(c).len()))
    }
}

/// Order entries by portfolio score, highest first
///
/// Missing or non-finite scores rank as 0.0; ties keep input order.
pub fn rank_by_portfolio_score(snapshot: &[SnapshotEntry]) -> Vec<&SnapshotEntry> {
    let mut ranked: Vec<&SnapshotEntry> = snapshot.iter().collect();
    ranked.sort_by(|a, b| {
        b.signals
            .ranking_score()
            .total_cmp(&a.signals.ranking_score())
    });
    ranked
}

/// Assess every entry and sort it into the categories it qualifies for
///
/// # Examples
///
/// ```
/// use alma_portfolio::{analyze_snapshot, AnalyzerConfig};
///
/// let analysis = analyze_snapshot(&[], &AnalyzerConfig::default());
/// assert!(analysis.is_empty());
/// ```
pub fn analyze_snapshot(snapshot: &[SnapshotEntry], config: &AnalyzerConfig) -> PortfolioAnalysis {
    let mut analysis = PortfolioAnalysis::default();

    for entry in rank_by_portfolio_score(snapshot) {
        let categories: Vec<OpportunityCategory> = OpportunityCategory::ALL
            .into_iter()
            .filter(|c| analysis.category(*c).len() < config.category_limit)
            .filter(|c| c.matches(&entry.record, &entry.signals))
            .collect();

        if categories.is_empty() {
            continue;
        }

        let score = assess(entry);
        for category in categories {
            analysis.category_mut(category).push(score.clone());
        }
    }

    analysis
}
