//! Confidence and risk assessment for a single intervention
//!
//! Derives a heuristic confidence score plus recommendation and risk flags
//! from a record's attributes and signals. Pure and infallible: absent
//! optional fields simply do not contribute.

use crate::{
    EvidenceLevel, FundingStatus, HarmRiskLevel, InterventionRecord, PortfolioSignals, Scalability,
    SnapshotEntry,
};
use std::fmt;

/// Starting confidence before any adjustment
pub const BASE_CONFIDENCE: f64 = 0.5;

/// Boost for proven evidence
pub const PROVEN_BOOST: f64 = 0.3;

/// Boost for effective evidence
pub const EFFECTIVE_BOOST: f64 = 0.2;

/// Boost for Indigenous-led evidence
pub const INDIGENOUS_LED_BOOST: f64 = 0.25;

/// Boost when cultural authority is recorded
pub const CULTURAL_AUTHORITY_BOOST: f64 = 0.1;

/// Boost for programs operating longer than [`ESTABLISHED_YEARS`]
pub const LONGEVITY_BOOST: f64 = 0.1;

/// Years of operation after which the longevity boost applies
pub const ESTABLISHED_YEARS: u32 = 5;

/// Penalty for high harm risk
pub const HIGH_HARM_PENALTY: f64 = 0.2;

/// Portfolio score above which an unfunded program is recommended for funding
pub const FUND_SCORE_THRESHOLD: f64 = 0.7;

/// Community authority above which an untested program is worth evaluating
pub const LEARN_AUTHORITY_THRESHOLD: f64 = 0.7;

/// Action recommended for an intervention
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Recommendation {
    /// Unfunded with a high portfolio score
    Fund,
    /// At risk of closure
    Urgent,
    /// Ready for replication
    Scale,
    /// Untested but strongly endorsed; invest in evaluation
    Learn,
    /// High harm risk; mitigation plan required
    Caution,
    /// Cultural safety assessment required
    Review,
}

impl Recommendation {
    /// Short upper-case code
    pub fn code(&self) -> &'static str {
        match self {
            Recommendation::Fund => "FUND",
            Recommendation::Urgent => "URGENT",
            Recommendation::Scale => "SCALE",
            Recommendation::Learn => "LEARN",
            Recommendation::Caution => "CAUTION",
            Recommendation::Review => "REVIEW",
        }
    }

    fn detail(&self) -> &'static str {
        match self {
            Recommendation::Fund => "High portfolio score but unfunded",
            Recommendation::Urgent => "Intervention at risk of closure",
            Recommendation::Scale => "Ready for replication with playbook",
            Recommendation::Learn => "Strong community endorsement, invest in evaluation",
            Recommendation::Caution => "High harm risk - require mitigation plan",
            Recommendation::Review => "Requires cultural safety assessment",
        }
    }
}

impl fmt::Display for Recommendation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code(), self.detail())
    }
}

/// A risk identified for an intervention
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum RiskFlag {
    /// Risk text recorded upstream
    Reported(String),
    /// Harm risk level is High
    HighHarm,
    /// Claims replication readiness while only scaling locally
    ReadinessScalabilityMismatch,
    /// Indigenous-led without recorded cultural authority
    MissingCulturalAuthority,
}

impl fmt::Display for RiskFlag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RiskFlag::Reported(text) => f.write_str(text),
            RiskFlag::HighHarm => f.write_str("High harm risk identified"),
            RiskFlag::ReadinessScalabilityMismatch => {
                f.write_str("Marked as replication-ready but scalability is local only")
            }
            RiskFlag::MissingCulturalAuthority => {
                f.write_str("Indigenous-led but no cultural authority specified")
            }
        }
    }
}

/// Assessment of one intervention, built fresh for every call
#[derive(Debug, Clone, PartialEq)]
pub struct InterventionScore {
    /// The intervention
    pub record: InterventionRecord,
    /// Its upstream signals
    pub signals: PortfolioSignals,
    /// Heuristic confidence in [0.0, 1.0]
    pub confidence: f64,
    /// Recommended actions, in rule order
    pub recommendations: Vec<Recommendation>,
    /// Identified risks, in rule order
    pub risks: Vec<RiskFlag>,
}

/// Assess a snapshot entry
///
/// # Examples
///
/// ```
/// use alma_domain::{assess, EvidenceLevel, InterventionId, InterventionRecord, PortfolioSignals, SnapshotEntry};
///
/// let mut record = InterventionRecord::new(InterventionId::new(), "Bush camp", "Cultural Connection");
/// record.evidence_level = Some(EvidenceLevel::Proven);
///
/// let score = assess(&SnapshotEntry::new(record, PortfolioSignals::default()));
/// assert!((score.confidence - 0.8).abs() < 1e-9);
/// ```
pub fn assess(entry: &SnapshotEntry) -> InterventionScore {
    InterventionScore {
        record: entry.record.clone(),
        signals: entry.signals,
        confidence: compute_confidence(&entry.record),
        recommendations: recommend(&entry.record, &entry.signals),
        risks: identify_risks(&entry.record),
    }
}

/// Additive confidence heuristic, clamped to [0.0, 1.0]
pub fn compute_confidence(record: &InterventionRecord) -> f64 {
    let mut confidence = BASE_CONFIDENCE;

    // Only the first matching evidence rule applies
    confidence += match record.evidence_level {
        Some(EvidenceLevel::Proven) => PROVEN_BOOST,
        Some(EvidenceLevel::Effective) => EFFECTIVE_BOOST,
        Some(EvidenceLevel::IndigenousLed) => INDIGENOUS_LED_BOOST,
        _ => 0.0,
    };

    if record.has_cultural_authority() {
        confidence += CULTURAL_AUTHORITY_BOOST;
    }

    if record.years_operating.is_some_and(|years| years > ESTABLISHED_YEARS) {
        confidence += LONGEVITY_BOOST;
    }

    if record.harm_risk_is(&HarmRiskLevel::High) {
        confidence -= HIGH_HARM_PENALTY;
    }

    confidence.clamp(0.0, 1.0)
}

/// Evaluate every recommendation rule independently
pub fn recommend(record: &InterventionRecord, signals: &PortfolioSignals) -> Vec<Recommendation> {
    let mut recommendations = Vec::new();

    if record.funding_is(&FundingStatus::Unfunded) && signals.portfolio_score > FUND_SCORE_THRESHOLD {
        recommendations.push(Recommendation::Fund);
    }

    if record.funding_is(&FundingStatus::AtRisk) {
        recommendations.push(Recommendation::Urgent);
    }

    if record
        .replication_readiness
        .as_ref()
        .is_some_and(|r| r.is_ready())
    {
        recommendations.push(Recommendation::Scale);
    }

    if record.evidence_is(&EvidenceLevel::Untested)
        && signals.community_authority > LEARN_AUTHORITY_THRESHOLD
    {
        recommendations.push(Recommendation::Learn);
    }

    if record.harm_risk_is(&HarmRiskLevel::High) {
        recommendations.push(Recommendation::Caution);
    }

    if record.harm_risk_is(&HarmRiskLevel::RequiresCulturalReview) {
        recommendations.push(Recommendation::Review);
    }

    recommendations
}

/// Collect reported and derived risks
pub fn identify_risks(record: &InterventionRecord) -> Vec<RiskFlag> {
    let mut risks = Vec::new();

    if let Some(reported) = record.risks.as_deref().filter(|s| !s.trim().is_empty()) {
        risks.push(RiskFlag::Reported(reported.to_string()));
    }

    if record.harm_risk_is(&HarmRiskLevel::High) {
        risks.push(RiskFlag::HighHarm);
    }

    let local_only = record.scalability.as_ref() == Some(&Scalability::LocalOnly);
    let claims_ready = record
        .replication_readiness
        .as_ref()
        .is_some_and(|r| r.is_ready());
    if local_only && claims_ready {
        risks.push(RiskFlag::ReadinessScalabilityMismatch);
    }

    if record.evidence_is(&EvidenceLevel::IndigenousLed) && !record.has_cultural_authority() {
        risks.push(RiskFlag::MissingCulturalAuthority);
    }

    risks
}
