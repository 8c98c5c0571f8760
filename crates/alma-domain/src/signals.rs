//! Portfolio signals computed upstream for each intervention

/// Normalized quality signals attached to one intervention
///
/// Values are conventionally in [0.0, 1.0] but nothing here assumes it.
/// Missing upstream values are stored as 0.0. Non-finite values fail every
/// threshold comparison and rank as 0.0.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PortfolioSignals {
    /// Strength of the evidence base
    pub evidence_strength: f64,
    /// Community endorsement and governance
    pub community_authority: f64,
    /// Risk of harm (higher is riskier)
    pub harm_risk: f64,
    /// Capacity of the operator to deliver
    pub implementation_capability: f64,
    /// Learning value of funding the intervention
    pub option_value: f64,
    /// Composite ranking score
    pub portfolio_score: f64,
}

impl PortfolioSignals {
    /// Build signals from nullable upstream values (absent ⇒ 0.0)
    pub fn from_optional(
        evidence_strength: Option<f64>,
        community_authority: Option<f64>,
        harm_risk: Option<f64>,
        implementation_capability: Option<f64>,
        option_value: Option<f64>,
        portfolio_score: Option<f64>,
    ) -> Self {
        Self {
            evidence_strength: evidence_strength.unwrap_or(0.0),
            community_authority: community_authority.unwrap_or(0.0),
            harm_risk: harm_risk.unwrap_or(0.0),
            implementation_capability: implementation_capability.unwrap_or(0.0),
            option_value: option_value.unwrap_or(0.0),
            portfolio_score: portfolio_score.unwrap_or(0.0),
        }
    }

    /// Portfolio score used for ordering; non-finite and signed zero map to 0.0
    pub fn ranking_score(&self) -> f64 {
        if self.portfolio_score.is_finite() && self.portfolio_score != 0.0 {
            self.portfolio_score
        } else {
            0.0
        }
    }
}
