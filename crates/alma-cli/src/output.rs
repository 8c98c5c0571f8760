//! Output formatting for the CLI.

use crate::config::OutputFormat;
use crate::error::Result;
use alma_domain::{InterventionId, InterventionScore, PortfolioSignals};
use alma_portfolio::{
    AllocationEntry, AllocationPlan, GapAnalysis, GapDimension, GapEntry, OpportunityCategory,
    PortfolioAnalysis,
};
use colored::*;
use serde_json::{json, Map, Value};
use std::collections::BTreeMap;
use tabled::{
    builder::Builder,
    settings::{object::Rows, Alignment, Modify, Style},
};

/// Output formatter.
pub struct Formatter {
    format: OutputFormat,
    color_enabled: bool,
}

fn short_id(id: &InterventionId) -> String {
    id.to_string().chars().take(8).collect()
}

fn money(amount: f64) -> String {
    format!("{:.2}", amount)
}

fn score_json(score: &InterventionScore) -> Value {
    let record = &score.record;
    json!({
        "id": record.id.to_string(),
        "name": record.name,
        "type": record.intervention_type,
        "evidence_level": record.evidence_level.as_ref().map(|e| e.label().to_string()),
        "portfolio_score": score.signals.portfolio_score,
        "confidence": score.confidence,
        "recommendations": score.recommendations.iter().map(|r| r.to_string()).collect::<Vec<_>>(),
        "risks": score.risks.iter().map(|r| r.to_string()).collect::<Vec<_>>(),
    })
}

fn entry_json(entry: &AllocationEntry) -> Value {
    json!({
        "id": entry.record.id.to_string(),
        "name": entry.record.name,
        "bucket": entry.bucket.key(),
        "allocation": entry.allocation,
        "percentage": entry.percentage,
        "rationale": entry.rationale,
    })
}

fn gaps_json(gaps: &[GapEntry]) -> Value {
    Value::Array(
        gaps.iter()
            .map(|g| json!({ "key": g.key, "gap_score": g.gap_score }))
            .collect(),
    )
}

fn gap_field(dimension: GapDimension) -> &'static str {
    match dimension {
        GapDimension::Geography => "geographic_gaps",
        GapDimension::Cohort => "cohort_gaps",
        GapDimension::InterventionType => "type_gaps",
    }
}

fn gap_title(dimension: GapDimension) -> &'static str {
    match dimension {
        GapDimension::Geography => "Geographic gaps",
        GapDimension::Cohort => "Cohort gaps",
        GapDimension::InterventionType => "Program type gaps",
    }
}

impl Formatter {
    /// Create a new formatter.
    pub fn new(format: OutputFormat, color_enabled: bool) -> Self {
        Self {
            format,
            color_enabled,
        }
    }

    /// Format a portfolio analysis, optionally limited to one category.
    pub fn format_analysis(
        &self,
        analysis: &PortfolioAnalysis,
        only: Option<OpportunityCategory>,
    ) -> Result<String> {
        let categories: Vec<OpportunityCategory> = match only {
            Some(category) => vec![category],
            None => OpportunityCategory::ALL.to_vec(),
        };

        match self.format {
            OutputFormat::Json => {
                let mut object = Map::new();
                for category in &categories {
                    let scores = analysis.category(*category).iter().map(score_json).collect();
                    object.insert(category.key().to_string(), Value::Array(scores));
                }
                Ok(serde_json::to_string_pretty(&Value::Object(object))?)
            }
            OutputFormat::Table => {
                let sections: Vec<String> = categories
                    .iter()
                    .map(|c| self.scores_table(c.title(), analysis.category(*c)))
                    .collect();
                Ok(sections.join("\n\n"))
            }
            OutputFormat::Quiet => {
                let ids: Vec<String> = categories
                    .iter()
                    .flat_map(|c| analysis.category(*c))
                    .map(|s| s.record.id.to_string())
                    .collect();
                Ok(ids.join("\n"))
            }
        }
    }

    fn scores_table(&self, title: &str, scores: &[InterventionScore]) -> String {
        let heading = self.colorize(&format!("{} ({})", title, scores.len()), "cyan");
        if scores.is_empty() {
            return format!("{}\n{}", heading, self.colorize("No interventions.", "yellow"));
        }

        let mut builder = Builder::default();
        builder.push_record(["ID", "Name", "Type", "Score", "Confidence", "Recommendations", "Risks"]);

        for score in scores {
            let codes: Vec<&str> = score.recommendations.iter().map(|r| r.code()).collect();
            let risks: Vec<String> = score.risks.iter().map(|r| r.to_string()).collect();
            builder.push_record([
                short_id(&score.record.id),
                score.record.name.clone(),
                score.record.intervention_type.clone(),
                format!("{:.2}", score.signals.portfolio_score),
                format!("{:.2}", score.confidence),
                codes.join(", "),
                risks.join("; "),
            ]);
        }

        format!("{}\n{}", heading, self.render(builder))
    }

    /// Format an allocation plan.
    pub fn format_plan(&self, plan: &AllocationPlan) -> Result<String> {
        match self.format {
            OutputFormat::Json => {
                let d = &plan.diversification;
                let value = json!({
                    "totalBudget": plan.total_budget,
                    "interventions": plan.entries.iter().map(entry_json).collect::<Vec<_>>(),
                    "totalAllocated": plan.total_allocated,
                    "diversification": {
                        "byType": d.by_type,
                        "byGeography": d.by_geography,
                        "byEvidenceLevel": d.by_evidence_level,
                    },
                });
                Ok(serde_json::to_string_pretty(&value)?)
            }
            OutputFormat::Table => self.plan_table(plan),
            OutputFormat::Quiet => {
                let lines: Vec<String> = plan
                    .entries
                    .iter()
                    .map(|e| format!("{}\t{}", e.record.id, money(e.allocation)))
                    .collect();
                Ok(lines.join("\n"))
            }
        }
    }

    fn plan_table(&self, plan: &AllocationPlan) -> Result<String> {
        if plan.entries.is_empty() {
            return Ok(self.colorize("No interventions qualified for allocation.", "yellow"));
        }

        let mut builder = Builder::default();
        builder.push_record(["ID", "Name", "Bucket", "Allocation", "%", "Rationale"]);
        for entry in &plan.entries {
            builder.push_record([
                short_id(&entry.record.id),
                entry.record.name.clone(),
                entry.bucket.title().to_string(),
                money(entry.allocation),
                format!("{:.1}", entry.percentage),
                entry.rationale.to_string(),
            ]);
        }

        let summary = format!(
            "Total allocated: {} of {} ({} unallocated)",
            money(plan.total_allocated),
            money(plan.total_budget),
            money(plan.unallocated())
        );

        let d = &plan.diversification;
        let sections = [
            self.render(builder),
            self.colorize(&summary, "green"),
            self.breakdown_table("By type", &d.by_type),
            self.breakdown_table("By geography", &d.by_geography),
            self.breakdown_table("By evidence level", &d.by_evidence_level),
        ];
        Ok(sections.join("\n\n"))
    }

    fn breakdown_table(&self, title: &str, amounts: &BTreeMap<String, f64>) -> String {
        let heading = self.colorize(title, "cyan");
        if amounts.is_empty() {
            return format!("{}\n{}", heading, self.colorize("None.", "yellow"));
        }

        let mut builder = Builder::default();
        builder.push_record(["Key", "Amount"]);
        for (key, amount) in amounts {
            builder.push_record([key.clone(), money(*amount)]);
        }
        format!("{}\n{}", heading, self.render(builder))
    }

    /// Format gap analysis, optionally limited to one dimension.
    pub fn format_gaps(&self, gaps: &GapAnalysis, only: Option<GapDimension>) -> Result<String> {
        let dimensions: Vec<GapDimension> = match only {
            Some(dimension) => vec![dimension],
            None => GapDimension::ALL.to_vec(),
        };

        match self.format {
            OutputFormat::Json => {
                let mut object = Map::new();
                for dimension in &dimensions {
                    object.insert(gap_field(*dimension).to_string(), gaps_json(gaps.dimension(*dimension)));
                }
                Ok(serde_json::to_string_pretty(&Value::Object(object))?)
            }
            OutputFormat::Table => {
                let sections: Vec<String> = dimensions
                    .iter()
                    .map(|d| self.gaps_table(gap_title(*d), gaps.dimension(*d)))
                    .collect();
                Ok(sections.join("\n\n"))
            }
            OutputFormat::Quiet => {
                let keys: Vec<&str> = dimensions
                    .iter()
                    .flat_map(|d| gaps.dimension(*d))
                    .map(|g| g.key.as_str())
                    .collect();
                Ok(keys.join("\n"))
            }
        }
    }

    fn gaps_table(&self, title: &str, gaps: &[GapEntry]) -> String {
        let heading = self.colorize(title, "cyan");
        if gaps.is_empty() {
            return format!("{}\n{}", heading, self.colorize("No gaps found.", "yellow"));
        }

        let mut builder = Builder::default();
        builder.push_record(["Key", "Gap score"]);
        for gap in gaps {
            builder.push_record([gap.key.clone(), format!("{:.0}", gap.gap_score)]);
        }
        format!("{}\n{}", heading, self.render(builder))
    }

    /// Format the signals of one intervention.
    pub fn format_signals(&self, id: &InterventionId, signals: &PortfolioSignals) -> Result<String> {
        let rows = [
            ("evidence_strength", signals.evidence_strength),
            ("community_authority", signals.community_authority),
            ("harm_risk", signals.harm_risk),
            ("implementation_capability", signals.implementation_capability),
            ("option_value", signals.option_value),
            ("portfolio_score", signals.portfolio_score),
        ];

        match self.format {
            OutputFormat::Json => {
                let mut object = Map::new();
                object.insert("id".to_string(), json!(id.to_string()));
                for (name, value) in rows {
                    object.insert(name.to_string(), json!(value));
                }
                Ok(serde_json::to_string_pretty(&Value::Object(object))?)
            }
            OutputFormat::Table => {
                let mut builder = Builder::default();
                builder.push_record(["Signal", "Value"]);
                for (name, value) in rows {
                    builder.push_record([name.to_string(), format!("{:.3}", value)]);
                }
                Ok(format!("{}\n{}", self.colorize(&id.to_string(), "cyan"), self.render(builder)))
            }
            OutputFormat::Quiet => Ok(format!("{}", signals.portfolio_score)),
        }
    }

    fn render(&self, builder: Builder) -> String {
        let mut table = builder.build();
        table
            .with(Style::rounded())
            .with(Modify::new(Rows::first()).with(Alignment::center()));
        table.to_string()
    }

    /// Format a success message.
    pub fn success(&self, message: &str) -> String {
        self.colorize(&format!("✓ {}", message), "green")
    }

    /// Format a warning message.
    pub fn warning(&self, message: &str) -> String {
        self.colorize(&format!("⚠ {}", message), "yellow")
    }

    /// Colorize text if color is enabled.
    fn colorize(&self, text: &str, color: &str) -> String {
        if !self.color_enabled {
            return text.to_string();
        }

        match color {
            "red" => text.red().to_string(),
            "green" => text.green().to_string(),
            "yellow" => text.yellow().to_string(),
            "cyan" => text.cyan().to_string(),
            _ => text.to_string(),
        }
    }
}
