//! Analyze command implementation.

use super::constraints_for;
use crate::cli::AnalyzeArgs;
use crate::error::Result;
use crate::output::Formatter;
use alma_domain::SignalAccessor;
use alma_portfolio::PortfolioService;
use std::fmt::Display;

/// Execute the analyze command.
pub fn execute_analyze<A>(
    args: AnalyzeArgs,
    service: &PortfolioService<A>,
    formatter: &Formatter,
) -> Result<String>
where
    A: SignalAccessor,
    A::Error: Display,
{
    let category = args.category()?;
    let constraints = constraints_for(&args.constraints, service)?;
    let analysis = service.analyze(constraints.as_ref())?;
    formatter.format_analysis(&analysis, category)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::ConstraintArgs;
    use crate::config::OutputFormat;
    use crate::error::CliError;
    use alma_domain::{
        FundingStatus, InterventionId, InterventionRecord, PortfolioSignals, ReviewStatus,
        SnapshotEntry,
    };
    use alma_store::MemoryStore;

    fn service() -> PortfolioService<MemoryStore> {
        let mut record = InterventionRecord::new(InterventionId::new(), "Bail support", "Diversion");
        record.review_status = ReviewStatus::Approved;
        record.current_funding = Some(FundingStatus::PilotSeed);
        let entry = SnapshotEntry::new(
            record,
            PortfolioSignals {
                evidence_strength: 0.8,
                ..Default::default()
            },
        );
        PortfolioService::with_defaults(MemoryStore::with_entries(vec![entry]))
    }

    #[test]
    fn test_analyze_one_category() {
        let args = AnalyzeArgs {
            category: Some("underfunded_high_evidence".to_string()),
            constraints: ConstraintArgs::default(),
        };
        let formatter = Formatter::new(OutputFormat::Table, false);
        let output = execute_analyze(args, &service(), &formatter).unwrap();
        assert!(output.contains("Bail support"));
        assert!(!output.contains("Learning opportunities"));
    }

    #[test]
    fn test_invalid_override_rejected() {
        let args = AnalyzeArgs {
            category: None,
            constraints: ConstraintArgs {
                max_untested: Some(-0.5),
                ..Default::default()
            },
        };
        let formatter = Formatter::new(OutputFormat::Table, false);
        assert!(matches!(
            execute_analyze(args, &service(), &formatter),
            Err(CliError::InvalidInput(_))
        ));
    }
}
