//! Signals command implementation.

use crate::cli::SignalsArgs;
use crate::error::{CliError, Result};
use crate::output::Formatter;
use alma_domain::{InterventionId, SignalAccessor};
use alma_portfolio::PortfolioService;
use std::fmt::Display;

/// Execute the signals command.
pub fn execute_signals<A>(
    args: SignalsArgs,
    service: &PortfolioService<A>,
    formatter: &Formatter,
) -> Result<String>
where
    A: SignalAccessor,
    A::Error: Display,
{
    let id = InterventionId::from_string(&args.id).map_err(CliError::InvalidInput)?;

    match service.signals_for(id)? {
        Some(signals) => formatter.format_signals(&id, &signals),
        None => Ok(formatter.warning(&format!("No signals recorded for {}", id))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::OutputFormat;
    use alma_domain::{InterventionRecord, PortfolioSignals, SnapshotEntry};
    use alma_store::MemoryStore;

    #[test]
    fn test_signals_lookup() {
        let id = InterventionId::new();
        let entry = SnapshotEntry::new(
            InterventionRecord::new(id, "Youth radio", "Prevention"),
            PortfolioSignals {
                portfolio_score: 0.42,
                ..Default::default()
            },
        );
        let service = PortfolioService::with_defaults(MemoryStore::with_entries(vec![entry]));
        let formatter = Formatter::new(OutputFormat::Quiet, false);

        let found = execute_signals(SignalsArgs { id: id.to_string() }, &service, &formatter).unwrap();
        assert_eq!(found, "0.42");

        let missing = execute_signals(
            SignalsArgs {
                id: InterventionId::new().to_string(),
            },
            &service,
            &formatter,
        )
        .unwrap();
        assert!(missing.starts_with("⚠ No signals recorded"));
    }

    #[test]
    fn test_malformed_id() {
        let service = PortfolioService::with_defaults(MemoryStore::new());
        let formatter = Formatter::new(OutputFormat::Table, false);
        let result = execute_signals(
            SignalsArgs {
                id: "not-a-uuid".to_string(),
            },
            &service,
            &formatter,
        );
        assert!(matches!(result, Err(CliError::InvalidInput(_))));
    }
}
