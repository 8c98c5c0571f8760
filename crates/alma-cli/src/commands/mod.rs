//! Command implementations.
//!
//! Each command returns the text to print so it can be exercised without a
//! terminal.

pub mod analyze;
pub mod build;
pub mod gaps;
pub mod import;
pub mod signals;

pub use self::analyze::execute_analyze;
pub use self::build::execute_build;
pub use self::gaps::execute_gaps;
pub use self::import::execute_import;
pub use self::signals::execute_signals;

use crate::cli::{Command, ConstraintArgs};
use crate::error::{CliError, Result};
use crate::output::Formatter;
use alma_domain::{PortfolioConstraints, SignalAccessor};
use alma_portfolio::PortfolioService;
use std::fmt::Display;

/// Run a command that reads from a data source.
pub fn execute<A>(
    command: Command,
    service: &PortfolioService<A>,
    formatter: &Formatter,
) -> Result<String>
where
    A: SignalAccessor,
    A::Error: Display,
{
    match command {
        Command::Analyze(args) => execute_analyze(args, service, formatter),
        Command::Build(args) => execute_build(args, service, formatter),
        Command::Gaps(args) => execute_gaps(args, service, formatter),
        Command::Signals(args) => execute_signals(args, service, formatter),
        Command::Import(_) => Err(CliError::InvalidInput(
            "import writes to a database and does not read a data source".to_string(),
        )),
    }
}

/// Constraint overrides layered on the configured constraints, if any were given.
fn constraints_for<A>(
    args: &ConstraintArgs,
    service: &PortfolioService<A>,
) -> Result<Option<PortfolioConstraints>>
where
    A: SignalAccessor,
    A::Error: Display,
{
    if args.is_empty() {
        return Ok(None);
    }
    let base = service.config().constraints.to_constraints();
    args.apply(base).map(Some)
}
