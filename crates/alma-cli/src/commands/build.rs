//! Build command implementation.

use super::constraints_for;
use crate::cli::BuildArgs;
use crate::error::{CliError, Result};
use crate::output::Formatter;
use alma_domain::SignalAccessor;
use alma_portfolio::PortfolioService;
use std::fmt::Display;

/// Execute the build command.
pub fn execute_build<A>(
    args: BuildArgs,
    service: &PortfolioService<A>,
    formatter: &Formatter,
) -> Result<String>
where
    A: SignalAccessor,
    A::Error: Display,
{
    if !args.budget.is_finite() || args.budget < 0.0 {
        return Err(CliError::InvalidInput(format!(
            "Budget must be a non-negative amount, got {}",
            args.budget
        )));
    }

    let constraints = constraints_for(&args.constraints, service)?;
    let plan = service.build_portfolio(args.budget, constraints.as_ref())?;
    formatter.format_plan(&plan)
}
