//! Gaps command implementation.

use crate::cli::GapsArgs;
use crate::error::Result;
use crate::output::Formatter;
use alma_domain::SignalAccessor;
use alma_portfolio::PortfolioService;
use std::fmt::Display;

/// Execute the gaps command.
pub fn execute_gaps<A>(
    args: GapsArgs,
    service: &PortfolioService<A>,
    formatter: &Formatter,
) -> Result<String>
where
    A: SignalAccessor,
    A::Error: Display,
{
    let gaps = service.identify_gaps()?;
    formatter.format_gaps(&gaps, args.dimension.map(Into::into))
}
