//! CLI command definitions and argument parsing.

use crate::error::{CliError, Result};
use alma_domain::{HarmRiskLevel, PortfolioConstraints};
use alma_portfolio::{GapDimension, OpportunityCategory};
use clap::{Args, Parser, Subcommand};

/// ALMA - Portfolio analysis and allocation for youth justice interventions.
#[derive(Debug, Parser)]
#[command(name = "alma")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Output format
    #[arg(short, long, value_enum, global = true)]
    pub format: Option<CliFormat>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Configuration file path
    #[arg(short, long, global = true, env = "ALMA_CONFIG")]
    pub config: Option<String>,

    /// SQLite database with intervention rows
    #[arg(long, global = true, conflicts_with = "snapshot")]
    pub db: Option<String>,

    /// JSON snapshot of intervention rows
    #[arg(long, global = true)]
    pub snapshot: Option<String>,

    /// Log debug output to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Output format options.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum CliFormat {
    /// Table format (default)
    Table,
    /// JSON format
    Json,
    /// Quiet format (IDs only)
    Quiet,
}

/// CLI commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Sort interventions into opportunity categories
    Analyze(AnalyzeArgs),

    /// Allocate a budget across the portfolio
    Build(BuildArgs),

    /// Rank underserved jurisdictions, cohorts and program types
    Gaps(GapsArgs),

    /// Show the signals of one intervention
    Signals(SignalsArgs),

    /// Load upstream rows from a JSON file into the database
    Import(ImportArgs),
}

/// Per-call constraint overrides.
#[derive(Debug, Clone, Default, Args)]
pub struct ConstraintArgs {
    /// Maximum fraction of budget for untested interventions (0.0-1.0)
    #[arg(long)]
    pub max_untested: Option<f64>,

    /// Minimum fraction of budget for community-endorsed interventions (0.0-1.0)
    #[arg(long)]
    pub min_community: Option<f64>,

    /// Highest tolerated harm risk (e.g. "Low", "Medium", "High")
    #[arg(long)]
    pub harm_risk_cap: Option<String>,
}

impl ConstraintArgs {
    /// Whether any override was given
    pub fn is_empty(&self) -> bool {
        self.max_untested.is_none() && self.min_community.is_none() && self.harm_risk_cap.is_none()
    }

    /// Apply the overrides on top of base constraints
    pub fn apply(&self, base: PortfolioConstraints) -> Result<PortfolioConstraints> {
        let mut constraints = base;
        if let Some(value) = self.max_untested {
            constraints.max_untested_allocation = value;
        }
        if let Some(value) = self.min_community {
            constraints.min_community_endorsed = value;
        }
        if let Some(level) = &self.harm_risk_cap {
            if level.trim().is_empty() {
                return Err(CliError::InvalidInput("Harm risk cap cannot be empty".to_string()));
            }
            constraints.harm_risk_cap = HarmRiskLevel::from_upstream(level);
        }
        constraints.validate().map_err(CliError::InvalidInput)?;
        Ok(constraints)
    }
}

/// Arguments for the analyze command.
#[derive(Debug, Parser)]
pub struct AnalyzeArgs {
    /// Show a single category (e.g. ready_to_scale)
    #[arg(long)]
    pub category: Option<String>,

    #[command(flatten)]
    pub constraints: ConstraintArgs,
}

impl AnalyzeArgs {
    /// Parse the category filter
    pub fn category(&self) -> Result<Option<OpportunityCategory>> {
        self.category
            .as_deref()
            .map(|c| c.parse::<OpportunityCategory>().map_err(CliError::InvalidInput))
            .transpose()
    }
}

/// Arguments for the build command.
#[derive(Debug, Parser)]
pub struct BuildArgs {
    /// Total budget to allocate
    #[arg(short, long, allow_negative_numbers = true)]
    pub budget: f64,

    #[command(flatten)]
    pub constraints: ConstraintArgs,
}

/// Arguments for the gaps command.
#[derive(Debug, Parser)]
pub struct GapsArgs {
    /// Show a single dimension
    #[arg(short, long, value_enum)]
    pub dimension: Option<DimensionArg>,
}

/// Arguments for the signals command.
#[derive(Debug, Parser)]
pub struct SignalsArgs {
    /// Intervention ID (UUID)
    pub id: String,
}

/// Arguments for the import command.
#[derive(Debug, Parser)]
pub struct ImportArgs {
    /// JSON file holding an array of intervention rows
    pub file: String,
}

/// Gap dimension argument.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum DimensionArg {
    /// Jurisdictions
    Geography,
    /// Target cohorts
    Cohort,
    /// Program types
    Type,
}

impl From<CliFormat> for crate::config::OutputFormat {
    fn from(format: CliFormat) -> Self {
        match format {
            CliFormat::Table => crate::config::OutputFormat::Table,
            CliFormat::Json => crate::config::OutputFormat::Json,
            CliFormat::Quiet => crate::config::OutputFormat::Quiet,
        }
    }
}

impl From<DimensionArg> for GapDimension {
    fn from(dimension: DimensionArg) -> Self {
        match dimension {
            DimensionArg::Geography => GapDimension::Geography,
            DimensionArg::Cohort => GapDimension::Cohort,
            DimensionArg::Type => GapDimension::InterventionType,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_analyze_command() {
        let cli = Cli::parse_from([
            "alma",
            "analyze",
            "--category",
            "ready-to-scale",
            "--harm-risk-cap",
            "High",
        ]);
        match cli.command {
            Command::Analyze(args) => {
                assert_eq!(args.category().unwrap(), Some(OpportunityCategory::ReadyToScale));
                assert_eq!(args.constraints.harm_risk_cap.as_deref(), Some("High"));
            }
            _ => panic!("Expected Analyze command"),
        }
    }

    #[test]
    fn test_build_command_with_globals() {
        let cli = Cli::parse_from([
            "alma",
            "build",
            "--budget",
            "250000",
            "--db",
            "alma.db",
            "--format",
            "json",
        ]);
        assert_eq!(cli.db.as_deref(), Some("alma.db"));
        assert!(matches!(cli.format, Some(CliFormat::Json)));
        match cli.command {
            Command::Build(args) => assert_eq!(args.budget, 250000.0),
            _ => panic!("Expected Build command"),
        }
    }

    #[test]
    fn test_negative_budget_parses() {
        let cli = Cli::parse_from(["alma", "build", "--budget", "-10"]);
        match cli.command {
            Command::Build(args) => assert_eq!(args.budget, -10.0),
            _ => panic!("Expected Build command"),
        }
    }

    #[test]
    fn test_db_and_snapshot_conflict() {
        let result = Cli::try_parse_from(["alma", "--db", "a.db", "--snapshot", "b.json", "gaps"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_unknown_category_rejected() {
        let args = AnalyzeArgs {
            category: Some("everything".to_string()),
            constraints: ConstraintArgs::default(),
        };
        assert!(matches!(args.category(), Err(CliError::InvalidInput(_))));
    }

    #[test]
    fn test_constraint_overrides() {
        let args = ConstraintArgs {
            max_untested: Some(0.1),
            min_community: None,
            harm_risk_cap: Some("Low".to_string()),
        };
        let constraints = args.apply(PortfolioConstraints::default()).unwrap();
        assert_eq!(constraints.max_untested_allocation, 0.1);
        assert_eq!(constraints.min_community_endorsed, 0.8);
        assert_eq!(constraints.harm_risk_cap, HarmRiskLevel::Low);

        let bad = ConstraintArgs {
            min_community: Some(1.5),
            ..Default::default()
        };
        assert!(matches!(
            bad.apply(PortfolioConstraints::default()),
            Err(CliError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_dimension_conversion() {
        let dimension: GapDimension = DimensionArg::Type.into();
        assert_eq!(dimension, GapDimension::InterventionType);
    }
}
