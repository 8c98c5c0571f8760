//! ALMA CLI - portfolio analysis and allocation from the command line.

use alma_cli::{commands, init_logging, Cli, Command, Config, DataSource, Formatter};
use alma_portfolio::PortfolioService;
use alma_store::{JsonSnapshotStore, SqliteSignalStore};
use clap::Parser;

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run() -> alma_cli::Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };

    init_logging(cli.verbose);

    // Determine output format
    let format = cli
        .format
        .map(Into::into)
        .unwrap_or(config.settings.format);

    // Determine color setting
    let color_enabled = !cli.no_color && config.settings.color;

    let formatter = Formatter::new(format, color_enabled);

    let output = match cli.command {
        Command::Import(args) => {
            let database = config.database(cli.db.as_deref())?;
            commands::execute_import(args, &database, &formatter)?
        }
        command => {
            let portfolio = config.portfolio.clone();
            match config.data_source(cli.db.as_deref(), cli.snapshot.as_deref())? {
                DataSource::Database(path) => {
                    let service = PortfolioService::new(SqliteSignalStore::new(path)?, portfolio)?;
                    commands::execute(command, &service, &formatter)?
                }
                DataSource::Snapshot(path) => {
                    let service = PortfolioService::new(JsonSnapshotStore::open(path)?, portfolio)?;
                    commands::execute(command, &service, &formatter)?
                }
            }
        }
    };

    if !output.is_empty() {
        println!("{}", output);
    }

    Ok(())
}
