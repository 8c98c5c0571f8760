//! Import command implementation.

use crate::cli::ImportArgs;
use crate::error::Result;
use crate::output::Formatter;
use alma_store::{read_rows, SqliteSignalStore};
use std::path::Path;

/// Execute the import command.
pub fn execute_import(args: ImportArgs, database: &Path, formatter: &Formatter) -> Result<String> {
    let rows = read_rows(&args.file)?;
    let mut store = SqliteSignalStore::new(database)?;
    let imported = store.insert_rows(&rows)?;
    let total = store.count()?;

    Ok(formatter.success(&format!(
        "Imported {} interventions into {} ({} total)",
        imported,
        database.display(),
        total
    )))
}
