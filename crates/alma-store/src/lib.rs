//! ALMA Storage Layer
//!
//! Implements the [`SignalAccessor`] trait over the places intervention data
//! can live.
//!
//! # Architecture
//!
//! - [`SqliteSignalStore`]: SQLite mirror of the upstream intervention table
//! - [`JsonSnapshotStore`]: a JSON export of upstream rows, read once
//! - [`MemoryStore`]: domain entries held in memory, for tests and embedding
//!
//! Every adapter returns only approved or published records from
//! `fetch_snapshot`, highest portfolio score first.
//!
//! # Examples
//!
//! ```
//! use alma_domain::SignalAccessor;
//! use alma_store::{InterventionRow, SqliteSignalStore};
//!
//! let mut store = SqliteSignalStore::new(":memory:").unwrap();
//! let mut row = InterventionRow::new("0190f5c1-8b7a-7cde-9f00-1234567890ab");
//! row.review_status = Some("Approved".to_string());
//! store.insert_row(&row).unwrap();
//!
//! assert_eq!(store.fetch_snapshot().unwrap().len(), 1);
//! ```

#![warn(missing_docs)]

mod row;
mod snapshot;

pub use row::InterventionRow;
pub use snapshot::{read_rows, JsonSnapshotStore, MemoryStore};

use alma_domain::{InterventionId, PortfolioSignals, SignalAccessor, SnapshotEntry};
use rusqlite::{params, Connection, OptionalExtension};
use std::path::Path;
use thiserror::Error;

/// Errors that can occur during storage operations
#[derive(Error, Debug)]
pub enum StoreError {
    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// File could not be read
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON could not be parsed or written
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Invalid data format
    #[error("Invalid data: {0}")]
    InvalidData(String),

    /// Store deliberately unavailable
    #[error("Store unavailable: {0}")]
    Unavailable(String),
}

const SELECT_COLUMNS: &str = "SELECT id, name, type, description, evidence_level, harm_risk_level,
        current_funding, replication_readiness, scalability, cultural_authority, years_operating,
        geography, target_cohort, review_status, risks, operating_organization,
        evidence_strength_signal, community_authority_signal, harm_risk_signal,
        implementation_capability_signal, option_value_signal, portfolio_score
     FROM alma_interventions";

/// SQLite-backed signal accessor
///
/// Rows are stored as they arrive from upstream; normalization happens on
/// read. Multi-valued columns hold JSON arrays as text.
///
/// # Thread Safety
///
/// SQLite connections are not thread-safe. Each thread should have its own
/// store instance.
pub struct SqliteSignalStore {
    conn: Connection,
}

impl SqliteSignalStore {
    /// Open (or create) a store at the given path
    ///
    /// Use `:memory:` for an in-memory database (useful for testing).
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self, StoreError> {
        let conn = Connection::open(path)?;
        let store = Self { conn };
        store.initialize_schema()?;
        Ok(store)
    }

    fn initialize_schema(&self) -> Result<(), StoreError> {
        self.conn.execute_batch(include_str!("schema.sql"))?;
        Ok(())
    }

    fn encode_labels(labels: &Option<Vec<String>>) -> Result<Option<String>, StoreError> {
        labels
            .as_ref()
            .map(serde_json::to_string)
            .transpose()
            .map_err(StoreError::from)
    }

    fn decode_labels(idx: usize, text: Option<String>) -> rusqlite::Result<Option<Vec<String>>> {
        match text.filter(|t| !t.trim().is_empty()) {
            Some(t) => serde_json::from_str(&t).map(Some).map_err(|e| {
                rusqlite::Error::FromSqlConversionFailure(idx, rusqlite::types::Type::Text, Box::new(e))
            }),
            None => Ok(None),
        }
    }

    fn read_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<InterventionRow> {
        Ok(InterventionRow {
            id: row.get(0)?,
            name: row.get(1)?,
            intervention_type: row.get(2)?,
            description: row.get(3)?,
            evidence_level: row.get(4)?,
            harm_risk_level: row.get(5)?,
            current_funding: row.get(6)?,
            replication_readiness: row.get(7)?,
            scalability: row.get(8)?,
            cultural_authority: row.get(9)?,
            years_operating: row.get(10)?,
            geography: Self::decode_labels(11, row.get(11)?)?,
            target_cohort: Self::decode_labels(12, row.get(12)?)?,
            review_status: row.get(13)?,
            risks: row.get(14)?,
            operating_organization: row.get(15)?,
            evidence_strength_signal: row.get(16)?,
            community_authority_signal: row.get(17)?,
            harm_risk_signal: row.get(18)?,
            implementation_capability_signal: row.get(19)?,
            option_value_signal: row.get(20)?,
            portfolio_score: row.get(21)?,
        })
    }

    fn insert_into(conn: &Connection, row: &InterventionRow) -> Result<InterventionId, StoreError> {
        let id = row.parse_id()?;
        let geography = Self::encode_labels(&row.geography)?;
        let target_cohort = Self::encode_labels(&row.target_cohort)?;

        let mut stmt = conn.prepare_cached(
            "INSERT OR REPLACE INTO alma_interventions (
                id, name, type, description, evidence_level, harm_risk_level, current_funding,
                replication_readiness, scalability, cultural_authority, years_operating,
                geography, target_cohort, review_status, risks, operating_organization,
                evidence_strength_signal, community_authority_signal, harm_risk_signal,
                implementation_capability_signal, option_value_signal, portfolio_score)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15, ?16,
                     ?17, ?18, ?19, ?20, ?21, ?22)",
        )?;
        stmt.execute(params![
            id.to_string(),
            row.name,
            row.intervention_type,
            row.description,
            row.evidence_level,
            row.harm_risk_level,
            row.current_funding,
            row.replication_readiness,
            row.scalability,
            row.cultural_authority,
            row.years_operating,
            geography,
            target_cohort,
            row.review_status,
            row.risks,
            row.operating_organization,
            row.evidence_strength_signal,
            row.community_authority_signal,
            row.harm_risk_signal,
            row.implementation_capability_signal,
            row.option_value_signal,
            row.portfolio_score,
        ])?;

        Ok(id)
    }

    /// Insert or replace one upstream row
    ///
    /// The id is validated and stored in canonical form.
    pub fn insert_row(&mut self, row: &InterventionRow) -> Result<InterventionId, StoreError> {
        Self::insert_into(&self.conn, row)
    }

    /// Insert many rows in one transaction, all or nothing
    pub fn insert_rows(&mut self, rows: &[InterventionRow]) -> Result<usize, StoreError> {
        let tx = self.conn.transaction()?;
        for row in rows {
            Self::insert_into(&tx, row)?;
        }
        tx.commit()?;

        tracing::info!("Imported {} intervention rows", rows.len());
        Ok(rows.len())
    }

    /// Number of stored rows, whatever their review status
    pub fn count(&self) -> Result<usize, StoreError> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM alma_interventions", [], |row| row.get(0))?;
        Ok(count as usize)
    }
}

impl SignalAccessor for SqliteSignalStore {
    type Error = StoreError;

    fn fetch_snapshot(&self) -> Result<Vec<SnapshotEntry>, Self::Error> {
        let sql = format!(
            "{} WHERE TRIM(review_status) IN ('Approved', 'Published')
             ORDER BY portfolio_score IS NULL, portfolio_score DESC",
            SELECT_COLUMNS
        );
        let mut stmt = self.conn.prepare(&sql)?;
        let rows = stmt
            .query_map([], Self::read_row)?
            .collect::<Result<Vec<_>, _>>()?;

        tracing::debug!("Fetched {} intervention rows", rows.len());
        rows.into_iter().map(InterventionRow::into_entry).collect()
    }

    fn fetch_signals(&self, id: InterventionId) -> Result<Option<PortfolioSignals>, Self::Error> {
        let sql = format!("{} WHERE id = ?1", SELECT_COLUMNS);
        let row = self
            .conn
            .query_row(&sql, params![id.to_string()], Self::read_row)
            .optional()?;
        Ok(row.map(|r| r.signals()))
    }
}
