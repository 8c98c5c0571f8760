//! File-backed and in-memory accessors

use crate::{InterventionRow, StoreError};
use alma_domain::{InterventionId, PortfolioSignals, SignalAccessor, SnapshotEntry};
use std::fs;
use std::path::Path;

/// Highest portfolio score first; ties keep input order
fn ranked(entries: &[SnapshotEntry]) -> Vec<SnapshotEntry> {
    let mut snapshot: Vec<SnapshotEntry> = entries
        .iter()
        .filter(|e| e.record.review_status.is_publishable())
        .cloned()
        .collect();
    snapshot.sort_by(|a, b| {
        b.signals
            .ranking_score()
            .total_cmp(&a.signals.ranking_score())
    });
    snapshot
}

/// Read a JSON array of upstream rows
pub fn read_rows<P: AsRef<Path>>(path: P) -> Result<Vec<InterventionRow>, StoreError> {
    let text = fs::read_to_string(path)?;
    let rows: Vec<InterventionRow> = serde_json::from_str(&text)?;
    Ok(rows)
}

/// Accessor over a JSON export of upstream rows
///
/// The file is read and normalized once, when the store is opened.
#[derive(Debug, Clone)]
pub struct JsonSnapshotStore {
    entries: Vec<SnapshotEntry>,
}

impl JsonSnapshotStore {
    /// Load a JSON array of rows from disk
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, StoreError> {
        let path = path.as_ref();
        let rows = read_rows(path)?;
        tracing::debug!("Loaded {} rows from {}", rows.len(), path.display());
        Self::from_rows(rows)
    }

    /// Build from rows already in memory
    pub fn from_rows(rows: Vec<InterventionRow>) -> Result<Self, StoreError> {
        let entries = rows
            .into_iter()
            .map(InterventionRow::into_entry)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { entries })
    }

    /// Number of loaded entries, whatever their review status
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// No entries loaded
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl SignalAccessor for JsonSnapshotStore {
    type Error = StoreError;

    fn fetch_snapshot(&self) -> Result<Vec<SnapshotEntry>, Self::Error> {
        Ok(ranked(&self.entries))
    }

    fn fetch_signals(&self, id: InterventionId) -> Result<Option<PortfolioSignals>, Self::Error> {
        Ok(self
            .entries
            .iter()
            .find(|e| e.record.id == id)
            .map(|e| e.signals))
    }
}

/// In-memory accessor holding domain entries directly
///
/// A store built with [`MemoryStore::failing`] returns
/// [`StoreError::Unavailable`] from every call.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: Vec<SnapshotEntry>,
    failure: Option<String>,
}

impl MemoryStore {
    /// Empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Store holding the given entries
    pub fn with_entries(entries: Vec<SnapshotEntry>) -> Self {
        Self {
            entries,
            failure: None,
        }
    }

    /// Store whose every call fails with the given message
    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            entries: Vec::new(),
            failure: Some(message.into()),
        }
    }

    /// Add an entry
    pub fn insert(&mut self, entry: SnapshotEntry) {
        self.entries.push(entry);
    }

    fn check(&self) -> Result<(), StoreError> {
        match &self.failure {
            Some(message) => Err(StoreError::Unavailable(message.clone())),
            None => Ok(()),
        }
    }
}

impl SignalAccessor for MemoryStore {
    type Error = StoreError;

    fn fetch_snapshot(&self) -> Result<Vec<SnapshotEntry>, Self::Error> {
        self.check()?;
        Ok(ranked(&self.entries))
    }

    fn fetch_signals(&self, id: InterventionId) -> Result<Option<PortfolioSignals>, Self::Error> {
        self.check()?;
        Ok(self
            .entries
            .iter()
            .find(|e| e.record.id == id)
            .map(|e| e.signals))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alma_domain::{InterventionRecord, ReviewStatus};

    fn entry(status: ReviewStatus, score: f64) -> SnapshotEntry {
        let mut record = InterventionRecord::new(InterventionId::new(), "p", "Prevention");
        record.review_status = status;
        SnapshotEntry::new(
            record,
            PortfolioSignals {
                portfolio_score: score,
                ..Default::default()
            },
        )
    }

    #[test]
    fn test_memory_store_filters_and_ranks() {
        let store = MemoryStore::with_entries(vec![
            entry(ReviewStatus::Approved, 0.2),
            entry(ReviewStatus::Draft, 0.9),
            entry(ReviewStatus::Published, 0.7),
        ]);
        let snapshot = store.fetch_snapshot().unwrap();
        let scores: Vec<f64> = snapshot.iter().map(|e| e.signals.portfolio_score).collect();
        assert_eq!(scores, vec![0.7, 0.2]);
    }

    #[test]
    fn test_signals_ignore_review_status() {
        let draft = entry(ReviewStatus::Draft, 0.4);
        let id = draft.record.id;
        let mut store = MemoryStore::new();
        store.insert(draft);
        assert_eq!(store.fetch_signals(id).unwrap().unwrap().portfolio_score, 0.4);
        assert!(store.fetch_signals(InterventionId::new()).unwrap().is_none());
    }

    #[test]
    fn test_failing_store() {
        let store = MemoryStore::failing("timeout");
        let err = store.fetch_snapshot().unwrap_err();
        assert!(matches!(err, StoreError::Unavailable(ref m) if m == "timeout"));
        assert!(store.fetch_signals(InterventionId::new()).is_err());
    }

    #[test]
    fn test_json_store_from_rows() {
        let mut published = InterventionRow::new(InterventionId::new().to_string());
        published.review_status = Some("Published".to_string());
        published.portfolio_score = Some(0.5);
        let draft = InterventionRow::new(InterventionId::new().to_string());

        let store = JsonSnapshotStore::from_rows(vec![draft, published]).unwrap();
        assert_eq!(store.len(), 2);
        assert_eq!(store.fetch_snapshot().unwrap().len(), 1);
    }
}
