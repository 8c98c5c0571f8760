//! Trait definitions for external interactions
//!
//! The engine never talks to the upstream store directly. Callers inject an
//! implementation of [`SignalAccessor`] (SQLite, a JSON export, an in-memory
//! fake), which lives in the infrastructure layer (alma-store).

use crate::{InterventionId, PortfolioSignals, SnapshotEntry};

/// Read access to interventions and their upstream-computed signals
pub trait SignalAccessor {
    /// Error type for accessor operations
    type Error;

    /// Fetch every approved or published intervention with its signals
    ///
    /// Implementations should order entries by portfolio score, highest
    /// first; the engine re-sorts regardless.
    fn fetch_snapshot(&self) -> Result<Vec<SnapshotEntry>, Self::Error>;

    /// Fetch the signals for a single intervention
    ///
    /// Returns `Ok(None)` when no intervention has that id.
    fn fetch_signals(&self, id: InterventionId) -> Result<Option<PortfolioSignals>, Self::Error>;
}

impl<A: SignalAccessor + ?Sized> SignalAccessor for &A {
    type Error = A::Error;

    fn fetch_snapshot(&self) -> Result<Vec<SnapshotEntry>, Self::Error> {
        (**self).fetch_snapshot()
    }

    fn fetch_signals(&self, id: InterventionId) -> Result<Option<PortfolioSignals>, Self::Error> {
        (**self).fetch_signals(id)
    }
}
