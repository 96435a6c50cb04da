//! Latest observable state of a run, readable from any thread.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use crossbeam_utils::atomic::AtomicCell;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunStatus {
    /// Created, worker not started yet.
    Pending,
    Running,
    Completed { elapsed: Duration },
    /// Abandoned before finishing. A cancelled run never completes.
    Cancelled,
}

/// Value copy of a run's state at one instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Snapshot {
    /// Pair of indices currently being compared.
    pub compare: Option<(usize, usize)>,
    /// Index below which elements are final. `None` until the algorithm finalizes something.
    pub boundary: Option<usize>,
    /// Comparisons made so far.
    pub comparisons: u64,
    pub status: RunStatus,
}

impl Snapshot {
    pub const PENDING: Snapshot = Snapshot {
        compare: None,
        boundary: None,
        comparisons: 0,
        status: RunStatus::Pending,
    };

    pub fn is_completed(&self) -> bool {
        matches!(self.status, RunStatus::Completed { .. })
    }

    pub fn elapsed(&self) -> Option<Duration> {
        match self.status {
            RunStatus::Completed { elapsed } => Some(elapsed),
            _ => None,
        }
    }
}

impl Default for Snapshot {
    fn default() -> Self {
        Self::PENDING
    }
}

/// Value copy of a run's array, tagged with the number of comparisons made when it was taken.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArraySnapshot {
    pub comparisons: u64,
    pub values: Arc<[i32]>,
}

impl ArraySnapshot {
    pub fn new(comparisons: u64, values: &[i32]) -> Self {
        Self {
            comparisons,
            values: Arc::from(values),
        }
    }
}

/// Single-slot buffers holding the most recent [`Snapshot`] and [`ArraySnapshot`].
///
/// Exactly one worker stores into a cell, any number of observers load from it. Loads never see a
/// torn value. The array slot is behind a lock, held only long enough to swap or clone an `Arc`.
#[derive(Debug, Clone)]
pub struct SnapshotCell {
    slot: Arc<AtomicCell<Snapshot>>,
    array: Arc<Mutex<ArraySnapshot>>,
}

impl SnapshotCell {
    pub fn new() -> Self {
        Self::with_values(&[])
    }

    pub fn with_values(values: &[i32]) -> Self {
        Self {
            slot: Arc::new(AtomicCell::new(Snapshot::PENDING)),
            array: Arc::new(Mutex::new(ArraySnapshot::new(0, values))),
        }
    }

    pub fn load(&self) -> Snapshot {
        self.slot.load()
    }

    pub fn load_array(&self) -> ArraySnapshot {
        self.array
            .lock()
            .unwrap_or_else(|p| p.into_inner())
            .clone()
    }

    pub(crate) fn publish(&self, snapshot: Snapshot) {
        self.slot.store(snapshot);
    }

    pub(crate) fn publish_array(&self, array: ArraySnapshot) {
        *self.array.lock().unwrap_or_else(|p| p.into_inner()) = array;
    }
}

impl Default for SnapshotCell {
    fn default() -> Self {
        Self::new()
    }
}
