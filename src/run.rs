//! One algorithm sorting one private copy of the input.

use std::time::{Duration, Instant};

use log::{debug, trace};

use crate::algorithm::Algorithm;
use crate::pacing::Pacer;
use crate::probe::{Interrupted, Probe};
use crate::snapshot::{ArraySnapshot, RunStatus, Snapshot, SnapshotCell};

/// Read-only handle to a run's live state.
///
/// Handles are cheap to clone and can be polled from any thread while the worker sorts.
#[derive(Debug, Clone)]
pub struct SortRun {
    algorithm: Algorithm,
    cell: SnapshotCell,
}

impl SortRun {
    pub fn new(algorithm: Algorithm) -> Self {
        Self {
            algorithm,
            cell: SnapshotCell::new(),
        }
    }

    /// A run whose array reads as `input` until its worker starts.
    pub fn with_input(algorithm: Algorithm, input: &[i32]) -> Self {
        Self {
            algorithm,
            cell: SnapshotCell::with_values(input),
        }
    }

    pub fn algorithm(&self) -> Algorithm {
        self.algorithm
    }

    pub fn snapshot(&self) -> Snapshot {
        self.cell.load()
    }

    /// The run's array as of its latest comparison, or its final state once it stopped.
    pub fn array(&self) -> ArraySnapshot {
        self.cell.load_array()
    }

    pub fn is_completed(&self) -> bool {
        self.snapshot().is_completed()
    }

    /// Sorts `values` on the calling thread, publishing every step to this run's snapshot and
    /// pausing after each comparison.
    ///
    /// Empty input completes immediately with a zero duration. On interruption the run is marked
    /// cancelled and never completes.
    pub fn execute(&self, mut values: Vec<i32>, pacer: &Pacer) -> Result<RunOutcome, Interrupted> {
        if values.is_empty() {
            self.cell.publish_array(ArraySnapshot::new(0, &values));
            self.cell.publish(finished(Snapshot::PENDING, Duration::ZERO));
            return Ok(RunOutcome {
                algorithm: self.algorithm,
                elapsed: Duration::ZERO,
                values,
            });
        }

        let mut probe = LiveProbe {
            cell: &self.cell,
            pacer,
            current: Snapshot {
                status: RunStatus::Running,
                ..Snapshot::PENDING
            },
            mirror: values.clone(),
        };
        probe.cell.publish_array(ArraySnapshot::new(0, &values));
        probe.cell.publish(probe.current);

        debug!("{}: sorting {} values", self.algorithm, values.len());
        let start = Instant::now();

        if let Err(interrupted) = self.algorithm.sort(values.as_mut_slice(), &mut probe) {
            debug!(
                "{}: interrupted after {} comparisons",
                self.algorithm, probe.current.comparisons
            );
            self.cell
                .publish_array(ArraySnapshot::new(probe.current.comparisons, &values));
            self.cell.publish(Snapshot {
                compare: None,
                status: RunStatus::Cancelled,
                ..probe.current
            });
            return Err(interrupted);
        }

        let elapsed = start.elapsed();
        self.cell
            .publish_array(ArraySnapshot::new(probe.current.comparisons, &values));
        self.cell.publish(finished(probe.current, elapsed));
        debug!(
            "{}: done in {:?} with {} comparisons",
            self.algorithm, elapsed, probe.current.comparisons
        );

        Ok(RunOutcome {
            algorithm: self.algorithm,
            elapsed,
            values,
        })
    }
}

/// Final state every algorithm ends in: whole array sorted, nothing compared.
fn finished(last: Snapshot, elapsed: Duration) -> Snapshot {
    Snapshot {
        compare: None,
        boundary: Some(0),
        comparisons: last.comparisons,
        status: RunStatus::Completed { elapsed },
    }
}

/// Result of a run that completed naturally.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunOutcome {
    pub algorithm: Algorithm,
    pub elapsed: Duration,
    /// The run's private array, sorted.
    pub values: Vec<i32>,
}

/// Publishes each step into the run's snapshot cell, then lets the pacer decide whether to go on.
///
/// `mirror` replays every swap and write, so it always equals the array being sorted.
struct LiveProbe<'a> {
    cell: &'a SnapshotCell,
    pacer: &'a Pacer,
    current: Snapshot,
    mirror: Vec<i32>,
}

impl Probe<i32> for LiveProbe<'_> {
    fn compare(&mut self, a: usize, b: usize) -> Result<(), Interrupted> {
        self.current.compare = Some((a, b));
        self.current.comparisons += 1;
        self.cell
            .publish_array(ArraySnapshot::new(self.current.comparisons, &self.mirror));
        self.cell.publish(self.current);
        trace!("compare {a} {b}");

        self.pacer.pause()
    }

    fn boundary(&mut self, index: usize) {
        self.current.boundary = Some(index);
        self.cell.publish(self.current);
    }

    fn swap(&mut self, a: usize, b: usize) {
        self.mirror.swap(a, b);
    }

    fn write(&mut self, index: usize, value: &i32) {
        self.mirror[index] = *value;
    }
}
