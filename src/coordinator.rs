//! Launching a batch of runs and collecting their results.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use crossbeam_channel::{Receiver, RecvTimeoutError, TryRecvError};
use log::{info, warn};
use once_cell::sync::OnceCell;

use crate::algorithm::Algorithm;
use crate::config::{ConfigError, EngineConfig};
use crate::error::EngineError;
use crate::pacing::{CancelToken, Pacer};
use crate::probe::Interrupted;
use crate::ranking::Rankings;
use crate::run::{RunOutcome, SortRun};

/// Starts batches, one at a time.
#[derive(Debug)]
pub struct Coordinator {
    pacing_delay: Duration,
    timeout: Option<Duration>,
    busy: Arc<AtomicBool>,
}

impl Coordinator {
    pub fn new(pacing_delay: Duration) -> Self {
        Self {
            pacing_delay,
            timeout: None,
            busy: Arc::new(AtomicBool::new(false)),
        }
    }

    pub fn from_config(config: &EngineConfig) -> Result<Self, ConfigError> {
        Ok(Self::new(config.pacing_delay()?).with_timeout(config.timeout()?))
    }

    /// Default limit for [`Batch::await_completion`].
    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn pacing_delay(&self) -> Duration {
        self.pacing_delay
    }

    /// Whether a batch started by this coordinator has not finished yet.
    pub fn is_busy(&self) -> bool {
        self.busy.load(Ordering::Acquire)
    }

    /// Launches one worker per algorithm, each sorting its own copy of `input`.
    ///
    /// Fails with [`EngineError::InvalidInput`] for empty input and with
    /// [`EngineError::ReentrantStart`] while the previous batch is still in flight. In both cases
    /// no run is created.
    pub fn start_all(&self, input: &[i32]) -> Result<Batch, EngineError> {
        if input.is_empty() {
            return Err(EngineError::InvalidInput("no values to sort".into()));
        }

        if self
            .busy
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            return Err(EngineError::ReentrantStart);
        }
        let busy = BusyGuard(Arc::clone(&self.busy));

        let cancel = CancelToken::new();
        let pacer = Pacer::new(self.pacing_delay, cancel.clone());
        let (completion_tx, completion_rx) = crossbeam_channel::unbounded();

        let runs = Algorithm::ALL
            .map(|algorithm| SortRun::with_input(algorithm, input))
            .to_vec();

        let mut batch = Batch {
            runs: runs.clone(),
            completions: completion_rx,
            workers: Vec::with_capacity(runs.len()),
            cancel,
            outcomes: vec![None; runs.len()],
            rankings: OnceCell::new(),
            timeout: self.timeout,
            busy: Some(busy),
        };

        info!(
            "starting batch of {} runs over {} values, pacing {:?}",
            runs.len(),
            input.len(),
            self.pacing_delay
        );

        for run in runs {
            let algorithm = run.algorithm();
            let values = input.to_vec();
            let pacer = pacer.clone();
            let completion_tx = completion_tx.clone();

            // On error `batch` is dropped, which cancels and joins the workers already started.
            let worker = thread::Builder::new()
                .name(format!("sort-{}", algorithm.short_name()))
                .spawn(move || {
                    let result = run.execute(values, &pacer);
                    // The batch may have been dropped already, nobody is left to tell.
                    let _ = completion_tx.send(Completion { algorithm, result });
                })
                .map_err(|source| EngineError::Spawn { algorithm, source })?;

            batch.workers.push(worker);
        }

        Ok(batch)
    }
}

/// Clears the coordinator's busy flag when the batch finishes or is dropped.
#[derive(Debug)]
struct BusyGuard(Arc<AtomicBool>);

impl Drop for BusyGuard {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

#[derive(Debug)]
struct Completion {
    algorithm: Algorithm,
    result: Result<RunOutcome, Interrupted>,
}

/// The six runs launched from one input.
///
/// Rankings become available once every run has completed and never change afterwards. Dropping
/// an unfinished batch cancels it and waits for its workers to stop.
#[derive(Debug)]
pub struct Batch {
    runs: Vec<SortRun>,
    completions: Receiver<Completion>,
    workers: Vec<JoinHandle<()>>,
    cancel: CancelToken,
    outcomes: Vec<Option<RunOutcome>>,
    rankings: OnceCell<Rankings>,
    timeout: Option<Duration>,
    busy: Option<BusyGuard>,
}

impl Batch {
    /// Live handles, in declaration order.
    pub fn runs(&self) -> &[SortRun] {
        &self.runs
    }

    pub fn run(&self, algorithm: Algorithm) -> &SortRun {
        &self.runs[algorithm.index()]
    }

    /// Interrupts every run still in progress. Interrupted runs never complete.
    pub fn cancel(&self) {
        if !self.cancel.is_cancelled() {
            info!("cancelling batch, pending: {:?}", self.pending());
        }
        self.cancel.cancel();
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancel.is_cancelled()
    }

    /// Algorithms whose completion has not been collected yet.
    pub fn pending(&self) -> Vec<Algorithm> {
        Algorithm::ALL
            .into_iter()
            .filter(|algorithm| self.outcomes[algorithm.index()].is_none())
            .collect()
    }

    pub fn outcome(&self, algorithm: Algorithm) -> Option<&RunOutcome> {
        self.outcomes[algorithm.index()].as_ref()
    }

    /// `None` until every run has completed and been collected.
    pub fn rankings(&self) -> Option<&Rankings> {
        self.rankings.get()
    }

    /// Collects whatever completions have arrived without blocking.
    ///
    /// Returns the rankings once all runs have completed.
    pub fn try_collect(&mut self) -> Result<Option<&Rankings>, EngineError> {
        while !self.all_collected() {
            match self.completions.try_recv() {
                Ok(completion) => self.record(completion)?,
                Err(TryRecvError::Empty) => return Ok(None),
                Err(TryRecvError::Disconnected) => return Err(self.lost()),
            }
        }

        Ok(Some(self.seal()))
    }

    /// Blocks until every run has completed, bounded by the coordinator's timeout if it has one.
    pub fn await_completion(&mut self) -> Result<&Rankings, EngineError> {
        self.await_completion_timeout(self.timeout)
    }

    /// Blocks until every run has completed or `timeout` elapses.
    ///
    /// Timing out leaves the batch running, it can be awaited again or cancelled.
    pub fn await_completion_timeout(
        &mut self,
        timeout: Option<Duration>,
    ) -> Result<&Rankings, EngineError> {
        let deadline = timeout.map(|timeout| Instant::now() + timeout);

        while !self.all_collected() {
            let received = match deadline {
                Some(deadline) => self.completions.recv_deadline(deadline),
                None => self
                    .completions
                    .recv()
                    .map_err(|_| RecvTimeoutError::Disconnected),
            };

            match received {
                Ok(completion) => self.record(completion)?,
                Err(RecvTimeoutError::Timeout) => {
                    let pending = self.pending();
                    warn!("timed out waiting for {:?}", pending);
                    return Err(EngineError::RunTimedOut {
                        waited: timeout.unwrap_or_default(),
                        pending,
                    });
                }
                Err(RecvTimeoutError::Disconnected) => return Err(self.lost()),
            }
        }

        Ok(self.seal())
    }

    /// Waits for completion and takes the final arrays along with the rankings.
    pub fn into_report(mut self) -> Result<BatchReport, EngineError> {
        let rankings = self.await_completion()?.clone();
        let outcomes = std::mem::take(&mut self.outcomes)
            .into_iter()
            .flatten()
            .collect();

        Ok(BatchReport { rankings, outcomes })
    }

    fn all_collected(&self) -> bool {
        self.outcomes.iter().all(Option::is_some)
    }

    fn record(&mut self, completion: Completion) -> Result<(), EngineError> {
        match completion.result {
            Ok(outcome) => {
                info!(
                    "{} completed in {:?}",
                    completion.algorithm, outcome.elapsed
                );
                self.outcomes[completion.algorithm.index()] = Some(outcome);
                Ok(())
            }
            Err(Interrupted) => Err(EngineError::Cancelled {
                pending: self.pending(),
            }),
        }
    }

    /// Every worker is gone but not every run completed.
    fn lost(&self) -> EngineError {
        EngineError::Cancelled {
            pending: self.pending(),
        }
    }

    fn seal(&mut self) -> &Rankings {
        for worker in self.workers.drain(..) {
            if worker.join().is_err() {
                warn!("sort worker panicked after reporting completion");
            }
        }
        self.busy.take();

        let outcomes = &self.outcomes;
        self.rankings.get_or_init(|| {
            let rankings = Rankings::new(
                outcomes
                    .iter()
                    .flatten()
                    .map(|outcome| (outcome.algorithm, outcome.elapsed)),
            );
            info!("{rankings}");
            rankings
        })
    }
}

impl Drop for Batch {
    fn drop(&mut self) {
        if self.workers.is_empty() {
            return;
        }

        self.cancel.cancel();
        for worker in self.workers.drain(..) {
            let _ = worker.join();
        }
    }
}

/// Everything a finished batch produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchReport {
    pub rankings: Rankings,
    /// Final state of every run, in declaration order.
    pub outcomes: Vec<RunOutcome>,
}

impl BatchReport {
    pub fn outcome(&self, algorithm: Algorithm) -> Option<&RunOutcome> {
        self.outcomes
            .iter()
            .find(|outcome| outcome.algorithm == algorithm)
    }
}
