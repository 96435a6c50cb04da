//! Per-comparison delay and batch cancellation.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use crossbeam_channel::{Receiver, RecvTimeoutError, Sender};

use crate::probe::Interrupted;

/// Shared cancellation flag that also wakes every pacer currently waiting on it.
///
/// Waiting pacers block on `signal`, which never carries a message. Cancelling drops the only
/// sender, which disconnects the channel and wakes all of them at once.
#[derive(Debug, Clone)]
pub struct CancelToken {
    inner: Arc<CancelInner>,
}

#[derive(Debug)]
struct CancelInner {
    cancelled: AtomicBool,
    trigger: Mutex<Option<Sender<()>>>,
    signal: Receiver<()>,
}

impl CancelToken {
    pub fn new() -> Self {
        let (trigger, signal) = crossbeam_channel::bounded(0);

        Self {
            inner: Arc::new(CancelInner {
                cancelled: AtomicBool::new(false),
                trigger: Mutex::new(Some(trigger)),
                signal,
            }),
        }
    }

    pub fn cancel(&self) {
        self.inner.cancelled.store(true, Ordering::Release);

        // A poisoned lock only means another canceller panicked, the sender is dropped either way.
        let mut trigger = match self.inner.trigger.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        trigger.take();
    }

    pub fn is_cancelled(&self) -> bool {
        self.inner.cancelled.load(Ordering::Acquire)
    }
}

impl Default for CancelToken {
    fn default() -> Self {
        Self::new()
    }
}

/// Suspends the calling worker for a fixed delay after each published step.
#[derive(Debug, Clone)]
pub struct Pacer {
    delay: Duration,
    cancel: CancelToken,
}

impl Pacer {
    pub fn new(delay: Duration, cancel: CancelToken) -> Self {
        Self { delay, cancel }
    }

    /// No delay and a token nobody else holds. Runs at full speed and never interrupts.
    pub fn unpaced() -> Self {
        Self::new(Duration::ZERO, CancelToken::new())
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    pub fn cancel_token(&self) -> &CancelToken {
        &self.cancel
    }

    /// Waits for the configured delay, returning early with [`Interrupted`] if the token is
    /// cancelled before or during the wait.
    pub fn pause(&self) -> Result<(), Interrupted> {
        if self.cancel.is_cancelled() {
            return Err(Interrupted);
        }

        if self.delay.is_zero() {
            return Ok(());
        }

        match self.cancel.inner.signal.recv_timeout(self.delay) {
            Err(RecvTimeoutError::Timeout) => Ok(()),
            Err(RecvTimeoutError::Disconnected) | Ok(()) => Err(Interrupted),
        }
    }
}
