//! Six textbook sorts racing each other on private copies of one input.
//!
//! Every sort reports its comparisons and its sorted boundary through a [`Probe`], which lets a
//! run publish live [`Snapshot`]s and pace itself so a human can follow along. The
//! [`Coordinator`] launches one worker thread per [`Algorithm`], and the resulting [`Batch`]
//! ranks them by wall-clock duration once all of them are done.

use probe::{Interrupted, Probe};

/// Common interface of all instrumented sort implementations.
pub trait InstrumentedSort {
    fn name() -> &'static str;

    fn sort<T, P>(v: &mut [T], probe: &mut P) -> Result<(), Interrupted>
    where
        T: Ord + Clone,
        P: Probe<T>;
}

macro_rules! sort_impl {
    ($name:expr) => {
        pub struct SortImpl;

        impl $crate::InstrumentedSort for SortImpl {
            fn name() -> &'static str {
                $name
            }

            #[inline]
            fn sort<T, P>(v: &mut [T], probe: &mut P) -> Result<(), $crate::probe::Interrupted>
            where
                T: Ord + Clone,
                P: $crate::probe::Probe<T>,
            {
                sort(v, probe)
            }
        }
    };
}

pub mod algorithm;
pub mod algorithms;
pub mod config;
pub mod coordinator;
pub mod error;
pub mod input;
pub mod pacing;
pub mod patterns;
pub mod probe;
pub mod ranking;
pub mod run;
pub mod snapshot;

pub use algorithm::Algorithm;
pub use config::Config;
pub use coordinator::{Batch, BatchReport, Coordinator};
pub use error::EngineError;
pub use pacing::{CancelToken, Pacer};
pub use ranking::{RankingEntry, Rankings};
pub use run::{RunOutcome, SortRun};
pub use snapshot::{ArraySnapshot, RunStatus, Snapshot};
