use std::fmt;
use std::str::FromStr;

use crate::algorithms::{bubble, heap, insertion, merge, quick, selection};
use crate::error::EngineError;
use crate::probe::{Interrupted, Probe};
use crate::InstrumentedSort;

/// The six sorts of a batch.
///
/// Declaration order matters: it is the order runs are listed in and the tie-break order of the
/// rankings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Algorithm {
    Bubble,
    Selection,
    Insertion,
    Merge,
    Quick,
    Heap,
}

impl Algorithm {
    pub const ALL: [Algorithm; 6] = [
        Algorithm::Bubble,
        Algorithm::Selection,
        Algorithm::Insertion,
        Algorithm::Merge,
        Algorithm::Quick,
        Algorithm::Heap,
    ];

    /// Position in [`Algorithm::ALL`].
    pub fn index(self) -> usize {
        self as usize
    }

    /// Display name, e.g. "Merge Sort".
    pub fn name(self) -> &'static str {
        match self {
            Algorithm::Bubble => bubble::SortImpl::name(),
            Algorithm::Selection => selection::SortImpl::name(),
            Algorithm::Insertion => insertion::SortImpl::name(),
            Algorithm::Merge => merge::SortImpl::name(),
            Algorithm::Quick => quick::SortImpl::name(),
            Algorithm::Heap => heap::SortImpl::name(),
        }
    }

    /// Lowercase identifier used in config files and on the command line.
    pub fn short_name(self) -> &'static str {
        match self {
            Algorithm::Bubble => "bubble",
            Algorithm::Selection => "selection",
            Algorithm::Insertion => "insertion",
            Algorithm::Merge => "merge",
            Algorithm::Quick => "quick",
            Algorithm::Heap => "heap",
        }
    }

    /// Whether equal elements keep their relative order.
    pub fn is_stable(self) -> bool {
        matches!(self, Algorithm::Insertion | Algorithm::Merge)
    }

    /// Sorts `v` in place with this algorithm, reporting every step to `probe`.
    pub fn sort<T, P>(self, v: &mut [T], probe: &mut P) -> Result<(), Interrupted>
    where
        T: Ord + Clone,
        P: Probe<T>,
    {
        match self {
            Algorithm::Bubble => bubble::SortImpl::sort(v, probe),
            Algorithm::Selection => selection::SortImpl::sort(v, probe),
            Algorithm::Insertion => insertion::SortImpl::sort(v, probe),
            Algorithm::Merge => merge::SortImpl::sort(v, probe),
            Algorithm::Quick => quick::SortImpl::sort(v, probe),
            Algorithm::Heap => heap::SortImpl::sort(v, probe),
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Algorithm {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        let wanted = wanted.strip_suffix(" sort").unwrap_or(&wanted);

        Algorithm::ALL
            .into_iter()
            .find(|algorithm| algorithm.short_name() == wanted)
            .ok_or_else(|| EngineError::UnknownAlgorithm(s.to_string()))
    }
}
