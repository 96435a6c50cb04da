use std::fmt;
use std::time::Duration;

use crate::algorithm::Algorithm;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RankingEntry {
    pub algorithm: Algorithm,
    pub elapsed: Duration,
}

/// Algorithms ordered by elapsed time, fastest first.
///
/// Equal durations keep declaration order, so the ranking of a batch is fully deterministic given
/// its durations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rankings {
    entries: Vec<RankingEntry>,
}

impl Rankings {
    pub fn new(durations: impl IntoIterator<Item = (Algorithm, Duration)>) -> Self {
        let mut entries = durations
            .into_iter()
            .map(|(algorithm, elapsed)| RankingEntry { algorithm, elapsed })
            .collect::<Vec<_>>();

        entries.sort_by_key(|entry| (entry.elapsed, entry.algorithm));

        Self { entries }
    }

    pub fn entries(&self) -> &[RankingEntry] {
        &self.entries
    }

    pub fn iter(&self) -> impl Iterator<Item = &RankingEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn fastest(&self) -> Option<&RankingEntry> {
        self.entries.first()
    }

    /// 1-based rank of `algorithm`.
    pub fn position(&self, algorithm: Algorithm) -> Option<usize> {
        self.entries
            .iter()
            .position(|entry| entry.algorithm == algorithm)
            .map(|i| i + 1)
    }
}

// Rankings: 1. Quick Sort (12ms) | 2. Merge Sort (14ms) | ...
impl fmt::Display for Rankings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Rankings: ")?;

        for (i, entry) in self.entries.iter().enumerate() {
            if i > 0 {
                f.write_str(" | ")?;
            }
            write!(
                f,
                "{}. {} ({}ms)",
                i + 1,
                entry.algorithm,
                entry.elapsed.as_millis()
            )?;
        }

        Ok(())
    }
}
