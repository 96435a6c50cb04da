//! Turning user text into the values a batch sorts.

use rand::Rng;

use crate::error::EngineError;

/// Parses comma-separated integers such as `"64, 34,25"`.
///
/// Whitespace around each item is ignored. Empty text, empty items and anything that is not an
/// `i32` are rejected with [`EngineError::InvalidInput`] naming the offending item.
pub fn parse_values(text: &str) -> Result<Vec<i32>, EngineError> {
    if text.trim().is_empty() {
        return Err(EngineError::InvalidInput("no values given".into()));
    }

    text.split(',')
        .enumerate()
        .map(|(i, item)| {
            let item = item.trim();
            item.parse::<i32>().map_err(|_| {
                EngineError::InvalidInput(format!("item {} is not an integer: {item:?}", i + 1))
            })
        })
        .collect()
}

/// `len` values drawn uniformly from `1..=max`.
pub fn random_values<R: Rng + ?Sized>(len: usize, max: i32, rng: &mut R) -> Vec<i32> {
    let max = max.max(1);
    (0..len).map(|_| rng.gen_range(1..=max)).collect()
}

/// Formats values the way [`parse_values`] reads them.
pub fn format_values(values: &[i32]) -> String {
    values
        .iter()
        .map(i32::to_string)
        .collect::<Vec<_>>()
        .join(",")
}
