//! Input patterns for tests and benchmarks.

use std::env;

use once_cell::sync::OnceCell;
use rand::prelude::*;
use zipf::ZipfDistribution;

/// Seed shared by every pattern in a process, so a failing run can be reproduced.
///
/// Set `OVERRIDE_SEED` to replay a specific seed.
pub fn random_init_seed() -> u64 {
    static SEED: OnceCell<u64> = OnceCell::new();

    *SEED.get_or_init(|| {
        env::var("OVERRIDE_SEED")
            .ok()
            .and_then(|seed| seed.parse().ok())
            .unwrap_or_else(|| thread_rng().gen())
    })
}

fn new_seeded_rng() -> StdRng {
    StdRng::seed_from_u64(random_init_seed())
}

pub fn random(len: usize) -> Vec<i32> {
    //     .
    // : . : :
    // :.:::.::

    let mut rng = new_seeded_rng();
    (0..len).map(|_| rng.gen::<i32>()).collect()
}

/// Values in `range`, inclusive.
pub fn random_uniform(len: usize, range: std::ops::RangeInclusive<i32>) -> Vec<i32> {
    let mut rng = new_seeded_rng();
    (0..len).map(|_| rng.gen_range(range.clone())).collect()
}

/// Heavily skewed values in `1..=len` with many duplicates.
///
/// A non-positive `exponent` degenerates to all ones.
pub fn random_zipf(len: usize, exponent: f64) -> Vec<i32> {
    // https://en.wikipedia.org/wiki/Zipf's_law

    if len == 0 {
        return Vec::new();
    }

    let Ok(dist) = ZipfDistribution::new(len, exponent) else {
        return vec![1; len];
    };

    let mut rng = new_seeded_rng();
    (0..len).map(|_| dist.sample(&mut rng) as i32).collect()
}

pub fn ascending(len: usize) -> Vec<i32> {
    //     .:
    //   .:::
    // .:::::

    (0..len as i32).collect()
}

pub fn descending(len: usize) -> Vec<i32> {
    // :.
    // :::.
    // :::::.

    (0..len as i32).rev().collect()
}

pub fn all_equal(len: usize) -> Vec<i32> {
    // ......
    // ::::::

    vec![66; len]
}

/// Sorted input with a few random elements swapped out of place.
pub fn saw_mostly_ascending(len: usize) -> Vec<i32> {
    let mut v = ascending(len);
    if len < 2 {
        return v;
    }

    let mut rng = new_seeded_rng();
    for _ in 0..(len / 10).max(1) {
        let a = rng.gen_range(0..len);
        let b = rng.gen_range(0..len);
        v.swap(a, b);
    }

    v
}
