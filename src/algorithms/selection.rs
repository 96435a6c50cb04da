use crate::probe::{Interrupted, Probe};

sort_impl!("Selection Sort");

/// Sorts `v` by selecting the minimum of the unsorted tail and moving it to the front.
///
/// Compares `(min, j)` where `min` is the smallest element found so far in the current pass.
pub fn sort<T, P>(v: &mut [T], probe: &mut P) -> Result<(), Interrupted>
where
    T: Ord,
    P: Probe<T>,
{
    let len = v.len();

    for i in 0..len.saturating_sub(1) {
        let mut min = i;

        for j in (i + 1)..len {
            probe.compare(min, j)?;

            if v[j] < v[min] {
                min = j;
            }
        }

        if min != i {
            v.swap(i, min);
            probe.swap(i, min);
        }

        probe.boundary(i);
    }

    Ok(())
}
