use crate::probe::{Interrupted, Probe};

sort_impl!("Insertion Sort");

/// Sorts `v` by inserting each element into the sorted prefix before it.
///
/// For element `i` the prefix is walked downwards from `i - 1`, comparing `(i, j)` at each step.
/// The comparison that stops the walk is reported too. The key moves down through adjacent swaps,
/// so equal elements never pass each other and the sort is stable.
pub fn sort<T, P>(v: &mut [T], probe: &mut P) -> Result<(), Interrupted>
where
    T: Ord,
    P: Probe<T>,
{
    for i in 1..v.len() {
        // Current position of the element that started at `i`.
        let mut pos = i;

        while pos > 0 {
            probe.compare(i, pos - 1)?;

            if v[pos - 1] <= v[pos] {
                break;
            }

            v.swap(pos - 1, pos);
            probe.swap(pos - 1, pos);
            pos -= 1;
        }

        probe.boundary(i);
    }

    Ok(())
}
