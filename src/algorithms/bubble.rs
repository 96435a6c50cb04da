use crate::probe::{Interrupted, Probe};

sort_impl!("Bubble Sort");

/// Sorts `v` by repeatedly bubbling the largest remaining element to the end.
///
/// Compares `(j, j + 1)` for every `j` of every pass. After pass `i` the elements from
/// `len - i - 1` onwards are final.
pub fn sort<T, P>(v: &mut [T], probe: &mut P) -> Result<(), Interrupted>
where
    T: Ord,
    P: Probe<T>,
{
    let len = v.len();

    for i in 0..len.saturating_sub(1) {
        for j in 0..(len - i - 1) {
            probe.compare(j, j + 1)?;

            if v[j] > v[j + 1] {
                v.swap(j, j + 1);
                probe.swap(j, j + 1);
            }
        }

        probe.boundary(len - i - 1);
    }

    Ok(())
}
