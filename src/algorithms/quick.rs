use crate::probe::{Interrupted, Probe};

sort_impl!("Quick Sort");

/// Sorts `v` with a recursive quicksort using the Lomuto partition scheme.
///
/// The last element of every range is the pivot and `(j, high)` is compared for each `j` in
/// `low..high`. Recursion depth is linear in the worst case, e.g. for already sorted input.
pub fn sort<T, P>(v: &mut [T], probe: &mut P) -> Result<(), Interrupted>
where
    T: Ord,
    P: Probe<T>,
{
    if v.len() > 1 {
        quicksort(v, 0, v.len() - 1, probe)?;
    }

    Ok(())
}

fn quicksort<T, P>(v: &mut [T], low: usize, high: usize, probe: &mut P) -> Result<(), Interrupted>
where
    T: Ord,
    P: Probe<T>,
{
    if low < high {
        let pivot_pos = partition(v, low, high, probe)?;

        if pivot_pos > low {
            quicksort(v, low, pivot_pos - 1, probe)?;
        }
        quicksort(v, pivot_pos + 1, high, probe)?;
    }

    Ok(())
}

/// Moves everything strictly less than `v[high]` in front of it and returns the pivot's final
/// position.
fn partition<T, P>(v: &mut [T], low: usize, high: usize, probe: &mut P) -> Result<usize, Interrupted>
where
    T: Ord,
    P: Probe<T>,
{
    // The pivot stays at `high` until the final swap, `store <= j < high` holds throughout.
    let mut store = low;

    for j in low..high {
        probe.compare(j, high)?;

        if v[j] < v[high] {
            if store != j {
                v.swap(store, j);
                probe.swap(store, j);
            }
            store += 1;
        }
    }

    if store != high {
        v.swap(store, high);
        probe.swap(store, high);
    }

    Ok(store)
}
