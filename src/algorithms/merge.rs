use crate::probe::{Interrupted, Probe};

sort_impl!("Merge Sort");

/// Sorts `v` with a top-down merge sort.
///
/// Ranges are inclusive and split at `(left + right) / 2`. While merging, `(left + i, mid + 1 + j)`
/// is compared before each placement, where `i` and `j` are the cursors into the copied left and
/// right halves. Ties take the left element, which keeps the sort stable.
pub fn sort<T, P>(v: &mut [T], probe: &mut P) -> Result<(), Interrupted>
where
    T: Ord + Clone,
    P: Probe<T>,
{
    if v.len() > 1 {
        merge_sort(v, 0, v.len() - 1, probe)?;
    }

    Ok(())
}

fn merge_sort<T, P>(v: &mut [T], left: usize, right: usize, probe: &mut P) -> Result<(), Interrupted>
where
    T: Ord + Clone,
    P: Probe<T>,
{
    if left < right {
        let mid = left + (right - left) / 2;

        merge_sort(v, left, mid, probe)?;
        merge_sort(v, mid + 1, right, probe)?;
        merge(v, left, mid, right, probe)?;
    }

    Ok(())
}

fn merge<T, P>(
    v: &mut [T],
    left: usize,
    mid: usize,
    right: usize,
    probe: &mut P,
) -> Result<(), Interrupted>
where
    T: Ord + Clone,
    P: Probe<T>,
{
    let lo = v[left..=mid].to_vec();
    let hi = v[(mid + 1)..=right].to_vec();

    let (mut i, mut j, mut k) = (0, 0, left);
    let mut status = Ok(());

    while i < lo.len() && j < hi.len() {
        status = probe.compare(left + i, mid + 1 + j);
        if status.is_err() {
            break;
        }

        if lo[i] <= hi[j] {
            v[k] = lo[i].clone();
            i += 1;
        } else {
            v[k] = hi[j].clone();
            j += 1;
        }
        probe.write(k, &v[k]);
        k += 1;
    }

    // Also runs when interrupted, so `v` stays a permutation of its input.
    for elem in lo[i..].iter().chain(&hi[j..]) {
        v[k] = elem.clone();
        probe.write(k, elem);
        k += 1;
    }

    status
}
