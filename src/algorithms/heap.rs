use crate::probe::{Interrupted, Probe};

sort_impl!("Heap Sort");

/// Sorts `v` with heapsort on an implicit max-heap.
///
/// Sift-down compares `(left, largest)` and then `(right, largest)` at every node it visits. After
/// each extraction the heap shrinks by one and the new heap size is reported as the boundary.
pub fn sort<T, P>(v: &mut [T], probe: &mut P) -> Result<(), Interrupted>
where
    T: Ord,
    P: Probe<T>,
{
    let len = v.len();

    for node in (0..len / 2).rev() {
        sift_down(v, len, node, probe)?;
    }

    for end in (1..len).rev() {
        v.swap(0, end);
        probe.swap(0, end);
        sift_down(v, end, 0, probe)?;
        probe.boundary(end);
    }

    Ok(())
}

/// Restores the max-heap property for the subtree rooted at `node`, considering only `v[..len]`.
fn sift_down<T, P>(v: &mut [T], len: usize, mut node: usize, probe: &mut P) -> Result<(), Interrupted>
where
    T: Ord,
    P: Probe<T>,
{
    loop {
        let mut largest = node;
        let left = 2 * node + 1;
        let right = left + 1;

        if left < len {
            probe.compare(left, largest)?;
            if v[left] > v[largest] {
                largest = left;
            }
        }

        if right < len {
            probe.compare(right, largest)?;
            if v[right] > v[largest] {
                largest = right;
            }
        }

        if largest == node {
            return Ok(());
        }

        v.swap(node, largest);
        probe.swap(node, largest);
        node = largest;
    }
}
