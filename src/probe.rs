//! Instrumentation hooks the sorts report into.

use thiserror::Error;

/// Returned by a [`Probe`] to abandon the sort in progress.
///
/// The array is left in whatever permutation it had at that point; no element is lost or
/// duplicated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("sort was interrupted")]
pub struct Interrupted;

/// Receives the observable steps of an instrumented sort over elements of type `T`.
///
/// `compare` is called right before the two positions are compared and is the only hook that may
/// stop the sort. `boundary` marks the index below which elements are final, in the sense each
/// algorithm defines it. `swap` is reported whenever two distinct positions exchange values, and
/// `write` whenever a position is overwritten with a value from outside the slice. Together the
/// last two describe every change the sort makes to its slice.
pub trait Probe<T> {
    fn compare(&mut self, a: usize, b: usize) -> Result<(), Interrupted>;

    fn boundary(&mut self, _index: usize) {}

    fn swap(&mut self, _a: usize, _b: usize) {}

    fn write(&mut self, _index: usize, _value: &T) {}
}

impl<T, P: Probe<T> + ?Sized> Probe<T> for &mut P {
    #[inline]
    fn compare(&mut self, a: usize, b: usize) -> Result<(), Interrupted> {
        (**self).compare(a, b)
    }

    #[inline]
    fn boundary(&mut self, index: usize) {
        (**self).boundary(index)
    }

    #[inline]
    fn swap(&mut self, a: usize, b: usize) {
        (**self).swap(a, b)
    }

    #[inline]
    fn write(&mut self, index: usize, value: &T) {
        (**self).write(index, value)
    }
}

/// Ignores everything, for running the sorts at full speed.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoProbe;

impl<T> Probe<T> for NoProbe {
    #[inline]
    fn compare(&mut self, _a: usize, _b: usize) -> Result<(), Interrupted> {
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    Compare(usize, usize),
    Boundary(usize),
    Swap(usize, usize),
    /// Position overwritten from a scratch copy.
    Write(usize),
}

/// Records every event in order.
#[derive(Debug, Default, Clone)]
pub struct Trace {
    events: Vec<Event>,
}

impl Trace {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> &[Event] {
        &self.events
    }

    pub fn compares(&self) -> Vec<(usize, usize)> {
        self.events
            .iter()
            .filter_map(|event| match *event {
                Event::Compare(a, b) => Some((a, b)),
                _ => None,
            })
            .collect()
    }

    pub fn boundaries(&self) -> Vec<usize> {
        self.events
            .iter()
            .filter_map(|event| match *event {
                Event::Boundary(i) => Some(i),
                _ => None,
            })
            .collect()
    }

    pub fn swap_count(&self) -> usize {
        self.events
            .iter()
            .filter(|event| matches!(event, Event::Swap(..)))
            .count()
    }
}

impl<T> Probe<T> for Trace {
    fn compare(&mut self, a: usize, b: usize) -> Result<(), Interrupted> {
        self.events.push(Event::Compare(a, b));
        Ok(())
    }

    fn boundary(&mut self, index: usize) {
        self.events.push(Event::Boundary(index));
    }

    fn swap(&mut self, a: usize, b: usize) {
        self.events.push(Event::Swap(a, b));
    }

    fn write(&mut self, index: usize, _value: &T) {
        self.events.push(Event::Write(index));
    }
}
