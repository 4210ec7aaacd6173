use crate::sample::Sample;
use std::collections::VecDeque;

/// Default number of samples kept in the live window.
pub const CAPACITY: usize = 20;

/// Bounded, oldest-first history of samples.
///
/// Pushing past capacity drops exactly one sample from the front, so the
/// window always holds the most recent `capacity` samples in arrival order.
#[derive(Debug, Clone)]
pub struct SampleWindow {
    samples:  VecDeque<Sample>,
    capacity: usize,
}

impl Default for SampleWindow {
    fn default() -> Self {
        Self::new(CAPACITY)
    }
}

impl SampleWindow {
    /// A zero capacity is raised to one.
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            samples: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Push a new sample, evicting and returning the oldest if at capacity.
    pub(crate) fn push(&mut self, sample: Sample) -> Option<Sample> {
        let evicted = if self.samples.len() == self.capacity {
            self.samples.pop_front()
        } else {
            None
        };
        self.samples.push_back(sample);
        evicted
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Sample> {
        self.samples.get(index)
    }

    /// Most recently pushed sample.
    pub fn latest(&self) -> Option<&Sample> {
        self.samples.back()
    }

    /// Oldest first.
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &Sample> + ExactSizeIterator + '_ {
        self.samples.iter()
    }
}
