use std::collections::VecDeque;

/// Fixed-capacity, newest-first collection. Pushing past capacity evicts the
/// oldest entry.
#[derive(Debug, Clone, PartialEq)]
pub struct Feed<T> {
    entries: VecDeque<T>,
    capacity: usize,
}

impl<T> Feed<T> {
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: VecDeque::with_capacity(capacity + 1),
            capacity,
        }
    }

    /// Seed with `entries` given newest-first; anything past capacity is dropped.
    pub fn with_entries(capacity: usize, entries: Vec<T>) -> Self {
        let mut entries: VecDeque<T> = entries.into();
        entries.truncate(capacity);
        Self { entries, capacity }
    }

    /// Prepend `entry`, then truncate to capacity. Returns the evicted entry.
    pub fn push(&mut self, entry: T) -> Option<T> {
        self.entries.push_front(entry);
        if self.entries.len() > self.capacity {
            self.entries.pop_back()
        } else {
            None
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Newest entry.
    pub fn latest(&self) -> Option<&T> {
        self.entries.front()
    }

    /// Newest-first.
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.entries.iter()
    }
}

impl<T: Clone> Feed<T> {
    pub fn to_vec(&self) -> Vec<T> {
        self.entries.iter().cloned().collect()
    }
}
