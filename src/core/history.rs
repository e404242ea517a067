use std::collections::VecDeque;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum HistoryError {
    #[error("history capacity must be greater than zero")]
    InvalidCapacity,
}

/// Fixed-capacity FIFO of previously-seen items.
///
/// Once full, inserting drops the oldest item to make room. Items are
/// never removed by value, so insertion order of survivors is stable.
#[derive(Debug, Clone)]
pub struct BoundedHistory<T> {
    items: VecDeque<T>,
    capacity: usize,
}

impl<T> BoundedHistory<T> {
    pub fn new(capacity: usize) -> Result<Self, HistoryError> {
        if capacity == 0 {
            return Err(HistoryError::InvalidCapacity);
        }

        Ok(Self {
            items: VecDeque::with_capacity(capacity),
            capacity,
        })
    }

    /// Append an item, evicting the oldest one if the capacity is exceeded.
    pub fn insert(&mut self, item: T) {
        self.items.push_back(item);

        while self.items.len() > self.capacity {
            self.items.pop_front();
        }
    }

    pub fn contains(&self, predicate: impl Fn(&T) -> bool) -> bool {
        self.items.iter().any(predicate)
    }

    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.items.iter()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

impl<T: Clone> BoundedHistory<T> {
    /// Snapshot of the current contents, oldest first.
    pub fn to_vec(&self) -> Vec<T> {
        self.items.iter().cloned().collect()
    }
}
