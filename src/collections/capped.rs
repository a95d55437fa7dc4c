//! A stack that forgets its oldest items.

use alloc::collections::VecDeque;

use thiserror::Error;

/// A capped stack cannot be empty by construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("Capped stack capacity must be at least 1.")]
pub struct CapacityError;

/// A stack holding at most a fixed number of items.
///
/// Pushing onto a full stack silently evicts the item at the bottom.
#[derive(Debug, Clone)]
pub struct CappedStack<T> {
    items: VecDeque<T>,
    capacity: usize,
}

impl<T> CappedStack<T> {
    pub fn new(capacity: usize) -> Result<Self, CapacityError> {
        if capacity == 0 {
            Err(CapacityError)?;
        }

        Ok(Self {
            items: VecDeque::with_capacity(capacity),
            capacity,
        })
    }

    /// Push an item, returning the bottom item if it was evicted to make
    /// room.
    pub fn push(&mut self, item: T) -> Option<T> {
        let evicted = if self.items.len() == self.capacity {
            self.items.pop_front()
        } else {
            None
        };

        self.items.push_back(item);
        evicted
    }

    pub fn pop(&mut self) -> Option<T> {
        self.items.pop_back()
    }

    pub fn peek(&self) -> Option<&T> {
        self.items.back()
    }

    /// The item at `index`, counting from the bottom of the stack.
    pub fn get(&self, index: usize) -> Option<&T> {
        self.items.get(index)
    }

    /// The item at `index`, or the default value if there is none.
    pub fn get_or_default(&self, index: usize) -> T
    where
        T: Clone + Default,
    {
        self.get(index).cloned().unwrap_or_default()
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

    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Iterate from the bottom of the stack to the top.
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &T> + ExactSizeIterator {
        self.items.iter()
    }
}

#[cfg(test)]
mod tests {
    use alloc::vec::Vec;

    use super::*;

    #[test]
    fn zero_capacity() {
        assert_eq!(CappedStack::<u8>::new(0).unwrap_err(), CapacityError);
    }

    #[test]
    fn evicts_oldest() {
        let mut stack = CappedStack::new(3).unwrap();

        assert_eq!(stack.push(1), None);
        assert_eq!(stack.push(2), None);
        assert_eq!(stack.push(3), None);
        assert_eq!(stack.push(4), Some(1));

        assert_eq!(stack.len(), 3);
        assert_eq!(stack.iter().copied().collect::<Vec<_>>(), [2, 3, 4]);
        assert_eq!(stack.peek(), Some(&4));
    }

    #[test]
    fn pops_newest_first() {
        let mut stack = CappedStack::new(2).unwrap();
        stack.push('a');
        stack.push('b');

        assert_eq!(stack.pop(), Some('b'));
        assert_eq!(stack.pop(), Some('a'));
        assert_eq!(stack.pop(), None);
        assert!(stack.is_empty());
    }

    #[test]
    fn sparse_indexing() {
        let mut stack = CappedStack::new(2).unwrap();
        stack.push(7u32);

        assert_eq!(stack.get(0), Some(&7));
        assert_eq!(stack.get(1), None);
        assert_eq!(stack.get_or_default(5), 0);
    }
}
