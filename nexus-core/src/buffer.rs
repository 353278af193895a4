//! Fixed-Capacity Buffer for Recent Stream Inputs
//!
//! ## Overview
//!
//! A stream pipeline keeps the most recent raw inputs it has seen so callers
//! can inspect them later. The history is bounded: once the buffer holds `N`
//! items, every new item evicts the oldest one (FIFO eviction).
//!
//! ```text
//! BoundedBuffer<3>:
//!   push a  →  [a]
//!   push b  →  [a, b]
//!   push c  →  [a, b, c]      full
//!   push d  →  [b, c, d]      a evicted
//! ```
//!
//! Storage is a `heapless::Deque`, so the capacity is a compile-time constant
//! and the ring itself never reallocates.
//!
//! ## Usage Example
//!
//! ```rust
//! use nexus_core::buffer::BoundedBuffer;
//!
//! let mut history: BoundedBuffer<u32, 3> = BoundedBuffer::new();
//! for i in 0..5 {
//!     history.push(i);
//! }
//!
//! assert_eq!(history.len(), 3);
//! assert_eq!(history.iter().copied().collect::<Vec<_>>(), vec![2, 3, 4]);
//! ```

use heapless::Deque;

/// Fixed-capacity FIFO-eviction history
///
/// ## Internal Invariants
///
/// - `len() <= N`
/// - Iteration yields items oldest to newest
///
/// ## Thread Safety
///
/// Not synchronized. The owning pipeline is the only writer.
pub struct BoundedBuffer<T, const N: usize> {
    items: Deque<T, N>,
}

impl<T, const N: usize> BoundedBuffer<T, N> {
    /// Creates a new empty buffer
    pub const fn new() -> Self {
        Self { items: Deque::new() }
    }

    /// Adds an item, evicting the oldest one when full
    ///
    /// Returns the evicted item, if any.
    pub fn push(&mut self, item: T) -> Option<T> {
        match self.items.push_back(item) {
            Ok(()) => None,
            Err(item) => {
                let evicted = self.items.pop_front();
                // Cannot fail again: a slot was just freed (or N == 0)
                let _ = self.items.push_back(item);
                evicted
            }
        }
    }

    /// Number of stored items
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Maximum number of stored items
    pub const fn capacity(&self) -> usize {
        N
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.items.is_full()
    }

    /// Most recently pushed item
    pub fn last(&self) -> Option<&T> {
        self.items.back()
    }

    /// Oldest retained item
    pub fn first(&self) -> Option<&T> {
        self.items.front()
    }

    /// Iterate from oldest to newest
    pub fn iter(&self) -> impl Iterator<Item = &T> + '_ {
        self.items.iter()
    }

    /// Drop all items
    pub fn clear(&mut self) {
        self.items.clear();
    }
}

impl<T, const N: usize> Default for BoundedBuffer<T, N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: core::fmt::Debug, const N: usize> core::fmt::Debug for BoundedBuffer<T, N> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_list().entries(self.items.iter()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_buffer() {
        let buffer: BoundedBuffer<u32, 5> = BoundedBuffer::new();
        assert!(buffer.is_empty());
        assert_eq!(buffer.len(), 0);
        assert_eq!(buffer.capacity(), 5);
        assert!(buffer.last().is_none());
    }

    #[test]
    fn push_and_retrieve() {
        let mut buffer = BoundedBuffer::<&str, 5>::new();

        assert_eq!(buffer.push("a"), None);
        assert_eq!(buffer.len(), 1);
        assert_eq!(buffer.last(), Some(&"a"));
        assert_eq!(buffer.first(), Some(&"a"));
    }

    #[test]
    fn fifo_eviction() {
        let mut buffer = BoundedBuffer::<u32, 3>::new();

        for i in 0..3 {
            assert_eq!(buffer.push(i), None);
        }
        assert!(buffer.is_full());

        // Oldest goes first
        assert_eq!(buffer.push(3), Some(0));
        assert_eq!(buffer.push(4), Some(1));

        let values: Vec<u32> = buffer.iter().copied().collect();
        assert_eq!(values, vec![2, 3, 4]);
        assert_eq!(buffer.len(), 3);
    }

    #[test]
    fn hundred_of_one_fifty() {
        let mut buffer = BoundedBuffer::<usize, 100>::new();
        for i in 0..150 {
            buffer.push(i);
        }

        assert_eq!(buffer.len(), 100);
        let values: Vec<usize> = buffer.iter().copied().collect();
        assert_eq!(values, (50..150).collect::<Vec<_>>());
    }

    #[test]
    fn clear_resets() {
        let mut buffer = BoundedBuffer::<u8, 2>::new();
        buffer.push(1);
        buffer.push(2);
        buffer.clear();
        assert!(buffer.is_empty());
        buffer.push(3);
        assert_eq!(buffer.first(), Some(&3));
    }
}
