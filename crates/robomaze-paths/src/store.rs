//! A growable contiguous store with an explicit resize policy.
//!
//! [`Store`] tracks its own logical capacity instead of relying on `Vec`'s
//! growth strategy:
//!
//! - pushing onto a full store doubles the capacity;
//! - popping shrinks the capacity by half once `len <= capacity / 4`;
//! - the capacity never drops below 1.
//!
//! Both rules together keep push and pop amortised O(1) while bounding the
//! wasted space to a constant factor of the live elements.

use std::ops::{Index, IndexMut};

#[derive(Debug, Clone)]
pub struct Store<T> {
    items: Vec<T>,
    capacity: usize,
}

impl<T> Default for Store<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Store<T> {
    /// Create an empty store with capacity 1.
    pub fn new() -> Self {
        Self {
            items: Vec::with_capacity(1),
            capacity: 1,
        }
    }

    /// Create an empty store with the given initial capacity.
    ///
    /// Returns `None` for a zero capacity.
    pub fn with_capacity(capacity: usize) -> Option<Self> {
        if capacity == 0 {
            return None;
        }
        Some(Self {
            items: Vec::with_capacity(capacity),
            capacity,
        })
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Logical capacity as dictated by the resize policy.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Append an element, doubling the capacity first if the store is full.
    pub fn push(&mut self, item: T) {
        if self.items.len() == self.capacity {
            self.resize(self.capacity * 2);
        }
        self.items.push(item);
    }

    /// Remove the last element, halving the capacity once the store is at
    /// most a quarter full.
    pub fn pop(&mut self) -> Option<T> {
        let item = self.items.pop()?;
        if self.items.len() <= self.capacity / 4 {
            self.resize(self.capacity / 2);
        }
        Some(item)
    }

    #[inline]
    pub fn get(&self, i: usize) -> Option<&T> {
        self.items.get(i)
    }

    /// Swap two elements. Returns `false` if either index is out of range.
    pub fn swap(&mut self, a: usize, b: usize) -> bool {
        if a >= self.items.len() || b >= self.items.len() {
            return false;
        }
        self.items.swap(a, b);
        true
    }

    #[inline]
    pub fn as_slice(&self) -> &[T] {
        &self.items
    }

    fn resize(&mut self, capacity: usize) {
        let capacity = capacity.max(1);
        if capacity > self.items.capacity() {
            self.items.reserve_exact(capacity - self.items.len());
        } else {
            self.items.shrink_to(capacity);
        }
        self.capacity = capacity;
    }
}

impl<T> Index<usize> for Store<T> {
    type Output = T;

    #[inline]
    fn index(&self, i: usize) -> &T {
        &self.items[i]
    }
}

impl<T> IndexMut<usize> for Store<T> {
    #[inline]
    fn index_mut(&mut self, i: usize) -> &mut T {
        &mut self.items[i]
    }
}
