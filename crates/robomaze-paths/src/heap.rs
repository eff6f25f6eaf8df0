//! Binary min-heap with stable handles and decrease-key.
//!
//! Every inserted item receives a [`Handle`]. The queue keeps a handle table
//! that maps each live handle to the item's current slot, so
//! [`decrease_key`](PriorityQueue::decrease_key) can find the item in O(1)
//! and restore the heap order in O(log n) without the payload knowing
//! anything about the heap.
//!
//! Ordering: entries only move past one another on a strictly smaller key.
//! When sifting down and both children hold the same key, the left child is
//! promoted. Among equal keys the extraction order is therefore
//! deterministic but not FIFO.

use crate::store::Store;

/// Stable identifier of an item inserted into a [`PriorityQueue`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Handle(usize);

#[derive(Debug, Clone)]
struct Entry<T> {
    key: u32,
    handle: Handle,
    item: T,
}

/// A binary min-heap keyed by `u32`.
#[derive(Debug, Clone)]
pub struct PriorityQueue<T> {
    heap: Store<Entry<T>>,
    /// Current heap slot of each handle; `None` once extracted.
    slots: Vec<Option<usize>>,
}

impl<T> Default for PriorityQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[inline]
fn parent(i: usize) -> usize {
    (i - 1) / 2
}

#[inline]
fn left(i: usize) -> usize {
    2 * i + 1
}

#[inline]
fn right(i: usize) -> usize {
    2 * i + 2
}

impl<T> PriorityQueue<T> {
    /// Create an empty queue with a backing capacity of 1.
    pub fn new() -> Self {
        Self {
            heap: Store::new(),
            slots: Vec::new(),
        }
    }

    /// Create an empty queue. Returns `None` for a zero capacity.
    pub fn with_capacity(capacity: usize) -> Option<Self> {
        Some(Self {
            heap: Store::with_capacity(capacity)?,
            slots: Vec::new(),
        })
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.heap.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    /// Capacity of the backing store.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.heap.capacity()
    }

    /// Insert `item` with priority `key`.
    pub fn insert(&mut self, key: u32, item: T) -> Handle {
        let handle = Handle(self.slots.len());
        let i = self.heap.len();
        self.slots.push(Some(i));
        self.heap.push(Entry { key, handle, item });
        self.sift_up(i);
        handle
    }

    /// The item with the smallest key, without removing it.
    pub fn peek_min(&self) -> Option<(u32, &T)> {
        self.heap.get(0).map(|e| (e.key, &e.item))
    }

    /// Remove and return the item with the smallest key.
    pub fn extract_min(&mut self) -> Option<(u32, T)> {
        if self.heap.is_empty() {
            return None;
        }
        let last = self.heap.len() - 1;
        self.swap(0, last);
        let entry = self.heap.pop()?;
        self.slots[entry.handle.0] = None;
        if !self.heap.is_empty() {
            self.sift_down(0);
        }
        Some((entry.key, entry.item))
    }

    /// Lower the key of a queued item and restore the heap order.
    ///
    /// Returns `false` without touching the queue if the handle is no longer
    /// queued or if `new_key` is greater than the current key.
    pub fn decrease_key(&mut self, handle: Handle, new_key: u32) -> bool {
        let Some(i) = self.position(handle) else {
            return false;
        };
        if new_key > self.heap[i].key {
            return false;
        }
        self.heap[i].key = new_key;
        self.sift_up(i);
        true
    }

    /// Current heap slot of `handle`, or `None` if it has been extracted.
    #[inline]
    pub fn position(&self, handle: Handle) -> Option<usize> {
        self.slots.get(handle.0).copied().flatten()
    }

    /// Current key of a queued item.
    pub fn key(&self, handle: Handle) -> Option<u32> {
        self.position(handle).map(|i| self.heap[i].key)
    }

    fn swap(&mut self, a: usize, b: usize) {
        if a == b || !self.heap.swap(a, b) {
            return;
        }
        self.slots[self.heap[a].handle.0] = Some(a);
        self.slots[self.heap[b].handle.0] = Some(b);
    }

    fn sift_up(&mut self, mut i: usize) {
        while i != 0 && self.heap[parent(i)].key > self.heap[i].key {
            self.swap(i, parent(i));
            i = parent(i);
        }
    }

    fn sift_down(&mut self, mut i: usize) {
        let len = self.heap.len();
        loop {
            let (l, r) = (left(i), right(i));
            let mut smallest = i;
            if l < len && self.heap[l].key < self.heap[smallest].key {
                smallest = l;
            }
            if r < len && self.heap[r].key < self.heap[smallest].key {
                smallest = r;
            }
            if smallest == i {
                return;
            }
            self.swap(i, smallest);
            i = smallest;
        }
    }

    #[cfg(test)]
    fn check_invariants(&self) {
        let entries = self.heap.as_slice();
        for i in 1..entries.len() {
            assert!(entries[parent(i)].key <= entries[i].key, "heap order at {i}");
        }
        for (i, e) in entries.iter().enumerate() {
            assert_eq!(self.slots[e.handle.0], Some(i), "handle table at {i}");
        }
        let live = self.slots.iter().filter(|s| s.is_some()).count();
        assert_eq!(live, entries.len());
    }
}
