//! Array-backed binary min-heap keyed by weight.
//!
//! `std::collections::BinaryHeap` gives no guarantee about which of two equal
//! keys pops first. The tree shape (and therefore the packed output) depends on
//! that order, so this heap tags every entry with an insertion sequence number
//! and treats the earlier-inserted entry as smaller on equal weight.

/// One queued item with its ordering key.
#[derive(Debug)]
struct Entry<T> {
    weight: u64,
    seq: u64,
    item: T,
}

impl<T> Entry<T> {
    #[inline]
    fn key(&self) -> (u64, u64) {
        (self.weight, self.seq)
    }
}

/// Min-priority queue with deterministic FIFO tie-breaking.
#[derive(Debug)]
pub struct MinHeap<T> {
    entries: Vec<Entry<T>>,
    next_seq: u64,
}

impl<T> MinHeap<T> {
    /// Create an empty heap.
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    /// Create an empty heap with room for `capacity` entries.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: Vec::with_capacity(capacity),
            next_seq: 0,
        }
    }

    /// Number of queued entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when nothing is queued.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[cfg(test)]
    fn peek_weight(&self) -> Option<u64> {
        self.entries.first().map(|e| e.weight)
    }

    /// Insert `item` with the given weight. O(log n).
    pub fn insert(&mut self, weight: u64, item: T) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.entries.push(Entry { weight, seq, item });
        self.sift_up(self.entries.len() - 1);
    }

    /// Remove and return the minimum entry as `(weight, item)`. O(log n).
    ///
    /// Returns `None` when the heap is empty (underflow).
    pub fn extract_min(&mut self) -> Option<(u64, T)> {
        if self.entries.is_empty() {
            return None;
        }
        let min = self.entries.swap_remove(0);
        if !self.entries.is_empty() {
            self.sift_down(0);
        }
        Some((min.weight, min.item))
    }

    fn sift_up(&mut self, mut i: usize) {
        while i > 0 {
            let parent = (i - 1) / 2;
            if self.entries[parent].key() <= self.entries[i].key() {
                break;
            }
            self.entries.swap(parent, i);
            i = parent;
        }
    }

    fn sift_down(&mut self, mut i: usize) {
        let n = self.entries.len();
        loop {
            let left = 2 * i + 1;
            if left >= n {
                break;
            }
            let right = left + 1;
            let smaller = if right < n && self.entries[right].key() < self.entries[left].key() {
                right
            } else {
                left
            };
            if self.entries[i].key() <= self.entries[smaller].key() {
                break;
            }
            self.entries.swap(i, smaller);
            i = smaller;
        }
    }

    #[cfg(test)]
    fn is_heap_ordered(&self) -> bool {
        (1..self.entries.len()).all(|i| self.entries[(i - 1) / 2].key() <= self.entries[i].key())
    }
}

impl<T> Default for MinHeap<T> {
    fn default() -> Self {
        Self::new()
    }
}
