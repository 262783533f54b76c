//! A binary min-heap ordered by a caller-supplied comparator.
//!
//! Unlike [std::collections::BinaryHeap] the ordering is not taken from an [Ord] impl on the
//! items, which lets A* order nodes by cost while [PartialEq] on nodes keeps meaning
//! "same cell". Items with equal keys come out in insertion order.
use std::cmp::Ordering;

use crate::error::EmptyQueueError;

struct Entry<T> {
    item: T,
    seq: u64,
}

pub struct PriorityQueue<T, F>
where
    F: Fn(&T, &T) -> Ordering,
{
    heap: Vec<Entry<T>>,
    next_seq: u64,
    compare: F,
}

impl<T, F> PriorityQueue<T, F>
where
    F: Fn(&T, &T) -> Ordering,
{
    pub fn new(compare: F) -> PriorityQueue<T, F> {
        PriorityQueue {
            heap: Vec::new(),
            next_seq: 0,
            compare,
        }
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    /// Inserts an item. Duplicates are allowed.
    pub fn add(&mut self, item: T) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.heap.push(Entry { item, seq });
        self.sift_up(self.heap.len() - 1);
    }

    /// Removes and returns an item with minimal key, the oldest one among equal keys.
    pub fn remove_min(&mut self) -> Result<T, EmptyQueueError> {
        if self.heap.is_empty() {
            return Err(EmptyQueueError);
        }
        let last = self.heap.len() - 1;
        self.heap.swap(0, last);
        let entry = self.heap.pop().ok_or(EmptyQueueError)?;
        if !self.heap.is_empty() {
            self.sift_down(0);
        }
        Ok(entry.item)
    }

    /// Smallest item without removing it.
    pub fn peek(&self) -> Option<&T> {
        self.heap.first().map(|e| &e.item)
    }

    /// Iterates over the queued items in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.heap.iter().map(|e| &e.item)
    }

    fn less(&self, a: usize, b: usize) -> bool {
        let (ea, eb) = (&self.heap[a], &self.heap[b]);
        match (self.compare)(&ea.item, &eb.item) {
            Ordering::Equal => ea.seq < eb.seq,
            o => o == Ordering::Less,
        }
    }

    fn sift_up(&mut self, mut ix: usize) {
        while ix > 0 {
            let parent = (ix - 1) / 2;
            if !self.less(ix, parent) {
                break;
            }
            self.heap.swap(ix, parent);
            ix = parent;
        }
    }

    fn sift_down(&mut self, mut ix: usize) {
        let n = self.heap.len();
        loop {
            let left = 2 * ix + 1;
            let right = left + 1;
            let mut smallest = ix;
            if left < n && self.less(left, smallest) {
                smallest = left;
            }
            if right < n && self.less(right, smallest) {
                smallest = right;
            }
            if smallest == ix {
                break;
            }
            self.heap.swap(ix, smallest);
            ix = smallest;
        }
    }
}

impl<T: PartialEq, F> PriorityQueue<T, F>
where
    F: Fn(&T, &T) -> Ordering,
{
    /// Membership by the items' own equality, which for nodes means coordinates. Linear scan.
    pub fn contains(&self, item: &T) -> bool {
        self.iter().any(|x| x == item)
    }
}
