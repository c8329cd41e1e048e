//! Binary min-heap with a key → slot index for decrease-key.
//!
//! The heap array and the index are updated together on every swap, so the
//! slot recorded for a key is always the slot holding that key.

use std::cmp::Ordering;
use std::collections::HashMap;
use std::fmt;
use std::hash::Hash;

use crate::strategy::{ByValue, Identity, Natural, Order};

struct Slot<T, K, P> {
    key: K,
    item: T,
    priority: P,
}

/// A min-priority queue holding at most one entry per item identity.
///
/// Items with a lower priority (under `O`) are dequeued first. Items with
/// equal priority come out in an unspecified but deterministic order.
pub struct DecreaseKeyQueue<T, P, I: Identity<T> = ByValue, O = Natural> {
    heap: Vec<Slot<T, I::Key, P>>,
    index: HashMap<I::Key, usize>,
    identity: I,
    order: O,
}

impl<T, P> DecreaseKeyQueue<T, P>
where
    T: Hash + Eq + Clone,
    P: Ord,
{
    /// Create an empty queue using the items' own equality and the
    /// priorities' natural order.
    pub fn new() -> Self {
        Self::with_strategies(ByValue, Natural)
    }

    /// Create an empty queue with room for `capacity` entries.
    pub fn with_capacity(capacity: usize) -> Self {
        Self::with_capacity_and_strategies(capacity, ByValue, Natural)
    }
}

impl<T, P> Default for DecreaseKeyQueue<T, P>
where
    T: Hash + Eq + Clone,
    P: Ord,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<T, P, I, O> DecreaseKeyQueue<T, P, I, O>
where
    I: Identity<T>,
    O: Order<P>,
{
    /// Create an empty queue with custom identity and order strategies.
    pub fn with_strategies(identity: I, order: O) -> Self {
        Self::with_capacity_and_strategies(0, identity, order)
    }

    pub fn with_capacity_and_strategies(capacity: usize, identity: I, order: O) -> Self {
        Self {
            heap: Vec::with_capacity(capacity),
            index: HashMap::with_capacity(capacity),
            identity,
            order,
        }
    }

    /// Number of queued entries.
    #[inline]
    pub fn len(&self) -> usize {
        self.heap.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    /// Whether an entry with the same identity as `item` is queued.
    pub fn contains(&self, item: &T) -> bool {
        self.index.contains_key(&self.identity.key(item))
    }

    /// Current priority of the entry sharing `item`'s identity.
    pub fn priority_of(&self, item: &T) -> Option<&P> {
        let pos = *self.index.get(&self.identity.key(item))?;
        Some(&self.heap[pos].priority)
    }

    /// The minimum entry, without removing it.
    pub fn peek(&self) -> Option<(&T, &P)> {
        self.heap.first().map(|s| (&s.item, &s.priority))
    }

    /// Insert `item`, or lower the priority of its existing entry.
    ///
    /// If an entry with the same identity is already queued, it is replaced
    /// only when `priority` is strictly better than the queued one; otherwise
    /// the call is a no-op. Returns `true` when the queue changed.
    pub fn enqueue_if_better(&mut self, item: T, priority: P) -> bool {
        let key = self.identity.key(&item);
        match self.index.get(&key) {
            Some(&pos) => {
                if !self.order.less(&priority, &self.heap[pos].priority) {
                    return false;
                }
                let slot = &mut self.heap[pos];
                slot.item = item;
                slot.priority = priority;
                self.sift_up(pos);
            }
            None => {
                let pos = self.heap.len();
                self.index.insert(key.clone(), pos);
                self.heap.push(Slot {
                    key,
                    item,
                    priority,
                });
                self.sift_up(pos);
            }
        }
        debug_assert_eq!(self.heap.len(), self.index.len());
        true
    }

    /// Apply [`enqueue_if_better`](Self::enqueue_if_better) to every pair,
    /// in order. Returns how many calls changed the queue.
    pub fn enqueue_range_if_better<It>(&mut self, pairs: It) -> usize
    where
        It: IntoIterator<Item = (T, P)>,
    {
        let pairs = pairs.into_iter();
        let (lower, _) = pairs.size_hint();
        self.heap.reserve(lower);
        self.index.reserve(lower);
        let mut changed = 0;
        for (item, priority) in pairs {
            if self.enqueue_if_better(item, priority) {
                changed += 1;
            }
        }
        changed
    }

    /// Remove and return the minimum entry, or `None` when empty.
    pub fn try_dequeue(&mut self) -> Option<(T, P)> {
        let last = self.heap.len().checked_sub(1)?;
        self.swap(0, last);
        let slot = self.heap.pop()?;
        self.index.remove(&slot.key);
        if !self.heap.is_empty() {
            self.sift_down(0);
        }
        debug_assert_eq!(self.heap.len(), self.index.len());
        Some((slot.item, slot.priority))
    }

    /// Remove the entry sharing `item`'s identity, wherever it sits.
    pub fn remove(&mut self, item: &T) -> Option<(T, P)> {
        let pos = self.index.remove(&self.identity.key(item))?;
        let last = self.heap.len() - 1;
        self.swap(pos, last);
        let slot = self.heap.pop()?;
        if pos < self.heap.len() {
            let pos = self.sift_up(pos);
            self.sift_down(pos);
        }
        debug_assert_eq!(self.heap.len(), self.index.len());
        Some((slot.item, slot.priority))
    }

    /// Drop every entry, keeping the allocations.
    pub fn clear(&mut self) {
        self.heap.clear();
        self.index.clear();
    }

    /// Drain the queue into a vector ordered from minimum to maximum.
    pub fn into_sorted_vec(mut self) -> Vec<(T, P)> {
        let mut out = Vec::with_capacity(self.len());
        while let Some(entry) = self.try_dequeue() {
            out.push(entry);
        }
        out
    }

    // -----------------------------------------------------------------------
    // Heap maintenance
    // -----------------------------------------------------------------------

    #[inline]
    fn less_at(&self, a: usize, b: usize) -> bool {
        self.order.less(&self.heap[a].priority, &self.heap[b].priority)
    }

    /// Swap two slots and point both keys at their new positions.
    fn swap(&mut self, a: usize, b: usize) {
        if a == b {
            return;
        }
        self.heap.swap(a, b);
        if let Some(p) = self.index.get_mut(&self.heap[a].key) {
            *p = a;
        }
        if let Some(p) = self.index.get_mut(&self.heap[b].key) {
            *p = b;
        }
    }

    /// Move the slot at `pos` towards the root. Returns its final position.
    fn sift_up(&mut self, mut pos: usize) -> usize {
        while pos > 0 {
            let parent = (pos - 1) / 2;
            if !self.less_at(pos, parent) {
                break;
            }
            self.swap(pos, parent);
            pos = parent;
        }
        pos
    }

    fn sift_down(&mut self, mut pos: usize) {
        let len = self.heap.len();
        loop {
            let left = 2 * pos + 1;
            let right = left + 1;
            let mut smallest = pos;
            if left < len && self.less_at(left, smallest) {
                smallest = left;
            }
            if right < len && self.less_at(right, smallest) {
                smallest = right;
            }
            if smallest == pos {
                break;
            }
            self.swap(pos, smallest);
            pos = smallest;
        }
    }

    /// Full heap/index consistency check, used by tests.
    #[cfg(test)]
    fn assert_consistent(&self) {
        assert_eq!(self.heap.len(), self.index.len(), "index size drifted");
        for (pos, slot) in self.heap.iter().enumerate() {
            assert_eq!(self.index.get(&slot.key), Some(&pos), "stale index");
            if pos > 0 {
                let parent = (pos - 1) / 2;
                assert_ne!(
                    self.order
                        .compare(&self.heap[parent].priority, &slot.priority),
                    Ordering::Greater,
                    "heap order broken at {pos}"
                );
            }
        }
    }
}

impl<T, P, I, O> Extend<(T, P)> for DecreaseKeyQueue<T, P, I, O>
where
    I: Identity<T>,
    O: Order<P>,
{
    fn extend<It: IntoIterator<Item = (T, P)>>(&mut self, iter: It) {
        self.enqueue_range_if_better(iter);
    }
}

impl<T, P> FromIterator<(T, P)> for DecreaseKeyQueue<T, P>
where
    T: Hash + Eq + Clone,
    P: Ord,
{
    fn from_iter<It: IntoIterator<Item = (T, P)>>(iter: It) -> Self {
        let mut q = Self::new();
        q.enqueue_range_if_better(iter);
        q
    }
}

impl<T, P, I, O> fmt::Debug for DecreaseKeyQueue<T, P, I, O>
where
    T: fmt::Debug,
    P: fmt::Debug,
    I: Identity<T>,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(self.heap.iter().map(|s| (&s.item, &s.priority)))
            .finish()
    }
}
