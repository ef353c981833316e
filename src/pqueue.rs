use std::collections::VecDeque;

const WORD_BITS: usize = 64;

/// A bucketed priority queue which supports amortized O(1) pop-min.
///
/// Items pop lowest `priority` first; among equal priorities the greatest
/// `depth` pops first, and among equal depths the oldest item pops first.
/// Buckets grow on demand, so priorities are unbounded.
pub struct PriorityQueue<T> {
    buckets: Vec<Bucket<T>>,
    // One bit per priority bucket that holds at least one item
    bitmap: Vec<u64>,
    len: usize,
}

struct Bucket<T> {
    by_depth: Vec<VecDeque<T>>,
    // No item is deeper than this
    deepest: usize,
    len: usize,
}

impl<T> Bucket<T> {
    fn new() -> Self {
        Self {
            by_depth: Vec::new(),
            deepest: 0,
            len: 0,
        }
    }

    fn push(&mut self, depth: usize, item: T) {
        if depth >= self.by_depth.len() {
            self.by_depth.resize_with(depth + 1, VecDeque::new);
        }
        self.by_depth[depth].push_back(item);
        self.deepest = self.deepest.max(depth);
        self.len += 1;
    }

    fn pop(&mut self) -> Option<T> {
        if self.len == 0 {
            return None;
        }
        while self.by_depth[self.deepest].is_empty() {
            self.deepest -= 1;
        }
        let item = self.by_depth[self.deepest].pop_front()?;
        self.len -= 1;
        Some(item)
    }
}

impl<T> PriorityQueue<T> {
    pub fn new() -> Self {
        Self {
            buckets: Vec::new(),
            bitmap: Vec::new(),
            len: 0,
        }
    }

    pub fn push(&mut self, priority: usize, depth: usize, item: T) {
        if priority >= self.buckets.len() {
            self.buckets.resize_with(priority + 1, Bucket::new);
        }
        self.buckets[priority].push(depth, item);

        // Update bitmap
        let word_idx = priority / WORD_BITS;
        let bit_idx = priority % WORD_BITS;
        if word_idx >= self.bitmap.len() {
            self.bitmap.resize(word_idx + 1, 0);
        }
        self.bitmap[word_idx] |= 1u64 << bit_idx;
        self.len += 1;
    }

    pub fn pop_min(&mut self) -> Option<T> {
        // Find first non-empty word, then first non-empty bucket in it
        let word_idx = self.bitmap.iter().position(|&word| word != 0)?;
        let bit_idx = self.bitmap[word_idx].trailing_zeros() as usize;
        let priority = word_idx * WORD_BITS + bit_idx;

        let bucket = &mut self.buckets[priority];
        let item = bucket.pop()?;
        if bucket.len == 0 {
            self.bitmap[word_idx] &= !(1u64 << bit_idx);
        }
        self.len -= 1;

        Some(item)
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

impl<T> Default for PriorityQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}
