use std::collections::{BinaryHeap, HashSet};

/// Heap entry, ordered by `(key, seq)` ascending.
///
/// `seq` grows with every push, so among equal keys the earliest insertion
/// pops first.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
struct Entry {
    key: u32,
    seq: u64,
    idx: usize,
}

impl Ord for Entry {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        // Reverse so BinaryHeap (max-heap) pops the smallest (key, seq) first.
        other
            .key
            .cmp(&self.key)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

impl PartialOrd for Entry {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

/// Priority frontier of cell indices without decrease-key.
///
/// A better key for a queued cell is pushed as a new entry; the entry left
/// behind becomes stale and is recognised by the caller when popped. The
/// membership set answers "is this cell queued?" without scanning the heap.
#[derive(Debug, Default)]
pub(crate) struct Frontier {
    heap: BinaryHeap<Entry>,
    members: HashSet<usize>,
    next_seq: u64,
}

impl Frontier {
    /// Empty the frontier and restart the sequence counter.
    pub(crate) fn clear(&mut self) {
        self.heap.clear();
        self.members.clear();
        self.next_seq = 0;
    }

    /// Queue `idx` with priority `key`.
    pub(crate) fn push(&mut self, idx: usize, key: u32) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.heap.push(Entry { key, seq, idx });
        self.members.insert(idx);
    }

    /// Pop the entry with the smallest `(key, seq)` and drop the cell from
    /// the membership set.
    pub(crate) fn pop(&mut self) -> Option<(usize, u32)> {
        let e = self.heap.pop()?;
        self.members.remove(&e.idx);
        Some((e.idx, e.key))
    }

    #[inline]
    pub(crate) fn contains(&self, idx: usize) -> bool {
        self.members.contains(&idx)
    }

    #[cfg(test)]
    pub(crate) fn len(&self) -> usize {
        self.heap.len()
    }
}
