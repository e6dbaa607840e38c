//! Index Module
//!
//! Tracks which physical bytes have been dropped so a channel can hide them
//! without rewriting its source.
//!
//! ## Model
//! ```text
//! real:     0   1   2   3   4   5   6
//!           a   b   x   x   c   x   d        (x = forgotten)
//! virtual:  0   1           2       3
//! runs:             [2, 2)      [5, 1)       (start, len)
//! ```
//!
//! Dropped bytes are kept as maximal runs. Adjacent runs always merge, so
//! popping contiguous bytes from either end grows one run in place.
//!
//! - `starts`: real start of each run, ascending ([`LongArrayList`])
//! - `before`: bytes dropped ahead of each run ([`LongArrayList`])
//! - `lengths`: run start → run length ([`LongHashMap`])
//!
//! A run sits at virtual position `start - before`, which strictly increases
//! from run to run. The real index of virtual `v` is `v` plus everything
//! dropped in the runs at or before `v`, found by binary search.

mod long_list;
mod long_map;

pub use long_list::LongArrayList;
pub use long_map::LongHashMap;

/// Virtual → real index remapping for dropped bytes
#[derive(Debug, Clone)]
pub struct IndexMap {
    /// Real start of each dropped run, ascending
    starts: LongArrayList,
    /// Bytes dropped ahead of each run
    before: LongArrayList,
    /// Run start → run length
    lengths: LongHashMap,
    /// Total dropped bytes
    dropped: u64,
}

impl IndexMap {
    /// Create a map sized for `capacity` dropped runs
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            starts: LongArrayList::with_capacity(capacity),
            before: LongArrayList::with_capacity(capacity),
            lengths: LongHashMap::with_capacity(capacity),
            dropped: 0,
        }
    }

    /// Physical position of `virtual_index`. Identity when nothing was dropped.
    pub fn real_index(&self, virtual_index: u64) -> u64 {
        match self.runs_through(virtual_index) {
            0 => virtual_index,
            i => virtual_index + self.dropped_through(i - 1),
        }
    }

    /// Position in the current view of a surviving real index, `None` if it was dropped
    pub fn virtual_index(&self, real_index: u64) -> Option<u64> {
        let i = self.starts.as_slice().partition_point(|&s| s <= real_index);
        if i == 0 {
            return Some(real_index);
        }
        if real_index < self.end(i - 1) {
            return None;
        }
        Some(real_index - self.dropped_through(i - 1))
    }

    /// Whether the byte at `real_index` was dropped
    pub fn is_forgotten(&self, real_index: u64) -> bool {
        self.virtual_index(real_index).is_none()
    }

    /// Length of the dropped run starting exactly at `real_index`
    pub fn run_length(&self, real_index: u64) -> Option<u64> {
        self.lengths.get(real_index)
    }

    /// Drop the byte currently visible at `virtual_index`, returning its real index
    pub fn forget(&mut self, virtual_index: u64) -> u64 {
        let real = self.real_index(virtual_index);
        self.absorb(real, real + 1, 1);
        real
    }

    /// Drop `count` visible bytes starting at `virtual_index`
    pub fn forget_range(&mut self, virtual_index: u64, count: u64) {
        if count == 0 {
            return;
        }
        let first = self.real_index(virtual_index);
        let last = self.real_index(virtual_index + count - 1) + 1;
        self.absorb(first, last, count);
    }

    /// Split `count` visible bytes starting at `virtual_index` into
    /// contiguous physical runs `(real_start, len)`
    pub fn runs(&self, virtual_index: u64, count: u64) -> Vec<(u64, u64)> {
        let mut runs = Vec::new();
        if count == 0 {
            return runs;
        }
        let starts = self.starts.as_slice();
        let mut i = self.runs_through(virtual_index);
        let mut real = self.real_index(virtual_index);
        let mut remaining = count;

        while remaining > 0 {
            let len = match starts.get(i) {
                Some(&next) => (next - real).min(remaining),
                None => remaining,
            };
            runs.push((real, len));
            remaining -= len;
            if remaining == 0 {
                break;
            }
            real = self.end(i);
            i += 1;
        }
        runs
    }

    /// Number of dropped bytes
    pub fn forgotten_count(&self) -> u64 {
        self.dropped
    }

    pub fn is_empty(&self) -> bool {
        self.dropped == 0
    }

    /// Dropped runs `(real_start, len)` in ascending order
    pub fn forgotten_runs(&self) -> impl Iterator<Item = (u64, u64)> + '_ {
        self.starts
            .iter()
            .map(move |start| (start, self.lengths.get(start).unwrap_or(0)))
    }

    /// Every dropped real index in ascending order
    pub fn forgotten(&self) -> Vec<u64> {
        self.forgotten_runs()
            .flat_map(|(start, len)| start..start + len)
            .collect()
    }

    pub fn clear(&mut self) {
        self.starts.clear();
        self.before.clear();
        self.lengths.clear();
        self.dropped = 0;
    }

    // =========================================================================
    // Internal Helpers
    // =========================================================================

    /// Mark the real span `[first, last)` dropped. Exactly `count` of its
    /// bytes were still visible; the rest belong to runs being swallowed.
    fn absorb(&mut self, first: u64, last: u64, count: u64) {
        // Runs ending at `first` or starting at `last` touch the span and merge
        let lo = self.partition(|map, i| map.end(i) < first);
        let hi = self.starts.as_slice().partition_point(|&s| s <= last);

        let before = self.before.get(lo).unwrap_or(self.dropped);
        let (mut start, mut end) = (first, last);
        if lo < hi {
            start = start.min(self.start(lo));
            end = end.max(self.end(hi - 1));
        }
        for i in lo..hi {
            let swallowed = self.start(i);
            self.lengths.remove(swallowed);
        }

        self.starts.splice(lo..hi, start);
        self.before.splice(lo..hi, before);
        self.before.offset_from(lo + 1, count);
        self.lengths.insert(start, end - start);
        self.dropped += count;
    }

    /// Number of runs whose virtual position is at or before `virtual_index`
    fn runs_through(&self, virtual_index: u64) -> usize {
        self.partition(|map, i| map.start(i) - map.before_run(i) <= virtual_index)
    }

    /// First run index for which `pred` is false; `pred` must hold for a prefix
    fn partition(&self, pred: impl Fn(&Self, usize) -> bool) -> usize {
        let (mut lo, mut hi) = (0usize, self.starts.len());
        while lo < hi {
            let mid = lo + (hi - lo) / 2;
            if pred(self, mid) {
                lo = mid + 1;
            } else {
                hi = mid;
            }
        }
        lo
    }

    fn start(&self, i: usize) -> u64 {
        self.starts.as_slice()[i]
    }

    fn before_run(&self, i: usize) -> u64 {
        self.before.as_slice()[i]
    }

    fn end(&self, i: usize) -> u64 {
        let start = self.start(i);
        start + self.lengths.get(start).unwrap_or(0)
    }

    /// Bytes dropped up to and including run `i`
    fn dropped_through(&self, i: usize) -> u64 {
        self.before_run(i) + (self.end(i) - self.start(i))
    }
}

impl Default for IndexMap {
    fn default() -> Self {
        Self::with_capacity(16)
    }
}
