//! Primitive long hash map
//!
//! Open addressing with linear probing over power-of-two tables.
//! Key `0` is the empty-slot marker, so it lives in a dedicated extra slot
//! at position `n`.

use tracing::trace;

/// Load factor at which the table grows
pub(crate) const LOAD_FACTOR: f64 = 0.75;

/// Tables never shrink below this many slots unless built smaller
const DEFAULT_TABLE_SIZE: usize = 16;

/// 2^64 / golden ratio, used to scatter keys
const LONG_PHI: u64 = 0x9E37_79B9_7F4A_7C15;

/// A `u64 → u64` hash map without boxing or per-entry allocation
#[derive(Debug, Clone)]
pub struct LongHashMap {
    /// Slot keys; `0` marks a free slot. Slot `n` holds the zero key.
    keys: Vec<u64>,
    values: Vec<u64>,
    /// `n - 1`, for wrapping probe positions
    mask: usize,
    contains_zero_key: bool,
    /// Current table size (power of two)
    n: usize,
    /// Number of entries that triggers a rehash
    max_fill: usize,
    /// Construction-time table size; shrinking stops here
    min_n: usize,
    len: usize,
}

impl LongHashMap {
    /// Create a map sized for `expected` entries
    pub fn with_capacity(expected: usize) -> Self {
        let n = array_size(expected);
        Self {
            keys: vec![0; n + 1],
            values: vec![0; n + 1],
            mask: n - 1,
            contains_zero_key: false,
            n,
            max_fill: max_fill(n),
            min_n: n,
            len: 0,
        }
    }

    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_TABLE_SIZE)
    }

    /// Insert or replace, returning the previous value
    pub fn insert(&mut self, key: u64, value: u64) -> Option<u64> {
        match self.find(key) {
            Ok(pos) => Some(std::mem::replace(&mut self.values[pos], value)),
            Err(pos) => {
                if pos == self.n {
                    self.contains_zero_key = true;
                }
                self.keys[pos] = key;
                self.values[pos] = value;
                let old_len = self.len;
                self.len += 1;
                if old_len >= self.max_fill {
                    self.rehash(array_size(self.len + 1));
                }
                None
            }
        }
    }

    pub fn get(&self, key: u64) -> Option<u64> {
        self.find(key).ok().map(|pos| self.values[pos])
    }

    pub fn contains_key(&self, key: u64) -> bool {
        self.find(key).is_ok()
    }

    /// Remove a key, returning its value
    pub fn remove(&mut self, key: u64) -> Option<u64> {
        let pos = self.find(key).ok()?;
        let old = self.values[pos];
        self.len -= 1;
        if pos == self.n {
            self.contains_zero_key = false;
        } else {
            self.shift_keys(pos);
        }
        if self.n > self.min_n && self.len < self.max_fill / 4 && self.n > DEFAULT_TABLE_SIZE {
            self.rehash(self.n / 2);
        }
        Some(old)
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Current number of slots (excluding the zero-key slot)
    pub fn table_size(&self) -> usize {
        self.n
    }

    /// Remove every entry, keeping the table size
    pub fn clear(&mut self) {
        if self.len == 0 {
            return;
        }
        self.len = 0;
        self.contains_zero_key = false;
        self.keys.fill(0);
    }

    /// Iterate entries in table order (unordered)
    pub fn iter(&self) -> impl Iterator<Item = (u64, u64)> + '_ {
        let zero = self
            .contains_zero_key
            .then(|| (self.keys[self.n], self.values[self.n]));
        zero.into_iter().chain(
            self.keys[..self.n]
                .iter()
                .zip(&self.values[..self.n])
                .filter(|(k, _)| **k != 0)
                .map(|(k, v)| (*k, *v)),
        )
    }

    // =========================================================================
    // Internal
    // =========================================================================

    /// `Ok(slot)` when present, `Err(free slot)` otherwise
    fn find(&self, key: u64) -> Result<usize, usize> {
        if key == 0 {
            return if self.contains_zero_key {
                Ok(self.n)
            } else {
                Err(self.n)
            };
        }
        // There's always an unused slot, so probing terminates.
        let mut pos = (mix(key) as usize) & self.mask;
        loop {
            let curr = self.keys[pos];
            if curr == 0 {
                return Err(pos);
            }
            if curr == key {
                return Ok(pos);
            }
            pos = (pos + 1) & self.mask;
        }
    }

    /// Close the gap at `pos` by moving later entries of the same probe run back
    fn shift_keys(&mut self, mut pos: usize) {
        loop {
            let last = pos;
            pos = (pos + 1) & self.mask;
            let curr = loop {
                let curr = self.keys[pos];
                if curr == 0 {
                    self.keys[last] = 0;
                    return;
                }
                let slot = (mix(curr) as usize) & self.mask;
                let movable = if last <= pos {
                    last >= slot || slot > pos
                } else {
                    last >= slot && slot > pos
                };
                if movable {
                    break curr;
                }
                pos = (pos + 1) & self.mask;
            };
            self.keys[last] = curr;
            self.values[last] = self.values[pos];
        }
    }

    fn rehash(&mut self, new_n: usize) {
        trace!(from = self.n, to = new_n, entries = self.len, "Rehashing long map");
        let mask = new_n - 1;
        let mut new_keys = vec![0u64; new_n + 1];
        let mut new_values = vec![0u64; new_n + 1];

        for i in 0..self.n {
            let key = self.keys[i];
            if key == 0 {
                continue;
            }
            let mut pos = (mix(key) as usize) & mask;
            while new_keys[pos] != 0 {
                pos = (pos + 1) & mask;
            }
            new_keys[pos] = key;
            new_values[pos] = self.values[i];
        }
        new_values[new_n] = self.values[self.n];

        self.n = new_n;
        self.mask = mask;
        self.max_fill = max_fill(new_n);
        self.keys = new_keys;
        self.values = new_values;
    }
}

impl Default for LongHashMap {
    fn default() -> Self {
        Self::new()
    }
}

/// Scramble the bits of a key (golden-ratio multiply, then xor-shift twice)
pub(crate) fn mix(x: u64) -> u64 {
    let h = x.wrapping_mul(LONG_PHI);
    let h = h ^ (h >> 32);
    h ^ (h >> 16)
}

/// Smallest power-of-two table that holds `expected` entries under the load factor
pub(crate) fn array_size(expected: usize) -> usize {
    let needed = (expected as f64 / LOAD_FACTOR).ceil() as usize;
    needed.max(2).next_power_of_two()
}

/// Entries allowed before a rehash; always leaves one free slot
pub(crate) fn max_fill(n: usize) -> usize {
    ((n as f64 * LOAD_FACTOR).ceil() as usize).min(n - 1)
}
