//! Primitive long array list
//!
//! A growable `u64` array that grows by half its size, with the bulk edits
//! the index map needs.

use std::ops::Range;

use crate::error::{ChannelError, Result};

/// Capacity handed out on the first push into an empty list
const FIRST_CAPACITY: usize = 10;

/// Resizable array of `u64`
#[derive(Debug, Clone, Default)]
pub struct LongArrayList {
    elements: Vec<u64>,
}

impl LongArrayList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            elements: Vec::with_capacity(capacity),
        }
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<u64> {
        self.elements.get(index).copied()
    }

    /// Replace the element at `index`, returning the old one
    pub fn set(&mut self, index: usize, element: u64) -> Result<u64> {
        let len = self.len();
        let slot = self
            .elements
            .get_mut(index)
            .ok_or_else(|| out_of_bounds(index, len))?;
        Ok(std::mem::replace(slot, element))
    }

    pub fn add(&mut self, element: u64) {
        self.grow_for(1);
        self.elements.push(element);
    }

    /// Insert at `index`, shifting later elements right
    pub fn add_at(&mut self, index: usize, element: u64) -> Result<()> {
        if index > self.len() {
            return Err(out_of_bounds(index, self.len()));
        }
        self.grow_for(1);
        self.elements.insert(index, element);
        Ok(())
    }

    pub fn remove_at(&mut self, index: usize) -> Result<u64> {
        if index >= self.len() {
            return Err(out_of_bounds(index, self.len()));
        }
        Ok(self.elements.remove(index))
    }

    pub fn contains(&self, element: u64) -> bool {
        self.elements.contains(&element)
    }

    pub fn clear(&mut self) {
        self.elements.clear();
    }

    pub fn as_slice(&self) -> &[u64] {
        &self.elements
    }

    pub fn iter(&self) -> impl Iterator<Item = u64> + '_ {
        self.elements.iter().copied()
    }

    // =========================================================================
    // Bulk edits
    // =========================================================================

    /// Replace the elements in `range` with a single `element`
    ///
    /// # Panics
    /// If `range` is out of bounds, as with [`Vec::splice`].
    pub fn splice(&mut self, range: Range<usize>, element: u64) {
        if range.is_empty() {
            self.grow_for(1);
        }
        self.elements.splice(range, std::iter::once(element));
    }

    /// Add `delta` to every element from `index` on
    pub fn offset_from(&mut self, index: usize, delta: u64) {
        if let Some(tail) = self.elements.get_mut(index..) {
            for element in tail {
                *element += delta;
            }
        }
    }

    /// Grow by ~50% when full
    fn grow_for(&mut self, extra: usize) {
        let len = self.elements.len();
        if len + extra <= self.elements.capacity() {
            return;
        }
        let target = if len == 0 {
            FIRST_CAPACITY.max(extra)
        } else {
            (len + (len >> 1) + 1).max(len + extra)
        };
        self.elements.reserve_exact(target - len);
    }
}

fn out_of_bounds(index: usize, len: usize) -> ChannelError {
    ChannelError::IndexOutOfBounds(format!("index: {} size: {}", index, len))
}
