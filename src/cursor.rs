//! Cursor
//!
//! A movable logical position inside a channel.
//!
//! Each channel owns two: the start cursor drives forward reads and names
//! the next byte to consume, the end cursor drives backward (`*_last`) reads
//! and names the last byte not yet consumed from the back.
//!
//! ```text
//!  O  N  E  _  L  I  N  E
//!  ^                    ^
//!  start (0)            end (7)
//! ```
//!
//! Moves are not bounds-checked here; the operation that consumes the index
//! validates it.

/// Which end of the channel a cursor serves
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Start,
    End,
}

/// A read/write position with a remember slot and a home index
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cursor {
    side: Side,
    index: i64,
    remembered: i64,
    /// Index captured at construction, used by `reset`
    home: i64,
}

impl Cursor {
    pub(crate) fn new(side: Side, home: i64) -> Self {
        Self {
            side,
            index: home,
            remembered: home,
            home,
        }
    }

    pub fn side(&self) -> Side {
        self.side
    }

    pub fn index(&self) -> i64 {
        self.index
    }

    pub fn home(&self) -> i64 {
        self.home
    }

    pub fn remembered(&self) -> i64 {
        self.remembered
    }

    pub fn move_to(&mut self, index: i64) -> &mut Self {
        self.index = index;
        self
    }

    pub fn move_right(&mut self, count: i64) -> &mut Self {
        self.index = self.index.saturating_add(count);
        self
    }

    pub fn move_left(&mut self, count: i64) -> &mut Self {
        self.index = self.index.saturating_sub(count);
        self
    }

    /// Save the current index (single slot, last write wins)
    pub fn remember(&mut self) -> &mut Self {
        self.remembered = self.index;
        self
    }

    pub fn restore(&mut self) -> &mut Self {
        self.index = self.remembered;
        self
    }

    /// Return to the index this cursor was created at
    pub fn reset(&mut self) -> &mut Self {
        self.index = self.home;
        self
    }

    pub fn is_reach_start(&self) -> bool {
        self.index <= 0
    }

    pub fn is_reach_end(&self, last_index: i64) -> bool {
        self.index >= last_index
    }

    // =========================================================================
    // Content-change tracking
    //
    // Both cursors are handled as gaps between bytes: the start cursor sits
    // in front of its byte, the end cursor behind its byte.
    // =========================================================================

    fn gap(&self) -> i64 {
        match self.side {
            Side::Start => self.index,
            Side::End => self.index.saturating_add(1),
        }
    }

    fn set_gap(&mut self, gap: i64) {
        self.index = match self.side {
            Side::Start => gap,
            Side::End => gap.saturating_sub(1),
        };
    }

    /// Follow the removal of virtual indices `[start, end)`
    pub(crate) fn on_removed(&mut self, start: u64, end: u64) {
        let (a, b) = (start as i64, end as i64);
        let gap = self.gap();
        if gap >= b {
            self.set_gap(gap.saturating_sub(b - a));
        } else if gap > a {
            self.set_gap(a);
        }
    }

    /// Follow the insertion of `count` bytes at virtual index `at`.
    ///
    /// A start cursor sitting exactly at `at` stays in front of the new
    /// bytes; an end cursor sitting exactly there moves behind them.
    pub(crate) fn on_inserted(&mut self, at: u64, count: u64) {
        let a = at as i64;
        let gap = self.gap();
        let shifts = match self.side {
            Side::Start => gap > a,
            Side::End => gap >= a,
        };
        if shifts {
            self.set_gap(gap.saturating_add(count as i64));
        }
    }
}
