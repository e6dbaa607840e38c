//! Cursor handles
//!
//! [`CursorMut`] borrows a channel together with one of its cursors, which
//! is what line-relative movement and `move_temporarily` need: both read
//! channel content while moving the cursor.

use crate::channel::Access;
use crate::cursor::Side;
use crate::error::Result;

use super::LineOps;

/// A mutable handle on one cursor of a channel
#[derive(Debug)]
pub struct CursorMut<'a, A: Access> {
    channel: &'a mut A,
    side: Side,
}

impl<'a, A: Access> CursorMut<'a, A> {
    pub fn side(&self) -> Side {
        self.side
    }

    pub fn index(&mut self) -> i64 {
        self.channel.cursor(self.side).index()
    }

    pub fn move_to(&mut self, index: i64) -> &mut Self {
        self.channel.cursor(self.side).move_to(index);
        self
    }

    pub fn move_right(&mut self, count: i64) -> &mut Self {
        self.channel.cursor(self.side).move_right(count);
        self
    }

    pub fn move_left(&mut self, count: i64) -> &mut Self {
        self.channel.cursor(self.side).move_left(count);
        self
    }

    pub fn remember(&mut self) -> &mut Self {
        self.channel.cursor(self.side).remember();
        self
    }

    pub fn restore(&mut self) -> &mut Self {
        self.channel.cursor(self.side).restore();
        self
    }

    pub fn reset(&mut self) -> &mut Self {
        self.channel.cursor(self.side).reset();
        self
    }

    pub fn is_reach_start(&mut self) -> bool {
        self.channel.cursor(self.side).is_reach_start()
    }

    pub fn is_reach_end(&mut self) -> bool {
        let last_index = self.channel.size() as i64 - 1;
        self.channel.cursor(self.side).is_reach_end(last_index)
    }

    /// Remember, run `action`, restore. The restore also happens when
    /// `action` fails.
    pub fn move_temporarily<R>(&mut self, action: impl FnOnce(&mut A) -> Result<R>) -> Result<R> {
        self.remember();
        let outcome = action(self.channel);
        self.restore();
        outcome
    }
}

impl<'a, A: LineOps> CursorMut<'a, A> {
    /// Move to the start of the previous line
    pub fn move_up(&mut self) -> Result<&mut Self> {
        self.move_up_by(1)
    }

    /// Move up `lines` times, stopping at the first index
    pub fn move_up_by(&mut self, lines: usize) -> Result<&mut Self> {
        let mut index = self.clamped_index();
        for _ in 0..lines {
            match self.channel.previous_line_start(index)? {
                Some(start) => index = start,
                None => {
                    index = 0;
                    break;
                }
            }
        }
        Ok(self.move_to(index as i64))
    }

    /// Move to the start of the next line
    pub fn move_down(&mut self) -> Result<&mut Self> {
        self.move_down_by(1)
    }

    /// Move down `lines` times, clamping to the last index
    pub fn move_down_by(&mut self, lines: usize) -> Result<&mut Self> {
        let size = self.channel.size();
        if size == 0 {
            return Ok(self);
        }
        let last_index = size - 1;
        let mut index = self.clamped_index();
        for _ in 0..lines {
            match self.channel.next_line_start(index)? {
                Some(next) if next <= last_index => index = next,
                _ => {
                    index = last_index;
                    break;
                }
            }
        }
        Ok(self.move_to(index as i64))
    }

    fn clamped_index(&mut self) -> u64 {
        let size = self.channel.size() as i64;
        self.index().clamp(0, size) as u64
    }
}

/// Cursor access for every [`Access`] type
pub trait CursorOps: Access + Sized {
    fn start_cursor(&mut self) -> CursorMut<'_, Self> {
        CursorMut {
            channel: self,
            side: Side::Start,
        }
    }

    fn end_cursor(&mut self) -> CursorMut<'_, Self> {
        CursorMut {
            channel: self,
            side: Side::End,
        }
    }
}

impl<A: Access> CursorOps for A {}
