//! Line scanning
//!
//! A line ends at `\n`, `\r\n`, `\r` or the end of the channel. Terminator
//! bytes are consumed with the line but never returned.
//!
//! ## Direction
//! ```text
//! forward  (start cursor):  stop on LF;  on CR look ahead for LF
//! backward (end cursor):    stop on CR;  on LF look behind for CR
//! ```
//!
//! Backward scans collect bytes last-first and reverse them before
//! returning.

use crate::channel::Access;
use crate::codec::{Charset, CARRIAGE_RETURN, LINE_FEED};
use crate::cursor::Side;
use crate::error::{ChannelError, Result};

/// Line operations for every [`Access`] type
pub trait LineOps: Access + Sized {
    /// Scan one line at the `side` cursor, feeding content bytes to `collect`
    /// in scan order.
    ///
    /// With `consume` the scanned bytes (terminator included) are forgotten
    /// instead of stepped over. Returns `false` when no bytes remained.
    fn scan_line<F: FnMut(u8)>(&mut self, side: Side, consume: bool, mut collect: F) -> Result<bool> {
        // (stops the line outright, may pair with the following byte, its pair)
        let (stop, lead, pair) = match side {
            Side::Start => (LINE_FEED, CARRIAGE_RETURN, LINE_FEED),
            Side::End => (CARRIAGE_RETURN, LINE_FEED, CARRIAGE_RETURN),
        };

        if !self.load_or_none(side, 1, consume)? {
            return Ok(false);
        }
        loop {
            let byte = self.loaded()[0];
            if byte == stop {
                break;
            }
            if byte == lead {
                absorb_pair(self, side, consume, pair)?;
                break;
            }
            collect(byte);
            if !self.load_or_none(side, 1, consume)? {
                break;
            }
        }
        Ok(true)
    }

    // =========================================================================
    // Bytes
    // =========================================================================

    fn peek_line_bytes(&mut self) -> Result<Vec<u8>> {
        required(line_bytes(self, Side::Start, false)?)
    }

    fn peek_line_bytes_or_none(&mut self) -> Result<Option<Vec<u8>>> {
        line_bytes(self, Side::Start, false)
    }

    fn peek_last_line_bytes(&mut self) -> Result<Vec<u8>> {
        required(line_bytes(self, Side::End, false)?)
    }

    fn peek_last_line_bytes_or_none(&mut self) -> Result<Option<Vec<u8>>> {
        line_bytes(self, Side::End, false)
    }

    fn pop_line_bytes(&mut self) -> Result<Vec<u8>> {
        required(line_bytes(self, Side::Start, true)?)
    }

    fn pop_line_bytes_or_none(&mut self) -> Result<Option<Vec<u8>>> {
        line_bytes(self, Side::Start, true)
    }

    fn pop_last_line_bytes(&mut self) -> Result<Vec<u8>> {
        required(line_bytes(self, Side::End, true)?)
    }

    fn pop_last_line_bytes_or_none(&mut self) -> Result<Option<Vec<u8>>> {
        line_bytes(self, Side::End, true)
    }

    // =========================================================================
    // Strings (UTF-8)
    // =========================================================================

    fn peek_line(&mut self) -> Result<String> {
        self.peek_line_bytes().map(|b| Charset::Utf8.decode(&b))
    }

    fn peek_line_or_none(&mut self) -> Result<Option<String>> {
        Ok(self.peek_line_bytes_or_none()?.map(|b| Charset::Utf8.decode(&b)))
    }

    fn peek_last_line(&mut self) -> Result<String> {
        self.peek_last_line_bytes().map(|b| Charset::Utf8.decode(&b))
    }

    fn peek_last_line_or_none(&mut self) -> Result<Option<String>> {
        Ok(self.peek_last_line_bytes_or_none()?.map(|b| Charset::Utf8.decode(&b)))
    }

    fn pop_line(&mut self) -> Result<String> {
        self.pop_line_bytes().map(|b| Charset::Utf8.decode(&b))
    }

    fn pop_line_or_none(&mut self) -> Result<Option<String>> {
        Ok(self.pop_line_bytes_or_none()?.map(|b| Charset::Utf8.decode(&b)))
    }

    fn pop_last_line(&mut self) -> Result<String> {
        self.pop_last_line_bytes().map(|b| Charset::Utf8.decode(&b))
    }

    fn pop_last_line_or_none(&mut self) -> Result<Option<String>> {
        Ok(self.pop_last_line_bytes_or_none()?.map(|b| Charset::Utf8.decode(&b)))
    }

    /// Decode the next line with an explicit charset
    fn peek_line_in(&mut self, charset: Charset) -> Result<String> {
        self.peek_line_bytes().map(|b| charset.decode(&b))
    }

    fn pop_line_in(&mut self, charset: Charset) -> Result<String> {
        self.pop_line_bytes().map(|b| charset.decode(&b))
    }

    // =========================================================================
    // Drop
    // =========================================================================

    /// Forget the next line; `false` when nothing remained
    fn drop_line(&mut self) -> Result<bool> {
        self.scan_line(Side::Start, true, |_| {})
    }

    fn drop_last_line(&mut self) -> Result<bool> {
        self.scan_line(Side::End, true, |_| {})
    }

    // =========================================================================
    // Whole channel
    // =========================================================================

    /// Every line from the first index on, in order (or reversed).
    ///
    /// The start cursor is restored afterwards, also when a read fails.
    fn peek_all_lines(&mut self, reversed: bool) -> Result<Vec<String>> {
        let saved = self.cursor(Side::Start).index();
        self.cursor(Side::Start).move_to(0);

        let mut lines = Vec::new();
        let outcome = loop {
            match self.peek_line_or_none() {
                Ok(Some(line)) => lines.push(line),
                Ok(None) => break Ok(()),
                Err(e) => break Err(e),
            }
        };
        self.cursor(Side::Start).move_to(saved);
        outcome?;

        if reversed {
            lines.reverse();
        }
        Ok(lines)
    }

    // =========================================================================
    // Line boundaries
    // =========================================================================

    /// Index of the first byte of the line containing `index`
    fn line_start(&mut self, index: u64) -> Result<u64> {
        let mut i = index.min(self.size());
        while i > 0 {
            self.load_at(i - 1, 1)?;
            let byte = self.loaded()[0];
            if byte == LINE_FEED || byte == CARRIAGE_RETURN {
                break;
            }
            i -= 1;
        }
        Ok(i)
    }

    /// Index just past the terminator of the line containing `index`,
    /// `None` when that line runs to the end of the channel
    fn next_line_start(&mut self, index: u64) -> Result<Option<u64>> {
        let size = self.size();
        let mut i = index;
        while i < size {
            self.load_at(i, 1)?;
            match self.loaded()[0] {
                LINE_FEED => return Ok(Some(i + 1)),
                CARRIAGE_RETURN => {
                    if i + 1 < size {
                        self.load_at(i + 1, 1)?;
                        if self.loaded()[0] == LINE_FEED {
                            return Ok(Some(i + 2));
                        }
                    }
                    return Ok(Some(i + 1));
                }
                _ => i += 1,
            }
        }
        Ok(None)
    }

    /// Index of the first byte of the line before the one containing `index`,
    /// `None` when `index` is already on the first line
    fn previous_line_start(&mut self, index: u64) -> Result<Option<u64>> {
        let current = self.line_start(index)?;
        if current == 0 {
            return Ok(None);
        }
        // Step over the terminator that ends the previous line
        let mut end = current - 1;
        if end > 0 {
            self.load_at(end, 1)?;
            if self.loaded()[0] == LINE_FEED {
                self.load_at(end - 1, 1)?;
                if self.loaded()[0] == CARRIAGE_RETURN {
                    end -= 1;
                }
            }
        }
        self.line_start(end).map(Some)
    }
}

impl<A: Access> LineOps for A {}

fn line_bytes<A: LineOps>(channel: &mut A, side: Side, consume: bool) -> Result<Option<Vec<u8>>> {
    let mut line = Vec::new();
    if !channel.scan_line(side, consume, |b| line.push(b))? {
        return Ok(None);
    }
    if side == Side::End {
        line.reverse();
    }
    Ok(Some(line))
}

fn required(line: Option<Vec<u8>>) -> Result<Vec<u8>> {
    line.ok_or_else(|| ChannelError::Empty("no line remains".to_string()))
}

/// After a `lead` terminator byte, also take the next byte when it is `pair`
fn absorb_pair<A: Access>(channel: &mut A, side: Side, consume: bool, pair: u8) -> Result<()> {
    let size = channel.size() as i64;
    let next = channel.cursor(side).index();
    if next < 0 || next >= size {
        return Ok(());
    }
    channel.load_at(next as u64, 1)?;
    if channel.loaded()[0] != pair {
        return Ok(());
    }
    if consume {
        channel.forget(next as u64, 1)
    } else {
        let cursor = channel.cursor(side);
        match side {
            Side::Start => cursor.move_right(1),
            Side::End => cursor.move_left(1),
        };
        Ok(())
    }
}
