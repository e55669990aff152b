//! Line-oriented tag source
//!
//! The reader sends one newline-terminated tag string per scan. `LineSource`
//! wraps any buffered reader and turns it into a `TagSource`:
//!
//! - A read timeout (`TimedOut`/`WouldBlock`) yields `Ok(None)`. Bytes of a
//!   partially received line are kept and completed on the next call.
//! - A complete line is decoded as UTF-8 and stripped of surrounding
//!   whitespace. Blank lines yield `Ok(None)`.
//! - End of input yields `Ok(None)` once any trailing unterminated line has
//!   been returned.
//! - A line reaching `MAX_LINE_BYTES` without a newline is discarded up to
//!   and including its eventual newline, yielding `Ok(None)`.

use crate::core::TagSource;
use crate::types::{LedgerError, TagId};
use std::io::{BufRead, ErrorKind, Read};

/// Longest line kept in memory while waiting for its newline
pub const MAX_LINE_BYTES: usize = 1024;

/// Tag source reading newline-terminated lines from a buffered reader
#[derive(Debug)]
pub struct LineSource<R> {
    reader: R,
    pending: Vec<u8>,
    discarding: bool,
}

impl<R: BufRead> LineSource<R> {
    pub fn new(reader: R) -> Self {
        LineSource {
            reader,
            pending: Vec::new(),
            discarding: false,
        }
    }

    /// Drop the pending bytes of an oversized line
    ///
    /// Returns `true` while the current line is being skipped.
    fn skip_oversized(&mut self) -> bool {
        let terminated = self.pending.last() == Some(&b'\n');

        if self.discarding {
            self.pending.clear();
            self.discarding = !terminated;
            return true;
        }

        if !terminated && self.pending.len() >= MAX_LINE_BYTES {
            log::warn!(
                "Discarding reader line longer than {} bytes without a newline",
                MAX_LINE_BYTES
            );
            self.pending.clear();
            self.discarding = true;
            return true;
        }

        false
    }

    fn take_line(&mut self) -> Result<Option<TagId>, LedgerError> {
        let raw = String::from_utf8(std::mem::take(&mut self.pending))?;
        let tag = raw.trim();

        if tag.is_empty() {
            return Ok(None);
        }
        Ok(Some(tag.to_string()))
    }
}

impl<R: BufRead> TagSource for LineSource<R> {
    fn next_tag(&mut self) -> Result<Option<TagId>, LedgerError> {
        // pending stays below MAX_LINE_BYTES between calls, so the limit is at least 1
        let limit = MAX_LINE_BYTES.saturating_sub(self.pending.len()) as u64;

        let read = (&mut self.reader)
            .take(limit)
            .read_until(b'\n', &mut self.pending);

        match read {
            Ok(0) if self.pending.is_empty() => Ok(None),
            Ok(_) if self.skip_oversized() => Ok(None),
            Ok(_) => self.take_line(),
            Err(e) if matches!(e.kind(), ErrorKind::TimedOut | ErrorKind::WouldBlock) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }
}
