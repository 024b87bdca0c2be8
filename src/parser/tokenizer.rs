//! Word-level tokenizer for SDDS headers
//!
//! The header is line-oriented text: blank lines and `!` comment lines are
//! noise, everything else is whitespace-separated words. [`Tokens`] is an
//! explicit pull cursor over that word stream; it owns the underlying reader
//! so the data codecs can take the stream back, positioned right after the
//! header, once the `&data` command has been consumed.

use std::collections::VecDeque;
use std::io::{BufRead, Seek, SeekFrom};

use crate::error::{Result, SddsError};
use crate::types::Endianness;

/// Pull-based word cursor over the header portion of a byte stream
pub(crate) struct Tokens<R> {
    reader: R,
    queue: VecDeque<String>,
    exhausted: bool,
}

impl<R: BufRead> Tokens<R> {
    pub(crate) fn new(reader: R) -> Self {
        Self {
            reader,
            queue: VecDeque::new(),
            exhausted: false,
        }
    }

    /// Next word, or `None` once the stream is exhausted.
    ///
    /// `None` is the graceful end for the top-level command loop; callers in
    /// the middle of a command map it to their own error.
    pub(crate) fn next_token(&mut self) -> Result<Option<String>> {
        loop {
            if let Some(token) = self.queue.pop_front() {
                return Ok(Some(token));
            }
            if self.exhausted {
                return Ok(None);
            }
            let mut raw = Vec::new();
            let n = self.reader.read_until(b'\n', &mut raw)?;
            if n == 0 {
                self.exhausted = true;
                continue;
            }
            let line = String::from_utf8(raw).map_err(|_| SddsError::InvalidUtf8("header"))?;
            let stripped = line.trim();
            if stripped.is_empty() || stripped.starts_with('!') {
                continue;
            }
            self.queue
                .extend(stripped.split_whitespace().map(String::from));
        }
    }

    /// Next word, failing with an EOF error naming `context` if none remains
    pub(crate) fn expect_token(&mut self, context: &'static str) -> Result<String> {
        self.next_token()?
            .ok_or(SddsError::UnexpectedEof(context))
    }

    /// Hand the underlying stream back, positioned after the last consumed line
    pub(crate) fn into_inner(self) -> R {
        self.reader
    }
}

/// Determine the byte order of the data section from the header comments.
///
/// Scans the leading lines for the literal `!# big-endian` or
/// `!# little-endian` marker, then rewinds the stream to offset 0 so the
/// tokenizer starts from the top. Files without a marker get the host's
/// native byte order. This is the only place the read path is not strictly
/// forward-only.
pub(crate) fn sniff_endianness<R: BufRead + Seek>(reader: &mut R) -> Result<Endianness> {
    let mut endianness = Endianness::native();
    let mut raw = Vec::new();
    loop {
        raw.clear();
        let n = reader.read_until(b'\n', &mut raw)?;
        if n == 0 {
            break;
        }
        // The binary section can contain arbitrary bytes, so decode lossily:
        // garbage simply never matches a marker.
        let line = String::from_utf8_lossy(&raw);
        let stripped = line.trim();
        if stripped == Endianness::Big.marker() {
            endianness = Endianness::Big;
            break;
        }
        if stripped == Endianness::Little.marker() {
            endianness = Endianness::Little;
            break;
        }
    }
    reader.seek(SeekFrom::Start(0))?;
    log::debug!("detected {endianness:?} endianness");
    Ok(endianness)
}
