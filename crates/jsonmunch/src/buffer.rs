//! The shared read window and single-byte lookahead.

use alloc::boxed::Box;
use alloc::vec;

use crate::error::{Expected, ParseError, SyntaxError};
use crate::escape::EscapeStash;
use crate::source::Source;

/// Why the populated window stops short of its capacity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum SourceEnd<E> {
    Eof,
    Failed(E),
}

/// The mutable cursor shared by a root handle and all of its descendants.
///
/// Every byte-consuming operation funnels through `step`: test, refill if
/// needed, advance. Read failures are deferred — a short refill does not
/// fail until a consumer demands the first byte past the last valid one.
pub(crate) struct Buffer<S: Source> {
    pub(crate) window: Box<[u8]>,
    source: S,
    /// Cumulative file offset of the window's first byte, plus one window
    /// length (each refill adds the window length up front; `offset`
    /// subtracts it back out).
    base: u64,
    /// Count of valid bytes in the window; short of capacity only when the
    /// source ended or failed mid-refill.
    pub(crate) filled: usize,
    /// Index of the next unread window byte. The lookahead came from
    /// `window[pos - 1]`.
    pub(crate) pos: usize,
    /// Single-byte lookahead. Zero while `cur_end` is set.
    pub(crate) cur: u8,
    /// Open containers plus open string: the ancestor/descendant interlock.
    pub(crate) depth: u32,
    /// What terminated the last refill, if anything.
    end: Option<SourceEnd<S::Error>>,
    /// Deferred-error slot: set when the lookahead ran past the last valid
    /// byte.
    pub(crate) cur_end: Option<SourceEnd<S::Error>>,
    /// Staging for UTF-8 bytes decoded out of a `\u` escape.
    pub(crate) stash: EscapeStash,
}

impl<S: Source> Buffer<S> {
    pub(crate) fn new(source: S, window: usize) -> Self {
        assert!(window >= 1, "window size must be at least one byte");
        Self {
            window: vec![0; window].into_boxed_slice(),
            source,
            base: 0,
            filled: 0,
            // Past the end so the first `step` refills immediately.
            pos: window,
            cur: 0,
            depth: 0,
            end: None,
            cur_end: None,
            stash: EscapeStash::new(),
        }
    }

    // `needs_refill`, `refill`, and `advance` would naturally be a single
    // function. They are split so the two fast halves stay small enough to
    // inline into every byte-consuming call while the source read stays out
    // of line; `step` is the composition call sites use.

    #[inline(always)]
    pub(crate) fn needs_refill(&self) -> bool {
        self.pos >= self.window.len()
    }

    #[inline(never)]
    pub(crate) fn refill(&mut self) {
        self.base += self.window.len() as u64;
        self.filled = 0;
        self.end = None;
        while self.filled < self.window.len() {
            match self.source.read(&mut self.window[self.filled..]) {
                Ok(0) => {
                    self.end = Some(SourceEnd::Eof);
                    break;
                }
                Ok(n) => self.filled += n,
                Err(e) => {
                    self.end = Some(SourceEnd::Failed(e));
                    break;
                }
            }
        }
        self.pos = 0;
        self.cur_end = None;
    }

    #[inline(always)]
    pub(crate) fn advance(&mut self) {
        if self.pos < self.filled {
            self.cur = self.window[self.pos];
            self.pos += 1;
        } else {
            self.cur = 0;
            self.cur_end = self.end.clone();
        }
    }

    /// Consume the lookahead and load the next byte.
    #[inline(always)]
    pub(crate) fn step(&mut self) {
        if self.needs_refill() {
            self.refill();
        }
        self.advance();
    }

    /// File offset of the current lookahead byte.
    ///
    /// Wrapping: before any byte has been consumed `pos` is zero and the
    /// notional offset is -1; EOF paths add one back before display.
    pub(crate) fn offset(&self) -> u64 {
        self.base
            .wrapping_sub(self.window.len() as u64)
            .wrapping_add(self.pos as u64)
            .wrapping_sub(1)
    }

    pub(crate) fn at_eof(&self) -> bool {
        matches!(self.cur_end, Some(SourceEnd::Eof))
    }

    /// A pending non-EOF read failure, ready to return.
    pub(crate) fn failure(&self) -> Option<ParseError<S::Error>> {
        match &self.cur_end {
            Some(SourceEnd::Failed(e)) => Some(ParseError::Source {
                offset: self.offset().wrapping_add(1),
                error: e.clone(),
            }),
            _ => None,
        }
    }

    /// The unexpected-character error for the current position: the
    /// lookahead byte, or EOF pinned one past the last readable byte.
    pub(crate) fn unexpected(&self, expected: Expected) -> ParseError<S::Error> {
        if self.at_eof() {
            SyntaxError {
                offset: self.offset().wrapping_add(1),
                found: None,
                expected,
            }
            .into()
        } else {
            SyntaxError {
                offset: self.offset(),
                found: Some(self.cur),
                expected,
            }
            .into()
        }
    }

    /// Skip JSON whitespace and return the first significant byte.
    ///
    /// EOF is not an error here; the caller decides whether a structural
    /// byte was actually required.
    pub(crate) fn skip_space(&mut self) -> Result<u8, ParseError<S::Error>> {
        if let Some(err) = self.failure() {
            return Err(err);
        }
        loop {
            match self.cur {
                b' ' | b'\t' | b'\r' | b'\n' => {
                    self.step();
                    if let Some(err) = self.failure() {
                        return Err(err);
                    }
                }
                c => return Ok(c),
            }
        }
    }
}
