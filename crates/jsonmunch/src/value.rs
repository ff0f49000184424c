//! The value handle: one JSON value in the stream, and the navigation
//! protocol over it.

use alloc::borrow::Cow;
use alloc::rc::Rc;
use alloc::vec;
use core::cell::RefCell;
use core::fmt;

use crate::buffer::Buffer;
use crate::error::{Expected, KindError, ParseError};
use crate::escape;
use crate::parse::{read_stream, read_value};
use crate::source::Source;

pub(crate) type Shared<S> = Rc<RefCell<Buffer<S>>>;

/// Escape selectors, in the order error messages list them.
const ESCAPE_SELECTORS: &[u8] = b"\"/\\ubfnrt";

/// The data type of a [`JsonValue`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JsonKind {
    Null,
    Bool,
    Number,
    String,
    Array,
    Object,
}

impl fmt::Display for JsonKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            JsonKind::Null => "Null",
            JsonKind::Bool => "Bool",
            JsonKind::Number => "Number",
            JsonKind::String => "String",
            JsonKind::Array => "Array",
            JsonKind::Object => "Object",
        })
    }
}

/// Lifecycle status of a [`JsonValue`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JsonStatus {
    /// A previous operation failed; the handle rejects further navigation.
    Incomplete,
    /// Partially consumed, or the container is still open.
    Working,
    /// Fully consumed.
    Complete,
}

/// One JSON value in the stream.
///
/// Handles are small value records over a shared buffer. Scalars are born
/// `Complete`; strings and containers are born `Working` and advance the
/// shared cursor as they are drained. Holding several handles is fine —
/// advancing any but the deepest `Working` one fails with the
/// working-child error instead of corrupting the traversal.
pub struct JsonValue<S: Source> {
    shared: Shared<S>,
    /// Parsed numeric value; meaningful only for `Number`.
    num: f64,
    /// Nesting depth this handle was created at.
    depth: u32,
    kind: JsonKind,
    status: JsonStatus,
    /// For `Bool`, the parsed truth value; for containers, whether the
    /// first element has been seen.
    flag: bool,
    /// For `Object`, whether the next syntactic slot is a key.
    key_next: bool,
}

impl<S: Source> fmt::Debug for JsonValue<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JsonValue")
            .field("kind", &self.kind)
            .field("status", &self.status)
            .field("depth", &self.depth)
            .finish_non_exhaustive()
    }
}

/// Shared element protocol for arrays and objects: consume the separator
/// (or the opening bracket before the first element) and report whether
/// the closing bracket ended the container instead.
fn read_next<S: Source>(
    buf: &mut Buffer<S>,
    status: &mut JsonStatus,
    first_seen: bool,
    open: u8,
    close: u8,
) -> Result<bool, ParseError<S::Error>> {
    let c = match buf.skip_space() {
        Ok(c) => c,
        Err(err) => {
            *status = JsonStatus::Incomplete;
            return Err(err);
        }
    };
    if c == close {
        buf.step();
        *status = JsonStatus::Complete;
        buf.depth -= 1;
        return Ok(true);
    }
    let expect = if first_seen { b',' } else { open };
    if c != expect {
        *status = JsonStatus::Incomplete;
        return Err(buf.unexpected(Expected::OneOf(Cow::Owned(vec![expect, close]))));
    }
    buf.step();
    if !first_seen {
        // Accept `[]` and `{}` with interior whitespace.
        let c = match buf.skip_space() {
            Ok(c) => c,
            Err(err) => {
                *status = JsonStatus::Incomplete;
                return Err(err);
            }
        };
        if c == close {
            buf.step();
            *status = JsonStatus::Complete;
            buf.depth -= 1;
            return Ok(true);
        }
    }
    Ok(false)
}

impl<S: Source> JsonValue<S> {
    pub(crate) fn new_stream(shared: Shared<S>, kind: JsonKind, depth: u32) -> Self {
        Self {
            shared,
            num: 0.0,
            depth,
            kind,
            status: JsonStatus::Working,
            flag: false,
            key_next: kind == JsonKind::Object,
        }
    }

    pub(crate) fn new_scalar(
        shared: Shared<S>,
        kind: JsonKind,
        depth: u32,
        num: f64,
        truth: bool,
    ) -> Self {
        Self {
            shared,
            num,
            depth,
            kind,
            status: JsonStatus::Complete,
            flag: truth,
            key_next: false,
        }
    }

    #[must_use]
    pub fn kind(&self) -> JsonKind {
        self.kind
    }

    #[must_use]
    pub fn status(&self) -> JsonStatus {
        self.status
    }

    /// File offset of the shared cursor; used by tests to check that
    /// different traversal strategies land on the same position.
    #[cfg(test)]
    pub(crate) fn file_offset(&self) -> u64 {
        self.shared.borrow().offset()
    }

    /// The parsed value of a `Number`.
    ///
    /// # Errors
    ///
    /// Kind mismatch on anything but a `Number`.
    pub fn number(&self) -> Result<f64, ParseError<S::Error>> {
        if self.kind == JsonKind::Number {
            Ok(self.num)
        } else {
            Err(KindError {
                provided: self.kind,
                expected: &[JsonKind::Number],
            }
            .into())
        }
    }

    /// The parsed value of a `Bool`.
    ///
    /// # Errors
    ///
    /// Kind mismatch on anything but a `Bool`.
    pub fn boolean(&self) -> Result<bool, ParseError<S::Error>> {
        if self.kind == JsonKind::Bool {
            Ok(self.flag)
        } else {
            Err(KindError {
                provided: self.kind,
                expected: &[JsonKind::Bool],
            }
            .into())
        }
    }

    /// Stream the decoded bytes of a `String` value into `out`.
    ///
    /// Returns the number of bytes written; `Ok(0)` on a non-empty `out`
    /// means the string has ended. Escapes are decoded, including UTF-16
    /// surrogate pairs, and `out` may be as small as one byte. On error,
    /// bytes already written by the same call are not acknowledged — the
    /// handle is poisoned and the string should be abandoned.
    ///
    /// # Errors
    ///
    /// Kind mismatch, a poisoned handle, a bad escape, a control character
    /// inside the string, premature end of input, or a source failure.
    pub fn read(&mut self, out: &mut [u8]) -> Result<usize, ParseError<S::Error>> {
        if self.kind != JsonKind::String {
            return Err(KindError {
                provided: self.kind,
                expected: &[JsonKind::String],
            }
            .into());
        }
        match self.status {
            JsonStatus::Complete => return Ok(0),
            JsonStatus::Working => {}
            JsonStatus::Incomplete => return Err(ParseError::Incomplete),
        }
        let mut guard = self.shared.borrow_mut();
        let buf = &mut *guard;
        let mut i = 0;
        if buf.stash.is_pending() {
            i = buf.stash.drain(out, 0);
        }
        while i < out.len() {
            if let Some(err) = buf.failure() {
                self.status = JsonStatus::Incomplete;
                return Err(err);
            }
            let c = buf.cur;
            match c {
                b'"' => {
                    buf.step();
                    self.status = JsonStatus::Complete;
                    buf.depth -= 1;
                    return Ok(i);
                }
                b'\\' => {
                    buf.step();
                    if let Some(err) = buf.failure() {
                        self.status = JsonStatus::Incomplete;
                        return Err(err);
                    }
                    match buf.cur {
                        b'u' => {
                            if let Err(err) = escape::read_unicode(buf) {
                                self.status = JsonStatus::Incomplete;
                                return Err(err);
                            }
                            i = buf.stash.drain(out, i);
                        }
                        selector => match escape::unescape(selector) {
                            Some(decoded) => {
                                buf.step();
                                out[i] = decoded;
                                i += 1;
                            }
                            None => {
                                self.status = JsonStatus::Incomplete;
                                return Err(buf.unexpected(Expected::one_of(ESCAPE_SELECTORS)));
                            }
                        },
                    }
                }
                c if c <= 0x1F => {
                    // EOF leaves a zero in the lookahead, so it lands here
                    // together with real control characters.
                    self.status = JsonStatus::Incomplete;
                    let note = if buf.at_eof() {
                        "premature EOF while attempting to read string"
                    } else {
                        "control characters are not allowed in string values"
                    };
                    return Err(buf.unexpected(Expected::Note(note)));
                }
                c => {
                    buf.step();
                    out[i] = c;
                    i += 1;
                }
            }
        }
        Ok(out.len())
    }

    /// The next element of an `Array`, or the next value of an `Object`.
    ///
    /// On an object, if the next syntactic slot is a key, that key is
    /// consumed and discarded and its value returned. `Ok(None)` signals
    /// the end of the container.
    ///
    /// # Errors
    ///
    /// Kind mismatch, a poisoned handle, a working child, or any parse
    /// error in the skipped key or the value itself.
    pub fn next_value(&mut self) -> Result<Option<JsonValue<S>>, ParseError<S::Error>> {
        match (self.kind, self.status) {
            (JsonKind::Array, JsonStatus::Working) => self.array_next_value(),
            (JsonKind::Object, JsonStatus::Working) => self.object_next_value(),
            (JsonKind::Array | JsonKind::Object, JsonStatus::Complete) => Ok(None),
            (JsonKind::Array | JsonKind::Object, JsonStatus::Incomplete) => {
                Err(ParseError::Incomplete)
            }
            _ => Err(KindError {
                provided: self.kind,
                expected: &[JsonKind::Array, JsonKind::Object],
            }
            .into()),
        }
    }

    /// The next key of an `Object`.
    ///
    /// If a value is pending — the previous key was fetched but its value
    /// never consumed — that value is discarded first. `Ok(None)` signals
    /// the end of the object.
    ///
    /// # Errors
    ///
    /// Kind mismatch, a poisoned handle, a working child, or a key
    /// position holding anything but a string.
    pub fn next_key(&mut self) -> Result<Option<JsonValue<S>>, ParseError<S::Error>> {
        if self.kind != JsonKind::Object {
            return Err(KindError {
                provided: self.kind,
                expected: &[JsonKind::Object],
            }
            .into());
        }
        match self.status {
            JsonStatus::Complete => return Ok(None),
            JsonStatus::Working => {}
            JsonStatus::Incomplete => return Err(ParseError::Incomplete),
        }
        if self.depth != self.shared.borrow().depth {
            return Err(ParseError::WorkingChild);
        }
        if !self.key_next {
            match self.object_next_value() {
                Ok(Some(mut pending)) => {
                    if let Err(err) = pending.close() {
                        self.status = JsonStatus::Incomplete;
                        return Err(err);
                    }
                }
                Ok(None) => return Ok(None),
                Err(err) => {
                    self.status = JsonStatus::Incomplete;
                    return Err(err);
                }
            }
        }
        let mut guard = self.shared.borrow_mut();
        let buf = &mut *guard;
        if read_next(buf, &mut self.status, self.flag, b'{', b'}')? {
            return Ok(None);
        }
        if let Err(err) = buf.skip_space() {
            self.status = JsonStatus::Incomplete;
            return Err(err);
        }
        if buf.cur != b'"' {
            self.status = JsonStatus::Incomplete;
            return Err(buf.unexpected(Expected::one_of(b"\"")));
        }
        let key = read_stream(&self.shared, buf);
        self.flag = true;
        self.key_next = false;
        Ok(Some(key))
    }

    fn object_next_value(&mut self) -> Result<Option<JsonValue<S>>, ParseError<S::Error>> {
        if self.depth != self.shared.borrow().depth {
            return Err(ParseError::WorkingChild);
        }
        if self.key_next {
            match self.next_key() {
                Ok(Some(mut key)) => {
                    if let Err(err) = key.close() {
                        self.status = JsonStatus::Incomplete;
                        return Err(err);
                    }
                }
                Ok(None) => return Ok(None),
                Err(err) => {
                    self.status = JsonStatus::Incomplete;
                    return Err(err);
                }
            }
        }
        let mut guard = self.shared.borrow_mut();
        let buf = &mut *guard;
        let c = match buf.skip_space() {
            Ok(c) => c,
            Err(err) => {
                self.status = JsonStatus::Incomplete;
                return Err(err);
            }
        };
        if c != b':' {
            self.status = JsonStatus::Incomplete;
            return Err(buf.unexpected(Expected::one_of(b":")));
        }
        buf.step();
        match read_value(&self.shared, buf) {
            Ok(val) => {
                self.key_next = true;
                Ok(Some(val))
            }
            Err(err) => {
                self.status = JsonStatus::Incomplete;
                Err(err)
            }
        }
    }

    fn array_next_value(&mut self) -> Result<Option<JsonValue<S>>, ParseError<S::Error>> {
        let mut guard = self.shared.borrow_mut();
        let buf = &mut *guard;
        if self.depth != buf.depth {
            return Err(ParseError::WorkingChild);
        }
        if read_next(buf, &mut self.status, self.flag, b'[', b']')? {
            return Ok(None);
        }
        match read_value(&self.shared, buf) {
            Ok(val) => {
                self.flag = true;
                Ok(Some(val))
            }
            Err(err) => {
                self.status = JsonStatus::Incomplete;
                Err(err)
            }
        }
    }

    /// Discard the remainder of this value, fast.
    ///
    /// Scans raw window bytes without decoding: strings honor escapes only
    /// enough to find the closing quote, containers only track bracket
    /// depth. Closing an already-`Complete` handle is a no-op.
    ///
    /// # Errors
    ///
    /// A poisoned handle, a working child, premature end of input, or a
    /// source failure.
    pub fn close(&mut self) -> Result<(), ParseError<S::Error>> {
        match self.status {
            JsonStatus::Complete => return Ok(()),
            JsonStatus::Incomplete => return Err(ParseError::Incomplete),
            JsonStatus::Working => {}
        }
        let mut guard = self.shared.borrow_mut();
        let buf = &mut *guard;
        if self.depth != buf.depth {
            return Err(ParseError::WorkingChild);
        }
        if !self.flag {
            // Before the first element is fetched the opening bracket is
            // still in the lookahead.
            if (self.kind == JsonKind::Object && buf.cur == b'{')
                || (self.kind == JsonKind::Array && buf.cur == b'[')
            {
                buf.step();
            }
        }
        let mut in_str = self.kind == JsonKind::String;
        let mut depth: i32 = 0;
        loop {
            if buf.cur_end.is_some() {
                self.status = JsonStatus::Incomplete;
                return Err(match buf.failure() {
                    Some(err) => err,
                    None => buf.unexpected(Expected::Note(
                        "premature EOF while attempting to close value",
                    )),
                });
            }
            let mut i = buf.pos - 1;
            'scan: loop {
                if in_str {
                    while i < buf.filled {
                        match buf.window[i] {
                            b'\\' => i += 1,
                            b'"' => {
                                if self.kind == JsonKind::String {
                                    buf.pos = i + 1;
                                    buf.step();
                                    self.status = JsonStatus::Complete;
                                    buf.depth -= 1;
                                    return Ok(());
                                }
                                in_str = false;
                                i += 1;
                                continue 'scan;
                            }
                            _ => {}
                        }
                        i += 1;
                    }
                } else {
                    while i < buf.filled {
                        match buf.window[i] {
                            b'{' | b'[' => depth += 1,
                            b'}' | b']' => {
                                depth -= 1;
                                if depth < 0 {
                                    buf.pos = i + 1;
                                    buf.step();
                                    self.status = JsonStatus::Complete;
                                    buf.depth -= 1;
                                    return Ok(());
                                }
                            }
                            b'"' => {
                                in_str = true;
                                i += 1;
                                continue 'scan;
                            }
                            _ => {}
                        }
                        i += 1;
                    }
                }
                break 'scan;
            }
            // Window exhausted: refill in bulk and resume the scan. An
            // escape may have pushed `i` one byte past the window, in which
            // case the resume position skips the escaped byte.
            buf.pos = buf.filled;
            if buf.needs_refill() {
                let len = buf.window.len();
                buf.refill();
                let mut resume = i - len;
                // A one-byte window leaves the skipped escape byte as the
                // entire new fill; consume it and pull once more.
                if resume >= len && buf.filled > 0 {
                    buf.refill();
                    resume = 0;
                }
                buf.pos = resume;
            }
            buf.advance();
        }
    }
}
