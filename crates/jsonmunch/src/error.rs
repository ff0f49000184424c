//! Error types. Every parse failure carries the exact byte offset at which
//! it was observed.

use alloc::borrow::Cow;
use alloc::string::String;
use core::fmt;

use thiserror::Error;

use crate::value::JsonKind;

/// What a parse position would have accepted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Expected {
    /// Any one of these bytes. Contiguous ascending runs render as ranges,
    /// so a digit class reads `'0'-'9'` rather than ten alternatives.
    OneOf(Cow<'static, [u8]>),
    /// A fixed explanation replacing the expected-byte list.
    Note(&'static str),
}

impl Expected {
    pub(crate) const fn one_of(set: &'static [u8]) -> Self {
        Expected::OneOf(Cow::Borrowed(set))
    }
}

/// A syntactic parse failure: an illegal byte, or a premature end of input
/// where a particular byte was required.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyntaxError {
    /// Byte offset into the input stream.
    pub offset: u64,
    /// The offending byte, or `None` when the input ended instead.
    pub found: Option<u8>,
    /// What would have been accepted here.
    pub expected: Expected,
}

fn write_quoted(f: &mut fmt::Formatter<'_>, b: u8) -> fmt::Result {
    f.write_str("'")?;
    match b {
        b'\\' => f.write_str("\\\\")?,
        b'\'' => f.write_str("\\'")?,
        b'\t' => f.write_str("\\t")?,
        b'\r' => f.write_str("\\r")?,
        b'\n' => f.write_str("\\n")?,
        0x20..=0x7E => write!(f, "{}", b as char)?,
        _ => write!(f, "\\x{b:02x}")?,
    }
    f.write_str("'")
}

impl fmt::Display for SyntaxError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("unexpected ")?;
        match self.found {
            Some(b) => write_quoted(f, b)?,
            None => f.write_str("EOF")?,
        }
        write!(f, " at file offset {}", self.offset)?;
        match &self.expected {
            Expected::Note(msg) => write!(f, ": {msg}"),
            Expected::OneOf(set) if set.len() == 1 => {
                f.write_str(", expected ")?;
                write_quoted(f, set[0])
            }
            Expected::OneOf(set) => {
                f.write_str(", expected one of ")?;
                let mut i = 0;
                while i < set.len() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    let start = i;
                    while i + 1 < set.len() && set[i] + 1 == set[i + 1] {
                        i += 1;
                    }
                    write_quoted(f, set[start])?;
                    if i > start {
                        f.write_str("-")?;
                        write_quoted(f, set[i])?;
                    }
                    i += 1;
                }
                Ok(())
            }
        }
    }
}

impl core::error::Error for SyntaxError {}

/// An operation that requires a particular JSON kind was invoked on a
/// handle of a different kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KindError {
    /// The kind the handle actually has.
    pub provided: JsonKind,
    /// The kinds the operation accepts.
    pub expected: &'static [JsonKind],
}

impl fmt::Display for KindError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "method cannot be called on {}, only on ", self.provided)?;
        for (i, kind) in self.expected.iter().enumerate() {
            if i > 0 {
                f.write_str(" or ")?;
            }
            write!(f, "{kind}")?;
        }
        Ok(())
    }
}

impl core::error::Error for KindError {}

/// Any failure a navigation or read operation can return.
///
/// End-of-container is *not* an error: [`next_value`][nv] and
/// [`next_key`][nk] signal it with `Ok(None)`, and
/// [`read`](crate::JsonValue::read) signals end-of-string with `Ok(0)`.
///
/// [nv]: crate::JsonValue::next_value
/// [nk]: crate::JsonValue::next_key
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParseError<E> {
    /// A previous operation on this handle failed; it rejects further use.
    #[error("value is incomplete after an earlier failed read")]
    Incomplete,
    /// An ancestor was advanced while a descendant is partially read.
    #[error("cannot consume while a child value is partially read")]
    WorkingChild,
    /// `compare` or `find_key` was invoked with an empty candidate list.
    #[error("at least one candidate must be provided")]
    NoCandidates,
    /// Kind-specific operation on the wrong kind of value.
    #[error(transparent)]
    Kind(#[from] KindError),
    /// Illegal byte or premature end of input.
    #[error(transparent)]
    Syntax(#[from] SyntaxError),
    /// A numeric literal the float parser rejected, such as `1.e`.
    #[error("invalid number literal {text:?} at file offset {offset}")]
    InvalidNumber { offset: u64, text: String },
    /// The byte source failed. Deferred: reported when the failing position
    /// is demanded, not when the short read happened.
    #[error("source error at file offset {offset}: {error}")]
    Source { offset: u64, error: E },
}

#[cfg(test)]
mod tests {
    use alloc::string::ToString;

    use super::{Expected, SyntaxError};

    #[test]
    fn single_expected_byte() {
        let err = SyntaxError {
            offset: 6,
            found: Some(b','),
            expected: Expected::one_of(b":"),
        };
        assert_eq!(err.to_string(), "unexpected ',' at file offset 6, expected ':'");
    }

    #[test]
    fn ranges_are_compacted() {
        let err = SyntaxError {
            offset: 1,
            found: None,
            expected: Expected::one_of(b"0123456789"),
        };
        assert_eq!(
            err.to_string(),
            "unexpected EOF at file offset 1, expected one of '0'-'9'"
        );
    }

    #[test]
    fn mixed_singles_and_ranges() {
        let err = SyntaxError {
            offset: 10,
            found: Some(b'0'),
            expected: Expected::one_of(b"CDEFcdef"),
        };
        assert_eq!(
            err.to_string(),
            "unexpected '0' at file offset 10, expected one of 'C'-'F', 'c'-'f'"
        );
    }

    #[test]
    fn control_bytes_are_escaped() {
        let err = SyntaxError {
            offset: 1,
            found: Some(b'\t'),
            expected: Expected::Note("control characters are not allowed in string values"),
        };
        assert_eq!(
            err.to_string(),
            "unexpected '\\t' at file offset 1: control characters are not allowed in string values"
        );
    }
}
