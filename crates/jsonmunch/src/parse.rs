//! Value dispatch: the entry point and the scalar readers.

use alloc::rc::Rc;
use alloc::string::String;
use alloc::vec::Vec;
use core::cell::RefCell;

use crate::buffer::Buffer;
use crate::error::{Expected, ParseError, SyntaxError};
use crate::source::Source;
use crate::value::{JsonKind, JsonValue, Shared};

/// Bytes that may begin a JSON value, in the order error messages list
/// them.
pub(crate) const VALUE_START: &[u8] = b"{[\"ntf-0123456789";
pub(crate) const DIGITS: &[u8] = b"0123456789";

/// Begin parsing `source` through a fresh window of `window` bytes,
/// returning the handle for the document's root value.
///
/// The window size only affects throughput: 4096 suits large payloads,
/// 256 small ones, and any size of at least one byte behaves identically.
///
/// # Panics
///
/// Panics if `window` is zero.
///
/// # Errors
///
/// Fails when the source fails on the first byte, or when the first
/// significant byte cannot begin a JSON value.
///
/// # Examples
///
/// ```rust
/// use jsonmunch::{parse, JsonKind};
///
/// let mut root = parse(&b"[1, 2, 3]"[..], 256).unwrap();
/// assert_eq!(root.kind(), JsonKind::Array);
/// let first = root.next_value().unwrap().unwrap();
/// assert_eq!(first.number().unwrap(), 1.0);
/// ```
pub fn parse<S: Source>(source: S, window: usize) -> Result<JsonValue<S>, ParseError<S::Error>> {
    let mut buf = Buffer::new(source, window);
    buf.step();
    let shared = Rc::new(RefCell::new(buf));
    let mut guard = shared.borrow_mut();
    let root = read_value(&shared, &mut guard);
    drop(guard);
    root
}

/// Read any value starting at the current position.
pub(crate) fn read_value<S: Source>(
    shared: &Shared<S>,
    buf: &mut Buffer<S>,
) -> Result<JsonValue<S>, ParseError<S::Error>> {
    buf.skip_space()?;
    match buf.cur {
        b'{' | b'[' | b'"' => Ok(read_stream(shared, buf)),
        b'n' | b't' | b'f' => read_keyword(shared, buf),
        b'-' | b'0'..=b'9' => read_number(shared, buf),
        _ => Err(buf.unexpected(Expected::one_of(VALUE_START))),
    }
}

/// Open a string, array, or object. Depth rises here and falls again when
/// the value reaches `Complete`. The opening quote is consumed; an opening
/// bracket stays in the lookahead for the container protocol.
pub(crate) fn read_stream<S: Source>(shared: &Shared<S>, buf: &mut Buffer<S>) -> JsonValue<S> {
    let kind = match buf.cur {
        b'"' => {
            buf.step();
            JsonKind::String
        }
        b'{' => JsonKind::Object,
        _ => JsonKind::Array,
    };
    buf.depth += 1;
    JsonValue::new_stream(Rc::clone(shared), kind, buf.depth)
}

/// Decode `null`, `true`, or `false`; the first letter is the lookahead.
fn read_keyword<S: Source>(
    shared: &Shared<S>,
    buf: &mut Buffer<S>,
) -> Result<JsonValue<S>, ParseError<S::Error>> {
    let (word, kind, truth): (&'static [u8], JsonKind, bool) = match buf.cur {
        b'n' => (b"null", JsonKind::Null, false),
        b't' => (b"true", JsonKind::Bool, true),
        _ => (b"false", JsonKind::Bool, false),
    };
    for i in 1..word.len() {
        buf.step();
        if let Some(err) = buf.failure() {
            return Err(err);
        }
        if buf.cur != word[i] {
            return Err(buf.unexpected(Expected::OneOf(word[i..=i].into())));
        }
    }
    buf.step();
    Ok(JsonValue::new_scalar(
        Rc::clone(shared),
        kind,
        buf.depth + 1,
        0.0,
        truth,
    ))
}

/// Lex a number into a small stack buffer, spilling to the heap only for
/// literals longer than any IEEE-754 double needs.
fn read_number<S: Source>(
    shared: &Shared<S>,
    buf: &mut Buffer<S>,
) -> Result<JsonValue<S>, ParseError<S::Error>> {
    let start = buf.offset();
    let mut stack = [0u8; 32];
    let mut spill: Vec<u8> = Vec::new();
    let mut len = 0usize;
    let mut simple = true;
    loop {
        if let Some(err) = buf.failure() {
            return Err(err);
        }
        if buf.at_eof() {
            break;
        }
        let c = buf.cur;
        match c {
            b'+' | b'.' | b'e' | b'E' => simple = false,
            b'-' | b'0'..=b'9' => {}
            _ => break,
        }
        if len < stack.len() {
            stack[len] = c;
        } else {
            if spill.is_empty() {
                spill.extend_from_slice(&stack);
            }
            spill.push(c);
        }
        len += 1;
        buf.step();
    }
    let text: &[u8] = if spill.is_empty() { &stack[..len] } else { &spill };
    // Up to 18 digits cannot overflow a signed 64-bit accumulator.
    if simple && text.len() < 19 {
        let num = read_int(buf, text)?;
        return Ok(JsonValue::new_scalar(
            Rc::clone(shared),
            JsonKind::Number,
            buf.depth + 1,
            num,
            false,
        ));
    }
    match core::str::from_utf8(text).ok().and_then(|lit| lit.parse::<f64>().ok()) {
        Some(num) => Ok(JsonValue::new_scalar(
            Rc::clone(shared),
            JsonKind::Number,
            buf.depth + 1,
            num,
            false,
        )),
        None => Err(ParseError::InvalidNumber {
            offset: start,
            text: String::from_utf8_lossy(text).into_owned(),
        }),
    }
}

/// Fast integer path: roughly twice as fast as the float parser for the
/// short integers that dominate log records and identifiers.
fn read_int<S: Source>(buf: &Buffer<S>, text: &[u8]) -> Result<f64, ParseError<S::Error>> {
    let (neg, digits) = match text.split_first() {
        Some((b'-', rest)) => {
            if rest.is_empty() {
                return Err(buf.unexpected(Expected::one_of(DIGITS)));
            }
            (true, rest)
        }
        _ => (false, text),
    };
    let mut val: i64 = 0;
    for (idx, &c) in digits.iter().enumerate() {
        if !c.is_ascii_digit() {
            let within = if neg { idx + 1 } else { idx };
            return Err(SyntaxError {
                offset: buf.offset().wrapping_sub((text.len() - 1 - within) as u64),
                found: Some(c),
                expected: Expected::one_of(DIGITS),
            }
            .into());
        }
        val = 10 * val + i64::from(c - b'0');
    }
    let val = if neg { -val } else { val };
    Ok(val as f64)
}
