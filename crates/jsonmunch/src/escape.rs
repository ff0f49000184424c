//! Escape decoding: the single-character map, `\u` escapes with UTF-16
//! surrogate-pair expansion, and the staging area that carries decoded
//! UTF-8 bytes across short reads.

use crate::buffer::Buffer;
use crate::error::{Expected, ParseError, SyntaxError};
use crate::source::Source;

/// Hex digits in the order error messages list them.
pub(crate) const HEX_DIGITS: &[u8] = b"ABCDEFabcdef0123456789";

/// Conventional byte for a single-character escape selector.
#[inline]
pub(crate) fn unescape(selector: u8) -> Option<u8> {
    Some(match selector {
        b'"' => b'"',
        b'/' => b'/',
        b'\\' => b'\\',
        b'b' => 0x08,
        b'f' => 0x0C,
        b'n' => b'\n',
        b'r' => b'\r',
        b't' => b'\t',
        _ => return None,
    })
}

/// Up to four UTF-8 bytes decoded from a `\u` escape.
///
/// A decoded code point may be longer than the caller's remaining output
/// space, so it drains across successive reads; a one-byte output buffer
/// still makes progress.
#[derive(Debug, Default)]
pub(crate) struct EscapeStash {
    bytes: [u8; 4],
    len: u8,
    taken: u8,
}

impl EscapeStash {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn is_pending(&self) -> bool {
        self.taken < self.len
    }

    /// Stage the UTF-8 encoding of `cp`.
    pub(crate) fn load(&mut self, cp: char) {
        let n = cp.encode_utf8(&mut self.bytes).len();
        self.len = n as u8;
        self.taken = 0;
    }

    /// Copy staged bytes into `out[from..]`, returning the new write index.
    /// Resets once fully drained.
    pub(crate) fn drain(&mut self, out: &mut [u8], mut from: usize) -> usize {
        while self.taken < self.len && from < out.len() {
            out[from] = self.bytes[self.taken as usize];
            self.taken += 1;
            from += 1;
        }
        if self.taken >= self.len {
            self.len = 0;
            self.taken = 0;
        }
        from
    }
}

/// Read the next four bytes as one hexadecimal UTF-16 code unit, also
/// returning the raw digit bytes for error attribution.
pub(crate) fn parse_hex<S: Source>(
    buf: &mut Buffer<S>,
) -> Result<(u16, [u8; 4]), ParseError<S::Error>> {
    let mut unit: u16 = 0;
    let mut digits = [0u8; 4];
    for slot in &mut digits {
        if let Some(err) = buf.failure() {
            return Err(err);
        }
        unit = (unit << 4)
            + match buf.cur {
                c @ b'0'..=b'9' => u16::from(c - b'0'),
                c @ b'A'..=b'F' => u16::from(c - b'A' + 10),
                c @ b'a'..=b'f' => u16::from(c - b'a' + 10),
                _ => return Err(buf.unexpected(Expected::one_of(HEX_DIGITS))),
            };
        *slot = buf.cur;
        buf.step();
    }
    Ok((unit, digits))
}

/// Decode a `\uXXXX` escape — the `u` is the current lookahead — expanding
/// a UTF-16 surrogate pair when one follows, and stage the code point's
/// UTF-8 bytes.
///
/// A high surrogate requires a paired `\u` escape. A lone low surrogate is
/// accepted as the entire code point; since it is not a scalar value it
/// decodes to U+FFFD, as lax decoders do.
pub(crate) fn read_unicode<S: Source>(buf: &mut Buffer<S>) -> Result<(), ParseError<S::Error>> {
    buf.step();
    let (hi, _) = parse_hex(buf)?;
    let cp = if (0xD800..=0xDBFF).contains(&hi) {
        if let Some(err) = buf.failure() {
            return Err(err);
        }
        if buf.cur != b'\\' {
            return Err(buf.unexpected(Expected::one_of(b"\\")));
        }
        buf.step();
        if let Some(err) = buf.failure() {
            return Err(err);
        }
        if buf.cur != b'u' {
            return Err(buf.unexpected(Expected::one_of(b"u")));
        }
        buf.step();
        let (lo, digits) = parse_hex(buf)?;
        // The accepted lower bound is 0xD000, looser than where low
        // surrogates start; the message still names the only first digit
        // that can be valid.
        if !(0xD000..=0xDFFF).contains(&lo) {
            return Err(SyntaxError {
                offset: buf.offset() - 4,
                found: Some(digits[0]),
                expected: Expected::one_of(b"Dd"),
            }
            .into());
        }
        if lo < 0xDC00 {
            return Err(SyntaxError {
                offset: buf.offset() - 3,
                found: Some(digits[1]),
                expected: Expected::one_of(b"CDEFcdef"),
            }
            .into());
        }
        0x1_0000 + ((u32::from(hi) - 0xD800) << 10) + (u32::from(lo) - 0xDC00)
    } else {
        u32::from(hi)
    };
    let cp = char::from_u32(cp).unwrap_or(char::REPLACEMENT_CHARACTER);
    buf.stash.load(cp);
    Ok(())
}
