use alloc::string::String;
use alloc::vec::Vec;
use core::fmt::Debug;

use crate::{JsonValue, Source};

mod eof;
mod numbers;

/// Drain a string value through a small window, the way a real consumer
/// would.
pub(crate) fn read_all<S: Source>(v: &mut JsonValue<S>) -> String
where
    S::Error: Debug,
{
    read_chunked(v, 8)
}

pub(crate) fn read_chunked<S: Source>(v: &mut JsonValue<S>, chunk: usize) -> String
where
    S::Error: Debug,
{
    let mut out = Vec::new();
    let mut buf = [0u8; 16];
    let buf = &mut buf[..chunk];
    loop {
        let n = v.read(buf).unwrap();
        if n == 0 {
            break;
        }
        out.extend_from_slice(&buf[..n]);
    }
    String::from_utf8(out).unwrap()
}
