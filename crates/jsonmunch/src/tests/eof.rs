//! For every prefix of a document exercising all parser states, a fixed
//! traversal must surface exactly one error pinned to the right offset —
//! and never panic or wedge.

use alloc::format;
use alloc::string::{String, ToString};
use core::convert::Infallible;

use crate::{parse, ParseError};

fn traverse(doc: &[u8]) -> Result<(), ParseError<Infallible>> {
    let mut buf = [0u8; 8];
    let mut v1 = parse(doc, 16)?;
    let _null = v1.next_value()?.unwrap();
    let mut v2 = v1.next_value()?.unwrap();
    let mut vk = v2.next_value()?.unwrap();
    vk.read(&mut buf)?;
    let mut vk = v2.next_key()?.unwrap();
    vk.read(&mut buf)?;
    let mut vk = v2.next_key()?.unwrap();
    vk.read(&mut buf)?;
    let mut v3 = v2.next_value()?.unwrap();
    v3.close()?;
    v2.close()?;
    v1.close()?;
    Ok(())
}

fn expected_message(trunc: usize) -> String {
    const VALUE: &str = "expected one of '{', '[', '\"', 'n', 't', 'f', '-', '0'-'9'";
    const HEX: &str = "expected one of 'A'-'F', 'a'-'f', '0'-'9'";
    const CLOSING: &str = "premature EOF while attempting to close value";
    const READING: &str = "premature EOF while attempting to read string";
    enum Tail {
        Expect(&'static str),
        Note(&'static str),
    }
    use Tail::{Expect, Note};
    let tail = match trunc {
        0..=2 | 7 | 12 | 20 | 41 => Expect(VALUE),
        3 | 33 => Expect("expected 'u'"),
        4 | 5 => Expect("expected 'l'"),
        6 => Expect("expected one of ',', ']'"),
        8 | 16 | 24 => Expect("expected '\"'"),
        11 | 19 | 40 => Expect("expected ':'"),
        13 | 14 | 17 | 18 | 25 | 26 | 38 | 39 => Note(READING),
        15 | 23 => Expect("expected one of ',', '}'"),
        27 => Expect("expected one of '\"', '/', '\\\\', 'u', 'b', 'f', 'n', 'r', 't'"),
        28..=31 | 34..=37 => Expect(HEX),
        32 => Expect("expected '\\\\'"),
        _ => Note(CLOSING),
    };
    match tail {
        Expect(t) => format!("unexpected EOF at file offset {trunc}, {t}"),
        Note(t) => format!("unexpected EOF at file offset {trunc}: {t}"),
    }
}

#[test]
fn every_prefix_fails_cleanly() {
    let doc = br#"[ null,{"a":"a","b":"b","x\uD83E\uDDF8x":"y\ny"}]"#;
    assert_eq!(doc.len(), 49);
    for trunc in 0..doc.len() {
        let err = traverse(&doc[..trunc]).unwrap_err();
        assert_eq!(err.to_string(), expected_message(trunc), "prefix {trunc}");
    }
    traverse(&doc[..]).unwrap();
}
