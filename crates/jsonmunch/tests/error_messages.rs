//! Snapshot coverage for user-facing error rendering.

use insta::assert_snapshot;
use jsonmunch::parse;

#[test]
fn missing_colon_in_object() {
    let err = parse(&br#"{"foo",null}"#[..], 16)
        .and_then(|mut v| v.next_value())
        .unwrap_err();
    assert_snapshot!(err, @"unexpected ',' at file offset 6, expected ':'");
}

#[test]
fn bare_word_at_top_level() {
    let err = parse(&b"mull"[..], 16).unwrap_err();
    assert_snapshot!(
        err,
        @"unexpected 'm' at file offset 0, expected one of '{', '[', '\"', 'n', 't', 'f', '-', '0'-'9'"
    );
}

#[test]
fn truncated_keyword() {
    let err = parse(&b"tru"[..], 16).unwrap_err();
    assert_snapshot!(err, @"unexpected EOF at file offset 3, expected 'e'");
}

#[test]
fn digit_class_renders_as_a_range() {
    let err = parse(&b"-"[..], 16).unwrap_err();
    assert_snapshot!(err, @"unexpected EOF at file offset 1, expected one of '0'-'9'");
}

#[test]
fn kind_mismatch_names_both_sides() {
    let err = parse(&b"[1]"[..], 16)
        .and_then(|v| v.number())
        .unwrap_err();
    assert_snapshot!(err, @"method cannot be called on Array, only on Number");
}

#[test]
fn empty_candidate_list() {
    let mut v = parse(&br#""abc""#[..], 16).unwrap();
    let err = v.compare(&[]).unwrap_err();
    assert_snapshot!(err, @"at least one candidate must be provided");
}

#[test]
fn working_child_refusal() {
    let mut v = parse(&br#"{"a":1}"#[..], 16).unwrap();
    let _key = v.next_key().unwrap().unwrap();
    let err = v.close().unwrap_err();
    assert_snapshot!(err, @"cannot consume while a child value is partially read");
}
