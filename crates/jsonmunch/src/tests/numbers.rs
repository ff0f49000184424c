use alloc::string::ToString;

use crate::{parse, JsonKind, ParseError};

#[test]
fn numeric_forms() {
    let doc = b"[-20.50e+1, 400E-2 ,12345678, -321, 75.5]";
    let mut arr = parse(&doc[..], 16).unwrap();
    for expect in [-205.0, 4.0, 12345678.0, -321.0, 75.5] {
        let v = arr.next_value().unwrap().unwrap();
        assert_eq!(v.kind(), JsonKind::Number);
        assert_eq!(v.number().unwrap(), expect);
    }
    assert!(arr.next_value().unwrap().is_none());
}

#[test]
fn integers_stop_at_structural_bytes() {
    let mut arr = parse(&b"[1,2]"[..], 4).unwrap();
    assert_eq!(arr.next_value().unwrap().unwrap().number().unwrap(), 1.0);
    assert_eq!(arr.next_value().unwrap().unwrap().number().unwrap(), 2.0);
    assert!(arr.next_value().unwrap().is_none());
}

#[test]
fn eighteen_digits_stay_on_the_integer_path() {
    let v = parse(&b"999999999999999999"[..], 16).unwrap();
    assert_eq!(v.number().unwrap(), 999_999_999_999_999_999_i64 as f64);
}

#[test]
fn long_integers_fall_back_to_the_float_parser() {
    let v = parse(&b"12345678901234567890"[..], 16).unwrap();
    assert_eq!(v.number().unwrap(), 12345678901234567890.0);
}

#[test]
fn oversized_literals_spill_off_the_stack_buffer() {
    // 40 bytes: longer than the inline accumulator.
    let doc = b"0.0000000000000000000000000000000000001e1";
    assert_eq!(doc.len(), 41);
    let v = parse(&doc[..], 16).unwrap();
    assert_eq!(v.number().unwrap(), 1e-36);
}

#[test]
fn lone_minus() {
    let err = parse(&b"-"[..], 16).unwrap_err();
    assert_eq!(
        err.to_string(),
        "unexpected EOF at file offset 1, expected one of '0'-'9'"
    );
}

#[test]
fn minus_inside_a_number() {
    let err = parse(&b"1-2"[..], 16).unwrap_err();
    assert_eq!(
        err.to_string(),
        "unexpected '-' at file offset 1, expected one of '0'-'9'"
    );
}

#[test]
fn float_parser_rejects_trailing_junk() {
    let err = parse(&b"1.e"[..], 16).unwrap_err();
    assert_eq!(
        err.to_string(),
        "invalid number literal \"1.e\" at file offset 0"
    );
    assert!(matches!(err, ParseError::InvalidNumber { offset: 0, .. }));
}

#[test]
fn negative_zero_is_zero_on_the_integer_path() {
    let v = parse(&b"-0"[..], 16).unwrap();
    assert_eq!(v.number().unwrap(), 0.0);
}
