//! Drive a full traversal over arbitrary bytes at several window sizes.
//! Any input may fail to parse; nothing may panic or wedge.

#![no_main]

use std::convert::Infallible;

use jsonmunch::{parse, JsonKind, JsonValue, ParseError};
use libfuzzer_sys::fuzz_target;

type Fallible = Result<(), ParseError<Infallible>>;

fn walk(v: &mut JsonValue<&[u8]>, budget: &mut u32) -> Fallible {
    if *budget == 0 {
        return v.close();
    }
    *budget -= 1;
    match v.kind() {
        JsonKind::Null => {}
        JsonKind::Bool => {
            let _ = v.boolean()?;
        }
        JsonKind::Number => {
            let _ = v.number()?;
        }
        JsonKind::String => {
            let mut buf = [0u8; 5];
            while v.read(&mut buf)? > 0 {}
        }
        JsonKind::Array => {
            while let Some(mut child) = v.next_value()? {
                walk(&mut child, budget)?;
            }
        }
        JsonKind::Object => {
            while let Some(mut key) = v.next_key()? {
                key.compare(&["a", "probe"])?;
                if let Some(mut val) = v.next_value()? {
                    walk(&mut val, budget)?;
                }
            }
        }
    }
    Ok(())
}

fuzz_target!(|data: &[u8]| {
    for window in [1usize, 7, 64] {
        if let Ok(mut root) = parse(data, window) {
            let mut budget = 4096;
            let _ = walk(&mut root, &mut budget);
        }
    }
});
