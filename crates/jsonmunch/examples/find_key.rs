//! Pluck a handful of fields out of a document without materializing it.
//!
//! Run with `cargo run --example find_key`.

use jsonmunch::{parse, JsonKind};

const DOC: &[u8] = br#"{
  "meta": { "generator": "fixture", "version": 3 },
  "records": [
    { "id": 1, "name": "alpha", "tags": ["x", "y"] },
    { "id": 2, "name": "beta",  "tags": [] }
  ],
  "status": "ok"
}"#;

fn main() {
    let mut root = parse(DOC, 256).expect("root value");

    // Jump straight to "records", skipping "meta" entirely.
    let (_, mut records) = root
        .find_key(&["records"])
        .expect("traversal")
        .expect("records key present");
    assert_eq!(records.kind(), JsonKind::Array);

    let mut names = Vec::new();
    while let Some(mut record) = records.next_value().expect("record") {
        let (_, mut name) = record
            .find_key(&["name"])
            .expect("traversal")
            .expect("name key present");
        let mut buf = [0u8; 64];
        let n = name.read(&mut buf).expect("name bytes");
        names.push(String::from_utf8_lossy(&buf[..n]).into_owned());
        // Whatever is left of this record is uninteresting.
        record.close().expect("close record");
    }
    println!("record names: {names:?}");

    let (_, mut status) = root
        .find_key(&["status"])
        .expect("traversal")
        .expect("status key present");
    let mut buf = [0u8; 16];
    let n = status.read(&mut buf).expect("status bytes");
    println!("status: {}", String::from_utf8_lossy(&buf[..n]));
}
