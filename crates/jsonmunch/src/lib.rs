//! Pull-based streaming JSON parser for documents too large to materialize.
//!
//! The consumer navigates the document by asking each container handle for
//! its next key or next value; anything not explicitly read can be skipped
//! cheaply with [`JsonValue::close`]. Memory stays constant: one fixed
//! window over the input plus a single byte of lookahead and a few bytes of
//! escape staging.
//!
//! # Examples
//!
//! ```rust
//! use jsonmunch::parse;
//!
//! let doc = br#"{"user":"amy","id":7,"tags":["a","b"]}"#;
//! let mut root = parse(&doc[..], 256).unwrap();
//! let (_, id) = root.find_key(&["id"]).unwrap().unwrap();
//! assert_eq!(id.number().unwrap(), 7.0);
//! ```
//!
//! Handles share one cursor: several may be held at once, but only the
//! deepest partially-read one may be advanced. Advancing an ancestor while
//! a descendant is still open fails with a working-child error rather than
//! corrupting the traversal.

#![no_std]

extern crate alloc;

#[cfg(any(test, feature = "std"))]
extern crate std;

mod buffer;
mod error;
mod escape;
mod find;
mod parse;
mod source;
mod value;

pub use error::{Expected, KindError, ParseError, SyntaxError};
pub use parse::parse;
#[cfg(feature = "std")]
pub use source::{IoError, IoSource};
pub use source::Source;
pub use value::{JsonKind, JsonStatus, JsonValue};

#[cfg(test)]
mod tests;
