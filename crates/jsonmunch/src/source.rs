//! Input abstraction: where the parser's bytes come from.

use core::convert::Infallible;

/// A pull-style byte stream feeding the parser's read window.
pub trait Source {
    /// Error surfaced by a failed read.
    ///
    /// The buffer defers a failure until the failing position is actually
    /// demanded and hands the same error to every handle that reaches it,
    /// hence the `Clone` bound.
    type Error: Clone;

    /// Read up to `buf.len()` bytes into `buf`, returning how many were
    /// written.
    ///
    /// Returning `Ok(0)` signals true end of stream and must be sticky:
    /// once a source reports it, later calls must keep reporting it. A
    /// source *may* recover after returning `Err` — the parser asks again
    /// on the next window refill.
    fn read(&mut self, buf: &mut [u8]) -> Result<usize, Self::Error>;
}

impl Source for &[u8] {
    type Error = Infallible;

    fn read(&mut self, buf: &mut [u8]) -> Result<usize, Infallible> {
        let n = self.len().min(buf.len());
        let (head, rest) = self.split_at(n);
        buf[..n].copy_from_slice(head);
        *self = rest;
        Ok(n)
    }
}

#[cfg(feature = "std")]
mod io {
    use alloc::sync::Arc;
    use core::fmt;

    use super::Source;

    /// Adapter running any [`std::io::Read`] as a parser [`Source`].
    ///
    /// ```rust
    /// use jsonmunch::{parse, IoSource};
    ///
    /// let reader = std::io::Cursor::new(b"[1,2]".to_vec());
    /// let root = parse(IoSource::new(reader), 4096).unwrap();
    /// ```
    #[derive(Debug)]
    pub struct IoSource<R> {
        inner: R,
    }

    impl<R> IoSource<R> {
        pub fn new(inner: R) -> Self {
            Self { inner }
        }

        pub fn into_inner(self) -> R {
            self.inner
        }
    }

    /// Cloneable wrapper around [`std::io::Error`].
    ///
    /// `std::io::Error` is not `Clone`, but the deferred-error slot hands
    /// the same failure to every handle that reaches it.
    #[derive(Debug, Clone)]
    pub struct IoError(Arc<std::io::Error>);

    impl IoError {
        /// The underlying I/O error.
        pub fn get(&self) -> &std::io::Error {
            &self.0
        }
    }

    impl fmt::Display for IoError {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            self.0.fmt(f)
        }
    }

    impl core::error::Error for IoError {}

    impl<R: std::io::Read> Source for IoSource<R> {
        type Error = IoError;

        fn read(&mut self, buf: &mut [u8]) -> Result<usize, IoError> {
            loop {
                match self.inner.read(buf) {
                    Ok(n) => return Ok(n),
                    Err(e) if e.kind() == std::io::ErrorKind::Interrupted => continue,
                    Err(e) => return Err(IoError(Arc::new(e))),
                }
            }
        }
    }
}

#[cfg(feature = "std")]
pub use io::{IoError, IoSource};
