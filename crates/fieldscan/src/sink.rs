//! Destinations for flushed appender content.

use alloc::{string::String, vec::Vec};

use crate::Error;

/// Accepts runs of characters flushed by a
/// [`SinkAppender`](crate::SinkAppender).
///
/// No partial-write recovery is attempted: a failed write is fatal for the
/// value being written.
pub trait CharSink {
    /// Writes all of `chars`.
    ///
    /// # Errors
    ///
    /// [`Error::Sink`] if the destination rejected the write.
    fn write_chars(&mut self, chars: &[char]) -> Result<(), Error>;
}

impl<W: CharSink + ?Sized> CharSink for &mut W {
    #[inline]
    fn write_chars(&mut self, chars: &[char]) -> Result<(), Error> {
        (**self).write_chars(chars)
    }
}

impl CharSink for String {
    fn write_chars(&mut self, chars: &[char]) -> Result<(), Error> {
        self.extend(chars);
        Ok(())
    }
}

impl CharSink for Vec<char> {
    fn write_chars(&mut self, chars: &[char]) -> Result<(), Error> {
        self.extend_from_slice(chars);
        Ok(())
    }
}

#[cfg(feature = "std")]
pub use self::io::IoSink;

#[cfg(feature = "std")]
mod io {
    use alloc::{string::ToString, vec::Vec};
    use std::io::Write;

    use super::CharSink;
    use crate::Error;

    /// UTF-8 encodes flushed characters into a byte writer.
    #[derive(Debug)]
    pub struct IoSink<W> {
        writer: W,
        scratch: Vec<u8>,
    }

    impl<W: Write> IoSink<W> {
        /// Writes into `writer`.
        pub fn new(writer: W) -> Self {
            Self {
                writer,
                scratch: Vec::new(),
            }
        }

        /// The wrapped writer.
        pub fn get_ref(&self) -> &W {
            &self.writer
        }

        /// Returns the wrapped writer.
        pub fn into_inner(self) -> W {
            self.writer
        }
    }

    impl<W: Write> CharSink for IoSink<W> {
        fn write_chars(&mut self, chars: &[char]) -> Result<(), Error> {
            self.scratch.clear();
            let mut tmp = [0u8; 4];
            for ch in chars {
                self.scratch
                    .extend_from_slice(ch.encode_utf8(&mut tmp).as_bytes());
            }
            self.writer
                .write_all(&self.scratch)
                .map_err(|e| Error::Sink(e.to_string()))
        }
    }
}
