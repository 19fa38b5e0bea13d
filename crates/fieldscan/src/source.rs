//! Pull-based character sources.
//!
//! A [`CharSource`] hands out one decoded `char` per call and signals
//! exhaustion with [`Error::EndOfInput`]. Sources are fused: once exhausted
//! they keep returning `EndOfInput`.
//!
//! The appender's `append_until` and the lookahead reader are the only places
//! that pull from a source.

use core::str::Chars;

use crate::Error;

/// A supplier of decoded characters.
pub trait CharSource {
    /// Returns the next character, or [`Error::EndOfInput`] once the input is
    /// exhausted.
    ///
    /// # Errors
    ///
    /// [`Error::EndOfInput`] at the end of input, [`Error::Source`] if the
    /// underlying reader failed.
    fn next_char(&mut self) -> Result<char, Error>;
}

impl<S: CharSource + ?Sized> CharSource for &mut S {
    #[inline]
    fn next_char(&mut self) -> Result<char, Error> {
        (**self).next_char()
    }
}

/// Characters of a borrowed string.
#[derive(Debug, Clone)]
pub struct StrSource<'a> {
    chars: Chars<'a>,
}

impl<'a> StrSource<'a> {
    /// Reads `text` from its first character.
    #[must_use]
    pub fn new(text: &'a str) -> Self {
        Self {
            chars: text.chars(),
        }
    }

    /// The part of the input not read yet.
    #[must_use]
    pub fn as_str(&self) -> &'a str {
        self.chars.as_str()
    }
}

impl CharSource for StrSource<'_> {
    #[inline]
    fn next_char(&mut self) -> Result<char, Error> {
        self.chars.next().ok_or(Error::EndOfInput)
    }
}

/// Replaces a one- or two-character line separator with a single normalized
/// newline character.
///
/// A first separator character that is not followed by the second one is
/// passed through unchanged, so a lone `'\r'` survives `"\r\n"`
/// normalization.
#[derive(Debug, Clone)]
pub struct LineNormalizer<S> {
    source: S,
    first: char,
    second: Option<char>,
    newline: char,
    held: Option<char>,
}

impl<S: CharSource> LineNormalizer<S> {
    /// Normalizes `first` (followed by `second`, if given) to `newline`.
    pub fn new(source: S, first: char, second: Option<char>, newline: char) -> Self {
        Self {
            source,
            first,
            second,
            newline,
            held: None,
        }
    }

    /// Normalizes `"\r\n"` to `'\n'`.
    pub fn crlf(source: S) -> Self {
        Self::new(source, '\r', Some('\n'), '\n')
    }

    /// Returns the wrapped source, dropping a character held back while
    /// probing for the second separator character.
    pub fn into_inner(self) -> S {
        self.source
    }

    fn pull(&mut self) -> Result<char, Error> {
        match self.held.take() {
            Some(ch) => Ok(ch),
            None => self.source.next_char(),
        }
    }
}

impl<S: CharSource> CharSource for LineNormalizer<S> {
    fn next_char(&mut self) -> Result<char, Error> {
        let ch = self.pull()?;
        if ch != self.first {
            return Ok(ch);
        }
        let Some(second) = self.second else {
            return Ok(self.newline);
        };
        match self.source.next_char() {
            Ok(next) if next == second => Ok(self.newline),
            Ok(next) => {
                self.held = Some(next);
                Ok(ch)
            }
            Err(Error::EndOfInput) => Ok(ch),
            Err(e) => Err(e),
        }
    }
}

#[cfg(feature = "std")]
pub use self::io::Utf8Source;

#[cfg(feature = "std")]
mod io {
    use alloc::{string::ToString, vec, vec::Vec};
    use std::io::{ErrorKind, Read};

    use super::CharSource;
    use crate::Error;

    const DEFAULT_BUFFER_SIZE: usize = 8 * 1024;
    // Longest UTF-8 encoding of a scalar value.
    const MAX_UTF8_LEN: usize = 4;

    /// Decodes UTF-8 from a byte reader.
    ///
    /// Invalid sequences decode to U+FFFD, one replacement per maximal invalid
    /// prefix. Read failures other than interruption surface as
    /// [`Error::Source`].
    #[derive(Debug)]
    pub struct Utf8Source<R> {
        reader: R,
        buf: Vec<u8>,
        pos: usize,
        end: usize,
        eof: bool,
    }

    impl<R: Read> Utf8Source<R> {
        /// Reads from `reader` through an 8 KiB buffer.
        pub fn new(reader: R) -> Self {
            Self::with_capacity(DEFAULT_BUFFER_SIZE, reader)
        }

        /// Reads from `reader` through a buffer of `capacity` bytes (at least
        /// four).
        pub fn with_capacity(capacity: usize, reader: R) -> Self {
            Self {
                reader,
                buf: vec![0; capacity.max(MAX_UTF8_LEN)],
                pos: 0,
                end: 0,
                eof: false,
            }
        }

        /// Returns the wrapped reader. Buffered bytes are lost.
        pub fn into_inner(self) -> R {
            self.reader
        }

        // Tops the buffer up until a whole scalar is available or the reader
        // is exhausted.
        fn fill(&mut self) -> Result<(), Error> {
            self.buf.copy_within(self.pos..self.end, 0);
            self.end -= self.pos;
            self.pos = 0;
            while !self.eof && self.end < MAX_UTF8_LEN {
                match self.reader.read(&mut self.buf[self.end..]) {
                    Ok(0) => self.eof = true,
                    Ok(n) => self.end += n,
                    Err(e) if e.kind() == ErrorKind::Interrupted => {}
                    Err(e) => return Err(Error::Source(e.to_string())),
                }
            }
            Ok(())
        }
    }

    impl<R: Read> CharSource for Utf8Source<R> {
        fn next_char(&mut self) -> Result<char, Error> {
            if !self.eof && self.end - self.pos < MAX_UTF8_LEN {
                self.fill()?;
            }
            if self.pos == self.end {
                return Err(Error::EndOfInput);
            }
            let (ch, len) = bstr::decode_utf8(&self.buf[self.pos..self.end]);
            self.pos += len.max(1);
            Ok(ch.unwrap_or(char::REPLACEMENT_CHARACTER))
        }
    }
}
