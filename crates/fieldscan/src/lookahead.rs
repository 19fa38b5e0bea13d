//! Bounded lookahead over a streaming character source.
//!
//! The reader keeps a single ring of characters pulled ahead of the current
//! position: its front is the next character [`LookaheadReader::next_char`]
//! returns, its back is where [`LookaheadReader::lookahead`] appends. Peeking
//! and matching never consume anything; only `next_char` (and
//! `skip_whitespace`, built on it) advances.
//!
//! ```rust
//! use fieldscan::{LookaheadReader, ReaderOptions, StrSource};
//!
//! let mut reader = LookaheadReader::new(StrSource::new("a\r\nb"), ReaderOptions::default());
//! assert_eq!(reader.next_char()?, 'a');
//! reader.lookahead(2)?;
//! assert!(reader.matches(&['\r', '\n'], '?')?);
//! assert_eq!(reader.next_char()?, '\r');
//! # Ok::<(), fieldscan::Error>(())
//! ```

use alloc::{collections::VecDeque, string::String};

use crate::{Error, ReaderOptions, source::CharSource};

/// A [`CharSource`] wrapper with peek-ahead and multi-character matching.
#[derive(Debug)]
pub struct LookaheadReader<S> {
    source: S,
    window: VecDeque<char>,
    current: Option<char>,
    options: ReaderOptions,
}

impl<S: CharSource> LookaheadReader<S> {
    /// Reads from `source`.
    pub fn new(source: S, options: ReaderOptions) -> Self {
        Self {
            source,
            window: VecDeque::new(),
            current: None,
            options,
        }
    }

    /// Rebinds the reader to `source`, discarding the lookahead window, and
    /// returns the previous source.
    pub fn start(&mut self, source: S) -> S {
        self.window.clear();
        self.current = None;
        core::mem::replace(&mut self.source, source)
    }

    /// Pulls up to `count` more characters into the window, behind the ones
    /// already waiting there. Running out of input is not an error; the
    /// window simply ends early.
    ///
    /// # Errors
    ///
    /// Source failures other than [`Error::EndOfInput`].
    pub fn lookahead(&mut self, count: usize) -> Result<(), Error> {
        self.window.reserve(count);
        for _ in 0..count {
            match self.source.next_char() {
                Ok(ch) => self.window.push_back(ch),
                Err(Error::EndOfInput) => break,
                Err(e) => return Err(e),
            }
        }
        tracing::trace!(requested = count, window = self.window.len(), "lookahead");
        Ok(())
    }

    /// Returns the next character, from the window if it holds any.
    ///
    /// # Errors
    ///
    /// [`Error::EndOfInput`] once the window and the source are both empty.
    pub fn next_char(&mut self) -> Result<char, Error> {
        let ch = match self.window.pop_front() {
            Some(ch) => ch,
            None => self.source.next_char()?,
        };
        self.current = Some(ch);
        Ok(ch)
    }

    /// The character most recently returned by
    /// [`next_char`](Self::next_char).
    #[must_use]
    pub fn current(&self) -> Option<char> {
        self.current
    }

    /// Whether `current` followed by the window matches `sequence`.
    ///
    /// A position holding `wildcard` matches any character, or none at all
    /// past the end of the window. Any other position past the window fails
    /// the match.
    ///
    /// # Errors
    ///
    /// [`Error::EmptySequence`] if `sequence` is empty.
    pub fn matches_current(
        &self,
        current: char,
        sequence: &[char],
        wildcard: char,
    ) -> Result<bool, Error> {
        let (&first, rest) = sequence.split_first().ok_or(Error::EmptySequence)?;
        Ok((first == wildcard || first == current) && self.window_matches(rest, wildcard))
    }

    /// Whether the window matches `sequence`, with the wildcard rules of
    /// [`matches_current`](Self::matches_current).
    ///
    /// # Errors
    ///
    /// [`Error::EmptySequence`] if `sequence` is empty.
    pub fn matches(&self, sequence: &[char], wildcard: char) -> Result<bool, Error> {
        if sequence.is_empty() {
            return Err(Error::EmptySequence);
        }
        Ok(self.window_matches(sequence, wildcard))
    }

    fn window_matches(&self, sequence: &[char], wildcard: char) -> bool {
        sequence
            .iter()
            .enumerate()
            .all(|(i, &expected)| expected == wildcard || self.window.get(i) == Some(&expected))
    }

    /// The characters waiting in the window.
    #[must_use]
    pub fn lookahead_text(&self) -> String {
        self.window.iter().collect()
    }

    /// Number of characters waiting in the window.
    #[must_use]
    pub fn lookahead_len(&self) -> usize {
        self.window.len()
    }

    /// Consumes characters while they equal `whitespace`, and returns the
    /// first one that does not.
    ///
    /// Skipping also stops at `escape`, at `newline`, and at characters
    /// whose code is not above the configured whitespace-range start. The
    /// returned character has been consumed.
    ///
    /// # Errors
    ///
    /// [`Error::EndOfInput`] if the input ends while skipping. There is no
    /// character to return in that case, and reporting it here keeps a
    /// caller from mistaking a placeholder for a real stop character.
    pub fn skip_whitespace(
        &mut self,
        whitespace: char,
        escape: char,
        newline: char,
    ) -> Result<char, Error> {
        loop {
            let ch = self.next_char()?;
            if ch != whitespace || ch == escape || ch == newline || !self.in_whitespace_range(ch) {
                return Ok(ch);
            }
        }
    }

    /// [`skip_whitespace`](Self::skip_whitespace) stopping at the
    /// configured [`normalized_newline`](ReaderOptions::normalized_newline).
    ///
    /// # Errors
    ///
    /// See [`skip_whitespace`](Self::skip_whitespace).
    pub fn skip_line_whitespace(&mut self, whitespace: char, escape: char) -> Result<char, Error> {
        self.skip_whitespace(whitespace, escape, self.options.normalized_newline)
    }

    fn in_whitespace_range(&self, ch: char) -> bool {
        i64::from(u32::from(ch)) > i64::from(self.options.whitespace_range_start)
    }

    /// The options the reader was created with.
    #[must_use]
    pub fn options(&self) -> &ReaderOptions {
        &self.options
    }

    /// Returns the wrapped source. Characters in the window are lost.
    pub fn into_inner(self) -> S {
        self.source
    }
}

impl<S: CharSource> CharSource for LookaheadReader<S> {
    #[inline]
    fn next_char(&mut self) -> Result<char, Error> {
        LookaheadReader::next_char(self)
    }
}
