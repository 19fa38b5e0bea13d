//! Character appenders with trailing-trim bookkeeping.
//!
//! Every character of a parsed or written field passes through an
//! [`Appender`]. Besides plain appends, the appender offers trim-tracking
//! variants that record how many trailing characters are whitespace or
//! padding; extraction drops exactly that trailing run. The run is reset by
//! the next non-ignorable character appended in a trim-tracking mode, at
//! which point the pending characters become part of the value.
//!
//! The three variants share this algorithm and differ only in their
//! [`Overflow`] policy:
//!
//! - [`BoundedAppender`] fails with [`Error::CapacityExceeded`].
//! - [`GrowableAppender`] reallocates, up to a maximum.
//! - [`SinkAppender`] flushes committed content to a [`CharSink`] and also
//!   rewrites normalized newlines into the output line separator.
//!
//! Plain appends (`append`, `append_chars`, `fill`, ...) never change the
//! pending trim count: a trailing run stays pending until a trim-tracking
//! append says otherwise, or the caller resets it.

use alloc::{string::String, vec::Vec};
use core::fmt;

use crate::{
    AppenderOptions, Error, WriterOptions, sink::CharSink, source::CharSource,
};

mod buffer;
mod policy;

use self::buffer::{Buffer, Trim};
pub use self::policy::{Bounded, Flush, Growable, MAX_CAPACITY, Overflow};

/// Appender whose capacity is a hard limit.
pub type BoundedAppender = Appender<Bounded>;

/// Appender that reallocates on demand.
pub type GrowableAppender = Appender<Growable>;

/// Appender that streams its content into `W` through a small buffer.
pub type SinkAppender<W> = Appender<Flush<W>>;

/// Accumulates the characters of one value at a time.
///
/// See the [module documentation](self) for the trimming rules.
#[derive(Debug)]
pub struct Appender<P> {
    buf: Buffer,
    policy: P,
    empty_value: Option<String>,
    whitespace_range_start: i32,
}

impl BoundedAppender {
    /// Creates an appender holding at most `options.capacity` characters.
    #[must_use]
    pub fn new(options: AppenderOptions) -> Self {
        Self::from_parts(options, Bounded)
    }
}

impl GrowableAppender {
    /// Creates an appender starting at `options.capacity` characters and
    /// growing up to `options.max_capacity`.
    #[must_use]
    pub fn new(options: AppenderOptions) -> Self {
        let policy = Growable::new(options.max_capacity);
        Self::from_parts(options, policy)
    }
}

impl<W: CharSink> SinkAppender<W> {
    /// Creates an appender that flushes into `sink` whenever
    /// `options.capacity` characters are buffered.
    pub fn new(sink: W, options: AppenderOptions, writer: &WriterOptions) -> Self {
        let policy = Flush::new(
            sink,
            &writer.line_separator,
            writer.normalized_newline,
            writer.denormalize_line_endings,
            options.max_capacity,
        );
        Self::from_parts(options, policy)
    }

    /// Writes the trimmed content to the sink and resets the appender.
    ///
    /// When the trimmed content is empty and nothing of the current value was
    /// flushed yet, a configured empty value is written instead; an explicit
    /// empty string still results in a (zero-length) write. With no empty
    /// value configured the sink is not called at all.
    ///
    /// Returns whether the sink was called.
    ///
    /// # Errors
    ///
    /// Propagates sink failures; the appender is left untouched in that case.
    pub fn write_chars_and_reset(&mut self) -> Result<bool, Error> {
        let committed = self.buf.trimmed();
        let wrote = if !committed.is_empty() {
            self.policy.sink.write_chars(committed)?;
            true
        } else if self.policy.started {
            false
        } else if let Some(empty) = &self.empty_value {
            let empty: Vec<char> = empty.chars().collect();
            self.policy.sink.write_chars(&empty)?;
            true
        } else {
            false
        };
        self.reset();
        Ok(wrote)
    }

    /// Turns rewriting of normalized newlines into the line separator on or
    /// off. Applies to appends made after the call.
    pub fn enable_denormalized_line_endings(&mut self, enable: bool) {
        self.policy.denormalize = enable;
    }

    /// The separator written for each normalized newline.
    pub fn line_separator(&self) -> &[char] {
        self.policy.line_separator()
    }

    /// The sink flushed content goes to.
    pub fn sink(&self) -> &W {
        &self.policy.sink
    }

    /// Mutable access to the sink, e.g. to write delimiters between values.
    pub fn sink_mut(&mut self) -> &mut W {
        &mut self.policy.sink
    }

    /// Returns the sink. Buffered content that was not written is dropped.
    pub fn into_sink(self) -> W {
        self.policy.sink
    }
}

impl<P: Overflow> Appender<P> {
    fn from_parts(options: AppenderOptions, policy: P) -> Self {
        Self {
            buf: Buffer::with_capacity(options.capacity.min(MAX_CAPACITY)),
            policy,
            empty_value: options.empty_value,
            whitespace_range_start: options.whitespace_range_start,
        }
    }

    #[inline]
    fn reserve(&mut self, additional: usize) -> Result<(), Error> {
        if self.buf.spare() >= additional {
            return Ok(());
        }
        self.policy.make_room(&mut self.buf, additional)
    }

    #[inline]
    fn reserve_in_place(&mut self, additional: usize) -> Result<(), Error> {
        if self.buf.spare() >= additional {
            return Ok(());
        }
        self.policy.make_room_in_place(&mut self.buf, additional)
    }

    #[inline]
    fn write(&mut self, ch: char, trim: Trim) -> Result<(), Error> {
        let width = self.policy.translate(ch).map_or(1, <[char]>::len);
        self.reserve(width)?;
        let range_start = self.whitespace_range_start;
        match self.policy.translate(ch) {
            Some(text) => {
                for &c in text {
                    self.buf.push(c, trim, range_start);
                }
            }
            None => self.buf.push(ch, trim, range_start),
        }
        Ok(())
    }

    /// Appends `ch` without touching the pending trim count.
    ///
    /// # Errors
    ///
    /// [`Error::CapacityExceeded`] if the policy cannot make room, or a sink
    /// error from a flush.
    #[inline]
    pub fn append(&mut self, ch: char) -> Result<(), Error> {
        self.write(ch, Trim::Keep)
    }

    /// Appends `ch`, counting it as pending trim if it is whitespace and
    /// resetting the pending count otherwise.
    ///
    /// # Errors
    ///
    /// See [`append`](Self::append).
    #[inline]
    pub fn append_ignoring_whitespace(&mut self, ch: char) -> Result<(), Error> {
        self.write(ch, Trim::Whitespace)
    }

    /// Appends `ch`, counting it as pending trim if it equals `padding`.
    ///
    /// # Errors
    ///
    /// See [`append`](Self::append).
    #[inline]
    pub fn append_ignoring_padding(&mut self, ch: char, padding: char) -> Result<(), Error> {
        self.write(ch, Trim::Padding(padding))
    }

    /// Appends `ch`, counting it as pending trim if it is whitespace or
    /// equals `padding`.
    ///
    /// # Errors
    ///
    /// See [`append`](Self::append).
    #[inline]
    pub fn append_ignoring_whitespace_and_padding(
        &mut self,
        ch: char,
        padding: char,
    ) -> Result<(), Error> {
        self.write(ch, Trim::WhitespaceOrPadding(padding))
    }

    /// Appends every character of `chars`. Fails without appending anything
    /// if they do not fit.
    ///
    /// # Errors
    ///
    /// See [`append`](Self::append).
    pub fn append_chars(&mut self, chars: &[char]) -> Result<(), Error> {
        self.reserve(chars.len())?;
        self.buf.chars.extend_from_slice(chars);
        Ok(())
    }

    /// Appends every character of `text`.
    ///
    /// # Errors
    ///
    /// See [`append`](Self::append).
    pub fn append_str(&mut self, text: &str) -> Result<(), Error> {
        self.reserve(text.chars().count())?;
        self.buf.chars.extend(text.chars());
        Ok(())
    }

    /// Moves the trimmed content of `other` to the end of this appender and
    /// resets `other`, which stays usable.
    ///
    /// # Errors
    ///
    /// See [`append`](Self::append). On failure `other` keeps its content.
    pub fn append_appender<Q: Overflow>(&mut self, other: &mut Appender<Q>) -> Result<(), Error> {
        self.append_chars(other.buf.trimmed())?;
        other.reset();
        Ok(())
    }

    /// Appends `ch` exactly `count` times.
    ///
    /// # Errors
    ///
    /// See [`append_chars`](Self::append_chars).
    pub fn fill(&mut self, ch: char, count: usize) -> Result<(), Error> {
        self.reserve(count)?;
        self.buf.chars.extend(core::iter::repeat_n(ch, count));
        Ok(())
    }

    /// Inserts `ch` in front of the content.
    ///
    /// # Errors
    ///
    /// See [`append`](Self::append).
    pub fn prepend(&mut self, ch: char) -> Result<(), Error> {
        self.prepend_chars(&[ch])
    }

    /// Inserts `first` followed by `second` in front of the content.
    ///
    /// # Errors
    ///
    /// See [`append`](Self::append).
    pub fn prepend_pair(&mut self, first: char, second: char) -> Result<(), Error> {
        self.prepend_chars(&[first, second])
    }

    /// Inserts `chars` in front of the content.
    ///
    /// A sink-backed appender grows instead of flushing here, so the
    /// inserted characters always precede the whole value in the sink.
    ///
    /// # Errors
    ///
    /// [`Error::CapacityExceeded`] if the buffer cannot grow enough, and
    /// [`Error::AlreadyFlushed`] if the front of the value has already left
    /// a sink-backed appender.
    pub fn prepend_chars(&mut self, chars: &[char]) -> Result<(), Error> {
        if self.policy.value_started() {
            return Err(Error::AlreadyFlushed);
        }
        self.reserve_in_place(chars.len())?;
        self.buf.chars.splice(0..0, chars.iter().copied());
        Ok(())
    }

    /// Appends `first`, then pulls characters from `source` and appends them
    /// until one of `stops` is read. The stop character is returned and not
    /// appended.
    ///
    /// # Errors
    ///
    /// [`Error::EndOfInput`] if the source runs dry before a stop character;
    /// everything read up to that point stays appended.
    pub fn append_until<S: CharSource + ?Sized>(
        &mut self,
        first: char,
        source: &mut S,
        stops: &[char],
    ) -> Result<char, Error> {
        self.append(first)?;
        loop {
            let ch = source.next_char()?;
            if stops.contains(&ch) {
                return Ok(ch);
            }
            self.append(ch)?;
        }
    }

    /// Position of the first `ch` at or after `from`.
    #[must_use]
    pub fn index_of(&self, ch: char, from: usize) -> Option<usize> {
        let tail = self.buf.chars.get(from..)?;
        tail.iter().position(|&c| c == ch).map(|i| i + from)
    }

    /// Position of the first character at or after `from` that is any of
    /// `chars`.
    #[must_use]
    pub fn index_of_any(&self, chars: &[char], from: usize) -> Option<usize> {
        let tail = self.buf.chars.get(from..)?;
        tail.iter()
            .position(|c| chars.contains(c))
            .map(|i| i + from)
    }

    /// Character at `index`, pending trim included.
    ///
    /// # Errors
    ///
    /// [`Error::IndexOutOfBounds`] past the committed content.
    pub fn char_at(&self, index: usize) -> Result<char, Error> {
        self.buf
            .chars
            .get(index)
            .copied()
            .ok_or(Error::IndexOutOfBounds {
                index,
                len: self.buf.len(),
            })
    }

    /// Characters in `start..end`, pending trim included.
    ///
    /// # Errors
    ///
    /// [`Error::RangeOutOfBounds`] for reversed ranges or ranges past the
    /// committed content.
    pub fn sub_sequence(&self, start: usize, end: usize) -> Result<&[char], Error> {
        self.buf.chars.get(start..end).ok_or(Error::RangeOutOfBounds {
            start,
            end,
            len: self.buf.len(),
        })
    }

    /// Copy of the characters in `start..end`.
    ///
    /// # Errors
    ///
    /// See [`sub_sequence`](Self::sub_sequence).
    pub fn substring(&self, start: usize, end: usize) -> Result<String, Error> {
        Ok(self.sub_sequence(start, end)?.iter().collect())
    }

    /// Deletes `count` characters starting at `start`.
    ///
    /// Positions are relative to the buffered content; on a sink-backed
    /// appender characters already flushed cannot be removed.
    ///
    /// # Errors
    ///
    /// [`Error::RangeOutOfBounds`] if the range runs past the content.
    pub fn remove(&mut self, start: usize, count: usize) -> Result<(), Error> {
        let len = self.buf.len();
        let end = start
            .checked_add(count)
            .filter(|&end| end <= len)
            .ok_or(Error::RangeOutOfBounds {
                start,
                end: start.saturating_add(count),
                len,
            })?;
        self.buf.chars.drain(start..end);
        self.buf.pending = self.buf.pending.min(self.buf.len());
        Ok(())
    }

    /// Drops the last `count` characters; deleting more than there are
    /// empties the appender. Deleted characters leave the pending run too.
    /// On a sink-backed appender only buffered characters can be dropped.
    pub fn delete(&mut self, count: usize) {
        let len = self.buf.len().saturating_sub(count);
        self.buf.chars.truncate(len);
        self.buf.pending = self.buf.pending.saturating_sub(count).min(len);
    }

    /// Number of trailing characters pending trim.
    #[must_use]
    pub fn whitespace_count(&self) -> usize {
        self.buf.pending
    }

    /// Makes every pending character part of the value.
    pub fn reset_whitespace_count(&mut self) {
        self.buf.pending = 0;
    }

    /// Recounts the trailing whitespace run, for callers that appended with
    /// [`append`](Self::append) and decide afterwards.
    pub fn update_whitespace(&mut self) {
        self.buf.pending = self.buf.trailing_whitespace(self.whitespace_range_start);
    }

    /// Counts `count` characters the caller did not store towards the
    /// pending run. Extraction then trims up to that many stored characters.
    pub fn ignore(&mut self, count: usize) {
        self.buf.pending = self.buf.pending.saturating_add(count);
    }

    /// Length of the content that survives trimming.
    #[must_use]
    pub fn len(&self) -> usize {
        self.buf.trimmed_len()
    }

    /// Whether the trimmed content is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of stored characters, pending trim included.
    #[must_use]
    pub fn raw_len(&self) -> usize {
        self.buf.len()
    }

    /// Current capacity.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.buf.capacity
    }

    /// Stored characters, pending trim included.
    #[must_use]
    pub fn chars(&self) -> &[char] {
        &self.buf.chars
    }

    /// The value substituted for empty content.
    #[must_use]
    pub fn empty_value(&self) -> Option<&str> {
        self.empty_value.as_deref()
    }

    /// Discards the content and the pending count.
    pub fn reset(&mut self) {
        self.buf.clear();
        self.policy.on_reset();
    }

    #[cfg(any(test, feature = "fuzzing"))]
    #[doc(hidden)]
    /// Panics if the buffer bookkeeping is inconsistent.
    pub fn assert_invariants(&self) {
        assert!(
            self.buf.len() <= self.buf.capacity,
            "{} characters stored in a buffer of {}",
            self.buf.len(),
            self.buf.capacity
        );
        assert!(self.len() <= self.raw_len());
        assert!(self.buf.capacity <= MAX_CAPACITY);
    }

    fn use_empty_value(&self) -> bool {
        self.buf.trimmed_len() == 0 && !self.policy.value_started()
    }

    /// Returns the trimmed content, or the empty value if it is empty, and
    /// resets the appender.
    pub fn get_and_reset(&mut self) -> Option<String> {
        let value = if self.use_empty_value() {
            self.empty_value.clone()
        } else {
            Some(self.buf.trimmed().iter().collect())
        };
        self.reset();
        value
    }

    /// Like [`get_and_reset`](Self::get_and_reset), as characters.
    pub fn get_chars_and_reset(&mut self) -> Option<Vec<char>> {
        let value = if self.use_empty_value() {
            self.empty_value.as_ref().map(|v| v.chars().collect())
        } else {
            Some(self.buf.trimmed().to_vec())
        };
        self.reset();
        value
    }
}

/// Renders the trimmed content, the empty value, or nothing.
impl<P: Overflow> fmt::Display for Appender<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.use_empty_value() {
            return f.write_str(self.empty_value.as_deref().unwrap_or_default());
        }
        self.buf.trimmed().iter().try_for_each(|&ch| fmt::Write::write_char(f, ch))
    }
}
