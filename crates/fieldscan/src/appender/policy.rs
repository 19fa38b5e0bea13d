//! What an appender does when a write would not fit.

use alloc::vec::Vec;

use super::buffer::Buffer;
use crate::{Error, sink::CharSink};

mod sealed {
    pub trait Sealed {}
}

/// Overflow strategy of an [`Appender`](super::Appender).
///
/// The trimming bookkeeping lives in the appender; a policy only decides how
/// room is made and whether newlines are rewritten on the way in.
pub trait Overflow: sealed::Sealed {
    /// Ensures at least `additional` characters fit behind the committed
    /// content, or fails without touching it.
    ///
    /// # Errors
    ///
    /// [`Error::CapacityExceeded`] when no room can be made, or a sink error
    /// from a flush.
    fn make_room(&mut self, buf: &mut Buffer, additional: usize) -> Result<(), Error>;

    /// Like [`make_room`](Self::make_room), but keeps every stored character
    /// in the buffer. Used by edits that touch the front of the value.
    ///
    /// # Errors
    ///
    /// [`Error::CapacityExceeded`] when no room can be made.
    #[inline]
    fn make_room_in_place(&mut self, buf: &mut Buffer, additional: usize) -> Result<(), Error> {
        self.make_room(buf, additional)
    }

    /// Text written instead of `ch`, if this policy rewrites it.
    #[inline]
    fn translate(&self, _ch: char) -> Option<&[char]> {
        None
    }

    /// Whether part of the current value already left the buffer.
    #[inline]
    fn value_started(&self) -> bool {
        false
    }

    /// Called whenever the appender is reset.
    #[inline]
    fn on_reset(&mut self) {}
}

/// Largest capacity any appender can reach.
pub const MAX_CAPACITY: usize = isize::MAX as usize / core::mem::size_of::<char>();

fn exceeded(capacity: usize, buf: &Buffer, additional: usize) -> Error {
    let required = buf.len().saturating_add(additional);
    tracing::debug!(capacity, required, "appender capacity exceeded");
    Error::CapacityExceeded { capacity, required }
}

/// Fixed capacity; overflowing is fatal for the value.
#[derive(Debug, Clone, Copy, Default)]
pub struct Bounded;

impl sealed::Sealed for Bounded {}

impl Overflow for Bounded {
    fn make_room(&mut self, buf: &mut Buffer, additional: usize) -> Result<(), Error> {
        Err(exceeded(buf.capacity, buf, additional))
    }
}

/// Grows by half again the required length, up to a maximum.
#[derive(Debug, Clone, Copy)]
pub struct Growable {
    max_capacity: usize,
}

impl Growable {
    /// Grows up to `max_capacity` characters.
    #[must_use]
    pub fn new(max_capacity: usize) -> Self {
        Self {
            max_capacity: max_capacity.min(MAX_CAPACITY),
        }
    }
}

impl Default for Growable {
    fn default() -> Self {
        Self::new(MAX_CAPACITY)
    }
}

impl sealed::Sealed for Growable {}

impl Overflow for Growable {
    fn make_room(&mut self, buf: &mut Buffer, additional: usize) -> Result<(), Error> {
        grow(buf, additional, self.max_capacity)
    }
}

fn grow(buf: &mut Buffer, additional: usize, max_capacity: usize) -> Result<(), Error> {
    let required = match buf.len().checked_add(additional) {
        Some(required) if required <= max_capacity => required,
        _ => return Err(exceeded(max_capacity, buf, additional)),
    };
    let capacity = required
        .saturating_add(required / 2)
        .max(buf.capacity.saturating_mul(2))
        .min(max_capacity);
    tracing::debug!(from = buf.capacity, to = capacity, "growing appender");
    buf.grow_to(capacity);
    Ok(())
}

/// Flushes committed content to a sink whenever the buffer fills up.
///
/// Characters still pending trim are carried over, since a later
/// non-ignorable character may yet make them part of the value. When the
/// carried run alone fills the buffer it grows, up to a maximum.
#[derive(Debug)]
pub struct Flush<W> {
    pub(crate) sink: W,
    line_separator: Vec<char>,
    newline: char,
    pub(crate) denormalize: bool,
    max_capacity: usize,
    pub(crate) started: bool,
}

impl<W> Flush<W> {
    pub(crate) fn new(
        sink: W,
        line_separator: &str,
        newline: char,
        denormalize: bool,
        max_capacity: usize,
    ) -> Self {
        Self {
            sink,
            line_separator: line_separator.chars().collect(),
            newline,
            denormalize,
            max_capacity: max_capacity.min(MAX_CAPACITY),
            started: false,
        }
    }

    pub(crate) fn line_separator(&self) -> &[char] {
        &self.line_separator
    }
}

impl<W> sealed::Sealed for Flush<W> {}

impl<W: CharSink> Overflow for Flush<W> {
    fn make_room(&mut self, buf: &mut Buffer, additional: usize) -> Result<(), Error> {
        let committed = buf.trimmed_len();
        if committed > 0 {
            self.sink.write_chars(&buf.chars[..committed])?;
            buf.chars.drain(..committed);
            self.started = true;
            tracing::trace!(committed, carried = buf.len(), "flushed appender");
        }
        if buf.spare() >= additional {
            return Ok(());
        }
        grow(buf, additional, self.max_capacity)
    }

    fn make_room_in_place(&mut self, buf: &mut Buffer, additional: usize) -> Result<(), Error> {
        grow(buf, additional, self.max_capacity)
    }

    #[inline]
    fn translate(&self, ch: char) -> Option<&[char]> {
        (self.denormalize && ch == self.newline).then_some(self.line_separator.as_slice())
    }

    #[inline]
    fn value_started(&self) -> bool {
        self.started
    }

    #[inline]
    fn on_reset(&mut self) {
        self.started = false;
    }
}
