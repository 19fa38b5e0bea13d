use alloc::string::String;

use thiserror::Error;

/// Errors raised by appenders, sources, sinks and the lookahead reader.
///
/// None of these are retried internally; they all surface to the tokenizer,
/// which decides whether to abort or skip the current record.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// A character was demanded but the input is exhausted.
    #[error("unexpected end of input")]
    EndOfInput,
    /// A write could not be accommodated by the appender.
    #[error("capacity of {capacity} characters exceeded: {required} required")]
    CapacityExceeded {
        /// Largest capacity the appender could offer.
        capacity: usize,
        /// Length the rejected write needed.
        required: usize,
    },
    /// A lookahead match was attempted with an empty sequence.
    #[error("match sequence must contain at least one character")]
    EmptySequence,
    /// A character index lies outside the committed content.
    #[error("index {index} out of bounds for length {len}")]
    IndexOutOfBounds {
        /// Requested index.
        index: usize,
        /// Committed length at the time of the call.
        len: usize,
    },
    /// A range lies outside the committed content or is reversed.
    #[error("range {start}..{end} out of bounds for length {len}")]
    RangeOutOfBounds {
        /// Start of the requested range.
        start: usize,
        /// End of the requested range.
        end: usize,
        /// Committed length at the time of the call.
        len: usize,
    },
    /// An edit at the front of a value after part of it was already
    /// written to the sink.
    #[error("value was already partly written to the sink")]
    AlreadyFlushed,
    /// The output sink rejected a write.
    #[error("sink write failed: {0}")]
    Sink(String),
    /// The underlying input failed for a reason other than exhaustion.
    #[error("source read failed: {0}")]
    Source(String),
}

impl Error {
    /// Whether this is the end-of-input signal rather than a hard failure.
    #[must_use]
    pub fn is_end_of_input(&self) -> bool {
        matches!(self, Error::EndOfInput)
    }
}
