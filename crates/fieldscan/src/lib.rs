//! Character-level building blocks for delimited-text parsers and writers.
//!
//! A parser pulls characters from a [`CharSource`], usually through a
//! [`LookaheadReader`] so it can recognize multi-character delimiters, and
//! collects each field into an [`Appender`]. Appenders drop trailing
//! whitespace or padding as they go, without a second pass. A writer uses a
//! [`SinkAppender`], which streams field content into a [`CharSink`] and
//! rewrites normalized newlines into the output line separator.
//!
//! ```rust
//! use fieldscan::{AppenderOptions, GrowableAppender, LookaheadReader, ReaderOptions, StrSource};
//!
//! let mut reader = LookaheadReader::new(StrSource::new("  Santa Claus  ,next"), ReaderOptions::default());
//! let mut field = GrowableAppender::new(AppenderOptions::default());
//!
//! let first = reader.skip_whitespace(' ', '\\', '\n')?;
//! let mut ch = first;
//! while ch != ',' {
//!     field.append_ignoring_whitespace(ch)?;
//!     ch = reader.next_char()?;
//! }
//! assert_eq!(field.get_and_reset().as_deref(), Some("Santa Claus"));
//! # Ok::<(), fieldscan::Error>(())
//! ```
//!
//! The crate is `no_std` with `alloc`. The `std` feature (on by default)
//! adds [`Utf8Source`] and [`IoSink`] for `std::io` readers and writers.

#![no_std]
extern crate alloc;

#[cfg(any(test, feature = "std"))]
extern crate std;

pub mod appender;
mod error;
mod lookahead;
mod options;
mod sink;
mod source;

#[cfg(test)]
mod tests;

pub use appender::{
    Appender, Bounded, BoundedAppender, Flush, Growable, GrowableAppender, MAX_CAPACITY, Overflow,
    SinkAppender,
};
pub use error::Error;
pub use lookahead::LookaheadReader;
pub use options::{
    AppenderOptions, DEFAULT_WHITESPACE_RANGE_START, ReaderOptions, WriterOptions,
};
#[cfg(feature = "std")]
pub use sink::IoSink;
pub use sink::CharSink;
#[cfg(feature = "std")]
pub use source::Utf8Source;
pub use source::{CharSource, LineNormalizer, StrSource};
