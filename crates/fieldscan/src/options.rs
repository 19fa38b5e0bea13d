use alloc::string::String;

/// Default whitespace-range start: every character up to and including the
/// space counts as whitespace, NUL included.
pub const DEFAULT_WHITESPACE_RANGE_START: i32 = -1;

/// Configuration shared by every appender variant.
///
/// These values are supplied by the format layer; the appender copies them at
/// construction and never consults the format again.
///
/// # Examples
///
/// ```rust
/// use fieldscan::{AppenderOptions, GrowableAppender};
///
/// let mut appender = GrowableAppender::new(AppenderOptions {
///     capacity: 16,
///     empty_value: Some("N/A".into()),
///     ..Default::default()
/// });
/// assert_eq!(appender.get_and_reset().as_deref(), Some("N/A"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AppenderOptions {
    /// Initial capacity in characters.
    ///
    /// For a bounded appender this is also the hard limit. For a sink-backed
    /// appender it is the flush threshold.
    ///
    /// # Default
    ///
    /// `4096`
    pub capacity: usize,

    /// Largest capacity a growable or sink-backed appender may reach before
    /// a write fails with [`Error::CapacityExceeded`](crate::Error).
    ///
    /// Ignored by bounded appenders.
    ///
    /// # Default
    ///
    /// [`MAX_CAPACITY`](crate::appender::MAX_CAPACITY)
    pub max_capacity: usize,

    /// Value produced when the trimmed content is empty.
    ///
    /// `None` means no value is substituted: extraction yields `None` and a
    /// sink-backed appender writes nothing at all.
    ///
    /// # Default
    ///
    /// `None`
    pub empty_value: Option<String>,

    /// Characters whose code is not above this value never count as
    /// whitespace, even if they are blanks.
    ///
    /// A character `ch` is whitespace when `ch <= ' '` and
    /// `ch as i32 > whitespace_range_start`.
    ///
    /// # Default
    ///
    /// `-1`
    pub whitespace_range_start: i32,
}

impl Default for AppenderOptions {
    fn default() -> Self {
        Self {
            capacity: 4096,
            max_capacity: crate::appender::MAX_CAPACITY,
            empty_value: None,
            whitespace_range_start: DEFAULT_WHITESPACE_RANGE_START,
        }
    }
}

/// Line-ending settings of a sink-backed appender.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WriterOptions {
    /// Text written in place of every normalized newline.
    ///
    /// # Default
    ///
    /// `"\n"`
    pub line_separator: String,

    /// The newline character the parser side normalizes line endings to.
    ///
    /// # Default
    ///
    /// `'\n'`
    pub normalized_newline: char,

    /// Whether normalized newlines are replaced by `line_separator` on
    /// append. When `false` they are stored verbatim.
    ///
    /// # Default
    ///
    /// `true`
    pub denormalize_line_endings: bool,
}

impl Default for WriterOptions {
    fn default() -> Self {
        Self {
            line_separator: String::from("\n"),
            normalized_newline: '\n',
            denormalize_line_endings: true,
        }
    }
}

/// Configuration of a [`LookaheadReader`](crate::LookaheadReader).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ReaderOptions {
    /// Newline character produced by the underlying source after line-ending
    /// normalization. [`LookaheadReader::skip_line_whitespace`] stops at it.
    ///
    /// [`LookaheadReader::skip_line_whitespace`]: crate::LookaheadReader::skip_line_whitespace
    ///
    /// # Default
    ///
    /// `'\n'`
    pub normalized_newline: char,

    /// See [`AppenderOptions::whitespace_range_start`].
    ///
    /// # Default
    ///
    /// `-1`
    pub whitespace_range_start: i32,
}

impl Default for ReaderOptions {
    fn default() -> Self {
        Self {
            normalized_newline: '\n',
            whitespace_range_start: DEFAULT_WHITESPACE_RANGE_START,
        }
    }
}

/// Whether `ch` is a blank inside the configured whitespace range.
#[inline]
pub(crate) fn is_whitespace(ch: char, range_start: i32) -> bool {
    ch <= ' ' && i64::from(u32::from(ch)) > i64::from(range_start)
}
