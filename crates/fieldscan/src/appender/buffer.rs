use alloc::vec::Vec;

use crate::options::is_whitespace;

/// How an append classifies the character it writes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Trim {
    /// Leave the pending count alone.
    Keep,
    Whitespace,
    Padding(char),
    WhitespaceOrPadding(char),
}

impl Trim {
    #[inline]
    fn ignores(self, ch: char, range_start: i32) -> bool {
        match self {
            Trim::Keep => false,
            Trim::Whitespace => is_whitespace(ch, range_start),
            Trim::Padding(pad) => ch == pad,
            Trim::WhitespaceOrPadding(pad) => ch == pad || is_whitespace(ch, range_start),
        }
    }
}

/// Committed characters plus the trailing run still pending trim.
///
/// `pending` never exceeds `chars.len()` except after `Appender::ignore`,
/// so every reader of it clamps.
#[derive(Debug, Clone)]
pub struct Buffer {
    pub(crate) chars: Vec<char>,
    pub(crate) capacity: usize,
    pub(crate) pending: usize,
}

impl Buffer {
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            chars: Vec::with_capacity(capacity),
            capacity,
            pending: 0,
        }
    }

    #[inline]
    pub(crate) fn len(&self) -> usize {
        self.chars.len()
    }

    /// Room left before the policy has to act.
    #[inline]
    pub(crate) fn spare(&self) -> usize {
        self.capacity.saturating_sub(self.chars.len())
    }

    /// Length of the content that survives trimming.
    #[inline]
    pub(crate) fn trimmed_len(&self) -> usize {
        self.chars.len().saturating_sub(self.pending)
    }

    #[inline]
    pub(crate) fn trimmed(&self) -> &[char] {
        &self.chars[..self.trimmed_len()]
    }

    pub(crate) fn grow_to(&mut self, capacity: usize) {
        debug_assert!(capacity >= self.capacity);
        self.chars.reserve(capacity - self.chars.len());
        self.capacity = capacity;
    }

    /// Writes `ch`; capacity must already have been reserved.
    #[inline]
    pub(crate) fn push(&mut self, ch: char, trim: Trim, range_start: i32) {
        self.chars.push(ch);
        match trim {
            Trim::Keep => {}
            _ if trim.ignores(ch, range_start) => self.pending += 1,
            _ => self.pending = 0,
        }
    }

    /// Length of the trailing whitespace run.
    pub(crate) fn trailing_whitespace(&self, range_start: i32) -> usize {
        self.chars
            .iter()
            .rev()
            .take_while(|&&ch| is_whitespace(ch, range_start))
            .count()
    }

    pub(crate) fn clear(&mut self) {
        self.chars.clear();
        self.pending = 0;
    }
}
