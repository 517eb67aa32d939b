//! Read-only scan position over the normalized markup.
//!
//! A [`Cursor`] is a byte offset plus a reference to the whole input. It is
//! `Copy`: every scanning step returns a new cursor instead of mutating or
//! re-slicing shared state, so a failed match simply discards the cursor it
//! produced.

/// A position in the input. All offsets are on character boundaries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cursor<'a> {
    input: &'a str,
    pos: usize,
}

impl<'a> Cursor<'a> {
    /// A cursor at the start of `input`.
    #[must_use]
    pub const fn new(input: &'a str) -> Self {
        Self { input, pos: 0 }
    }

    /// Byte offset from the start of the input.
    #[must_use]
    pub const fn offset(self) -> usize {
        self.pos
    }

    /// Everything from the cursor to the end of the input.
    #[must_use]
    pub fn rest(self) -> &'a str {
        &self.input[self.pos..]
    }

    /// Whether the whole input has been consumed.
    #[must_use]
    pub const fn is_eof(self) -> bool {
        self.pos >= self.input.len()
    }

    /// The input between this cursor and a later one.
    #[must_use]
    pub fn slice_to(self, end: Self) -> &'a str {
        &self.input[self.pos..end.pos]
    }

    /// "If the next few characters are..."
    #[must_use]
    pub fn starts_with(self, target: &str) -> bool {
        self.rest().starts_with(target)
    }

    /// Move forward by `bytes`. The caller must have matched exactly that
    /// many bytes of input.
    #[must_use]
    pub fn advance(self, bytes: usize) -> Self {
        Self {
            input: self.input,
            pos: (self.pos + bytes).min(self.input.len()),
        }
    }

    /// A cursor at the end of the input.
    #[must_use]
    pub const fn to_end(self) -> Self {
        Self {
            input: self.input,
            pos: self.input.len(),
        }
    }

    /// Consume the longest run of characters satisfying `pred`.
    #[must_use]
    pub fn take_while(self, pred: impl Fn(char) -> bool) -> (&'a str, Self) {
        let rest = self.rest();
        let len = rest.find(|c: char| !pred(c)).unwrap_or(rest.len());
        (&rest[..len], self.advance(len))
    }

    /// Consume everything before the next `stop` character (or to the end).
    #[must_use]
    pub fn take_until(self, stop: char) -> (&'a str, Self) {
        self.take_while(|c| c != stop)
    }

    /// Skip any whitespace.
    #[must_use]
    pub fn skip_whitespace(self) -> Self {
        self.take_while(char::is_whitespace).1
    }

    /// Byte distance to the next occurrence of `needle`, if any.
    #[must_use]
    pub fn find(self, needle: &str) -> Option<usize> {
        self.rest().find(needle)
    }

    /// Like [`Cursor::find`], comparing ASCII letters case-insensitively.
    ///
    /// Scans the input in place and stops at the first match.
    #[must_use]
    pub fn find_ignore_ascii_case(self, needle: &str) -> Option<usize> {
        let needle = needle.as_bytes();
        if needle.is_empty() {
            return Some(0);
        }
        self.rest()
            .as_bytes()
            .windows(needle.len())
            .position(|window| window.eq_ignore_ascii_case(needle))
    }
}
