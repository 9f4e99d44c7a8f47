//! Source locations and token intervals.
//!
//! [`Span`] locates a token or diagnostic in template text by line and column.
//! [`TokenRange`] addresses a contiguous run of tokens in a lossless token
//! stream; every rewrite is expressed against token ranges, never bytes.

use std::fmt;

/// A span of template text, represented by its starting position.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Span {
    /// Line number (1-indexed).
    pub line: u32,
    /// Column number (1-indexed, byte-based).
    pub col: u32,
    /// Length in bytes.
    pub len: u32,
}

impl Span {
    /// Create a new span from a line, column, and length.
    #[inline]
    pub fn new(line: u32, col: u32, len: u32) -> Self {
        Self { line, col, len }
    }

    /// Create a zero-length span at a position.
    #[inline]
    pub fn point(line: u32, col: u32) -> Self {
        Self { line, col, len: 0 }
    }

    /// Whether this span is empty (zero length).
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// The length of this span in bytes.
    #[inline]
    pub fn len(&self) -> u32 {
        self.len
    }
}

impl fmt::Debug for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.col)
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.col)
    }
}

/// A half-open interval `[start, end)` of token indices.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default, PartialOrd, Ord)]
pub struct TokenRange {
    /// Index of the first token in the range.
    pub start: u32,
    /// Index one past the last token in the range.
    pub end: u32,
}

impl TokenRange {
    #[inline]
    pub fn new(start: u32, end: u32) -> Self {
        debug_assert!(start <= end, "inverted token range {start}..{end}");
        Self { start, end }
    }

    /// The range covering exactly one token.
    #[inline]
    pub fn single(index: u32) -> Self {
        Self {
            start: index,
            end: index + 1,
        }
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.start >= self.end
    }

    #[inline]
    pub fn len(&self) -> u32 {
        self.end.saturating_sub(self.start)
    }

    /// Whether `other` lies entirely inside this range.
    #[inline]
    pub fn contains(&self, other: TokenRange) -> bool {
        self.start <= other.start && other.end <= self.end
    }

    /// Whether the two ranges share at least one token.
    #[inline]
    pub fn overlaps(&self, other: TokenRange) -> bool {
        self.start < other.end && other.start < self.end
    }

    /// The smallest range covering both.
    #[inline]
    pub fn cover(self, other: TokenRange) -> TokenRange {
        TokenRange {
            start: self.start.min(other.start),
            end: self.end.max(other.end),
        }
    }
}

impl fmt::Debug for TokenRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.start, self.end)
    }
}

impl fmt::Display for TokenRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "tokens {}..{}", self.start, self.end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn span_basics() {
        let span = Span::new(1, 5, 10);
        assert_eq!(span.len(), 10);
        assert!(!span.is_empty());

        let empty = Span::point(1, 5);
        assert!(empty.is_empty());
    }

    #[test]
    fn span_display() {
        let span = Span::new(3, 15, 5);
        assert_eq!(format!("{}", span), "3:15");
    }

    #[test]
    fn range_single_and_len() {
        let range = TokenRange::single(7);
        assert_eq!(range.start, 7);
        assert_eq!(range.end, 8);
        assert_eq!(range.len(), 1);
        assert!(!range.is_empty());
        assert!(TokenRange::new(3, 3).is_empty());
    }

    #[test]
    fn range_overlap_is_half_open() {
        let a = TokenRange::new(0, 4);
        let b = TokenRange::new(4, 6);
        let c = TokenRange::new(3, 5);

        assert!(!a.overlaps(b));
        assert!(a.overlaps(c));
        assert!(b.overlaps(c));
    }

    #[test]
    fn range_contains_and_cover() {
        let outer = TokenRange::new(2, 10);
        assert!(outer.contains(TokenRange::new(2, 10)));
        assert!(outer.contains(TokenRange::new(4, 5)));
        assert!(!outer.contains(TokenRange::new(1, 5)));

        let merged = TokenRange::new(2, 4).cover(TokenRange::new(8, 9));
        assert_eq!(merged, TokenRange::new(2, 9));
    }

    #[test]
    fn range_display() {
        assert_eq!(TokenRange::new(1, 3).to_string(), "tokens 1..3");
        assert_eq!(format!("{:?}", TokenRange::new(1, 3)), "1..3");
    }
}
