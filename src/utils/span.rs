//! Source location tracking

/// A span represents a range of characters in the source text.
///
/// Offsets are 0-based character positions; `end` is exclusive. The `start`
/// offset is what error messages report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Span {
    /// Start character offset
    pub start: usize,
    /// End character offset (exclusive)
    pub end: usize,
}

impl Span {
    /// Create a new span
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }
}
