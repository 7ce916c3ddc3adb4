//! Source location tracking for error reporting
//!
//! Every token, statement and expression remembers where it came from so
//! that a fatal error can point at the offending text.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A location in source text (line and column are 1-based)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SourceLocation {
    pub line: u32,
    pub column: u32,
}

impl SourceLocation {
    pub fn new(line: u32, column: u32) -> Self {
        Self { line, column }
    }
}

impl fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// A span in source text (from start to end location, end exclusive)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SourceSpan {
    pub start: SourceLocation,
    pub end: SourceLocation,
}

impl SourceSpan {
    pub fn new(start: SourceLocation, end: SourceLocation) -> Self {
        Self { start, end }
    }

    /// Span of a single-line token from its start and end columns
    pub fn on_line(line: u32, start_column: u32, end_column: u32) -> Self {
        Self::new(
            SourceLocation::new(line, start_column),
            SourceLocation::new(line, end_column),
        )
    }

    /// Create a span from a single location
    pub fn from_location(location: SourceLocation) -> Self {
        Self {
            start: location,
            end: location,
        }
    }

    /// Span covering `self` through `other`
    pub fn to(&self, other: &SourceSpan) -> SourceSpan {
        SourceSpan::new(self.start, other.end)
    }
}

impl fmt::Display for SourceSpan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.start.line == self.end.line {
            if self.start.column == self.end.column {
                write!(f, "{}", self.start)
            } else {
                write!(f, "{}:{}-{}", self.start.line, self.start.column, self.end.column)
            }
        } else {
            write!(
                f,
                "{}:{}-{}:{}",
                self.start.line, self.start.column, self.end.line, self.end.column
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_source_location() {
        let loc = SourceLocation::new(42, 10);
        assert_eq!(loc.line, 42);
        assert_eq!(loc.column, 10);
        assert_eq!(format!("{}", loc), "42:10");
    }

    #[test]
    fn test_source_span_same_line() {
        let span = SourceSpan::on_line(1, 5, 10);
        assert_eq!(format!("{}", span), "1:5-10");
    }

    #[test]
    fn test_source_span_different_lines() {
        let span = SourceSpan::new(SourceLocation::new(1, 5), SourceLocation::new(3, 10));
        assert_eq!(format!("{}", span), "1:5-3:10");
    }

    #[test]
    fn test_source_span_to() {
        let first = SourceSpan::on_line(1, 5, 10);
        let second = SourceSpan::on_line(2, 1, 4);

        let joined = first.to(&second);
        assert_eq!(joined.start, SourceLocation::new(1, 5));
        assert_eq!(joined.end, SourceLocation::new(2, 4));
    }
}
