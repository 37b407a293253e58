//! Source location tracking.
//!
//! `SourceLocation` records where a statement started so that semantic
//! errors (duplicate identifiers, unresolved references) can point back at
//! the document.

use std::fmt;
use std::sync::Arc;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A position in a named source document.
#[derive(Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SourceLocation {
    /// Name of the source (file name or a synthetic label).
    source: Arc<str>,
    /// 1-based line number.
    line: u32,
    /// 1-based column number.
    column: u32,
}

impl SourceLocation {
    /// Creates a new location.
    #[must_use]
    pub fn new(source: impl Into<Arc<str>>, line: u32, column: u32) -> Self {
        Self {
            source: source.into(),
            line,
            column,
        }
    }

    /// Creates a location at the start of the given source.
    #[must_use]
    pub fn at_start(source: impl Into<Arc<str>>) -> Self {
        Self::new(source, 1, 1)
    }

    /// Returns the source name.
    #[must_use]
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Returns the 1-based line.
    #[must_use]
    pub const fn line(&self) -> u32 {
        self.line
    }

    /// Returns the 1-based column.
    #[must_use]
    pub const fn column(&self) -> u32 {
        self.column
    }

    /// Returns a location in the same source at a different position.
    #[must_use]
    pub fn moved_to(&self, line: u32, column: u32) -> Self {
        Self {
            source: Arc::clone(&self.source),
            line,
            column,
        }
    }
}

impl fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}[{}:{}]", self.source, self.line, self.column)
    }
}

impl fmt::Debug for SourceLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn location_at_start() {
        let loc = SourceLocation::at_start("test.axiom");
        assert_eq!(loc.source(), "test.axiom");
        assert_eq!(loc.line(), 1);
        assert_eq!(loc.column(), 1);
    }

    #[test]
    fn location_display() {
        let loc = SourceLocation::new("model.axiom", 12, 5);
        assert_eq!(loc.to_string(), "model.axiom[12:5]");
    }

    #[test]
    fn moved_to_keeps_source() {
        let loc = SourceLocation::at_start("a").moved_to(3, 7);
        assert_eq!(loc, SourceLocation::new("a", 3, 7));
    }
}
