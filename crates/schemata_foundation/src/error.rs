//! Error types for the Schemata system.
//!
//! Uses `thiserror` for ergonomic error definition with rich context.
//! Every error is a document-level failure: there is no partial schema
//! context, the caller reports the message and abandons the compilation.

use std::fmt;

use thiserror::Error;

use crate::key::IdentifierKey;
use crate::location::SourceLocation;
use crate::name::Name;
use crate::scope::Scope;

/// Result type alias for Schemata operations.
pub type Result<T> = std::result::Result<T, Error>;

/// The main error type for Schemata operations.
#[derive(Debug, Error)]
#[error("{kind}")]
pub struct Error {
    /// The kind of error that occurred.
    pub kind: ErrorKind,
}

impl Error {
    /// Creates a new error with the given kind.
    #[must_use]
    pub fn new(kind: ErrorKind) -> Self {
        Self { kind }
    }

    /// Creates a duplicate identifier error.
    #[must_use]
    pub fn duplicate_identifier(
        space: Name,
        key: IdentifierKey,
        location: SourceLocation,
        previous: SourceLocation,
    ) -> Self {
        Self::new(ErrorKind::DuplicateIdentifier {
            space,
            key,
            location,
            previous,
        })
    }

    /// Creates an error aggregating every rule left unresolved at the fixpoint.
    #[must_use]
    pub fn unresolved(messages: Vec<String>) -> Self {
        Self::new(ErrorKind::UnresolvedRules { messages })
    }

    /// Creates a scope violation error.
    #[must_use]
    pub fn scope_violation(scope: Scope, allowed: Vec<Scope>) -> Self {
        Self::new(ErrorKind::ScopeViolation { scope, allowed })
    }

    /// Creates a malformed statement error.
    #[must_use]
    pub fn malformed(message: impl Into<String>, location: SourceLocation) -> Self {
        Self::new(ErrorKind::MalformedStatement {
            message: message.into(),
            location,
        })
    }

    /// Creates an error for a keyword that has no item definition.
    #[must_use]
    pub fn unknown_item(keyword: Name, parent: Option<Name>, location: SourceLocation) -> Self {
        Self::new(ErrorKind::UnknownItem {
            keyword,
            parent,
            location,
        })
    }

    /// Creates a syntax error.
    #[must_use]
    pub fn syntax(message: impl Into<String>, location: SourceLocation) -> Self {
        Self::new(ErrorKind::Syntax {
            message: message.into(),
            location,
        })
    }

    /// Creates a pass limit error.
    #[must_use]
    pub fn pass_limit(limit: usize) -> Self {
        Self::new(ErrorKind::PassLimitExceeded { limit })
    }

    /// Creates an illegal state error.
    #[must_use]
    pub fn illegal_state(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::IllegalState(message.into()))
    }

    /// Creates an internal error.
    #[must_use]
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Internal(message.into()))
    }

    /// Returns the primary source location, if the error has one.
    #[must_use]
    pub fn location(&self) -> Option<&SourceLocation> {
        match &self.kind {
            ErrorKind::DuplicateIdentifier { location, .. }
            | ErrorKind::MalformedStatement { location, .. }
            | ErrorKind::UnknownItem { location, .. }
            | ErrorKind::Syntax { location, .. } => Some(location),
            _ => None,
        }
    }
}

/// Categorized error kinds for pattern matching.
#[derive(Debug, Error)]
pub enum ErrorKind {
    /// A second statement claimed a key already present in an identifier space.
    #[error("{location}: {space} identifier space: item {key} is already defined at {previous}")]
    DuplicateIdentifier {
        /// The identifier space.
        space: Name,
        /// The conflicting key.
        key: IdentifierKey,
        /// Location of the rejected statement.
        location: SourceLocation,
        /// Location of the statement registered first.
        previous: SourceLocation,
    },

    /// Rules still outstanding when the fixpoint made no further progress.
    #[error("{}", UnresolvedDisplay(.messages))]
    UnresolvedRules {
        /// One message per unresolved rule instance.
        messages: Vec<String>,
    },

    /// Registration attempted under a scope the space holder does not allow.
    #[error("scope {scope} is not allowed here (allowed: {})", ScopeList(.allowed))]
    ScopeViolation {
        /// The requested scope.
        scope: Scope,
        /// Scopes the holder accepts.
        allowed: Vec<Scope>,
    },

    /// A statement is structurally incomplete or has an unparsable value.
    #[error("{location}: {message}")]
    MalformedStatement {
        /// Description of the problem.
        message: String,
        /// Where the statement starts.
        location: SourceLocation,
    },

    /// No item definition exists for a keyword at this position.
    #[error("{location}: {}", UnknownItemDisplay(.keyword, .parent))]
    UnknownItem {
        /// The keyword that was not recognized.
        keyword: Name,
        /// The enclosing type, or `None` for document roots.
        parent: Option<Name>,
        /// Where the statement starts.
        location: SourceLocation,
    },

    /// Syntax error in a text source.
    #[error("{location}: syntax error: {message}")]
    Syntax {
        /// Description of the syntax error.
        message: String,
        /// Where the error was detected.
        location: SourceLocation,
    },

    /// The configured pass limit (kill switch) was exceeded.
    #[error("fixpoint did not converge within {limit} passes")]
    PassLimitExceeded {
        /// The configured limit.
        limit: usize,
    },

    /// A value was read from a requirement that is not satisfied.
    #[error("illegal state: {0}")]
    IllegalState(String),

    /// Internal error (should not happen).
    #[error("internal error: {0}")]
    Internal(String),
}

struct UnresolvedDisplay<'a>(&'a [String]);

impl fmt::Display for UnresolvedDisplay<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "can not complete models, following errors occurred:")?;
        for message in self.0 {
            write!(f, "\n  {message}")?;
        }
        Ok(())
    }
}

struct ScopeList<'a>(&'a [Scope]);

impl fmt::Display for ScopeList<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, scope) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{scope}")?;
        }
        Ok(())
    }
}

struct UnknownItemDisplay<'a>(&'a Name, &'a Option<Name>);

impl fmt::Display for UnknownItemDisplay<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.1 {
            Some(parent) => write!(f, "item {} is not allowed in {parent}", self.0),
            None => write!(f, "{} is not a root statement", self.0),
        }
    }
}
