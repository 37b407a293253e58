//! Scalar statement values.

use std::fmt;
use std::sync::Arc;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::name::Name;

/// The scalar value of a statement.
///
/// Values are immutable and cheap to clone. Which variant a raw source value
/// becomes is decided by the type of the item it belongs to.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Value {
    /// Plain string value.
    String(Arc<str>),
    /// Identifier value (type names, item names, identifier spaces).
    Name(Name),
}

impl Value {
    /// Attempts to extract a string.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            Self::Name(_) => None,
        }
    }

    /// Attempts to extract a name.
    #[must_use]
    pub fn as_name(&self) -> Option<&Name> {
        match self {
            Self::Name(n) => Some(n),
            Self::String(_) => None,
        }
    }

    /// Returns the textual form regardless of variant.
    ///
    /// For names this is the local part only.
    #[must_use]
    pub fn text(&self) -> &str {
        match self {
            Self::String(s) => s,
            Self::Name(n) => n.local_name(),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::String(s) => write!(f, "{s:?}"),
            Self::Name(n) => write!(f, "{n}"),
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Self::String(s.into())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Self::String(s.into())
    }
}

impl From<Name> for Value {
    fn from(n: Name) -> Self {
        Self::Name(n)
    }
}
