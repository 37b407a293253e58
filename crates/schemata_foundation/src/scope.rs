//! Identifier scopes.

use std::fmt;
use std::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::Error;

/// Restricts which identifier spaces a statement may register into.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Scope {
    /// Registered in the reactor-wide space, addressable from anywhere.
    Global,
    /// Registered in the enclosing statement's local space.
    Parent,
}

impl Scope {
    /// Returns the keyword used for this scope in schema documents.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Global => "global",
            Self::Parent => "parent",
        }
    }
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Scope {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "global" => Ok(Self::Global),
            "parent" | "local" => Ok(Self::Parent),
            other => Err(Error::internal(format!("unknown identifier scope: {other}"))),
        }
    }
}
