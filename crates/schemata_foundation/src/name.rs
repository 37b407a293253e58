//! Namespaced identifiers.
//!
//! Every keyword, type, item, and identifier space is addressed by a [`Name`].
//! Names are cheap to clone (both halves are shared `Arc<str>`) and compare
//! structurally, so they are used as map keys everywhere.

use std::fmt;
use std::sync::Arc;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Namespace of the built-in schema language.
pub const LANGUAGE_NAMESPACE: &str = "https://schema.evolveum.com/ns/axiom/model";

/// A namespaced identifier: namespace plus local name.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Name {
    namespace: Arc<str>,
    local: Arc<str>,
}

impl Name {
    /// Creates a name in the given namespace.
    #[must_use]
    pub fn new(namespace: impl Into<Arc<str>>, local: impl Into<Arc<str>>) -> Self {
        Self {
            namespace: namespace.into(),
            local: local.into(),
        }
    }

    /// Creates a name in the built-in language namespace.
    #[must_use]
    pub fn builtin(local: impl Into<Arc<str>>) -> Self {
        Self::new(LANGUAGE_NAMESPACE, local)
    }

    /// Returns the namespace.
    #[must_use]
    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// Returns the local part.
    #[must_use]
    pub fn local_name(&self) -> &str {
        &self.local
    }

    /// Returns true if this name lives in the built-in language namespace.
    #[must_use]
    pub fn is_builtin(&self) -> bool {
        &*self.namespace == LANGUAGE_NAMESPACE
    }

    /// Returns a name with the same namespace and a different local part.
    #[must_use]
    pub fn sibling(&self, local: impl Into<Arc<str>>) -> Self {
        Self {
            namespace: Arc::clone(&self.namespace),
            local: local.into(),
        }
    }
}

impl fmt::Display for Name {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Built-in names are by far the most common in messages; keep them short.
        if self.is_builtin() {
            write!(f, "{}", self.local)
        } else {
            write!(f, "{}:{}", self.namespace, self.local)
        }
    }
}

impl fmt::Debug for Name {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Name({:?}, {:?})", &*self.namespace, &*self.local)
    }
}
