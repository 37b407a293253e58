//! Composite identifier keys.
//!
//! An identifier key is the set of component values that make a statement
//! unique within an identifier space, e.g. `{name=Foo}` for a type.

use std::collections::BTreeMap;
use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::name::Name;
use crate::value::Value;

/// A composite key: component name to component value.
///
/// Components are kept sorted, so two keys built from the same components in
/// a different order are equal.
#[derive(Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct IdentifierKey(BTreeMap<Name, Value>);

impl IdentifierKey {
    /// Creates a key with a single component.
    #[must_use]
    pub fn single(component: Name, value: impl Into<Value>) -> Self {
        let mut map = BTreeMap::new();
        map.insert(component, value.into());
        Self(map)
    }

    /// Creates a key from any number of components.
    pub fn from_components(components: impl IntoIterator<Item = (Name, Value)>) -> Self {
        Self(components.into_iter().collect())
    }

    /// Returns the value of one component.
    #[must_use]
    pub fn get(&self, component: &Name) -> Option<&Value> {
        self.0.get(component)
    }

    /// Iterates over components in key order.
    pub fn components(&self) -> impl Iterator<Item = (&Name, &Value)> {
        self.0.iter()
    }

    /// Returns the number of components.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if the key has no components.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for IdentifierKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        for (i, (name, value)) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{name}={value}")?;
        }
        write!(f, "}}")
    }
}

impl fmt::Debug for IdentifierKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}
