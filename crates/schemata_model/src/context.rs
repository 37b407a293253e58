//! The immutable schema context produced by a successful compilation.

use std::collections::HashSet;
use std::sync::Arc;

use im::OrdMap;
use schemata_foundation::{IdentifierKey, Name};

use crate::definition::{ItemDefinition, TypeDefinition};
use crate::names::{items, spaces, types};
use crate::statement::Statement;

// =============================================================================
// Resolved
// =============================================================================

/// The resolved representation of a registered statement.
///
/// Which variant a statement becomes is decided by the factory registered
/// for its type (or the nearest ancestor type).
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Resolved {
    /// Generic statement tree.
    Statement(Arc<Statement>),
    /// A type definition.
    Type(Arc<TypeDefinition>),
    /// An item (or root) definition.
    Item(Arc<ItemDefinition>),
}

impl Resolved {
    /// Returns the type definition, if this is one.
    #[must_use]
    pub fn as_type(&self) -> Option<&Arc<TypeDefinition>> {
        match self {
            Self::Type(t) => Some(t),
            _ => None,
        }
    }

    /// Returns the item definition, if this is one.
    #[must_use]
    pub fn as_item(&self) -> Option<&Arc<ItemDefinition>> {
        match self {
            Self::Item(i) => Some(i),
            _ => None,
        }
    }

    /// Returns the generic statement, if this is one.
    #[must_use]
    pub fn as_statement(&self) -> Option<&Arc<Statement>> {
        match self {
            Self::Statement(s) => Some(s),
            _ => None,
        }
    }
}

// =============================================================================
// Schema Context
// =============================================================================

/// The final, read-only result of a compilation.
///
/// Holds every global identifier space (space name to key to resolved
/// statement) plus typed indexes of the type and root spaces. All maps are
/// persistent and ordered, so clones are cheap and two contexts built from
/// the same definitions compare equal regardless of construction order. A
/// finished context is `Send + Sync` and may be shared freely.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SchemaContext {
    spaces: OrdMap<Name, OrdMap<IdentifierKey, Resolved>>,
    types: OrdMap<Name, Arc<TypeDefinition>>,
    roots: OrdMap<Name, Arc<ItemDefinition>>,
}

impl SchemaContext {
    /// Starts building a context.
    #[must_use]
    pub fn builder() -> SchemaContextBuilder {
        SchemaContextBuilder::default()
    }

    /// All root item definitions, ordered by name.
    pub fn roots(&self) -> impl Iterator<Item = &Arc<ItemDefinition>> {
        self.roots.values()
    }

    /// Looks up a root item definition.
    #[must_use]
    pub fn get_root(&self, name: &Name) -> Option<Arc<ItemDefinition>> {
        self.roots.get(name).cloned()
    }

    /// Looks up a type definition.
    #[must_use]
    pub fn get_type(&self, name: &Name) -> Option<Arc<TypeDefinition>> {
        self.types.get(name).cloned()
    }

    /// All type definitions, ordered by name.
    pub fn types(&self) -> impl Iterator<Item = &Arc<TypeDefinition>> {
        self.types.values()
    }

    /// Resolves the type of an item.
    #[must_use]
    pub fn type_of(&self, item: &ItemDefinition) -> Option<Arc<TypeDefinition>> {
        self.get_type(item.type_name())
    }

    /// Returns one identifier space.
    #[must_use]
    pub fn space(&self, name: &Name) -> Option<&OrdMap<IdentifierKey, Resolved>> {
        self.spaces.get(name)
    }

    /// Names of all identifier spaces.
    pub fn space_names(&self) -> impl Iterator<Item = &Name> {
        self.spaces.keys()
    }

    /// Looks up a statement in an identifier space.
    #[must_use]
    pub fn lookup(&self, space: &Name, key: &IdentifierKey) -> Option<&Resolved> {
        self.spaces.get(space).and_then(|s| s.get(key))
    }

    /// True if raw values of `ty` should be read as identifiers.
    ///
    /// That is the case for the identifier type itself and for any type whose
    /// argument chain ends in it (e.g. type references).
    #[must_use]
    pub fn is_identifier_valued(&self, ty: &TypeDefinition) -> bool {
        let mut seen = HashSet::new();
        let mut current = ty.name().clone();
        loop {
            if current == *types::IDENTIFIER {
                return true;
            }
            if !seen.insert(current.clone()) {
                return false;
            }
            let Some(next) = self
                .get_type(&current)
                .and_then(|t| t.argument().map(|a| a.type_name().clone()))
            else {
                return false;
            };
            current = next;
        }
    }
}

// =============================================================================
// Builder
// =============================================================================

/// Incrementally assembles a [`SchemaContext`].
#[derive(Debug, Default)]
pub struct SchemaContextBuilder {
    context: SchemaContext,
}

impl SchemaContextBuilder {
    /// Adds an entry to an identifier space.
    ///
    /// Type definitions entered into the type space and item definitions
    /// entered into the root space are also indexed by name.
    #[must_use]
    pub fn with_entry(mut self, space: Name, key: IdentifierKey, resolved: Resolved) -> Self {
        self.add_entry(space, key, resolved);
        self
    }

    /// Adds an entry to an identifier space in place.
    pub fn add_entry(&mut self, space: Name, key: IdentifierKey, resolved: Resolved) {
        match &resolved {
            Resolved::Type(t) if space == *spaces::TYPES => {
                self.context.types.insert(t.name().clone(), Arc::clone(t));
            }
            Resolved::Item(i) if space == *spaces::ROOTS => {
                self.context.roots.insert(i.name().clone(), Arc::clone(i));
            }
            _ => {}
        }
        let mut entries = self.context.spaces.get(&space).cloned().unwrap_or_default();
        entries.insert(key, resolved);
        self.context.spaces.insert(space, entries);
    }

    /// Adds a type definition, keyed by name in the type space.
    #[must_use]
    pub fn with_type(self, ty: impl Into<Arc<TypeDefinition>>) -> Self {
        let ty = ty.into();
        let key = IdentifierKey::single(items::NAME.clone(), ty.name().clone());
        self.with_entry(spaces::TYPES.clone(), key, Resolved::Type(ty))
    }

    /// Adds a root item definition, keyed by name in the root space.
    #[must_use]
    pub fn with_root(self, root: impl Into<Arc<ItemDefinition>>) -> Self {
        let root = root.into();
        let key = IdentifierKey::single(items::NAME.clone(), root.name().clone());
        self.with_entry(spaces::ROOTS.clone(), key, Resolved::Item(root))
    }

    /// Finishes the context.
    #[must_use]
    pub fn build(self) -> SchemaContext {
        self.context
    }
}
