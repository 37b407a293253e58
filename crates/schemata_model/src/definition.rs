//! Type, item, and identifier definitions.
//!
//! Definitions are immutable once built. Item definitions refer to their type
//! by [`Name`] (types may refer to themselves through their items), while a
//! type definition owns its supertype directly since the supertype chain is
//! acyclic.

use std::collections::BTreeSet;
use std::iter;
use std::sync::Arc;

use schemata_foundation::{Name, Scope};

// =============================================================================
// Identifier Definition
// =============================================================================

/// A composite-key uniqueness rule: which components form the key, which
/// identifier space it lives in, and under which scope it is registered.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct IdentifierDefinition {
    components: BTreeSet<Name>,
    space: Name,
    scope: Scope,
}

impl IdentifierDefinition {
    /// Creates an identifier definition.
    #[must_use]
    pub fn new(components: impl IntoIterator<Item = Name>, space: Name, scope: Scope) -> Self {
        Self {
            components: components.into_iter().collect(),
            space,
            scope,
        }
    }

    /// Single-component key registered in the reactor-wide space.
    #[must_use]
    pub fn global(space: Name, component: Name) -> Self {
        Self::new([component], space, Scope::Global)
    }

    /// Single-component key registered in the enclosing statement's space.
    #[must_use]
    pub fn parent(space: Name, component: Name) -> Self {
        Self::new([component], space, Scope::Parent)
    }

    /// Key components, sorted.
    pub fn components(&self) -> impl Iterator<Item = &Name> {
        self.components.iter()
    }

    /// The target identifier space.
    #[must_use]
    pub fn space(&self) -> &Name {
        &self.space
    }

    /// The registration scope.
    #[must_use]
    pub const fn scope(&self) -> Scope {
        self.scope
    }
}

// =============================================================================
// Item Definition
// =============================================================================

/// Describes a named child statement: its type and how often it may occur.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ItemDefinition {
    name: Name,
    type_name: Name,
    min_occurs: u32,
    /// `None` means unbounded.
    max_occurs: Option<u32>,
    operational: bool,
    identifier: Option<IdentifierDefinition>,
    documentation: Option<Arc<str>>,
}

impl ItemDefinition {
    /// Creates an optional, unbounded item of the given type.
    #[must_use]
    pub fn new(name: Name, type_name: Name) -> Self {
        Self {
            name,
            type_name,
            min_occurs: 0,
            max_occurs: None,
            operational: false,
            identifier: None,
            documentation: None,
        }
    }

    /// Makes the item mandatory (`minOccurs` 1).
    #[must_use]
    pub fn required(mut self) -> Self {
        self.min_occurs = self.min_occurs.max(1);
        self
    }

    /// Sets the lower occurrence bound.
    #[must_use]
    pub fn with_min_occurs(mut self, min: u32) -> Self {
        self.min_occurs = min;
        self
    }

    /// Sets the upper occurrence bound; `None` is unbounded.
    #[must_use]
    pub fn with_max_occurs(mut self, max: Option<u32>) -> Self {
        self.max_occurs = max;
        self
    }

    /// Sets the operational flag.
    #[must_use]
    pub fn with_operational(mut self, operational: bool) -> Self {
        self.operational = operational;
        self
    }

    /// Sets the identifier definition used to key occurrences of this item.
    #[must_use]
    pub fn with_identifier(mut self, identifier: IdentifierDefinition) -> Self {
        self.identifier = Some(identifier);
        self
    }

    /// Sets the documentation text.
    #[must_use]
    pub fn with_documentation(mut self, documentation: impl Into<Arc<str>>) -> Self {
        self.documentation = Some(documentation.into());
        self
    }

    /// The item name, which is also the statement keyword.
    #[must_use]
    pub fn name(&self) -> &Name {
        &self.name
    }

    /// Name of the item's type. Resolve it with
    /// [`SchemaContext::type_of`](crate::SchemaContext::type_of).
    #[must_use]
    pub fn type_name(&self) -> &Name {
        &self.type_name
    }

    /// True if at least one occurrence is needed.
    #[must_use]
    pub const fn is_required(&self) -> bool {
        self.min_occurs > 0
    }

    /// Declared lower occurrence bound.
    #[must_use]
    pub const fn min_occurs(&self) -> u32 {
        self.min_occurs
    }

    /// Declared upper occurrence bound; `None` is unbounded.
    #[must_use]
    pub const fn max_occurs(&self) -> Option<u32> {
        self.max_occurs
    }

    /// True for operational (system-maintained) items.
    #[must_use]
    pub const fn is_operational(&self) -> bool {
        self.operational
    }

    /// How occurrences of this item are keyed, if at all.
    #[must_use]
    pub fn identifier_definition(&self) -> Option<&IdentifierDefinition> {
        self.identifier.as_ref()
    }

    /// Documentation text.
    #[must_use]
    pub fn documentation(&self) -> Option<&str> {
        self.documentation.as_deref()
    }
}

// =============================================================================
// Type Definition
// =============================================================================

/// A named type with single inheritance.
///
/// Items are the type's own items in declaration order; inherited items are
/// found by walking the supertype chain at lookup time.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TypeDefinition {
    name: Name,
    supertype: Option<Arc<TypeDefinition>>,
    items: Vec<Arc<ItemDefinition>>,
    argument: Option<Arc<ItemDefinition>>,
    identifiers: Vec<IdentifierDefinition>,
    documentation: Option<Arc<str>>,
}

impl TypeDefinition {
    /// Creates a type with no supertype and no items.
    #[must_use]
    pub fn new(name: Name) -> Self {
        Self {
            name,
            supertype: None,
            items: Vec::new(),
            argument: None,
            identifiers: Vec::new(),
            documentation: None,
        }
    }

    /// Sets the supertype.
    #[must_use]
    pub fn with_supertype(mut self, supertype: Arc<TypeDefinition>) -> Self {
        self.supertype = Some(supertype);
        self
    }

    /// Appends an item.
    #[must_use]
    pub fn with_item(mut self, item: impl Into<Arc<ItemDefinition>>) -> Self {
        self.items.push(item.into());
        self
    }

    /// Sets the argument item (the item a bare statement value fills in).
    #[must_use]
    pub fn with_argument(mut self, argument: Arc<ItemDefinition>) -> Self {
        self.argument = Some(argument);
        self
    }

    /// Adds a type-level identifier definition.
    #[must_use]
    pub fn with_identifier(mut self, identifier: IdentifierDefinition) -> Self {
        self.identifiers.push(identifier);
        self
    }

    /// Sets the documentation text.
    #[must_use]
    pub fn with_documentation(mut self, documentation: impl Into<Arc<str>>) -> Self {
        self.documentation = Some(documentation.into());
        self
    }

    /// The type name.
    #[must_use]
    pub fn name(&self) -> &Name {
        &self.name
    }

    /// The direct supertype.
    #[must_use]
    pub fn supertype(&self) -> Option<&Arc<TypeDefinition>> {
        self.supertype.as_ref()
    }

    /// This type followed by each supertype, nearest first.
    pub fn ancestors(&self) -> impl Iterator<Item = &TypeDefinition> {
        iter::successors(Some(self), |t| t.supertype.as_deref())
    }

    /// True if this type is `name` or inherits from it.
    #[must_use]
    pub fn is_subtype_of(&self, name: &Name) -> bool {
        self.ancestors().any(|t| &t.name == name)
    }

    /// The type's own items, in declaration order.
    #[must_use]
    pub fn item_definitions(&self) -> &[Arc<ItemDefinition>] {
        &self.items
    }

    /// Looks up one of the type's own items.
    #[must_use]
    pub fn own_item(&self, name: &Name) -> Option<&Arc<ItemDefinition>> {
        self.items.iter().find(|i| i.name() == name)
    }

    /// Looks up an item, walking the supertype chain.
    #[must_use]
    pub fn item(&self, name: &Name) -> Option<&Arc<ItemDefinition>> {
        self.ancestors().find_map(|t| t.own_item(name))
    }

    /// All items visible on this type, inherited ones first.
    #[must_use]
    pub fn all_items(&self) -> Vec<&Arc<ItemDefinition>> {
        let mut chain: Vec<&TypeDefinition> = self.ancestors().collect();
        chain.reverse();
        chain.into_iter().flat_map(|t| t.items.iter()).collect()
    }

    /// The argument item, inherited from the nearest ancestor that has one.
    #[must_use]
    pub fn argument(&self) -> Option<&Arc<ItemDefinition>> {
        self.ancestors().find_map(|t| t.argument.as_ref())
    }

    /// True iff this type or any ancestor declares items.
    #[must_use]
    pub fn is_complex(&self) -> bool {
        self.ancestors().any(|t| !t.items.is_empty())
    }

    /// Type-level identifier definitions.
    #[must_use]
    pub fn identifier_definitions(&self) -> &[IdentifierDefinition] {
        &self.identifiers
    }

    /// Documentation text.
    #[must_use]
    pub fn documentation(&self) -> Option<&str> {
        self.documentation.as_deref()
    }
}
