//! Definition factories: how a registered statement becomes a resolved value.
//!
//! A factory is registered for a type name. Lookup walks the statement type's
//! supertype chain, nearest first, and falls back to a generic statement tree
//! when no ancestor has a factory.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use schemata_foundation::{Name, Result};
use schemata_model::names::types;
use schemata_model::{Resolved, TypeDefinition};

use crate::assemble::Assembler;
use crate::statement::ContextId;

/// Builds the resolved representation of one statement.
pub trait StatementFactory {
    /// Resolves the statement `id`.
    ///
    /// # Errors
    /// Returns a malformed statement error if the statement is incomplete.
    fn create(&self, assembler: &mut Assembler<'_>, id: ContextId) -> Result<Resolved>;
}

impl<F> StatementFactory for F
where
    F: Fn(&mut Assembler<'_>, ContextId) -> Result<Resolved>,
{
    fn create(&self, assembler: &mut Assembler<'_>, id: ContextId) -> Result<Resolved> {
        self(assembler, id)
    }
}

/// Resolves `AxiomTypeDefinition` statements to [`TypeDefinition`]s.
#[derive(Clone, Copy, Debug, Default)]
pub struct TypeFactory;

impl StatementFactory for TypeFactory {
    fn create(&self, assembler: &mut Assembler<'_>, id: ContextId) -> Result<Resolved> {
        assembler.type_definition(id).map(Resolved::Type)
    }
}

/// Resolves `AxiomItemDefinition` statements (and so root definitions) to
/// item definitions.
#[derive(Clone, Copy, Debug, Default)]
pub struct ItemFactory;

impl StatementFactory for ItemFactory {
    fn create(&self, assembler: &mut Assembler<'_>, id: ContextId) -> Result<Resolved> {
        assembler
            .item_definition(id)
            .map(|item| Resolved::Item(Arc::new(item)))
    }
}

/// Freezes the statement into a generic tree.
#[derive(Clone, Copy, Debug, Default)]
pub struct StatementTreeFactory;

impl StatementFactory for StatementTreeFactory {
    fn create(&self, assembler: &mut Assembler<'_>, id: ContextId) -> Result<Resolved> {
        assembler.statement(id).map(Resolved::Statement)
    }
}

/// Factories by type name.
#[derive(Clone)]
pub struct FactoryRegistry {
    factories: HashMap<Name, Arc<dyn StatementFactory>>,
    fallback: Arc<dyn StatementFactory>,
}

impl Default for FactoryRegistry {
    fn default() -> Self {
        let mut registry = Self::empty();
        registry.register(types::TYPE_DEFINITION.clone(), Arc::new(TypeFactory));
        registry.register(types::ITEM_DEFINITION.clone(), Arc::new(ItemFactory));
        registry
    }
}

impl FactoryRegistry {
    /// A registry with only the generic fallback.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            factories: HashMap::new(),
            fallback: Arc::new(StatementTreeFactory),
        }
    }

    /// Registers (or replaces) the factory for a type.
    pub fn register(&mut self, type_name: Name, factory: Arc<dyn StatementFactory>) {
        self.factories.insert(type_name, factory);
    }

    /// The nearest factory for `ty`, walking its supertypes.
    #[must_use]
    pub fn lookup(&self, ty: &TypeDefinition) -> Arc<dyn StatementFactory> {
        ty.ancestors()
            .find_map(|t| self.factories.get(t.name()))
            .map_or_else(|| Arc::clone(&self.fallback), Arc::clone)
    }

    /// True if a factory is registered for exactly this type name.
    #[must_use]
    pub fn contains(&self, type_name: &Name) -> bool {
        self.factories.contains_key(type_name)
    }
}

impl fmt::Debug for FactoryRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut names: Vec<_> = self.factories.keys().map(ToString::to_string).collect();
        names.sort();
        f.debug_struct("FactoryRegistry")
            .field("types", &names)
            .finish_non_exhaustive()
    }
}
