//! Freezes a completed reactor state into a [`SchemaContext`].
//!
//! Every entry of every global identifier space is resolved through the
//! factory for its type. Statement trees and type definitions are memoized,
//! so a supertype shared by many types is built once.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use schemata_foundation::{Error, Name, Result, Scope, Value};
use schemata_model::names::items;
use schemata_model::{
    IdentifierDefinition, ItemDefinition, SchemaContext, Statement, TypeDefinition,
};
use tracing::debug;

use crate::factory::FactoryRegistry;
use crate::statement::{ContextId, ReactorState, StatementContext};

/// Resolves statement contexts into frozen values.
pub struct Assembler<'a> {
    state: &'a ReactorState,
    factories: &'a FactoryRegistry,
    statements: HashMap<ContextId, Arc<Statement>>,
    types: HashMap<ContextId, Arc<TypeDefinition>>,
    in_progress: HashSet<ContextId>,
}

impl<'a> Assembler<'a> {
    /// Creates an assembler over a completed state.
    #[must_use]
    pub fn new(state: &'a ReactorState, factories: &'a FactoryRegistry) -> Self {
        Self {
            state,
            factories,
            statements: HashMap::new(),
            types: HashMap::new(),
            in_progress: HashSet::new(),
        }
    }

    /// The state being assembled.
    #[must_use]
    pub fn state(&self) -> &'a ReactorState {
        self.state
    }

    /// Builds the schema context from every global identifier space.
    ///
    /// # Errors
    /// Returns the first factory error.
    pub fn assemble(mut self) -> Result<SchemaContext> {
        let state = self.state;
        let mut builder = SchemaContext::builder();
        for (space, entries) in state.global_spaces().spaces() {
            for (key, entry) in entries {
                let ctx = state.context(entry.target)?;
                let factory = self.factories.lookup(ctx.type_definition());
                let resolved = factory.create(&mut self, entry.target)?;
                builder.add_entry(space.clone(), key.clone(), resolved);
            }
            debug!(%space, entries = entries.len(), "assembled identifier space");
        }
        Ok(builder.build())
    }

    /// Freezes a statement and its subtree.
    ///
    /// # Errors
    /// Returns an internal error for a dangling id.
    pub fn statement(&mut self, id: ContextId) -> Result<Arc<Statement>> {
        if let Some(statement) = self.statements.get(&id) {
            return Ok(Arc::clone(statement));
        }
        let state = self.state;
        let ctx = state.context(id)?;
        let children = ctx
            .children()
            .iter()
            .map(|child| self.statement(*child))
            .collect::<Result<Vec<_>>>()?;
        let statement = Arc::new(Statement::new(
            ctx.keyword().clone(),
            ctx.value().cloned(),
            children,
            ctx.location().clone(),
        ));
        self.statements.insert(id, Arc::clone(&statement));
        Ok(statement)
    }

    // =========================================================================
    // Definitions
    // =========================================================================

    /// Builds the type definition declared by statement `id`.
    ///
    /// # Errors
    /// Returns a malformed statement error for an incomplete declaration or
    /// a supertype cycle.
    pub fn type_definition(&mut self, id: ContextId) -> Result<Arc<TypeDefinition>> {
        if let Some(ty) = self.types.get(&id) {
            return Ok(Arc::clone(ty));
        }
        let state = self.state;
        let ctx = state.context(id)?;
        let name = self.name_of(ctx, id)?;
        if !self.in_progress.insert(id) {
            return Err(Error::malformed(
                format!("supertype cycle through type {name}"),
                ctx.location().clone(),
            ));
        }

        let mut ty = TypeDefinition::new(name);
        if let Some(supertype) = state.first_child(id, &items::SUPERTYPE) {
            let reference = state.context(supertype)?;
            let target = reference.reference().ok_or_else(|| {
                Error::malformed("supertype was not resolved", reference.location().clone())
            })?;
            ty = ty.with_supertype(self.type_definition(target)?);
        }
        for item in state.children_named(id, &items::ITEM) {
            ty = ty.with_item(self.item_definition(item)?);
        }
        for identifier in state.children_named(id, &items::IDENTIFIER) {
            ty = ty.with_identifier(self.identifier_definition(identifier)?);
        }
        if let Some(documentation) = state.first_value(id, &items::DOCUMENTATION) {
            ty = ty.with_documentation(documentation.text());
        }
        if let Some(argument) = state.first_value(id, &items::ARGUMENT) {
            let argument_name = name_value(argument, ctx)?;
            let item = ty.item(&argument_name).cloned().ok_or_else(|| {
                Error::malformed(
                    format!("argument {argument_name} is not an item of {}", ty.name()),
                    ctx.location().clone(),
                )
            })?;
            ty = ty.with_argument(item);
        }

        let ty = Arc::new(ty);
        self.in_progress.remove(&id);
        self.types.insert(id, Arc::clone(&ty));
        Ok(ty)
    }

    /// Builds the item definition declared by statement `id`.
    ///
    /// # Errors
    /// Returns a malformed statement error for a missing type or an
    /// unparsable occurrence bound, flag, or identifier.
    pub fn item_definition(&mut self, id: ContextId) -> Result<ItemDefinition> {
        let state = self.state;
        let ctx = state.context(id)?;
        let name = self.name_of(ctx, id)?;
        let Some(reference) = state.first_child(id, &items::TYPE) else {
            return Err(Error::malformed(
                format!("item {name} does not declare a type"),
                ctx.location().clone(),
            ));
        };
        let type_name = self.referenced_type_name(reference)?;

        let mut item = ItemDefinition::new(name, type_name);
        if let Some(min) = state.first_value(id, &items::MIN_OCCURS) {
            let min = min.text().parse::<u32>().map_err(|_| {
                Error::malformed(
                    format!("invalid minOccurs: {}", min.text()),
                    ctx.location().clone(),
                )
            })?;
            item = item.with_min_occurs(min);
        }
        if let Some(max) = state.first_value(id, &items::MAX_OCCURS) {
            let max = parse_max_occurs(max.text()).ok_or_else(|| {
                Error::malformed(
                    format!("invalid maxOccurs: {}", max.text()),
                    ctx.location().clone(),
                )
            })?;
            item = item.with_max_occurs(max);
        }
        if let Some(operational) = state.first_value(id, &items::OPERATIONAL) {
            let operational = operational.text().parse::<bool>().map_err(|_| {
                Error::malformed(
                    format!("invalid operational flag: {}", operational.text()),
                    ctx.location().clone(),
                )
            })?;
            item = item.with_operational(operational);
        }
        if let Some(identifier) = state.first_child(id, &items::IDENTIFIER) {
            item = item.with_identifier(self.identifier_definition(identifier)?);
        }
        if let Some(documentation) = state.first_value(id, &items::DOCUMENTATION) {
            item = item.with_documentation(documentation.text());
        }
        Ok(item)
    }

    /// Builds the identifier definition declared by statement `id`.
    ///
    /// # Errors
    /// Returns a malformed statement error for a missing space or an
    /// unknown scope.
    pub fn identifier_definition(&mut self, id: ContextId) -> Result<IdentifierDefinition> {
        let state = self.state;
        let ctx = state.context(id)?;
        let components = state
            .children_named(id, &items::KEY)
            .filter_map(|key| state.get(key).and_then(StatementContext::value))
            .map(|value| name_value(value, ctx))
            .collect::<Result<Vec<_>>>()?;
        let space = match state.first_value(id, &items::SPACE) {
            Some(value) => name_value(value, ctx)?,
            None => {
                return Err(Error::malformed(
                    "identifier does not declare a space",
                    ctx.location().clone(),
                ));
            }
        };
        let scope = match state.first_value(id, &items::SCOPE) {
            Some(value) => value.text().parse::<Scope>().map_err(|_| {
                Error::malformed(format!("invalid scope: {}", value.text()), ctx.location().clone())
            })?,
            None => Scope::Global,
        };
        Ok(IdentifierDefinition::new(components, space, scope))
    }

    /// Name of the type a resolved type reference points at.
    fn referenced_type_name(&self, reference: ContextId) -> Result<Name> {
        let state = self.state;
        let ctx = state.context(reference)?;
        let target = ctx.reference().ok_or_else(|| {
            Error::malformed(
                format!("{} reference was not resolved", ctx.keyword()),
                ctx.location().clone(),
            )
        })?;
        self.name_of(state.context(target)?, target)
    }

    fn name_of(&self, ctx: &StatementContext, id: ContextId) -> Result<Name> {
        match self.state.first_value(id, &items::NAME) {
            Some(value) => name_value(value, ctx),
            None => Err(Error::malformed(
                format!("{} has no name", ctx.keyword()),
                ctx.location().clone(),
            )),
        }
    }
}

fn name_value(value: &Value, ctx: &StatementContext) -> Result<Name> {
    value.as_name().cloned().ok_or_else(|| {
        Error::malformed(
            format!("expected a name, found {value}"),
            ctx.location().clone(),
        )
    })
}

/// Parses a `maxOccurs` value: `unbounded`, `*`, or a count.
///
/// Returns `Some(None)` for unbounded and `None` if unparsable.
#[must_use]
pub fn parse_max_occurs(text: &str) -> Option<Option<u32>> {
    match text {
        "unbounded" | "*" => Some(None),
        count => count.parse().ok().map(Some),
    }
}
