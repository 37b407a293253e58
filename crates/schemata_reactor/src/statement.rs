//! Mutable, in-progress statements and the state they live in.
//!
//! Every statement context lives in one arena owned by [`ReactorState`] and
//! is addressed by a [`ContextId`]. Parents own their children by id; the
//! link back to the parent is an id as well, never a reference.

use std::fmt;
use std::sync::Arc;

use schemata_foundation::{Error, IdentifierKey, Name, Result, Scope, SourceLocation, Value};
use schemata_model::{ItemDefinition, SchemaContext, TypeDefinition};
use schemata_source::NameResolver;

use crate::space::IdentifierSpaceHolder;

// =============================================================================
// Context Id
// =============================================================================

/// Handle to a statement context in the reactor's arena.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ContextId(u32);

impl ContextId {
    /// Creates an id from its raw index.
    #[must_use]
    pub const fn new(index: u32) -> Self {
        Self(index)
    }

    /// The raw arena index.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Debug for ContextId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

// =============================================================================
// Statement Context
// =============================================================================

/// An in-progress statement.
///
/// A context stays mutable while it has pending rules. Once the last one
/// completes its value and children are fixed.
#[derive(Debug)]
pub struct StatementContext {
    keyword: Name,
    definition: Arc<ItemDefinition>,
    type_def: Arc<TypeDefinition>,
    parent: Option<ContextId>,
    value: Option<Value>,
    original_value: Option<Value>,
    children: Vec<ContextId>,
    location: SourceLocation,
    local: Option<IdentifierSpaceHolder>,
    pending: usize,
    reference: Option<ContextId>,
}

impl StatementContext {
    /// The statement keyword (the item name).
    #[must_use]
    pub fn keyword(&self) -> &Name {
        &self.keyword
    }

    /// The item definition this statement instantiates.
    #[must_use]
    pub fn definition(&self) -> &Arc<ItemDefinition> {
        &self.definition
    }

    /// The type of the item.
    #[must_use]
    pub fn type_definition(&self) -> &Arc<TypeDefinition> {
        &self.type_def
    }

    /// The enclosing statement, if any.
    #[must_use]
    pub fn parent(&self) -> Option<ContextId> {
        self.parent
    }

    /// The current value.
    #[must_use]
    pub fn value(&self) -> Option<&Value> {
        self.value.as_ref()
    }

    /// The value as first loaded, before any rule changed it.
    #[must_use]
    pub fn original_value(&self) -> Option<&Value> {
        self.original_value.as_ref()
    }

    /// Child statements in declaration order.
    #[must_use]
    pub fn children(&self) -> &[ContextId] {
        &self.children
    }

    /// Where the statement starts.
    #[must_use]
    pub fn location(&self) -> &SourceLocation {
        &self.location
    }

    /// The statement this one was resolved to refer to, if any.
    #[must_use]
    pub fn reference(&self) -> Option<ContextId> {
        self.reference
    }

    /// Number of attached rules that have not completed.
    #[must_use]
    pub fn pending_rules(&self) -> usize {
        self.pending
    }

    /// True while rules are still pending.
    #[must_use]
    pub fn is_mutable(&self) -> bool {
        self.pending > 0
    }

    /// The local identifier spaces, if any key was registered in them.
    #[must_use]
    pub fn local_spaces(&self) -> Option<&IdentifierSpaceHolder> {
        self.local.as_ref()
    }
}

// =============================================================================
// Reactor State
// =============================================================================

/// Everything a compilation mutates: the context arena, the document roots,
/// and the global identifier spaces.
///
/// Rule requirements are checked against this state.
#[derive(Debug)]
pub struct ReactorState {
    schema: SchemaContext,
    contexts: Vec<StatementContext>,
    roots: Vec<ContextId>,
    global: IdentifierSpaceHolder,
}

impl ReactorState {
    /// Creates empty state over the schema that defines the documents.
    #[must_use]
    pub fn new(schema: SchemaContext) -> Self {
        Self {
            schema,
            contexts: Vec::new(),
            roots: Vec::new(),
            global: IdentifierSpaceHolder::global(),
        }
    }

    /// The schema that defines the documents being loaded.
    #[must_use]
    pub fn schema(&self) -> &SchemaContext {
        &self.schema
    }

    /// Document root statements, in load order.
    #[must_use]
    pub fn roots(&self) -> &[ContextId] {
        &self.roots
    }

    /// Number of contexts created so far.
    #[must_use]
    pub fn len(&self) -> usize {
        self.contexts.len()
    }

    /// True if nothing was loaded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.contexts.is_empty()
    }

    /// The reactor-wide identifier spaces.
    #[must_use]
    pub fn global_spaces(&self) -> &IdentifierSpaceHolder {
        &self.global
    }

    /// Returns a context.
    #[must_use]
    pub fn get(&self, id: ContextId) -> Option<&StatementContext> {
        self.contexts.get(id.index())
    }

    /// Returns a context, failing on a dangling id.
    ///
    /// # Errors
    /// Returns an internal error if `id` does not belong to this state.
    pub fn context(&self, id: ContextId) -> Result<&StatementContext> {
        self.get(id)
            .ok_or_else(|| Error::internal(format!("unknown statement context {id:?}")))
    }

    fn context_mut(&mut self, id: ContextId) -> Result<&mut StatementContext> {
        self.contexts
            .get_mut(id.index())
            .ok_or_else(|| Error::internal(format!("unknown statement context {id:?}")))
    }

    /// Children of `id` with the given keyword.
    pub fn children_named<'a>(
        &'a self,
        id: ContextId,
        keyword: &'a Name,
    ) -> impl Iterator<Item = ContextId> + 'a {
        self.get(id)
            .map(|ctx| ctx.children.as_slice())
            .unwrap_or_default()
            .iter()
            .copied()
            .filter(move |child| self.get(*child).is_some_and(|c| &c.keyword == keyword))
    }

    /// The first child of `id` with the given keyword.
    #[must_use]
    pub fn first_child(&self, id: ContextId, keyword: &Name) -> Option<ContextId> {
        self.children_named(id, keyword).next()
    }

    /// The value of the first child of `id` with the given keyword.
    #[must_use]
    pub fn first_value(&self, id: ContextId, keyword: &Name) -> Option<&Value> {
        self.first_child(id, keyword)
            .and_then(|child| self.get(child))
            .and_then(StatementContext::value)
    }

    /// Looks up a statement in a global identifier space.
    #[must_use]
    pub fn lookup_global(&self, space: &Name, key: &IdentifierKey) -> Option<ContextId> {
        self.global.lookup(space, key)
    }

    /// Looks up a statement in the local identifier space of `owner`.
    #[must_use]
    pub fn lookup_local(
        &self,
        owner: ContextId,
        space: &Name,
        key: &IdentifierKey,
    ) -> Option<ContextId> {
        self.get(owner)
            .and_then(|ctx| ctx.local.as_ref())
            .and_then(|holder| holder.lookup(space, key))
    }

    /// Creates a context for `keyword` under `parent` (or as a document root).
    ///
    /// The item definition comes from the parent's type (walking its
    /// supertypes) or, for roots, from the schema's root definitions.
    ///
    /// # Errors
    /// Returns an unknown item error if no definition exists for `keyword`
    /// at this position, or a malformed statement error if the item's type
    /// is not defined.
    pub fn create(
        &mut self,
        parent: Option<ContextId>,
        keyword: Name,
        location: SourceLocation,
    ) -> Result<ContextId> {
        let definition = match parent {
            Some(parent) => {
                let ty = self.context(parent)?.type_definition();
                ty.item(&keyword).cloned().ok_or_else(|| {
                    Error::unknown_item(keyword.clone(), Some(ty.name().clone()), location.clone())
                })?
            }
            None => self
                .schema
                .get_root(&keyword)
                .ok_or_else(|| Error::unknown_item(keyword.clone(), None, location.clone()))?,
        };
        let type_def = self.schema.type_of(&definition).ok_or_else(|| {
            Error::malformed(
                format!(
                    "type {} of item {} is not defined",
                    definition.type_name(),
                    definition.name()
                ),
                location.clone(),
            )
        })?;

        let index = u32::try_from(self.contexts.len())
            .map_err(|_| Error::internal("too many statement contexts"))?;
        let id = ContextId::new(index);
        self.contexts.push(StatementContext {
            keyword,
            definition,
            type_def,
            parent,
            value: None,
            original_value: None,
            children: Vec::new(),
            location,
            local: None,
            pending: 0,
            reference: None,
        });
        match parent {
            Some(parent) => self.context_mut(parent)?.children.push(id),
            None => self.roots.push(id),
        }
        Ok(id)
    }

    /// Converts a raw source value according to the item's type: identifier
    /// types give names, everything else strings.
    ///
    /// # Errors
    /// Returns an internal error for a dangling id.
    pub fn typed_value(
        &self,
        id: ContextId,
        raw: &str,
        resolver: &dyn NameResolver,
    ) -> Result<Value> {
        let ctx = self.context(id)?;
        if self.schema.is_identifier_valued(&ctx.type_def) {
            Ok(Value::Name(resolver.resolve_text(raw)))
        } else {
            Ok(Value::from(raw))
        }
    }

    /// Sets the value of a freshly loaded statement.
    ///
    /// # Errors
    /// Returns a malformed statement error if the statement already has one.
    pub fn load_value(&mut self, id: ContextId, value: Value) -> Result<()> {
        let ctx = self.context_mut(id)?;
        if ctx.value.is_some() {
            return Err(Error::malformed(
                format!("{} already has a value", ctx.keyword),
                ctx.location.clone(),
            ));
        }
        ctx.original_value = Some(value.clone());
        ctx.value = Some(value);
        Ok(())
    }

    /// Replaces the value of a statement whose rules are still running.
    ///
    /// # Errors
    /// Returns an illegal state error if the statement is already complete.
    pub fn set_value(&mut self, id: ContextId, value: Value) -> Result<()> {
        let ctx = self.context_mut(id)?;
        if !ctx.is_mutable() {
            return Err(Error::illegal_state(format!(
                "{} at {} is complete and can not change",
                ctx.keyword, ctx.location
            )));
        }
        if ctx.original_value.is_none() {
            ctx.original_value = Some(value.clone());
        }
        ctx.value = Some(value);
        Ok(())
    }

    /// Records the statement `id` refers to.
    ///
    /// # Errors
    /// Returns an internal error for a dangling id.
    pub fn set_reference(&mut self, id: ContextId, target: ContextId) -> Result<()> {
        self.context(target)?;
        self.context_mut(id)?.reference = Some(target);
        Ok(())
    }

    /// Registers `id` in an identifier space.
    ///
    /// Global keys go to the reactor-wide holder. Parent keys go to the
    /// local holder of the enclosing statement, created on first use; a
    /// document root has no enclosing statement, so its parent keys are
    /// offered to the global holder, which rejects them.
    ///
    /// # Errors
    /// Returns a scope violation or a duplicate identifier error.
    pub fn register(
        &mut self,
        id: ContextId,
        space: &Name,
        scope: Scope,
        key: IdentifierKey,
    ) -> Result<()> {
        let ctx = self.context(id)?;
        let location = ctx.location.clone();
        let holder = match (scope, ctx.parent) {
            (Scope::Parent, Some(parent)) => self
                .context_mut(parent)?
                .local
                .get_or_insert_with(IdentifierSpaceHolder::local),
            _ => &mut self.global,
        };
        holder.register(space, scope, key, id, &location)
    }

    pub(crate) fn add_pending(&mut self, id: ContextId) -> Result<()> {
        self.context_mut(id)?.pending += 1;
        Ok(())
    }

    pub(crate) fn complete_one(&mut self, id: ContextId) -> Result<()> {
        let ctx = self.context_mut(id)?;
        ctx.pending = ctx.pending.saturating_sub(1);
        Ok(())
    }
}
