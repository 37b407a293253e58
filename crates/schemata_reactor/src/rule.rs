//! The rule catalog contract.
//!
//! A [`StatementRule`] is offered every new statement context. When its
//! applicability predicate holds, [`StatementRule::apply`] runs once, right
//! away, and declares requirements plus one deferred action through an
//! [`ActionBuilder`]. The reactor runs the action exactly once, on the first
//! pass where every requirement is satisfied.

use std::fmt;
use std::sync::Arc;

use schemata_foundation::{Error, IdentifierKey, Name, Result, Scope, SourceLocation, Value};
use schemata_model::{ItemDefinition, SchemaContext, TypeDefinition};
use tracing::trace;

use crate::requirement::{Message, Requirement};
use crate::statement::{ContextId, ReactorState, StatementContext};

/// A requirement that resolves to a statement context.
pub type Dependency = Requirement<ReactorState, ContextId>;

/// A deferred rule action.
pub type Action = Box<dyn FnOnce(&mut ActionContext<'_>) -> Result<()>>;

// =============================================================================
// Statement Rule
// =============================================================================

/// A rule in the reactor's catalog.
pub trait StatementRule {
    /// Rule name, used in diagnostics.
    fn name(&self) -> &str;

    /// Whether the rule applies to statements of this item and type.
    fn is_applicable_to(&self, item: &ItemDefinition, ty: &TypeDefinition) -> bool;

    /// Declares requirements and the deferred action for one statement.
    ///
    /// # Errors
    /// Returns an error to fail the compilation immediately.
    fn apply(&self, lookup: &RuleLookup<'_>, action: &mut ActionBuilder) -> Result<()>;
}

/// A rule assembled from closures.
pub struct FnRule<P, A> {
    name: String,
    predicate: P,
    apply: A,
}

impl<P, A> FnRule<P, A>
where
    P: Fn(&ItemDefinition, &TypeDefinition) -> bool,
    A: Fn(&RuleLookup<'_>, &mut ActionBuilder) -> Result<()>,
{
    /// Creates a rule from a name, a predicate, and an apply function.
    #[must_use]
    pub fn new(name: impl Into<String>, predicate: P, apply: A) -> Self {
        Self {
            name: name.into(),
            predicate,
            apply,
        }
    }
}

impl<P, A> StatementRule for FnRule<P, A>
where
    P: Fn(&ItemDefinition, &TypeDefinition) -> bool,
    A: Fn(&RuleLookup<'_>, &mut ActionBuilder) -> Result<()>,
{
    fn name(&self) -> &str {
        &self.name
    }

    fn is_applicable_to(&self, item: &ItemDefinition, ty: &TypeDefinition) -> bool {
        (self.predicate)(item, ty)
    }

    fn apply(&self, lookup: &RuleLookup<'_>, action: &mut ActionBuilder) -> Result<()> {
        (self.apply)(lookup, action)
    }
}

impl<P, A> fmt::Debug for FnRule<P, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnRule").field("name", &self.name).finish()
    }
}

// =============================================================================
// Rule Lookup
// =============================================================================

/// Read-only view of the statement a rule is being applied to.
pub struct RuleLookup<'a> {
    state: &'a ReactorState,
    context: &'a StatementContext,
    id: ContextId,
}

impl<'a> RuleLookup<'a> {
    /// Creates a view of `id`.
    ///
    /// # Errors
    /// Returns an internal error for a dangling id.
    pub fn new(state: &'a ReactorState, id: ContextId) -> Result<Self> {
        Ok(Self {
            state,
            context: state.context(id)?,
            id,
        })
    }

    /// The statement's id.
    #[must_use]
    pub fn id(&self) -> ContextId {
        self.id
    }

    /// The statement keyword.
    #[must_use]
    pub fn keyword(&self) -> &Name {
        self.context.keyword()
    }

    /// The statement's item definition.
    #[must_use]
    pub fn item_definition(&self) -> &Arc<ItemDefinition> {
        self.context.definition()
    }

    /// The type of the statement's item.
    #[must_use]
    pub fn type_definition(&self) -> &Arc<TypeDefinition> {
        self.context.type_definition()
    }

    /// The enclosing statement.
    #[must_use]
    pub fn parent(&self) -> Option<ContextId> {
        self.context.parent()
    }

    /// Where the statement starts.
    #[must_use]
    pub fn location(&self) -> &SourceLocation {
        self.context.location()
    }

    /// The schema that defines the document.
    #[must_use]
    pub fn schema(&self) -> &SchemaContext {
        self.state.schema()
    }

    /// The whole reactor state.
    #[must_use]
    pub fn state(&self) -> &ReactorState {
        self.state
    }

    /// A dependency on the first child named `keyword`, satisfied once it
    /// exists.
    #[must_use]
    pub fn require_child(&self, keyword: &Name) -> Dependency {
        let id = self.id;
        let keyword = keyword.clone();
        Requirement::suppliable(move |state: &ReactorState| state.first_child(id, &keyword))
    }

    /// A dependency on a statement registered in a global identifier space
    /// under a key computed from the state, retried until it appears.
    #[must_use]
    pub fn require_global(
        &self,
        space: &Name,
        key: impl Fn(&ReactorState) -> Option<IdentifierKey> + 'static,
    ) -> Dependency {
        let space = space.clone();
        Requirement::retriable(move |state: &ReactorState| {
            key(state)
                .and_then(|key| state.lookup_global(&space, &key))
                .map(Requirement::immediate)
        })
    }
}

// =============================================================================
// Action Builder
// =============================================================================

/// Handle to a declared dependency, redeemed in the action.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DepHandle(usize);

/// Collects the requirements and the action of one rule application.
#[derive(Default)]
pub struct ActionBuilder {
    requirements: Vec<Dependency>,
    action: Option<Action>,
    message: Option<Message<ReactorState>>,
}

impl ActionBuilder {
    /// Creates an empty builder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Declares a requirement.
    pub fn require(&mut self, dependency: Dependency) -> DepHandle {
        self.requirements.push(dependency);
        DepHandle(self.requirements.len() - 1)
    }

    /// Sets the deferred action. A later call replaces an earlier one.
    pub fn apply(&mut self, action: impl FnOnce(&mut ActionContext<'_>) -> Result<()> + 'static) {
        self.action = Some(Box::new(action));
    }

    /// Sets the diagnostic used when no unsatisfied requirement has one.
    pub fn error_message(&mut self, message: impl Fn(&ReactorState) -> String + 'static) {
        self.message = Some(Box::new(message));
    }

    /// Number of declared requirements.
    #[must_use]
    pub fn requirement_count(&self) -> usize {
        self.requirements.len()
    }
}

// =============================================================================
// Action Context
// =============================================================================

/// Mutable access to the reactor state for a running action.
pub struct ActionContext<'a> {
    state: &'a mut ReactorState,
    id: ContextId,
    resolved: Vec<ContextId>,
    created: &'a mut Vec<ContextId>,
}

impl ActionContext<'_> {
    /// The statement the rule was applied to.
    #[must_use]
    pub fn id(&self) -> ContextId {
        self.id
    }

    /// The value a declared dependency resolved to.
    ///
    /// # Errors
    /// Returns an illegal state error for a handle from another builder.
    pub fn resolved(&self, handle: DepHandle) -> Result<ContextId> {
        self.resolved
            .get(handle.0)
            .copied()
            .ok_or_else(|| Error::illegal_state(format!("no dependency {}", handle.0)))
    }

    /// Read access to the reactor state.
    #[must_use]
    pub fn state(&self) -> &ReactorState {
        self.state
    }

    /// The current statement's context.
    ///
    /// # Errors
    /// Returns an internal error for a dangling id.
    pub fn context(&self) -> Result<&StatementContext> {
        self.state.context(self.id)
    }

    /// The current statement's value.
    #[must_use]
    pub fn value(&self) -> Option<&Value> {
        self.state.get(self.id).and_then(StatementContext::value)
    }

    /// Replaces the current statement's value.
    ///
    /// # Errors
    /// Returns an illegal state error if the statement is complete.
    pub fn set_value(&mut self, value: Value) -> Result<()> {
        self.state.set_value(self.id, value)
    }

    /// Adds a child statement to the current one. Rules are attached to it
    /// once the action returns.
    ///
    /// # Errors
    /// Returns an unknown item error if the current type has no such item.
    pub fn create_child(&mut self, keyword: Name, value: Option<Value>) -> Result<ContextId> {
        let ctx = self.state.context(self.id)?;
        if !ctx.is_mutable() {
            return Err(Error::illegal_state(format!(
                "{} at {} is complete and can not gain children",
                ctx.keyword(),
                ctx.location()
            )));
        }
        let location = ctx.location().clone();
        let child = self.state.create(Some(self.id), keyword, location)?;
        if let Some(value) = value {
            self.state.load_value(child, value)?;
        }
        self.created.push(child);
        Ok(child)
    }

    /// Registers the current statement in an identifier space.
    ///
    /// # Errors
    /// Returns a scope violation or a duplicate identifier error.
    pub fn register(&mut self, space: &Name, scope: Scope, key: IdentifierKey) -> Result<()> {
        self.state.register(self.id, space, scope, key)
    }

    /// Records which statement the current one refers to.
    ///
    /// # Errors
    /// Returns an internal error for a dangling id.
    pub fn set_reference(&mut self, target: ContextId) -> Result<()> {
        self.state.set_reference(self.id, target)
    }

    /// A malformed statement error at the current statement.
    #[must_use]
    pub fn error(&self, message: impl Into<String>) -> Error {
        match self.state.get(self.id) {
            Some(ctx) => Error::malformed(message, ctx.location().clone()),
            None => Error::internal(message),
        }
    }
}

// =============================================================================
// Rule Instance
// =============================================================================

/// A rule bound to one statement context, waiting in the outstanding pool.
pub struct RuleInstance {
    rule: Arc<dyn StatementRule>,
    context: ContextId,
    requirements: Vec<Dependency>,
    action: Option<Action>,
    message: Option<Message<ReactorState>>,
}

impl RuleInstance {
    /// The rule's name.
    #[must_use]
    pub fn rule_name(&self) -> &str {
        self.rule.name()
    }

    /// The statement the rule is bound to.
    #[must_use]
    pub fn context(&self) -> ContextId {
        self.context
    }

    /// True when every requirement is satisfied.
    pub fn can_process(&mut self, state: &ReactorState) -> bool {
        self.requirements.iter_mut().all(|r| r.is_satisfied(state))
    }

    /// Resolves the requirements and runs the action. New child contexts
    /// are appended to `created`.
    ///
    /// # Errors
    /// Returns whatever the action fails with.
    pub fn perform(mut self, state: &mut ReactorState, created: &mut Vec<ContextId>) -> Result<()> {
        let resolved = self
            .requirements
            .iter_mut()
            .map(|r| r.get(state))
            .collect::<Result<Vec<_>>>()?;
        trace!(rule = self.rule.name(), context = ?self.context, "performing rule");
        if let Some(action) = self.action.take() {
            let mut ctx = ActionContext {
                state: &mut *state,
                id: self.context,
                resolved,
                created: &mut *created,
            };
            action(&mut ctx)?;
        }
        state.complete_one(self.context)
    }

    /// Diagnostic for an instance left outstanding at the fixpoint.
    ///
    /// Uses the first unsatisfied requirement's message, then the rule's own
    /// message, then a generic one.
    pub fn error_message(&mut self, state: &ReactorState) -> String {
        for requirement in &mut self.requirements {
            if !requirement.is_satisfied(state) {
                if let Some(message) = requirement.message(state) {
                    return message;
                }
            }
        }
        if let Some(message) = &self.message {
            return message(state);
        }
        match state.get(self.context) {
            Some(ctx) => format!(
                "{}: rule '{}' on {} could not be completed",
                ctx.location(),
                self.rule.name(),
                ctx.keyword()
            ),
            None => format!("rule '{}' could not be completed", self.rule.name()),
        }
    }
}

impl fmt::Debug for RuleInstance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RuleInstance")
            .field("rule", &self.rule.name())
            .field("context", &self.context)
            .field("requirements", &self.requirements.len())
            .finish()
    }
}

/// Offers a new context to every rule, in catalog order, and queues an
/// instance for each rule that applies.
///
/// # Errors
/// Returns the first error a rule's `apply` fails with.
pub fn attach_rules(
    rules: &[Arc<dyn StatementRule>],
    state: &mut ReactorState,
    id: ContextId,
    outstanding: &mut Vec<RuleInstance>,
) -> Result<()> {
    for rule in rules {
        let builder = {
            let lookup = RuleLookup::new(state, id)?;
            if !rule.is_applicable_to(lookup.item_definition(), lookup.type_definition()) {
                continue;
            }
            let mut builder = ActionBuilder::new();
            rule.apply(&lookup, &mut builder)?;
            builder
        };
        state.add_pending(id)?;
        outstanding.push(RuleInstance {
            rule: Arc::clone(rule),
            context: id,
            requirements: builder.requirements,
            action: builder.action,
            message: builder.message,
        });
    }
    Ok(())
}
