//! Built-in rules of the schema language.
//!
//! Registered in this order:
//! 1. [`ArgumentValueRule`] - a statement value fills in the type's argument item
//! 2. [`RegisterIdentifierRule`] - keyed statements are registered in identifier spaces
//! 3. [`TypeReferenceRule`] - type references wait for the referenced type
//! 4. [`MandatoryItemsRule`] - required items must be present
//! 5. [`MaxOccursRule`] - items may not occur more often than allowed

use std::sync::Arc;

use schemata_foundation::{Error, IdentifierKey, Result};
use schemata_model::names::{items, spaces, types};
use schemata_model::{IdentifierDefinition, ItemDefinition, TypeDefinition};

use crate::config::ReactorConfig;
use crate::requirement::Requirement;
use crate::rule::{ActionBuilder, RuleLookup, StatementRule};
use crate::statement::{ContextId, ReactorState};

/// The built-in catalog for a configuration.
#[must_use]
pub fn builtin_rules(config: &ReactorConfig) -> Vec<Arc<dyn StatementRule>> {
    let mut rules: Vec<Arc<dyn StatementRule>> = vec![
        Arc::new(ArgumentValueRule),
        Arc::new(RegisterIdentifierRule),
        Arc::new(TypeReferenceRule),
        Arc::new(MandatoryItemsRule),
    ];
    if config.check_occurrences {
        rules.push(Arc::new(MaxOccursRule));
    }
    rules
}

fn describe(state: &ReactorState, id: ContextId) -> String {
    match state.get(id) {
        Some(ctx) => match ctx.value() {
            Some(value) => format!("{}: {} {}", ctx.location(), ctx.keyword(), value.text()),
            None => format!("{}: {}", ctx.location(), ctx.keyword()),
        },
        None => format!("{id:?}"),
    }
}

// =============================================================================
// argument-value
// =============================================================================

/// When a statement has a value, adds an argument child carrying it.
///
/// A value next to explicit argument children becomes one more occurrence
/// if the argument item allows it, and is a malformed statement otherwise.
#[derive(Clone, Copy, Debug, Default)]
pub struct ArgumentValueRule;

impl StatementRule for ArgumentValueRule {
    fn name(&self) -> &str {
        "argument-value"
    }

    fn is_applicable_to(&self, _item: &ItemDefinition, ty: &TypeDefinition) -> bool {
        ty.argument().is_some()
    }

    fn apply(&self, lookup: &RuleLookup<'_>, action: &mut ActionBuilder) -> Result<()> {
        let Some(argument) = lookup.type_definition().argument() else {
            return Ok(());
        };
        let max = argument.max_occurs();
        let argument = argument.name().clone();
        action.apply(move |ctx| {
            let Some(value) = ctx.value().cloned() else {
                return Ok(());
            };
            let explicit = ctx.state().children_named(ctx.id(), &argument).count();
            if max.is_some_and(|max| explicit >= max as usize) {
                return Err(ctx.error(format!(
                    "value {} conflicts with the explicit {argument} of {}",
                    value.text(),
                    ctx.context()?.keyword()
                )));
            }
            ctx.create_child(argument, Some(value))?;
            Ok(())
        });
        Ok(())
    }
}

// =============================================================================
// register-identifier
// =============================================================================

/// Registers statements once every key component is present.
///
/// Keys come from the item's identifier definition and from the identifier
/// definitions of the statement's type and its supertypes.
#[derive(Clone, Copy, Debug, Default)]
pub struct RegisterIdentifierRule;

fn identifiers_of(item: &ItemDefinition, ty: &TypeDefinition) -> Vec<IdentifierDefinition> {
    let mut identifiers: Vec<IdentifierDefinition> =
        item.identifier_definition().into_iter().cloned().collect();
    for identifier in ty.ancestors().flat_map(TypeDefinition::identifier_definitions) {
        if !identifiers.contains(identifier) {
            identifiers.push(identifier.clone());
        }
    }
    identifiers
}

impl StatementRule for RegisterIdentifierRule {
    fn name(&self) -> &str {
        "register-identifier"
    }

    fn is_applicable_to(&self, item: &ItemDefinition, ty: &TypeDefinition) -> bool {
        item.identifier_definition().is_some()
            || ty.ancestors().any(|t| !t.identifier_definitions().is_empty())
    }

    fn apply(&self, lookup: &RuleLookup<'_>, action: &mut ActionBuilder) -> Result<()> {
        let id = lookup.id();
        let mut registrations = Vec::new();
        for identifier in identifiers_of(lookup.item_definition(), lookup.type_definition()) {
            let mut components = Vec::new();
            for component in identifier.components() {
                let name = component.clone();
                let dependency =
                    lookup.require_child(component).unsatisfied_message(move |state| {
                        format!("{} has no {name}, which identifies it", describe(state, id))
                    });
                components.push((component.clone(), action.require(dependency)));
            }
            registrations.push((identifier, components));
        }
        action.apply(move |ctx| {
            for (identifier, components) in registrations {
                let mut key = Vec::with_capacity(components.len());
                for (component, handle) in components {
                    let child = ctx.resolved(handle)?;
                    let value = ctx.state().context(child)?.value().cloned().ok_or_else(|| {
                        ctx.error(format!("identifier component {component} has no value"))
                    })?;
                    key.push((component, value));
                }
                let key = IdentifierKey::from_components(key);
                ctx.register(identifier.space(), identifier.scope(), key)?;
            }
            Ok(())
        });
        Ok(())
    }
}

// =============================================================================
// resolve-type-reference
// =============================================================================

/// Waits until the referenced type is registered and records it.
#[derive(Clone, Copy, Debug, Default)]
pub struct TypeReferenceRule;

fn referenced_name(state: &ReactorState, id: ContextId) -> Option<IdentifierKey> {
    let ctx = state.get(id)?;
    let name = match ctx.value() {
        Some(value) => value.as_name()?.clone(),
        None => state.first_value(id, &items::NAME)?.as_name()?.clone(),
    };
    Some(IdentifierKey::single(items::NAME.clone(), name))
}

impl StatementRule for TypeReferenceRule {
    fn name(&self) -> &str {
        "resolve-type-reference"
    }

    fn is_applicable_to(&self, _item: &ItemDefinition, ty: &TypeDefinition) -> bool {
        ty.is_subtype_of(&types::TYPE_REFERENCE)
    }

    fn apply(&self, lookup: &RuleLookup<'_>, action: &mut ActionBuilder) -> Result<()> {
        let id = lookup.id();
        let target = lookup
            .require_global(&spaces::TYPES, move |state| referenced_name(state, id))
            .not_found(move |state| {
                let location = state
                    .get(id)
                    .map(|ctx| ctx.location().to_string())
                    .unwrap_or_default();
                match referenced_name(state, id) {
                    Some(key) => match key.get(&items::NAME) {
                        Some(name) => format!("{location}: type {name} was not found"),
                        None => format!("{location}: type {key} was not found"),
                    },
                    None => format!("{location}: type reference has no type name"),
                }
            });
        let target = action.require(target);
        action.apply(move |ctx| {
            let target = ctx.resolved(target)?;
            ctx.set_reference(target)
        });
        Ok(())
    }
}

// =============================================================================
// require-mandatory-items
// =============================================================================

/// Waits until every required item occurs at least `minOccurs` times.
#[derive(Clone, Copy, Debug, Default)]
pub struct MandatoryItemsRule;

impl StatementRule for MandatoryItemsRule {
    fn name(&self) -> &str {
        "require-mandatory-items"
    }

    fn is_applicable_to(&self, _item: &ItemDefinition, ty: &TypeDefinition) -> bool {
        ty.is_complex() && ty.all_items().iter().any(|item| item.is_required())
    }

    fn apply(&self, lookup: &RuleLookup<'_>, action: &mut ActionBuilder) -> Result<()> {
        let id = lookup.id();
        for item in lookup.type_definition().all_items() {
            if !item.is_required() {
                continue;
            }
            let min = item.min_occurs() as usize;
            let name = item.name().clone();
            let keyword = name.clone();
            let dependency = Requirement::suppliable(move |state: &ReactorState| {
                let mut children = state.children_named(id, &keyword);
                let first = children.next()?;
                (children.count() + 1 >= min).then_some(first)
            })
            .unsatisfied_message(move |state| {
                let found = state.children_named(id, &name).count();
                if found == 0 {
                    format!("{} is missing required item {name}", describe(state, id))
                } else {
                    format!(
                        "{} needs at least {min} occurrences of {name}, found {found}",
                        describe(state, id)
                    )
                }
            });
            action.require(dependency);
        }
        Ok(())
    }
}

// =============================================================================
// max-occurs
// =============================================================================

/// Fails as soon as an item occurs more often than its `maxOccurs`.
#[derive(Clone, Copy, Debug, Default)]
pub struct MaxOccursRule;

impl StatementRule for MaxOccursRule {
    fn name(&self) -> &str {
        "max-occurs"
    }

    fn is_applicable_to(&self, item: &ItemDefinition, _ty: &TypeDefinition) -> bool {
        item.max_occurs().is_some()
    }

    fn apply(&self, lookup: &RuleLookup<'_>, _action: &mut ActionBuilder) -> Result<()> {
        let (Some(max), Some(parent)) = (lookup.item_definition().max_occurs(), lookup.parent())
        else {
            return Ok(());
        };
        let occurrences = lookup.state().children_named(parent, lookup.keyword()).count();
        if occurrences > max as usize {
            let parent = lookup.state().context(parent)?;
            return Err(Error::malformed(
                format!(
                    "{} may occur at most {max} time(s) in {} (first at {})",
                    lookup.keyword(),
                    parent.keyword(),
                    parent.location()
                ),
                lookup.location().clone(),
            ));
        }
        Ok(())
    }
}
