//! Integration tests for custom rules and factories

use std::sync::Arc;

use schemata_foundation::{Name, Result, Value};
use schemata_model::names::{items, types};
use schemata_model::{ItemDefinition, Resolved, TypeDefinition};
use schemata_reactor::{
    ActionBuilder, Assembler, ContextId, FnRule, Reactor, RuleLookup, base_language,
};
use schemata_source::TextSource;

use crate::compile_text;

const THINGS: &str = "model m {
    root thing {
        type Thing;
        identifier name { space Things; scope global; }
    }
    type Thing { argument name; item name { type AxiomName; } item note { type string; } }
}";

fn things_key(name: &str) -> schemata_foundation::IdentifierKey {
    schemata_foundation::IdentifierKey::single(items::NAME.clone(), Name::builtin(name))
}

#[test]
fn unregistered_types_resolve_to_statement_trees() {
    let mut reactor = Reactor::new(compile_text(THINGS).unwrap());
    reactor
        .load(&TextSource::new("doc", "thing a { note \"first\"; }"))
        .unwrap();
    let context = reactor.compute_schema_context().unwrap();
    let resolved = context.lookup(&Name::builtin("Things"), &things_key("a")).unwrap();
    let statement = resolved.as_statement().unwrap();
    assert_eq!(statement.keyword(), &Name::builtin("thing"));
    assert_eq!(
        statement.first_value(&Name::builtin("note")),
        Some(&Value::from("first"))
    );
}

#[test]
fn registered_factories_replace_the_fallback() {
    let mut reactor = Reactor::new(compile_text(THINGS).unwrap());
    reactor.add_statement_factory(
        Name::builtin("Thing"),
        |assembler: &mut Assembler<'_>, id: ContextId| -> Result<Resolved> {
            let state = assembler.state();
            let name = state
                .first_value(id, &items::NAME)
                .and_then(Value::as_name)
                .cloned()
                .unwrap_or_else(|| Name::builtin("anonymous"));
            Ok(Resolved::Item(Arc::new(ItemDefinition::new(
                name,
                Name::builtin("Thing"),
            ))))
        },
    );
    reactor.load(&TextSource::new("doc", "thing a;")).unwrap();
    let context = reactor.compute_schema_context().unwrap();
    let resolved = context.lookup(&Name::builtin("Things"), &things_key("a")).unwrap();
    let item = resolved.as_item().unwrap();
    assert_eq!(item.name(), &Name::builtin("a"));
}

#[test]
fn custom_rules_can_fill_in_items() {
    let mut reactor = Reactor::new(base_language().unwrap());
    reactor.add_rule(FnRule::new(
        "default-documentation",
        |_: &ItemDefinition, ty: &TypeDefinition| ty.name() == &*types::TYPE_DEFINITION,
        |lookup: &RuleLookup<'_>, action: &mut ActionBuilder| {
            let name = action.require(lookup.require_child(&items::NAME));
            action.apply(move |ctx| {
                let name = ctx.resolved(name)?;
                let text = ctx
                    .state()
                    .context(name)?
                    .value()
                    .map(|value| value.text().to_string())
                    .unwrap_or_default();
                if ctx.state().first_child(ctx.id(), &items::DOCUMENTATION).is_none() {
                    ctx.create_child(
                        items::DOCUMENTATION.clone(),
                        Some(Value::from(format!("The {text} type"))),
                    )?;
                }
                Ok(())
            });
            Ok(())
        },
    ));
    reactor
        .load(&TextSource::new(
            "test",
            "model m { type Foo; type Bar { documentation \"Explicit\"; } }",
        ))
        .unwrap();
    let context = reactor.compute_schema_context().unwrap();
    let foo = context.get_type(&Name::builtin("Foo")).unwrap();
    let bar = context.get_type(&Name::builtin("Bar")).unwrap();
    assert_eq!(foo.documentation(), Some("The Foo type"));
    assert_eq!(bar.documentation(), Some("Explicit"));
}

#[test]
fn custom_rule_requirements_report_their_message() {
    let mut reactor = Reactor::new(base_language().unwrap());
    reactor.add_rule(FnRule::new(
        "types-need-documentation",
        |_: &ItemDefinition, ty: &TypeDefinition| {
            ty.name() == &*types::TYPE_DEFINITION
        },
        |lookup: &RuleLookup<'_>, action: &mut ActionBuilder| {
            let id = lookup.id();
            action.require(
                lookup
                    .require_child(&items::DOCUMENTATION)
                    .unsatisfied_message(move |state| {
                        let location = state.get(id).map(|c| c.location().to_string());
                        format!("{} is undocumented", location.unwrap_or_default())
                    }),
            );
            Ok(())
        },
    ));
    reactor
        .load(&TextSource::new("test", "model m { type Foo; }"))
        .unwrap();
    let err = reactor.compute_schema_context().unwrap_err();
    assert!(err.to_string().contains("test[1:11] is undocumented"));
}
