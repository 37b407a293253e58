//! Integration tests for reference resolution and inheritance

use schemata_foundation::{Name, Value};
use schemata_model::names::types;
use schemata_reactor::{Reactor, base_language, compile};
use schemata_source::TextSource;

use crate::compile_text;

fn name(s: &str) -> Name {
    Name::builtin(s)
}

// =============================================================================
// References
// =============================================================================

#[test]
fn forward_reference_resolves() {
    let context = compile_text(
        "model m {
            type Foo { item bar { type Baz; } }
            type Baz;
        }",
    )
    .unwrap();
    let foo = context.get_type(&name("Foo")).unwrap();
    let bar = foo.item(&name("bar")).unwrap();
    assert_eq!(context.type_of(bar), context.get_type(&name("Baz")));
}

#[test]
fn item_type_accepts_both_reference_forms() {
    let context = compile_text(
        "model m {
            type Foo {
                item bar { type { name Baz; } }
                item baz { type Baz; }
            }
            type Baz;
        }",
    )
    .unwrap();
    let foo = context.get_type(&name("Foo")).unwrap();
    let baz = context.get_type(&name("Baz"));
    assert!(baz.is_some());
    assert_eq!(context.type_of(foo.item(&name("bar")).unwrap()), baz);
    assert_eq!(context.type_of(foo.item(&name("baz")).unwrap()), baz);
}

#[test]
fn identifier_value_joins_explicit_keys() {
    let context =
        compile_text("model m { type Foo { identifier a { key b; space S; scope parent; } } }")
            .unwrap();
    let foo = context.get_type(&name("Foo")).unwrap();
    let identifier = &foo.identifier_definitions()[0];
    let components: Vec<&str> = identifier.components().map(Name::local_name).collect();
    assert_eq!(components, ["a", "b"]);
}

#[test]
fn references_across_documents() {
    let first = TextSource::new("a.axiom", "model a { type User { item group { type Group; } } }");
    let second =
        TextSource::new("b.axiom", "model b { type Group { item members { type User; } } }");
    let context = compile(&[&first, &second]).unwrap();
    let user = context.get_type(&name("User")).unwrap();
    let group = context.get_type(&name("Group")).unwrap();
    assert_eq!(context.type_of(user.item(&name("group")).unwrap()).as_ref(), Some(&group));
    assert_eq!(context.type_of(group.item(&name("members")).unwrap()).as_ref(), Some(&user));
}

#[test]
fn base_types_are_visible_to_user_schemas() {
    let context = compile_text("model m { type Person { item id { type uuid; } } }").unwrap();
    let person = context.get_type(&name("Person")).unwrap();
    let id = person.item(&name("id")).unwrap();
    assert_eq!(id.type_name(), &*types::UUID);
    assert!(context.get_type(&types::TYPE_DEFINITION).is_some());
    assert!(context.types().count() > base_language().unwrap().types().count());
}

#[test]
fn namespaced_names_resolve() {
    let context = compile_text(
        "model m {
            type ex:Foo;
            type Bar { item f { type ex:Foo; } }
        }",
    )
    .unwrap();
    let foo = context.get_type(&Name::new("ex", "Foo")).unwrap();
    let bar = context.get_type(&name("Bar")).unwrap();
    assert_eq!(context.type_of(bar.item(&name("f")).unwrap()), Some(foo));
    assert!(context.get_type(&name("Foo")).is_none());
}

// =============================================================================
// Definitions
// =============================================================================

#[test]
fn item_properties_are_read() {
    let context = compile_text(
        r#"model m {
            type Car {
                documentation "Something with wheels";
                item wheel { type string; minOccurs 3; maxOccurs unbounded; }
                item plate { type string; maxOccurs 1; operational true; }
            }
        }"#,
    )
    .unwrap();
    let car = context.get_type(&name("Car")).unwrap();
    assert_eq!(car.documentation(), Some("Something with wheels"));
    let wheel = car.item(&name("wheel")).unwrap();
    assert_eq!(wheel.min_occurs(), 3);
    assert_eq!(wheel.max_occurs(), None);
    assert!(wheel.is_required());
    let plate = car.item(&name("plate")).unwrap();
    assert_eq!(plate.max_occurs(), Some(1));
    assert!(plate.is_operational());
    assert!(!plate.is_required());
}

#[test]
fn supertype_items_are_inherited() {
    let context = compile_text(
        "model m {
            type Derived { supertype Base; item extra { type string; } }
            type Base { item common { type string; } }
        }",
    )
    .unwrap();
    let derived = context.get_type(&name("Derived")).unwrap();
    assert!(derived.is_subtype_of(&name("Base")));
    assert!(derived.item(&name("common")).is_some());
    assert!(derived.own_item(&name("common")).is_none());
    let names: Vec<_> = derived.all_items().iter().map(|i| i.name().clone()).collect();
    assert_eq!(names, vec![name("common"), name("extra")]);
}

#[test]
fn argument_is_inherited_by_documents() {
    let schema = compile_text(
        "model m {
            root thing { type Derived; }
            type Base { argument label; item label { type string; } }
            type Derived { supertype Base; }
        }",
    )
    .unwrap();
    let derived = schema.get_type(&name("Derived")).unwrap();
    assert_eq!(derived.argument().map(|a| a.name().clone()), Some(name("label")));
    assert!(schema.get_root(&name("thing")).is_some());

    let mut reactor = Reactor::new(schema);
    reactor.load(&TextSource::new("doc", "thing hello;")).unwrap();
    reactor.compute_schema_context().unwrap();
    let state = reactor.state();
    let root = *state.roots().last().unwrap();
    assert_eq!(
        state.first_value(root, &name("label")),
        Some(&Value::from("hello"))
    );
}

#[test]
fn documents_register_in_user_spaces() {
    let schema = compile_text(
        "model m {
            root thing {
                type Thing;
                identifier name { space Things; scope global; }
            }
            type Thing { argument name; item name { type AxiomName; } }
        }",
    )
    .unwrap();
    let mut reactor = Reactor::new(schema);
    reactor
        .load(&TextSource::new("doc", "thing a; thing b;"))
        .unwrap();
    let context = reactor.compute_schema_context().unwrap();
    let things = context.space(&name("Things")).unwrap();
    assert_eq!(things.len(), 2);
}

#[test]
fn type_level_identifiers_register_statements() {
    let schema = compile_text(
        "model m {
            root thing { type Thing; }
            type Thing {
                argument name;
                item name { type AxiomName; }
                identifier name { space Things; scope global; }
            }
        }",
    )
    .unwrap();
    let mut reactor = Reactor::new(schema);
    reactor
        .load(&TextSource::new("doc", "thing a; thing b;"))
        .unwrap();
    let context = reactor.compute_schema_context().unwrap();
    assert_eq!(context.space(&name("Things")).unwrap().len(), 2);
}
