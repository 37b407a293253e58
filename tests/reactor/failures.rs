//! Integration tests for compilation failures

use schemata_foundation::{ErrorKind, Name};
use schemata_reactor::{Reactor, ReactorConfig};
use schemata_source::TextSource;

use crate::compile_text;

#[test]
fn duplicate_items_name_both_locations() {
    let err = compile_text(
        "model m {
    type Foo {
        item x { type string; }
        item x { type string; }
    }
}",
    )
    .unwrap_err();
    match &err.kind {
        ErrorKind::DuplicateIdentifier {
            key,
            location,
            previous,
            ..
        } => {
            assert_eq!(location.line(), 4);
            assert_eq!(previous.line(), 3);
            assert_eq!(key.get(&Name::builtin("name")).map(|v| v.text()), Some("x"));
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn same_item_name_in_different_types_is_allowed() {
    compile_text(
        "model m {
            type A { item x { type string; } }
            type B { item x { type string; } }
        }",
    )
    .unwrap();
}

#[test]
fn duplicate_types_across_documents() {
    let a = TextSource::new("a.axiom", "model a { type Foo; }");
    let b = TextSource::new("b.axiom", "model b { type Foo; }");
    let err = schemata_reactor::compile(&[&a, &b]).unwrap_err();
    assert!(matches!(err.kind, ErrorKind::DuplicateIdentifier { .. }));
    let msg = err.to_string();
    assert!(msg.contains("a.axiom"));
    assert!(msg.contains("b.axiom"));
}

#[test]
fn missing_type_is_reported_once() {
    let err = compile_text("model m { type Foo { item bar { type Nope; } } }").unwrap_err();
    match &err.kind {
        ErrorKind::UnresolvedRules { messages } => {
            assert_eq!(messages.len(), 1);
            assert!(messages[0].contains("type Nope was not found"));
            assert!(messages[0].contains("test.axiom"));
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn every_missing_type_is_reported() {
    let err = compile_text(
        "model m {
            type Foo { supertype Gone; item bar { type Nope; } }
        }",
    )
    .unwrap_err();
    match &err.kind {
        ErrorKind::UnresolvedRules { messages } => {
            assert_eq!(messages.len(), 2);
            assert!(messages.iter().any(|m| m.contains("Gone")));
            assert!(messages.iter().any(|m| m.contains("Nope")));
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn missing_reference_stops_after_one_idle_pass() {
    let mut reactor = Reactor::new(schemata_reactor::base_language().unwrap());
    reactor
        .load(&TextSource::new("test", "model m { type Foo { supertype Nope; } }"))
        .unwrap();
    assert!(reactor.compute_schema_context().is_err());
    assert!(reactor.passes() <= 4);
    assert_eq!(reactor.outstanding(), 1);
}

#[test]
fn parent_scope_on_a_root_is_a_scope_violation() {
    let schema = compile_text(
        "model m {
            root thing {
                type Thing;
                identifier name { space Things; scope parent; }
            }
            type Thing { argument name; item name { type AxiomName; } }
        }",
    )
    .unwrap();
    let mut reactor = Reactor::new(schema);
    reactor.load(&TextSource::new("doc", "thing a;")).unwrap();
    let err = reactor.compute_schema_context().unwrap_err();
    assert!(matches!(err.kind, ErrorKind::ScopeViolation { .. }));
}

#[test]
fn unparsable_min_occurs_is_malformed() {
    let err = compile_text("model m { type Foo { item x { type string; minOccurs many; } } }")
        .unwrap_err();
    assert!(matches!(err.kind, ErrorKind::MalformedStatement { .. }));
    assert!(err.to_string().contains("minOccurs"));
}

#[test]
fn unknown_scope_is_malformed() {
    let err = compile_text(
        "model m {
            type Foo { item x { type string; identifier name { space Xs; scope module; } } }
        }",
    )
    .unwrap_err();
    assert!(matches!(err.kind, ErrorKind::MalformedStatement { .. }));
    assert!(err.to_string().contains("module"));
}

#[test]
fn supertype_cycle_is_malformed() {
    let err = compile_text("model m { type A { supertype B; } type B { supertype A; } }")
        .unwrap_err();
    assert!(matches!(err.kind, ErrorKind::MalformedStatement { .. }));
    assert!(err.to_string().contains("cycle"));
}

#[test]
fn unknown_items_fail_during_load() {
    let err = compile_text("model m { type Foo { colour red; } }").unwrap_err();
    match &err.kind {
        ErrorKind::UnknownItem {
            keyword, parent, ..
        } => {
            assert_eq!(keyword, &Name::builtin("colour"));
            assert!(parent.is_some());
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn max_occurs_violation_points_at_the_extra_statement() {
    let err = compile_text(
        "model m {
    type Foo {
        argument a;
        argument b;
    }
}",
    )
    .unwrap_err();
    assert!(matches!(err.kind, ErrorKind::MalformedStatement { .. }));
    assert_eq!(err.location().map(schemata_foundation::SourceLocation::line), Some(4));
}

#[test]
fn occurrence_checks_can_be_disabled() {
    let config = ReactorConfig::default().with_occurrence_checks(false);
    let mut reactor =
        Reactor::new(schemata_reactor::base_language().unwrap()).with_config(config);
    reactor
        .load(&TextSource::new(
            "test",
            "model m { type Foo { documentation one; documentation two; } }",
        ))
        .unwrap();
    let context = reactor.compute_schema_context().unwrap();
    assert_eq!(
        context.get_type(&Name::builtin("Foo")).unwrap().documentation(),
        Some("one")
    );
}

#[test]
fn syntax_errors_surface_from_compile() {
    let err = compile_text("model m { type Foo }").unwrap_err();
    assert!(matches!(err.kind, ErrorKind::Syntax { .. }));
}

const CARS: &str = "model m {
    root car { type Car; }
    type Car {
        argument name;
        item name { type AxiomName; }
        item wheel { type string; minOccurs 3; }
    }
}";

#[test]
fn too_few_occurrences_are_unresolved() {
    let mut reactor = Reactor::new(compile_text(CARS).unwrap());
    reactor
        .load(&TextSource::new("doc", "car c { wheel \"a\"; wheel \"b\"; }"))
        .unwrap();
    let err = reactor.compute_schema_context().unwrap_err();
    match &err.kind {
        ErrorKind::UnresolvedRules { messages } => {
            assert_eq!(messages.len(), 1);
            assert!(messages[0].contains("needs at least 3 occurrences of wheel, found 2"));
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn enough_occurrences_resolve() {
    let mut reactor = Reactor::new(compile_text(CARS).unwrap());
    reactor
        .load(&TextSource::new("doc", "car c { wheel \"a\"; wheel \"b\"; wheel \"c\"; }"))
        .unwrap();
    assert!(reactor.compute_schema_context().is_ok());
}

#[test]
fn type_level_identifiers_reject_duplicates() {
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
        .load(&TextSource::new("doc", "thing a;\nthing a;"))
        .unwrap();
    let err = reactor.compute_schema_context().unwrap_err();
    match &err.kind {
        ErrorKind::DuplicateIdentifier { location, previous, .. } => {
            assert_eq!(location.line(), 2);
            assert_eq!(previous.line(), 1);
        }
        other => panic!("unexpected error: {other}"),
    }
}
