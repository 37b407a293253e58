//! Integration tests for names, values, and identifier keys

use schemata_foundation::{IdentifierKey, LANGUAGE_NAMESPACE, Name, Scope, SourceLocation, Value};

// =============================================================================
// Names
// =============================================================================

#[test]
fn builtin_names_use_language_namespace() {
    let name = Name::builtin("string");
    assert_eq!(name.namespace(), LANGUAGE_NAMESPACE);
    assert_eq!(name.local_name(), "string");
    assert!(name.is_builtin());
}

#[test]
fn names_differ_by_namespace() {
    let a = Name::new("urn:a", "Foo");
    let b = Name::new("urn:b", "Foo");
    assert_ne!(a, b);
    assert_eq!(a.sibling("Bar"), Name::new("urn:a", "Bar"));
}

// =============================================================================
// Values
// =============================================================================

#[test]
fn string_and_name_values_are_distinct() {
    let text = Value::from("Foo");
    let name = Value::from(Name::builtin("Foo"));
    assert_ne!(text, name);
    assert_eq!(text.text(), "Foo");
    assert_eq!(name.text(), "Foo");
    assert_eq!(text.as_str(), Some("Foo"));
    assert!(text.as_name().is_none());
    assert_eq!(name.as_name(), Some(&Name::builtin("Foo")));
}

// =============================================================================
// Identifier Keys
// =============================================================================

#[test]
fn keys_ignore_component_order() {
    let a = IdentifierKey::from_components([
        (Name::builtin("name"), Value::from("x")),
        (Name::builtin("version"), Value::from("1")),
    ]);
    let b = IdentifierKey::from_components([
        (Name::builtin("version"), Value::from("1")),
        (Name::builtin("name"), Value::from("x")),
    ]);
    assert_eq!(a, b);
    assert_eq!(a.len(), 2);
}

#[test]
fn single_component_keys() {
    let key = IdentifierKey::single(Name::builtin("name"), Name::builtin("Foo"));
    assert_eq!(key.get(&Name::builtin("name")), Some(&Value::from(Name::builtin("Foo"))));
    assert!(key.get(&Name::builtin("other")).is_none());
    assert!(!key.is_empty());
}

// =============================================================================
// Scopes and Locations
// =============================================================================

#[test]
fn scopes_round_trip_through_keywords() {
    for scope in [Scope::Global, Scope::Parent] {
        assert_eq!(scope.as_str().parse::<Scope>().unwrap(), scope);
    }
}

#[test]
fn locations_display_source_line_and_column() {
    let location = SourceLocation::new("model.axiom", 3, 7);
    assert_eq!(location.to_string(), "model.axiom[3:7]");
    assert_eq!(location.moved_to(4, 1).to_string(), "model.axiom[4:1]");
}
