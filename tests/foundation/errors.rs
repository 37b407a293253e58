//! Integration tests for Error types
//!
//! Tests error construction, display, and locations.

use schemata_foundation::{Error, ErrorKind, IdentifierKey, Name, Scope, SourceLocation};

fn loc(line: u32) -> SourceLocation {
    SourceLocation::new("test.axiom", line, 5)
}

// =============================================================================
// Error Construction
// =============================================================================

#[test]
fn error_duplicate_identifier() {
    let key = IdentifierKey::single(Name::builtin("name"), Name::builtin("x"));
    let space = Name::builtin("AxiomItemDefinition");
    let err = Error::duplicate_identifier(space, key, loc(4), loc(3));
    assert!(matches!(err.kind, ErrorKind::DuplicateIdentifier { .. }));
    let msg = err.to_string();
    assert!(msg.contains("AxiomItemDefinition"));
    assert!(msg.contains("test.axiom[4:5]"));
    assert!(msg.contains("test.axiom[3:5]"));
    assert_eq!(err.location(), Some(&loc(4)));
}

#[test]
fn error_unresolved_lists_every_message() {
    let err = Error::unresolved(vec!["first".to_string(), "second".to_string()]);
    let msg = err.to_string();
    assert!(msg.starts_with("can not complete models"));
    assert!(msg.contains("first"));
    assert!(msg.contains("second"));
    assert!(err.location().is_none());
}

#[test]
fn error_scope_violation() {
    let err = Error::scope_violation(Scope::Parent, vec![Scope::Global]);
    let msg = err.to_string();
    assert!(msg.contains("parent"));
    assert!(msg.contains("global"));
}

#[test]
fn error_unknown_item_names_parent() {
    let err = Error::unknown_item(Name::builtin("colour"), Some(Name::builtin("Car")), loc(1));
    let msg = err.to_string();
    assert!(msg.contains("colour"));
    assert!(msg.contains("Car"));
}

#[test]
fn error_pass_limit() {
    let err = Error::pass_limit(8);
    assert!(matches!(err.kind, ErrorKind::PassLimitExceeded { limit: 8 }));
    assert!(err.to_string().contains('8'));
}

#[test]
fn error_malformed_and_syntax_carry_locations() {
    let malformed = Error::malformed("invalid minOccurs: many", loc(2));
    assert!(malformed.to_string().starts_with("test.axiom[2:5]"));
    let syntax = Error::syntax("unexpected '}'", loc(9));
    assert_eq!(syntax.location(), Some(&loc(9)));
    assert!(syntax.to_string().contains("syntax error"));
}
