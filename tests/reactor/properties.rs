//! Property tests for convergence and assembly

use proptest::prelude::*;
use schemata_reactor::{Reactor, base_language};
use schemata_source::TextSource;

use crate::compile_text;

const TYPES: [&str; 6] = [
    "type A { item a { type B; } }",
    "type B { supertype C; item b { type string; maxOccurs 1; } }",
    "type C { argument name; item name { type AxiomName; } }",
    "type D { supertype B; item d { type A; minOccurs 1; } }",
    "type E;",
    "type F { item e { type E; } item f { type F; } }",
];

fn model(order: &[&str]) -> String {
    format!("model m {{\n{}\n}}", order.join("\n"))
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn declaration_order_does_not_matter(order in Just(TYPES.to_vec()).prop_shuffle()) {
        let expected = compile_text(&model(&TYPES)).unwrap();
        let actual = compile_text(&model(&order)).unwrap();
        prop_assert_eq!(actual, expected);
    }
}

#[test]
fn assembly_is_repeatable() {
    let mut reactor = Reactor::new(base_language().unwrap());
    reactor
        .load(&TextSource::new("test", model(&TYPES)))
        .unwrap();
    let first = reactor.compute_schema_context().unwrap();
    let second = reactor.assemble().unwrap();
    let third = reactor.assemble().unwrap();
    assert_eq!(first, second);
    assert_eq!(second, third);
}

#[test]
fn compiled_contexts_are_shareable() {
    fn assert_send_sync<T: Send + Sync>(_: &T) {}
    let context = compile_text(&model(&TYPES)).unwrap();
    assert_send_sync(&context);
    let handle = std::thread::spawn(move || context.types().count());
    assert!(handle.join().unwrap() > 0);
}
