//! Integration tests for Layer 3: Reactor
//!
//! Tests end-to-end compilation: forward references, inheritance, failure
//! reporting, convergence properties, and extension points.

#![recursion_limit = "256"]

mod extensions;
mod failures;
mod properties;
mod resolution;

use schemata_foundation::Result;
use schemata_model::SchemaContext;
use schemata_reactor::compile;
use schemata_source::TextSource;

/// Compiles one text document against the base language.
pub fn compile_text(text: &str) -> Result<SchemaContext> {
    compile(&[&TextSource::new("test.axiom", text)])
}
