//! The Schemata reactor: fixpoint resolution of schema documents.
//!
//! Statements are loaded from [`StatementSource`]s into mutable statement
//! contexts. Rules attach to each context as it is created, declare
//! [`Requirement`]s, and run once those are satisfied. The [`Reactor`]
//! repeats passes until nothing more completes, then an [`Assembler`] freezes
//! the result into a [`SchemaContext`].
//!
//! This crate provides:
//! - [`Requirement`] - Lazily checked dependencies
//! - [`IdentifierSpaceHolder`] - Uniqueness-enforcing identifier spaces
//! - [`ReactorState`] / [`StatementContext`] - In-progress statements
//! - [`StatementRule`] - The rule catalog contract, plus the built-in [`rules`]
//! - [`StatementFactory`] - Resolved representations per type
//! - [`Reactor`] - The fixpoint driver
//! - [`base_language`] - The compiled base-language schema
//!
//! # Example
//!
//! ```
//! use schemata_foundation::Name;
//! use schemata_reactor::compile;
//! use schemata_source::TextSource;
//!
//! let source = TextSource::new(
//!     "example",
//!     "model example { type Person { item name { type string; } } }",
//! );
//! let context = compile(&[&source]).unwrap();
//! assert!(context.get_type(&Name::builtin("Person")).is_some());
//! ```
//!
//! [`StatementSource`]: schemata_source::StatementSource
//! [`SchemaContext`]: schemata_model::SchemaContext

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![recursion_limit = "256"]

pub mod assemble;
pub mod config;
pub mod factory;
pub mod reactor;
pub mod requirement;
pub mod rule;
pub mod rules;
pub mod space;
pub mod statement;

use std::sync::LazyLock;

use schemata_foundation::{Error, Result};
use schemata_model::SchemaContext;
use schemata_source::{StatementSource, TextSource};

pub use assemble::Assembler;
pub use config::ReactorConfig;
pub use factory::{FactoryRegistry, StatementFactory};
pub use reactor::Reactor;
pub use requirement::Requirement;
pub use rule::{
    ActionBuilder, ActionContext, DepHandle, Dependency, FnRule, RuleLookup, StatementRule,
};
pub use space::IdentifierSpaceHolder;
pub use statement::{ContextId, ReactorState, StatementContext};

/// Source name of the base-language document.
pub const BASE_LANGUAGE_NAME: &str = "base.axiom";

/// Text of the base-language document.
pub const BASE_LANGUAGE_SOURCE: &str = include_str!("../lang/base.axiom");

static BASE_LANGUAGE: LazyLock<Result<SchemaContext>> = LazyLock::new(|| {
    let mut reactor = Reactor::bootstrap();
    reactor.load(&TextSource::new(BASE_LANGUAGE_NAME, BASE_LANGUAGE_SOURCE))?;
    reactor.compute_schema_context()
});

/// The base-language schema, compiled once against the bootstrap schema.
///
/// # Errors
/// Returns an internal error if the base-language document does not compile.
pub fn base_language() -> Result<SchemaContext> {
    match &*BASE_LANGUAGE {
        Ok(context) => Ok(context.clone()),
        Err(e) => Err(Error::internal(format!("base language does not compile: {e}"))),
    }
}

/// Compiles schema documents against the base language.
///
/// # Errors
/// Returns the first load error or the fixpoint failure.
pub fn compile(sources: &[&dyn StatementSource]) -> Result<SchemaContext> {
    let mut reactor = Reactor::new(base_language()?);
    for source in sources {
        reactor.load(*source)?;
    }
    reactor.compute_schema_context()
}
