//! Type, item, and identifier definitions plus the immutable schema context.
//!
//! This crate provides:
//! - [`TypeDefinition`] - Named types with single inheritance and ordered items
//! - [`ItemDefinition`] - What a child statement may contain and how often
//! - [`IdentifierDefinition`] - Composite-key uniqueness rules
//! - [`Statement`] - A frozen statement tree
//! - [`SchemaContext`] - The final, queryable result of a compilation
//! - [`builtin`] - The hard-coded bootstrap schema

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod builtin;
pub mod context;
pub mod definition;
pub mod names;
pub mod statement;

pub use context::{Resolved, SchemaContext, SchemaContextBuilder};
pub use definition::{IdentifierDefinition, ItemDefinition, TypeDefinition};
pub use statement::Statement;
