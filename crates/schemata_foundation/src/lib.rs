//! Core names, values, identifier keys, and errors for Schemata.
//!
//! This crate provides:
//! - [`Name`] - Namespaced identifiers used as map keys throughout
//! - [`SourceLocation`] - Where a statement came from, for diagnostics
//! - [`Value`] - Scalar statement values
//! - [`IdentifierKey`] - Composite keys for identifier spaces
//! - [`Scope`] - Where an identifier may be registered
//! - [`Error`] - Rich error types with source locations

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod error;
pub mod key;
pub mod location;
pub mod name;
pub mod scope;
pub mod value;

pub use error::{Error, ErrorKind, Result};
pub use key::IdentifierKey;
pub use location::SourceLocation;
pub use name::{LANGUAGE_NAMESPACE, Name};
pub use scope::Scope;
pub use value::Value;
