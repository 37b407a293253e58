//! Statement sources for Schemata.
//!
//! A statement source streams a document as depth-first events: a statement
//! starts (keyword + location), receives at most one raw value, and ends.
//! The reactor's tree builder is the usual listener.
//!
//! This crate provides:
//! - [`StatementSource`] / [`StatementListener`] - The streaming contract
//! - [`NameResolver`] - Turns `prefix:local` text into [`Name`]s
//! - [`TextSource`] - Reader for the textual schema syntax
//! - [`SourceTree`] - Programmatically built documents

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod lexer;
pub mod parser;
pub mod token;
pub mod tree;


pub use lexer::Lexer;
pub use parser::TextSource;
pub use token::{Token, TokenKind};
pub use tree::{SourceNode, SourceTree};

use schemata_foundation::{Name, Result, SourceLocation};

/// Receives statement events from a [`StatementSource`].
pub trait StatementListener {
    /// A new statement starts as a child of the current one.
    ///
    /// # Errors
    /// Returns an error if the keyword is not allowed at this position.
    fn start_statement(&mut self, keyword: Name, location: SourceLocation) -> Result<()>;

    /// The current statement has a raw scalar value.
    ///
    /// # Errors
    /// Returns an error if the value cannot be accepted.
    fn value(&mut self, raw: &str, location: SourceLocation) -> Result<()>;

    /// The current statement ends.
    ///
    /// # Errors
    /// Returns an error if the statement cannot be closed.
    fn end_statement(&mut self, location: SourceLocation) -> Result<()>;
}

/// A document that can be streamed into a [`StatementListener`].
pub trait StatementSource {
    /// Name of the source, used in locations.
    fn name(&self) -> &str;

    /// Streams every statement depth-first.
    ///
    /// # Errors
    /// Returns syntax errors from the source or any error the listener raises.
    fn stream(
        &self,
        resolver: &dyn NameResolver,
        listener: &mut dyn StatementListener,
    ) -> Result<()>;
}

/// Resolves identifier text to a namespaced [`Name`].
pub trait NameResolver {
    /// Resolves `prefix:local` (or bare `local` when `prefix` is `None`).
    fn resolve(&self, prefix: Option<&str>, local: &str) -> Name;

    /// Splits `text` at its first `:` and resolves the parts.
    fn resolve_text(&self, text: &str) -> Name {
        match text.split_once(':') {
            Some((prefix, local)) if !prefix.is_empty() && !local.is_empty() => {
                self.resolve(Some(prefix), local)
            }
            _ => self.resolve(None, text),
        }
    }
}

/// Maps bare identifiers into the built-in language namespace and
/// `prefix:local` into namespace `prefix`.
#[derive(Clone, Copy, Debug, Default)]
pub struct DefaultResolver;

impl NameResolver for DefaultResolver {
    fn resolve(&self, prefix: Option<&str>, local: &str) -> Name {
        match prefix {
            Some(prefix) => Name::new(prefix, local),
            None => Name::builtin(local),
        }
    }
}
