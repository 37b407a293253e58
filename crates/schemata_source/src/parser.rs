//! Reader for the textual schema syntax.
//!
//! ```text
//! document  := statement*
//! statement := keyword value? ( ";" | "{" statement* "}" )
//! value     := word | string
//! ```
//!
//! Keywords are resolved through the [`NameResolver`]; values are handed to
//! the listener raw, since only the listener knows the item's type.

use std::sync::Arc;

use schemata_foundation::{Error, Result, SourceLocation};

use crate::lexer::Lexer;
use crate::token::{Token, TokenKind};
use crate::{NameResolver, StatementListener, StatementSource};

/// A named chunk of schema text.
#[derive(Clone, Debug)]
pub struct TextSource {
    name: Arc<str>,
    text: Arc<str>,
}

impl TextSource {
    /// Creates a source from its name and text.
    #[must_use]
    pub fn new(name: impl Into<Arc<str>>, text: impl Into<Arc<str>>) -> Self {
        Self {
            name: name.into(),
            text: text.into(),
        }
    }

    /// The raw text.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }
}

impl StatementSource for TextSource {
    fn name(&self) -> &str {
        &self.name
    }

    fn stream(
        &self,
        resolver: &dyn NameResolver,
        listener: &mut dyn StatementListener,
    ) -> Result<()> {
        let mut parser = Parser::new(&self.name, &self.text, resolver);
        parser.parse_document(listener)
    }
}

// =============================================================================
// Parser
// =============================================================================

struct Parser<'src> {
    source: Arc<str>,
    lexer: Lexer<'src>,
    current: Token,
    resolver: &'src dyn NameResolver,
}

impl<'src> Parser<'src> {
    fn new(source: &Arc<str>, text: &'src str, resolver: &'src dyn NameResolver) -> Self {
        let mut lexer = Lexer::new(text);
        let current = lexer.next_token();
        Self {
            source: Arc::clone(source),
            lexer,
            current,
            resolver,
        }
    }

    fn location(&self, token: &Token) -> SourceLocation {
        SourceLocation::new(Arc::clone(&self.source), token.line, token.column)
    }

    fn bump(&mut self) -> Token {
        let next = self.lexer.next_token();
        std::mem::replace(&mut self.current, next)
    }

    fn error(&self, token: &Token, expected: &str) -> Error {
        let message = match &token.kind {
            TokenKind::Error(e) => e.clone(),
            other => format!("expected {expected}, found {}", other.describe()),
        };
        Error::syntax(message, self.location(token))
    }

    fn parse_document(&mut self, listener: &mut dyn StatementListener) -> Result<()> {
        while self.current.kind != TokenKind::Eof {
            self.parse_statement(listener)?;
        }
        Ok(())
    }

    fn parse_statement(&mut self, listener: &mut dyn StatementListener) -> Result<()> {
        let start = self.bump();
        let TokenKind::Word(keyword) = &start.kind else {
            return Err(self.error(&start, "a keyword"));
        };
        let keyword = self.resolver.resolve_text(keyword);
        listener.start_statement(keyword, self.location(&start))?;

        let raw = match &self.current.kind {
            TokenKind::Word(raw) | TokenKind::String(raw) => Some(raw.clone()),
            _ => None,
        };
        if let Some(raw) = raw {
            let token = self.bump();
            listener.value(&raw, self.location(&token))?;
        }

        let terminator = self.bump();
        match terminator.kind {
            TokenKind::Semicolon => {}
            TokenKind::LBrace => loop {
                match self.current.kind {
                    TokenKind::RBrace => {
                        self.bump();
                        break;
                    }
                    TokenKind::Eof => return Err(self.error(&self.current, "'}'")),
                    _ => self.parse_statement(listener)?,
                }
            },
            _ => return Err(self.error(&terminator, "';' or '{'")),
        }
        listener.end_statement(self.location(&terminator))
    }
}
