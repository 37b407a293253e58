//! Lexer for the textual schema syntax.
//!
//! The lexer converts source text into a stream of tokens. Comments
//! (`// ...` and `/* ... */`) are skipped together with whitespace.

use crate::token::{Token, TokenKind};

/// Lexer for schema source text.
pub struct Lexer<'src> {
    /// Remaining source text.
    rest: &'src str,
    /// Current line number (1-based).
    line: u32,
    /// Current column number (1-based).
    column: u32,
}

impl<'src> Lexer<'src> {
    /// Creates a new lexer for the given source.
    #[must_use]
    pub fn new(source: &'src str) -> Self {
        Self {
            rest: source,
            line: 1,
            column: 1,
        }
    }

    /// Returns the next token from the source.
    pub fn next_token(&mut self) -> Token {
        if let Some(error) = self.skip_trivia() {
            return error;
        }

        let line = self.line;
        let column = self.column;

        let Some(c) = self.peek_char() else {
            return Token::new(TokenKind::Eof, line, column);
        };

        let kind = match c {
            '{' => {
                self.advance();
                TokenKind::LBrace
            }
            '}' => {
                self.advance();
                TokenKind::RBrace
            }
            ';' => {
                self.advance();
                TokenKind::Semicolon
            }
            '"' => self.scan_string(),
            _ => self.scan_word(),
        };

        Token::new(kind, line, column)
    }

    /// Tokenizes all source, ending with `Eof`.
    #[must_use]
    pub fn tokenize_all(source: &str) -> Vec<Token> {
        let mut lexer = Lexer::new(source);
        let mut tokens = Vec::new();
        loop {
            let token = lexer.next_token();
            let is_eof = token.kind == TokenKind::Eof;
            tokens.push(token);
            if is_eof {
                break;
            }
        }
        tokens
    }

    fn peek_char(&self) -> Option<char> {
        self.rest.chars().next()
    }

    fn advance(&mut self) {
        if let Some(c) = self.peek_char() {
            self.rest = &self.rest[c.len_utf8()..];
            if c == '\n' {
                self.line += 1;
                self.column = 1;
            } else {
                self.column += 1;
            }
        }
    }

    /// Skips whitespace and comments. Returns an error token for an
    /// unterminated block comment.
    fn skip_trivia(&mut self) -> Option<Token> {
        loop {
            if self.rest.starts_with("//") {
                while let Some(c) = self.peek_char() {
                    if c == '\n' {
                        break;
                    }
                    self.advance();
                }
            } else if self.rest.starts_with("/*") {
                let (line, column) = (self.line, self.column);
                self.advance();
                self.advance();
                loop {
                    if self.rest.starts_with("*/") {
                        self.advance();
                        self.advance();
                        break;
                    }
                    if self.rest.is_empty() {
                        return Some(Token::new(
                            TokenKind::Error("unterminated block comment".into()),
                            line,
                            column,
                        ));
                    }
                    self.advance();
                }
            } else if self.peek_char().is_some_and(char::is_whitespace) {
                self.advance();
            } else {
                return None;
            }
        }
    }

    /// Scans a double-quoted string.
    fn scan_string(&mut self) -> TokenKind {
        self.advance(); // opening quote
        let mut text = String::new();
        loop {
            match self.peek_char() {
                Some('"') => {
                    self.advance();
                    return TokenKind::String(text);
                }
                Some('\\') => {
                    self.advance();
                    let escaped = match self.peek_char() {
                        Some('n') => '\n',
                        Some('t') => '\t',
                        Some('\\') => '\\',
                        Some('"') => '"',
                        Some(c) => {
                            return TokenKind::Error(format!("invalid escape sequence: \\{c}"));
                        }
                        None => {
                            return TokenKind::Error(
                                "unexpected end of input in string escape".into(),
                            );
                        }
                    };
                    self.advance();
                    text.push(escaped);
                }
                Some(c) => {
                    self.advance();
                    text.push(c);
                }
                None => return TokenKind::Error("unterminated string literal".into()),
            }
        }
    }

    /// Scans a bare word up to whitespace or a delimiter.
    fn scan_word(&mut self) -> TokenKind {
        let mut text = String::new();
        while let Some(c) = self.peek_char() {
            if c.is_whitespace() || matches!(c, '{' | '}' | ';' | '"') {
                break;
            }
            text.push(c);
            self.advance();
        }
        TokenKind::Word(text)
    }
}
