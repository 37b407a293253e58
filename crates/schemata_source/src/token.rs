//! Token types for the textual schema syntax.

/// A token from lexical analysis.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Token {
    /// The type and value of this token.
    pub kind: TokenKind,
    /// 1-based line where the token starts.
    pub line: u32,
    /// 1-based column where the token starts.
    pub column: u32,
}

impl Token {
    /// Creates a new token.
    #[must_use]
    pub const fn new(kind: TokenKind, line: u32, column: u32) -> Self {
        Self { kind, line, column }
    }
}

/// Token types.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TokenKind {
    /// `{`
    LBrace,
    /// `}`
    RBrace,
    /// `;`
    Semicolon,
    /// A bare word: keyword, identifier, or unquoted value.
    Word(String),
    /// A double-quoted string, escapes already processed.
    String(String),
    /// A lexical error.
    Error(String),
    /// End of input.
    Eof,
}

impl TokenKind {
    /// Short description for error messages.
    #[must_use]
    pub fn describe(&self) -> String {
        match self {
            Self::LBrace => "'{'".to_string(),
            Self::RBrace => "'}'".to_string(),
            Self::Semicolon => "';'".to_string(),
            Self::Word(w) => format!("'{w}'"),
            Self::String(s) => format!("{s:?}"),
            Self::Error(e) => e.clone(),
            Self::Eof => "end of input".to_string(),
        }
    }
}
