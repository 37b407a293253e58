//! Integration tests for the text lexer and reader

use schemata_foundation::{ErrorKind, Name, Result, SourceLocation};
use schemata_source::{
    DefaultResolver, Lexer, NameResolver, StatementListener, StatementSource, TextSource,
    TokenKind,
};

/// Records keywords, values, and statement ends.
#[derive(Default)]
struct Events(Vec<String>);

impl StatementListener for Events {
    fn start_statement(&mut self, keyword: Name, _location: SourceLocation) -> Result<()> {
        self.0.push(format!("{keyword:?}"));
        Ok(())
    }

    fn value(&mut self, raw: &str, _location: SourceLocation) -> Result<()> {
        self.0.push(format!("={raw}"));
        Ok(())
    }

    fn end_statement(&mut self, _location: SourceLocation) -> Result<()> {
        self.0.push(".".to_string());
        Ok(())
    }
}

fn stream(text: &str, resolver: &dyn NameResolver) -> Result<Vec<String>> {
    let mut events = Events::default();
    TextSource::new("doc.axiom", text).stream(resolver, &mut events)?;
    Ok(events.0)
}

// =============================================================================
// Lexing
// =============================================================================

#[test]
fn lexer_skips_comments() {
    let kinds: Vec<_> = Lexer::tokenize_all("// line\ntype /* block */ Foo;")
        .into_iter()
        .map(|t| t.kind)
        .collect();
    assert_eq!(
        kinds,
        vec![
            TokenKind::Word("type".to_string()),
            TokenKind::Word("Foo".to_string()),
            TokenKind::Semicolon,
            TokenKind::Eof,
        ]
    );
}

#[test]
fn lexer_tracks_positions() {
    let tokens = Lexer::tokenize_all("a\n  b");
    assert_eq!((tokens[0].line, tokens[0].column), (1, 1));
    assert_eq!((tokens[1].line, tokens[1].column), (2, 3));
}

// =============================================================================
// Reading
// =============================================================================

#[test]
fn comments_do_not_produce_statements() {
    let events = stream("model m { // trailing\n /* nothing */ }", &DefaultResolver).unwrap();
    assert_eq!(events.len(), 3);
}

#[test]
fn prefixed_keywords_resolve_to_namespaces() {
    struct Prefixes;

    impl NameResolver for Prefixes {
        fn resolve(&self, prefix: Option<&str>, local: &str) -> Name {
            match prefix {
                Some("ex") => Name::new("https://example.com/ns", local),
                Some(other) => Name::new(other, local),
                None => Name::builtin(local),
            }
        }
    }

    let mut events = Events::default();
    TextSource::new("doc", "ex:thing a;")
        .stream(&Prefixes, &mut events)
        .unwrap();
    let expected = format!("{:?}", Name::new("https://example.com/ns", "thing"));
    assert_eq!(events.0[0], expected);
    assert_eq!(events.0[1], "=a");
}

#[test]
fn unterminated_block_is_a_syntax_error_at_eof() {
    let err = stream("model m {\n  type Foo;\n", &DefaultResolver).unwrap_err();
    assert!(matches!(err.kind, ErrorKind::Syntax { .. }));
    assert_eq!(err.location().map(SourceLocation::source), Some("doc.axiom"));
}

#[test]
fn unterminated_string_is_a_syntax_error() {
    let err = stream("documentation \"open;", &DefaultResolver).unwrap_err();
    assert!(matches!(err.kind, ErrorKind::Syntax { .. }));
}

#[test]
fn listener_errors_stop_the_stream() {
    struct Refuse;

    impl StatementListener for Refuse {
        fn start_statement(&mut self, keyword: Name, location: SourceLocation) -> Result<()> {
            Err(schemata_foundation::Error::unknown_item(keyword, None, location))
        }

        fn value(&mut self, _raw: &str, _location: SourceLocation) -> Result<()> {
            Ok(())
        }

        fn end_statement(&mut self, _location: SourceLocation) -> Result<()> {
            Ok(())
        }
    }

    let err = TextSource::new("doc", "schema s;")
        .stream(&DefaultResolver, &mut Refuse)
        .unwrap_err();
    assert!(matches!(err.kind, ErrorKind::UnknownItem { .. }));
}
