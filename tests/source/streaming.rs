//! Integration tests comparing text and tree sources

use schemata_foundation::{Name, Result, SourceLocation};
use schemata_source::{
    DefaultResolver, SourceNode, SourceTree, StatementListener, StatementSource, TextSource,
};

/// Records the event sequence without locations.
#[derive(Default)]
struct Shape(Vec<String>);

impl StatementListener for Shape {
    fn start_statement(&mut self, keyword: Name, _location: SourceLocation) -> Result<()> {
        self.0.push(format!("<{keyword}"));
        Ok(())
    }

    fn value(&mut self, raw: &str, _location: SourceLocation) -> Result<()> {
        self.0.push(raw.to_string());
        Ok(())
    }

    fn end_statement(&mut self, _location: SourceLocation) -> Result<()> {
        self.0.push(">".to_string());
        Ok(())
    }
}

fn shape(source: &dyn StatementSource) -> Vec<String> {
    let mut shape = Shape::default();
    source.stream(&DefaultResolver, &mut shape).unwrap();
    shape.0
}

#[test]
fn tree_and_text_stream_the_same_events() {
    let text = TextSource::new(
        "text",
        "model m { type Foo { item bar { type string; } } type Baz; }",
    );
    let tree = SourceTree::new("tree").with_root(
        SourceNode::builtin("model", "m")
            .with_child(
                SourceNode::builtin("type", "Foo").with_child(
                    SourceNode::builtin("item", "bar")
                        .with_child(SourceNode::builtin("type", "string")),
                ),
            )
            .with_child(SourceNode::builtin("type", "Baz")),
    );
    assert_eq!(shape(&text), shape(&tree));
}

#[test]
fn tree_nodes_without_values() {
    let tree = SourceTree::new("tree")
        .with_root(SourceNode::new(Name::builtin("model")))
        .with_root(SourceNode::new(Name::builtin("model")).with_value("second"));
    assert_eq!(shape(&tree), vec!["<model", ">", "<model", "second", ">"]);
    assert_eq!(tree.roots().len(), 2);
    assert_eq!(tree.name(), "tree");
}
