//! Programmatically built documents.
//!
//! A [`SourceTree`] streams statements built in code rather than parsed from
//! text. Nodes carry already-resolved keywords, so the resolver is unused.
//! Locations are synthetic: the line is the node's depth-first index and the
//! column its depth, both 1-based.

use std::sync::Arc;

use schemata_foundation::{Name, Result, SourceLocation};

use crate::{NameResolver, StatementListener, StatementSource};

/// One statement in a [`SourceTree`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SourceNode {
    keyword: Name,
    value: Option<String>,
    children: Vec<SourceNode>,
}

impl SourceNode {
    /// Creates a statement without a value.
    #[must_use]
    pub fn new(keyword: Name) -> Self {
        Self {
            keyword,
            value: None,
            children: Vec::new(),
        }
    }

    /// Creates a statement in the built-in namespace with a raw value.
    #[must_use]
    pub fn builtin(keyword: &str, value: impl Into<String>) -> Self {
        Self::new(Name::builtin(keyword)).with_value(value)
    }

    /// Sets the raw value.
    #[must_use]
    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.value = Some(value.into());
        self
    }

    /// Appends a child statement.
    #[must_use]
    pub fn with_child(mut self, child: SourceNode) -> Self {
        self.children.push(child);
        self
    }

    /// The keyword.
    #[must_use]
    pub fn keyword(&self) -> &Name {
        &self.keyword
    }

    /// The raw value.
    #[must_use]
    pub fn value(&self) -> Option<&str> {
        self.value.as_deref()
    }

    /// Child statements.
    #[must_use]
    pub fn children(&self) -> &[SourceNode] {
        &self.children
    }
}

/// A named document built from [`SourceNode`]s.
#[derive(Clone, Debug)]
pub struct SourceTree {
    name: Arc<str>,
    roots: Vec<SourceNode>,
}

impl SourceTree {
    /// Creates an empty document.
    #[must_use]
    pub fn new(name: impl Into<Arc<str>>) -> Self {
        Self {
            name: name.into(),
            roots: Vec::new(),
        }
    }

    /// Appends a root statement.
    #[must_use]
    pub fn with_root(mut self, root: SourceNode) -> Self {
        self.roots.push(root);
        self
    }

    /// Root statements.
    #[must_use]
    pub fn roots(&self) -> &[SourceNode] {
        &self.roots
    }

    fn emit(
        &self,
        node: &SourceNode,
        depth: u32,
        index: &mut u32,
        listener: &mut dyn StatementListener,
    ) -> Result<()> {
        *index += 1;
        let location = SourceLocation::new(Arc::clone(&self.name), *index, depth + 1);
        listener.start_statement(node.keyword.clone(), location.clone())?;
        if let Some(value) = &node.value {
            listener.value(value, location.clone())?;
        }
        for child in &node.children {
            self.emit(child, depth + 1, index, listener)?;
        }
        listener.end_statement(location)
    }
}

impl StatementSource for SourceTree {
    fn name(&self) -> &str {
        &self.name
    }

    fn stream(
        &self,
        _resolver: &dyn NameResolver,
        listener: &mut dyn StatementListener,
    ) -> Result<()> {
        let mut index = 0;
        for root in &self.roots {
            self.emit(root, 0, &mut index, listener)?;
        }
        Ok(())
    }
}
