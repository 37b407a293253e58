//! Frozen statement trees.

use std::collections::BTreeMap;
use std::sync::Arc;

use im::{OrdMap, Vector};
use schemata_foundation::{Name, SourceLocation, Value};

/// One resolved, immutable statement: keyword, optional value, children.
///
/// Children keep declaration order and are also indexed by keyword.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Statement {
    keyword: Name,
    value: Option<Value>,
    children: Vector<Arc<Statement>>,
    by_keyword: OrdMap<Name, Vector<usize>>,
    location: SourceLocation,
}

impl Statement {
    /// Creates a statement, indexing its children by keyword.
    #[must_use]
    pub fn new(
        keyword: Name,
        value: Option<Value>,
        children: impl IntoIterator<Item = Arc<Statement>>,
        location: SourceLocation,
    ) -> Self {
        let children: Vector<Arc<Statement>> = children.into_iter().collect();
        let mut by_keyword: BTreeMap<Name, Vector<usize>> = BTreeMap::new();
        for (index, child) in children.iter().enumerate() {
            by_keyword
                .entry(child.keyword.clone())
                .or_default()
                .push_back(index);
        }
        Self {
            keyword,
            value,
            children,
            by_keyword: by_keyword.into_iter().collect(),
            location,
        }
    }

    /// The statement keyword.
    #[must_use]
    pub fn keyword(&self) -> &Name {
        &self.keyword
    }

    /// The scalar value, if any.
    #[must_use]
    pub fn value(&self) -> Option<&Value> {
        self.value.as_ref()
    }

    /// All children, in declaration order.
    pub fn children(&self) -> impl Iterator<Item = &Arc<Statement>> {
        self.children.iter()
    }

    /// Children with the given keyword, in declaration order.
    pub fn children_named<'a>(
        &'a self,
        keyword: &Name,
    ) -> impl Iterator<Item = &'a Arc<Statement>> {
        self.by_keyword
            .get(keyword)
            .into_iter()
            .flat_map(|indices| indices.iter())
            .filter_map(|&i| self.children.get(i))
    }

    /// The first child with the given keyword.
    #[must_use]
    pub fn first(&self, keyword: &Name) -> Option<&Arc<Statement>> {
        self.children_named(keyword).next()
    }

    /// The value of the first child with the given keyword.
    #[must_use]
    pub fn first_value(&self, keyword: &Name) -> Option<&Value> {
        self.first(keyword).and_then(|c| c.value())
    }

    /// Where the statement starts.
    #[must_use]
    pub fn location(&self) -> &SourceLocation {
        &self.location
    }
}
