//! Identifier spaces: uniqueness-enforcing registries.

use std::collections::BTreeMap;

use schemata_foundation::{Error, IdentifierKey, Name, Result, Scope, SourceLocation};
use tracing::debug;

use crate::statement::ContextId;

/// One registered statement.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SpaceEntry {
    /// The registered statement context.
    pub target: ContextId,
    /// Where the statement starts, for duplicate diagnostics.
    pub location: SourceLocation,
}

/// Key to entry mapping for one identifier space.
pub type Space = BTreeMap<IdentifierKey, SpaceEntry>;

/// Owns a set of identifier spaces and the scopes it accepts.
///
/// The reactor owns one global holder; each statement context may own a
/// local holder for keys that must be unique among its children. Spaces are
/// created on first use.
#[derive(Clone, Debug)]
pub struct IdentifierSpaceHolder {
    allowed: Vec<Scope>,
    spaces: BTreeMap<Name, Space>,
}

impl IdentifierSpaceHolder {
    /// Creates a holder accepting the given scopes.
    #[must_use]
    pub fn new(allowed: impl IntoIterator<Item = Scope>) -> Self {
        Self {
            allowed: allowed.into_iter().collect(),
            spaces: BTreeMap::new(),
        }
    }

    /// The reactor-wide holder.
    #[must_use]
    pub fn global() -> Self {
        Self::new([Scope::Global])
    }

    /// A holder scoped to one statement's children.
    #[must_use]
    pub fn local() -> Self {
        Self::new([Scope::Parent])
    }

    /// Scopes this holder accepts.
    #[must_use]
    pub fn allowed_scopes(&self) -> &[Scope] {
        &self.allowed
    }

    /// Registers `target` under `key` in `space`.
    ///
    /// # Errors
    /// Returns a scope violation if `scope` is not accepted here, or a
    /// duplicate identifier error naming both locations if `key` is taken.
    pub fn register(
        &mut self,
        space: &Name,
        scope: Scope,
        key: IdentifierKey,
        target: ContextId,
        location: &SourceLocation,
    ) -> Result<()> {
        if !self.allowed.contains(&scope) {
            return Err(Error::scope_violation(scope, self.allowed.clone()));
        }
        let entries = self.space(space);
        if let Some(previous) = entries.get(&key) {
            return Err(Error::duplicate_identifier(
                space.clone(),
                key,
                location.clone(),
                previous.location.clone(),
            ));
        }
        debug!(%space, %key, %scope, "registered identifier");
        entries.insert(
            key,
            SpaceEntry {
                target,
                location: location.clone(),
            },
        );
        Ok(())
    }

    /// Looks up a registered statement.
    #[must_use]
    pub fn lookup(&self, space: &Name, key: &IdentifierKey) -> Option<ContextId> {
        self.spaces
            .get(space)
            .and_then(|entries| entries.get(key))
            .map(|entry| entry.target)
    }

    /// Returns a space, creating it if absent.
    pub fn space(&mut self, name: &Name) -> &mut Space {
        self.spaces.entry(name.clone()).or_default()
    }

    /// Iterates over every space that has been created.
    pub fn spaces(&self) -> impl Iterator<Item = (&Name, &Space)> {
        self.spaces.iter()
    }
}
