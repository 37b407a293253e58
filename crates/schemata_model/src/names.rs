//! Well-known names of the built-in schema language.

use std::sync::LazyLock;

use schemata_foundation::Name;

/// Built-in type names.
pub mod types {
    use super::{LazyLock, Name};

    /// Plain string values.
    pub static STRING: LazyLock<Name> = LazyLock::new(|| Name::builtin("string"));
    /// UUID values.
    pub static UUID: LazyLock<Name> = LazyLock::new(|| Name::builtin("uuid"));
    /// Identifier values; raw values of this type become [`Name`]s.
    pub static IDENTIFIER: LazyLock<Name> = LazyLock::new(|| Name::builtin("AxiomName"));
    /// A reference to a type by name.
    pub static TYPE_REFERENCE: LazyLock<Name> =
        LazyLock::new(|| Name::builtin("AxiomTypeReference"));
    /// Common base of named definitions.
    pub static BASE_DEFINITION: LazyLock<Name> =
        LazyLock::new(|| Name::builtin("AxiomBaseDefinition"));
    /// A schema document.
    pub static MODEL: LazyLock<Name> = LazyLock::new(|| Name::builtin("AxiomModel"));
    /// A type definition statement.
    pub static TYPE_DEFINITION: LazyLock<Name> =
        LazyLock::new(|| Name::builtin("AxiomTypeDefinition"));
    /// An item definition statement.
    pub static ITEM_DEFINITION: LazyLock<Name> =
        LazyLock::new(|| Name::builtin("AxiomItemDefinition"));
    /// A root item definition statement.
    pub static ROOT_DEFINITION: LazyLock<Name> =
        LazyLock::new(|| Name::builtin("AxiomRootDefinition"));
    /// An identifier definition statement.
    pub static IDENTIFIER_DEFINITION: LazyLock<Name> =
        LazyLock::new(|| Name::builtin("AxiomIdentifierDefinition"));
}

/// Built-in item names (statement keywords).
pub mod items {
    use super::{LazyLock, Name};

    /// `name`
    pub static NAME: LazyLock<Name> = LazyLock::new(|| Name::builtin("name"));
    /// `documentation`
    pub static DOCUMENTATION: LazyLock<Name> = LazyLock::new(|| Name::builtin("documentation"));
    /// `namespace`
    pub static NAMESPACE: LazyLock<Name> = LazyLock::new(|| Name::builtin("namespace"));
    /// `version`
    pub static VERSION: LazyLock<Name> = LazyLock::new(|| Name::builtin("version"));
    /// `model`, the document root.
    pub static MODEL: LazyLock<Name> = LazyLock::new(|| Name::builtin("model"));
    /// `type`: a type definition inside a model, a type reference inside an item.
    pub static TYPE: LazyLock<Name> = LazyLock::new(|| Name::builtin("type"));
    /// `root`
    pub static ROOT: LazyLock<Name> = LazyLock::new(|| Name::builtin("root"));
    /// `item`
    pub static ITEM: LazyLock<Name> = LazyLock::new(|| Name::builtin("item"));
    /// `supertype`
    pub static SUPERTYPE: LazyLock<Name> = LazyLock::new(|| Name::builtin("supertype"));
    /// `argument`
    pub static ARGUMENT: LazyLock<Name> = LazyLock::new(|| Name::builtin("argument"));
    /// `identifier`
    pub static IDENTIFIER: LazyLock<Name> = LazyLock::new(|| Name::builtin("identifier"));
    /// `minOccurs`
    pub static MIN_OCCURS: LazyLock<Name> = LazyLock::new(|| Name::builtin("minOccurs"));
    /// `maxOccurs`
    pub static MAX_OCCURS: LazyLock<Name> = LazyLock::new(|| Name::builtin("maxOccurs"));
    /// `operational`
    pub static OPERATIONAL: LazyLock<Name> = LazyLock::new(|| Name::builtin("operational"));
    /// `key`
    pub static KEY: LazyLock<Name> = LazyLock::new(|| Name::builtin("key"));
    /// `scope`
    pub static SCOPE: LazyLock<Name> = LazyLock::new(|| Name::builtin("scope"));
    /// `space`
    pub static SPACE: LazyLock<Name> = LazyLock::new(|| Name::builtin("space"));
}

/// Built-in identifier spaces.
pub mod spaces {
    use super::{LazyLock, Name};

    /// Global space of type definitions, keyed by `name`.
    pub static TYPES: LazyLock<Name> = LazyLock::new(|| Name::builtin("AxiomTypeDefinition"));
    /// Global space of root item definitions, keyed by `name`.
    pub static ROOTS: LazyLock<Name> = LazyLock::new(|| Name::builtin("AxiomRootDefinition"));
    /// Per-type space of item definitions, keyed by `name`.
    pub static ITEMS: LazyLock<Name> = LazyLock::new(|| Name::builtin("AxiomItemDefinition"));
}
