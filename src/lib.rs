//! Schemata - Self-describing schema definition language
//!
//! This crate re-exports all layers of the Schemata system for convenient access.
//! For detailed documentation, see the individual layer crates.
//!
//! # Architecture
//!
//! ```text
//! Layer 3: schemata_reactor    - Rules, fixpoint driver, assembly, base language
//! Layer 2: schemata_source     - Statement streaming, text reader, in-memory trees
//! Layer 1: schemata_model      - Type/item/identifier definitions, schema context
//! Layer 0: schemata_foundation - Core types (Name, Value, IdentifierKey, Error)
//! ```

pub use schemata_foundation as foundation;
pub use schemata_model as model;
pub use schemata_reactor as reactor;
pub use schemata_source as source;

pub use schemata_reactor::{base_language, compile};
