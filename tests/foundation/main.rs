//! Integration tests for Layer 0: Foundation
//!
//! Tests for core types: Name, Value, IdentifierKey, Scope, and Error.

mod errors;
mod values;
