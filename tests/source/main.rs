//! Integration tests for Layer 2: Sources
//!
//! Tests the text reader, in-memory trees, and name resolution through the
//! streaming listener contract.

mod streaming;
mod text;
