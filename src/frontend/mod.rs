//! Network document loading.
//!
//! - **document**: serde model of the `nodes` / `parents` / `tables` JSON
//!   document
//! - **validate**: consistency checks and compilation of a document into a
//!   validated [`crate::engine::network::Network`]

pub mod document;
pub mod validate;
