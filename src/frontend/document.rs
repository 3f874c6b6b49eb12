//! Serde model of the network document.
//!
//! A network is described by a structured JSON document with three top-level
//! fields:
//!
//! ```json
//! {
//!   "nodes":   { "Rain": ["T", "F"] },
//!   "parents": { "Rain": ["Cloudy"] },
//!   "tables":  { "Rain": [[["T"], [0.8, 0.2]], [["F"], [0.2, 0.8]]] }
//! }
//! ```
//!
//! `nodes` maps each variable to its ordered domain, `parents` to its
//! ordered parent list (empty for roots), and `tables` to its CPT rows. Each
//! row is a two-element array pairing an ordered parent-value assignment
//! with a probability vector aligned to the variable's domain order.
//!
//! The document is the only persistence format: it carries exactly the
//! evidence needed to reconstruct a network in memory.

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::engine::errors::InferError;

/// One CPT row as it appears on the wire: `[[parent values], [probabilities]]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableRow(pub Vec<String>, pub Vec<f64>);

/// The parsed, not-yet-validated network document.
///
/// Maps use `BTreeMap` so serialization is deterministic. Use
/// [`crate::frontend::validate::compile_document`] (or [`crate::load_network`])
/// to turn a document into a queryable network.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NetworkDocument {
    /// Variable name to ordered domain.
    pub nodes: BTreeMap<String, Vec<String>>,
    /// Variable name to ordered parent names.
    pub parents: BTreeMap<String, Vec<String>>,
    /// Variable name to CPT rows.
    pub tables: BTreeMap<String, Vec<TableRow>>,
}

impl NetworkDocument {
    /// Parses a document from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, InferError> {
        serde_json::from_str(json).map_err(|e| InferError::Parse(e.to_string()))
    }

    /// Reads and parses a document from a file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, InferError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|e| {
            InferError::Parse(format!("cannot read '{}': {e}", path.display()))
        })?;
        Self::from_json(&json)
    }

    /// Serializes the document to pretty-printed JSON.
    pub fn to_json_pretty(&self) -> Result<String, InferError> {
        serde_json::to_string_pretty(self).map_err(|e| InferError::Parse(e.to_string()))
    }
}
