//! # Beliefnet - Exact discrete Bayesian network inference
//!
//! Beliefnet performs exact probabilistic inference over discrete Bayesian
//! networks by brute-force enumeration: every variable has a finite domain
//! and a conditional probability table keyed by its parents' joint
//! assignment, and posteriors are computed by summing the joint distribution
//! over all assignments consistent with the evidence.
//!
//! ## Architecture
//!
//! The system is organized into several modules:
//!
//! - **engine**: Core network representation and the enumeration engine
//! - **frontend**: JSON network-document parsing and validation
//! - **samples**: Built-in sprinkler and fraud-review networks
//! - **triage**: Ranking of fraud-review cases by posterior risk
//!
//! ## Usage
//!
//! ```rust,ignore
//! use beliefnet::{load_network, Evidence};
//!
//! let net = load_network("nets/sprinkler.json")?;
//! let mut evidence = Evidence::default();
//! evidence.insert("Rain".into(), "T".into());
//! let dist = net.posterior("WetGrass", &evidence)?;
//! println!("P(WetGrass = T | Rain = T) = {:.3}", dist["T"]);
//! ```
//!
//! Enumeration is exponential in the number of unassigned variables; this
//! crate deliberately stops short of variable elimination and is meant for
//! small networks.

#![forbid(unsafe_code)]

pub mod engine;
pub mod frontend;
pub mod samples;
pub mod triage;

// Re-export commonly used types
pub use engine::errors::InferError;
pub use engine::infer::{joint_probability, lookup, posterior};
pub use engine::network::{CptRow, Evidence, Network, Variable};
pub use frontend::document::NetworkDocument;
pub use frontend::validate::compile_document;

use std::path::Path;

/// Parses a network document from a JSON string and compiles it into a
/// validated [`Network`].
///
/// # Errors
///
/// * [`InferError::Parse`] - the JSON is malformed
/// * [`InferError::Validation`] - the document describes an ill-formed
///   network (see [`compile_document`])
pub fn load_network_str(json: &str) -> Result<Network, InferError> {
    let doc = NetworkDocument::from_json(json)?;
    compile_document(&doc)
}

/// Reads, parses, and compiles a network document from a file.
///
/// This is the loading entry point collaborators are expected to use; the
/// engine itself never performs I/O during inference.
///
/// # Errors
///
/// * [`InferError::Parse`] - the file cannot be read or the JSON is malformed
/// * [`InferError::Validation`] - the document describes an ill-formed network
pub fn load_network(path: impl AsRef<Path>) -> Result<Network, InferError> {
    let doc = NetworkDocument::from_path(path)?;
    compile_document(&doc)
}
