//! The inference engine for discrete Bayesian networks.
//!
//! This module provides:
//! - **errors**: Error types for construction and query failures
//! - **network**: The network data model with eager structural validation
//! - **infer**: Exact inference by enumeration (lookup, joint, posterior)

pub mod errors;
pub mod infer;
pub mod network;
