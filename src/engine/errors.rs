//! Error types for network construction and inference.

use thiserror::Error;

/// Errors that can occur while loading a network or answering a query.
///
/// This enum is marked `#[non_exhaustive]` to allow adding new error variants
/// in the future without breaking changes.
///
/// Every failure in the lookup/enumeration path surfaces as a distinct
/// variant so that callers can decide per kind how to react (for example,
/// treating a missing-evidence lookup as "skip this case" while treating a
/// malformed table as a hard failure). Nothing in the inference path maps an
/// error to a default probability.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum InferError {
    /// The network document could not be parsed.
    #[error("parse error: {0}")]
    Parse(String),

    /// The network document parsed but describes an ill-formed network.
    ///
    /// Raised eagerly at construction time: unknown parent references,
    /// incomplete or duplicated CPT rows, probability vectors that do not
    /// align with the domain, out-of-range entries, or a cyclic parent
    /// structure.
    #[error("validation error: {0}")]
    Validation(String),

    /// A query or evidence mapping referenced a variable the network does
    /// not define.
    #[error("unknown variable '{0}'")]
    UnknownVariable(String),

    /// A queried or observed value is not a member of the variable's domain.
    #[error("value '{value}' is not in the domain of '{variable}'")]
    UnknownValue { variable: String, value: String },

    /// A CPT lookup could not be resolved because a required parent value
    /// was absent from the evidence.
    ///
    /// This is the "insufficient evidence" signal: it invalidates any
    /// containing computation and must never be read as a probability.
    #[error("missing evidence for parent '{parent}' of '{variable}'")]
    MissingEvidence { variable: String, parent: String },

    /// No CPT row matched a parent assignment that was actually reached
    /// during enumeration.
    ///
    /// A defect in network construction rather than a runtime data issue;
    /// eager validation makes this unreachable for networks built through
    /// the public constructors.
    #[error("no CPT row for parent assignment {assignment:?} of '{variable}'")]
    MissingCptRow {
        variable: String,
        assignment: Vec<String>,
    },

    /// The posterior query variable was already fixed by the evidence.
    #[error("query variable '{0}' is already fixed by the evidence")]
    QueryInEvidence(String),

    /// The evidence is logically inconsistent with the network: every value
    /// of the query variable has zero unnormalized mass.
    ///
    /// A legitimate runtime outcome, distinct from the construction-defect
    /// variants above.
    #[error("evidence is impossible: zero total probability mass for query '{query}'")]
    ImpossibleEvidence { query: String },
}
