//! # Exact inference by enumeration
//!
//! Pure functions over a read-only [`Network`]:
//!
//! - [`lookup`]: point lookup of P(variable = value | parents) straight from
//!   the CPT, no computation
//! - [`joint_probability`]: unnormalized joint probability of a (possibly
//!   partial) evidence assignment, marginalizing over unassigned variables
//!   by recursive enumeration along a topological order
//! - [`posterior`]: normalized distribution of a query variable given
//!   evidence, one enumeration per candidate value
//!
//! ## Design
//!
//! This is the enumeration-ask algorithm: multiplication of per-variable
//! conditional factors along the topological chain, summation over hidden
//! variables. Enumeration branches extend *clones* of the evidence so that
//! sibling branches never observe each other's hypothesized assignments;
//! with the `rayon` feature the per-value posterior branches run in
//! parallel, which is sound because each branch is read-only over the
//! network and the base evidence and results combine by summation.
//!
//! Complexity is exponential in the number of unassigned variables. That is
//! acceptable for the small networks this engine targets; there is no
//! variable elimination here on purpose.

use std::collections::HashMap;

use smallvec::SmallVec;

#[cfg(feature = "rayon")]
use rayon::prelude::*;

use crate::engine::errors::InferError;
use crate::engine::network::{Evidence, Network};

/// Looks up P(`variable` = `value` | parent assignment drawn from `evidence`)
/// directly from the variable's CPT.
///
/// Only the entries of `evidence` naming the variable's parents are
/// consulted; anything else in the map is ignored.
///
/// # Errors
///
/// - [`InferError::UnknownVariable`] if `variable` is not in the network
/// - [`InferError::MissingEvidence`] if any parent is absent from `evidence`
///   (the insufficient-evidence signal; never a numeric guess)
/// - [`InferError::UnknownValue`] if `value` is not in the variable's
///   domain, or an observed parent value is not in that parent's domain
/// - [`InferError::MissingCptRow`] if no row matches the ordered parent
///   tuple (unreachable for eagerly validated networks)
pub fn lookup(
    net: &Network,
    variable: &str,
    value: &str,
    evidence: &Evidence,
) -> Result<f64, InferError> {
    let var = net.require(variable)?;

    let mut assignment: SmallVec<[&str; 4]> = SmallVec::with_capacity(var.parents.len());
    for parent in &var.parents {
        let observed = evidence
            .get(parent)
            .ok_or_else(|| InferError::MissingEvidence {
                variable: variable.to_string(),
                parent: parent.clone(),
            })?;
        if net.require(parent)?.value_index(observed).is_none() {
            return Err(InferError::UnknownValue {
                variable: parent.clone(),
                value: observed.clone(),
            });
        }
        assignment.push(observed.as_str());
    }

    let row = var
        .row_for(&assignment)
        .ok_or_else(|| InferError::MissingCptRow {
            variable: variable.to_string(),
            assignment: assignment.iter().map(|s| s.to_string()).collect(),
        })?;

    let index = var
        .value_index(value)
        .ok_or_else(|| InferError::UnknownValue {
            variable: variable.to_string(),
            value: value.to_string(),
        })?;

    Ok(row.probabilities[index])
}

/// Computes the unnormalized joint probability of `evidence`, summed over
/// every value of every variable not mentioned in it.
///
/// `order` must list the network variables in topological order (parents
/// before children). The order is trusted, not verified; any topological
/// order yields the same result. Use [`Network::topological_order`] for the
/// order computed at construction.
///
/// # Errors
///
/// Propagates every lookup failure; a failed CPT resolution aborts the
/// whole computation rather than contributing a default factor.
pub fn joint_probability(
    net: &Network,
    order: &[String],
    evidence: &Evidence,
) -> Result<f64, InferError> {
    let Some((current, rest)) = order.split_first() else {
        // Every variable processed: the accumulated factors carried by the
        // callers already hold the result.
        return Ok(1.0);
    };

    if let Some(value) = evidence.get(current) {
        let p = lookup(net, current, value, evidence)?;
        Ok(p * joint_probability(net, rest, evidence)?)
    } else {
        let var = net.require(current)?;
        let mut total = 0.0;
        for value in &var.domain {
            let mut extended = evidence.clone();
            extended.insert(current.clone(), value.clone());
            let p = lookup(net, current, value, &extended)?;
            total += p * joint_probability(net, rest, &extended)?;
        }
        Ok(total)
    }
}

/// Computes the normalized posterior distribution P(`query` | `evidence`)
/// over the query variable's full domain.
///
/// Runs one joint enumeration per candidate value of `query` over the
/// network's construction-time topological order, then normalizes. The
/// result maps every domain value to a probability; the values sum to 1.0.
///
/// # Errors
///
/// - [`InferError::QueryInEvidence`] if `evidence` already fixes `query`
/// - [`InferError::ImpossibleEvidence`] if the total unnormalized mass is
///   zero or non-finite (the evidence is inconsistent with the network);
///   never silently coerced to a uniform or zero distribution
/// - any lookup failure from the underlying enumeration
pub fn posterior(
    net: &Network,
    query: &str,
    evidence: &Evidence,
) -> Result<HashMap<String, f64>, InferError> {
    if evidence.contains_key(query) {
        return Err(InferError::QueryInEvidence(query.to_string()));
    }
    let var = net.require(query)?;
    let order = net.topological_order();

    #[cfg(feature = "tracing")]
    tracing::debug!(
        query,
        evidence_len = evidence.len(),
        domain_len = var.domain.len(),
        "posterior query"
    );

    let weigh = |value: &String| -> Result<(String, f64), InferError> {
        let mut extended = evidence.clone();
        extended.insert(query.to_string(), value.clone());
        let mass = joint_probability(net, order, &extended)?;
        Ok((value.clone(), mass))
    };

    #[cfg(feature = "rayon")]
    let unnormalized: Vec<(String, f64)> = var
        .domain
        .par_iter()
        .map(weigh)
        .collect::<Result<_, _>>()?;

    #[cfg(not(feature = "rayon"))]
    let unnormalized: Vec<(String, f64)> = var
        .domain
        .iter()
        .map(weigh)
        .collect::<Result<_, _>>()?;

    let total: f64 = unnormalized.iter().map(|(_, mass)| mass).sum();
    if !total.is_finite() || total <= 0.0 {
        return Err(InferError::ImpossibleEvidence {
            query: query.to_string(),
        });
    }

    #[cfg(feature = "tracing")]
    tracing::debug!(query, total, "normalizing posterior");

    Ok(unnormalized
        .into_iter()
        .map(|(value, mass)| (value, mass / total))
        .collect())
}
