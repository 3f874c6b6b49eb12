//! # Discrete Bayesian network representation
//!
//! This module implements the in-memory network structure consumed by the
//! inference engine.
//!
//! ## Key components
//!
//! - **CptRow**: one conditional probability table row, pairing an ordered
//!   parent-value assignment with a probability vector aligned to the
//!   variable's domain order
//! - **Variable**: a named discrete random variable with an ordered domain,
//!   an ordered parent list, and a CPT covering the full parent cross product
//! - **Network**: the variable map plus a topological evaluation order fixed
//!   at construction
//!
//! ## Design
//!
//! All structural invariants are checked eagerly in [`Network::from_variables`]:
//! parent references resolve, CPTs contain exactly one row per parent-domain
//! combination, probability vectors align with domains and are normalized,
//! and the parent relation is acyclic. A `Network` that constructed
//! successfully cannot produce a malformed-table failure during enumeration.

use std::collections::HashSet;

use rustc_hash::FxHashMap;
use smallvec::SmallVec;

use crate::engine::errors::InferError;

/// Tolerance for CPT row normalization: each probability vector must sum to
/// 1.0 within this bound.
const ROW_SUM_TOLERANCE: f64 = 1e-6;

/// Partial assignment of outcome values to variables, keyed by variable name.
///
/// Evidence is read-only from the engine's perspective: enumeration extends
/// cloned copies, never the caller's map.
pub type Evidence = FxHashMap<String, String>;

/// One row of a conditional probability table.
#[derive(Debug, Clone, PartialEq)]
pub struct CptRow {
    /// Parent outcome values, one per parent, in the variable's declared
    /// parent order. Empty for root variables.
    pub parent_values: SmallVec<[String; 4]>,
    /// Probabilities aligned with the variable's domain order: entry `i` is
    /// P(variable = domain\[i\] | parent_values).
    pub probabilities: Vec<f64>,
}

/// A discrete random variable with its conditional probability table.
#[derive(Debug, Clone)]
pub struct Variable {
    /// The variable name, unique within a network.
    pub name: String,
    /// Ordered outcome labels. The order fixes positional alignment for
    /// every probability vector indexed by value.
    pub domain: Vec<String>,
    /// Ordered names of the variables this CPT is conditioned on.
    pub parents: Vec<String>,
    /// One row per combination of parent domain values; a single row with an
    /// empty assignment for roots.
    pub cpt: Vec<CptRow>,
}

impl Variable {
    /// Returns the position of `value` within the domain, or `None` if the
    /// value is not an outcome of this variable.
    pub fn value_index(&self, value: &str) -> Option<usize> {
        self.domain.iter().position(|v| v == value)
    }

    /// Finds the CPT row whose parent assignment equals `assignment`
    /// (exact, order-sensitive comparison over the full tuple).
    pub fn row_for(&self, assignment: &[&str]) -> Option<&CptRow> {
        self.cpt.iter().find(|row| {
            row.parent_values.len() == assignment.len()
                && row.parent_values.iter().zip(assignment).all(|(a, b)| a == b)
        })
    }

    /// True if the variable has no parents.
    pub fn is_root(&self) -> bool {
        self.parents.is_empty()
    }
}

/// A discrete Bayesian network: variables keyed by name, with a topological
/// evaluation order computed at construction.
///
/// The network is read-only for the lifetime of all queries.
#[derive(Debug, Clone)]
pub struct Network {
    variables: FxHashMap<String, Variable>,
    order: Vec<String>,
}

impl Network {
    /// Builds a network from a set of variables, validating every structural
    /// invariant eagerly.
    ///
    /// # Errors
    ///
    /// Returns [`InferError::Validation`] when:
    /// - a variable name is duplicated, or a domain is empty or contains
    ///   duplicate values
    /// - a parent list references an unknown variable or repeats a parent
    /// - a CPT is missing a row for some parent combination, contains a
    ///   duplicate or alien row, or has the wrong total row count
    /// - a probability vector's length differs from the domain length, an
    ///   entry is non-finite or outside `[0, 1]`, or a row does not sum to
    ///   1.0 within tolerance
    /// - the parent relation contains a cycle
    pub fn from_variables(variables: Vec<Variable>) -> Result<Self, InferError> {
        let mut map: FxHashMap<String, Variable> = FxHashMap::default();
        for var in variables {
            let name = var.name.clone();
            if map.insert(name.clone(), var).is_some() {
                return Err(InferError::Validation(format!(
                    "duplicate variable '{name}'"
                )));
            }
        }

        for var in map.values() {
            validate_domain(var)?;
            validate_parents(var, &map)?;
            validate_cpt(var, &map)?;
        }

        let order = topological_order(&map)?;

        Ok(Self {
            variables: map,
            order,
        })
    }

    /// Looks up a variable by name.
    pub fn variable(&self, name: &str) -> Option<&Variable> {
        self.variables.get(name)
    }

    /// Looks up a variable by name, or fails with [`InferError::UnknownVariable`].
    pub fn require(&self, name: &str) -> Result<&Variable, InferError> {
        self.variables
            .get(name)
            .ok_or_else(|| InferError::UnknownVariable(name.to_string()))
    }

    /// The topological evaluation order computed at construction
    /// (parents always precede children). Deterministic across runs.
    pub fn topological_order(&self) -> &[String] {
        &self.order
    }

    /// Number of variables in the network.
    pub fn len(&self) -> usize {
        self.variables.len()
    }

    /// True if the network has no variables.
    pub fn is_empty(&self) -> bool {
        self.variables.is_empty()
    }

    /// Iterates over the variables in topological order.
    pub fn variables_in_order(&self) -> impl Iterator<Item = &Variable> {
        self.order.iter().filter_map(|name| self.variables.get(name))
    }

    /// CPT point lookup. See [`crate::engine::infer::lookup`].
    pub fn lookup(&self, variable: &str, value: &str, evidence: &Evidence) -> Result<f64, InferError> {
        crate::engine::infer::lookup(self, variable, value, evidence)
    }

    /// Unnormalized joint probability of the evidence.
    /// See [`crate::engine::infer::joint_probability`].
    pub fn joint_probability(&self, order: &[String], evidence: &Evidence) -> Result<f64, InferError> {
        crate::engine::infer::joint_probability(self, order, evidence)
    }

    /// Normalized posterior distribution of a query variable.
    /// See [`crate::engine::infer::posterior`].
    pub fn posterior(
        &self,
        query: &str,
        evidence: &Evidence,
    ) -> Result<std::collections::HashMap<String, f64>, InferError> {
        crate::engine::infer::posterior(self, query, evidence)
    }
}

fn validate_domain(var: &Variable) -> Result<(), InferError> {
    if var.domain.is_empty() {
        return Err(InferError::Validation(format!(
            "variable '{}' has an empty domain",
            var.name
        )));
    }
    let mut seen = HashSet::new();
    for value in &var.domain {
        if !seen.insert(value.as_str()) {
            return Err(InferError::Validation(format!(
                "variable '{}' repeats domain value '{value}'",
                var.name
            )));
        }
    }
    Ok(())
}

fn validate_parents(var: &Variable, map: &FxHashMap<String, Variable>) -> Result<(), InferError> {
    let mut seen = HashSet::new();
    for parent in &var.parents {
        if !map.contains_key(parent) {
            return Err(InferError::Validation(format!(
                "variable '{}' lists unknown parent '{parent}'",
                var.name
            )));
        }
        if !seen.insert(parent.as_str()) {
            return Err(InferError::Validation(format!(
                "variable '{}' repeats parent '{parent}'",
                var.name
            )));
        }
    }
    Ok(())
}

/// Checks that the CPT covers the parent cross product exactly once per
/// combination and that every probability vector is well-formed.
fn validate_cpt(var: &Variable, map: &FxHashMap<String, Variable>) -> Result<(), InferError> {
    let expected_rows: usize = var
        .parents
        .iter()
        .map(|p| map[p].domain.len())
        .product();

    if var.cpt.len() != expected_rows {
        return Err(InferError::Validation(format!(
            "variable '{}' has {} CPT rows, expected {} (one per parent combination)",
            var.name,
            var.cpt.len(),
            expected_rows
        )));
    }

    let mut seen_assignments: HashSet<Vec<&str>> = HashSet::new();
    for row in &var.cpt {
        if row.parent_values.len() != var.parents.len() {
            return Err(InferError::Validation(format!(
                "variable '{}' has a CPT row with {} parent values, expected {}",
                var.name,
                row.parent_values.len(),
                var.parents.len()
            )));
        }
        for (parent, value) in var.parents.iter().zip(&row.parent_values) {
            if map[parent].value_index(value).is_none() {
                return Err(InferError::Validation(format!(
                    "variable '{}' has a CPT row with value '{value}' outside the domain of parent '{parent}'",
                    var.name
                )));
            }
        }
        let key: Vec<&str> = row.parent_values.iter().map(String::as_str).collect();
        if !seen_assignments.insert(key) {
            return Err(InferError::Validation(format!(
                "variable '{}' has duplicate CPT rows for assignment {:?}",
                var.name, row.parent_values
            )));
        }

        if row.probabilities.len() != var.domain.len() {
            return Err(InferError::Validation(format!(
                "variable '{}' has a probability vector of length {}, expected domain length {}",
                var.name,
                row.probabilities.len(),
                var.domain.len()
            )));
        }
        let mut sum = 0.0;
        for &p in &row.probabilities {
            if !p.is_finite() || !(0.0..=1.0).contains(&p) {
                return Err(InferError::Validation(format!(
                    "variable '{}' has probability {p} outside [0, 1]",
                    var.name
                )));
            }
            sum += p;
        }
        if (sum - 1.0).abs() > ROW_SUM_TOLERANCE {
            return Err(InferError::Validation(format!(
                "variable '{}' has a CPT row summing to {sum}, expected 1.0",
                var.name
            )));
        }
    }

    // Row count matches the cross product and every assignment is distinct
    // and in-domain, so coverage is exhaustive.
    Ok(())
}

/// Kahn topological sort over the parent relation.
///
/// Seeded with name-sorted roots and a sorted ready-queue so the resulting
/// order is stable across runs. A cycle leaves variables unprocessed and is
/// reported as a validation error.
fn topological_order(map: &FxHashMap<String, Variable>) -> Result<Vec<String>, InferError> {
    let mut in_degree: FxHashMap<&str, usize> = FxHashMap::default();
    let mut children: FxHashMap<&str, Vec<&str>> = FxHashMap::default();
    for var in map.values() {
        in_degree.entry(var.name.as_str()).or_insert(0);
        for parent in &var.parents {
            *in_degree.entry(var.name.as_str()).or_insert(0) += 1;
            children
                .entry(parent.as_str())
                .or_default()
                .push(var.name.as_str());
        }
    }

    let mut ready: Vec<&str> = in_degree
        .iter()
        .filter(|(_, &d)| d == 0)
        .map(|(&name, _)| name)
        .collect();
    // Descending stack order so pop() drains roots in ascending name order.
    ready.sort_unstable_by(|a, b| b.cmp(a));

    let mut order = Vec::with_capacity(map.len());
    while let Some(name) = ready.pop() {
        order.push(name.to_string());
        let mut unblocked: Vec<&str> = Vec::new();
        if let Some(kids) = children.get(name) {
            for &child in kids {
                if let Some(d) = in_degree.get_mut(child) {
                    *d -= 1;
                    if *d == 0 {
                        unblocked.push(child);
                    }
                }
            }
        }
        unblocked.sort_unstable();
        // Reverse so pop() drains in ascending name order.
        for child in unblocked.into_iter().rev() {
            ready.push(child);
        }
    }

    if order.len() != map.len() {
        let stuck: Vec<&str> = map
            .keys()
            .map(String::as_str)
            .filter(|name| !order.iter().any(|o| o == name))
            .collect();
        return Err(InferError::Validation(format!(
            "parent structure contains a cycle involving {stuck:?}"
        )));
    }
    Ok(order)
}

#[cfg(test)]
mod tests {
    use super::*;
    use smallvec::smallvec;

    fn coin(name: &str) -> Variable {
        Variable {
            name: name.to_string(),
            domain: vec!["T".into(), "F".into()],
            parents: vec![],
            cpt: vec![CptRow {
                parent_values: smallvec![],
                probabilities: vec![0.5, 0.5],
            }],
        }
    }

    fn child_of(name: &str, parent: &str) -> Variable {
        Variable {
            name: name.to_string(),
            domain: vec!["T".into(), "F".into()],
            parents: vec![parent.to_string()],
            cpt: vec![
                CptRow {
                    parent_values: smallvec!["T".into()],
                    probabilities: vec![0.9, 0.1],
                },
                CptRow {
                    parent_values: smallvec!["F".into()],
                    probabilities: vec![0.2, 0.8],
                },
            ],
        }
    }

    #[test]
    fn builds_valid_chain() {
        let net = Network::from_variables(vec![coin("A"), child_of("B", "A")]).unwrap();
        assert_eq!(net.len(), 2);
        assert_eq!(net.topological_order(), &["A".to_string(), "B".to_string()]);
    }

    #[test]
    fn topological_order_is_parent_first_and_deterministic() {
        let build = || {
            Network::from_variables(vec![
                child_of("Z", "M"),
                coin("M"),
                child_of("A", "M"),
            ])
            .unwrap()
        };
        let net = build();
        let order = net.topological_order();
        assert_eq!(order[0], "M");
        assert_eq!(order.len(), 3);
        // Same input, same order.
        assert_eq!(build().topological_order(), order);
    }

    #[test]
    fn rejects_unknown_parent() {
        let err = Network::from_variables(vec![child_of("B", "A")]).unwrap_err();
        assert!(matches!(err, InferError::Validation(_)), "got {err:?}");
    }

    #[test]
    fn rejects_missing_cpt_row() {
        let mut bad = child_of("B", "A");
        bad.cpt.pop();
        let err = Network::from_variables(vec![coin("A"), bad]).unwrap_err();
        assert!(matches!(err, InferError::Validation(_)), "got {err:?}");
    }

    #[test]
    fn rejects_duplicate_cpt_row() {
        let mut bad = child_of("B", "A");
        bad.cpt[1] = bad.cpt[0].clone();
        let err = Network::from_variables(vec![coin("A"), bad]).unwrap_err();
        assert!(matches!(err, InferError::Validation(_)), "got {err:?}");
    }

    #[test]
    fn rejects_vector_domain_mismatch() {
        let mut bad = coin("A");
        bad.cpt[0].probabilities = vec![1.0];
        let err = Network::from_variables(vec![bad]).unwrap_err();
        assert!(matches!(err, InferError::Validation(_)), "got {err:?}");
    }

    #[test]
    fn rejects_unnormalized_row() {
        let mut bad = coin("A");
        bad.cpt[0].probabilities = vec![0.5, 0.4];
        let err = Network::from_variables(vec![bad]).unwrap_err();
        assert!(matches!(err, InferError::Validation(_)), "got {err:?}");
    }

    #[test]
    fn rejects_out_of_range_probability() {
        let mut bad = coin("A");
        bad.cpt[0].probabilities = vec![1.5, -0.5];
        let err = Network::from_variables(vec![bad]).unwrap_err();
        assert!(matches!(err, InferError::Validation(_)), "got {err:?}");
    }

    #[test]
    fn rejects_cycle() {
        let a = child_of("A", "B");
        let b = child_of("B", "A");
        let err = Network::from_variables(vec![a, b]).unwrap_err();
        assert!(matches!(err, InferError::Validation(_)), "got {err:?}");
    }

    #[test]
    fn row_for_matches_exact_ordered_tuple() {
        let var = child_of("B", "A");
        let row = var.row_for(&["T"]).unwrap();
        assert_eq!(row.probabilities, vec![0.9, 0.1]);
        assert!(var.row_for(&["X"]).is_none());
        assert!(var.row_for(&[]).is_none());
    }

    #[test]
    fn value_index_follows_domain_order() {
        let var = coin("A");
        assert_eq!(var.value_index("T"), Some(0));
        assert_eq!(var.value_index("F"), Some(1));
        assert_eq!(var.value_index("maybe"), None);
    }

    #[test]
    fn variables_in_order_yields_roots_before_children() {
        let net = Network::from_variables(vec![child_of("B", "A"), coin("A")]).unwrap();
        let vars: Vec<&Variable> = net.variables_in_order().collect();
        assert_eq!(vars.len(), 2);
        assert!(vars[0].is_root());
        assert_eq!(vars[0].name, "A");
        assert!(!vars[1].is_root());
    }
}
