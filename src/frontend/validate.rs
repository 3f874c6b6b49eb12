//! Document validation and compilation.
//!
//! Checks that the three document maps describe the same variable set, then
//! hands the assembled variables to [`Network::from_variables`], which
//! enforces the structural invariants (CPT completeness, vector alignment,
//! normalization, acyclicity) eagerly. A document that compiles cannot
//! produce a malformed-table failure at query time.

use smallvec::SmallVec;

use crate::engine::errors::InferError;
use crate::engine::network::{CptRow, Network, Variable};
use crate::frontend::document::NetworkDocument;

/// Compiles a parsed document into a validated network.
///
/// # Errors
///
/// Returns [`InferError::Validation`] when the `parents` or `tables` maps
/// cover a different variable set than `nodes`, and propagates every
/// structural error from [`Network::from_variables`].
pub fn compile_document(doc: &NetworkDocument) -> Result<Network, InferError> {
    for name in doc.parents.keys() {
        if !doc.nodes.contains_key(name) {
            return Err(InferError::Validation(format!(
                "'parents' lists '{name}' which is not declared in 'nodes'"
            )));
        }
    }
    for name in doc.tables.keys() {
        if !doc.nodes.contains_key(name) {
            return Err(InferError::Validation(format!(
                "'tables' lists '{name}' which is not declared in 'nodes'"
            )));
        }
    }

    let mut variables = Vec::with_capacity(doc.nodes.len());
    for (name, domain) in &doc.nodes {
        let parents = doc.parents.get(name).ok_or_else(|| {
            InferError::Validation(format!("'{name}' has no entry in 'parents'"))
        })?;
        let rows = doc.tables.get(name).ok_or_else(|| {
            InferError::Validation(format!("'{name}' has no entry in 'tables'"))
        })?;

        let cpt = rows
            .iter()
            .map(|row| CptRow {
                parent_values: SmallVec::from_vec(row.0.clone()),
                probabilities: row.1.clone(),
            })
            .collect();

        variables.push(Variable {
            name: name.clone(),
            domain: domain.clone(),
            parents: parents.clone(),
            cpt,
        });
    }

    Network::from_variables(variables)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn minimal(nodes: &str, parents: &str, tables: &str) -> String {
        format!(r#"{{ "nodes": {nodes}, "parents": {parents}, "tables": {tables} }}"#)
    }

    #[test]
    fn compiles_a_two_variable_chain() {
        let json = minimal(
            r#"{ "A": ["T", "F"], "B": ["T", "F"] }"#,
            r#"{ "A": [], "B": ["A"] }"#,
            r#"{
                "A": [[[], [0.4, 0.6]]],
                "B": [[["T"], [0.9, 0.1]], [["F"], [0.2, 0.8]]]
            }"#,
        );
        let doc = NetworkDocument::from_json(&json).unwrap();
        let net = compile_document(&doc).unwrap();
        assert_eq!(net.topological_order(), &["A".to_string(), "B".to_string()]);
    }

    #[test]
    fn rejects_variable_missing_from_parents() {
        let json = minimal(
            r#"{ "A": ["T", "F"] }"#,
            r#"{}"#,
            r#"{ "A": [[[], [0.4, 0.6]]] }"#,
        );
        let doc = NetworkDocument::from_json(&json).unwrap();
        let err = compile_document(&doc).unwrap_err();
        assert!(matches!(err, InferError::Validation(_)), "got {err:?}");
    }

    #[test]
    fn rejects_table_for_undeclared_variable() {
        let json = minimal(
            r#"{ "A": ["T", "F"] }"#,
            r#"{ "A": [] }"#,
            r#"{ "A": [[[], [0.4, 0.6]]], "Ghost": [] }"#,
        );
        let doc = NetworkDocument::from_json(&json).unwrap();
        let err = compile_document(&doc).unwrap_err();
        assert!(matches!(err, InferError::Validation(_)), "got {err:?}");
    }

    #[test]
    fn structural_errors_propagate_from_network_construction() {
        // Row for B=["T"] missing: incomplete CPT.
        let json = minimal(
            r#"{ "A": ["T", "F"], "B": ["T", "F"] }"#,
            r#"{ "A": [], "B": ["A"] }"#,
            r#"{
                "A": [[[], [0.4, 0.6]]],
                "B": [[["F"], [0.2, 0.8]]]
            }"#,
        );
        let doc = NetworkDocument::from_json(&json).unwrap();
        let err = compile_document(&doc).unwrap_err();
        assert!(matches!(err, InferError::Validation(_)), "got {err:?}");
    }
}
