//! Built-in sample networks.
//!
//! Two fixed illustrative networks used by the CLI, the tests, and the
//! benches:
//!
//! - [`sprinkler_document`]: the classic four-variable sprinkler network
//!   (Cloudy → {Sprinkler, Rain} → WetGrass)
//! - [`fraud_review_document`]: a five-variable transaction-fraud network
//!   with four independent risk signals feeding a `Fraud` node

use std::collections::BTreeMap;

use crate::engine::errors::InferError;
use crate::engine::network::Network;
use crate::frontend::document::{NetworkDocument, TableRow};
use crate::frontend::validate::compile_document;

/// The sprinkler network: Cloudy → {Sprinkler, Rain} → WetGrass.
///
/// All domains are `["T", "F"]`.
pub fn sprinkler_document() -> NetworkDocument {
    let tf = || vec!["T".to_string(), "F".to_string()];

    let nodes: BTreeMap<String, Vec<String>> = [
        ("Cloudy".to_string(), tf()),
        ("Sprinkler".to_string(), tf()),
        ("Rain".to_string(), tf()),
        ("WetGrass".to_string(), tf()),
    ]
    .into();

    let parents: BTreeMap<String, Vec<String>> = [
        ("Cloudy".to_string(), vec![]),
        ("Sprinkler".to_string(), vec!["Cloudy".to_string()]),
        ("Rain".to_string(), vec!["Cloudy".to_string()]),
        (
            "WetGrass".to_string(),
            vec!["Sprinkler".to_string(), "Rain".to_string()],
        ),
    ]
    .into();

    let row = |values: &[&str], probs: &[f64]| {
        TableRow(
            values.iter().map(|v| v.to_string()).collect(),
            probs.to_vec(),
        )
    };

    let tables: BTreeMap<String, Vec<TableRow>> = [
        ("Cloudy".to_string(), vec![row(&[], &[0.5, 0.5])]),
        (
            "Sprinkler".to_string(),
            vec![row(&["T"], &[0.5, 0.5]), row(&["F"], &[0.9, 0.1])],
        ),
        (
            "Rain".to_string(),
            vec![row(&["T"], &[0.8, 0.2]), row(&["F"], &[0.2, 0.8])],
        ),
        (
            "WetGrass".to_string(),
            vec![
                row(&["T", "T"], &[1.0, 0.0]),
                row(&["T", "F"], &[0.1, 0.9]),
                row(&["F", "T"], &[0.1, 0.9]),
                row(&["F", "F"], &[0.01, 0.99]),
            ],
        ),
    ]
    .into();

    NetworkDocument {
        nodes,
        parents,
        tables,
    }
}

/// The sprinkler network, compiled.
pub fn sprinkler() -> Result<Network, InferError> {
    compile_document(&sprinkler_document())
}

/// Baseline fraud probability before any risk signal fires.
const FRAUD_BASE: f64 = 0.02;
/// Per-signal increments: amount, device, IP, chargeback.
const FRAUD_INCREMENTS: [f64; 4] = [0.08, 0.10, 0.12, 0.20];
/// Cap keeping the fraud probability away from 1.0.
const FRAUD_CAP: f64 = 0.95;

/// The default fraud-review network.
///
/// Four independent binary risk signals (`AmountHigh`, `NewDevice`,
/// `IPMismatch`, `PastChargeback`) are the parents of `Fraud`. All domains
/// are `["F", "T"]`. The `Fraud` CPT starts from a low base rate and adds a
/// fixed increment per active signal, capped below certainty.
pub fn fraud_review_document() -> NetworkDocument {
    let ft = || vec!["F".to_string(), "T".to_string()];
    let signals = ["AmountHigh", "NewDevice", "IPMismatch", "PastChargeback"];

    let mut nodes: BTreeMap<String, Vec<String>> = BTreeMap::new();
    let mut parents: BTreeMap<String, Vec<String>> = BTreeMap::new();
    let mut tables: BTreeMap<String, Vec<TableRow>> = BTreeMap::new();

    let priors = [0.10, 0.20, 0.15, 0.05];
    for (signal, p) in signals.iter().zip(priors) {
        nodes.insert(signal.to_string(), ft());
        parents.insert(signal.to_string(), vec![]);
        tables.insert(
            signal.to_string(),
            vec![TableRow(vec![], vec![1.0 - p, p])],
        );
    }

    nodes.insert("Fraud".to_string(), ft());
    parents.insert(
        "Fraud".to_string(),
        signals.iter().map(|s| s.to_string()).collect(),
    );

    let mut rows = Vec::with_capacity(16);
    for a in ["F", "T"] {
        for d in ["F", "T"] {
            for ip in ["F", "T"] {
                for cb in ["F", "T"] {
                    let assignment = [a, d, ip, cb];
                    let mut p = FRAUD_BASE;
                    for (value, inc) in assignment.iter().zip(FRAUD_INCREMENTS) {
                        if *value == "T" {
                            p += inc;
                        }
                    }
                    let p = p.min(FRAUD_CAP);
                    rows.push(TableRow(
                        assignment.iter().map(|v| v.to_string()).collect(),
                        vec![1.0 - p, p],
                    ));
                }
            }
        }
    }
    tables.insert("Fraud".to_string(), rows);

    NetworkDocument {
        nodes,
        parents,
        tables,
    }
}

/// The default fraud-review network, compiled.
pub fn fraud_review() -> Result<Network, InferError> {
    compile_document(&fraud_review_document())
}
