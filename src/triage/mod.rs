//! Fraud-review case triage.
//!
//! A consumer of the inference core: each case record carries an evidence
//! mapping and an optional transaction amount. The triage pass computes the
//! posterior fraud probability per case, combines it with a log-scaled
//! amount impact into a priority score, and ranks the cases descending.
//!
//! The score composition is policy, not part of the engine's contract; the
//! knobs live in [`TriageConfig`].

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::engine::errors::InferError;
use crate::engine::network::{Evidence, Network};

/// A candidate case to be ranked.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Case {
    /// External case identifier, e.g. a transaction reference.
    pub case_id: String,
    /// Transaction amount in USD, if known.
    #[serde(default)]
    pub amount_usd: Option<f64>,
    /// Observed risk signals, keyed by network variable name.
    #[serde(default)]
    pub evidence: HashMap<String, String>,
}

/// A case with its computed probability and priority score.
#[derive(Debug, Clone, Serialize)]
pub struct RankedCase {
    pub case_id: String,
    pub amount_usd: Option<f64>,
    /// Posterior probability of the target outcome given the case evidence.
    pub p_fraud: f64,
    /// Score the ranking sorts by, descending.
    pub priority_score: f64,
    /// The evidence actually used, after sanitization.
    pub evidence: HashMap<String, String>,
}

/// Knobs for the triage pass.
#[derive(Debug, Clone)]
pub struct TriageConfig {
    /// The network variable whose posterior drives the ranking.
    pub query: String,
    /// The outcome of `query` read out of the posterior.
    pub outcome: String,
    /// Weight of the log-scaled amount term in the priority score.
    pub impact_weight: f64,
}

impl Default for TriageConfig {
    fn default() -> Self {
        Self {
            query: "Fraud".to_string(),
            outcome: "T".to_string(),
            impact_weight: 0.15,
        }
    }
}

/// Keeps only evidence entries that name a network variable and a value in
/// that variable's domain.
///
/// Typos in case files would otherwise surface as hard query failures; a
/// dropped entry simply widens the marginalization instead.
pub fn sanitize_evidence(net: &Network, raw: &HashMap<String, String>) -> Evidence {
    let mut cleaned = Evidence::default();
    for (name, value) in raw {
        let Some(var) = net.variable(name) else {
            continue;
        };
        if var.value_index(value).is_none() {
            continue;
        }
        cleaned.insert(name.clone(), value.clone());
    }
    cleaned
}

/// Posterior probability of the configured outcome given the evidence.
pub fn fraud_probability(
    net: &Network,
    evidence: &Evidence,
    config: &TriageConfig,
) -> Result<f64, InferError> {
    let dist = net.posterior(&config.query, evidence)?;
    Ok(dist.get(&config.outcome).copied().unwrap_or(0.0))
}

/// Combines the fraud probability with the transaction amount.
///
/// Risk is the primary driver; the amount adds a mild multiplier so that
/// high-impact cases surface first among equals. `ln_1p` keeps the term
/// defined at zero and stops a $5000 case from drowning out a $50 one.
pub fn priority_score(p_fraud: f64, amount_usd: Option<f64>, config: &TriageConfig) -> f64 {
    match amount_usd {
        Some(amount) => {
            let impact = amount.max(0.0).ln_1p();
            p_fraud * (1.0 + config.impact_weight * impact)
        }
        None => p_fraud,
    }
}

/// Scores every case and returns them sorted by priority, highest first.
///
/// Ties break on `case_id` so the ranking is deterministic.
///
/// # Errors
///
/// Propagates any inference failure. Sanitization removes unknown variables
/// and out-of-domain values beforehand, so failures here indicate an
/// inconsistent network/config pairing (e.g. the configured query variable
/// does not exist) rather than a bad case record.
pub fn prioritize(
    net: &Network,
    cases: &[Case],
    config: &TriageConfig,
) -> Result<Vec<RankedCase>, InferError> {
    let mut ranked = Vec::with_capacity(cases.len());
    for case in cases {
        let evidence = sanitize_evidence(net, &case.evidence);
        let p = fraud_probability(net, &evidence, config)?;
        let score = priority_score(p, case.amount_usd, config);

        #[cfg(feature = "tracing")]
        tracing::debug!(case_id = %case.case_id, p_fraud = p, score, "scored case");

        ranked.push(RankedCase {
            case_id: case.case_id.clone(),
            amount_usd: case.amount_usd,
            p_fraud: p,
            priority_score: score,
            evidence: evidence.into_iter().collect(),
        });
    }

    ranked.sort_by(|a, b| {
        b.priority_score
            .partial_cmp(&a.priority_score)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| a.case_id.cmp(&b.case_id))
    });
    Ok(ranked)
}

/// Loads case records from a JSON file holding a list of case objects.
pub fn load_cases(path: impl AsRef<std::path::Path>) -> Result<Vec<Case>, InferError> {
    let path = path.as_ref();
    let raw = std::fs::read_to_string(path)
        .map_err(|e| InferError::Parse(format!("cannot read '{}': {e}", path.display())))?;
    serde_json::from_str(&raw)
        .map_err(|e| InferError::Parse(format!("cases file '{}': {e}", path.display())))
}

/// Built-in sample cases, used by the CLI when no cases file is given.
pub fn sample_cases() -> Vec<Case> {
    let case = |id: &str, amount: f64, pairs: &[(&str, &str)]| Case {
        case_id: id.to_string(),
        amount_usd: Some(amount),
        evidence: pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect(),
    };
    vec![
        case(
            "TXN-001",
            45.00,
            &[
                ("AmountHigh", "F"),
                ("NewDevice", "F"),
                ("IPMismatch", "F"),
                ("PastChargeback", "F"),
            ],
        ),
        case(
            "TXN-002",
            980.00,
            &[
                ("AmountHigh", "T"),
                ("NewDevice", "T"),
                ("IPMismatch", "F"),
                ("PastChargeback", "F"),
            ],
        ),
        case(
            "TXN-003",
            120.00,
            &[
                ("AmountHigh", "F"),
                ("NewDevice", "T"),
                ("IPMismatch", "T"),
                ("PastChargeback", "F"),
            ],
        ),
        case(
            "TXN-004",
            2200.00,
            &[
                ("AmountHigh", "T"),
                ("NewDevice", "T"),
                ("IPMismatch", "T"),
                ("PastChargeback", "T"),
            ],
        ),
        case(
            "TXN-005",
            310.00,
            &[
                ("AmountHigh", "F"),
                ("NewDevice", "F"),
                ("IPMismatch", "T"),
                ("PastChargeback", "T"),
            ],
        ),
    ]
}
