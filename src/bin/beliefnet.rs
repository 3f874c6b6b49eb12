//! Beliefnet CLI - Fraud review prioritization over a Bayesian network
//!
//! Usage:
//!   beliefnet                             # Rank the built-in sample cases
//!   beliefnet --cases cases.json          # Rank cases from a file
//!   beliefnet --net my_net.json -o json   # Custom network, JSON output

use std::path::{Path, PathBuf};
use std::process;

use clap::Parser;

use beliefnet::engine::network::Network;
use beliefnet::triage::{self, RankedCase, TriageConfig};
use beliefnet::{load_network, samples, InferError};

#[derive(Parser)]
#[command(name = "beliefnet")]
#[command(version)]
#[command(about = "Beliefnet - fraud review prioritization using a Bayesian network")]
#[command(
    long_about = "Ranks fraud-review cases by exact posterior fraud probability, \
                  combined with a log-scaled transaction-amount impact"
)]
struct Cli {
    /// Path to the Bayes net JSON file; created with the default fraud
    /// network if it does not exist
    #[arg(short, long, default_value = "nets/fraud_review.json", value_name = "FILE")]
    net: PathBuf,

    /// Path to a JSON file holding a list of case objects (built-in sample
    /// cases if not provided)
    #[arg(short, long, value_name = "FILE")]
    cases: Option<PathBuf>,

    /// Number of cases to print
    #[arg(short, long, default_value_t = 10)]
    top: usize,

    /// Output format: summary or json
    #[arg(short, long, default_value = "summary", value_name = "FORMAT")]
    output: String,
}

fn main() {
    let cli = Cli::parse();

    let net = match ensure_network(&cli.net) {
        Ok(net) => net,
        Err(e) => {
            eprintln!("Error loading network '{}': {}", cli.net.display(), e);
            process::exit(1);
        }
    };

    let cases = match &cli.cases {
        Some(path) => match triage::load_cases(path) {
            Ok(cases) => cases,
            Err(e) => {
                eprintln!("Error loading cases '{}': {}", path.display(), e);
                process::exit(1);
            }
        },
        None => triage::sample_cases(),
    };

    let ranked = match triage::prioritize(&net, &cases, &TriageConfig::default()) {
        Ok(ranked) => ranked,
        Err(e) => {
            eprintln!("Error ranking cases: {}", e);
            process::exit(1);
        }
    };

    match cli.output.as_str() {
        "json" => {
            let top: Vec<&RankedCase> = ranked.iter().take(cli.top).collect();
            match serde_json::to_string_pretty(&top) {
                Ok(json) => println!("{}", json),
                Err(e) => {
                    eprintln!("Error serializing to JSON: {}", e);
                    process::exit(1);
                }
            }
        }
        _ => print_ranked(&ranked, cli.top),
    }
}

/// Loads the network document, writing the default fraud net first if the
/// file does not exist yet.
fn ensure_network(path: &Path) -> Result<Network, InferError> {
    if !path.exists() {
        if let Some(dir) = path.parent() {
            if !dir.as_os_str().is_empty() {
                std::fs::create_dir_all(dir).map_err(|e| {
                    InferError::Parse(format!("cannot create '{}': {e}", dir.display()))
                })?;
            }
        }
        let doc = samples::fraud_review_document();
        std::fs::write(path, doc.to_json_pretty()?).map_err(|e| {
            InferError::Parse(format!("cannot write '{}': {e}", path.display()))
        })?;
        eprintln!("Created default fraud network at '{}'", path.display());
    }
    load_network(path)
}

fn print_ranked(ranked: &[RankedCase], top: usize) {
    println!("\nFraud Review Priority List (highest first)\n");
    for (i, r) in ranked.iter().take(top).enumerate() {
        let amount = match r.amount_usd {
            Some(a) => format!("{a:.2}"),
            None => "-".to_string(),
        };
        println!(
            "{}. {} | p_fraud={:.4} | score={:.4} | amount={}",
            i + 1,
            r.case_id,
            r.p_fraud,
            r.priority_score,
            amount
        );
        let mut pairs: Vec<(&String, &String)> = r.evidence.iter().collect();
        pairs.sort();
        let shown: Vec<String> = pairs.iter().map(|(k, v)| format!("{k}={v}")).collect();
        println!("   evidence: {}", shown.join(", "));
    }
    println!();
}
