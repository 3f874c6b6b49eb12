//! Construction-time validation tests: every malformed document must be
//! rejected when the network is built, not when a query first touches the
//! defect.

use beliefnet::{load_network_str, InferError};

/// A well-formed two-variable chain the individual tests mutate.
const CHAIN: &str = r#"{
    "nodes":   { "A": ["T", "F"], "B": ["T", "F"] },
    "parents": { "A": [], "B": ["A"] },
    "tables":  {
        "A": [[[], [0.4, 0.6]]],
        "B": [[["T"], [0.9, 0.1]], [["F"], [0.2, 0.8]]]
    }
}"#;

fn expect_validation_error(json: &str) {
    match load_network_str(json) {
        Err(InferError::Validation(_)) => {}
        other => panic!("expected validation error, got {other:?}"),
    }
}

#[test]
fn the_baseline_chain_is_accepted() {
    load_network_str(CHAIN).unwrap();
}

#[test]
fn rejects_unknown_parent_reference() {
    let json = CHAIN.replace(r#""B": ["A"]"#, r#""B": ["Ghost"]"#);
    expect_validation_error(&json);
}

#[test]
fn rejects_incomplete_cpt() {
    let json = CHAIN.replace(r#"[[["T"], [0.9, 0.1]], [["F"], [0.2, 0.8]]]"#, r#"[[["T"], [0.9, 0.1]]]"#);
    expect_validation_error(&json);
}

#[test]
fn rejects_duplicate_cpt_rows() {
    let json = CHAIN.replace(r#"[["F"], [0.2, 0.8]]"#, r#"[["T"], [0.2, 0.8]]"#);
    expect_validation_error(&json);
}

#[test]
fn rejects_row_with_value_outside_parent_domain() {
    let json = CHAIN.replace(r#"[["F"], [0.2, 0.8]]"#, r#"[["X"], [0.2, 0.8]]"#);
    expect_validation_error(&json);
}

#[test]
fn rejects_probability_vector_shorter_than_domain() {
    let json = CHAIN.replace(r#"[[], [0.4, 0.6]]"#, r#"[[], [1.0]]"#);
    expect_validation_error(&json);
}

#[test]
fn rejects_probabilities_outside_unit_interval() {
    let json = CHAIN.replace(r#"[0.4, 0.6]"#, r#"[1.4, -0.4]"#);
    expect_validation_error(&json);
}

#[test]
fn rejects_rows_not_summing_to_one() {
    let json = CHAIN.replace(r#"[0.4, 0.6]"#, r#"[0.4, 0.5]"#);
    expect_validation_error(&json);
}

#[test]
fn rejects_cycles() {
    let json = r#"{
        "nodes":   { "A": ["T", "F"], "B": ["T", "F"] },
        "parents": { "A": ["B"], "B": ["A"] },
        "tables":  {
            "A": [[["T"], [0.9, 0.1]], [["F"], [0.2, 0.8]]],
            "B": [[["T"], [0.9, 0.1]], [["F"], [0.2, 0.8]]]
        }
    }"#;
    expect_validation_error(json);
}

#[test]
fn rejects_self_loop() {
    let json = r#"{
        "nodes":   { "A": ["T", "F"] },
        "parents": { "A": ["A"] },
        "tables":  { "A": [[["T"], [0.9, 0.1]], [["F"], [0.2, 0.8]]] }
    }"#;
    expect_validation_error(json);
}

#[test]
fn rejects_empty_domain() {
    let json = r#"{
        "nodes":   { "A": [] },
        "parents": { "A": [] },
        "tables":  { "A": [[[], []]] }
    }"#;
    expect_validation_error(json);
}

#[test]
fn rejects_duplicate_domain_values() {
    let json = CHAIN.replace(r#""A": ["T", "F"]"#, r#""A": ["T", "T"]"#);
    expect_validation_error(&json);
}

#[test]
fn rejects_document_key_set_mismatches() {
    let missing_parents = CHAIN.replace(r#""A": [], "B": ["A"]"#, r#""A": []"#);
    expect_validation_error(&missing_parents);

    let extra_table = CHAIN.replace(
        r#""A": [[[], [0.4, 0.6]]],"#,
        r#""A": [[[], [0.4, 0.6]]], "Ghost": [],"#,
    );
    expect_validation_error(&extra_table);
}
