//! Integration tests for the statement pipeline.
//!
//! These tests verify that raw query text is split, gated, and rendered
//! according to the external contract, without touching a live database.

use mysql_mcp_server::sql::{
    AllowList, OUTCOME_SEPARATOR, Rejection, StatementOutcome, check_statement, format_outcomes,
    split_statements,
};

/// Run a batch through the split and gate stages only, recording one
/// outcome per statement the way the executor does for rejections.
fn gate_batch(query: &str, allow: &AllowList) -> Vec<Result<String, StatementOutcome>> {
    split_statements(query)
        .into_iter()
        .map(|stmt| match check_statement(&stmt, allow) {
            Ok(()) => Ok(stmt),
            Err(rejection) => Err(StatementOutcome::error(&stmt, rejection.to_string())),
        })
        .collect()
}

/// Test that a mixed batch yields one decision per statement, in order.
#[test]
fn test_batch_gating_preserves_order() {
    let allow = AllowList::default();
    let decisions = gate_batch(
        "SELECT 1; DROP TABLE users; SHOW TABLES; DELETE FROM t",
        &allow,
    );

    assert_eq!(decisions.len(), 4);
    assert!(decisions[0].is_ok(), "SELECT should pass");
    assert!(decisions[1].is_err(), "DROP should be rejected");
    assert!(decisions[2].is_ok(), "SHOW should pass");
    assert!(decisions[3].is_err(), "DELETE should be rejected");
}

/// Test that a rejected statement names the verb and the allowed set.
#[test]
fn test_rejection_outcome_names_verb_and_allowed_set() {
    let allow = AllowList::default();
    let decisions = gate_batch("TRUNCATE TABLE audit", &allow);

    let Err(outcome) = &decisions[0] else {
        panic!("TRUNCATE should be rejected");
    };
    let rendered = format_outcomes(std::slice::from_ref(outcome));
    assert_eq!(
        rendered,
        "error executing statement 'TRUNCATE TABLE audit': \
         method not allowed: truncate, allowed: select, show, update"
    );
}

/// Test that the gate honors a custom allow-list end to end.
#[test]
fn test_custom_allow_list_admits_insert() {
    let allow = AllowList::parse("select,insert");
    let decisions = gate_batch("INSERT INTO t VALUES (1); UPDATE t SET a = 2", &allow);

    assert!(decisions[0].is_ok(), "INSERT should pass this allow-list");
    assert!(decisions[1].is_err(), "UPDATE is off this allow-list");
}

/// Test that empty and whitespace-only queries produce no statements at all.
#[test]
fn test_empty_query_produces_no_outcomes() {
    let allow = AllowList::default();
    assert!(gate_batch("", &allow).is_empty());
    assert!(gate_batch("  ;; ;\n", &allow).is_empty());
    assert_eq!(format_outcomes(&[]), "");
}

/// Test the documented splitting limitation: a semicolon inside a string
/// literal splits the statement, and the fragments are then rejected by
/// the gate rather than executed.
#[test]
fn test_literal_semicolon_splits_then_gates() {
    let allow = AllowList::default();
    let decisions = gate_batch("SELECT 'a;b' FROM t", &allow);

    assert_eq!(decisions.len(), 2);
    assert!(decisions[0].is_ok(), "first fragment starts with select");
    assert!(
        decisions[1].is_err(),
        "second fragment has no allow-listed verb"
    );
}

/// Test that the gate's own semicolon check is independent of the splitter.
#[test]
fn test_gate_rejects_residual_semicolon() {
    let allow = AllowList::default();
    let err = check_statement("SELECT 1; DROP TABLE t", &allow).unwrap_err();
    assert_eq!(err, Rejection::MultipleStatements);
}

/// Test that a full rendered batch keeps the separator contract: one
/// rendering per statement, joined by a bare `---` line.
#[test]
fn test_rendered_batch_separator_contract() {
    let outcomes = vec![
        StatementOutcome::ResultSet {
            columns: vec!["id".to_string()],
            rows: vec![vec![Some("1".to_string())]],
        },
        StatementOutcome::Mutation { rows_affected: 2 },
        StatementOutcome::error("DROP TABLE t", "method not allowed: drop"),
    ];

    let rendered = format_outcomes(&outcomes);
    let parts: Vec<&str> = rendered.split(OUTCOME_SEPARATOR).collect();
    assert_eq!(parts.len(), 3);
    assert_eq!(parts[0], "id\n1");
    assert_eq!(parts[1], "execution succeeded. Rows affected: 2");
    assert!(parts[2].starts_with("error executing statement 'DROP TABLE t'"));
}

/// Test that NULL values survive rendering as the literal token.
#[test]
fn test_null_token_in_rendered_batch() {
    let outcomes = vec![StatementOutcome::ResultSet {
        columns: vec!["a".to_string(), "b".to_string()],
        rows: vec![vec![Some("x".to_string()), None]],
    }];
    assert_eq!(format_outcomes(&outcomes), "a,b\nx,NULL");
}
