use confound_core::errors::*;

#[test]
fn insufficient_candidates_carries_counts() {
    let err = ConsensusError::InsufficientCandidates {
        succeeded: 1,
        required: 2,
    };
    let msg = err.to_string();
    assert!(msg.contains('1'));
    assert!(msg.contains('2'));
    assert_eq!(err.error_code(), "INSUFFICIENT_CANDIDATES");
}

#[test]
fn domain_override_cycle_lists_cycle_edges() {
    let err = OverrideError::DomainOverrideCycle {
        cycle: vec![
            ("a".into(), "b".into()),
            ("b".into(), "c".into()),
            ("c".into(), "a".into()),
        ],
    };
    assert!(err.to_string().contains("a -> b, b -> c, c -> a"));
    assert_eq!(err.error_code(), "DOMAIN_OVERRIDE_CYCLE");
}

#[test]
fn no_valid_adjustment_set_lists_open_paths() {
    let err = AdjustmentError::NoValidAdjustmentSet {
        treatment: "t".into(),
        outcome: "y".into(),
        open_paths: vec![vec!["t".into(), "u".into(), "y".into()]],
    };
    let msg = err.to_string();
    assert!(msg.contains("t -> y"));
    assert!(msg.contains("[t - u - y]"));
}

#[test]
fn top_level_error_delegates_codes() {
    let err: ConfoundError = AdjustmentError::PathLimitExceeded { limit: 10 }.into();
    assert_eq!(err.error_code(), "PATH_LIMIT_EXCEEDED");
    assert!(err.coded_string().starts_with("[PATH_LIMIT_EXCEEDED]"));

    let err: ConfoundError = GraphError::SelfLoop { node: "x".into() }.into();
    assert_eq!(err.error_code(), "SELF_LOOP");
}

#[test]
fn temporal_violation_names_both_endpoints() {
    let err = OverrideError::TemporalViolation {
        cause: "review_score".into(),
        effect: "order_price".into(),
        reason: "rank".into(),
    };
    let msg = err.to_string();
    assert!(msg.contains("review_score -> order_price"));
    assert_eq!(err.error_code(), "TEMPORAL_VIOLATION");
}

#[test]
fn unregistered_column_shares_the_unknown_variable_code() {
    let err: ConfoundError = VariableError::Unregistered {
        name: "coupon".into(),
    }
    .into();
    assert_eq!(err.error_code(), "UNKNOWN_VARIABLE");
    assert!(err.coded_string().starts_with("[UNKNOWN_VARIABLE]"));
    assert!(err.to_string().contains("coupon"));
}
