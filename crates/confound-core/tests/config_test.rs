use std::collections::HashMap;

use confound_core::config::*;
use confound_core::models::DirectiveAction;

#[test]
fn config_loads_from_empty_toml_with_all_defaults() {
    let config = ConfoundConfig::from_toml("").unwrap();

    assert_eq!(
        config.discovery.algorithms,
        vec!["pc".to_string(), "hill_climb".to_string(), "notears".to_string()]
    );
    assert_eq!(config.discovery.threads, 0);
    assert_eq!(config.discovery.pc.alpha, 0.01);
    assert_eq!(config.discovery.pc.max_condition_set, 3);
    assert_eq!(config.discovery.hill_climb.max_parents, 4);
    assert_eq!(config.discovery.notears.w_threshold, 0.3);

    assert_eq!(config.consensus.quorum, 2);
    assert_eq!(config.consensus.min_candidates, 2);

    assert!(config.temporal.precedence.is_empty());
    assert!(!config.overrides.strict_temporal);
    assert!(config.overrides.directives.is_empty());

    assert_eq!(config.solver.max_path_length, None);
    assert_eq!(config.solver.max_paths, 100_000);

    assert_eq!(config.observability.log_level, "info");
    assert!(!config.observability.json);

    config.validate().unwrap();
}

#[test]
fn config_loads_partial_toml_with_overrides() {
    let toml = r#"
[discovery]
algorithms = ["pc", "notears"]

[discovery.pc]
alpha = 0.05

[consensus]
quorum = 3

[temporal]
precedence = [["order_price", "delayed_delivery"]]

[[overrides.directives]]
action = "add"
source = "num_items"
target = "delayed_delivery"
note = "heavier orders ship slower"

[[overrides.directives]]
action = "remove"
source = "review_score"
target = "order_price"
"#;
    let config = ConfoundConfig::from_toml(toml).unwrap();
    assert_eq!(config.discovery.algorithms, vec!["pc", "notears"]);
    assert_eq!(config.discovery.pc.alpha, 0.05);
    // Non-overridden fields keep defaults.
    assert_eq!(config.discovery.pc.max_condition_set, 3);
    assert_eq!(config.consensus.quorum, 3);
    assert_eq!(
        config.temporal.precedence,
        vec![("order_price".to_string(), "delayed_delivery".to_string())]
    );
    assert_eq!(config.overrides.directives.len(), 2);
    assert_eq!(config.overrides.directives[0].action, DirectiveAction::Add);
    assert_eq!(
        config.overrides.directives[0].note.as_deref(),
        Some("heavier orders ship slower")
    );
    assert_eq!(config.overrides.directives[1].action, DirectiveAction::Remove);
}

#[test]
fn config_rejects_invalid_toml() {
    assert!(ConfoundConfig::from_toml("[consensus\nquorum = ").is_err());
}

#[test]
fn validation_rejects_unknown_algorithm() {
    let mut config = ConfoundConfig::default();
    config.discovery.algorithms = vec!["pc".into(), "lingam".into()];
    let err = config.validate().unwrap_err();
    assert!(err.to_string().contains("lingam"));
}

#[test]
fn validation_rejects_zero_quorum_and_bad_alpha() {
    let mut config = ConfoundConfig::default();
    config.consensus.quorum = 0;
    assert!(config.validate().is_err());

    let mut config = ConfoundConfig::default();
    config.discovery.pc.alpha = 1.5;
    assert!(config.validate().is_err());
}

#[test]
fn validation_requires_two_candidates_minimum() {
    let mut config = ConfoundConfig::default();
    config.consensus.min_candidates = 1;
    let err = config.validate().unwrap_err();
    assert!(err.to_string().contains("consensus.min_candidates"));
}

#[test]
fn env_overrides_take_priority_and_ignore_garbage() {
    let env: HashMap<&str, &str> = [
        ("CONFOUND_DISCOVERY_ALGORITHMS", "hill_climb, notears"),
        ("CONFOUND_DISCOVERY_THREADS", "3"),
        ("CONFOUND_CONSENSUS_QUORUM", "not-a-number"),
        ("CONFOUND_SOLVER_MAX_PATH_LENGTH", "6"),
        ("CONFOUND_LOG_JSON", "true"),
    ]
    .into_iter()
    .collect();

    let mut config = ConfoundConfig::default();
    config.apply_overrides_from(|key| env.get(key).map(|v| v.to_string()));

    assert_eq!(config.discovery.algorithms, vec!["hill_climb", "notears"]);
    assert_eq!(config.discovery.threads, 3);
    assert_eq!(config.consensus.quorum, 2, "garbage value must be ignored");
    assert_eq!(config.solver.max_path_length, Some(6));
    assert!(config.observability.json);
}

#[test]
fn load_reports_missing_file() {
    let err = ConfoundConfig::load(std::path::Path::new("/definitely/not/here.toml")).unwrap_err();
    assert!(err.to_string().contains("not found"));
}
