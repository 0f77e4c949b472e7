use test_fixtures::{fixture_exists, list_fixtures, load_fixture_value, load_scenarios, LinearSem};

#[test]
fn backdoor_goldens_all_parse() {
    let scenarios = load_scenarios("backdoor");
    assert!(scenarios.len() >= 7, "expected golden scenarios, got {}", scenarios.len());
    for (name, scenario) in &scenarios {
        assert!(
            scenario.expected_adjustment.is_some() ^ scenario.expected_error.is_some(),
            "{name}: exactly one of expected_adjustment / expected_error must be set"
        );
        assert!(scenario.graph["nodes"].is_array(), "{name}: graph.nodes missing");
        assert!(scenario.graph["edges"].is_array(), "{name}: graph.edges missing");
    }
}

#[test]
fn listing_is_sorted_and_json_only() {
    let files = list_fixtures("backdoor");
    let mut sorted = files.clone();
    sorted.sort();
    assert_eq!(files, sorted);
    assert!(files.iter().all(|p| p.extension().is_some_and(|e| e == "json")));
    assert!(list_fixtures("no_such_dir").is_empty());
}

#[test]
fn raw_value_loading() {
    assert!(fixture_exists("backdoor/collider.json"));
    let value = load_fixture_value("backdoor/collider.json");
    assert_eq!(value["treatment"], "t");
}

#[test]
fn sem_rows_match_columns() {
    let sem = LinearSem::new(["a", "b", "c"])
        .edge("a", "b", 0.5)
        .edge("b", "c", -0.7);
    let cols = sem.sample(10, 3);
    let rows = sem.sample_rows(10, 3);
    assert_eq!(cols.len(), 3);
    assert_eq!(rows.len(), 10);
    assert_eq!(rows[4][2], cols[2][4]);
}
