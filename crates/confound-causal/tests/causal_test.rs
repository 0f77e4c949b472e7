//! Graph model, consensus, temporal filter, and domain override tests.

use confound_causal::graph::break_cycles;
use confound_causal::{
    BackdoorSolver, CandidateGraph, CausalEdgeWeight, CausalGraph, ConsensusBuilder, EdgeOrigin,
    OverrideLayer, TemporalFilter,
};
use confound_core::config::{ConsensusConfig, OverrideConfig};
use confound_core::errors::{AdjustmentError, ConsensusError, ErrorCode, GraphError, OverrideError};
use confound_core::models::{DiagnosticKind, Directive, Stage, TemporalOrder};

/// Build a graph from `(source, target)` pairs.
fn graph_of(edges: &[(&str, &str)]) -> CausalGraph {
    let mut g = CausalGraph::new();
    for (s, t) in edges {
        g.add_edge(s, t).unwrap();
    }
    g
}

fn candidate(name: &str, edges: &[(&str, &str)]) -> CandidateGraph {
    CandidateGraph::new(name, graph_of(edges))
}

fn pairs(edges: &[(&str, &str)]) -> Vec<(String, String)> {
    edges
        .iter()
        .map(|(s, t)| (s.to_string(), t.to_string()))
        .collect()
}

// =============================================================================
// Graph model
// =============================================================================

#[test]
fn self_loop_rejected() {
    let mut g = CausalGraph::new();
    let err = g.add_edge("a", "a").unwrap_err();
    assert!(matches!(err, GraphError::SelfLoop { ref node } if node == "a"));
    assert_eq!(g.edge_count(), 0);
}

#[test]
fn duplicate_edge_reports_false() {
    let mut g = graph_of(&[("a", "b")]);
    assert!(!g.add_edge("a", "b").unwrap());
    assert_eq!(g.edge_count(), 1);
}

#[test]
fn neighbourhoods_are_sorted() {
    let g = graph_of(&[("c", "x"), ("a", "x"), ("x", "z"), ("x", "b")]);
    assert_eq!(g.parents("x"), vec!["a", "c"]);
    assert_eq!(g.children("x"), vec!["b", "z"]);
    assert_eq!(g.adjacent("x"), vec!["a", "b", "c", "z"]);
    assert!(g.parents("ghost").is_empty());
}

#[test]
fn descendants_and_ancestors() {
    let g = graph_of(&[("a", "b"), ("b", "c"), ("x", "c")]);
    let desc: Vec<_> = g.descendants("a").into_iter().collect();
    assert_eq!(desc, vec!["b", "c"]);
    let anc: Vec<_> = g.ancestors("c").into_iter().collect();
    assert_eq!(anc, vec!["a", "b", "x"]);
    assert!(g.descendants("c").is_empty());
    assert!(g.descendants("ghost").is_empty());
}

#[test]
fn skeleton_collapses_direction() {
    let mut g = graph_of(&[("b", "a"), ("b", "c")]);
    // Antiparallel pair collapses to one skeleton edge.
    g.add_edge("a", "b").unwrap();
    let skeleton: Vec<_> = g.undirected_skeleton().into_iter().collect();
    assert_eq!(skeleton, pairs(&[("a", "b"), ("b", "c")]));
}

#[test]
fn acyclic_graph_has_no_back_edge() {
    let g = graph_of(&[("a", "b"), ("b", "c"), ("a", "c")]);
    assert!(g.is_acyclic());
    assert!(g.find_back_edge().is_none());
    assert!(g.find_cycle().is_none());
}

#[test]
fn injected_cycle_is_detected() {
    let mut g = graph_of(&[("a", "b"), ("b", "c")]);
    g.add_edge("c", "a").unwrap();
    assert!(!g.is_acyclic());
    assert_eq!(g.find_back_edge(), Some(("c".to_string(), "a".to_string())));
    assert_eq!(
        g.find_cycle().unwrap(),
        pairs(&[("a", "b"), ("b", "c"), ("c", "a")])
    );
}

#[test]
fn break_cycles_drops_weakest_edge() {
    let mut g = CausalGraph::new();
    g.add_edge_with("a", "b", CausalEdgeWeight::discovered(3)).unwrap();
    g.add_edge_with("b", "c", CausalEdgeWeight::discovered(1)).unwrap();
    g.add_edge_with("c", "a", CausalEdgeWeight::discovered(2)).unwrap();

    let broken = break_cycles(&mut g);
    assert_eq!(broken.len(), 1);
    assert_eq!((broken[0].source.as_str(), broken[0].target.as_str()), ("b", "c"));
    assert_eq!(broken[0].votes, 1);
    assert!(g.is_acyclic());
    assert_eq!(g.edges(), pairs(&[("a", "b"), ("c", "a")]));
}

#[test]
fn break_cycles_tie_goes_to_smallest_pair() {
    let mut g = graph_of(&[("b", "c"), ("c", "b")]);
    let broken = break_cycles(&mut g);
    assert_eq!(broken.len(), 1);
    assert_eq!((broken[0].source.as_str(), broken[0].target.as_str()), ("b", "c"));
    assert_eq!(g.edges(), pairs(&[("c", "b")]));
}

// =============================================================================
// Edge list round trip
// =============================================================================

#[test]
fn json_round_trip_keeps_latent_and_isolated_nodes() {
    let mut g = graph_of(&[("a", "b"), ("u", "b")]);
    g.ensure_latent("u");
    g.ensure_node("lonely");
    let json = g.to_json().unwrap();
    let back = CausalGraph::from_edge_list(&confound_core::EdgeList::from_json(&json).unwrap())
        .unwrap();
    assert!(back.is_isomorphic_to(&g));
    assert!(!back.is_observed("u"));
    assert!(back.contains_node("lonely"));
}

#[test]
fn csv_round_trip_keeps_edges() {
    let g = graph_of(&[("a", "b"), ("b", "c"), ("a", "c")]);
    let csv = g.to_csv().unwrap();
    assert!(csv.starts_with("source,target,source_observed,target_observed\n"));
    let back = CausalGraph::from_csv(&csv).unwrap();
    assert!(back.is_isomorphic_to(&g));
}

#[test]
fn csv_round_trip_keeps_latent_confounder_and_isolated_node() {
    let mut g = CausalGraph::new();
    g.ensure_latent("u,x");
    for (s, t) in [("u,x", "t"), ("u,x", "y"), ("t", "y")] {
        g.add_edge(s, t).unwrap();
    }
    g.ensure_node("lonely");

    let csv = g.to_csv().unwrap();
    assert!(csv.contains("\"u,x\",t,false,true"));
    let back = CausalGraph::from_csv(&csv).unwrap();
    assert!(back.is_isomorphic_to(&g));
    assert!(!back.is_observed("u,x"));
    assert!(back.contains_node("lonely"));

    let err = BackdoorSolver::new(&back).solve("t", "y").unwrap_err();
    assert!(matches!(err, AdjustmentError::NoValidAdjustmentSet { .. }));
}

#[test]
fn csv_with_self_loop_is_rejected() {
    let err = CausalGraph::from_csv("source,target\na,a\n").unwrap_err();
    assert_eq!(err.error_code(), "SELF_LOOP");
}

// =============================================================================
// Consensus
// =============================================================================

#[test]
fn two_against_one_keeps_majority_direction() {
    let outcome = ConsensusBuilder::new(2)
        .build(vec![
            candidate("pc", &[("a", "b")]),
            candidate("hill_climb", &[("a", "b")]),
            candidate("notears", &[("b", "a")]),
        ])
        .unwrap();
    assert!(outcome.graph.has_edge("a", "b"));
    assert!(!outcome.graph.has_edge("b", "a"));
    assert_eq!(outcome.graph.edge_votes("a", "b"), Some(2));
    assert_eq!(outcome.stats.edges_accepted, 1);
}

#[test]
fn both_directions_at_quorum_keep_the_larger_count() {
    let outcome = ConsensusBuilder::new(2)
        .build(vec![
            candidate("one", &[("a", "b")]),
            candidate("two", &[("a", "b")]),
            candidate("three", &[("a", "b")]),
            candidate("four", &[("b", "a")]),
            candidate("five", &[("b", "a")]),
        ])
        .unwrap();
    assert!(outcome.graph.has_edge("a", "b"));
    assert!(!outcome.graph.has_edge("b", "a"));
    assert_eq!(outcome.graph.edge_votes("a", "b"), Some(3));
    assert_eq!(outcome.stats.ties, 0);
    assert!(outcome
        .diagnostics
        .iter()
        .all(|d| d.kind != DiagnosticKind::ConsensusTie));
}

#[test]
fn both_directions_at_quorum_reverse_winner() {
    // Name order puts a before b, so the winner here is the backward direction.
    let outcome = ConsensusBuilder::new(2)
        .build(vec![
            candidate("one", &[("b", "a")]),
            candidate("two", &[("b", "a")]),
            candidate("three", &[("b", "a")]),
            candidate("four", &[("a", "b")]),
            candidate("five", &[("a", "b")]),
        ])
        .unwrap();
    assert!(outcome.graph.has_edge("b", "a"));
    assert!(!outcome.graph.has_edge("a", "b"));
    assert_eq!(outcome.graph.edge_votes("b", "a"), Some(3));
    assert_eq!(outcome.stats.ties, 0);
    assert!(outcome.diagnostics.is_empty());
}

#[test]
fn three_way_split_is_absent() {
    // a->b, b->a, and no edge: neither direction reaches quorum.
    let outcome = ConsensusBuilder::new(2)
        .build(vec![
            candidate("pc", &[("a", "b")]),
            candidate("hill_climb", &[("b", "a")]),
            CandidateGraph::new("notears", CausalGraph::with_nodes(["a", "b"])),
        ])
        .unwrap();
    assert_eq!(outcome.graph.edge_count(), 0);
    assert_eq!(outcome.stats.below_quorum, 1);
    assert_eq!(outcome.graph.node_names(), vec!["a", "b"]);
}

#[test]
fn tie_at_quorum_drops_edge_with_diagnostic() {
    let outcome = ConsensusBuilder::new(1)
        .build(vec![
            candidate("pc", &[("a", "b")]),
            candidate("hill_climb", &[("b", "a")]),
        ])
        .unwrap();
    assert_eq!(outcome.graph.edge_count(), 0);
    assert_eq!(outcome.stats.ties, 1);
    assert_eq!(outcome.diagnostics.len(), 1);
    assert_eq!(outcome.diagnostics[0].kind, DiagnosticKind::ConsensusTie);
    assert_eq!(outcome.diagnostics[0].stage, Stage::Consensus);
    assert_eq!(
        outcome.diagnostics[0].edge,
        Some(("a".to_string(), "b".to_string()))
    );
    assert!(outcome.diagnostics[0].detail.contains("both received 1 votes"));
}

#[test]
fn consensus_cycle_is_broken() {
    // Each edge of a->b->c->a reaches quorum; c->a has the fewest votes.
    let outcome = ConsensusBuilder::new(2)
        .build(vec![
            candidate("one", &[("a", "b"), ("b", "c"), ("c", "a")]),
            candidate("two", &[("a", "b"), ("b", "c"), ("c", "a")]),
            candidate("three", &[("a", "b"), ("b", "c")]),
        ])
        .unwrap();
    assert!(outcome.graph.is_acyclic());
    assert!(!outcome.graph.has_edge("c", "a"));
    assert_eq!(outcome.stats.cycles_broken, 1);
    assert!(outcome
        .diagnostics
        .iter()
        .any(|d| d.kind == DiagnosticKind::CycleBroken
            && d.edge == Some(("c".to_string(), "a".to_string()))));
}

#[test]
fn single_candidate_is_insufficient() {
    let err = ConsensusBuilder::default()
        .build(vec![candidate("pc", &[("a", "b")])])
        .unwrap_err();
    assert!(matches!(
        err,
        ConsensusError::InsufficientCandidates {
            succeeded: 1,
            required: 2
        }
    ));
}

#[test]
fn consensus_from_config() {
    let config = ConsensusConfig {
        quorum: 3,
        min_candidates: 3,
    };
    let builder = ConsensusBuilder::from_config(&config);
    assert_eq!(builder.quorum(), 3);
    let err = builder
        .build(vec![candidate("a", &[]), candidate("b", &[])])
        .unwrap_err();
    assert_eq!(err.error_code(), "INSUFFICIENT_CANDIDATES");
}

#[test]
fn latent_in_any_candidate_stays_latent() {
    let mut g = graph_of(&[("u", "a")]);
    g.ensure_latent("v");
    let outcome = ConsensusBuilder::new(1)
        .build(vec![
            CandidateGraph::new("one", g),
            candidate("two", &[("u", "a")]),
        ])
        .unwrap();
    assert!(outcome.graph.contains_node("v"));
    assert!(!outcome.graph.is_observed("v"));
    assert!(outcome.graph.is_observed("u"));
}

// =============================================================================
// Temporal filter
// =============================================================================

#[test]
fn later_to_earlier_edge_removed() {
    let order = TemporalOrder::from_ranks([("a", 0), ("b", 1)]);
    let outcome = TemporalFilter::new(&order).apply(graph_of(&[("b", "a")]));
    assert!(!outcome.graph.has_edge("b", "a"));
    assert_eq!(outcome.removed, 1);
    assert_eq!(outcome.diagnostics[0].kind, DiagnosticKind::TemporalViolation);

    let outcome = TemporalFilter::new(&order).apply(graph_of(&[("a", "b")]));
    assert!(outcome.graph.has_edge("a", "b"));
    assert!(outcome.diagnostics.is_empty());
}

#[test]
fn precedence_pairs_filter_transitively() {
    let order = TemporalOrder::unconstrained()
        .with_precedence([("a", "b"), ("b", "c")])
        .unwrap();
    let outcome = TemporalFilter::new(&order).apply(graph_of(&[("c", "a"), ("a", "c")]));
    assert_eq!(outcome.graph.edges(), pairs(&[("a", "c")]));
}

#[test]
fn same_rank_cycle_is_broken() {
    let order = TemporalOrder::from_ranks([("a", 0), ("b", 0)]);
    let outcome = TemporalFilter::new(&order).apply(graph_of(&[("a", "b"), ("b", "a")]));
    assert!(outcome.graph.is_acyclic());
    assert_eq!(outcome.graph.edges(), pairs(&[("b", "a")]));
    assert_eq!(outcome.diagnostics[0].kind, DiagnosticKind::CycleBroken);
}

// =============================================================================
// Domain overrides
// =============================================================================

#[test]
fn overrides_apply_in_order() {
    let order = TemporalOrder::unconstrained();
    let base = graph_of(&[("a", "b")]);
    let outcome = OverrideLayer::new(&order)
        .apply(
            &base,
            &[
                Directive::add("b", "c"),
                Directive::remove("a", "b"),
                Directive::add("a", "b").with_note("reinstated"),
            ],
        )
        .unwrap();
    assert_eq!(outcome.graph.edges(), pairs(&[("a", "b"), ("b", "c")]));
    assert_eq!(outcome.applied, 3);
    assert_eq!(
        outcome.graph.edge_weight("a", "b").unwrap().origin,
        EdgeOrigin::Domain
    );
    // Input is untouched.
    assert_eq!(base.edges(), pairs(&[("a", "b")]));
}

#[test]
fn unregistered_names_become_latent() {
    let order = TemporalOrder::unconstrained();
    let base = CausalGraph::with_nodes(["t", "y"]);
    let outcome = OverrideLayer::new(&order)
        .apply(&base, &[Directive::add("u", "t"), Directive::add("u", "y")])
        .unwrap();
    assert!(outcome.graph.contains_node("u"));
    assert!(!outcome.graph.is_observed("u"));
    assert!(outcome.graph.is_observed("t"));
}

#[test]
fn temporally_impossible_directive_is_skipped() {
    let order = TemporalOrder::from_ranks([("a", 0), ("b", 1)]);
    let outcome = OverrideLayer::new(&order)
        .apply(&CausalGraph::with_nodes(["a", "b"]), &[Directive::add("b", "a")])
        .unwrap();
    assert_eq!(outcome.graph.edge_count(), 0);
    assert_eq!(outcome.rejected, 1);
    assert_eq!(outcome.diagnostics[0].kind, DiagnosticKind::OverrideRejected);
}

#[test]
fn strict_mode_fails_on_temporal_violation() {
    let order = TemporalOrder::from_ranks([("a", 0), ("b", 1)]);
    let config = OverrideConfig {
        strict_temporal: true,
        ..Default::default()
    };
    let err = OverrideLayer::from_config(&order, &config)
        .apply(&CausalGraph::with_nodes(["a", "b"]), &[Directive::add("b", "a")])
        .unwrap_err();
    assert!(matches!(err, OverrideError::TemporalViolation { ref cause, .. } if cause == "b"));
}

#[test]
fn self_loop_directive_rejected() {
    let order = TemporalOrder::unconstrained();
    let outcome = OverrideLayer::new(&order)
        .apply(&CausalGraph::with_nodes(["a"]), &[Directive::add("a", "a")])
        .unwrap();
    assert_eq!(outcome.rejected, 1);
    assert_eq!(outcome.graph.edge_count(), 0);
}

#[test]
fn removing_absent_edge_is_recorded_noop() {
    let order = TemporalOrder::unconstrained();
    let outcome = OverrideLayer::new(&order)
        .apply(&CausalGraph::with_nodes(["a", "b"]), &[Directive::remove("a", "b")])
        .unwrap();
    assert_eq!(outcome.applied, 1);
    assert!(outcome.diagnostics[0].detail.contains("no-op"));
}

#[test]
fn cyclic_batch_rejected_atomically() {
    let order = TemporalOrder::unconstrained();
    let base = graph_of(&[("a", "b"), ("b", "c")]);
    let err = OverrideLayer::new(&order)
        .strict(false)
        .apply(&base, &[Directive::add("c", "d"), Directive::add("c", "a")])
        .unwrap_err();
    match err {
        OverrideError::DomainOverrideCycle { cycle } => {
            assert_eq!(cycle, pairs(&[("a", "b"), ("b", "c"), ("c", "a")]));
        }
        other => panic!("expected DomainOverrideCycle, got {other:?}"),
    }
    assert_eq!(base.edges(), pairs(&[("a", "b"), ("b", "c")]));
    assert!(!base.contains_node("d"));
}
