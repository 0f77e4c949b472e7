use criterion::{criterion_group, criterion_main, Criterion};

use confound_causal::{BackdoorSolver, CausalGraph};

/// `width` confounders of t and y, each fed by its own upstream cause, plus
/// a mediator chain of length `width` on the causal path.
fn build_confounded(width: usize) -> CausalGraph {
    let mut graph = CausalGraph::new();
    for i in 0..width {
        let c = format!("c{i:03}");
        let u = format!("u{i:03}");
        graph.add_edge(&u, &c).unwrap();
        graph.add_edge(&c, "t").unwrap();
        graph.add_edge(&c, "y").unwrap();
    }
    let mut prev = "t".to_string();
    for i in 0..width {
        let m = format!("m{i:03}");
        graph.add_edge(&prev, &m).unwrap();
        prev = m;
    }
    graph.add_edge(&prev, "y").unwrap();
    assert!(graph.is_acyclic());
    graph
}

/// Layered DAG: every node in layer k points at every node in layer k+1.
fn build_layered(layers: usize, per_layer: usize) -> CausalGraph {
    let mut graph = CausalGraph::new();
    for k in 0..layers.saturating_sub(1) {
        for i in 0..per_layer {
            for j in 0..per_layer {
                graph
                    .add_edge(&format!("l{k}_{i}"), &format!("l{}_{j}", k + 1))
                    .unwrap();
            }
        }
    }
    graph
}

fn bench_solve_confounded(c: &mut Criterion) {
    let graph = build_confounded(20);
    c.bench_function("solve_20_confounders", |b| {
        b.iter(|| {
            let set = BackdoorSolver::new(&graph).solve("t", "y").unwrap();
            assert_eq!(set.len(), 20);
        })
    });
}

fn bench_paths_layered(c: &mut Criterion) {
    let graph = build_layered(3, 3);
    c.bench_function("backdoor_paths_layered_3x3", |b| {
        b.iter(|| {
            BackdoorSolver::new(&graph)
                .backdoor_paths("l1_0", "l2_0")
                .unwrap()
        })
    });
}

criterion_group!(benches, bench_solve_confounded, bench_paths_layered);
criterion_main!(benches);
