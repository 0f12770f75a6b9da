use criterion::{black_box, criterion_group, criterion_main, Criterion};

use maxflow_core::{AugmentingStrategy, FlowGraph, FordFulkerson, SolverConfig};

/// Layered network: source, `layers` layers of `width` vertices, sink
fn layered_network(layers: usize, width: usize) -> FlowGraph {
    let mut graph = FlowGraph::with_capacity(layers * width + 2, layers * width * width);
    let name = |layer: usize, i: usize| format!("l{}_{}", layer, i);

    for i in 0..width {
        graph.add_edge("s", &name(0, i), 10.0).unwrap();
        graph.add_edge(&name(layers - 1, i), "t", 10.0).unwrap();
    }
    for layer in 0..layers - 1 {
        for i in 0..width {
            for j in 0..width {
                let capacity = ((i * 7 + j * 3 + layer) % 9 + 1) as f64;
                graph.add_edge(&name(layer, i), &name(layer + 1, j), capacity).unwrap();
            }
        }
    }
    graph
}

fn bench_strategies(c: &mut Criterion) {
    let network = layered_network(8, 8);

    for strategy in [AugmentingStrategy::DepthFirst, AugmentingStrategy::BreadthFirst] {
        let solver = FordFulkerson::with_config(SolverConfig {
            strategy,
            record_paths: false,
            ..SolverConfig::default()
        });

        c.bench_function(&format!("max_flow_{}", strategy.as_str()), |b| {
            b.iter(|| {
                let mut graph = network.clone();
                solver.solve(black_box(&mut graph), "s", "t").unwrap()
            });
        });
    }
}

fn bench_construction(c: &mut Criterion) {
    c.bench_function("layered_network_construction", |b| {
        b.iter(|| layered_network(black_box(8), black_box(8)));
    });
}

criterion_group!(benches, bench_strategies, bench_construction);
criterion_main!(benches);
