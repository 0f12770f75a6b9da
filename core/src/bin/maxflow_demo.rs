//! Max-flow demo driver
//!
//! Builds the six-vertex sample network, solves it and prints a JSON report.
//! An optional first argument names a JSON file holding a `SolverConfig`.
//! Log output is controlled through `RUST_LOG`.

use std::error::Error;
use std::fs;

use log::{error, info};
use serde::Serialize;

use maxflow_core::{min_cut, FlowGraph, FordFulkerson, MaxFlowResult, MinCut, SolverConfig};

#[derive(Serialize)]
struct Report {
    source: &'static str,
    sink: &'static str,
    result: MaxFlowResult,
    min_cut: MinCut,
}

fn load_config() -> Result<SolverConfig, Box<dyn Error>> {
    match std::env::args().nth(1) {
        Some(path) => {
            info!("Loading solver configuration from {}", path);
            let raw = fs::read_to_string(&path)?;
            Ok(serde_json::from_str(&raw)?)
        }
        None => Ok(SolverConfig::default()),
    }
}

fn sample_network() -> Result<FlowGraph, Box<dyn Error>> {
    let mut graph = FlowGraph::new();
    for vertex in ["s", "o", "p", "q", "r", "t"] {
        graph.add_vertex(vertex);
    }
    for (u, v, capacity) in [
        ("s", "o", 3.0),
        ("s", "p", 3.0),
        ("o", "p", 2.0),
        ("o", "q", 3.0),
        ("p", "r", 2.0),
        ("r", "t", 3.0),
        ("q", "r", 4.0),
        ("q", "t", 2.0),
    ] {
        graph.add_edge(u, v, capacity)?;
    }
    Ok(graph)
}

fn run() -> Result<(), Box<dyn Error>> {
    let config = load_config()?;
    let tolerance = config.tolerance;
    let mut graph = sample_network()?;

    let result = FordFulkerson::with_config(config).solve(&mut graph, "s", "t")?;
    info!(
        "Maximum flow s -> t = {} ({} augmentations)",
        result.max_flow, result.metrics.augmentations
    );

    let report = Report {
        source: "s",
        sink: "t",
        min_cut: min_cut(&graph, "s", "t", tolerance),
        result,
    };
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

fn main() {
    env_logger::init();

    if let Err(e) = run() {
        error!("Max flow demo failed: {}", e);
        std::process::exit(1);
    }
}
