//! Maximum flow over named, capacitated directed graphs
//!
//! The crate builds a flow network in memory and computes the maximum flow
//! between a source and a sink with the Ford-Fulkerson augmenting-path
//! method. Edges live in an arena and are identified by `EdgeId`; every edge
//! has a zero-capacity reverse partner used for flow cancellation.
//!
//! ```
//! use maxflow_core::{FlowGraph, FordFulkerson};
//!
//! let mut graph = FlowGraph::new();
//! graph.add_edge("s", "a", 3.0)?;
//! graph.add_edge("a", "t", 2.0)?;
//!
//! let result = FordFulkerson::new().solve(&mut graph, "s", "t")?;
//! assert_eq!(result.max_flow, 2.0);
//! # Ok::<(), maxflow_core::FlowError>(())
//! ```
//!
//! Copyright (c) 2025 Mohammad Atashi <mohammadaliatashi@icloud.com>

pub mod algorithm;
pub mod data_structures;
pub mod validation;

pub use algorithm::graph::{
    max_flow, min_cut, AugmentingPath, AugmentingStrategy, FlowMetrics, FordFulkerson,
    MaxFlowResult, MinCut, SolverConfig,
};
pub use algorithm::traits::{
    Algorithm, AlgorithmParameter, Capacity, EdgeId, Flow, FlowError, ParameterType, VertexId,
};
pub use data_structures::graph::{EdgeKind, FlowEdge, FlowGraph};
pub use validation::invariants::FlowInvariants;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
