//! Network flow algorithms over `FlowGraph`
//! Copyright (c) 2025 Mohammad Atashi <mohammadaliatashi@icloud.com>

pub mod max_flow;
pub mod min_cut;

pub use self::max_flow::{
    max_flow, AugmentingPath, AugmentingStrategy, FlowMetrics, FordFulkerson, MaxFlowResult,
    PathStep, SolverConfig,
};
pub use self::min_cut::{min_cut, residual_reachable, MinCut};
