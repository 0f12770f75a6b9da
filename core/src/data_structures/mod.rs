//! Graph storage for flow computations

pub mod graph;

pub use self::graph::{EdgeKind, FlowEdge, FlowGraph};
