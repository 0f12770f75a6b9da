//! Minimum cut extraction from a saturated flow graph
//!
//! Once no augmenting path remains, the vertices still reachable from the
//! source through edges with spare residual capacity form the source side of
//! a minimum cut. The forward edges leaving that side are saturated and their
//! capacities sum to the maximum flow.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use crate::algorithm::traits::{Capacity, EdgeId, VertexId};
use crate::data_structures::graph::FlowGraph;

/// Source/sink partition with its crossing edges
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MinCut {
    /// Vertices reachable from the source in the residual graph
    pub source_side: Vec<String>,
    /// Every other vertex
    pub sink_side: Vec<String>,
    /// Forward edges from the source side to the sink side
    pub cut_edges: Vec<EdgeId>,
    /// Sum of the cut edges' capacities
    pub capacity: Capacity,
    /// Whether the sink ended up on the sink side
    pub separates: bool,
}

/// Marks the vertices reachable from `source` over edges whose residual
/// exceeds `tolerance`
pub fn residual_reachable(graph: &FlowGraph, source: VertexId, tolerance: f64) -> Vec<bool> {
    let mut reachable = vec![false; graph.vertex_count()];
    if source.0 >= reachable.len() {
        return reachable;
    }

    let mut queue = VecDeque::new();
    reachable[source.0] = true;
    queue.push_back(source);

    while let Some(vertex) = queue.pop_front() {
        for &edge in graph.edges_from_id(vertex) {
            let head = graph.edge_at(edge).sink;
            if !reachable[head.0] && graph.residual(edge) > tolerance {
                reachable[head.0] = true;
                queue.push_back(head);
            }
        }
    }

    reachable
}

/// Extracts the minimum cut induced by the graph's current flow.
///
/// Meaningful after a max-flow run; on an unsolved graph it returns the cut
/// around everything the source can reach. An unknown source yields an empty
/// source side.
pub fn min_cut(graph: &FlowGraph, source: &str, sink: &str, tolerance: f64) -> MinCut {
    let reachable = match graph.vertex_id(source) {
        Some(id) => residual_reachable(graph, id, tolerance),
        None => vec![false; graph.vertex_count()],
    };

    let (source_side, sink_side): (Vec<_>, Vec<_>) = graph
        .vertices()
        .partition(|(id, _)| reachable[id.0]);

    let cut_edges: Vec<EdgeId> = graph
        .forward_edges()
        .filter(|(_, edge)| reachable[edge.source.0] && !reachable[edge.sink.0])
        .map(|(id, _)| id)
        .collect();

    let capacity: Capacity = cut_edges
        .iter()
        .map(|&id| graph.edge_at(id).capacity)
        .sum();

    let separates = graph
        .vertex_id(sink)
        .map_or(true, |id| !reachable[id.0]);

    MinCut {
        source_side: source_side.into_iter().map(|(_, name)| name.to_owned()).collect(),
        sink_side: sink_side.into_iter().map(|(_, name)| name.to_owned()).collect(),
        cut_edges,
        capacity,
        separates,
    }
}

/// Minimum cut capacity by enumerating every vertex partition; small graphs
/// only
#[cfg(test)]
pub(crate) fn brute_force_min_cut(graph: &FlowGraph, source: &str, sink: &str) -> Capacity {
    let n = graph.vertex_count();
    let (s, t) = match (graph.vertex_id(source), graph.vertex_id(sink)) {
        (Some(s), Some(t)) => (s.0, t.0),
        _ => return 0.0,
    };

    let mut best = Capacity::INFINITY;
    for mask in 0u32..(1 << n) {
        let on_source_side = |v: usize| mask & (1 << v) != 0;
        if !on_source_side(s) || on_source_side(t) {
            continue;
        }
        let capacity: Capacity = graph
            .forward_edges()
            .filter(|(_, e)| on_source_side(e.source.0) && !on_source_side(e.sink.0))
            .map(|(_, e)| e.capacity)
            .sum();
        best = best.min(capacity);
    }
    best
}
