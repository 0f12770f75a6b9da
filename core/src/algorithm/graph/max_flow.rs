//! Ford-Fulkerson Maximum Flow Implementation
//!
//! Repeatedly searches the residual graph for an augmenting path from source
//! to sink, pushes the path's bottleneck along it (and takes the same amount
//! back from every paired reverse edge), and stops once no path remains. The
//! result is the total flow leaving the source.
//!
//! The default search is a depth-first traversal that tracks used edges
//! rather than visited vertices; the breadth-first variant yields the
//! Edmonds-Karp shortest-augmenting-path schedule.
//!
//! Copyright (c) 2025 Mohammad Atashi <mohammadaliatashi@icloud.com>

use std::collections::VecDeque;
use std::time::Instant;

use log::{debug, error, trace, warn};
use serde::{Deserialize, Serialize};

use crate::algorithm::traits::{
    Algorithm, AlgorithmParameter, Capacity, EdgeId, Flow, FlowError, ParameterType, VertexId,
};
use crate::data_structures::graph::FlowGraph;
use crate::validation::invariants::{FlowInvariants, DEFAULT_EPSILON};

/// Augmenting path search variants
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AugmentingStrategy {
    /// Ford-Fulkerson with DFS path finding, first path in adjacency order wins
    #[default]
    DepthFirst,
    /// Edmonds-Karp with BFS shortest augmenting paths
    BreadthFirst,
}

impl AugmentingStrategy {
    pub fn as_str(self) -> &'static str {
        match self {
            AugmentingStrategy::DepthFirst => "depth_first",
            AugmentingStrategy::BreadthFirst => "breadth_first",
        }
    }
}

/// Solver configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SolverConfig {
    /// Path search variant
    pub strategy: AugmentingStrategy,
    /// Edges are traversable while their residual exceeds this value
    pub tolerance: f64,
    /// Abort once this many augmentations have been applied
    pub max_augmentations: Option<usize>,
    /// Keep every augmenting path in the result
    pub record_paths: bool,
    /// Check conservation, capacity and skew symmetry after solving
    pub verify_invariants: bool,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            strategy: AugmentingStrategy::DepthFirst,
            tolerance: 0.0,
            max_augmentations: None,
            record_paths: true,
            verify_invariants: false,
        }
    }
}

/// One edge of a found path together with its residual at search time
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PathStep {
    pub edge: EdgeId,
    pub residual: Capacity,
}

/// Augmenting path as applied to the flow table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AugmentingPath {
    /// Vertices from source to sink
    pub vertices: Vec<String>,
    /// Edges from source to sink
    pub edges: Vec<EdgeId>,
    /// Flow pushed along the path
    pub bottleneck: Flow,
}

/// Solver performance metrics
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FlowMetrics {
    /// Number of augmentations applied
    pub augmentations: usize,
    /// Number of path searches, including the final failing one
    pub searches: usize,
    /// Adjacency entries inspected across all searches
    pub edges_examined: usize,
    /// Wall-clock solve time
    pub execution_time_ms: f64,
}

/// Maximum flow result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MaxFlowResult {
    /// Total flow leaving the source
    pub max_flow: Flow,
    /// Applied augmenting paths, in order
    pub augmenting_paths: Vec<AugmentingPath>,
    /// Solver metrics
    pub metrics: FlowMetrics,
}

/// Ford-Fulkerson solver
#[derive(Debug, Clone, Default)]
pub struct FordFulkerson {
    config: SolverConfig,
}

impl FordFulkerson {
    /// Creates a solver with the default configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a solver with the given configuration
    pub fn with_config(config: SolverConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &SolverConfig {
        &self.config
    }

    /// Computes the maximum flow from `source` to `sink`, mutating the
    /// graph's flow table in place.
    ///
    /// Solving continues from whatever flow the graph already carries, so a
    /// second call on a saturated graph finds no path and reports the same
    /// total. A source or sink the graph has never seen yields zero flow.
    ///
    /// # Errors
    /// * `IdenticalTerminals` - `source == sink`
    /// * `InternalInconsistency` - a path edge is linked to itself; the flow
    ///   table is left as it was before that augmentation
    /// * `AugmentationLimitExceeded` - `max_augmentations` reached while
    ///   augmenting paths remain
    /// * `InvariantViolation` - post-solve verification failed
    pub fn solve(
        &self,
        graph: &mut FlowGraph,
        source: &str,
        sink: &str,
    ) -> Result<MaxFlowResult, FlowError> {
        if source == sink {
            return Err(FlowError::IdenticalTerminals { vertex: source.to_owned() });
        }

        let start_time = Instant::now();
        let mut metrics = FlowMetrics::default();
        let mut augmenting_paths = Vec::new();

        let (source_id, sink_id) = match (graph.vertex_id(source), graph.vertex_id(sink)) {
            (Some(s), Some(t)) => (s, t),
            (s, t) => {
                if s.is_none() {
                    warn!("Source vertex '{}' is not part of the graph", source);
                }
                if t.is_none() {
                    warn!("Sink vertex '{}' is not part of the graph", sink);
                }
                metrics.execution_time_ms = start_time.elapsed().as_secs_f64() * 1000.0;
                return Ok(MaxFlowResult {
                    max_flow: graph.outflow(source),
                    augmenting_paths,
                    metrics,
                });
            }
        };

        debug!(
            "Solving max flow {} -> {} with {:?} over {} vertices and {} edges",
            source,
            sink,
            self.config.strategy,
            graph.vertex_count(),
            graph.edge_count()
        );

        while let Some(path) = self.find_augmenting_path(graph, source_id, sink_id, &mut metrics) {
            if let Some(limit) = self.config.max_augmentations {
                if metrics.augmentations >= limit {
                    warn!("Augmentation limit of {} reached with paths remaining", limit);
                    return Err(FlowError::AugmentationLimitExceeded { limit });
                }
            }

            let bottleneck = Self::bottleneck(&path);
            Self::check_path(graph, &path)?;
            for step in &path {
                graph.push_flow(step.edge, bottleneck)?;
            }
            metrics.augmentations += 1;

            trace!(
                "Augmentation {}: pushed {} along {} edges",
                metrics.augmentations,
                bottleneck,
                path.len()
            );

            if self.config.record_paths {
                augmenting_paths.push(Self::describe_path(graph, source_id, &path, bottleneck));
            }
        }

        let max_flow = graph.outflow(source);
        metrics.execution_time_ms = start_time.elapsed().as_secs_f64() * 1000.0;

        if self.config.verify_invariants {
            FlowInvariants::new(self.config.tolerance.max(DEFAULT_EPSILON))
                .check(graph, source, sink)?;
        }

        debug!(
            "Max flow {} -> {} = {} after {} augmentations",
            source, sink, max_flow, metrics.augmentations
        );

        Ok(MaxFlowResult {
            max_flow,
            augmenting_paths,
            metrics,
        })
    }

    /// Finds the next augmenting path with the configured strategy
    pub fn find_augmenting_path(
        &self,
        graph: &FlowGraph,
        source: VertexId,
        sink: VertexId,
        metrics: &mut FlowMetrics,
    ) -> Option<Vec<PathStep>> {
        metrics.searches += 1;
        match self.config.strategy {
            AugmentingStrategy::DepthFirst => {
                depth_first_path(graph, source, sink, self.config.tolerance, metrics)
            }
            AugmentingStrategy::BreadthFirst => {
                breadth_first_path(graph, source, sink, self.config.tolerance, metrics)
            }
        }
    }

    /// Minimum residual along the path
    fn bottleneck(path: &[PathStep]) -> Flow {
        path.iter()
            .map(|step| step.residual)
            .fold(Flow::INFINITY, Flow::min)
    }

    /// Verifies every path edge before any of them is updated
    fn check_path(graph: &FlowGraph, path: &[PathStep]) -> Result<(), FlowError> {
        for step in path {
            if graph.edge_at(step.edge).reverse == step.edge {
                error!("Edge {} is its own reverse; aborting augmentation", step.edge);
                return Err(FlowError::InternalInconsistency {
                    edge: step.edge,
                    reason: "edge is its own reverse".into(),
                });
            }
        }
        Ok(())
    }

    fn describe_path(
        graph: &FlowGraph,
        source: VertexId,
        path: &[PathStep],
        bottleneck: Flow,
    ) -> AugmentingPath {
        let name = |id: VertexId| graph.vertex_name(id).map(str::to_owned).unwrap_or_default();

        let mut vertices = Vec::with_capacity(path.len() + 1);
        vertices.push(name(source));
        vertices.extend(path.iter().map(|step| name(graph.edge_at(step.edge).sink)));

        AugmentingPath {
            vertices,
            edges: path.iter().map(|step| step.edge).collect(),
            bottleneck,
        }
    }
}

/// Search frame: a vertex and the next adjacency slot to try
struct Frame {
    vertex: VertexId,
    cursor: usize,
}

/// Depth-first augmenting path search over a fresh used-edge set.
///
/// An edge is taken at most once per search; marks survive backtracking, but
/// a vertex stays reachable through any other unused edge. The explicit
/// frame stack reproduces the recursive visiting order.
fn depth_first_path(
    graph: &FlowGraph,
    source: VertexId,
    sink: VertexId,
    tolerance: f64,
    metrics: &mut FlowMetrics,
) -> Option<Vec<PathStep>> {
    let mut used = vec![false; graph.edge_count()];
    let mut path: Vec<PathStep> = Vec::new();
    let mut stack = vec![Frame { vertex: source, cursor: 0 }];

    while let Some(frame) = stack.last_mut() {
        let edges = graph.edges_from_id(frame.vertex);

        let mut next = None;
        while frame.cursor < edges.len() {
            let edge = edges[frame.cursor];
            frame.cursor += 1;
            metrics.edges_examined += 1;

            let residual = graph.residual(edge);
            if residual > tolerance && !used[edge.0] {
                used[edge.0] = true;
                next = Some(PathStep { edge, residual });
                break;
            }
        }

        match next {
            Some(step) => {
                let head = graph.edge_at(step.edge).sink;
                path.push(step);
                if head == sink {
                    return Some(path);
                }
                stack.push(Frame { vertex: head, cursor: 0 });
            }
            None => {
                stack.pop();
                path.pop();
            }
        }
    }

    None
}

/// Breadth-first augmenting path search (fewest edges, adjacency order on
/// ties)
fn breadth_first_path(
    graph: &FlowGraph,
    source: VertexId,
    sink: VertexId,
    tolerance: f64,
    metrics: &mut FlowMetrics,
) -> Option<Vec<PathStep>> {
    let n = graph.vertex_count();
    let mut visited = vec![false; n];
    let mut parent: Vec<Option<PathStep>> = vec![None; n];
    let mut queue = VecDeque::new();

    visited[source.0] = true;
    queue.push_back(source);

    while let Some(vertex) = queue.pop_front() {
        for &edge in graph.edges_from_id(vertex) {
            metrics.edges_examined += 1;

            let head = graph.edge_at(edge).sink;
            let residual = graph.residual(edge);
            if visited[head.0] || residual <= tolerance {
                continue;
            }

            visited[head.0] = true;
            parent[head.0] = Some(PathStep { edge, residual });

            if head == sink {
                let mut path = Vec::new();
                let mut current = sink;
                while let Some(step) = parent[current.0] {
                    path.push(step);
                    current = graph.edge_at(step.edge).source;
                }
                path.reverse();
                return Some(path);
            }
            queue.push_back(head);
        }
    }

    None
}

/// Computes the maximum flow with the default solver
pub fn max_flow(graph: &mut FlowGraph, source: &str, sink: &str) -> Result<Flow, FlowError> {
    FordFulkerson::new()
        .solve(graph, source, sink)
        .map(|result| result.max_flow)
}

fn parse_bool(name: &str, value: &str) -> Result<bool, FlowError> {
    value.parse::<bool>().map_err(|_| FlowError::InvalidParameter {
        name: name.to_owned(),
        reason: format!("expected true or false, got '{}'", value),
    })
}

impl Algorithm for FordFulkerson {
    fn name(&self) -> &'static str {
        match self.config.strategy {
            AugmentingStrategy::DepthFirst => "Ford-Fulkerson",
            AugmentingStrategy::BreadthFirst => "Edmonds-Karp",
        }
    }

    fn category(&self) -> &'static str {
        "max_flow"
    }

    fn description(&self) -> String {
        match self.config.strategy {
            AugmentingStrategy::DepthFirst => {
                "Ford-Fulkerson maximum flow with depth-first augmenting path search over a \
                 per-search used-edge set. O(E * f) for integral capacities, where f is the \
                 maximum flow value."
                    .to_string()
            }
            AugmentingStrategy::BreadthFirst => {
                "Edmonds-Karp maximum flow with breadth-first shortest augmenting paths. \
                 O(V * E^2) independent of capacities."
                    .to_string()
            }
        }
    }

    fn parameters(&self) -> Vec<AlgorithmParameter> {
        vec![
            AlgorithmParameter {
                name: "strategy".into(),
                value: self.config.strategy.as_str().into(),
                value_type: ParameterType::Enum(vec![
                    "depth_first".into(),
                    "breadth_first".into(),
                ]),
                description: "Augmenting path search variant".into(),
            },
            AlgorithmParameter {
                name: "tolerance".into(),
                value: self.config.tolerance.to_string(),
                value_type: ParameterType::Float,
                description: "Residual capacity an edge must exceed to be traversed".into(),
            },
            AlgorithmParameter {
                name: "max_augmentations".into(),
                value: self
                    .config
                    .max_augmentations
                    .map_or_else(|| "none".to_string(), |limit| limit.to_string()),
                value_type: ParameterType::Integer,
                description: "Abort after this many augmentations".into(),
            },
            AlgorithmParameter {
                name: "record_paths".into(),
                value: self.config.record_paths.to_string(),
                value_type: ParameterType::Boolean,
                description: "Keep augmenting paths in the result".into(),
            },
            AlgorithmParameter {
                name: "verify_invariants".into(),
                value: self.config.verify_invariants.to_string(),
                value_type: ParameterType::Boolean,
                description: "Check flow invariants after solving".into(),
            },
        ]
    }

    fn set_parameter(&mut self, name: &str, value: &str) -> Result<(), FlowError> {
        match name {
            "strategy" => {
                self.config.strategy = match value {
                    "depth_first" => AugmentingStrategy::DepthFirst,
                    "breadth_first" => AugmentingStrategy::BreadthFirst,
                    _ => {
                        return Err(FlowError::InvalidParameter {
                            name: name.to_owned(),
                            reason: format!("unknown strategy '{}'", value),
                        })
                    }
                };
                Ok(())
            }
            "tolerance" => {
                let tolerance = value.parse::<f64>().map_err(|_| FlowError::InvalidParameter {
                    name: name.to_owned(),
                    reason: "tolerance must be a number".to_string(),
                })?;
                if !tolerance.is_finite() || tolerance < 0.0 {
                    return Err(FlowError::InvalidParameter {
                        name: name.to_owned(),
                        reason: "tolerance must be finite and >= 0".to_string(),
                    });
                }
                self.config.tolerance = tolerance;
                Ok(())
            }
            "max_augmentations" => {
                if value == "none" {
                    self.config.max_augmentations = None;
                    return Ok(());
                }
                let limit = value
                    .parse::<usize>()
                    .ok()
                    .filter(|&limit| limit > 0)
                    .ok_or_else(|| FlowError::InvalidParameter {
                        name: name.to_owned(),
                        reason: "max_augmentations must be a positive integer or 'none'".to_string(),
                    })?;
                self.config.max_augmentations = Some(limit);
                Ok(())
            }
            "record_paths" => {
                self.config.record_paths = parse_bool(name, value)?;
                Ok(())
            }
            "verify_invariants" => {
                self.config.verify_invariants = parse_bool(name, value)?;
                Ok(())
            }
            _ => Err(FlowError::InvalidParameter {
                name: name.to_owned(),
                reason: "unknown parameter".to_string(),
            }),
        }
    }

    fn get_parameter(&self, name: &str) -> Option<String> {
        self.parameters()
            .into_iter()
            .find(|p| p.name == name)
            .map(|p| p.value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algorithm::graph::min_cut::{brute_force_min_cut, min_cut};
    use proptest::prelude::*;

    fn verifying_solver(strategy: AugmentingStrategy) -> FordFulkerson {
        FordFulkerson::with_config(SolverConfig {
            strategy,
            verify_invariants: true,
            ..SolverConfig::default()
        })
    }

    /// s,o,p,q,r,t network with max flow 5
    fn sample_network() -> FlowGraph {
        let mut graph = FlowGraph::new();
        for vertex in ["s", "o", "p", "q", "r", "t"] {
            graph.add_vertex(vertex);
        }
        graph.add_edge("s", "o", 3.0).unwrap();
        graph.add_edge("s", "p", 3.0).unwrap();
        graph.add_edge("o", "p", 2.0).unwrap();
        graph.add_edge("o", "q", 3.0).unwrap();
        graph.add_edge("p", "r", 2.0).unwrap();
        graph.add_edge("r", "t", 3.0).unwrap();
        graph.add_edge("q", "r", 4.0).unwrap();
        graph.add_edge("q", "t", 2.0).unwrap();
        graph
    }

    #[test]
    fn test_sample_network() {
        let mut graph = sample_network();
        let result = verifying_solver(AugmentingStrategy::DepthFirst)
            .solve(&mut graph, "s", "t")
            .unwrap();

        assert_eq!(result.max_flow, 5.0);
        assert_eq!(result.augmenting_paths.len(), result.metrics.augmentations);
        assert_eq!(result.metrics.searches, result.metrics.augmentations + 1);

        let pushed: Flow = result.augmenting_paths.iter().map(|p| p.bottleneck).sum();
        assert_eq!(pushed, 5.0);
    }

    #[test]
    fn test_first_path_follows_adjacency_order() {
        let mut graph = sample_network();
        let result = FordFulkerson::new().solve(&mut graph, "s", "t").unwrap();

        // s->o is tried first, then o->p, p->r, r->t
        let first = &result.augmenting_paths[0];
        assert_eq!(first.vertices, vec!["s", "o", "p", "r", "t"]);
        assert_eq!(first.bottleneck, 2.0);
    }

    #[test]
    fn test_single_edge() {
        let mut graph = FlowGraph::new();
        let e = graph.add_edge("a", "b", 7.0).unwrap();

        assert_eq!(max_flow(&mut graph, "a", "b").unwrap(), 7.0);
        assert_eq!(graph.flow(e).unwrap(), 7.0);
        assert_eq!(graph.residual_capacity(e).unwrap(), 0.0);
        assert_eq!(graph.flow(graph.reverse_of(e).unwrap()).unwrap(), -7.0);
    }

    #[test]
    fn test_disconnected_sink() {
        let mut graph = sample_network();
        graph.add_vertex("z");

        let result = FordFulkerson::new().solve(&mut graph, "s", "z").unwrap();
        assert_eq!(result.max_flow, 0.0);
        assert!(result.augmenting_paths.is_empty());
        assert_eq!(result.metrics.searches, 1);
    }

    #[test]
    fn test_unknown_terminals_yield_zero() {
        let mut graph = sample_network();

        assert_eq!(max_flow(&mut graph, "nowhere", "t").unwrap(), 0.0);
        assert_eq!(max_flow(&mut graph, "s", "nowhere").unwrap(), 0.0);
        assert!(graph.forward_edges().all(|(id, _)| graph.flow(id).unwrap() == 0.0));
    }

    #[test]
    fn test_identical_terminals_rejected() {
        let mut graph = sample_network();
        assert_eq!(
            max_flow(&mut graph, "s", "s"),
            Err(FlowError::IdenticalTerminals { vertex: "s".into() })
        );
    }

    #[test]
    fn test_second_run_is_idempotent() {
        let mut graph = sample_network();
        let solver = FordFulkerson::new();

        let first = solver.solve(&mut graph, "s", "t").unwrap();
        let flows: Vec<Flow> = graph.edges().map(|(id, _)| graph.flow(id).unwrap()).collect();

        let second = solver.solve(&mut graph, "s", "t").unwrap();
        assert_eq!(second.max_flow, first.max_flow);
        assert_eq!(second.metrics.augmentations, 0);

        let again: Vec<Flow> = graph.edges().map(|(id, _)| graph.flow(id).unwrap()).collect();
        assert_eq!(flows, again);
    }

    #[test]
    fn test_flow_cancellation_through_reverse_edge() {
        // DFS first takes s->a->b->t and must later cancel a->b
        let mut graph = FlowGraph::new();
        graph.add_edge("s", "a", 1.0).unwrap();
        graph.add_edge("s", "b", 1.0).unwrap();
        let ab = graph.add_edge("a", "b", 1.0).unwrap();
        graph.add_edge("a", "t", 1.0).unwrap();
        graph.add_edge("b", "t", 1.0).unwrap();

        let result = verifying_solver(AugmentingStrategy::DepthFirst)
            .solve(&mut graph, "s", "t")
            .unwrap();

        assert_eq!(result.max_flow, 2.0);
        assert_eq!(result.augmenting_paths[0].vertices, vec!["s", "a", "b", "t"]);
        assert_eq!(result.augmenting_paths[1].vertices, vec!["s", "b", "a", "t"]);
        assert_eq!(graph.flow(ab).unwrap(), 0.0);
    }

    #[test]
    fn test_vertex_reachable_through_second_edge() {
        // Parallel edges into m: the first is saturated, the second still
        // carries flow within the same search
        let mut graph = FlowGraph::new();
        graph.add_edge("s", "m", 1.0).unwrap();
        graph.add_edge("s", "m", 2.0).unwrap();
        graph.add_edge("m", "t", 10.0).unwrap();

        let result = FordFulkerson::new().solve(&mut graph, "s", "t").unwrap();
        assert_eq!(result.max_flow, 3.0);
        assert_eq!(result.metrics.augmentations, 2);
    }

    #[test]
    fn test_cycles_terminate() {
        let mut graph = FlowGraph::new();
        graph.add_edge("s", "a", 5.0).unwrap();
        graph.add_edge("a", "b", 5.0).unwrap();
        graph.add_edge("b", "a", 5.0).unwrap();
        graph.add_edge("b", "c", 5.0).unwrap();
        graph.add_edge("c", "a", 5.0).unwrap();
        graph.add_edge("c", "t", 3.0).unwrap();

        let result = verifying_solver(AugmentingStrategy::DepthFirst)
            .solve(&mut graph, "s", "t")
            .unwrap();
        assert_eq!(result.max_flow, 3.0);
    }

    #[test]
    fn test_breadth_first_matches_depth_first() {
        let mut dfs_graph = sample_network();
        let mut bfs_graph = sample_network();

        let dfs = verifying_solver(AugmentingStrategy::DepthFirst)
            .solve(&mut dfs_graph, "s", "t")
            .unwrap();
        let bfs = verifying_solver(AugmentingStrategy::BreadthFirst)
            .solve(&mut bfs_graph, "s", "t")
            .unwrap();

        assert_eq!(dfs.max_flow, bfs.max_flow);
        // Shortest path first: s->o->q->t has three edges
        assert_eq!(bfs.augmenting_paths[0].vertices, vec!["s", "o", "q", "t"]);
    }

    #[test]
    fn test_internal_inconsistency_halts() {
        let mut graph = FlowGraph::new();
        let e = graph.add_edge("a", "b", 4.0).unwrap();
        graph.corrupt_reverse_link(e);

        let result = FordFulkerson::new().solve(&mut graph, "a", "b");
        assert!(matches!(
            result,
            Err(FlowError::InternalInconsistency { edge, .. }) if edge == e
        ));
        assert_eq!(graph.flow(e).unwrap(), 0.0);
    }

    #[test]
    fn test_augmentation_limit() {
        let mut graph = sample_network();
        let solver = FordFulkerson::with_config(SolverConfig {
            max_augmentations: Some(1),
            ..SolverConfig::default()
        });

        assert_eq!(
            solver.solve(&mut graph, "s", "t"),
            Err(FlowError::AugmentationLimitExceeded { limit: 1 })
        );
        // The applied augmentation stays in place
        assert_eq!(graph.outflow("s"), 2.0);
    }

    #[test]
    fn test_tolerance_skips_tiny_residuals() {
        let mut graph = FlowGraph::new();
        graph.add_edge("s", "t", 1e-12).unwrap();
        graph.add_edge("s", "m", 1.0).unwrap();
        graph.add_edge("m", "t", 1.0).unwrap();

        let solver = FordFulkerson::with_config(SolverConfig {
            tolerance: 1e-9,
            ..SolverConfig::default()
        });
        let result = solver.solve(&mut graph, "s", "t").unwrap();
        assert_eq!(result.max_flow, 1.0);
    }

    #[test]
    fn test_record_paths_disabled() {
        let mut graph = sample_network();
        let solver = FordFulkerson::with_config(SolverConfig {
            record_paths: false,
            ..SolverConfig::default()
        });

        let result = solver.solve(&mut graph, "s", "t").unwrap();
        assert_eq!(result.max_flow, 5.0);
        assert!(result.augmenting_paths.is_empty());
        assert!(result.metrics.augmentations > 0);
    }

    #[test]
    fn test_solver_creation() {
        let solver = FordFulkerson::new();
        assert_eq!(solver.name(), "Ford-Fulkerson");
        assert_eq!(solver.category(), "max_flow");
        assert_eq!(solver.parameters().len(), 5);
    }

    #[test]
    fn test_parameter_setting() {
        let mut solver = FordFulkerson::new();

        assert!(solver.set_parameter("strategy", "breadth_first").is_ok());
        assert_eq!(solver.get_parameter("strategy"), Some("breadth_first".to_string()));
        assert_eq!(solver.name(), "Edmonds-Karp");

        assert!(solver.set_parameter("tolerance", "0.001").is_ok());
        assert_eq!(solver.config().tolerance, 0.001);

        assert!(solver.set_parameter("max_augmentations", "25").is_ok());
        assert_eq!(solver.get_parameter("max_augmentations"), Some("25".to_string()));
        assert!(solver.set_parameter("max_augmentations", "none").is_ok());
        assert_eq!(solver.config().max_augmentations, None);

        assert!(solver.set_parameter("verify_invariants", "true").is_ok());
        assert!(solver.config().verify_invariants);

        // Invalid parameters
        assert!(solver.set_parameter("invalid_param", "value").is_err());
        assert!(solver.set_parameter("strategy", "random").is_err());
        assert!(solver.set_parameter("tolerance", "-1").is_err());
        assert!(solver.set_parameter("tolerance", "abc").is_err());
        assert!(solver.set_parameter("max_augmentations", "0").is_err());
        assert!(solver.set_parameter("record_paths", "yes").is_err());

        let params = solver.get_parameters();
        assert_eq!(params.get("record_paths"), Some(&"true".to_string()));
    }

    #[test]
    fn test_config_from_json() {
        let config: SolverConfig =
            serde_json::from_str(r#"{ "strategy": "breadth_first", "max_augmentations": 50 }"#)
                .unwrap();

        assert_eq!(config.strategy, AugmentingStrategy::BreadthFirst);
        assert_eq!(config.max_augmentations, Some(50));
        assert_eq!(config.tolerance, 0.0);
        assert!(config.record_paths);
    }

    #[test]
    fn test_result_serializes() {
        let mut graph = FlowGraph::new();
        graph.add_edge("a", "b", 7.0).unwrap();

        let result = FordFulkerson::new().solve(&mut graph, "a", "b").unwrap();
        let json = serde_json::to_value(&result).unwrap();

        assert_eq!(json["max_flow"], 7.0);
        assert_eq!(json["augmenting_paths"][0]["vertices"][1], "b");
        assert_eq!(json["metrics"]["augmentations"], 1);
    }

    /// Small random graphs over v0..v{n-1}; source v0, sink v{n-1}
    fn arb_network() -> impl Strategy<Value = FlowGraph> {
        (2usize..7).prop_flat_map(|n| {
            prop::collection::vec((0..n, 0..n, 0u32..10), 0..20).prop_map(move |edges| {
                let mut graph = FlowGraph::new();
                for i in 0..n {
                    graph.add_vertex(&format!("v{}", i));
                }
                for (u, v, capacity) in edges {
                    if u != v {
                        graph
                            .add_edge(&format!("v{}", u), &format!("v{}", v), capacity as f64)
                            .unwrap();
                    }
                }
                graph
            })
        })
    }

    fn terminals(graph: &FlowGraph) -> (String, String) {
        ("v0".to_string(), format!("v{}", graph.vertex_count() - 1))
    }

    proptest! {
        #[test]
        fn prop_max_flow_equals_min_cut(mut graph in arb_network()) {
            let (s, t) = terminals(&graph);
            let expected = brute_force_min_cut(&graph, &s, &t);

            let result = verifying_solver(AugmentingStrategy::DepthFirst)
                .solve(&mut graph, &s, &t)
                .unwrap();

            prop_assert_eq!(result.max_flow, expected);
            prop_assert_eq!(min_cut(&graph, &s, &t, 0.0).capacity, expected);
        }

        #[test]
        fn prop_strategies_agree(graph in arb_network()) {
            let (s, t) = terminals(&graph);
            let mut dfs_graph = graph.clone();
            let mut bfs_graph = graph;

            let dfs = verifying_solver(AugmentingStrategy::DepthFirst)
                .solve(&mut dfs_graph, &s, &t)
                .unwrap();
            let bfs = verifying_solver(AugmentingStrategy::BreadthFirst)
                .solve(&mut bfs_graph, &s, &t)
                .unwrap();

            prop_assert_eq!(dfs.max_flow, bfs.max_flow);
        }

        #[test]
        fn prop_rerun_finds_no_path(mut graph in arb_network()) {
            let (s, t) = terminals(&graph);
            let solver = FordFulkerson::new();

            let first = solver.solve(&mut graph, &s, &t).unwrap();
            let second = solver.solve(&mut graph, &s, &t).unwrap();

            prop_assert_eq!(second.metrics.augmentations, 0);
            prop_assert_eq!(second.max_flow, first.max_flow);
        }
    }
}
