//! Flow invariant verification
//!
//! Checks a flow assignment against the properties every intermediate and
//! final state of the augmenting-path loop must satisfy:
//!
//! - **Skew symmetry**: `flow(e) == -flow(reverse(e))`
//! - **Capacity respect**: `flow(e) <= capacity(e)`, and `flow(e) >= 0` for
//!   forward edges
//! - **Conservation**: net flow is zero at every vertex other than source and
//!   sink
//!
//! Floating-point flows are compared within an absolute epsilon.

use log::trace;

use crate::algorithm::traits::{Flow, FlowError, VertexId};
use crate::data_structures::graph::FlowGraph;

/// Epsilon used when the caller has no tolerance of its own
pub const DEFAULT_EPSILON: f64 = 1e-9;

/// Flow invariant checker
#[derive(Debug, Clone, Copy)]
pub struct FlowInvariants {
    epsilon: f64,
}

impl Default for FlowInvariants {
    fn default() -> Self {
        Self::new(DEFAULT_EPSILON)
    }
}

impl FlowInvariants {
    pub fn new(epsilon: f64) -> Self {
        Self { epsilon }
    }

    /// Runs every check; conservation is skipped for the named terminals
    pub fn check(&self, graph: &FlowGraph, source: &str, sink: &str) -> Result<(), FlowError> {
        graph.validate()?;
        self.check_skew_symmetry(graph)?;
        self.check_capacities(graph)?;
        self.check_conservation(graph, graph.vertex_id(source), graph.vertex_id(sink))?;
        trace!("Flow invariants hold for {} edges", graph.edge_count());
        Ok(())
    }

    pub fn check_skew_symmetry(&self, graph: &FlowGraph) -> Result<(), FlowError> {
        for (id, edge) in graph.edges() {
            let flow = graph.flow(id)?;
            let reverse_flow = graph.flow(edge.reverse)?;
            if (flow + reverse_flow).abs() > self.epsilon {
                return Err(FlowError::InvariantViolation(format!(
                    "skew symmetry broken on {}: flow {} against reverse {} flow {}",
                    id, flow, edge.reverse, reverse_flow
                )));
            }
        }
        Ok(())
    }

    pub fn check_capacities(&self, graph: &FlowGraph) -> Result<(), FlowError> {
        for (id, edge) in graph.edges() {
            let flow = graph.flow(id)?;
            if flow > edge.capacity + self.epsilon {
                return Err(FlowError::InvariantViolation(format!(
                    "flow {} on {} exceeds capacity {}",
                    flow, id, edge.capacity
                )));
            }
            if edge.is_forward() && flow < -self.epsilon {
                return Err(FlowError::InvariantViolation(format!(
                    "negative flow {} on forward edge {}",
                    flow, id
                )));
            }
        }
        Ok(())
    }

    pub fn check_conservation(
        &self,
        graph: &FlowGraph,
        source: Option<VertexId>,
        sink: Option<VertexId>,
    ) -> Result<(), FlowError> {
        for (vertex, name) in graph.vertices() {
            if Some(vertex) == source || Some(vertex) == sink {
                continue;
            }
            // Reverse edges leaving a vertex carry the negated inflow
            let net: Flow = graph
                .edges_from_id(vertex)
                .iter()
                .map(|&id| graph.flow(id))
                .sum::<Result<Flow, FlowError>>()?;
            if net.abs() > self.epsilon {
                return Err(FlowError::InvariantViolation(format!(
                    "flow not conserved at '{}': net outflow {}",
                    name, net
                )));
            }
        }
        Ok(())
    }
}
