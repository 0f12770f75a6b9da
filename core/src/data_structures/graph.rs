//! Capacitated flow graph with an edge arena and a separate flow table
//!
//! Vertices are named by strings and mapped to dense `VertexId`s in the order
//! they are first referenced. Edges live in a single arena; an `EdgeId` is the
//! edge's index there and is the only identity the rest of the crate uses.
//! Every user edge is created together with a zero-capacity reverse partner
//! and the two hold each other's index.
//!
//! The flow table is kept apart from the edge records: construction writes
//! the structure once, and the max-flow engine only ever touches `flows`.

use std::collections::HashMap;

use log::trace;
use serde::{Deserialize, Serialize};

use crate::algorithm::traits::{Capacity, EdgeId, Flow, FlowError, VertexId};

/// Whether an edge was added by the caller or created as a residual partner
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EdgeKind {
    /// Edge added through `add_edge`
    Forward,
    /// Zero-capacity partner enabling flow cancellation
    Reverse,
}

/// Directed edge record in the arena
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlowEdge {
    /// Tail vertex
    pub source: VertexId,
    /// Head vertex
    pub sink: VertexId,
    /// Capacity, zero for reverse edges
    pub capacity: Capacity,
    /// Forward or reverse
    pub kind: EdgeKind,
    /// Index of the paired edge
    pub reverse: EdgeId,
}

impl FlowEdge {
    #[inline]
    pub fn is_forward(&self) -> bool {
        self.kind == EdgeKind::Forward
    }
}

/// Flow network over named vertices
#[derive(Debug, Clone, Default)]
pub struct FlowGraph {
    /// Name to id lookup
    index: HashMap<String, VertexId>,
    /// Vertex names by id
    names: Vec<String>,
    /// Outgoing edge ids per vertex, in insertion order
    adjacency: Vec<Vec<EdgeId>>,
    /// Edge arena
    edges: Vec<FlowEdge>,
    /// Current flow per edge, indexed like `edges`
    flows: Vec<Flow>,
}

impl FlowGraph {
    /// Creates an empty graph
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty graph with room for the given number of vertices and
    /// user edges
    pub fn with_capacity(vertices: usize, edges: usize) -> Self {
        Self {
            index: HashMap::with_capacity(vertices),
            names: Vec::with_capacity(vertices),
            adjacency: Vec::with_capacity(vertices),
            edges: Vec::with_capacity(edges * 2),
            flows: Vec::with_capacity(edges * 2),
        }
    }

    /// Registers a vertex, returning its id.
    ///
    /// Re-adding a known vertex returns the existing id and leaves its edge
    /// list untouched.
    pub fn add_vertex(&mut self, name: &str) -> VertexId {
        if let Some(&id) = self.index.get(name) {
            return id;
        }

        let id = VertexId(self.names.len());
        self.index.insert(name.to_owned(), id);
        self.names.push(name.to_owned());
        self.adjacency.push(Vec::new());
        id
    }

    /// Adds the directed edge `u -> v` with the given capacity plus its
    /// zero-capacity reverse `v -> u`, returning the forward edge id.
    ///
    /// # Errors
    /// * `InvalidEdge` - `u == v`
    /// * `NegativeCapacity` - `capacity < 0`
    /// * `NonFiniteCapacity` - `capacity` is NaN or infinite
    ///
    /// The graph is unchanged when an error is returned.
    pub fn add_edge(&mut self, u: &str, v: &str, capacity: Capacity) -> Result<EdgeId, FlowError> {
        if u == v {
            return Err(FlowError::InvalidEdge { vertex: u.to_owned() });
        }
        if !capacity.is_finite() {
            return Err(FlowError::NonFiniteCapacity {
                from: u.to_owned(),
                to: v.to_owned(),
                capacity,
            });
        }
        if capacity < 0.0 {
            return Err(FlowError::NegativeCapacity {
                from: u.to_owned(),
                to: v.to_owned(),
                capacity,
            });
        }

        let source = self.add_vertex(u);
        let sink = self.add_vertex(v);

        let forward_id = EdgeId(self.edges.len());
        let reverse_id = EdgeId(forward_id.0 + 1);

        self.edges.push(FlowEdge {
            source,
            sink,
            capacity,
            kind: EdgeKind::Forward,
            reverse: reverse_id,
        });
        self.edges.push(FlowEdge {
            source: sink,
            sink: source,
            capacity: 0.0,
            kind: EdgeKind::Reverse,
            reverse: forward_id,
        });
        self.flows.push(0.0);
        self.flows.push(0.0);

        self.adjacency[source.0].push(forward_id);
        self.adjacency[sink.0].push(reverse_id);

        trace!("Added edge {} {} -> {} (capacity {}), reverse {}", forward_id, u, v, capacity, reverse_id);
        Ok(forward_id)
    }

    /// Outgoing edges of the named vertex in insertion order; empty when the
    /// vertex is unknown
    pub fn edges_from(&self, vertex: &str) -> &[EdgeId] {
        match self.index.get(vertex) {
            Some(&id) => self.adjacency[id.0].as_slice(),
            None => &[],
        }
    }

    /// Outgoing edges of a vertex by id
    pub fn edges_from_id(&self, vertex: VertexId) -> &[EdgeId] {
        self.adjacency
            .get(vertex.0)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Forward edges `u -> v` in insertion order
    pub fn edges_between<'a>(&'a self, u: &str, v: &str) -> impl Iterator<Item = EdgeId> + 'a {
        let target = self.vertex_id(v);
        self.edges_from(u).iter().copied().filter(move |&id| {
            let edge = &self.edges[id.0];
            edge.is_forward() && Some(edge.sink) == target
        })
    }

    /// Edge record by id
    pub fn edge(&self, id: EdgeId) -> Result<&FlowEdge, FlowError> {
        self.edges.get(id.0).ok_or(FlowError::UnknownEdge(id))
    }

    /// Paired reverse edge id
    pub fn reverse_of(&self, id: EdgeId) -> Result<EdgeId, FlowError> {
        self.edge(id).map(|edge| edge.reverse)
    }

    /// Current flow on an edge
    pub fn flow(&self, id: EdgeId) -> Result<Flow, FlowError> {
        self.flows.get(id.0).copied().ok_or(FlowError::UnknownEdge(id))
    }

    /// Capacity minus current flow
    pub fn residual_capacity(&self, id: EdgeId) -> Result<Capacity, FlowError> {
        let edge = self.edge(id)?;
        Ok(edge.capacity - self.flows[id.0])
    }

    /// Residual capacity for ids handed out by this graph
    #[inline]
    pub(crate) fn residual(&self, id: EdgeId) -> Capacity {
        self.edges[id.0].capacity - self.flows[id.0]
    }

    /// Arena access for ids handed out by this graph
    #[inline]
    pub(crate) fn edge_at(&self, id: EdgeId) -> &FlowEdge {
        &self.edges[id.0]
    }

    /// Pushes `amount` along `id` and takes it back from the reverse edge.
    ///
    /// Refuses an edge linked to itself.
    pub(crate) fn push_flow(&mut self, id: EdgeId, amount: Flow) -> Result<(), FlowError> {
        let reverse = self.edge(id)?.reverse;
        if reverse == id {
            return Err(FlowError::InternalInconsistency {
                edge: id,
                reason: "edge is its own reverse".into(),
            });
        }
        if reverse.0 >= self.flows.len() {
            return Err(FlowError::InternalInconsistency {
                edge: id,
                reason: format!("reverse link {} is outside the edge arena", reverse),
            });
        }

        self.flows[id.0] += amount;
        self.flows[reverse.0] -= amount;
        Ok(())
    }

    /// Sets every flow back to zero
    pub fn reset_flows(&mut self) {
        self.flows.iter_mut().for_each(|f| *f = 0.0);
    }

    /// Total flow on the edges leaving `vertex`
    pub fn outflow(&self, vertex: &str) -> Flow {
        self.edges_from(vertex)
            .iter()
            .map(|id| self.flows[id.0])
            .sum()
    }

    pub fn vertex_id(&self, name: &str) -> Option<VertexId> {
        self.index.get(name).copied()
    }

    pub fn vertex_name(&self, id: VertexId) -> Option<&str> {
        self.names.get(id.0).map(String::as_str)
    }

    pub fn contains_vertex(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    pub fn vertex_count(&self) -> usize {
        self.names.len()
    }

    /// Number of arena entries, forward and reverse
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Vertex ids with their names, in id order
    pub fn vertices(&self) -> impl Iterator<Item = (VertexId, &str)> {
        self.names
            .iter()
            .enumerate()
            .map(|(i, name)| (VertexId(i), name.as_str()))
    }

    /// Every arena entry with its id
    pub fn edges(&self) -> impl Iterator<Item = (EdgeId, &FlowEdge)> {
        self.edges
            .iter()
            .enumerate()
            .map(|(i, edge)| (EdgeId(i), edge))
    }

    /// User-added edges only
    pub fn forward_edges(&self) -> impl Iterator<Item = (EdgeId, &FlowEdge)> {
        self.edges().filter(|(_, edge)| edge.is_forward())
    }

    /// Checks the reverse linkage of every edge.
    ///
    /// Each edge must point at a different edge that points back, with the
    /// endpoints swapped.
    pub fn validate(&self) -> Result<(), FlowError> {
        for (id, edge) in self.edges() {
            let inconsistency = |reason: String| FlowError::InternalInconsistency { edge: id, reason };

            if edge.reverse == id {
                return Err(inconsistency("edge is its own reverse".into()));
            }
            let partner = self
                .edges
                .get(edge.reverse.0)
                .ok_or_else(|| inconsistency(format!("reverse link {} is outside the edge arena", edge.reverse)))?;
            if partner.reverse != id {
                return Err(inconsistency(format!(
                    "reverse {} links back to {}",
                    edge.reverse, partner.reverse
                )));
            }
            if partner.source != edge.sink || partner.sink != edge.source {
                return Err(inconsistency(format!(
                    "reverse {} does not swap the endpoints",
                    edge.reverse
                )));
            }
        }
        Ok(())
    }

    /// Re-links an edge to itself, for exercising the consistency checks
    #[cfg(test)]
    pub(crate) fn corrupt_reverse_link(&mut self, id: EdgeId) {
        self.edges[id.0].reverse = id;
    }
}
