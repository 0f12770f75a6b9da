//! Core trait and identifier definitions for the max-flow engine
//!
//! This module establishes the shared vocabulary of the crate: typed
//! identifiers for vertices and edges of the edge arena, the numeric aliases
//! for capacities and flows, the error enum every fallible operation returns,
//! and the string-keyed parameter interface solvers expose.
//!
//! # Key Design Principles
//! - Arena indices instead of structural edge equality
//! - One error type propagated with `?` from construction to solve
//! - Parameters settable from untyped configuration sources

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Edge capacity type
pub type Capacity = f64;

/// Flow value type; reverse edges may carry negative values
pub type Flow = f64;

/// Vertex identifier, dense in first-reference order
#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq, Ord, PartialOrd, Serialize, Deserialize)]
pub struct VertexId(pub usize);

impl VertexId {
    #[inline]
    pub fn as_usize(self) -> usize {
        self.0
    }
}

impl fmt::Display for VertexId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "v{}", self.0)
    }
}

/// Edge identifier: stable index into the edge arena
///
/// Two edges with identical endpoints and capacity are still distinct
/// entities with distinct identifiers.
#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq, Ord, PartialOrd, Serialize, Deserialize)]
pub struct EdgeId(pub usize);

impl EdgeId {
    #[inline]
    pub fn as_usize(self) -> usize {
        self.0
    }
}

impl fmt::Display for EdgeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "e{}", self.0)
    }
}

/// Error types for graph construction and flow computation
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum FlowError {
    #[error("Invalid edge: source and sink are both '{vertex}'")]
    InvalidEdge { vertex: String },

    #[error("Negative capacity {capacity} on edge {from} -> {to}")]
    NegativeCapacity {
        from: String,
        to: String,
        capacity: Capacity,
    },

    #[error("Non-finite capacity {capacity} on edge {from} -> {to}")]
    NonFiniteCapacity {
        from: String,
        to: String,
        capacity: Capacity,
    },

    #[error("Unknown edge: {0}")]
    UnknownEdge(EdgeId),

    #[error("Source and sink are the same vertex '{vertex}'")]
    IdenticalTerminals { vertex: String },

    #[error("Internal inconsistency at edge {edge}: {reason}")]
    InternalInconsistency { edge: EdgeId, reason: String },

    #[error("Augmentation limit of {limit} exceeded")]
    AugmentationLimitExceeded { limit: usize },

    #[error("Flow invariant violated: {0}")]
    InvariantViolation(String),

    #[error("Invalid parameter: {name} - {reason}")]
    InvalidParameter { name: String, reason: String },
}

/// Parameter type enumeration for type-safe parameter handling
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ParameterType {
    Integer,
    Float,
    Boolean,
    Enum(Vec<String>),
}

/// Algorithm parameter with its current value and type information
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AlgorithmParameter {
    pub name: String,
    pub value: String,
    pub value_type: ParameterType,
    pub description: String,
}

/// Solver trait shared by flow algorithms
///
/// Parameters are exchanged as strings so that solvers can be configured
/// from command lines, files or bindings without knowing concrete types.
pub trait Algorithm: fmt::Debug {
    /// Returns the algorithm's descriptive name
    fn name(&self) -> &'static str;

    /// Returns the algorithm's category
    fn category(&self) -> &'static str;

    /// Returns a one-paragraph description including complexity
    fn description(&self) -> String;

    /// Returns supported parameters with their current values
    fn parameters(&self) -> Vec<AlgorithmParameter>;

    /// Sets algorithm parameter with type validation
    fn set_parameter(&mut self, name: &str, value: &str) -> Result<(), FlowError>;

    /// Gets algorithm parameter value
    fn get_parameter(&self, name: &str) -> Option<String>;

    /// Returns every parameter as a name/value map
    fn get_parameters(&self) -> HashMap<String, String> {
        self.parameters()
            .into_iter()
            .map(|p| (p.name, p.value))
            .collect()
    }
}
