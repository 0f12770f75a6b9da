//! Post-solve verification of flow assignments

pub mod invariants;

pub use self::invariants::{FlowInvariants, DEFAULT_EPSILON};
