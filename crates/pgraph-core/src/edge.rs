//! Directed flow edges between materials and operating units.

use serde::{Deserialize, Serialize};

use crate::node::NodeId;

/// A directed edge carrying a flow ratio.
///
/// An edge from a material to an operating unit is an input of that unit; an
/// edge from an operating unit to a material is one of its outputs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Edge {
    pub source: NodeId,
    pub target: NodeId,
    /// Flow ratio at which the unit consumes or produces the material.
    pub weight: f64,
}

impl Edge {
    pub fn new(source: impl Into<NodeId>, target: impl Into<NodeId>, weight: f64) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
            weight,
        }
    }
}
