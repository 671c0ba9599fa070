//! Error types for network model construction and validation.

use crate::node::{NodeId, NodeKind};

/// Errors that can occur while building or validating a process network.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ModelError {
    #[error("invalid node id '{id}': {reason}")]
    InvalidId { id: String, reason: &'static str },

    #[error("duplicate node id: {0}")]
    DuplicateNode(NodeId),

    #[error("node not found: {0}")]
    NodeNotFound(NodeId),

    #[error("edge {src} -> {dst} connects two {kind} nodes")]
    SameKindEdge {
        src: NodeId,
        dst: NodeId,
        kind: NodeKind,
    },

    #[error("edge {src} -> {dst} has invalid flow ratio {weight} (must be finite and positive)")]
    InvalidWeight { src: NodeId, dst: NodeId, weight: f64 },

    #[error("operating unit {0} has no input materials")]
    NoInputs(NodeId),

    #[error("operating unit {0} has no output materials")]
    NoOutputs(NodeId),

    #[error("attribute key '{key}' on node {node} is reserved")]
    ReservedAttribute { node: NodeId, key: String },

    #[error("attribute '{key}' does not apply to {kind} {node}")]
    MisplacedAttribute {
        node: NodeId,
        key: String,
        kind: NodeKind,
    },

    #[error("attribute '{key}' on node {node} has non-finite value {value}")]
    NonFiniteAttribute {
        node: NodeId,
        key: String,
        value: f64,
    },

    #[error("mutual exclusion set {index} is empty")]
    EmptyExclusionSet { index: usize },

    #[error("mutual exclusion set {index} member {member} is not an operating unit")]
    ExclusionMember { index: usize, member: NodeId },
}

/// Result type for model operations.
pub type Result<T> = std::result::Result<T, ModelError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = ModelError::NoInputs("O1".into());
        assert_eq!(err.to_string(), "operating unit O1 has no input materials");

        let err = ModelError::SameKindEdge {
            src: "M1".into(),
            dst: "M2".into(),
            kind: NodeKind::Material,
        };
        assert!(err.to_string().contains("two material nodes"));
    }
}
