//! The process network container.
//!
//! Stores nodes and edges in insertion order with lookup by id, and keeps
//! per-node incoming/outgoing edge indices so the flow-rate section of a solver
//! input file can be produced in a stable order.

use std::collections::HashMap;

use crate::edge::Edge;
use crate::error::{ModelError, Result};
use crate::exclusion::MutualExclusionSet;
use crate::node::{check_id, Node, NodeId, NodeKind};

/// A process network: materials, operating units and the flow edges between
/// them.
#[derive(Debug, Clone, Default)]
pub struct Network {
    nodes: Vec<Node>,
    edges: Vec<Edge>,

    /// Index: node id -> position in `nodes`
    index: HashMap<NodeId, usize>,
    /// Index: node id -> positions in `edges` where the node is the source
    outgoing: HashMap<NodeId, Vec<usize>>,
    /// Index: node id -> positions in `edges` where the node is the target
    incoming: HashMap<NodeId, Vec<usize>>,
}

impl Network {
    /// Create an empty network.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a node. Ids must be unique and free of the input grammar's
    /// delimiters.
    pub fn add_node(&mut self, node: Node) -> Result<()> {
        check_id(node.id())?;
        if self.index.contains_key(node.id()) {
            return Err(ModelError::DuplicateNode(node.id().to_string()));
        }
        let id = node.id().to_string();
        self.index.insert(id.clone(), self.nodes.len());
        self.outgoing.entry(id.clone()).or_default();
        self.incoming.entry(id).or_default();
        self.nodes.push(node);
        Ok(())
    }

    /// Insert an edge. Both endpoints must exist and be of different kinds,
    /// and the flow ratio must be finite and positive.
    pub fn add_edge(&mut self, edge: Edge) -> Result<()> {
        let src_kind = self.kind_of(&edge.source)?;
        let dst_kind = self.kind_of(&edge.target)?;
        if src_kind == dst_kind {
            return Err(ModelError::SameKindEdge {
                src: edge.source,
                dst: edge.target,
                kind: src_kind,
            });
        }
        if !edge.weight.is_finite() || edge.weight <= 0.0 {
            return Err(ModelError::InvalidWeight {
                src: edge.source,
                dst: edge.target,
                weight: edge.weight,
            });
        }
        let position = self.edges.len();
        self.outgoing
            .entry(edge.source.clone())
            .or_default()
            .push(position);
        self.incoming
            .entry(edge.target.clone())
            .or_default()
            .push(position);
        self.edges.push(edge);
        Ok(())
    }

    /// Shorthand for `add_edge(Edge::new(source, target, weight))`.
    pub fn connect(&mut self, source: &str, target: &str, weight: f64) -> Result<()> {
        self.add_edge(Edge::new(source, target, weight))
    }

    fn kind_of(&self, id: &str) -> Result<NodeKind> {
        self.node(id)
            .map(Node::kind)
            .ok_or_else(|| ModelError::NodeNotFound(id.to_string()))
    }

    /// Look up a node by id.
    pub fn node(&self, id: &str) -> Option<&Node> {
        self.index.get(id).map(|&i| &self.nodes[i])
    }

    /// All nodes in insertion order.
    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.nodes.iter()
    }

    pub fn materials(&self) -> impl Iterator<Item = &Node> {
        self.nodes.iter().filter(|n| n.is_material())
    }

    pub fn operating_units(&self) -> impl Iterator<Item = &Node> {
        self.nodes.iter().filter(|n| n.is_operating_unit())
    }

    /// All edges in insertion order.
    pub fn edges(&self) -> impl Iterator<Item = &Edge> {
        self.edges.iter()
    }

    /// Edges ending at `id`, in insertion order.
    pub fn incoming_edges(&self, id: &str) -> impl Iterator<Item = &Edge> {
        self.edge_list(&self.incoming, id)
    }

    /// Edges starting at `id`, in insertion order.
    pub fn outgoing_edges(&self, id: &str) -> impl Iterator<Item = &Edge> {
        self.edge_list(&self.outgoing, id)
    }

    fn edge_list<'a>(
        &'a self,
        index: &'a HashMap<NodeId, Vec<usize>>,
        id: &str,
    ) -> impl Iterator<Item = &'a Edge> {
        index
            .get(id)
            .map(|v| v.as_slice())
            .unwrap_or(&[])
            .iter()
            .map(move |&i| &self.edges[i])
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Check that every operating unit has at least one input and one output
    /// material and that all attribute values are finite.
    pub fn validate(&self) -> std::result::Result<(), Vec<ModelError>> {
        let mut errors = Vec::new();

        for node in &self.nodes {
            for (key, value) in node.attributes().iter() {
                if !value.is_finite() {
                    errors.push(ModelError::NonFiniteAttribute {
                        node: node.id().to_string(),
                        key: key.to_string(),
                        value,
                    });
                }
            }
        }

        for unit in self.operating_units() {
            if self.incoming_edges(unit.id()).next().is_none() {
                errors.push(ModelError::NoInputs(unit.id().to_string()));
            }
            if self.outgoing_edges(unit.id()).next().is_none() {
                errors.push(ModelError::NoOutputs(unit.id().to_string()));
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            log::debug!("network failed validation with {} issue(s)", errors.len());
            Err(errors)
        }
    }

    /// Check that every exclusion set is non-empty and names only operating
    /// units of this network.
    pub fn validate_exclusions(
        &self,
        sets: &[MutualExclusionSet],
    ) -> std::result::Result<(), Vec<ModelError>> {
        let mut errors = Vec::new();

        for (index, set) in sets.iter().enumerate() {
            if set.is_empty() {
                errors.push(ModelError::EmptyExclusionSet { index });
                continue;
            }
            for member in set.members() {
                match self.node(member) {
                    Some(node) if node.is_operating_unit() => {}
                    Some(_) => errors.push(ModelError::ExclusionMember {
                        index,
                        member: member.clone(),
                    }),
                    None => errors.push(ModelError::NodeNotFound(member.clone())),
                }
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    /// Run [`validate`](Self::validate) and
    /// [`validate_exclusions`](Self::validate_exclusions), collecting every issue.
    pub fn validate_problem(
        &self,
        sets: &[MutualExclusionSet],
    ) -> std::result::Result<(), Vec<ModelError>> {
        let mut errors = Vec::new();
        if let Err(e) = self.validate() {
            errors.extend(e);
        }
        if let Err(e) = self.validate_exclusions(sets) {
            errors.extend(e);
        }
        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}
