//! Which parts of a network a solution uses.
//!
//! A node is active when the solution names it. An edge is active when both
//! of its endpoints are. Evaluated solutions also carry flow, capacity and
//! cost figures for their nodes.

use pgraph_core::{Edge, Network, Node};

use crate::solution::Solution;

/// A node of the network, annotated for one solution.
#[derive(Debug, Clone, PartialEq)]
pub struct NodeActivity<'a> {
    pub node: &'a Node,
    pub active: bool,
    /// Material flow.
    pub flow: Option<f64>,
    /// Operating-unit size.
    pub capacity: Option<f64>,
    pub cost: Option<f64>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct EdgeActivity<'a> {
    pub edge: &'a Edge,
    pub active: bool,
}

/// A network annotated with one solution.
#[derive(Debug, Clone, PartialEq)]
pub struct Activity<'a> {
    pub nodes: Vec<NodeActivity<'a>>,
    pub edges: Vec<EdgeActivity<'a>>,
    /// Names in the solution that the network does not contain.
    pub unknown: Vec<String>,
}

impl<'a> Activity<'a> {
    /// Annotate `network` with `solution`.
    pub fn of(network: &'a Network, solution: &Solution) -> Self {
        let nodes: Vec<NodeActivity<'a>> = network
            .nodes()
            .map(|node| {
                let id = node.id();
                let material = solution.material(id);
                let unit = solution.operating_unit(id);
                NodeActivity {
                    node,
                    active: solution.contains(id),
                    flow: material.map(|m| m.flow),
                    capacity: unit.map(|u| u.size),
                    cost: material.map(|m| m.cost).or(unit.map(|u| u.cost)),
                }
            })
            .collect();

        let is_active = |id: &str| nodes.iter().any(|n| n.active && n.node.id() == id);
        let edges = network
            .edges()
            .map(|edge| EdgeActivity {
                edge,
                active: is_active(&edge.source) && is_active(&edge.target),
            })
            .collect();

        let unknown: Vec<String> = solution
            .material_names()
            .into_iter()
            .chain(solution.operating_unit_names())
            .filter(|name| network.node(name).is_none())
            .map(str::to_string)
            .collect();
        if !unknown.is_empty() {
            log::warn!(
                "solution {} names nodes missing from the network: {}",
                solution.id,
                unknown.join(", ")
            );
        }

        Self {
            nodes,
            edges,
            unknown,
        }
    }

    pub fn active_nodes(&self) -> impl Iterator<Item = &NodeActivity<'a>> {
        self.nodes.iter().filter(|n| n.active)
    }

    pub fn active_edges(&self) -> impl Iterator<Item = &EdgeActivity<'a>> {
        self.edges.iter().filter(|e| e.active)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::solution::{
        MaterialRecord, OperatingUnitRecord, SolutionId, StructureContents,
    };

    fn network() -> Network {
        let mut n = Network::new();
        for id in ["M1", "M2", "M3"] {
            n.add_node(Node::material(id)).unwrap();
        }
        n.add_node(Node::operating_unit("O1")).unwrap();
        n.add_node(Node::operating_unit("O2")).unwrap();
        n.connect("M2", "O1", 2.0).unwrap();
        n.connect("O1", "M1", 3.0).unwrap();
        n.connect("M3", "O2", 4.0).unwrap();
        n.connect("O2", "M1", 1.0).unwrap();
        n
    }

    #[test]
    fn evaluated_solution() {
        let network = network();
        let solution = Solution {
            id: SolutionId::Feasible {
                index: 0,
                label: "#1".into(),
            },
            contents: StructureContents::Evaluated {
                materials: vec![
                    MaterialRecord {
                        name: "M1".into(),
                        cost: 0.0,
                        money_unit: Some("USD/y".into()),
                        flow: 3.0,
                        flow_unit: Some("t/y".into()),
                    },
                    MaterialRecord::balanced("M2"),
                ],
                operating_units: vec![OperatingUnitRecord {
                    size: 1.0,
                    name: "O1".into(),
                    cost: 2400.0,
                    cost_unit: Some("USD/y".into()),
                }],
            },
            total_cost: Some(2400.0),
        };

        let activity = Activity::of(&network, &solution);
        let active: Vec<_> = activity.active_nodes().map(|n| n.node.id()).collect();
        assert_eq!(active, vec!["M1", "M2", "O1"]);
        assert_eq!(activity.active_edges().count(), 2);
        assert!(activity.unknown.is_empty());

        let o1 = activity.nodes.iter().find(|n| n.node.id() == "O1").unwrap();
        assert_eq!(o1.capacity, Some(1.0));
        assert_eq!(o1.cost, Some(2400.0));
        assert_eq!(o1.flow, None);

        let m1 = activity.nodes.iter().find(|n| n.node.id() == "M1").unwrap();
        assert_eq!(m1.flow, Some(3.0));
    }

    #[test]
    fn listed_solution_with_unknown_name() {
        let network = network();
        let solution = Solution {
            id: SolutionId::Structure {
                number: "1".into(),
            },
            contents: StructureContents::Listed {
                materials: vec!["M1".into(), "M3".into(), "M9".into()],
                operating_units: vec!["O2".into()],
            },
            total_cost: None,
        };

        let activity = Activity::of(&network, &solution);
        assert_eq!(activity.active_nodes().count(), 3);
        assert_eq!(activity.active_edges().count(), 2);
        assert_eq!(activity.unknown, vec!["M9"]);
        assert!(activity.nodes.iter().all(|n| n.cost.is_none()));
    }
}
