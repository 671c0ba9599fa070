//! Node types: materials and operating units.
//!
//! A node is either a material (a substance flowing through the network) or an
//! operating unit (a process that consumes and produces materials). The kind is
//! stored explicitly on the node and never re-derived from the id.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{ModelError, Result};

/// Symbolic node identifier, e.g. `M1` or `O1`.
pub type NodeId = String;

/// Upper bound used when no flow-rate or capacity bound is declared.
pub const UNBOUNDED: f64 = 10_000.0;

/// Well-known attribute keys.
pub mod keys {
    pub const PRICE: &str = "price";
    pub const FLOW_RATE_LOWER_BOUND: &str = "flow_rate_lower_bound";
    pub const FLOW_RATE_UPPER_BOUND: &str = "flow_rate_upper_bound";
    pub const FIX_COST: &str = "fix_cost";
    pub const PROPORTIONAL_COST: &str = "proportional_cost";
    pub const CAPACITY_LOWER_BOUND: &str = "capacity_lower_bound";
    pub const CAPACITY_UPPER_BOUND: &str = "capacity_upper_bound";

    /// Keys that only make sense on materials.
    pub const MATERIAL: [&str; 3] = [PRICE, FLOW_RATE_LOWER_BOUND, FLOW_RATE_UPPER_BOUND];

    /// Keys that only make sense on operating units.
    pub const OPERATING_UNIT: [&str; 4] = [
        FIX_COST,
        PROPORTIONAL_COST,
        CAPACITY_LOWER_BOUND,
        CAPACITY_UPPER_BOUND,
    ];

    /// Keys that collide with the classification and display-name fields.
    pub const RESERVED: [&str; 2] = ["type", "name"];
}

/// The kind of a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeKind {
    Material,
    OperatingUnit,
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NodeKind::Material => write!(f, "material"),
            NodeKind::OperatingUnit => write!(f, "operating unit"),
        }
    }
}

/// Classification of a material.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MaterialType {
    #[default]
    RawMaterial,
    Intermediate,
    Product,
}

impl MaterialType {
    /// The token used for this classification in solver input files.
    pub fn as_str(&self) -> &'static str {
        match self {
            MaterialType::RawMaterial => "raw_material",
            MaterialType::Intermediate => "intermediate",
            MaterialType::Product => "product",
        }
    }
}

impl fmt::Display for MaterialType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MaterialType {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "raw_material" => Ok(MaterialType::RawMaterial),
            "intermediate" => Ok(MaterialType::Intermediate),
            "product" => Ok(MaterialType::Product),
            other => Err(format!(
                "unknown material type '{other}' (expected raw_material, intermediate or product)"
            )),
        }
    }
}

/// Numeric node attributes, kept in insertion order.
///
/// Setting an existing key replaces its value without moving it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Attributes {
    entries: Vec<(String, f64)>,
}

impl Attributes {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, key: &str, value: f64) {
        match self.entries.iter_mut().find(|(k, _)| k == key) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((key.to_string(), value)),
        }
    }

    pub fn get(&self, key: &str) -> Option<f64> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| *v)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.entries.iter().any(|(k, _)| k == key)
    }

    /// Iterate over `(key, value)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), *v))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// A node in the process network.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    id: NodeId,
    kind: NodeKind,
    name: Option<String>,
    material_type: MaterialType,
    attributes: Attributes,
}

impl Node {
    /// Create a material with the default classification (raw material).
    pub fn material(id: impl Into<NodeId>) -> Self {
        Self::new(id.into(), NodeKind::Material)
    }

    /// Create an operating unit.
    pub fn operating_unit(id: impl Into<NodeId>) -> Self {
        Self::new(id.into(), NodeKind::OperatingUnit)
    }

    fn new(id: NodeId, kind: NodeKind) -> Self {
        Self {
            id,
            kind,
            name: None,
            material_type: MaterialType::default(),
            attributes: Attributes::new(),
        }
    }

    /// Set the display name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Set the material classification. Ignored for operating units.
    pub fn with_type(mut self, material_type: MaterialType) -> Self {
        self.material_type = material_type;
        self
    }

    pub fn with_price(self, price: f64) -> Self {
        self.with_known(keys::PRICE, price)
    }

    pub fn with_flow_rate_lower_bound(self, value: f64) -> Self {
        self.with_known(keys::FLOW_RATE_LOWER_BOUND, value)
    }

    pub fn with_flow_rate_upper_bound(self, value: f64) -> Self {
        self.with_known(keys::FLOW_RATE_UPPER_BOUND, value)
    }

    pub fn with_fix_cost(self, value: f64) -> Self {
        self.with_known(keys::FIX_COST, value)
    }

    pub fn with_proportional_cost(self, value: f64) -> Self {
        self.with_known(keys::PROPORTIONAL_COST, value)
    }

    pub fn with_capacity_lower_bound(self, value: f64) -> Self {
        self.with_known(keys::CAPACITY_LOWER_BOUND, value)
    }

    pub fn with_capacity_upper_bound(self, value: f64) -> Self {
        self.with_known(keys::CAPACITY_UPPER_BOUND, value)
    }

    fn with_known(mut self, key: &str, value: f64) -> Self {
        self.attributes.set(key, value);
        self
    }

    /// Set an arbitrary numeric attribute.
    ///
    /// Rejects the reserved keys (`type`, `name`) and well-known keys that
    /// belong to the other node kind.
    pub fn set_attribute(&mut self, key: &str, value: f64) -> Result<()> {
        if keys::RESERVED.contains(&key) {
            return Err(ModelError::ReservedAttribute {
                node: self.id.clone(),
                key: key.to_string(),
            });
        }
        let foreign: &[&str] = match self.kind {
            NodeKind::Material => &keys::OPERATING_UNIT,
            NodeKind::OperatingUnit => &keys::MATERIAL,
        };
        if foreign.contains(&key) {
            return Err(ModelError::MisplacedAttribute {
                node: self.id.clone(),
                key: key.to_string(),
                kind: self.kind,
            });
        }
        if !value.is_finite() {
            return Err(ModelError::NonFiniteAttribute {
                node: self.id.clone(),
                key: key.to_string(),
                value,
            });
        }
        self.attributes.set(key, value);
        Ok(())
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn kind(&self) -> NodeKind {
        self.kind
    }

    pub fn is_material(&self) -> bool {
        self.kind == NodeKind::Material
    }

    pub fn is_operating_unit(&self) -> bool {
        self.kind == NodeKind::OperatingUnit
    }

    /// Display name, falling back to the id.
    pub fn name(&self) -> &str {
        self.name.as_deref().unwrap_or(&self.id)
    }

    /// Material classification; `None` for operating units.
    pub fn material_type(&self) -> Option<MaterialType> {
        match self.kind {
            NodeKind::Material => Some(self.material_type),
            NodeKind::OperatingUnit => None,
        }
    }

    pub fn attributes(&self) -> &Attributes {
        &self.attributes
    }

    pub fn price(&self) -> f64 {
        self.attributes.get(keys::PRICE).unwrap_or(0.0)
    }

    pub fn flow_rate_lower_bound(&self) -> f64 {
        self.attributes
            .get(keys::FLOW_RATE_LOWER_BOUND)
            .unwrap_or(0.0)
    }

    pub fn flow_rate_upper_bound(&self) -> f64 {
        self.attributes
            .get(keys::FLOW_RATE_UPPER_BOUND)
            .unwrap_or(UNBOUNDED)
    }

    pub fn fix_cost(&self) -> f64 {
        self.attributes.get(keys::FIX_COST).unwrap_or(0.0)
    }

    pub fn proportional_cost(&self) -> f64 {
        self.attributes.get(keys::PROPORTIONAL_COST).unwrap_or(0.0)
    }

    pub fn capacity_lower_bound(&self) -> f64 {
        self.attributes
            .get(keys::CAPACITY_LOWER_BOUND)
            .unwrap_or(0.0)
    }

    pub fn capacity_upper_bound(&self) -> f64 {
        self.attributes
            .get(keys::CAPACITY_UPPER_BOUND)
            .unwrap_or(UNBOUNDED)
    }
}

/// Check that an id can be written into the solver's input grammar.
pub(crate) fn check_id(id: &str) -> Result<()> {
    let reason = if id.is_empty() {
        Some("id is empty")
    } else if id.chars().any(char::is_whitespace) {
        Some("id contains whitespace")
    } else if id.contains([':', ',', '+', '=', '(', ')', '*']) {
        Some("id contains a reserved delimiter")
    } else {
        None
    };
    match reason {
        Some(reason) => Err(ModelError::InvalidId {
            id: id.to_string(),
            reason,
        }),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn material_defaults() {
        let m = Node::material("M2");
        assert_eq!(m.kind(), NodeKind::Material);
        assert_eq!(m.material_type(), Some(MaterialType::RawMaterial));
        assert_eq!(m.name(), "M2");
        assert_eq!(m.price(), 0.0);
        assert_eq!(m.flow_rate_lower_bound(), 0.0);
        assert_eq!(m.flow_rate_upper_bound(), UNBOUNDED);
        assert!(m.attributes().is_empty());
    }

    #[test]
    fn operating_unit_defaults() {
        let o = Node::operating_unit("O1").with_name("Reactor");
        assert_eq!(o.material_type(), None);
        assert_eq!(o.name(), "Reactor");
        assert_eq!(o.fix_cost(), 0.0);
        assert_eq!(o.proportional_cost(), 0.0);
        assert_eq!(o.capacity_lower_bound(), 0.0);
        assert_eq!(o.capacity_upper_bound(), UNBOUNDED);
    }

    #[test]
    fn attributes_keep_insertion_order() {
        let m = Node::material("M2")
            .with_price(200.0)
            .with_flow_rate_lower_bound(1.0)
            .with_price(250.0);
        let keys: Vec<_> = m.attributes().iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["price", "flow_rate_lower_bound"]);
        assert_eq!(m.price(), 250.0);
    }

    #[test]
    fn reserved_attribute_rejected() {
        let mut m = Node::material("M1");
        let err = m.set_attribute("type", 1.0).unwrap_err();
        assert!(matches!(err, ModelError::ReservedAttribute { .. }));
        assert!(m.attributes().is_empty());
    }

    #[test]
    fn misplaced_attribute_rejected() {
        let mut o = Node::operating_unit("O1");
        let err = o.set_attribute(keys::PRICE, 3.0).unwrap_err();
        assert!(matches!(err, ModelError::MisplacedAttribute { .. }));

        o.set_attribute("payback_period", 10.0).unwrap();
        assert_eq!(o.attributes().get("payback_period"), Some(10.0));
    }

    #[test]
    fn material_type_parse() {
        assert_eq!("product".parse::<MaterialType>(), Ok(MaterialType::Product));
        assert!("catalyst".parse::<MaterialType>().is_err());
        assert_eq!(MaterialType::Intermediate.to_string(), "intermediate");
    }

    #[test]
    fn id_checks() {
        assert!(check_id("M1").is_ok());
        assert!(check_id("").is_err());
        assert!(check_id("M 1").is_err());
        assert!(check_id("M1:").is_err());
        assert!(check_id("O1+O2").is_err());
    }
}
