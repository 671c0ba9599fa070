//! Network description files.
//!
//! ```toml
//! mutual_exclusions = [["O1", "O2"]]
//!
//! [[materials]]
//! id = "M1"
//! type = "product"
//!
//! [[operating_units]]
//! id = "O1"
//! fix_cost = 2000
//!
//! [[edges]]
//! from = "O1"
//! to = "M1"
//! rate = 3
//! ```

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use pgraph_core::{MaterialType, MutualExclusionSet, Network, Node};

use crate::manifest::PgraphManifest;

/// Network file used when neither the command line nor a manifest names one.
pub const DEFAULT_NETWORK_FILE: &str = "network.toml";

/// Resolve which network file a command works on: an explicit path, the
/// manifest's `[network] path`, or `network.toml` in the project directory.
pub fn locate(
    project_dir: &Path,
    manifest: Option<&PgraphManifest>,
    explicit: Option<&str>,
) -> PathBuf {
    match (explicit, manifest) {
        (Some(path), _) => PathBuf::from(path),
        (None, Some(manifest)) => manifest.network_path(project_dir),
        (None, None) => project_dir.join(DEFAULT_NETWORK_FILE),
    }
}

/// Load and build the network at `path`.
pub fn load_network(path: &Path) -> Result<(Network, Vec<MutualExclusionSet>)> {
    NetworkFile::load(path)?
        .build()
        .with_context(|| format!("building network from {}", path.display()))
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NetworkFile {
    /// Groups of operating units of which at most one may be active.
    #[serde(default)]
    pub mutual_exclusions: Vec<Vec<String>>,
    #[serde(default)]
    pub materials: Vec<MaterialEntry>,
    #[serde(default)]
    pub operating_units: Vec<OperatingUnitEntry>,
    #[serde(default)]
    pub edges: Vec<EdgeEntry>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MaterialEntry {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    /// `raw_material`, `intermediate` or `product`.
    #[serde(rename = "type", default)]
    pub material_type: Option<String>,
    #[serde(default)]
    pub price: Option<f64>,
    #[serde(default)]
    pub flow_rate_lower_bound: Option<f64>,
    #[serde(default)]
    pub flow_rate_upper_bound: Option<f64>,
    /// Extra numeric attributes passed through to the solver.
    #[serde(default)]
    pub attributes: BTreeMap<String, f64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OperatingUnitEntry {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub fix_cost: Option<f64>,
    #[serde(default)]
    pub proportional_cost: Option<f64>,
    #[serde(default)]
    pub capacity_lower_bound: Option<f64>,
    #[serde(default)]
    pub capacity_upper_bound: Option<f64>,
    #[serde(default)]
    pub attributes: BTreeMap<String, f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EdgeEntry {
    pub from: String,
    pub to: String,
    /// Flow ratio.
    pub rate: f64,
}

impl NetworkFile {
    pub fn load(path: &Path) -> Result<Self> {
        let content =
            fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
        Self::parse(&content).with_context(|| format!("parsing {}", path.display()))
    }

    pub fn parse(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Build the network model. Nodes are added in file order, materials
    /// first; the first invalid entry stops the build.
    pub fn build(&self) -> Result<(Network, Vec<MutualExclusionSet>)> {
        let mut network = Network::new();

        for entry in &self.materials {
            let node = material_node(entry).with_context(|| format!("material '{}'", entry.id))?;
            network
                .add_node(node)
                .with_context(|| format!("material '{}'", entry.id))?;
        }
        for entry in &self.operating_units {
            let node =
                operating_unit_node(entry).with_context(|| format!("operating unit '{}'", entry.id))?;
            network
                .add_node(node)
                .with_context(|| format!("operating unit '{}'", entry.id))?;
        }
        for edge in &self.edges {
            network
                .connect(&edge.from, &edge.to, edge.rate)
                .with_context(|| format!("edge {} -> {}", edge.from, edge.to))?;
        }

        let exclusions = self
            .mutual_exclusions
            .iter()
            .map(|set| MutualExclusionSet::new(set.iter().cloned()))
            .collect();

        Ok((network, exclusions))
    }

    /// Small two-route plant used by `pgraph init`.
    pub fn template() -> String {
        r#"# Two operating units compete to produce M1.
mutual_exclusions = [["O1", "O2"]]

[[materials]]
id = "M1"
type = "product"

[[materials]]
id = "M2"
price = 200

[[materials]]
id = "M3"
price = 100

[[operating_units]]
id = "O1"
fix_cost = 2000
proportional_cost = 400

[[operating_units]]
id = "O2"
fix_cost = 1000
proportional_cost = 400

[[edges]]
from = "O1"
to = "M1"
rate = 3

[[edges]]
from = "O2"
to = "M1"
rate = 1

[[edges]]
from = "M2"
to = "O1"
rate = 2

[[edges]]
from = "M3"
to = "O2"
rate = 4
"#
        .to_string()
    }
}

fn material_node(entry: &MaterialEntry) -> Result<Node> {
    let mut node = Node::material(entry.id.as_str());
    if let Some(name) = &entry.name {
        node = node.with_name(name.as_str());
    }
    if let Some(kind) = &entry.material_type {
        let kind: MaterialType = kind.parse().map_err(anyhow::Error::msg)?;
        node = node.with_type(kind);
    }
    if let Some(v) = entry.price {
        node = node.with_price(v);
    }
    if let Some(v) = entry.flow_rate_lower_bound {
        node = node.with_flow_rate_lower_bound(v);
    }
    if let Some(v) = entry.flow_rate_upper_bound {
        node = node.with_flow_rate_upper_bound(v);
    }
    for (key, value) in &entry.attributes {
        node.set_attribute(key, *value)?;
    }
    Ok(node)
}

fn operating_unit_node(entry: &OperatingUnitEntry) -> Result<Node> {
    let mut node = Node::operating_unit(entry.id.as_str());
    if let Some(name) = &entry.name {
        node = node.with_name(name.as_str());
    }
    if let Some(v) = entry.fix_cost {
        node = node.with_fix_cost(v);
    }
    if let Some(v) = entry.proportional_cost {
        node = node.with_proportional_cost(v);
    }
    if let Some(v) = entry.capacity_lower_bound {
        node = node.with_capacity_lower_bound(v);
    }
    if let Some(v) = entry.capacity_upper_bound {
        node = node.with_capacity_upper_bound(v);
    }
    for (key, value) in &entry.attributes {
        node.set_attribute(key, *value)?;
    }
    Ok(node)
}
