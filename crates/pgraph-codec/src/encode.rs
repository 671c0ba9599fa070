//! Encoder for the solver's `PNS_problem_v1` input language.
//!
//! The document is a sequence of sections, each followed by one blank line:
//! header, measurement units, defaults, materials, operating units, flow
//! rates and, when any are declared, mutual-exclusion sets. Nodes and edges
//! are written in insertion order so the same model always produces the same
//! bytes.

use std::fmt;
use std::io::{self, Write};

use sha2::{Digest, Sha256};

use pgraph_core::{keys, MaterialType, MutualExclusionSet, Network, Node, UNBOUNDED};

use crate::error::{CodecError, Result};

/// Value of the `file_type` header line.
pub const FILE_TYPE: &str = "PNS_problem_v1";

const MEASUREMENT_UNITS: [(&str, &str); 3] =
    [("mass_unit", "t"), ("time_unit", "y"), ("money_unit", "USD")];

const EXCLUSION_HEADER: &str = "mutually_exclusive_sets_of_operating_units:";

/// Options for [`encode`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodeOptions {
    /// Value of the `file_name` header line.
    pub file_name: String,
}

impl Default for EncodeOptions {
    fn default() -> Self {
        Self {
            file_name: "Graph_1".to_string(),
        }
    }
}

/// An encoded solver input document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputDocument {
    text: String,
}

impl InputDocument {
    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn into_string(self) -> String {
        self.text
    }

    /// SHA-256 of the document text, hex encoded.
    pub fn digest(&self) -> String {
        let mut hasher = Sha256::new();
        hasher.update(self.text.as_bytes());
        format!("{:x}", hasher.finalize())
    }

    pub fn write_to<W: Write>(&self, mut writer: W) -> io::Result<()> {
        writer.write_all(self.text.as_bytes())?;
        writer.flush()
    }
}

impl fmt::Display for InputDocument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

/// Encode a network and its mutual-exclusion sets.
///
/// The model is validated first; every issue found is returned in
/// [`CodecError::InvalidModel`] and nothing is written.
pub fn encode(
    network: &Network,
    exclusions: &[MutualExclusionSet],
    options: &EncodeOptions,
) -> Result<InputDocument> {
    network
        .validate_problem(exclusions)
        .map_err(CodecError::InvalidModel)?;

    let mut doc = Document::default();

    doc.section(
        None,
        [
            format!("file_type={FILE_TYPE}"),
            format!("file_name={}", options.file_name),
        ],
    );
    doc.section(
        Some("measurement_units:"),
        MEASUREMENT_UNITS
            .iter()
            .map(|(key, unit)| format!("{key}={unit}")),
    );
    doc.section(Some("defaults:"), default_lines());
    doc.section(Some("materials:"), network.materials().map(material_line));
    doc.section(
        Some("operating_units:"),
        network.operating_units().map(operating_unit_line),
    );
    doc.section(
        Some("material_to_operating_unit_flow_rates:"),
        network
            .operating_units()
            .map(|unit| flow_rate_line(network, unit)),
    );
    if !exclusions.is_empty() {
        doc.section(
            Some(EXCLUSION_HEADER),
            exclusions.iter().enumerate().map(|(i, set)| {
                format!("ME{i}: {}", set.members().join(", "))
            }),
        );
    }

    log::debug!(
        "encoded {} materials, {} operating units, {} exclusion sets",
        network.materials().count(),
        network.operating_units().count(),
        exclusions.len()
    );

    Ok(InputDocument { text: doc.text })
}

#[derive(Default)]
struct Document {
    text: String,
}

impl Document {
    fn section<I>(&mut self, header: Option<&str>, lines: I)
    where
        I: IntoIterator<Item = String>,
    {
        if let Some(header) = header {
            self.push_line(header);
        }
        for line in lines {
            self.push_line(&line);
        }
        self.text.push('\n');
    }

    fn push_line(&mut self, line: &str) {
        self.text.push_str(line);
        self.text.push('\n');
    }
}

fn default_lines() -> Vec<String> {
    let zero = number(0.0);
    let unbounded = number(UNBOUNDED);
    vec![
        format!("material_type={}", MaterialType::default()),
        format!("material_{}={zero}", keys::FLOW_RATE_LOWER_BOUND),
        format!("material_{}={unbounded}", keys::FLOW_RATE_UPPER_BOUND),
        format!("material_{}={zero}", keys::PRICE),
        format!("operating_unit_{}={zero}", keys::CAPACITY_LOWER_BOUND),
        format!("operating_unit_{}={unbounded}", keys::CAPACITY_UPPER_BOUND),
        format!("operating_unit_{}={zero}", keys::FIX_COST),
        format!("operating_unit_{}={zero}", keys::PROPORTIONAL_COST),
    ]
}

/// `M1: product, price=200`
fn material_line(node: &Node) -> String {
    let classification = node.material_type().unwrap_or_default();
    let mut fields = vec![classification.to_string()];
    fields.extend(attribute_fields(node));
    format!("{}: {}", node.id(), fields.join(", "))
}

/// `O1: fix_cost=2000, proportional_cost=400`
fn operating_unit_line(node: &Node) -> String {
    format!("{}: {}", node.id(), attribute_fields(node).join(", "))
}

fn attribute_fields(node: &Node) -> Vec<String> {
    node.attributes()
        .iter()
        .map(|(key, value)| format!("{key}={}", number(value)))
        .collect()
}

/// `O1: 2 M2 => 3 M1`
fn flow_rate_line(network: &Network, unit: &Node) -> String {
    let inputs: Vec<String> = network
        .incoming_edges(unit.id())
        .map(|e| format!("{} {}", number(e.weight), e.source))
        .collect();
    let outputs: Vec<String> = network
        .outgoing_edges(unit.id())
        .map(|e| format!("{} {}", number(e.weight), e.target))
        .collect();
    format!(
        "{}: {} => {}",
        unit.id(),
        inputs.join(" + "),
        outputs.join(" + ")
    )
}

/// Shortest decimal form; integral values have no fractional part.
fn number(value: f64) -> String {
    value.to_string()
}
