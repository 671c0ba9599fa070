//! Terminal and JSON rendering of solution sets.

use std::fmt::Write as _;

use anyhow::{bail, Context, Result};

use pgraph_codec::{
    Activity, MaterialRecord, OperatingUnitRecord, Solution, SolutionSet, StructureContents,
};
use pgraph_core::Network;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

impl OutputFormat {
    /// Parse a `--format` value (`text` or `json`).
    pub fn parse(value: Option<&str>) -> Result<Self> {
        match value {
            None | Some("text") | Some("human") => Ok(OutputFormat::Text),
            Some("json") => Ok(OutputFormat::Json),
            Some(other) => bail!("unknown output format '{other}' (expected text or json)"),
        }
    }
}

/// Print `set` in the requested format.
pub fn print(set: &SolutionSet, network: Option<&Network>, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Text => print!("{}", render(set, network)),
        OutputFormat::Json => println!("{}", set.to_json().context("serializing solutions")?),
    }
    Ok(())
}

/// Human-readable listing. With a network, each structure also lists the
/// edges it uses.
pub fn render(set: &SolutionSet, network: Option<&Network>) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "=== Solutions ({}) ===", set.mode());
    if set.is_empty() {
        let _ = writeln!(out, "No feasible solution found");
        return out;
    }
    for solution in set {
        render_solution(&mut out, solution, network);
    }
    if let Some(best) = set.cheapest() {
        if set.len() > 1 {
            let _ = writeln!(out);
            let _ = writeln!(out, "Cheapest: {}", best.id);
        }
    }
    out
}

fn render_solution(out: &mut String, solution: &Solution, network: Option<&Network>) {
    let _ = writeln!(out);
    let _ = writeln!(out, "--- Structure {} ---", solution.id);
    if let Some(cost) = solution.total_cost {
        let _ = writeln!(out, "  Total cost: {cost}");
    }
    match &solution.contents {
        StructureContents::Evaluated {
            materials,
            operating_units,
        } => {
            let _ = writeln!(out, "  Materials:");
            for m in materials {
                let _ = writeln!(out, "    {}", material_line(m));
            }
            let _ = writeln!(out, "  Operating units:");
            for u in operating_units {
                let _ = writeln!(out, "    {}", operating_unit_line(u));
            }
        }
        StructureContents::Listed {
            materials,
            operating_units,
        } => {
            let _ = writeln!(out, "  Materials: {}", list(materials));
            let _ = writeln!(out, "  Operating units: {}", list(operating_units));
        }
    }

    let Some(network) = network else {
        return;
    };
    let activity = Activity::of(network, solution);
    let edges: Vec<String> = activity
        .active_edges()
        .map(|e| format!("{} -> {}", e.edge.source, e.edge.target))
        .collect();
    let _ = writeln!(out, "  Active edges: {}", list(&edges));
    if !activity.unknown.is_empty() {
        let _ = writeln!(out, "  Not in network: {}", activity.unknown.join(", "));
    }
}

fn material_line(m: &MaterialRecord) -> String {
    if m.is_balanced() {
        return format!("{}: balanced", m.name);
    }
    format!(
        "{}: {}{} ({}{})",
        m.name,
        m.cost,
        unit(&m.money_unit),
        m.flow,
        unit(&m.flow_unit)
    )
}

fn operating_unit_line(u: &OperatingUnitRecord) -> String {
    format!("{} x{}: {}{}", u.name, u.size, u.cost, unit(&u.cost_unit))
}

fn unit(unit: &Option<String>) -> String {
    unit.as_deref().map(|u| format!(" {u}")).unwrap_or_default()
}

fn list(items: &[String]) -> String {
    if items.is_empty() {
        "(none)".to_string()
    } else {
        items.join(", ")
    }
}
