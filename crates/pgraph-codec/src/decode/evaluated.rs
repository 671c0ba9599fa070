//! Reports with per-structure figures (SSGLP and ABB).
//!
//! ```text
//! Feasible structure #1:
//! Materials:
//! M1: 0 USD/y (3 t/y)
//! M2: balanced
//! Operating units:
//! 1*O1 (2400 USD/y): 2 M2 => 3 M1
//! Total annual cost= 2400 USD/y
//! ```

use crate::error::ParseError;
use crate::reassemble::{LogicalLine, TERMINATOR};
use crate::solution::{
    MaterialRecord, OperatingUnitRecord, Solution, SolutionId, StructureContents,
};

const SEGMENT_MARKER: &str = "Feasible structure";
const MATERIALS_HEADER: &str = "Materials:";
const UNITS_HEADER: &str = "Operating units:";
const TOTAL_COST_HEADER: &str = "Total annual cost=";
const BALANCED: &str = "balanced";

/// Which part of a feasible-structure block the scanner is in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    Seeking,
    InMaterials,
    InOperatingUnits,
    InTotalCost,
}

impl Section {
    /// Returns the next state and whether `line` was a section header.
    fn next(self, line: &str) -> (Section, bool) {
        if line.starts_with(MATERIALS_HEADER) {
            (Section::InMaterials, true)
        } else if line.starts_with(UNITS_HEADER) {
            (Section::InOperatingUnits, true)
        } else if line.starts_with(TOTAL_COST_HEADER) {
            (Section::InTotalCost, true)
        } else {
            (self, false)
        }
    }
}

struct Segment<'a> {
    index: usize,
    marker: &'a LogicalLine,
    body: &'a [LogicalLine],
}

pub(crate) fn decode(lines: &[LogicalLine]) -> Result<Vec<Solution>, ParseError> {
    let mut bounds: Vec<usize> = lines
        .iter()
        .enumerate()
        .filter(|(_, line)| line.text.starts_with(SEGMENT_MARKER))
        .map(|(i, _)| i)
        .collect();
    if bounds.is_empty() {
        return Ok(Vec::new());
    }
    // The final segment stops before the terminator, if there is one.
    let end = match lines.last() {
        Some(last) if last.text == TERMINATOR => lines.len() - 1,
        _ => lines.len(),
    };
    bounds.push(end);

    let segments: Vec<Segment<'_>> = bounds
        .windows(2)
        .enumerate()
        .map(|(index, w)| Segment {
            index,
            marker: &lines[w[0]],
            body: &lines[w[0]..w[1]],
        })
        .collect();

    let solutions = segments
        .iter()
        .map(decode_segment)
        .collect::<Result<Vec<_>, _>>()?;

    // A report whose structures carry no cost at all names no feasible
    // solution.
    if solutions.iter().all(|s| s.total_cost.is_none()) {
        return Ok(Vec::new());
    }
    if let Some((segment, _)) = segments
        .iter()
        .zip(&solutions)
        .find(|(_, s)| s.total_cost.is_none())
    {
        return Err(ParseError::at(
            segment.marker,
            "feasible structure has no total annual cost",
        ));
    }
    Ok(solutions)
}

fn decode_segment(segment: &Segment<'_>) -> Result<Solution, ParseError> {
    let label = segment.marker.text[SEGMENT_MARKER.len()..]
        .trim()
        .trim_end_matches(':')
        .to_string();
    log::info!("feasible structure {label}");

    let mut state = Section::Seeking;
    let mut materials = Vec::new();
    let mut operating_units = Vec::new();
    let mut total_cost: Option<f64> = None;

    for line in segment.body {
        let (next, is_header) = state.next(&line.text);
        state = next;
        if !is_header {
            match state {
                Section::InMaterials => materials.push(material_record(line)?),
                Section::InOperatingUnits => operating_units.push(operating_unit_record(line)?),
                Section::Seeking | Section::InTotalCost => {}
            }
        }
        if state == Section::InTotalCost {
            log::info!("{}", line.text);
            let cost = total_cost_of(line)?;
            if total_cost.replace(cost).is_some() {
                return Err(ParseError::at(line, "second total annual cost in one structure"));
            }
        }
    }

    Ok(Solution {
        id: SolutionId::Feasible {
            index: segment.index,
            label,
        },
        contents: StructureContents::Evaluated {
            materials,
            operating_units,
        },
        total_cost,
    })
}

/// `M1: 0 USD/y (3 t/y)` or `M2: balanced`
fn material_record(line: &LogicalLine) -> Result<MaterialRecord, ParseError> {
    let cleaned = line.text.replace('(', " ").replace(')', "");
    let tokens: Vec<&str> = cleaned.split_whitespace().collect();
    let name = match tokens.first().copied() {
        Some(first) => first.strip_suffix(':').unwrap_or(first),
        None => return Err(ParseError::at(line, "empty material line")),
    };
    if tokens.get(1) == Some(&BALANCED) {
        return Ok(MaterialRecord::balanced(name));
    }
    if tokens.len() < 4 {
        return Err(ParseError::at(
            line,
            "expected '<material>: <cost> <unit> (<flow> <unit>)'",
        ));
    }
    Ok(MaterialRecord {
        name: name.to_string(),
        cost: number(line, tokens[1])?,
        money_unit: Some(tokens[2].to_string()),
        flow: number(line, tokens[3])?,
        flow_unit: tokens.get(4).map(|u| u.to_string()),
    })
}

/// `1*O1 (2400 USD/y): 2 M2 => 3 M1`
fn operating_unit_record(line: &LogicalLine) -> Result<OperatingUnitRecord, ParseError> {
    let head = match line.text.split_once(')') {
        Some((head, _)) => head,
        None => line.text.as_str(),
    };
    let cleaned = head.replace(['*', '('], " ");
    let tokens: Vec<&str> = cleaned.split_whitespace().collect();
    if tokens.len() < 3 {
        return Err(ParseError::at(
            line,
            "expected '<size>*<unit> (<cost> <unit>)'",
        ));
    }
    Ok(OperatingUnitRecord {
        size: number(line, tokens[0])?,
        name: tokens[1].to_string(),
        cost: number(line, tokens[2])?,
        cost_unit: tokens.get(3).map(|u| u.to_string()),
    })
}

/// Fourth whitespace token, e.g. `2400` in `Total annual cost= 2400 USD/y`.
fn total_cost_of(line: &LogicalLine) -> Result<f64, ParseError> {
    match line.text.split_whitespace().nth(3) {
        Some(token) => number(line, token),
        None => Err(ParseError::at(line, "missing total annual cost value")),
    }
}

fn number(line: &LogicalLine, token: &str) -> Result<f64, ParseError> {
    token
        .parse::<f64>()
        .map_err(|_| ParseError::at(line, format!("expected a number, found '{token}'")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reassemble::reassemble;

    const TWO_STRUCTURES: &str = "\
Input problem:
Materials:
Feasible structure #1:
Materials:
M1: 0 USD/y (3 t/y)
M2: 400 USD/y (2 t/y)
M3: balanced
Operating units:
1*O1 (2400 USD/y): 2 M2 => 3 M1
Total annual cost= 2400 USD/y
Feasible structure #2:
Materials:
M1: 0 USD/y (1 t/y)
M3: 400 USD/y (4 t/y)
Operating units:
1*O2 (1400 USD/y): 4 M3 => 1 M1
Total annual cost= 2600 USD/y
End.
";

    #[test]
    fn two_segments() {
        let solutions = decode(&reassemble(TWO_STRUCTURES)).unwrap();
        assert_eq!(solutions.len(), 2);
        assert_eq!(solutions[0].total_cost, Some(2400.0));
        assert_eq!(solutions[1].total_cost, Some(2600.0));
        assert_eq!(
            solutions[1].id,
            SolutionId::Feasible {
                index: 1,
                label: "#2".into()
            }
        );
        assert_eq!(solutions[0].material_names(), vec!["M1", "M2", "M3"]);
        assert_eq!(solutions[1].operating_unit_names(), vec!["O2"]);
    }

    #[test]
    fn material_and_unit_figures() {
        let solutions = decode(&reassemble(TWO_STRUCTURES)).unwrap();
        let first = &solutions[0];

        let m2 = first.material("M2").unwrap();
        assert_eq!(m2.cost, 400.0);
        assert_eq!(m2.money_unit.as_deref(), Some("USD/y"));
        assert_eq!(m2.flow, 2.0);
        assert_eq!(m2.flow_unit.as_deref(), Some("t/y"));

        assert_eq!(first.material("M3"), Some(&MaterialRecord::balanced("M3")));

        let o1 = first.operating_unit("O1").unwrap();
        assert_eq!(o1.size, 1.0);
        assert_eq!(o1.cost, 2400.0);
        assert_eq!(o1.cost_unit.as_deref(), Some("USD/y"));
    }

    #[test]
    fn no_marker_means_no_solution() {
        let raw = "Input problem:\nMaterials:\nM1: product\nEnd.\n";
        assert!(decode(&reassemble(raw)).unwrap().is_empty());
        assert!(decode(&[]).unwrap().is_empty());
    }

    #[test]
    fn structures_without_any_cost_mean_no_solution() {
        let raw = "Feasible structures: none\nEnd.\n";
        assert!(decode(&reassemble(raw)).unwrap().is_empty());
    }

    #[test]
    fn one_structure_missing_its_cost() {
        let raw = "\
Feasible structure #1:
Operating units:
1*O1 (2400 USD/y): 2 M2 => 3 M1
Total annual cost= 2400 USD/y
Feasible structure #2:
Operating units:
1*O2 (1400 USD/y): 4 M3 => 1 M1
End.
";
        let err = decode(&reassemble(raw)).unwrap_err();
        assert_eq!(err.line, "Feasible structure #2:");
        assert_eq!(err.line_no, 5);
    }

    #[test]
    fn report_without_terminator_keeps_last_cost() {
        let raw = TWO_STRUCTURES.trim_end().trim_end_matches("End.");
        let lines = reassemble(raw);
        assert_eq!(lines.last().unwrap().text, "Total annual cost= 2600 USD/y");

        let solutions = decode(&lines).unwrap();
        assert_eq!(solutions.len(), 2);
        assert_eq!(solutions[1].total_cost, Some(2600.0));
        assert_eq!(solutions[1].operating_unit_names(), vec!["O2"]);
    }

    #[test]
    fn malformed_cost_is_a_parse_error() {
        let raw = "Feasible structure #1:\nTotal annual cost= lots USD/y\nEnd.\n";
        let err = decode(&reassemble(raw)).unwrap_err();
        assert_eq!(err.line_no, 2);
        assert!(err.reason.contains("lots"));
    }

    #[test]
    fn malformed_material_is_a_parse_error() {
        let raw = "Feasible structure #1:\nMaterials:\nM1: 0 USD/y\nEnd.\n";
        let err = decode(&reassemble(raw)).unwrap_err();
        assert_eq!(err.line, "M1: 0 USD/y");
    }

    #[test]
    fn state_transitions() {
        let s = Section::Seeking;
        assert_eq!(s.next("Materials:"), (Section::InMaterials, true));
        assert_eq!(
            Section::InMaterials.next("Operating units:"),
            (Section::InOperatingUnits, true)
        );
        assert_eq!(
            Section::InOperatingUnits.next("Total annual cost= 1 USD/y"),
            (Section::InTotalCost, true)
        );
        assert_eq!(Section::InMaterials.next("M1: balanced"), (Section::InMaterials, false));
    }
}
