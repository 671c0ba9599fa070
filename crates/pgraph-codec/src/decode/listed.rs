//! Reports that list structures by name only (MSG and SSG).
//!
//! ```text
//! Maximal Structure:
//! Materials(3):
//! M1, M2, M3
//! Operating units(2):
//! O1, O2
//! Solution structure #1:
//! Materials:
//!         (0):
//! ```
//!
//! Every marker is followed by a materials header, the material list, an
//! operating-units header and the unit list. A header counting zero items
//! closes the block. An indented or single-name list is joined onto its
//! header by reassembly (`Materials: M1, M2`) and read from there.

use crate::error::ParseError;
use crate::reassemble::LogicalLine;
use crate::solution::{Solution, SolutionId, StructureContents};

const MAXIMAL_MARKER: &str = "Maximal Structure:";
const STRUCTURE_MARKER: &str = "Solution structure ";
const MATERIALS_HEADER: &str = "Materials";
const UNITS_HEADER: &str = "Operating units";

/// Decode every marked block. The maximal structure is only reported in MSG
/// mode; `include_maximal` is false for SSG.
pub(crate) fn decode(
    lines: &[LogicalLine],
    include_maximal: bool,
) -> Result<Vec<Solution>, ParseError> {
    let mut solutions = Vec::new();

    for (i, line) in lines.iter().enumerate() {
        if include_maximal && line.text.starts_with(MAXIMAL_MARKER) {
            log::info!("maximal structure");
            solutions.push(Solution {
                id: SolutionId::Maximal,
                contents: block(lines, i)?,
                total_cost: Some(0.0),
            });
        } else if line.text.starts_with(STRUCTURE_MARKER) {
            let number = structure_number(line)?;
            log::info!("solution structure #{number}");
            solutions.push(Solution {
                id: SolutionId::Structure { number },
                contents: block(lines, i)?,
                total_cost: None,
            });
        }
    }

    Ok(solutions)
}

/// Text between `#` and the trailing `:` of a structure marker.
fn structure_number(line: &LogicalLine) -> Result<String, ParseError> {
    let number = line
        .text
        .split_once('#')
        .and_then(|(_, rest)| rest.trim_end().strip_suffix(':'))
        .map(str::trim)
        .filter(|n| !n.is_empty());
    match number {
        Some(n) => Ok(n.to_string()),
        None => Err(ParseError::at(
            line,
            "expected 'Solution structure #<n>:'",
        )),
    }
}

fn block(lines: &[LogicalLine], marker: usize) -> Result<StructureContents, ParseError> {
    let mut cursor = marker + 1;

    let header_line = block_line(lines, marker, cursor)?;
    let Some(header) = list_header(header_line, MATERIALS_HEADER) else {
        return Err(ParseError::at(header_line, "expected a materials header"));
    };
    if header.count == Count::Empty {
        return Ok(StructureContents::Listed {
            materials: Vec::new(),
            operating_units: Vec::new(),
        });
    }
    let materials = read_list(lines, marker, &mut cursor, header_line, &header)?;

    let header_line = block_line(lines, marker, cursor)?;
    let Some(header) = list_header(header_line, UNITS_HEADER) else {
        return Err(ParseError::at(
            header_line,
            "expected an operating units header",
        ));
    };
    let operating_units = if header.count == Count::Empty {
        Vec::new()
    } else {
        read_list(lines, marker, &mut cursor, header_line, &header)?
    };

    Ok(StructureContents::Listed {
        materials,
        operating_units,
    })
}

/// Items announced by `header`: inline on the header line when reassembly
/// joined them onto it, otherwise on the next line. Moves `cursor` past the
/// list.
fn read_list(
    lines: &[LogicalLine],
    marker: usize,
    cursor: &mut usize,
    header_line: &LogicalLine,
    header: &ListHeader<'_>,
) -> Result<Vec<String>, ParseError> {
    let (line, text) = match header.inline {
        Some(text) => {
            *cursor += 1;
            (header_line, text)
        }
        None => {
            let line = block_line(lines, marker, *cursor + 1)?;
            *cursor += 2;
            (line, line.text.as_str())
        }
    };
    let items = split_list(text);
    check_count(line, header.count, items.len())?;
    Ok(items)
}

fn block_line(
    lines: &[LogicalLine],
    marker: usize,
    index: usize,
) -> Result<&LogicalLine, ParseError> {
    lines
        .get(index)
        .ok_or_else(|| ParseError::at(&lines[marker], "structure block is truncated"))
}

/// Item count announced by a list header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Count {
    Empty,
    Exactly(usize),
    Unstated,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct ListHeader<'a> {
    count: Count,
    /// List text that followed the header on the same logical line.
    inline: Option<&'a str>,
}

/// Parse `Materials(3):`, `Materials: (0):`, `Materials:` or any of these
/// followed by the list itself. `None` when the line is not a header for
/// `prefix`.
fn list_header<'a>(line: &'a LogicalLine, prefix: &str) -> Option<ListHeader<'a>> {
    let rest = line.text.strip_prefix(prefix)?;
    let (rest, colon) = match rest.strip_prefix(':') {
        Some(rest) => (rest.trim_start(), true),
        None => (rest, false),
    };
    let (count, rest) = match announced_count(rest) {
        Some((0, rest)) => (Count::Empty, rest),
        Some((n, rest)) => (Count::Exactly(n), rest),
        None if colon => (Count::Unstated, rest),
        None => return None,
    };
    let rest = rest.trim();
    Some(ListHeader {
        count,
        inline: (!rest.is_empty()).then_some(rest),
    })
}

/// Split a leading `(n):` off `text`.
fn announced_count(text: &str) -> Option<(usize, &str)> {
    let (n, rest) = text.strip_prefix('(')?.split_once("):")?;
    Some((n.trim().parse().ok()?, rest))
}

fn check_count(line: &LogicalLine, count: Count, found: usize) -> Result<(), ParseError> {
    match count {
        Count::Exactly(n) if n != found => Err(ParseError::at(
            line,
            format!("header announces {n} items, found {found}"),
        )),
        _ => Ok(()),
    }
}

fn split_list(text: &str) -> Vec<String> {
    text.split(", ")
        .map(|item| item.trim().trim_end_matches(',').trim())
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect()
}
