//! Logical-line reassembly for solver reports.
//!
//! The solver wraps long report lines onto following physical lines. A wrapped
//! piece is recognised by [`is_continuation`] and appended to the line above.
//! Every other pass of the decoder works on the reassembled lines only.

/// Terminal sequence the solver sometimes leaves at the end of a line that is
/// about to be wrapped (ANSI erase-to-end-of-line).
pub const STRAY_TAIL: &str = "\u{1b}[K";

/// Closing line of a report.
pub(crate) const TERMINATOR: &str = "End.";

/// A one-unit list header whose unit name must stay on its own line.
const SINGLE_UNIT_HEADER: &str = "Operating units(1):";

/// A report line after reassembly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogicalLine {
    /// Trimmed text, with wrapped pieces joined by a single space.
    pub text: String,
    /// 1-based number of the first physical line.
    pub line_no: usize,
    /// Byte offset of the first physical line in the raw report.
    pub offset: usize,
}

/// Whether a raw physical line continues the line above it.
///
/// A line continues its predecessor if it starts with a space, or if it has
/// content but none of the delimiters `:`, `,` and `= ` and is not the
/// terminator line.
pub fn is_continuation(raw: &str) -> bool {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return false;
    }
    if raw.starts_with(' ') {
        return true;
    }
    !raw.contains(':') && !raw.contains(',') && !raw.contains("= ") && trimmed != TERMINATOR
}

/// Rebuild logical lines from raw report text.
///
/// Lines are processed top to bottom, so a line wrapped several times is
/// joined completely. Empty lines are dropped from the result.
pub fn reassemble(raw: &str) -> Vec<LogicalLine> {
    let mut lines: Vec<LogicalLine> = Vec::new();
    let mut offset = 0;

    for (i, physical) in raw.split('\n').enumerate() {
        let start = offset;
        offset += physical.len() + 1;
        let physical = physical.strip_suffix('\r').unwrap_or(physical);

        match lines.last_mut() {
            Some(prev)
                if is_continuation(physical)
                    && strip_stray_tail(&prev.text).trim() != SINGLE_UNIT_HEADER =>
            {
                let head = strip_stray_tail(&prev.text).trim().to_string();
                prev.text = format!("{head} {}", physical.trim());
            }
            _ => lines.push(LogicalLine {
                text: physical.to_string(),
                line_no: i + 1,
                offset: start,
            }),
        }
    }

    lines
        .into_iter()
        .filter_map(|mut line| {
            line.text = strip_stray_tail(&line.text).trim().to_string();
            (!line.text.is_empty()).then_some(line)
        })
        .collect()
}

fn strip_stray_tail(text: &str) -> &str {
    let text = text.trim_end();
    text.strip_suffix(STRAY_TAIL).unwrap_or(text)
}
