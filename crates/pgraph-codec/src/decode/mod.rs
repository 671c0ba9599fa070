//! Decoder for solver reports.
//!
//! Decoding runs in two passes. [`reassemble`](crate::reassemble::reassemble)
//! rebuilds logical lines from the wrapped report, then the lines go to the
//! decoder for the report's mode.

mod evaluated;
mod listed;

use crate::error::Result;
use crate::mode::SolverMode;
use crate::reassemble::reassemble;
use crate::solution::SolutionSet;

/// Decode the report of a solver run in `mode`.
///
/// A report naming no structure decodes to an empty set; only malformed
/// structures are errors.
pub fn decode(mode: SolverMode, report: &str) -> Result<SolutionSet> {
    let lines = reassemble(report);
    log::debug!("{} logical report lines for {mode}", lines.len());

    let solutions = match mode {
        SolverMode::SsgLp | SolverMode::Abb => evaluated::decode(&lines)?,
        SolverMode::Msg => listed::decode(&lines, true)?,
        SolverMode::Ssg => listed::decode(&lines, false)?,
    };

    if solutions.is_empty() {
        log::info!("no feasible solution found");
    }
    Ok(SolutionSet::new(mode, solutions))
}
