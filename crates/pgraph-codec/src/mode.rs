//! Solver operating modes.
//!
//! The solver is told which algorithm to run by name on its command line, and
//! older configuration refers to the same modes by numeric code. Both forms go
//! through the single table below.

use std::fmt;
use std::str::FromStr;

use serde::{Serialize, Serializer};

use crate::error::CodecError;

/// Algorithm the external solver runs. Determines the report grammar.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum SolverMode {
    /// Maximal structure generation.
    Msg,
    /// Solution structure generation.
    Ssg,
    /// Solution structure generation with LP evaluation of each structure.
    SsgLp,
    /// Accelerated branch and bound, passed to the solver as `INSIDEOUT`.
    #[default]
    Abb,
}

/// `(mode, code, solver name)`
const MODE_TABLE: [(SolverMode, u8, &str); 4] = [
    (SolverMode::Msg, 0, "MSG"),
    (SolverMode::Ssg, 1, "SSG"),
    (SolverMode::SsgLp, 2, "SSGLP"),
    (SolverMode::Abb, 3, "INSIDEOUT"),
];

const ABB_ALIAS: &str = "ABB";

impl SolverMode {
    pub const ALL: [SolverMode; 4] = [
        SolverMode::Msg,
        SolverMode::Ssg,
        SolverMode::SsgLp,
        SolverMode::Abb,
    ];

    fn entry(self) -> (SolverMode, u8, &'static str) {
        // The table covers every variant.
        MODE_TABLE[self as usize]
    }

    /// Numeric code of the mode.
    pub fn code(self) -> u8 {
        self.entry().1
    }

    /// Name passed to the solver executable.
    pub fn solver_name(self) -> &'static str {
        self.entry().2
    }

    /// Look up a mode by numeric code.
    pub fn from_code(code: u8) -> Result<Self, CodecError> {
        MODE_TABLE
            .iter()
            .find(|(_, c, _)| *c == code)
            .map(|(mode, _, _)| *mode)
            .ok_or_else(|| CodecError::UnsupportedMode(code.to_string()))
    }

    /// Whether reports in this mode carry per-structure costs.
    pub fn reports_costs(self) -> bool {
        matches!(self, SolverMode::SsgLp | SolverMode::Abb)
    }
}

impl TryFrom<u8> for SolverMode {
    type Error = CodecError;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        Self::from_code(code)
    }
}

impl FromStr for SolverMode {
    type Err = CodecError;

    /// Accepts solver names (case-insensitive), `ABB`, or a numeric code.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if let Ok(code) = s.parse::<u8>() {
            return Self::from_code(code);
        }
        if s.eq_ignore_ascii_case(ABB_ALIAS) {
            return Ok(SolverMode::Abb);
        }
        MODE_TABLE
            .iter()
            .find(|(_, _, name)| name.eq_ignore_ascii_case(s))
            .map(|(mode, _, _)| *mode)
            .ok_or_else(|| CodecError::UnsupportedMode(s.to_string()))
    }
}

impl fmt::Display for SolverMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.solver_name())
    }
}

impl Serialize for SolverMode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.solver_name())
    }
}
