//! Running the external P-graph solver.
//!
//! A run encodes the network, hands the input file to a [`SolverBackend`] in
//! a directory of its own, and decodes the report the solver leaves behind.

pub mod backend;
pub mod error;
pub mod pipeline;
pub mod workdir;

pub use backend::{ProcessSolver, SolveRequest, SolverBackend};
pub use error::{Result, SolverError};
pub use pipeline::{run, RunOptions, RunOutput, RunReport, DEFAULT_MAX_SOLUTIONS};
pub use workdir::WorkDir;
