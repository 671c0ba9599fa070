//! Ways of running the solver.
//!
//! The pipeline only needs something that turns an input file into a report
//! file. [`ProcessSolver`] does that by running the solver executable, with an
//! optional launcher in front of it (e.g. `wine` for a Windows build).

use std::ffi::OsString;
use std::fmt;
use std::path::{Path, PathBuf};
use std::process::Command;

use pgraph_codec::SolverMode;

use crate::error::{Result, SolverError};

/// One solver invocation.
#[derive(Debug, Clone, Copy)]
pub struct SolveRequest<'a> {
    pub mode: SolverMode,
    /// Encoded problem to read.
    pub input: &'a Path,
    /// Report file the solver must write.
    pub output: &'a Path,
    pub max_solutions: u32,
}

/// Anything that can run the solver on an input file.
///
/// Object-safe so backends can be passed as `&dyn SolverBackend`.
pub trait SolverBackend: fmt::Debug {
    /// Human-readable name, used in logs and run reports.
    fn name(&self) -> &str;

    /// Run the solver. On success the report has been written to
    /// `request.output`.
    fn solve(&self, request: &SolveRequest<'_>) -> Result<()>;
}

/// Runs the solver executable as a child process:
/// `[launcher...] <executable> <MODE> <input> <output> <max_solutions>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessSolver {
    executable: PathBuf,
    launcher: Vec<String>,
}

impl ProcessSolver {
    pub fn new(executable: impl Into<PathBuf>) -> Self {
        Self {
            executable: executable.into(),
            launcher: Vec::new(),
        }
    }

    /// Prefix the solver with a launcher program and its arguments.
    pub fn with_launcher<I, S>(mut self, launcher: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.launcher = launcher.into_iter().map(Into::into).collect();
        self
    }

    pub fn executable(&self) -> &Path {
        &self.executable
    }

    pub fn launcher(&self) -> &[String] {
        &self.launcher
    }

    /// Full argument vector for a request, program first.
    pub fn command_line(&self, request: &SolveRequest<'_>) -> Vec<OsString> {
        let mut args: Vec<OsString> = self.launcher.iter().map(OsString::from).collect();
        args.push(self.executable.clone().into_os_string());
        args.push(request.mode.solver_name().into());
        args.push(request.input.as_os_str().to_owned());
        args.push(request.output.as_os_str().to_owned());
        args.push(request.max_solutions.to_string().into());
        args
    }
}

impl SolverBackend for ProcessSolver {
    fn name(&self) -> &str {
        "process"
    }

    fn solve(&self, request: &SolveRequest<'_>) -> Result<()> {
        let args = self.command_line(request);
        let Some((program, rest)) = args.split_first() else {
            return Err(SolverError::invocation("empty command line"));
        };
        log::debug!("running {:?}", args);

        let output = Command::new(program)
            .args(rest)
            .output()
            .map_err(|e| {
                SolverError::invocation(format!(
                    "failed to start {}: {e}",
                    Path::new(program).display()
                ))
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(SolverError::invocation(format!(
                "solver exited with {}: {}",
                output.status,
                stderr.trim()
            )));
        }
        log::debug!(
            "solver finished, {} bytes on stdout",
            output.stdout.len()
        );
        Ok(())
    }
}
