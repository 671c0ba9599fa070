//! Solver run orchestrator.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use serde::Serialize;

use pgraph_codec::{decode, encode, EncodeOptions, SolutionSet, SolverMode};
use pgraph_core::{MutualExclusionSet, Network};

use crate::backend::{SolveRequest, SolverBackend};
use crate::error::{Result, SolverError};
use crate::workdir::WorkDir;

/// Default cap on the number of structures the solver reports.
pub const DEFAULT_MAX_SOLUTIONS: u32 = 100;

/// Options for a solver run.
#[derive(Debug, Clone)]
pub struct RunOptions {
    pub mode: SolverMode,
    pub max_solutions: u32,
    pub encode: EncodeOptions,
    /// Keep run files in a uuid-named directory under this root. Without
    /// one, a temporary directory is used and removed afterwards.
    pub work_root: Option<PathBuf>,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            mode: SolverMode::default(),
            max_solutions: DEFAULT_MAX_SOLUTIONS,
            encode: EncodeOptions::default(),
            work_root: None,
        }
    }
}

/// Summary of a solver run.
#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    pub backend: String,
    pub mode: SolverMode,
    /// SHA-256 of the input document.
    pub input_digest: String,
    /// Run directory, when it is kept.
    pub run_dir: Option<PathBuf>,
    pub solution_count: usize,
    pub duration_ms: u64,
}

impl fmt::Display for RunReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "=== Solver Run ===")?;
        writeln!(f, "Backend: {}", self.backend)?;
        writeln!(f, "Mode: {}", self.mode)?;
        writeln!(f, "Input digest: {}", self.input_digest)?;
        if let Some(dir) = &self.run_dir {
            writeln!(f, "Run directory: {}", dir.display())?;
        }
        writeln!(f, "Duration: {} ms", self.duration_ms)?;
        match self.solution_count {
            0 => writeln!(f, "No feasible solution found"),
            n => writeln!(f, "Solutions: {n}"),
        }
    }
}

/// Output of a successful run.
#[derive(Debug)]
pub struct RunOutput {
    pub solutions: SolutionSet,
    pub report: RunReport,
}

/// Run the solver on a network:
/// encode -> write input -> invoke -> read report -> decode.
///
/// Model errors are caught before the solver is started. No partial result
/// is returned when any stage fails.
pub fn run(
    backend: &dyn SolverBackend,
    network: &Network,
    exclusions: &[MutualExclusionSet],
    options: &RunOptions,
) -> Result<RunOutput> {
    let start = Instant::now();

    // Stage 1: Encode
    let document = encode(network, exclusions, &options.encode)?;
    let digest = document.digest();

    // Stage 2: Prepare the run directory
    let work = WorkDir::create(options.work_root.as_deref())?;
    let input = work.input_path();
    let output = work.output_path();
    fs::write(&input, document.as_str()).map_err(|e| SolverError::io(&input, e))?;
    log::info!(
        "running {} solver in {} mode, input {}",
        backend.name(),
        options.mode,
        &digest[..12]
    );

    // Stage 3: Invoke
    backend.solve(&SolveRequest {
        mode: options.mode,
        input: &input,
        output: &output,
        max_solutions: options.max_solutions,
    })?;

    // Stage 4: Read and decode the report
    let report_text = read_report(&output)?;
    let solutions = decode(options.mode, &report_text)?;

    let report = RunReport {
        backend: backend.name().to_string(),
        mode: options.mode,
        input_digest: digest,
        run_dir: work.is_persistent().then(|| work.path().to_path_buf()),
        solution_count: solutions.len(),
        duration_ms: start.elapsed().as_millis() as u64,
    };

    Ok(RunOutput { solutions, report })
}

fn read_report(path: &Path) -> Result<String> {
    if !path.is_file() {
        return Err(SolverError::invocation(format!(
            "solver wrote no report to {}",
            path.display()
        )));
    }
    fs::read_to_string(path).map_err(|e| SolverError::io(path, e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pgraph_core::Node;
    use std::cell::RefCell;

    /// Records requests and writes a fixed report.
    #[derive(Debug, Default)]
    struct CannedSolver {
        report: Option<&'static str>,
        seen: RefCell<Vec<(SolverMode, String, u32)>>,
    }

    impl SolverBackend for CannedSolver {
        fn name(&self) -> &str {
            "canned"
        }

        fn solve(&self, request: &SolveRequest<'_>) -> Result<()> {
            let input = fs::read_to_string(request.input).unwrap();
            self.seen
                .borrow_mut()
                .push((request.mode, input, request.max_solutions));
            if let Some(report) = self.report {
                fs::write(request.output, report).unwrap();
            }
            Ok(())
        }
    }

    fn network() -> Network {
        let mut n = Network::new();
        n.add_node(Node::material("M1")).unwrap();
        n.add_node(Node::material("M2")).unwrap();
        n.add_node(Node::operating_unit("O1").with_fix_cost(10.0))
            .unwrap();
        n.connect("M2", "O1", 1.0).unwrap();
        n.connect("O1", "M1", 1.0).unwrap();
        n
    }

    const REPORT: &str = "\
Feasible structure #1:
Materials:
M1: 0 USD/y (1 t/y)
M2: balanced
Operating units:
1*O1 (10 USD/y): 1 M2 => 1 M1
Total annual cost= 10 USD/y
End.
";

    #[test]
    fn defaults() {
        let options = RunOptions::default();
        assert_eq!(options.mode, SolverMode::Abb);
        assert_eq!(options.max_solutions, 100);
        assert!(options.work_root.is_none());
    }

    #[test]
    fn run_passes_input_and_decodes_report() {
        let solver = CannedSolver {
            report: Some(REPORT),
            ..Default::default()
        };
        let output = run(&solver, &network(), &[], &RunOptions::default()).unwrap();

        assert_eq!(output.solutions.costs(), vec![Some(10.0)]);
        assert_eq!(output.report.solution_count, 1);
        assert_eq!(output.report.backend, "canned");
        assert!(output.report.run_dir.is_none());

        let seen = solver.seen.borrow();
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0].0, SolverMode::Abb);
        assert!(seen[0].1.contains("O1: 1 M2 => 1 M1"));
        assert_eq!(seen[0].2, 100);
    }

    #[test]
    fn missing_report_is_an_invocation_failure() {
        let solver = CannedSolver::default();
        let err = run(&solver, &network(), &[], &RunOptions::default()).unwrap_err();
        assert!(matches!(err, SolverError::InvocationFailed { .. }));
    }

    #[test]
    fn invalid_model_never_reaches_the_solver() {
        let solver = CannedSolver {
            report: Some(REPORT),
            ..Default::default()
        };
        let mut n = network();
        n.add_node(Node::operating_unit("O2")).unwrap();
        let err = run(&solver, &n, &[], &RunOptions::default()).unwrap_err();
        assert!(matches!(err, SolverError::Codec(_)));
        assert!(solver.seen.borrow().is_empty());
    }

    #[test]
    fn persistent_run_dir_is_reported() {
        let root = tempfile::tempdir().unwrap();
        let solver = CannedSolver {
            report: Some(REPORT),
            ..Default::default()
        };
        let options = RunOptions {
            work_root: Some(root.path().to_path_buf()),
            ..Default::default()
        };
        let output = run(&solver, &network(), &[], &options).unwrap();
        let dir = output.report.run_dir.unwrap();
        assert!(dir.join("input.in").is_file());
        assert!(dir.join("output.out").is_file());
    }

    #[test]
    fn report_display() {
        let report = RunReport {
            backend: "process".into(),
            mode: SolverMode::Ssg,
            input_digest: "ab".repeat(32),
            run_dir: None,
            solution_count: 0,
            duration_ms: 3,
        };
        let text = report.to_string();
        assert!(text.contains("Mode: SSG"));
        assert!(text.contains("No feasible solution found"));
    }
}
