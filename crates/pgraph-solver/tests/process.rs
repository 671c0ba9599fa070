//! Runs against a stand-in solver script.

#![cfg(unix)]

use std::fs;
use std::path::{Path, PathBuf};

use pgraph_codec::SolverMode;
use pgraph_core::{exclusion_sets, MaterialType, Network, Node};
use pgraph_solver::{run, ProcessSolver, RunOptions, SolverError};

const REPORT: &str = "\
Feasible structure #1:
Materials:
M1: 0 USD/y (3 t/y)
M2: 400 USD/y (2 t/y)
Operating units:
1*O1 (2400 USD/y): 2 M2 => 3 M1
Total annual cost= 2800 USD/y
Feasible structure #2:
Materials:
M1: 0 USD/y (1 t/y)
M3: 400 USD/y (4 t/y)
Operating units:
1*O2 (1400 USD/y): 4 M3 => 1 M1
Total annual cost= 1800 USD/y
End.
";

fn plant() -> Network {
    let mut n = Network::new();
    n.add_node(Node::material("M1").with_type(MaterialType::Product))
        .unwrap();
    n.add_node(Node::material("M2").with_price(200.0)).unwrap();
    n.add_node(Node::material("M3").with_price(100.0)).unwrap();
    n.add_node(
        Node::operating_unit("O1")
            .with_fix_cost(2000.0)
            .with_proportional_cost(400.0),
    )
    .unwrap();
    n.add_node(
        Node::operating_unit("O2")
            .with_fix_cost(1000.0)
            .with_proportional_cost(400.0),
    )
    .unwrap();
    n.connect("O1", "M1", 3.0).unwrap();
    n.connect("O2", "M1", 1.0).unwrap();
    n.connect("M2", "O1", 2.0).unwrap();
    n.connect("M3", "O2", 4.0).unwrap();
    n
}

/// A solver script run through `sh`. It records its arguments and then runs
/// `body`.
fn script(dir: &Path, body: &str) -> ProcessSolver {
    let path: PathBuf = dir.join("fake_solver.sh");
    let args = dir.join("args.txt");
    fs::write(
        &path,
        format!("echo \"$@\" > '{}'\n{body}\n", args.display()),
    )
    .unwrap();
    ProcessSolver::new(path).with_launcher(["sh"])
}

#[test]
fn stand_in_solver_report_is_decoded() {
    let dir = tempfile::tempdir().unwrap();
    let report = dir.path().join("canned.out");
    fs::write(&report, REPORT).unwrap();
    let solver = script(dir.path(), &format!("cp '{}' \"$3\"", report.display()));

    let options = RunOptions {
        max_solutions: 7,
        ..Default::default()
    };
    let output = run(
        &solver,
        &plant(),
        &exclusion_sets([["O1", "O2"]]),
        &options,
    )
    .unwrap();

    assert_eq!(output.solutions.len(), 2);
    assert_eq!(output.solutions.costs(), vec![Some(2800.0), Some(1800.0)]);
    assert_eq!(output.report.mode, SolverMode::Abb);

    let args = fs::read_to_string(dir.path().join("args.txt")).unwrap();
    let args: Vec<&str> = args.split_whitespace().collect();
    assert_eq!(args[0], "INSIDEOUT");
    assert!(args[1].ends_with("input.in"));
    assert!(args[2].ends_with("output.out"));
    assert_eq!(args[3], "7");
}

#[test]
fn msg_mode_through_launcher() {
    let dir = tempfile::tempdir().unwrap();
    let report = dir.path().join("canned.out");
    fs::write(&report, "Maximal Structure:\nMaterials(0):\nEnd.\n").unwrap();
    let solver = script(dir.path(), &format!("cp '{}' \"$3\"", report.display()));

    let options = RunOptions {
        mode: SolverMode::Msg,
        ..Default::default()
    };
    let output = run(&solver, &plant(), &[], &options).unwrap();
    assert_eq!(output.solutions.len(), 1);
    assert_eq!(output.solutions.costs(), vec![Some(0.0)]);
}

#[test]
fn solver_writing_nothing_fails() {
    let dir = tempfile::tempdir().unwrap();
    let solver = script(dir.path(), "exit 0");
    let err = run(&solver, &plant(), &[], &RunOptions::default()).unwrap_err();
    assert!(matches!(err, SolverError::InvocationFailed { .. }));
    assert!(err.to_string().contains("no report"));
}

#[test]
fn failing_solver_reports_stderr() {
    let dir = tempfile::tempdir().unwrap();
    let solver = script(dir.path(), "echo 'license expired' >&2\nexit 3");
    let err = run(&solver, &plant(), &[], &RunOptions::default()).unwrap_err();
    assert!(matches!(err, SolverError::InvocationFailed { .. }));
    assert!(err.to_string().contains("license expired"));
}

#[test]
fn garbled_report_is_a_parse_error_not_an_invocation_failure() {
    let dir = tempfile::tempdir().unwrap();
    let solver = script(
        dir.path(),
        "printf 'Feasible structure #1:\\nTotal annual cost= x USD/y\\nEnd.\\n' > \"$3\"",
    );
    let err = run(&solver, &plant(), &[], &RunOptions::default()).unwrap_err();
    assert!(matches!(
        err,
        SolverError::Codec(pgraph_codec::CodecError::Parse(_))
    ));
}

#[test]
fn run_files_kept_under_work_root() {
    let dir = tempfile::tempdir().unwrap();
    let report = dir.path().join("canned.out");
    fs::write(&report, REPORT).unwrap();
    let solver = script(dir.path(), &format!("cp '{}' \"$3\"", report.display()));
    let root = dir.path().join("runs");

    let options = RunOptions {
        work_root: Some(root),
        ..Default::default()
    };
    let first = run(&solver, &plant(), &[], &options).unwrap();
    let second = run(&solver, &plant(), &[], &options).unwrap();

    let a = first.report.run_dir.unwrap();
    let b = second.report.run_dir.unwrap();
    assert_ne!(a, b);
    assert_eq!(
        fs::read_to_string(a.join("input.in")).unwrap(),
        fs::read_to_string(b.join("input.in")).unwrap()
    );
    assert_eq!(first.report.input_digest, second.report.input_digest);
}
