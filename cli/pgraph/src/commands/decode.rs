//! `pgraph decode`: read a solver report written by an earlier run.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

use pgraph_codec::{decode, SolutionSet, SolverMode};

use super::show::{self, OutputFormat};
use crate::network_file;

/// Decode the report at `report_path`. With a network, structures are shown
/// against it.
pub fn run(
    report_path: &Path,
    mode: SolverMode,
    network_path: Option<&Path>,
    format: OutputFormat,
) -> Result<()> {
    let set = load_report(report_path, mode)?;
    let network = match network_path {
        Some(path) => Some(network_file::load_network(path)?.0),
        None => None,
    };
    show::print(&set, network.as_ref(), format)
}

pub(crate) fn load_report(path: &Path, mode: SolverMode) -> Result<SolutionSet> {
    let report =
        fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    decode(mode, &report).with_context(|| format!("decoding {} as {mode} report", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decode_ssglp_report() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("run.out");
        fs::write(
            &path,
            "Feasible structure #1:\nMaterials:\nM1: 5 EUR/y (1 t/y)\nOperating units:\n2*O1 (7 EUR/y): 1 M2 => 1 M1\nTotal annual cost= 12 EUR/y\nEnd.\n",
        )
        .unwrap();

        let set = load_report(&path, SolverMode::SsgLp).unwrap();
        assert_eq!(set.costs(), vec![Some(12.0)]);
        run(&path, SolverMode::SsgLp, None, OutputFormat::Json).unwrap();
    }

    #[test]
    fn parse_errors_name_the_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.out");
        fs::write(&path, "Feasible structure #1:\nTotal annual cost= lots\nEnd.\n").unwrap();

        let err = load_report(&path, SolverMode::Abb).unwrap_err();
        let msg = format!("{err:#}");
        assert!(msg.contains("bad.out"));
        assert!(msg.contains("INSIDEOUT report"));
    }

    #[test]
    fn missing_report() {
        let err = load_report(Path::new("/nonexistent/x.out"), SolverMode::Msg).unwrap_err();
        assert!(format!("{err:#}").contains("reading /nonexistent/x.out"));
    }
}
