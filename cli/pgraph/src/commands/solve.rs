//! `pgraph solve`: run the configured solver on the project network.

use std::path::Path;

use anyhow::{bail, Context, Result};

use pgraph_codec::SolverMode;
use pgraph_solver::{run as run_solver, RunOptions};

use super::show::{self, OutputFormat};
use crate::manifest::{PgraphManifest, MANIFEST_FILE};
use crate::network_file;

/// Run the solver described by the manifest on the network at
/// `network_path`.
pub fn run(
    project_dir: &Path,
    manifest: &PgraphManifest,
    network_path: &Path,
    mode: SolverMode,
    max_solutions: Option<u32>,
    format: OutputFormat,
) -> Result<()> {
    let Some(solver) = manifest.process_solver(project_dir) else {
        bail!("no solver executable configured (set [solver] executable in {MANIFEST_FILE})");
    };

    let (network, exclusions) = network_file::load_network(network_path)?;
    let options = RunOptions {
        mode,
        max_solutions: max_solutions.unwrap_or_else(|| manifest.max_solutions()),
        work_root: manifest.work_root(project_dir),
        ..Default::default()
    };

    let output = run_solver(&solver, &network, &exclusions, &options)
        .with_context(|| format!("solving {}", network_path.display()))?;

    match format {
        OutputFormat::Text => {
            print!("{}", output.report);
            println!();
        }
        OutputFormat::Json => log::info!("{}", output.report.to_string().trim_end()),
    }
    show::print(&output.solutions, Some(&network), format)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::network_file::NetworkFile;

    #[test]
    fn requires_a_solver_executable() {
        let dir = tempfile::tempdir().unwrap();
        let network = dir.path().join("network.toml");
        std::fs::write(&network, NetworkFile::template()).unwrap();
        let manifest = PgraphManifest::from_str("[project]\nname = \"x\"\n").unwrap();

        let err = run(
            dir.path(),
            &manifest,
            &network,
            SolverMode::Abb,
            None,
            OutputFormat::Text,
        )
        .unwrap_err();
        assert!(err.to_string().contains("no solver executable configured"));
    }

    #[cfg(unix)]
    #[test]
    fn runs_a_stand_in_solver() {
        let dir = tempfile::tempdir().unwrap();
        let network = dir.path().join("network.toml");
        std::fs::write(&network, NetworkFile::template()).unwrap();
        std::fs::write(
            dir.path().join("solver.sh"),
            "printf 'Maximal Structure:\\nMaterials(3):\\nM1, M2, M3\\nOperating units(2):\\nO1, O2\\nEnd.\\n' > \"$3\"\n",
        )
        .unwrap();
        let manifest = PgraphManifest::from_str(
            "[project]\nname = \"x\"\n[solver]\nexecutable = \"solver.sh\"\nlauncher = [\"sh\"]\nwork_dir = \"runs\"\n",
        )
        .unwrap();

        run(
            dir.path(),
            &manifest,
            &network,
            SolverMode::Msg,
            Some(5),
            OutputFormat::Text,
        )
        .unwrap();
        let runs: Vec<_> = std::fs::read_dir(dir.path().join("runs")).unwrap().collect();
        assert_eq!(runs.len(), 1);
    }
}
