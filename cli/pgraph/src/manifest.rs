//! `pgraph.toml` manifest parsing and project configuration.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use pgraph_codec::SolverMode;
use pgraph_solver::{ProcessSolver, DEFAULT_MAX_SOLUTIONS};

/// Manifest file name, searched for from the current directory upward.
pub const MANIFEST_FILE: &str = "pgraph.toml";

/// The top-level manifest structure for a pgraph project.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PgraphManifest {
    /// Project metadata (required).
    pub project: ProjectConfig,
    /// How to run the solver.
    #[serde(default)]
    pub solver: SolverConfig,
    /// Where the network description lives.
    #[serde(default)]
    pub network: NetworkConfig,
}

/// Project metadata section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectConfig {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
}

/// Solver section.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SolverConfig {
    /// Solver executable. Relative paths are resolved against the project
    /// directory when a file exists there, otherwise looked up on `PATH`.
    #[serde(default)]
    pub executable: Option<String>,
    /// Program and arguments placed before the executable, e.g. `["wine"]`.
    #[serde(default)]
    pub launcher: Vec<String>,
    /// Mode name (`MSG`, `SSG`, `SSGLP`, `INSIDEOUT`/`ABB`) or code (0-3).
    #[serde(default)]
    pub mode: Option<String>,
    #[serde(default)]
    pub max_solutions: Option<u32>,
    /// Keep run files under this directory instead of a temporary one.
    #[serde(default)]
    pub work_dir: Option<String>,
}

/// Network section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NetworkConfig {
    #[serde(default = "default_network_path")]
    pub path: String,
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            path: default_network_path(),
        }
    }
}

fn default_network_path() -> String {
    crate::network_file::DEFAULT_NETWORK_FILE.to_string()
}

impl PgraphManifest {
    /// Search upward from `start_dir` for a `pgraph.toml` file, parse and
    /// return it along with the directory it was found in.
    pub fn find_and_load(start_dir: &Path) -> Result<Option<(Self, PathBuf)>> {
        let mut dir = start_dir.to_path_buf();
        loop {
            let candidate = dir.join(MANIFEST_FILE);
            if candidate.is_file() {
                let content = std::fs::read_to_string(&candidate)
                    .with_context(|| format!("reading {}", candidate.display()))?;
                let manifest: PgraphManifest = toml::from_str(&content)
                    .with_context(|| format!("parsing {}", candidate.display()))?;
                log::debug!("loaded manifest {}", candidate.display());
                return Ok(Some((manifest, dir)));
            }
            if !dir.pop() {
                break;
            }
        }
        Ok(None)
    }

    /// Parse a manifest from a TOML string.
    #[cfg(test)]
    pub fn from_str(s: &str) -> Result<Self> {
        toml::from_str(s).context("parsing pgraph.toml")
    }

    /// Solver mode, defaulting to INSIDEOUT.
    pub fn mode(&self) -> Result<SolverMode> {
        match &self.solver.mode {
            Some(mode) => mode
                .parse()
                .with_context(|| format!("[solver] mode in {MANIFEST_FILE}")),
            None => Ok(SolverMode::default()),
        }
    }

    pub fn max_solutions(&self) -> u32 {
        self.solver.max_solutions.unwrap_or(DEFAULT_MAX_SOLUTIONS)
    }

    /// Path of the network description.
    pub fn network_path(&self, project_dir: &Path) -> PathBuf {
        project_dir.join(&self.network.path)
    }

    /// Root for kept run directories, if configured.
    pub fn work_root(&self, project_dir: &Path) -> Option<PathBuf> {
        self.solver
            .work_dir
            .as_ref()
            .map(|dir| project_dir.join(dir))
    }

    /// The configured solver process, if an executable is set.
    pub fn process_solver(&self, project_dir: &Path) -> Option<ProcessSolver> {
        let executable = self.solver.executable.as_ref()?;
        let local = project_dir.join(executable);
        let path = if local.is_file() {
            local
        } else {
            PathBuf::from(executable)
        };
        Some(ProcessSolver::new(path).with_launcher(self.solver.launcher.clone()))
    }

    /// Generate the default template for `pgraph init`.
    pub fn template(name: &str) -> String {
        format!(
            r#"[project]
name = "{name}"

[solver]
# executable = "pgraph_solver.exe"
# launcher = ["wine"]
mode = "INSIDEOUT"
max_solutions = 100
work_dir = "runs"

[network]
path = "network.toml"
"#
        )
    }
}
