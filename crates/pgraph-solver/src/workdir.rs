//! Per-run working directories.
//!
//! Every run gets a directory of its own, so concurrent runs never share
//! input or report files. A temporary directory is removed when the
//! [`WorkDir`] is dropped; a directory under a caller-supplied root is kept.

use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;
use uuid::Uuid;

use crate::error::{Result, SolverError};

/// File name of the encoded problem inside a run directory.
pub const INPUT_FILE: &str = "input.in";
/// File name of the solver report inside a run directory.
pub const OUTPUT_FILE: &str = "output.out";

#[derive(Debug)]
pub enum WorkDir {
    Temporary(TempDir),
    Persistent(PathBuf),
}

impl WorkDir {
    /// A fresh temporary directory.
    pub fn temporary() -> Result<Self> {
        tempfile::Builder::new()
            .prefix("pgraph-run-")
            .tempdir()
            .map(WorkDir::Temporary)
            .map_err(|e| SolverError::io(std::env::temp_dir(), e))
    }

    /// A new uuid-named directory under `root`, created if needed.
    pub fn under(root: &Path) -> Result<Self> {
        let dir = root.join(Uuid::new_v4().to_string());
        fs::create_dir_all(&dir).map_err(|e| SolverError::io(&dir, e))?;
        Ok(WorkDir::Persistent(dir))
    }

    /// [`under`](Self::under) when a root is given, otherwise
    /// [`temporary`](Self::temporary).
    pub fn create(root: Option<&Path>) -> Result<Self> {
        match root {
            Some(root) => Self::under(root),
            None => Self::temporary(),
        }
    }

    pub fn path(&self) -> &Path {
        match self {
            WorkDir::Temporary(dir) => dir.path(),
            WorkDir::Persistent(dir) => dir,
        }
    }

    pub fn input_path(&self) -> PathBuf {
        self.path().join(INPUT_FILE)
    }

    pub fn output_path(&self) -> PathBuf {
        self.path().join(OUTPUT_FILE)
    }

    /// Whether the directory outlives this value.
    pub fn is_persistent(&self) -> bool {
        matches!(self, WorkDir::Persistent(_))
    }
}
