//! `pgraph init`: project scaffolding.

use std::fs;
use std::path::Path;

use anyhow::{bail, Context, Result};

use crate::manifest::{PgraphManifest, MANIFEST_FILE};
use crate::network_file::{NetworkFile, DEFAULT_NETWORK_FILE};

/// Create a new project in directory `name`, relative to the current
/// directory.
pub fn run(name: &str) -> Result<()> {
    let project_dir = Path::new(name);
    create_project(project_dir, name)
}

pub(crate) fn create_project(project_dir: &Path, name: &str) -> Result<()> {
    if project_dir.exists() {
        bail!("directory '{}' already exists", project_dir.display());
    }

    fs::create_dir_all(project_dir)
        .with_context(|| format!("creating {}", project_dir.display()))?;

    fs::write(
        project_dir.join(MANIFEST_FILE),
        PgraphManifest::template(name),
    )
    .with_context(|| format!("writing {MANIFEST_FILE}"))?;

    fs::write(
        project_dir.join(DEFAULT_NETWORK_FILE),
        NetworkFile::template(),
    )
    .with_context(|| format!("writing {DEFAULT_NETWORK_FILE}"))?;

    // Kept solver runs
    fs::write(project_dir.join(".gitignore"), "runs/\n").context("writing .gitignore")?;

    println!("Created project '{name}'");
    println!("  {name}/{MANIFEST_FILE}");
    println!("  {name}/{DEFAULT_NETWORK_FILE}");
    println!("  {name}/.gitignore");

    Ok(())
}
