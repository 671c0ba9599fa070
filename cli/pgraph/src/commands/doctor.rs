//! `pgraph doctor`: environment and project diagnostics.

use std::path::Path;
use std::process::Command;

use anyhow::Result;

use pgraph_codec::SolverMode;

use crate::manifest::{PgraphManifest, MANIFEST_FILE};

/// Print diagnostic information for the project around `project_dir`.
pub fn run(project_dir: &Path) -> Result<()> {
    println!("=== pgraph Doctor ===");
    println!();

    println!("pgraph version: {}", env!("CARGO_PKG_VERSION"));
    println!();

    println!("--- Solver Modes ---");
    for mode in SolverMode::ALL {
        println!("  {}: {}", mode.code(), mode.solver_name());
    }
    println!();

    println!("--- Project Status ---");
    match PgraphManifest::find_and_load(project_dir) {
        Ok(Some((manifest, dir))) => {
            println!("  {MANIFEST_FILE}: found at {}", dir.display());
            println!("  Project:   {}", manifest.project.name);
            match manifest.mode() {
                Ok(mode) => println!("  Mode:      {mode}"),
                Err(e) => println!("  Mode:      error: {e:#}"),
            }
            let network = manifest.network_path(&dir);
            println!(
                "  Network:   {} ({})",
                network.display(),
                if network.is_file() { "found" } else { "missing" }
            );

            println!();
            println!("--- Solver ---");
            match manifest.process_solver(&dir) {
                Some(solver) => {
                    let executable = solver.executable();
                    println!(
                        "  Executable: {} ({})",
                        executable.display(),
                        if executable.is_file() {
                            "found"
                        } else {
                            "not a file here, looked up on PATH at run time"
                        }
                    );
                    if let Some(launcher) = solver.launcher().first() {
                        print_tool_status(launcher, &["--version"]);
                    }
                }
                None => println!("  Executable: not configured"),
            }
        }
        Ok(None) => {
            println!("  {MANIFEST_FILE}: not found");
        }
        Err(e) => {
            println!("  {MANIFEST_FILE}: error: {e:#}");
        }
    }

    Ok(())
}

fn print_tool_status(name: &str, args: &[&str]) {
    match Command::new(name).args(args).output() {
        Ok(output) => {
            let version = String::from_utf8_lossy(&output.stdout);
            let first_line = version.lines().next().unwrap_or("(unknown version)");
            println!("  {name}: {first_line}");
        }
        Err(_) => {
            println!("  {name}: not found");
        }
    }
}
