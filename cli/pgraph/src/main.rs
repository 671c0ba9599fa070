//! pgraph CLI: encode process networks, run the P-graph solver and read its
//! reports.

mod commands;
mod manifest;
mod network_file;

use std::path::{Path, PathBuf};
use std::process;

use clap::{Parser, Subcommand};

use commands::show::OutputFormat;
use manifest::PgraphManifest;
use pgraph_codec::SolverMode;

/// Crates whose log output `--verbose` controls.
const LOG_CRATES: [&str; 4] = ["pgraph", "pgraph_core", "pgraph_codec", "pgraph_solver"];

#[derive(Parser)]
#[command(name = "pgraph", version, about = "Process-network synthesis with the P-graph solver")]
struct Cli {
    /// Increase log output (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a new pgraph project
    Init {
        /// Project name
        name: String,
    },
    /// Write the solver input file for a network
    Encode {
        /// Network file (default: from pgraph.toml, else network.toml)
        #[arg(long)]
        network: Option<String>,
        /// Output path (default: stdout)
        #[arg(long, short)]
        output: Option<PathBuf>,
        /// Value of the file_name header line
        #[arg(long)]
        file_name: Option<String>,
    },
    /// Decode a solver report
    Decode {
        /// Report file written by the solver
        report: PathBuf,
        /// Mode the report was produced in (MSG, SSG, SSGLP, INSIDEOUT or 0-3)
        #[arg(long)]
        mode: Option<String>,
        /// Network to show structures against
        #[arg(long)]
        network: Option<String>,
        /// Output format (text, json)
        #[arg(long)]
        format: Option<String>,
    },
    /// Run the configured solver on the project network
    Solve {
        /// Network file (default: from pgraph.toml)
        #[arg(long)]
        network: Option<String>,
        /// Solver mode (MSG, SSG, SSGLP, INSIDEOUT or 0-3)
        #[arg(long)]
        mode: Option<String>,
        /// Maximum number of structures to report
        #[arg(long)]
        max_solutions: Option<u32>,
        /// Output format (text, json)
        #[arg(long)]
        format: Option<String>,
    },
    /// Check solver setup and project status
    Doctor,
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = run(cli);
    if let Err(e) = result {
        eprintln!("error: {e:#}");
        process::exit(1);
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let cwd = std::env::current_dir()?;

    match cli.command {
        Commands::Init { name } => commands::init::run(&name),

        Commands::Encode {
            network,
            output,
            file_name,
        } => {
            let (manifest, project_dir) = load_manifest_optional(&cwd)?;
            let project_dir = project_dir.unwrap_or(cwd);
            let network = network_file::locate(&project_dir, manifest.as_ref(), network.as_deref());
            commands::encode::run(&network, output.as_deref(), file_name.as_deref())
        }

        Commands::Decode {
            report,
            mode,
            network,
            format,
        } => {
            let (manifest, project_dir) = load_manifest_optional(&cwd)?;
            let project_dir = project_dir.unwrap_or(cwd);
            let mode = resolve_mode(mode.as_deref(), manifest.as_ref())?;
            let format = OutputFormat::parse(format.as_deref())?;
            // Without --network, use the project network only when it exists.
            let network = match network {
                Some(path) => Some(PathBuf::from(path)),
                None => manifest
                    .as_ref()
                    .map(|m| m.network_path(&project_dir))
                    .filter(|path| path.is_file()),
            };
            commands::decode::run(&report, mode, network.as_deref(), format)
        }

        Commands::Solve {
            network,
            mode,
            max_solutions,
            format,
        } => {
            let (manifest, project_dir) = load_manifest_required(&cwd)?;
            let mode = resolve_mode(mode.as_deref(), Some(&manifest))?;
            let format = OutputFormat::parse(format.as_deref())?;
            let network = network_file::locate(&project_dir, Some(&manifest), network.as_deref());
            commands::solve::run(
                &project_dir,
                &manifest,
                &network,
                mode,
                max_solutions,
                format,
            )
        }

        Commands::Doctor => {
            let (_, project_dir) = load_manifest_optional(&cwd)?;
            let project_dir = project_dir.unwrap_or(cwd);
            commands::doctor::run(&project_dir)
        }
    }
}

/// Mode from the command line, else the manifest, else INSIDEOUT.
fn resolve_mode(arg: Option<&str>, manifest: Option<&PgraphManifest>) -> anyhow::Result<SolverMode> {
    match (arg, manifest) {
        (Some(mode), _) => Ok(mode.parse()?),
        (None, Some(manifest)) => manifest.mode(),
        (None, None) => Ok(SolverMode::default()),
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => log::LevelFilter::Warn,
        1 => log::LevelFilter::Info,
        2 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    };
    let filter = LOG_CRATES
        .iter()
        .map(|name| format!("{name}={}", level.as_str().to_lowercase()))
        .collect::<Vec<_>>()
        .join(",");

    // RUST_LOG wins when set
    if std::env::var("RUST_LOG").is_err() {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(filter))
            .init();
    } else {
        env_logger::init();
    }
}

/// Load manifest, returning error if not found.
fn load_manifest_required(cwd: &Path) -> anyhow::Result<(PgraphManifest, PathBuf)> {
    match PgraphManifest::find_and_load(cwd)? {
        Some((manifest, dir)) => Ok((manifest, dir)),
        None => anyhow::bail!("no pgraph.toml found (run `pgraph init` first)"),
    }
}

/// Try to load a manifest from the current directory upward. Returns (None, None) if not found.
fn load_manifest_optional(cwd: &Path) -> anyhow::Result<(Option<PgraphManifest>, Option<PathBuf>)> {
    match PgraphManifest::find_and_load(cwd)? {
        Some((manifest, dir)) => Ok((Some(manifest), Some(dir))),
        None => Ok((None, None)),
    }
}
