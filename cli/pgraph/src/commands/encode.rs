//! `pgraph encode`: write the solver input file for a network.

use std::fs;
use std::io;
use std::path::Path;

use anyhow::{Context, Result};

use pgraph_codec::{encode, EncodeOptions};

use crate::network_file;

/// Encode the network at `network_path`. Writes to `output` when given,
/// otherwise to stdout.
pub fn run(network_path: &Path, output: Option<&Path>, file_name: Option<&str>) -> Result<()> {
    let (network, exclusions) = network_file::load_network(network_path)?;

    let mut options = EncodeOptions::default();
    if let Some(name) = file_name {
        options.file_name = name.to_string();
    }

    let document = encode(&network, &exclusions, &options)
        .with_context(|| format!("encoding {}", network_path.display()))?;
    log::debug!(
        "encoded {} nodes and {} edges",
        network.node_count(),
        network.edge_count()
    );

    match output {
        Some(path) => {
            let file =
                fs::File::create(path).with_context(|| format!("creating {}", path.display()))?;
            document
                .write_to(io::BufWriter::new(file))
                .with_context(|| format!("writing {}", path.display()))?;
            println!("Wrote {}", path.display());
            println!("  SHA-256: {}", document.digest());
        }
        None => document
            .write_to(io::stdout().lock())
            .context("writing to stdout")?,
    }

    Ok(())
}
