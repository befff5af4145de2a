use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use tracing::{error, info};

use patkit::{init_logging, InMemoryHost, PatternDefinition, PatternHost, BUILD_DATE, VERSION};

fn usage() -> ExitCode {
    eprintln!("patkit {VERSION} (built {BUILD_DATE})");
    eprintln!();
    eprintln!("Usage: patkit <definition.json> [output-dir]");
    eprintln!();
    eprintln!("Reads a JSON pattern definition, derives the tiling grids and");
    eprintln!("writes <name>.pat into output-dir (default: current directory).");
    ExitCode::FAILURE
}

fn run(input: &str, out_dir: &str) -> anyhow::Result<()> {
    let text = std::fs::read_to_string(input)
        .with_context(|| format!("reading pattern definition {input}"))?;
    let definition: PatternDefinition =
        serde_json::from_str(&text).with_context(|| format!("parsing {input}"))?;

    info!(name = %definition.name, target = %definition.target, "building pattern");
    let pattern = definition.build()?;
    if pattern.grid_count() == 0 {
        anyhow::bail!("no grids could be derived from {input}");
    }

    let mut host = InMemoryHost::new();
    match pattern.create_in_host(&mut host) {
        Ok(handle) => {
            if definition.create_filled_region {
                host.create_filled_region(handle)?;
            }
        }
        // a host failure must not block the text export
        Err(err) => error!(%err, "host materialization failed"),
    }

    let path = pattern
        .write_pat_file(&PathBuf::from(out_dir))
        .with_context(|| format!("writing pattern file to {out_dir}"))?;
    info!(path = %path.display(), grids = pattern.grid_count(), "pattern exported");
    Ok(())
}

fn main() -> ExitCode {
    if init_logging().is_err() {
        eprintln!("warning: failed to initialize logging");
    }

    let args: Vec<String> = std::env::args().collect();
    let (input, out_dir) = match args.len() {
        2 => (args[1].as_str(), "."),
        3 => (args[1].as_str(), args[2].as_str()),
        _ => return usage(),
    };

    match run(input, out_dir) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!(%err, "pattern export failed");
            ExitCode::FAILURE
        }
    }
}
