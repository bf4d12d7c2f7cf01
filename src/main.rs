//! Netweave - layer catalog and network graph tool
//!
//! `schema` prints the palette listing; `replay` runs a script of facade
//! requests against a fresh graph store.

use std::fs;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::{Parser, Subcommand};
use log::info;

use netweave::api::{self, Request};
use netweave::layers::builtin;
use netweave::{Config, GraphStore};

#[derive(Parser)]
#[command(name = "netweave")]
#[command(about = "Neural network layer catalog and graph builder", long_about = None)]
struct Cli {
    /// Config file; defaults to the platform config directory
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    cmd: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the parameter schema of every layer kind.
    Schema {
        #[arg(long)]
        pretty: bool,
    },
    /// Run a JSON array of requests and print one response per line.
    Replay { script: PathBuf },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = Config::load(cli.config.as_deref())?;

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(config.log_level.as_str())).init();

    let registry = Arc::new(builtin::registry().context("built-in layer catalog is invalid")?);
    info!("Registered {} layer kinds", registry.len());

    match cli.cmd {
        Commands::Schema { pretty } => {
            let listing = registry.schema_listing()?;
            let json = if pretty {
                serde_json::to_string_pretty(&listing)?
            } else {
                serde_json::to_string(&listing)?
            };
            println!("{}", json);
        }
        Commands::Replay { script } => {
            let text = fs::read_to_string(&script).with_context(|| format!("reading {}", script.display()))?;
            let requests: Vec<Request> =
                serde_json::from_str(&text).with_context(|| format!("parsing {}", script.display()))?;

            let store = GraphStore::with_policy(registry, config.connections);
            for request in requests {
                let response = api::handle(&store, request);
                println!("{}", serde_json::to_string(&response)?);
            }
        }
    }

    Ok(())
}
