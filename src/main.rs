use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use packviz::host::{load_context, AdapterRegistry};
use packviz::{Config, Record, ViewRenderer};
use serde::Serialize;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "packviz")]
#[command(about = "Render hierarchy, roster and reference-graph views of a record snapshot")]
struct Args {
    /// Snapshot file or directory (overrides packviz.data_path)
    #[arg(short, long, global = true)]
    data: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Nested outline under the root record
    Tree,
    /// Leaders and members of a group record
    Roster {
        /// Record key of the group to show
        #[arg(short, long)]
        record: Option<String>,
    },
    /// Raw outgoing link tokens of a record
    Links {
        #[arg(short, long)]
        record: Option<String>,
    },
    /// Radial layout of a record's resolved outgoing links
    Graph {
        #[arg(short, long)]
        record: Option<String>,
    },
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Logs go to stderr; stdout carries the JSON view. Without RUST_LOG the
    // level comes from packviz.log_level once the config is loaded.
    let level_from_config = std::env::var_os("RUST_LOG").is_none();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("trace")).init();
    if level_from_config {
        log::set_max_level(log::LevelFilter::Info);
    }

    let config = Config::load_or_default()?;
    if level_from_config {
        log::set_max_level(config.log_level()?);
    }

    let data_path = args
        .data
        .clone()
        .unwrap_or_else(|| config.data_path().to_path_buf());
    let ctx = load_context(&data_path)
        .with_context(|| format!("Failed to load snapshot: {}", data_path.display()))?;

    let renderer = ViewRenderer::from_context(&ctx, &AdapterRegistry::new(), &config)?;
    log::info!("Snapshot has {} records", renderer.records().len());

    match &args.command {
        Command::Tree => print_json(&renderer.pack_tree()?),
        Command::Roster { record } => {
            let current = focal(&renderer, record.as_deref());
            print_json(&renderer.den_roster(current)?)
        }
        Command::Links { record } => {
            let current = focal(&renderer, record.as_deref());
            print_json(&renderer.outgoing_list(current))
        }
        Command::Graph { record } => {
            let current = focal(&renderer, record.as_deref());
            print_json(&renderer.outgoing_graph(current)?)
        }
    }
}

/// Look up the requested record; an unknown key falls back to the view default.
fn focal<'a>(renderer: &'a ViewRenderer, key: Option<&str>) -> Option<&'a Record> {
    let key = key?;
    let record = renderer.find(key);
    if record.is_none() {
        log::warn!("Record {} not found in snapshot", key);
    }
    record
}

fn print_json<T: Serialize>(view: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(view)?);
    Ok(())
}
