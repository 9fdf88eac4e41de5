use std::{
    io::{self, Write},
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use cellinfo::{CellRecord, Dispatcher};
use clap::{Parser, Subcommand};
use log::{info, warn, LevelFilter};

mod config;
mod input;

use config::Config;

/// Normalize dumps of raw cell information into uniform cell records
#[derive(Debug, Parser)]
#[command(version)]
struct Cli {
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Ignore WCDMA decoding support, as on older platforms
    #[arg(long)]
    legacy: bool,

    /// Verbosity level (can be repeated: -v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[clap(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Print one JSON object per cell
    Json { files: Vec<PathBuf> },
    /// Print a text summary per cell
    Text { files: Vec<PathBuf> },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = match cli.config.as_deref() {
        Some(path) => config::load(path)?,
        None if Path::new("config.toml").exists() => config::load(Path::new("config.toml"))?,
        None => Config::default(),
    };

    let dispatcher = if cli.legacy {
        Dispatcher::Legacy
    } else {
        Dispatcher::new(config.wcdma_decoding)
    };
    info!("using {dispatcher:?} dispatcher");

    let (files, json) = match cli.command {
        Command::Json { files } => (files, true),
        Command::Text { files } => (files, false),
    };

    let loaded = if files.is_empty() {
        input::read_json_lines(io::stdin().lock(), "stdin")?
    } else {
        let mut loaded = input::Loaded::default();
        for file in &files {
            loaded.extend(input::load(file)?);
        }
        loaded
    };

    let mut out = io::stdout().lock();
    for (i, raw) in loaded.cells.iter().enumerate() {
        let record = dispatcher.build(raw);
        if json {
            write_json(&mut out, &record, config.pretty)?;
        } else {
            if i != 0 {
                writeln!(out)?;
            }
            write!(out, "{record}")?;
        }
    }
    out.flush()?;

    info!("{} cells processed", loaded.cells.len());
    if loaded.skipped != 0 {
        warn!("{} entries could not be parsed", loaded.skipped);
    }

    Ok(())
}

fn write_json(out: &mut impl Write, record: &CellRecord, pretty: bool) -> Result<()> {
    // the bag serializes its fields in the order they were recorded
    let bag = record.bag();
    let line = if pretty {
        serde_json::to_string_pretty(bag)
    } else {
        serde_json::to_string(bag)
    }
    .context("Failed to serialize cell")?;
    writeln!(out, "{line}")?;
    Ok(())
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => LevelFilter::Info,
        1 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };

    // RUST_LOG still takes precedence
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();
}
