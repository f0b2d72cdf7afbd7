//! report-sync - incremental advertising report extractor
//!
//! Writes one JSON line per record to stdout; logs go to stderr.

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use log::{error, info};
use reports::catalog;
use reports::{
    FileBookmarkStore, ReportClient, SharedClock, StreamDescriptor, SystemClock, TapConfig,
    sync_stream,
};
use serde_json::json;
use std::io::{BufWriter, Write};
use std::path::PathBuf;
use std::sync::Arc;

/// Default state filename in the report-sync config directory
const STATE_FILE: &str = "state.json";

#[derive(Parser, Debug)]
#[command(name = "report-sync", about = "Incrementally extract advertising reports as JSON lines.")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// List the available streams.
    Streams,
    /// Sync streams and write their records to stdout.
    Sync {
        /// Tap configuration file (defaults to the config directory, then environment).
        #[arg(long, env = "REPORT_SYNC_CONFIG", value_hint = clap::ValueHint::FilePath)]
        config: Option<PathBuf>,

        /// Bookmark state file (defaults to state.json in the config directory).
        #[arg(long, env = "REPORT_SYNC_STATE", value_hint = clap::ValueHint::FilePath)]
        state: Option<PathBuf>,

        /// Stream to sync; repeat for several. All streams when omitted.
        #[arg(long = "stream", value_name = "NAME")]
        streams: Vec<String>,
    },
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .init();

    if let Err(e) = config::init() {
        error!("Failed to initialize config directory: {}", e);
    }

    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Streams => list_streams(),
        Commands::Sync {
            config,
            state,
            streams,
        } => run_sync(config, state, &streams),
    };

    if let Err(e) = result {
        error!("{:#}", e);
        std::process::exit(1);
    }
}

fn list_streams() -> Result<()> {
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    for stream in catalog::all_streams() {
        let replication = stream.replication_key.as_deref().unwrap_or("-");
        writeln!(out, "{:<48} {:<18} {}", stream.name, stream.kind_label(), replication)?;
    }
    Ok(())
}

fn select_streams(names: &[String]) -> Result<Vec<StreamDescriptor>> {
    if names.is_empty() {
        return Ok(catalog::all_streams());
    }

    names
        .iter()
        .map(|name| {
            catalog::find(name).with_context(|| {
                format!("Unknown stream {:?}; run `report-sync streams` for the list", name)
            })
        })
        .collect()
}

fn state_path(state: Option<PathBuf>) -> Result<PathBuf> {
    match state {
        Some(path) => Ok(path),
        None => {
            config::ensure_config_dir()?;
            config::config_path(STATE_FILE).context("Could not determine config directory for state file")
        }
    }
}

fn run_sync(config_path: Option<PathBuf>, state: Option<PathBuf>, names: &[String]) -> Result<()> {
    let config = TapConfig::load(config_path.as_deref())?;
    let streams = select_streams(names)?;
    if streams.is_empty() {
        bail!("No streams selected");
    }

    let state_path = state_path(state)?;
    let store = FileBookmarkStore::open(&state_path)
        .with_context(|| format!("Failed to open state file {}", state_path.display()))?;
    info!("Using state file {}", store.path().display());

    let client = ReportClient::new(&config);
    let clock: SharedClock = Arc::new(SystemClock::new(config.report_offset()?));

    let stdout = std::io::stdout();
    let mut out = BufWriter::new(stdout.lock());

    for descriptor in &streams {
        let stats = sync_stream(&client, &store, descriptor, &config, clock.clone(), |row| {
            let message = json!({
                "type": "RECORD",
                "stream": descriptor.name,
                "record": row,
            });
            serde_json::to_writer(&mut out, &message)?;
            out.write_all(b"\n")?;
            Ok(())
        })?;
        out.flush()?;

        info!(
            "{}: {} record(s), {} request(s), {} window(s){}",
            descriptor.name,
            stats.records,
            stats.requests,
            stats.windows,
            stats
                .bookmark
                .as_deref()
                .map(|b| format!(", bookmark {}", b))
                .unwrap_or_default()
        );
    }

    Ok(())
}
