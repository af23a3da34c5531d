use std::{
    io::{self, Read, Write},
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::info;

use playdeck_core::{
    format::resolve_locale, AppConfig, Batch, BatchAssembler, DateStyle, HttpSource, RawBatch,
    SnapshotStore, TitleNormalizer,
};

/// Normalize play-history batches for the game library dashboard.
#[derive(Debug, Parser)]
#[command(name = "playdeck", version, about)]
pub(crate) struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Locale for month names and timestamps, e.g. en_GB (overrides config).
    #[arg(long, global = true)]
    pub locale: Option<String>,

    /// Show played dates in the locale's short form instead of "1st Nov 2023".
    #[arg(long, global = true)]
    pub legacy_dates: bool,

    /// Pretty-print the JSON output.
    #[arg(long, global = true)]
    pub pretty: bool,
}

#[derive(Debug, Subcommand)]
pub(crate) enum Command {
    /// Normalize the newest snapshot in the output directory.
    Latest {
        /// Snapshot directory (defaults to the configured output_dir).
        #[arg(long)]
        dir: Option<PathBuf>,
    },
    /// Fetch the latest batch from the dashboard API and normalize it.
    Fetch {
        /// API origin (defaults to the first configured allowed origin).
        #[arg(long)]
        origin: Option<String>,
        /// Also store the fetched payload as a new snapshot.
        #[arg(long)]
        save: bool,
    },
    /// Normalize a raw batch file; "-" reads from stdin.
    Normalize {
        /// Path to a raw batch JSON file.
        path: PathBuf,
    },
}

pub(crate) async fn run(cli: Cli, config: &AppConfig) -> Result<()> {
    let assembler = assembler_for(&cli, config);
    let raw = load_raw(&cli.command, config).await?;
    let batch = assembler
        .assemble(&raw)
        .context("failed to normalize batch")?;

    let stdout = io::stdout();
    write_batch(&mut stdout.lock(), &batch, cli.pretty)
}

fn assembler_for(cli: &Cli, config: &AppConfig) -> BatchAssembler {
    let locale = cli
        .locale
        .as_deref()
        .map(resolve_locale)
        .unwrap_or_else(|| config.locale());
    let date_style = if cli.legacy_dates {
        DateStyle::Short
    } else {
        DateStyle::Ordinal
    };
    BatchAssembler::new(TitleNormalizer::new(locale).with_date_style(date_style))
}

async fn load_raw(command: &Command, config: &AppConfig) -> Result<RawBatch> {
    match command {
        Command::Latest { dir } => {
            let root = dir.clone().unwrap_or_else(|| config.output_dir.clone());
            let store = SnapshotStore::new(root);
            store
                .load_latest()
                .with_context(|| format!("failed to load snapshot from {}", store.root().display()))
        }
        Command::Fetch { origin, save } => {
            let source = match origin {
                Some(origin) => HttpSource::new(origin, config.request_timeout())?,
                None => HttpSource::from_config(config)?,
            };
            let body = source
                .fetch_bytes()
                .await
                .with_context(|| format!("failed to fetch {}", source.url()))?;
            let raw = RawBatch::from_slice(&body).context("response is not a batch payload")?;
            if *save {
                let entry = SnapshotStore::new(&config.output_dir).persist(&body)?;
                info!(path = %entry.path.display(), "Stored fetched batch");
            }
            Ok(raw)
        }
        Command::Normalize { path } => read_raw_file(path),
    }
}

fn read_raw_file(path: &Path) -> Result<RawBatch> {
    let bytes = if path.as_os_str() == "-" {
        let mut buffer = Vec::new();
        io::stdin()
            .read_to_end(&mut buffer)
            .context("failed to read batch from stdin")?;
        buffer
    } else {
        std::fs::read(path).with_context(|| format!("failed to read {}", path.display()))?
    };
    RawBatch::from_slice(&bytes).with_context(|| format!("failed to parse {}", path.display()))
}

fn write_batch(out: &mut impl Write, batch: &Batch, pretty: bool) -> Result<()> {
    if pretty {
        serde_json::to_writer_pretty(&mut *out, batch)?;
    } else {
        serde_json::to_writer(&mut *out, batch)?;
    }
    writeln!(out)?;
    Ok(())
}
