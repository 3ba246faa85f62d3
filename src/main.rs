use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{ArgAction, Parser};
use tracing::{debug, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use stampwatch::{run_batch, BatchOptions, CsvTarget, FileSession, SessionStore, Settings};

#[derive(Parser, Debug)]
#[command(name = "stampwatch")]
#[command(about = "Timing analysis of recorded sensor-driver sessions")]
#[command(version)]
struct Args {
    /// Session name (looked up as <session-dir>/<name>.bag.jsonl) or path to a session file
    session: String,

    /// Settings file (TOML)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Directory holding recorded sessions [default: ~/.ros]
    #[arg(long)]
    session_dir: Option<PathBuf>,

    /// Write per-channel interval CSV files
    #[arg(long)]
    csv: bool,

    /// Directory for CSV files [default: current directory]
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Dotted payload path of the generation timestamp [default: header.stamp]
    #[arg(short, long)]
    field: Option<String>,

    /// Only analyze this channel (repeatable)
    #[arg(long = "channel", value_name = "NAME", conflicts_with = "all")]
    channels: Vec<String>,

    /// Analyze every channel in the session instead of the configured table
    #[arg(short, long)]
    all: bool,

    /// List the channels in the session with their record counts and exit
    #[arg(short, long, conflicts_with_all = ["all", "channels", "export"])]
    list: bool,

    /// Export the batch results to a JSON file
    #[arg(short, long)]
    export: Option<PathBuf>,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(args.verbose);

    let mut settings =
        Settings::load(args.config.as_deref()).context("Failed to load configuration")?;
    apply_overrides(&mut settings, &args);

    let session_dir = settings.session_dir();
    debug!(session = %args.session, dir = %session_dir.display(), "Resolving session");
    let session = FileSession::resolve(&session_dir, &args.session)
        .with_context(|| format!("Cannot open session '{}'", args.session))?;

    if args.list {
        return list_channels(&session);
    }

    let base = settings.channel_table().context("Invalid channel table")?;
    let table = if args.all {
        base.select(&session.channels().context("Failed to scan session channels")?)
    } else if !args.channels.is_empty() {
        base.select(&args.channels)
    } else {
        base
    };

    let csv = if settings.csv {
        std::fs::create_dir_all(&settings.output_dir).with_context(|| {
            format!(
                "Cannot create output directory {}",
                settings.output_dir.display()
            )
        })?;
        let target = CsvTarget::new(&settings.output_dir, session.name());
        info!(dir = %target.dir().display(), "Writing interval CSV files");
        Some(target)
    } else {
        None
    };

    let options = BatchOptions {
        generation_field: settings.generation_field.clone(),
        csv,
    };

    info!(
        session = %session.path().display(),
        channels = table.len(),
        "Starting batch"
    );

    let stdout = io::stdout();
    let mut out = stdout.lock();
    let report = run_batch(&session, &table, &options, &mut out);
    out.flush()?;

    if let Some(path) = &args.export {
        report
            .write_json(path)
            .with_context(|| format!("Failed to export report to {}", path.display()))?;
        info!(path = %path.display(), "Exported batch report");
    }

    info!(
        complete = report.complete(),
        insufficient = report.insufficient(),
        failed = report.failed(),
        "Batch finished"
    );
    Ok(())
}

/// Logs go to stderr so stdout carries only the report.
fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };

    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(format!("stampwatch={}", level))),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(io::stderr),
        )
        .init();
}

/// Command line flags take precedence over file and environment settings.
fn apply_overrides(settings: &mut Settings, args: &Args) {
    if let Some(dir) = &args.session_dir {
        settings.session_dir = Some(dir.clone());
    }
    if let Some(dir) = &args.output_dir {
        settings.output_dir = dir.clone();
    }
    if args.csv {
        settings.csv = true;
    }
    if let Some(field) = &args.field {
        settings.generation_field = field.clone();
    }
}

fn list_channels(session: &FileSession) -> Result<()> {
    let counts = session
        .channel_counts()
        .context("Failed to scan session channels")?;

    let stdout = io::stdout();
    let mut out = stdout.lock();
    for (channel, count) in &counts {
        writeln!(out, "{:<48} {}", channel, count)?;
    }
    out.flush()?;

    info!(channels = counts.len(), "Listed session channels");
    Ok(())
}
