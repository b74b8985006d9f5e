use crate::{
    config::{Config, Logging},
    pipeline::{Pipeline, RunSummary},
    sink::{GoogleSheets, MemorySink, SinkCall},
    util::{ensure_dir, sheet_title_now},
};
use anyhow::{Context, Result, anyhow};
use clap::Parser;
use serde_json::{Value, json};
use std::path::{Path, PathBuf};
use tracing::{error, info};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, Layer, layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser, Debug)]
#[command(name = "benchmark-to-sheet")]
#[command(about = "Render kube-bench CIS benchmark reports into a color-coded spreadsheet tab")]
pub struct Args {
    /// Path to the config file (JSON, or TOML when it ends in .toml).
    #[arg(long)]
    pub config: PathBuf,

    /// Override log level (trace/debug/info/warn/error).
    #[arg(long)]
    pub log_level: Option<String>,
}

/// Runs the tool and logs any fatal error itself, while the file writer
/// guard is still alive, before handing it back for the exit code.
pub fn dispatch(args: Args) -> Result<()> {
    let cfg = match load_config(&args.config) {
        Ok(cfg) => cfg,
        Err(err) => {
            match init_logging(&args, &Logging::default()) {
                Ok(_guard) => error!("{:#}", err),
                Err(init_err) => eprintln!("{init_err:#}\n{err:#}"),
            }
            return Err(err);
        }
    };

    let _guard = match init_logging(&args, &cfg.logging) {
        Ok(guard) => guard,
        Err(err) => {
            eprintln!("{err:#}");
            return Err(err);
        }
    };
    info!(
        "config={} reports={} dry_run={}",
        args.config.display(),
        cfg.reports.len(),
        cfg.spreadsheet.dry_run
    );

    if let Err(err) = run(&cfg) {
        error!("{:#}", err);
        return Err(err);
    }
    Ok(())
}

fn run(cfg: &Config) -> Result<()> {
    let title = sheet_title_now();
    if cfg.spreadsheet.dry_run {
        let mut pipeline = Pipeline::new(cfg, MemorySink::new());
        let summary = pipeline.run(&title)?;
        let sink = pipeline.into_sink();
        let doc = dry_run_document(sink.calls(), &summary, cfg.spreadsheet.print_summary);
        println!("{}", serde_json::to_string_pretty(&doc)?);
        return Ok(());
    }

    let sink = GoogleSheets::new(&cfg.spreadsheet).context("connecting to Google Sheets")?;
    let summary = Pipeline::new(cfg, sink).run(&title)?;
    if cfg.spreadsheet.print_summary {
        println!("{}", serde_json::to_string_pretty(&summary_document(&summary))?);
    }
    Ok(())
}

fn load_config(path: &Path) -> Result<Config> {
    let cfg = Config::load(path)?;
    cfg.validate()?;
    Ok(cfg)
}

pub fn summary_document(summary: &RunSummary) -> Value {
    json!({
        "sheet": summary.sheet_title,
        "sheet_id": summary.sheet_id,
        "reports": summary.reports,
        "last_row": summary.last_row,
        "next_row": summary.next_row,
        "status": "ok"
    })
}

/// Single stdout document for a dry run: the recorded sink calls, plus the
/// run summary when `include_summary` is set.
pub fn dry_run_document(
    calls: &[SinkCall],
    summary: &RunSummary,
    include_summary: bool,
) -> Value {
    let mut doc = json!({ "calls": calls });
    if include_summary {
        doc["summary"] = summary_document(summary);
    }
    doc
}

fn init_logging(args: &Args, logging: &Logging) -> Result<Option<WorkerGuard>> {
    let level = args.log_level.as_deref().unwrap_or(logging.level.as_str());

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    // stdout carries the JSON dump and summary, so logs go to stderr.
    let console_layer = if logging.json {
        tracing_subscriber::fmt::layer()
            .json()
            .with_writer(std::io::stderr)
            .with_target(true)
            .boxed()
    } else {
        tracing_subscriber::fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(true)
            .boxed()
    };

    let (file_layer, guard) = if logging.write_to_file && !logging.file_path.is_empty() {
        let path = Path::new(&logging.file_path);
        let parent = path.parent().filter(|p| !p.as_os_str().is_empty());
        if let Some(parent) = parent {
            ensure_dir(parent)?;
        }
        let file = std::fs::File::create(path)
            .with_context(|| format!("create log file: {}", path.display()))?;
        let (non_blocking, guard) = tracing_appender::non_blocking(file);
        let layer = tracing_subscriber::fmt::layer()
            .with_writer(non_blocking)
            .with_ansi(false)
            .with_target(true)
            .boxed();
        (Some(layer), Some(guard))
    } else {
        (None, None)
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(console_layer)
        .with(file_layer)
        .try_init()
        .map_err(|e| anyhow!("failed to init logging: {e}"))?;

    Ok(guard)
}
