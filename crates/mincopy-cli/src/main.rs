//! mincopy - mirror a directory while it changes, writing only what differs
//!
//! Every file under the source matching the include globs (and none of the
//! exclude globs) is kept in sync with the same relative path under the
//! destination. Destination files whose bytes already match are left alone.

mod filter;
mod watcher;

use anyhow::{Context, Result};
use clap::Parser;
use console::style;
use filter::PathFilter;
use mincopy_config::{Settings, SettingsLoader, SyncConfigBuilder};
use mincopy_sync::{ActivityReporter, CacheLimits, EventRouter, LocalFileSystem, SyncEngine};
use mincopy_types::SyncConfig;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{debug, info};

/// mincopy - watch a directory and mirror it with minimal writes
#[derive(Parser)]
#[command(
    name = "mincopy",
    version = env!("CARGO_PKG_VERSION"),
    about = "Watch a directory and mirror it with minimal writes",
    long_about = "mincopy watches SOURCE and mirrors every matching file into DEST.\n\
                  A destination file is only rewritten when its content actually differs,\n\
                  so downstream watchers on DEST never see spurious changes."
)]
struct Cli {
    /// Directory to watch
    source: PathBuf,

    /// Directory to mirror into
    dest: PathBuf,

    /// Include glob, or a JSON array of globs such as '["**/*.js","**/*.css"]'
    globs: Option<String>,

    /// Exclude glob (or JSON array of globs); may be repeated
    #[arg(short, long)]
    exclude: Vec<String>,

    /// Log every file written and unlinked
    #[arg(short, long)]
    debug: bool,

    /// Quiet mode - warnings and errors only
    #[arg(short, long)]
    quiet: bool,

    /// Settings file path (TOML, YAML or JSON)
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let settings = load_settings(cli.config.as_deref())?;

    // Initialize logging
    init_logging(cli.debug, cli.quiet, &settings.logging.level)?;

    let config = SyncConfigBuilder::new(&cli.source, &cli.dest)
        .globs(cli.globs.as_deref())
        .excludes(cli.exclude.iter().cloned())
        .debug(cli.debug)
        .build()?;

    info!("mincopy v{} starting", env!("CARGO_PKG_VERSION"));

    if !cli.quiet {
        println!(
            "{} Mirroring {} to {}",
            style("→").green().bold(),
            style(config.source_root.display()).cyan(),
            style(config.dest_root.display()).cyan()
        );
    }

    run(config, &settings).await
}

fn load_settings(path: Option<&Path>) -> Result<Settings> {
    let settings = match path {
        Some(path) => SettingsLoader::load_from_file(path)?,
        None => {
            let cwd = std::env::current_dir().context("Failed to read current directory")?;
            SettingsLoader::load_default_in(cwd)?
        }
    };
    Ok(settings)
}

fn init_logging(debug: bool, quiet: bool, default_level: &str) -> Result<()> {
    use tracing_subscriber::{fmt, EnvFilter};

    let level = if debug {
        "debug"
    } else if quiet {
        "warn"
    } else {
        default_level
    };

    let filter = EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(level))?;

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_thread_names(false)
        .init();

    Ok(())
}

async fn run(config: SyncConfig, settings: &Settings) -> Result<()> {
    let root = config.source_root.canonicalize().with_context(|| {
        format!(
            "Failed to resolve source directory '{}'",
            config.source_root.display()
        )
    })?;
    let filter = Arc::new(PathFilter::new(
        &config.include_patterns,
        &config.exclude_patterns,
    ));
    let config = Arc::new(config);

    let engine = SyncEngine::with_file_system(
        Arc::clone(&config),
        Arc::new(LocalFileSystem::new()),
        CacheLimits::new(settings.cache.max_entries, settings.cache.ttl()),
    );
    let reporter = ActivityReporter::new(engine.counters(), settings.reporting.interval());
    let reporting = tokio::spawn(reporter.clone().run());

    let (tx, rx) = mpsc::unbounded_channel();

    // Watch first so nothing changed during the scan is missed
    let roots = watcher::Roots {
        source: root.clone(),
        dest: config.dest_root.clone(),
    };
    let _watcher = watcher::watch(roots, Arc::clone(&filter), tx.clone())
        .with_context(|| format!("Failed to watch '{}'", root.display()))?;

    let initial = watcher::initial_scan(&root, &filter);
    debug!("Initial scan found {} files", initial.len());
    for event in initial {
        tx.send(event)?;
    }

    tokio::select! {
        _ = EventRouter::new(engine).run(rx) => {}
        signal = tokio::signal::ctrl_c() => {
            signal.context("Failed to listen for Ctrl+C")?;
            info!("Shutting down");
        }
    }

    reporting.abort();
    reporter.report_once();

    Ok(())
}
