#![cfg_attr(all(not(debug_assertions), not(test)), deny(warnings))]
#![allow(clippy::module_name_repetitions, clippy::missing_errors_doc)]
//! `sysid`: identify actuator feedforward gains from a recorded sample log.

mod cli;
mod error_fmt;
mod identify;

use std::fs;
use std::path::Path;

use clap::Parser;
use eyre::WrapErr;
use sysid_config::Config;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{EnvFilter, Layer, Registry, fmt, prelude::*};

use crate::cli::{Cli, Commands, DEFAULT_CONFIG, JSON_MODE};
use crate::error_fmt::{exit_code_for_error, format_error_json, humanize};

fn main() {
    // clap exits with 2 on usage errors and 0 for --help/--version
    let cli = Cli::parse();
    let _ = JSON_MODE.set(cli.json);
    let _ = color_eyre::install();

    if let Err(err) = run(cli) {
        if JSON_MODE.get().copied().unwrap_or(false) {
            eprintln!("{}", format_error_json(&err));
        } else {
            eprintln!("{}", humanize(&err));
        }
        std::process::exit(exit_code_for_error(&err));
    }
}

fn run(cli: Cli) -> eyre::Result<()> {
    let cfg = load_config(&cli.config)?;
    // Dropping the guard flushes the file writer; keep it for the whole run.
    let _file_guard = init_tracing(cli.json, &cli.log_level, &cfg.logging)?;
    tracing::debug!(config = %cli.config.display(), "config loaded");

    match &cli.cmd {
        Commands::Identify { model, export } => {
            identify::run_identify(&cfg, model, export.as_deref(), cli.json)
        }
        Commands::Predict {
            model,
            velocity,
            acceleration,
        } => identify::run_predict(&cfg, model, *velocity, *acceleration, cli.json),
    }
}

fn load_config(path: &Path) -> eyre::Result<Config> {
    if !path.exists() && path == Path::new(DEFAULT_CONFIG) {
        return Ok(Config::default());
    }
    let text = fs::read_to_string(path)
        .wrap_err_with(|| format!("read config {}", path.display()))?;
    let cfg = sysid_config::load_toml(&text)
        .map_err(|e| eyre::eyre!("invalid configuration in {}: {e}", path.display()))?;
    cfg.validate()
        .map_err(|e| eyre::eyre!("invalid configuration in {}: {e}", path.display()))?;
    Ok(cfg)
}

/// Console layer on stderr (pretty or JSON lines), plus an optional JSON file
/// layer from `[logging]`. `RUST_LOG` overrides `--log-level` on the console.
fn init_tracing(
    json: bool,
    level: &str,
    logging: &sysid_config::Logging,
) -> eyre::Result<Option<WorkerGuard>> {
    let console_filter = EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(level))?;
    let console: Box<dyn Layer<Registry> + Send + Sync> = if json {
        fmt::layer().json().with_writer(std::io::stderr).boxed()
    } else {
        fmt::layer().with_writer(std::io::stderr).boxed()
    };

    let mut guard = None;
    let file_layer = match logging.file.as_deref() {
        Some(file) => {
            let path = Path::new(file);
            let dir = path
                .parent()
                .filter(|p| !p.as_os_str().is_empty())
                .unwrap_or_else(|| Path::new("."));
            let name = path
                .file_name()
                .ok_or_else(|| eyre::eyre!("logging.file has no file name: {file:?}"))?;
            let rotation = match logging.rotation.as_deref() {
                Some("daily") => Rotation::DAILY,
                Some("hourly") => Rotation::HOURLY,
                _ => Rotation::NEVER,
            };
            let appender = RollingFileAppender::builder()
                .rotation(rotation)
                .filename_prefix(name.to_string_lossy().into_owned())
                .build(dir)
                .wrap_err_with(|| format!("open log file {file}"))?;
            let (writer, file_guard) = tracing_appender::non_blocking(appender);
            guard = Some(file_guard);
            let file_filter = EnvFilter::try_new(logging.level.as_deref().unwrap_or("info"))?;
            Some(
                fmt::layer()
                    .json()
                    .with_ansi(false)
                    .with_writer(writer)
                    .with_filter(file_filter),
            )
        }
        None => None,
    };

    tracing_subscriber::registry()
        .with(console.with_filter(console_filter))
        .with(file_layer)
        .try_init()?;
    Ok(guard)
}
