use std::fs::{File, OpenOptions};
use std::path::Path;
use std::sync::Mutex;

use anyhow::{Context, Result};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::fmt::{self, format};
use tracing_subscriber::EnvFilter;

const DEFAULT_FILTER: &str = "info";

fn filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| DEFAULT_FILTER.into())
}

fn open_log_file(path: &Path) -> Result<File> {
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("Failed to open log file {}", path.display()))
}

type FileLayer<S> = fmt::Layer<S, format::DefaultFields, format::Format, Mutex<File>>;

fn file_layer<S>(file: File) -> FileLayer<S> {
    fmt::layer()
        .with_ansi(false)
        .with_target(false)
        .with_writer(Mutex::new(file))
}

/// Console logging, plus an append-only file when `log_file` is given.
pub fn init(log_file: Option<&Path>) -> Result<()> {
    let file = log_file.map(open_log_file).transpose()?;

    tracing_subscriber::registry()
        .with(filter())
        .with(fmt::layer().with_target(false))
        .with(file.map(file_layer))
        .try_init()
        .context("Failed to install tracing subscriber")?;

    Ok(())
}
