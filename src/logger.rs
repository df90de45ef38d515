use anyhow::{Context, Result};
use std::fs::File;
use std::path::Path;
use std::sync::Mutex;
use tracing_subscriber::{EnvFilter, fmt};

const DEFAULT_FILTER: &str = "warn";

/// Where log lines go. The TUI owns the terminal, so interactive sessions
/// either log to a file or not at all.
pub enum LogTarget<'a> {
    Stderr,
    File(&'a Path),
    Silent,
}

pub fn initialize_logger(target: LogTarget<'_>) -> Result<()> {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
    let builder = fmt().with_env_filter(env_filter).with_target(false);

    let result = match target {
        LogTarget::Stderr => builder.with_writer(std::io::stderr).try_init(),
        LogTarget::File(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create log file {}", path.display()))?;
            builder
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .try_init()
        }
        LogTarget::Silent => builder.with_writer(std::io::sink).try_init(),
    };

    result.map_err(|e| anyhow::anyhow!("Failed to set global logger: {}", e))
}
