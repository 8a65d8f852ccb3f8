/// Logger setup: `log` facade, `env_logger` backend, tab-separated lines.
use std::fs::OpenOptions;
use std::io::Write;

use anyhow::{Context, Result};
use log::LevelFilter;

use crate::config::expand_tilde;

/// Special `logFile` value meaning "log to the terminal".
pub const TERMINAL: &str = "stdout";

/// Map a `logLevel` setting to a filter. Unknown values mean `info`.
#[must_use]
pub fn parse_level(level: &str) -> LevelFilter {
    match level.to_ascii_lowercase().as_str() {
        "trace" => LevelFilter::Trace,
        "debug" => LevelFilter::Debug,
        "warn" | "warning" => LevelFilter::Warn,
        "error" => LevelFilter::Error,
        "off" => LevelFilter::Off,
        _ => LevelFilter::Info,
    }
}

/// Install the global logger.
///
/// `log_file == "stdout"` writes to stderr so stdout stays free for command output.
/// Any other value is opened for appending, creating parent directories.
///
/// # Errors
///
/// Fails if the log file cannot be opened or a logger is already installed.
pub fn init(log_file: &str, level: &str) -> Result<()> {
    let mut builder = env_logger::Builder::new();
    builder.filter_level(parse_level(level)).format(|buf, record| {
        writeln!(
            buf,
            "{}\t{}\t{}\t{}",
            buf.timestamp_seconds(),
            record.target(),
            record.level(),
            record.args()
        )
    });

    if log_file == TERMINAL {
        builder.target(env_logger::Target::Stderr);
    } else {
        let path = expand_tilde(log_file);
        if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
            std::fs::create_dir_all(dir)
                .with_context(|| format!("failed to create log directory '{}'", dir.display()))?;
        }
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .with_context(|| format!("failed to open log file '{}'", path.display()))?;
        builder.target(env_logger::Target::Pipe(Box::new(file)));
    }

    builder.try_init().context("logger already initialized")?;
    Ok(())
}
