//! File-based logging using simplelog
//!
//! The demo talks to the user over stdout, so logs go to a file.
//! Log file location depends on build type:
//! - Debug builds: current working directory (for development convenience)
//! - Release builds: cache directory (~/.cache/unistore-demo/ on Linux)

use anyhow::{Context, Result};
use simplelog::{ConfigBuilder, LevelFilter, WriteLogger};
use std::fs::File;
use std::path::PathBuf;

const APP_NAME: &str = "unistore-demo";

/// Get the log file path based on build type
fn log_file_path() -> PathBuf {
    let timestamp = chrono::Local::now().format("%Y%m%d-%H%M%S");
    let filename = format!("{}-{}.log", APP_NAME, timestamp);

    if cfg!(debug_assertions) {
        PathBuf::from(filename)
    } else {
        dirs::cache_dir()
            .map(|dir| dir.join(APP_NAME))
            .filter(|dir| std::fs::create_dir_all(dir).is_ok())
            .map(|dir| dir.join(&filename))
            .unwrap_or_else(|| PathBuf::from(filename))
    }
}

/// Parse a `RUST_LOG` style level name
fn level_from_env(value: Option<&str>) -> LevelFilter {
    match value.map(|v| v.to_lowercase()) {
        Some(v) => match v.as_str() {
            "off" => LevelFilter::Off,
            "error" => LevelFilter::Error,
            "warn" => LevelFilter::Warn,
            "info" => LevelFilter::Info,
            "debug" => LevelFilter::Debug,
            "trace" => LevelFilter::Trace,
            _ => LevelFilter::Info,
        },
        None => LevelFilter::Debug,
    }
}

/// Initialize file-based logging
///
/// Returns the path to the log file.
pub fn init() -> Result<PathBuf> {
    let log_file = log_file_path();
    let level = level_from_env(std::env::var("RUST_LOG").ok().as_deref());

    let config = ConfigBuilder::new()
        .set_time_format_rfc3339()
        .set_time_offset_to_local()
        .unwrap_or_else(|c| c) // Fallback if local time offset fails
        .build();

    let file = File::create(&log_file)
        .with_context(|| format!("Failed to create log file {}", log_file.display()))?;
    WriteLogger::init(level, config, file).context("Failed to initialize logger")?;

    Ok(log_file)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_from_env() {
        assert_eq!(level_from_env(None), LevelFilter::Debug);
        assert_eq!(level_from_env(Some("TRACE")), LevelFilter::Trace);
        assert_eq!(level_from_env(Some("warn")), LevelFilter::Warn);
        assert_eq!(level_from_env(Some("verbose")), LevelFilter::Info);
    }

    #[test]
    fn test_log_file_name() {
        let path = log_file_path();
        let name = path.file_name().unwrap().to_string_lossy().to_string();
        assert!(name.starts_with("unistore-demo-"));
        assert!(name.ends_with(".log"));
    }
}
