//! File logging for the dashboard. The terminal is owned by the UI, so
//! logs always go to a file; its path and the verbosity come from the
//! loaded configuration.

use std::fs::File;
use std::path::Path;

use log::LevelFilter;
use simplelog::{Config, ConfigBuilder, WriteLogger};

/// Parses a configured level name, case-insensitively. Anything
/// unrecognized falls back to `Info`.
pub(crate) fn parse_level(name: &str) -> LevelFilter {
    match name.to_ascii_lowercase().as_str() {
        "off" => LevelFilter::Off,
        "error" => LevelFilter::Error,
        "warn" => LevelFilter::Warn,
        "debug" => LevelFilter::Debug,
        "trace" => LevelFilter::Trace,
        _ => LevelFilter::Info,
    }
}

/// Initializes the global logger writing to `path`. A file that cannot be
/// created leaves the process without logging rather than aborting it.
pub(crate) fn initialize(path: &Path, level: LevelFilter) {
    let file = match File::create(path) {
        Ok(file) => file,
        Err(err) => {
            eprintln!("Warning: Could not create log file at {:?}: {}", path, err);
            return;
        }
    };
    let _ = WriteLogger::init(level, build_config(), file);
}

fn build_config() -> Config {
    ConfigBuilder::new()
        .set_time_format_rfc3339()
        .set_target_level(LevelFilter::Error)
        .build()
}
