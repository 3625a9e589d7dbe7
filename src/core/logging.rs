//! Logging setup for the tracker binary.
//!
//! The library only emits through the `log` facade; the binary picks the
//! backend here.

/// Map a level name to a filter. Unknown names fall back to `Info`.
pub fn parse_level(level: &str) -> log::LevelFilter {
    match level.to_lowercase().as_str() {
        "off" => log::LevelFilter::Off,
        "error" => log::LevelFilter::Error,
        "warn" => log::LevelFilter::Warn,
        "info" => log::LevelFilter::Info,
        "debug" => log::LevelFilter::Debug,
        "trace" => log::LevelFilter::Trace,
        _ => log::LevelFilter::Info,
    }
}

/// Initialize logging with the specified level. `RUST_LOG` still applies on
/// top for per-module overrides.
pub fn init_logging(level: &str) -> Result<(), String> {
    env_logger::Builder::new()
        .filter_level(parse_level(level))
        .parse_default_env()
        .format_timestamp_secs()
        .try_init()
        .map_err(|e| format!("Failed to initialize logging: {e}"))?;

    log::debug!("Logging initialized at level: {}", level);
    Ok(())
}
