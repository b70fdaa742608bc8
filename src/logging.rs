//! Logging bootstrap.
//!
//! Logs go to stderr so they never mix with listings on stdout. The level
//! follows the number of `-v` flags.

use flexi_logger::{Logger, LoggerHandle};

/// Maps `-v` occurrences to a log level.
///
/// - none -> `warn`
/// - `-v` -> `info`
/// - `-vv` -> `debug`
/// - more -> `trace`
pub fn level_for_verbosity(occurrences: u64) -> &'static str {
    match occurrences {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

/// Starts the stderr logger. Keep the returned handle alive for the whole
/// process.
///
/// # Errors
/// - Returns an error when `level` is unsupported.
/// - Returns an error when the logger backend fails to start.
pub fn init_logging(level: &str) -> Result<LoggerHandle, String> {
    let level = normalize_level(level)?;
    Logger::try_with_str(level)
        .map_err(|err| format!("invalid log level `{}`: {}", level, err))?
        .log_to_stderr()
        .format(flexi_logger::default_format)
        .start()
        .map_err(|err| format!("failed to start logger: {}", err))
}

fn normalize_level(level: &str) -> Result<&'static str, String> {
    match level.trim().to_ascii_lowercase().as_str() {
        "trace" => Ok("trace"),
        "debug" => Ok("debug"),
        "info" => Ok("info"),
        "warn" | "warning" => Ok("warn"),
        "error" => Ok("error"),
        other => Err(format!(
            "unsupported log level `{}`; expected trace|debug|info|warn|error",
            other
        )),
    }
}
