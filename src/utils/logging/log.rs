//! Logging utilities
//!
//! Consistent log lines for file operations and pipeline steps.

use std::path::Path;
use std::time::Duration;

/// Log the start of a file operation
///
/// # Arguments
/// * `operation` - Description of the operation
/// * `path` - File being read or written
pub fn log_operation_start(operation: &str, path: &Path) {
    log::info!("{operation} {}", path.display());
}

/// Log the end of a file operation with its row count
///
/// # Arguments
/// * `operation` - Past-tense verb, e.g. "read"
/// * `path` - File that was operated on
/// * `rows` - Number of rows processed
/// * `elapsed` - Optional elapsed time
pub fn log_operation_complete(operation: &str, path: &Path, rows: usize, elapsed: Option<Duration>) {
    match elapsed {
        Some(duration) => log::info!("{operation} {rows} rows from {} in {duration:?}", path.display()),
        None => log::info!("{operation} {rows} rows from {}", path.display()),
    }
}

/// Log the completion of a pipeline step
pub fn log_step(step: &str, elapsed: Duration) {
    log::info!("{step} finished in {elapsed:?}");
}

/// Log a warning, optionally tied to a file
pub fn log_warning(message: &str, path: Option<&Path>) {
    match path {
        Some(path) => log::warn!("{message}: {}", path.display()),
        None => log::warn!("{message}"),
    }
}
