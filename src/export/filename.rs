//! Suggested filenames for export artifacts.

use chrono::Local;

/// Suggested artifact name when the user gives no output path,
/// e.g. `terminal-20260830-142501.gif`.
pub fn default_artifact_name(extension: &str) -> String {
    format!(
        "terminal-{}.{}",
        Local::now().format("%Y%m%d-%H%M%S"),
        extension.trim_start_matches('.')
    )
}
