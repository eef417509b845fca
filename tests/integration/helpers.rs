//! Shared helpers for integration tests.

use std::path::PathBuf;

use tempfile::TempDir;

/// Write `content` as a preset file inside a fresh temp dir.
///
/// Returns the dir guard (dropping it deletes the file) and the file path.
pub fn temp_preset(content: &str) -> (TempDir, PathBuf) {
    let dir = tempfile::tempdir().expect("create temp dir");
    let path = dir.path().join("preset.json");
    std::fs::write(&path, content).expect("write preset fixture");
    (dir, path)
}

/// A minimal two-step preset document.
pub fn sample_preset_json() -> &'static str {
    r#"{
  "version": 2,
  "settings": { "typingMsPerChar": 5, "theme": "midnight" },
  "steps": [
    { "path": "/srv", "text": "echo hi", "typing": true, "timeout": 20 },
    { "path": "", "text": "hi", "typing": false, "timeout": 10 }
  ]
}"#
}
