//! Export adapters: feed rasterized frames into a GIF encoder or a video
//! capture pipe.
//!
//! Both adapters check their environment capabilities *before* starting a
//! simulation run, surface encoder failures with the encoder's own message,
//! and discard partially-produced artifacts on failure.

mod error;
mod filename;
pub mod gif;
pub mod video;

pub use error::ExportError;
pub use filename::default_artifact_name;

use std::path::PathBuf;

use humansize::{format_size, DECIMAL};

/// Summary of a finished export.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportReport {
    /// Where the artifact was written.
    pub path: PathBuf,
    /// Artifact size in bytes.
    pub bytes: u64,
    /// Number of frames handed to the encoder.
    pub frames: usize,
}

impl ExportReport {
    /// Human-readable status line, e.g. `"terminal.gif (1.20 MB, 42 frames)"`.
    pub fn summary(&self) -> String {
        format!(
            "{} ({}, {} frames)",
            self.path.display(),
            format_size(self.bytes, DECIMAL),
            self.frames
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn summary_includes_size_and_frames() {
        let report = ExportReport {
            path: PathBuf::from("out.gif"),
            bytes: 1_200_000,
            frames: 42,
        };
        let summary = report.summary();
        assert!(summary.contains("out.gif"));
        assert!(summary.contains("1.20 MB"), "unexpected summary: {summary}");
        assert!(summary.contains("42 frames"));
    }
}
