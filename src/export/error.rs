//! Export failure taxonomy.

use std::io;
use std::path::PathBuf;

use crate::model::PresetError;
use crate::raster::FontError;

/// Errors that can occur while exporting an animation.
///
/// Capability errors (`FfmpegMissing`, `NoCodec`, `Font`) are raised before
/// a simulation run starts; encoder errors are terminal and never retried.
#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error(transparent)]
    Font(#[from] FontError),

    #[error(transparent)]
    Preset(#[from] PresetError),

    #[error(
        "ffmpeg was not found on PATH. Install ffmpeg and verify \
         `ffmpeg -version` works before exporting video."
    )]
    FfmpegMissing,

    #[error("No supported video codec: the local ffmpeg has none of [{tried}]")]
    NoCodec { tried: String },

    #[error("Encoding failed: {0}")]
    Encoder(String),

    #[error("Failed to write {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl ExportError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
