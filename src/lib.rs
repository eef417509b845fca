//! Terminal GIF Maker.
//!
//! Renders a scripted terminal-session animation - an ordered timeline of
//! command/output steps with typing speed and pauses - as a live terminal
//! preview, an animated GIF, or a video file.
//!
//! # Architecture
//!
//! One simulation engine drives three consumers:
//!
//! - [`ansi`]: SGR segment parsing and escape-safe reveal tokenization
//! - [`model`]: steps, settings, the render model, preset documents
//! - [`engine`]: the timeline walk, emitting frames into a [`engine::FrameSink`]
//! - [`raster`]: render-model-to-pixels projection with per-character wrap
//! - [`export`]: GIF and ffmpeg video adapters consuming rasterized frames
//! - [`preview`]: live ratatui projection of the render model
//!
//! Data flow: step timeline → engine → render-model mutations →
//! {preview renderer | raster renderer → export adapter}.
//!
//! [`run`] is the mode dispatcher: it builds the sink matching a
//! [`RunMode`] and walks the timeline against it.

pub mod ansi;
pub mod config;
pub mod engine;
pub mod export;
pub mod model;
pub mod preview;
pub mod raster;

pub use config::Config;
pub use engine::{FrameSink, RunOutcome, Simulation};
pub use model::{Preset, Settings, Step};

use std::path::Path;

use anyhow::{Context, Result};

use crate::export::video::CodecChoice;
use crate::export::ExportReport;

/// How a run consumes emitted frames. Each variant selects the sink the
/// dispatcher builds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunMode {
    /// Interactive terminal preview: real-time, frames drawn to the TTY.
    Preview,
    /// GIF capture: walk as fast as possible, record durations as metadata.
    GifCapture,
    /// Video capture: real-time, frames piped to ffmpeg with the codec the
    /// caller already negotiated.
    VideoCapture { codec: CodecChoice },
}

/// Walk the preset's timeline in the given mode.
///
/// Capture modes require `out_path` and return a report; preview draws to
/// the current terminal and returns `None`.
pub fn run(
    preset: &Preset,
    mode: RunMode,
    out_path: Option<&Path>,
    font_path: Option<&Path>,
) -> Result<Option<ExportReport>> {
    match mode {
        RunMode::Preview => {
            preview::run_preview(preset)?;
            Ok(None)
        }
        RunMode::GifCapture => {
            let out = out_path.context("GIF capture requires an output path")?;
            Ok(Some(export::gif::export_gif(preset, out, font_path)?))
        }
        RunMode::VideoCapture { codec } => {
            let out = out_path.context("video capture requires an output path")?;
            Ok(Some(export::video::export_video(
                preset, out, font_path, codec,
            )?))
        }
    }
}
