//! Export subcommand handlers.

use std::path::{Path, PathBuf};

use anyhow::{bail, Result};
use tracing::error;

use tgm::export::video::negotiate_codec;
use tgm::export::{default_artifact_name, ExportReport};
use tgm::{Config, RunMode};

use super::load_preset;

/// Resolve the font override: CLI flag beats config file beats search.
fn resolve_font(flag: Option<PathBuf>, config: &Config) -> Option<PathBuf> {
    flag.or_else(|| config.font_path.clone())
}

fn report_done(report: &ExportReport) {
    println!("Done: {}", report.summary());
}

/// `tgm export gif`: walk the timeline in capture mode and encode a GIF.
#[cfg(not(tarpaulin_include))]
pub fn handle_export_gif(
    preset_path: Option<&Path>,
    output: Option<PathBuf>,
    font: Option<PathBuf>,
) -> Result<()> {
    let config = Config::load()?;
    let preset = load_preset(preset_path, &config)?;
    let out_path = output.unwrap_or_else(|| PathBuf::from(default_artifact_name("gif")));
    let font = resolve_font(font, &config);

    println!("Exporting GIF to {} ...", out_path.display());
    match tgm::run(&preset, RunMode::GifCapture, Some(&out_path), font.as_deref()) {
        Ok(report) => {
            if let Some(report) = report {
                report_done(&report);
            }
            Ok(())
        }
        Err(err) => {
            error!(error = %err, "gif export failed");
            bail!("GIF export failed: {err}")
        }
    }
}

/// `tgm export video`: run in real time and pipe frames to ffmpeg.
#[cfg(not(tarpaulin_include))]
pub fn handle_export_video(
    preset_path: Option<&Path>,
    output: Option<PathBuf>,
    font: Option<PathBuf>,
) -> Result<()> {
    let config = Config::load()?;
    let preset = load_preset(preset_path, &config)?;
    let font = resolve_font(font, &config);

    // One capability probe: the codec picks both the encoder and the
    // container for the default file name.
    let codec = match negotiate_codec() {
        Ok(codec) => codec,
        Err(err) => {
            error!(error = %err, "video capability probe failed");
            bail!("Video export failed: {err}");
        }
    };
    let out_path = output.unwrap_or_else(|| PathBuf::from(default_artifact_name(codec.container)));

    println!(
        "Exporting video to {} (runs in real time) ...",
        out_path.display()
    );
    match tgm::run(
        &preset,
        RunMode::VideoCapture { codec },
        Some(&out_path),
        font.as_deref(),
    ) {
        Ok(report) => {
            if let Some(report) = report {
                report_done(&report);
            }
            Ok(())
        }
        Err(err) => {
            error!(error = %err, "video export failed");
            bail!("Video export failed: {err}")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_font_flag_beats_config() {
        let config = Config {
            font_path: Some(PathBuf::from("/config/font.ttf")),
            ..Config::default()
        };
        let resolved = resolve_font(Some(PathBuf::from("/flag/font.ttf")), &config);
        assert_eq!(resolved, Some(PathBuf::from("/flag/font.ttf")));
    }

    #[test]
    fn config_font_used_without_flag() {
        let config = Config {
            font_path: Some(PathBuf::from("/config/font.ttf")),
            ..Config::default()
        };
        assert_eq!(resolve_font(None, &config), Some(PathBuf::from("/config/font.ttf")));
    }

    #[test]
    fn no_font_anywhere_falls_back_to_search() {
        assert_eq!(resolve_font(None, &Config::default()), None);
    }
}
