//! CLI subcommand handlers.
//!
//! Thin glue between parsed arguments and the library: each handler loads
//! the preset document, resolves overrides, and calls into one engine
//! entry point for its run mode.

mod export;
mod init;
mod preview;

pub use export::{handle_export_gif, handle_export_video};
pub use init::handle_init;
pub use preview::handle_preview;

use std::path::Path;

use anyhow::{Context, Result};

use tgm::raster::Theme;
use tgm::{Config, Preset};

/// Load the preset at `path`, or the built-in demo when no path is given.
///
/// A load failure leaves nothing half-initialized: the error is reported
/// synchronously and no run is started.
pub(crate) fn load_preset(path: Option<&Path>, config: &Config) -> Result<Preset> {
    let mut preset = match path {
        Some(path) => Preset::load(path)
            .with_context(|| format!("failed to load preset {}", path.display()))?,
        None => Preset::default(),
    };

    // An unknown theme falls back to the renderer default unless the
    // config names a preferred one.
    if !Theme::names().contains(&preset.settings.theme.as_str()) {
        if let Some(theme) = &config.default_theme {
            preset.settings.theme = theme.clone();
        }
    }
    Ok(preset)
}
