//! Preview subcommand handler.

use std::path::Path;

use anyhow::Result;

use tgm::{Config, RunMode};

use super::load_preset;

/// `tgm preview`: play the timeline in the current terminal.
#[cfg(not(tarpaulin_include))]
pub fn handle_preview(preset_path: Option<&Path>) -> Result<()> {
    let config = Config::load()?;
    let preset = load_preset(preset_path, &config)?;
    tgm::run(&preset, RunMode::Preview, None, None)?;
    Ok(())
}
