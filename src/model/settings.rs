//! Renderer and export settings.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Settings consumed by both renderers and the export adapters.
///
/// All numeric fields are clamped on load (`sanitize`) so a hand-edited or
/// out-of-date preset can never push the renderers outside their supported
/// ranges.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Settings {
    /// Typing animation speed in milliseconds per character (1-200).
    pub typing_ms_per_char: u64,
    /// Font size in CSS-like pixels, before the raster scale factor.
    pub font_size_px: u32,
    /// Padding around the rendered terminal, in pixels.
    pub padding_px: u32,
    /// Raster supersampling factor for GIF export (1-4).
    pub gif_scale: u32,
    /// GIF encoder speed/quality knob (1-30, lower is better quality).
    pub gif_quality: u32,
    /// Video sample rate in frames per second (5-60).
    pub video_fps: u32,
    /// Playback time scale for video export (0.25-2.0).
    pub video_time_scale: f64,
    /// Target video bitrate in megabits per second.
    pub video_bitrate_mbps: u32,
    /// Visual theme identifier; unknown names fall back to the default.
    pub theme: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            typing_ms_per_char: 28,
            font_size_px: 16,
            padding_px: 18,
            gif_scale: 2,
            gif_quality: 10,
            video_fps: 30,
            video_time_scale: 1.0,
            video_bitrate_mbps: 8,
            theme: "midnight".to_string(),
        }
    }
}

impl Settings {
    /// Clamp every field into its documented range.
    pub fn sanitize(&mut self) {
        self.typing_ms_per_char = self.typing_ms_per_char.clamp(1, 200);
        self.font_size_px = self.font_size_px.clamp(8, 64);
        self.padding_px = self.padding_px.min(200);
        self.gif_scale = self.gif_scale.clamp(1, 4);
        self.gif_quality = self.gif_quality.clamp(1, 30);
        self.video_fps = self.video_fps.clamp(5, 60);
        self.video_time_scale = self.video_time_scale.clamp(0.25, 2.0);
        self.video_bitrate_mbps = self.video_bitrate_mbps.clamp(1, 50);
        if !self.video_time_scale.is_finite() {
            self.video_time_scale = 1.0;
        }
    }

    /// The per-character typing interval.
    pub fn typing_interval(&self) -> Duration {
        Duration::from_millis(self.typing_ms_per_char.clamp(1, 200))
    }
}
