//! Raster rendering: render-model to pixels.
//!
//! The [`FrameRenderer`] projects the transcript onto a fixed-size
//! [`Canvas`] with pixel-measured per-character wrapping; export adapters
//! hand the resulting surfaces to the GIF encoder or the video pipe.

mod canvas;
pub mod font;
mod frame;
mod theme;

pub use canvas::Canvas;
pub use font::{load_font, FontError, FontGlyphs, GlyphBitmap, Glyphs};
pub use frame::FrameRenderer;
pub use theme::Theme;

use crate::model::Settings;

/// Raster geometry derived from the settings and a scale factor.
///
/// The live preview renders at scale 1; GIF export supersamples by
/// `settings.gif_scale`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Geometry {
    pub width: u32,
    pub height: u32,
    pub font_size: f32,
    pub pad: f32,
}

impl Geometry {
    /// Geometry for a logical canvas size at the given integer scale.
    pub fn new(settings: &Settings, logical_width: u32, logical_height: u32, scale: u32) -> Self {
        let scale = scale.max(1);
        Self {
            width: logical_width * scale,
            height: logical_height * scale,
            font_size: (settings.font_size_px * scale) as f32,
            pad: (settings.padding_px * scale) as f32,
        }
    }
}

/// Default logical canvas size for exports, 16:9-ish terminal card.
pub const DEFAULT_CANVAS: (u32, u32) = (800, 460);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn geometry_scales_all_dimensions() {
        let settings = Settings::default();
        let geo = Geometry::new(&settings, 800, 460, 2);
        assert_eq!(geo.width, 1600);
        assert_eq!(geo.height, 920);
        assert_eq!(geo.font_size, 32.0);
        assert_eq!(geo.pad, 36.0);
    }

    #[test]
    fn zero_scale_is_treated_as_one() {
        let settings = Settings::default();
        let geo = Geometry::new(&settings, 100, 100, 0);
        assert_eq!(geo.width, 100);
    }
}
