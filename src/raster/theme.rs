//! Visual themes for the rendered terminal.
//!
//! Centralizes the colors shared by the raster renderer and the live
//! preview so both surfaces agree on what a theme looks like.

use crate::ansi::Rgb;

/// Colors for one visual theme.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Theme {
    /// Background gradient, top edge.
    pub gradient_top: Rgb,
    /// Background gradient, bottom edge.
    pub gradient_bottom: Rgb,
    /// Prompt path color.
    pub accent: Rgb,
    /// The `" $ "` separator color.
    pub secondary: Rgb,
    /// Fallback foreground when a segment has no explicit color.
    pub default_fg: Rgb,
    /// Cursor block color.
    pub cursor: Rgb,
}

impl Default for Theme {
    fn default() -> Self {
        Self::midnight()
    }
}

impl Theme {
    /// Deep blue-black gradient with a green prompt. The default.
    pub fn midnight() -> Self {
        Self {
            gradient_top: Rgb::new(0x0b, 0x10, 0x21),
            gradient_bottom: Rgb::new(0x10, 0x17, 0x2e),
            accent: Rgb::new(0x22, 0xc5, 0x5e),
            secondary: Rgb::new(0x6b, 0x72, 0x80),
            default_fg: Rgb::new(0xd1, 0xd5, 0xdb),
            cursor: Rgb::new(0xd1, 0xd5, 0xdb),
        }
    }

    /// Warm dark gradient with an amber prompt.
    pub fn ember() -> Self {
        Self {
            gradient_top: Rgb::new(0x1c, 0x12, 0x0e),
            gradient_bottom: Rgb::new(0x2a, 0x17, 0x0f),
            accent: Rgb::new(0xfb, 0x92, 0x3c),
            secondary: Rgb::new(0x9a, 0x83, 0x78),
            default_fg: Rgb::new(0xe7, 0xe5, 0xe4),
            cursor: Rgb::new(0xfb, 0x92, 0x3c),
        }
    }

    /// Green-on-black, flat gradient.
    pub fn matrix() -> Self {
        Self {
            gradient_top: Rgb::new(0x02, 0x08, 0x02),
            gradient_bottom: Rgb::new(0x04, 0x12, 0x06),
            accent: Rgb::new(0x4a, 0xde, 0x80),
            secondary: Rgb::new(0x16, 0x65, 0x34),
            default_fg: Rgb::new(0x86, 0xef, 0xac),
            cursor: Rgb::new(0x4a, 0xde, 0x80),
        }
    }

    /// Look up a theme by its persisted identifier.
    ///
    /// Unknown names fall back to the default so an out-of-date preset
    /// still renders.
    pub fn by_name(name: &str) -> Self {
        match name {
            "midnight" => Self::midnight(),
            "ember" => Self::ember(),
            "matrix" => Self::matrix(),
            _ => Self::default(),
        }
    }

    /// Known theme identifiers, for CLI help and validation messages.
    pub fn names() -> &'static [&'static str] {
        &["midnight", "ember", "matrix"]
    }
}
