//! Color tables for SGR rendition.
//!
//! Provides the fixed 16-color palette used by SGR 30-37/90-97 (and their
//! background twins) plus the standard 256-color index mapping used by
//! `38;5;n` / `48;5;n`.

use serde::{Deserialize, Serialize};

/// An 8-bit RGB triple.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

/// The 16 basic colors, indexed 0-7 (normal) and 8-15 (bright).
///
/// These are the theme-agnostic defaults the raster and preview renderers
/// share, tuned for dark backgrounds.
const BASIC_16: [Rgb; 16] = [
    Rgb::new(0x11, 0x18, 0x27), // black
    Rgb::new(0xef, 0x44, 0x44), // red
    Rgb::new(0x22, 0xc5, 0x5e), // green
    Rgb::new(0xea, 0xb3, 0x08), // yellow
    Rgb::new(0x3b, 0x82, 0xf6), // blue
    Rgb::new(0xa8, 0x55, 0xf7), // magenta
    Rgb::new(0x06, 0xb6, 0xd4), // cyan
    Rgb::new(0xe5, 0xe7, 0xeb), // white
    Rgb::new(0x6b, 0x72, 0x80), // bright black
    Rgb::new(0xf8, 0x71, 0x71), // bright red
    Rgb::new(0x4a, 0xde, 0x80), // bright green
    Rgb::new(0xfa, 0xcc, 0x15), // bright yellow
    Rgb::new(0x60, 0xa5, 0xfa), // bright blue
    Rgb::new(0xc0, 0x84, 0xfc), // bright magenta
    Rgb::new(0x22, 0xd3, 0xee), // bright cyan
    Rgb::new(0xf9, 0xfa, 0xfb), // bright white
];

/// Look up one of the 16 basic colors.
///
/// `index` is 0-15; out-of-range indices return `None` so the parser can
/// leave the prior style value untouched.
pub fn basic_color(index: usize) -> Option<Rgb> {
    BASIC_16.get(index).copied()
}

/// Map a 256-color index to RGB.
///
/// - 0-15: the fixed basic palette
/// - 16-231: 6x6x6 color cube, channel step `0` or `55 + 40 * v`
/// - 232-255: 24-step grayscale ramp, `8 + 10 * (i - 232)`
pub fn indexed_color(index: u8) -> Rgb {
    match index {
        0..=15 => BASIC_16[index as usize],
        16..=231 => {
            let idx = index as u16 - 16;
            let r = (idx / 36) as u8;
            let g = ((idx % 36) / 6) as u8;
            let b = (idx % 6) as u8;
            Rgb::new(cube_channel(r), cube_channel(g), cube_channel(b))
        }
        232..=255 => {
            let v = 8 + 10 * (index - 232);
            Rgb::new(v, v, v)
        }
    }
}

fn cube_channel(v: u8) -> u8 {
    if v == 0 {
        0
    } else {
        55 + 40 * v
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn basic_color_covers_all_sixteen() {
        for i in 0..16 {
            assert!(basic_color(i).is_some(), "missing basic color {}", i);
        }
        assert!(basic_color(16).is_none());
    }

    #[test]
    fn index_196_is_bright_red() {
        // 196 - 16 = 180 -> cube (5, 0, 0) -> (255, 0, 0)
        assert_eq!(indexed_color(196), Rgb::new(255, 0, 0));
    }

    #[test]
    fn index_244_is_mid_gray() {
        // 8 + 10 * (244 - 232) = 128
        assert_eq!(indexed_color(244), Rgb::new(128, 128, 128));
    }

    #[test]
    fn cube_extremes() {
        // 16 is cube (0,0,0), 231 is cube (5,5,5)
        assert_eq!(indexed_color(16), Rgb::new(0, 0, 0));
        assert_eq!(indexed_color(231), Rgb::new(255, 255, 255));
    }

    #[test]
    fn grayscale_ramp_bounds() {
        assert_eq!(indexed_color(232), Rgb::new(8, 8, 8));
        assert_eq!(indexed_color(255), Rgb::new(238, 238, 238));
    }

    #[test]
    fn low_indices_use_basic_palette() {
        assert_eq!(indexed_color(1), BASIC_16[1]);
        assert_eq!(indexed_color(15), BASIC_16[15]);
    }
}
