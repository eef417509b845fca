//! Glyph rasterization.
//!
//! [`Glyphs`] abstracts character measurement and coverage bitmaps so the
//! frame renderer can be exercised in tests without a real font on disk.
//! The production implementation wraps `fontdue` with a per-character cache.

use std::collections::HashMap;
use std::io;
use std::path::{Path, PathBuf};

use fontdue::{Font, FontSettings};

/// Errors raised while locating or parsing a font.
#[derive(Debug, thiserror::Error)]
pub enum FontError {
    #[error("Failed to read font file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to parse font {path}: {message}")]
    Parse { path: PathBuf, message: String },

    #[error(
        "No monospace font found in the standard locations. \
         Pass --font <PATH> or set font_path in the config file."
    )]
    NotFound,
}

/// A rasterized glyph: coverage bitmap plus placement metrics.
///
/// `xmin`/`ymin` follow fontdue's convention: offsets of the bitmap's
/// left/bottom edge relative to the pen position and baseline.
#[derive(Debug, Clone)]
pub struct GlyphBitmap {
    pub width: usize,
    pub height: usize,
    pub xmin: i32,
    pub ymin: i32,
    pub coverage: Vec<u8>,
}

/// Character measurement and rasterization at a fixed pixel size.
pub trait Glyphs {
    /// Horizontal advance of `ch` in pixels.
    fn advance(&mut self, ch: char) -> f32;

    /// Distance from the line top to the text baseline.
    fn ascent(&self) -> f32;

    /// Coverage bitmap for `ch`.
    fn bitmap(&mut self, ch: char) -> &GlyphBitmap;
}

/// fontdue-backed glyph source with a rasterization cache.
pub struct FontGlyphs {
    font: Font,
    px: f32,
    ascent: f32,
    cache: HashMap<char, GlyphBitmap>,
}

impl FontGlyphs {
    pub fn new(font: Font, px: f32) -> Self {
        let ascent = font
            .horizontal_line_metrics(px)
            .map(|m| m.ascent)
            .unwrap_or(px * 0.8);
        Self {
            font,
            px,
            ascent,
            cache: HashMap::new(),
        }
    }
}

impl Glyphs for FontGlyphs {
    fn advance(&mut self, ch: char) -> f32 {
        self.font.metrics(ch, self.px).advance_width
    }

    fn ascent(&self) -> f32 {
        self.ascent
    }

    fn bitmap(&mut self, ch: char) -> &GlyphBitmap {
        self.cache.entry(ch).or_insert_with(|| {
            let (metrics, coverage) = self.font.rasterize(ch, self.px);
            GlyphBitmap {
                width: metrics.width,
                height: metrics.height,
                xmin: metrics.xmin,
                ymin: metrics.ymin,
                coverage,
            }
        })
    }
}

/// Candidate monospace fonts, checked in order when no explicit path is
/// given. Covers the common Linux distro fonts plus macOS.
const FONT_CANDIDATES: &[&str] = &[
    "/usr/share/fonts/truetype/dejavu/DejaVuSansMono.ttf",
    "/usr/share/fonts/TTF/DejaVuSansMono.ttf",
    "/usr/share/fonts/dejavu/DejaVuSansMono.ttf",
    "/usr/share/fonts/truetype/liberation/LiberationMono-Regular.ttf",
    "/usr/share/fonts/liberation/LiberationMono-Regular.ttf",
    "/usr/share/fonts/truetype/ubuntu/UbuntuMono-R.ttf",
    "/usr/share/fonts/truetype/noto/NotoSansMono-Regular.ttf",
    "/System/Library/Fonts/Monaco.ttf",
    "/System/Library/Fonts/Supplemental/Courier New.ttf",
];

/// Load a font from an explicit path, or search the standard locations.
///
/// This is the capability check for raster exports: it runs before a
/// simulation starts so a missing font never produces a partial artifact.
pub fn load_font(explicit: Option<&Path>) -> Result<Font, FontError> {
    if let Some(path) = explicit {
        return parse_font_file(path);
    }
    for candidate in FONT_CANDIDATES {
        let path = Path::new(candidate);
        if path.exists() {
            return parse_font_file(path);
        }
    }
    Err(FontError::NotFound)
}

fn parse_font_file(path: &Path) -> Result<Font, FontError> {
    let bytes = fs_read(path)?;
    Font::from_bytes(bytes, FontSettings::default()).map_err(|message| FontError::Parse {
        path: path.to_path_buf(),
        message: message.to_string(),
    })
}

fn fs_read(path: &Path) -> Result<Vec<u8>, FontError> {
    std::fs::read(path).map_err(|source| FontError::Read {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
pub(crate) mod stub {
    use super::{GlyphBitmap, Glyphs};

    /// Fixed-metrics glyph source for renderer tests: every character is a
    /// fully-covered `advance x advance` square.
    pub struct StubGlyphs {
        advance: f32,
        bitmap: GlyphBitmap,
    }

    impl StubGlyphs {
        pub fn new(advance: f32) -> Self {
            let side = advance as usize;
            Self {
                advance,
                bitmap: GlyphBitmap {
                    width: side,
                    height: side,
                    xmin: 0,
                    ymin: 0,
                    coverage: vec![255; side * side],
                },
            }
        }
    }

    impl Glyphs for StubGlyphs {
        fn advance(&mut self, _ch: char) -> f32 {
            self.advance
        }

        fn ascent(&self) -> f32 {
            self.advance
        }

        fn bitmap(&mut self, _ch: char) -> &GlyphBitmap {
            &self.bitmap
        }
    }
}
