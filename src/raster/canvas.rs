//! Owned RGBA pixel surface.
//!
//! All drawing is bounds-checked clipping, so callers can draw past the
//! edges (wrapped text overflowing the bottom margin) without corrupting
//! memory or wrapping around rows.

use crate::ansi::Rgb;

/// A fixed-size RGBA8 canvas.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Canvas {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl Canvas {
    /// Create a canvas filled with opaque black.
    pub fn new(width: u32, height: u32) -> Self {
        let mut data = vec![0; (width as usize) * (height as usize) * 4];
        for px in data.chunks_exact_mut(4) {
            px[3] = 255;
        }
        Self {
            width,
            height,
            data,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Raw RGBA bytes, row-major.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Read one pixel; `None` outside the canvas.
    pub fn pixel(&self, x: u32, y: u32) -> Option<Rgb> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let at = ((y * self.width + x) * 4) as usize;
        Some(Rgb::new(self.data[at], self.data[at + 1], self.data[at + 2]))
    }

    fn put(&mut self, x: u32, y: u32, color: Rgb) {
        let at = ((y * self.width + x) * 4) as usize;
        self.data[at] = color.r;
        self.data[at + 1] = color.g;
        self.data[at + 2] = color.b;
        self.data[at + 3] = 255;
    }

    /// Fill the whole surface with a vertical gradient.
    pub fn vertical_gradient(&mut self, top: Rgb, bottom: Rgb) {
        let rows = self.height.max(1) as f32;
        for y in 0..self.height {
            let t = y as f32 / (rows - 1.0).max(1.0);
            let color = lerp(top, bottom, t);
            for x in 0..self.width {
                self.put(x, y, color);
            }
        }
    }

    /// Fill a rectangle, clipped to the canvas.
    pub fn fill_rect(&mut self, x: i32, y: i32, w: u32, h: u32, color: Rgb) {
        let x0 = x.max(0) as u32;
        let y0 = y.max(0) as u32;
        let x1 = (x.saturating_add(w as i32)).clamp(0, self.width as i32) as u32;
        let y1 = (y.saturating_add(h as i32)).clamp(0, self.height as i32) as u32;
        for py in y0..y1 {
            for px in x0..x1 {
                self.put(px, py, color);
            }
        }
    }

    /// Alpha-blend a glyph coverage bitmap at (x, y), clipped to the canvas.
    pub fn blend_coverage(
        &mut self,
        x: i32,
        y: i32,
        width: usize,
        height: usize,
        coverage: &[u8],
        color: Rgb,
    ) {
        for row in 0..height {
            let py = y + row as i32;
            if py < 0 || py >= self.height as i32 {
                continue;
            }
            for col in 0..width {
                let px = x + col as i32;
                if px < 0 || px >= self.width as i32 {
                    continue;
                }
                let alpha = coverage[row * width + col] as u16;
                if alpha == 0 {
                    continue;
                }
                let at = ((py as u32 * self.width + px as u32) * 4) as usize;
                for (chan, value) in [color.r, color.g, color.b].into_iter().enumerate() {
                    let bg = self.data[at + chan] as u16;
                    let blended = (value as u16 * alpha + bg * (255 - alpha)) / 255;
                    self.data[at + chan] = blended as u8;
                }
            }
        }
    }
}

fn lerp(a: Rgb, b: Rgb, t: f32) -> Rgb {
    let mix = |x: u8, y: u8| (x as f32 + (y as f32 - x as f32) * t).round() as u8;
    Rgb::new(mix(a.r, b.r), mix(a.g, b.g), mix(a.b, b.b))
}
