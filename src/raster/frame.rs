//! Frame renderer: projects the render model onto a pixel canvas.
//!
//! Output is fully deterministic given the model, settings and canvas size.
//! Redrawing the same model produces the same pixels, so capture adapters
//! may rasterize as often as they like.

use crate::ansi::{self, Rgb, Style};
use crate::model::{LineKind, RenderModel};

use super::canvas::Canvas;
use super::font::Glyphs;
use super::theme::Theme;

/// Line height as a multiple of the font size.
const LINE_HEIGHT_FACTOR: f32 = 1.45;

/// Separator drawn between the prompt path and the command.
const PROMPT_SEPARATOR: &str = " $ ";

#[derive(Debug, Clone, Copy)]
struct Pen {
    x: f32,
    /// Top edge of the current text line.
    y: f32,
}

/// Renders the transcript into a [`Canvas`].
pub struct FrameRenderer<G> {
    glyphs: G,
    theme: Theme,
    font_size: f32,
    line_height: f32,
    pad: f32,
    ascent: f32,
    cursor_width: f32,
}

impl<G: Glyphs> FrameRenderer<G> {
    /// Build a renderer for one raster configuration.
    ///
    /// `font_size` and `pad` are already multiplied by the raster scale
    /// factor; the renderer itself is scale-agnostic.
    pub fn new(mut glyphs: G, theme: Theme, font_size: f32, pad: f32) -> Self {
        let ascent = glyphs.ascent();
        let cursor_width = glyphs.advance('M').max(1.0);
        Self {
            glyphs,
            theme,
            font_size,
            line_height: (font_size * LINE_HEIGHT_FACTOR).floor(),
            pad,
            ascent,
            cursor_width,
        }
    }

    /// Draw the whole model, then the cursor block at the write position.
    pub fn draw(&mut self, canvas: &mut Canvas, model: &RenderModel) {
        canvas.vertical_gradient(self.theme.gradient_top, self.theme.gradient_bottom);

        let right = canvas.width() as f32 - self.pad;
        // Stop once the next line would not fit vertically.
        let bottom_limit = canvas.height() as f32 - self.pad - self.line_height;

        let mut pen = Pen {
            x: self.pad,
            y: self.pad,
        };
        let mut cursor = pen;

        let accent = Style {
            fg: Some(self.theme.accent),
            ..Style::default()
        };
        let secondary = Style {
            fg: Some(self.theme.secondary),
            ..Style::default()
        };

        for line in model.lines() {
            if pen.y > bottom_limit {
                break;
            }
            pen.x = self.pad;

            if line.kind == LineKind::Prompt {
                self.draw_run(canvas, &mut pen, right, &line.path, accent);
                self.draw_run(canvas, &mut pen, right, PROMPT_SEPARATOR, secondary);
            }
            for segment in ansi::parse(&line.raw_text) {
                self.draw_run(canvas, &mut pen, right, &segment.text, segment.style);
            }

            cursor = pen;
            pen.y += self.line_height;
        }

        canvas.fill_rect(
            cursor.x.round() as i32,
            cursor.y.round() as i32,
            self.cursor_width.ceil() as u32,
            self.font_size.round() as u32,
            self.theme.cursor,
        );
    }

    /// Draw one styled run, wrapping per character at the right margin.
    fn draw_run(&mut self, canvas: &mut Canvas, pen: &mut Pen, right: f32, text: &str, style: Style) {
        let fg = style.fg.unwrap_or(self.theme.default_fg);
        let underline_h = (self.font_size / 14.0).max(1.0) as u32;

        for ch in text.chars() {
            if ch == '\n' {
                pen.x = self.pad;
                pen.y += self.line_height;
                continue;
            }

            let advance = self.glyphs.advance(ch);
            // Wrap before drawing so no character starts past the margin.
            // A character wider than the whole line still draws (clipped)
            // rather than wrapping forever.
            if pen.x + advance > right && pen.x > self.pad {
                pen.x = self.pad;
                pen.y += self.line_height;
            }

            if let Some(bg) = style.bg {
                canvas.fill_rect(
                    pen.x.floor() as i32,
                    pen.y.round() as i32,
                    advance.ceil() as u32,
                    self.line_height as u32,
                    bg,
                );
            }

            let baseline = pen.y + self.ascent;
            let glyph = self.glyphs.bitmap(ch);
            let gx = (pen.x + glyph.xmin as f32).round() as i32;
            let gy = (baseline - (glyph.height as i32 + glyph.ymin) as f32).round() as i32;
            canvas.blend_coverage(gx, gy, glyph.width, glyph.height, &glyph.coverage, fg);
            if style.bold {
                // Poor man's bold: re-blend one pixel to the right.
                canvas.blend_coverage(gx + 1, gy, glyph.width, glyph.height, &glyph.coverage, fg);
            }

            if style.underline {
                canvas.fill_rect(
                    pen.x.floor() as i32,
                    (baseline + 2.0).round() as i32,
                    advance.ceil() as u32,
                    underline_h,
                    fg,
                );
            }

            pen.x += advance;
        }
    }
}
