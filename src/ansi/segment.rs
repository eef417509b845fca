//! SGR segment parser.
//!
//! Scans raw text for `ESC [ params m` sequences and produces maximal runs
//! of characters sharing one style. Unknown SGR codes are ignored so newer
//! renditions degrade to a style no-op instead of an error.

use super::palette::{basic_color, indexed_color, Rgb};
use super::token::match_sgr;

/// Rendition state carried across a line of text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Style {
    /// Foreground color; `None` inherits the theme default.
    pub fg: Option<Rgb>,
    /// Background color; `None` means no highlight.
    pub bg: Option<Rgb>,
    pub bold: bool,
    pub underline: bool,
}

/// A maximal run of characters sharing one style.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment {
    pub text: String,
    pub style: Style,
}

/// Sentinel for parameters that did not parse as a number (numeric overflow).
/// Matches no SGR code, so the parameter is ignored.
const NOT_A_NUMBER: u64 = u64::MAX;

fn parse_param(raw: &str) -> u64 {
    if raw.is_empty() {
        // "ESC[;31m" style holes count as 0 (reset), as does "ESC[m".
        0
    } else {
        raw.parse().unwrap_or(NOT_A_NUMBER)
    }
}

/// Parse raw text into styled segments.
///
/// Invariant: concatenating all segments' text reproduces the input with
/// escapes stripped. Empty text runs are dropped; trailing text after the
/// last escape is kept.
pub fn parse(raw: &str) -> Vec<Segment> {
    let mut segments = Vec::new();
    let mut style = Style::default();
    let mut text = String::new();
    let mut i = 0;

    while i < raw.len() {
        let rest = &raw[i..];
        if let Some((len, params)) = match_sgr(rest) {
            if !text.is_empty() {
                segments.push(Segment {
                    text: std::mem::take(&mut text),
                    style,
                });
            }
            apply_sgr(&mut style, params);
            i += len;
        } else {
            let ch = rest.chars().next().expect("non-empty remainder");
            text.push(ch);
            i += ch.len_utf8();
        }
    }

    if !text.is_empty() {
        segments.push(Segment { text, style });
    }
    segments
}

/// Apply one SGR parameter list to the running style.
fn apply_sgr(style: &mut Style, raw_params: &str) {
    let params: Vec<u64> = if raw_params.is_empty() {
        // Bare "ESC[m" is a reset.
        vec![0]
    } else {
        raw_params.split(';').map(parse_param).collect()
    };

    let mut i = 0;
    while i < params.len() {
        match params[i] {
            0 => *style = Style::default(),
            1 => style.bold = true,
            22 => style.bold = false,
            4 => style.underline = true,
            24 => style.underline = false,
            39 => style.fg = None,
            49 => style.bg = None,
            n @ 30..=37 => set_basic(&mut style.fg, (n - 30) as usize),
            n @ 90..=97 => set_basic(&mut style.fg, (n - 90 + 8) as usize),
            n @ 40..=47 => set_basic(&mut style.bg, (n - 40) as usize),
            n @ 100..=107 => set_basic(&mut style.bg, (n - 100 + 8) as usize),
            n @ (38 | 48) => {
                let consumed = apply_extended(style, n == 38, &params[i + 1..]);
                i += consumed;
            }
            // Unrecognized codes are a forward-compatible no-op.
            _ => {}
        }
        i += 1;
    }
}

fn set_basic(slot: &mut Option<Rgb>, index: usize) {
    // Out-of-table lookups leave the prior value untouched.
    if let Some(color) = basic_color(index) {
        *slot = Some(color);
    }
}

/// Handle the parameters following a 38/48 introducer.
///
/// Returns how many extra parameters were consumed (beyond the introducer
/// itself). A malformed directive consumes its parameter budget but leaves
/// the style unchanged.
fn apply_extended(style: &mut Style, foreground: bool, rest: &[u64]) -> usize {
    match rest.first().copied() {
        // 256-color: 38;5;<n> - consumes 3 parameters total.
        Some(5) => {
            if let Some(&index) = rest.get(1) {
                let color = indexed_color(index.min(255) as u8);
                set_color(style, foreground, color);
            }
            2
        }
        // Direct RGB: 38;2;<r>;<g>;<b> - consumes 5 parameters total.
        Some(2) => {
            let channels = [rest.get(1), rest.get(2), rest.get(3)];
            if channels.iter().all(|c| matches!(c, Some(&v) if v != NOT_A_NUMBER)) {
                let [r, g, b] = channels.map(|c| c.copied().unwrap_or(0).min(255) as u8);
                set_color(style, foreground, Rgb::new(r, g, b));
            }
            4
        }
        // Unknown color space: skip just the introducer.
        _ => 0,
    }
}

fn set_color(style: &mut Style, foreground: bool, color: Rgb) {
    if foreground {
        style.fg = Some(color);
    } else {
        style.bg = Some(color);
    }
}
