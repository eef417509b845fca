//! SGR-aware text handling.
//!
//! Converts raw text containing ANSI SGR escape sequences (`ESC [ ... m`)
//! into styled segments, and splits raw text into atomic reveal tokens so
//! typing animation never emits a partial escape sequence.
//!
//! This is deliberately not a terminal emulator: cursor movement, scrollback
//! and non-SGR control sequences are out of scope. Anything that is not a
//! well-formed SGR sequence passes through as literal text.

mod palette;
mod segment;
mod token;

pub use palette::{basic_color, indexed_color, Rgb};
pub use segment::{parse, Segment, Style};
pub use token::{tokenize, Token};
