//! Escape-aware tokenizer.
//!
//! Splits raw text into atomic reveal units: one visible character or one
//! whole SGR escape sequence. The typing animation advances one token per
//! tick, so an escape sequence is never split across two displayed frames.

/// One atomic reveal unit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    /// A single visible character (including newlines).
    Char(char),
    /// A complete SGR escape sequence, e.g. `"\x1b[31m"`.
    Esc(String),
}

impl Token {
    /// The raw text this token contributes to the line.
    pub fn value(&self) -> String {
        match self {
            Token::Char(c) => c.to_string(),
            Token::Esc(seq) => seq.clone(),
        }
    }

    /// Whether this token is a visible character (drives a typing tick).
    pub fn is_char(&self) -> bool {
        matches!(self, Token::Char(_))
    }
}

/// Match a complete SGR sequence (`ESC [ digits/semicolons m`) at the start
/// of `rest`.
///
/// Returns the byte length of the whole sequence and the parameter slice
/// between `[` and `m`. Anything else - including an unterminated escape -
/// returns `None` and the caller falls back to literal characters.
pub(super) fn match_sgr(rest: &str) -> Option<(usize, &str)> {
    let after_intro = rest.strip_prefix("\x1b[")?;
    let params_len = after_intro
        .find(|c: char| !c.is_ascii_digit() && c != ';')
        .unwrap_or(after_intro.len());
    if after_intro[params_len..].starts_with('m') {
        // ESC + '[' + params + 'm'
        Some((2 + params_len + 1, &after_intro[..params_len]))
    } else {
        None
    }
}

/// Split raw text into reveal tokens.
///
/// Concatenating every token's value reconstructs the input exactly.
pub fn tokenize(raw: &str) -> Vec<Token> {
    let mut tokens = Vec::new();
    let mut i = 0;
    while i < raw.len() {
        let rest = &raw[i..];
        if let Some((len, _)) = match_sgr(rest) {
            tokens.push(Token::Esc(rest[..len].to_string()));
            i += len;
        } else {
            // Safe: i is always on a char boundary.
            let ch = rest.chars().next().expect("non-empty remainder");
            tokens.push(Token::Char(ch));
            i += ch.len_utf8();
        }
    }
    tokens
}
