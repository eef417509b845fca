//! One timeline entry.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Maximum hold after a step, in milliseconds (10 minutes).
pub(crate) const MAX_TIMEOUT_MS: i64 = 600_000;

/// One entry in the scripted session timeline.
///
/// Steps are ordered; order is playback order. The simulation engine reads
/// steps but never mutates them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Step {
    /// Prompt label. Empty (after trimming) means this is an output line
    /// rather than a command line.
    #[serde(default)]
    pub path: String,
    /// Raw line text; may contain SGR escapes and newlines.
    #[serde(default)]
    pub text: String,
    /// Reveal character-by-character instead of instantaneously.
    #[serde(default)]
    pub typing: bool,
    /// Milliseconds to hold after the step completes. Clamped to
    /// 0..=600_000 on load; stored signed so out-of-range documents
    /// round-trip through the clamp instead of failing to parse.
    #[serde(default)]
    pub timeout: i64,
}

impl Step {
    /// A command step typed at a prompt.
    pub fn command(path: impl Into<String>, text: impl Into<String>, timeout: i64) -> Self {
        Self {
            path: path.into(),
            text: text.into(),
            typing: true,
            timeout,
        }
    }

    /// An instantly-revealed output step.
    pub fn output(text: impl Into<String>, timeout: i64) -> Self {
        Self {
            path: String::new(),
            text: text.into(),
            typing: false,
            timeout,
        }
    }

    /// Whether this step renders as a prompt line.
    pub fn is_prompt(&self) -> bool {
        !self.path.trim().is_empty()
    }

    /// The post-step hold, clamped to the valid range.
    pub fn hold(&self) -> Duration {
        Duration::from_millis(self.timeout.clamp(0, MAX_TIMEOUT_MS) as u64)
    }

    /// Clamp the persisted timeout in place.
    pub(crate) fn sanitize(&mut self) {
        self.timeout = self.timeout.clamp(0, MAX_TIMEOUT_MS);
    }
}
