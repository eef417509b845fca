//! The render model: an ordered transcript of line records.
//!
//! The model is append-only during one simulation run and cleared at the
//! start of the next. Only the most recently started line is mutable; lines
//! behind it are frozen history.

/// Line flavor: a command typed at a prompt, or plain output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind {
    Prompt,
    Out,
}

/// One line of the simulated transcript.
///
/// `raw_text` accumulates progressively during typed reveal; at any instant
/// it is a prefix of the step's final text, sliced only at escape-token
/// boundaries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineRecord {
    pub kind: LineKind,
    /// Prompt label; empty for output lines.
    pub path: String,
    pub raw_text: String,
}

/// Handle to the line currently being revealed.
///
/// Issued by [`RenderModel::start_line`]; all mutation goes through it, and
/// only the newest handle is valid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineHandle(usize);

/// Ordered sequence of line records for the current run.
#[derive(Debug, Clone, Default)]
pub struct RenderModel {
    lines: Vec<LineRecord>,
}

impl RenderModel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lines(&self) -> &[LineRecord] {
        &self.lines
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Reset to empty at the start of a run.
    pub fn clear(&mut self) {
        self.lines.clear();
    }

    /// Append a new empty line record and return its handle.
    pub fn start_line(&mut self, kind: LineKind, path: impl Into<String>) -> LineHandle {
        self.lines.push(LineRecord {
            kind,
            path: path.into(),
            raw_text: String::new(),
        });
        LineHandle(self.lines.len() - 1)
    }

    /// Extend the line's raw text token-by-token (typed reveal).
    ///
    /// Panics if the handle does not refer to the newest line; earlier lines
    /// are immutable.
    pub fn append_raw(&mut self, handle: LineHandle, chunk: &str) {
        self.line_mut(handle).raw_text.push_str(chunk);
    }

    /// Replace the line's raw text in one mutation (instant reveal).
    pub fn set_raw(&mut self, handle: LineHandle, text: impl Into<String>) {
        self.line_mut(handle).raw_text = text.into();
    }

    fn line_mut(&mut self, handle: LineHandle) -> &mut LineRecord {
        assert_eq!(
            handle.0 + 1,
            self.lines.len(),
            "only the newest line is mutable"
        );
        &mut self.lines[handle.0]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn start_line_appends_empty_record() {
        let mut model = RenderModel::new();
        model.start_line(LineKind::Prompt, "/home");
        assert_eq!(model.lines().len(), 1);
        assert_eq!(model.lines()[0].path, "/home");
        assert_eq!(model.lines()[0].raw_text, "");
    }

    #[test]
    fn append_raw_accumulates() {
        let mut model = RenderModel::new();
        let line = model.start_line(LineKind::Out, "");
        model.append_raw(line, "o");
        model.append_raw(line, "k");
        assert_eq!(model.lines()[0].raw_text, "ok");
    }

    #[test]
    fn set_raw_replaces() {
        let mut model = RenderModel::new();
        let line = model.start_line(LineKind::Out, "");
        model.append_raw(line, "partial");
        model.set_raw(line, "final text");
        assert_eq!(model.lines()[0].raw_text, "final text");
    }

    #[test]
    fn clear_empties_model() {
        let mut model = RenderModel::new();
        model.start_line(LineKind::Out, "");
        model.clear();
        assert!(model.is_empty());
    }

    #[test]
    #[should_panic(expected = "only the newest line is mutable")]
    fn stale_handle_panics() {
        let mut model = RenderModel::new();
        let old = model.start_line(LineKind::Out, "");
        model.start_line(LineKind::Out, "");
        model.append_raw(old, "x");
    }
}
