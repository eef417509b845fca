//! Persisted preset document.
//!
//! `{version, settings, multiline, selectedIndex, steps}` - forward
//! compatible: missing fields fill from defaults, extra fields are ignored,
//! numeric fields are clamped on load. Non-object input is rejected without
//! touching any existing state.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::settings::Settings;
use super::step::Step;

/// Current document version.
pub const PRESET_VERSION: u32 = 2;

/// Errors raised while loading a preset document.
#[derive(Debug, thiserror::Error)]
pub enum PresetError {
    #[error("Preset must be a JSON object")]
    NotAnObject,

    #[error("Invalid preset JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Failed to read preset file: {0}")]
    Read(#[from] std::io::Error),
}

/// The persisted session document: settings plus the step timeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Preset {
    pub version: u32,
    pub settings: Settings,
    /// Editor hint: whether the step editor shows the multiline text area.
    pub multiline: bool,
    /// Editor hint: which step row is selected. Clamped into the step range.
    pub selected_index: usize,
    pub steps: Vec<Step>,
}

impl Default for Preset {
    fn default() -> Self {
        Self {
            version: PRESET_VERSION,
            settings: Settings::default(),
            multiline: false,
            selected_index: 0,
            steps: demo_steps(),
        }
    }
}

/// The built-in demo timeline.
fn demo_steps() -> Vec<Step> {
    vec![
        Step::command("/home", "cat index.js", 10),
        Step::output("const helper = require('helper.js')", 0),
        Step::output("helper.startValidation()", 0),
        Step::command("/home", "node index.js", 50),
        Step::output("validation started!", 100),
        Step::output("validation completed!", 300),
        Step {
            path: "/home".to_string(),
            text: String::new(),
            typing: false,
            timeout: 50,
        },
        Step {
            path: String::new(),
            text: "git commit --amend".to_string(),
            typing: true,
            timeout: 150,
        },
    ]
}

impl Preset {
    /// Parse a preset from a JSON string.
    ///
    /// Tolerates missing and unknown fields; rejects anything that is not a
    /// JSON object. All numeric fields are clamped before the document is
    /// returned, so a loaded preset is always in a valid state.
    pub fn from_json(raw: &str) -> Result<Self, PresetError> {
        let value: serde_json::Value = serde_json::from_str(raw)?;
        if !value.is_object() {
            return Err(PresetError::NotAnObject);
        }
        let mut preset: Preset = serde_json::from_value(value)?;
        preset.sanitize();
        Ok(preset)
    }

    /// Load a preset from a file path.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, PresetError> {
        let raw = fs::read_to_string(path)?;
        Self::from_json(&raw)
    }

    /// Serialize as pretty-printed JSON.
    pub fn to_json(&self) -> String {
        serde_json::to_string_pretty(self).expect("preset serialization cannot fail")
    }

    /// Write the document to a file path.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), PresetError> {
        fs::write(path, self.to_json())?;
        Ok(())
    }

    /// Clamp all numeric fields into their documented ranges.
    pub fn sanitize(&mut self) {
        self.settings.sanitize();
        for step in &mut self.steps {
            step.sanitize();
        }
        self.selected_index = self
            .selected_index
            .min(self.steps.len().saturating_sub(1));
    }
}
