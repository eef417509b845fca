//! Timeline and document model.
//!
//! A scripted session is an ordered list of [`Step`]s plus [`Settings`],
//! persisted together as a [`Preset`] JSON document. During playback the
//! simulation engine projects the timeline into a [`RenderModel`] - the
//! in-memory transcript of line records the renderers consume.

mod preset;
mod render;
mod settings;
mod step;

pub use preset::{Preset, PresetError, PRESET_VERSION};
pub use render::{LineHandle, LineKind, LineRecord, RenderModel};
pub use settings::Settings;
pub use step::Step;
