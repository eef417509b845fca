//! Integration tests for preset loading and clamping.

use super::helpers::{sample_preset_json, temp_preset};
use tgm::model::PresetError;
use tgm::Preset;

#[test]
fn loads_sample_preset_from_disk() {
    let (_dir, path) = temp_preset(sample_preset_json());
    let preset = Preset::load(&path).unwrap();
    assert_eq!(preset.steps.len(), 2);
    assert_eq!(preset.settings.typing_ms_per_char, 5);
    assert!(preset.steps[0].is_prompt());
    assert!(!preset.steps[1].is_prompt());
}

#[test]
fn load_clamps_out_of_range_fields() {
    let (_dir, path) = temp_preset(
        r#"{
  "settings": { "typingMsPerChar": 100000, "videoTimeScale": 10 },
  "steps": [ { "text": "x", "timeout": -5 } ]
}"#,
    );
    let preset = Preset::load(&path).unwrap();
    assert_eq!(preset.settings.typing_ms_per_char, 200);
    assert_eq!(preset.settings.video_time_scale, 2.0);
    assert_eq!(preset.steps[0].timeout, 0);
}

#[test]
fn non_object_document_is_rejected() {
    let (_dir, path) = temp_preset("[1, 2, 3]");
    assert!(matches!(
        Preset::load(&path),
        Err(PresetError::NotAnObject)
    ));
}

#[test]
fn missing_file_is_a_read_error() {
    assert!(matches!(
        Preset::load("/nonexistent/nowhere/preset.json"),
        Err(PresetError::Read(_))
    ));
}

#[test]
fn failed_load_leaves_existing_preset_untouched() {
    // The loader returns a fresh document or an error; a failure must not
    // corrupt a previously-loaded preset.
    let (_dir, path) = temp_preset(sample_preset_json());
    let good = Preset::load(&path).unwrap();
    let before = good.clone();

    let (_dir2, bad_path) = temp_preset("{broken");
    assert!(Preset::load(&bad_path).is_err());
    assert_eq!(good, before);
}
