//! Integration tests driving the engine through the public API.

use std::time::Duration;

use anyhow::Result;

use super::helpers::{sample_preset_json, temp_preset};
use tgm::ansi;
use tgm::model::{LineKind, RenderModel};
use tgm::{FrameSink, Preset, RunOutcome, Simulation};

/// Sink that snapshots the transcript at every frame.
#[derive(Default)]
struct Transcript {
    frames: Vec<Vec<String>>,
    holds: Vec<Duration>,
}

impl FrameSink for Transcript {
    fn frame(&mut self, model: &RenderModel, hold: Duration) -> Result<()> {
        self.frames
            .push(model.lines().iter().map(|l| l.raw_text.clone()).collect());
        self.holds.push(hold);
        Ok(())
    }
}

#[test]
fn full_timeline_produces_one_line_per_step() {
    let (_dir, path) = temp_preset(sample_preset_json());
    let preset = Preset::load(&path).unwrap();

    let sim = Simulation::new();
    let mut sink = Transcript::default();
    let outcome = sim.run(&preset.steps, &preset.settings, &mut sink).unwrap();

    assert_eq!(outcome, RunOutcome::Completed);
    let model = sim.model();
    assert_eq!(model.lines().len(), 2);
    assert_eq!(model.lines()[0].kind, LineKind::Prompt);
    assert_eq!(model.lines()[0].raw_text, "echo hi");
    assert_eq!(model.lines()[1].kind, LineKind::Out);
    assert_eq!(model.lines()[1].raw_text, "hi");
}

#[test]
fn typed_reveal_is_monotonic_prefix_growth() {
    let (_dir, path) = temp_preset(sample_preset_json());
    let preset = Preset::load(&path).unwrap();

    let sim = Simulation::new();
    let mut sink = Transcript::default();
    sim.run(&preset.steps, &preset.settings, &mut sink).unwrap();

    let final_text = "echo hi";
    let mut last_len = 0;
    for frame in &sink.frames {
        if let Some(first_line) = frame.first() {
            assert!(
                final_text.starts_with(first_line.as_str()),
                "frame text {:?} is not a prefix of {:?}",
                first_line,
                final_text
            );
            assert!(first_line.len() >= last_len, "reveal went backwards");
            last_len = first_line.len();
        }
    }
}

#[test]
fn demo_preset_runs_to_completion() {
    let preset = Preset::default();
    let sim = Simulation::new();
    let mut sink = Transcript::default();
    let outcome = sim.run(&preset.steps, &preset.settings, &mut sink).unwrap();

    assert_eq!(outcome, RunOutcome::Completed);
    assert_eq!(sim.model().lines().len(), preset.steps.len());
    // Every frame's styled projection stays parseable.
    for frame in &sink.frames {
        for text in frame {
            let stripped: String = ansi::parse(text).into_iter().map(|s| s.text).collect();
            assert!(text.len() >= stripped.len());
        }
    }
}
