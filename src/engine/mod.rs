//! Simulation engine.
//!
//! Walks the step timeline, mutates the render model incrementally, and
//! emits a frame to the active sink after every visible mutation. The walk
//! itself is mode-agnostic: real-time sinks (preview, video) render and
//! then sleep for each hold, while capture sinks (GIF) render and record
//! the hold as frame metadata without elapsing wall-clock time.

use std::cell::{Cell, Ref, RefCell};
use std::time::Duration;

use anyhow::Result;
use tracing::debug;

use crate::ansi::tokenize;
use crate::model::{LineKind, RenderModel, Settings, Step};

/// Result of a [`Simulation::run`] call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunOutcome {
    /// The timeline was walked to completion.
    Completed,
    /// Another run was already in flight; this call was a no-op.
    AlreadyRunning,
}

/// Consumer of emitted frames.
///
/// `frame` is called after every visible mutation of the render model with
/// the duration the resulting image should be held. Real-time sinks sleep
/// for (a scaled version of) the hold; capture sinks record it.
pub trait FrameSink {
    fn frame(&mut self, model: &RenderModel, hold: Duration) -> Result<()>;
}

/// Rest frame emitted before the first step.
pub const INITIAL_REST: Duration = Duration::from_millis(400);
/// Short pause after a line finishes revealing, before the step's hold.
pub const SETTLE: Duration = Duration::from_millis(150);
/// Hold on the final frame after the last step.
pub const FINAL_HOLD: Duration = Duration::from_millis(1200);

/// Clamp range for the interactive time-scale factor.
const TIME_SCALE_MIN: f64 = 0.05;
const TIME_SCALE_MAX: f64 = 5.0;

/// Scale an interactive delay by the (clamped) time-scale factor.
pub fn scale_hold(hold: Duration, time_scale: f64) -> Duration {
    let scale = if time_scale.is_finite() {
        time_scale.clamp(TIME_SCALE_MIN, TIME_SCALE_MAX)
    } else {
        1.0
    };
    hold.mul_f64(scale)
}

/// One scripted session being simulated.
///
/// Owns the render model and the single-flight flag. Exactly one run may be
/// active at a time; a `run` call made while another is in flight (from a
/// sink callback, for instance) returns [`RunOutcome::AlreadyRunning`]
/// without touching the model.
#[derive(Debug, Default)]
pub struct Simulation {
    model: RefCell<RenderModel>,
    running: Cell<bool>,
}

/// Releases the single-flight flag on every exit path, including sink
/// errors propagated with `?`.
struct RunningGuard<'a>(&'a Cell<bool>);

impl Drop for RunningGuard<'_> {
    fn drop(&mut self) {
        self.0.set(false);
    }
}

impl Simulation {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a run is currently in flight.
    pub fn is_running(&self) -> bool {
        self.running.get()
    }

    /// Read access to the render model (for inspection between runs).
    pub fn model(&self) -> Ref<'_, RenderModel> {
        self.model.borrow()
    }

    /// Walk the timeline, emitting frames into `sink`.
    ///
    /// Frames and lines are produced in step order; within a step, reveal
    /// order matches token order. The model is cleared at the start and
    /// holds the full transcript when `Completed` is returned.
    pub fn run(
        &self,
        steps: &[Step],
        settings: &Settings,
        sink: &mut dyn FrameSink,
    ) -> Result<RunOutcome> {
        if self.running.replace(true) {
            debug!("simulation already running, ignoring re-entrant run");
            return Ok(RunOutcome::AlreadyRunning);
        }
        let _guard = RunningGuard(&self.running);

        debug!(steps = steps.len(), "starting simulation run");
        self.model.borrow_mut().clear();
        self.emit(sink, INITIAL_REST)?;

        let typing_interval = settings.typing_interval();

        for step in steps {
            let (kind, path) = if step.is_prompt() {
                (LineKind::Prompt, step.path.trim().to_string())
            } else {
                (LineKind::Out, String::new())
            };
            let line = self.model.borrow_mut().start_line(kind, path);

            if step.typing {
                for token in tokenize(&step.text) {
                    let is_char = token.is_char();
                    self.model.borrow_mut().append_raw(line, &token.value());
                    // Escape tokens join the line silently; only visible
                    // characters advance the clock.
                    if is_char {
                        self.emit(sink, typing_interval)?;
                    }
                }
                self.emit(sink, SETTLE)?;
            } else {
                self.model.borrow_mut().set_raw(line, step.text.clone());
                self.emit(sink, SETTLE)?;
            }

            self.emit(sink, step.hold())?;
        }

        self.emit(sink, FINAL_HOLD)?;
        debug!("simulation run complete");
        Ok(RunOutcome::Completed)
    }

    fn emit(&self, sink: &mut dyn FrameSink, hold: Duration) -> Result<()> {
        let model = self.model.borrow();
        sink.frame(&model, hold)
    }
}
