//! Video export adapter.
//!
//! Spawns ffmpeg as a sidecar process and pipes raw RGBA frames to its
//! stdin at a fixed sample rate. The sampler thread starts *before* the
//! engine runs in real-time mode, mirrors the canvas for the whole run,
//! and stops a short settle delay after the engine finishes so the last
//! frame is flushed.

use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::process::{Child, ChildStdin, Command, Stdio};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use anyhow::{anyhow, bail, Context, Result};
use tracing::{debug, info};

use crate::engine::{scale_hold, FrameSink, Simulation};
use crate::model::{Preset, RenderModel};
use crate::raster::{
    load_font, Canvas, FontGlyphs, FrameRenderer, Geometry, Glyphs, Theme, DEFAULT_CANVAS,
};

use super::{ExportError, ExportReport};

/// Extra real time captured after the engine finishes.
const CAPTURE_SETTLE: Duration = Duration::from_millis(300);

/// One container/codec pairing ffmpeg may support.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CodecChoice {
    pub encoder: &'static str,
    pub container: &'static str,
    pub pix_fmt: &'static str,
}

/// Preference-ordered codec list; the first one the local ffmpeg supports
/// wins.
pub const CODEC_PREFERENCES: &[CodecChoice] = &[
    CodecChoice {
        encoder: "libx264",
        container: "mp4",
        pix_fmt: "yuv420p",
    },
    CodecChoice {
        encoder: "libvpx-vp9",
        container: "webm",
        pix_fmt: "yuv420p",
    },
    CodecChoice {
        encoder: "mpeg4",
        container: "mp4",
        pix_fmt: "yuv420p",
    },
];

/// Pick the first preferred codec present in `ffmpeg -encoders` output.
fn pick_codec(encoder_listing: &str) -> Option<CodecChoice> {
    CODEC_PREFERENCES
        .iter()
        .copied()
        .find(|choice| encoder_listing.contains(&format!(" {} ", choice.encoder)))
}

/// Probe the local ffmpeg for a usable codec.
///
/// This is the capability check for video export: it runs before the
/// simulation starts, so a missing ffmpeg never produces a partial file.
pub fn negotiate_codec() -> Result<CodecChoice, ExportError> {
    let output = Command::new("ffmpeg")
        .args(["-hide_banner", "-encoders"])
        .output()
        .map_err(|error| {
            if error.kind() == ErrorKind::NotFound {
                ExportError::FfmpegMissing
            } else {
                ExportError::Encoder(format!("failed to probe ffmpeg: {error}"))
            }
        })?;
    let listing = String::from_utf8_lossy(&output.stdout);
    pick_codec(&listing).ok_or_else(|| ExportError::NoCodec {
        tried: CODEC_PREFERENCES
            .iter()
            .map(|c| c.encoder)
            .collect::<Vec<_>>()
            .join(", "),
    })
}

/// ffmpeg sidecar consuming raw RGBA frames on stdin.
struct FfmpegPipe {
    child: Child,
    stdin: ChildStdin,
}

impl FfmpegPipe {
    fn spawn(
        out_path: &Path,
        width: u32,
        height: u32,
        fps: u32,
        bitrate_mbps: u32,
        codec: CodecChoice,
    ) -> Result<Self, ExportError> {
        let mut command = Command::new("ffmpeg");
        command
            .arg("-hide_banner")
            .arg("-loglevel")
            .arg("error")
            .arg("-y")
            .arg("-f")
            .arg("rawvideo")
            .arg("-pix_fmt")
            .arg("rgba")
            .arg("-s:v")
            .arg(format!("{}x{}", width, height))
            .arg("-r")
            .arg(fps.to_string())
            .arg("-i")
            .arg("-")
            .arg("-an")
            .arg("-c:v")
            .arg(codec.encoder)
            .arg("-pix_fmt")
            .arg(codec.pix_fmt)
            .arg("-b:v")
            .arg(format!("{}M", bitrate_mbps))
            .arg(out_path)
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::inherit());

        let mut child = command.spawn().map_err(|error| {
            if error.kind() == ErrorKind::NotFound {
                ExportError::FfmpegMissing
            } else {
                ExportError::Encoder(format!("failed to spawn ffmpeg: {error}"))
            }
        })?;
        let stdin = child
            .stdin
            .take()
            .ok_or_else(|| ExportError::Encoder("failed to capture ffmpeg stdin".to_string()))?;
        Ok(Self { child, stdin })
    }

    fn write_frame(&mut self, rgba: &[u8]) -> Result<()> {
        self.stdin
            .write_all(rgba)
            .context("failed to write frame to ffmpeg stdin")
    }

    fn finish(mut self) -> Result<()> {
        self.stdin.flush().context("failed to flush ffmpeg stdin")?;
        drop(self.stdin);
        let status = self
            .child
            .wait()
            .context("failed waiting for ffmpeg process")?;
        if !status.success() {
            bail!("ffmpeg exited with status {status}");
        }
        Ok(())
    }
}

/// Real-time frame sink: renders into the shared canvas, then lets the
/// scaled hold actually elapse while the sampler thread keeps reading.
struct VideoSink<G: Glyphs> {
    renderer: FrameRenderer<G>,
    canvas: Arc<Mutex<Canvas>>,
    time_scale: f64,
    frames: usize,
}

impl<G: Glyphs> FrameSink for VideoSink<G> {
    fn frame(&mut self, model: &RenderModel, hold: Duration) -> Result<()> {
        {
            let mut canvas = self
                .canvas
                .lock()
                .map_err(|_| anyhow!("canvas mutex poisoned"))?;
            self.renderer.draw(&mut canvas, model);
        }
        self.frames += 1;
        thread::sleep(scale_hold(hold, self.time_scale));
        Ok(())
    }
}

/// Fixed-rate sampler: mirrors the shared canvas into the ffmpeg pipe until
/// told to stop, then finalizes the pipe.
fn spawn_sampler(
    canvas: Arc<Mutex<Canvas>>,
    mut pipe: FfmpegPipe,
    fps: u32,
    stop: Arc<AtomicBool>,
) -> Result<JoinHandle<Result<()>>, ExportError> {
    let interval = Duration::from_secs_f64(1.0 / fps.max(1) as f64);
    thread::Builder::new()
        .name("tgm-video-sampler".to_string())
        .spawn(move || -> Result<()> {
            loop {
                let frame = {
                    let canvas = canvas
                        .lock()
                        .map_err(|_| anyhow!("canvas mutex poisoned"))?;
                    canvas.data().to_vec()
                };
                pipe.write_frame(&frame)?;
                if stop.load(Ordering::Relaxed) {
                    break;
                }
                thread::sleep(interval);
            }
            pipe.finish()
        })
        .map_err(|e| ExportError::Encoder(format!("failed to spawn sampler thread: {e}")))
}

/// Export the preset's timeline as a video at `out_path`.
///
/// Runs the engine in real-time mode: every wall-clock delay actually
/// elapses while the sampler feeds ffmpeg at `video_fps`. The caller
/// negotiates `codec` first (it also determines the container for the
/// default file name), so the ffmpeg probe runs once per export.
pub fn export_video(
    preset: &Preset,
    out_path: &Path,
    font_path: Option<&Path>,
    codec: CodecChoice,
) -> Result<ExportReport, ExportError> {
    let settings = &preset.settings;

    let font = load_font(font_path)?;
    debug!(encoder = codec.encoder, container = codec.container, "starting video export");

    let geometry = Geometry::new(settings, DEFAULT_CANVAS.0, DEFAULT_CANVAS.1, 1);
    let renderer = FrameRenderer::new(
        FontGlyphs::new(font, geometry.font_size),
        Theme::by_name(&settings.theme),
        geometry.font_size,
        geometry.pad,
    );

    let canvas = Arc::new(Mutex::new(Canvas::new(geometry.width, geometry.height)));
    let pipe = FfmpegPipe::spawn(
        out_path,
        geometry.width,
        geometry.height,
        settings.video_fps,
        settings.video_bitrate_mbps,
        codec,
    )?;

    // Capture starts before the run so the opening rest frame is sampled.
    let stop = Arc::new(AtomicBool::new(false));
    let sampler = spawn_sampler(
        Arc::clone(&canvas),
        pipe,
        settings.video_fps,
        Arc::clone(&stop),
    )?;

    let mut sink = VideoSink {
        renderer,
        canvas,
        time_scale: settings.video_time_scale,
        frames: 0,
    };
    let simulation = Simulation::new();
    let run_result = simulation.run(&preset.steps, settings, &mut sink);

    // Let the sampler pick up the final frame, then stop and finalize.
    thread::sleep(CAPTURE_SETTLE);
    stop.store(true, Ordering::Relaxed);
    let sampler_result = sampler
        .join()
        .unwrap_or_else(|_| Err(anyhow!("sampler thread panicked")));

    if let Err(err) = run_result.and(sampler_result) {
        let _ = std::fs::remove_file(out_path);
        return Err(ExportError::Encoder(err.to_string()));
    }

    let bytes = std::fs::metadata(out_path)
        .map_err(|e| ExportError::io(out_path, e))?
        .len();
    info!(frames = sink.frames, bytes, "video export complete");
    Ok(ExportReport {
        path: PathBuf::from(out_path),
        bytes,
        frames: sink.frames,
    })
}
