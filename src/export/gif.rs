//! GIF export adapter.
//!
//! Walks the engine synchronously in capture mode: every emitted frame is
//! rasterized and handed to the encoder immediately, tagged with its
//! display duration. Holds become frame metadata, not duplicated frames,
//! so the walk finishes as fast as the encoder can chew.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::Result;
use image::codecs::gif::{GifEncoder, Repeat};
use image::{Delay, Frame, RgbaImage};
use tracing::{debug, info};

use crate::engine::{FrameSink, Simulation};
use crate::model::{Preset, RenderModel};
use crate::raster::{
    load_font, Canvas, FontGlyphs, FrameRenderer, Geometry, Glyphs, Theme, DEFAULT_CANVAS,
};

use super::{ExportError, ExportReport};

/// Frame sink that encodes each frame into a GIF as it is emitted.
///
/// Generic over the glyph source so tests can drive it without a font.
pub struct GifSink<W: Write, G: Glyphs> {
    renderer: FrameRenderer<G>,
    canvas: Canvas,
    encoder: GifEncoder<W>,
    frames: usize,
}

impl<W: Write, G: Glyphs> GifSink<W, G> {
    /// Wrap a writer in a looping GIF encoder.
    ///
    /// `speed` is the encoder's 1-30 quality/speed knob.
    pub fn new(
        writer: W,
        renderer: FrameRenderer<G>,
        width: u32,
        height: u32,
        speed: u32,
    ) -> Result<Self, ExportError> {
        let mut encoder = GifEncoder::new_with_speed(writer, speed.clamp(1, 30) as i32);
        encoder
            .set_repeat(Repeat::Infinite)
            .map_err(|e| ExportError::Encoder(e.to_string()))?;
        Ok(Self {
            renderer,
            canvas: Canvas::new(width, height),
            encoder,
            frames: 0,
        })
    }

    /// Finish the stream and return the frame count.
    ///
    /// Dropping the encoder writes the GIF trailer into the underlying
    /// writer; the caller still owns that writer and must flush it to
    /// surface any buffered write error.
    pub fn finish(self) -> usize {
        self.frames
    }
}

impl<W: Write, G: Glyphs> FrameSink for GifSink<W, G> {
    fn frame(&mut self, model: &RenderModel, hold: Duration) -> Result<()> {
        self.renderer.draw(&mut self.canvas, model);
        let image = RgbaImage::from_raw(
            self.canvas.width(),
            self.canvas.height(),
            self.canvas.data().to_vec(),
        )
        .ok_or_else(|| ExportError::Encoder("canvas buffer size mismatch".to_string()))?;

        let frame = Frame::from_parts(image, 0, 0, Delay::from_saturating_duration(hold));
        self.encoder
            .encode_frame(frame)
            .map_err(|e| ExportError::Encoder(e.to_string()))?;
        self.frames += 1;
        Ok(())
    }
}

/// Export the preset's timeline as a GIF at `out_path`.
///
/// The font is resolved before the run starts; on encoder or write failure
/// the partial file is removed and the failure is surfaced.
pub fn export_gif(
    preset: &Preset,
    out_path: &Path,
    font_path: Option<&Path>,
) -> Result<ExportReport, ExportError> {
    let settings = &preset.settings;
    let font = load_font(font_path)?;
    let geometry = Geometry::new(settings, DEFAULT_CANVAS.0, DEFAULT_CANVAS.1, settings.gif_scale);
    debug!(
        width = geometry.width,
        height = geometry.height,
        "starting gif export"
    );

    let renderer = FrameRenderer::new(
        FontGlyphs::new(font, geometry.font_size),
        Theme::by_name(&settings.theme),
        geometry.font_size,
        geometry.pad,
    );

    let file = File::create(out_path).map_err(|e| ExportError::io(out_path, e))?;
    let mut writer = BufWriter::new(file);
    let mut sink = GifSink::new(
        &mut writer,
        renderer,
        geometry.width,
        geometry.height,
        settings.gif_quality,
    )?;

    let simulation = Simulation::new();
    if let Err(err) = simulation.run(&preset.steps, settings, &mut sink) {
        // Terminal failure: discard the partial artifact, no retry.
        let _ = std::fs::remove_file(out_path);
        return Err(ExportError::Encoder(err.to_string()));
    }
    let frames = sink.finish();

    // The trailer now sits in the buffer; a failed flush means the file on
    // disk is a corrupt partial, so discard it.
    if let Err(err) = writer.flush() {
        let _ = std::fs::remove_file(out_path);
        return Err(ExportError::io(out_path, err));
    }
    drop(writer);

    let bytes = std::fs::metadata(out_path)
        .map_err(|e| ExportError::io(out_path, e))?
        .len();
    info!(frames, bytes, "gif export complete");
    Ok(ExportReport {
        path: PathBuf::from(out_path),
        bytes,
        frames,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::Simulation;
    use crate::model::{Settings, Step};
    use crate::raster::font::stub::StubGlyphs;
    use std::io::{self, Cursor};

    fn stub_sink(buffer: &mut Vec<u8>) -> GifSink<Cursor<&mut Vec<u8>>, StubGlyphs> {
        let renderer = FrameRenderer::new(StubGlyphs::new(6.0), Theme::midnight(), 6.0, 2.0);
        GifSink::new(Cursor::new(buffer), renderer, 32, 24, 10).unwrap()
    }

    #[test]
    fn capture_walk_encodes_one_frame_per_emit() {
        let mut buffer = Vec::new();
        let mut sink = stub_sink(&mut buffer);

        let simulation = Simulation::new();
        let steps = [Step::command("/home", "ok", 50)];
        simulation
            .run(&steps, &Settings::default(), &mut sink)
            .unwrap();

        // rest + 2 chars + settle + hold + final
        assert_eq!(sink.finish(), 6);
        assert!(!buffer.is_empty());
        // GIF89a magic
        assert_eq!(&buffer[..6], b"GIF89a");
    }

    #[test]
    fn capture_walk_elapses_no_real_time() {
        let mut buffer = Vec::new();
        let mut sink = stub_sink(&mut buffer);

        let simulation = Simulation::new();
        // A 10 minute hold must be recorded as metadata, not slept through.
        let steps = [Step::output("x", 600_000)];
        let started = std::time::Instant::now();
        simulation
            .run(&steps, &Settings::default(), &mut sink)
            .unwrap();
        assert!(started.elapsed() < Duration::from_secs(30));
    }

    /// Device that rejects every write, like a full disk.
    struct RejectingDevice;

    impl Write for RejectingDevice {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::Other, "device full"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn buffered_write_failure_surfaces_at_flush() {
        // Large buffer so nothing reaches the device until the caller
        // flushes, mirroring the export path's BufWriter.
        let mut writer = BufWriter::with_capacity(1 << 22, RejectingDevice);
        {
            let renderer = FrameRenderer::new(StubGlyphs::new(6.0), Theme::midnight(), 6.0, 2.0);
            let mut sink = GifSink::new(&mut writer, renderer, 32, 24, 10).unwrap();

            let simulation = Simulation::new();
            let steps = [Step::command("/home", "ok", 50)];
            simulation
                .run(&steps, &Settings::default(), &mut sink)
                .unwrap();
            assert_eq!(sink.finish(), 6);
        }
        // The trailer and all frame data are still buffered; the failure
        // must come out here, not vanish in a drop.
        assert!(writer.flush().is_err());
    }
}
