use std::path::{Path, PathBuf};

use crate::encode::pixels::PixelMode;
use crate::encode::sink::{FrameSink, SinkConfig};
use crate::foundation::core::FrameIndex;
use crate::foundation::error::{TweenError, TweenResult};
use crate::render::backend::FrameRGBA;

/// Writes each frame as `frame_NNNNN.png` into a directory.
///
/// Frames keep their alpha unless [`opaque`](Self::opaque) is set, in which case they are
/// flattened over the show background.
#[derive(Debug)]
pub struct PngSequenceSink {
    dir: PathBuf,
    opaque: bool,
    cfg: Option<SinkConfig>,
    last_idx: Option<FrameIndex>,
    written: Vec<PathBuf>,
    scratch: Vec<u8>,
}

impl PngSequenceSink {
    /// Sink writing into `dir`, created on `begin` if missing.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            opaque: false,
            cfg: None,
            last_idx: None,
            written: Vec::new(),
            scratch: Vec::new(),
        }
    }

    /// Flatten frames over the background instead of keeping alpha.
    pub fn opaque(mut self, opaque: bool) -> Self {
        self.opaque = opaque;
        self
    }

    /// Output directory.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Files written so far, in frame order.
    pub fn written(&self) -> &[PathBuf] {
        &self.written
    }

    /// File name used for frame `idx`.
    pub fn file_name(idx: FrameIndex) -> String {
        format!("frame_{:05}.png", idx.0)
    }
}

impl FrameSink for PngSequenceSink {
    fn begin(&mut self, cfg: SinkConfig) -> TweenResult<()> {
        if cfg.width == 0 || cfg.height == 0 {
            return Err(TweenError::validation(
                "png sink width/height must be non-zero",
            ));
        }
        std::fs::create_dir_all(&self.dir).map_err(|e| {
            TweenError::encode(format!(
                "failed to create output directory '{}': {e}",
                self.dir.display()
            ))
        })?;
        self.cfg = Some(cfg);
        self.last_idx = None;
        self.written.clear();
        Ok(())
    }

    fn push_frame(&mut self, idx: FrameIndex, frame: &FrameRGBA) -> TweenResult<()> {
        let cfg = self
            .cfg
            .ok_or_else(|| TweenError::encode("png sink not started"))?;
        if self.last_idx.is_some_and(|last| idx.0 <= last.0) {
            return Err(TweenError::encode(
                "png sink received out-of-order frame index",
            ));
        }
        if frame.width != cfg.width || frame.height != cfg.height {
            return Err(TweenError::validation(format!(
                "frame size mismatch: got {}x{}, expected {}x{}",
                frame.width, frame.height, cfg.width, cfg.height
            )));
        }
        self.last_idx = Some(idx);

        let mode = if self.opaque {
            PixelMode::Flatten(cfg.background)
        } else {
            PixelMode::Straight
        };
        mode.convert(frame, &mut self.scratch)?;
        let path = self.dir.join(Self::file_name(idx));
        save_rgba8(&path, &self.scratch, frame.width, frame.height)?;
        tracing::trace!(path = %path.display(), "frame written");
        self.written.push(path);
        Ok(())
    }

    fn end(&mut self) -> TweenResult<()> {
        if let Some(cfg) = self.cfg.take()
            && self.written.len() as u64 != cfg.frames
        {
            tracing::warn!(
                expected = cfg.frames,
                written = self.written.len(),
                "png sequence ended early"
            );
        }
        tracing::debug!(frames = self.written.len(), dir = %self.dir.display(), "png sequence done");
        Ok(())
    }
}

/// Write a frame as a straight-alpha PNG.
pub fn write_png(path: &Path, frame: &FrameRGBA) -> TweenResult<()> {
    let mut rgba = Vec::new();
    PixelMode::Straight.convert(frame, &mut rgba)?;
    save_rgba8(path, &rgba, frame.width, frame.height)
}

fn save_rgba8(path: &Path, rgba: &[u8], width: u32, height: u32) -> TweenResult<()> {
    image::save_buffer_with_format(
        path,
        rgba,
        width,
        height,
        image::ColorType::Rgba8,
        image::ImageFormat::Png,
    )
    .map_err(|e| TweenError::encode(format!("failed to write '{}': {e}", path.display())))
}

#[cfg(test)]
#[path = "../../tests/unit/encode/png.rs"]
mod tests;
