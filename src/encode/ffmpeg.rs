use std::ffi::OsString;
use std::io::{Read as _, Write as _};
use std::path::{Path, PathBuf};
use std::process::{Child, ChildStdin, Command, Stdio};
use std::thread::JoinHandle;

use crate::encode::pixels::PixelMode;
use crate::encode::sink::{FrameSink, SinkConfig};
use crate::foundation::core::FrameIndex;
use crate::foundation::error::{TweenError, TweenResult};
use crate::render::backend::FrameRGBA;

/// Options for [`FfmpegSink`].
#[derive(Clone, Debug)]
pub struct FfmpegSinkOpts {
    /// Output MP4 path.
    pub out_path: PathBuf,
    /// Replace `out_path` if it exists.
    pub overwrite: bool,
    /// x264 constant rate factor; lower is better quality.
    pub crf: u8,
}

impl FfmpegSinkOpts {
    /// Overwriting MP4 output to `out_path` at CRF 18.
    pub fn new(out_path: impl Into<PathBuf>) -> Self {
        Self {
            out_path: out_path.into(),
            overwrite: true,
            crf: 18,
        }
    }
}

/// MP4 output through the system `ffmpeg`.
///
/// Frames are flattened over the show background (H.264 has no alpha) and streamed to
/// `ffmpeg` as raw RGBA. Odd canvas sizes are padded by one pixel for yuv420p.
#[derive(Debug)]
pub struct FfmpegSink {
    opts: FfmpegSinkOpts,
    encoder: Option<Encoder>,
    cfg: Option<SinkConfig>,
    last_idx: Option<FrameIndex>,
    pushed: u64,
    scratch: Vec<u8>,
}

impl FfmpegSink {
    /// Sink that starts `ffmpeg` on `begin`.
    pub fn new(opts: FfmpegSinkOpts) -> Self {
        Self {
            opts,
            encoder: None,
            cfg: None,
            last_idx: None,
            pushed: 0,
            scratch: Vec::new(),
        }
    }
}

impl FrameSink for FfmpegSink {
    fn begin(&mut self, cfg: SinkConfig) -> TweenResult<()> {
        if cfg.width == 0 || cfg.height == 0 {
            return Err(TweenError::validation(
                "ffmpeg sink width/height must be non-zero",
            ));
        }
        if !self.opts.overwrite && self.opts.out_path.exists() {
            return Err(TweenError::validation(format!(
                "output file '{}' already exists",
                self.opts.out_path.display()
            )));
        }
        ensure_parent_dir(&self.opts.out_path)?;

        let args = encoder_args(&cfg, &self.opts);
        self.encoder = Some(Encoder::spawn(&args)?);
        tracing::debug!(
            out = %self.opts.out_path.display(),
            width = cfg.width,
            height = cfg.height,
            fps = cfg.fps.as_f64(),
            frames = cfg.frames,
            "ffmpeg started"
        );
        self.cfg = Some(cfg);
        self.last_idx = None;
        self.pushed = 0;
        Ok(())
    }

    fn push_frame(&mut self, idx: FrameIndex, frame: &FrameRGBA) -> TweenResult<()> {
        let (Some(cfg), Some(encoder)) = (self.cfg, self.encoder.as_mut()) else {
            return Err(TweenError::encode("ffmpeg sink not started"));
        };
        if self.last_idx.is_some_and(|last| idx.0 <= last.0) {
            return Err(TweenError::encode(
                "ffmpeg sink received out-of-order frame index",
            ));
        }
        if (frame.width, frame.height) != (cfg.width, cfg.height) {
            return Err(TweenError::validation(format!(
                "frame size mismatch: got {}x{}, expected {}x{}",
                frame.width, frame.height, cfg.width, cfg.height
            )));
        }
        self.last_idx = Some(idx);

        PixelMode::Flatten(cfg.background).convert(frame, &mut self.scratch)?;
        encoder.write(&self.scratch)?;
        self.pushed += 1;
        Ok(())
    }

    fn end(&mut self) -> TweenResult<()> {
        let encoder = self
            .encoder
            .take()
            .ok_or_else(|| TweenError::encode("ffmpeg sink not started"))?;
        encoder.finish()?;
        if let Some(cfg) = self.cfg.take()
            && self.pushed != cfg.frames
        {
            tracing::warn!(expected = cfg.frames, pushed = self.pushed, "mp4 ended early");
        }
        tracing::debug!(out = %self.opts.out_path.display(), frames = self.pushed, "mp4 done");
        Ok(())
    }
}

/// Command line for one encode: raw RGBA on stdin, H.264 MP4 out.
pub fn encoder_args(cfg: &SinkConfig, opts: &FfmpegSinkOpts) -> Vec<OsString> {
    let mut args: Vec<OsString> = Vec::new();
    let mut push = |a: &str| args.push(a.into());
    push(if opts.overwrite { "-y" } else { "-n" });
    for a in ["-loglevel", "error", "-f", "rawvideo", "-pix_fmt", "rgba", "-s"] {
        push(a);
    }
    push(format!("{}x{}", cfg.width, cfg.height).as_str());
    // Input rate goes before `-i`.
    push("-r");
    push(format!("{}/{}", cfg.fps.num, cfg.fps.den).as_str());
    for a in ["-i", "pipe:0", "-an", "-c:v", "libx264", "-crf"] {
        push(a);
    }
    push(opts.crf.to_string().as_str());
    if !cfg.width.is_multiple_of(2) || !cfg.height.is_multiple_of(2) {
        push("-vf");
        push("pad=ceil(iw/2)*2:ceil(ih/2)*2");
    }
    if cfg.frames > 0 {
        push("-frames:v");
        push(cfg.frames.to_string().as_str());
    }
    for a in ["-pix_fmt", "yuv420p", "-movflags", "+faststart"] {
        push(a);
    }
    args.push(opts.out_path.clone().into_os_string());
    args
}

/// A running `ffmpeg` child with its stderr collected on a side thread.
#[derive(Debug)]
struct Encoder {
    child: Child,
    stdin: Option<ChildStdin>,
    stderr: Option<JoinHandle<Vec<u8>>>,
}

impl Encoder {
    fn spawn(args: &[OsString]) -> TweenResult<Self> {
        if !is_ffmpeg_on_path() {
            return Err(TweenError::encode(
                "ffmpeg is required for MP4 output, but was not found on PATH",
            ));
        }
        let mut child = Command::new("ffmpeg")
            .args(args)
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| TweenError::encode(format!("failed to spawn ffmpeg: {e}")))?;

        let stdin = child.stdin.take();
        // A full stderr pipe would block ffmpeg while we block on stdin.
        let stderr = child.stderr.take().map(|mut pipe| {
            std::thread::spawn(move || {
                let mut buf = Vec::new();
                let _ = pipe.read_to_end(&mut buf);
                buf
            })
        });
        Ok(Self {
            child,
            stdin,
            stderr,
        })
    }

    fn write(&mut self, rgba: &[u8]) -> TweenResult<()> {
        let stdin = self
            .stdin
            .as_mut()
            .ok_or_else(|| TweenError::encode("ffmpeg stdin is closed"))?;
        stdin
            .write_all(rgba)
            .map_err(|e| TweenError::encode(format!("ffmpeg stopped accepting frames: {e}")))
    }

    fn finish(mut self) -> TweenResult<()> {
        drop(self.stdin.take());
        let status = self
            .child
            .wait()
            .map_err(|e| TweenError::encode(format!("waiting for ffmpeg failed: {e}")))?;
        let log = self
            .stderr
            .take()
            .and_then(|h| h.join().ok())
            .unwrap_or_default();
        if status.success() {
            return Ok(());
        }
        Err(TweenError::encode(format!(
            "ffmpeg exited with {status}: {}",
            String::from_utf8_lossy(&log).trim()
        )))
    }
}

/// Create the parent directory of `path` if needed.
pub fn ensure_parent_dir(path: &Path) -> TweenResult<()> {
    if let Some(parent) = path.parent() {
        use anyhow::Context as _;
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create output directory '{}'", parent.display()))?;
    }
    Ok(())
}

/// Whether `ffmpeg` can be invoked from `PATH`.
pub fn is_ffmpeg_on_path() -> bool {
    Command::new("ffmpeg")
        .arg("-version")
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .is_ok_and(|s| s.success())
}

#[cfg(test)]
#[path = "../../tests/unit/encode/ffmpeg.rs"]
mod tests;
