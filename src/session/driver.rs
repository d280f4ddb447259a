use std::collections::VecDeque;

use crate::animation::state::TickOutcome;
use crate::assets::store::AssetStore;
use crate::encode::sink::{FrameSink, SinkConfig};
use crate::foundation::core::{Canvas, Fps, FrameIndex, FrameRange, Rgba8};
use crate::foundation::error::{TweenError, TweenResult};
use crate::render::backend::{FrameRGBA, RasterSurface};
use crate::render::surface::Surface;
use crate::scene::config::{PointerEvent, ShowConfig};
use crate::show::{Animation, PointerResponse, build_animation};

/// What one [`Session::step`] did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StepReport {
    /// Frame that was drawn.
    pub frame: FrameIndex,
    /// Clicks delivered before drawing.
    pub clicks: u32,
    /// Clicks that started the loop.
    pub hits: u32,
    /// Tick result; `Idle` when the loop was inactive and the frame was only redrawn.
    pub outcome: TickOutcome,
}

/// Counters accumulated over a session.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RunStats {
    /// Frames stepped.
    pub frames: u64,
    /// Frames on which the loop ticked.
    pub ticks: u64,
    /// Wrap-around phase flips.
    pub flips: u64,
    /// Held-bound settles.
    pub settles: u64,
    /// Clicks that started the loop.
    pub hits: u64,
}

impl RunStats {
    fn record(&mut self, report: &StepReport) {
        self.frames += 1;
        self.hits += u64::from(report.hits);
        match report.outcome {
            TickOutcome::Idle => {}
            TickOutcome::Advanced => self.ticks += 1,
            TickOutcome::Flipped => {
                self.ticks += 1;
                self.flips += 1;
            }
            TickOutcome::Settled => {
                self.ticks += 1;
                self.settles += 1;
            }
        }
    }
}

/// Frame scheduler for one animation.
///
/// Each [`step`](Self::step) stands for one display refresh: pending clicks due on this frame are
/// delivered, then the animation ticks if it is active, otherwise it is only redrawn.
pub struct Session {
    canvas: Canvas,
    fps: Fps,
    background: Rgba8,
    animation: Box<dyn Animation>,
    pending: VecDeque<PointerEvent>,
    next_frame: u64,
    stats: RunStats,
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("canvas", &self.canvas)
            .field("fps", &self.fps)
            .field("background", &self.background)
            .field("kind", &self.animation.kind_name())
            .field("pending", &self.pending.len())
            .field("next_frame", &self.next_frame)
            .field("stats", &self.stats)
            .finish()
    }
}

impl Session {
    /// Build the configured animation and queue its scripted clicks.
    #[tracing::instrument(skip_all, fields(kind = config.show.kind_name()))]
    pub fn new(config: &ShowConfig, assets: &AssetStore) -> TweenResult<Self> {
        let animation = build_animation(config, assets)?;
        let mut session = Self::from_animation(config.canvas, config.fps, animation)
            .with_background(config.background);
        for click in &config.clicks {
            session.push_click(*click);
        }
        Ok(session)
    }

    /// Wrap an already built animation with no scripted input.
    pub fn from_animation(canvas: Canvas, fps: Fps, animation: Box<dyn Animation>) -> Self {
        Self {
            canvas,
            fps,
            background: Rgba8::TRANSPARENT,
            animation,
            pending: VecDeque::new(),
            next_frame: 0,
            stats: RunStats::default(),
        }
    }

    /// Background colour handed to sinks that flatten alpha.
    pub fn with_background(mut self, background: Rgba8) -> Self {
        self.background = background;
        self
    }

    /// Canvas size.
    pub fn canvas(&self) -> Canvas {
        self.canvas
    }

    /// The driven animation.
    pub fn animation(&self) -> &dyn Animation {
        self.animation.as_ref()
    }

    /// Frame the next step will draw.
    pub fn next_frame(&self) -> FrameIndex {
        FrameIndex(self.next_frame)
    }

    /// Counters so far.
    pub fn stats(&self) -> RunStats {
        self.stats
    }

    /// Clicks not yet delivered.
    pub fn pending_clicks(&self) -> usize {
        self.pending.len()
    }

    /// Queue a click. Clicks scheduled for a frame already stepped arrive on the next step;
    /// clicks on the same frame keep their insertion order.
    pub fn push_click(&mut self, click: PointerEvent) {
        let at = self.pending.partition_point(|p| p.frame <= click.frame);
        self.pending.insert(at, click);
    }

    /// Draw one frame into `surface`.
    pub fn step(&mut self, surface: &mut dyn Surface) -> StepReport {
        let frame = self.next_frame;
        let mut clicks = 0;
        let mut hits = 0;
        while let Some(click) = self.pending.front().copied() {
            if click.frame > frame {
                break;
            }
            self.pending.pop_front();
            clicks += 1;
            if self.animation.pointer(click.position) == PointerResponse::Started {
                hits += 1;
            }
        }

        let outcome = if self.animation.is_active() {
            self.animation.frame(surface)
        } else {
            self.animation.render(surface);
            TickOutcome::Idle
        };

        let report = StepReport {
            frame: FrameIndex(frame),
            clicks,
            hits,
            outcome,
        };
        self.stats.record(&report);
        self.next_frame += 1;
        report
    }

    /// Step through every frame before `frame` without reading pixels back.
    pub fn skip_to(&mut self, frame: FrameIndex, surface: &mut dyn Surface) -> TweenResult<()> {
        if frame.0 < self.next_frame {
            return Err(TweenError::validation(format!(
                "cannot rewind session to frame {} (next frame is {})",
                frame.0, self.next_frame
            )));
        }
        while self.next_frame < frame.0 {
            self.step(surface);
        }
        Ok(())
    }

    /// Step up to and including `frame` and return its pixels.
    #[tracing::instrument(skip(self, surface), fields(frame = frame.0))]
    pub fn render_frame<S: RasterSurface>(
        &mut self,
        frame: FrameIndex,
        surface: &mut S,
    ) -> TweenResult<FrameRGBA> {
        self.skip_to(frame, surface)?;
        self.step(surface);
        surface.readback()
    }

    /// Render `range` into `sink`, in strictly increasing frame order.
    ///
    /// Frames before `range.start` are stepped but not read back, since every frame depends on
    /// the ones before it.
    #[tracing::instrument(skip(self, surface, sink), fields(start = range.start.0, end = range.end.0))]
    pub fn render_range<S: RasterSurface>(
        &mut self,
        range: FrameRange,
        surface: &mut S,
        sink: &mut dyn FrameSink,
    ) -> TweenResult<RunStats> {
        if range.is_empty() {
            return Err(TweenError::validation(
                "render_range range must be non-empty",
            ));
        }
        self.skip_to(range.start, surface)?;

        let before = self.stats;
        sink.begin(SinkConfig {
            width: self.canvas.width,
            height: self.canvas.height,
            fps: self.fps,
            background: self.background,
            frames: range.len_frames(),
        })?;
        for f in range.start.0..range.end.0 {
            let report = self.step(surface);
            debug_assert_eq!(report.frame.0, f);
            let frame = surface.readback()?;
            sink.push_frame(FrameIndex(f), &frame)?;
        }
        sink.end()?;

        let after = self.stats;
        let stats = RunStats {
            frames: after.frames - before.frames,
            ticks: after.ticks - before.ticks,
            flips: after.flips - before.flips,
            settles: after.settles - before.settles,
            hits: after.hits - before.hits,
        };
        tracing::info!(
            frames = stats.frames,
            ticks = stats.ticks,
            flips = stats.flips,
            settles = stats.settles,
            hits = stats.hits,
            "range rendered"
        );
        Ok(stats)
    }

    /// Render the first `frames` frames into `sink`.
    pub fn run<S: RasterSurface>(
        &mut self,
        frames: u64,
        surface: &mut S,
        sink: &mut dyn FrameSink,
    ) -> TweenResult<RunStats> {
        self.render_range(FrameRange::first(frames), surface, sink)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/session/driver.rs"]
mod tests;
