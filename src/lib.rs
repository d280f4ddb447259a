//! tweenloop drives small frame-stepped interpolation loops and rasterizes them on the CPU.
//!
//! Every show is built from the same pattern: a bounded progress value advanced by a fixed step
//! once per display frame, a two-valued phase flipped when the value crosses its bound, and a
//! scene rendered as a function of both.
//!
//! # Pipeline overview
//!
//! 1. **Configure**: load a [`ShowConfig`] (JSON) or pick a built-in preset.
//! 2. **Prepare**: decode image assets up front into an [`AssetStore`].
//! 3. **Drive**: a [`Session`] delivers scripted pointer input, ticks the [`Animation`] and draws
//!    it into a [`Surface`] once per frame.
//! 4. **Emit**: the [`CpuSurface`] reads back premultiplied RGBA8 frames into a [`FrameSink`]
//!    (PNG sequence, in-memory, or MP4 through the system `ffmpeg`).
//!
//! Design constraints:
//!
//! - **No unsafe**: `unsafe` is forbidden in this crate.
//! - **Deterministic**: node layouts come from a seeded generator, so a config renders the same
//!   frames on every run.
//! - **No IO in surfaces**: assets are loaded before the first frame is drawn.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod animation;
mod assets;
mod foundation;
mod scene;
mod session;

/// Frame sinks (PNG sequence, in-memory, `ffmpeg`).
pub mod encode;
/// Drawing surfaces, the camera, and element drawing helpers.
pub mod render;
/// Loop variants and built-in presets.
pub mod show;

pub use crate::animation::ease::Ease;
pub use crate::animation::progress::{BOUND_EPSILON, BoundPolicy, Crossing, Direction, Progress};
pub use crate::animation::state::{AnimationState, Phase, TickOutcome, blend_weights};
pub use crate::assets::decode::decode_image;
pub use crate::assets::store::{AssetStore, PreparedImage};
pub use crate::foundation::core::{
    Affine, BezPath, Canvas, Fps, FrameIndex, FrameRange, Point, Rect, Rgba8, TextAnchor, Vec2,
};
pub use crate::foundation::error::{TweenError, TweenResult};
pub use crate::scene::config::{
    CrossFadeSpec, DrillDownSpec, MissingAssetPolicy, PointerEvent, ShowConfig, ShowSpec,
    ZoomToggleSpec,
};
pub use crate::scene::graph::{
    Edge, EdgeLayout, EdgeStyle, Graph, Node, NodeStyle, generate, generate_graph, hit_test,
    spawn_region,
};
pub use crate::scene::model::{Element, Shape};
pub use crate::session::driver::{RunStats, Session, StepReport};

pub use crate::encode::ffmpeg::{FfmpegSink, FfmpegSinkOpts, encoder_args};
pub use crate::encode::pixels::PixelMode;
pub use crate::encode::png::{PngSequenceSink, write_png};
pub use crate::encode::sink::{FrameSink, InMemorySink, SinkConfig};
pub use crate::render::backend::{FrameRGBA, RasterSurface};
pub use crate::render::camera::Camera;
pub use crate::render::cpu::CpuSurface;
pub use crate::render::record::{DrawCommand, DrawKind, RecordingSurface};
pub use crate::render::surface::{StateStack, Surface, SurfaceState};
pub use crate::show::presets::{PRESET_NAMES, preset};
pub use crate::show::{
    Animation, CrossFade, DrillDown, PointerResponse, ZoomToggle, build_animation,
};
