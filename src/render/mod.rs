//! Drawing surfaces and everything that draws into them.
//!
//! [`surface::Surface`] models a stateful 2D context (transform, global alpha and fill colour,
//! with save/restore). Shows draw through it without knowing whether pixels are produced
//! ([`cpu::CpuSurface`]) or commands are recorded ([`record::RecordingSurface`]).

/// Frame readback types.
pub mod backend;
/// Zoom camera.
pub mod camera;
/// `vello_cpu` raster surface.
pub mod cpu;
/// Free functions drawing elements and nodes.
pub mod draw;
/// Command-recording surface.
pub mod record;
/// The surface trait and its shared state stack.
pub mod surface;
