//! Frame sinks.
//!
//! Sinks consume rendered frames in frame order and are fed by `Session::render_range`.

/// `ffmpeg`-based MP4 output via the system binary.
pub mod ffmpeg;
/// Frame-to-output pixel conversion shared by the file sinks.
pub mod pixels;
/// PNG sequence output.
pub mod png;
/// Sink trait and the in-memory sink.
pub mod sink;
