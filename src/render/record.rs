use kurbo::Shape as _;

use crate::foundation::core::{Affine, BezPath, Canvas, Point, Rect, Rgba8, TextAnchor};
use crate::render::surface::{StateStack, Surface};

/// What a recorded draw call painted.
#[derive(Clone, Debug, PartialEq)]
pub enum DrawKind {
    /// A filled path, by its model-space bounding box.
    Path {
        /// Bounding box of the path before transformation.
        bounds: Rect,
    },
    /// A stroked path.
    Stroke {
        /// Bounding box of the path before transformation.
        bounds: Rect,
        /// Line width in effect.
        width: f64,
    },
    /// An image draw.
    Image {
        /// Asset key.
        asset: String,
        /// Destination rect before transformation.
        dest: Rect,
    },
    /// A text draw.
    Text {
        /// Label text.
        text: String,
        /// Anchor origin before transformation.
        origin: Point,
        /// Font size in pixels.
        size_px: f32,
        /// Which point of the line sits on `origin`.
        anchor: TextAnchor,
    },
}

/// One draw call plus the state it was issued under.
#[derive(Clone, Debug, PartialEq)]
pub struct DrawCommand {
    /// What was drawn.
    pub kind: DrawKind,
    /// Transform in effect.
    pub transform: Affine,
    /// Global alpha in effect.
    pub alpha: f64,
    /// Fill colour in effect.
    pub fill: Rgba8,
    /// Stroke colour in effect.
    pub stroke: Rgba8,
}

impl DrawCommand {
    /// Pixel-space centre of what was drawn.
    pub fn screen_center(&self) -> Point {
        let model = match &self.kind {
            DrawKind::Path { bounds } | DrawKind::Stroke { bounds, .. } => bounds.center(),
            DrawKind::Image { dest, .. } => dest.center(),
            DrawKind::Text { origin, .. } => *origin,
        };
        self.transform * model
    }
}

/// A surface that records draw calls instead of rasterizing them.
///
/// `clear` drops the recorded list, so after a frame the list holds exactly what that frame drew.
#[derive(Clone, Debug)]
pub struct RecordingSurface {
    canvas: Canvas,
    stack: StateStack,
    commands: Vec<DrawCommand>,
    clears: u64,
}

impl RecordingSurface {
    /// Empty recording surface of `canvas` size.
    pub fn new(canvas: Canvas) -> Self {
        Self {
            canvas,
            stack: StateStack::default(),
            commands: Vec::new(),
            clears: 0,
        }
    }

    /// Draw calls since the last clear.
    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Path draws only.
    pub fn paths(&self) -> impl Iterator<Item = &DrawCommand> {
        self.commands
            .iter()
            .filter(|c| matches!(c.kind, DrawKind::Path { .. }))
    }

    /// Stroke draws only.
    pub fn strokes(&self) -> impl Iterator<Item = &DrawCommand> {
        self.commands
            .iter()
            .filter(|c| matches!(c.kind, DrawKind::Stroke { .. }))
    }

    /// Text draws only.
    pub fn texts(&self) -> impl Iterator<Item = &DrawCommand> {
        self.commands
            .iter()
            .filter(|c| matches!(c.kind, DrawKind::Text { .. }))
    }

    /// Number of times `clear` was called.
    pub fn clears(&self) -> u64 {
        self.clears
    }

    /// Depth of the save stack; zero after a balanced frame.
    pub fn save_depth(&self) -> usize {
        self.stack.depth()
    }

    fn record(&mut self, kind: DrawKind) {
        let s = *self.stack.current();
        self.commands.push(DrawCommand {
            kind,
            transform: s.transform,
            alpha: s.alpha,
            fill: s.fill,
            stroke: s.stroke,
        });
    }
}

impl Surface for RecordingSurface {
    fn canvas(&self) -> Canvas {
        self.canvas
    }

    fn stack(&self) -> &StateStack {
        &self.stack
    }

    fn stack_mut(&mut self) -> &mut StateStack {
        &mut self.stack
    }

    fn clear(&mut self) {
        self.commands.clear();
        self.clears += 1;
    }

    fn fill_path(&mut self, path: &BezPath) {
        self.record(DrawKind::Path {
            bounds: path.bounding_box(),
        });
    }

    fn stroke_path(&mut self, path: &BezPath) {
        let width = self.stack.current().line_width;
        self.record(DrawKind::Stroke {
            bounds: path.bounding_box(),
            width,
        });
    }

    fn draw_image(&mut self, asset: &str, dest: Rect) {
        self.record(DrawKind::Image {
            asset: asset.to_owned(),
            dest,
        });
    }

    fn fill_text(&mut self, text: &str, origin: Point, size_px: f32, anchor: TextAnchor) {
        self.record(DrawKind::Text {
            text: text.to_owned(),
            origin,
            size_px,
            anchor,
        });
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/record.rs"]
mod tests;
