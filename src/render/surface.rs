use crate::foundation::core::{Affine, BezPath, Canvas, Point, Rect, Rgba8, TextAnchor, Vec2};
use crate::foundation::math::clamp01;

/// Drawing state captured by [`Surface::save`] and restored by [`Surface::restore`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SurfaceState {
    /// Model-to-pixel transform applied to subsequent draws.
    pub transform: Affine,
    /// Global alpha in `[0, 1]` multiplied into subsequent draws.
    pub alpha: f64,
    /// Fill colour for paths and text.
    pub fill: Rgba8,
    /// Stroke colour for outlines.
    pub stroke: Rgba8,
    /// Stroke width in model units.
    pub line_width: f64,
}

impl Default for SurfaceState {
    fn default() -> Self {
        Self {
            transform: Affine::IDENTITY,
            alpha: 1.0,
            fill: Rgba8::BLACK,
            stroke: Rgba8::BLACK,
            line_width: 1.0,
        }
    }
}

/// Current state plus the save stack, shared by surface implementations.
#[derive(Clone, Debug, Default)]
pub struct StateStack {
    current: SurfaceState,
    saved: Vec<SurfaceState>,
}

impl StateStack {
    /// Current state.
    pub fn current(&self) -> &SurfaceState {
        &self.current
    }

    /// Current state, mutable.
    pub fn current_mut(&mut self) -> &mut SurfaceState {
        &mut self.current
    }

    /// Push a copy of the current state.
    pub fn save(&mut self) {
        self.saved.push(self.current);
    }

    /// Pop the last saved state. Unbalanced restores are ignored.
    pub fn restore(&mut self) {
        if let Some(s) = self.saved.pop() {
            self.current = s;
        }
    }

    /// Depth of the save stack.
    pub fn depth(&self) -> usize {
        self.saved.len()
    }
}

/// A stateful 2D drawing context.
///
/// Drawing never fails: geometry that cannot be drawn and images that are not loaded simply
/// produce nothing.
pub trait Surface {
    /// Surface size.
    fn canvas(&self) -> Canvas;

    /// Save stack.
    fn stack(&self) -> &StateStack;

    /// Save stack, mutable.
    fn stack_mut(&mut self) -> &mut StateStack;

    /// Erase everything drawn so far.
    fn clear(&mut self);

    /// Fill `path` (model space) with the current fill colour.
    fn fill_path(&mut self, path: &BezPath);

    /// Outline `path` (model space) with the current stroke colour and line width.
    fn stroke_path(&mut self, path: &BezPath);

    /// Draw image `asset` stretched into `dest` (model space).
    fn draw_image(&mut self, asset: &str, dest: Rect);

    /// Draw `text` in the fill colour, placed so that `anchor` lands on `origin` (model space).
    fn fill_text(&mut self, text: &str, origin: Point, size_px: f32, anchor: TextAnchor);

    /// Current drawing state.
    fn state(&self) -> &SurfaceState {
        self.stack().current()
    }

    /// Push the current state.
    fn save(&mut self) {
        self.stack_mut().save();
    }

    /// Pop the last saved state.
    fn restore(&mut self) {
        self.stack_mut().restore();
    }

    /// Set global alpha, clamped to `[0, 1]`.
    fn set_global_alpha(&mut self, alpha: f64) {
        self.stack_mut().current_mut().alpha = clamp01(alpha);
    }

    /// Set the fill colour.
    fn set_fill(&mut self, fill: Rgba8) {
        self.stack_mut().current_mut().fill = fill;
    }

    /// Set the stroke colour.
    fn set_stroke(&mut self, stroke: Rgba8) {
        self.stack_mut().current_mut().stroke = stroke;
    }

    /// Set the stroke width. Negative and non-finite widths become zero.
    fn set_line_width(&mut self, width: f64) {
        let width = if width.is_finite() { width.max(0.0) } else { 0.0 };
        self.stack_mut().current_mut().line_width = width;
    }

    /// Replace the transform with identity.
    fn reset_transform(&mut self) {
        self.stack_mut().current_mut().transform = Affine::IDENTITY;
    }

    /// Post-multiply `a` onto the current transform.
    fn transform(&mut self, a: Affine) {
        let s = self.stack_mut().current_mut();
        s.transform *= a;
    }

    /// Post-multiply a translation.
    fn translate(&mut self, v: Vec2) {
        self.transform(Affine::translate(v));
    }

    /// Post-multiply a uniform scale.
    fn scale(&mut self, k: f64) {
        self.transform(Affine::scale(k));
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/surface.rs"]
mod tests;
