use crate::foundation::core::{Affine, Canvas, Point};
use crate::render::surface::Surface;

/// Uniform zoom centred on a focus point.
///
/// The transform is `T(centre) · S(zoom) · T(−focus)`, so the focus always lands on the canvas
/// centre. Scaling first and translating second would zoom about the origin instead.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Camera {
    /// Scale factor; 1 is unzoomed.
    pub zoom: f64,
    /// Model-space point kept at the canvas centre; `None` means the canvas centre itself.
    pub focus: Option<Point>,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            zoom: 1.0,
            focus: None,
        }
    }
}

impl Camera {
    /// Camera at `zoom` on `focus`.
    pub fn new(zoom: f64, focus: Option<Point>) -> Self {
        Self { zoom, focus }
    }

    /// Model-to-pixel transform.
    pub fn affine(&self, canvas: Canvas) -> Affine {
        let center = canvas.center();
        let focus = self.focus.unwrap_or(center);
        Affine::translate(center.to_vec2())
            * Affine::scale(self.zoom)
            * Affine::translate(-focus.to_vec2())
    }

    /// Replace the surface transform with this camera, step by step.
    pub fn apply<S: Surface + ?Sized>(&self, surface: &mut S) {
        let canvas = surface.canvas();
        let center = canvas.center();
        let focus = self.focus.unwrap_or(center);
        surface.reset_transform();
        surface.translate(center.to_vec2());
        surface.scale(self.zoom);
        surface.translate(-focus.to_vec2());
    }

    /// Project a model-space point to pixels.
    pub fn to_screen(&self, canvas: Canvas, model: Point) -> Point {
        self.affine(canvas) * model
    }

    /// Map a pixel back into model space.
    pub fn to_model(&self, canvas: Canvas, screen: Point) -> Point {
        self.affine(canvas).inverse() * screen
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/camera.rs"]
mod tests;
