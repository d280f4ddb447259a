use crate::animation::progress::{BoundPolicy, Direction, Progress};
use crate::animation::state::{AnimationState, Phase, TickOutcome};
use crate::foundation::core::Point;
use crate::foundation::error::TweenResult;
use crate::foundation::math::clamp01;
use crate::render::camera::Camera;
use crate::render::draw::draw_layer;
use crate::render::surface::Surface;
use crate::scene::config::ZoomToggleSpec;
use crate::show::{Animation, PointerResponse};

/// Click-driven zoom between an outer and an inner layer.
///
/// Phase A is zoomed out, phase B zoomed in. Each accepted click runs the zoom to the opposite
/// bound, where it holds and flips the phase.
#[derive(Clone, Debug)]
pub struct ZoomToggle {
    spec: ZoomToggleSpec,
    state: AnimationState,
}

impl ZoomToggle {
    /// Zoomed out and idle.
    pub fn new(spec: ZoomToggleSpec) -> TweenResult<Self> {
        let progress = Progress::new(spec.min_zoom, spec.max_zoom, spec.step)?;
        Ok(Self {
            spec,
            state: AnimationState::new(progress, BoundPolicy::Hold),
        })
    }

    /// Current zoom.
    pub fn zoom(&self) -> f64 {
        self.state.value()
    }

    /// Whether the last completed zoom ended zoomed in.
    pub fn zoomed_in(&self) -> bool {
        self.state.phase() == Phase::B
    }

    /// `(outer, inner)` opacities for the current zoom.
    pub fn layer_alphas(&self) -> (f64, f64) {
        let inner = clamp01((self.zoom() - self.spec.min_zoom) * self.spec.fade_gain);
        (1.0 - inner, inner)
    }
}

impl Animation for ZoomToggle {
    fn kind_name(&self) -> &'static str {
        "zoom_toggle"
    }

    fn state(&self) -> &AnimationState {
        &self.state
    }

    fn render(&self, surface: &mut dyn Surface) {
        surface.clear();
        surface.save();
        Camera::new(self.zoom(), None).apply(surface);

        let (outer_alpha, inner_alpha) = self.layer_alphas();
        let zoom = self.zoom();
        if self.zoomed_in() || zoom >= self.spec.crossover_zoom {
            draw_layer(surface, &self.spec.inner, inner_alpha);
        }
        if !self.zoomed_in() || zoom <= self.spec.crossover_zoom {
            draw_layer(surface, &self.spec.outer, outer_alpha);
        }

        surface.restore();
    }

    fn tick(&mut self) -> TickOutcome {
        self.state.tick()
    }

    // The zoom steps before drawing, so the first frame after a click already shows movement.
    fn frame(&mut self, surface: &mut dyn Surface) -> TickOutcome {
        let outcome = self.tick();
        self.render(surface);
        outcome
    }

    fn pointer(&mut self, position: Point) -> PointerResponse {
        if self.state.is_active() {
            return PointerResponse::Ignored;
        }
        if let Some(button) = self.spec.button
            && !button.contains(position)
        {
            return PointerResponse::Ignored;
        }
        let dir = match self.state.phase() {
            Phase::A => Direction::Forward,
            Phase::B => Direction::Reverse,
        };
        tracing::debug!(?dir, zoom = self.zoom(), "zoom toggled");
        self.state.start_in(dir);
        PointerResponse::Started
    }
}

#[cfg(test)]
#[path = "../../tests/unit/show/zoom_toggle.rs"]
mod tests;
