//! Loop variants.
//!
//! Each variant owns an [`AnimationState`] plus the scene it blends, and implements
//! [`Animation`] so the session driver can run any of them the same way.

use crate::animation::state::{AnimationState, TickOutcome};
use crate::assets::store::AssetStore;
use crate::foundation::core::Point;
use crate::foundation::error::TweenResult;
use crate::render::surface::Surface;
use crate::scene::config::{ShowConfig, ShowSpec};

mod cross_fade;
mod drill_down;
/// Built-in configurations reproducing the classic demos.
pub mod presets;
mod zoom_toggle;

pub use cross_fade::CrossFade;
pub use drill_down::DrillDown;
pub use zoom_toggle::ZoomToggle;

/// How an animation reacted to a pointer event.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PointerResponse {
    /// Nothing was hit, or the animation is busy.
    Ignored,
    /// The click started (or restarted) the loop.
    Started,
}

/// A frame-stepped interpolation loop bound to a scene.
pub trait Animation {
    /// Short variant name.
    fn kind_name(&self) -> &'static str;

    /// Loop state.
    fn state(&self) -> &AnimationState;

    /// Draw the scene for the current state. Clears the surface first.
    fn render(&self, surface: &mut dyn Surface);

    /// Advance the loop by one step.
    fn tick(&mut self) -> TickOutcome;

    /// One scheduled frame: render the current state, then advance.
    fn frame(&mut self, surface: &mut dyn Surface) -> TickOutcome {
        self.render(surface);
        self.tick()
    }

    /// Handle a click at a surface-relative `position`.
    fn pointer(&mut self, _position: Point) -> PointerResponse {
        PointerResponse::Ignored
    }

    /// Whether the loop wants another tick.
    fn is_active(&self) -> bool {
        self.state().is_active()
    }
}

/// Build the animation a config describes, gated on the assets that loaded.
pub fn build_animation(
    config: &ShowConfig,
    assets: &AssetStore,
) -> TweenResult<Box<dyn Animation>> {
    config.validate()?;
    let canvas = config.canvas;
    let animation: Box<dyn Animation> = match &config.show {
        ShowSpec::CrossFade(spec) => Box::new(CrossFade::new(spec.clone(), assets)?),
        ShowSpec::ZoomToggle(spec) => Box::new(ZoomToggle::new(spec.clone())?),
        ShowSpec::DrillDown(spec) => Box::new(DrillDown::new(canvas, spec.clone())?),
    };
    tracing::debug!(
        kind = animation.kind_name(),
        active = animation.is_active(),
        "animation built"
    );
    Ok(animation)
}

#[cfg(test)]
#[path = "../../tests/unit/show/mod.rs"]
mod tests;
