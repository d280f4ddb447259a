use crate::animation::progress::{BoundPolicy, Progress};
use crate::animation::state::{AnimationState, TickOutcome};
use crate::assets::store::AssetStore;
use crate::foundation::error::TweenResult;
use crate::render::draw::draw_layer;
use crate::render::surface::Surface;
use crate::scene::config::CrossFadeSpec;
use crate::show::Animation;

/// Two layers swapping weights forever.
///
/// In phase A layer A fades out while layer B fades in; every wrap flips the roles.
#[derive(Clone, Debug)]
pub struct CrossFade {
    spec: CrossFadeSpec,
    state: AnimationState,
    gated: bool,
}

impl CrossFade {
    /// Build a fade. It starts immediately unless one of its images is held back by the
    /// asset store.
    pub fn new(spec: CrossFadeSpec, assets: &AssetStore) -> TweenResult<Self> {
        let mut state = AnimationState::new(Progress::unit(spec.step)?, BoundPolicy::Wrap);
        let keys = spec
            .layer_a
            .iter()
            .chain(spec.layer_b.iter())
            .filter_map(|el| el.shape.image_asset());
        let gated = !assets.gate_open(keys);
        if gated {
            tracing::warn!("cross-fade gated on images that did not load, the loop will not start");
        } else {
            state.start();
        }
        Ok(Self { spec, state, gated })
    }
}

impl Animation for CrossFade {
    fn kind_name(&self) -> &'static str {
        "cross_fade"
    }

    fn state(&self) -> &AnimationState {
        &self.state
    }

    fn render(&self, surface: &mut dyn Surface) {
        surface.clear();
        if self.gated {
            return;
        }
        let t = self.spec.ease.apply(self.state.progress().normalized());
        let (wa, wb) = self.state.phase().weights(t);
        draw_layer(surface, &self.spec.layer_a, wa);
        draw_layer(surface, &self.spec.layer_b, wb);
    }

    fn tick(&mut self) -> TickOutcome {
        self.state.tick()
    }
}
