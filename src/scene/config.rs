use std::collections::BTreeMap;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::animation::ease::Ease;
use crate::foundation::core::{Canvas, Fps, Point, Rect, Rgba8};
use crate::foundation::error::{TweenError, TweenResult};
use crate::scene::graph::{EdgeLayout, EdgeStyle, NodeStyle};
use crate::scene::model::Element;

/// A scheduled pointer click in canvas pixel coordinates.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct PointerEvent {
    /// Frame before whose tick the click is delivered.
    pub frame: u64,
    /// Surface-relative position.
    pub position: Point,
}

impl PointerEvent {
    /// Click at `(x, y)` on `frame`.
    pub fn click(frame: u64, x: f64, y: f64) -> Self {
        Self {
            frame,
            position: Point::new(x, y),
        }
    }

    /// Parse `FRAME:X,Y` (the CLI `--click` form).
    pub fn parse(s: &str) -> TweenResult<Self> {
        let bad = || TweenError::validation(format!("click '{s}' must look like FRAME:X,Y"));
        let (frame, xy) = s.trim().split_once(':').ok_or_else(bad)?;
        let (x, y) = xy.split_once(',').ok_or_else(bad)?;
        let frame = frame.trim().parse::<u64>().map_err(|_| bad())?;
        let x = x.trim().parse::<f64>().map_err(|_| bad())?;
        let y = y.trim().parse::<f64>().map_err(|_| bad())?;
        if !x.is_finite() || !y.is_finite() {
            return Err(bad());
        }
        Ok(Self::click(frame, x, y))
    }
}

/// What to do when a declared image asset cannot be loaded.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MissingAssetPolicy {
    /// Abort preparation with an asset error.
    #[default]
    Fail,
    /// Keep going, but never start a loop gated on the missing asset.
    Stall,
    /// Start anyway; missing images draw nothing.
    Skip,
}

fn default_fade_step() -> f64 {
    0.01
}

fn default_zoom_step() -> f64 {
    0.05
}

fn default_min_zoom() -> f64 {
    1.0
}

fn default_max_zoom() -> f64 {
    3.0
}

fn default_one() -> f64 {
    1.0
}

fn default_two() -> f64 {
    2.0
}

/// Two layers cross-fading forever.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct CrossFadeSpec {
    /// Progress increment per tick.
    #[serde(default = "default_fade_step")]
    pub step: f64,
    /// Curve applied to progress before splitting into weights.
    #[serde(default)]
    pub ease: Ease,
    /// State A.
    pub layer_a: Vec<Element>,
    /// State B.
    pub layer_b: Vec<Element>,
}

/// Click-triggered zoom that toggles between an outer and an inner layer.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ZoomToggleSpec {
    /// Zoom increment per tick.
    #[serde(default = "default_zoom_step")]
    pub step: f64,
    /// Zoomed-out scale.
    #[serde(default = "default_min_zoom")]
    pub min_zoom: f64,
    /// Zoomed-in scale.
    #[serde(default = "default_max_zoom")]
    pub max_zoom: f64,
    /// Multiplier turning `zoom − min_zoom` into the inner layer's weight.
    #[serde(default = "default_one")]
    pub fade_gain: f64,
    /// Zoom at which the two layers' visibility ranges overlap.
    #[serde(default = "default_two")]
    pub crossover_zoom: f64,
    /// Optional trigger area; `None` accepts clicks anywhere.
    #[serde(default)]
    pub button: Option<Rect>,
    /// Layer shown zoomed out.
    pub outer: Vec<Element>,
    /// Layer revealed zoomed in.
    pub inner: Vec<Element>,
}

/// Click a node to zoom toward it and swap in a freshly generated graph.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct DrillDownSpec {
    /// Zoom increment per tick.
    #[serde(default = "default_zoom_step")]
    pub step: f64,
    /// Zoom at which a drill-down settles.
    #[serde(default = "default_max_zoom")]
    pub max_zoom: f64,
    /// Multiplier turning `zoom − 1` into the next graph's weight.
    #[serde(default = "default_two")]
    pub fade_gain: f64,
    /// Zoom at which both graphs are drawn; defaults to `max_zoom / 2`.
    #[serde(default)]
    pub crossover_zoom: Option<f64>,
    /// Nodes per generated graph.
    #[serde(default = "DrillDownSpec::default_node_count")]
    pub node_count: usize,
    /// Seed of the first graph; later graphs use `seed + generation`.
    #[serde(default)]
    pub seed: u64,
    /// Canvas margin kept free of nodes.
    #[serde(default = "DrillDownSpec::default_padding")]
    pub padding: f64,
    /// Click distance that selects a node.
    #[serde(default = "DrillDownSpec::default_hit_radius")]
    pub hit_radius: f64,
    /// Centre the zoom on the clicked node instead of the canvas centre.
    #[serde(default)]
    pub focus_target: bool,
    /// Node appearance.
    #[serde(default)]
    pub node: NodeStyle,
    /// Which edges each generated graph gets.
    #[serde(default)]
    pub edges: EdgeLayout,
    /// Edge appearance.
    #[serde(default)]
    pub edge: EdgeStyle,
}

impl DrillDownSpec {
    fn default_node_count() -> usize {
        10
    }

    fn default_padding() -> f64 {
        50.0
    }

    fn default_hit_radius() -> f64 {
        10.0
    }

    /// Effective crossover zoom.
    pub fn crossover(&self) -> f64 {
        self.crossover_zoom.unwrap_or(self.max_zoom / 2.0)
    }
}

/// Which loop variant a show runs.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ShowSpec {
    /// Looping cross-fade between two layers.
    CrossFade(CrossFadeSpec),
    /// Click-toggled zoom.
    ZoomToggle(ZoomToggleSpec),
    /// Node-graph drill-down.
    DrillDown(DrillDownSpec),
}

impl ShowSpec {
    /// Short variant name for logs.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Self::CrossFade(_) => "cross_fade",
            Self::ZoomToggle(_) => "zoom_toggle",
            Self::DrillDown(_) => "drill_down",
        }
    }
}

fn default_background() -> Rgba8 {
    Rgba8::WHITE
}

/// JSON-facing description of one show.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ShowConfig {
    /// Output size.
    pub canvas: Canvas,
    /// Display refresh rate.
    #[serde(default)]
    pub fps: Fps,
    /// Number of frames to render.
    pub frames: u64,
    /// Colour the surface is cleared to.
    #[serde(default = "default_background")]
    pub background: Rgba8,
    /// Optional font file (relative to the config) used for node labels.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font: Option<String>,
    /// Image assets by key, as paths relative to the config.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub assets: BTreeMap<String, String>,
    /// Behaviour for assets that fail to load.
    #[serde(default)]
    pub missing_assets: MissingAssetPolicy,
    /// Loop variant.
    pub show: ShowSpec,
    /// Scripted pointer input.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub clicks: Vec<PointerEvent>,
}

impl ShowConfig {
    /// Parse a config from a JSON reader.
    pub fn from_reader<R: std::io::Read>(r: R) -> TweenResult<Self> {
        serde_json::from_reader(r)
            .map_err(|e| TweenError::serde(format!("parse show config JSON: {e}")))
    }

    /// Parse a config from a JSON file on disk.
    pub fn from_path(path: impl AsRef<Path>) -> TweenResult<Self> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| {
            TweenError::validation(format!("open show config '{}': {e}", path.display()))
        })?;
        Self::from_reader(BufReader::new(f))
    }

    /// Pretty JSON.
    pub fn to_json_pretty(&self) -> TweenResult<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| TweenError::serde(format!("serialize show config: {e}")))
    }

    /// Check everything that would otherwise fail later or loop forever.
    pub fn validate(&self) -> TweenResult<()> {
        self.canvas.validate()?;
        Fps::new(self.fps.num, self.fps.den)?;

        for (key, path) in &self.assets {
            if key.trim().is_empty() {
                return Err(TweenError::validation("asset keys must be non-empty"));
            }
            if path.trim().is_empty() {
                return Err(TweenError::validation(format!(
                    "asset '{key}' path must be non-empty"
                )));
            }
        }

        match &self.show {
            ShowSpec::CrossFade(s) => {
                check_step(s.step, 1.0)?;
                self.check_image_refs(s.layer_a.iter().chain(&s.layer_b))?;
            }
            ShowSpec::ZoomToggle(s) => {
                check_zoom_range(s.min_zoom, s.max_zoom)?;
                check_step(s.step, s.max_zoom - s.min_zoom)?;
                check_finite_positive("fade_gain", s.fade_gain)?;
                if !s.crossover_zoom.is_finite() {
                    return Err(TweenError::validation("crossover_zoom must be finite"));
                }
                self.check_image_refs(s.outer.iter().chain(&s.inner))?;
            }
            ShowSpec::DrillDown(s) => {
                check_zoom_range(1.0, s.max_zoom)?;
                check_step(s.step, s.max_zoom - 1.0)?;
                check_finite_positive("fade_gain", s.fade_gain)?;
                check_finite_positive("hit_radius", s.hit_radius)?;
                check_finite_positive("node.radius", s.node.radius)?;
                if !s.crossover().is_finite() {
                    return Err(TweenError::validation("crossover_zoom must be finite"));
                }
                if !s.padding.is_finite() || s.padding < 0.0 {
                    return Err(TweenError::validation("padding must be finite and >= 0"));
                }
                if s.node_count == 0 {
                    return Err(TweenError::validation("node_count must be > 0"));
                }
            }
        }

        for click in &self.clicks {
            if !click.position.x.is_finite() || !click.position.y.is_finite() {
                return Err(TweenError::validation("click positions must be finite"));
            }
        }
        Ok(())
    }

    fn check_image_refs<'a>(&self, elements: impl Iterator<Item = &'a Element>) -> TweenResult<()> {
        for el in elements {
            if let Some(key) = el.shape.image_asset()
                && !self.assets.contains_key(key)
            {
                return Err(TweenError::validation(format!(
                    "image element references undeclared asset '{key}'"
                )));
            }
        }
        Ok(())
    }
}

fn check_step(step: f64, span: f64) -> TweenResult<()> {
    if !step.is_finite() || step <= 0.0 {
        return Err(TweenError::validation("step must be finite and > 0"));
    }
    if step > span {
        return Err(TweenError::validation(format!(
            "step {step} exceeds the interval span {span}"
        )));
    }
    Ok(())
}

fn check_zoom_range(min: f64, max: f64) -> TweenResult<()> {
    if !min.is_finite() || !max.is_finite() || min <= 0.0 {
        return Err(TweenError::validation("zoom bounds must be finite and > 0"));
    }
    if min >= max {
        return Err(TweenError::validation(format!(
            "min zoom {min} must be < max zoom {max}"
        )));
    }
    Ok(())
}

fn check_finite_positive(name: &str, v: f64) -> TweenResult<()> {
    if !v.is_finite() || v <= 0.0 {
        return Err(TweenError::validation(format!(
            "{name} must be finite and > 0"
        )));
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/scene/config.rs"]
mod tests;
