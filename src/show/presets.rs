use std::collections::BTreeMap;
use std::f64::consts::PI;

use crate::animation::ease::Ease;
use crate::foundation::core::{Canvas, Fps, Point, Rect, Rgba8, TextAnchor, Vec2};
use crate::foundation::error::{TweenError, TweenResult};
use crate::scene::config::{
    CrossFadeSpec, DrillDownSpec, MissingAssetPolicy, PointerEvent, ShowConfig, ShowSpec,
    ZoomToggleSpec,
};
use crate::scene::graph::{EdgeLayout, EdgeStyle, NodeStyle, generate, spawn_region};
use crate::scene::model::{Element, Shape};

/// Every preset name accepted by [`preset`].
pub const PRESET_NAMES: [&str; 7] = [
    "image-fade",
    "shape-fade",
    "polygon-fade",
    "polygon-zoom",
    "drill-down",
    "drill-down-focus",
    "network",
];

const CANVAS: Canvas = Canvas {
    width: 800,
    height: 600,
};

/// Look up a preset by name.
pub fn preset(name: &str) -> TweenResult<ShowConfig> {
    match name {
        "image-fade" => Ok(image_fade()),
        "shape-fade" => Ok(shape_fade()),
        "polygon-fade" => Ok(polygon_fade()),
        "polygon-zoom" => Ok(polygon_zoom()),
        "drill-down" => Ok(drill_down(false)),
        "drill-down-focus" => Ok(drill_down(true)),
        "network" => Ok(network()),
        other => Err(TweenError::validation(format!(
            "unknown preset '{other}' (expected one of: {})",
            PRESET_NAMES.join(", ")
        ))),
    }
}

fn base(frames: u64, show: ShowSpec) -> ShowConfig {
    ShowConfig {
        canvas: CANVAS,
        fps: Fps::default(),
        frames,
        background: Rgba8::WHITE,
        font: None,
        assets: BTreeMap::new(),
        missing_assets: MissingAssetPolicy::Fail,
        show,
        clicks: Vec::new(),
    }
}

fn fade(layer_a: Vec<Element>, layer_b: Vec<Element>) -> ShowSpec {
    ShowSpec::CrossFade(CrossFadeSpec {
        step: 0.01,
        ease: Ease::Linear,
        layer_a,
        layer_b,
    })
}

/// Two full-canvas images, `image_a.png` and `image_b.jpg`, next to the config.
pub fn image_fade() -> ShowConfig {
    let full = CANVAS.rect();
    let image = |key: &str| {
        Element::new(
            Shape::Image {
                asset: key.to_string(),
                rect: full,
            },
            Rgba8::BLACK,
        )
    };
    let mut config = base(200, fade(vec![image("a")], vec![image("b")]));
    config.assets.insert("a".into(), "image_a.png".into());
    config.assets.insert("b".into(), "image_b.jpg".into());
    config
}

/// Centred red rectangle fading into a blue circle.
pub fn shape_fade() -> ShowConfig {
    let c = CANVAS.center();
    let rect = Element::new(
        Shape::Rect {
            rect: Rect::from_center_size(c, (200.0, 100.0)),
        },
        Rgba8::RED,
    );
    let circle = Element::new(
        Shape::Circle {
            center: c,
            radius: 50.0,
        },
        Rgba8::rgb(0, 0, 255),
    );
    base(200, fade(vec![rect], vec![circle]))
}

fn polygon(center: Point, sides: u32, rotation_rad: f64, fill: Rgba8) -> Element {
    Element::new(
        Shape::Polygon {
            center,
            radius: 50.0,
            sides,
            rotation_rad,
        },
        fill,
    )
}

/// Triangle and pentagon fading into square and hexagon.
pub fn polygon_fade() -> ShowConfig {
    let w = f64::from(CANVAS.width);
    let y = f64::from(CANVAS.height) / 2.0;
    let left = Point::new(w / 3.0, y);
    let right = Point::new(2.0 * w / 3.0, y);
    let set_a = vec![
        polygon(left, 3, 0.0, Rgba8::RED),
        polygon(right, 5, PI / 5.0, Rgba8::rgb(0, 255, 0)),
    ];
    let set_b = vec![
        polygon(left, 4, PI / 4.0, Rgba8::rgb(0, 0, 255)),
        polygon(right, 6, PI / 6.0, Rgba8::rgb(255, 255, 0)),
    ];
    base(200, fade(set_a, set_b))
}

/// Red circle zooming into a blue triangle, toggled twice.
pub fn polygon_zoom() -> ShowConfig {
    let c = CANVAS.center();
    let circle = Element::new(
        Shape::Circle {
            center: c,
            radius: 100.0,
        },
        Rgba8::RED,
    );
    let triangle = Element::new(
        Shape::Path {
            points: vec![
                Point::new(c.x, c.y - 50.0),
                Point::new(c.x - 50.0, c.y + 50.0),
                Point::new(c.x + 50.0, c.y + 50.0),
            ],
        },
        Rgba8::rgb(0, 0, 255),
    );
    let mut config = base(
        120,
        ShowSpec::ZoomToggle(ZoomToggleSpec {
            step: 0.05,
            min_zoom: 1.0,
            max_zoom: 3.0,
            fade_gain: 1.0,
            crossover_zoom: 2.0,
            button: None,
            outer: vec![circle],
            inner: vec![triangle],
        }),
    );
    config.clicks = vec![PointerEvent::click(0, c.x, c.y), PointerEvent::click(60, c.x, c.y)];
    config
}

/// Ten-node graph; the scripted click lands on the first node.
///
/// `focus_target` picks the variant that zooms on the clicked node rather than the centre.
pub fn drill_down(focus_target: bool) -> ShowConfig {
    drill_down_show(drill_down_spec(focus_target))
}

/// Star-connected graph on a dark slate background: white discs with centred labels and white
/// edges from the first node to every other one.
pub fn network() -> ShowConfig {
    let spec = DrillDownSpec {
        hit_radius: 30.0,
        node: NodeStyle {
            radius: 30.0,
            fill: Rgba8::WHITE,
            label_color: Rgba8::BLACK,
            label_size_px: 20.0,
            label_offset: Vec2::ZERO,
            label_anchor: TextAnchor::Center,
        },
        edges: EdgeLayout::Star,
        edge: EdgeStyle {
            width: 6.0,
            color: Rgba8::WHITE,
        },
        ..drill_down_spec(false)
    };
    let mut config = drill_down_show(spec);
    config.background = Rgba8::rgb(0x35, 0x43, 0x43);
    config
}

fn drill_down_spec(focus_target: bool) -> DrillDownSpec {
    DrillDownSpec {
        step: 0.05,
        max_zoom: 3.0,
        fade_gain: 2.0,
        crossover_zoom: None,
        node_count: 10,
        seed: 0,
        padding: 50.0,
        hit_radius: 10.0,
        focus_target,
        node: NodeStyle {
            radius: if focus_target { 10.0 } else { 15.0 },
            ..NodeStyle::default()
        },
        edges: EdgeLayout::None,
        edge: EdgeStyle::default(),
    }
}

fn drill_down_show(spec: DrillDownSpec) -> ShowConfig {
    let bounds = spawn_region(CANVAS, spec.padding, 1.0, CANVAS.center());
    let first = generate(spec.seed, spec.node_count, bounds)
        .into_iter()
        .next()
        .map(|n| n.position)
        .unwrap_or_else(|| CANVAS.center());

    let mut config = base(90, ShowSpec::DrillDown(spec));
    config.clicks = vec![PointerEvent::click(10, first.x, first.y)];
    config
}

#[cfg(test)]
#[path = "../../tests/unit/show/presets.rs"]
mod tests;
