use kurbo::Shape as _;

use crate::foundation::core::{BezPath, Point, Rect, Rgba8, Vec2};

/// Closed set of drawable geometries.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Shape {
    /// Axis-aligned rectangle.
    Rect {
        /// Rectangle in model space.
        rect: Rect,
    },
    /// Circle.
    Circle {
        /// Centre.
        center: Point,
        /// Radius.
        radius: f64,
    },
    /// Regular polygon; vertex `i` sits at angle `2πi / sides + rotation_rad`.
    Polygon {
        /// Centre.
        center: Point,
        /// Circumradius.
        radius: f64,
        /// Vertex count.
        sides: u32,
        /// Rotation of the first vertex in radians.
        #[serde(default)]
        rotation_rad: f64,
    },
    /// Closed polyline through explicit points.
    Path {
        /// Vertices in drawing order.
        points: Vec<Point>,
    },
    /// Image asset stretched to a destination rectangle.
    Image {
        /// Asset key from the configuration.
        asset: String,
        /// Destination in model space.
        rect: Rect,
    },
}

const CIRCLE_TOLERANCE: f64 = 0.1;

impl Shape {
    /// Fillable outline, or `None` for images and degenerate geometry.
    pub fn to_path(&self) -> Option<BezPath> {
        match self {
            Self::Rect { rect } => {
                let rect = rect.abs();
                (rect.is_finite() && rect.area() > 0.0).then(|| rect.to_path(CIRCLE_TOLERANCE))
            }
            Self::Circle { center, radius } => (radius.is_finite() && *radius > 0.0)
                .then(|| kurbo::Circle::new(*center, *radius).to_path(CIRCLE_TOLERANCE)),
            Self::Polygon {
                center,
                radius,
                sides,
                rotation_rad,
            } => {
                if *sides < 3 || !radius.is_finite() || *radius <= 0.0 {
                    return None;
                }
                let n = *sides;
                let vertices = (0..n).map(|i| {
                    let angle = std::f64::consts::TAU / f64::from(n) * f64::from(i) + rotation_rad;
                    *center + Vec2::from_angle(angle) * *radius
                });
                Some(closed_polyline(vertices))
            }
            Self::Path { points } => {
                (points.len() >= 2).then(|| closed_polyline(points.iter().copied()))
            }
            Self::Image { .. } => None,
        }
    }

    /// Asset key for image shapes.
    pub fn image_asset(&self) -> Option<&str> {
        match self {
            Self::Image { asset, .. } => Some(asset),
            _ => None,
        }
    }
}

fn closed_polyline(points: impl IntoIterator<Item = Point>) -> BezPath {
    let mut path = BezPath::new();
    for (i, p) in points.into_iter().enumerate() {
        if i == 0 {
            path.move_to(p);
        } else {
            path.line_to(p);
        }
    }
    path.close_path();
    path
}

/// A shape with a fill colour.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Element {
    /// Geometry.
    #[serde(flatten)]
    pub shape: Shape,
    /// Fill colour; ignored for images.
    #[serde(default = "default_fill")]
    pub fill: Rgba8,
}

fn default_fill() -> Rgba8 {
    Rgba8::BLACK
}

impl Element {
    /// Pair a shape with a fill colour.
    pub fn new(shape: Shape, fill: Rgba8) -> Self {
        Self { shape, fill }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/model.rs"]
mod tests;
