use rand::{Rng, SeedableRng};
use rand_xoshiro::Xoshiro256PlusPlus;

use crate::foundation::core::{Canvas, Point, Rect, Rgba8, TextAnchor, Vec2};

/// A labelled circular node.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Node {
    /// Centre in model space.
    pub position: Point,
    /// Text drawn next to the centre.
    pub label: String,
}

impl Node {
    /// Create a node.
    pub fn new(position: Point, label: impl Into<String>) -> Self {
        Self {
            position,
            label: label.into(),
        }
    }
}

/// How nodes are drawn.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct NodeStyle {
    /// Circle radius.
    pub radius: f64,
    /// Circle fill.
    pub fill: Rgba8,
    /// Label colour.
    pub label_color: Rgba8,
    /// Label font size in pixels.
    pub label_size_px: f32,
    /// Offset from the node centre to the label origin.
    pub label_offset: Vec2,
    /// Which point of the label sits on the origin.
    pub label_anchor: TextAnchor,
}

impl Default for NodeStyle {
    fn default() -> Self {
        Self {
            radius: 15.0,
            fill: Rgba8::RED,
            label_color: Rgba8::BLACK,
            label_size_px: 14.0,
            label_offset: Vec2::new(-3.0, 5.0),
            label_anchor: TextAnchor::Baseline,
        }
    }
}

/// A line between two nodes, by index.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Edge {
    /// Start node.
    pub from: usize,
    /// End node.
    pub to: usize,
}

/// Which edges [`generate_graph`] adds.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EdgeLayout {
    /// Nodes only.
    #[default]
    None,
    /// The first node is the root, joined to every other node.
    Star,
    /// Each node after the first joins a random earlier node.
    Tree,
}

/// How edges are drawn.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct EdgeStyle {
    /// Line width in model units.
    pub width: f64,
    /// Line colour.
    pub color: Rgba8,
}

impl Default for EdgeStyle {
    fn default() -> Self {
        Self {
            width: 6.0,
            color: Rgba8::WHITE,
        }
    }
}

/// Nodes plus the edges between them.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Graph {
    /// Nodes in label order.
    pub nodes: Vec<Node>,
    /// Edges; every index is below `nodes.len()`.
    pub edges: Vec<Edge>,
}

impl Graph {
    /// Endpoints of every edge.
    pub fn edge_lines(&self) -> impl Iterator<Item = (Point, Point)> + '_ {
        self.edges.iter().filter_map(|e| {
            let from = self.nodes.get(e.from)?;
            let to = self.nodes.get(e.to)?;
            Some((from.position, to.position))
        })
    }

    /// Apply `f` to every node position, keeping labels and edges.
    pub fn map_positions(self, f: impl Fn(Point) -> Point) -> Self {
        let nodes = self
            .nodes
            .into_iter()
            .map(|n| Node {
                position: f(n.position),
                label: n.label,
            })
            .collect();
        Self {
            nodes,
            edges: self.edges,
        }
    }
}

/// Generate `count` nodes labelled `1..=count`, uniformly inside `bounds`.
///
/// Pure: the same `(seed, count, bounds)` always yields the same nodes.
pub fn generate(seed: u64, count: usize, bounds: Rect) -> Vec<Node> {
    generate_graph(seed, count, bounds, EdgeLayout::None).nodes
}

/// [`generate`] plus edges laid out by `layout`.
///
/// Node positions do not depend on `layout`; tree parents are drawn from the same stream after
/// the positions.
pub fn generate_graph(seed: u64, count: usize, bounds: Rect, layout: EdgeLayout) -> Graph {
    let bounds = bounds.abs();
    let mut rng = Xoshiro256PlusPlus::seed_from_u64(seed);
    let nodes: Vec<Node> = (1..=count)
        .map(|label| {
            let x = bounds.x0 + rng.random::<f64>() * bounds.width();
            let y = bounds.y0 + rng.random::<f64>() * bounds.height();
            Node::new(Point::new(x, y), label.to_string())
        })
        .collect();
    let edges = match layout {
        EdgeLayout::None => Vec::new(),
        EdgeLayout::Star => (1..count).map(|to| Edge { from: 0, to }).collect(),
        EdgeLayout::Tree => (1..count)
            .map(|to| Edge {
                from: rng.random_range(0..to),
                to,
            })
            .collect(),
    };
    Graph { nodes, edges }
}

/// Region new nodes are spawned into: the canvas minus `padding` on each side, shrunk by
/// `zoom` and centred on `focus`.
///
/// At `zoom` the region fills the padded canvas once the camera centres on `focus`.
pub fn spawn_region(canvas: Canvas, padding: f64, zoom: f64, focus: Point) -> Rect {
    let padding = padding.max(0.0);
    let width = (f64::from(canvas.width) - 2.0 * padding).max(0.0);
    let height = (f64::from(canvas.height) - 2.0 * padding).max(0.0);
    let zoom = if zoom.is_finite() && zoom > 0.0 {
        zoom
    } else {
        1.0
    };
    Rect::from_center_size(focus, (width / zoom, height / zoom))
}

/// Index of the first anchor within `radius` of `pointer` (inclusive), if any.
pub fn hit_test<I>(anchors: I, pointer: Point, radius: f64) -> Option<usize>
where
    I: IntoIterator<Item = Point>,
{
    anchors
        .into_iter()
        .position(|anchor| anchor.distance(pointer) <= radius)
}

#[cfg(test)]
#[path = "../../tests/unit/scene/graph.rs"]
mod tests;
