use crate::foundation::core::BezPath;
use crate::render::surface::Surface;
use crate::scene::graph::{EdgeStyle, Graph, Node, NodeStyle};
use crate::scene::model::{Element, Shape};

/// Draw one element at `opacity`.
pub fn draw_element<S: Surface + ?Sized>(surface: &mut S, element: &Element, opacity: f64) {
    surface.set_global_alpha(opacity);
    match &element.shape {
        Shape::Image { asset, rect } => surface.draw_image(asset, *rect),
        shape => {
            if let Some(path) = shape.to_path() {
                surface.set_fill(element.fill);
                surface.fill_path(&path);
            }
        }
    }
}

/// Draw every element of a layer at the same opacity, in order.
pub fn draw_layer<S: Surface + ?Sized>(surface: &mut S, elements: &[Element], opacity: f64) {
    for el in elements {
        draw_element(surface, el, opacity);
    }
}

/// Draw a node: filled circle, then its label.
pub fn draw_node<S: Surface + ?Sized>(
    surface: &mut S,
    node: &Node,
    style: &NodeStyle,
    opacity: f64,
) {
    let disc = Shape::Circle {
        center: node.position,
        radius: style.radius,
    };
    draw_element(surface, &Element::new(disc, style.fill), opacity);
    if node.label.is_empty() {
        return;
    }
    surface.set_fill(style.label_color);
    surface.fill_text(
        &node.label,
        node.position + style.label_offset,
        style.label_size_px,
        style.label_anchor,
    );
}

/// Stroke every edge of `graph` at `opacity`.
pub fn draw_edges<S: Surface + ?Sized>(
    surface: &mut S,
    graph: &Graph,
    style: &EdgeStyle,
    opacity: f64,
) {
    if graph.edges.is_empty() {
        return;
    }
    surface.set_global_alpha(opacity);
    surface.set_stroke(style.color);
    surface.set_line_width(style.width);
    for (from, to) in graph.edge_lines() {
        let mut line = BezPath::new();
        line.move_to(from);
        line.line_to(to);
        surface.stroke_path(&line);
    }
}

/// Draw a whole graph at one opacity: edges underneath, then nodes.
pub fn draw_graph<S: Surface + ?Sized>(
    surface: &mut S,
    graph: &Graph,
    node_style: &NodeStyle,
    edge_style: &EdgeStyle,
    opacity: f64,
) {
    draw_edges(surface, graph, edge_style, opacity);
    for node in &graph.nodes {
        draw_node(surface, node, node_style, opacity);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/draw.rs"]
mod tests;
