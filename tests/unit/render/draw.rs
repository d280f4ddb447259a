use super::*;
use crate::foundation::core::{Canvas, Point, Rect, Rgba8, TextAnchor, Vec2};
use crate::render::record::{DrawKind, RecordingSurface};
use crate::scene::graph::{EdgeLayout, generate_graph};

fn surface() -> RecordingSurface {
    RecordingSurface::new(Canvas {
        width: 200,
        height: 200,
    })
}

#[test]
fn element_draw_applies_opacity_and_fill() {
    let mut s = surface();
    let el = Element::new(
        Shape::Rect {
            rect: Rect::new(10.0, 10.0, 30.0, 20.0),
        },
        Rgba8::RED,
    );
    draw_element(&mut s, &el, 0.3);
    let cmd = &s.commands()[0];
    assert_eq!(cmd.alpha, 0.3);
    assert_eq!(cmd.fill, Rgba8::RED);
}

#[test]
fn image_element_draws_its_asset() {
    let mut s = surface();
    let dest = Rect::new(0.0, 0.0, 200.0, 200.0);
    let el = Element::new(
        Shape::Image {
            asset: "a".into(),
            rect: dest,
        },
        Rgba8::BLACK,
    );
    draw_element(&mut s, &el, 1.0);
    assert_eq!(
        s.commands()[0].kind,
        DrawKind::Image {
            asset: "a".into(),
            dest
        }
    );
}

#[test]
fn degenerate_shapes_draw_nothing() {
    let mut s = surface();
    let layer = [
        Element::new(
            Shape::Circle {
                center: Point::new(5.0, 5.0),
                radius: 0.0,
            },
            Rgba8::RED,
        ),
        Element::new(Shape::Path { points: Vec::new() }, Rgba8::RED),
    ];
    draw_layer(&mut s, &layer, 1.0);
    assert!(s.commands().is_empty());
}

#[test]
fn node_draws_disc_then_label_at_offset() {
    let mut s = surface();
    let style = NodeStyle::default();
    draw_node(&mut s, &Node::new(Point::new(100.0, 50.0), "4"), &style, 0.5);

    let cmds = s.commands();
    assert_eq!(cmds.len(), 2);
    assert_eq!(cmds[0].fill, style.fill);
    assert!((cmds[0].screen_center() - Point::new(100.0, 50.0)).hypot() < 1e-6);
    assert_eq!(
        cmds[1].kind,
        DrawKind::Text {
            text: "4".into(),
            origin: Point::new(97.0, 55.0),
            size_px: 14.0,
            anchor: TextAnchor::Baseline,
        }
    );
    assert_eq!(cmds[1].fill, style.label_color);
    assert_eq!(cmds[1].alpha, 0.5);
}

#[test]
fn centred_labels_use_the_node_centre() {
    let mut s = surface();
    let style = NodeStyle {
        label_offset: Vec2::ZERO,
        label_anchor: TextAnchor::Center,
        ..NodeStyle::default()
    };
    draw_node(&mut s, &Node::new(Point::new(40.0, 60.0), "12"), &style, 1.0);
    assert_eq!(
        s.commands()[1].kind,
        DrawKind::Text {
            text: "12".into(),
            origin: Point::new(40.0, 60.0),
            size_px: 14.0,
            anchor: TextAnchor::Center,
        }
    );
}

#[test]
fn graph_draws_every_node() {
    let mut s = surface();
    let bounds = Rect::new(0.0, 0.0, 200.0, 200.0);
    let graph = generate_graph(3, 10, bounds, EdgeLayout::None);
    draw_graph(&mut s, &graph, &NodeStyle::default(), &EdgeStyle::default(), 1.0);
    assert_eq!(s.paths().count(), 10);
    assert_eq!(s.texts().count(), 10);
    assert_eq!(s.strokes().count(), 0);
}

#[test]
fn star_edges_draw_underneath_the_nodes() {
    let mut s = surface();
    let bounds = Rect::new(0.0, 0.0, 200.0, 200.0);
    let graph = generate_graph(3, 4, bounds, EdgeLayout::Star);
    let edge = EdgeStyle {
        width: 6.0,
        color: Rgba8::WHITE,
    };
    draw_graph(&mut s, &graph, &NodeStyle::default(), &edge, 0.25);

    let cmds = s.commands();
    assert_eq!(s.strokes().count(), 3);
    assert!(
        cmds[..3]
            .iter()
            .all(|c| matches!(c.kind, DrawKind::Stroke { width, .. } if width == 6.0))
    );
    assert!(cmds[..3].iter().all(|c| c.stroke == Rgba8::WHITE && c.alpha == 0.25));
    assert!(cmds[3..].iter().all(|c| !matches!(c.kind, DrawKind::Stroke { .. })));

    let root = graph.nodes[0].position;
    let leaf = graph.nodes[2].position;
    let mid = Point::new((root.x + leaf.x) / 2.0, (root.y + leaf.y) / 2.0);
    assert!((cmds[1].screen_center() - mid).hypot() < 1e-9);
}
