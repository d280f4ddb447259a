use super::*;
use crate::render::record::RecordingSurface;
use crate::scene::graph::{EdgeLayout, EdgeStyle, NodeStyle};

fn canvas() -> Canvas {
    Canvas {
        width: 800,
        height: 600,
    }
}

fn spec(focus_target: bool) -> DrillDownSpec {
    DrillDownSpec {
        step: 0.05,
        max_zoom: 3.0,
        fade_gain: 2.0,
        crossover_zoom: None,
        node_count: 10,
        seed: 42,
        padding: 50.0,
        hit_radius: 10.0,
        focus_target,
        node: NodeStyle::default(),
        edges: EdgeLayout::None,
        edge: EdgeStyle::default(),
    }
}

fn run_until_idle(d: &mut DrillDown, s: &mut RecordingSurface) -> u64 {
    let mut frames = 0;
    while d.is_active() {
        d.frame(s);
        frames += 1;
        assert!(frames <= 1000);
    }
    frames
}

fn far_from_nodes(nodes: &[Node]) -> Point {
    let candidates = [Point::new(1.0, 1.0), Point::new(799.0, 1.0), Point::new(1.0, 599.0)];
    candidates
        .into_iter()
        .find(|p| nodes.iter().all(|n| n.position.distance(*p) > 20.0))
        .unwrap()
}

#[test]
fn starts_idle_with_padded_first_graph() {
    let d = DrillDown::new(canvas(), spec(false)).unwrap();
    assert!(!d.is_active());
    assert_eq!(d.current().len(), 10);
    assert!(d.next().is_none());
    for n in d.current() {
        assert!(n.position.x >= 50.0 && n.position.x <= 750.0);
        assert!(n.position.y >= 50.0 && n.position.y <= 550.0);
    }
}

#[test]
fn miss_does_nothing() {
    let mut d = DrillDown::new(canvas(), spec(false)).unwrap();
    let p = far_from_nodes(d.current());
    assert_eq!(d.pointer(p), PointerResponse::Ignored);
    assert!(!d.is_active());
    assert!(d.target().is_none());
}

#[test]
fn hit_settles_after_forty_ticks() {
    let mut d = DrillDown::new(canvas(), spec(false)).unwrap();
    let mut s = RecordingSurface::new(canvas());
    let target = d.current()[3].clone();

    assert_eq!(d.pointer(target.position), PointerResponse::Started);
    assert_eq!(d.target(), Some(&target));
    assert_eq!(d.generation(), 1);
    assert!(d.next().is_some());

    assert_eq!(run_until_idle(&mut d, &mut s), 40);
    assert!(d.arrived());
    assert!(d.state().is_settled());
    assert_eq!(d.zoom(), 3.0);
    assert_eq!(d.tick(), TickOutcome::Idle);

    // Arrived: only the next graph, fully opaque.
    assert_eq!(s.paths().count(), 10);
    assert!(s.paths().all(|c| c.alpha == 1.0));
}

#[test]
fn next_graph_fills_the_padded_canvas_once_arrived() {
    for focus in [false, true] {
        let mut d = DrillDown::new(canvas(), spec(focus)).unwrap();
        let mut s = RecordingSurface::new(canvas());
        let target = d.current()[0].position;
        d.pointer(target);
        run_until_idle(&mut d, &mut s);
        for c in s.paths() {
            let p = c.screen_center();
            assert!(p.x >= 50.0 - 1e-6 && p.x <= 750.0 + 1e-6, "{p:?}");
            assert!(p.y >= 50.0 - 1e-6 && p.y <= 550.0 + 1e-6, "{p:?}");
        }
    }
}

#[test]
fn focused_zoom_keeps_target_at_centre() {
    let mut d = DrillDown::new(canvas(), spec(true)).unwrap();
    let mut s = RecordingSurface::new(canvas());
    let target = d.current()[5].position;
    d.pointer(target);
    for _ in 0..7 {
        d.frame(&mut s);
        let screen = d.camera().to_screen(canvas(), target);
        assert!((screen - canvas().center()).hypot() < 1e-9);
    }
}

#[test]
fn graphs_cross_over_at_half_max_zoom() {
    // Land the crossover exactly on the zoom reached after ten steps.
    let mut crossover = 1.0;
    for _ in 0..10 {
        crossover += 0.05;
    }
    let mut d = DrillDown::new(
        canvas(),
        DrillDownSpec {
            crossover_zoom: Some(crossover),
            ..spec(false)
        },
    )
    .unwrap();
    let mut s = RecordingSurface::new(canvas());
    d.pointer(d.current()[0].position);

    for _ in 0..9 {
        d.frame(&mut s);
    }
    // zoom 1.45: current graph only, mostly faded.
    assert_eq!(s.paths().count(), 10);
    let (cur, next) = d.graph_alphas();
    assert!((cur - 0.1).abs() < 1e-9 && (next - 0.9).abs() < 1e-9);

    d.frame(&mut s);
    assert_eq!(s.paths().count(), 20);

    // Travelling: the current graph stays drawn, faded out.
    d.frame(&mut s);
    assert_eq!(s.paths().count(), 20);
    assert_eq!(s.paths().filter(|c| c.alpha == 0.0).count(), 10);
}

#[test]
fn arrived_current_graph_drawn_only_up_to_crossover() {
    let arrive = |crossover_zoom| {
        let mut d = DrillDown::new(
            canvas(),
            DrillDownSpec {
                crossover_zoom,
                ..spec(false)
            },
        )
        .unwrap();
        let mut s = RecordingSurface::new(canvas());
        d.pointer(d.current()[0].position);
        run_until_idle(&mut d, &mut s);
        s.paths().count()
    };
    assert_eq!(arrive(None), 10);
    assert_eq!(arrive(Some(3.0)), 20);
}

#[test]
fn clicks_while_zooming_are_ignored() {
    let mut d = DrillDown::new(canvas(), spec(false)).unwrap();
    let mut s = RecordingSurface::new(canvas());
    let first = d.current()[0].position;
    d.pointer(first);
    d.frame(&mut s);
    assert_eq!(d.pointer(first), PointerResponse::Ignored);
    assert_eq!(d.generation(), 1);
}

#[test]
fn click_after_arrival_rebases_then_drills_again() {
    let mut d = DrillDown::new(canvas(), spec(false)).unwrap();
    let mut s = RecordingSurface::new(canvas());
    d.pointer(d.current()[0].position);
    run_until_idle(&mut d, &mut s);

    // What is on screen now becomes the clickable graph.
    let on_screen: Vec<Point> = s.paths().map(|c| c.screen_center()).collect();
    let target = on_screen[2];

    assert_eq!(d.pointer(target), PointerResponse::Started);
    assert_eq!(d.generation(), 2);
    assert!(!d.arrived());
    assert_eq!(d.current().len(), 10);
    for (node, seen) in d.current().iter().zip(&on_screen) {
        assert!((node.position - *seen).hypot() < 1e-6);
    }
    let picked = d.target().map(|n| n.position).unwrap();
    assert!(picked.distance(target) <= 10.0);

    d.frame(&mut s);
    assert!((d.zoom() - 1.05).abs() < 1e-9);
}

#[test]
fn missed_click_after_arrival_still_rebases() {
    let mut d = DrillDown::new(canvas(), spec(false)).unwrap();
    let mut s = RecordingSurface::new(canvas());
    d.pointer(d.current()[0].position);
    run_until_idle(&mut d, &mut s);

    let on_screen: Vec<Node> = s
        .paths()
        .map(|c| Node::new(c.screen_center(), ""))
        .collect();
    let p = far_from_nodes(&on_screen);
    assert_eq!(d.pointer(p), PointerResponse::Ignored);
    assert_eq!(d.zoom(), 1.0);
    assert!(d.next().is_none());
    assert!(!d.arrived());
    assert!(!d.is_active());
}

#[test]
fn star_edges_follow_each_graph_through_rebase() {
    let mut d = DrillDown::new(
        canvas(),
        DrillDownSpec {
            edges: EdgeLayout::Star,
            ..spec(false)
        },
    )
    .unwrap();
    let mut s = RecordingSurface::new(canvas());
    assert_eq!(d.current_edges().len(), 9);
    d.render(&mut s);
    assert_eq!(s.strokes().count(), 9);

    d.pointer(d.current()[0].position);
    run_until_idle(&mut d, &mut s);
    // Arrived past the crossover: only the next graph and its edges remain.
    assert_eq!(s.strokes().count(), 9);
    let root = s.paths().next().map(|c| c.screen_center()).unwrap();

    d.pointer(root);
    assert_eq!(d.generation(), 2);
    assert_eq!(d.current_edges().len(), 9);
    assert!(d.current_edges().iter().all(|e| e.from == 0));
    assert!((d.current()[0].position - root).hypot() < 1e-6);
}
