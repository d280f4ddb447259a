use crate::animation::progress::{BoundPolicy, Progress};
use crate::animation::state::{AnimationState, Phase, TickOutcome};
use crate::foundation::core::{Canvas, Point};
use crate::foundation::error::TweenResult;
use crate::foundation::math::clamp01;
use crate::render::camera::Camera;
use crate::render::draw::draw_graph;
use crate::render::surface::Surface;
use crate::scene::config::DrillDownSpec;
use crate::scene::graph::{Edge, Graph, Node, generate_graph, hit_test, spawn_region};
use crate::show::{Animation, PointerResponse};

/// Node-graph drill-down.
///
/// Clicking a node zooms from 1 to `max_zoom` while the current graph fades out and a freshly
/// generated graph fades in. Phase A means travelling, phase B means arrived.
#[derive(Clone, Debug)]
pub struct DrillDown {
    canvas: Canvas,
    spec: DrillDownSpec,
    state: AnimationState,
    current: Graph,
    next: Option<Graph>,
    target: Option<Node>,
    generation: u64,
}

impl DrillDown {
    /// Idle at zoom 1 with the first graph generated from `spec.seed`.
    pub fn new(canvas: Canvas, spec: DrillDownSpec) -> TweenResult<Self> {
        let progress = Progress::new(1.0, spec.max_zoom, spec.step)?;
        let bounds = spawn_region(canvas, spec.padding, 1.0, canvas.center());
        let current = generate_graph(spec.seed, spec.node_count, bounds, spec.edges);
        Ok(Self {
            canvas,
            spec,
            state: AnimationState::new(progress, BoundPolicy::Hold),
            current,
            next: None,
            target: None,
            generation: 0,
        })
    }

    /// Current zoom.
    pub fn zoom(&self) -> f64 {
        self.state.value()
    }

    /// Nodes of the graph being zoomed away from.
    pub fn current(&self) -> &[Node] {
        &self.current.nodes
    }

    /// Edges of the graph being zoomed away from.
    pub fn current_edges(&self) -> &[Edge] {
        &self.current.edges
    }

    /// Nodes of the graph being zoomed into, once a node was hit.
    pub fn next(&self) -> Option<&[Node]> {
        self.next.as_ref().map(|g| g.nodes.as_slice())
    }

    /// Last node hit.
    pub fn target(&self) -> Option<&Node> {
        self.target.as_ref()
    }

    /// Number of drill-downs started so far.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Whether the last zoom has arrived.
    pub fn arrived(&self) -> bool {
        self.state.phase() == Phase::B
    }

    /// Camera for the current zoom.
    pub fn camera(&self) -> Camera {
        let focus = if self.spec.focus_target {
            self.target.as_ref().map(|n| n.position)
        } else {
            None
        };
        Camera::new(self.zoom(), focus)
    }

    /// `(current, next)` opacities for the current zoom.
    pub fn graph_alphas(&self) -> (f64, f64) {
        let next = clamp01((self.zoom() - 1.0) * self.spec.fade_gain);
        (1.0 - next, next)
    }

    fn focus_point(&self, target: &Node) -> Point {
        if self.spec.focus_target {
            target.position
        } else {
            self.canvas.center()
        }
    }

    /// Bake the arrived camera into the next graph and make it current at zoom 1.
    fn rebase(&mut self) {
        let affine = self.camera().affine(self.canvas);
        if let Some(next) = self.next.take() {
            self.current = next.map_positions(|p| affine * p);
        }
        self.target = None;
        self.state.rewind();
        tracing::debug!(generation = self.generation, "drill-down rebased");
    }
}

impl Animation for DrillDown {
    fn kind_name(&self) -> &'static str {
        "drill_down"
    }

    fn state(&self) -> &AnimationState {
        &self.state
    }

    fn render(&self, surface: &mut dyn Surface) {
        surface.clear();
        surface.save();
        self.camera().apply(surface);

        let (current_alpha, next_alpha) = self.graph_alphas();
        let zoom = self.zoom();
        let crossover = self.spec.crossover();
        let (node, edge) = (&self.spec.node, &self.spec.edge);
        if !self.arrived() || zoom <= crossover {
            draw_graph(surface, &self.current, node, edge, current_alpha);
        }
        if let Some(next) = &self.next
            && (self.arrived() || zoom >= crossover)
        {
            draw_graph(surface, next, node, edge, next_alpha);
        }

        surface.restore();
    }

    fn tick(&mut self) -> TickOutcome {
        self.state.tick()
    }

    // Zoom steps before drawing, like the toggle.
    fn frame(&mut self, surface: &mut dyn Surface) -> TickOutcome {
        let outcome = self.tick();
        self.render(surface);
        outcome
    }

    fn pointer(&mut self, position: Point) -> PointerResponse {
        if self.state.is_active() {
            return PointerResponse::Ignored;
        }
        if self.arrived() {
            self.rebase();
        }

        let model = self.camera().to_model(self.canvas, position);
        let anchors = self.current.nodes.iter().map(|n| n.position);
        let Some(hit) = hit_test(anchors, model, self.spec.hit_radius) else {
            return PointerResponse::Ignored;
        };
        let target = self.current.nodes[hit].clone();

        self.generation += 1;
        let region = spawn_region(
            self.canvas,
            self.spec.padding,
            self.spec.max_zoom,
            self.focus_point(&target),
        );
        let seed = self.spec.seed.wrapping_add(self.generation);
        self.next = Some(generate_graph(
            seed,
            self.spec.node_count,
            region,
            self.spec.edges,
        ));
        tracing::debug!(
            label = %target.label,
            generation = self.generation,
            seed,
            "node hit, drilling down"
        );
        self.target = Some(target);
        self.state.start();
        PointerResponse::Started
    }
}

#[cfg(test)]
#[path = "../../tests/unit/show/drill_down.rs"]
mod tests;
