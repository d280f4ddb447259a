use super::*;
use crate::encode::sink::InMemorySink;
use crate::render::record::RecordingSurface;
use crate::show::presets;

fn shape_fade_session() -> (Session, RecordingSurface) {
    let config = presets::shape_fade();
    let session = Session::new(&config, &AssetStore::empty()).unwrap();
    (session, RecordingSurface::new(config.canvas))
}

#[test]
fn fade_ticks_every_frame_and_flips_once_per_hundred() {
    let (mut session, mut surface) = shape_fade_session();
    for _ in 0..250 {
        session.step(&mut surface);
    }
    let stats = session.stats();
    assert_eq!(stats.frames, 250);
    assert_eq!(stats.ticks, 250);
    assert_eq!(stats.flips, 2);
    assert_eq!(stats.settles, 0);
    assert_eq!(session.next_frame(), FrameIndex(250));
}

#[test]
fn idle_frames_are_redrawn_without_ticking() {
    let config = presets::polygon_zoom();
    let mut session = Session::new(&config, &AssetStore::empty()).unwrap();
    let mut surface = RecordingSurface::new(config.canvas);
    session.push_click(PointerEvent::click(200, 0.0, 0.0));

    let first = session.step(&mut surface);
    assert_eq!(first.clicks, 1);
    assert_eq!(first.hits, 1);
    assert_eq!(first.outcome, TickOutcome::Advanced);

    for _ in 1..50 {
        session.step(&mut surface);
    }
    let report = session.step(&mut surface);
    assert_eq!(report.outcome, TickOutcome::Idle);
    assert_eq!(surface.clears(), 51);
    assert!(!surface.commands().is_empty());

    let stats = session.stats();
    assert_eq!(stats.ticks, 40);
    assert_eq!(stats.settles, 1);
    assert_eq!(session.pending_clicks(), 2);
}

#[test]
fn clicks_are_delivered_in_frame_order() {
    let (mut session, mut surface) = shape_fade_session();
    session.push_click(PointerEvent::click(3, 1.0, 1.0));
    session.push_click(PointerEvent::click(1, 2.0, 2.0));
    session.push_click(PointerEvent::click(1, 3.0, 3.0));
    assert_eq!(session.pending_clicks(), 3);

    assert_eq!(session.step(&mut surface).clicks, 0);
    assert_eq!(session.step(&mut surface).clicks, 2);
    assert_eq!(session.step(&mut surface).clicks, 0);
    assert_eq!(session.step(&mut surface).clicks, 1);
    assert_eq!(session.pending_clicks(), 0);
}

#[test]
fn late_clicks_arrive_on_the_next_step() {
    let (mut session, mut surface) = shape_fade_session();
    session.step(&mut surface);
    session.step(&mut surface);
    session.push_click(PointerEvent::click(0, 5.0, 5.0));
    assert_eq!(session.step(&mut surface).clicks, 1);
}

#[test]
fn skip_to_refuses_to_rewind() {
    let (mut session, mut surface) = shape_fade_session();
    session.skip_to(FrameIndex(10), &mut surface).unwrap();
    assert_eq!(session.next_frame(), FrameIndex(10));
    assert!(session.skip_to(FrameIndex(3), &mut surface).is_err());
}

#[test]
fn drill_down_preset_settles_and_stops() {
    let config = presets::drill_down(false);
    let mut session = Session::new(&config, &AssetStore::empty()).unwrap();
    let mut surface = RecordingSurface::new(config.canvas);
    for _ in 0..config.frames {
        session.step(&mut surface);
    }
    let stats = session.stats();
    assert_eq!(stats.hits, 1);
    assert_eq!(stats.ticks, 40);
    assert_eq!(stats.settles, 1);
    assert!(!session.animation().is_active());
}

#[test]
fn debug_names_the_animation() {
    let (session, _) = shape_fade_session();
    assert!(format!("{session:?}").contains("cross_fade"));
}

#[test]
fn render_range_streams_only_requested_frames() {
    struct Blank(RecordingSurface);
    impl Surface for Blank {
        fn canvas(&self) -> Canvas {
            self.0.canvas()
        }
        fn stack(&self) -> &crate::render::surface::StateStack {
            self.0.stack()
        }
        fn stack_mut(&mut self) -> &mut crate::render::surface::StateStack {
            self.0.stack_mut()
        }
        fn clear(&mut self) {
            self.0.clear();
        }
        fn fill_path(&mut self, path: &crate::foundation::core::BezPath) {
            self.0.fill_path(path);
        }
        fn stroke_path(&mut self, path: &crate::foundation::core::BezPath) {
            self.0.stroke_path(path);
        }
        fn draw_image(&mut self, asset: &str, dest: crate::foundation::core::Rect) {
            self.0.draw_image(asset, dest);
        }
        fn fill_text(
            &mut self,
            text: &str,
            origin: crate::foundation::core::Point,
            size_px: f32,
            anchor: crate::foundation::core::TextAnchor,
        ) {
            self.0.fill_text(text, origin, size_px, anchor);
        }
    }
    impl RasterSurface for Blank {
        fn readback(&mut self) -> TweenResult<FrameRGBA> {
            let c = self.0.canvas();
            Ok(FrameRGBA {
                width: c.width,
                height: c.height,
                data: vec![0; (c.width * c.height * 4) as usize],
                premultiplied: true,
            })
        }
    }

    let (mut session, inner) = shape_fade_session();
    let mut surface = Blank(inner);
    let mut sink = InMemorySink::new();
    let empty = FrameRange::new(FrameIndex(4), FrameIndex(4)).unwrap();
    assert!(session.render_range(empty, &mut surface, &mut sink).is_err());

    let range = FrameRange::new(FrameIndex(2), FrameIndex(5)).unwrap();
    let stats = session.render_range(range, &mut surface, &mut sink).unwrap();
    assert_eq!(stats.frames, 3);
    let idx: Vec<u64> = sink.frames().iter().map(|(i, _)| i.0).collect();
    assert_eq!(idx, [2, 3, 4]);
    assert!(sink.is_ended());
    let cfg = sink.config().unwrap();
    assert_eq!(cfg.width, 800);
    assert_eq!(cfg.frames, 3);
    assert_eq!(cfg.background, presets::shape_fade().background);
}
