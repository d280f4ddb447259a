use super::*;
use crate::assets::store::AssetStore;
use crate::render::record::RecordingSurface;
use crate::show::{PointerResponse, build_animation};

#[test]
fn every_named_preset_validates() {
    for name in PRESET_NAMES {
        let config = preset(name).unwrap();
        config.validate().unwrap();
        assert_eq!(config.canvas, CANVAS);
    }
    assert!(preset("nope").is_err());
}

#[test]
fn presets_survive_json() {
    for name in PRESET_NAMES {
        let config = preset(name).unwrap();
        let json = config.to_json_pretty().unwrap();
        let back = ShowConfig::from_reader(json.as_bytes()).unwrap();
        assert_eq!(back.show.kind_name(), config.show.kind_name(), "{name}");
        assert_eq!(back.canvas, config.canvas);
        assert_eq!(back.frames, config.frames);
        assert_eq!(back.assets, config.assets);
        assert_eq!(back.clicks.len(), config.clicks.len());
    }
}

#[test]
fn image_fade_declares_both_images() {
    let config = image_fade();
    assert_eq!(config.assets.get("a").map(String::as_str), Some("image_a.png"));
    assert_eq!(config.assets.get("b").map(String::as_str), Some("image_b.jpg"));
}

#[test]
fn drill_down_click_hits_a_node() {
    for focus in [false, true] {
        let config = drill_down(focus);
        let mut anim = build_animation(&config, &AssetStore::empty()).unwrap();
        let click = config.clicks[0];
        assert_eq!(anim.pointer(click.position), PointerResponse::Started);
    }
    assert_eq!(drill_down(true).show, {
        let ShowSpec::DrillDown(mut s) = drill_down(false).show else {
            unreachable!()
        };
        s.focus_target = true;
        s.node.radius = 10.0;
        ShowSpec::DrillDown(s)
    });
}

#[test]
fn network_draws_star_edges_on_slate() {
    let config = network();
    assert_eq!(config.background, Rgba8::rgb(0x35, 0x43, 0x43));
    let mut anim = build_animation(&config, &AssetStore::empty()).unwrap();
    let mut surface = RecordingSurface::new(config.canvas);
    anim.render(&mut surface);
    assert_eq!(surface.strokes().count(), 9);
    assert_eq!(surface.paths().count(), 10);
    assert!(surface.texts().all(|t| matches!(
        t.kind,
        crate::render::record::DrawKind::Text {
            anchor: TextAnchor::Center,
            ..
        }
    )));
    assert_eq!(
        anim.pointer(config.clicks[0].position),
        PointerResponse::Started
    );
}

#[test]
fn polygon_zoom_toggles_in_and_back_out() {
    let config = polygon_zoom();
    let mut anim = build_animation(&config, &AssetStore::empty()).unwrap();
    let mut surface = RecordingSurface::new(config.canvas);
    let mut clicks = config.clicks.iter().peekable();
    for frame in 0..config.frames {
        while let Some(c) = clicks.next_if(|c| c.frame <= frame) {
            anim.pointer(c.position);
        }
        if anim.is_active() {
            anim.frame(&mut surface);
        }
    }
    assert!(!anim.is_active());
    assert_eq!(anim.state().value(), 1.0);
    assert_eq!(anim.state().ticks(), 80);
}
