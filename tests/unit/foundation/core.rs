use super::*;

#[test]
fn frame_range_contains_boundaries() {
    let r = FrameRange::new(FrameIndex(2), FrameIndex(5)).unwrap();
    assert!(!r.contains(FrameIndex(1)));
    assert!(r.contains(FrameIndex(2)));
    assert!(r.contains(FrameIndex(4)));
    assert!(!r.contains(FrameIndex(5)));
    assert_eq!(r.len_frames(), 3);
    assert!(FrameRange::new(FrameIndex(5), FrameIndex(2)).is_err());
}

#[test]
fn frame_counts_convert_to_seconds() {
    let fps = Fps::new(30, 1).unwrap();
    assert_eq!(fps.frames_to_secs(0), 0.0);
    assert_eq!(fps.frames_to_secs(90), 3.0);
    let ntsc = Fps::new(30_000, 1_001).unwrap();
    assert!((ntsc.frames_to_secs(30_000) - 1_001.0).abs() < 1e-9);
}

#[test]
fn canvas_center_and_validation() {
    let c = Canvas::new(800, 600).unwrap();
    assert_eq!(c.center(), Point::new(400.0, 300.0));
    assert_eq!(c.rect(), Rect::new(0.0, 0.0, 800.0, 600.0));
    assert!(Canvas::new(0, 10).is_err());
    assert!(Canvas::new(70_000, 10).is_err());
}

#[test]
fn hex_colours_parse_in_all_widths() {
    assert_eq!(Rgba8::parse_hex("#f00").unwrap(), Rgba8::RED);
    assert_eq!(Rgba8::parse_hex("#00ff00").unwrap(), Rgba8::rgb(0, 255, 0));
    assert_eq!(
        Rgba8::parse_hex("#0000ff80").unwrap(),
        Rgba8 {
            r: 0,
            g: 0,
            b: 255,
            a: 128
        }
    );
    assert!(Rgba8::parse_hex("f00").is_err());
    assert!(Rgba8::parse_hex("#ff").is_err());
    assert!(Rgba8::parse_hex("#gg0000").is_err());
    assert!(Rgba8::parse_hex("#é00").is_err());
}

#[test]
fn colour_serde_uses_hex_strings() {
    let c: Rgba8 = serde_json::from_str("\"#ff0\"").unwrap();
    assert_eq!(c, Rgba8::rgb(255, 255, 0));
    assert_eq!(serde_json::to_string(&c).unwrap(), "\"#ffff00\"");
    assert!(serde_json::from_str::<Rgba8>("\"red\"").is_err());
}

#[test]
fn premul_scales_channels_by_alpha() {
    let c = Rgba8 {
        r: 200,
        g: 100,
        b: 0,
        a: 128,
    };
    assert_eq!(c.to_premul(), [100, 50, 0, 128]);
    assert_eq!(Rgba8::WHITE.to_premul(), [255, 255, 255, 255]);
}

#[test]
fn text_anchor_serializes_snake_case() {
    assert_eq!(serde_json::to_string(&TextAnchor::Center).unwrap(), "\"center\"");
    assert_eq!(
        serde_json::from_str::<TextAnchor>("\"baseline\"").unwrap(),
        TextAnchor::Baseline
    );
}
