use super::*;

fn one(px: [u8; 4], premultiplied: bool) -> FrameRGBA {
    FrameRGBA {
        width: 1,
        height: 1,
        data: px.to_vec(),
        premultiplied,
    }
}

#[test]
fn transparent_pixel_flattens_to_background() {
    let mut out = Vec::new();
    PixelMode::Flatten(Rgba8::rgb(10, 20, 30))
        .convert(&one([0, 0, 0, 0], true), &mut out)
        .unwrap();
    assert_eq!(out, [10, 20, 30, 255]);
}

#[test]
fn opaque_pixels_pass_through_both_modes() {
    let mut out = Vec::new();
    PixelMode::Flatten(Rgba8::WHITE)
        .convert(&one([1, 2, 3, 255], true), &mut out)
        .unwrap();
    assert_eq!(out, [1, 2, 3, 255]);
    PixelMode::Straight
        .convert(&one([1, 2, 3, 255], true), &mut out)
        .unwrap();
    assert_eq!(out, [1, 2, 3, 255]);
}

#[test]
fn half_red_over_white_is_pink() {
    let mut premul = Vec::new();
    PixelMode::Flatten(Rgba8::WHITE)
        .convert(&one([128, 0, 0, 128], true), &mut premul)
        .unwrap();
    let mut straight = Vec::new();
    PixelMode::Flatten(Rgba8::WHITE)
        .convert(&one([255, 0, 0, 128], false), &mut straight)
        .unwrap();
    for out in [premul, straight] {
        assert_eq!(out[0], 255);
        assert!((126..=128).contains(&out[1]), "{out:?}");
        assert_eq!(out[3], 255);
    }
}

#[test]
fn straight_mode_keeps_alpha() {
    let mut out = Vec::new();
    PixelMode::Straight
        .convert(&one([64, 0, 0, 128], true), &mut out)
        .unwrap();
    assert_eq!(out[3], 128);
    assert!((126..=129).contains(&out[0]), "{out:?}");
}

#[test]
fn short_buffers_are_rejected() {
    let frame = FrameRGBA {
        width: 2,
        height: 1,
        data: vec![0; 4],
        premultiplied: true,
    };
    assert!(PixelMode::Straight.convert(&frame, &mut Vec::new()).is_err());
}
