use crate::foundation::core::Rgba8;
use crate::foundation::error::{TweenError, TweenResult};
use crate::foundation::math::{mul_div255_u16, unpremultiply_px};
use crate::render::backend::FrameRGBA;

/// How a sink turns surface frames into output pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PixelMode {
    /// Straight (unpremultiplied) RGBA, alpha preserved.
    Straight,
    /// Opaque RGBA composited over a background colour.
    Flatten(Rgba8),
}

impl PixelMode {
    /// Convert `frame` into `dst`, resizing it as needed.
    pub fn convert(self, frame: &FrameRGBA, dst: &mut Vec<u8>) -> TweenResult<()> {
        check_len(frame)?;
        dst.clear();
        dst.extend_from_slice(&frame.data);
        match self {
            Self::Straight if frame.premultiplied => {
                for px in dst.chunks_exact_mut(4) {
                    px.copy_from_slice(&unpremultiply_px([px[0], px[1], px[2], px[3]]));
                }
            }
            Self::Straight => {}
            Self::Flatten(bg) => {
                for px in dst.chunks_exact_mut(4) {
                    let out = flatten_px([px[0], px[1], px[2], px[3]], frame.premultiplied, bg);
                    px.copy_from_slice(&out);
                }
            }
        }
        Ok(())
    }
}

fn check_len(frame: &FrameRGBA) -> TweenResult<()> {
    let expected = frame.width as usize * frame.height as usize * 4;
    if frame.data.len() != expected {
        return Err(TweenError::validation(format!(
            "frame holds {} bytes, expected {expected} for {}x{} rgba8",
            frame.data.len(),
            frame.width,
            frame.height
        )));
    }
    Ok(())
}

/// Composite one pixel over an opaque copy of `bg` (source-over).
pub(crate) fn flatten_px(px: [u8; 4], premultiplied: bool, bg: Rgba8) -> [u8; 4] {
    let a = u16::from(px[3]);
    if a == 255 {
        return px;
    }
    let inv = 255 - a;
    let over = |c: u8, bg_c: u8| -> u8 {
        let src = if premultiplied {
            u16::from(c)
        } else {
            mul_div255_u16(u16::from(c), a)
        };
        (src + mul_div255_u16(u16::from(bg_c), inv)).min(255) as u8
    };
    [over(px[0], bg.r), over(px[1], bg.g), over(px[2], bg.b), 255]
}

#[cfg(test)]
#[path = "../../tests/unit/encode/pixels.rs"]
mod tests;
