use std::collections::HashMap;
use std::sync::Arc;

use crate::assets::store::{AssetStore, PreparedImage};
use crate::assets::text::{TextBrushRgba8, TextLayoutEngine};
use crate::foundation::core::{Affine, BezPath, Canvas, Point, Rect, Rgba8, TextAnchor};
use crate::foundation::error::{TweenError, TweenResult};
use crate::render::backend::{FrameRGBA, RasterSurface};
use crate::render::surface::{StateStack, Surface};

/// CPU raster surface backed by `vello_cpu`.
///
/// Draw calls are queued into a `vello_cpu::RenderContext` and rasterized on
/// [`RasterSurface::readback`]. Frames are premultiplied RGBA8 over the configured background.
pub struct CpuSurface {
    canvas: Canvas,
    background: Rgba8,
    ctx: vello_cpu::RenderContext,
    pixmap: vello_cpu::Pixmap,
    stack: StateStack,
    images: HashMap<String, vello_cpu::Image>,
    font: Option<vello_cpu::peniko::FontData>,
    text: Option<TextLayoutEngine>,
    warned_no_font: bool,
}

impl std::fmt::Debug for CpuSurface {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CpuSurface")
            .field("canvas", &self.canvas)
            .field("background", &self.background)
            .field("images", &self.images.len())
            .field("font", &self.font.is_some())
            .finish_non_exhaustive()
    }
}

impl CpuSurface {
    /// Surface of `canvas` size with every prepared image and the label font uploaded.
    pub fn new(canvas: Canvas, background: Rgba8, assets: &AssetStore) -> TweenResult<Self> {
        canvas.validate()?;
        let (w, h) = canvas_u16(canvas)?;

        let mut images = HashMap::new();
        for (key, img) in assets.images() {
            images.insert(key.to_owned(), image_paint(img)?);
        }

        let (font, text) = match assets.font() {
            Some(bytes) => {
                let engine = TextLayoutEngine::new(bytes.as_slice())?;
                let data = vello_cpu::peniko::FontData::new(
                    vello_cpu::peniko::Blob::from(bytes.as_ref().clone()),
                    0,
                );
                (Some(data), Some(engine))
            }
            None => (None, None),
        };

        let mut surface = Self {
            canvas,
            background,
            ctx: vello_cpu::RenderContext::new(w, h),
            pixmap: vello_cpu::Pixmap::new(w, h),
            stack: StateStack::default(),
            images,
            font,
            text,
            warned_no_font: false,
        };
        surface.clear();
        Ok(surface)
    }

    /// Background the surface clears to.
    pub fn background(&self) -> Rgba8 {
        self.background
    }

    fn with_opacity(&mut self, draw: impl FnOnce(&mut vello_cpu::RenderContext)) {
        let alpha = self.stack.current().alpha as f32;
        if alpha <= 0.0 {
            return;
        }
        if alpha < 1.0 {
            self.ctx.push_opacity_layer(alpha);
        }
        draw(&mut self.ctx);
        if alpha < 1.0 {
            self.ctx.pop_layer();
        }
    }
}

impl Surface for CpuSurface {
    fn canvas(&self) -> Canvas {
        self.canvas
    }

    fn stack(&self) -> &StateStack {
        &self.stack
    }

    fn stack_mut(&mut self) -> &mut StateStack {
        &mut self.stack
    }

    fn clear(&mut self) {
        self.ctx.reset();
        if self.background.a == 0 {
            return;
        }
        let bg = self.background;
        self.ctx.set_paint_transform(vello_cpu::kurbo::Affine::IDENTITY);
        self.ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
        self.ctx
            .set_paint(vello_cpu::peniko::Color::from_rgba8(bg.r, bg.g, bg.b, bg.a));
        self.ctx.fill_rect(&vello_cpu::kurbo::Rect::new(
            0.0,
            0.0,
            f64::from(self.canvas.width),
            f64::from(self.canvas.height),
        ));
    }

    fn fill_path(&mut self, path: &BezPath) {
        let s = *self.stack.current();
        if s.fill.a == 0 {
            return;
        }
        self.ctx.set_paint_transform(vello_cpu::kurbo::Affine::IDENTITY);
        self.ctx.set_transform(affine_to_cpu(s.transform));
        self.ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(
            s.fill.r, s.fill.g, s.fill.b, s.fill.a,
        ));
        let cpu_path = bezpath_to_cpu(path);
        self.with_opacity(|ctx| ctx.fill_path(&cpu_path));
    }

    fn stroke_path(&mut self, path: &BezPath) {
        let s = *self.stack.current();
        if s.stroke.a == 0 || s.line_width <= 0.0 {
            return;
        }
        self.ctx.set_paint_transform(vello_cpu::kurbo::Affine::IDENTITY);
        self.ctx.set_transform(affine_to_cpu(s.transform));
        self.ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(
            s.stroke.r, s.stroke.g, s.stroke.b, s.stroke.a,
        ));
        self.ctx.set_stroke(vello_cpu::kurbo::Stroke::new(s.line_width));
        let cpu_path = bezpath_to_cpu(path);
        self.with_opacity(|ctx| ctx.stroke_path(&cpu_path));
    }

    fn draw_image(&mut self, asset: &str, dest: Rect) {
        let Some(paint) = self.images.get(asset).cloned() else {
            tracing::trace!(asset, "image not loaded, skipping draw");
            return;
        };
        let Some((w, h)) = image_paint_size(&paint) else {
            return;
        };
        if w <= 0.0 || h <= 0.0 || dest.width() <= 0.0 || dest.height() <= 0.0 {
            return;
        }

        let s = *self.stack.current();
        let placement = s.transform
            * Affine::translate(dest.origin().to_vec2())
            * Affine::scale_non_uniform(dest.width() / w, dest.height() / h);
        self.ctx.set_paint_transform(vello_cpu::kurbo::Affine::IDENTITY);
        self.ctx.set_transform(affine_to_cpu(placement));
        self.ctx.set_paint(paint);
        self.with_opacity(|ctx| ctx.fill_rect(&vello_cpu::kurbo::Rect::new(0.0, 0.0, w, h)));
    }

    fn fill_text(&mut self, text: &str, origin: Point, size_px: f32, anchor: TextAnchor) {
        if text.is_empty() {
            return;
        }
        let (Some(engine), Some(font)) = (self.text.as_mut(), self.font.clone()) else {
            if !self.warned_no_font {
                tracing::warn!("no label font configured, text draws are skipped");
                self.warned_no_font = true;
            }
            return;
        };

        let s = *self.stack.current();
        let brush = TextBrushRgba8 {
            r: s.fill.r,
            g: s.fill.g,
            b: s.fill.b,
            a: s.fill.a,
        };
        let layout = match engine.layout_line(text, size_px, brush) {
            Ok(layout) => layout,
            Err(e) => {
                tracing::warn!(error = %e, text, "label layout failed");
                return;
            }
        };
        let top_left = match anchor {
            TextAnchor::Baseline => {
                let baseline = layout
                    .lines()
                    .next()
                    .map(|line| f64::from(line.metrics().baseline))
                    .unwrap_or(0.0);
                (origin.x, origin.y - baseline)
            }
            TextAnchor::Center => (
                origin.x - f64::from(layout.width()) / 2.0,
                origin.y - f64::from(layout.height()) / 2.0,
            ),
        };

        let placement = s.transform * Affine::translate(top_left);
        self.ctx.set_paint_transform(vello_cpu::kurbo::Affine::IDENTITY);
        self.ctx.set_transform(affine_to_cpu(placement));
        self.with_opacity(|ctx| {
            for line in layout.lines() {
                for item in line.items() {
                    let parley::layout::PositionedLayoutItem::GlyphRun(run) = item else {
                        continue;
                    };
                    let brush = run.style().brush;
                    ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(
                        brush.r, brush.g, brush.b, brush.a,
                    ));
                    let glyphs = run.glyphs().map(|g| vello_cpu::Glyph {
                        id: g.id,
                        x: g.x,
                        y: g.y,
                    });
                    ctx.glyph_run(&font)
                        .font_size(run.run().font_size())
                        .fill_glyphs(glyphs);
                }
            }
        });
    }
}

impl RasterSurface for CpuSurface {
    fn readback(&mut self) -> TweenResult<FrameRGBA> {
        clear_pixmap(&mut self.pixmap, [0, 0, 0, 0]);
        self.ctx.flush();
        self.ctx.render_to_pixmap(&mut self.pixmap);
        Ok(FrameRGBA {
            width: self.canvas.width,
            height: self.canvas.height,
            data: self.pixmap.data_as_u8_slice().to_vec(),
            premultiplied: true,
        })
    }
}

fn canvas_u16(canvas: Canvas) -> TweenResult<(u16, u16)> {
    let w: u16 = canvas
        .width
        .try_into()
        .map_err(|_| TweenError::render("canvas width exceeds u16"))?;
    let h: u16 = canvas
        .height
        .try_into()
        .map_err(|_| TweenError::render("canvas height exceeds u16"))?;
    Ok((w, h))
}

fn clear_pixmap(pixmap: &mut vello_cpu::Pixmap, rgba: [u8; 4]) {
    for px in pixmap.data_as_u8_slice_mut().chunks_exact_mut(4) {
        px.copy_from_slice(&rgba);
    }
}

fn image_paint(img: &PreparedImage) -> TweenResult<vello_cpu::Image> {
    let pixmap = image_premul_bytes_to_pixmap(img.rgba8_premul.as_slice(), img.width, img.height)?;
    Ok(vello_cpu::Image {
        image: vello_cpu::ImageSource::Pixmap(Arc::new(pixmap)),
        sampler: vello_cpu::peniko::ImageSampler::default(),
    })
}

fn image_paint_size(image: &vello_cpu::Image) -> Option<(f64, f64)> {
    match &image.image {
        vello_cpu::ImageSource::Pixmap(p) => Some((f64::from(p.width()), f64::from(p.height()))),
        vello_cpu::ImageSource::OpaqueId(_) => None,
    }
}

fn image_premul_bytes_to_pixmap(
    rgba8_premul: &[u8],
    width: u32,
    height: u32,
) -> TweenResult<vello_cpu::Pixmap> {
    let w: u16 = width
        .try_into()
        .map_err(|_| TweenError::asset("image width exceeds u16"))?;
    let h: u16 = height
        .try_into()
        .map_err(|_| TweenError::asset("image height exceeds u16"))?;
    if rgba8_premul.len() != width as usize * height as usize * 4 {
        return Err(TweenError::asset("prepared image byte length mismatch"));
    }

    let mut may_have_opacities = false;
    let pixels = rgba8_premul
        .chunks_exact(4)
        .map(|px| {
            may_have_opacities |= px[3] != 255;
            vello_cpu::peniko::color::PremulRgba8 {
                r: px[0],
                g: px[1],
                b: px[2],
                a: px[3],
            }
        })
        .collect::<Vec<_>>();

    Ok(vello_cpu::Pixmap::from_parts_with_opacity(
        pixels,
        w,
        h,
        may_have_opacities,
    ))
}

fn affine_to_cpu(a: Affine) -> vello_cpu::kurbo::Affine {
    vello_cpu::kurbo::Affine::new(a.as_coeffs())
}

fn point_to_cpu(p: Point) -> vello_cpu::kurbo::Point {
    vello_cpu::kurbo::Point::new(p.x, p.y)
}

fn bezpath_to_cpu(path: &BezPath) -> vello_cpu::kurbo::BezPath {
    use kurbo::PathEl;

    let mut out = vello_cpu::kurbo::BezPath::new();
    for &el in path.elements() {
        match el {
            PathEl::MoveTo(p) => out.move_to(point_to_cpu(p)),
            PathEl::LineTo(p) => out.line_to(point_to_cpu(p)),
            PathEl::QuadTo(p1, p2) => out.quad_to(point_to_cpu(p1), point_to_cpu(p2)),
            PathEl::CurveTo(p1, p2, p3) => {
                out.curve_to(point_to_cpu(p1), point_to_cpu(p2), point_to_cpu(p3));
            }
            PathEl::ClosePath => out.close_path(),
        }
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/render/cpu.rs"]
mod tests;
