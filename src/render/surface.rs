use crate::foundation::color::ColorDef;
use crate::foundation::core::{Affine, BezPath, Canvas, FrameRGBA};
use crate::foundation::error::{GaugeError, GaugeResult};
use crate::paint::Paint;

/// How a draw combines with what is already on the surface.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Blend {
    /// Source-over.
    #[default]
    Normal,
    /// Channel-wise sum, saturating. Overlapping passes brighten.
    Additive,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum LineCap {
    #[default]
    Butt,
    Round,
}

/// Stroke width and end caps. Joins are always mitered.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StrokeStyle {
    pub width: f64,
    pub cap: LineCap,
}

impl StrokeStyle {
    pub fn new(width: f64, cap: LineCap) -> Self {
        Self { width, cap }
    }

    pub(crate) fn to_kurbo(self) -> kurbo::Stroke {
        let cap = match self.cap {
            LineCap::Butt => kurbo::Cap::Butt,
            LineCap::Round => kurbo::Cap::Round,
        };
        kurbo::Stroke::new(self.width)
            .with_caps(cap)
            .with_join(kurbo::Join::Miter)
            .with_miter_limit(10.0)
    }

    fn to_cpu(self) -> vello_cpu::kurbo::Stroke {
        let cap = match self.cap {
            LineCap::Butt => vello_cpu::kurbo::Cap::Butt,
            LineCap::Round => vello_cpu::kurbo::Cap::Round,
        };
        vello_cpu::kurbo::Stroke::new(self.width)
            .with_caps(cap)
            .with_join(vello_cpu::kurbo::Join::Miter)
            .with_miter_limit(10.0)
    }
}

/// A raster target backed by `vello_cpu`.
///
/// Draw calls are recorded into the context and rasterized by [`Surface::snapshot`]. A
/// surface can be reused across frames; [`Surface::reset`] drops all recorded work and the base
/// transform so nothing carries over.
pub struct Surface {
    ctx: vello_cpu::RenderContext,
    pixmap: vello_cpu::Pixmap,
    canvas: Canvas,
    base: Affine,
}

impl std::fmt::Debug for Surface {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Surface")
            .field("canvas", &self.canvas)
            .field("base", &self.base)
            .finish_non_exhaustive()
    }
}

impl Surface {
    pub fn new(canvas: Canvas) -> GaugeResult<Self> {
        let w: u16 = canvas
            .width
            .try_into()
            .map_err(|_| GaugeError::render("surface width exceeds u16"))?;
        let h: u16 = canvas
            .height
            .try_into()
            .map_err(|_| GaugeError::render("surface height exceeds u16"))?;
        if w == 0 || h == 0 {
            return Err(GaugeError::render("surface width/height must be > 0"));
        }
        Ok(Self {
            ctx: vello_cpu::RenderContext::new(w, h),
            pixmap: vello_cpu::Pixmap::new(w, h),
            canvas,
            base: Affine::IDENTITY,
        })
    }

    pub fn canvas(&self) -> Canvas {
        self.canvas
    }

    /// Clear all recorded drawing and restore the identity base transform.
    pub fn reset(&mut self) {
        self.ctx.reset();
        self.base = Affine::IDENTITY;
    }

    /// Transform applied before every draw's own transform.
    pub fn base_transform(&self) -> Affine {
        self.base
    }

    pub fn set_base_transform(&mut self, base: Affine) {
        self.base = base;
    }

    /// Cover the whole surface with `color`, ignoring the base transform.
    pub fn fill_background(&mut self, color: ColorDef) {
        let ctx = &mut self.ctx;
        ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
        ctx.set_paint_transform(vello_cpu::kurbo::Affine::IDENTITY);
        ctx.set_blend_mode(vello_cpu::peniko::BlendMode::default());
        ctx.set_paint(color_to_cpu(color));
        ctx.fill_rect(&vello_cpu::kurbo::Rect::new(
            0.0,
            0.0,
            f64::from(self.canvas.width),
            f64::from(self.canvas.height),
        ));
    }

    /// Fill `path` (in local coordinates) with `paint`.
    pub fn fill(&mut self, path: &BezPath, local: Affine, paint: &Paint, blend: Blend) {
        self.prepare(local, paint, blend);
        self.ctx.fill_path(&bezpath_to_cpu(path));
        self.restore_blend(blend);
    }

    /// Stroke `path` (in local coordinates) with `paint`.
    pub fn stroke(
        &mut self,
        path: &BezPath,
        local: Affine,
        style: StrokeStyle,
        paint: &Paint,
        blend: Blend,
    ) {
        if style.width <= 0.0 {
            return;
        }
        self.prepare(local, paint, blend);
        self.ctx.set_stroke(style.to_cpu());
        self.ctx.stroke_path(&bezpath_to_cpu(path));
        self.restore_blend(blend);
    }

    /// Rasterize everything recorded since the last reset.
    pub fn snapshot(&mut self) -> FrameRGBA {
        self.pixmap.data_as_u8_slice_mut().fill(0);
        self.ctx.flush();
        self.ctx.render_to_pixmap(&mut self.pixmap);
        FrameRGBA {
            width: self.canvas.width,
            height: self.canvas.height,
            data: self.pixmap.data_as_u8_slice().to_vec(),
            premultiplied: true,
        }
    }

    fn prepare(&mut self, local: Affine, paint: &Paint, blend: Blend) {
        let ctx = &mut self.ctx;
        ctx.set_transform(affine_to_cpu(self.base * local));
        ctx.set_paint_transform(vello_cpu::kurbo::Affine::IDENTITY);
        if blend == Blend::Additive {
            ctx.set_blend_mode(vello_cpu::peniko::BlendMode::new(
                vello_cpu::peniko::Mix::Normal,
                vello_cpu::peniko::Compose::Plus,
            ));
        }
        match paint {
            Paint::Solid(c) => ctx.set_paint(color_to_cpu(*c)),
            Paint::Linear { start, end, stops } => {
                let stops: Vec<vello_cpu::peniko::ColorStop> = stops
                    .iter()
                    .map(|s| vello_cpu::peniko::ColorStop {
                        offset: s.pos as f32,
                        color: color_to_cpu(s.color).into(),
                    })
                    .collect();
                let gradient = vello_cpu::peniko::Gradient::new_linear(
                    vello_cpu::kurbo::Point::new(start.x, start.y),
                    vello_cpu::kurbo::Point::new(end.x, end.y),
                )
                .with_stops(stops.as_slice());
                ctx.set_paint(gradient);
            }
        }
    }

    fn restore_blend(&mut self, blend: Blend) {
        if blend == Blend::Additive {
            self.ctx
                .set_blend_mode(vello_cpu::peniko::BlendMode::default());
        }
    }
}

fn color_to_cpu(c: ColorDef) -> vello_cpu::peniko::Color {
    vello_cpu::peniko::Color::new([c.r as f32, c.g as f32, c.b as f32, c.a as f32])
}

fn affine_to_cpu(a: Affine) -> vello_cpu::kurbo::Affine {
    vello_cpu::kurbo::Affine::new(a.as_coeffs())
}

fn bezpath_to_cpu(path: &BezPath) -> vello_cpu::kurbo::BezPath {
    use kurbo::PathEl;

    let pt = |p: kurbo::Point| vello_cpu::kurbo::Point::new(p.x, p.y);
    let mut out = vello_cpu::kurbo::BezPath::new();
    for &el in path.elements() {
        match el {
            PathEl::MoveTo(p) => out.move_to(pt(p)),
            PathEl::LineTo(p) => out.line_to(pt(p)),
            PathEl::QuadTo(p1, p2) => out.quad_to(pt(p1), pt(p2)),
            PathEl::CurveTo(p1, p2, p3) => out.curve_to(pt(p1), pt(p2), pt(p3)),
            PathEl::ClosePath => out.close_path(),
        }
    }
    out
}
