//! Stroke composer.
//!
//! Every frame is drawn in a fixed order: base track, warning zones, main fill, border overlay,
//! glow. Geometry is laid out around the canvas center.

use crate::foundation::core::{Affine, BezPath, Rect, clamp_finite};
use crate::geometry::{
    ArcAngles, BarLayout, PATH_TOLERANCE, SegmentLayout, arc_path, arc_segment_layout,
    rounded_rect_path,
};
use crate::paint::Paint;
use crate::preset::model::GaugeMode;
use crate::preset::resolve::{
    ArcSpec, BarSpec, GlowConfig, MainFill, ResolvedPreset, Segmentation, WarningZones,
};
use crate::render::glow::draw_glow;
use crate::render::surface::{Blend, LineCap, StrokeStyle, Surface};

/// Draw the gauge selected by `preset.mode` at `progress` (clamped to `0..=1`).
pub fn draw_gauge(surface: &mut Surface, preset: &ResolvedPreset, progress: f64) {
    match preset.mode {
        GaugeMode::Arc => draw_arc_gauge(surface, preset, progress),
        GaugeMode::Bar => draw_bar_gauge(surface, preset, progress),
    }
}

/// Draw the arc gauge described by `preset.arc`.
pub fn draw_arc_gauge(surface: &mut Surface, preset: &ResolvedPreset, progress: f64) {
    draw_track(surface, preset, Track::arc(preset.arc), progress);
}

/// Draw the bar gauge described by `preset.bar`.
pub fn draw_bar_gauge(surface: &mut Surface, preset: &ResolvedPreset, progress: f64) {
    draw_track(surface, preset, Track::bar(preset.bar), progress);
}

/// The shape-specific half of drawing: where a span of the track lies and how it is painted.
#[derive(Clone, Copy, Debug)]
enum Track {
    Arc { spec: ArcSpec, angles: ArcAngles },
    Bar { spec: BarSpec, layout: BarLayout },
}

impl Track {
    fn arc(spec: ArcSpec) -> Self {
        Self::Arc {
            spec,
            angles: ArcAngles::for_opening(spec.opening),
        }
    }

    fn bar(spec: BarSpec) -> Self {
        Self::Bar {
            spec,
            layout: BarLayout::new(&spec),
        }
    }

    fn thickness(&self) -> f64 {
        match self {
            Self::Arc { spec, .. } => spec.thickness,
            Self::Bar { spec, .. } => spec.thickness,
        }
    }

    /// Radians for arcs, pixels for bars.
    fn extent(&self) -> f64 {
        match self {
            Self::Arc { angles, .. } => angles.sweep,
            Self::Bar { spec, .. } => spec.length,
        }
    }

    /// Gradient axis rectangle.
    fn bounds(&self) -> Rect {
        match self {
            Self::Arc { spec, .. } => {
                let r = spec.radius;
                Rect::new(-r, -r, r, r)
            }
            Self::Bar { spec, layout } => layout.full_rect(spec.thickness),
        }
    }

    fn cap(&self) -> LineCap {
        match self {
            Self::Arc { spec, .. } if spec.round_caps => LineCap::Round,
            _ => LineCap::Butt,
        }
    }

    fn segment_layout(&self, seg: &Segmentation) -> SegmentLayout {
        let gap = seg.gap_for(self.thickness());
        match self {
            Self::Arc { spec, .. } => arc_segment_layout(spec, seg.count, gap),
            Self::Bar { spec, .. } => SegmentLayout::new(spec.length, seg.count, gap),
        }
    }

    /// Path for `[offset, offset + len]` along the track. Arcs yield the centerline, bars the
    /// filled rounded rect at `thickness`.
    fn span_path(&self, offset: f64, len: f64, thickness: f64) -> Option<BezPath> {
        if len <= 0.0 || thickness <= 0.0 {
            return None;
        }
        match self {
            Self::Arc { spec, angles } => arc_path(spec.radius, angles.start + offset, len),
            Self::Bar { spec, layout } => rounded_rect_path(
                layout.span_rect(offset, len, thickness),
                spec.corner_radius,
            ),
        }
    }

    fn draw_span(
        &self,
        surface: &mut Surface,
        local: Affine,
        path: &BezPath,
        thickness: f64,
        paint: &Paint,
    ) {
        match self {
            Self::Arc { .. } => surface.stroke(
                path,
                local,
                StrokeStyle::new(thickness, self.cap()),
                paint,
                Blend::Normal,
            ),
            Self::Bar { .. } => surface.fill(path, local, paint, Blend::Normal),
        }
    }

    /// Closed outline of a drawn span.
    fn outline(&self, path: &BezPath) -> BezPath {
        match self {
            Self::Arc { .. } => kurbo::stroke(
                path.iter(),
                &StrokeStyle::new(self.thickness(), self.cap()).to_kurbo(),
                &kurbo::StrokeOpts::default(),
                PATH_TOLERANCE,
            ),
            Self::Bar { .. } => path.clone(),
        }
    }

    /// Round-capped arcs always glow as one path.
    fn glows_per_segment(&self, glow: &GlowConfig) -> bool {
        match self {
            Self::Arc { spec, .. } => glow.per_segment && !spec.round_caps,
            Self::Bar { .. } => glow.per_segment,
        }
    }
}

/// One drawn piece of the main fill.
struct Piece {
    path: BezPath,
    paint: Paint,
}

fn draw_track(surface: &mut Surface, preset: &ResolvedPreset, track: Track, progress: f64) {
    let progress = clamp_finite(progress, 0.0, 1.0);
    let local = Affine::translate(surface.canvas().center().to_vec2());
    let thickness = track.thickness();
    let extent = track.extent();
    let main_paint = preset.main.fill.paint_over(track.bounds());

    if let Some(base) = preset.base {
        let width = base.thickness(thickness);
        if let Some(path) = track.span_path(0.0, extent, width) {
            track.draw_span(surface, local, &path, width, &Paint::Solid(base.color));
        }
    }

    draw_warning_zones(surface, local, &track, &preset.warnings);

    let pieces = main_pieces(&track, &preset.main, &main_paint, progress);
    for p in &pieces {
        track.draw_span(surface, local, &p.path, thickness, &p.paint);
    }

    if let Some(border) = preset.main.border {
        let style = StrokeStyle::new(border.width(thickness), LineCap::Butt);
        let paint = Paint::Solid(border.color);
        for p in &pieces {
            surface.stroke(&track.outline(&p.path), local, style, &paint, Blend::Normal);
        }
    }

    let glow = &preset.glow;
    if !glow.enabled {
        return;
    }
    if preset.main.segments.is_some() && track.glows_per_segment(glow) {
        for p in &pieces {
            draw_glow(surface, &p.path, local, thickness, track.cap(), &p.paint, glow);
        }
    } else if let Some(path) = track.span_path(0.0, extent * progress, thickness) {
        draw_glow(surface, &path, local, thickness, track.cap(), &main_paint, glow);
    }
}

fn main_pieces(track: &Track, main: &MainFill, main_paint: &Paint, progress: f64) -> Vec<Piece> {
    let thickness = track.thickness();
    let Some(seg) = &main.segments else {
        return track
            .span_path(0.0, track.extent() * progress, thickness)
            .map(|path| Piece {
                path,
                paint: main_paint.clone(),
            })
            .into_iter()
            .collect();
    };

    let layout = track.segment_layout(seg);
    layout
        .visible(progress)
        .filter_map(|span| {
            let path = track.span_path(span.offset, span.extent, thickness)?;
            Some(Piece {
                path,
                paint: Paint::Solid(main.fill.sample(span.midpoint)),
            })
        })
        .collect()
}

#[cfg(feature = "warning-zones")]
fn draw_warning_zones(surface: &mut Surface, local: Affine, track: &Track, zones: &WarningZones) {
    let extent = track.extent();
    let thickness = track.thickness();
    let bounds = track.bounds();
    let spans = [
        zones.start.as_ref().map(|z| (0.0, z)),
        zones
            .end
            .as_ref()
            .map(|z| (extent * (1.0 - z.length_pct), z)),
    ];
    for (offset, zone) in spans.into_iter().flatten() {
        if let Some(path) = track.span_path(offset, extent * zone.length_pct, thickness) {
            track.draw_span(surface, local, &path, thickness, &zone.fill.paint_over(bounds));
        }
    }
}

// Warning zones stay in the resolved preset but are not rendered in this build.
#[cfg(not(feature = "warning-zones"))]
fn draw_warning_zones(
    _surface: &mut Surface,
    _local: Affine,
    _track: &Track,
    _zones: &WarningZones,
) {
}

#[cfg(test)]
#[path = "../../tests/unit/render/compose.rs"]
mod tests;
