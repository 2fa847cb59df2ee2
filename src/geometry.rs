//! Geometry resolution for both gauge shapes.
//!
//! All coordinates are relative to the canvas center; the composer translates them into pixel
//! space. Angles are radians in the y-down raster frame, so positive sweeps run clockwise on
//! screen.

use std::f64::consts::PI;

use kurbo::{Shape, Size};

use crate::foundation::core::{BezPath, Point, Rect};
use crate::preset::model::{BarOrientation, OpeningDirection};
use crate::preset::resolve::{ArcSpec, BarSpec, GaugeShape, ResolvedPreset};

/// Angular extent of every arc gauge: 270°.
pub const ARC_SWEEP: f64 = 1.5 * PI;

/// Padding added around the content envelope by [`compute_content_bounds`].
pub const CONTENT_PADDING: f64 = 20.0;

pub(crate) const PATH_TOLERANCE: f64 = 0.1;

/// `progress * count` within this distance of a whole number counts as that whole number.
const WIPE_SNAP: f64 = 1e-9;

/// Center of the 90° gap, in degrees.
pub fn opening_degrees(dir: OpeningDirection) -> f64 {
    match dir {
        OpeningDirection::Right => 0.0,
        OpeningDirection::Bottom => 90.0,
        OpeningDirection::Left => 180.0,
        OpeningDirection::Top => 270.0,
    }
}

/// Start angle and sweep of an arc gauge.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ArcAngles {
    pub start: f64,
    pub sweep: f64,
}

impl ArcAngles {
    pub fn for_opening(dir: OpeningDirection) -> Self {
        Self {
            start: (opening_degrees(dir) + 45.0).to_radians(),
            sweep: ARC_SWEEP,
        }
    }

    /// Angle reached after covering `fraction` of the sweep.
    pub fn at(&self, fraction: f64) -> f64 {
        self.start + self.sweep * fraction
    }
}

/// Centerline of an arc from `start` through `sweep` radians. `None` when nothing would draw.
pub fn arc_path(radius: f64, start: f64, sweep: f64) -> Option<BezPath> {
    if radius <= 0.0 || sweep <= 0.0 {
        return None;
    }
    let arc = kurbo::Arc::new(Point::ZERO, (radius, radius), start, sweep, 0.0);
    Some(arc.to_path(PATH_TOLERANCE))
}

/// Rounded rectangle outline with the radius clamped to half the short side. `None` for empty
/// rects.
pub fn rounded_rect_path(rect: Rect, radius: f64) -> Option<BezPath> {
    if rect.width() <= 0.0 || rect.height() <= 0.0 {
        return None;
    }
    let r = radius.clamp(0.0, rect.width().min(rect.height()) / 2.0);
    Some(kurbo::RoundedRect::from_rect(rect, r).to_path(PATH_TOLERANCE))
}

/// Long-axis layout of a bar gauge, centered on the origin.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BarLayout {
    pub orientation: BarOrientation,
    pub reversed: bool,
    pub length: f64,
}

impl BarLayout {
    pub fn new(bar: &BarSpec) -> Self {
        Self {
            orientation: bar.orientation,
            reversed: bar.reversed(),
            length: bar.length,
        }
    }

    /// Rect covering `[offset, offset + len]` measured from the zero end, `thickness` wide.
    pub fn span_rect(&self, offset: f64, len: f64, thickness: f64) -> Rect {
        let axis0 = -self.length / 2.0;
        let from = if self.reversed {
            axis0 + self.length - (offset + len)
        } else {
            axis0 + offset
        };
        let across = -thickness / 2.0;
        match self.orientation {
            BarOrientation::Horizontal => Rect::new(from, across, from + len, across + thickness),
            BarOrientation::Vertical => Rect::new(across, from, across + thickness, from + len),
        }
    }

    /// The whole track.
    pub fn full_rect(&self, thickness: f64) -> Rect {
        self.span_rect(0.0, self.length, thickness)
    }
}

/// Equal-extent segments separated by fixed gaps along a track of total `extent`.
///
/// `extent` and `gap` share a unit: pixels for bars, radians for arcs.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SegmentLayout {
    pub count: u32,
    pub gap: f64,
    pub seg_extent: f64,
}

impl SegmentLayout {
    /// Build a layout. The gap shrinks when needed so no segment extent goes negative.
    pub fn new(extent: f64, count: u32, gap: f64) -> Self {
        let count = count.max(1);
        let extent = extent.max(0.0);
        let gaps = f64::from(count - 1);
        let gap = if gaps > 0.0 {
            gap.clamp(0.0, extent / gaps)
        } else {
            0.0
        };
        Self {
            count,
            gap,
            seg_extent: ((extent - gaps * gap) / f64::from(count)).max(0.0),
        }
    }

    /// Offset of segment `i` from the track start.
    pub fn offset(&self, i: u32) -> f64 {
        f64::from(i) * (self.seg_extent + self.gap)
    }

    /// Visible portion of segment `i` at `progress`: 1 for passed segments, the remainder for
    /// the boundary segment, 0 after it.
    pub fn wipe_fraction(&self, progress: f64, i: u32) -> f64 {
        let mut filled = progress.clamp(0.0, 1.0) * f64::from(self.count);
        // `i / n * n` can land a hair above `i`.
        if (filled - filled.round()).abs() < WIPE_SNAP {
            filled = filled.round();
        }
        let whole = filled.floor();
        let i = f64::from(i);
        if i < whole {
            1.0
        } else if i == whole {
            filled - whole
        } else {
            0.0
        }
    }

    /// Segments with a non-zero visible extent at `progress`, in track order.
    pub fn visible(&self, progress: f64) -> impl Iterator<Item = SegmentSpan> + '_ {
        (0..self.count).filter_map(move |i| {
            let fraction = self.wipe_fraction(progress, i);
            (fraction > 0.0).then(|| SegmentSpan {
                index: i,
                offset: self.offset(i),
                extent: self.seg_extent * fraction,
                midpoint: (f64::from(i) + 0.5) / f64::from(self.count),
            })
        })
    }
}

/// One drawn segment.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SegmentSpan {
    pub index: u32,
    pub offset: f64,
    /// Visible extent, after the wipe fraction.
    pub extent: f64,
    /// Gradient sample position for this segment's color.
    pub midpoint: f64,
}

/// Arc segments use the pixel gap converted to an angle at the stroke radius.
pub fn arc_segment_layout(arc: &ArcSpec, count: u32, gap_px: f64) -> SegmentLayout {
    let gap = if arc.radius > 0.0 {
        gap_px / arc.radius
    } else {
        0.0
    };
    SegmentLayout::new(ARC_SWEEP, count, gap)
}

/// Size of the envelope a gauge occupies, glow and padding included.
pub fn compute_content_bounds(preset: &ResolvedPreset) -> Size {
    let base = |main: f64| preset.base.map_or(0.0, |b| b.thickness(main));
    match preset.shape() {
        GaugeShape::Arc(arc) => {
            let glow = preset.glow.outer_line_width(arc.thickness);
            let half = arc.thickness.max(base(arc.thickness)).max(glow) / 2.0;
            let cap = if arc.round_caps { half } else { 0.0 };
            let side = (arc.radius + half + cap) * 2.0 + CONTENT_PADDING * 2.0;
            Size::new(side, side)
        }
        GaugeShape::Bar(bar) => {
            let glow = preset.glow.outer_line_width(bar.thickness);
            let across = bar.thickness.max(base(bar.thickness)).max(glow) + CONTENT_PADDING;
            let along = bar.length + glow + CONTENT_PADDING;
            match bar.orientation {
                BarOrientation::Horizontal => Size::new(along, across),
                BarOrientation::Vertical => Size::new(across, along),
            }
        }
    }
}

/// Uniform scale that fits `content` into `target`, never enlarging.
pub fn fit_scale(target: Size, content: Size) -> f64 {
    let axis = |t: f64, c: f64| if c > 0.0 { t / c } else { 1.0 };
    axis(target.width, content.width)
        .min(axis(target.height, content.height))
        .min(1.0)
}

#[cfg(test)]
#[path = "../tests/unit/geometry.rs"]
mod tests;
