//! Fill resolution: solid colors and two-point linear gradients bound to a shape's bounding
//! rectangle, plus discrete gradient sampling for segmented gauges.

use smallvec::SmallVec;

use crate::foundation::color::ColorDef;
use crate::foundation::core::{Point, Rect, clamp_finite};
use crate::preset::model::{FillMode, GradientStop};

const POS_EPSILON: f64 = 1e-6;

pub(crate) type Stops = SmallVec<[GradientStop; 4]>;

/// A normalized fill: stops sorted ascending with positions clamped to `0..=1`.
///
/// Solid fills are the degenerate two-stop case so every draw goes through one code path.
#[derive(Clone, Debug, PartialEq)]
pub struct Fill {
    stops: Stops,
}

impl Fill {
    pub fn solid(color: ColorDef) -> Self {
        Self {
            stops: SmallVec::from_slice(&[
                GradientStop::new(0.0, color),
                GradientStop::new(1.0, color),
            ]),
        }
    }

    /// Build a gradient fill. Fewer than two stops yields `None`.
    pub fn gradient(stops: &[GradientStop]) -> Option<Self> {
        if stops.len() < 2 {
            return None;
        }
        Some(Self {
            stops: sorted_stops(stops),
        })
    }

    /// Resolve a fill specification, substituting [`default_stops`] for an invalid gradient.
    pub fn resolve(mode: FillMode, solid: ColorDef, stops: &[GradientStop]) -> Self {
        match mode {
            FillMode::Solid => Self::solid(solid),
            _ => Self::gradient(stops).unwrap_or_else(|| {
                tracing::warn!(
                    ?mode,
                    stops = stops.len(),
                    "gradient needs at least 2 stops; using defaults"
                );
                Self {
                    stops: sorted_stops(&default_stops(mode)),
                }
            }),
        }
    }

    pub fn stops(&self) -> &[GradientStop] {
        &self.stops
    }

    /// Color at `t` along the gradient axis.
    pub fn sample(&self, t: f64) -> ColorDef {
        sample_sorted(&self.stops, t)
    }

    /// Bind the fill to a shape's bounding rectangle.
    pub fn paint_over(&self, rect: Rect) -> Paint {
        if let Some(c) = self.uniform_color() {
            return Paint::Solid(c);
        }
        let start = Point::new(rect.x0, rect.y0);
        let end = Point::new(rect.x1, rect.y1);
        if (end - start).hypot() <= POS_EPSILON {
            return Paint::Solid(self.stops[0].color);
        }
        Paint::Linear {
            start,
            end,
            stops: self.stops.clone(),
        }
    }

    fn uniform_color(&self) -> Option<ColorDef> {
        let first = self.stops.first()?.color;
        self.stops
            .iter()
            .all(|s| s.color == first)
            .then_some(first)
    }
}

/// Paint bound to geometry, ready for a raster surface.
#[derive(Clone, Debug, PartialEq)]
pub enum Paint {
    Solid(ColorDef),
    /// Linear gradient from `start` to `end` (the bounding rect diagonal).
    Linear {
        start: Point,
        end: Point,
        stops: Stops,
    },
}

impl Paint {
    /// Same paint with every color's alpha multiplied by `mul`.
    pub fn with_alpha_mul(&self, mul: f64) -> Self {
        match self {
            Self::Solid(c) => Self::Solid(c.with_alpha_mul(mul)),
            Self::Linear { start, end, stops } => Self::Linear {
                start: *start,
                end: *end,
                stops: stops
                    .iter()
                    .map(|s| GradientStop::new(s.pos, s.color.with_alpha_mul(mul)))
                    .collect(),
            },
        }
    }
}

/// Fallback stops for gradient fill modes.
pub fn default_stops(mode: FillMode) -> Vec<GradientStop> {
    match mode {
        FillMode::Gradient2 => vec![
            GradientStop::new(0.0, ColorDef::from_rgba8(0x00, 0xFF, 0x00, 255)),
            GradientStop::new(1.0, ColorDef::from_rgba8(0xFF, 0x00, 0x00, 255)),
        ],
        FillMode::Gradient3 => vec![
            GradientStop::new(0.0, ColorDef::from_rgba8(0x00, 0xFF, 0x00, 255)),
            GradientStop::new(0.5, ColorDef::from_rgba8(0xFF, 0xFF, 0x00, 255)),
            GradientStop::new(1.0, ColorDef::from_rgba8(0xFF, 0x00, 0x00, 255)),
        ],
        FillMode::Solid => vec![GradientStop::new(
            0.0,
            ColorDef::from_rgba8(0xFF, 0xFF, 0xFF, 255),
        )],
    }
}

/// Sample a stop list at `t` with per-channel linear interpolation.
///
/// Stops need not be sorted. `t` is clamped to `0..=1`; values outside the stop range take the
/// nearest boundary color. An empty list samples as transparent.
pub fn sample_gradient(stops: &[GradientStop], t: f64) -> ColorDef {
    sample_sorted(&sorted_stops(stops), t)
}

fn sorted_stops(stops: &[GradientStop]) -> Stops {
    let mut out: Stops = stops
        .iter()
        .map(|s| GradientStop::new(clamp_finite(s.pos, 0.0, 1.0), s.color))
        .collect();
    // Stable, so equal positions keep their authored order.
    out.sort_by(|a, b| a.pos.total_cmp(&b.pos));
    out
}

fn sample_sorted(stops: &[GradientStop], t: f64) -> ColorDef {
    let (Some(first), Some(last)) = (stops.first(), stops.last()) else {
        return ColorDef::TRANSPARENT;
    };
    let t = clamp_finite(t, 0.0, 1.0);
    if t <= first.pos {
        return first.color;
    }
    if t >= last.pos {
        return last.color;
    }
    for pair in stops.windows(2) {
        let (a, b) = (pair[0], pair[1]);
        if a.pos <= t && t <= b.pos {
            let tt = (t - a.pos) / (b.pos - a.pos).max(POS_EPSILON);
            return a.color.lerp(b.color, tt);
        }
    }
    last.color
}

#[cfg(test)]
#[path = "../tests/unit/paint.rs"]
mod tests;
