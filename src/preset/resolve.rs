use crate::foundation::color::ColorDef;
use crate::foundation::core::{Canvas, clamp_finite, non_negative};
use crate::paint::Fill;
use crate::preset::model::{
    Background, BarDirection, BarOrientation, GaugeMode, GlowMode, GlowOptions, OpeningDirection,
    Preset, WarningSide,
};

/// Lowest continuous-mode state count.
pub const MIN_CONTINUOUS_STATES: u32 = 2;
/// Highest continuous-mode state count.
pub const MAX_CONTINUOUS_STATES: u32 = 101;
/// Segment counts are clamped into `1..=MAX_SEGMENTS`.
pub const MAX_SEGMENTS: u32 = 100;
/// Segment gaps never exceed this multiple of the stroke thickness.
pub const MAX_GAP_PER_THICKNESS: f64 = 0.8;

const MAX_GLOW_THICKNESS: f64 = 20.0;
const MAX_GLOW_STRENGTH: f64 = 60.0;
const MAX_RING_PASSES: i64 = 12;

/// A preset with every range enforced, ready for the draw path.
///
/// Produced by [`Preset::resolve`]; drawing code reads only this and never re-checks input.
/// Both shape specs are always present so either draw entry point can run regardless of `mode`.
#[derive(Clone, Debug, PartialEq)]
pub struct ResolvedPreset {
    pub canvas: Canvas,
    /// `None` keeps the canvas transparent.
    pub background: Option<ColorDef>,
    pub mode: GaugeMode,
    pub arc: ArcSpec,
    pub bar: BarSpec,
    pub base: Option<BaseTrack>,
    pub main: MainFill,
    pub warnings: WarningZones,
    pub glow: GlowConfig,
    /// Continuous-mode state count, already in `MIN_CONTINUOUS_STATES..=MAX_CONTINUOUS_STATES`.
    pub states: u32,
}

impl ResolvedPreset {
    /// The shape selected by `mode`.
    pub fn shape(&self) -> GaugeShape {
        match self.mode {
            GaugeMode::Arc => GaugeShape::Arc(self.arc),
            GaugeMode::Bar => GaugeShape::Bar(self.bar),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum GaugeShape {
    Arc(ArcSpec),
    Bar(BarSpec),
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ArcSpec {
    pub radius: f64,
    pub thickness: f64,
    pub round_caps: bool,
    pub opening: OpeningDirection,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BarSpec {
    pub orientation: BarOrientation,
    pub direction: BarDirection,
    pub length: f64,
    pub thickness: f64,
    /// Effective corner radius, `0..=thickness/2`; zero when square ends are forced.
    pub corner_radius: f64,
}

impl BarSpec {
    /// Whether the fill grows from the far end of the long axis.
    ///
    /// Horizontal bars honor `rtl`, vertical bars honor `btt`; the other two values mean
    /// "start at the origin" for either orientation.
    pub fn reversed(&self) -> bool {
        match self.orientation {
            BarOrientation::Horizontal => self.direction == BarDirection::Rtl,
            BarOrientation::Vertical => self.direction == BarDirection::Btt,
        }
    }
}

/// Background track. `color` already carries the configured opacity.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BaseTrack {
    pub color: ColorDef,
    /// Multiple of the main thickness; `1` when the track shares the main geometry.
    pub thickness_scale: f64,
}

impl BaseTrack {
    pub fn thickness(&self, main_thickness: f64) -> f64 {
        main_thickness * self.thickness_scale
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct MainFill {
    pub fill: Fill,
    pub segments: Option<Segmentation>,
    pub border: Option<BorderStroke>,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Segmentation {
    pub count: u32,
    /// Requested gap in pixels, finite and non-negative.
    pub gap: f64,
}

impl Segmentation {
    /// Gap for a stroke of `thickness`, capped at `MAX_GAP_PER_THICKNESS * thickness`.
    pub fn gap_for(&self, thickness: f64) -> f64 {
        self.gap.min(thickness * MAX_GAP_PER_THICKNESS)
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BorderStroke {
    pub color: ColorDef,
    /// Line width as a multiple of the main thickness.
    pub thickness_scale: f64,
}

impl BorderStroke {
    pub fn width(&self, main_thickness: f64) -> f64 {
        main_thickness * self.thickness_scale
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct WarningZones {
    pub start: Option<WarningZone>,
    pub end: Option<WarningZone>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct WarningZone {
    /// Fraction of the track, `0..=0.5`.
    pub length_pct: f64,
    pub fill: Fill,
}

/// Normalized glow settings, computed once per frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GlowConfig {
    pub enabled: bool,
    pub mode: GlowMode,
    pub per_segment: bool,
    /// Effective strength, `0..=60`.
    pub strength: f64,
    /// Spread factor shared by soft and ring modes.
    pub thickness: f64,
    /// Spread factor for legacy mode.
    pub legacy_thickness: f64,
    pub halo_inner: bool,
    pub halo_outer: bool,
    pub ring_passes: u32,
}

impl GlowConfig {
    pub fn resolve(raw: &GlowOptions) -> Self {
        let thickness = thickness_curve(raw.thickness);
        let legacy_thickness = raw
            .legacy_thickness
            .map_or(thickness, thickness_curve);
        let s = clamp_finite(raw.strength, 0.0, MAX_GLOW_STRENGTH);
        let strength = ((s / MAX_GLOW_STRENGTH).powf(1.1) * MAX_GLOW_STRENGTH).round();

        Self {
            enabled: raw.enabled,
            mode: raw.mode,
            per_segment: raw.per_segment,
            strength,
            thickness,
            legacy_thickness,
            halo_inner: raw.halo_inner,
            halo_outer: raw.halo_outer,
            ring_passes: raw.ring_passes.clamp(0, MAX_RING_PASSES) as u32,
        }
    }

    /// Width of the outermost glow pass around a stroke of `base_width`, or `0` when no outer
    /// pass is drawn.
    pub fn outer_line_width(&self, base_width: f64) -> f64 {
        if !self.enabled || base_width <= 0.0 || self.strength <= 0.0 {
            return 0.0;
        }
        let spread = match self.mode {
            GlowMode::Soft if !self.halo_outer => return 0.0,
            GlowMode::Soft => base_width * (0.1 + self.thickness * 0.45),
            GlowMode::Ring if self.ring_passes == 0 => return 0.0,
            GlowMode::Ring => base_width * (0.05 + self.thickness * 0.15),
            GlowMode::Legacy => base_width * (0.05 + self.legacy_thickness * 0.25),
        };
        base_width + spread
    }
}

fn thickness_curve(raw: f64) -> f64 {
    let t = clamp_finite(raw, 0.0, MAX_GLOW_THICKNESS);
    0.2 + (t / MAX_GLOW_THICKNESS).powf(0.9) * 8.8
}

/// Segment count for a raw `segments` value.
pub(crate) fn segment_count(raw: i64) -> u32 {
    raw.clamp(1, i64::from(MAX_SEGMENTS)) as u32
}

/// Continuous-mode state count for a raw `states` value.
pub(crate) fn continuous_states(raw: i64) -> u32 {
    raw.clamp(
        i64::from(MIN_CONTINUOUS_STATES),
        i64::from(MAX_CONTINUOUS_STATES),
    ) as u32
}

fn canvas_side(v: u32) -> u32 {
    v.clamp(1, u32::from(u16::MAX))
}

impl Preset {
    /// Clamp every field into range and fold optional features into typed values.
    ///
    /// Never fails: out-of-range values are clamped, non-finite lengths collapse to zero and a
    /// gradient with fewer than two stops is replaced by the defaults for its fill mode.
    pub fn resolve(&self) -> ResolvedPreset {
        let bar_thickness = non_negative(self.bar.thickness);
        let corner = if self.bar.square_ends {
            0.0
        } else {
            self.bar.corner_radius
        };

        let base = self.base.enabled.then(|| BaseTrack {
            color: self
                .base
                .color
                .with_alpha_mul(clamp_finite(self.base.opacity, 0.0, 1.0)),
            thickness_scale: if self.base.same_geometry_as_main {
                1.0
            } else {
                non_negative(self.base.thickness_scale)
            },
        });

        let main = &self.main;
        let segments = main.segmented.then(|| Segmentation {
            count: segment_count(main.segments),
            gap: non_negative(main.segment_gap),
        });
        let border = main.border.enabled.then(|| BorderStroke {
            color: main.border.color,
            thickness_scale: non_negative(main.border.thickness),
        });

        ResolvedPreset {
            canvas: Canvas {
                width: canvas_side(self.canvas.width),
                height: canvas_side(self.canvas.height),
            },
            background: match self.canvas.background {
                Background::Transparent => None,
                Background::Color(c) => Some(c),
            },
            mode: self.mode,
            arc: ArcSpec {
                radius: non_negative(self.arc.radius),
                thickness: non_negative(self.arc.thickness),
                round_caps: self.arc.round_caps,
                opening: self.opening_direction,
            },
            bar: BarSpec {
                orientation: self.bar.orientation,
                direction: self.bar.direction,
                length: non_negative(self.bar.length),
                thickness: bar_thickness,
                corner_radius: clamp_finite(corner, 0.0, bar_thickness / 2.0),
            },
            base,
            main: MainFill {
                fill: Fill::resolve(main.fill_mode, main.color_solid, &main.gradient.stops),
                segments,
                border,
            },
            warnings: WarningZones {
                start: resolve_warning(&self.warnings.start),
                end: resolve_warning(&self.warnings.end),
            },
            glow: GlowConfig::resolve(&self.glow),
            states: continuous_states(self.states),
        }
    }
}

fn resolve_warning(side: &WarningSide) -> Option<WarningZone> {
    let length_pct = clamp_finite(side.length_pct, 0.0, 0.5);
    (side.enabled && length_pct > 0.0).then(|| WarningZone {
        length_pct,
        fill: Fill::resolve(side.mode, side.color_solid, &side.gradient.stops),
    })
}
