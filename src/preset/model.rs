use std::io::Read;

use serde::{Deserialize, Serialize};

use crate::foundation::color::ColorDef;
use crate::foundation::error::{GaugeError, GaugeResult};

/// Root configuration for one gauge design.
///
/// This is the boundary document exchanged with the editor. Keys are camelCase, every field has a
/// default so partial documents load, and editor-only keys (`theme`, `usability`, ...) are
/// ignored. Numeric ranges are not enforced here; [`Preset::resolve`](crate::Preset::resolve)
/// clamps everything once per frame.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Preset {
    pub mode: GaugeMode,
    /// Center of the 90° gap (arc only).
    pub opening_direction: OpeningDirection,
    /// Continuous-mode state count, clamped on use.
    pub states: i64,
    pub canvas: CanvasOptions,
    pub arc: ArcOptions,
    pub bar: BarOptions,
    pub base: BaseStroke,
    pub main: MainStroke,
    pub warnings: Warnings,
    pub glow: GlowOptions,
    pub name_prefix: String,
    pub preset_name: String,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GaugeMode {
    #[default]
    Arc,
    Bar,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OpeningDirection {
    Top,
    Right,
    #[default]
    Bottom,
    Left,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CanvasOptions {
    pub width: u32,
    pub height: u32,
    pub background: Background,
}

impl Default for CanvasOptions {
    fn default() -> Self {
        Self {
            width: 512,
            height: 512,
            background: Background::Transparent,
        }
    }
}

/// Canvas background: `"transparent"` or any [`ColorDef`] form.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum Background {
    #[default]
    Transparent,
    Color(ColorDef),
}

impl Serialize for Background {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        match self {
            Self::Transparent => serializer.serialize_str("transparent"),
            Self::Color(c) => c.serialize(serializer),
        }
    }
}

impl<'de> Deserialize<'de> for Background {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let v = serde_json::Value::deserialize(deserializer)?;
        if v.as_str()
            .is_some_and(|s| s.trim().eq_ignore_ascii_case("transparent"))
        {
            return Ok(Self::Transparent);
        }
        ColorDef::deserialize(v)
            .map(Self::Color)
            .map_err(serde::de::Error::custom)
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ArcOptions {
    pub radius: f64,
    pub thickness: f64,
    pub round_caps: bool,
}

impl Default for ArcOptions {
    fn default() -> Self {
        Self {
            radius: 200.0,
            thickness: 24.0,
            round_caps: true,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BarOrientation {
    #[default]
    Horizontal,
    Vertical,
}

/// Which end of the bar the fill grows from.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BarDirection {
    #[default]
    Ltr,
    Rtl,
    Ttb,
    Btt,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BarOptions {
    pub orientation: BarOrientation,
    pub direction: BarDirection,
    pub length: f64,
    pub thickness: f64,
    pub corner_radius: f64,
    /// Forces square corners regardless of `corner_radius`.
    pub square_ends: bool,
}

impl Default for BarOptions {
    fn default() -> Self {
        Self {
            orientation: BarOrientation::Horizontal,
            direction: BarDirection::Ltr,
            length: 420.0,
            thickness: 24.0,
            corner_radius: 12.0,
            square_ends: false,
        }
    }
}

/// Background track drawn under the progress stroke.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BaseStroke {
    pub enabled: bool,
    pub color: ColorDef,
    pub opacity: f64,
    pub same_geometry_as_main: bool,
    pub thickness_scale: f64,
}

impl Default for BaseStroke {
    fn default() -> Self {
        Self {
            enabled: true,
            color: ColorDef::from_rgba8(50, 50, 50, 255),
            opacity: 0.6,
            same_geometry_as_main: true,
            thickness_scale: 1.0,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FillMode {
    Solid,
    Gradient2,
    #[default]
    Gradient3,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct GradientStop {
    pub pos: f64,
    pub color: ColorDef,
}

impl GradientStop {
    pub fn new(pos: f64, color: ColorDef) -> Self {
        Self { pos, color }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GradientDef {
    pub stops: Vec<GradientStop>,
}

/// Outline overlay drawn over the main fill.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BorderOptions {
    pub enabled: bool,
    pub color: ColorDef,
    /// Line width as a multiple of the main thickness.
    pub thickness: f64,
}

impl Default for BorderOptions {
    fn default() -> Self {
        Self {
            enabled: false,
            color: ColorDef::from_rgba8(255, 255, 255, 230),
            thickness: 0.1,
        }
    }
}

/// Foreground (progress) stroke.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MainStroke {
    pub fill_mode: FillMode,
    pub color_solid: ColorDef,
    pub gradient: GradientDef,
    pub segmented: bool,
    pub segments: i64,
    /// Gap between segments in pixels.
    pub segment_gap: f64,
    #[serde(alias = "frame")]
    pub border: BorderOptions,
}

impl Default for MainStroke {
    fn default() -> Self {
        Self {
            fill_mode: FillMode::Gradient3,
            color_solid: ColorDef::from_rgba8(0x00, 0xC2, 0xFF, 255),
            gradient: GradientDef {
                stops: vec![
                    GradientStop::new(0.0, ColorDef::from_rgba8(0x00, 0xE0, 0xFF, 255)),
                    GradientStop::new(0.5, ColorDef::from_rgba8(0x00, 0xFF, 0x88, 255)),
                    GradientStop::new(1.0, ColorDef::from_rgba8(0xFF, 0xD4, 0x00, 255)),
                ],
            },
            segmented: false,
            segments: 16,
            segment_gap: 2.0,
            border: BorderOptions::default(),
        }
    }
}

/// One warning zone at the start or end of the track.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct WarningSide {
    pub enabled: bool,
    /// Fraction of the track covered, `0..=0.5`.
    pub length_pct: f64,
    pub mode: FillMode,
    pub color_solid: ColorDef,
    pub gradient: GradientDef,
}

impl Default for WarningSide {
    fn default() -> Self {
        Self {
            enabled: false,
            length_pct: 0.15,
            mode: FillMode::Solid,
            color_solid: ColorDef::from_rgba8(0x00, 0xE0, 0xFF, 255),
            gradient: GradientDef {
                stops: vec![
                    GradientStop::new(0.0, ColorDef::from_rgba8(0x00, 0xE0, 0xFF, 255)),
                    GradientStop::new(1.0, ColorDef::from_rgba8(0x00, 0xB2, 0xFF, 255)),
                ],
            },
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Warnings {
    pub start: WarningSide,
    pub end: WarningSide,
}

impl Default for Warnings {
    fn default() -> Self {
        Self {
            start: WarningSide::default(),
            end: WarningSide {
                enabled: true,
                length_pct: 0.2,
                mode: FillMode::Solid,
                color_solid: ColorDef::from_rgba8(0xFF, 0x3B, 0x30, 255),
                gradient: GradientDef {
                    stops: vec![
                        GradientStop::new(0.0, ColorDef::from_rgba8(0xFF, 0xA5, 0x00, 255)),
                        GradientStop::new(1.0, ColorDef::from_rgba8(0xFF, 0x3B, 0x30, 255)),
                    ],
                },
            },
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GlowMode {
    #[default]
    Soft,
    Ring,
    Legacy,
}

/// Raw glow settings as edited. See [`GlowConfig`](crate::GlowConfig) for the normalized form.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GlowOptions {
    pub enabled: bool,
    pub mode: GlowMode,
    pub per_segment: bool,
    /// `0..=100`; the effective curve saturates at 60.
    pub strength: f64,
    /// `0..=20`.
    pub thickness: f64,
    pub halo_inner: bool,
    pub halo_outer: bool,
    pub ring_passes: i64,
    /// Legacy outer thickness; falls back to `thickness` when unset.
    pub legacy_thickness: Option<f64>,
}

impl Default for GlowOptions {
    fn default() -> Self {
        Self {
            enabled: true,
            mode: GlowMode::Soft,
            per_segment: false,
            strength: 18.0,
            thickness: 1.25,
            halo_inner: false,
            halo_outer: true,
            ring_passes: 3,
            legacy_thickness: None,
        }
    }
}

impl Default for Preset {
    fn default() -> Self {
        Self {
            mode: GaugeMode::Arc,
            opening_direction: OpeningDirection::Bottom,
            states: 16,
            canvas: CanvasOptions::default(),
            arc: ArcOptions::default(),
            bar: BarOptions::default(),
            base: BaseStroke::default(),
            main: MainStroke::default(),
            warnings: Warnings::default(),
            glow: GlowOptions::default(),
            name_prefix: "gauge".to_string(),
            preset_name: "Default 270°".to_string(),
        }
    }
}

impl Preset {
    /// Parse a preset JSON document.
    pub fn from_json_str(s: &str) -> GaugeResult<Self> {
        serde_json::from_str(s).map_err(|e| GaugeError::serde(format!("invalid preset: {e}")))
    }

    /// Parse a preset JSON document from a reader.
    pub fn from_reader<R: Read>(r: R) -> GaugeResult<Self> {
        serde_json::from_reader(r).map_err(|e| GaugeError::serde(format!("invalid preset: {e}")))
    }

    /// Serialize as pretty-printed JSON.
    pub fn to_json_string(&self) -> GaugeResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Export file base name, falling back to `"gauge"` when empty.
    pub fn effective_name_prefix(&self) -> &str {
        let p = self.name_prefix.trim();
        if p.is_empty() { "gauge" } else { p }
    }
}
