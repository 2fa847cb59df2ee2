use serde_json::Value;

use crate::foundation::color::ColorDef;
use crate::foundation::error::{GaugeError, GaugeResult};
use crate::preset::model::{
    Background, BarDirection, BarOrientation, FillMode, GaugeMode, GlowMode, GradientStop,
    OpeningDirection, Preset,
};

/// One typed edit to a [`Preset`].
///
/// Editors issue these instead of writing to dotted key paths, so a preset can never hold a
/// value of the wrong shape between frames.
#[derive(Clone, Debug, PartialEq)]
pub enum PresetUpdate {
    Mode(GaugeMode),
    OpeningDirection(OpeningDirection),
    States(i64),
    CanvasSize { width: u32, height: u32 },
    Background(Background),
    ArcRadius(f64),
    ArcThickness(f64),
    ArcRoundCaps(bool),
    BarOrientation(BarOrientation),
    BarDirection(BarDirection),
    BarLength(f64),
    BarThickness(f64),
    BarCornerRadius(f64),
    BarSquareEnds(bool),
    BaseEnabled(bool),
    BaseColor(ColorDef),
    BaseOpacity(f64),
    BaseSameGeometry(bool),
    BaseThicknessScale(f64),
    FillMode(FillMode),
    SolidColor(ColorDef),
    GradientStops(Vec<GradientStop>),
    Segmented(bool),
    Segments(i64),
    SegmentGap(f64),
    BorderEnabled(bool),
    BorderColor(ColorDef),
    BorderThickness(f64),
    GlowEnabled(bool),
    GlowMode(GlowMode),
    GlowPerSegment(bool),
    GlowStrength(f64),
    GlowThickness(f64),
    GlowHaloInner(bool),
    GlowHaloOuter(bool),
    GlowRingPasses(i64),
    GlowLegacyThickness(Option<f64>),
    NamePrefix(String),
}

impl Preset {
    /// Apply one edit in place.
    pub fn apply(&mut self, update: PresetUpdate) {
        use PresetUpdate as U;
        match update {
            U::Mode(v) => self.mode = v,
            U::OpeningDirection(v) => self.opening_direction = v,
            U::States(v) => self.states = v,
            U::CanvasSize { width, height } => {
                self.canvas.width = width;
                self.canvas.height = height;
            }
            U::Background(v) => self.canvas.background = v,
            U::ArcRadius(v) => self.arc.radius = v,
            U::ArcThickness(v) => self.arc.thickness = v,
            U::ArcRoundCaps(v) => self.arc.round_caps = v,
            U::BarOrientation(v) => self.bar.orientation = v,
            U::BarDirection(v) => self.bar.direction = v,
            U::BarLength(v) => self.bar.length = v,
            U::BarThickness(v) => self.bar.thickness = v,
            U::BarCornerRadius(v) => self.bar.corner_radius = v,
            U::BarSquareEnds(v) => self.bar.square_ends = v,
            U::BaseEnabled(v) => self.base.enabled = v,
            U::BaseColor(v) => self.base.color = v,
            U::BaseOpacity(v) => self.base.opacity = v,
            U::BaseSameGeometry(v) => self.base.same_geometry_as_main = v,
            U::BaseThicknessScale(v) => self.base.thickness_scale = v,
            U::FillMode(v) => self.main.fill_mode = v,
            U::SolidColor(v) => self.main.color_solid = v,
            U::GradientStops(v) => self.main.gradient.stops = v,
            U::Segmented(v) => self.main.segmented = v,
            U::Segments(v) => self.main.segments = v,
            U::SegmentGap(v) => self.main.segment_gap = v,
            U::BorderEnabled(v) => self.main.border.enabled = v,
            U::BorderColor(v) => self.main.border.color = v,
            U::BorderThickness(v) => self.main.border.thickness = v,
            U::GlowEnabled(v) => self.glow.enabled = v,
            U::GlowMode(v) => self.glow.mode = v,
            U::GlowPerSegment(v) => self.glow.per_segment = v,
            U::GlowStrength(v) => self.glow.strength = v,
            U::GlowThickness(v) => self.glow.thickness = v,
            U::GlowHaloInner(v) => self.glow.halo_inner = v,
            U::GlowHaloOuter(v) => self.glow.halo_outer = v,
            U::GlowRingPasses(v) => self.glow.ring_passes = v,
            U::GlowLegacyThickness(v) => self.glow.legacy_thickness = v,
            U::NamePrefix(v) => self.name_prefix = v,
        }
    }

    /// Return a copy with every edit applied in order.
    pub fn with_updates(&self, updates: impl IntoIterator<Item = PresetUpdate>) -> Self {
        let mut out = self.clone();
        for u in updates {
            out.apply(u);
        }
        out
    }

    /// Deep-merge a partial JSON document over this preset.
    ///
    /// Objects merge key by key; any other value (arrays included) replaces the target. The
    /// merged document is decoded again, so a patch that produces an invalid shape fails without
    /// touching `self`.
    pub fn merged_with(&self, patch: &Value) -> GaugeResult<Self> {
        if !patch.is_object() {
            return Err(GaugeError::validation("preset patch must be a JSON object"));
        }
        let mut doc = serde_json::to_value(self)?;
        merge_json(&mut doc, patch);
        serde_json::from_value(doc).map_err(|e| GaugeError::serde(format!("invalid patch: {e}")))
    }
}

fn merge_json(target: &mut Value, patch: &Value) {
    match (target, patch) {
        (Value::Object(t), Value::Object(p)) => {
            for (k, v) in p {
                match t.get_mut(k) {
                    Some(slot) => merge_json(slot, v),
                    None => {
                        t.insert(k.clone(), v.clone());
                    }
                }
            }
        }
        (slot, v) => *slot = v.clone(),
    }
}
