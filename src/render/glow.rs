//! Additive multi-pass glow.
//!
//! Each mode is a list of `(alpha, width)` strokes over the glowing path, drawn with
//! [`Blend::Additive`] so overlapping passes accumulate light.

use crate::foundation::core::{Affine, BezPath};
use crate::paint::Paint;
use crate::preset::model::GlowMode;
use crate::preset::resolve::GlowConfig;
use crate::render::surface::{Blend, LineCap, StrokeStyle, Surface};

/// One additive stroke.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GlowPass {
    /// Alpha multiplier applied to the glow paint.
    pub alpha: f64,
    /// Stroke width in pixels.
    pub width: f64,
}

/// Passes for a stroke of `base_width`. Empty when the config draws nothing.
pub fn glow_passes(cfg: &GlowConfig, base_width: f64) -> Vec<GlowPass> {
    if !cfg.enabled || base_width <= 0.0 || cfg.strength <= 0.0 {
        return Vec::new();
    }
    match cfg.mode {
        GlowMode::Soft => soft_passes(cfg, base_width),
        GlowMode::Ring => ring_passes(cfg, base_width),
        GlowMode::Legacy => legacy_passes(cfg, base_width),
    }
}

fn soft_passes(cfg: &GlowConfig, base_width: f64) -> Vec<GlowPass> {
    if (!cfg.halo_inner && !cfg.halo_outer) || cfg.thickness <= 0.0 {
        return Vec::new();
    }
    let base_alpha = (cfg.strength / 50.0).powf(1.2).clamp(0.02, 0.65);
    let passes = ((8.0 + cfg.thickness * 2.5).round() as u32).max(4);
    let spread = base_width * (0.1 + cfg.thickness * 0.45);

    let mut out = Vec::with_capacity(passes as usize * 2);
    for i in 0..passes {
        let t = f64::from(i) / f64::from(passes - 1);
        let alpha = base_alpha * (1.0 - t * 0.9);
        if cfg.halo_outer {
            out.push(GlowPass {
                alpha,
                width: base_width + spread * t,
            });
        }
        if cfg.halo_inner {
            out.push(GlowPass {
                alpha,
                width: base_width * (1.0 - t * 0.9).max(0.15),
            });
        }
    }
    out
}

fn ring_passes(cfg: &GlowConfig, base_width: f64) -> Vec<GlowPass> {
    let passes = cfg.ring_passes;
    if passes == 0 || cfg.thickness <= 0.0 {
        return Vec::new();
    }
    let base_alpha = (cfg.strength / 55.0).powf(1.1).clamp(0.05, 0.7);
    let spread = base_width * (0.05 + cfg.thickness * 0.15);
    let denom = f64::from(passes.saturating_sub(1).max(1));

    (0..passes)
        .map(|i| {
            let t = f64::from(i) / denom;
            GlowPass {
                alpha: base_alpha * (1.0 - t * 0.5),
                width: base_width + spread * t,
            }
        })
        .collect()
}

fn legacy_passes(cfg: &GlowConfig, base_width: f64) -> Vec<GlowPass> {
    if cfg.legacy_thickness <= 0.0 {
        return Vec::new();
    }
    let base_alpha = (cfg.strength / 60.0).powf(1.2).clamp(0.08, 0.85);
    let spread = base_width * (0.05 + cfg.legacy_thickness * 0.25);
    vec![
        GlowPass {
            alpha: base_alpha * 0.6,
            width: base_width + spread,
        },
        GlowPass {
            alpha: base_alpha * 0.3,
            width: base_width * 0.75,
        },
    ]
}

/// Stroke every glow pass over `path`.
pub fn draw_glow(
    surface: &mut Surface,
    path: &BezPath,
    local: Affine,
    base_width: f64,
    cap: LineCap,
    paint: &Paint,
    cfg: &GlowConfig,
) {
    for pass in glow_passes(cfg, base_width) {
        surface.stroke(
            path,
            local,
            StrokeStyle::new(pass.width, cap),
            &paint.with_alpha_mul(pass.alpha),
            Blend::Additive,
        );
    }
}
