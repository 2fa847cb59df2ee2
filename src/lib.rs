//! Gaugeframe renders arc and bar gauges as sequences of discrete PNG states.
//!
//! A [`Preset`] describes one gauge design. Rendering is deterministic and pure per state:
//!
//! - Load a [`Preset`] (JSON, camelCase keys, defaults for anything missing)
//! - Render one state with [`render_state_image`] or a raw [`FrameRGBA`] with
//!   [`render_state_frame`]
//! - Export every state into a zip archive with [`export_archive`]
//!
//! Lower-level pieces ([`Surface`], [`draw_gauge`], [`sample_gradient`]) are public for callers
//! that want to draw a gauge into their own frames.
#![forbid(unsafe_code)]

mod foundation;

/// Batch and single-state export.
pub mod export;
/// Track layout: arc angles, bar rectangles, segment spans and content bounds.
pub mod geometry;
/// Fill resolution and gradient sampling.
pub mod paint;
/// Preset model, normalization and updates.
pub mod preset;
/// Raster surface and the gauge composer.
pub mod render;

pub use crate::foundation::color::ColorDef;
pub use crate::foundation::core::{Affine, BezPath, Canvas, FrameRGBA, Point, Rect, Vec2};
pub use crate::foundation::error::{GaugeError, GaugeResult};

pub use crate::export::pipeline::{
    CancelToken, ExportOpts, ExportThreading, StateRenderer, export_archive,
    export_archive_with_opts, render_state_frame, render_state_image,
    render_state_image_with_opts,
};
pub use crate::export::states::{
    archive_file_name, effective_export_states, progress_for_state, single_file_name,
    state_file_name, validate_prefix,
};
pub use crate::geometry::{compute_content_bounds, fit_scale};
pub use crate::paint::{Fill, Paint, default_stops, sample_gradient};
pub use crate::preset::model::{
    Background, BarDirection, BarOrientation, FillMode, GaugeMode, GlowMode, GradientStop,
    OpeningDirection, Preset,
};
pub use crate::preset::resolve::{GlowConfig, ResolvedPreset};
pub use crate::preset::update::PresetUpdate;
pub use crate::render::compose::{draw_arc_gauge, draw_bar_gauge, draw_gauge};
pub use crate::render::glow::{GlowPass, glow_passes};
pub use crate::render::surface::Surface;
