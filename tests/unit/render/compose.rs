use super::*;
use crate::foundation::color::ColorDef;
use crate::foundation::core::FrameRGBA;
use crate::preset::model::{BarDirection, FillMode, GradientStop, Preset};

fn quiet(mode: GaugeMode) -> Preset {
    let mut p = Preset {
        mode,
        ..Preset::default()
    };
    p.glow.enabled = false;
    p.base.enabled = false;
    p.warnings.end.enabled = false;
    p
}

fn render(p: &Preset, progress: f64) -> FrameRGBA {
    let r = p.resolve();
    let mut s = Surface::new(r.canvas).unwrap();
    draw_gauge(&mut s, &r, progress);
    s.snapshot()
}

fn alpha(f: &FrameRGBA, x: u32, y: u32) -> u8 {
    f.pixel(x, y).unwrap()[3]
}

#[test]
fn continuous_pieces_follow_progress() {
    let r = quiet(GaugeMode::Arc).resolve();
    let track = Track::arc(r.arc);
    let paint = r.main.fill.paint_over(track.bounds());
    assert!(main_pieces(&track, &r.main, &paint, 0.0).is_empty());
    assert_eq!(main_pieces(&track, &r.main, &paint, 0.3).len(), 1);
    assert_eq!(main_pieces(&track, &r.main, &paint, 1.0).len(), 1);
}

#[test]
fn segmented_pieces_are_banded_by_midpoint() {
    let mut p = quiet(GaugeMode::Bar);
    p.main.segmented = true;
    p.main.segments = 10;
    p.main.fill_mode = FillMode::Gradient2;
    p.main.gradient.stops = vec![
        GradientStop::new(0.0, ColorDef::from_rgba8(0, 255, 0, 255)),
        GradientStop::new(1.0, ColorDef::from_rgba8(255, 0, 0, 255)),
    ];
    let r = p.resolve();
    let track = Track::bar(r.bar);
    let paint = r.main.fill.paint_over(track.bounds());

    let pieces = main_pieces(&track, &r.main, &paint, 0.55);
    assert_eq!(pieces.len(), 6);
    assert_eq!(pieces[0].paint, Paint::Solid(r.main.fill.sample(0.05)));
    assert_eq!(pieces[5].paint, Paint::Solid(r.main.fill.sample(0.55)));
    assert_eq!(main_pieces(&track, &r.main, &paint, 1.0).len(), 10);
}

#[test]
fn state_boundary_emits_no_sliver_segment() {
    let mut p = quiet(GaugeMode::Bar);
    p.main.segmented = true;
    p.main.segments = 25;
    p.glow.enabled = true;
    p.glow.per_segment = true;
    let r = p.resolve();
    let track = Track::bar(r.bar);
    let paint = r.main.fill.paint_over(track.bounds());
    assert_eq!(main_pieces(&track, &r.main, &paint, 7.0 / 25.0).len(), 7);
    assert_eq!(main_pieces(&track, &r.main, &paint, 15.0 / 25.0).len(), 15);
}

#[test]
fn round_capped_arcs_glow_as_one_path() {
    let mut p = quiet(GaugeMode::Arc);
    p.glow.per_segment = true;
    let r = p.resolve();
    assert!(!Track::arc(r.arc).glows_per_segment(&r.glow));

    p.arc.round_caps = false;
    let r = p.resolve();
    assert!(Track::arc(r.arc).glows_per_segment(&r.glow));
    assert!(Track::bar(r.bar).glows_per_segment(&r.glow));
}

#[test]
fn full_arc_covers_top_and_leaves_the_gap_empty() {
    let f = render(&quiet(GaugeMode::Arc), 1.0);
    // radius 200 around (256, 256): top of the band is at y = 56.
    assert_eq!(alpha(&f, 256, 56), 255);
    assert_eq!(alpha(&f, 56, 256), 255);
    assert_eq!(alpha(&f, 456, 256), 255);
    assert_eq!(alpha(&f, 256, 456), 0);
    assert_eq!(alpha(&f, 256, 256), 0);
}

#[test]
fn half_arc_stops_at_the_top() {
    let mut p = quiet(GaugeMode::Arc);
    p.arc.round_caps = false;
    let f = render(&p, 0.5);
    assert_eq!(alpha(&f, 56, 256), 255);
    assert_eq!(alpha(&f, 456, 256), 0);
}

#[test]
fn zero_progress_draws_nothing() {
    let f = render(&quiet(GaugeMode::Arc), 0.0);
    assert!(f.data.iter().all(|&b| b == 0));
    let f = render(&quiet(GaugeMode::Bar), 0.0);
    assert!(f.data.iter().all(|&b| b == 0));
}

#[test]
fn bar_direction_selects_the_growing_end() {
    let mut p = quiet(GaugeMode::Bar);
    let ltr = render(&p, 0.5);
    assert_eq!(alpha(&ltr, 100, 256), 255);
    assert_eq!(alpha(&ltr, 400, 256), 0);

    p.bar.direction = BarDirection::Rtl;
    let rtl = render(&p, 0.5);
    assert_eq!(alpha(&rtl, 100, 256), 0);
    assert_eq!(alpha(&rtl, 400, 256), 255);
}

#[test]
fn base_track_spans_the_full_length() {
    let mut p = quiet(GaugeMode::Bar);
    p.base.enabled = true;
    p.base.opacity = 1.0;
    let f = render(&p, 0.25);
    assert_eq!(f.pixel(400, 256), Some([50, 50, 50, 255]));
}

#[test]
fn border_draws_outside_the_fill() {
    let mut p = quiet(GaugeMode::Bar);
    p.main.fill_mode = FillMode::Solid;
    p.main.color_solid = ColorDef::from_rgba8(0, 0, 255, 255);
    p.main.border.enabled = true;
    p.main.border.color = ColorDef::from_rgba8(255, 255, 255, 255);
    p.main.border.thickness = 0.25;
    let f = render(&p, 1.0);
    // Bar spans y 244..268; a 6 px border straddles the top edge.
    assert_eq!(f.pixel(256, 242), Some([255, 255, 255, 255]));
    assert_eq!(f.pixel(256, 256), Some([0, 0, 255, 255]));
}

#[test]
fn glow_adds_light_outside_the_stroke() {
    let mut p = quiet(GaugeMode::Bar);
    p.glow.enabled = true;
    p.glow.strength = 60.0;
    p.glow.thickness = 10.0;
    let lit = render(&p, 1.0);
    assert!(alpha(&lit, 256, 236) > 0);

    p.glow.enabled = false;
    let dark = render(&p, 1.0);
    assert_eq!(alpha(&dark, 256, 236), 0);
}

/// Bar with red start and blue end zones, 20% each; bar spans x 46..466.
fn zoned_bar() -> Preset {
    let mut p = quiet(GaugeMode::Bar);
    p.warnings.start.enabled = true;
    p.warnings.start.length_pct = 0.2;
    p.warnings.start.mode = FillMode::Solid;
    p.warnings.start.color_solid = ColorDef::from_rgba8(255, 0, 0, 255);
    p.warnings.end.enabled = true;
    p.warnings.end.length_pct = 0.2;
    p.warnings.end.mode = FillMode::Solid;
    p.warnings.end.color_solid = ColorDef::from_rgba8(0, 0, 255, 255);
    p
}

#[cfg(feature = "warning-zones")]
#[test]
fn warning_zones_cover_both_ends() {
    let f = render(&zoned_bar(), 0.0);
    // Start zone covers [46, 130), end zone [382, 466).
    assert_eq!(f.pixel(60, 256), Some([255, 0, 0, 255]));
    assert_eq!(f.pixel(125, 256), Some([255, 0, 0, 255]));
    assert_eq!(alpha(&f, 140, 256), 0);
    assert_eq!(alpha(&f, 370, 256), 0);
    assert_eq!(f.pixel(390, 256), Some([0, 0, 255, 255]));
    assert_eq!(f.pixel(460, 256), Some([0, 0, 255, 255]));
}

#[cfg(feature = "warning-zones")]
#[test]
fn main_fill_draws_over_warning_zones() {
    let mut p = zoned_bar();
    p.main.fill_mode = FillMode::Solid;
    p.main.color_solid = ColorDef::from_rgba8(0, 255, 0, 255);
    let f = render(&p, 0.5);
    assert_eq!(f.pixel(60, 256), Some([0, 255, 0, 255]));
    assert_eq!(f.pixel(460, 256), Some([0, 0, 255, 255]));
}

#[cfg(not(feature = "warning-zones"))]
#[test]
fn enabled_warning_zones_leave_the_frame_untouched() {
    let f = render(&zoned_bar(), 0.0);
    assert!(f.data.iter().all(|&b| b == 0));

    let quiet_frame = render(&quiet(GaugeMode::Bar), 0.6);
    assert_eq!(render(&zoned_bar(), 0.6), quiet_frame);
}
