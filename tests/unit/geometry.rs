use super::*;
use crate::preset::model::{BarDirection, GaugeMode, Preset};

fn bar(orientation: BarOrientation, direction: BarDirection) -> BarSpec {
    BarSpec {
        orientation,
        direction,
        length: 100.0,
        thickness: 10.0,
        corner_radius: 0.0,
    }
}

#[test]
fn sweep_is_constant_across_openings() {
    for dir in [
        OpeningDirection::Top,
        OpeningDirection::Right,
        OpeningDirection::Bottom,
        OpeningDirection::Left,
    ] {
        let a = ArcAngles::for_opening(dir);
        assert!((a.sweep.to_degrees() - 270.0).abs() < 1e-9);
        let gap_center = a.at(1.0) + (2.0 * PI - a.sweep) / 2.0;
        let expected = opening_degrees(dir).to_radians() + 2.0 * PI;
        assert!((gap_center - expected).abs() < 1e-9, "{dir:?}");
    }
}

#[test]
fn bottom_opening_starts_lower_left() {
    let a = ArcAngles::for_opening(OpeningDirection::Bottom);
    assert!((a.start.to_degrees() - 135.0).abs() < 1e-9);
    let p = Point::new(a.start.cos(), a.start.sin());
    assert!(p.x < 0.0 && p.y > 0.0);
}

#[test]
fn zero_extent_paths_are_skipped() {
    assert!(arc_path(100.0, 0.0, 0.0).is_none());
    assert!(arc_path(0.0, 0.0, 1.0).is_none());
    assert!(arc_path(100.0, 0.0, 1.0).is_some());
    assert!(rounded_rect_path(Rect::new(0.0, 0.0, 0.0, 10.0), 4.0).is_none());
    assert!(rounded_rect_path(Rect::new(0.0, 0.0, 2.0, 10.0), 4.0).is_some());
}

#[test]
fn bar_spans_grow_from_the_zero_end() {
    let ltr = BarLayout::new(&bar(BarOrientation::Horizontal, BarDirection::Ltr));
    assert_eq!(ltr.span_rect(0.0, 25.0, 10.0), Rect::new(-50.0, -5.0, -25.0, 5.0));

    let rtl = BarLayout::new(&bar(BarOrientation::Horizontal, BarDirection::Rtl));
    assert_eq!(rtl.span_rect(0.0, 25.0, 10.0), Rect::new(25.0, -5.0, 50.0, 5.0));

    let ttb = BarLayout::new(&bar(BarOrientation::Vertical, BarDirection::Ttb));
    assert_eq!(ttb.span_rect(10.0, 20.0, 10.0), Rect::new(-5.0, -40.0, 5.0, -20.0));

    let btt = BarLayout::new(&bar(BarOrientation::Vertical, BarDirection::Btt));
    assert_eq!(btt.span_rect(0.0, 25.0, 10.0), Rect::new(-5.0, 25.0, 5.0, 50.0));

    assert_eq!(btt.full_rect(6.0), Rect::new(-3.0, -50.0, 3.0, 50.0));
}

#[test]
fn mismatched_direction_keeps_origin_start() {
    let l = BarLayout::new(&bar(BarOrientation::Vertical, BarDirection::Rtl));
    assert!(!l.reversed);
    assert_eq!(l.span_rect(0.0, 10.0, 10.0).y0, -50.0);
}

#[test]
fn segments_and_gaps_tile_the_extent_exactly() {
    for n in 1..=100u32 {
        for (extent, gap) in [(420.0, 2.0), (ARC_SWEEP, 0.01), (50.0, 9.0)] {
            let l = SegmentLayout::new(extent, n, gap);
            let total = l.seg_extent * f64::from(n) + l.gap * f64::from(n - 1);
            assert!((total - extent).abs() < 1e-9, "n={n} extent={extent}");
            assert!(l.seg_extent >= 0.0);
            let last_end = l.offset(n - 1) + l.seg_extent;
            assert!((last_end - extent).abs() < 1e-9);
        }
    }
}

#[test]
fn oversized_gap_collapses_segments_to_zero() {
    let l = SegmentLayout::new(10.0, 3, 50.0);
    assert_eq!(l.gap, 5.0);
    assert_eq!(l.seg_extent, 0.0);
    let single = SegmentLayout::new(10.0, 1, 4.0);
    assert_eq!(single.gap, 0.0);
    assert_eq!(single.seg_extent, 10.0);
}

#[test]
fn wipe_fills_prior_segments_and_splits_the_boundary() {
    let l = SegmentLayout::new(100.0, 4, 0.0);
    let fr: Vec<f64> = (0..4).map(|i| l.wipe_fraction(0.6, i)).collect();
    assert_eq!(fr[0], 1.0);
    assert_eq!(fr[1], 1.0);
    assert!((fr[2] - 0.4).abs() < 1e-9);
    assert_eq!(fr[3], 0.0);

    assert!(l.visible(0.0).next().is_none());
    assert_eq!(l.visible(1.0).count(), 4);

    let spans: Vec<_> = l.visible(0.6).collect();
    assert_eq!(spans.len(), 3);
    assert!((spans[2].extent - 10.0).abs() < 1e-9);
    assert!((spans[2].midpoint - 0.625).abs() < 1e-12);
}

#[test]
fn state_progress_shows_exactly_that_many_whole_segments() {
    for n in 1..=100u32 {
        let l = SegmentLayout::new(100.0, n, 0.0);
        for i in 0..=n {
            let progress = f64::from(i) / f64::from(n);
            let spans: Vec<_> = l.visible(progress).collect();
            assert_eq!(spans.len(), i as usize, "n={n} i={i}");
            assert!(spans.iter().all(|s| s.extent == l.seg_extent), "n={n} i={i}");
        }
    }
    // 7 / 25 * 25 rounds to 7.000000000000001.
    assert_eq!(SegmentLayout::new(100.0, 25, 0.0).wipe_fraction(7.0 / 25.0, 7), 0.0);
}

#[test]
fn arc_gap_is_converted_to_radians() {
    let arc = ArcSpec {
        radius: 200.0,
        thickness: 24.0,
        round_caps: false,
        opening: OpeningDirection::Bottom,
    };
    let l = arc_segment_layout(&arc, 10, 4.0);
    assert!((l.gap - 0.02).abs() < 1e-12);
}

#[test]
fn default_arc_bounds_include_caps_and_padding() {
    let mut p = Preset::default();
    p.glow.enabled = false;
    let size = compute_content_bounds(&p.resolve());
    // radius 200, half width 12, round cap 12, padding 20 per side
    assert_eq!(size, Size::new(488.0, 488.0));
}

#[test]
fn bar_bounds_follow_orientation() {
    let mut p = Preset {
        mode: GaugeMode::Bar,
        ..Preset::default()
    };
    p.glow.enabled = false;
    let h = compute_content_bounds(&p.resolve());
    assert_eq!(h, Size::new(440.0, 44.0));
    p.bar.orientation = BarOrientation::Vertical;
    let v = compute_content_bounds(&p.resolve());
    assert_eq!(v, Size::new(44.0, 440.0));
}

#[test]
fn fit_scale_never_enlarges() {
    assert_eq!(fit_scale(Size::new(512.0, 512.0), Size::new(256.0, 100.0)), 1.0);
    assert_eq!(fit_scale(Size::new(100.0, 200.0), Size::new(200.0, 200.0)), 0.5);
    assert_eq!(fit_scale(Size::new(100.0, 100.0), Size::ZERO), 1.0);
}
