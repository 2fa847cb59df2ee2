use super::*;

fn rgb(r: u8, g: u8, b: u8) -> ColorDef {
    ColorDef::from_rgba8(r, g, b, 255)
}

fn green_red() -> Vec<GradientStop> {
    vec![
        GradientStop::new(0.0, rgb(0, 255, 0)),
        GradientStop::new(1.0, rgb(255, 0, 0)),
    ]
}

#[test]
fn sample_endpoints_match_boundary_stops() {
    let stops = default_stops(FillMode::Gradient3);
    assert_eq!(sample_gradient(&stops, 0.0), stops[0].color);
    assert_eq!(sample_gradient(&stops, 1.0), stops[2].color);
    assert_eq!(sample_gradient(&stops, 0.5), stops[1].color);
}

#[test]
fn sample_midpoint_interpolates_channels() {
    let [r, g, b, a] = sample_gradient(&green_red(), 0.5).to_rgba8();
    assert!((127..=128).contains(&r), "r={r}");
    assert!((127..=128).contains(&g), "g={g}");
    assert_eq!(b, 0);
    assert_eq!(a, 255);
}

#[test]
fn sample_sorts_unsorted_stops() {
    let mut stops = green_red();
    stops.reverse();
    assert_eq!(sample_gradient(&stops, 0.0), rgb(0, 255, 0));
    assert_eq!(sample_gradient(&stops, 1.0), rgb(255, 0, 0));
}

#[test]
fn sample_outside_stop_range_takes_boundary_color() {
    let stops = vec![
        GradientStop::new(0.25, rgb(10, 20, 30)),
        GradientStop::new(0.75, rgb(200, 100, 50)),
    ];
    assert_eq!(sample_gradient(&stops, 0.1), rgb(10, 20, 30));
    assert_eq!(sample_gradient(&stops, 0.9), rgb(200, 100, 50));
    assert_eq!(sample_gradient(&stops, -3.0), rgb(10, 20, 30));
    assert_eq!(sample_gradient(&stops, f64::NAN), rgb(10, 20, 30));
}

#[test]
fn coincident_stops_do_not_divide_by_zero() {
    let stops = vec![
        GradientStop::new(0.0, rgb(0, 0, 0)),
        GradientStop::new(0.5, rgb(255, 0, 0)),
        GradientStop::new(0.5, rgb(0, 0, 255)),
        GradientStop::new(1.0, rgb(0, 0, 255)),
    ];
    let c = sample_gradient(&stops, 0.5);
    assert!(c.r.is_finite() && c.b.is_finite());
}

#[test]
fn empty_stop_list_samples_transparent() {
    assert_eq!(sample_gradient(&[], 0.3), ColorDef::TRANSPARENT);
}

#[test]
fn solid_fill_collapses_to_solid_paint() {
    let fill = Fill::resolve(FillMode::Solid, rgb(1, 2, 3), &green_red());
    assert_eq!(fill.stops().len(), 2);
    let paint = fill.paint_over(Rect::new(0.0, 0.0, 10.0, 10.0));
    assert_eq!(paint, Paint::Solid(rgb(1, 2, 3)));
}

#[test]
fn gradient_binds_to_rect_diagonal() {
    let fill = Fill::resolve(FillMode::Gradient2, rgb(0, 0, 0), &green_red());
    match fill.paint_over(Rect::new(5.0, 6.0, 25.0, 16.0)) {
        Paint::Linear { start, end, stops } => {
            assert_eq!(start, Point::new(5.0, 6.0));
            assert_eq!(end, Point::new(25.0, 16.0));
            assert_eq!(stops.len(), 2);
        }
        other => panic!("expected linear paint, got {other:?}"),
    }
}

#[test]
fn short_gradient_falls_back_to_defaults() {
    let one = vec![GradientStop::new(0.0, rgb(9, 9, 9))];
    let fill = Fill::resolve(FillMode::Gradient3, rgb(0, 0, 0), &one);
    assert_eq!(fill.stops(), default_stops(FillMode::Gradient3).as_slice());

    let fill = Fill::resolve(FillMode::Gradient2, rgb(0, 0, 0), &[]);
    assert_eq!(fill.stops(), default_stops(FillMode::Gradient2).as_slice());
}

#[test]
fn alpha_mul_applies_to_every_stop() {
    let fill = Fill::resolve(FillMode::Gradient2, rgb(0, 0, 0), &green_red());
    let paint = fill
        .paint_over(Rect::new(0.0, 0.0, 4.0, 4.0))
        .with_alpha_mul(0.5);
    let Paint::Linear { stops, .. } = paint else {
        panic!("expected linear paint");
    };
    assert!(stops.iter().all(|s| (s.color.a - 0.5).abs() < 1e-12));
}
