use super::*;
use crate::preset::model::GaugeMode;

fn small() -> Preset {
    let mut p = Preset::default();
    p.canvas.width = 96;
    p.canvas.height = 96;
    p.arc.radius = 36.0;
    p.arc.thickness = 8.0;
    p.states = 3;
    p
}

#[test]
fn renderer_reuses_surface_without_leaking_pixels() {
    let p = small().resolve();
    let mut r = StateRenderer::new(true);
    let full = r.render_frame(&p, p.canvas, 1.0).unwrap();
    let empty_after = r.render_frame(&p, p.canvas, 0.0).unwrap();
    let empty_fresh = StateRenderer::new(true)
        .render_frame(&p, p.canvas, 0.0)
        .unwrap();
    assert_ne!(full, empty_after);
    assert_eq!(empty_after, empty_fresh);
}

#[test]
fn renderer_rebuilds_surface_on_size_change() {
    let p = small().resolve();
    let mut r = StateRenderer::new(true);
    let a = r.render_frame(&p, p.canvas, 0.5).unwrap();
    let b = r
        .render_frame(&p, Canvas::new(48, 32).unwrap(), 0.5)
        .unwrap();
    assert_eq!((a.width, a.height), (96, 96));
    assert_eq!((b.width, b.height), (48, 32));
    assert_eq!(b.data.len(), 48 * 32 * 4);
}

#[test]
fn state_index_is_validated() {
    let p = small();
    assert!(matches!(
        render_state_frame(&p, 0, 0, &ExportOpts::default()),
        Err(GaugeError::Validation(_))
    ));
    assert!(matches!(
        render_state_frame(&p, 3, 3, &ExportOpts::default()),
        Err(GaugeError::Validation(_))
    ));
    assert!(render_state_frame(&p, 2, 3, &ExportOpts::default()).is_ok());
}

#[test]
fn zero_sized_override_is_rejected() {
    let p = small();
    let opts = ExportOpts::default().with_size(0, 10);
    assert!(matches!(
        render_state_frame(&p, 0, 2, &opts),
        Err(GaugeError::Validation(_))
    ));
}

#[test]
fn single_side_override_keeps_other_side() {
    let p = small();
    let png = render_state_image(&p, 1, 3, Some(40), None).unwrap();
    let img = image::load_from_memory(&png).unwrap();
    assert_eq!((img.width(), img.height()), (40, 96));
}

#[test]
fn sequential_cancel_reports_progress() {
    let cancel = CancelToken::new();
    cancel.cancel();
    let opts = ExportOpts::default().with_cancel(cancel);
    let err = export_archive_with_opts(&small(), None, &opts).unwrap_err();
    assert!(matches!(
        err,
        GaugeError::Cancelled {
            completed: 0,
            total: 3
        }
    ));
}

#[test]
fn parallel_cancel_returns_cancelled() {
    let cancel = CancelToken::new();
    cancel.cancel();
    let mut opts = ExportOpts::default().with_cancel(cancel);
    opts.threading = ExportThreading {
        parallel: true,
        threads: Some(2),
    };
    let err = export_archive_with_opts(&small(), None, &opts).unwrap_err();
    assert!(matches!(err, GaugeError::Cancelled { total: 3, .. }));
}

#[test]
fn zero_threads_is_rejected() {
    assert!(build_thread_pool(Some(0)).is_err());
    assert_eq!(build_thread_pool(Some(2)).unwrap().current_num_threads(), 2);
}

#[test]
fn bar_mode_exports() {
    let mut p = small();
    p.mode = GaugeMode::Bar;
    p.bar.length = 70.0;
    p.bar.thickness = 10.0;
    let bytes = export_archive(&p, Some("bar")).unwrap();
    let mut zip = zip::ZipArchive::new(std::io::Cursor::new(bytes)).unwrap();
    assert_eq!(zip.len(), 3);
    assert_eq!(zip.by_index(0).unwrap().name(), "bar_00.png");
}

#[test]
fn path_like_prefix_is_rejected_before_rendering() {
    assert!(matches!(
        export_archive(&small(), Some("../x")),
        Err(GaugeError::Validation(_))
    ));
    let mut p = small();
    p.name_prefix = "a/b".to_string();
    assert!(matches!(
        export_archive(&p, None),
        Err(GaugeError::Validation(_))
    ));
}
