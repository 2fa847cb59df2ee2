use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use kurbo::Size;
use rayon::prelude::*;

use crate::export::archive::ArchiveBuilder;
use crate::export::encode::encode_png;
use crate::export::states::{
    effective_export_states, progress_for_state, state_file_name, validate_prefix,
};
use crate::foundation::core::{Affine, Canvas, FrameRGBA};
use crate::foundation::error::{GaugeError, GaugeResult};
use crate::geometry::{compute_content_bounds, fit_scale};
use crate::preset::model::Preset;
use crate::preset::resolve::ResolvedPreset;
use crate::render::compose::draw_gauge;
use crate::render::surface::Surface;

/// Environment variable read by [`ExportOpts::from_env`]: worker threads for batch export.
pub const THREADS_ENV: &str = "GAUGEFRAME_THREADS";

/// Threading controls for batch export.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ExportThreading {
    /// Render states on a rayon pool when `true`.
    pub parallel: bool,
    /// Optional explicit worker thread count.
    pub threads: Option<usize>,
}

/// Shared flag that stops a batch export between states.
#[derive(Clone, Debug, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

/// Options for single-state and batch export.
#[derive(Clone, Debug)]
pub struct ExportOpts {
    pub threading: ExportThreading,
    /// Shrink gauges whose content bounds exceed the output size. Never enlarges.
    pub fit_to_canvas: bool,
    /// Output size; the preset canvas is used when `None`.
    pub size: Option<(u32, u32)>,
    pub cancel: Option<CancelToken>,
}

impl Default for ExportOpts {
    fn default() -> Self {
        Self {
            threading: ExportThreading::default(),
            fit_to_canvas: true,
            size: None,
            cancel: None,
        }
    }
}

impl ExportOpts {
    /// Defaults, with parallel export enabled when `GAUGEFRAME_THREADS` is a positive integer.
    pub fn from_env() -> Self {
        let threads = std::env::var(THREADS_ENV)
            .ok()
            .and_then(|v| v.trim().parse::<usize>().ok())
            .filter(|&n| n > 0);
        Self {
            threading: ExportThreading {
                parallel: threads.is_some(),
                threads,
            },
            ..Self::default()
        }
    }

    pub fn with_size(mut self, width: u32, height: u32) -> Self {
        self.size = Some((width, height));
        self
    }

    pub fn with_cancel(mut self, cancel: CancelToken) -> Self {
        self.cancel = Some(cancel);
        self
    }

    fn cancelled(&self) -> bool {
        self.cancel.as_ref().is_some_and(CancelToken::is_cancelled)
    }
}

/// Renders states onto one reusable surface.
///
/// The surface is taken out of its slot for the duration of a frame and reset before drawing,
/// so one renderer never exposes pixels from an earlier frame. Use one renderer per thread.
#[derive(Debug)]
pub struct StateRenderer {
    surface: Option<Surface>,
    fit_to_canvas: bool,
}

impl StateRenderer {
    pub fn new(fit_to_canvas: bool) -> Self {
        Self {
            surface: None,
            fit_to_canvas,
        }
    }

    fn with_surface<R>(
        &mut self,
        canvas: Canvas,
        f: impl FnOnce(&mut Surface) -> R,
    ) -> GaugeResult<R> {
        let mut surface = match self.surface.take() {
            Some(s) if s.canvas() == canvas => s,
            _ => Surface::new(canvas)?,
        };
        surface.reset();
        let out = f(&mut surface);
        self.surface = Some(surface);
        Ok(out)
    }

    /// Draw `preset` at `progress` onto a `canvas`-sized frame.
    pub fn render_frame(
        &mut self,
        preset: &ResolvedPreset,
        canvas: Canvas,
        progress: f64,
    ) -> GaugeResult<FrameRGBA> {
        let fit = self.fit_to_canvas;
        self.with_surface(canvas, |s| {
            if fit {
                let target = Size::new(f64::from(canvas.width), f64::from(canvas.height));
                let scale = fit_scale(target, compute_content_bounds(preset));
                if scale < 1.0 {
                    let c = canvas.center().to_vec2();
                    s.set_base_transform(
                        Affine::translate(c) * Affine::scale(scale) * Affine::translate(-c),
                    );
                }
            }
            if let Some(bg) = preset.background {
                s.fill_background(bg);
            }
            draw_gauge(s, preset, progress);
            s.snapshot()
        })
    }
}

fn export_canvas(preset: &ResolvedPreset, size: Option<(u32, u32)>) -> GaugeResult<Canvas> {
    match size {
        Some((w, h)) => Canvas::new(w, h),
        None => Ok(preset.canvas),
    }
}

fn check_state(index: u32, total: u32) -> GaugeResult<()> {
    if total == 0 {
        return Err(GaugeError::validation("total states must be >= 1"));
    }
    if index >= total {
        return Err(GaugeError::validation(format!(
            "state index {index} out of range for {total} states"
        )));
    }
    Ok(())
}

/// Render state `index` of `total` to premultiplied RGBA pixels.
pub fn render_state_frame(
    preset: &Preset,
    index: u32,
    total: u32,
    opts: &ExportOpts,
) -> GaugeResult<FrameRGBA> {
    check_state(index, total)?;
    let resolved = preset.resolve();
    let canvas = export_canvas(&resolved, opts.size)?;
    let progress = progress_for_state(preset, index, total);
    StateRenderer::new(opts.fit_to_canvas).render_frame(&resolved, canvas, progress)
}

/// Render state `index` of `total` as PNG bytes.
///
/// `out_width`/`out_height` override the preset canvas; a missing side keeps the preset value.
#[tracing::instrument(skip(preset))]
pub fn render_state_image(
    preset: &Preset,
    index: u32,
    total: u32,
    out_width: Option<u32>,
    out_height: Option<u32>,
) -> GaugeResult<Vec<u8>> {
    let size = match (out_width, out_height) {
        (None, None) => None,
        (w, h) => Some((
            w.unwrap_or(preset.canvas.width),
            h.unwrap_or(preset.canvas.height),
        )),
    };
    let opts = ExportOpts {
        size,
        ..ExportOpts::default()
    };
    render_state_image_with_opts(preset, index, total, &opts)
}

/// [`render_state_image`] with explicit options.
pub fn render_state_image_with_opts(
    preset: &Preset,
    index: u32,
    total: u32,
    opts: &ExportOpts,
) -> GaugeResult<Vec<u8>> {
    let frame = render_state_frame(preset, index, total, opts)?;
    encode_png(frame, index)
}

/// Render every state into a zip archive of `<prefix>_<index>.png` entries.
///
/// `name_prefix` falls back to the preset's prefix when `None` or blank. A prefix containing
/// `/`, `\` or `..` is a [`GaugeError::Validation`].
pub fn export_archive(preset: &Preset, name_prefix: Option<&str>) -> GaugeResult<Vec<u8>> {
    export_archive_with_opts(preset, name_prefix, &ExportOpts::default())
}

/// [`export_archive`] with explicit options.
///
/// Any failed state aborts the export; no partial archive is returned. Cancellation is checked
/// before each state and yields [`GaugeError::Cancelled`].
#[tracing::instrument(skip(preset, opts), fields(total))]
pub fn export_archive_with_opts(
    preset: &Preset,
    name_prefix: Option<&str>,
    opts: &ExportOpts,
) -> GaugeResult<Vec<u8>> {
    let prefix = validate_prefix(
        name_prefix
            .map(str::trim)
            .filter(|p| !p.is_empty())
            .unwrap_or_else(|| preset.effective_name_prefix()),
    )?;
    let total = effective_export_states(preset);
    tracing::Span::current().record("total", total);

    let resolved = preset.resolve();
    let canvas = export_canvas(&resolved, opts.size)?;

    let pngs = if opts.threading.parallel {
        encode_states_parallel(preset, &resolved, canvas, total, opts)?
    } else {
        encode_states_sequential(preset, &resolved, canvas, total, opts)?
    };

    let mut archive = ArchiveBuilder::new();
    for (index, png) in (0..total).zip(&pngs) {
        archive.add(&state_file_name(prefix, index, total), png)?;
    }
    let bytes = archive.finish()?;
    tracing::info!(
        states = total,
        bytes = bytes.len(),
        width = canvas.width,
        height = canvas.height,
        "archive export complete"
    );
    Ok(bytes)
}

fn encode_one(
    renderer: &mut StateRenderer,
    preset: &Preset,
    resolved: &ResolvedPreset,
    canvas: Canvas,
    index: u32,
    total: u32,
) -> GaugeResult<Vec<u8>> {
    let progress = progress_for_state(preset, index, total);
    let frame = renderer.render_frame(resolved, canvas, progress)?;
    let png = encode_png(frame, index)?;
    tracing::debug!(index, progress, bytes = png.len(), "state encoded");
    Ok(png)
}

fn encode_states_sequential(
    preset: &Preset,
    resolved: &ResolvedPreset,
    canvas: Canvas,
    total: u32,
    opts: &ExportOpts,
) -> GaugeResult<Vec<Vec<u8>>> {
    let mut renderer = StateRenderer::new(opts.fit_to_canvas);
    let mut out = Vec::with_capacity(total as usize);
    for index in 0..total {
        if opts.cancelled() {
            return Err(GaugeError::Cancelled {
                completed: index,
                total,
            });
        }
        out.push(encode_one(
            &mut renderer,
            preset,
            resolved,
            canvas,
            index,
            total,
        )?);
    }
    Ok(out)
}

fn encode_states_parallel(
    preset: &Preset,
    resolved: &ResolvedPreset,
    canvas: Canvas,
    total: u32,
    opts: &ExportOpts,
) -> GaugeResult<Vec<Vec<u8>>> {
    let pool = build_thread_pool(opts.threading.threads)?;
    let results = pool.install(|| {
        (0..total)
            .into_par_iter()
            .map_init(
                || StateRenderer::new(opts.fit_to_canvas),
                |renderer, index| -> Option<GaugeResult<Vec<u8>>> {
                    if opts.cancelled() {
                        return None;
                    }
                    Some(encode_one(renderer, preset, resolved, canvas, index, total))
                },
            )
            .collect::<Vec<_>>()
    });

    if opts.cancelled() || results.iter().any(Option::is_none) {
        let completed = results
            .iter()
            .filter(|r| matches!(r, Some(Ok(_))))
            .count() as u32;
        return Err(GaugeError::Cancelled { completed, total });
    }

    let mut out = Vec::with_capacity(results.len());
    for item in results.into_iter().flatten() {
        out.push(item?);
    }
    Ok(out)
}

fn build_thread_pool(threads: Option<usize>) -> GaugeResult<rayon::ThreadPool> {
    if let Some(n) = threads
        && n == 0
    {
        return Err(GaugeError::validation(
            "export threading 'threads' must be >= 1 when set",
        ));
    }

    let mut builder = rayon::ThreadPoolBuilder::new();
    if let Some(n) = threads {
        builder = builder.num_threads(n);
    }
    builder
        .build()
        .map_err(|e| GaugeError::render(format!("failed to build rayon thread pool: {e}")))
}

#[cfg(test)]
#[path = "../../tests/unit/export/pipeline.rs"]
mod tests;
