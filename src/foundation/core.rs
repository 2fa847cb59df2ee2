use crate::foundation::error::{GaugeError, GaugeResult};

pub use kurbo::{Affine, BezPath, Point, Rect, Vec2};

/// Output canvas dimensions in pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Canvas {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl Canvas {
    /// Create a validated canvas. Both sides must fit the raster backend (`1..=u16::MAX`).
    pub fn new(width: u32, height: u32) -> GaugeResult<Self> {
        if width == 0 || height == 0 {
            return Err(GaugeError::validation("canvas width/height must be > 0"));
        }
        if width > u32::from(u16::MAX) || height > u32::from(u16::MAX) {
            return Err(GaugeError::validation(format!(
                "canvas {width}x{height} exceeds the {} px raster limit",
                u16::MAX
            )));
        }
        Ok(Self { width, height })
    }

    /// Canvas center in pixel space.
    pub fn center(self) -> Point {
        Point::new(f64::from(self.width) / 2.0, f64::from(self.height) / 2.0)
    }
}

/// A rendered frame as RGBA8 pixels.
///
/// Surfaces produce **premultiplied** alpha; the `premultiplied` flag makes this explicit at the
/// encoder boundary.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FrameRGBA {
    /// Frame width in pixels.
    pub width: u32,
    /// Frame height in pixels.
    pub height: u32,
    /// RGBA8 bytes, tightly packed, row-major.
    pub data: Vec<u8>,
    /// Whether the `data` is premultiplied alpha.
    pub premultiplied: bool,
}

impl FrameRGBA {
    /// Return straight-alpha bytes suitable for PNG encoding.
    pub fn into_straight_rgba8(mut self) -> Vec<u8> {
        if self.premultiplied {
            unpremultiply_in_place(&mut self.data);
        }
        self.data
    }

    /// Straight-alpha pixel at `(x, y)`, or `None` when out of bounds.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = ((y as usize) * (self.width as usize) + (x as usize)) * 4;
        let px = self.data.get(i..i + 4)?;
        let mut out = [px[0], px[1], px[2], px[3]];
        if self.premultiplied {
            unpremultiply_in_place(&mut out);
        }
        Some(out)
    }
}

pub(crate) fn unpremultiply_in_place(rgba: &mut [u8]) {
    for px in rgba.chunks_exact_mut(4) {
        let a = px[3] as u16;
        if a == 0 {
            px[0] = 0;
            px[1] = 0;
            px[2] = 0;
            continue;
        }
        px[0] = ((px[0] as u16 * 255 + a / 2) / a).min(255) as u8;
        px[1] = ((px[1] as u16 * 255 + a / 2) / a).min(255) as u8;
        px[2] = ((px[2] as u16 * 255 + a / 2) / a).min(255) as u8;
    }
}

/// Clamp `v` into `[min, max]`, mapping non-finite input to `min`.
pub(crate) fn clamp_finite(v: f64, min: f64, max: f64) -> f64 {
    if v.is_finite() { v.clamp(min, max) } else { min }
}

/// Non-negative finite length; NaN, infinities and negatives collapse to zero.
pub(crate) fn non_negative(v: f64) -> f64 {
    if v.is_finite() && v > 0.0 { v } else { 0.0 }
}
