use std::io::Cursor;

use crate::foundation::core::FrameRGBA;
use crate::foundation::error::{GaugeError, GaugeResult};

/// Encode a rendered frame as straight-alpha RGBA8 PNG bytes.
///
/// `index` names the state in the error when encoding fails.
pub fn encode_png(frame: FrameRGBA, index: u32) -> GaugeResult<Vec<u8>> {
    let (width, height) = (frame.width, frame.height);
    let straight = frame.into_straight_rgba8();
    let img = image::RgbaImage::from_raw(width, height, straight)
        .ok_or_else(|| GaugeError::encode(index, "invalid rgba buffer size"))?;

    let mut out = Cursor::new(Vec::new());
    img.write_to(&mut out, image::ImageFormat::Png)
        .map_err(|e| GaugeError::encode(index, e.to_string()))?;
    let bytes = out.into_inner();
    if bytes.is_empty() {
        return Err(GaugeError::encode(index, "encoder produced no data"));
    }
    Ok(bytes)
}
