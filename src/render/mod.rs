/// Stroke composer: base track, main fill, border and glow in draw order.
pub mod compose;
/// Additive glow pass synthesis.
pub mod glow;
/// `vello_cpu` raster surface.
pub mod surface;
