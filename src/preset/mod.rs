/// Boundary preset document.
pub mod model;
/// Normalization into validated draw parameters.
pub mod resolve;
/// Typed partial updates.
pub mod update;
