//! State export: progress enumeration, PNG encoding and zip packaging.
//!
//! [`pipeline`] drives the other modules; single-state and batch entry points are re-exported
//! from the crate root.

pub mod archive;
pub mod encode;
pub mod pipeline;
pub mod states;
