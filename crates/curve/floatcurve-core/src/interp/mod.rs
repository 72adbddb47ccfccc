//! Interpolation helpers.
//!
//! Scalar lerp, the tolerance compare used for degenerate spans, and the cubic
//! Hermite basis every curve segment is evaluated with.

pub mod functions;

pub use functions::{approximately, hermite, lerp_f32, secant_slope};
