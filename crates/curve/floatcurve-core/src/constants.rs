//! Numeric limits shared by the curve modules.

/// Two keyframe times closer than this are treated as the same slot.
pub const TIME_EPSILON: f32 = 1e-4;

/// Largest magnitude accepted for any keyframe field (inclusive).
pub const MAX_REASONABLE_VALUE: f32 = 1e9;

/// Tolerance used by [`crate::interp::functions::approximately`].
pub const APPROX_TOLERANCE: f32 = 1e-4;

/// Fixed resolution of the min/max value scan.
pub const RANGE_SCAN_SAMPLES: usize = 100;

/// Upper bound on samples produced for plotting a curve.
pub const MAX_CURVE_SAMPLES: usize = 1000;

/// Leading token written on every serialized key line.
pub const DEFAULT_KEY_NAME: &str = "key";
