//! floatcurve-core: keyframe store and Hermite evaluation for float curves.
//!
//! A float curve is an ordered set of keyframes `(time, value, in_tangent, out_tangent)`
//! evaluated segment by segment with cubic Hermite interpolation. This crate holds
//! the math and keyframe bookkeeping plus the thin layers an editor builds on top:
//! the `key = t v in out` text format, an editable point list and curve presets.
//!
//! Rendering, pixel mapping and preset file storage live outside this crate.

pub mod config;
pub mod constants;
pub mod document;
pub mod editor;
pub mod error;
pub mod evaluator;
pub mod interp;
pub mod keyframe;
pub mod presets;
pub mod range;
pub mod sampling;
pub mod smoothing;
pub mod store;
pub mod text_format;
pub mod wrap;

// Re-exports for consumers (editor front-ends)
pub use config::{CurveConfig, NumberStyle};
pub use document::{CurveDocument, LoadReport};
pub use editor::{EditOp, PointList};
pub use error::{CurveError, RangeKind};
pub use evaluator::CurveEvaluator;
pub use keyframe::Keyframe;
pub use presets::{builtin_presets, default_preset, Preset, PresetLibrary};
pub use range::{find_min_max_value, ValueRange};
pub use sampling::{sample_curve, CurveSample};
pub use smoothing::{smooth_all_tangents, smooth_tangents};
pub use store::KeyframeStore;
pub use text_format::{format_key_line, parse_key_line, parse_lines, parse_named_lines, ParsedLines};
pub use wrap::WrapMode;

/// Crate-wide result type.
pub type Result<T> = core::result::Result<T, CurveError>;
