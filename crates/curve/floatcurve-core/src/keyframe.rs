//! Keyframe value type and field validation.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::constants::MAX_REASONABLE_VALUE;
use crate::error::{CurveError, RangeKind};
use crate::Result;

/// Validate a single numeric field: finite and `|value| <= MAX_REASONABLE_VALUE`.
pub fn validate_float(value: f32, field: &str) -> Result<f32> {
    if !value.is_finite() {
        return Err(CurveError::range(field, RangeKind::NotFinite));
    }
    if value.abs() > MAX_REASONABLE_VALUE {
        return Err(CurveError::range(field, RangeKind::TooLarge { value }));
    }
    Ok(value)
}

/// A single control point of a float curve.
///
/// Immutable once built; every field is validated on construction, so a
/// `Keyframe` in hand is always finite and within range. "Editing" builds a
/// replacement through the `with_*` methods.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawKeyframe")]
pub struct Keyframe {
    time: f32,
    value: f32,
    in_tangent: f32,
    out_tangent: f32,
}

impl Keyframe {
    pub fn new(time: f32, value: f32, in_tangent: f32, out_tangent: f32) -> Result<Self> {
        Ok(Self {
            time: validate_float(time, "time")?,
            value: validate_float(value, "value")?,
            in_tangent: validate_float(in_tangent, "in_tangent")?,
            out_tangent: validate_float(out_tangent, "out_tangent")?,
        })
    }

    /// Keyframe with both tangents zero (auto-tangent at interior points).
    pub fn flat(time: f32, value: f32) -> Result<Self> {
        Self::new(time, value, 0.0, 0.0)
    }

    #[inline]
    pub fn time(&self) -> f32 {
        self.time
    }

    #[inline]
    pub fn value(&self) -> f32 {
        self.value
    }

    #[inline]
    pub fn in_tangent(&self) -> f32 {
        self.in_tangent
    }

    #[inline]
    pub fn out_tangent(&self) -> f32 {
        self.out_tangent
    }

    pub fn with_time(&self, time: f32) -> Result<Self> {
        Ok(Self {
            time: validate_float(time, "time")?,
            ..*self
        })
    }

    pub fn with_value(&self, value: f32) -> Result<Self> {
        Ok(Self {
            value: validate_float(value, "value")?,
            ..*self
        })
    }

    pub fn with_in_tangent(&self, in_tangent: f32) -> Result<Self> {
        Ok(Self {
            in_tangent: validate_float(in_tangent, "in_tangent")?,
            ..*self
        })
    }

    pub fn with_out_tangent(&self, out_tangent: f32) -> Result<Self> {
        Ok(Self {
            out_tangent: validate_float(out_tangent, "out_tangent")?,
            ..*self
        })
    }

    /// Replace both tangents at once; neither is applied unless both validate.
    pub fn with_tangents(&self, in_tangent: f32, out_tangent: f32) -> Result<Self> {
        Ok(Self {
            in_tangent: validate_float(in_tangent, "in_tangent")?,
            out_tangent: validate_float(out_tangent, "out_tangent")?,
            ..*self
        })
    }

    /// Order by time only. Fields are finite, so this is total.
    #[inline]
    pub fn cmp_time(&self, other: &Keyframe) -> Ordering {
        self.time.total_cmp(&other.time)
    }
}

#[derive(Deserialize)]
struct RawKeyframe {
    time: f32,
    value: f32,
    #[serde(default)]
    in_tangent: f32,
    #[serde(default)]
    out_tangent: f32,
}

impl TryFrom<RawKeyframe> for Keyframe {
    type Error = CurveError;

    fn try_from(raw: RawKeyframe) -> Result<Self> {
        Keyframe::new(raw.time, raw.value, raw.in_tangent, raw.out_tangent)
    }
}
