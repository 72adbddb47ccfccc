//! Hermite evaluation over a [`KeyframeStore`].
//!
//! Model:
//! - Segment `[k0 -> k1]` is a cubic Hermite in time, with slopes taken from
//!   `k0.out_tangent` and `k1.in_tangent`.
//! - A stored tangent of exactly `0.0` on an interior keyframe is read as "unset"
//!   and replaced by the auto-tangent (mean of the two adjacent secant slopes).
//!   Endpoint tangents are always used as stored.
//! - Outside `[first.time, last.time]` the wrap modes decide: `Clamp` holds the
//!   boundary value, `Loop` folds time back into the keyframe range.
//!
//! API:
//! - CurveEvaluator::evaluate(time) for any time; 0.0 on an empty curve.

use serde::{Deserialize, Serialize};

use crate::constants::TIME_EPSILON;
use crate::error::CurveError;
use crate::interp::{approximately, hermite, secant_slope};
use crate::keyframe::Keyframe;
use crate::store::KeyframeStore;
use crate::wrap::WrapMode;
use crate::Result;

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct CurveEvaluator {
    keys: KeyframeStore,
    #[serde(default)]
    pre_wrap_mode: WrapMode,
    #[serde(default)]
    post_wrap_mode: WrapMode,
}

impl CurveEvaluator {
    pub fn new(keys: KeyframeStore) -> Self {
        Self {
            keys,
            pre_wrap_mode: WrapMode::Clamp,
            post_wrap_mode: WrapMode::Clamp,
        }
    }

    pub fn with_wrap_modes(mut self, pre: WrapMode, post: WrapMode) -> Self {
        self.pre_wrap_mode = pre;
        self.post_wrap_mode = post;
        self
    }

    #[inline]
    pub fn store(&self) -> &KeyframeStore {
        &self.keys
    }

    #[inline]
    pub fn store_mut(&mut self) -> &mut KeyframeStore {
        &mut self.keys
    }

    pub fn into_store(self) -> KeyframeStore {
        self.keys
    }

    #[inline]
    pub fn keys(&self) -> &[Keyframe] {
        self.keys.keys()
    }

    /// See [`KeyframeStore::add_key`].
    pub fn add_key(&mut self, key: Keyframe) -> usize {
        self.keys.add_key(key)
    }

    #[inline]
    pub fn pre_wrap_mode(&self) -> WrapMode {
        self.pre_wrap_mode
    }

    #[inline]
    pub fn post_wrap_mode(&self) -> WrapMode {
        self.post_wrap_mode
    }

    pub fn set_pre_wrap_mode(&mut self, mode: WrapMode) {
        self.pre_wrap_mode = mode;
    }

    pub fn set_post_wrap_mode(&mut self, mode: WrapMode) {
        self.post_wrap_mode = mode;
    }

    /// Value of the curve at `time`.
    ///
    /// Empty curve: 0.0. Single keyframe: its value everywhere. A NaN time
    /// yields NaN; infinite times hold the boundary value even when looping.
    pub fn evaluate(&self, time: f32) -> f32 {
        let keys = self.keys.keys();
        let (first, last) = match keys {
            [] => return 0.0,
            [only] => return only.value(),
            [first, .., last] => (first, last),
        };
        if time.is_nan() {
            return f32::NAN;
        }

        if time <= first.time() {
            return if self.pre_wrap_mode.is_loop() && time.is_finite() {
                self.evaluate_in_range(self.loop_time(time))
            } else {
                first.value()
            };
        }
        if time >= last.time() {
            return if self.post_wrap_mode.is_loop() && time.is_finite() {
                self.evaluate_in_range(self.loop_time(time))
            } else {
                last.value()
            };
        }

        self.evaluate_in_range(time)
    }

    /// Evaluation for a time already known to be inside the keyframe range;
    /// boundary times resolve to the boundary values without wrapping again.
    fn evaluate_in_range(&self, time: f32) -> f32 {
        let keys = self.keys.keys();
        let n = keys.len();
        if time <= keys[0].time() {
            return keys[0].value();
        }
        if time >= keys[n - 1].time() {
            return keys[n - 1].value();
        }
        let index = self.keys.find_segment_index(time);
        self.segment_value(index, time)
    }

    /// Evaluate segment `[index, index + 1]` at `time` (clamped into the segment).
    pub fn evaluate_segment(&self, index: usize, time: f32) -> Result<f32> {
        let len = self.keys.len();
        if index + 1 >= len {
            return Err(CurveError::IndexOutOfRange { index, len });
        }
        Ok(self.segment_value(index, time))
    }

    fn segment_value(&self, index: usize, time: f32) -> f32 {
        let keys = self.keys.keys();
        let k0 = &keys[index];
        let k1 = &keys[index + 1];
        let h = k1.time() - k0.time();

        if approximately(h, 0.0) {
            return (k0.value() + k1.value()) * 0.5;
        }

        let s = ((time - k0.time()) / h).clamp(0.0, 1.0);
        let (m0, m1) = self.segment_slopes(index);
        hermite(k0.value(), k1.value(), m0, m1, s, h)
    }

    /// Slopes `(m0, m1)` used for segment `[index, index + 1]`, after
    /// substituting auto-tangents for unset (zero) interior tangents.
    pub fn segment_slopes(&self, index: usize) -> (f32, f32) {
        let keys = self.keys.keys();
        let k0 = &keys[index];
        let k1 = &keys[index + 1];
        let m0 = if k0.out_tangent() == 0.0 && index > 0 {
            self.auto_tangent(index)
        } else {
            k0.out_tangent()
        };
        let m1 = if k1.in_tangent() == 0.0 && index + 2 < keys.len() {
            self.auto_tangent(index + 1)
        } else {
            k1.in_tangent()
        };
        (m0, m1)
    }

    /// Mean of the secant slopes either side of an interior keyframe.
    ///
    /// 0.0 for endpoints, out-of-range indices, and when either neighbour is
    /// closer than `TIME_EPSILON` in time.
    pub fn auto_tangent(&self, index: usize) -> f32 {
        let keys = self.keys.keys();
        if index == 0 || index + 1 >= keys.len() {
            return 0.0;
        }
        let (prev, curr, next) = (&keys[index - 1], &keys[index], &keys[index + 1]);
        let left = secant_slope(
            prev.time(),
            prev.value(),
            curr.time(),
            curr.value(),
            TIME_EPSILON,
        );
        let right = secant_slope(
            curr.time(),
            curr.value(),
            next.time(),
            next.value(),
            TIME_EPSILON,
        );
        match (left, right) {
            (Some(l), Some(r)) => 0.5 * (l + r),
            _ => 0.0,
        }
    }

    /// Fold `time` into `[first.time, first.time + range)`.
    ///
    /// Degenerate (near-zero) range maps everything to `first.time`; an empty
    /// curve returns `time` unchanged.
    pub fn loop_time(&self, time: f32) -> f32 {
        let Some((start, end)) = self.keys.time_bounds() else {
            return time;
        };
        let range = end - start;
        if approximately(range, 0.0) {
            return start;
        }
        start + ((time - start) % range + range) % range
    }
}

impl From<KeyframeStore> for CurveEvaluator {
    fn from(keys: KeyframeStore) -> Self {
        Self::new(keys)
    }
}
