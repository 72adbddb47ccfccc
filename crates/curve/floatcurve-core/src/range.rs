//! Sampled min/max scan used for auto-fitting display bounds.

use serde::{Deserialize, Serialize};

use crate::constants::RANGE_SCAN_SAMPLES;
use crate::evaluator::CurveEvaluator;

/// Extremes found by [`find_min_max_value`].
///
/// An empty curve produces `min = +inf`, `max = -inf`; check [`ValueRange::is_defined`]
/// before using the bounds.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ValueRange {
    pub min: f32,
    pub max: f32,
    pub time_at_min: f32,
    pub time_at_max: f32,
}

impl Default for ValueRange {
    fn default() -> Self {
        Self {
            min: f32::INFINITY,
            max: f32::NEG_INFINITY,
            time_at_min: 0.0,
            time_at_max: 0.0,
        }
    }
}

impl ValueRange {
    #[inline]
    pub fn is_defined(&self) -> bool {
        self.min <= self.max
    }

    /// `max - min`, or `None` when undefined.
    pub fn span(&self) -> Option<f32> {
        self.is_defined().then(|| self.max - self.min)
    }
}

/// Sample the curve at `RANGE_SCAN_SAMPLES` evenly spaced times starting at the
/// first keyframe, `(last - first) / RANGE_SCAN_SAMPLES` apart, and keep the
/// smallest and largest values seen (first occurrence wins ties).
///
/// The scan is approximate: a bulge between samples can be missed, and the last
/// sample sits one step before the final keyframe.
pub fn find_min_max_value(evaluator: &CurveEvaluator) -> ValueRange {
    let mut range = ValueRange::default();
    let Some((start, end)) = evaluator.store().time_bounds() else {
        return range;
    };

    let step = (end - start) / RANGE_SCAN_SAMPLES as f32;
    for i in 0..RANGE_SCAN_SAMPLES {
        let time = start + i as f32 * step;
        let value = evaluator.evaluate(time);
        if value < range.min {
            range.min = value;
            range.time_at_min = time;
        }
        if value > range.max {
            range.max = value;
            range.time_at_max = time;
        }
    }
    range
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keyframe::Keyframe;
    use crate::store::KeyframeStore;

    #[test]
    fn empty_curve_is_undefined() {
        let r = find_min_max_value(&CurveEvaluator::default());
        assert_eq!(r.min, f32::INFINITY);
        assert_eq!(r.max, f32::NEG_INFINITY);
        assert_eq!((r.time_at_min, r.time_at_max), (0.0, 0.0));
        assert!(!r.is_defined());
        assert_eq!(r.span(), None);
    }

    #[test]
    fn single_key_collapses_to_its_value() {
        let store = KeyframeStore::from_keys([Keyframe::flat(3.0, 7.0).unwrap()]);
        let r = find_min_max_value(&store.into());
        assert_eq!((r.min, r.max), (7.0, 7.0));
        assert_eq!((r.time_at_min, r.time_at_max), (3.0, 3.0));
    }

    #[test]
    fn finds_interior_peak() {
        let store = KeyframeStore::from_keys([
            Keyframe::flat(0.0, 0.0).unwrap(),
            Keyframe::flat(50.0, 10.0).unwrap(),
            Keyframe::flat(100.0, 0.0).unwrap(),
        ]);
        let r = find_min_max_value(&store.into());
        assert_eq!(r.max, 10.0);
        assert_eq!(r.time_at_max, 50.0);
        assert_eq!(r.min, 0.0);
        assert_eq!(r.time_at_min, 0.0);
    }
}
