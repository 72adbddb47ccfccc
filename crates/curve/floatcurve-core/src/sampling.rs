//! Evenly spaced curve samples for plotting.

use serde::{Deserialize, Serialize};

use crate::constants::MAX_CURVE_SAMPLES;
use crate::evaluator::CurveEvaluator;

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct CurveSample {
    pub time: f32,
    pub value: f32,
}

/// Sample `evaluator` at `samples` evenly spaced times over `[start, end]`,
/// both ends included.
///
/// The count is clamped to `2..=MAX_CURVE_SAMPLES`; a reversed window is swapped
/// and a non-finite one yields nothing.
pub fn sample_curve(
    evaluator: &CurveEvaluator,
    start: f32,
    end: f32,
    samples: usize,
) -> Vec<CurveSample> {
    if !start.is_finite() || !end.is_finite() {
        return Vec::new();
    }
    let (start, end) = if start <= end {
        (start, end)
    } else {
        (end, start)
    };
    let count = samples.clamp(2, MAX_CURVE_SAMPLES);
    let step = (end - start) / (count - 1) as f32;

    (0..count)
        .map(|i| {
            // Pin the last sample to `end` so rounding never stops short of it.
            let time = if i + 1 == count {
                end
            } else {
                start + i as f32 * step
            };
            CurveSample {
                time,
                value: evaluator.evaluate(time),
            }
        })
        .collect()
}

/// [`sample_curve`] over the keyframe time bounds; empty for an empty curve.
pub fn sample_keyframe_span(evaluator: &CurveEvaluator, samples: usize) -> Vec<CurveSample> {
    match evaluator.store().time_bounds() {
        Some((start, end)) => sample_curve(evaluator, start, end, samples),
        None => Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keyframe::Keyframe;
    use crate::store::KeyframeStore;

    fn linear() -> CurveEvaluator {
        KeyframeStore::from_keys([
            Keyframe::new(0.0, 0.0, 0.0, 0.1).unwrap(),
            Keyframe::new(10.0, 1.0, 0.1, 0.0).unwrap(),
        ])
        .into()
    }

    #[test]
    fn includes_both_ends() {
        let out = sample_curve(&linear(), 0.0, 10.0, 11);
        assert_eq!(out.len(), 11);
        assert_eq!(out[0].time, 0.0);
        assert_eq!(out[10].time, 10.0);
        assert_eq!(out[10].value, 1.0);
        assert!((out[5].value - 0.5).abs() < 1e-6);
    }

    #[test]
    fn clamps_count_and_swaps_window() {
        assert_eq!(sample_curve(&linear(), 10.0, 0.0, 0).len(), 2);
        assert_eq!(sample_curve(&linear(), 0.0, 1.0, 50_000).len(), MAX_CURVE_SAMPLES);
        assert!(sample_curve(&linear(), 0.0, f32::NAN, 10).is_empty());
        let swapped = sample_curve(&linear(), 10.0, 0.0, 3);
        assert_eq!(swapped[0].time, 0.0);
    }

    #[test]
    fn keyframe_span_of_empty_curve() {
        assert!(sample_keyframe_span(&CurveEvaluator::default(), 10).is_empty());
        assert_eq!(sample_keyframe_span(&linear(), 5).len(), 5);
    }
}
