//! Tangent smoothing from neighbouring keyframes.

use crate::constants::TIME_EPSILON;
use crate::error::CurveError;
use crate::interp::{lerp_f32, secant_slope};
use crate::store::KeyframeStore;
use crate::Result;

/// Set both tangents of the interior keyframe at `index` to
/// `lerp(left_slope, right_slope, weight)`.
///
/// Fails with `IndexOutOfRange` for endpoints, out-of-range indices and stores
/// with fewer than three keys, and with `InvalidState` when a neighbour is
/// closer than `TIME_EPSILON`. The store is untouched on failure.
pub fn smooth_tangents(store: &mut KeyframeStore, index: usize, weight: f32) -> Result<()> {
    let len = store.len();
    if len < 3 || index == 0 || index >= len - 1 {
        return Err(CurveError::IndexOutOfRange { index, len });
    }

    let keys = store.keys();
    let (prev, curr, next) = (keys[index - 1], keys[index], keys[index + 1]);
    let slopes = (
        secant_slope(
            prev.time(),
            prev.value(),
            curr.time(),
            curr.value(),
            TIME_EPSILON,
        ),
        secant_slope(
            curr.time(),
            curr.value(),
            next.time(),
            next.value(),
            TIME_EPSILON,
        ),
    );
    let (Some(left), Some(right)) = slopes else {
        return Err(CurveError::invalid_state(
            "time values too close to calculate tangents",
        ));
    };

    let tangent = lerp_f32(left, right, weight);
    let smoothed = curr.with_tangents(tangent, tangent)?;
    store.replace(index, smoothed)
}

/// Smooth every interior keyframe in order with `weight`; endpoints keep their
/// tangents. Fewer than three keys is a no-op.
///
/// Each step sees the tangents already written by earlier steps, but slopes
/// only depend on times and values, so the order does not change the result.
pub fn smooth_all_tangents(store: &mut KeyframeStore, weight: f32) -> Result<()> {
    if store.len() < 3 {
        return Ok(());
    }
    let mut scratch = store.clone();
    for index in 1..scratch.len() - 1 {
        smooth_tangents(&mut scratch, index, weight)?;
    }
    *store = scratch;
    Ok(())
}
