//! Curve document: a [`CurveEvaluator`] plus the key-line text format.
//!
//! This is the layer an editor talks to. It owns the curve, loads and saves the
//! text form, and exposes the whole-curve helpers (smoothing, range scan,
//! plotting samples).

use log::{debug, warn};

use crate::config::CurveConfig;
use crate::error::CurveError;
use crate::evaluator::CurveEvaluator;
use crate::keyframe::Keyframe;
use crate::range::{find_min_max_value, ValueRange};
use crate::sampling::{sample_keyframe_span, CurveSample};
use crate::smoothing::smooth_all_tangents;
use crate::store::KeyframeStore;
use crate::text_format::{format_key_line, format_lines, parse_named_lines};
use crate::wrap::WrapMode;
use crate::Result;

/// Weight used when smoothing the whole document: the left secant slope.
const DOCUMENT_SMOOTH_WEIGHT: f32 = 0.0;

/// What [`CurveDocument::load`] kept and skipped.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct LoadReport {
    /// Lines that parsed and were added (near-duplicate times may still collapse).
    pub accepted: usize,
    pub rejected: Vec<CurveError>,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct CurveDocument {
    curve: CurveEvaluator,
    config: CurveConfig,
}

impl CurveDocument {
    pub fn new(config: CurveConfig) -> Self {
        let curve = CurveEvaluator::default()
            .with_wrap_modes(config.pre_wrap_mode, config.post_wrap_mode);
        Self { curve, config }
    }

    pub fn from_keyframes<I>(config: CurveConfig, keys: I) -> Self
    where
        I: IntoIterator<Item = Keyframe>,
    {
        let mut doc = Self::new(config);
        for key in keys {
            doc.curve.add_key(key);
        }
        doc
    }

    #[inline]
    pub fn config(&self) -> &CurveConfig {
        &self.config
    }

    #[inline]
    pub fn evaluator(&self) -> &CurveEvaluator {
        &self.curve
    }

    #[inline]
    pub fn store(&self) -> &KeyframeStore {
        self.curve.store()
    }

    #[inline]
    pub fn keys(&self) -> &[Keyframe] {
        self.curve.keys()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.curve.store().len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.curve.store().is_empty()
    }

    /// Replace the whole curve, keeping the document's wrap modes.
    pub fn set_store(&mut self, store: KeyframeStore) {
        self.curve = CurveEvaluator::new(store)
            .with_wrap_modes(self.config.pre_wrap_mode, self.config.post_wrap_mode);
    }

    pub fn set_pre_wrap_mode(&mut self, mode: WrapMode) {
        self.config.pre_wrap_mode = mode;
        self.curve.set_pre_wrap_mode(mode);
    }

    pub fn set_post_wrap_mode(&mut self, mode: WrapMode) {
        self.config.post_wrap_mode = mode;
        self.curve.set_post_wrap_mode(mode);
    }

    /// Validate the four fields and add the keyframe. Nothing changes on error.
    pub fn add(&mut self, time: f32, value: f32, in_tangent: f32, out_tangent: f32) -> Result<usize> {
        let key = Keyframe::new(time, value, in_tangent, out_tangent)?;
        Ok(self.curve.add_key(key))
    }

    pub fn add_key(&mut self, key: Keyframe) -> usize {
        self.curve.add_key(key)
    }

    #[inline]
    pub fn evaluate(&self, time: f32) -> f32 {
        self.curve.evaluate(time)
    }

    /// Earliest and latest keyframe time, `None` when empty.
    pub fn time_bounds(&self) -> Option<(f32, f32)> {
        self.curve.store().time_bounds()
    }

    /// Replace the curve with the keys parsed from `text`. Only lines starting
    /// with the configured key name count; malformed key lines are skipped,
    /// logged and returned in the report.
    pub fn load(&mut self, text: &str) -> LoadReport {
        let parsed = parse_named_lines(text, &self.config.key_name);
        for err in &parsed.rejected {
            warn!("floatcurve: skipping key line: {err}");
        }
        let accepted = parsed.keys.len();
        self.set_store(KeyframeStore::from_keys(parsed.keys));
        debug!(
            "floatcurve: loaded {} keys ({} lines accepted, {} rejected)",
            self.len(),
            accepted,
            parsed.rejected.len()
        );
        LoadReport {
            accepted,
            rejected: parsed.rejected,
        }
    }

    /// One formatted key line per keyframe, in time order.
    pub fn save(&self) -> Vec<String> {
        self.keys()
            .iter()
            .map(|key| format_key_line(key, &self.config.key_name, self.config.number_style))
            .collect()
    }

    /// [`Self::save`] joined with newlines.
    pub fn to_text(&self) -> String {
        format_lines(self.keys(), &self.config.key_name, self.config.number_style)
    }

    /// Smooth every interior keyframe toward its left secant slope.
    /// Curves with fewer than three keys are left alone.
    pub fn smooth_tangents(&mut self) -> Result<()> {
        smooth_all_tangents(self.curve.store_mut(), DOCUMENT_SMOOTH_WEIGHT)
    }

    pub fn find_min_max_value(&self) -> ValueRange {
        find_min_max_value(&self.curve)
    }

    /// Plot samples across the keyframe span.
    pub fn sample(&self, samples: usize) -> Vec<CurveSample> {
        sample_keyframe_span(&self.curve, samples)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::NumberStyle;

    #[test]
    fn add_validates_before_touching_the_curve() {
        let mut doc = CurveDocument::default();
        assert!(doc.add(0.0, f32::NAN, 0.0, 0.0).is_err());
        assert!(doc.is_empty());
        assert_eq!(doc.add(1.0, 2.0, 0.0, 0.0), Ok(0));
        assert_eq!(doc.time_bounds(), Some((1.0, 1.0)));
    }

    #[test]
    fn load_replaces_and_reports() {
        let mut doc = CurveDocument::default();
        doc.add(50.0, 9.0, 0.0, 0.0).unwrap();
        let report = doc.load("key = 10 1\nkey = 0 0\nbroken\nkey = 5 oops\n");
        assert_eq!(report.accepted, 2);
        assert_eq!(report.rejected.len(), 1);
        assert!(matches!(report.rejected[0], CurveError::Parse { line: 4, .. }));
        assert_eq!(doc.time_bounds(), Some((0.0, 10.0)));
        assert_eq!(doc.len(), 2);
    }

    #[test]
    fn save_uses_config_key_name_and_style() {
        let cfg = CurveConfig {
            key_name: "k".into(),
            ..CurveConfig::default()
        }
        .with_number_style(NumberStyle::RoundTrip);
        let mut doc = CurveDocument::new(cfg);
        doc.add(0.5, 0.25, 0.0, 0.125).unwrap();
        assert_eq!(doc.save(), vec!["k = 0.5 0.25 0 0.125".to_string()]);

        let text = doc.to_text();
        let mut reloaded = CurveDocument::new(doc.config().clone());
        assert!(reloaded.load(&format!("other = 9 9\n{text}")).rejected.is_empty());
        assert_eq!(reloaded.keys(), doc.keys());
    }

    #[test]
    fn wrap_modes_follow_config() {
        let cfg = CurveConfig::default().with_wrap_modes(WrapMode::Clamp, WrapMode::Loop);
        let mut doc = CurveDocument::new(cfg);
        doc.load("key = 0 0 0 0.1\nkey = 10 1 0.1 0");
        assert_eq!(doc.evaluate(15.0), doc.evaluate(5.0));
        doc.set_post_wrap_mode(WrapMode::Clamp);
        assert_eq!(doc.evaluate(15.0), 1.0);
    }
}
