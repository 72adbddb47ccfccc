//! Configuration for curve documents.

use serde::{Deserialize, Serialize};

use crate::constants::DEFAULT_KEY_NAME;
use crate::wrap::WrapMode;
use crate::Result;

/// How numbers are written when serializing key lines.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NumberStyle {
    /// Time and value with one decimal (a trailing `.0` dropped), tangents with
    /// four significant figures. Matches what the editor grid shows.
    #[default]
    Display,
    /// Shortest decimal that parses back to the exact `f32`.
    RoundTrip,
}

/// Document-level settings. Every field has a default, so partial JSON works.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CurveConfig {
    pub pre_wrap_mode: WrapMode,
    pub post_wrap_mode: WrapMode,
    /// Leading token written on each key line.
    pub key_name: String,
    pub number_style: NumberStyle,
}

impl Default for CurveConfig {
    fn default() -> Self {
        Self {
            pre_wrap_mode: WrapMode::Clamp,
            post_wrap_mode: WrapMode::Clamp,
            key_name: DEFAULT_KEY_NAME.to_string(),
            number_style: NumberStyle::Display,
        }
    }
}

impl CurveConfig {
    pub fn from_json_str(s: &str) -> Result<Self> {
        Ok(serde_json::from_str(s)?)
    }

    pub fn with_number_style(mut self, style: NumberStyle) -> Self {
        self.number_style = style;
        self
    }

    pub fn with_wrap_modes(mut self, pre: WrapMode, post: WrapMode) -> Self {
        self.pre_wrap_mode = pre;
        self.post_wrap_mode = post;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_json_keeps_defaults() {
        let cfg = CurveConfig::from_json_str(r#"{"post_wrap_mode": 2}"#).unwrap();
        assert_eq!(cfg.post_wrap_mode, WrapMode::Loop);
        assert_eq!(cfg.pre_wrap_mode, WrapMode::Clamp);
        assert_eq!(cfg.key_name, "key");
        assert_eq!(cfg.number_style, NumberStyle::Display);
    }

    #[test]
    fn bad_json_is_serialization_error() {
        let err = CurveConfig::from_json_str("{").unwrap_err();
        assert_eq!(err.category(), "serialization");
    }
}
