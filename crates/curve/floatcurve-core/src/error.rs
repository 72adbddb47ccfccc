//! Error types for curve operations

use serde::{Deserialize, Serialize};

/// Why a numeric field was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum RangeKind {
    /// NaN or +/- infinity.
    NotFinite,
    /// Magnitude above [`crate::constants::MAX_REASONABLE_VALUE`].
    TooLarge { value: f32 },
}

/// Error type shared by every curve operation.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[non_exhaustive]
pub enum CurveError {
    /// A keyframe field failed validation
    #[error("{field} {}", describe_range(.kind))]
    Range { field: String, kind: RangeKind },

    /// Index outside the legal range for the requested operation
    #[error("Index {index} is out of range for {len} keyframes")]
    IndexOutOfRange { index: usize, len: usize },

    /// Operation not meaningful for the current keyframes
    #[error("Invalid state: {reason}")]
    InvalidState { reason: String },

    /// Key line could not be parsed
    #[error("Parse error on line {line}: {reason}")]
    Parse { line: usize, reason: String },

    /// Preset library rejected a request
    #[error("Preset '{name}': {reason}")]
    Preset { name: String, reason: String },

    /// JSON (de)serialization failure
    #[error("Serialization error: {reason}")]
    Serialization { reason: String },
}

fn describe_range(kind: &RangeKind) -> String {
    match kind {
        RangeKind::NotFinite => "cannot be NaN or Infinity".to_string(),
        RangeKind::TooLarge { value } => format!("too large: {value}"),
    }
}

impl CurveError {
    /// Shorthand for a field range failure.
    #[inline]
    pub fn range(field: impl Into<String>, kind: RangeKind) -> Self {
        Self::Range {
            field: field.into(),
            kind,
        }
    }

    /// Shorthand for an invalid-state failure.
    #[inline]
    pub fn invalid_state(reason: impl Into<String>) -> Self {
        Self::InvalidState {
            reason: reason.into(),
        }
    }

    /// Whether a caller can reasonably retry with different input.
    #[inline]
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Self::Range { .. } | Self::Parse { .. } | Self::Preset { .. }
        )
    }

    /// Get error category for logging/reporting
    #[inline]
    pub fn category(&self) -> &'static str {
        match self {
            Self::Range { .. } => "validation",
            Self::IndexOutOfRange { .. } => "structure",
            Self::InvalidState { .. } => "state",
            Self::Parse { .. } => "parse",
            Self::Preset { .. } => "preset",
            Self::Serialization { .. } => "serialization",
        }
    }
}

impl From<serde_json::Error> for CurveError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization {
            reason: err.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn range_messages_name_the_field() {
        let err = CurveError::range("value", RangeKind::TooLarge { value: 2e9 });
        assert_eq!(err.to_string(), "value too large: 2000000000");

        let err = CurveError::range("time", RangeKind::NotFinite);
        assert_eq!(err.to_string(), "time cannot be NaN or Infinity");
    }

    #[test]
    fn categories() {
        assert_eq!(
            CurveError::IndexOutOfRange { index: 0, len: 3 }.category(),
            "structure"
        );
        assert_eq!(CurveError::invalid_state("x").category(), "state");
        assert!(!CurveError::invalid_state("x").is_recoverable());
        assert!(CurveError::range("time", RangeKind::NotFinite).is_recoverable());
    }

    #[test]
    fn test_serialization() {
        let error = CurveError::Parse {
            line: 3,
            reason: "Invalid time value: 'abc'".into(),
        };
        let serialized = serde_json::to_string(&error).unwrap();
        let deserialized: CurveError = serde_json::from_str(&serialized).unwrap();
        assert_eq!(error, deserialized);
    }
}
