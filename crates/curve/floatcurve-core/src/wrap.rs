//! Wrap modes for evaluation outside the keyframe range.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Policy for times before the first or after the last keyframe.
///
/// Only clamping and looping change evaluation. Legacy mode names and numeric
/// codes decode to `Clamp` unless they name `Loop`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", from = "RawWrapMode")]
pub enum WrapMode {
    /// Hold the boundary keyframe's value.
    #[default]
    Clamp,
    /// Repeat the keyframe range periodically.
    Loop,
}

/// Numeric code the legacy curve format used for looping.
const LEGACY_LOOP_CODE: i64 = 2;

impl WrapMode {
    /// Decode a legacy numeric wrap code. Only `2` loops.
    pub fn from_code(code: i64) -> Self {
        if code == LEGACY_LOOP_CODE {
            WrapMode::Loop
        } else {
            WrapMode::Clamp
        }
    }

    /// Decode a mode name, case-insensitively. Unknown names clamp.
    pub fn from_name(name: &str) -> Self {
        if name.trim().eq_ignore_ascii_case("loop") {
            WrapMode::Loop
        } else {
            WrapMode::Clamp
        }
    }

    #[inline]
    pub fn is_loop(self) -> bool {
        self == WrapMode::Loop
    }

    pub fn as_str(self) -> &'static str {
        match self {
            WrapMode::Clamp => "clamp",
            WrapMode::Loop => "loop",
        }
    }
}

impl fmt::Display for WrapMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for WrapMode {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.trim().parse::<i64>() {
            Ok(code) => WrapMode::from_code(code),
            Err(_) => WrapMode::from_name(s),
        })
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawWrapMode {
    Code(i64),
    Name(String),
}

impl From<RawWrapMode> for WrapMode {
    fn from(raw: RawWrapMode) -> Self {
        match raw {
            RawWrapMode::Code(code) => WrapMode::from_code(code),
            RawWrapMode::Name(name) => WrapMode::from_name(&name),
        }
    }
}
