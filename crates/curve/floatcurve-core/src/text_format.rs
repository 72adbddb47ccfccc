//! The `key = <time> <value> [<in_tangent>] [<out_tangent>]` line format.
//!
//! Parsing:
//! - Tokens are separated by `=`, spaces or tabs; empty tokens are dropped.
//! - The first token names the key and is not checked; at least time and value
//!   must follow. Missing tangents read as 0.
//! - Numbers are plain `f32` literals (`.` decimal point, optional exponent),
//!   independent of any locale.
//! - A line whose numbers fail keyframe validation does not parse.
//!
//! Formatting writes the same shape back, one key per line.

use crate::config::NumberStyle;
use crate::error::CurveError;
use crate::keyframe::Keyframe;
use crate::Result;

const SEPARATORS: [char; 3] = ['=', ' ', '\t'];
const TANGENT_SIGNIFICANT_DIGITS: usize = 4;

/// Outcome of parsing a block of text: the good keys in input order and one
/// `CurveError::Parse` per rejected non-blank line.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ParsedLines {
    pub keys: Vec<Keyframe>,
    pub rejected: Vec<CurveError>,
}

impl ParsedLines {
    pub fn is_clean(&self) -> bool {
        self.rejected.is_empty()
    }
}

/// Parse one key line. Errors are reported against line 1.
pub fn parse_key_line(line: &str) -> Result<Keyframe> {
    parse_numbered(line, 1)
}

fn parse_numbered(line: &str, number: usize) -> Result<Keyframe> {
    parse_tokens(line).map_err(|reason| CurveError::Parse {
        line: number,
        reason,
    })
}

fn parse_tokens(line: &str) -> core::result::Result<Keyframe, String> {
    let line = line.trim();
    if line.is_empty() {
        return Err("line is empty".into());
    }

    let parts: Vec<&str> = line
        .split(SEPARATORS)
        .filter(|part| !part.is_empty())
        .collect();
    if parts.len() < 3 {
        return Err("expected 'key = time value [in_tangent] [out_tangent]'".into());
    }

    let number = |index: usize, field: &str| -> core::result::Result<f32, String> {
        match parts.get(index) {
            None => Ok(0.0),
            Some(token) => token
                .parse::<f32>()
                .map_err(|_| format!("invalid {field} '{token}'")),
        }
    };

    let time = number(1, "time")?;
    let value = number(2, "value")?;
    let in_tangent = number(3, "in_tangent")?;
    let out_tangent = number(4, "out_tangent")?;

    Keyframe::new(time, value, in_tangent, out_tangent).map_err(|e| e.to_string())
}

/// Parse every non-blank line of `text`. Failures are collected, not fatal.
pub fn parse_lines(text: &str) -> ParsedLines {
    parse_filtered(text, |_| true)
}

/// Curve bodies only count lines that start with `key_name` (any ASCII case);
/// other lines are skipped without being reported.
pub fn parse_named_lines(text: &str, key_name: &str) -> ParsedLines {
    parse_filtered(text, |line| {
        line.get(..key_name.len())
            .is_some_and(|head| head.eq_ignore_ascii_case(key_name))
    })
}

/// Preset bodies only count lines that start with `key`; anything else
/// (comments, headers) is ignored rather than rejected.
pub fn parse_preset_lines(text: &str) -> ParsedLines {
    parse_filtered(text, |line| line.starts_with("key"))
}

fn parse_filtered(text: &str, keep: impl Fn(&str) -> bool) -> ParsedLines {
    let mut out = ParsedLines::default();
    for (i, raw) in text.lines().enumerate() {
        let line = raw.trim();
        if line.is_empty() || !keep(line) {
            continue;
        }
        match parse_numbered(line, i + 1) {
            Ok(key) => out.keys.push(key),
            Err(err) => out.rejected.push(err),
        }
    }
    out
}

/// Format one keyframe as `<key_name> = t v in out`.
pub fn format_key_line(key: &Keyframe, key_name: &str, style: NumberStyle) -> String {
    let (t, v, i, o) = match style {
        NumberStyle::Display => (
            format_number_fixed1(key.time()),
            format_number_fixed1(key.value()),
            format_number_significant(key.in_tangent(), TANGENT_SIGNIFICANT_DIGITS),
            format_number_significant(key.out_tangent(), TANGENT_SIGNIFICANT_DIGITS),
        ),
        NumberStyle::RoundTrip => (
            format_number_round_trip(key.time()),
            format_number_round_trip(key.value()),
            format_number_round_trip(key.in_tangent()),
            format_number_round_trip(key.out_tangent()),
        ),
    };
    format!("{key_name} = {t} {v} {i} {o}")
}

/// One key line per keyframe, joined with `\n`.
pub fn format_lines(keys: &[Keyframe], key_name: &str, style: NumberStyle) -> String {
    keys.iter()
        .map(|key| format_key_line(key, key_name, style))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Shortest decimal that reads back as the same `f32`.
pub fn format_number_round_trip(value: f32) -> String {
    format!("{}", normalize_zero(value))
}

/// One decimal place, ties away from zero, with a trailing `.0` dropped
/// (`2.0 -> "2"`, `2.25 -> "2.3"`, `-0.01 -> "-0"`).
pub fn format_number_fixed1(value: f32) -> String {
    // An f32 times ten is exact in f64, so `round` sees the true ties.
    let rounded = (f64::from(value) * 10.0).round() / 10.0;
    let s = format!("{rounded:.1}");
    match s.strip_suffix(".0") {
        Some(trimmed) => trimmed.to_string(),
        None => s,
    }
}

/// General format with `digits` significant figures, ties away from zero:
/// fixed notation for decimal exponents in `-5..digits`, otherwise
/// `d.dddE+XX`. Trailing zeros are dropped in both.
pub fn format_number_significant(value: f32, digits: usize) -> String {
    let digits = digits.clamp(1, EXACT_DIGITS);
    let value = normalize_zero(value);
    if value == 0.0 {
        return "0".to_string();
    }

    let (sig, exp) = round_significant(value.abs(), digits);
    let sign = if value < 0.0 { "-" } else { "" };

    if exp > -5 && exp < digits as i32 {
        let body = if exp >= 0 {
            let split = exp as usize + 1;
            let (int, frac) = sig.split_at(split.min(sig.len()));
            if frac.is_empty() {
                int.to_string()
            } else {
                format!("{int}.{frac}")
            }
        } else {
            format!("0.{}{}", "0".repeat((-exp - 1) as usize), sig)
        };
        return format!("{sign}{}", trim_fraction(&body));
    }

    let (lead, rest) = sig.split_at(1);
    let mantissa = trim_fraction(&format!("{lead}.{rest}"));
    let exp_sign = if exp < 0 { '-' } else { '+' };
    format!("{sign}{mantissa}E{exp_sign}{:02}", exp.abs())
}

/// Enough fraction digits in scientific notation to spell out any f32 exactly.
const EXACT_DIGITS: usize = 112;

/// First `digits` significant digits of a positive `value` and its decimal
/// exponent, rounded half away from zero on the exact decimal expansion.
fn round_significant(value: f32, digits: usize) -> (String, i32) {
    let exact = format!("{:.*e}", EXACT_DIGITS, value);
    let (mantissa, exp) = exact.split_once('e').unwrap_or((exact.as_str(), "0"));
    let mut exp: i32 = exp.parse().unwrap_or(0);
    let all: Vec<u8> = mantissa
        .bytes()
        .filter(u8::is_ascii_digit)
        .map(|b| b - b'0')
        .collect();

    let mut kept = all[..digits.min(all.len())].to_vec();
    if all.get(digits).is_some_and(|&d| d >= 5) {
        let mut i = kept.len();
        loop {
            if i == 0 {
                // 9.99.. rolled over to 10.0..
                kept.insert(0, 1);
                kept.pop();
                exp += 1;
                break;
            }
            i -= 1;
            if kept[i] == 9 {
                kept[i] = 0;
            } else {
                kept[i] += 1;
                break;
            }
        }
    }
    let sig = kept.iter().map(|&d| char::from(b'0' + d)).collect();
    (sig, exp)
}

fn trim_fraction(s: &str) -> String {
    if s.contains('.') {
        s.trim_end_matches('0').trim_end_matches('.').to_string()
    } else {
        s.to_string()
    }
}

#[inline]
fn normalize_zero(value: f32) -> f32 {
    if value == 0.0 {
        0.0
    } else {
        value
    }
}
