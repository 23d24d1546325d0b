// SPDX-License-Identifier: MIT OR Apache-2.0

//! Coercion of raw environment strings into typed configuration values.
//!
//! The target type always comes from a key's original default, never from an
//! override layer. Numbers accept the full numeric-literal grammar: optional sign,
//! fraction and exponent, `0x`/`0o`/`0b` radix prefixes, `Infinity`, and
//! surrounding whitespace. Booleans accept `true`/`false` in any case and the
//! exact strings `1` and `0`.

use crate::domain::config_value::{ConfigValue, ValueKind};
use crate::domain::errors::{ConfigError, Result};

/// Coerces `raw` into a value of `target` kind for `key`.
///
/// # Examples
///
/// ```
/// use layercfg::domain::coercion::coerce;
/// use layercfg::domain::{ConfigValue, ValueKind};
///
/// assert_eq!(coerce("PORT", "0xff", ValueKind::Number).unwrap(), ConfigValue::from(255));
/// assert_eq!(coerce("DEBUG", "True", ValueKind::Boolean).unwrap(), ConfigValue::from(true));
/// assert_eq!(coerce("HOST", "", ValueKind::String).unwrap(), ConfigValue::from(""));
/// assert!(coerce("PORT", "", ValueKind::Number).is_err());
/// ```
pub fn coerce(key: &str, raw: &str, target: ValueKind) -> Result<ConfigValue> {
    let value = match target {
        ValueKind::String => Some(ConfigValue::String(raw.to_string())),
        ValueKind::Number => parse_number(raw).map(ConfigValue::Number),
        ValueKind::Boolean => parse_bool(raw).map(ConfigValue::Boolean),
    };
    value.ok_or_else(|| ConfigError::Coercion {
        key: key.to_string(),
        raw: raw.to_string(),
        target,
    })
}

/// Parses a boolean the way environment flags are usually written.
pub fn parse_bool(raw: &str) -> Option<bool> {
    if raw.eq_ignore_ascii_case("true") || raw == "1" {
        Some(true)
    } else if raw.eq_ignore_ascii_case("false") || raw == "0" {
        Some(false)
    } else {
        None
    }
}

/// Parses a numeric literal. Returns `None` for the empty string and for anything
/// that is not a number.
///
/// A string made only of whitespace parses as `0`.
pub fn parse_number(raw: &str) -> Option<f64> {
    if raw.is_empty() {
        return None;
    }
    let s = raw.trim_matches(is_literal_whitespace);
    if s.is_empty() {
        return Some(0.0);
    }

    match s {
        "Infinity" | "+Infinity" => return Some(f64::INFINITY),
        "-Infinity" => return Some(f64::NEG_INFINITY),
        _ => {}
    }

    if let Some(n) = parse_radix_literal(s) {
        return Some(n);
    }

    if is_decimal_literal(s) {
        s.parse::<f64>().ok()
    } else {
        None
    }
}

// Space separators plus the line terminators, tab, VT, FF and BOM. Unlike
// `char::is_whitespace` this excludes U+0085.
fn is_literal_whitespace(c: char) -> bool {
    matches!(
        c,
        '\t' | '\n'
            | '\u{b}'
            | '\u{c}'
            | '\r'
            | ' '
            | '\u{a0}'
            | '\u{1680}'
            | '\u{2000}'..='\u{200a}'
            | '\u{2028}'
            | '\u{2029}'
            | '\u{202f}'
            | '\u{205f}'
            | '\u{3000}'
            | '\u{feff}'
    )
}

fn parse_radix_literal(s: &str) -> Option<f64> {
    let bytes = s.as_bytes();
    if bytes.len() < 3 || bytes[0] != b'0' {
        return None;
    }
    let radix = match bytes[1] {
        b'x' | b'X' => 16,
        b'o' | b'O' => 8,
        b'b' | b'B' => 2,
        _ => return None,
    };
    // Digits are accumulated as f64 so arbitrarily long literals round like any
    // other large number instead of overflowing.
    s[2..].chars().try_fold(0.0_f64, |acc, c| {
        c.to_digit(radix).map(|d| acc * radix as f64 + d as f64)
    })
}

/// `[+-]? (digits [. digits?] | . digits) ([eE] [+-]? digits)?`
fn is_decimal_literal(s: &str) -> bool {
    let s = s.strip_prefix(['+', '-']).unwrap_or(s);
    let (mantissa, exponent) = match s.find(['e', 'E']) {
        Some(idx) => (&s[..idx], Some(&s[idx + 1..])),
        None => (s, None),
    };

    let (int_part, frac_part) = match mantissa.split_once('.') {
        Some((int_part, frac_part)) => (int_part, frac_part),
        None => (mantissa, ""),
    };
    let all_digits = |part: &str| part.bytes().all(|b| b.is_ascii_digit());
    if !all_digits(int_part) || !all_digits(frac_part) {
        return false;
    }
    if int_part.is_empty() && frac_part.is_empty() {
        return false;
    }

    match exponent {
        None => true,
        Some(exp) => {
            let digits = exp.strip_prefix(['+', '-']).unwrap_or(exp);
            !digits.is_empty() && all_digits(digits)
        }
    }
}
