// SPDX-License-Identifier: MIT OR Apache-2.0

//! Scalar configuration values.
//!
//! Every configured value is a string, a number or a boolean. The kind of a key's
//! default decides how a raw environment string for that key is coerced.

use serde::{Deserialize, Serialize, Serializer};
use std::fmt;

/// The scalar type of a configuration value, used as the coercion target.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ValueKind {
    /// Raw strings pass through unchanged.
    String,
    /// Raw strings are parsed as numeric literals.
    Number,
    /// Raw strings must be `true`/`false` (any case) or `1`/`0`.
    Boolean,
}

impl ValueKind {
    /// Lowercase name used in error messages.
    pub fn as_str(&self) -> &'static str {
        match self {
            ValueKind::String => "string",
            ValueKind::Number => "number",
            ValueKind::Boolean => "boolean",
        }
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A scalar configuration value.
///
/// Serializes as the bare primitive, so a resolved config renders as a flat object of
/// strings, numbers and booleans. Whole numbers are written as integers.
///
/// # Examples
///
/// ```
/// use layercfg::domain::config_value::{ConfigValue, ValueKind};
///
/// let port = ConfigValue::from(1234);
/// assert_eq!(port.kind(), ValueKind::Number);
/// assert_eq!(port.as_f64(), Some(1234.0));
/// assert_eq!(port.as_str(), None);
/// ```
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum ConfigValue {
    /// A string value.
    String(String),
    /// A numeric value. Integers and floats share one representation.
    Number(f64),
    /// A boolean value.
    Boolean(bool),
}

impl ConfigValue {
    /// Returns the kind of this value.
    pub fn kind(&self) -> ValueKind {
        match self {
            ConfigValue::String(_) => ValueKind::String,
            ConfigValue::Number(_) => ValueKind::Number,
            ConfigValue::Boolean(_) => ValueKind::Boolean,
        }
    }

    /// Returns the string if this is a string value.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            ConfigValue::String(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the number if this is a numeric value.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            ConfigValue::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Returns the number as an `i64` if it is finite, integral and in range.
    ///
    /// ```
    /// use layercfg::domain::config_value::ConfigValue;
    ///
    /// assert_eq!(ConfigValue::from(8080).as_i64(), Some(8080));
    /// assert_eq!(ConfigValue::from(1.5).as_i64(), None);
    /// assert_eq!(ConfigValue::from(f64::INFINITY).as_i64(), None);
    /// ```
    pub fn as_i64(&self) -> Option<i64> {
        let n = self.as_f64()?;
        if n.is_finite() && n.fract() == 0.0 && n >= i64::MIN as f64 && n < i64::MAX as f64 {
            Some(n as i64)
        } else {
            None
        }
    }

    /// Returns the number as a `u64` if it is finite, integral and non-negative.
    pub fn as_u64(&self) -> Option<u64> {
        let n = self.as_f64()?;
        if n.is_finite() && n.fract() == 0.0 && n >= 0.0 && n < u64::MAX as f64 {
            Some(n as u64)
        } else {
            None
        }
    }

    /// Returns the boolean if this is a boolean value.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            ConfigValue::Boolean(b) => Some(*b),
            _ => None,
        }
    }
}

impl Serialize for ConfigValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            ConfigValue::String(s) => serializer.serialize_str(s),
            ConfigValue::Number(n) => match (self.as_i64(), self.as_u64()) {
                (Some(i), _) => serializer.serialize_i64(i),
                (None, Some(u)) => serializer.serialize_u64(u),
                (None, None) => serializer.serialize_f64(*n),
            },
            ConfigValue::Boolean(b) => serializer.serialize_bool(*b),
        }
    }
}

impl From<String> for ConfigValue {
    fn from(s: String) -> Self {
        ConfigValue::String(s)
    }
}

impl From<&str> for ConfigValue {
    fn from(s: &str) -> Self {
        ConfigValue::String(s.to_string())
    }
}

impl From<bool> for ConfigValue {
    fn from(b: bool) -> Self {
        ConfigValue::Boolean(b)
    }
}

impl From<f64> for ConfigValue {
    fn from(n: f64) -> Self {
        ConfigValue::Number(n)
    }
}

macro_rules! number_from {
    ($($t:ty),*) => {
        $(
            impl From<$t> for ConfigValue {
                fn from(n: $t) -> Self {
                    ConfigValue::Number(n as f64)
                }
            }
        )*
    };
}

number_from!(f32, i8, i16, i32, i64, u8, u16, u32, u64, usize);

impl fmt::Display for ConfigValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigValue::String(s) => f.write_str(s),
            ConfigValue::Number(n) if n.is_infinite() => {
                f.write_str(if *n > 0.0 { "Infinity" } else { "-Infinity" })
            }
            ConfigValue::Number(n) => write!(f, "{}", n),
            ConfigValue::Boolean(b) => write!(f, "{}", b),
        }
    }
}
