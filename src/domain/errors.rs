// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for the configuration crate.
//!
//! This module defines every error that resolution or a resolved object can raise.
//! All errors use `thiserror` for proper error handling and conversion.

use crate::domain::config_value::ValueKind;
use crate::domain::guard::GuardMode;
use thiserror::Error;

/// The main error type for configuration operations.
///
/// Resolution errors (`Coercion`, `UnexpectedKeys`, `MissingKeys`) are raised by the
/// resolvers and mean no object was produced. Access errors (`UnspecifiedProperty`,
/// `ReadOnlyProperty`, `SerializeSecrets`) are raised later, at the point of the
/// offending access on a resolved object.
///
/// # Examples
///
/// ```
/// use layercfg::domain::errors::ConfigError;
/// use layercfg::domain::GuardMode;
///
/// let error = ConfigError::UnspecifiedProperty {
///     key: "DATABASE_URL".to_string(),
///     mode: GuardMode::Config,
/// };
/// assert_eq!(
///     error.to_string(),
///     "Cannot read unspecified property on config: \"DATABASE_URL\""
/// );
/// ```
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ConfigError {
    /// A raw environment string could not be converted to the type of its default.
    #[error("Cannot cast to {target} from \"{raw}\" (key \"{key}\")")]
    Coercion {
        /// The key being resolved
        key: String,
        /// The raw string read from the environment
        raw: String,
        /// The type implied by the key's default
        target: ValueKind,
    },

    /// One or more override layers name keys outside the expected key set.
    #[error("Unexpected {}keys in overrides: {}", .mode.key_prefix(), quote_keys(.keys))]
    UnexpectedKeys {
        /// Every offending key, in first-seen order across layers
        keys: Vec<String>,
        /// Whether a config or a secrets object was being resolved
        mode: GuardMode,
    },

    /// One or more expected keys ended resolution without a value.
    #[error("Required {}keys not present in env: {}", .mode.key_prefix(), quote_keys(.keys))]
    MissingKeys {
        /// Every missing key, in resolution order
        keys: Vec<String>,
        /// Whether a config or a secrets object was being resolved
        mode: GuardMode,
    },

    /// A read of a key that the resolved object does not declare.
    #[error("Cannot read unspecified property on {mode}: \"{key}\"")]
    UnspecifiedProperty {
        /// The key that was read
        key: String,
        /// The kind of object that was read
        mode: GuardMode,
    },

    /// A write to a resolved object.
    #[error("Cannot assign to read only property on {mode}: \"{key}\"")]
    ReadOnlyProperty {
        /// The key that was written
        key: String,
        /// The kind of object that was written
        mode: GuardMode,
    },

    /// An attempt to serialize a secrets object.
    #[error("Cannot serialize secrets")]
    SerializeSecrets,

    /// A typed accessor was used on a value of a different kind.
    #[error("Configuration value for key '{key}' is a {actual}, not a {expected}")]
    TypeMismatch {
        /// The key being read
        key: String,
        /// The kind the caller asked for
        expected: ValueKind,
        /// The kind actually stored
        actual: String,
    },

    /// An error occurred in an environment source.
    #[error("Environment source '{source_name}' error: {message}")]
    SourceError {
        /// The name of the source that encountered the error
        source_name: String,
        /// The error message
        message: String,
    },
}

impl ConfigError {
    /// Returns `true` for errors raised while resolving (coercion, unexpected or
    /// missing keys).
    pub fn is_validation_error(&self) -> bool {
        matches!(
            self,
            ConfigError::Coercion { .. }
                | ConfigError::UnexpectedKeys { .. }
                | ConfigError::MissingKeys { .. }
        )
    }

    /// Returns `true` for errors raised by a guarded object on a bad read or a write.
    pub fn is_access_error(&self) -> bool {
        matches!(
            self,
            ConfigError::UnspecifiedProperty { .. } | ConfigError::ReadOnlyProperty { .. }
        )
    }
}

fn quote_keys(keys: &[String]) -> String {
    keys.iter()
        .map(|k| format!("\"{}\"", k))
        .collect::<Vec<_>>()
        .join(",")
}

/// A specialized Result type for configuration operations.
pub type Result<T> = std::result::Result<T, ConfigError>;
