// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration key newtype.
//!
//! Keys are matched exactly: they are case-sensitive and may contain any character,
//! so `"PORT"`, `"port"` and `"with spaces"` are three distinct keys. The same name is
//! used for the declared setting and for the environment variable that overrides it.

use std::borrow::Borrow;
use std::fmt;

/// Name of the environment variable that selects the active override layer.
///
/// The resolved config always carries a key with this name holding the raw selector.
pub const ENVIRONMENT_KEY: &str = "ENVIRONMENT";

/// A type-safe wrapper for configuration keys.
///
/// # Examples
///
/// ```
/// use layercfg::domain::config_key::ConfigKey;
///
/// let key = ConfigKey::from("MY_HOST");
/// assert_eq!(key.as_str(), "MY_HOST");
/// assert_ne!(key, ConfigKey::from("my_host"));
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ConfigKey(String);

impl ConfigKey {
    /// Creates a new `ConfigKey` from a `String`.
    pub fn new(key: String) -> Self {
        ConfigKey(key)
    }

    /// The reserved environment selector key.
    ///
    /// ```
    /// use layercfg::domain::config_key::ConfigKey;
    ///
    /// assert!(ConfigKey::environment().is_environment());
    /// ```
    pub fn environment() -> Self {
        ConfigKey(ENVIRONMENT_KEY.to_string())
    }

    /// Returns `true` if this is the reserved environment selector key.
    pub fn is_environment(&self) -> bool {
        self.0 == ENVIRONMENT_KEY
    }

    /// Returns the key as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Converts the `ConfigKey` into its inner `String`.
    pub fn into_string(self) -> String {
        self.0
    }
}

impl From<String> for ConfigKey {
    fn from(s: String) -> Self {
        ConfigKey(s)
    }
}

impl From<&str> for ConfigKey {
    fn from(s: &str) -> Self {
        ConfigKey(s.to_string())
    }
}

impl From<&ConfigKey> for ConfigKey {
    fn from(key: &ConfigKey) -> Self {
        key.clone()
    }
}

impl From<ConfigKey> for String {
    fn from(key: ConfigKey) -> Self {
        key.0
    }
}

impl AsRef<str> for ConfigKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for ConfigKey {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl PartialEq<str> for ConfigKey {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for ConfigKey {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

impl fmt::Display for ConfigKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
