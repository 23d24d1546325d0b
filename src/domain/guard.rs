// SPDX-License-Identifier: MIT OR Apache-2.0

//! Read-only access boundary around a resolved value map.
//!
//! The guard only exposes reads. Reading a key that was not resolved is an error
//! rather than a silent `None`, and the single write entry point, [`AccessGuard::try_set`],
//! always fails. Whether the guarded map may be serialized depends on its
//! [`GuardMode`].

use crate::domain::config_key::ConfigKey;
use crate::domain::errors::{ConfigError, Result};
use std::fmt;

/// The kind of object a guard protects.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum GuardMode {
    /// A config object. Serialization is permitted.
    Config,
    /// A secrets object. Serialization is refused.
    Secrets,
}

impl GuardMode {
    /// Returns `true` if objects in this mode may be serialized.
    pub fn allows_serialization(&self) -> bool {
        matches!(self, GuardMode::Config)
    }

    pub(crate) fn key_prefix(&self) -> &'static str {
        match self {
            GuardMode::Config => "",
            GuardMode::Secrets => "secret ",
        }
    }
}

impl fmt::Display for GuardMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GuardMode::Config => f.write_str("config"),
            GuardMode::Secrets => f.write_str("secrets"),
        }
    }
}

/// An immutable, ordered map that rejects reads outside its key set and all writes.
///
/// # Examples
///
/// ```
/// use layercfg::domain::{AccessGuard, ConfigKey, GuardMode};
///
/// let guard = AccessGuard::new(GuardMode::Config, vec![(ConfigKey::from("PORT"), 80)]);
///
/// assert_eq!(*guard.get("PORT").unwrap(), 80);
/// assert!(guard.get("port").unwrap_err().is_access_error());
/// assert!(guard.try_set("PORT", 81).unwrap_err().is_access_error());
/// ```
#[derive(Clone, PartialEq)]
pub struct AccessGuard<V> {
    mode: GuardMode,
    entries: Vec<(ConfigKey, V)>,
}

impl<V> AccessGuard<V> {
    /// Wraps resolved entries. Later duplicates of a key are ignored.
    pub fn new(mode: GuardMode, entries: Vec<(ConfigKey, V)>) -> Self {
        let mut deduped: Vec<(ConfigKey, V)> = Vec::with_capacity(entries.len());
        for (key, value) in entries {
            if !deduped.iter().any(|(k, _)| *k == key) {
                deduped.push((key, value));
            }
        }
        Self {
            mode,
            entries: deduped,
        }
    }

    /// The kind of object this guard protects.
    pub fn mode(&self) -> GuardMode {
        self.mode
    }

    /// Reads a declared key.
    pub fn get(&self, key: &str) -> Result<&V> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v)
            .ok_or_else(|| ConfigError::UnspecifiedProperty {
                key: key.to_string(),
                mode: self.mode,
            })
    }

    /// Rejects a write. Resolved objects never change after construction.
    pub fn try_set(&self, key: &str, _value: V) -> Result<()> {
        tracing::debug!("Rejected write to key '{}' on {}", key, self.mode);
        Err(ConfigError::ReadOnlyProperty {
            key: key.to_string(),
            mode: self.mode,
        })
    }

    /// Fails with [`ConfigError::SerializeSecrets`] unless the mode permits
    /// serialization.
    pub fn ensure_serializable(&self) -> Result<()> {
        if self.mode.allows_serialization() {
            Ok(())
        } else {
            Err(ConfigError::SerializeSecrets)
        }
    }

    /// Returns `true` if `key` is declared.
    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.iter().any(|(k, _)| k == key)
    }

    /// Iterates the declared keys in resolution order.
    pub fn keys(&self) -> impl Iterator<Item = &ConfigKey> {
        self.entries.iter().map(|(k, _)| k)
    }

    /// Iterates the entries in resolution order.
    pub fn iter(&self) -> impl Iterator<Item = (&ConfigKey, &V)> {
        self.entries.iter().map(|(k, v)| (k, v))
    }

    /// Number of declared keys.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if no keys are declared.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<V: fmt::Debug> fmt::Debug for AccessGuard<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AccessGuard")
            .field("mode", &self.mode)
            .field("entries", &DebugEntries(&self.entries))
            .finish()
    }
}

struct DebugEntries<'a, V>(&'a [(ConfigKey, V)]);

impl<V: fmt::Debug> fmt::Debug for DebugEntries<'_, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map()
            .entries(self.0.iter().map(|(k, v)| (k.as_str(), v)))
            .finish()
    }
}
