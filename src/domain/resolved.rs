// SPDX-License-Identifier: MIT OR Apache-2.0

//! Resolved, guarded config and secrets objects.
//!
//! These are what the resolvers hand back. Both are immutable; reads of undeclared
//! keys and every write fail with an access error. A config object can be
//! serialized with any serde format, a secrets object never can.

use crate::domain::config_key::{ConfigKey, ENVIRONMENT_KEY};
use crate::domain::config_value::{ConfigValue, ValueKind};
use crate::domain::errors::{ConfigError, Result};
use crate::domain::guard::{AccessGuard, GuardMode};
use secrecy::{ExposeSecret, SecretString};
use serde::ser::{Error as _, SerializeMap};
use serde::{Serialize, Serializer};

/// A fully resolved configuration.
///
/// Every declared key holds a value. The reserved `ENVIRONMENT` key is always
/// present and holds the raw environment selector, which may be absent.
///
/// # Examples
///
/// ```
/// use layercfg::adapters::EnvVarAdapter;
/// use layercfg::domain::{Defaults, Resolver};
/// use layercfg::service::ConfigResolver;
/// use std::collections::HashMap;
///
/// # fn main() -> layercfg::domain::Result<()> {
/// let env = EnvVarAdapter::with_values(HashMap::from([("PORT".to_string(), "8080".to_string())]));
/// let config = ConfigResolver::new(Defaults::new().with("PORT", 1234)).resolve(&env)?;
///
/// assert_eq!(config.get_u64("PORT")?, 8080);
/// assert_eq!(config.environment(), None);
/// assert!(config.get("HOST").is_err());
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct ResolvedConfig {
    guard: AccessGuard<Option<ConfigValue>>,
}

impl ResolvedConfig {
    pub(crate) fn new(entries: Vec<(ConfigKey, Option<ConfigValue>)>) -> Self {
        Self {
            guard: AccessGuard::new(GuardMode::Config, entries),
        }
    }

    /// Reads a declared key. Only `ENVIRONMENT` can be `None`.
    pub fn get(&self, key: &str) -> Result<Option<&ConfigValue>> {
        self.guard.get(key).map(Option::as_ref)
    }

    fn typed<'a, T>(
        &'a self,
        key: &str,
        expected: ValueKind,
        view: impl FnOnce(&'a ConfigValue) -> Option<T>,
    ) -> Result<T> {
        let value = self.get(key)?;
        value
            .and_then(view)
            .ok_or_else(|| ConfigError::TypeMismatch {
                key: key.to_string(),
                expected,
                actual: match value {
                    Some(v) if v.kind() == expected => format!("{} out of range", v.kind()),
                    Some(v) => v.kind().to_string(),
                    None => "absent value".to_string(),
                },
            })
    }

    /// Reads a string-valued key.
    pub fn get_str(&self, key: &str) -> Result<&str> {
        self.typed(key, ValueKind::String, ConfigValue::as_str)
    }

    /// Reads a number-valued key.
    pub fn get_f64(&self, key: &str) -> Result<f64> {
        self.typed(key, ValueKind::Number, ConfigValue::as_f64)
    }

    /// Reads a number-valued key that must be a whole number.
    pub fn get_i64(&self, key: &str) -> Result<i64> {
        self.typed(key, ValueKind::Number, ConfigValue::as_i64)
    }

    /// Reads a number-valued key that must be a non-negative whole number.
    pub fn get_u64(&self, key: &str) -> Result<u64> {
        self.typed(key, ValueKind::Number, ConfigValue::as_u64)
    }

    /// Reads a boolean-valued key.
    pub fn get_bool(&self, key: &str) -> Result<bool> {
        self.typed(key, ValueKind::Boolean, ConfigValue::as_bool)
    }

    /// The raw environment selector this config was resolved under.
    pub fn environment(&self) -> Option<&str> {
        self.get(ENVIRONMENT_KEY)
            .ok()
            .flatten()
            .and_then(ConfigValue::as_str)
    }

    /// Rejects a write. Always returns [`ConfigError::ReadOnlyProperty`].
    pub fn try_set(&self, key: &str, value: impl Into<ConfigValue>) -> Result<()> {
        self.guard.try_set(key, Some(value.into()))
    }

    /// Returns `true` if `key` is declared.
    pub fn contains_key(&self, key: &str) -> bool {
        self.guard.contains_key(key)
    }

    /// Iterates the declared keys, `ENVIRONMENT` last unless it was also a default.
    pub fn keys(&self) -> impl Iterator<Item = &ConfigKey> {
        self.guard.keys()
    }

    /// Iterates keys and values.
    pub fn iter(&self) -> impl Iterator<Item = (&ConfigKey, Option<&ConfigValue>)> {
        self.guard.iter().map(|(k, v)| (k, v.as_ref()))
    }

    /// Number of declared keys, `ENVIRONMENT` included.
    pub fn len(&self) -> usize {
        self.guard.len()
    }

    /// Always `false`: a config carries at least `ENVIRONMENT`.
    pub fn is_empty(&self) -> bool {
        self.guard.is_empty()
    }
}

impl Serialize for ResolvedConfig {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        self.guard.ensure_serializable().map_err(S::Error::custom)?;
        let mut map = serializer.serialize_map(Some(self.guard.len()))?;
        for (key, value) in self.guard.iter() {
            map.serialize_entry(key.as_str(), value)?;
        }
        map.end()
    }
}

/// A fully resolved set of secrets.
///
/// Values are held as [`SecretString`] so they are redacted from `Debug` output.
/// Serializing a secrets object always fails.
///
/// # Examples
///
/// ```
/// use layercfg::adapters::EnvVarAdapter;
/// use layercfg::domain::{Resolver, SecretKeys};
/// use layercfg::service::SecretsResolver;
/// use std::collections::HashMap;
///
/// # fn main() -> layercfg::domain::Result<()> {
/// let env = EnvVarAdapter::with_values(HashMap::from([("MY_SECRET".to_string(), String::new())]));
/// let secrets = SecretsResolver::new(SecretKeys::from(["MY_SECRET"])).resolve(&env)?;
///
/// assert_eq!(secrets.expose("MY_SECRET")?, "");
/// assert!(serde_json::to_string(&secrets).is_err());
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct ResolvedSecrets {
    guard: AccessGuard<SecretString>,
}

impl ResolvedSecrets {
    pub(crate) fn new(entries: Vec<(ConfigKey, String)>) -> Self {
        let entries = entries
            .into_iter()
            .map(|(key, value)| (key, SecretString::new(value.into_boxed_str())))
            .collect();
        Self {
            guard: AccessGuard::new(GuardMode::Secrets, entries),
        }
    }

    /// Reads a declared secret.
    pub fn get(&self, key: &str) -> Result<&SecretString> {
        self.guard.get(key)
    }

    /// Reads a declared secret and exposes its value.
    pub fn expose(&self, key: &str) -> Result<&str> {
        self.get(key).map(|secret| secret.expose_secret())
    }

    /// Rejects a write. Always returns [`ConfigError::ReadOnlyProperty`].
    pub fn try_set(&self, key: &str, value: impl Into<String>) -> Result<()> {
        self.guard
            .try_set(key, SecretString::new(value.into().into_boxed_str()))
    }

    /// Returns `true` if `key` is declared.
    pub fn contains_key(&self, key: &str) -> bool {
        self.guard.contains_key(key)
    }

    /// Iterates the declared keys in order.
    pub fn keys(&self) -> impl Iterator<Item = &ConfigKey> {
        self.guard.keys()
    }

    /// Number of declared secrets.
    pub fn len(&self) -> usize {
        self.guard.len()
    }

    /// Returns `true` if no secrets are declared.
    pub fn is_empty(&self) -> bool {
        self.guard.is_empty()
    }
}

impl Serialize for ResolvedSecrets {
    fn serialize<S: Serializer>(&self, _serializer: S) -> std::result::Result<S::Ok, S::Error> {
        tracing::warn!("Refused to serialize {} secrets", self.guard.len());
        let err = self
            .guard
            .ensure_serializable()
            .err()
            .unwrap_or(ConfigError::SerializeSecrets);
        Err(S::Error::custom(err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> ResolvedConfig {
        ResolvedConfig::new(vec![
            (ConfigKey::from("MY_HOST"), Some(ConfigValue::from("example.com"))),
            (ConfigKey::from("PORT"), Some(ConfigValue::from(8080))),
            (ConfigKey::from("RATIO"), Some(ConfigValue::from(0.5))),
            (ConfigKey::from("DEBUG"), Some(ConfigValue::from(true))),
            (ConfigKey::environment(), Some(ConfigValue::from("test"))),
        ])
    }

    #[test]
    fn test_typed_reads() {
        let config = config();
        assert_eq!(config.get_str("MY_HOST").unwrap(), "example.com");
        assert_eq!(config.get_u64("PORT").unwrap(), 8080);
        assert_eq!(config.get_i64("PORT").unwrap(), 8080);
        assert_eq!(config.get_f64("RATIO").unwrap(), 0.5);
        assert!(config.get_bool("DEBUG").unwrap());
        assert_eq!(config.environment(), Some("test"));
    }

    #[test]
    fn test_typed_read_mismatch() {
        let config = config();
        let err = config.get_bool("PORT").unwrap_err();
        assert!(matches!(err, ConfigError::TypeMismatch { ref actual, .. } if actual == "number"));

        let err = config.get_u64("RATIO").unwrap_err();
        assert!(err.to_string().contains("out of range"));
    }

    #[test]
    fn test_typed_read_undeclared_is_access_error() {
        assert!(config().get_str("OTHER").unwrap_err().is_access_error());
    }

    #[test]
    fn test_absent_environment() {
        let config = ResolvedConfig::new(vec![
            (ConfigKey::from("A"), Some(ConfigValue::from("a"))),
            (ConfigKey::environment(), None),
        ]);
        assert_eq!(config.environment(), None);
        assert_eq!(config.get(ENVIRONMENT_KEY).unwrap(), None);
        assert!(config.contains_key(ENVIRONMENT_KEY));
        let err = config.get_str(ENVIRONMENT_KEY).unwrap_err();
        assert!(err.to_string().contains("absent value"));
    }

    #[test]
    fn test_config_write_rejected() {
        let config = config();
        assert!(config.try_set("PORT", 1).unwrap_err().is_access_error());
        assert!(config.try_set("NEW", "x").unwrap_err().is_access_error());
        assert_eq!(config.get_u64("PORT").unwrap(), 8080);
    }

    #[test]
    fn test_config_serializes_in_order() {
        let json = serde_json::to_string(&config()).unwrap();
        assert_eq!(
            json,
            r#"{"MY_HOST":"example.com","PORT":8080,"RATIO":0.5,"DEBUG":true,"ENVIRONMENT":"test"}"#
        );
    }

    #[test]
    fn test_config_serializes_absent_environment_as_null() {
        let config = ResolvedConfig::new(vec![(ConfigKey::environment(), None)]);
        assert_eq!(
            serde_json::to_string(&config).unwrap(),
            r#"{"ENVIRONMENT":null}"#
        );
    }

    #[test]
    fn test_secrets_read_and_expose() {
        let secrets = ResolvedSecrets::new(vec![
            (ConfigKey::from("MY_SECRET"), String::new()),
            (ConfigKey::from("API_TOKEN"), "s3cr3t".to_string()),
        ]);
        assert_eq!(secrets.expose("MY_SECRET").unwrap(), "");
        assert_eq!(secrets.get("API_TOKEN").unwrap().expose_secret(), "s3cr3t");
        assert!(secrets.expose("OTHER").unwrap_err().is_access_error());
        assert!(secrets.try_set("API_TOKEN", "x").unwrap_err().is_access_error());
        assert_eq!(secrets.len(), 2);
    }

    #[test]
    fn test_secrets_never_serialize() {
        let secrets = ResolvedSecrets::new(vec![(ConfigKey::from("API_TOKEN"), "s3cr3t".to_string())]);
        let err = serde_json::to_string(&secrets).unwrap_err();
        assert_eq!(err.to_string(), "Cannot serialize secrets");

        let empty = ResolvedSecrets::new(Vec::new());
        assert!(serde_json::to_value(&empty).is_err());
    }

    #[test]
    fn test_secrets_debug_is_redacted() {
        let secrets = ResolvedSecrets::new(vec![(ConfigKey::from("API_TOKEN"), "s3cr3t".to_string())]);
        let debug = format!("{:?}", secrets);
        assert!(debug.contains("API_TOKEN"));
        assert!(!debug.contains("s3cr3t"));
    }
}
