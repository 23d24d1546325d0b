// SPDX-License-Identifier: MIT OR Apache-2.0

//! Environment variable source adapter.
//!
//! This module provides an adapter that reads raw values from the process
//! environment, or from a fixed snapshot of one.

use crate::domain::{ConfigError, ConfigKey, Result};
use crate::ports::EnvironmentSource;
use std::collections::HashMap;
use std::env::{self, VarError};

/// Maximum length for environment variable values (prevents DoS)
const MAX_ENV_VALUE_LEN: usize = 1048576; // 1MB

/// Environment source adapter for environment variables.
///
/// Keys are looked up verbatim: no case folding and no character replacement, so
/// the key `MY_HOST` reads the variable `MY_HOST`. An optional prefix is prepended
/// to every name before the lookup.
///
/// # Examples
///
/// ```rust
/// use layercfg::adapters::EnvVarAdapter;
/// use layercfg::ports::EnvironmentSource;
/// use std::collections::HashMap;
///
/// // Read the live process environment
/// let adapter = EnvVarAdapter::new();
///
/// // Read `MYAPP_PORT` for the key `PORT`
/// let adapter = EnvVarAdapter::with_prefix("MYAPP_");
///
/// // Read from a fixed snapshot
/// let adapter = EnvVarAdapter::with_values(HashMap::from([
///     ("PORT".to_string(), "8080".to_string()),
/// ]));
/// assert_eq!(adapter.get_str("PORT").unwrap().as_deref(), Some("8080"));
/// ```
#[derive(Debug, Default)]
pub struct EnvVarAdapter {
    /// Optional prefix prepended to every variable name
    prefix: Option<String>,
    /// Fixed values used instead of the process environment
    snapshot: Option<HashMap<String, String>>,
}

impl EnvVarAdapter {
    /// Creates an adapter over the live process environment.
    pub fn new() -> Self {
        Self {
            prefix: None,
            snapshot: None,
        }
    }

    /// Creates an adapter over the process environment that reads `prefix + key`.
    ///
    /// The prefix also applies to the `ENVIRONMENT` selector.
    pub fn with_prefix(prefix: impl Into<String>) -> Self {
        Self {
            prefix: Some(prefix.into()),
            snapshot: None,
        }
    }

    /// Creates an adapter over a fixed set of values.
    ///
    /// Nothing is read from the process environment, which makes resolution
    /// deterministic in tests and lets embedders resolve against a captured
    /// environment.
    pub fn with_values(values: HashMap<String, String>) -> Self {
        Self {
            prefix: None,
            snapshot: Some(values),
        }
    }

    /// Captures the current process environment into a fixed snapshot.
    ///
    /// Variables whose name or value is not valid unicode are left out.
    pub fn snapshot() -> Self {
        let values = env::vars_os()
            .filter_map(|(k, v)| Some((k.into_string().ok()?, v.into_string().ok()?)))
            .collect();
        Self::with_values(values)
    }

    /// Sets the prefix prepended to every variable name.
    pub fn prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = Some(prefix.into());
        self
    }

    fn variable_name(&self, key: &ConfigKey) -> String {
        match &self.prefix {
            Some(prefix) => format!("{}{}", prefix, key),
            None => key.as_str().to_string(),
        }
    }

    fn read_process(&self, name: &str) -> Result<Option<String>> {
        // No variable can be set under these names.
        if name.is_empty() || name.contains('=') || name.contains('\0') {
            return Ok(None);
        }
        match env::var(name) {
            Ok(value) if value.len() > MAX_ENV_VALUE_LEN => Err(self.error(format!(
                "value of '{}' is {} bytes (max {})",
                name,
                value.len(),
                MAX_ENV_VALUE_LEN
            ))),
            Ok(value) => Ok(Some(value)),
            Err(VarError::NotPresent) => Ok(None),
            Err(VarError::NotUnicode(_)) => {
                Err(self.error(format!("value of '{}' is not valid unicode", name)))
            }
        }
    }

    fn error(&self, message: String) -> ConfigError {
        ConfigError::SourceError {
            source_name: self.name().to_string(),
            message,
        }
    }
}

impl EnvironmentSource for EnvVarAdapter {
    fn name(&self) -> &str {
        "env"
    }

    fn get(&self, key: &ConfigKey) -> Result<Option<String>> {
        let name = self.variable_name(key);
        let value = match &self.snapshot {
            Some(values) => Ok(values.get(&name).cloned()),
            None => self.read_process(&name),
        };
        tracing::trace!(
            "Looked up '{}' in env: {}",
            name,
            match &value {
                Ok(Some(_)) => "present",
                Ok(None) => "absent",
                Err(_) => "error",
            }
        );
        value
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    // Helper to set and clean up environment variables
    struct EnvGuard {
        keys: Vec<String>,
    }

    impl EnvGuard {
        fn new() -> Self {
            EnvGuard { keys: Vec::new() }
        }

        fn set(&mut self, key: &str, value: &str) {
            env::set_var(key, value);
            self.keys.push(key.to_string());
        }
    }

    impl Drop for EnvGuard {
        fn drop(&mut self) {
            for key in &self.keys {
                env::remove_var(key);
            }
        }
    }

    #[test]
    fn test_env_adapter_name() {
        assert_eq!(EnvVarAdapter::new().name(), "env");
    }

    #[test]
    #[serial]
    fn test_env_adapter_reads_verbatim_names() {
        let mut guard = EnvGuard::new();
        guard.set("LAYERCFG_TEST_Mixed_Case", "value");

        let adapter = EnvVarAdapter::new();
        assert_eq!(
            adapter.get_str("LAYERCFG_TEST_Mixed_Case").unwrap().as_deref(),
            Some("value")
        );
        assert_eq!(adapter.get_str("LAYERCFG_TEST_MIXED_CASE").unwrap(), None);
    }

    #[test]
    #[serial]
    fn test_env_adapter_distinguishes_empty_from_absent() {
        let mut guard = EnvGuard::new();
        guard.set("LAYERCFG_TEST_EMPTY", "");

        let adapter = EnvVarAdapter::new();
        assert_eq!(
            adapter.get_str("LAYERCFG_TEST_EMPTY").unwrap(),
            Some(String::new())
        );
        assert_eq!(adapter.get_str("LAYERCFG_TEST_NEVER_SET_12345").unwrap(), None);
    }

    #[test]
    #[serial]
    fn test_env_adapter_with_prefix() {
        let mut guard = EnvGuard::new();
        guard.set("MYAPP_PORT", "8080");
        guard.set("PORT_WITHOUT_PREFIX", "1");

        let adapter = EnvVarAdapter::with_prefix("MYAPP_");
        assert_eq!(adapter.get_str("PORT").unwrap().as_deref(), Some("8080"));
        assert_eq!(adapter.get_str("PORT_WITHOUT_PREFIX").unwrap(), None);
    }

    #[test]
    #[serial]
    fn test_env_adapter_snapshot_is_fixed() {
        let mut guard = EnvGuard::new();
        guard.set("LAYERCFG_TEST_SNAPSHOT", "initial");

        let adapter = EnvVarAdapter::snapshot();
        guard.set("LAYERCFG_TEST_SNAPSHOT", "updated");

        assert_eq!(
            adapter.get_str("LAYERCFG_TEST_SNAPSHOT").unwrap().as_deref(),
            Some("initial")
        );
    }

    #[test]
    fn test_env_adapter_with_values() {
        let mut values = HashMap::new();
        values.insert("with spaces".to_string(), "baz".to_string());
        values.insert("EMPTY".to_string(), String::new());

        let adapter = EnvVarAdapter::with_values(values);
        assert_eq!(adapter.get_str("with spaces").unwrap().as_deref(), Some("baz"));
        assert_eq!(adapter.get_str("EMPTY").unwrap().as_deref(), Some(""));
        assert_eq!(adapter.get_str("PATH").unwrap(), None);
    }

    #[test]
    fn test_env_adapter_with_values_and_prefix() {
        let mut values = HashMap::new();
        values.insert("APP_HOST".to_string(), "localhost".to_string());

        let adapter = EnvVarAdapter::with_values(values).prefix("APP_");
        assert_eq!(adapter.get_str("HOST").unwrap().as_deref(), Some("localhost"));
    }

    #[test]
    fn test_env_adapter_unsettable_names_are_absent() {
        let adapter = EnvVarAdapter::new();
        assert_eq!(adapter.get_str("").unwrap(), None);
        assert_eq!(adapter.get_str("A=B").unwrap(), None);
        assert_eq!(adapter.get_str("NUL\0NAME").unwrap(), None);
    }

    #[test]
    fn test_env_adapter_default() {
        let adapter = EnvVarAdapter::default();
        assert_eq!(adapter.name(), "env");
        assert!(adapter.prefix.is_none());
    }
}
