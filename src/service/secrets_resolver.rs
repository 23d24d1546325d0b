// SPDX-License-Identifier: MIT OR Apache-2.0

//! Resolver for secrets objects.

use crate::domain::{
    ConfigKey, ConfigValue, GuardMode, OverrideLayer, Overrides, ResolvedSecrets, Resolver, Result,
    SecretKeys, ValueKind,
};
use crate::ports::EnvironmentSource;
use crate::service::layered::{resolve_layers, ExpectedKey};
use std::fmt;

/// Builds a [`ResolvedSecrets`] from a list of required keys, optional
/// per-environment string defaults and the environment.
///
/// Secrets have no compile-time defaults. Every key must end up with a string,
/// which may be empty, from either the selected override layer or the environment.
///
/// # Examples
///
/// ```rust
/// use layercfg::adapters::EnvVarAdapter;
/// use layercfg::domain::{OverrideLayer, Resolver, SecretKeys};
/// use layercfg::service::SecretsResolver;
/// use std::collections::HashMap;
///
/// # fn main() -> layercfg::domain::Result<()> {
/// let resolver = SecretsResolver::new(SecretKeys::from(["API_TOKEN", "DB_PASSWORD"]))
///     .override_layer("dev", OverrideLayer::new().with("DB_PASSWORD", "dev-password"));
///
/// let env = EnvVarAdapter::with_values(HashMap::from([
///     ("ENVIRONMENT".to_string(), "dev".to_string()),
///     ("API_TOKEN".to_string(), "t0ken".to_string()),
/// ]));
/// let secrets = resolver.resolve(&env)?;
///
/// assert_eq!(secrets.expose("DB_PASSWORD")?, "dev-password");
/// assert_eq!(secrets.expose("API_TOKEN")?, "t0ken");
/// # Ok(())
/// # }
/// ```
///
/// `Debug` output lists layer and key names only, never the layer values.
#[derive(Clone, Default)]
pub struct SecretsResolver {
    keys: SecretKeys,
    overrides: Overrides<String>,
}

impl SecretsResolver {
    /// Creates a resolver for the given keys and no overrides.
    pub fn new(keys: SecretKeys) -> Self {
        Self {
            keys,
            overrides: Overrides::new(),
        }
    }

    /// Replaces the override set.
    pub fn with_overrides(mut self, overrides: Overrides<String>) -> Self {
        self.overrides = overrides;
        self
    }

    /// Adds (or replaces) the override layer for one environment.
    pub fn override_layer(
        mut self,
        environment: impl Into<String>,
        layer: OverrideLayer<String>,
    ) -> Self {
        self.overrides.insert(environment, layer);
        self
    }

    /// The required keys.
    pub fn keys(&self) -> &SecretKeys {
        &self.keys
    }

    /// The override layers, selected or not.
    pub fn overrides(&self) -> &Overrides<String> {
        &self.overrides
    }

    /// Resolves against the live process environment.
    #[cfg(feature = "env")]
    pub fn resolve_from_env(&self) -> Result<ResolvedSecrets> {
        self.resolve(&crate::adapters::EnvVarAdapter::new())
    }
}

impl fmt::Debug for SecretsResolver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SecretsResolver")
            .field("keys", &self.keys)
            .field("overrides", &LayerKeys(&self.overrides))
            .finish()
    }
}

struct LayerKeys<'a>(&'a Overrides<String>);

impl fmt::Debug for LayerKeys<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map()
            .entries(self.0.iter().map(|(environment, layer)| {
                (
                    environment,
                    layer.keys().map(ConfigKey::as_str).collect::<Vec<_>>(),
                )
            }))
            .finish()
    }
}

impl Resolver for SecretsResolver {
    type Output = ResolvedSecrets;

    fn resolve(&self, source: &dyn EnvironmentSource) -> Result<ResolvedSecrets> {
        let expected = self
            .keys
            .iter()
            .map(|key| ExpectedKey {
                key: key.clone(),
                initial: None,
                target: ValueKind::String,
            })
            .collect();

        let resolution = resolve_layers(expected, &self.overrides, source, GuardMode::Secrets)?;

        let entries = resolution
            .entries
            .into_iter()
            .map(|(key, value)| match value {
                ConfigValue::String(s) => (key, s),
                other => (key, other.to_string()),
            })
            .collect();

        Ok(ResolvedSecrets::new(entries))
    }
}

#[cfg(all(test, feature = "env"))]
mod tests {
    use super::*;
    use crate::adapters::EnvVarAdapter;
    use crate::domain::{ConfigError, ENVIRONMENT_KEY};
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> EnvVarAdapter {
        EnvVarAdapter::with_values(
            pairs
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect::<HashMap<_, _>>(),
        )
    }

    #[test]
    fn test_no_environment_key() {
        let secrets = SecretsResolver::new(SecretKeys::from(["TOKEN"]))
            .resolve(&env(&[("TOKEN", "x"), ("ENVIRONMENT", "prod")]))
            .unwrap();

        assert!(!secrets.contains_key(ENVIRONMENT_KEY));
        assert!(secrets.expose(ENVIRONMENT_KEY).unwrap_err().is_access_error());
        assert_eq!(secrets.len(), 1);
    }

    #[test]
    fn test_values_are_never_coerced() {
        let secrets = SecretsResolver::new(SecretKeys::from(["PIN", "FLAG"]))
            .resolve(&env(&[("PIN", "0x10"), ("FLAG", "true")]))
            .unwrap();

        assert_eq!(secrets.expose("PIN").unwrap(), "0x10");
        assert_eq!(secrets.expose("FLAG").unwrap(), "true");
    }

    #[test]
    fn test_missing_secret_message() {
        let err = SecretsResolver::new(SecretKeys::from(["A", "B"]))
            .resolve(&env(&[("B", "b")]))
            .unwrap_err();

        assert_eq!(err.to_string(), "Required secret keys not present in env: \"A\"");
    }

    #[test]
    fn test_unexpected_secret_message() {
        let err = SecretsResolver::new(SecretKeys::from(["A"]))
            .override_layer("dev", OverrideLayer::new().with("A", "a").with("B", "b"))
            .resolve(&env(&[]))
            .unwrap_err();

        assert!(matches!(
            err,
            ConfigError::UnexpectedKeys { mode: GuardMode::Secrets, .. }
        ));
        assert_eq!(err.to_string(), "Unexpected secret keys in overrides: \"B\"");
    }

    #[test]
    fn test_layer_can_unset_nothing_to_unset() {
        let err = SecretsResolver::new(SecretKeys::from(["A"]))
            .override_layer("dev", OverrideLayer::new().without("A"))
            .resolve(&env(&[("ENVIRONMENT", "dev")]))
            .unwrap_err();

        assert!(matches!(err, ConfigError::MissingKeys { .. }));
    }

    #[test]
    fn test_debug_hides_layer_values() {
        let resolver = SecretsResolver::new(SecretKeys::from(["DB_PASSWORD"]))
            .override_layer("dev", OverrideLayer::new().with("DB_PASSWORD", "hunter2"))
            .override_layer("ci", OverrideLayer::new().without("DB_PASSWORD"));

        let debug = format!("{:?}", resolver);
        assert!(!debug.contains("hunter2"));
        assert!(debug.contains("dev"));
        assert!(debug.contains("ci"));
        assert!(debug.contains("DB_PASSWORD"));

        let pretty = format!("{:#?}", resolver);
        assert!(!pretty.contains("hunter2"));
    }

    #[test]
    fn test_keys_accessor() {
        let resolver = SecretsResolver::new(SecretKeys::from(["A", "B"]));
        assert_eq!(resolver.keys().len(), 2);
        let resolver = resolver.with_overrides(Overrides::new());
        assert!(resolver.overrides().is_empty());
        assert!(resolver.resolve(&env(&[("A", "1"), ("B", "2")])).is_ok());
    }
}
