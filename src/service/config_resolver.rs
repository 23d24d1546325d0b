// SPDX-License-Identifier: MIT OR Apache-2.0

//! Resolver for typed configuration objects.

use crate::domain::{
    ConfigKey, ConfigValue, Defaults, GuardMode, OverrideLayer, Overrides, ResolvedConfig,
    Resolver, Result,
};
use crate::ports::EnvironmentSource;
use crate::service::layered::{resolve_layers, ExpectedKey};

/// Builds a [`ResolvedConfig`] from defaults, per-environment overrides and the
/// environment.
///
/// Each default fixes both that its key is expected and what type a raw
/// environment value for it is coerced to. Override layers can replace a default
/// with another value, or unset it so the environment must supply one, but never
/// change the target type.
///
/// # Examples
///
/// ```rust
/// use layercfg::adapters::EnvVarAdapter;
/// use layercfg::domain::{Defaults, OverrideLayer, Resolver};
/// use layercfg::service::ConfigResolver;
/// use std::collections::HashMap;
///
/// # fn main() -> layercfg::domain::Result<()> {
/// let resolver = ConfigResolver::new(
///     Defaults::new()
///         .with("MY_HOST", "example.com")
///         .with("PORT", 1234),
/// )
/// .override_layer("prod", OverrideLayer::new().with("PORT", 80))
/// .override_layer("test", OverrideLayer::new().with("PORT", 8080));
///
/// let env = EnvVarAdapter::with_values(HashMap::from([
///     ("ENVIRONMENT".to_string(), "test".to_string()),
/// ]));
/// let config = resolver.resolve(&env)?;
///
/// assert_eq!(config.get_u64("PORT")?, 8080);
/// assert_eq!(config.get_str("MY_HOST")?, "example.com");
/// assert_eq!(config.environment(), Some("test"));
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Debug, Default)]
pub struct ConfigResolver {
    defaults: Defaults,
    overrides: Overrides,
}

impl ConfigResolver {
    /// Creates a resolver with the given defaults and no overrides.
    pub fn new(defaults: Defaults) -> Self {
        Self {
            defaults,
            overrides: Overrides::new(),
        }
    }

    /// Replaces the override set.
    pub fn with_overrides(mut self, overrides: Overrides) -> Self {
        self.overrides = overrides;
        self
    }

    /// Adds (or replaces) the override layer for one environment.
    pub fn override_layer(mut self, environment: impl Into<String>, layer: OverrideLayer) -> Self {
        self.overrides.insert(environment, layer);
        self
    }

    /// The declared defaults.
    pub fn defaults(&self) -> &Defaults {
        &self.defaults
    }

    /// The override layers, selected or not.
    pub fn overrides(&self) -> &Overrides {
        &self.overrides
    }

    /// Resolves against the live process environment.
    #[cfg(feature = "env")]
    pub fn resolve_from_env(&self) -> Result<ResolvedConfig> {
        self.resolve(&crate::adapters::EnvVarAdapter::new())
    }
}

impl Resolver for ConfigResolver {
    type Output = ResolvedConfig;

    fn resolve(&self, source: &dyn EnvironmentSource) -> Result<ResolvedConfig> {
        let expected = self
            .defaults
            .iter()
            .map(|(key, value)| ExpectedKey {
                key: key.clone(),
                initial: Some(value.clone()),
                target: value.kind(),
            })
            .collect();

        let resolution = resolve_layers(expected, &self.overrides, source, GuardMode::Config)?;

        // The selector is added only after validation, so it is never coerced and
        // never reported as missing.
        let selector = resolution.selector.map(ConfigValue::String);
        let mut entries: Vec<(ConfigKey, Option<ConfigValue>)> = resolution
            .entries
            .into_iter()
            .map(|(key, value)| (key, Some(value)))
            .collect();
        match entries.iter_mut().find(|(key, _)| key.is_environment()) {
            Some((_, slot)) => *slot = selector,
            None => entries.push((ConfigKey::environment(), selector)),
        }

        Ok(ResolvedConfig::new(entries))
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
    fn test_environment_key_appended_last() {
        let config = ConfigResolver::new(Defaults::new().with("A", "a").with("B", 2))
            .resolve(&env(&[]))
            .unwrap();

        let keys: Vec<&str> = config.keys().map(ConfigKey::as_str).collect();
        assert_eq!(keys, vec!["A", "B", ENVIRONMENT_KEY]);
        assert_eq!(config.get(ENVIRONMENT_KEY).unwrap(), None);
    }

    #[test]
    fn test_environment_key_holds_raw_selector() {
        let config = ConfigResolver::new(Defaults::new().with("A", "a"))
            .resolve(&env(&[("ENVIRONMENT", "staging")]))
            .unwrap();

        assert_eq!(config.environment(), Some("staging"));
    }

    #[test]
    fn test_declared_environment_default_is_replaced_in_place() {
        let config = ConfigResolver::new(
            Defaults::new()
                .with(ENVIRONMENT_KEY, 5)
                .with("A", "a"),
        )
        .resolve(&env(&[]))
        .unwrap();

        let keys: Vec<&str> = config.keys().map(ConfigKey::as_str).collect();
        assert_eq!(keys, vec![ENVIRONMENT_KEY, "A"]);
        assert_eq!(config.get(ENVIRONMENT_KEY).unwrap(), None);
    }

    #[test]
    fn test_declared_numeric_environment_key_still_coerced() {
        let err = ConfigResolver::new(Defaults::new().with(ENVIRONMENT_KEY, 5))
            .resolve(&env(&[("ENVIRONMENT", "prod")]))
            .unwrap_err();

        assert!(matches!(err, ConfigError::Coercion { .. }));
    }

    #[test]
    fn test_builder_accessors() {
        let resolver = ConfigResolver::new(Defaults::new().with("PORT", 1))
            .override_layer("prod", OverrideLayer::new().with("PORT", 80));

        assert_eq!(resolver.defaults().len(), 1);
        assert_eq!(resolver.overrides().len(), 1);

        let resolver = resolver.with_overrides(Overrides::new());
        assert!(resolver.overrides().is_empty());
    }

    #[test]
    fn test_default_resolver_is_empty_config() {
        let config = ConfigResolver::default().resolve(&env(&[])).unwrap();
        assert_eq!(config.len(), 1);
        assert!(config.contains_key(ENVIRONMENT_KEY));
    }
}
