// SPDX-License-Identifier: MIT OR Apache-2.0

//! Input layers for resolution: defaults, secret key lists and per-environment
//! overrides.
//!
//! All layer types keep insertion order, since the order of keys decides both the
//! order environment lookups happen in and the order keys are reported in errors.
//! Inserting a key that is already present replaces its value in place.

use crate::domain::config_key::ConfigKey;
use crate::domain::config_value::ConfigValue;

fn upsert<V>(entries: &mut Vec<(ConfigKey, V)>, key: ConfigKey, value: V) {
    match entries.iter_mut().find(|(k, _)| *k == key) {
        Some((_, slot)) => *slot = value,
        None => entries.push((key, value)),
    }
}

/// Compile-time defaults for a config object.
///
/// The keys define the expected key set and each default's kind is the coercion
/// target for its key.
///
/// # Examples
///
/// ```
/// use layercfg::domain::Defaults;
///
/// let defaults = Defaults::new()
///     .with("MY_HOST", "example.com")
///     .with("PORT", 1234)
///     .with("DEBUG", false);
///
/// assert_eq!(defaults.len(), 3);
/// assert!(defaults.contains_key("PORT"));
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Defaults {
    entries: Vec<(ConfigKey, ConfigValue)>,
}

impl Defaults {
    /// Creates an empty set of defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a default and returns `self` for chaining.
    pub fn with(mut self, key: impl Into<ConfigKey>, value: impl Into<ConfigValue>) -> Self {
        self.insert(key, value);
        self
    }

    /// Adds or replaces a default.
    pub fn insert(&mut self, key: impl Into<ConfigKey>, value: impl Into<ConfigValue>) {
        upsert(&mut self.entries, key.into(), value.into());
    }

    /// Returns the default for `key`.
    pub fn get(&self, key: &str) -> Option<&ConfigValue> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    /// Returns `true` if `key` is declared.
    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Iterates the declared keys in order.
    pub fn keys(&self) -> impl Iterator<Item = &ConfigKey> {
        self.entries.iter().map(|(k, _)| k)
    }

    /// Iterates the defaults in order.
    pub fn iter(&self) -> impl Iterator<Item = (&ConfigKey, &ConfigValue)> {
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

impl<K, V> FromIterator<(K, V)> for Defaults
where
    K: Into<ConfigKey>,
    V: Into<ConfigValue>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut defaults = Defaults::new();
        for (key, value) in iter {
            defaults.insert(key, value);
        }
        defaults
    }
}

/// The required keys of a secrets object.
///
/// Secrets carry no defaults and are always strings. Duplicate names are kept once.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SecretKeys {
    keys: Vec<ConfigKey>,
}

impl SecretKeys {
    /// Creates an empty key list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a key and returns `self` for chaining.
    pub fn with(mut self, key: impl Into<ConfigKey>) -> Self {
        self.push(key);
        self
    }

    /// Adds a key if it is not already listed.
    pub fn push(&mut self, key: impl Into<ConfigKey>) {
        let key = key.into();
        if !self.keys.contains(&key) {
            self.keys.push(key);
        }
    }

    /// Returns `true` if `key` is listed.
    pub fn contains(&self, key: &str) -> bool {
        self.keys.iter().any(|k| k == key)
    }

    /// Iterates the keys in order.
    pub fn iter(&self) -> impl Iterator<Item = &ConfigKey> {
        self.keys.iter()
    }

    /// Number of listed keys.
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    /// Returns `true` if no keys are listed.
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}

impl<K: Into<ConfigKey>> FromIterator<K> for SecretKeys {
    fn from_iter<I: IntoIterator<Item = K>>(iter: I) -> Self {
        let mut keys = SecretKeys::new();
        for key in iter {
            keys.push(key);
        }
        keys
    }
}

impl<K: Into<ConfigKey>, const N: usize> From<[K; N]> for SecretKeys {
    fn from(keys: [K; N]) -> Self {
        keys.into_iter().collect()
    }
}

/// A partial set of substitutions applied when its environment is selected.
///
/// A key set to `None` is still expected but has its default removed, so the value
/// must then come from the environment.
///
/// # Examples
///
/// ```
/// use layercfg::domain::{ConfigValue, OverrideLayer};
///
/// let layer: OverrideLayer = OverrideLayer::new()
///     .with("PORT", 80)
///     .without("MY_HOST");
///
/// assert_eq!(layer.get("PORT"), Some(Some(&ConfigValue::from(80))));
/// assert_eq!(layer.get("MY_HOST"), Some(None));
/// assert_eq!(layer.get("OTHER"), None);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct OverrideLayer<V = ConfigValue> {
    entries: Vec<(ConfigKey, Option<V>)>,
}

impl<V> Default for OverrideLayer<V> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
        }
    }
}

impl<V> OverrideLayer<V> {
    /// Creates an empty layer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Overrides `key` with `value`.
    pub fn with(mut self, key: impl Into<ConfigKey>, value: impl Into<V>) -> Self {
        self.set(key, Some(value.into()));
        self
    }

    /// Marks `key` as having no value in this environment.
    pub fn without(mut self, key: impl Into<ConfigKey>) -> Self {
        self.set(key, None);
        self
    }

    /// Adds or replaces an entry.
    pub fn set(&mut self, key: impl Into<ConfigKey>, value: Option<V>) {
        upsert(&mut self.entries, key.into(), value);
    }

    /// Looks up `key`: `None` if the layer does not mention it, `Some(None)` if the
    /// layer explicitly unsets it.
    pub fn get(&self, key: &str) -> Option<Option<&V>> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_ref())
    }

    /// Iterates the keys this layer mentions, in order.
    pub fn keys(&self) -> impl Iterator<Item = &ConfigKey> {
        self.entries.iter().map(|(k, _)| k)
    }

    /// Iterates the entries in order.
    pub fn iter(&self) -> impl Iterator<Item = (&ConfigKey, Option<&V>)> {
        self.entries.iter().map(|(k, v)| (k, v.as_ref()))
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if the layer mentions no keys.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K, V> FromIterator<(K, Option<V>)> for OverrideLayer<V>
where
    K: Into<ConfigKey>,
{
    fn from_iter<I: IntoIterator<Item = (K, Option<V>)>>(iter: I) -> Self {
        let mut layer = OverrideLayer::new();
        for (key, value) in iter {
            layer.set(key, value);
        }
        layer
    }
}

/// Override layers keyed by environment selector value.
///
/// Config objects use `Overrides<ConfigValue>`; secrets use `Overrides<String>`.
///
/// # Examples
///
/// ```
/// use layercfg::domain::{OverrideLayer, Overrides};
///
/// let overrides: Overrides = Overrides::new()
///     .layer("prod", OverrideLayer::new().with("PORT", 80))
///     .layer("test", OverrideLayer::new().with("PORT", 8080));
///
/// assert!(overrides.get("prod").is_some());
/// assert!(overrides.get("staging").is_none());
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct Overrides<V = ConfigValue> {
    layers: Vec<(String, OverrideLayer<V>)>,
}

impl<V> Default for Overrides<V> {
    fn default() -> Self {
        Self { layers: Vec::new() }
    }
}

impl<V> Overrides<V> {
    /// Creates an empty override set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds (or replaces) the layer for `environment` and returns `self`.
    pub fn layer(mut self, environment: impl Into<String>, layer: OverrideLayer<V>) -> Self {
        self.insert(environment, layer);
        self
    }

    /// Adds or replaces the layer for `environment`.
    pub fn insert(&mut self, environment: impl Into<String>, layer: OverrideLayer<V>) {
        let environment = environment.into();
        match self.layers.iter_mut().find(|(name, _)| *name == environment) {
            Some((_, slot)) => *slot = layer,
            None => self.layers.push((environment, layer)),
        }
    }

    /// Returns the layer whose name exactly matches `environment`.
    pub fn get(&self, environment: &str) -> Option<&OverrideLayer<V>> {
        self.layers
            .iter()
            .find(|(name, _)| name == environment)
            .map(|(_, layer)| layer)
    }

    /// Iterates every layer in order, selected or not.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &OverrideLayer<V>)> {
        self.layers.iter().map(|(name, layer)| (name.as_str(), layer))
    }

    /// Number of layers.
    pub fn len(&self) -> usize {
        self.layers.len()
    }

    /// Returns `true` if there are no layers.
    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }
}

impl<S: Into<String>, V> FromIterator<(S, OverrideLayer<V>)> for Overrides<V> {
    fn from_iter<I: IntoIterator<Item = (S, OverrideLayer<V>)>>(iter: I) -> Self {
        let mut overrides = Overrides::new();
        for (environment, layer) in iter {
            overrides.insert(environment, layer);
        }
        overrides
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_keep_insertion_order() {
        let defaults = Defaults::new().with("Z", 1).with("A", "a").with("M", true);
        let keys: Vec<&str> = defaults.keys().map(ConfigKey::as_str).collect();
        assert_eq!(keys, vec!["Z", "A", "M"]);
    }

    #[test]
    fn test_defaults_replace_in_place() {
        let defaults = Defaults::new().with("A", 1).with("B", 2).with("A", 3);
        let keys: Vec<&str> = defaults.keys().map(ConfigKey::as_str).collect();
        assert_eq!(keys, vec!["A", "B"]);
        assert_eq!(defaults.get("A"), Some(&ConfigValue::from(3)));
    }

    #[test]
    fn test_defaults_from_iter() {
        let defaults: Defaults = vec![("HOST", "localhost"), ("NAME", "svc")]
            .into_iter()
            .collect();
        assert_eq!(defaults.len(), 2);
        assert_eq!(defaults.get("NAME"), Some(&ConfigValue::from("svc")));
        assert!(!defaults.contains_key("name"));
    }

    #[test]
    fn test_secret_keys_dedupe() {
        let keys = SecretKeys::from(["A", "B", "A"]);
        assert_eq!(keys.len(), 2);
        assert!(keys.contains("B"));
        assert!(!keys.contains("b"));
    }

    #[test]
    fn test_override_layer_absent_marker() {
        let layer: OverrideLayer = OverrideLayer::new().with("A", 1).without("B");
        assert_eq!(layer.get("A"), Some(Some(&ConfigValue::from(1))));
        assert_eq!(layer.get("B"), Some(None));
        assert_eq!(layer.get("C"), None);
        assert_eq!(layer.len(), 2);
    }

    #[test]
    fn test_override_layer_for_secrets() {
        let layer: OverrideLayer<String> = OverrideLayer::new().with("TOKEN", "dev-token");
        assert_eq!(layer.get("TOKEN"), Some(Some(&"dev-token".to_string())));
    }

    #[test]
    fn test_overrides_exact_match() {
        let overrides: Overrides = Overrides::new()
            .layer("prod", OverrideLayer::new().with("PORT", 80))
            .layer("Prod", OverrideLayer::new().with("PORT", 81));

        assert_eq!(overrides.len(), 2);
        assert_eq!(
            overrides.get("prod").and_then(|l| l.get("PORT")),
            Some(Some(&ConfigValue::from(80)))
        );
        assert!(overrides.get("PROD").is_none());
    }

    #[test]
    fn test_overrides_replace_layer() {
        let overrides: Overrides = Overrides::new()
            .layer("test", OverrideLayer::new().with("A", 1))
            .layer("test", OverrideLayer::new().with("B", 2));

        assert_eq!(overrides.len(), 1);
        let layer = overrides.get("test").unwrap();
        assert_eq!(layer.get("A"), None);
    }
}
