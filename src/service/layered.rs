// SPDX-License-Identifier: MIT OR Apache-2.0

//! The layered resolution core shared by the config and secrets resolvers.
//!
//! Order of operations for one resolution:
//!
//! 1. every key of every override layer is checked against the expected key set,
//!    whether or not that layer is selected;
//! 2. the layer named by the `ENVIRONMENT` selector, if any, is laid over the
//!    starting values;
//! 3. each expected key is looked up in the environment source and coerced to its
//!    target kind, the first coercion failure aborting the attempt;
//! 4. unexpected keys are reported before missing keys.

use crate::domain::coercion::coerce;
use crate::domain::{ConfigError, ConfigKey, ConfigValue, GuardMode, Overrides, Result, ValueKind};
use crate::ports::EnvironmentSource;

/// One expected key going into resolution.
#[derive(Clone, Debug)]
pub(crate) struct ExpectedKey {
    pub key: ConfigKey,
    pub initial: Option<ConfigValue>,
    pub target: ValueKind,
}

/// The outcome of a successful resolution, before the guard is attached.
#[derive(Debug)]
pub(crate) struct Resolution {
    /// Every expected key with its final value, in declaration order
    pub entries: Vec<(ConfigKey, ConfigValue)>,
    /// The raw environment selector
    pub selector: Option<String>,
}

pub(crate) fn resolve_layers<V>(
    expected: Vec<ExpectedKey>,
    overrides: &Overrides<V>,
    source: &dyn EnvironmentSource,
    mode: GuardMode,
) -> Result<Resolution>
where
    V: Clone + Into<ConfigValue>,
{
    let unexpected_keys = scan_unexpected(&expected, overrides);
    let mut working = expected;

    let selector = source.get(&ConfigKey::environment())?;
    match selector.as_deref() {
        Some(environment) if !environment.is_empty() => match overrides.get(environment) {
            Some(layer) => {
                tracing::debug!(
                    "Applying '{}' override layer ({} keys) to {}",
                    environment,
                    layer.len(),
                    mode
                );
                for (key, value) in layer.iter() {
                    if let Some(slot) = working.iter_mut().find(|e| e.key == *key) {
                        slot.initial = value.cloned().map(Into::into);
                    }
                }
            }
            None => tracing::debug!("No '{}' override layer for {}", environment, mode),
        },
        _ => tracing::debug!("No environment selected for {}", mode),
    }

    let mut missing_keys = Vec::new();
    for entry in working.iter_mut() {
        if let Some(raw) = source.get(&entry.key)? {
            entry.initial = Some(coerce(entry.key.as_str(), &raw, entry.target)?);
        }
        if entry.initial.is_none() {
            missing_keys.push(entry.key.to_string());
        }
    }

    if !unexpected_keys.is_empty() {
        tracing::debug!("{} unexpected keys in {} overrides", unexpected_keys.len(), mode);
        return Err(ConfigError::UnexpectedKeys {
            keys: unexpected_keys,
            mode,
        });
    }
    if !missing_keys.is_empty() {
        tracing::debug!("{} required {} keys missing", missing_keys.len(), mode);
        return Err(ConfigError::MissingKeys {
            keys: missing_keys,
            mode,
        });
    }

    let entries: Vec<(ConfigKey, ConfigValue)> = working
        .into_iter()
        .filter_map(|e| e.initial.map(|value| (e.key, value)))
        .collect();
    tracing::debug!("Resolved {} {} keys from '{}'", entries.len(), mode, source.name());

    Ok(Resolution { entries, selector })
}

fn scan_unexpected<V>(expected: &[ExpectedKey], overrides: &Overrides<V>) -> Vec<String> {
    let mut unexpected: Vec<String> = Vec::new();
    for (_, layer) in overrides.iter() {
        for key in layer.keys() {
            let declared = expected.iter().any(|e| e.key == *key);
            if !declared && !unexpected.iter().any(|k| k == key.as_str()) {
                unexpected.push(key.to_string());
            }
        }
    }
    unexpected
}
