// SPDX-License-Identifier: MIT OR Apache-2.0

//! Environment source trait definition.
//!
//! This module defines the `EnvironmentSource` trait, the port through which the
//! resolvers read raw strings from the environment key-value store. The process
//! environment is one implementation; tests and embedders can supply their own.

use crate::domain::{ConfigKey, Result};

/// A read-only, case-sensitive, string-keyed lookup.
///
/// A lookup has three outcomes that must stay distinct:
///
/// - `Ok(None)`: the name is not set.
/// - `Ok(Some(""))`: the name is set to the empty string.
/// - `Ok(Some(value))`: the name is set to a non-empty string.
///
/// `Err` is reserved for a source that cannot read a value that does exist.
///
/// # Thread Safety
///
/// Implementations must be `Send + Sync` so a source can be shared by resolvers
/// running on several threads. Sources are only ever read.
///
/// # Examples
///
/// ```rust
/// use layercfg::ports::EnvironmentSource;
/// use layercfg::domain::{ConfigKey, Result};
///
/// struct Fixed;
///
/// impl EnvironmentSource for Fixed {
///     fn name(&self) -> &str {
///         "fixed"
///     }
///
///     fn get(&self, key: &ConfigKey) -> Result<Option<String>> {
///         Ok((key.as_str() == "PORT").then(|| "8080".to_string()))
///     }
/// }
///
/// let source = Fixed;
/// assert_eq!(source.get_str("PORT").unwrap().as_deref(), Some("8080"));
/// assert_eq!(source.get_str("HOST").unwrap(), None);
/// ```
pub trait EnvironmentSource: Send + Sync {
    /// Returns the name of this source, used in logs and error messages.
    fn name(&self) -> &str;

    /// Looks up the raw string stored under `key`.
    fn get(&self, key: &ConfigKey) -> Result<Option<String>>;

    /// Looks up the raw string stored under a key given as a string slice.
    ///
    /// Equivalent to `get(&ConfigKey::from(key))`.
    fn get_str(&self, key: &str) -> Result<Option<String>> {
        self.get(&ConfigKey::from(key))
    }
}

impl<T: EnvironmentSource + ?Sized> EnvironmentSource for Box<T> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn get(&self, key: &ConfigKey) -> Result<Option<String>> {
        (**self).get(key)
    }
}
