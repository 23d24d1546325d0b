// SPDX-License-Identifier: MIT OR Apache-2.0

//! A hexagonal architecture crate for layered, validated service configuration.
//!
//! A service declares its settings once, as compile-time defaults (or, for
//! secrets, as a list of required names). This crate turns that declaration into
//! an immutable object by laying an optional per-environment override layer over
//! it and then reading the environment, coercing each raw string to the type of
//! its default. Every problem found along the way is reported in one error.
//!
//! # Architecture
//!
//! The crate follows hexagonal architecture principles:
//!
//! - **Domain Layer**: Core types and rules (`ConfigValue`, layers, coercion, the
//!   access guard, the resolved objects, errors)
//! - **Ports**: The `EnvironmentSource` trait the resolvers read through
//! - **Adapters**: `EnvVarAdapter`, backed by the process environment or a snapshot
//! - **Service**: `ConfigResolver` and `SecretsResolver`
//!
//! # Resolution Order
//!
//! 1. Defaults (config) or nothing (secrets)
//! 2. The override layer named by the `ENVIRONMENT` variable, when set and non-empty
//! 3. The environment itself, which always wins
//!
//! Override layers may only mention declared keys. Every declared key must end up
//! with a value. Unexpected keys are reported before missing ones.
//!
//! # Feature Flags
//!
//! - `env`: Enable the process environment adapter and the `build_*` entry points (default)
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use layercfg::prelude::*;
//!
//! # fn main() -> std::result::Result<(), Box<dyn std::error::Error>> {
//! let config = build_config(
//!     Defaults::new()
//!         .with("MY_HOST", "example.com")
//!         .with("PORT", 1234)
//!         .with("VERBOSE", false),
//!     Overrides::new()
//!         .layer("prod", OverrideLayer::new().with("PORT", 80))
//!         .layer("test", OverrideLayer::new().with("PORT", 8080)),
//! )?;
//!
//! let port = config.get_u64("PORT")?;
//! let host = config.get_str("MY_HOST")?;
//! println!("listening on {host}:{port}");
//!
//! let secrets = build_secrets(SecretKeys::from(["DB_PASSWORD"]), Overrides::new())?;
//! let _password = secrets.expose("DB_PASSWORD")?;
//! # Ok(())
//! # }
//! ```
//!
//! # Injected Sources
//!
//! Resolvers read through [`ports::EnvironmentSource`], so tests can resolve
//! against a fixed snapshot instead of the process environment:
//!
//! ```rust
//! use layercfg::prelude::*;
//! use std::collections::HashMap;
//!
//! # fn main() -> layercfg::domain::Result<()> {
//! let env = EnvVarAdapter::with_values(HashMap::from([
//!     ("PORT".to_string(), "0x1F90".to_string()),
//! ]));
//! let config = ConfigResolver::new(Defaults::new().with("PORT", 1234)).resolve(&env)?;
//! assert_eq!(config.get_u64("PORT")?, 8080);
//! # Ok(())
//! # }
//! ```

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![warn(clippy::all)]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod service;

#[cfg(feature = "env")]
use crate::domain::{Defaults, Overrides, ResolvedConfig, ResolvedSecrets, Resolver, SecretKeys};

/// Resolves a configuration object against the process environment.
///
/// Shorthand for `ConfigResolver::new(defaults).with_overrides(overrides)`
/// resolved against [`adapters::EnvVarAdapter::new`].
///
/// # Errors
///
/// Returns the first coercion failure, or else every unexpected override key,
/// or else every missing key.
#[cfg(feature = "env")]
pub fn build_config(defaults: Defaults, overrides: Overrides) -> domain::Result<ResolvedConfig> {
    service::ConfigResolver::new(defaults)
        .with_overrides(overrides)
        .resolve(&adapters::EnvVarAdapter::new())
}

/// Resolves a secrets object against the process environment.
///
/// # Errors
///
/// Same as [`build_config`], with messages naming secret keys.
#[cfg(feature = "env")]
pub fn build_secrets(
    keys: SecretKeys,
    overrides: Overrides<String>,
) -> domain::Result<ResolvedSecrets> {
    service::SecretsResolver::new(keys)
        .with_overrides(overrides)
        .resolve(&adapters::EnvVarAdapter::new())
}

/// Commonly used types and traits.
///
/// This module re-exports the most commonly used types and traits for convenient access.
pub mod prelude {
    pub use crate::domain::{
        ConfigError, ConfigKey, ConfigValue, Defaults, OverrideLayer, Overrides,
        ResolvedConfig, ResolvedSecrets, Resolver, Result, SecretKeys, ValueKind,
    };
    pub use crate::ports::EnvironmentSource;
    pub use crate::service::{ConfigResolver, SecretsResolver};

    // Re-export adapters based on feature flags
    #[cfg(feature = "env")]
    pub use crate::adapters::EnvVarAdapter;
    #[cfg(feature = "env")]
    pub use crate::{build_config, build_secrets};
}
