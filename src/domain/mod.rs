// SPDX-License-Identifier: MIT OR Apache-2.0

//! Domain layer containing core business logic and types.
//!
//! This module holds the values being configured, the layers they come from, the
//! coercion rules, the access guard and the resolved objects. It is independent of
//! where raw environment strings come from.

pub mod coercion;
pub mod config_key;
pub mod config_value;
pub mod errors;
pub mod guard;
pub mod layers;
pub mod resolved;
pub mod service;

// Re-export commonly used types
pub use config_key::{ConfigKey, ENVIRONMENT_KEY};
pub use config_value::{ConfigValue, ValueKind};
pub use errors::{ConfigError, Result};
pub use guard::{AccessGuard, GuardMode};
pub use layers::{Defaults, OverrideLayer, Overrides, SecretKeys};
pub use resolved::{ResolvedConfig, ResolvedSecrets};
pub use service::Resolver;
