// SPDX-License-Identifier: MIT OR Apache-2.0

//! Adapters layer containing environment source implementations.
//!
//! Each adapter implements the `EnvironmentSource` trait from the ports layer.

#[cfg(feature = "env")]
pub mod env_var;

// Re-export adapters based on feature flags
#[cfg(feature = "env")]
pub use env_var::EnvVarAdapter;
