// SPDX-License-Identifier: MIT OR Apache-2.0

//! Service layer containing the resolver implementations.
//!
//! Both resolvers run the same layered resolution core and differ only in what
//! they declare up front and what guarded object they produce.

pub mod config_resolver;
mod layered;
pub mod secrets_resolver;

// Re-export commonly used types
pub use config_resolver::ConfigResolver;
pub use secrets_resolver::SecretsResolver;
