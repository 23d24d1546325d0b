// SPDX-License-Identifier: MIT OR Apache-2.0

//! Ports layer containing trait definitions.
//!
//! The resolvers only ever talk to the environment through the traits defined
//! here. Concrete sources live in the adapters layer.

pub mod source;

// Re-export commonly used types
pub use source::EnvironmentSource;
