// SPDX-License-Identifier: MIT OR Apache-2.0

//! Resolver trait definition.
//!
//! A resolver turns its declared layers into a finished, guarded object by reading
//! an [`EnvironmentSource`]. The config and secrets resolvers both implement it, so
//! code that only needs "resolve against this source" can be generic over either.

use crate::domain::Result;
use crate::ports::EnvironmentSource;

/// Resolves declared layers against an environment source.
///
/// Resolution is all or nothing: either every expected key ends up with a valid
/// value and `Ok` carries the guarded object, or `Err` carries the one combined
/// diagnostic for the attempt.
///
/// # Examples
///
/// ```rust
/// use layercfg::adapters::EnvVarAdapter;
/// use layercfg::domain::{Defaults, Resolver};
/// use layercfg::service::ConfigResolver;
/// use std::collections::HashMap;
///
/// fn resolve_twice<R: Resolver>(resolver: &R, env: &EnvVarAdapter) -> bool {
///     resolver.resolve(env).is_ok() && resolver.resolve(env).is_ok()
/// }
///
/// let resolver = ConfigResolver::new(Defaults::new().with("NAME", "svc"));
/// assert!(resolve_twice(&resolver, &EnvVarAdapter::with_values(HashMap::new())));
/// ```
pub trait Resolver {
    /// The guarded object produced by a successful resolution.
    type Output;

    /// Resolves against `source`.
    fn resolve(&self, source: &dyn EnvironmentSource) -> Result<Self::Output>;
}
