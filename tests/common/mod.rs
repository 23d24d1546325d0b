// SPDX-License-Identifier: MIT OR Apache-2.0

//! Helpers shared by the integration tests.

use layercfg::adapters::EnvVarAdapter;
use std::collections::HashMap;
use std::env;

/// Builds a fixed environment from name/value pairs.
#[allow(dead_code)]
pub fn snapshot(pairs: &[(&str, &str)]) -> EnvVarAdapter {
    EnvVarAdapter::with_values(
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect::<HashMap<_, _>>(),
    )
}

/// Sets or removes process environment variables and restores them on drop.
///
/// Tests using this must also be `#[serial]`.
#[allow(dead_code)]
pub struct EnvGuard {
    saved: Vec<(String, Option<String>)>,
}

#[allow(dead_code)]
impl EnvGuard {
    pub fn new() -> Self {
        EnvGuard { saved: Vec::new() }
    }

    pub fn set(&mut self, key: &str, value: &str) {
        self.save(key);
        env::set_var(key, value);
    }

    pub fn remove(&mut self, key: &str) {
        self.save(key);
        env::remove_var(key);
    }

    fn save(&mut self, key: &str) {
        if !self.saved.iter().any(|(k, _)| k == key) {
            self.saved.push((key.to_string(), env::var(key).ok()));
        }
    }
}

impl Drop for EnvGuard {
    fn drop(&mut self) {
        for (key, previous) in &self.saved {
            match previous {
                Some(value) => env::set_var(key, value),
                None => env::remove_var(key),
            }
        }
    }
}
