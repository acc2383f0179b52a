//! Lookup of profile checks by name.
//!
//! Checks are registered explicitly under a string key together with a
//! factory that builds an instance from a [`CheckContext`]. The process-wide
//! [`default_registry`] holds every built-in check and is built on first use.

use std::collections::BTreeMap;
use std::sync::OnceLock;

use sonde_model::{ProfileError, Result};

use crate::check::{CheckContext, ProfileCheck};
use crate::checks::{InterpolationCheck, interpolation};

/// Builds a check bound to the collaborators of one profile.
pub type CheckFactory = for<'a> fn(&CheckContext<'a>) -> Box<dyn ProfileCheck + 'a>;

#[derive(Debug, Clone, Copy)]
struct CheckEntry {
    description: &'static str,
    factory: CheckFactory,
}

/// Registry of check factories keyed by check name.
#[derive(Debug, Clone, Default)]
pub struct CheckRegistry {
    entries: BTreeMap<String, CheckEntry>,
}

impl CheckRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry holding every built-in check.
    pub fn with_builtin_checks() -> Self {
        let mut registry = Self::new();
        register_builtin_checks(&mut registry);
        registry
    }

    /// Registers a factory under `key`, replacing any previous entry.
    pub fn register(
        &mut self,
        key: impl Into<String>,
        description: &'static str,
        factory: CheckFactory,
    ) {
        self.entries.insert(
            key.into(),
            CheckEntry {
                description,
                factory,
            },
        );
    }

    /// Instantiates the check registered under `key`.
    pub fn create<'a>(
        &self,
        key: &str,
        ctx: &CheckContext<'a>,
    ) -> Result<Box<dyn ProfileCheck + 'a>> {
        let entry = self
            .entries
            .get(key)
            .ok_or_else(|| ProfileError::UnknownCheck {
                key: key.to_string(),
            })?;
        Ok((entry.factory)(ctx))
    }

    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn description(&self, key: &str) -> Option<&'static str> {
        self.entries.get(key).map(|entry| entry.description)
    }

    /// Registered keys in sorted order.
    pub fn keys(&self) -> impl Iterator<Item = &str> + '_ {
        self.entries.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Adds every built-in check to `registry`.
pub fn register_builtin_checks(registry: &mut CheckRegistry) {
    registry.register(
        interpolation::NAME,
        "Standard levels against log-pressure interpolation of neighbouring significant levels",
        InterpolationCheck::boxed,
    );
}

static DEFAULT_REGISTRY: OnceLock<CheckRegistry> = OnceLock::new();

/// Shared registry of the built-in checks, built once on first access.
pub fn default_registry() -> &'static CheckRegistry {
    DEFAULT_REGISTRY.get_or_init(CheckRegistry::with_builtin_checks)
}
