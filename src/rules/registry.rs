//! Rule registry: case-insensitive lookup of rules by name.

use super::{Rule, builtin, is_nested};
use crate::error::{Result, WeaverError};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::debug;

/// Immutable mapping from rule name to implementation.
///
/// Built once from a known list of rules; there is no runtime registration.
#[derive(Clone, Default)]
pub struct RuleRegistry {
    rules: HashMap<String, Arc<dyn Rule>>,
}

impl std::fmt::Debug for RuleRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RuleRegistry")
            .field("rules", &self.names())
            .finish()
    }
}

impl RuleRegistry {
    /// Build a registry from a collection of rules.
    ///
    /// # Returns
    ///
    /// * `Ok(RuleRegistry)` - every rule reachable by its name, ignoring case
    /// * `Err(WeaverError::DuplicateRule)` - two rules share a name ignoring case
    /// * `Err(WeaverError::InvalidRuleName)` - a blank name, or the reserved `Nested`
    pub fn new<I>(rules: I) -> Result<Self>
    where
        I: IntoIterator<Item = Arc<dyn Rule>>,
    {
        let mut map: HashMap<String, Arc<dyn Rule>> = HashMap::new();

        for rule in rules {
            let name = rule.name();
            if name.trim().is_empty() || is_nested(name.trim()) {
                return Err(WeaverError::InvalidRuleName(name.to_string()));
            }

            let key = fold(name);
            if map.contains_key(&key) {
                return Err(WeaverError::DuplicateRule(name.to_string()));
            }

            debug!(rule = name, "registering rule");
            map.insert(key, rule);
        }

        debug!(count = map.len(), "rule registry built");
        Ok(Self { rules: map })
    }

    /// Registry holding the built-in rules.
    pub fn with_builtins() -> Self {
        // Built-in names are distinct and none is reserved.
        let mut rules = HashMap::new();
        for rule in builtin::all() {
            rules.insert(fold(rule.name()), rule);
        }
        Self { rules }
    }

    /// Registry holding the built-in rules plus `extra` host rules.
    ///
    /// A host rule may not reuse a built-in name.
    pub fn with_builtins_and<I>(extra: I) -> Result<Self>
    where
        I: IntoIterator<Item = Arc<dyn Rule>>,
    {
        Self::new(builtin::all().into_iter().chain(extra))
    }

    /// Look up a rule by name, ignoring case.
    pub fn get(&self, name: &str) -> Option<&Arc<dyn Rule>> {
        if is_nested(name.trim()) {
            return None;
        }
        self.rules.get(&fold(name))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Registered rule names in their declared spelling, sorted.
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.rules.values().map(|r| r.name().to_string()).collect();
        names.sort();
        names
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

/// ASCII-only, like configuration section lookup.
fn fold(name: &str) -> String {
    name.trim().to_ascii_lowercase()
}
