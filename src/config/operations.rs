//! Configuration loading from files, YAML/JSON text, and flat key pairs.

use super::model::{RuleConfiguration, child, scalar_text};
use super::types::ROOT_SECTION;
use crate::error::{Result, WeaverError};
use serde_yaml::{Mapping, Value};
use std::path::Path;
use tracing::debug;

impl RuleConfiguration {
    /// Load configuration from a YAML (or JSON) file.
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the configuration document
    ///
    /// # Returns
    ///
    /// * `Ok(RuleConfiguration)` - Parsed configuration (empty if it has no `RuleWeaver` section)
    /// * `Err(WeaverError::ConfigError)` - Read or parse error
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        let content = std::fs::read_to_string(path).map_err(|e| {
            WeaverError::ConfigError(format!(
                "failed to read rule configuration '{}': {}",
                path.display(),
                e
            ))
        })?;

        let config = Self::from_yaml(&content)?;
        debug!(
            path = %path.display(),
            types = config.type_names().len(),
            "loaded rule configuration"
        );
        Ok(config)
    }

    /// Parse configuration from YAML text. JSON documents are valid YAML.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let document: Value = serde_yaml::from_str(yaml).map_err(|e| {
            WeaverError::ConfigError(format!("failed to parse rule configuration: {}", e))
        })?;

        Ok(Self::from_document(&document))
    }

    /// Take the `RuleWeaver` section out of an already parsed document.
    ///
    /// A document without that section, or where it is not a mapping,
    /// configures nothing.
    pub fn from_document(document: &Value) -> Self {
        let rules = document
            .as_mapping()
            .and_then(|root| child(root, ROOT_SECTION))
            .and_then(Value::as_mapping)
            .cloned()
            .unwrap_or_default();

        Self { rules }
    }

    /// Build configuration from flat colon-delimited keys.
    ///
    /// ```
    /// use ruleweaver::RuleConfiguration;
    ///
    /// let config = RuleConfiguration::from_pairs([
    ///     ("RuleWeaver:UserProfile:Age:0:RuleName", "MinValue"),
    ///     ("RuleWeaver:UserProfile:Age:0:RuleParameter", "18"),
    /// ]);
    /// assert_eq!(config.type_names(), vec!["UserProfile"]);
    /// ```
    ///
    /// Key segments match existing sections ignoring case. When a key is
    /// both a value and a parent of other keys, the section wins.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let mut root = Mapping::new();

        for (key, value) in pairs {
            let segments: Vec<&str> = key.as_ref().split(':').map(str::trim).collect();
            if segments.iter().any(|s| s.is_empty()) {
                continue;
            }
            insert_path(&mut root, &segments, value.into());
        }

        Self::from_document(&Value::Mapping(root))
    }
}

fn insert_path(map: &mut Mapping, segments: &[&str], value: String) {
    let Some((first, rest)) = segments.split_first() else {
        return;
    };

    let key = existing_key(map, first).unwrap_or_else(|| Value::String(first.to_string()));

    if rest.is_empty() {
        if !map.get(&key).is_some_and(Value::is_mapping) {
            map.insert(key, Value::String(value));
        }
        return;
    }

    let slot = map
        .entry(key)
        .or_insert_with(|| Value::Mapping(Mapping::new()));
    if !slot.is_mapping() {
        *slot = Value::Mapping(Mapping::new());
    }
    if let Value::Mapping(inner) = slot {
        insert_path(inner, rest, value);
    }
}

fn existing_key(map: &Mapping, segment: &str) -> Option<Value> {
    map.keys()
        .find(|k| scalar_text(k).is_some_and(|k| k.eq_ignore_ascii_case(segment)))
        .cloned()
}
