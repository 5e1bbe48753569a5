//! Rule configuration tree and its section views.

use super::types::*;
use serde_yaml::{Mapping, Value};
use std::cmp::Ordering;

/// The `RuleWeaver` section of a configuration document.
///
/// Shape:
///
/// ```yaml
/// RuleWeaver:
///   <TypeName>:
///     <PropertyName>:
///       - RuleName: <name>
///         RuleParameter: <value>          # optional
///         RuleErrorMessage: <message>     # optional
/// ```
///
/// Section names are matched ignoring ASCII case at every level.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RuleConfiguration {
    pub(super) rules: Mapping,
}

impl RuleConfiguration {
    /// A configuration with no rules at all.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Names of the configured types, in declaration order.
    pub fn type_names(&self) -> Vec<String> {
        self.rules
            .iter()
            .filter(|(_, v)| v.is_mapping())
            .filter_map(|(k, _)| scalar_text(k))
            .collect()
    }

    /// Section for `type_name`, or `None` when absent or not a mapping.
    pub fn type_section(&self, type_name: &str) -> Option<TypeSection<'_>> {
        child(&self.rules, type_name)
            .and_then(Value::as_mapping)
            .map(TypeSection)
    }
}

/// Rules configured for one type.
#[derive(Debug, Clone, Copy)]
pub struct TypeSection<'a>(&'a Mapping);

impl<'a> TypeSection<'a> {
    /// Property sections in declaration order, with their configured names.
    pub fn properties(&self) -> Vec<(String, PropertySection<'a>)> {
        self.0
            .iter()
            .filter_map(|(k, v)| scalar_text(k).map(|name| (name, PropertySection(v))))
            .collect()
    }

    pub fn property(&self, name: &str) -> Option<PropertySection<'a>> {
        child(self.0, name).map(PropertySection)
    }
}

/// The rule entries configured for one property.
#[derive(Debug, Clone, Copy)]
pub struct PropertySection<'a>(&'a Value);

impl PropertySection<'_> {
    /// Rule entries in order.
    ///
    /// A sequence keeps its order. A mapping (the shape flat `Type:Prop:0:...`
    /// keys produce) is ordered by key: integer keys numerically, ahead of any
    /// other keys. Anything else holds no entries.
    pub fn entries(&self) -> Vec<RuleEntry> {
        match self.0 {
            Value::Sequence(items) => items.iter().map(read_entry).collect(),
            Value::Mapping(map) => {
                let mut children: Vec<(String, &Value)> = map
                    .iter()
                    .filter_map(|(k, v)| scalar_text(k).map(|key| (key, v)))
                    .collect();
                children.sort_by(|(a, _), (b, _)| compare_keys(a, b));
                children.into_iter().map(|(_, v)| read_entry(v)).collect()
            }
            _ => Vec::new(),
        }
    }
}

fn read_entry(node: &Value) -> RuleEntry {
    let Some(map) = node.as_mapping() else {
        return RuleEntry::default();
    };

    RuleEntry {
        rule_name: child(map, RULE_NAME_KEY).and_then(scalar_text),
        parameters: child(map, RULE_PARAMETER_KEY)
            .map(read_parameters)
            .unwrap_or_default(),
        error_message: child(map, RULE_ERROR_MESSAGE_KEY).and_then(scalar_text),
    }
}

fn read_parameters(node: &Value) -> Vec<String> {
    match node {
        Value::Sequence(items) => items.iter().filter_map(scalar_text).collect(),
        other => scalar_text(other).into_iter().collect(),
    }
}

/// Child of `map` whose key matches `name` ignoring ASCII case.
pub(super) fn child<'a>(map: &'a Mapping, name: &str) -> Option<&'a Value> {
    map.iter()
        .find(|(k, _)| scalar_text(k).is_some_and(|k| k.eq_ignore_ascii_case(name)))
        .map(|(_, v)| v)
}

/// Text of a scalar node; `None` for null, sequences, mappings, and tags.
pub(super) fn scalar_text(node: &Value) -> Option<String> {
    match node {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// Ordering of sibling keys: integers numerically first, then text ignoring case.
pub(super) fn compare_keys(a: &str, b: &str) -> Ordering {
    match (a.parse::<u64>(), b.parse::<u64>()) {
        (Ok(x), Ok(y)) => x.cmp(&y),
        (Ok(_), Err(_)) => Ordering::Less,
        (Err(_), Ok(_)) => Ordering::Greater,
        (Err(_), Err(_)) => a.to_ascii_lowercase().cmp(&b.to_ascii_lowercase()),
    }
}
