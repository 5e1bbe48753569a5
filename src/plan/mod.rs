//! Validation plans.
//!
//! A plan is the compiled form of the configuration for one type:
//! - [`RuleExecutionStep`]: one configured rule invocation
//! - [`PropertyValidationPlan`]: the ordered steps for one property
//! - [`TypePlan`]: the ordered property plans for one type
//!
//! Plans are compiled by [`compile_plan`] and memoized by [`PlanCache`].

mod cache;
mod compiler;

#[cfg(test)]
mod tests;

use crate::rules::is_nested;
use serde::Serialize;

pub use cache::PlanCache;
pub use compiler::compile_plan;

/// One configured rule invocation. Immutable once compiled.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RuleExecutionStep {
    pub rule_name: String,
    /// Ordered string parameters.
    pub args: Vec<String>,
    /// Overrides the rule's own message when non-blank.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_error_message: Option<String>,
}

impl RuleExecutionStep {
    pub fn new(
        rule_name: impl Into<String>,
        args: Vec<String>,
        custom_error_message: Option<String>,
    ) -> Self {
        Self {
            rule_name: rule_name.into(),
            args,
            custom_error_message,
        }
    }

    /// True for the reserved step that recurses into nested records.
    pub fn is_nested(&self) -> bool {
        is_nested(self.rule_name.trim())
    }

    /// The custom message, if one is set and not blank.
    pub fn custom_message(&self) -> Option<&str> {
        self.custom_error_message
            .as_deref()
            .filter(|m| !m.trim().is_empty())
    }
}

/// Ordered steps for one property.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyValidationPlan {
    pub property_name: String,
    pub steps: Vec<RuleExecutionStep>,
}

/// Ordered property plans for one type.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TypePlan {
    pub type_name: String,
    pub properties: Vec<PropertyValidationPlan>,
}

impl TypePlan {
    pub fn empty(type_name: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            properties: Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }

    /// Plan for `property`, if any steps are configured for it.
    pub fn property(&self, property: &str) -> Option<&PropertyValidationPlan> {
        self.properties.iter().find(|p| p.property_name == property)
    }

    /// Total number of steps across all properties.
    pub fn step_count(&self) -> usize {
        self.properties.iter().map(|p| p.steps.len()).sum()
    }
}
