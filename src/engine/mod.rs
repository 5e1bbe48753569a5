//! Validation engine.
//!
//! Walks a record's properties in plan order, runs each property's steps in
//! configured order, recurses into nested records and collections, and
//! collects failures into a flat list keyed by property path:
//! - `Street` for a top-level property
//! - `BillingAddress.Street` for a property of a nested record
//! - `Items[2].Code` for a property of the third element of a collection
//!
//! Invalid input is never an error. The only error is a rule that cannot
//! evaluate at all ([`crate::RuleError`]), which aborts the call.


use crate::config::RuleConfiguration;
use crate::error::{Result, WeaverError};
use crate::plan::{PlanCache, RuleExecutionStep};
use crate::report::{ValidationErrorDetail, ValidationFailure};
use crate::rules::RuleRegistry;
use crate::value::{Record, Value};
use std::sync::Arc;
use tracing::trace;

/// Executes cached plans against records.
///
/// Cheap to clone; clones share the plan cache and the rule registry.
#[derive(Debug, Clone)]
pub struct ValidationEngine {
    plans: Arc<PlanCache>,
    rules: Arc<RuleRegistry>,
}

impl ValidationEngine {
    pub fn new(plans: Arc<PlanCache>, rules: Arc<RuleRegistry>) -> Self {
        Self { plans, rules }
    }

    /// Engine over `config` with the built-in rules and a fresh plan cache.
    pub fn with_builtins(config: RuleConfiguration) -> Self {
        Self::new(
            Arc::new(PlanCache::new(config)),
            Arc::new(RuleRegistry::with_builtins()),
        )
    }

    pub fn plans(&self) -> &Arc<PlanCache> {
        &self.plans
    }

    pub fn rules(&self) -> &Arc<RuleRegistry> {
        &self.rules
    }

    /// Validate a record.
    ///
    /// # Returns
    ///
    /// * `Ok(errors)` - empty when the record is valid; otherwise one entry per
    ///   failing property path, in plan order with nested results in place
    /// * `Err(WeaverError::RuleFailed)` - a rule could not evaluate a value
    pub fn validate(&self, record: &dyn Record) -> Result<Vec<ValidationErrorDetail>> {
        let mut errors = Vec::new();
        self.validate_record(record, "", &mut errors)?;
        Ok(errors)
    }

    /// Validate an optional record; `None` is valid.
    pub fn validate_optional(&self, record: Option<&dyn Record>) -> Result<Vec<ValidationErrorDetail>> {
        match record {
            Some(record) => self.validate(record),
            None => Ok(Vec::new()),
        }
    }

    /// Validate any value. Only records have plans; every other value,
    /// including null, is valid.
    pub fn validate_value(&self, value: &Value<'_>) -> Result<Vec<ValidationErrorDetail>> {
        match value {
            Value::Record(record) => self.validate(&**record),
            _ => Ok(Vec::new()),
        }
    }

    fn validate_record(
        &self,
        record: &dyn Record,
        prefix: &str,
        errors: &mut Vec<ValidationErrorDetail>,
    ) -> Result<()> {
        let plan = self.plans.plan_for(record.descriptor());
        if plan.is_empty() {
            return Ok(());
        }

        for property_plan in &plan.properties {
            let Some(value) = record.property(&property_plan.property_name) else {
                continue;
            };
            let path = join_path(prefix, &property_plan.property_name);
            let mut failures: Vec<ValidationFailure> = Vec::new();
            let mut nested_done = false;

            for step in &property_plan.steps {
                if step.is_nested() {
                    // Child paths are unique per visit; a repeated step would duplicate them.
                    if !nested_done {
                        self.validate_nested(&value, &path, errors)?;
                        nested_done = true;
                    }
                    continue;
                }

                if let Some(failure) = self.run_step(step, &value, &path)?
                    && !failures.contains(&failure)
                {
                    failures.push(failure);
                }
            }

            if !failures.is_empty() {
                errors.push(ValidationErrorDetail::new(path, failures));
            }
        }

        Ok(())
    }

    fn validate_nested(
        &self,
        value: &Value<'_>,
        path: &str,
        errors: &mut Vec<ValidationErrorDetail>,
    ) -> Result<()> {
        match value {
            Value::Record(child) => self.validate_record(&**child, path, errors),
            Value::List(items) => {
                for (index, item) in items.iter().enumerate() {
                    if let Value::Record(child) = item {
                        let element_path = format!("{}[{}]", path, index);
                        self.validate_record(&**child, &element_path, errors)?;
                    }
                }
                Ok(())
            }
            _ => Ok(()),
        }
    }

    /// Run one named step; `Some` when the rule reports a failure.
    fn run_step(
        &self,
        step: &RuleExecutionStep,
        value: &Value<'_>,
        path: &str,
    ) -> Result<Option<ValidationFailure>> {
        let Some(rule) = self.rules.get(&step.rule_name) else {
            trace!(rule = %step.rule_name, property = path, "unknown rule, skipping step");
            return Ok(None);
        };

        let outcome = rule
            .evaluate(value, &step.args)
            .map_err(|e| WeaverError::RuleFailed {
                rule: step.rule_name.clone(),
                property: path.to_string(),
                message: e.to_string(),
            })?;

        trace!(
            rule = %step.rule_name,
            property = path,
            valid = outcome.valid,
            "evaluated rule"
        );

        if outcome.valid {
            return Ok(None);
        }

        Ok(Some(ValidationFailure::new(
            step.rule_name.as_str(),
            resolve_message(step, &outcome.message),
        )))
    }
}

/// Failure message precedence: custom message, then the rule's own message,
/// then a generic fallback naming the rule.
pub fn resolve_message(step: &RuleExecutionStep, technical: &str) -> String {
    if let Some(custom) = step.custom_message() {
        return custom.to_string();
    }
    if !technical.trim().is_empty() {
        return technical.to_string();
    }
    format!("Error in {}", step.rule_name)
}

fn join_path(prefix: &str, property: &str) -> String {
    if prefix.is_empty() {
        property.to_string()
    } else {
        format!("{}.{}", prefix, property)
    }
}
