//! Compilation of configuration into a type plan.

use super::{PropertyValidationPlan, RuleExecutionStep, TypePlan};
use crate::config::{RuleConfiguration, RuleEntry};
use crate::value::TypeDescriptor;
use tracing::{debug, trace};

/// Compile the plan for `descriptor` from `config`.
///
/// Pure and idempotent: the same descriptor and configuration always give
/// the same plan.
///
/// 1. No section for the type name: empty plan.
/// 2. Property sections are taken in configuration order. Properties the
///    type does not declare are skipped (open types declare everything).
/// 3. Entries without a rule name are skipped.
/// 4. A property with no usable entries gets no plan.
pub fn compile_plan(config: &RuleConfiguration, descriptor: &TypeDescriptor) -> TypePlan {
    let type_name = descriptor.name();
    let mut plan = TypePlan::empty(type_name);

    let Some(section) = config.type_section(type_name) else {
        debug!(type_name, "no rule configuration for type");
        return plan;
    };

    for (configured_name, property) in section.properties() {
        let Some(property_name) = descriptor.resolve_property(&configured_name) else {
            trace!(
                type_name,
                property = %configured_name,
                "configured property not declared by type, skipping"
            );
            continue;
        };

        // Case variants of one name: the first section wins, as in section lookup.
        if plan
            .properties
            .iter()
            .any(|p| p.property_name.eq_ignore_ascii_case(&property_name))
        {
            continue;
        }

        let steps: Vec<RuleExecutionStep> =
            property.entries().into_iter().filter_map(step_from_entry).collect();

        if !steps.is_empty() {
            plan.properties.push(PropertyValidationPlan {
                property_name,
                steps,
            });
        }
    }

    debug!(
        type_name,
        properties = plan.properties.len(),
        steps = plan.step_count(),
        "compiled validation plan"
    );
    plan
}

fn step_from_entry(entry: RuleEntry) -> Option<RuleExecutionStep> {
    let rule_name = entry.rule_name.filter(|n| !n.trim().is_empty())?;
    Some(RuleExecutionStep::new(
        rule_name.trim(),
        entry.parameters,
        entry.error_message,
    ))
}
