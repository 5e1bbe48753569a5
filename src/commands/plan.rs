//! Implementation of the `ruleweaver plan` command.

use crate::cli::{OutputFormat, PlanArgs};
use ruleweaver::{PlanCache, Result, RuleConfiguration, TypeDescriptor, TypePlan, WeaverError};

/// Execute the `ruleweaver plan` command.
///
/// Shows the plan for `--type`, or for every type in the configuration.
pub fn cmd_plan(args: PlanArgs) -> Result<()> {
    let config = RuleConfiguration::load(&args.rules)?;
    let type_names = match args.type_name {
        Some(name) => vec![name],
        None => config.type_names(),
    };

    let cache = PlanCache::new(config);
    let plans: Vec<_> = type_names
        .into_iter()
        .map(|name| cache.plan_for(&TypeDescriptor::open(name)))
        .collect();

    match args.format {
        OutputFormat::Text => {
            for plan in &plans {
                print!("{}", format_plan(plan));
            }
        }
        OutputFormat::Json => {
            let plans: Vec<&TypePlan> = plans.iter().map(|p| p.as_ref()).collect();
            let json = serde_json::to_string_pretty(&plans)
                .map_err(|e| WeaverError::UserError(format!("failed to serialize plan: {}", e)))?;
            println!("{}", json);
        }
    }

    Ok(())
}

/// Format a plan for terminal output.
///
/// ```text
/// UserProfile
///   Email
///     1. Required
///     2. Email -> "Bad email"
///   Age
///     1. MinValue(18)
/// ```
pub fn format_plan(plan: &TypePlan) -> String {
    if plan.is_empty() {
        return format!("{}: no rules configured\n", plan.type_name);
    }

    let mut out = format!("{}\n", plan.type_name);
    for property in &plan.properties {
        out.push_str(&format!("  {}\n", property.property_name));
        for (index, step) in property.steps.iter().enumerate() {
            out.push_str(&format!("    {}. {}", index + 1, step.rule_name));
            if !step.args.is_empty() {
                out.push_str(&format!("({})", step.args.join(", ")));
            }
            if let Some(message) = step.custom_message() {
                out.push_str(&format!(" -> \"{}\"", message));
            }
            out.push('\n');
        }
    }
    out
}
