//! Command implementations for ruleweaver.
//!
//! This module provides the dispatcher that routes CLI commands to their
//! implementations.

mod check;
mod plan;


use crate::cli::Command;
use ruleweaver::{Result, RuleRegistry};

/// Dispatch a command to its implementation.
pub fn dispatch(command: Command) -> Result<()> {
    match command {
        Command::Check(args) => check::cmd_check(args),
        Command::Plan(args) => plan::cmd_plan(args),
        Command::Rules => cmd_rules(),
    }
}

/// Execute the `ruleweaver rules` command.
fn cmd_rules() -> Result<()> {
    print!("{}", format_rules(&RuleRegistry::with_builtins()));
    Ok(())
}

/// One rule name per line, sorted, followed by the nested-validation marker.
fn format_rules(registry: &RuleRegistry) -> String {
    let mut out = String::new();
    for name in registry.names() {
        out.push_str(&name);
        out.push('\n');
    }
    out.push_str(&format!(
        "{} (recurse into records and collections)\n",
        ruleweaver::rules::NESTED_RULE
    ));
    out
}
