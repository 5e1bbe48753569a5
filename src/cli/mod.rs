//! CLI argument parsing for ruleweaver.
//!
//! Uses clap derive macros for declarative argument definitions.
//! This module defines the command structure; actual implementations
//! are in the `commands` module.

use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// RuleWeaver: configuration-driven validation for structured records.
///
/// Rules, their parameters, and their messages live in a YAML/JSON
/// configuration file under the `RuleWeaver` section, keyed by type name
/// and property name.
#[derive(Parser, Debug)]
#[command(name = "ruleweaver")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Increase log verbosity (-v for debug, -vv for trace). RUST_LOG overrides.
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    /// Parse command-line arguments.
    pub fn parse_args() -> Self {
        Self::parse()
    }
}

/// Available commands for ruleweaver.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Validate a JSON document against the configured rules.
    ///
    /// Exits 0 when the document is valid and 2 when it breaks any rule.
    Check(CheckArgs),

    /// Show the compiled validation plan for a type.
    Plan(PlanArgs),

    /// List the built-in rules.
    Rules,
}

/// Output format for reports and plans.
#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable text.
    #[default]
    Text,
    /// Serialized as JSON.
    Json,
}

/// Arguments for the `check` command.
#[derive(Parser, Debug)]
pub struct CheckArgs {
    /// Rule configuration file (YAML or JSON).
    #[arg(short, long)]
    pub rules: PathBuf,

    /// Type name of the document's root object. Defaults to its "$type" member.
    #[arg(short = 't', long = "type")]
    pub type_name: Option<String>,

    /// Report format.
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// JSON document to validate, or "-" for stdin.
    pub input: String,
}

/// Arguments for the `plan` command.
#[derive(Parser, Debug)]
pub struct PlanArgs {
    /// Rule configuration file (YAML or JSON).
    #[arg(short, long)]
    pub rules: PathBuf,

    /// Type whose plan to show. Omit to show every configured type.
    #[arg(short = 't', long = "type")]
    pub type_name: Option<String>,

    /// Plan format.
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}
