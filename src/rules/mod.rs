//! Validation rules.
//!
//! A rule is a named, stateless predicate over a property value and the
//! string arguments configured for it:
//! - [`Rule`]: the contract every rule implements
//! - [`RuleRegistry`]: case-insensitive name lookup, built once at startup
//! - [`builtin`]: the rules shipped with the crate

pub mod builtin;
mod registry;


use crate::value::Value;
use thiserror::Error;

pub use registry::RuleRegistry;

/// Reserved step name that triggers recursive validation instead of a rule lookup.
pub const NESTED_RULE: &str = "Nested";

/// Returns true when `name` is the reserved nested-validation step (ignoring case).
pub fn is_nested(name: &str) -> bool {
    name.eq_ignore_ascii_case(NESTED_RULE)
}

/// The contract every validation rule implements.
///
/// Implementations must be referentially transparent in `(value, args)`:
/// no side effects and no shared mutable state. The same rule instance is
/// shared by every validation call for the life of the process.
pub trait Rule: Send + Sync {
    /// Unique rule name, matched case-insensitively against configuration.
    fn name(&self) -> &str;

    /// Evaluate `value` with the configured arguments.
    ///
    /// # Returns
    ///
    /// * `Ok(RuleOutcome)` - pass, or fail with an optional technical message
    /// * `Err(RuleError)` - the rule could not evaluate at all; this aborts
    ///   the whole validation call
    fn evaluate(&self, value: &Value<'_>, args: &[String]) -> Result<RuleOutcome, RuleError>;
}

/// Pass/fail outcome of one rule evaluation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleOutcome {
    pub valid: bool,
    /// Technical message; may be empty.
    pub message: String,
}

impl RuleOutcome {
    pub fn pass() -> Self {
        Self {
            valid: true,
            message: String::new(),
        }
    }

    pub fn fail(message: impl Into<String>) -> Self {
        Self {
            valid: false,
            message: message.into(),
        }
    }
}

/// A defect inside a rule implementation.
///
/// Ordinary invalid input, including malformed rule arguments, is a
/// [`RuleOutcome::fail`], not a `RuleError`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{0}")]
pub struct RuleError(pub String);

impl RuleError {
    pub fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }
}
