//! Error types for ruleweaver.
//!
//! Uses thiserror for derive macros. Expected invalidity of a record is never
//! an error: it is reported as [`crate::ValidationErrorDetail`] data. These
//! variants cover broken configuration, broken registries, and defective rules.

use crate::exit_codes;
use thiserror::Error;

/// Main error type for ruleweaver operations.
#[derive(Error, Debug)]
pub enum WeaverError {
    /// The rule configuration could not be read or parsed.
    #[error("{0}")]
    ConfigError(String),

    /// User provided invalid arguments or input.
    #[error("{0}")]
    UserError(String),

    /// Two registered rules share a name (compared case-insensitively).
    #[error("duplicate rule name '{0}': rule names must be unique ignoring case")]
    DuplicateRule(String),

    /// The validated document broke one or more rules.
    #[error("validation failed with {0} failure(s)")]
    ValidationFailed(usize),

    /// A rule was registered under an unusable name.
    #[error("invalid rule name '{0}'")]
    InvalidRuleName(String),

    /// A rule implementation could not evaluate a value.
    #[error("rule '{rule}' failed while validating '{property}': {message}")]
    RuleFailed {
        rule: String,
        property: String,
        message: String,
    },
}

impl WeaverError {
    /// Returns the appropriate exit code for this error type.
    pub fn exit_code(&self) -> i32 {
        match self {
            WeaverError::ConfigError(_) => exit_codes::USER_ERROR,
            WeaverError::UserError(_) => exit_codes::USER_ERROR,
            WeaverError::DuplicateRule(_) => exit_codes::USER_ERROR,
            WeaverError::InvalidRuleName(_) => exit_codes::USER_ERROR,
            WeaverError::ValidationFailed(_) => exit_codes::VALIDATION_FAILURE,
            WeaverError::RuleFailed { .. } => exit_codes::RULE_FAILURE,
        }
    }
}

/// Result type alias for ruleweaver operations.
pub type Result<T> = std::result::Result<T, WeaverError>;
