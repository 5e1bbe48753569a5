//! RuleWeaver: configuration-driven validation for structured records.
//!
//! Rules are small named predicates registered once at startup. Which rules
//! apply to which property, with which parameters and messages, lives in an
//! external configuration tree:
//!
//! ```yaml
//! RuleWeaver:
//!   UserProfile:
//!     Age:
//!       - RuleName: MinValue
//!         RuleParameter: "18"
//!         RuleErrorMessage: You are too young.
//! ```
//!
//! The configuration is compiled lazily into a per-type plan, cached, and
//! executed by [`ValidationEngine`], which returns a flat list of
//! [`ValidationErrorDetail`] entries instead of stopping at the first error.

pub mod config;
pub mod engine;
pub mod error;
pub mod exit_codes;
pub mod json;
pub mod plan;
pub mod report;
pub mod rules;
pub mod value;

pub use config::RuleConfiguration;
pub use engine::ValidationEngine;
pub use error::{Result, WeaverError};
pub use json::JsonRecord;
pub use plan::{PlanCache, PropertyValidationPlan, RuleExecutionStep, TypePlan};
pub use report::{ValidationErrorDetail, ValidationFailure, ValidationReport};
pub use rules::{Rule, RuleError, RuleOutcome, RuleRegistry};
pub use value::{Record, TypeDescriptor, Value};
