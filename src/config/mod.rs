//! Rule configuration for ruleweaver.
//!
//! This module reads the hierarchical rule tree rooted at the `RuleWeaver`
//! section, keyed by type name and property name. Missing sections, blank
//! rule names, and malformed nodes mean "nothing configured here" rather
//! than errors. Only an unreadable or
//! unparseable document is an error.

mod model;
mod operations;
pub mod types;


// Re-export public API
pub use model::{PropertySection, RuleConfiguration, TypeSection};
pub use types::{ROOT_SECTION, RULE_ERROR_MESSAGE_KEY, RULE_NAME_KEY, RULE_PARAMETER_KEY, RuleEntry};
