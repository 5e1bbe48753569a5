//! Configuration key names and the rule entry type.

/// Root section holding every type's rules.
pub const ROOT_SECTION: &str = "RuleWeaver";

/// Entry field naming the rule to run.
pub const RULE_NAME_KEY: &str = "RuleName";

/// Entry field holding the rule's parameter (a scalar, or a list of scalars).
pub const RULE_PARAMETER_KEY: &str = "RuleParameter";

/// Entry field overriding the rule's failure message.
pub const RULE_ERROR_MESSAGE_KEY: &str = "RuleErrorMessage";

/// One rule entry under a property section, as read from configuration.
///
/// Every field is optional at this level; the plan compiler decides what a
/// usable entry is.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RuleEntry {
    /// `RuleName`, if present as a scalar.
    pub rule_name: Option<String>,

    /// `RuleParameter` values in order. Empty when absent.
    pub parameters: Vec<String>,

    /// `RuleErrorMessage`, if present as a scalar.
    pub error_message: Option<String>,
}
