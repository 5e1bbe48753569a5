//! Exit code constants for the ruleweaver CLI.
//!
//! - 0: Success (input is valid)
//! - 1: User error (bad args, unreadable config or input)
//! - 2: Validation failure (the input broke at least one rule)
//! - 3: Rule failure (a rule implementation could not evaluate a value)

/// Successful execution.
pub const SUCCESS: i32 = 0;

/// User error: bad arguments, unreadable configuration, malformed input.
pub const USER_ERROR: i32 = 1;

/// Validation failure: the input document broke one or more rules.
pub const VALIDATION_FAILURE: i32 = 2;

/// Rule failure: a rule reported a defect instead of a pass/fail outcome.
pub const RULE_FAILURE: i32 = 3;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exit_codes_are_distinct() {
        let codes = [SUCCESS, USER_ERROR, VALIDATION_FAILURE, RULE_FAILURE];
        for (i, &a) in codes.iter().enumerate() {
            for (j, &b) in codes.iter().enumerate() {
                if i != j {
                    assert_ne!(a, b, "Exit codes must be distinct");
                }
            }
        }
    }

    #[test]
    fn exit_codes_are_stable() {
        assert_eq!(SUCCESS, 0);
        assert_eq!(USER_ERROR, 1);
        assert_eq!(VALIDATION_FAILURE, 2);
        assert_eq!(RULE_FAILURE, 3);
    }
}
