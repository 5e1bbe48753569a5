//! Built-in rules.
//!
//! Each rule is an independent unit struct. Null values pass every rule
//! except `Required`, so optional properties only need `Required` to become
//! mandatory. Malformed arguments are reported as ordinary failures.

use super::{Rule, RuleError, RuleOutcome};
use crate::value::Value;
use parking_lot::RwLock;
use regex::{Regex, RegexBuilder};
use std::collections::HashMap;
use std::sync::{Arc, LazyLock};

static EMAIL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    RegexBuilder::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$")
        .case_insensitive(true)
        .build()
        .expect("email pattern is valid")
});

/// Most distinct patterns kept compiled by [`RegexMatch`].
const PATTERN_CACHE_LIMIT: usize = 256;

/// Compiled `Regex` rule patterns; `None` marks a pattern that does not compile.
static PATTERN_CACHE: LazyLock<RwLock<HashMap<String, Option<Regex>>>> =
    LazyLock::new(|| RwLock::new(HashMap::new()));

/// All built-in rules, one instance each.
pub fn all() -> Vec<Arc<dyn Rule>> {
    vec![
        Arc::new(Required),
        Arc::new(Email),
        Arc::new(MinValue),
        Arc::new(MaxValue),
        Arc::new(MinLength),
        Arc::new(MaxLength),
        Arc::new(RegexMatch),
    ]
}

/// Fails on null and on blank text.
#[derive(Debug, Clone, Copy, Default)]
pub struct Required;

impl Rule for Required {
    fn name(&self) -> &str {
        "Required"
    }

    fn evaluate(&self, value: &Value<'_>, _args: &[String]) -> Result<RuleOutcome, RuleError> {
        let missing = match value {
            Value::Null => true,
            Value::Text(s) => s.trim().is_empty(),
            _ => false,
        };

        Ok(if missing {
            RuleOutcome::fail("This field is required.")
        } else {
            RuleOutcome::pass()
        })
    }
}

/// Checks the value's text against a simple `local@domain.tld` shape.
#[derive(Debug, Clone, Copy, Default)]
pub struct Email;

impl Rule for Email {
    fn name(&self) -> &str {
        "Email"
    }

    fn evaluate(&self, value: &Value<'_>, _args: &[String]) -> Result<RuleOutcome, RuleError> {
        if value.is_null() {
            return Ok(RuleOutcome::pass());
        }

        Ok(match value.as_text() {
            Some(text) if text.is_empty() => RuleOutcome::pass(),
            Some(text) if EMAIL_REGEX.is_match(&text) => RuleOutcome::pass(),
            _ => RuleOutcome::fail("Invalid email format."),
        })
    }
}

/// Lower numeric bound; `args[0]` is the minimum.
#[derive(Debug, Clone, Copy, Default)]
pub struct MinValue;

impl Rule for MinValue {
    fn name(&self) -> &str {
        "MinValue"
    }

    fn evaluate(&self, value: &Value<'_>, args: &[String]) -> Result<RuleOutcome, RuleError> {
        Ok(check_bound(self.name(), value, args, Bound::Min))
    }
}

/// Upper numeric bound; `args[0]` is the maximum.
#[derive(Debug, Clone, Copy, Default)]
pub struct MaxValue;

impl Rule for MaxValue {
    fn name(&self) -> &str {
        "MaxValue"
    }

    fn evaluate(&self, value: &Value<'_>, args: &[String]) -> Result<RuleOutcome, RuleError> {
        Ok(check_bound(self.name(), value, args, Bound::Max))
    }
}

/// Minimum character count for text, or item count for lists.
#[derive(Debug, Clone, Copy, Default)]
pub struct MinLength;

impl Rule for MinLength {
    fn name(&self) -> &str {
        "MinLength"
    }

    fn evaluate(&self, value: &Value<'_>, args: &[String]) -> Result<RuleOutcome, RuleError> {
        Ok(check_length(self.name(), value, args, Bound::Min))
    }
}

/// Maximum character count for text, or item count for lists.
#[derive(Debug, Clone, Copy, Default)]
pub struct MaxLength;

impl Rule for MaxLength {
    fn name(&self) -> &str {
        "MaxLength"
    }

    fn evaluate(&self, value: &Value<'_>, args: &[String]) -> Result<RuleOutcome, RuleError> {
        Ok(check_length(self.name(), value, args, Bound::Max))
    }
}

/// Unanchored regular expression search; `args[0]` is the pattern.
///
/// Registered under the name `Regex`.
#[derive(Debug, Clone, Copy, Default)]
pub struct RegexMatch;

impl Rule for RegexMatch {
    fn name(&self) -> &str {
        "Regex"
    }

    fn evaluate(&self, value: &Value<'_>, args: &[String]) -> Result<RuleOutcome, RuleError> {
        let text = match value.as_text() {
            Some(text) if !text.is_empty() => text,
            Some(_) => return Ok(RuleOutcome::pass()),
            None if value.is_null() => return Ok(RuleOutcome::pass()),
            None => {
                return Ok(RuleOutcome::fail(
                    "The value does not match the required pattern.",
                ));
            }
        };

        let Some(pattern) = args.first() else {
            return Ok(RuleOutcome::fail("Invalid Regex configuration."));
        };

        let Some(regex) = compiled_pattern(pattern) else {
            return Ok(RuleOutcome::fail("Invalid Regex pattern."));
        };

        Ok(if regex.is_match(&text) {
            RuleOutcome::pass()
        } else {
            RuleOutcome::fail("The value does not match the required pattern.")
        })
    }
}

/// Compile `pattern` once per process. Past the cache limit, patterns are
/// compiled on every call.
fn compiled_pattern(pattern: &str) -> Option<Regex> {
    if let Some(cached) = PATTERN_CACHE.read().get(pattern) {
        return cached.clone();
    }

    let compiled = Regex::new(pattern).ok();

    let mut cache = PATTERN_CACHE.write();
    if cache.len() < PATTERN_CACHE_LIMIT {
        cache.insert(pattern.to_string(), compiled.clone());
    }
    compiled
}

#[cfg(test)]
pub(super) fn pattern_is_cached(pattern: &str) -> bool {
    PATTERN_CACHE.read().contains_key(pattern)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Bound {
    Min,
    Max,
}

fn check_bound(rule: &str, value: &Value<'_>, args: &[String], bound: Bound) -> RuleOutcome {
    if value.is_null() {
        return RuleOutcome::pass();
    }

    let Some(limit) = args.first().and_then(|a| a.trim().parse::<f64>().ok()) else {
        return RuleOutcome::fail(format!("Invalid configuration for {}.", rule));
    };

    let Some(current) = value.as_number() else {
        return RuleOutcome::fail(format!("{} applies only to numeric types.", rule));
    };

    match bound {
        Bound::Min if current < limit => {
            RuleOutcome::fail(format!("Value must be at least {}.", limit))
        }
        Bound::Max if current > limit => {
            RuleOutcome::fail(format!("Value must be at most {}.", limit))
        }
        _ => RuleOutcome::pass(),
    }
}

fn check_length(rule: &str, value: &Value<'_>, args: &[String], bound: Bound) -> RuleOutcome {
    if value.is_null() {
        return RuleOutcome::pass();
    }

    let Some(limit) = args.first().and_then(|a| a.trim().parse::<i64>().ok()) else {
        return RuleOutcome::fail(format!("Invalid configuration for {}.", rule));
    };

    let (len, subject, unit) = match value {
        Value::Text(s) => (s.chars().count() as i64, "Length must be", "characters"),
        Value::List(items) => (items.len() as i64, "List must contain", "items"),
        _ => {
            return RuleOutcome::fail(format!(
                "{} applies only to strings or collections.",
                rule
            ));
        }
    };

    match bound {
        Bound::Min if len < limit => {
            RuleOutcome::fail(format!("{} at least {} {}.", subject, limit, unit))
        }
        Bound::Max if len > limit => {
            RuleOutcome::fail(format!("{} at most {} {}.", subject, limit, unit))
        }
        _ => RuleOutcome::pass(),
    }
}
