//! Validation results.
//!
//! Results are plain data owned by the caller and serialize directly into a
//! client-facing payload.

use serde::{Deserialize, Serialize};

/// Summary line of a rejection payload.
pub const REPORT_MESSAGE: &str = "Validation errors occurred.";

/// One resolved failure: which rule failed and the final message.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ValidationFailure {
    /// Rule name as configured (e.g. "Required", "MinLength").
    pub rule: String,
    /// Human-readable message.
    pub message: String,
}

impl ValidationFailure {
    pub fn new(rule: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            rule: rule.into(),
            message: message.into(),
        }
    }
}

/// All distinct failures for one property path.
///
/// The path is a property name, or a composed path such as
/// `BillingAddress.Street` or `Items[2].Code` for nested records.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationErrorDetail {
    pub property: String,
    pub failures: Vec<ValidationFailure>,
}

impl ValidationErrorDetail {
    pub fn new(property: impl Into<String>, failures: Vec<ValidationFailure>) -> Self {
        Self {
            property: property.into(),
            failures,
        }
    }

    /// Messages in failure order.
    pub fn messages(&self) -> Vec<&str> {
        self.failures.iter().map(|f| f.message.as_str()).collect()
    }
}

/// Rejection payload for a record that failed validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationReport {
    pub message: String,
    pub errors: Vec<ValidationErrorDetail>,
}

impl ValidationReport {
    /// Wrap validation results; `None` when there is nothing to report.
    pub fn from_errors(errors: Vec<ValidationErrorDetail>) -> Option<Self> {
        if errors.is_empty() {
            return None;
        }
        Some(Self {
            message: REPORT_MESSAGE.to_string(),
            errors,
        })
    }

    /// Total number of failures across all properties.
    pub fn failure_count(&self) -> usize {
        self.errors.iter().map(|e| e.failures.len()).sum()
    }

    /// Format the report for terminal output.
    ///
    /// ```text
    /// Validation errors occurred.
    ///
    /// BillingAddress.Street: Street is mandatory (Required)
    /// Password: Length must be at least 8 characters. (MinLength)
    /// ```
    pub fn format_text(&self) -> String {
        let mut msg = format!("{}\n\n", self.message);

        for detail in &self.errors {
            for failure in &detail.failures {
                msg.push_str(&format!(
                    "{}: {} ({})\n",
                    detail.property, failure.message, failure.rule
                ));
            }
        }

        msg
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Vec<ValidationErrorDetail> {
        vec![
            ValidationErrorDetail::new(
                "Password",
                vec![
                    ValidationFailure::new("MinLength", "Length must be at least 8 characters."),
                    ValidationFailure::new("Regex", "Needs number"),
                ],
            ),
            ValidationErrorDetail::new(
                "BillingAddress.Street",
                vec![ValidationFailure::new("Required", "Street is mandatory")],
            ),
        ]
    }

    #[test]
    fn empty_results_produce_no_report() {
        assert!(ValidationReport::from_errors(Vec::new()).is_none());
    }

    #[test]
    fn report_serializes_to_client_payload() {
        let report = ValidationReport::from_errors(sample()).unwrap();
        let json = serde_json::to_value(&report).unwrap();

        assert_eq!(json["message"], "Validation errors occurred.");
        assert_eq!(json["errors"][0]["property"], "Password");
        assert_eq!(json["errors"][0]["failures"][1]["rule"], "Regex");
        assert_eq!(json["errors"][0]["failures"][1]["message"], "Needs number");
        assert_eq!(json["errors"][1]["property"], "BillingAddress.Street");
    }

    #[test]
    fn text_format_lists_every_failure() {
        let report = ValidationReport::from_errors(sample()).unwrap();
        let text = report.format_text();

        assert!(text.starts_with("Validation errors occurred.\n\n"));
        assert!(text.contains("Password: Length must be at least 8 characters. (MinLength)\n"));
        assert!(text.contains("Password: Needs number (Regex)\n"));
        assert!(text.contains("BillingAddress.Street: Street is mandatory (Required)\n"));
        assert_eq!(report.failure_count(), 3);
    }

    #[test]
    fn detail_messages_keep_order() {
        let details = sample();
        assert_eq!(
            details[0].messages(),
            vec!["Length must be at least 8 characters.", "Needs number"]
        );
    }
}
