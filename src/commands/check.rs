//! Implementation of the `ruleweaver check` command.
//!
//! Reads a JSON document, validates its root object with the built-in rules
//! and the given configuration, and prints a report. An invalid document
//! ends with [`WeaverError::ValidationFailed`] so the process exits with
//! the validation-failure code.

use crate::cli::{CheckArgs, OutputFormat};
use ruleweaver::json::TYPE_MEMBER;
use ruleweaver::{
    JsonRecord, Record, Result, RuleConfiguration, ValidationEngine, ValidationErrorDetail,
    ValidationReport, WeaverError,
};
use serde_json::Value as JsonValue;
use std::fs;
use std::io::{self, Read};
use tracing::debug;

/// Input argument that selects stdin.
const STDIN_INPUT: &str = "-";

/// Execute the `ruleweaver check` command.
pub fn cmd_check(args: CheckArgs) -> Result<()> {
    let config = RuleConfiguration::load(&args.rules)?;
    let engine = ValidationEngine::with_builtins(config);

    let input = read_input(&args.input)?;
    let document: JsonValue = serde_json::from_str(&input).map_err(|e| {
        WeaverError::UserError(format!("failed to parse '{}' as JSON: {}", args.input, e))
    })?;

    let errors = check_document(&engine, &document, args.type_name.as_deref())?;
    let report = ValidationReport::from_errors(errors);
    print!("{}", render_report(report.as_ref(), args.format)?);

    match report {
        Some(report) => Err(WeaverError::ValidationFailed(report.failure_count())),
        None => Ok(()),
    }
}

/// Validate a parsed JSON document.
///
/// A `null` document is valid. Any other non-object root is a user error, as
/// is an object whose type cannot be determined from `type_name` or its
/// `"$type"` member.
pub fn check_document(
    engine: &ValidationEngine,
    document: &JsonValue,
    type_name: Option<&str>,
) -> Result<Vec<ValidationErrorDetail>> {
    let fields = match document {
        JsonValue::Null => return Ok(Vec::new()),
        JsonValue::Object(fields) => fields,
        other => {
            return Err(WeaverError::UserError(format!(
                "input document must be a JSON object, found {}",
                json_kind(other)
            )));
        }
    };

    let record = match type_name {
        Some(name) => JsonRecord::new(name.to_string(), fields),
        None => JsonRecord::self_typed(fields).ok_or_else(|| {
            WeaverError::UserError(format!(
                "input document has no \"{}\" member; pass --type to name its type",
                TYPE_MEMBER
            ))
        })?,
    };

    debug!(type_name = record.descriptor().name(), "validating document");
    engine.validate(&record)
}

/// Render the outcome of a check in the requested format.
pub fn render_report(report: Option<&ValidationReport>, format: OutputFormat) -> Result<String> {
    match (format, report) {
        (OutputFormat::Text, Some(report)) => Ok(report.format_text()),
        (OutputFormat::Text, None) => Ok("Document is valid.\n".to_string()),
        (OutputFormat::Json, Some(report)) => to_json(report),
        (OutputFormat::Json, None) => to_json(&ValidationReport {
            message: "No validation errors.".to_string(),
            errors: Vec::new(),
        }),
    }
}

fn to_json(report: &ValidationReport) -> Result<String> {
    let mut out = serde_json::to_string_pretty(report)
        .map_err(|e| WeaverError::UserError(format!("failed to serialize report: {}", e)))?;
    out.push('\n');
    Ok(out)
}

fn read_input(input: &str) -> Result<String> {
    if input == STDIN_INPUT {
        let mut buf = String::new();
        io::stdin()
            .read_to_string(&mut buf)
            .map_err(|e| WeaverError::UserError(format!("failed to read stdin: {}", e)))?;
        return Ok(buf);
    }

    fs::read_to_string(input)
        .map_err(|e| WeaverError::UserError(format!("failed to read '{}': {}", input, e)))
}

fn json_kind(value: &JsonValue) -> &'static str {
    match value {
        JsonValue::Null => "null",
        JsonValue::Bool(_) => "a boolean",
        JsonValue::Number(_) => "a number",
        JsonValue::String(_) => "a string",
        JsonValue::Array(_) => "an array",
        JsonValue::Object(_) => "an object",
    }
}
