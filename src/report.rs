//! Diagnostic rendering for the command line.
//!
//! Pure formatting: every function returns the text to print and leaves
//! exit decisions to the caller.

use colored::Colorize;

use crate::error::{LoadError, TransportError, ValidationFailure};
use crate::fields::{example, spec_for, BusinessRule};
use crate::rules::rule_for;
use crate::types::{EntityType, Operation};

/// Render a validation failure with the expected document shape.
///
/// `program` is the binary name used in the help pointer.
pub fn render_failure(failure: &ValidationFailure, program: &str) -> String {
    let mut out = String::new();

    out.push_str(&format!(
        "{} {} {}: {}\n",
        "✗".red().bold(),
        failure.operation.command_name(),
        failure.entity,
        failure.to_string().red()
    ));

    let fields = failure.error.field_names();
    if !fields.is_empty() {
        out.push_str(&format!("  field(s): {}\n", fields.join(", ").yellow()));
    }

    let spec = spec_for(failure.entity);
    if let (Some(table), Some(value)) = (spec.discriminant, failure.discriminant.as_deref()) {
        if let Some(rule) = rule_for(spec, failure.operation, value) {
            if let Some(line) = describe_rule(table.field, rule, failure.operation) {
                out.push_str(&format!("  {}\n", line));
            }
        }
    }

    out.push('\n');
    out.push_str(&format!(
        "{}\n",
        "Expected record shape (required fields):".bold()
    ));
    out.push_str(&render_example(failure.entity, failure.operation));
    out.push('\n');
    out.push_str(&help_pointer(program, failure.entity, failure.operation));
    out
}

/// Render the canonical example for an entity type as pretty JSON.
pub fn render_example(entity: EntityType, operation: Operation) -> String {
    serde_json::to_string_pretty(&example(entity, operation)).unwrap_or_default()
}

/// Render the discriminant rules of an entity type, one line per value.
pub fn render_rules(entity: EntityType, operation: Operation) -> String {
    let Some(table) = spec_for(entity).discriminant else {
        return String::new();
    };

    let mut out = format!("{}\n", format!("Rules by {}:", table.field).bold());
    for rule in table
        .rules
        .iter()
        .filter(|r| r.legal_on.contains(operation))
    {
        let line = describe_rule(table.field, rule, operation)
            .unwrap_or_else(|| format!("{} \"{}\": no additional fields", table.field, rule.value));
        out.push_str(&format!("  {}\n", line));
    }
    for group in spec_for(entity).groups {
        out.push_str(&format!(
            "  {} fields go together: {}\n",
            group.name,
            group.members.join(", ")
        ));
    }
    out
}

fn describe_rule(field: &str, rule: &BusinessRule, operation: Operation) -> Option<String> {
    let mut parts = Vec::new();
    if !rule.requires.is_empty() {
        parts.push(format!("requires {}", rule.requires.join(", ")));
    }
    if !rule.forbids.is_empty() {
        parts.push(format!("must not include {}", rule.forbids.join(", ")));
    }
    if rule.rejected_on.contains(operation) {
        parts.push(rule.reason.to_string());
    }
    if parts.is_empty() {
        return None;
    }
    Some(format!(
        "{} \"{}\" {}",
        field,
        rule.value.cyan(),
        parts.join("; ")
    ))
}

fn help_pointer(program: &str, entity: EntityType, operation: Operation) -> String {
    format!(
        "Run `{} {} {} --help` for all accepted fields, or `{} example {} --op {}`.\n",
        program,
        operation.command_name(),
        entity,
        program,
        entity,
        operation
    )
}

/// Render an input loading failure.
pub fn render_load_error(error: &LoadError) -> String {
    format!("{} {}\n", "✗ malformed input:".red().bold(), error)
}

/// Render a registry transport failure.
pub fn render_transport_error(error: &TransportError) -> String {
    match error.status() {
        Some(status) => format!(
            "{} {} {}\n",
            "✗ registry request failed".red().bold(),
            format!("[{}]", status).yellow(),
            error
        ),
        None => format!("{} {}\n", "✗ registry request failed:".red().bold(), error),
    }
}
