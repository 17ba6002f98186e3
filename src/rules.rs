//! Business rules keyed on a discriminant field.
//!
//! Rules are data ([`DiscriminantTable`], [`FieldGroup`]); this module only
//! interprets them. [`evaluate`] is a pure check of a raw record and decides
//! which additional fields the record must carry. [`apply`] then materializes
//! those fields, plus every nested value, into the draft.
//!
//! | Step | Failure |
//! |------|---------|
//! | discriminant value not legal for the operation | `UnrecognizedDiscriminant` |
//! | value legal but refused on this operation | `DisallowedState` |
//! | rule-required field not populated, or forbidden field populated | `BusinessRuleViolation` |
//! | all-or-nothing group partially populated | `PartialGroupViolation` |

use crate::compose::materialize_nested;
use crate::error::ComposeError;
use crate::fields::{BusinessRule, EntitySpec};
use crate::types::{is_populated, json_type_name, Draft, Operation, RawRecord};

/// Result of evaluating the business rules for one record.
#[derive(Debug, Clone, Copy, Default)]
pub struct RuleOutcome {
    /// Rule selected by the discriminant, if the entity has one.
    pub rule: Option<&'static BusinessRule>,
}

impl RuleOutcome {
    /// Fields the selected rule adds to the required set.
    pub fn requires(&self) -> &'static [&'static str] {
        self.rule.map(|r| r.requires).unwrap_or(&[])
    }

    /// Fields the selected rule forbids.
    pub fn forbids(&self) -> &'static [&'static str] {
        self.rule.map(|r| r.forbids).unwrap_or(&[])
    }

    /// Remove forbidden fields that slipped into the draft with an empty value.
    pub fn strip_forbidden(&self, draft: Draft) -> Draft {
        self.forbids()
            .iter()
            .fold(draft, |draft, field| draft.without_field(field))
    }
}

/// Look up the rule for a discriminant value on an operation.
///
/// Returns `None` for entities without a discriminant and for values that
/// are not legal on the operation.
pub fn rule_for(
    spec: &EntitySpec,
    operation: Operation,
    value: &str,
) -> Option<&'static BusinessRule> {
    spec.discriminant?
        .rules
        .iter()
        .find(|r| r.value == value && r.legal_on.contains(operation))
}

/// Check a record against the entity's business rules.
///
/// Does not touch any draft and has no side effects.
///
/// # Errors
///
/// Returns the first rule violation found; see the module table.
pub fn evaluate(
    spec: &EntitySpec,
    operation: Operation,
    record: &RawRecord,
) -> Result<RuleOutcome, ComposeError> {
    let mut outcome = RuleOutcome::default();

    if let Some(table) = spec.discriminant {
        let raw = record
            .get(table.field)
            .ok_or_else(|| ComposeError::MissingRequiredField {
                field: table.field.to_string(),
            })?;
        let value = raw.as_str().ok_or_else(|| ComposeError::InvalidShape {
            field: table.field.to_string(),
            expected: "a string".to_string(),
            actual: json_type_name(raw).to_string(),
        })?;

        let rule = rule_for(spec, operation, value).ok_or_else(|| {
            ComposeError::UnrecognizedDiscriminant {
                field: table.field.to_string(),
                value: value.to_string(),
                legal: table
                    .legal_values(operation)
                    .into_iter()
                    .map(String::from)
                    .collect(),
            }
        })?;

        if rule.rejected_on.contains(operation) {
            return Err(ComposeError::DisallowedState {
                field: table.field.to_string(),
                value: value.to_string(),
                operation,
                reason: rule.reason.to_string(),
            });
        }

        let missing: Vec<String> = rule
            .requires
            .iter()
            .filter(|f| !is_populated(record, f))
            .map(|f| f.to_string())
            .collect();
        let forbidden: Vec<String> = rule
            .forbids
            .iter()
            .filter(|f| is_populated(record, f))
            .map(|f| f.to_string())
            .collect();

        if !missing.is_empty() || !forbidden.is_empty() {
            return Err(ComposeError::BusinessRuleViolation {
                field: table.field.to_string(),
                value: value.to_string(),
                missing,
                forbidden,
            });
        }

        outcome.rule = Some(rule);
    }

    for group in spec.groups {
        let missing: Vec<String> = group
            .members
            .iter()
            .filter(|f| !is_populated(record, f))
            .map(|f| f.to_string())
            .collect();
        if !missing.is_empty() && missing.len() < group.members.len() {
            return Err(ComposeError::PartialGroupViolation {
                group: group.name.to_string(),
                missing,
            });
        }
    }

    Ok(outcome)
}

/// Materialize rule-required fields and nested values into the draft.
///
/// Nested values replace any verbatim copy made by the required pass. A
/// `null` under a required nested field fails as an invalid shape.
///
/// # Errors
///
/// Returns the nested-shape errors of [`materialize_nested`].
pub fn apply(
    spec: &EntitySpec,
    operation: Operation,
    record: &RawRecord,
    outcome: &RuleOutcome,
    draft: Draft,
) -> Result<Draft, ComposeError> {
    let mut draft = outcome
        .requires()
        .iter()
        .filter(|f| spec.nested_spec(f).is_none())
        .fold(draft, |draft, field| match record.get(*field) {
            Some(value) => draft.with_field(*field, value.clone()),
            None => draft,
        });

    for nested in spec.nested {
        if outcome.forbids().contains(&nested.field) {
            continue;
        }
        // A null is only skipped where the field may be left out.
        let mandatory = nested.min_items > 0
            || spec
                .fields
                .iter()
                .any(|f| f.name == nested.field && f.is_required() && f.applies_to(operation));
        match record.get(nested.field) {
            None => {}
            Some(serde_json::Value::Null) if !mandatory => {}
            Some(value) => {
                let rebuilt = materialize_nested(nested, operation, value, nested.field)?;
                draft = draft.with_field(nested.field, rebuilt);
            }
        }
    }

    Ok(draft)
}
