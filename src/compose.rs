//! Field composition - copies recognized fields from a raw record into a draft.
//!
//! Three passes run for every record, in this order around the business rules:
//!
//! 1. [`compose_required`] copies the required fields and fails on the first
//!    one that is absent (declaration order, not alphabetical).
//! 2. [`compose_conditional`] copies conditional fields that are present.
//! 3. [`compose_optional`] copies optional fields that are present.
//!
//! Passes 2 and 3 never fail and never overwrite a field that an earlier
//! stage already placed in the draft. Presence is a key test, so `false`,
//! `0` and `""` are copied like any other value.
//!
//! Nested objects and lists ([`NestedSpec`]) are rebuilt field-by-field by
//! [`materialize_nested`], dropping keys the registry does not recognize.

use serde_json::{Map, Value};

use crate::error::ComposeError;
use crate::fields::{EntitySpec, FieldClass, FieldSpec, NestedKind, NestedSpec};
use crate::types::{is_populated, json_type_name, Draft, Operation, RawRecord};

/// Copy required fields verbatim into a fresh draft.
///
/// # Errors
///
/// Returns `ComposeError::MissingRequiredField` naming the first absent field.
pub fn compose_required(
    spec: &EntitySpec,
    operation: Operation,
    record: &RawRecord,
) -> Result<Draft, ComposeError> {
    spec.required(operation)
        .try_fold(Draft::new(), |draft, field| match record.get(field.name) {
            Some(value) => Ok(draft.with_field(field.name, value.clone())),
            None => Err(ComposeError::MissingRequiredField {
                field: field.name.to_string(),
            }),
        })
}

/// Copy conditional fields that are present and not yet in the draft.
///
/// A field with a companion is only copied when the companion is populated.
pub fn compose_conditional(
    spec: &EntitySpec,
    operation: Operation,
    record: &RawRecord,
    draft: Draft,
) -> Draft {
    spec.fields
        .iter()
        .filter(|f| f.is_conditional() && f.applies_to(operation))
        .fold(draft, |draft, field| {
            if let FieldClass::Conditional {
                companion: Some(companion),
            } = field.class
            {
                if record.contains_key(field.name) && !is_populated(record, companion) {
                    tracing::warn!(
                        entity = %spec.entity,
                        field = field.name,
                        companion,
                        "dropping field: its companion field is not set"
                    );
                    return draft;
                }
            }
            copy_if_present(draft, record, field)
        })
}

/// Copy optional fields that are present and not yet in the draft.
///
/// Keys that are not recognized for the entity and operation are dropped.
pub fn compose_optional(
    spec: &EntitySpec,
    operation: Operation,
    record: &RawRecord,
    draft: Draft,
) -> Draft {
    for key in record.keys() {
        let known = spec
            .fields
            .iter()
            .any(|f| f.name == key && f.applies_to(operation));
        if !known {
            tracing::debug!(entity = %spec.entity, field = %key, "dropping unrecognized field");
        }
    }

    spec.fields
        .iter()
        .filter(|f| f.is_optional() && f.applies_to(operation))
        .fold(draft, |draft, field| copy_if_present(draft, record, field))
}

fn copy_if_present(draft: Draft, record: &RawRecord, field: &FieldSpec) -> Draft {
    if draft.contains(field.name) {
        return draft;
    }
    match record.get(field.name) {
        Some(value) => draft.with_field(field.name, value.clone()),
        None => draft,
    }
}

/// Rebuild a nested object or list field-by-field.
///
/// `path` names the value in diagnostics, e.g. `milestones` or
/// `benchmarks[0].results`.
///
/// # Errors
///
/// Returns `ComposeError::InvalidShape` when the value is not an object (or
/// a list of objects), `ComposeError::TooFewItems` for short lists, and
/// `ComposeError::MissingRequiredField` with the nested path for missing
/// item fields.
pub fn materialize_nested(
    nested: &NestedSpec,
    operation: Operation,
    value: &Value,
    path: &str,
) -> Result<Value, ComposeError> {
    match nested.kind {
        NestedKind::Object => {
            let item = value.as_object().ok_or_else(|| ComposeError::InvalidShape {
                field: path.to_string(),
                expected: "an object".to_string(),
                actual: json_type_name(value).to_string(),
            })?;
            materialize_item(nested, operation, item, path)
        }
        NestedKind::List => {
            let items = value.as_array().ok_or_else(|| ComposeError::InvalidShape {
                field: path.to_string(),
                expected: "an array of objects".to_string(),
                actual: json_type_name(value).to_string(),
            })?;
            if items.len() < nested.min_items {
                return Err(ComposeError::TooFewItems {
                    field: path.to_string(),
                    min: nested.min_items,
                });
            }

            let mut result = Vec::with_capacity(items.len());
            for (i, item) in items.iter().enumerate() {
                let item_path = format!("{}[{}]", path, i);
                let object = item.as_object().ok_or_else(|| ComposeError::InvalidShape {
                    field: item_path.clone(),
                    expected: "an object".to_string(),
                    actual: json_type_name(item).to_string(),
                })?;
                result.push(materialize_item(nested, operation, object, &item_path)?);
            }
            Ok(Value::Array(result))
        }
    }
}

fn materialize_item(
    nested: &NestedSpec,
    operation: Operation,
    item: &Map<String, Value>,
    path: &str,
) -> Result<Value, ComposeError> {
    let mut result = Map::new();

    for field in nested.fields.iter().filter(|f| f.applies_to(operation)) {
        let child_path = format!("{}.{}", path, field.name);
        let value = match item.get(field.name) {
            Some(Value::Null) | None if field.is_required() => {
                return Err(ComposeError::MissingRequiredField { field: child_path });
            }
            None => continue,
            Some(value) => value,
        };

        let value = match nested.nested.iter().find(|n| n.field == field.name) {
            Some(child) => materialize_nested(child, operation, value, &child_path)?,
            None => value.clone(),
        };
        result.insert(field.name.to_string(), value);
    }

    Ok(Value::Object(result))
}
