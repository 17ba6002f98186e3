//! Batch validation - runs the composition pipeline over every input record.

use crate::compose::{compose_conditional, compose_optional, compose_required};
use crate::error::{ComposeError, ValidationFailure};
use crate::fields::spec_for;
use crate::rules;
use crate::types::{Draft, EntityType, Operation, RawRecord};

/// Compose one record into a request body.
///
/// Stages run in a fixed order: required fields, business rules,
/// conditional fields, optional fields.
///
/// # Errors
///
/// Returns the first `ComposeError` raised by any stage.
pub fn compose_record(
    entity: EntityType,
    operation: Operation,
    record: &RawRecord,
) -> Result<Draft, ComposeError> {
    if !entity.supports(operation) {
        return Err(ComposeError::UnsupportedOperation { entity, operation });
    }
    let spec = spec_for(entity);

    let draft = compose_required(spec, operation, record)?;
    let outcome = rules::evaluate(spec, operation, record)?;
    let draft = rules::apply(spec, operation, record, &outcome, draft)?;
    let draft = compose_conditional(spec, operation, record, draft);
    let draft = compose_optional(spec, operation, record, draft);

    Ok(outcome.strip_forbidden(draft))
}

/// Validate every record of a batch, in input order.
///
/// The batch is all-or-nothing: the first failing record aborts validation
/// and no drafts are returned, including those already composed.
///
/// # Errors
///
/// Returns `ValidationFailure` for the first record that fails.
pub fn validate_batch(
    entity: EntityType,
    operation: Operation,
    records: &[RawRecord],
) -> Result<Vec<Draft>, ValidationFailure> {
    let discriminant_field = spec_for(entity).discriminant.map(|t| t.field);

    records
        .iter()
        .enumerate()
        .map(|(index, record)| {
            compose_record(entity, operation, record).map_err(|error| {
                let discriminant = discriminant_field
                    .and_then(|field| record.get(field))
                    .and_then(|v| v.as_str())
                    .map(String::from);
                tracing::debug!(index, %error, "record failed validation");
                ValidationFailure {
                    index,
                    entity,
                    operation,
                    discriminant,
                    error,
                }
            })
        })
        .collect()
}
