//! Registry request composer
//!
//! Client-side composition, validation and response shaping for the bulk
//! write endpoints of a compliance registry API.
//!
//! Operator input is loosely-typed JSON. Each record is composed into a
//! strictly-shaped request body by a fixed pipeline, driven entirely by
//! per-entity data tables:
//!
//! | Stage | Effect |
//! |-------|--------|
//! | required | copy required fields, fail on the first absent one |
//! | business rules | check the discriminant rule and all-or-nothing groups, rebuild nested lists |
//! | conditional | copy conditional fields that are present |
//! | optional | copy optional fields that are present, drop unknown keys |
//!
//! A batch is all-or-nothing: one failing record aborts submission.
//!
//! # Example
//!
//! ```
//! use registry_composer::{validate_batch, EntityType, Operation};
//! use serde_json::json;
//!
//! let record = json!({
//!     "status": "Risk Accepted",
//!     "vulnerabilityDescription": "Legacy cipher suites enabled",
//!     "sourceIdentifyingVulnerability": "ACAS",
//!     "pocOrganization": "Ops",
//!     "resources": "None",
//!     "comments": "Accepted by the authorizing official",
//!     "milestones": [{ "description": "x", "scheduledCompletionDate": 1700000000 }]
//! });
//! let records = vec![record.as_object().unwrap().clone()];
//!
//! // Risk-accepted items cannot carry milestones
//! let failure = validate_batch(EntityType::Poams, Operation::Add, &records).unwrap_err();
//! assert_eq!(failure.index, 0);
//! assert_eq!(failure.error.field_names(), vec!["milestones"]);
//! ```
//!
//! Responses are shaped for display by [`normalize`]:
//!
//! ```
//! use registry_composer::{normalize, DisplayConfig};
//! use serde_json::json;
//!
//! let response = json!({ "data": { "poamId": 1, "completionDate": null } });
//! let shown = normalize(&response, &DisplayConfig::default());
//! assert_eq!(shown, json!({ "data": { "poamId": 1 } }));
//! ```

mod client;
mod compose;
mod config;
mod error;
mod fields;
mod loader;
mod normalize;
mod report;
mod rules;
mod types;
mod validator;

pub use client::{submit_batch, RegistryApi};
pub use compose::{compose_conditional, compose_optional, compose_required, materialize_nested};
pub use config::{DisplayConfig, RegistryConfig};
pub use error::{
    ComposeError, ConfigError, LoadError, SubmitError, TransportError, ValidationFailure,
};
pub use fields::{
    example, spec_for, BusinessRule, DiscriminantTable, EntitySpec, FieldClass, FieldGroup,
    FieldSpec, NestedKind, NestedSpec,
};
pub use loader::{
    load_json, load_json_str, load_records, load_records_async, load_records_str, parse_records,
};
pub use normalize::{normalize, render_epoch_dates, suppress_nulls, unwrap_envelope};
pub use report::{
    render_example, render_failure, render_load_error, render_rules, render_transport_error,
};
pub use rules::{rule_for, RuleOutcome};
pub use types::{json_type_name, Draft, EntityType, Operation, OperationSet, RawRecord};
pub use validator::{compose_record, validate_batch};

/// Business rule evaluation, exposed for callers that check records
/// without composing them.
pub mod business_rules {
    pub use crate::rules::{apply, evaluate};
}

#[cfg(feature = "remote")]
pub use client::HttpRegistry;
