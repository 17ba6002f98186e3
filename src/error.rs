//! Error types for request composition, input loading and registry transport.

use std::path::PathBuf;
use thiserror::Error;

use crate::types::{EntityType, Operation};

/// Errors raised while composing a single record into a request body.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ComposeError {
    #[error("missing required field '{field}'")]
    MissingRequiredField { field: String },

    #[error("unrecognized {field} \"{value}\": expected one of {}", legal.join(", "))]
    UnrecognizedDiscriminant {
        field: String,
        value: String,
        legal: Vec<String>,
    },

    #[error("{field} \"{value}\": {}", describe_rule_violation(missing, forbidden))]
    BusinessRuleViolation {
        field: String,
        value: String,
        missing: Vec<String>,
        forbidden: Vec<String>,
    },

    #[error("{field} \"{value}\" is not accepted on {operation}: {reason}")]
    DisallowedState {
        field: String,
        value: String,
        operation: Operation,
        reason: String,
    },

    #[error("{group} fields must be provided together, missing: {}", missing.join(", "))]
    PartialGroupViolation { group: String, missing: Vec<String> },

    #[error("field '{field}' must be {expected}, got {actual}")]
    InvalidShape {
        field: String,
        expected: String,
        actual: String,
    },

    #[error("'{field}' must contain at least {min} item(s)")]
    TooFewItems { field: String, min: usize },

    #[error("{entity} does not support {operation}")]
    UnsupportedOperation {
        entity: EntityType,
        operation: Operation,
    },
}

fn describe_rule_violation(missing: &[String], forbidden: &[String]) -> String {
    let mut parts = Vec::new();
    if !missing.is_empty() {
        parts.push(format!("missing {}", missing.join(", ")));
    }
    if !forbidden.is_empty() {
        parts.push(format!("must not include {}", forbidden.join(", ")));
    }
    parts.join("; ")
}

impl ComposeError {
    /// Field names the operator has to add or remove to fix the record.
    pub fn field_names(&self) -> Vec<&str> {
        match self {
            Self::MissingRequiredField { field }
            | Self::InvalidShape { field, .. }
            | Self::TooFewItems { field, .. } => vec![field.as_str()],
            Self::UnrecognizedDiscriminant { field, .. } | Self::DisallowedState { field, .. } => {
                vec![field.as_str()]
            }
            Self::BusinessRuleViolation {
                missing, forbidden, ..
            } => missing
                .iter()
                .chain(forbidden.iter())
                .map(String::as_str)
                .collect(),
            Self::PartialGroupViolation { missing, .. } => {
                missing.iter().map(String::as_str).collect()
            }
            Self::UnsupportedOperation { .. } => Vec::new(),
        }
    }
}

/// A record in a batch that failed composition.
///
/// Any failure aborts the whole batch.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("record {index}: {error}")]
pub struct ValidationFailure {
    /// Zero-based position of the record in the input.
    pub index: usize,
    pub entity: EntityType,
    pub operation: Operation,
    /// Discriminant value of the failing record, if it had one.
    pub discriminant: Option<String>,
    #[source]
    pub error: ComposeError,
}

impl ValidationFailure {
    /// Returns the exit code for this error type.
    pub fn exit_code(&self) -> i32 {
        1
    }
}

/// Errors while reading an input file (the malformed-input class).
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("file not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error("cannot read {path}: {source}")]
    ReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid JSON: {source}")]
    InvalidJson {
        #[source]
        source: serde_json::Error,
    },

    #[error("{location} must be a JSON object, got {actual}")]
    NotRecords { location: String, actual: String },

    #[error("input contains no records")]
    EmptyBatch,
}

impl LoadError {
    /// Returns the exit code for this error type.
    pub fn exit_code(&self) -> i32 {
        match self {
            LoadError::FileNotFound { .. } | LoadError::ReadError { .. } => 3,
            _ => 2,
        }
    }
}

/// Errors in process configuration read from the environment.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{name}: expected a boolean (true/false/1/0), got \"{value}\"")]
    InvalidBool { name: String, value: String },

    #[error("{name}: expected a non-negative integer, got \"{value}\"")]
    InvalidNumber { name: String, value: String },

    #[error("{name} is not set")]
    Missing { name: String },
}

impl ConfigError {
    /// Returns the exit code for this error type.
    pub fn exit_code(&self) -> i32 {
        2
    }
}

/// Errors raised by the registry API client.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("registry returned {status}: {message}")]
    Http { status: u16, message: String },

    #[cfg(feature = "remote")]
    #[error("request to {url} failed: {source}")]
    Network {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("cannot decode registry response: {message}")]
    Decode { message: String },
}

impl TransportError {
    /// Returns the exit code for this error type.
    pub fn exit_code(&self) -> i32 {
        4
    }

    /// HTTP status code, when the registry answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            TransportError::Http { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Failure of a validate-then-submit cycle.
#[derive(Debug, Error)]
pub enum SubmitError {
    #[error(transparent)]
    Validation(#[from] ValidationFailure),

    #[error(transparent)]
    Transport(#[from] TransportError),
}

impl SubmitError {
    /// Returns the exit code for this error type.
    pub fn exit_code(&self) -> i32 {
        match self {
            SubmitError::Validation(e) => e.exit_code(),
            SubmitError::Transport(e) => e.exit_code(),
        }
    }
}
