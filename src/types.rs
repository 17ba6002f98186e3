//! Core types for request composition.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// An untyped record read from an operator input file.
pub type RawRecord = Map<String, Value>;

/// Returns the JSON type name for error messages.
pub fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Returns true if the record carries a usable value for `field`.
///
/// A key mapped to `null` or to an empty array is treated as absent.
pub fn is_populated(record: &RawRecord, field: &str) -> bool {
    match record.get(field) {
        None | Some(Value::Null) => false,
        Some(Value::Array(items)) => !items.is_empty(),
        Some(_) => true,
    }
}

/// Mutating registry operation.
///
/// `Add` is sent as a bulk POST, `Update` as a bulk PUT.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Operation {
    Add,
    Update,
}

impl Operation {
    /// HTTP verb used for the bulk call.
    pub fn http_verb(&self) -> &'static str {
        match self {
            Operation::Add => "POST",
            Operation::Update => "PUT",
        }
    }

    /// CLI subcommand that performs this operation.
    pub fn command_name(&self) -> &'static str {
        match self {
            Operation::Add => "post",
            Operation::Update => "put",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operation::Add => f.write_str("add"),
            Operation::Update => f.write_str("update"),
        }
    }
}

/// Set of operations a field, rule or entity applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OperationSet {
    add: bool,
    update: bool,
}

impl OperationSet {
    pub const NONE: Self = Self {
        add: false,
        update: false,
    };
    pub const ADD: Self = Self {
        add: true,
        update: false,
    };
    pub const UPDATE: Self = Self {
        add: false,
        update: true,
    };
    pub const ALL: Self = Self {
        add: true,
        update: true,
    };

    pub fn contains(&self, operation: Operation) -> bool {
        match operation {
            Operation::Add => self.add,
            Operation::Update => self.update,
        }
    }
}

/// Registry entity types that accept write requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EntityType {
    /// Plan-of-action and milestones items.
    Poams,
    /// Security control implementation details.
    Controls,
    /// Hardware baseline assets.
    Hardware,
    /// Software baseline assets.
    Software,
    /// Artifact metadata.
    Artifacts,
    /// Cloud resource compliance results.
    CloudResources,
    /// Container benchmark scan results.
    ContainerScans,
    /// Static code analysis findings.
    StaticScans,
}

impl EntityType {
    pub const ALL: [EntityType; 8] = [
        EntityType::Poams,
        EntityType::Controls,
        EntityType::Hardware,
        EntityType::Software,
        EntityType::Artifacts,
        EntityType::CloudResources,
        EntityType::ContainerScans,
        EntityType::StaticScans,
    ];

    /// Name used on the command line.
    pub fn cli_name(&self) -> &'static str {
        match self {
            EntityType::Poams => "poams",
            EntityType::Controls => "controls",
            EntityType::Hardware => "hardware",
            EntityType::Software => "software",
            EntityType::Artifacts => "artifacts",
            EntityType::CloudResources => "cloud-resources",
            EntityType::ContainerScans => "container-scans",
            EntityType::StaticScans => "static-scans",
        }
    }

    /// Last path segment of the bulk endpoint.
    pub fn path_segment(&self) -> &'static str {
        match self {
            EntityType::Poams => "poams",
            EntityType::Controls => "controls",
            EntityType::Hardware => "hw-baseline",
            EntityType::Software => "sw-baseline",
            EntityType::Artifacts => "artifacts",
            EntityType::CloudResources => "cloud-resource-results",
            EntityType::ContainerScans => "container-scan-results",
            EntityType::StaticScans => "static-code-scans",
        }
    }

    /// Endpoint path for a system.
    pub fn endpoint(&self, system_id: u64) -> String {
        format!("/api/systems/{}/{}", system_id, self.path_segment())
    }

    /// Operations the registry exposes as JSON bulk calls for this entity.
    pub fn operations(&self) -> OperationSet {
        match self {
            EntityType::Poams | EntityType::Hardware | EntityType::Software => OperationSet::ALL,
            EntityType::Controls | EntityType::Artifacts => OperationSet::UPDATE,
            EntityType::CloudResources | EntityType::ContainerScans | EntityType::StaticScans => {
                OperationSet::ADD
            }
        }
    }

    pub fn supports(&self, operation: Operation) -> bool {
        self.operations().contains(operation)
    }
}

impl fmt::Display for EntityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.cli_name())
    }
}

/// Strictly-shaped request body under construction for one record.
///
/// Each composition stage consumes a draft and returns a new one.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Draft {
    fields: Map<String, Value>,
}

impl Draft {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a draft with `field` set to `value`, replacing any previous value.
    pub fn with_field(mut self, field: impl Into<String>, value: Value) -> Self {
        self.fields.insert(field.into(), value);
        self
    }

    /// Returns a draft without `field`.
    pub fn without_field(mut self, field: &str) -> Self {
        self.fields.shift_remove(field);
        self
    }

    pub fn contains(&self, field: &str) -> bool {
        self.fields.contains_key(field)
    }

    pub fn get(&self, field: &str) -> Option<&Value> {
        self.fields.get(field)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    pub fn into_value(self) -> Value {
        Value::Object(self.fields)
    }
}
