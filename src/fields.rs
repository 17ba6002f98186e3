//! Static field metadata for every entity type.
//!
//! Each entity type is described entirely by data: which fields are required,
//! conditional or optional, which nested objects are re-materialized, which
//! discriminant selects additional business rules, and which fields form
//! all-or-nothing groups. Adding an entity type means adding an [`EntitySpec`].

use serde_json::{json, Value};

use crate::types::{EntityType, Operation, OperationSet};

/// How a field participates in composition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldClass {
    /// Must be present in the record.
    Required,
    /// Copied when present. With a companion, only copied when the companion
    /// is populated as well.
    Conditional { companion: Option<&'static str> },
    /// Copied when present.
    Optional,
}

/// Metadata for one recognized field.
#[derive(Debug, Clone, Copy)]
pub struct FieldSpec {
    pub name: &'static str,
    pub class: FieldClass,
    pub operations: OperationSet,
}

impl FieldSpec {
    pub const fn required(name: &'static str) -> Self {
        Self::required_on(name, OperationSet::ALL)
    }

    pub const fn required_on(name: &'static str, operations: OperationSet) -> Self {
        Self {
            name,
            class: FieldClass::Required,
            operations,
        }
    }

    pub const fn conditional(name: &'static str) -> Self {
        Self {
            name,
            class: FieldClass::Conditional { companion: None },
            operations: OperationSet::ALL,
        }
    }

    pub const fn companion(name: &'static str, companion: &'static str) -> Self {
        Self {
            name,
            class: FieldClass::Conditional {
                companion: Some(companion),
            },
            operations: OperationSet::ALL,
        }
    }

    pub const fn optional(name: &'static str) -> Self {
        Self::optional_on(name, OperationSet::ALL)
    }

    pub const fn optional_on(name: &'static str, operations: OperationSet) -> Self {
        Self {
            name,
            class: FieldClass::Optional,
            operations,
        }
    }

    pub fn applies_to(&self, operation: Operation) -> bool {
        self.operations.contains(operation)
    }

    pub fn is_required(&self) -> bool {
        self.class == FieldClass::Required
    }

    pub fn is_conditional(&self) -> bool {
        matches!(self.class, FieldClass::Conditional { .. })
    }

    pub fn is_optional(&self) -> bool {
        self.class == FieldClass::Optional
    }
}

/// Shape of a nested value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NestedKind {
    Object,
    List,
}

/// A nested object or list of objects that is rebuilt field-by-field.
#[derive(Debug, Clone, Copy)]
pub struct NestedSpec {
    pub field: &'static str,
    pub kind: NestedKind,
    pub fields: &'static [FieldSpec],
    pub nested: &'static [NestedSpec],
    /// Minimum number of items for lists.
    pub min_items: usize,
}

/// Additional constraints selected by one discriminant value.
#[derive(Debug, Clone, Copy)]
pub struct BusinessRule {
    pub value: &'static str,
    /// Operations on which the value is recognized at all.
    pub legal_on: OperationSet,
    /// Operations on which a recognized value is refused outright.
    pub rejected_on: OperationSet,
    pub reason: &'static str,
    pub requires: &'static [&'static str],
    pub forbids: &'static [&'static str],
}

impl BusinessRule {
    const fn new(value: &'static str) -> Self {
        Self {
            value,
            legal_on: OperationSet::ALL,
            rejected_on: OperationSet::NONE,
            reason: "",
            requires: &[],
            forbids: &[],
        }
    }

    const fn requires(mut self, fields: &'static [&'static str]) -> Self {
        self.requires = fields;
        self
    }

    const fn forbids(mut self, fields: &'static [&'static str]) -> Self {
        self.forbids = fields;
        self
    }

    const fn legal_on(mut self, operations: OperationSet) -> Self {
        self.legal_on = operations;
        self
    }

    const fn rejected_on(mut self, operations: OperationSet, reason: &'static str) -> Self {
        self.rejected_on = operations;
        self.reason = reason;
        self
    }
}

/// Discriminant field and the rule for each of its legal values.
#[derive(Debug, Clone, Copy)]
pub struct DiscriminantTable {
    pub field: &'static str,
    pub rules: &'static [BusinessRule],
}

impl DiscriminantTable {
    /// Legal values for an operation, in declaration order.
    pub fn legal_values(&self, operation: Operation) -> Vec<&'static str> {
        self.rules
            .iter()
            .filter(|r| r.legal_on.contains(operation))
            .map(|r| r.value)
            .collect()
    }
}

/// Fields that must be supplied together or not at all.
#[derive(Debug, Clone, Copy)]
pub struct FieldGroup {
    pub name: &'static str,
    pub members: &'static [&'static str],
}

/// Complete composition metadata for one entity type.
#[derive(Debug)]
pub struct EntitySpec {
    pub entity: EntityType,
    pub fields: &'static [FieldSpec],
    pub nested: &'static [NestedSpec],
    pub discriminant: Option<&'static DiscriminantTable>,
    pub groups: &'static [FieldGroup],
}

impl EntitySpec {
    /// Required fields for an operation, in declaration order.
    pub fn required(&self, operation: Operation) -> impl Iterator<Item = &FieldSpec> {
        self.fields
            .iter()
            .filter(move |f| f.is_required() && f.applies_to(operation))
    }

    pub fn nested_spec(&self, field: &str) -> Option<&'static NestedSpec> {
        self.nested.iter().find(|n| n.field == field)
    }
}

/// Returns the field table for an entity type.
pub fn spec_for(entity: EntityType) -> &'static EntitySpec {
    match entity {
        EntityType::Poams => &POAMS,
        EntityType::Controls => &CONTROLS,
        EntityType::Hardware => &HARDWARE,
        EntityType::Software => &SOFTWARE,
        EntityType::Artifacts => &ARTIFACTS,
        EntityType::CloudResources => &CLOUD_RESOURCES,
        EntityType::ContainerScans => &CONTAINER_SCANS,
        EntityType::StaticScans => &STATIC_SCANS,
    }
}

// --- Plan-of-action items ---

const POC_FIELDS: &[&str] = &["pocFirstName", "pocLastName", "pocEmail", "pocPhoneNumber"];

static MILESTONE_FIELDS: [FieldSpec; 3] = [
    FieldSpec::optional_on("milestoneId", OperationSet::UPDATE),
    FieldSpec::required("description"),
    FieldSpec::required("scheduledCompletionDate"),
];

static POAM_NESTED: [NestedSpec; 1] = [NestedSpec {
    field: "milestones",
    kind: NestedKind::List,
    fields: &MILESTONE_FIELDS,
    nested: &[],
    min_items: 0,
}];

static POAM_STATUS: DiscriminantTable = DiscriminantTable {
    field: "status",
    rules: &[
        BusinessRule::new("Ongoing").requires(&["scheduledCompletionDate", "milestones"]),
        BusinessRule::new("Risk Accepted")
            .requires(&["comments"])
            .forbids(&["scheduledCompletionDate", "milestones"]),
        BusinessRule::new("Completed").requires(&[
            "scheduledCompletionDate",
            "comments",
            "completionDate",
            "milestones",
        ]),
        BusinessRule::new("Not Applicable").rejected_on(
            OperationSet::ADD,
            "the registry does not allow items to be created as Not Applicable",
        ),
        BusinessRule::new("Archived")
            .legal_on(OperationSet::UPDATE)
            .rejected_on(
                OperationSet::UPDATE,
                "archived items are read-only in the registry",
            ),
    ],
};

static POAM_FIELDS: [FieldSpec; 44] = [
    FieldSpec::required_on("poamId", OperationSet::UPDATE),
    FieldSpec::required_on("displayPoamId", OperationSet::UPDATE),
    FieldSpec::required("status"),
    FieldSpec::required("vulnerabilityDescription"),
    FieldSpec::required("sourceIdentifyingVulnerability"),
    FieldSpec::required("pocOrganization"),
    FieldSpec::required("resources"),
    FieldSpec::conditional("milestones"),
    FieldSpec::conditional("pocFirstName"),
    FieldSpec::conditional("pocLastName"),
    FieldSpec::conditional("pocEmail"),
    FieldSpec::conditional("pocPhoneNumber"),
    FieldSpec::conditional("severity"),
    FieldSpec::conditional("scheduledCompletionDate"),
    FieldSpec::conditional("completionDate"),
    FieldSpec::conditional("comments"),
    FieldSpec::companion("impactDescription", "impact"),
    FieldSpec::companion(
        "resultingResidualRiskLevelAfterProposedMitigations",
        "mitigations",
    ),
    FieldSpec::optional_on("isActive", OperationSet::UPDATE),
    FieldSpec::optional("externalUid"),
    FieldSpec::optional("controlAcronym"),
    FieldSpec::optional("assessmentProcedure"),
    FieldSpec::optional("securityChecks"),
    FieldSpec::optional("rawSeverity"),
    FieldSpec::optional("relevanceOfThreat"),
    FieldSpec::optional("likelihood"),
    FieldSpec::optional("impact"),
    FieldSpec::optional("residualRiskLevel"),
    FieldSpec::optional("recommendations"),
    FieldSpec::optional("mitigations"),
    FieldSpec::optional("predisposingConditions"),
    FieldSpec::optional("threatDescription"),
    FieldSpec::optional("devicesAffected"),
    FieldSpec::optional("identifiedInCFOAuditOrOtherReview"),
    FieldSpec::optional("personnelResourcesFundedBaseHours"),
    FieldSpec::optional("personnelResourcesCostCode"),
    FieldSpec::optional("personnelResourcesUnfundedBaseHours"),
    FieldSpec::optional("personnelResourcesNonfundingObstacle"),
    FieldSpec::optional("personnelResourcesNonfundingObstacleOtherReason"),
    FieldSpec::optional("nonPersonnelResourcesFundedAmount"),
    FieldSpec::optional("nonPersonnelResourcesCostCode"),
    FieldSpec::optional("nonPersonnelResourcesUnfundedAmount"),
    FieldSpec::optional("nonPersonnelResourcesNonfundingObstacle"),
    FieldSpec::optional("nonPersonnelResourcesNonfundingObstacleOtherReason"),
];

static POAMS: EntitySpec = EntitySpec {
    entity: EntityType::Poams,
    fields: &POAM_FIELDS,
    nested: &POAM_NESTED,
    discriminant: Some(&POAM_STATUS),
    groups: &[FieldGroup {
        name: "point of contact",
        members: POC_FIELDS,
    }],
};

// --- Security controls ---

const SLCM_FIELDS: [&str; 6] = [
    "slcmCriticality",
    "slcmFrequency",
    "slcmMethod",
    "slcmReporting",
    "slcmTracking",
    "slcmComments",
];

static CONTROL_FIELDS: [FieldSpec; 26] = [
    FieldSpec::required("acronym"),
    FieldSpec::required("implementationStatus"),
    FieldSpec::conditional("responsibleEntities"),
    FieldSpec::conditional("controlDesignation"),
    FieldSpec::conditional("estimatedCompletionDate"),
    FieldSpec::conditional("implementationNarrative"),
    FieldSpec::conditional("commonControlProvider"),
    FieldSpec::conditional("naJustification"),
    FieldSpec::conditional(SLCM_FIELDS[0]),
    FieldSpec::conditional(SLCM_FIELDS[1]),
    FieldSpec::conditional(SLCM_FIELDS[2]),
    FieldSpec::conditional(SLCM_FIELDS[3]),
    FieldSpec::conditional(SLCM_FIELDS[4]),
    FieldSpec::conditional(SLCM_FIELDS[5]),
    FieldSpec::optional("severity"),
    FieldSpec::optional("recommendations"),
    FieldSpec::optional("relevanceOfThreat"),
    FieldSpec::optional("likelihood"),
    FieldSpec::optional("impact"),
    FieldSpec::optional("impactDescription"),
    FieldSpec::optional("residualRiskLevel"),
    FieldSpec::optional("testMethod"),
    FieldSpec::optional("mitigations"),
    FieldSpec::optional("applicationLayer"),
    FieldSpec::optional("databaseLayer"),
    FieldSpec::optional("operatingSystemLayer"),
];

static CONTROL_STATUS: DiscriminantTable = DiscriminantTable {
    field: "implementationStatus",
    rules: &[
        BusinessRule::new("Planned").requires(&[
            "responsibleEntities",
            "controlDesignation",
            "estimatedCompletionDate",
            "implementationNarrative",
            "slcmCriticality",
            "slcmFrequency",
            "slcmMethod",
            "slcmReporting",
            "slcmTracking",
            "slcmComments",
        ]),
        BusinessRule::new("Implemented").requires(&[
            "responsibleEntities",
            "controlDesignation",
            "estimatedCompletionDate",
            "implementationNarrative",
            "slcmCriticality",
            "slcmFrequency",
            "slcmMethod",
            "slcmReporting",
            "slcmTracking",
            "slcmComments",
        ]),
        BusinessRule::new("Not Applicable").requires(&[
            "naJustification",
            "controlDesignation",
            "responsibleEntities",
        ]),
        BusinessRule::new("Manually Inherited").requires(&[
            "commonControlProvider",
            "controlDesignation",
            "estimatedCompletionDate",
            "responsibleEntities",
            "implementationNarrative",
            "slcmCriticality",
            "slcmFrequency",
            "slcmMethod",
            "slcmReporting",
            "slcmTracking",
            "slcmComments",
        ]),
        // Only the designation and provider can change on inherited controls.
        BusinessRule::new("Inherited").forbids(&[
            "responsibleEntities",
            "estimatedCompletionDate",
            "implementationNarrative",
            "naJustification",
            "slcmCriticality",
            "slcmFrequency",
            "slcmMethod",
            "slcmReporting",
            "slcmTracking",
            "slcmComments",
            "severity",
            "recommendations",
            "relevanceOfThreat",
            "likelihood",
            "impact",
            "impactDescription",
            "residualRiskLevel",
            "testMethod",
            "mitigations",
            "applicationLayer",
            "databaseLayer",
            "operatingSystemLayer",
        ]),
    ],
};

static CONTROLS: EntitySpec = EntitySpec {
    entity: EntityType::Controls,
    fields: &CONTROL_FIELDS,
    nested: &[],
    discriminant: Some(&CONTROL_STATUS),
    groups: &[FieldGroup {
        name: "risk assessment",
        members: &["severity", "relevanceOfThreat", "likelihood", "impact"],
    }],
};

// --- Hardware baseline ---

static HARDWARE_FIELDS: [FieldSpec; 18] = [
    FieldSpec::required_on("hardwareId", OperationSet::UPDATE),
    FieldSpec::required("assetName"),
    FieldSpec::companion("publicFacingFqdn", "publicFacing"),
    FieldSpec::companion("publicFacingIpAddress", "publicFacing"),
    FieldSpec::companion("publicFacingUrls", "publicFacing"),
    FieldSpec::optional("componentType"),
    FieldSpec::optional("nickname"),
    FieldSpec::optional("assetIpAddress"),
    FieldSpec::optional("publicFacing"),
    FieldSpec::optional("virtualAsset"),
    FieldSpec::optional("manufacturer"),
    FieldSpec::optional("modelNumber"),
    FieldSpec::optional("serialNumber"),
    FieldSpec::optional("OsIosFwVersion"),
    FieldSpec::optional("memorySizeType"),
    FieldSpec::optional("location"),
    FieldSpec::optional("approvalStatus"),
    FieldSpec::optional("criticalAsset"),
];

static HARDWARE: EntitySpec = EntitySpec {
    entity: EntityType::Hardware,
    fields: &HARDWARE_FIELDS,
    nested: &[],
    discriminant: None,
    groups: &[],
};

// --- Software baseline ---

static SOFTWARE_FIELDS: [FieldSpec; 36] = [
    FieldSpec::required_on("softwareId", OperationSet::UPDATE),
    FieldSpec::required("softwareVendor"),
    FieldSpec::required("softwareName"),
    FieldSpec::required("version"),
    FieldSpec::companion("extendedEndOfLifeSupportDate", "endOfLifeSupportDate"),
    FieldSpec::companion("totalLicenseCost", "costPerLicense"),
    FieldSpec::optional("softwareType"),
    FieldSpec::optional("parentSystem"),
    FieldSpec::optional("subsystem"),
    FieldSpec::optional("network"),
    FieldSpec::optional("hostingEnvironment"),
    FieldSpec::optional("softwareDependencies"),
    FieldSpec::optional("cryptographicHash"),
    FieldSpec::optional("inServiceDate"),
    FieldSpec::optional("itBudgetUii"),
    FieldSpec::optional("fiscalYear"),
    FieldSpec::optional("popEndDate"),
    FieldSpec::optional("licenseOrContract"),
    FieldSpec::optional("licenseTerm"),
    FieldSpec::optional("costPerLicense"),
    FieldSpec::optional("totalLicenses"),
    FieldSpec::optional("licensesUsed"),
    FieldSpec::optional("licensePoc"),
    FieldSpec::optional("licenseRenewalDate"),
    FieldSpec::optional("licenseExpirationDate"),
    FieldSpec::optional("approvalStatus"),
    FieldSpec::optional("approvalDate"),
    FieldSpec::optional("releaseDate"),
    FieldSpec::optional("maintenanceDate"),
    FieldSpec::optional("retirementDate"),
    FieldSpec::optional("endOfLifeSupportDate"),
    FieldSpec::optional("criticalAsset"),
    FieldSpec::optional("location"),
    FieldSpec::optional("purpose"),
    FieldSpec::optional("unsupportedOperatingSystem"),
    FieldSpec::optional("unapprovedSoftwareFromTrm"),
];

static SOFTWARE: EntitySpec = EntitySpec {
    entity: EntityType::Software,
    fields: &SOFTWARE_FIELDS,
    nested: &[],
    discriminant: None,
    groups: &[],
};

// --- Artifacts ---

static ARTIFACT_FIELDS: [FieldSpec; 12] = [
    FieldSpec::required("filename"),
    FieldSpec::required("isTemplate"),
    FieldSpec::required("type"),
    FieldSpec::required("category"),
    FieldSpec::optional("name"),
    FieldSpec::optional("description"),
    FieldSpec::optional("referencePage"),
    FieldSpec::optional("controls"),
    FieldSpec::optional("assessmentProcedures"),
    FieldSpec::optional("expirationDate"),
    FieldSpec::optional("lastReviewedDate"),
    FieldSpec::optional("signedDate"),
];

static ARTIFACTS: EntitySpec = EntitySpec {
    entity: EntityType::Artifacts,
    fields: &ARTIFACT_FIELDS,
    nested: &[],
    discriminant: None,
    groups: &[],
};

// --- Cloud resource results ---

static COMPLIANCE_RESULT_FIELDS: [FieldSpec; 10] = [
    FieldSpec::required("cspPolicyDefinitionId"),
    FieldSpec::required("isCompliant"),
    FieldSpec::required("policyDefinitionTitle"),
    FieldSpec::optional("assessmentProcedure"),
    FieldSpec::optional("complianceCheckTitle"),
    FieldSpec::optional("complianceReason"),
    FieldSpec::optional("control"),
    FieldSpec::optional("policyDeploymentName"),
    FieldSpec::optional("policyDeploymentVersion"),
    FieldSpec::optional("severity"),
];

static CLOUD_RESOURCE_FIELDS: [FieldSpec; 10] = [
    FieldSpec::required("provider"),
    FieldSpec::required("resourceId"),
    FieldSpec::required("resourceName"),
    FieldSpec::required("resourceType"),
    FieldSpec::required("complianceResults"),
    FieldSpec::optional("cspAccountId"),
    FieldSpec::optional("cspRegion"),
    FieldSpec::optional("initiatedBy"),
    FieldSpec::optional("isBaseline"),
    FieldSpec::optional("tags"),
];

static CLOUD_RESOURCES: EntitySpec = EntitySpec {
    entity: EntityType::CloudResources,
    fields: &CLOUD_RESOURCE_FIELDS,
    nested: &[NestedSpec {
        field: "complianceResults",
        kind: NestedKind::List,
        fields: &COMPLIANCE_RESULT_FIELDS,
        nested: &[],
        min_items: 1,
    }],
    discriminant: None,
    groups: &[],
};

// --- Container scan results ---

static BENCHMARK_RESULT_FIELDS: [FieldSpec; 4] = [
    FieldSpec::required("ruleId"),
    FieldSpec::required("status"),
    FieldSpec::required("lastSeen"),
    FieldSpec::optional("message"),
];

static BENCHMARK_FIELDS: [FieldSpec; 5] = [
    FieldSpec::required("benchmark"),
    FieldSpec::required("results"),
    FieldSpec::optional("isBaseline"),
    FieldSpec::optional("version"),
    FieldSpec::optional("release"),
];

static CONTAINER_FIELDS: [FieldSpec; 8] = [
    FieldSpec::required("containerId"),
    FieldSpec::required("containerName"),
    FieldSpec::required("time"),
    FieldSpec::required("benchmarks"),
    FieldSpec::optional("namespace"),
    FieldSpec::optional("podIp"),
    FieldSpec::optional("podName"),
    FieldSpec::optional("tags"),
];

static CONTAINER_SCANS: EntitySpec = EntitySpec {
    entity: EntityType::ContainerScans,
    fields: &CONTAINER_FIELDS,
    nested: &[NestedSpec {
        field: "benchmarks",
        kind: NestedKind::List,
        fields: &BENCHMARK_FIELDS,
        nested: &[NestedSpec {
            field: "results",
            kind: NestedKind::List,
            fields: &BENCHMARK_RESULT_FIELDS,
            nested: &[],
            min_items: 1,
        }],
        min_items: 1,
    }],
    discriminant: None,
    groups: &[],
};

// --- Static code scan findings ---

static APPLICATION_FIELDS: [FieldSpec; 2] = [
    FieldSpec::required("applicationName"),
    FieldSpec::required("version"),
];

static FINDING_FIELDS: [FieldSpec; 5] = [
    FieldSpec::required("codeCheckName"),
    FieldSpec::required("scanDate"),
    FieldSpec::required("cweId"),
    FieldSpec::optional("count"),
    FieldSpec::optional("rawSeverity"),
];

static STATIC_SCANS: EntitySpec = EntitySpec {
    entity: EntityType::StaticScans,
    fields: &[
        FieldSpec::required("application"),
        FieldSpec::required("applicationFindings"),
    ],
    nested: &[
        NestedSpec {
            field: "application",
            kind: NestedKind::Object,
            fields: &APPLICATION_FIELDS,
            nested: &[],
            min_items: 0,
        },
        NestedSpec {
            field: "applicationFindings",
            kind: NestedKind::List,
            fields: &FINDING_FIELDS,
            nested: &[],
            min_items: 1,
        },
    ],
    discriminant: None,
    groups: &[],
};

/// Canonical example document for an entity type and operation.
///
/// Shows the required fields with representative values; rendered in
/// diagnostics and by the `example` command.
pub fn example(entity: EntityType, operation: Operation) -> Value {
    let mut doc = match entity {
        EntityType::Poams => json!({
            "status": "Ongoing",
            "vulnerabilityDescription": "Vulnerability description for the POA&M item",
            "sourceIdentifyingVulnerability": "Source that identified the vulnerability",
            "pocOrganization": "Organization responsible for the item",
            "resources": "Resources required to remediate",
            "scheduledCompletionDate": 1767225600,
            "milestones": [
                {
                    "description": "Milestone description",
                    "scheduledCompletionDate": 1767225600
                }
            ]
        }),
        EntityType::Controls => json!({
            "acronym": "AC-3",
            "implementationStatus": "Planned",
            "responsibleEntities": "Entities responsible for the control",
            "controlDesignation": "Common",
            "estimatedCompletionDate": 1767225600,
            "implementationNarrative": "How the control is implemented",
            "slcmCriticality": "Criticality of the control",
            "slcmFrequency": "Annually",
            "slcmMethod": "Automated",
            "slcmReporting": "Reporting method",
            "slcmTracking": "Tracking method",
            "slcmComments": "Continuous monitoring comments"
        }),
        EntityType::Hardware => json!({
            "assetName": "web01.example.mil"
        }),
        EntityType::Software => json!({
            "softwareVendor": "Vendor",
            "softwareName": "Product",
            "version": "1.0.0"
        }),
        EntityType::Artifacts => json!({
            "filename": "ssp.pdf",
            "isTemplate": false,
            "type": "Procedure",
            "category": "Evidence"
        }),
        EntityType::CloudResources => json!({
            "provider": "azure",
            "resourceId": "/subscriptions/0000/resourceGroups/rg/providers/vm/app01",
            "resourceName": "app01",
            "resourceType": "Microsoft.Compute/VirtualMachines",
            "complianceResults": [
                {
                    "cspPolicyDefinitionId": "/providers/policyDefinitions/0001",
                    "isCompliant": true,
                    "policyDefinitionTitle": "Disk encryption should be enabled"
                }
            ]
        }),
        EntityType::ContainerScans => json!({
            "containerId": "container-0001",
            "containerName": "api",
            "time": 1700000000,
            "benchmarks": [
                {
                    "benchmark": "RHEL_8_STIG",
                    "results": [
                        {
                            "ruleId": "SV-230221r743913_rule",
                            "status": "Pass",
                            "lastSeen": 1700000000
                        }
                    ]
                }
            ]
        }),
        EntityType::StaticScans => json!({
            "application": {
                "applicationName": "payments",
                "version": "2.4.1"
            },
            "applicationFindings": [
                {
                    "codeCheckName": "SQL Injection",
                    "scanDate": 1700000000,
                    "cweId": "89"
                }
            ]
        }),
    };

    // Identifiers lead the update document.
    if operation == Operation::Update {
        if let Value::Object(map) = &mut doc {
            let mut with_ids = serde_json::Map::new();
            match entity {
                EntityType::Poams => {
                    with_ids.insert("poamId".into(), json!(45));
                    with_ids.insert("displayPoamId".into(), json!(100));
                }
                EntityType::Hardware => {
                    with_ids.insert("hardwareId".into(), json!("0000-1111-2222"));
                }
                EntityType::Software => {
                    with_ids.insert("softwareId".into(), json!("0000-3333-4444"));
                }
                _ => {}
            }
            with_ids.append(map);
            *map = with_ids;
        }
    }

    doc
}
