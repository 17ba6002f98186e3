//! CLI integration tests for the registry-composer binary.

use assert_cmd::Command;
use mockito::Matcher;
use predicates::prelude::*;
use serde_json::json;
use std::fs;
use tempfile::TempDir;

const ENV_VARS: [&str; 7] = [
    "REGISTRY_API_URL",
    "REGISTRY_API_KEY",
    "REGISTRY_USER_UID",
    "REGISTRY_TIMEOUT_SECS",
    "REGISTRY_HIDE_NULLS",
    "REGISTRY_EPOCH_TO_DATETIME",
    "REGISTRY_DEBUGGING",
];

// Runs inside `dir` so no stray .env file is picked up
fn cmd(dir: &TempDir) -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("registry-composer"));
    cmd.current_dir(dir.path()).env("NO_COLOR", "1");
    for var in ENV_VARS {
        cmd.env_remove(var);
    }
    cmd
}

fn write_temp_file(dir: &TempDir, name: &str, content: &str) -> std::path::PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, content).unwrap();
    path
}

fn ongoing_poam() -> serde_json::Value {
    json!({
        "status": "Ongoing",
        "vulnerabilityDescription": "Legacy TLS enabled",
        "sourceIdentifyingVulnerability": "ACAS",
        "pocOrganization": "Ops",
        "resources": "One engineer",
        "scheduledCompletionDate": 1767225600,
        "milestones": [
            { "description": "Disable TLS 1.0", "scheduledCompletionDate": 1767225600 }
        ]
    })
}

mod post_command {
    use super::*;

    #[test]
    fn risk_accepted_without_comments_makes_no_call() {
        let dir = TempDir::new().unwrap();
        let file = write_temp_file(&dir, "poams.json", r#"[{"status":"Risk Accepted"}]"#);

        let mut server = mockito::Server::new();
        let mock = server
            .mock("POST", Matcher::Any)
            .expect(0)
            .create();

        cmd(&dir)
            .env("REGISTRY_API_URL", server.url())
            .args(["post", "poams", "--system-id", "35", "--file"])
            .arg(&file)
            .assert()
            .code(1)
            .stderr(predicate::str::contains(
                "missing required field 'vulnerabilityDescription'",
            ))
            .stderr(predicate::str::contains(
                r#"status "Risk Accepted" requires comments"#,
            ))
            .stderr(predicate::str::contains("Expected record shape"));

        mock.assert();
    }

    #[test]
    fn ongoing_submits_one_element_batch() {
        let dir = TempDir::new().unwrap();
        let file = write_temp_file(&dir, "poams.json", &ongoing_poam().to_string());

        let mut server = mockito::Server::new();
        let mock = server
            .mock("POST", "/api/systems/35/poams")
            .match_header("api-key", "secret")
            .match_body(Matcher::Json(json!([ongoing_poam()])))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                r#"{"meta":{"code":200},"data":[{"poamId":101,"systemId":35,"isSuccessful":true,"completionDate":null}]}"#,
            )
            .create();

        cmd(&dir)
            .env("REGISTRY_API_URL", server.url())
            .env("REGISTRY_API_KEY", "secret")
            .args(["post", "poams", "-s", "35", "-f"])
            .arg(&file)
            .assert()
            .success()
            .stdout(predicate::str::contains(r#""poamId": 101"#))
            .stdout(predicate::str::contains("completionDate").not());

        mock.assert();
    }

    #[test]
    fn responses_render_epoch_dates_on_request() {
        let dir = TempDir::new().unwrap();
        let file = write_temp_file(&dir, "poams.json", &ongoing_poam().to_string());

        let mut server = mockito::Server::new();
        server
            .mock("POST", "/api/systems/35/poams")
            .with_status(200)
            .with_body(r#"{"meta":{"code":200},"data":[{"poamId":101,"scheduledCompletionDate":1700000000}]}"#)
            .create();

        cmd(&dir)
            .env("REGISTRY_API_URL", server.url())
            .args(["--epoch-to-datetime", "true", "post", "poams", "-s", "35", "-f"])
            .arg(&file)
            .assert()
            .success()
            .stdout(predicate::str::contains("2023-11-14T22:13:20.000Z"));
    }

    #[test]
    fn dry_run_prints_drafts_without_config() {
        let dir = TempDir::new().unwrap();
        let mut record = ongoing_poam();
        record["unknownField"] = json!("dropped");
        let file = write_temp_file(&dir, "poams.json", &record.to_string());

        cmd(&dir)
            .args(["post", "poams", "-s", "35", "--dry-run", "-f"])
            .arg(&file)
            .assert()
            .success()
            .stdout(predicate::str::contains(r#""milestones""#))
            .stdout(predicate::str::contains("unknownField").not());
    }

    #[test]
    fn missing_api_url_is_config_error() {
        let dir = TempDir::new().unwrap();
        let file = write_temp_file(&dir, "poams.json", &ongoing_poam().to_string());

        cmd(&dir)
            .args(["post", "poams", "-s", "35", "-f"])
            .arg(&file)
            .assert()
            .code(2)
            .stderr(predicate::str::contains("REGISTRY_API_URL"));
    }

    #[test]
    fn invalid_batch_reported_before_config() {
        let dir = TempDir::new().unwrap();
        let file = write_temp_file(&dir, "poams.json", r#"[{"status":"Risk Accepted"}]"#);

        cmd(&dir)
            .args(["post", "poams", "-s", "35", "-f"])
            .arg(&file)
            .assert()
            .code(1)
            .stderr(predicate::str::contains("REGISTRY_API_URL").not())
            .stderr(predicate::str::contains(
                r#"status "Risk Accepted" requires comments"#,
            ));
    }

    #[test]
    fn registry_error_exits_with_transport_code() {
        let dir = TempDir::new().unwrap();
        let file = write_temp_file(&dir, "poams.json", &ongoing_poam().to_string());

        let mut server = mockito::Server::new();
        server
            .mock("POST", "/api/systems/35/poams")
            .with_status(400)
            .with_body(r#"{"meta":{"code":400,"errorMessage":"Invalid system"}}"#)
            .create();

        cmd(&dir)
            .env("REGISTRY_API_URL", server.url())
            .args(["post", "poams", "-s", "35", "-f"])
            .arg(&file)
            .assert()
            .code(4)
            .stderr(predicate::str::contains("[400]"))
            .stderr(predicate::str::contains("Invalid system"));
    }

    #[test]
    fn malformed_json_exits_2() {
        let dir = TempDir::new().unwrap();
        let file = write_temp_file(&dir, "poams.json", "{not json");

        cmd(&dir)
            .args(["post", "poams", "-s", "35", "-f"])
            .arg(&file)
            .assert()
            .code(2)
            .stderr(predicate::str::contains("malformed input"));
    }

    #[test]
    fn missing_file_exits_3() {
        let dir = TempDir::new().unwrap();

        cmd(&dir)
            .args(["post", "poams", "-s", "35", "-f", "nope.json"])
            .assert()
            .code(3)
            .stderr(predicate::str::contains("file not found"));
    }

    #[test]
    fn unsupported_operation_is_rejected() {
        let dir = TempDir::new().unwrap();
        let file = write_temp_file(&dir, "controls.json", r#"{"acronym":"AC-1"}"#);

        cmd(&dir)
            .args(["post", "controls", "-s", "35", "--dry-run", "-f"])
            .arg(&file)
            .assert()
            .code(1)
            .stderr(predicate::str::contains("does not support add"));
    }
}

mod put_command {
    use super::*;

    #[test]
    fn inherited_control_with_narrative_fails() {
        let dir = TempDir::new().unwrap();
        let file = write_temp_file(
            &dir,
            "controls.json",
            r#"[{"acronym":"AC-1","implementationStatus":"Inherited","implementationNarrative":"n/a"}]"#,
        );

        cmd(&dir)
            .args(["put", "controls", "-s", "7", "--dry-run", "-f"])
            .arg(&file)
            .assert()
            .code(1)
            .stderr(predicate::str::contains("implementationNarrative"));
    }

    #[test]
    fn puts_hardware_update() {
        let dir = TempDir::new().unwrap();
        let file = write_temp_file(
            &dir,
            "hardware.json",
            r#"[{"hardwareId":"abc","assetName":"web01"}]"#,
        );

        let mut server = mockito::Server::new();
        let mock = server
            .mock("PUT", "/api/systems/7/hw-baseline")
            .match_body(Matcher::Json(json!([{ "hardwareId": "abc", "assetName": "web01" }])))
            .with_status(200)
            .with_body(r#"{"meta":{"code":200},"data":[{"hardwareId":"abc","success":true}]}"#)
            .create();

        cmd(&dir)
            .env("REGISTRY_API_URL", server.url())
            .args(["put", "hardware", "-s", "7", "-f"])
            .arg(&file)
            .assert()
            .success()
            .stdout(predicate::str::contains(r#""success": true"#));

        mock.assert();
    }
}

mod validate_command {
    use super::*;

    #[test]
    fn valid_batch() {
        let dir = TempDir::new().unwrap();
        let file = write_temp_file(
            &dir,
            "software.json",
            r#"[{"softwareVendor":"Acme","softwareName":"Widget","version":"1.0"}]"#,
        );

        cmd(&dir)
            .args(["validate", "software", "--op", "add", "--file"])
            .arg(&file)
            .assert()
            .success()
            .stderr(predicate::str::contains("1 record(s) valid"))
            .stdout(predicate::str::contains(r#""softwareName": "Widget""#));
    }

    #[test]
    fn reports_failing_record_index() {
        let dir = TempDir::new().unwrap();
        let file = write_temp_file(
            &dir,
            "hardware.json",
            r#"[{"assetName":"web01"},{"hostname":"db01"}]"#,
        );

        cmd(&dir)
            .args(["validate", "hardware", "--op", "add", "--file"])
            .arg(&file)
            .assert()
            .code(1)
            .stderr(predicate::str::contains("record 1"))
            .stderr(predicate::str::contains("assetName"));
    }

    #[test]
    fn empty_batch_is_malformed() {
        let dir = TempDir::new().unwrap();
        let file = write_temp_file(&dir, "empty.json", "[]");

        cmd(&dir)
            .args(["validate", "hardware", "--op", "add", "--file"])
            .arg(&file)
            .assert()
            .code(2);
    }
}

mod example_command {
    use super::*;

    #[test]
    fn shows_shape_and_rules() {
        let dir = TempDir::new().unwrap();

        cmd(&dir)
            .args(["example", "poams"])
            .assert()
            .success()
            .stdout(predicate::str::contains("vulnerabilityDescription"))
            .stdout(predicate::str::contains("Rules by status:"));
    }

    #[test]
    fn update_example_leads_with_identifiers() {
        let dir = TempDir::new().unwrap();

        cmd(&dir)
            .args(["example", "hardware", "--op", "update"])
            .assert()
            .success()
            .stdout(predicate::str::contains("hardwareId"));
    }

    #[test]
    fn unsupported_operation() {
        let dir = TempDir::new().unwrap();

        cmd(&dir)
            .args(["example", "controls", "--op", "add"])
            .assert()
            .code(2)
            .stderr(predicate::str::contains("does not support"));
    }
}

mod format_command {
    use super::*;

    const RESPONSE: &str = r#"{
        "headers": {"content-type": "application/json"},
        "data": {"meta": {"code": 200}, "data": [{"poamId": 1, "comments": null, "completionDate": 1700000000}]}
    }"#;

    #[test]
    fn unwraps_and_hides_nulls() {
        let dir = TempDir::new().unwrap();
        let file = write_temp_file(&dir, "response.json", RESPONSE);

        cmd(&dir)
            .arg("format")
            .arg(&file)
            .assert()
            .success()
            .stdout(predicate::str::contains("headers").not())
            .stdout(predicate::str::contains("comments").not())
            .stdout(predicate::str::contains("1700000000"));
    }

    #[test]
    fn flags_override_defaults() {
        let dir = TempDir::new().unwrap();
        let file = write_temp_file(&dir, "response.json", RESPONSE);

        cmd(&dir)
            .args(["format", "--hide-nulls", "false", "--epoch-to-datetime", "true"])
            .arg(&file)
            .assert()
            .success()
            .stdout(predicate::str::contains(r#""comments": null"#))
            .stdout(predicate::str::contains("2023-11-14T22:13:20.000Z"));
    }

    #[test]
    fn environment_sets_display() {
        let dir = TempDir::new().unwrap();
        let file = write_temp_file(&dir, "response.json", RESPONSE);

        cmd(&dir)
            .env("REGISTRY_HIDE_NULLS", "0")
            .arg("format")
            .arg(&file)
            .assert()
            .success()
            .stdout(predicate::str::contains(r#""comments": null"#));
    }

    #[test]
    fn debugging_prints_raw_response() {
        let dir = TempDir::new().unwrap();
        let file = write_temp_file(&dir, "response.json", RESPONSE);

        cmd(&dir)
            .args(["format", "--debugging", "true"])
            .arg(&file)
            .assert()
            .success()
            .stdout(predicate::str::contains("headers"))
            .stdout(predicate::str::contains(r#""comments": null"#));
    }

    #[test]
    fn invalid_env_bool_is_config_error() {
        let dir = TempDir::new().unwrap();
        let file = write_temp_file(&dir, "response.json", RESPONSE);

        cmd(&dir)
            .env("REGISTRY_HIDE_NULLS", "maybe")
            .arg("format")
            .arg(&file)
            .assert()
            .code(2)
            .stderr(predicate::str::contains("REGISTRY_HIDE_NULLS"));
    }
}
