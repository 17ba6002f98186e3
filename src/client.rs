//! Registry API client.
//!
//! One bulk call per entity type: every composed draft of a batch is sent
//! in a single request. The client never retries.

use async_trait::async_trait;
use serde_json::Value;

#[cfg(feature = "remote")]
use crate::config::RegistryConfig;
use crate::error::{SubmitError, TransportError};
use crate::types::{Draft, EntityType, Operation, RawRecord};
use crate::validator::validate_batch;

/// Bulk write endpoint of the registry.
#[async_trait]
pub trait RegistryApi: Send + Sync {
    /// Submit a batch of drafts for one system and return the response body.
    async fn submit(
        &self,
        entity: EntityType,
        operation: Operation,
        system_id: u64,
        drafts: &[Draft],
    ) -> Result<Value, TransportError>;
}

/// Validate a batch and submit it in one bulk call.
///
/// Nothing is sent unless every record composes.
///
/// # Errors
///
/// Returns `SubmitError::Validation` for the first failing record, or
/// `SubmitError::Transport` if the registry call fails.
pub async fn submit_batch(
    api: &dyn RegistryApi,
    entity: EntityType,
    operation: Operation,
    system_id: u64,
    records: &[RawRecord],
) -> Result<Value, SubmitError> {
    let drafts = validate_batch(entity, operation, records)?;
    Ok(api.submit(entity, operation, system_id, &drafts).await?)
}

/// `reqwest`-backed registry client.
#[cfg(feature = "remote")]
#[derive(Debug, Clone)]
pub struct HttpRegistry {
    client: reqwest::Client,
    base_url: String,
}

#[cfg(feature = "remote")]
impl HttpRegistry {
    /// Build a client carrying the configured authentication headers.
    ///
    /// # Errors
    ///
    /// Returns `TransportError::Network` if the HTTP client cannot be built.
    pub fn new(config: &RegistryConfig) -> Result<Self, TransportError> {
        let mut headers = reqwest::header::HeaderMap::new();
        for (name, value) in [
            ("api-key", config.api_key.as_deref()),
            ("user-uid", config.user_uid.as_deref()),
        ] {
            if let Some(value) = value {
                let mut value = reqwest::header::HeaderValue::from_str(value).map_err(|e| {
                    TransportError::Decode {
                        message: format!("invalid {} header: {}", name, e),
                    }
                })?;
                value.set_sensitive(true);
                headers.insert(name, value);
            }
        }

        let mut builder = reqwest::Client::builder().default_headers(headers);
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|source| TransportError::Network {
                url: config.api_url.clone(),
                source,
            })?;

        Ok(Self {
            client,
            base_url: config.api_url.clone(),
        })
    }

    fn url(&self, entity: EntityType, system_id: u64) -> String {
        format!("{}{}", self.base_url, entity.endpoint(system_id))
    }
}

#[cfg(feature = "remote")]
#[async_trait]
impl RegistryApi for HttpRegistry {
    async fn submit(
        &self,
        entity: EntityType,
        operation: Operation,
        system_id: u64,
        drafts: &[Draft],
    ) -> Result<Value, TransportError> {
        let url = self.url(entity, system_id);
        let request = match operation {
            Operation::Add => self.client.post(&url),
            Operation::Update => self.client.put(&url),
        };

        tracing::info!(
            verb = operation.http_verb(),
            %url,
            records = drafts.len(),
            "submitting batch"
        );

        let response = request
            .json(drafts)
            .send()
            .await
            .map_err(|source| TransportError::Network {
                url: url.clone(),
                source,
            })?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|source| TransportError::Network {
                url: url.clone(),
                source,
            })?;
        tracing::debug!(status = status.as_u16(), bytes = body.len(), "registry responded");

        if !status.is_success() {
            let message = error_message(&body).unwrap_or_else(|| {
                status
                    .canonical_reason()
                    .unwrap_or("request failed")
                    .to_string()
            });
            return Err(TransportError::Http {
                status: status.as_u16(),
                message,
            });
        }

        serde_json::from_str(&body).map_err(|e| TransportError::Decode {
            message: e.to_string(),
        })
    }
}

/// Extract the registry's error message from a failure body.
///
/// Failure bodies look like `{"meta": {"code": 400, "errorMessage": ".."}}`.
#[cfg(feature = "remote")]
fn error_message(body: &str) -> Option<String> {
    let value: Value = serde_json::from_str(body).ok()?;
    let meta = value.get("meta")?;
    meta.get("errorMessage")
        .or_else(|| meta.get("message"))
        .and_then(Value::as_str)
        .map(String::from)
}

#[cfg(all(test, feature = "remote"))]
mod tests {
    use super::*;
    use mockito::Matcher;
    use serde_json::json;
    use std::time::Duration;

    fn config(url: String) -> RegistryConfig {
        RegistryConfig {
            api_url: url,
            api_key: Some("key-123".into()),
            user_uid: Some("1647389405".into()),
            timeout: Some(Duration::from_secs(5)),
        }
    }

    #[test]
    fn error_message_from_meta() {
        let body = r#"{"meta":{"code":400,"errorMessage":"systemId not found"}}"#;
        assert_eq!(error_message(body).as_deref(), Some("systemId not found"));
        assert_eq!(error_message("<html>"), None);
    }

    #[tokio::test]
    async fn post_sends_batch_with_headers() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/api/systems/35/hw-baseline")
            .match_header("api-key", "key-123")
            .match_header("user-uid", "1647389405")
            .match_body(Matcher::Json(json!([{ "assetName": "web01" }])))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"meta":{"code":200},"data":[{"hardwareId":"abc","success":true}]}"#)
            .create_async()
            .await;

        let registry = HttpRegistry::new(&config(server.url())).unwrap();
        let drafts = vec![Draft::new().with_field("assetName", json!("web01"))];
        let response = registry
            .submit(EntityType::Hardware, Operation::Add, 35, &drafts)
            .await
            .unwrap();

        assert_eq!(response["data"][0]["success"], true);
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn put_uses_update_verb() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("PUT", "/api/systems/7/controls")
            .with_status(200)
            .with_body(r#"{"meta":{"code":200},"data":[]}"#)
            .create_async()
            .await;

        let registry = HttpRegistry::new(&config(server.url())).unwrap();
        registry
            .submit(EntityType::Controls, Operation::Update, 7, &[])
            .await
            .unwrap();
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn http_error_carries_registry_message() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/api/systems/35/poams")
            .with_status(400)
            .with_body(r#"{"meta":{"code":400,"errorMessage":"Invalid status"}}"#)
            .create_async()
            .await;

        let registry = HttpRegistry::new(&config(server.url())).unwrap();
        let err = registry
            .submit(EntityType::Poams, Operation::Add, 35, &[])
            .await
            .unwrap_err();
        match err {
            TransportError::Http { status, message } => {
                assert_eq!(status, 400);
                assert_eq!(message, "Invalid status");
            }
            other => panic!("expected http error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn http_error_without_body_uses_reason() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/api/systems/35/poams")
            .with_status(503)
            .create_async()
            .await;

        let registry = HttpRegistry::new(&config(server.url())).unwrap();
        let err = registry
            .submit(EntityType::Poams, Operation::Add, 35, &[])
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            TransportError::Http { status: 503, message } if message == "Service Unavailable"
        ));
    }
}
