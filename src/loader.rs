//! Input loading - reads operator JSON files into raw records.
//!
//! A file holds either one object or an array of objects. Anything else is
//! malformed input and is reported before composition starts.

use std::path::Path;

use serde_json::Value;

use crate::error::LoadError;
use crate::types::{json_type_name, RawRecord};

/// Split a parsed document into records.
///
/// # Errors
///
/// Returns `LoadError::NotRecords` if the document (or an array element) is
/// not an object, and `LoadError::EmptyBatch` for an empty array.
pub fn parse_records(document: Value) -> Result<Vec<RawRecord>, LoadError> {
    match document {
        Value::Object(record) => Ok(vec![record]),
        Value::Array(items) => {
            if items.is_empty() {
                return Err(LoadError::EmptyBatch);
            }
            items
                .into_iter()
                .enumerate()
                .map(|(i, item)| match item {
                    Value::Object(record) => Ok(record),
                    other => Err(LoadError::NotRecords {
                        location: format!("element {}", i),
                        actual: json_type_name(&other).to_string(),
                    }),
                })
                .collect()
        }
        other => Err(LoadError::NotRecords {
            location: "input".to_string(),
            actual: json_type_name(&other).to_string(),
        }),
    }
}

/// Parse records from a JSON string.
///
/// # Errors
///
/// Returns `LoadError::InvalidJson` if the string isn't valid JSON, or the
/// errors of [`parse_records`].
pub fn load_records_str(content: &str) -> Result<Vec<RawRecord>, LoadError> {
    let document = load_json_str(content)?;
    parse_records(document)
}

/// Parse a JSON document without interpreting it.
pub fn load_json_str(content: &str) -> Result<Value, LoadError> {
    serde_json::from_str(content).map_err(|source| LoadError::InvalidJson { source })
}

/// Load records from a file path.
///
/// # Errors
///
/// Returns `LoadError::FileNotFound` if the file doesn't exist,
/// `LoadError::ReadError` if it can't be read, or the parse errors of
/// [`load_records_str`].
pub fn load_records(path: &Path) -> Result<Vec<RawRecord>, LoadError> {
    load_records_str(&read_file(path)?)
}

/// Load a JSON document from a file path.
pub fn load_json(path: &Path) -> Result<Value, LoadError> {
    load_json_str(&read_file(path)?)
}

/// Load records from a file path without blocking the runtime.
///
/// The whole file is read and parsed before any record is returned.
pub async fn load_records_async(path: &Path) -> Result<Vec<RawRecord>, LoadError> {
    let content = match tokio::fs::read_to_string(path).await {
        Ok(content) => content,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Err(LoadError::FileNotFound {
                path: path.to_path_buf(),
            })
        }
        Err(source) => {
            return Err(LoadError::ReadError {
                path: path.to_path_buf(),
                source,
            })
        }
    };
    load_records_str(&content)
}

fn read_file(path: &Path) -> Result<String, LoadError> {
    if !path.exists() {
        return Err(LoadError::FileNotFound {
            path: path.to_path_buf(),
        });
    }

    std::fs::read_to_string(path).map_err(|source| LoadError::ReadError {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn single_object_is_one_record() {
        let records = parse_records(json!({"assetName": "web01"})).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0]["assetName"], "web01");
    }

    #[test]
    fn array_keeps_order() {
        let records = parse_records(json!([{"n": 1}, {"n": 2}, {"n": 3}])).unwrap();
        let ns: Vec<_> = records.iter().map(|r| r["n"].as_i64().unwrap()).collect();
        assert_eq!(ns, vec![1, 2, 3]);
    }

    #[test]
    fn scalar_document_rejected() {
        let result = parse_records(json!("poams"));
        assert!(matches!(
            result,
            Err(LoadError::NotRecords { actual, .. }) if actual == "string"
        ));
    }

    #[test]
    fn non_object_element_rejected() {
        let result = parse_records(json!([{"n": 1}, [2]]));
        assert!(matches!(
            result,
            Err(LoadError::NotRecords { location, .. }) if location == "element 1"
        ));
    }

    #[test]
    fn empty_array_rejected() {
        assert!(matches!(
            parse_records(json!([])),
            Err(LoadError::EmptyBatch)
        ));
    }

    #[test]
    fn invalid_json_str() {
        let result = load_records_str("{not json");
        assert!(matches!(result, Err(LoadError::InvalidJson { .. })));
    }

    #[test]
    fn load_records_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, r#"[{{"assetName": "web01"}}]"#).unwrap();

        let records = load_records(file.path()).unwrap();
        assert_eq!(records.len(), 1);
    }

    #[test]
    fn load_records_file_not_found() {
        let result = load_records(Path::new("/nonexistent/records.json"));
        assert!(matches!(result, Err(LoadError::FileNotFound { .. })));
    }

    #[tokio::test]
    async fn load_records_async_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, r#"{{"assetName": "web01"}}"#).unwrap();

        let records = load_records_async(file.path()).await.unwrap();
        assert_eq!(records[0]["assetName"], "web01");
    }

    #[tokio::test]
    async fn load_records_async_not_found() {
        let result = load_records_async(Path::new("/nonexistent/records.json")).await;
        assert!(matches!(result, Err(LoadError::FileNotFound { .. })));
    }
}
