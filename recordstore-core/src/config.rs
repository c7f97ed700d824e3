//! Store configuration loading and validation.
//!
//! Configuration is a flat JSON object supplying the connection credentials
//! and endpoint. Every required field is checked explicitly by name and
//! expected type; a missing or mistyped field fails fast with a
//! [`RecordStoreError::Config`] naming the field.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fs;
use std::path::Path;

use crate::error::{RecordStoreError, RecordStoreResult};

/// Connection settings for a record store backend.
///
/// All fields are strings, including `port`, which is substituted verbatim
/// into the connection endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreConfig {
    pub username: String,
    pub password: String,
    pub host: String,
    pub port: String,
}

impl StoreConfig {
    /// Parses and validates configuration from a JSON string.
    ///
    /// # Errors
    ///
    /// Returns [`RecordStoreError::Config`] if the text is not a JSON object
    /// or any required field is missing or not a string.
    pub fn from_json_str(raw: &str) -> RecordStoreResult<Self> {
        let value: Value =
            serde_json::from_str(raw).map_err(|e| RecordStoreError::Config(e.to_string()))?;
        let fields = value
            .as_object()
            .ok_or_else(|| RecordStoreError::Config("expected a JSON object".to_string()))?;

        let username = require_string(fields, "username")?;
        let password = require_string(fields, "password")?;
        let host = require_string(fields, "host")?;
        let port = require_string(fields, "port")?;

        Ok(Self { username, password, host, port })
    }

    /// Reads and validates configuration from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns [`RecordStoreError::Config`] if the file cannot be read or its
    /// contents fail validation.
    pub fn from_file(path: impl AsRef<Path>) -> RecordStoreResult<Self> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path).map_err(|e| {
            RecordStoreError::Config(format!("failed to read {}: {e}", path.display()))
        })?;

        Self::from_json_str(&raw)
    }
}

fn require_string(fields: &Map<String, Value>, key: &str) -> RecordStoreResult<String> {
    match fields.get(key) {
        Some(Value::String(value)) => Ok(value.clone()),
        Some(_) => Err(RecordStoreError::Config(format!("field '{key}' must be a string"))),
        None => Err(RecordStoreError::Config(format!("missing field '{key}'"))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const VALID: &str = r#"{
        "username": "svc",
        "password": "hunter2",
        "host": "localhost",
        "port": "27017"
    }"#;

    #[test]
    fn valid_config_parses() {
        let config = StoreConfig::from_json_str(VALID).unwrap();

        assert_eq!(config.username, "svc");
        assert_eq!(config.host, "localhost");
        assert_eq!(config.port, "27017");
    }

    #[test]
    fn missing_field_is_named_in_the_error() {
        let raw = r#"{ "username": "svc", "password": "hunter2", "host": "localhost" }"#;

        match StoreConfig::from_json_str(raw) {
            Err(RecordStoreError::Config(message)) => assert!(message.contains("'port'")),
            other => panic!("expected a config error, got {other:?}"),
        }
    }

    #[test]
    fn mistyped_field_is_named_in_the_error() {
        let raw = r#"{ "username": "svc", "password": "hunter2", "host": "localhost", "port": 27017 }"#;

        match StoreConfig::from_json_str(raw) {
            Err(RecordStoreError::Config(message)) => assert!(message.contains("'port'")),
            other => panic!("expected a config error, got {other:?}"),
        }
    }

    #[test]
    fn non_object_payload_is_rejected() {
        assert!(matches!(
            StoreConfig::from_json_str("[]"),
            Err(RecordStoreError::Config(_)),
        ));
    }

    #[test]
    fn config_loads_from_a_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(VALID.as_bytes()).unwrap();

        let config = StoreConfig::from_file(file.path()).unwrap();
        assert_eq!(config.password, "hunter2");
    }

    #[test]
    fn unreadable_file_is_a_config_error() {
        assert!(matches!(
            StoreConfig::from_file("/nonexistent/store.json"),
            Err(RecordStoreError::Config(_)),
        ));
    }
}
