//! Whole-collection JSON export and import.
//!
//! Import validates eagerly and wholesale-replaces on success; a bad
//! payload never partially overwrites existing state.

use anyhow::{Context, Result};
use thiserror::Error;

use crate::models::Lead;

/// Default export file name.
pub const JSON_FILE_NAME: &str = "reef-leads.json";

#[derive(Debug, Error)]
pub enum ImportError {
    #[error("Import payload is not valid JSON: {0}")]
    Syntax(serde_json::Error),
    #[error("Import payload must be a JSON array of leads, got {0}")]
    NotAnArray(&'static str),
    #[error("Import payload does not look like a lead export: first record is missing '{0}'")]
    MissingField(&'static str),
    #[error("Import payload has a malformed lead record: {0}")]
    BadRecord(serde_json::Error),
}

/// Serialize the collection verbatim, indented.
pub fn export_json(leads: &[Lead]) -> Result<String> {
    serde_json::to_string_pretty(leads).context("Failed to serialize leads")
}

/// Parse and validate an import payload.
///
/// The top level must be an array; a non-empty array's first element must
/// carry at least `id` and `name`. Only after both checks does full
/// deserialization run, so the caller can safely swap its collection for
/// the returned one.
pub fn import_json(content: &str) -> Result<Vec<Lead>, ImportError> {
    let value: serde_json::Value = serde_json::from_str(content).map_err(ImportError::Syntax)?;

    let records = value.as_array().ok_or_else(|| {
        ImportError::NotAnArray(match value {
            serde_json::Value::Object(_) => "an object",
            serde_json::Value::String(_) => "a string",
            serde_json::Value::Number(_) => "a number",
            serde_json::Value::Bool(_) => "a boolean",
            serde_json::Value::Null => "null",
            serde_json::Value::Array(_) => unreachable!("arrays pass as_array"),
        })
    })?;

    if let Some(first) = records.first() {
        for field in ["id", "name"] {
            if first.get(field).is_none() {
                return Err(ImportError::MissingField(field));
            }
        }
    }

    serde_json::from_value(value).map_err(ImportError::BadRecord)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ClientType;

    fn sample_leads() -> Vec<Lead> {
        vec![
            Lead::new(
                "Alex Johnson".to_string(),
                "555-0101".to_string(),
                ClientType::PrivateTeacher,
                "Ad Campaign A".to_string(),
            ),
            Lead::new(
                "Innovate Learning Center".to_string(),
                "555-0102".to_string(),
                ClientType::Center,
                "Referral".to_string(),
            ),
        ]
    }

    #[test]
    fn test_round_trip_preserves_collection() {
        let leads = sample_leads();
        let json = export_json(&leads).unwrap();
        let imported = import_json(&json).unwrap();
        assert_eq!(imported, leads);
    }

    #[test]
    fn test_empty_array_imports_as_empty() {
        assert!(import_json("[]").unwrap().is_empty());
    }

    #[test]
    fn test_non_array_payload_is_rejected() {
        let err = import_json("{\"leads\": []}").unwrap_err();
        assert!(matches!(err, ImportError::NotAnArray("an object")));
        assert!(err.to_string().contains("must be a JSON array"));
    }

    #[test]
    fn test_first_record_must_have_id_and_name() {
        let err = import_json("[{\"name\": \"No Id\"}]").unwrap_err();
        assert!(matches!(err, ImportError::MissingField("id")));

        let err = import_json("[{\"id\": \"lead-1\"}]").unwrap_err();
        assert!(matches!(err, ImportError::MissingField("name")));
    }

    #[test]
    fn test_garbage_is_a_syntax_error() {
        assert!(matches!(
            import_json("not json at all"),
            Err(ImportError::Syntax(_))
        ));
    }
}
