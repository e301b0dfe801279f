use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;
use utoipa::ToSchema;

use super::form::FormField;

/// JSON acknowledgment returned by the submission endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct SubmissionResponse {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl SubmissionResponse {
    pub fn accepted(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: Some(message.into()),
        }
    }

    pub fn rejected(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: Some(message.into()),
        }
    }
}

/// An attachment accepted by the server and written to the upload directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredFile {
    pub original_name: String,
    pub stored_name: String,
    pub content_type: String,
    pub size: u64,
    pub path: PathBuf,
}

/// A submission as received by the server: text fields by wire name plus stored files.
#[derive(Debug, Clone)]
pub struct ContractSubmission {
    pub fields: BTreeMap<String, String>,
    pub files: Vec<StoredFile>,
    pub received_at: DateTime<Local>,
}

impl ContractSubmission {
    pub fn new(fields: BTreeMap<String, String>, files: Vec<StoredFile>) -> Self {
        Self {
            fields,
            files,
            received_at: Local::now(),
        }
    }

    /// Value of a field; blank values count as absent.
    pub fn field(&self, field: FormField) -> Option<&str> {
        self.fields
            .get(field.name())
            .map(|v| v.as_str())
            .filter(|v| !v.trim().is_empty())
    }

    /// Value of a field, or an empty string when absent.
    pub fn value(&self, field: FormField) -> &str {
        self.field(field).unwrap_or("")
    }
}

/// Address returned by the postal-code lookup service. Transient, never persisted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Address {
    pub street: String,
    pub neighborhood: String,
    pub city: String,
    pub state: String,
}
