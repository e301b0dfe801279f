//! Error types module
//!
//! All server-side failures are unified under `AppError`. Each variant describes
//! how it is presented through the `ErrorMetadata` trait, backed by one static
//! table so status codes, error codes and log levels stay consistent.

use std::io;

use crate::format::format_file_size;
use crate::validator::ValidationError;

/// Message shown to clients for every failure whose details are hidden.
pub const INTERNAL_ERROR_MESSAGE: &str = "Erro interno do servidor";

/// Log level for error reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    /// Expected errors such as rejected uploads
    Debug,
    /// Malformed requests
    Warn,
    /// Unexpected failures
    Error,
}

/// Metadata for error responses - defines how an error should be presented
pub trait ErrorMetadata {
    /// HTTP status code to return
    fn http_status_code(&self) -> u16;

    /// Machine-readable error code (e.g., "FILE_REJECTED")
    fn error_code(&self) -> &'static str;

    /// Client-facing message (may differ from internal error message)
    fn client_message(&self) -> String;

    /// Whether details should be hidden from clients
    fn is_sensitive(&self) -> bool;

    /// Log level for this error
    fn log_level(&self) -> LogLevel;
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("File rejected: {filename}: {reason}")]
    FileRejected { filename: String, reason: String },

    #[error("File too large: {filename} exceeds {max_bytes} bytes")]
    PayloadTooLarge { filename: String, max_bytes: u64 },

    #[error("Too many files: at most {max} per request")]
    TooManyFiles { max: usize },

    #[error("Unexpected file field: {0}")]
    UnexpectedFileField(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Internal error: {0}")]
    Internal(String),

    #[error("Internal error with source")]
    InternalWithSource {
        message: String,
        #[source]
        source: anyhow::Error,
    },
}

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        AppError::InternalWithSource {
            message: err.to_string(),
            source: err,
        }
    }
}

impl From<io::Error> for AppError {
    fn from(err: io::Error) -> Self {
        AppError::Internal(format!("IO error: {}", err))
    }
}

impl AppError {
    /// Attach the offending file name to a policy violation.
    pub fn from_validation(filename: &str, err: ValidationError) -> Self {
        match err {
            ValidationError::FileTooLarge { max, .. } => AppError::PayloadTooLarge {
                filename: filename.to_string(),
                max_bytes: max,
            },
            ValidationError::TooManyFiles { max } => AppError::TooManyFiles { max },
            other => AppError::FileRejected {
                filename: filename.to_string(),
                reason: other.to_string(),
            },
        }
    }

    /// Get the error type name for detailed error responses
    pub fn error_type(&self) -> &str {
        match self {
            AppError::FileRejected { .. } => "FileRejected",
            AppError::PayloadTooLarge { .. } => "PayloadTooLarge",
            AppError::TooManyFiles { .. } => "TooManyFiles",
            AppError::UnexpectedFileField(_) => "UnexpectedFileField",
            AppError::BadRequest(_) => "BadRequest",
            AppError::Storage(_) => "Storage",
            AppError::Internal(_) => "Internal",
            AppError::InternalWithSource { .. } => "Internal",
        }
    }

    /// Get detailed error information including error chain
    pub fn detailed_message(&self) -> String {
        use std::error::Error;

        let mut details = self.to_string();

        let mut source = self.source();
        let mut depth = 0;
        while let Some(err) = source {
            depth += 1;
            if depth > 5 {
                details.push_str("\n  ... (truncated)");
                break;
            }
            details.push_str(&format!("\n  Caused by: {}", err));
            source = err.source();
        }

        details
    }
}

/// Static metadata per variant: (http_status, error_code, sensitive, log_level).
/// Upload policy rejections are acknowledged with status 200 and `success: false`.
fn app_error_static_metadata(err: &AppError) -> (u16, &'static str, bool, LogLevel) {
    match err {
        AppError::FileRejected { .. } => (200, "FILE_REJECTED", false, LogLevel::Debug),
        AppError::PayloadTooLarge { .. } => (200, "PAYLOAD_TOO_LARGE", false, LogLevel::Debug),
        AppError::TooManyFiles { .. } => (200, "TOO_MANY_FILES", false, LogLevel::Debug),
        AppError::UnexpectedFileField(_) => (200, "UNEXPECTED_FIELD", false, LogLevel::Debug),
        AppError::BadRequest(_) => (400, "BAD_REQUEST", false, LogLevel::Warn),
        AppError::Storage(_) => (500, "STORAGE_ERROR", true, LogLevel::Error),
        AppError::Internal(_) => (500, "INTERNAL_ERROR", true, LogLevel::Error),
        AppError::InternalWithSource { .. } => (500, "INTERNAL_ERROR", true, LogLevel::Error),
    }
}

impl ErrorMetadata for AppError {
    fn http_status_code(&self) -> u16 {
        app_error_static_metadata(self).0
    }

    fn error_code(&self) -> &'static str {
        app_error_static_metadata(self).1
    }

    fn is_sensitive(&self) -> bool {
        app_error_static_metadata(self).2
    }

    fn log_level(&self) -> LogLevel {
        app_error_static_metadata(self).3
    }

    fn client_message(&self) -> String {
        if self.is_sensitive() {
            return INTERNAL_ERROR_MESSAGE.to_string();
        }
        match self {
            AppError::FileRejected { .. } => "Tipo de arquivo não permitido!".to_string(),
            AppError::PayloadTooLarge { max_bytes, .. } => format!(
                "Arquivo muito grande! O limite é de {} por arquivo.",
                format_file_size(*max_bytes)
            ),
            AppError::TooManyFiles { max } => {
                format!("Máximo de {} arquivos por solicitação", max)
            }
            AppError::UnexpectedFileField(field) => {
                format!("Campo de arquivo inesperado: {}", field)
            }
            AppError::BadRequest(ref msg) => msg.clone(),
            other => other.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_metadata_file_rejected() {
        let err = AppError::FileRejected {
            filename: "setup.exe".to_string(),
            reason: "bad extension".to_string(),
        };
        assert_eq!(err.http_status_code(), 200);
        assert_eq!(err.error_code(), "FILE_REJECTED");
        assert_eq!(err.client_message(), "Tipo de arquivo não permitido!");
        assert!(!err.is_sensitive());
        assert_eq!(err.log_level(), LogLevel::Debug);
    }

    #[test]
    fn test_error_metadata_internal() {
        let err = AppError::Internal("disk on fire".to_string());
        assert_eq!(err.http_status_code(), 500);
        assert_eq!(err.client_message(), "Erro interno do servidor");
        assert!(err.is_sensitive());
        assert_eq!(err.log_level(), LogLevel::Error);
    }

    #[test]
    fn test_sensitive_errors_hide_details() {
        let errors = [
            AppError::Storage("Failed to create file /srv/uploads/x.pdf".to_string()),
            AppError::Internal("IO error: permission denied".to_string()),
            AppError::from(anyhow::anyhow!("journal unreachable at 10.0.0.3")),
        ];
        for err in errors {
            assert!(err.is_sensitive());
            assert_eq!(err.client_message(), INTERNAL_ERROR_MESSAGE);
        }
    }

    #[test]
    fn test_from_validation_keeps_filename() {
        let err = AppError::from_validation(
            "setup.exe",
            ValidationError::InvalidExtension {
                extension: "exe".to_string(),
                allowed: vec!["pdf".to_string()],
            },
        );
        match err {
            AppError::FileRejected { filename, reason } => {
                assert_eq!(filename, "setup.exe");
                assert!(reason.contains("exe"));
            }
            other => panic!("Expected FileRejected, got {:?}", other),
        }
    }

    #[test]
    fn test_payload_too_large_message_names_the_limit() {
        let err = AppError::PayloadTooLarge {
            filename: "scan.pdf".to_string(),
            max_bytes: 10 * 1024 * 1024,
        };
        assert_eq!(
            err.client_message(),
            "Arquivo muito grande! O limite é de 10 MB por arquivo."
        );
    }

    #[test]
    fn test_too_many_files_message() {
        let err = AppError::from_validation("x.pdf", ValidationError::TooManyFiles { max: 10 });
        assert_eq!(err.client_message(), "Máximo de 10 arquivos por solicitação");
    }

    #[test]
    fn test_unexpected_file_field_is_a_rejection() {
        let err = AppError::UnexpectedFileField("foto".to_string());
        assert_eq!(err.http_status_code(), 200);
        assert_eq!(err.client_message(), "Campo de arquivo inesperado: foto");
    }

    #[test]
    fn test_detailed_message_includes_source_chain() {
        let err = AppError::from(anyhow::anyhow!("root cause").context("outer"));
        let details = err.detailed_message();
        assert!(details.contains("Internal error with source"));
        assert!(details.contains("Caused by"));
    }
}
