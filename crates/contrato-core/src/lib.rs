//! Contrato Core Library
//!
//! This crate provides the domain model, input masks, upload policy, error types
//! and configuration shared by the submission server, the form client and the CLI.

pub mod config;
pub mod error;
pub mod format;
pub mod mask;
pub mod models;
pub mod validator;

// Re-export commonly used types
pub use config::{Config, ServerConfig};
pub use error::{AppError, ErrorMetadata, LogLevel};
pub use format::format_file_size;
pub use models::{FormField, StoredFile, SubmissionResponse, DOCUMENTS_FIELD};
pub use validator::{FileValidator, ValidationError};
