//! Storage abstraction trait

use async_trait::async_trait;
use bytes::Bytes;
use contrato_core::StoredFile;
use thiserror::Error;

/// Storage operation errors
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Upload failed: {0}")]
    UploadFailed(String),

    #[error("Invalid stored name: {0}")]
    InvalidName(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// Destination for accepted attachments.
///
/// Writes are independent per file; implementations must not require locking
/// across requests.
#[async_trait]
pub trait Storage: Send + Sync {
    /// Persist one attachment received under `field_name` and describe where it went.
    async fn store(
        &self,
        field_name: &str,
        original_name: &str,
        content_type: &str,
        data: Bytes,
    ) -> StorageResult<StoredFile>;

    /// Verify the backend can accept writes.
    async fn health_check(&self) -> StorageResult<()>;

    /// Human-readable location of the stored files, logged at startup.
    fn location(&self) -> String;
}
