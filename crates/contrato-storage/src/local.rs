use crate::keys::generate_stored_name;
use crate::traits::{Storage, StorageError, StorageResult};
use async_trait::async_trait;
use bytes::Bytes;
use contrato_core::StoredFile;
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::io::AsyncWriteExt;

/// Local filesystem storage implementation
#[derive(Clone, Debug)]
pub struct LocalStorage {
    base_path: PathBuf,
}

impl LocalStorage {
    /// Create a new LocalStorage rooted at `base_path` (e.g. "uploads").
    ///
    /// The directory is created if it does not exist yet.
    pub async fn new(base_path: impl Into<PathBuf>) -> StorageResult<Self> {
        let base_path = base_path.into();

        fs::create_dir_all(&base_path).await.map_err(|e| {
            StorageError::ConfigError(format!(
                "Failed to create storage directory {}: {}",
                base_path.display(),
                e
            ))
        })?;

        Ok(LocalStorage { base_path })
    }

    pub fn base_path(&self) -> &Path {
        &self.base_path
    }

    /// Resolve a stored name to a path inside the base directory.
    fn name_to_path(&self, stored_name: &str) -> StorageResult<PathBuf> {
        if stored_name.is_empty()
            || stored_name.contains("..")
            || stored_name.contains('/')
            || stored_name.contains('\\')
        {
            return Err(StorageError::InvalidName(stored_name.to_string()));
        }
        Ok(self.base_path.join(stored_name))
    }
}

#[async_trait]
impl Storage for LocalStorage {
    async fn store(
        &self,
        field_name: &str,
        original_name: &str,
        content_type: &str,
        data: Bytes,
    ) -> StorageResult<StoredFile> {
        let stored_name = generate_stored_name(field_name, original_name);
        let path = self.name_to_path(&stored_name)?;
        let size = data.len() as u64;

        // The directory may have been removed since startup.
        fs::create_dir_all(&self.base_path).await?;

        let start = std::time::Instant::now();

        let mut file = fs::File::create(&path).await.map_err(|e| {
            StorageError::UploadFailed(format!("Failed to create file {}: {}", path.display(), e))
        })?;

        file.write_all(&data).await.map_err(|e| {
            StorageError::UploadFailed(format!("Failed to write file {}: {}", path.display(), e))
        })?;

        file.sync_all().await.map_err(|e| {
            StorageError::UploadFailed(format!("Failed to sync file {}: {}", path.display(), e))
        })?;

        tracing::debug!(
            path = %path.display(),
            original_name = %original_name,
            size_bytes = size,
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "Local storage write successful"
        );

        Ok(StoredFile {
            original_name: original_name.to_string(),
            stored_name,
            content_type: content_type.to_string(),
            size,
            path,
        })
    }

    async fn health_check(&self) -> StorageResult<()> {
        fs::create_dir_all(&self.base_path).await?;
        let metadata = fs::metadata(&self.base_path).await?;
        if metadata.permissions().readonly() {
            return Err(StorageError::ConfigError(format!(
                "Storage directory {} is read-only",
                self.base_path.display()
            )));
        }
        Ok(())
    }

    fn location(&self) -> String {
        self.base_path.display().to_string()
    }
}
