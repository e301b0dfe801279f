//! Configuration validation
//!
//! Validates critical configuration values at startup to catch misconfigurations early.

use anyhow::Result;
use contrato_core::Config;

/// Validate critical configuration values
pub fn validate_config(config: &Config) -> Result<()> {
    if config.is_production() && config.cors_origins().iter().any(|o| o == "*") {
        return Err(anyhow::anyhow!(
            "CORS configured to allow all origins (*) in production. \
            Please set specific allowed origins via CORS_ORIGINS environment variable."
        ));
    }

    if config.max_files() == 0 {
        return Err(anyhow::anyhow!("MAX_FILES cannot be 0"));
    }

    if config.max_file_size_bytes() == 0 {
        return Err(anyhow::anyhow!("MAX_FILE_SIZE_MB cannot be 0"));
    }

    if config.max_request_body_bytes().is_none() {
        return Err(anyhow::anyhow!(
            "MAX_FILE_SIZE_MB and MAX_FILES together exceed the addressable request size"
        ));
    }

    if config.allowed_extensions().is_empty() {
        return Err(anyhow::anyhow!("ALLOWED_EXTENSIONS cannot be empty"));
    }

    if config.allowed_content_types().is_empty() {
        return Err(anyhow::anyhow!("ALLOWED_CONTENT_TYPES cannot be empty"));
    }

    if config.upload_dir().starts_with(config.static_dir()) {
        tracing::warn!(
            upload_dir = %config.upload_dir().display(),
            "Upload directory is inside the static directory"
        );
    }

    Ok(())
}
