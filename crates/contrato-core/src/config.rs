//! Configuration module
//!
//! Server settings are read from the environment (after loading `.env`), with a
//! default for every value so a bare `contrato-api` starts on port 3000 and
//! stores attachments under `./uploads`.

use std::env;
use std::path::PathBuf;

use crate::validator::{FileValidator, DEFAULT_ALLOWED_CONTENT_TYPES, DEFAULT_ALLOWED_EXTENSIONS};

const SERVER_PORT: u16 = 3000;
const MAX_FILE_SIZE_MB: u64 = 10;
const MAX_FILES: usize = 10;
const HTTP_CONCURRENCY_LIMIT: usize = 1024;
const UPLOAD_DIR: &str = "uploads";
const STATIC_DIR: &str = "public";

/// Submission server settings
#[derive(Clone, Debug)]
pub struct ServerConfig {
    pub server_port: u16,
    pub environment: String,
    pub cors_origins: Vec<String>,
    pub upload_dir: PathBuf,
    pub static_dir: PathBuf,
    pub max_file_size_bytes: u64,
    pub max_files: usize,
    pub allowed_extensions: Vec<String>,
    pub allowed_content_types: Vec<String>,
    pub http_concurrency_limit: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            server_port: SERVER_PORT,
            environment: "development".to_string(),
            cors_origins: vec!["*".to_string()],
            upload_dir: PathBuf::from(UPLOAD_DIR),
            static_dir: PathBuf::from(STATIC_DIR),
            max_file_size_bytes: MAX_FILE_SIZE_MB * 1024 * 1024,
            max_files: MAX_FILES,
            allowed_extensions: DEFAULT_ALLOWED_EXTENSIONS
                .iter()
                .map(|s| s.to_string())
                .collect(),
            allowed_content_types: DEFAULT_ALLOWED_CONTENT_TYPES
                .iter()
                .map(|s| s.to_string())
                .collect(),
            http_concurrency_limit: HTTP_CONCURRENCY_LIMIT,
        }
    }
}

fn split_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(|s| s.trim().to_lowercase())
        .filter(|s| !s.is_empty())
        .collect()
}

impl ServerConfig {
    pub fn from_env() -> Result<Self, anyhow::Error> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build the configuration from any key lookup (the process environment in production).
    pub fn from_lookup<F>(lookup: F) -> Result<Self, anyhow::Error>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let environment = lookup("ENVIRONMENT")
            .or_else(|| lookup("APP_ENV"))
            .unwrap_or(defaults.environment);

        let cors_origins_str = lookup("CORS_ORIGINS").unwrap_or_else(|| "*".to_string());
        let is_production =
            environment.to_lowercase() == "production" || environment.to_lowercase() == "prod";
        if is_production && cors_origins_str.trim() == "*" {
            return Err(anyhow::anyhow!(
                "CORS_ORIGINS cannot be '*' in production. Please specify explicit origins."
            ));
        }
        let cors_origins = cors_origins_str
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let server_port = match lookup("PORT") {
            Some(port) => port
                .trim()
                .parse()
                .map_err(|_| anyhow::anyhow!("PORT must be a valid number"))?,
            None => defaults.server_port,
        };

        let max_file_size_mb = lookup("MAX_FILE_SIZE_MB")
            .and_then(|v| v.trim().parse::<u64>().ok())
            .unwrap_or(MAX_FILE_SIZE_MB);
        let max_file_size_bytes = max_file_size_mb
            .checked_mul(1024 * 1024)
            .ok_or_else(|| anyhow::anyhow!("MAX_FILE_SIZE_MB is too large"))?;

        let max_files = lookup("MAX_FILES")
            .and_then(|v| v.trim().parse::<usize>().ok())
            .unwrap_or(defaults.max_files);

        let http_concurrency_limit = lookup("HTTP_CONCURRENCY_LIMIT")
            .and_then(|v| v.trim().parse::<usize>().ok())
            .unwrap_or(defaults.http_concurrency_limit)
            .max(1);

        let allowed_extensions = lookup("ALLOWED_EXTENSIONS")
            .map(|v| split_list(&v))
            .unwrap_or(defaults.allowed_extensions);

        let allowed_content_types = lookup("ALLOWED_CONTENT_TYPES")
            .map(|v| split_list(&v))
            .unwrap_or(defaults.allowed_content_types);

        Ok(Self {
            server_port,
            environment,
            cors_origins,
            upload_dir: lookup("UPLOAD_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.upload_dir),
            static_dir: lookup("STATIC_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.static_dir),
            max_file_size_bytes,
            max_files,
            allowed_extensions,
            allowed_content_types,
            http_concurrency_limit,
        })
    }
}

/// Application configuration.
#[derive(Clone, Debug, Default)]
pub struct Config(pub Box<ServerConfig>);

impl Config {
    fn as_server(&self) -> &ServerConfig {
        &self.0
    }

    pub fn from_env() -> Result<Self, anyhow::Error> {
        Ok(Config(Box::new(ServerConfig::from_env()?)))
    }

    /// Check if the application is running in production mode
    pub fn is_production(&self) -> bool {
        let env = self.as_server().environment.to_lowercase();
        env == "production" || env == "prod"
    }

    pub fn server_port(&self) -> u16 {
        self.as_server().server_port
    }

    pub fn environment(&self) -> &str {
        &self.as_server().environment
    }

    pub fn cors_origins(&self) -> &[String] {
        &self.as_server().cors_origins
    }

    pub fn upload_dir(&self) -> &PathBuf {
        &self.as_server().upload_dir
    }

    pub fn static_dir(&self) -> &PathBuf {
        &self.as_server().static_dir
    }

    pub fn max_file_size_bytes(&self) -> u64 {
        self.as_server().max_file_size_bytes
    }

    pub fn max_files(&self) -> usize {
        self.as_server().max_files
    }

    pub fn allowed_extensions(&self) -> &[String] {
        &self.as_server().allowed_extensions
    }

    pub fn allowed_content_types(&self) -> &[String] {
        &self.as_server().allowed_content_types
    }

    pub fn http_concurrency_limit(&self) -> usize {
        self.as_server().http_concurrency_limit
    }

    /// Largest request body the server accepts: every file at its limit plus room for text fields.
    /// `None` when the limits do not fit in `usize`.
    pub fn max_request_body_bytes(&self) -> Option<usize> {
        usize::try_from(self.max_file_size_bytes())
            .ok()?
            .checked_mul(self.max_files())?
            .checked_add(1024 * 1024)
    }

    /// Upload policy derived from the configured limits and allow-lists.
    pub fn file_validator(&self) -> FileValidator {
        FileValidator::new(
            self.max_file_size_bytes(),
            self.max_files(),
            self.allowed_extensions().to_vec(),
            self.allowed_content_types().to_vec(),
        )
    }
}

impl From<ServerConfig> for Config {
    fn from(config: ServerConfig) -> Self {
        Config(Box::new(config))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_when_environment_is_empty() {
        let config = ServerConfig::from_lookup(lookup_from(&[])).expect("config");
        assert_eq!(config.server_port, 3000);
        assert_eq!(config.upload_dir, PathBuf::from("uploads"));
        assert_eq!(config.max_file_size_bytes, 10 * 1024 * 1024);
        assert_eq!(config.max_files, 10);
        assert_eq!(config.allowed_extensions.len(), 8);
        assert_eq!(config.cors_origins, vec!["*".to_string()]);
    }

    #[test]
    fn reads_port_and_limits() {
        let config = ServerConfig::from_lookup(lookup_from(&[
            ("PORT", "8080"),
            ("MAX_FILE_SIZE_MB", "2"),
            ("MAX_FILES", "3"),
            ("UPLOAD_DIR", "/tmp/contratos"),
            ("ALLOWED_EXTENSIONS", "PDF, png"),
        ]))
        .expect("config");
        assert_eq!(config.server_port, 8080);
        assert_eq!(config.max_file_size_bytes, 2 * 1024 * 1024);
        assert_eq!(config.max_files, 3);
        assert_eq!(config.upload_dir, PathBuf::from("/tmp/contratos"));
        assert_eq!(config.allowed_extensions, vec!["pdf", "png"]);
    }

    #[test]
    fn invalid_port_is_an_error() {
        assert!(ServerConfig::from_lookup(lookup_from(&[("PORT", "http")])).is_err());
    }

    #[test]
    fn wildcard_cors_rejected_in_production() {
        let result = ServerConfig::from_lookup(lookup_from(&[("ENVIRONMENT", "production")]));
        assert!(result.is_err());

        let config = ServerConfig::from_lookup(lookup_from(&[
            ("ENVIRONMENT", "production"),
            ("CORS_ORIGINS", "https://contratos.example.com"),
        ]))
        .expect("config");
        assert!(Config::from(config).is_production());
    }

    #[test]
    fn request_body_limit_covers_all_files() {
        let config = Config::default();
        assert_eq!(
            config.max_request_body_bytes(),
            Some(10 * 10 * 1024 * 1024 + 1024 * 1024)
        );
    }

    #[test]
    fn oversized_file_limit_is_an_error() {
        let result = ServerConfig::from_lookup(lookup_from(&[(
            "MAX_FILE_SIZE_MB",
            "18446744073709551615",
        )]));
        assert!(result.is_err());
    }

    #[test]
    fn overflowing_request_body_limit_is_none() {
        let config = Config::from(ServerConfig {
            max_file_size_bytes: u64::MAX / 2,
            max_files: 10,
            ..ServerConfig::default()
        });
        assert_eq!(config.max_request_body_bytes(), None);
    }
}
