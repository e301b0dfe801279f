//! Form client for the Contrato submission server.
//!
//! Holds the state of a contract request form (masked values, staged files,
//! submit control, feedback region), validates it, looks up addresses by postal
//! code and submits it as `multipart/form-data`. The CLI drives it directly.

pub mod address;
pub mod api;
pub mod controller;
pub mod error;
pub mod feedback;
pub mod files;
pub mod form;
pub mod validation;

use reqwest::Client;
use serde::de::DeserializeOwned;
use std::time::Duration;

pub use address::{AddressLookup, LookupError, ViaCepClient};
pub use api::SubmissionTransport;
pub use controller::{FormController, FormEvent, SubmitControl, SubmitOutcome};
pub use error::ClientError;
pub use feedback::{FeedbackKind, FeedbackRegion, FeedbackState};
pub use files::{FileListItem, FileListView, StagedFile, StagedFiles};
pub use form::FormValues;
pub use validation::ValidationFailure;

const DEFAULT_API_URL: &str = "http://localhost:3000";

/// HTTP client for the submission server.
#[derive(Clone, Debug)]
pub struct ApiClient {
    client: Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: String) -> Result<Self, ClientError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(60))
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Create client from environment: CONTRATO_API_URL (default http://localhost:3000).
    pub fn from_env() -> Result<Self, ClientError> {
        let base_url =
            std::env::var("CONTRATO_API_URL").unwrap_or_else(|_| DEFAULT_API_URL.to_string());
        Self::new(base_url)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn build_url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// POST multipart form and deserialize the JSON response.
    ///
    /// The server answers every outcome with the same JSON shape, so the body
    /// is decoded whatever the status; only an undecodable body is an error.
    pub async fn post_multipart<T: DeserializeOwned>(
        &self,
        path: &str,
        form: reqwest::multipart::Form,
    ) -> Result<T, ClientError> {
        let url = self.build_url(path);
        let response = self.client.post(&url).multipart(form).send().await?;

        let status = response.status();
        let text = response.text().await?;

        match serde_json::from_str::<T>(&text) {
            Ok(body) => {
                if !status.is_success() {
                    tracing::warn!(status = status.as_u16(), url = %url, "Server reported an error");
                }
                Ok(body)
            }
            Err(_) => Err(ClientError::Status {
                status: status.as_u16(),
                body: text,
            }),
        }
    }
}
