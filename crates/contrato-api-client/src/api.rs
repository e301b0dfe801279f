//! Submission of a completed form to the server.

use crate::error::ClientError;
use crate::files::StagedFiles;
use crate::form::FormValues;
use crate::ApiClient;
use async_trait::async_trait;
use contrato_core::{SubmissionResponse, DOCUMENTS_FIELD};
use reqwest::multipart::{Form, Part};

pub const SUBMIT_PATH: &str = "/enviar-formulario";

/// Sends a form and its staged files, returning the server's acknowledgment.
#[async_trait]
pub trait SubmissionTransport: Send + Sync {
    async fn submit(
        &self,
        form: &FormValues,
        files: &StagedFiles,
    ) -> Result<SubmissionResponse, ClientError>;
}

/// Multipart payload: every text control, then every file under `documentos`.
pub fn build_multipart(form: &FormValues, files: &StagedFiles) -> Result<Form, ClientError> {
    let mut multipart = Form::new();
    for (name, value) in form.to_pairs() {
        multipart = multipart.text(name, value);
    }
    for file in files.iter() {
        let part = Part::bytes(file.content.to_vec())
            .file_name(file.name.clone())
            .mime_str(&file.mime_type)?;
        multipart = multipart.part(DOCUMENTS_FIELD, part);
    }
    Ok(multipart)
}

#[async_trait]
impl SubmissionTransport for ApiClient {
    async fn submit(
        &self,
        form: &FormValues,
        files: &StagedFiles,
    ) -> Result<SubmissionResponse, ClientError> {
        let multipart = build_multipart(form, files)?;
        tracing::debug!(files = files.len(), "Submitting contract request");
        self.post_multipart(SUBMIT_PATH, multipart).await
    }
}
