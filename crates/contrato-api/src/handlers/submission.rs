use crate::error::HttpAppError;
use crate::middleware::RequestId;
use crate::state::AppState;
use axum::{
    extract::{
        multipart::{Field, MultipartRejection},
        Multipart, State,
    },
    Extension,
    Json,
};
use bytes::{Bytes, BytesMut};
use contrato_core::models::ContractSubmission;
use contrato_core::{AppError, FileValidator, SubmissionResponse, DOCUMENTS_FIELD};
use std::collections::BTreeMap;
use std::sync::Arc;

pub const SUBMISSION_ACCEPTED: &str = "Solicitação de contrato recebida com sucesso!";

/// A file part that passed the upload policy and waits to be written.
struct IncomingFile {
    original_name: String,
    content_type: String,
    data: Bytes,
}

/// Read a file part chunk by chunk, failing as soon as it exceeds the size limit.
async fn read_limited(
    field: &mut Field<'_>,
    original_name: &str,
    validator: &FileValidator,
) -> Result<Bytes, HttpAppError> {
    let mut data = BytesMut::new();
    while let Some(chunk) = field.chunk().await? {
        validator
            .validate_file_size((data.len() + chunk.len()) as u64)
            .map_err(|e| AppError::from_validation(original_name, e))?;
        data.extend_from_slice(&chunk);
    }
    Ok(data.freeze())
}

#[utoipa::path(
    post,
    path = "/enviar-formulario",
    tag = "submissions",
    request_body(content = inline(Object), content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "Submission accepted, or rejected by the upload policy (success = false)", body = SubmissionResponse),
        (status = 400, description = "Malformed multipart body", body = SubmissionResponse),
        (status = 500, description = "Internal server error", body = SubmissionResponse)
    )
)]
pub async fn submit_contract(
    State(state): State<Arc<AppState>>,
    Extension(RequestId(request_id)): Extension<RequestId>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<SubmissionResponse>, HttpAppError> {
    let mut multipart = multipart?;
    let mut fields = BTreeMap::new();
    let mut files: Vec<IncomingFile> = Vec::new();

    // Parse and validate everything before writing, so a rejected request stores nothing.
    while let Some(mut field) = multipart.next_field().await? {
        let name = field.name().unwrap_or_default().to_string();

        let original_name = match field.file_name().map(str::to_string) {
            None => {
                let value = field.text().await?;
                fields.insert(name, value);
                continue;
            }
            // Browsers send an empty part when no file was chosen.
            Some(file_name) if file_name.is_empty() => continue,
            Some(file_name) => file_name,
        };

        if name != DOCUMENTS_FIELD {
            return Err(AppError::UnexpectedFileField(name).into());
        }

        state
            .validator
            .validate_file_count(files.len() + 1)
            .map_err(|e| AppError::from_validation(&original_name, e))?;

        let content_type = field
            .content_type()
            .unwrap_or("application/octet-stream")
            .to_string();
        state
            .validator
            .validate_file(&original_name, &content_type)
            .map_err(|e| AppError::from_validation(&original_name, e))?;

        let data = read_limited(&mut field, &original_name, &state.validator).await?;

        files.push(IncomingFile {
            original_name,
            content_type,
            data,
        });
    }

    let mut stored = Vec::with_capacity(files.len());
    for file in files {
        let stored_file = state
            .storage
            .store(
                DOCUMENTS_FIELD,
                &file.original_name,
                &file.content_type,
                file.data,
            )
            .await?;
        stored.push(stored_file);
    }

    let submission = ContractSubmission::new(fields, stored);
    state.journal.record(&submission).await?;

    tracing::info!(
        request_id = %request_id,
        files = submission.files.len(),
        "Contract submission accepted"
    );

    Ok(Json(SubmissionResponse::accepted(SUBMISSION_ACCEPTED)))
}
