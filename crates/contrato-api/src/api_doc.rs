//! OpenAPI documentation.

use utoipa::OpenApi;

use crate::handlers;
use contrato_core::SubmissionResponse;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Contrato API",
        version = "0.1.0",
        description = "Intake of business contract requests: company, address, legal representative and contract data plus attached documents, submitted as multipart/form-data."
    ),
    paths(
        handlers::index::form_page,
        handlers::submission::submit_contract,
        handlers::health::health_check,
    ),
    components(schemas(SubmissionResponse, handlers::health::HealthCheckResponse)),
    tags(
        (name = "pages", description = "Static form page"),
        (name = "submissions", description = "Contract request intake"),
        (name = "health", description = "Health checks")
    )
)]
pub struct ApiDoc;

/// The OpenAPI document served at `/api/openapi.json`.
pub fn get_openapi_spec() -> utoipa::openapi::OpenApi {
    ApiDoc::openapi()
}
