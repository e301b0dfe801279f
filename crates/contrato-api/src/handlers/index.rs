use crate::state::AppState;
use axum::{extract::State, response::Html};
use std::sync::Arc;

/// Form page compiled into the binary, served when the static directory has none.
const EMBEDDED_FORM_PAGE: &str = include_str!("../../static/index.html");

#[utoipa::path(
    get,
    path = "/",
    tag = "pages",
    responses(
        (status = 200, description = "Contract request form page", body = String, content_type = "text/html")
    )
)]
pub async fn form_page(State(state): State<Arc<AppState>>) -> Html<String> {
    let path = state.config.static_dir().join("index.html");
    match tokio::fs::read_to_string(&path).await {
        Ok(page) => Html(page),
        Err(e) => {
            tracing::debug!(
                path = %path.display(),
                error = %e,
                "Static form page unavailable, serving embedded page"
            );
            Html(EMBEDDED_FORM_PAGE.to_string())
        }
    }
}
