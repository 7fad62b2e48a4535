//! services/api/src/web/response.rs
//!
//! Response helpers shared by the HTML and JSON handlers.

use axum::{
    http::{header, StatusCode},
    response::{Html, IntoResponse, Response},
    Json,
};
use serde::Serialize;
use student_results_core::ports::{PortError, View};
use tracing::error;
use utoipa::ToSchema;

use crate::web::state::AppState;

/// The JSON body sent with every error response.
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorBody {
    pub error: String,
}

/// The error half of every handler's return type.
pub type HandlerError = (StatusCode, Json<ErrorBody>);

/// Maps a storage failure to a 500 carrying the raw database message.
pub fn storage_failure(action: &str, err: PortError) -> HandlerError {
    error!("Failed to {}: {:?}", action, err);
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ErrorBody {
            error: err.message().to_string(),
        }),
    )
}

pub fn student_not_found() -> HandlerError {
    (
        StatusCode::NOT_FOUND,
        Json(ErrorBody {
            error: "Student not found".to_string(),
        }),
    )
}

/// A `302 Found` redirect.
pub fn found(location: String) -> Response {
    (StatusCode::FOUND, [(header::LOCATION, location)]).into_response()
}

/// Renders `view` through the configured renderer.
pub fn render(state: &AppState, view: &View<'_>) -> Result<Html<String>, HandlerError> {
    state
        .views
        .render(view)
        .map(Html)
        .map_err(|e| storage_failure(&format!("render view '{}'", view.name()), e))
}
