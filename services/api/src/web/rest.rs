//! services/api/src/web/rest.rs
//!
//! Contains the Axum handlers for the JSON endpoints and the master
//! definition for the OpenAPI specification.

use crate::web::{
    params::StudentId,
    response::{storage_failure, ErrorBody, HandlerError},
    state::AppState,
};
use axum::{
    extract::State,
    response::Json,
};
use chrono::{SecondsFormat, Utc};
use serde::Serialize;
use std::sync::Arc;
use student_results_core::domain::ExamResult;
use utoipa::{OpenApi, ToSchema};

/// Reported by the demo endpoint.
const DEMO_VERSION: &str = "1.0.0";

//=========================================================================================
// OpenAPI Master Definition
//=========================================================================================

#[derive(OpenApi)]
#[openapi(
    paths(
        student_results_api_handler,
        health_handler,
        demo_handler,
    ),
    components(
        schemas(ResultResponse, HealthResponse, DemoResponse, ErrorBody)
    ),
    tags(
        (name = "Student Result Portal API", description = "JSON endpoints of the student result portal.")
    )
)]
pub struct ApiDoc;

//=========================================================================================
// API Response Structs
//=========================================================================================

/// One stored exam result, as returned by the JSON API.
#[derive(Debug, Serialize, ToSchema)]
pub struct ResultResponse {
    id: i64,
    student_id: Option<i64>,
    subject: String,
    marks: i64,
    grade: Option<String>,
    semester: String,
}

impl From<ExamResult> for ResultResponse {
    fn from(result: ExamResult) -> Self {
        Self {
            id: result.id,
            student_id: result.student_id,
            subject: result.subject,
            marks: result.marks,
            grade: result.grade,
            semester: result.semester,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
    status: String,
    /// ISO-8601, millisecond precision, UTC.
    timestamp: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct DemoResponse {
    message: String,
    timestamp: String,
    version: String,
    status: String,
}

fn now_iso8601() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

//=========================================================================================
// REST API Handlers
//=========================================================================================

/// List the results recorded for a student.
///
/// An unknown or non-integer student id yields an empty array.
#[utoipa::path(
    get,
    path = "/api/students/{id}/results",
    responses(
        (status = 200, description = "Results for the student", body = [ResultResponse]),
        (status = 500, description = "Storage failure", body = ErrorBody)
    ),
    params(
        ("id" = String, Path, description = "The student's id.")
    )
)]
pub async fn student_results_api_handler(
    State(app_state): State<Arc<AppState>>,
    StudentId(student_id): StudentId,
) -> Result<Json<Vec<ResultResponse>>, HandlerError> {
    let Some(student_id) = student_id else {
        return Ok(Json(Vec::new()));
    };
    let results = app_state
        .db
        .list_results_for_student(student_id)
        .await
        .map_err(|e| storage_failure("list results", e))?;

    Ok(Json(results.into_iter().map(ResultResponse::from).collect()))
}

/// Liveness probe.
#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "The server is up", body = HealthResponse)
    )
)]
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "OK".to_string(),
        timestamp: now_iso8601(),
    })
}

#[utoipa::path(
    get,
    path = "/demo",
    responses(
        (status = 200, description = "Static demo payload", body = DemoResponse)
    )
)]
pub async fn demo_handler() -> Json<DemoResponse> {
    Json(DemoResponse {
        message: "This is a demo endpoint added to demonstrate Git workflow".to_string(),
        timestamp: now_iso8601(),
        version: DEMO_VERSION.to_string(),
        status: "active".to_string(),
    })
}
