//! services/api/src/web/pages.rs
//!
//! The Axum handlers behind the server-rendered HTML pages and the form posts
//! that create students and results.

use axum::{
    extract::State,
    response::{Html, Response},
};
use std::sync::Arc;
use student_results_core::{domain::Student, ports::View};
use tracing::info;

use crate::web::{
    forms::{CreateResultForm, CreateStudentForm, FormOrJson},
    params::StudentId,
    response::{found, render, storage_failure, student_not_found, HandlerError},
    state::AppState,
};

/// Looks the student up, skipping the query for ids that cannot exist.
async fn find_student(
    app_state: &AppState,
    StudentId(student_id): StudentId,
) -> Result<Option<Student>, HandlerError> {
    let Some(student_id) = student_id else {
        return Ok(None);
    };
    app_state
        .db
        .get_student(student_id)
        .await
        .map_err(|e| storage_failure("get student", e))
}

/// GET / - Landing page
pub async fn index_handler(
    State(app_state): State<Arc<AppState>>,
) -> Result<Html<String>, HandlerError> {
    render(&app_state, &View::Index)
}

/// GET /students - Every student, in storage order
pub async fn list_students_handler(
    State(app_state): State<Arc<AppState>>,
) -> Result<Html<String>, HandlerError> {
    let students = app_state
        .db
        .list_students()
        .await
        .map_err(|e| storage_failure("list students", e))?;

    render(&app_state, &View::Students { students: &students })
}

/// GET /students/new - The "add student" form
pub async fn new_student_handler(
    State(app_state): State<Arc<AppState>>,
) -> Result<Html<String>, HandlerError> {
    render(&app_state, &View::NewStudent)
}

/// POST /students - Create a student, then go back to the list
pub async fn create_student_handler(
    State(app_state): State<Arc<AppState>>,
    FormOrJson(form): FormOrJson<CreateStudentForm>,
) -> Result<Response, HandlerError> {
    let student_id = app_state
        .db
        .create_student(&form.into())
        .await
        .map_err(|e| storage_failure("create student", e))?;

    info!("Created student {}", student_id);
    Ok(found("/students".to_string()))
}

/// GET /students/{id}/results - One student and their results
pub async fn student_results_handler(
    State(app_state): State<Arc<AppState>>,
    student_id: StudentId,
) -> Result<Html<String>, HandlerError> {
    // 1. The student must exist before its results are fetched
    let student = find_student(&app_state, student_id)
        .await?
        .ok_or_else(student_not_found)?;

    // 2. Fetch the results
    let results = app_state
        .db
        .list_results_for_student(student.id)
        .await
        .map_err(|e| storage_failure("list results", e))?;

    render(
        &app_state,
        &View::StudentResults {
            student: &student,
            results: &results,
        },
    )
}

/// GET /students/{id}/results/new - The "add result" form
///
/// A missing student is handed to the view as absent rather than answered
/// with 404.
pub async fn new_result_handler(
    State(app_state): State<Arc<AppState>>,
    student_id: StudentId,
) -> Result<Html<String>, HandlerError> {
    let student = find_student(&app_state, student_id).await?;

    render(
        &app_state,
        &View::NewResult {
            student: student.as_ref(),
        },
    )
}

/// POST /students/{id}/results - Record a result, graded server-side
pub async fn create_result_handler(
    State(app_state): State<Arc<AppState>>,
    StudentId(student_id): StudentId,
    FormOrJson(form): FormOrJson<CreateResultForm>,
) -> Result<Response, HandlerError> {
    // The student is not looked up first; any integer id is stored as given.
    // A non-integer id has no column value to store.
    let student_id = student_id.ok_or_else(student_not_found)?;
    let result_id = app_state
        .db
        .create_result(student_id, &form.into())
        .await
        .map_err(|e| storage_failure("create result", e))?;

    info!("Created result {} for student {}", result_id, student_id);
    Ok(found(format!("/students/{}/results", student_id)))
}
