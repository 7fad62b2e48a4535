pub mod forms;
pub mod pages;
pub mod params;
pub mod response;
pub mod rest;
pub mod state;

use axum::{routing::get, Router};
use std::sync::Arc;
use tower_http::{services::ServeDir, trace::TraceLayer};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

pub use pages::{
    create_result_handler, create_student_handler, index_handler, list_students_handler,
    new_result_handler, new_student_handler, student_results_handler,
};
pub use rest::{demo_handler, health_handler, student_results_api_handler, ApiDoc};
pub use state::AppState;

/// Builds the complete application: page and API routes, Swagger UI, and the
/// static asset directory as the fallback.
pub fn router(app_state: Arc<AppState>) -> Router {
    let static_files = ServeDir::new(&app_state.config.static_dir);

    let app_routes = Router::new()
        .route("/", get(index_handler))
        .route(
            "/students",
            get(list_students_handler).post(create_student_handler),
        )
        .route("/students/new", get(new_student_handler))
        .route(
            "/students/{id}/results",
            get(student_results_handler).post(create_result_handler),
        )
        .route("/students/{id}/results/new", get(new_result_handler))
        .route("/api/students/{id}/results", get(student_results_api_handler))
        .route("/health", get(health_handler))
        .route("/demo", get(demo_handler))
        .with_state(app_state);

    Router::new()
        .merge(app_routes)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .fallback_service(static_files)
        .layer(TraceLayer::new_for_http())
}
