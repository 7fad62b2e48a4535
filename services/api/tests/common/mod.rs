#![allow(dead_code)]

use async_trait::async_trait;
use axum::{
    body::Body,
    http::{header, HeaderMap, Request, StatusCode},
    Router,
};
use portal_api::{
    adapters::{connect_pool, DbAdapter, HtmlRenderer},
    config::Config,
    web::{router, AppState},
};
use std::path::PathBuf;
use std::sync::Arc;
use student_results_core::domain::{ExamResult, NewResult, NewStudent, Student};
use student_results_core::ports::{DatabaseService, PortError, PortResult};
use tower::ServiceExt;

pub const LOCKED_MESSAGE: &str = "SQLITE_BUSY: database is locked";

pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Vec<u8>,
}

impl TestResponse {
    pub fn text(&self) -> String {
        String::from_utf8(self.body.clone()).expect("utf-8 body")
    }

    pub fn json(&self) -> serde_json::Value {
        serde_json::from_slice(&self.body).expect("json body")
    }

    pub fn location(&self) -> Option<&str> {
        self.headers
            .get(header::LOCATION)
            .and_then(|v| v.to_str().ok())
    }
}

/// A fresh in-memory database with both tables created.
pub async fn test_db() -> Arc<DbAdapter> {
    let pool = connect_pool("sqlite::memory:", 1)
        .await
        .expect("open in-memory database");
    let db = Arc::new(DbAdapter::new(pool));
    db.create_tables().await.expect("create tables");
    db
}

/// The full router over `db`, serving the repository's `public/`.
pub fn app_with_db(db: Arc<dyn DatabaseService>) -> Router {
    let config = Config {
        static_dir: PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../public"),
        ..Config::default()
    };
    let app_state = Arc::new(AppState {
        db,
        views: Arc::new(HtmlRenderer::new()),
        config: Arc::new(config),
    });
    router(app_state)
}

/// The full router over a fresh in-memory database.
pub async fn test_app() -> Router {
    app_with_db(test_db().await)
}

/// A database whose every call fails with [`LOCKED_MESSAGE`], except that
/// `get_student` hands back `student` when one is set.
#[derive(Default)]
pub struct FailingDb {
    pub student: Option<Student>,
}

impl FailingDb {
    /// Fails everything, the student lookup included.
    pub fn unavailable() -> Arc<dyn DatabaseService> {
        Arc::new(Self::default())
    }

    /// Finds `student`, then fails the results query.
    pub fn results_unavailable(student: Student) -> Arc<dyn DatabaseService> {
        Arc::new(Self {
            student: Some(student),
        })
    }

    fn failure() -> PortError {
        PortError::Unexpected(LOCKED_MESSAGE.to_string())
    }
}

#[async_trait]
impl DatabaseService for FailingDb {
    async fn list_students(&self) -> PortResult<Vec<Student>> {
        Err(Self::failure())
    }

    async fn create_student(&self, _student: &NewStudent) -> PortResult<i64> {
        Err(Self::failure())
    }

    async fn get_student(&self, _student_id: i64) -> PortResult<Option<Student>> {
        match &self.student {
            Some(student) => Ok(Some(student.clone())),
            None => Err(Self::failure()),
        }
    }

    async fn list_results_for_student(&self, _student_id: i64) -> PortResult<Vec<ExamResult>> {
        Err(Self::failure())
    }

    async fn create_result(&self, _student_id: i64, _result: &NewResult) -> PortResult<i64> {
        Err(Self::failure())
    }
}

pub fn john_doe() -> Student {
    Student {
        id: 1,
        name: "John Doe".to_string(),
        roll_number: "2021001".to_string(),
        email: "john.doe@example.com".to_string(),
    }
}

pub async fn send(app: &Router, request: Request<Body>) -> TestResponse {
    let response = app.clone().oneshot(request).await.expect("router is infallible");
    let status = response.status();
    let headers = response.headers().clone();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("read body")
        .to_vec();
    TestResponse {
        status,
        headers,
        body,
    }
}

pub async fn get(app: &Router, uri: &str) -> TestResponse {
    let request = Request::builder()
        .uri(uri)
        .body(Body::empty())
        .expect("build request");
    send(app, request).await
}

pub async fn post_form(app: &Router, uri: &str, body: &str) -> TestResponse {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(body.to_string()))
        .expect("build request");
    send(app, request).await
}

/// A POST whose body carries no `Content-Type` header.
pub async fn post_raw(app: &Router, uri: &str, body: &str) -> TestResponse {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .body(Body::from(body.to_string()))
        .expect("build request");
    send(app, request).await
}

pub async fn post_json(app: &Router, uri: &str, body: serde_json::Value) -> TestResponse {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .expect("build request");
    send(app, request).await
}

/// Registers John Doe through the form route and returns the response.
pub async fn create_john_doe(app: &Router) -> TestResponse {
    post_form(
        app,
        "/students",
        "name=John+Doe&roll_number=2021001&email=john.doe%40example.com",
    )
    .await
}
