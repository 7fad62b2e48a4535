//! crates/student_results_core/src/ports.rs
//!
//! Defines the service contracts (traits) for the application's core logic.
//! These traits form the boundary of the hexagonal architecture, keeping the core
//! independent of the concrete database and HTML rendering.

use crate::domain::{ExamResult, NewResult, NewStudent, Student};
use async_trait::async_trait;

//=========================================================================================
// Generic Port Error and Result Types
//=========================================================================================

/// A generic error type for all port operations.
/// This abstracts away the specific errors from external services.
#[derive(Debug, thiserror::Error)]
pub enum PortError {
    /// A unique or NOT NULL constraint rejected a write.
    #[error("Constraint violated: {0}")]
    Constraint(String),
    #[error("An unexpected error occurred: {0}")]
    Unexpected(String),
}

impl PortError {
    /// The underlying message, without the variant prefix.
    pub fn message(&self) -> &str {
        match self {
            PortError::Constraint(msg) | PortError::Unexpected(msg) => msg,
        }
    }
}

/// A convenience type alias for `Result<T, PortError>`.
pub type PortResult<T> = Result<T, PortError>;

//=========================================================================================
// Service Ports (Traits)
//=========================================================================================

#[async_trait]
pub trait DatabaseService: Send + Sync {
    // --- Students ---
    async fn list_students(&self) -> PortResult<Vec<Student>>;

    /// Inserts a student and returns the generated id.
    async fn create_student(&self, student: &NewStudent) -> PortResult<i64>;

    async fn get_student(&self, student_id: i64) -> PortResult<Option<Student>>;

    // --- Results ---
    async fn list_results_for_student(&self, student_id: i64) -> PortResult<Vec<ExamResult>>;

    /// Inserts a result with its grade computed from the marks, returning the
    /// generated id. The student is not required to exist.
    async fn create_result(&self, student_id: i64, result: &NewResult) -> PortResult<i64>;
}

/// A page the renderer knows how to draw, together with the data it needs.
#[derive(Debug, Clone, Copy)]
pub enum View<'a> {
    Index,
    Students {
        students: &'a [Student],
    },
    NewStudent,
    StudentResults {
        student: &'a Student,
        results: &'a [ExamResult],
    },
    NewResult {
        student: Option<&'a Student>,
    },
}

impl View<'_> {
    /// The template identifier for this view.
    pub fn name(&self) -> &'static str {
        match self {
            View::Index => "index",
            View::Students { .. } => "students",
            View::NewStudent => "new-student",
            View::StudentResults { .. } => "student-results",
            View::NewResult { .. } => "new-result",
        }
    }
}

pub trait ViewRenderer: Send + Sync {
    /// Produces the full HTML document for `view`.
    fn render(&self, view: &View<'_>) -> PortResult<String>;
}
