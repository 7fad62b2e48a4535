//! services/api/src/web/params.rs
//!
//! The `{id}` path segment shared by the per-student routes.

use axum::{
    extract::{FromRequestParts, Path},
    http::request::Parts,
};

use crate::web::response::{student_not_found, HandlerError};

/// A student id taken from the path.
///
/// Student ids are integers, so a segment that does not parse as one (`abc`,
/// an id past `i64::MAX`) can never match a row and is carried as `None`.
/// Each handler then treats it exactly like an id with no student behind it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StudentId(pub Option<i64>);

impl<S> FromRequestParts<S> for StudentId
where
    S: Send + Sync,
{
    type Rejection = HandlerError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|_| student_not_found())?;
        Ok(Self(raw.parse().ok()))
    }
}
