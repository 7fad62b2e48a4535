//! services/api/src/web/forms.rs
//!
//! Request body types for the creation routes, plus the extractor that accepts
//! them either urlencoded or as JSON.

use axum::{
    extract::{FromRequest, Request},
    http::{header::CONTENT_TYPE, StatusCode},
    response::{IntoResponse, Response},
    Form, Json,
};
use serde::{de::DeserializeOwned, de::IgnoredAny, Deserialize, Deserializer};
use student_results_core::domain::{NewResult, NewStudent};

use crate::web::response::ErrorBody;

enum BodyKind {
    Json,
    Form,
    Unparsed,
}

fn body_kind(req: &Request) -> BodyKind {
    let content_type = req
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default();

    if content_type.starts_with("application/json") {
        BodyKind::Json
    } else if content_type.starts_with("application/x-www-form-urlencoded") {
        BodyKind::Form
    } else {
        BodyKind::Unparsed
    }
}

//=========================================================================================
// Body Extractor
//=========================================================================================

/// Deserializes the body as JSON or as an HTML form, according to the request's
/// `Content-Type`.
///
/// Any other body (or none) is read as an empty payload, so every field comes
/// out absent and the storage constraints decide the outcome.
#[derive(Debug)]
pub struct FormOrJson<T>(pub T);

impl<T, S> FromRequest<S> for FormOrJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match body_kind(&req) {
            BodyKind::Json => {
                let Json(value) = Json::<T>::from_request(req, state)
                    .await
                    .map_err(IntoResponse::into_response)?;
                Ok(Self(value))
            }
            BodyKind::Form => {
                let Form(value) = Form::<T>::from_request(req, state)
                    .await
                    .map_err(IntoResponse::into_response)?;
                Ok(Self(value))
            }
            BodyKind::Unparsed => {
                let empty = serde_json::Value::Object(serde_json::Map::new());
                serde_json::from_value(empty).map(Self).map_err(|e| {
                    (
                        StatusCode::UNPROCESSABLE_ENTITY,
                        Json(ErrorBody {
                            error: e.to_string(),
                        }),
                    )
                        .into_response()
                })
            }
        }
    }
}

//=========================================================================================
// Payloads
//=========================================================================================

/// The fields of the "add student" form.
#[derive(Debug, Default, Deserialize)]
pub struct CreateStudentForm {
    pub name: Option<String>,
    pub roll_number: Option<String>,
    pub email: Option<String>,
}

impl From<CreateStudentForm> for NewStudent {
    fn from(form: CreateStudentForm) -> Self {
        NewStudent {
            name: form.name,
            roll_number: form.roll_number,
            email: form.email,
        }
    }
}

/// The fields of the "add result" form.
#[derive(Debug, Default, Deserialize)]
pub struct CreateResultForm {
    pub subject: Option<String>,
    /// Accepted as a JSON number or as numeric text (form posts are all text).
    #[serde(default, deserialize_with = "deserialize_marks")]
    pub marks: Option<i64>,
    pub semester: Option<String>,
}

impl From<CreateResultForm> for NewResult {
    fn from(form: CreateResultForm) -> Self {
        NewResult {
            subject: form.subject,
            marks: form.marks,
            semester: form.semester,
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum MarksInput {
    Number(i64),
    Text(String),
    Other(IgnoredAny),
}

/// Anything that is not an integer ends up as `None`, which the NOT NULL
/// constraint on `results.marks` then rejects.
fn deserialize_marks<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let marks = match Option::<MarksInput>::deserialize(deserializer)? {
        Some(MarksInput::Number(n)) => Some(n),
        Some(MarksInput::Text(text)) => text.trim().parse().ok(),
        Some(MarksInput::Other(_)) | None => None,
    };
    Ok(marks)
}
