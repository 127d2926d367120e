//! JSON:API document shapes.
//!
//! Only the subset this service emits is modelled: single and collection
//! resource documents, and error documents.

use axum::http::{HeaderValue, StatusCode, header};
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use alumnos_domain::student::Student;

/// Media type required in `Accept` and set on every document response.
pub const MEDIA_TYPE: &str = "application/vnd.api+json";

/// Resource type name of a student.
pub const STUDENT_TYPE: &str = "Alumnos";

/// Path of the student collection, relative to the public base URL.
pub const STUDENT_COLLECTION_PATH: &str = "/api/alumnos";

#[derive(Debug, Serialize)]
pub struct JsonApiObject {
    version: &'static str,
}

impl Default for JsonApiObject {
    fn default() -> Self {
        Self { version: "1.0" }
    }
}

/// Top-level success document. `T` is a [`Resource`] or a `Vec` of them.
#[derive(Debug, Serialize)]
pub struct Document<T> {
    pub data: T,
    pub jsonapi: JsonApiObject,
}

impl<T> Document<T> {
    pub fn new(data: T) -> Self {
        Self {
            data,
            jsonapi: JsonApiObject::default(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct Attributes {
    pub nombre: String,
    pub direccion: String,
    pub email: String,
}

#[derive(Debug, Serialize)]
pub struct Links {
    #[serde(rename = "self")]
    pub self_link: String,
}

/// A student rendered as a JSON:API resource object.
#[derive(Debug, Serialize)]
pub struct Resource {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub attributes: Attributes,
    pub links: Links,
}

impl Resource {
    /// Render `student`, building its `self` link from `base_url`.
    #[must_use]
    pub fn from_student(student: Student, base_url: &str) -> Self {
        let id = student.id.to_string();
        Self {
            links: Links {
                self_link: format!("{base_url}{STUDENT_COLLECTION_PATH}/{id}"),
            },
            id,
            kind: STUDENT_TYPE,
            attributes: Attributes {
                nombre: student.name,
                direccion: student.address,
                email: student.email,
            },
        }
    }
}

/// Where in the request document an error originated.
#[derive(Debug, Serialize)]
pub struct ErrorSource {
    pub pointer: String,
}

/// A single JSON:API error object.
///
/// Validation errors carry their message in `details`, server errors in
/// `detail`; both keys are part of the public contract.
#[derive(Debug, Serialize)]
pub struct ErrorObject {
    pub status: String,
    pub title: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<ErrorSource>,
}

impl ErrorObject {
    #[must_use]
    pub fn new(status: StatusCode, title: &'static str) -> Self {
        Self {
            status: status.as_u16().to_string(),
            title,
            details: None,
            detail: None,
            source: None,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ErrorDocument {
    pub errors: Vec<ErrorObject>,
}

/// Serializes `T` as the body with the JSON:API media type.
pub struct JsonApi<T>(pub T);

impl<T: Serialize> IntoResponse for JsonApi<T> {
    fn into_response(self) -> Response {
        match serde_json::to_vec(&self.0) {
            Ok(body) => (
                [(header::CONTENT_TYPE, HeaderValue::from_static(MEDIA_TYPE))],
                body,
            )
                .into_response(),
            Err(err) => {
                tracing::error!(error = %err, "failed to serialize document");
                StatusCode::INTERNAL_SERVER_ERROR.into_response()
            }
        }
    }
}
