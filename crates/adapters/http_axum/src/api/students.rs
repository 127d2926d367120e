//! JSON:API handlers for students.

use std::str::FromStr;

use axum::body::Bytes;
use axum::extract::{Path, State};
use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};
use serde_json::Value;

use alumnos_app::ports::StudentRepository;
use alumnos_domain::error::{AlumnosError, NotFoundError};
use alumnos_domain::id::StudentId;
use alumnos_domain::student::Student;
use alumnos_domain::validation::{AttributeValue, Field, StudentDraft};

use crate::document::{Document, JsonApi, Resource};
use crate::error::ApiError;
use crate::state::AppState;

type Single = JsonApi<Document<Resource>>;

/// Possible responses from the list endpoint.
pub enum ListResponse {
    Ok(JsonApi<Document<Vec<Resource>>>),
}

impl IntoResponse for ListResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(doc) => doc.into_response(),
        }
    }
}

/// Possible responses from the get and update endpoints.
pub enum GetResponse {
    Ok(Single),
}

impl IntoResponse for GetResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(doc) => doc.into_response(),
        }
    }
}

/// Possible responses from the create endpoint.
pub enum CreateResponse {
    Created { location: String, document: Single },
}

impl IntoResponse for CreateResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Created { location, document } => (
                StatusCode::CREATED,
                [(header::LOCATION, location)],
                document,
            )
                .into_response(),
        }
    }
}

/// Possible responses from the delete endpoint.
pub enum DeleteResponse {
    NoContent,
}

impl IntoResponse for DeleteResponse {
    fn into_response(self) -> Response {
        match self {
            Self::NoContent => StatusCode::NO_CONTENT.into_response(),
        }
    }
}

fn single(student: Student, base_url: &str) -> Single {
    JsonApi(Document::new(Resource::from_student(student, base_url)))
}

/// A path segment that is not an integer cannot name a stored student.
fn parse_id(raw: &str) -> Result<StudentId, ApiError> {
    StudentId::from_str(raw).map_err(|_| {
        ApiError::from(AlumnosError::from(NotFoundError {
            entity: "Student",
            id: raw.to_string(),
        }))
    })
}

/// Pull the student attributes out of a request document.
///
/// An empty body or a document without `data.attributes` yields a draft with
/// every field absent; only unparseable JSON is rejected. String values are
/// trimmed.
fn parse_draft(body: &[u8]) -> Result<StudentDraft, ApiError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(StudentDraft::default());
    }
    let document: Value = serde_json::from_slice(body).map_err(ApiError::MalformedDocument)?;
    let attributes = document
        .pointer("/data/attributes")
        .and_then(Value::as_object);

    let value = |field: Field| match attributes.and_then(|attrs| attrs.get(field.attribute())) {
        None => AttributeValue::Absent,
        Some(Value::Null) => AttributeValue::Null,
        Some(Value::String(text)) => AttributeValue::Text(text.trim().to_string()),
        Some(_) => AttributeValue::Other,
    };

    Ok(StudentDraft {
        name: value(Field::Name),
        address: value(Field::Address),
        email: value(Field::Email),
    })
}

/// Parse the body of an update. A missing id outranks a malformed body, so
/// the record is looked up before a parse failure is reported.
async fn update_draft<SR>(
    state: &AppState<SR>,
    id: StudentId,
    body: &[u8],
) -> Result<StudentDraft, ApiError>
where
    SR: StudentRepository + Send + Sync + 'static,
{
    match parse_draft(body) {
        Ok(draft) => Ok(draft),
        Err(err) => {
            state.student_service.get_student(id).await?;
            Err(err)
        }
    }
}

/// `GET /api/alumnos`
pub async fn list<SR>(State(state): State<AppState<SR>>) -> Result<ListResponse, ApiError>
where
    SR: StudentRepository + Send + Sync + 'static,
{
    let students = state.student_service.list_students().await?;
    let resources: Vec<Resource> = students
        .into_iter()
        .map(|student| Resource::from_student(student, &state.base_url))
        .collect();
    Ok(ListResponse::Ok(JsonApi(Document::new(resources))))
}

/// `POST /api/alumnos`
pub async fn create<SR>(
    State(state): State<AppState<SR>>,
    body: Bytes,
) -> Result<CreateResponse, ApiError>
where
    SR: StudentRepository + Send + Sync + 'static,
{
    let draft = parse_draft(&body)?;
    let created = state.student_service.create_student(draft).await?;
    let document = single(created, &state.base_url);
    Ok(CreateResponse::Created {
        location: document.0.data.links.self_link.clone(),
        document,
    })
}

/// `GET /api/alumnos/:id`
pub async fn get<SR>(
    State(state): State<AppState<SR>>,
    Path(id): Path<String>,
) -> Result<GetResponse, ApiError>
where
    SR: StudentRepository + Send + Sync + 'static,
{
    let id = parse_id(&id)?;
    let student = state.student_service.get_student(id).await?;
    Ok(GetResponse::Ok(single(student, &state.base_url)))
}

/// `PUT /api/alumnos/:id`
pub async fn replace<SR>(
    State(state): State<AppState<SR>>,
    Path(id): Path<String>,
    body: Bytes,
) -> Result<GetResponse, ApiError>
where
    SR: StudentRepository + Send + Sync + 'static,
{
    let id = parse_id(&id)?;
    let draft = update_draft(&state, id, &body).await?;
    let student = state.student_service.replace_student(id, draft).await?;
    Ok(GetResponse::Ok(single(student, &state.base_url)))
}

/// `PATCH /api/alumnos/:id`
pub async fn merge<SR>(
    State(state): State<AppState<SR>>,
    Path(id): Path<String>,
    body: Bytes,
) -> Result<GetResponse, ApiError>
where
    SR: StudentRepository + Send + Sync + 'static,
{
    let id = parse_id(&id)?;
    let draft = update_draft(&state, id, &body).await?;
    let student = state.student_service.merge_student(id, draft).await?;
    Ok(GetResponse::Ok(single(student, &state.base_url)))
}

/// `DELETE /api/alumnos/:id`
pub async fn delete<SR>(
    State(state): State<AppState<SR>>,
    Path(id): Path<String>,
) -> Result<DeleteResponse, ApiError>
where
    SR: StudentRepository + Send + Sync + 'static,
{
    let id = parse_id(&id)?;
    state.student_service.delete_student(id).await?;
    Ok(DeleteResponse::NoContent)
}
