//! HTTP surface for the student records service.
//!
//! This module exposes a compact Axum router:
//!
//! - `POST /students` – Validate and store a student; returns `201` with the stored record.
//! - `GET /students` – List every stored student (unordered).
//! - `GET /students/{id}` – Fetch one student.
//! - `PUT /students/{id}` – Replace a student's name, age, and email.
//! - `DELETE /students/{id}` – Remove a student; returns `204` with no body.
//! - `GET /students/{id}/summary` – Ask the text-generation provider to describe a student.
//! - `GET /metrics` – Observe activity counters.
//! - `GET /commands` – Machine-readable command catalog for quick discovery by tools.
//!
//! Errors are returned as plain text with `400` for malformed ids, bodies, or invalid fields,
//! `404` for unknown students, and an opaque `500` when summary generation fails.

use crate::metrics::MetricsSnapshot;
use crate::model::{Student, StudentId, StudentPayload};
use crate::repository::RepositoryError;
use crate::service::{ServiceError, StudentApi};
use axum::{
    Json, Router,
    extract::{Path, State, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
};
use serde::Serialize;
use serde_json::json;
use std::sync::Arc;
use tower_http::trace::TraceLayer;

/// Build the HTTP router exposing the student API surface.
pub fn create_router<S>(service: Arc<S>) -> Router
where
    S: StudentApi + 'static,
{
    Router::new()
        .route(
            "/students",
            get(list_students::<S>).post(create_student::<S>),
        )
        .route(
            "/students/:id",
            get(get_student::<S>)
                .put(update_student::<S>)
                .delete(delete_student::<S>),
        )
        .route("/students/:id/summary", get(summarize_student::<S>))
        .route("/metrics", get(get_metrics::<S>))
        .route("/commands", get(get_commands))
        .layer(TraceLayer::new_for_http())
        .with_state(service)
}

/// Create a student from the request body.
async fn create_student<S>(
    State(service): State<Arc<S>>,
    payload: Result<Json<StudentPayload>, JsonRejection>,
) -> Result<(StatusCode, Json<Student>), AppError>
where
    S: StudentApi,
{
    let Json(payload) = payload?;
    let student = service.create_student(payload).await?;
    Ok((StatusCode::CREATED, Json(student)))
}

async fn list_students<S>(State(service): State<Arc<S>>) -> Json<Vec<Student>>
where
    S: StudentApi,
{
    Json(service.list_students().await)
}

async fn get_student<S>(
    State(service): State<Arc<S>>,
    Path(raw_id): Path<String>,
) -> Result<Json<Student>, AppError>
where
    S: StudentApi,
{
    let id = parse_id(&raw_id)?;
    Ok(Json(service.get_student(id).await?))
}

/// Replace the mutable fields of a student.
///
/// The id is checked before the body, so a malformed id wins over a malformed payload.
async fn update_student<S>(
    State(service): State<Arc<S>>,
    Path(raw_id): Path<String>,
    payload: Result<Json<StudentPayload>, JsonRejection>,
) -> Result<Json<Student>, AppError>
where
    S: StudentApi,
{
    let id = parse_id(&raw_id)?;
    let Json(payload) = payload?;
    Ok(Json(service.update_student(id, payload).await?))
}

async fn delete_student<S>(
    State(service): State<Arc<S>>,
    Path(raw_id): Path<String>,
) -> Result<StatusCode, AppError>
where
    S: StudentApi,
{
    let id = parse_id(&raw_id)?;
    service.delete_student(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Response body for `GET /students/{id}/summary`.
#[derive(Serialize)]
struct SummaryResponse {
    summary: String,
}

async fn summarize_student<S>(
    State(service): State<Arc<S>>,
    Path(raw_id): Path<String>,
) -> Result<Json<SummaryResponse>, AppError>
where
    S: StudentApi,
{
    let id = parse_id(&raw_id)?;
    let summary = service.summarize_student(id).await?;
    Ok(Json(SummaryResponse { summary }))
}

/// Return the activity counters and the number of stored students.
async fn get_metrics<S>(State(service): State<Arc<S>>) -> Json<MetricsSnapshot>
where
    S: StudentApi,
{
    Json(service.metrics_snapshot())
}

/// Descriptor for a single command in the discovery catalog.
#[derive(Serialize)]
struct CommandDescriptor {
    name: &'static str,
    method: &'static str,
    path: &'static str,
    description: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    request_example: Option<serde_json::Value>,
}

/// Response body for `GET /commands`.
#[derive(Serialize)]
struct CommandsResponse {
    commands: Vec<CommandDescriptor>,
}

/// Enumerate supported HTTP commands for discovery in tools.
async fn get_commands() -> Json<CommandsResponse> {
    let student_example = json!({
        "name": "Ann",
        "age": 20,
        "email": "ann@example.com"
    });
    Json(CommandsResponse {
        commands: vec![
            CommandDescriptor {
                name: "create_student",
                method: "POST",
                path: "/students",
                description: "Store a student and return it with its assigned id (201).",
                request_example: Some(student_example.clone()),
            },
            CommandDescriptor {
                name: "list_students",
                method: "GET",
                path: "/students",
                description: "Return every stored student in no particular order.",
                request_example: None,
            },
            CommandDescriptor {
                name: "get_student",
                method: "GET",
                path: "/students/{id}",
                description: "Return one student or 404.",
                request_example: None,
            },
            CommandDescriptor {
                name: "update_student",
                method: "PUT",
                path: "/students/{id}",
                description: "Replace a student's name, age, and email; the id never changes.",
                request_example: Some(student_example),
            },
            CommandDescriptor {
                name: "delete_student",
                method: "DELETE",
                path: "/students/{id}",
                description: "Remove a student (204). Its id is never reused.",
                request_example: None,
            },
            CommandDescriptor {
                name: "summarize_student",
                method: "GET",
                path: "/students/{id}/summary",
                description: "Generate a short summary of a student. Response returns { \"summary\": string }.",
                request_example: None,
            },
            CommandDescriptor {
                name: "metrics",
                method: "GET",
                path: "/metrics",
                description: "Return activity counters useful for observability dashboards.",
                request_example: None,
            },
        ],
    })
}

fn parse_id(raw: &str) -> Result<StudentId, AppError> {
    raw.parse().map_err(|_| AppError::InvalidId)
}

enum AppError {
    InvalidId,
    InvalidBody,
    Service(ServiceError),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            Self::InvalidId => (StatusCode::BAD_REQUEST, "Invalid student ID").into_response(),
            Self::InvalidBody => (StatusCode::BAD_REQUEST, "Invalid request body").into_response(),
            Self::Service(ServiceError::Validation(error)) => {
                (StatusCode::BAD_REQUEST, error.to_string()).into_response()
            }
            Self::Service(ServiceError::Repository(RepositoryError::NotFound(_))) => {
                (StatusCode::NOT_FOUND, "Student not found").into_response()
            }
            Self::Service(ServiceError::Summary(_)) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Failed to generate summary",
            )
                .into_response(),
        }
    }
}

impl From<ServiceError> for AppError {
    fn from(inner: ServiceError) -> Self {
        Self::Service(inner)
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        tracing::debug!(%rejection, "Rejected request body");
        Self::InvalidBody
    }
}
