use crate::config::Config;
use crate::errors::AppError;
use crate::models::{NewStudent, Student};
use crate::services::StudentService;
use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    Json,
};
use serde_json::json;
use std::sync::Arc;

/// Shared application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    /// Application configuration.
    pub config: Config,
    pub students: StudentService,
}

/// Health check endpoint.
pub async fn health() -> (StatusCode, Json<serde_json::Value>) {
    (
        StatusCode::OK,
        Json(json!({
            "status": "healthy",
            "service": "student-registry",
            "version": env!("CARGO_PKG_VERSION")
        })),
    )
}

/// POST /api/v1/students
///
/// Registers a student. The stored record, enriched with a booking id and a
/// joke, is returned with `201 Created`.
pub async fn create_student(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<NewStudent>, JsonRejection>,
) -> Result<(StatusCode, Json<Student>), AppError> {
    let Json(payload) = payload?;
    tracing::info!("POST /students - name: {}", payload.name);

    payload.validate()?;

    let mut student = Student::from(payload);
    state.students.add_student(&mut student).await?;

    Ok((StatusCode::CREATED, Json(student)))
}

/// GET /api/v1/students
pub async fn list_students(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<Student>>, AppError> {
    let students = state.students.list_students().await?;
    tracing::debug!("GET /students - {} student(s)", students.len());
    Ok(Json(students))
}

/// GET /api/v1/students/:id
pub async fn get_student(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<Json<Student>, AppError> {
    tracing::info!("GET /students/{}", id);
    let student = state.students.get_student(id).await?;
    Ok(Json(student))
}

/// DELETE /api/v1/students/:id
pub async fn delete_student(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<StatusCode, AppError> {
    tracing::info!("DELETE /students/{}", id);
    state.students.delete_student(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
