//! Axum route handlers for students and their saved lessons.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::lesson::LessonRow;
use crate::models::student::StudentRow;
use crate::profiles::store::{
    add_student, get_student, list_lessons_for_student, list_students, NewStudent,
};
use crate::state::AppState;

/// POST /api/v1/students
pub async fn handle_add_student(
    State(state): State<AppState>,
    Json(request): Json<NewStudent>,
) -> Result<(StatusCode, Json<StudentRow>), AppError> {
    if request.name.trim().is_empty() {
        return Err(AppError::Validation("name cannot be empty".to_string()));
    }

    let student = add_student(&state.db, request).await?;
    tracing::info!("Onboarded student {} ({})", student.id, student.name);
    Ok((StatusCode::CREATED, Json(student)))
}

/// GET /api/v1/students
pub async fn handle_list_students(
    State(state): State<AppState>,
) -> Result<Json<Vec<StudentRow>>, AppError> {
    Ok(Json(list_students(&state.db).await?))
}

/// GET /api/v1/students/:id
pub async fn handle_get_student(
    State(state): State<AppState>,
    Path(student_id): Path<Uuid>,
) -> Result<Json<StudentRow>, AppError> {
    let student = get_student(&state.db, student_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Student {student_id} not found")))?;
    Ok(Json(student))
}

/// GET /api/v1/students/:id/lessons
///
/// Lessons for one student, newest first.
pub async fn handle_list_lessons(
    State(state): State<AppState>,
    Path(student_id): Path<Uuid>,
) -> Result<Json<Vec<LessonRow>>, AppError> {
    if get_student(&state.db, student_id).await?.is_none() {
        return Err(AppError::NotFound(format!("Student {student_id} not found")));
    }
    Ok(Json(list_lessons_for_student(&state.db, student_id).await?))
}
