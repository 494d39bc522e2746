//! Axum route handlers for lesson generation.

use axum::{
    extract::{Path, State},
    Json,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::AppError;
use crate::lessons::service::generate_lesson;
use crate::models::lesson::LessonRow;
use crate::profiles::store::{get_lesson, get_student};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct GenerateLessonRequest {
    pub student_id: Uuid,
    pub topic: String,
}

#[derive(Debug, Serialize)]
pub struct GenerateLessonResponse {
    pub lesson: LessonRow,
}

/// POST /api/v1/lessons/generate
///
/// Generates, saves and returns a lesson. The caller keeps the returned
/// text; nothing about "the current lesson" is held server-side.
pub async fn handle_generate(
    State(state): State<AppState>,
    Json(request): Json<GenerateLessonRequest>,
) -> Result<Json<GenerateLessonResponse>, AppError> {
    let topic = request.topic.trim();
    if topic.is_empty() {
        return Err(AppError::Validation("topic cannot be empty".to_string()));
    }

    let student = get_student(&state.db, request.student_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Student {} not found", request.student_id)))?;

    let _guard = state.in_flight.try_acquire(student.id).ok_or_else(|| {
        AppError::Conflict(format!(
            "A lesson is already being generated for student {}",
            student.id
        ))
    })?;

    let lesson = generate_lesson(
        &state.db,
        state.generator.as_ref(),
        &state.config.llm_model,
        topic,
        &student,
    )
    .await?;

    Ok(Json(GenerateLessonResponse { lesson }))
}

/// GET /api/v1/lessons/:id
pub async fn handle_get_lesson(
    State(state): State<AppState>,
    Path(lesson_id): Path<Uuid>,
) -> Result<Json<LessonRow>, AppError> {
    let lesson = get_lesson(&state.db, lesson_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Lesson {lesson_id} not found")))?;
    Ok(Json(lesson))
}
