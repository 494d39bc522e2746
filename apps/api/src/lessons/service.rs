//! Lesson Service — orchestrates one lesson generation.
//!
//! Flow: build_prompt → TextGenerator::generate → normalize_bullets →
//!       save_lesson → return the saved lesson.
//!
//! Every failure comes back as a `GenerationError`; nothing is persisted
//! unless the generation call succeeded.

use chrono::Utc;
use sqlx::SqlitePool;
use thiserror::Error;
use tracing::{info, warn};

use crate::lessons::normalize::normalize_bullets;
use crate::lessons::prompt_builder::build_prompt;
use crate::llm_client::{LlmError, TextGenerator};
use crate::models::lesson::LessonRow;
use crate::models::student::StudentRow;
use crate::profiles::store::save_lesson;

#[derive(Debug, Error)]
pub enum GenerationError {
    /// The text-generation service failed (auth, quota, network, timeout).
    /// The caller may re-issue the request.
    #[error("Text generation service error: {0}")]
    Service(String),

    /// Anything else: malformed or empty output, storage failure.
    #[error("Unexpected error during lesson generation: {0}")]
    Unexpected(String),
}

impl GenerationError {
    pub fn is_retryable(&self) -> bool {
        matches!(self, GenerationError::Service(_))
    }
}

impl From<LlmError> for GenerationError {
    fn from(err: LlmError) -> Self {
        if err.is_service_error() {
            GenerationError::Service(err.to_string())
        } else {
            GenerationError::Unexpected(err.to_string())
        }
    }
}

/// Generates a lesson for `student` on `topic` and saves it.
pub async fn generate_lesson(
    pool: &SqlitePool,
    generator: &dyn TextGenerator,
    model: &str,
    topic: &str,
    student: &StudentRow,
) -> Result<LessonRow, GenerationError> {
    let prompt = build_prompt(topic, &student.profile());

    info!(
        "Generating lesson on {:?} for student {} with model {}",
        topic, student.id, model
    );

    let raw = generator.generate(model, &prompt).await.map_err(|e| {
        warn!("Lesson generation failed for student {}: {e}", student.id);
        GenerationError::from(e)
    })?;

    if raw.trim().is_empty() {
        return Err(GenerationError::from(LlmError::EmptyContent));
    }

    let content = normalize_bullets(&raw);

    let lesson = save_lesson(pool, student.id, topic, &content, Utc::now())
        .await
        .map_err(|e| GenerationError::Unexpected(format!("Failed to save lesson: {e}")))?;

    info!(
        "Saved lesson {} ({} chars) for student {}",
        lesson.id,
        lesson.content.len(),
        student.id
    );

    Ok(lesson)
}
