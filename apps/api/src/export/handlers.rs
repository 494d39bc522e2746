//! Axum route handlers for document downloads.

use axum::{
    extract::{Path, Query, State},
    http::header,
    response::{IntoResponse, Response},
    Json,
};
use bytes::Bytes;
use serde::Deserialize;
use uuid::Uuid;

use crate::errors::AppError;
use crate::export::{export, ExportFormat};
use crate::profiles::store::get_lesson;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct FormatQuery {
    pub format: ExportFormat,
}

#[derive(Debug, Deserialize)]
pub struct ExportTextRequest {
    pub text: String,
    pub format: ExportFormat,
}

/// GET /api/v1/lessons/:id/export?format=docx|pdf
pub async fn handle_export_lesson(
    State(state): State<AppState>,
    Path(lesson_id): Path<Uuid>,
    Query(query): Query<FormatQuery>,
) -> Result<Response, AppError> {
    let lesson = get_lesson(&state.db, lesson_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Lesson {lesson_id} not found")))?;

    download(lesson.content, query.format).await
}

/// POST /api/v1/export
///
/// Exports caller-supplied lesson text without saving it.
pub async fn handle_export_text(
    Json(request): Json<ExportTextRequest>,
) -> Result<Response, AppError> {
    download(request.text, request.format).await
}

/// Encodes off the async runtime and wraps the bytes as an attachment.
async fn download(text: String, format: ExportFormat) -> Result<Response, AppError> {
    let bytes = tokio::task::spawn_blocking(move || export(&text, format))
        .await
        .map_err(|e| AppError::Internal(anyhow::anyhow!("Export task failed: {e}")))??;

    tracing::debug!("Exported {} ({} bytes)", format.file_name(), bytes.len());

    Ok((
        [
            (header::CONTENT_TYPE, format.mime_type().to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", format.file_name()),
            ),
        ],
        Bytes::from(bytes),
    )
        .into_response())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;

    #[tokio::test]
    async fn test_download_sets_attachment_headers() {
        let response = download("Objective:\n- do the thing".to_string(), ExportFormat::Pdf)
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers()[header::CONTENT_TYPE],
            "application/pdf"
        );
        assert_eq!(
            response.headers()[header::CONTENT_DISPOSITION],
            "attachment; filename=\"lesson.pdf\""
        );
    }

    #[tokio::test]
    async fn test_download_empty_docx_succeeds() {
        let response = download(String::new(), ExportFormat::Docx).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers()[header::CONTENT_DISPOSITION],
            "attachment; filename=\"lesson.docx\""
        );
    }
}
