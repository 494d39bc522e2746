pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::export::handlers as export;
use crate::lessons::handlers as lessons;
use crate::profiles::handlers as profiles;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Profile Store
        .route(
            "/api/v1/students",
            get(profiles::handle_list_students).post(profiles::handle_add_student),
        )
        .route("/api/v1/students/:id", get(profiles::handle_get_student))
        .route(
            "/api/v1/students/:id/lessons",
            get(profiles::handle_list_lessons),
        )
        // Lesson generation
        .route("/api/v1/lessons/generate", post(lessons::handle_generate))
        .route("/api/v1/lessons/:id", get(lessons::handle_get_lesson))
        // Export
        .route(
            "/api/v1/lessons/:id/export",
            get(export::handle_export_lesson),
        )
        .route("/api/v1/export", post(export::handle_export_text))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use async_trait::async_trait;
    use axum::{
        body::Body,
        http::{Request, StatusCode},
    };
    use serde_json::{json, Value};
    use sqlx::SqlitePool;
    use tower::ServiceExt;
    use uuid::Uuid;

    use super::*;
    use crate::config::Config;
    use crate::db::test_pool;
    use crate::lessons::inflight::InFlightRegistry;
    use crate::llm_client::{LlmError, TextGenerator};

    struct StubGenerator {
        reply: fn() -> Result<String, LlmError>,
    }

    #[async_trait]
    impl TextGenerator for StubGenerator {
        async fn generate(&self, _model: &str, _prompt: &str) -> Result<String, LlmError> {
            (self.reply)()
        }
    }

    async fn test_state(reply: fn() -> Result<String, LlmError>) -> AppState {
        AppState {
            db: test_pool().await,
            generator: Arc::new(StubGenerator { reply }),
            config: Config {
                database_url: "sqlite::memory:".to_string(),
                anthropic_api_key: "test-key".to_string(),
                llm_model: "test-model".to_string(),
                port: 0,
                rust_log: "info".to_string(),
            },
            in_flight: InFlightRegistry::new(),
        }
    }

    fn lesson_reply() -> Result<String, LlmError> {
        Ok("**Objective:** See how plants eat\n• Sunlight".to_string())
    }

    async fn post_json(state: &AppState, uri: &str, body: Value) -> axum::response::Response {
        build_router(state.clone())
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri(uri)
                    .header("content-type", "application/json")
                    .body(Body::from(body.to_string()))
                    .unwrap(),
            )
            .await
            .unwrap()
    }

    async fn body_json(response: axum::response::Response) -> Value {
        let bytes = axum::body::to_bytes(response.into_body(), 1_048_576)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    async fn count(pool: &SqlitePool, table: &str) -> i64 {
        sqlx::query_scalar(&format!("SELECT COUNT(*) FROM {table}"))
            .fetch_one(pool)
            .await
            .unwrap()
    }

    async fn add_liam(state: &AppState) -> Uuid {
        let response = post_json(
            state,
            "/api/v1/students",
            json!({
                "name": "Liam",
                "preferred_learning_style": "Visual",
                "known_barriers": ["Reading Speed"],
                "interests": "Space"
            }),
        )
        .await;
        assert_eq!(response.status(), StatusCode::CREATED);
        let body = body_json(response).await;
        body["id"].as_str().unwrap().parse().unwrap()
    }

    #[tokio::test]
    async fn test_health_returns_ok() {
        let state = test_state(lesson_reply).await;
        let response = build_router(state)
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await["status"], "ok");
    }

    #[tokio::test]
    async fn test_blank_name_is_rejected_and_nothing_written() {
        let state = test_state(lesson_reply).await;
        let response = post_json(&state, "/api/v1/students", json!({ "name": "   " })).await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_json(response).await["error"]["code"], "VALIDATION_ERROR");
        assert_eq!(count(&state.db, "students").await, 0);
    }

    #[tokio::test]
    async fn test_blank_topic_is_rejected_and_nothing_written() {
        let state = test_state(lesson_reply).await;
        let student_id = add_liam(&state).await;

        let response = post_json(
            &state,
            "/api/v1/lessons/generate",
            json!({ "student_id": student_id, "topic": " \n " }),
        )
        .await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_json(response).await["error"]["code"], "VALIDATION_ERROR");
        assert_eq!(count(&state.db, "lessons").await, 0);
    }

    #[tokio::test]
    async fn test_generate_for_unknown_student_is_not_found() {
        let state = test_state(lesson_reply).await;
        let response = post_json(
            &state,
            "/api/v1/lessons/generate",
            json!({ "student_id": Uuid::new_v4(), "topic": "Photosynthesis" }),
        )
        .await;

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(body_json(response).await["error"]["code"], "NOT_FOUND");
    }

    #[tokio::test]
    async fn test_second_generate_while_in_flight_conflicts() {
        let state = test_state(lesson_reply).await;
        let student_id = add_liam(&state).await;
        let _running = state.in_flight.try_acquire(student_id).unwrap();

        let response = post_json(
            &state,
            "/api/v1/lessons/generate",
            json!({ "student_id": student_id, "topic": "Photosynthesis" }),
        )
        .await;

        assert_eq!(response.status(), StatusCode::CONFLICT);
        assert_eq!(body_json(response).await["error"]["code"], "CONFLICT");
        assert_eq!(count(&state.db, "lessons").await, 0);
    }

    #[tokio::test]
    async fn test_service_failure_is_bad_gateway_and_nothing_saved() {
        let state = test_state(|| {
            Err(LlmError::Api {
                status: 429,
                message: "rate limited".to_string(),
            })
        })
        .await;
        let student_id = add_liam(&state).await;

        let response = post_json(
            &state,
            "/api/v1/lessons/generate",
            json!({ "student_id": student_id, "topic": "Photosynthesis" }),
        )
        .await;

        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
        assert_eq!(
            body_json(response).await["error"]["code"],
            "GENERATION_SERVICE_ERROR"
        );
        assert_eq!(count(&state.db, "lessons").await, 0);
        assert!(state.in_flight.try_acquire(student_id).is_some());
    }

    #[tokio::test]
    async fn test_generate_saves_normalized_lesson() {
        let state = test_state(lesson_reply).await;
        let student_id = add_liam(&state).await;

        let response = post_json(
            &state,
            "/api/v1/lessons/generate",
            json!({ "student_id": student_id, "topic": "  Photosynthesis  " }),
        )
        .await;

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["lesson"]["topic"], "Photosynthesis");
        assert_eq!(
            body["lesson"]["content"],
            "**Objective:** See how plants eat\n- Sunlight"
        );
        assert_eq!(count(&state.db, "lessons").await, 1);
    }
}
