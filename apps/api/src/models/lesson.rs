use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A generated lesson plan. `content` is final once saved.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct LessonRow {
    pub id: Uuid,
    pub student_id: Uuid,
    pub topic: String,
    pub content: String,
    pub date_generated: DateTime<Utc>,
}
