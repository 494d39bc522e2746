//! Data access for the `students` and `lessons` tables.
//!
//! Each call runs against the pool on its own; nothing spans a transaction
//! across operations.

use chrono::{DateTime, Utc};
use serde::Deserialize;
use sqlx::SqlitePool;
use tracing::debug;
use uuid::Uuid;

use crate::models::lesson::LessonRow;
use crate::models::student::{FreeText, StudentRow};

/// Onboarding input for a new student.
#[derive(Debug, Clone, Deserialize)]
pub struct NewStudent {
    pub name: String,
    #[serde(default)]
    pub preferred_learning_style: String,
    #[serde(default)]
    pub known_barriers: FreeText,
    #[serde(default)]
    pub interests: FreeText,
}

pub async fn add_student(pool: &SqlitePool, new: NewStudent) -> Result<StudentRow, sqlx::Error> {
    let student = StudentRow {
        id: Uuid::new_v4(),
        name: new.name.trim().to_string(),
        preferred_learning_style: new.preferred_learning_style.trim().to_string(),
        known_barriers: new.known_barriers.into_text(),
        interests: new.interests.into_text(),
        created_at: Utc::now(),
    };

    sqlx::query(
        r#"
        INSERT INTO students
            (id, name, preferred_learning_style, known_barriers, interests, created_at)
        VALUES ($1, $2, $3, $4, $5, $6)
        "#,
    )
    .bind(student.id)
    .bind(&student.name)
    .bind(&student.preferred_learning_style)
    .bind(&student.known_barriers)
    .bind(&student.interests)
    .bind(student.created_at)
    .execute(pool)
    .await?;

    debug!("Added student {} ({})", student.id, student.name);
    Ok(student)
}

pub async fn list_students(pool: &SqlitePool) -> Result<Vec<StudentRow>, sqlx::Error> {
    sqlx::query_as::<_, StudentRow>(
        "SELECT * FROM students ORDER BY name COLLATE NOCASE, created_at",
    )
    .fetch_all(pool)
    .await
}

pub async fn get_student(
    pool: &SqlitePool,
    student_id: Uuid,
) -> Result<Option<StudentRow>, sqlx::Error> {
    sqlx::query_as::<_, StudentRow>("SELECT * FROM students WHERE id = $1")
        .bind(student_id)
        .fetch_optional(pool)
        .await
}

/// Persists a generated lesson. Fails with a foreign-key violation if the
/// student does not exist; no row is written in that case.
pub async fn save_lesson(
    pool: &SqlitePool,
    student_id: Uuid,
    topic: &str,
    content: &str,
    date_generated: DateTime<Utc>,
) -> Result<LessonRow, sqlx::Error> {
    let lesson = LessonRow {
        id: Uuid::new_v4(),
        student_id,
        topic: topic.to_string(),
        content: content.to_string(),
        date_generated,
    };

    sqlx::query(
        r#"
        INSERT INTO lessons (id, student_id, topic, content, date_generated)
        VALUES ($1, $2, $3, $4, $5)
        "#,
    )
    .bind(lesson.id)
    .bind(lesson.student_id)
    .bind(&lesson.topic)
    .bind(&lesson.content)
    .bind(lesson.date_generated)
    .execute(pool)
    .await?;

    Ok(lesson)
}

pub async fn get_lesson(pool: &SqlitePool, lesson_id: Uuid) -> Result<Option<LessonRow>, sqlx::Error> {
    sqlx::query_as::<_, LessonRow>("SELECT * FROM lessons WHERE id = $1")
        .bind(lesson_id)
        .fetch_optional(pool)
        .await
}

/// All lessons for a student, newest first.
pub async fn list_lessons_for_student(
    pool: &SqlitePool,
    student_id: Uuid,
) -> Result<Vec<LessonRow>, sqlx::Error> {
    sqlx::query_as::<_, LessonRow>(
        "SELECT * FROM lessons WHERE student_id = $1 ORDER BY date_generated DESC, id",
    )
    .bind(student_id)
    .fetch_all(pool)
    .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::test_pool;
    use chrono::Duration;

    fn liam() -> NewStudent {
        NewStudent {
            name: "Liam".to_string(),
            preferred_learning_style: "Visual".to_string(),
            known_barriers: FreeText::Text("Reading Speed".to_string()),
            interests: FreeText::List(vec!["Space".to_string()]),
        }
    }

    #[tokio::test]
    async fn test_add_and_get_student() {
        let pool = test_pool().await;
        let added = add_student(&pool, liam()).await.unwrap();

        let fetched = get_student(&pool, added.id).await.unwrap().unwrap();
        assert_eq!(fetched.name, "Liam");
        assert_eq!(fetched.preferred_learning_style, "Visual");
        assert_eq!(fetched.known_barriers, "Reading Speed");
        assert_eq!(fetched.interests, "Space");
    }

    #[tokio::test]
    async fn test_get_unknown_student_is_none() {
        let pool = test_pool().await;
        assert!(get_student(&pool, Uuid::new_v4()).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_list_students_ordered_by_name() {
        let pool = test_pool().await;
        for name in ["Zoe", "Ava", "Liam"] {
            add_student(
                &pool,
                NewStudent {
                    name: name.to_string(),
                    ..liam()
                },
            )
            .await
            .unwrap();
        }

        let names: Vec<String> = list_students(&pool)
            .await
            .unwrap()
            .into_iter()
            .map(|s| s.name)
            .collect();
        assert_eq!(names, vec!["Ava", "Liam", "Zoe"]);
    }

    #[tokio::test]
    async fn test_list_students_ignores_case() {
        let pool = test_pool().await;
        for name in ["Zoe", "ava", "Liam"] {
            add_student(
                &pool,
                NewStudent {
                    name: name.to_string(),
                    ..liam()
                },
            )
            .await
            .unwrap();
        }

        let names: Vec<String> = list_students(&pool)
            .await
            .unwrap()
            .into_iter()
            .map(|s| s.name)
            .collect();
        assert_eq!(names, vec!["ava", "Liam", "Zoe"]);
    }

    #[tokio::test]
    async fn test_saved_lesson_round_trips_byte_for_byte() {
        let pool = test_pool().await;
        let student = add_student(&pool, liam()).await.unwrap();
        let content = "**Objective:** Learn how plants eat\n- Sunlight “in”, sugar out\n\nWrap Up: 🌱";

        let saved = save_lesson(&pool, student.id, "Photosynthesis", content, Utc::now())
            .await
            .unwrap();

        let lessons = list_lessons_for_student(&pool, student.id).await.unwrap();
        assert_eq!(lessons.len(), 1);
        assert_eq!(lessons[0].id, saved.id);
        assert_eq!(lessons[0].topic, "Photosynthesis");
        assert_eq!(lessons[0].content.as_bytes(), content.as_bytes());

        let by_id = get_lesson(&pool, saved.id).await.unwrap().unwrap();
        assert_eq!(by_id.content, content);
    }

    #[tokio::test]
    async fn test_lessons_listed_newest_first() {
        let pool = test_pool().await;
        let student = add_student(&pool, liam()).await.unwrap();
        let now = Utc::now();

        save_lesson(&pool, student.id, "Fractions", "old", now - Duration::hours(2))
            .await
            .unwrap();
        save_lesson(&pool, student.id, "Gravity", "new", now).await.unwrap();

        let topics: Vec<String> = list_lessons_for_student(&pool, student.id)
            .await
            .unwrap()
            .into_iter()
            .map(|l| l.topic)
            .collect();
        assert_eq!(topics, vec!["Gravity", "Fractions"]);
    }

    #[tokio::test]
    async fn test_save_lesson_for_unknown_student_fails_without_row() {
        let pool = test_pool().await;
        let result = save_lesson(&pool, Uuid::new_v4(), "Orphan", "text", Utc::now()).await;
        assert!(result.is_err(), "foreign key must reject an unknown student");

        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM lessons")
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(count, 0);
    }
}
