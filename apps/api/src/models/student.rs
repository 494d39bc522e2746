use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A student profile. Created once at onboarding and never mutated.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct StudentRow {
    pub id: Uuid,
    pub name: String,
    pub preferred_learning_style: String,
    pub known_barriers: String,
    pub interests: String,
    pub created_at: DateTime<Utc>,
}

impl StudentRow {
    pub fn profile(&self) -> Profile {
        Profile {
            learning_style: self.preferred_learning_style.clone(),
            barriers: self.known_barriers.clone(),
            interests: self.interests.clone(),
        }
    }
}

/// The three attributes that personalize a lesson prompt.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    pub learning_style: String,
    pub barriers: String,
    pub interests: String,
}

/// A profile attribute accepted either as free text or as a list of items.
/// Lists are stored as a single comma-separated string.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum FreeText {
    Text(String),
    List(Vec<String>),
}

impl Default for FreeText {
    fn default() -> Self {
        FreeText::Text(String::new())
    }
}

impl FreeText {
    pub fn into_text(self) -> String {
        match self {
            FreeText::Text(text) => text.trim().to_string(),
            FreeText::List(items) => join_list(&items),
        }
    }
}

/// Joins list items with `", "`, skipping blank entries.
pub fn join_list(items: &[String]) -> String {
    items
        .iter()
        .map(|item| item.trim())
        .filter(|item| !item.is_empty())
        .collect::<Vec<_>>()
        .join(", ")
}
