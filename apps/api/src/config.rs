use anyhow::{Context, Result};

use crate::llm_client::DEFAULT_MODEL;

const DEFAULT_DATABASE_URL: &str = "sqlite://neuro_lessons.db?mode=rwc";

/// Application configuration loaded from environment variables.
/// A missing `ANTHROPIC_API_KEY` is fatal: the server refuses to start.
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub anthropic_api_key: String,
    pub llm_model: String,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            database_url: std::env::var("DATABASE_URL")
                .unwrap_or_else(|_| DEFAULT_DATABASE_URL.to_string()),
            anthropic_api_key: require_env("ANTHROPIC_API_KEY")?,
            llm_model: std::env::var("LLM_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string()),
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }
}

fn require_env(key: &str) -> Result<String> {
    let value = std::env::var(key)
        .with_context(|| format!("Required environment variable '{key}' is not set"))?;
    if value.trim().is_empty() {
        anyhow::bail!("Required environment variable '{key}' is empty");
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_require_env_missing_names_the_variable() {
        let err = require_env("LESSONPLAN_TEST_SURELY_UNSET_VAR").unwrap_err();
        assert!(err.to_string().contains("LESSONPLAN_TEST_SURELY_UNSET_VAR"));
    }

    #[test]
    fn test_require_env_rejects_blank_value() {
        std::env::set_var("LESSONPLAN_TEST_BLANK_VAR", "   ");
        assert!(require_env("LESSONPLAN_TEST_BLANK_VAR").is_err());
    }

    #[test]
    fn test_require_env_returns_value() {
        std::env::set_var("LESSONPLAN_TEST_SET_VAR", "sk-test");
        assert_eq!(require_env("LESSONPLAN_TEST_SET_VAR").unwrap(), "sk-test");
    }
}
