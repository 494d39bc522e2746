use std::sync::Arc;

use sqlx::SqlitePool;

use crate::config::Config;
use crate::lessons::inflight::InFlightRegistry;
use crate::llm_client::TextGenerator;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub db: SqlitePool,
    /// Text generator. Production: `LlmClient`.
    pub generator: Arc<dyn TextGenerator>,
    pub config: Config,
    /// Students with a generation currently running.
    pub in_flight: InFlightRegistry,
}
