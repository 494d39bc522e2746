// Lesson generation pipeline:
// profile + topic → prompt → text generator → normalized text → saved lesson.
// All generation calls go through llm_client::TextGenerator.

pub mod handlers;
pub mod inflight;
pub mod normalize;
pub mod prompt_builder;
pub mod prompts;
pub mod service;
