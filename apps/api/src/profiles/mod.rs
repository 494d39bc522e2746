// Profile Store: students and the lessons generated for them.
// CRUD only. Students and lessons are never updated or deleted.

pub mod handlers;
pub mod store;
