pub mod lesson;
pub mod student;
