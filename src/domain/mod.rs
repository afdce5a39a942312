//! Domain entities served by the school dashboard listing endpoints.

pub mod notice;
pub mod student;
pub mod types;
