//! Diesel models mirroring the database schema, plus server configuration.

#[cfg(feature = "server")]
pub mod config;
pub mod notice;
pub mod student;
