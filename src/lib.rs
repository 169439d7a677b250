//! Alumnos API - REST service for student records
//!
//! Maps HTTP verbs onto parameterized statements against the `DALUMN`
//! table, with generated OpenAPI documentation and a single-file upload.

pub mod api;
pub mod config;
pub mod docs;
pub mod error;
pub mod models;
pub mod repository;

pub use api::AppState;
pub use config::Config;
pub use repository::{InMemoryStudentRepository, MySqlStudentRepository, StudentRepository};
