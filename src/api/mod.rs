//! API Module
//!
//! HTTP handlers and routing for the student REST API.
//!
//! # Endpoints
//! - `GET /dalumn` - List students
//! - `GET /dalumn/{id}` - Retrieve a student
//! - `POST /dalumn` - Create a student
//! - `PUT /dalumn/{id}` - Overwrite a student
//! - `DELETE /dalumn/{id}` - Delete a student
//! - The same five under `/Alumno`
//! - `POST /upload`, `GET /options`, `GET /api-docs`, `GET /api-docs-json`

pub mod body;
pub mod handlers;
pub mod routes;
pub mod upload;


pub use handlers::*;
pub use routes::create_router;
