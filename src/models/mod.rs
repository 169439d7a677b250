//! Request and Response models for the student API
//!
//! This module defines the DTOs (Data Transfer Objects) used for
//! serializing/deserializing HTTP request and response bodies.

pub mod responses;
pub mod student;

// Re-export commonly used types
pub use responses::{MessageResponse, UploadResponse};
pub use student::{Student, StudentPayload};
