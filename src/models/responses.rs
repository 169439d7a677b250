//! Response DTOs for the student API
//!
//! Defines the structure of outgoing HTTP response bodies.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

// == Messages ==
pub const INSERTED: &str = "Data inserted successfully";
pub const UPDATED: &str = "Student updated successfully";
pub const DELETED: &str = "Student deleted successfully";
pub const NOT_FOUND: &str = "Student not found";
pub const UPLOADED: &str = "File uploaded successfully";

/// Body of every write acknowledgement and every error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct MessageResponse {
    #[schema(example = "Student not found")]
    pub message: String,
}

impl MessageResponse {
    /// Creates a new MessageResponse
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub fn inserted() -> Self {
        Self::new(INSERTED)
    }

    pub fn updated() -> Self {
        Self::new(UPDATED)
    }

    pub fn deleted() -> Self {
        Self::new(DELETED)
    }
}

/// Response body for the upload endpoint (POST /upload)
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UploadResponse {
    pub message: String,
    /// Name the file was stored under
    pub filename: String,
}

impl UploadResponse {
    pub fn new(filename: impl Into<String>) -> Self {
        Self {
            message: UPLOADED.to_string(),
            filename: filename.into(),
        }
    }
}
