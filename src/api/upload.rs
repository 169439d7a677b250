//! File upload endpoint.
//!
//! Stores the file sent in the `archivo` multipart field under the upload
//! directory, named after the client's original filename. A later upload
//! with the same name replaces the earlier file.

use axum::{
    extract::{Multipart, State},
    Json,
};
use tracing::info;
use utoipa::ToSchema;

use super::handlers::AppState;
use crate::error::{ApiError, Result};
use crate::models::{MessageResponse, UploadResponse};

/// Name of the multipart field carrying the file
pub const UPLOAD_FIELD: &str = "archivo";

/// Largest accepted request body for uploads
pub const MAX_UPLOAD_BYTES: usize = 25 * 1024 * 1024;

/// Multipart form accepted by the upload endpoint.
#[derive(ToSchema)]
#[allow(dead_code)]
pub struct UploadForm {
    #[schema(value_type = String, format = Binary)]
    archivo: Vec<u8>,
}

/// Reduces a client-supplied filename to its last path component.
///
/// Returns `None` when nothing usable remains.
pub fn stored_name(original: &str) -> Option<String> {
    let name = original.rsplit(['/', '\\']).next()?.trim();
    match name {
        "" | "." | ".." => None,
        name => Some(name.to_string()),
    }
}

/// Handler for POST /upload
#[utoipa::path(
    post,
    path = "/upload",
    request_body(content = UploadForm, content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "File stored", body = UploadResponse),
        (status = 400, description = "No usable file field", body = MessageResponse),
        (status = 500, description = "File could not be written", body = MessageResponse)
    ),
    tag = "files",
    operation_id = "uploadFile"
)]
pub async fn upload_file(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<UploadResponse>> {
    while let Some(field) = multipart.next_field().await? {
        if field.name() != Some(UPLOAD_FIELD) {
            continue;
        }

        let filename = field
            .file_name()
            .and_then(stored_name)
            .ok_or_else(|| ApiError::BadRequest("Uploaded file has no usable name".to_string()))?;
        let bytes = field.bytes().await?;

        tokio::fs::create_dir_all(state.upload_dir.as_path()).await?;
        let target = state.upload_dir.join(&filename);
        tokio::fs::write(&target, &bytes).await?;

        info!(path = %target.display(), size = bytes.len(), "Stored upload");
        return Ok(Json(UploadResponse::new(filename)));
    }

    Err(ApiError::BadRequest(format!(
        "Missing file field '{}'",
        UPLOAD_FIELD
    )))
}
