//! OpenAPI documentation.
//!
//! [`ApiDoc`] is generated from the handler annotations, which describe the
//! `/dalumn` routes. The [`LegacyPrefix`] modifier copies those paths under
//! `/Alumno` so the document lists both mounts. The base document served on
//! `/options` supplies the title, version and description.

use std::io;
use std::path::Path;

use serde_json::Value;
use utoipa::openapi::PathItem;
use utoipa::{Modify, OpenApi};

use crate::api::routes::{LEGACY_STUDENT_PREFIX, STUDENT_PREFIX};
use crate::models::{MessageResponse, Student, StudentPayload, UploadResponse};

/// Base document compiled into the binary
const BUNDLED_OPTIONS: &str = include_str!("../assets/Options.json");

/// Tag applied to the mirrored `/Alumno` operations
pub const LEGACY_TAG: &str = "Alumno";

/// Mirrors every `/dalumn` path under `/Alumno`.
pub struct LegacyPrefix;

impl Modify for LegacyPrefix {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let mirrored: Vec<(String, PathItem)> = openapi
            .paths
            .paths
            .iter()
            .filter_map(|(path, item)| {
                let rest = path.strip_prefix(STUDENT_PREFIX)?;
                if !(rest.is_empty() || rest.starts_with('/')) {
                    return None;
                }

                let mut item = item.clone();
                for operation in [&mut item.get, &mut item.post, &mut item.put, &mut item.delete]
                    .into_iter()
                    .flatten()
                {
                    operation.tags = Some(vec![LEGACY_TAG.to_string()]);
                    // Operation ids must stay unique across the document
                    operation.operation_id = operation
                        .operation_id
                        .take()
                        .map(|id| format!("{}{}", id, LEGACY_TAG));
                }

                Some((format!("{}{}", LEGACY_STUDENT_PREFIX, rest), item))
            })
            .collect();

        openapi.paths.paths.extend(mirrored);
    }
}

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    modifiers(&LegacyPrefix),
    info(
        title = "API Alumnos",
        description = "Student records service"
    ),
    paths(
        crate::api::handlers::list_students,
        crate::api::handlers::get_student,
        crate::api::handlers::create_student,
        crate::api::handlers::update_student,
        crate::api::handlers::delete_student,
        crate::api::upload::upload_file,
    ),
    components(schemas(
        Student,
        StudentPayload,
        MessageResponse,
        UploadResponse,
        crate::api::upload::UploadForm
    )),
    tags(
        (name = "DALUMN", description = "Student operations"),
        (name = "Alumno", description = "Student operations under the /Alumno prefix"),
        (name = "files", description = "File uploads")
    )
)]
pub struct ApiDoc;

/// Parses the bundled base document.
pub fn bundled_options() -> Value {
    serde_json::from_str(BUNDLED_OPTIONS).unwrap_or_else(|_| Value::Object(Default::default()))
}

/// Loads the base document from `path`, falling back to the bundled one
/// when the file does not exist.
pub fn load_options(path: &Path) -> io::Result<Value> {
    match std::fs::read_to_string(path) {
        Ok(raw) => {
            serde_json::from_str(&raw).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
        }
        Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(bundled_options()),
        Err(err) => Err(err),
    }
}

/// Builds the served API description, taking `info` fields from the base
/// document where present.
pub fn api_description(options: &Value) -> utoipa::openapi::OpenApi {
    let mut doc = ApiDoc::openapi();
    let info = &options["info"];

    if let Some(title) = info["title"].as_str() {
        doc.info.title = title.to_string();
    }
    if let Some(version) = info["version"].as_str() {
        doc.info.version = version.to_string();
    }
    if let Some(description) = info["description"].as_str() {
        doc.info.description = Some(description.to_string());
    }
    doc
}
