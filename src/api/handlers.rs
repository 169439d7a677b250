//! API Handlers
//!
//! HTTP request handlers for the student endpoints. Each handler makes a
//! single repository call and shapes the result; field validation is left
//! to the store's constraints.

use std::path::PathBuf;
use std::sync::Arc;

use axum::{
    extract::{Path, State},
    Json,
};
use tracing::debug;

use super::body::StudentBody;
use crate::docs;
use crate::error::{ApiError, Result};
use crate::models::{MessageResponse, Student, StudentPayload};
use crate::repository::StudentRepository;

/// Application state shared across all handlers.
///
/// Holds only immutable data; the repository manages its own connections.
#[derive(Clone)]
pub struct AppState {
    /// Student record repository
    pub repo: Arc<dyn StudentRepository>,
    /// Directory receiving uploaded files
    pub upload_dir: Arc<PathBuf>,
    /// Base API-description document served on `/options`
    pub options: Arc<serde_json::Value>,
}

impl AppState {
    /// Creates a new AppState around a repository, with the default upload
    /// directory and the bundled options document.
    pub fn new(repo: Arc<dyn StudentRepository>) -> Self {
        Self {
            repo,
            upload_dir: Arc::new(PathBuf::from("archivos")),
            options: Arc::new(docs::bundled_options()),
        }
    }

    pub fn with_upload_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.upload_dir = Arc::new(dir.into());
        self
    }

    pub fn with_options(mut self, options: serde_json::Value) -> Self {
        self.options = Arc::new(options);
        self
    }
}

/// Handler for GET /dalumn
///
/// Returns every student, in store order.
#[utoipa::path(
    get,
    path = "/dalumn",
    responses(
        (status = 200, description = "All students", body = [Student]),
        (status = 500, description = "Store error", body = MessageResponse)
    ),
    tag = "DALUMN",
    operation_id = "listStudents"
)]
pub async fn list_students(State(state): State<AppState>) -> Result<Json<Vec<Student>>> {
    let students = state.repo.list().await?;
    debug!(count = students.len(), "Listed students");

    Ok(Json(students))
}

/// Handler for GET /dalumn/{id}
#[utoipa::path(
    get,
    path = "/dalumn/{id}",
    params(("id" = String, Path, description = "Student identifier")),
    responses(
        (status = 200, description = "The student", body = Student),
        (status = 404, description = "No student with this identifier", body = MessageResponse),
        (status = 500, description = "Store error", body = MessageResponse)
    ),
    tag = "DALUMN",
    operation_id = "getStudent"
)]
pub async fn get_student(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Student>> {
    state
        .repo
        .get_by_id(&id)
        .await?
        .map(Json)
        .ok_or_else(ApiError::student_not_found)
}

/// Handler for POST /dalumn
///
/// Inserts the student. Duplicate identifiers and missing fields come back
/// as the store's own error message.
#[utoipa::path(
    post,
    path = "/dalumn",
    request_body = StudentPayload,
    responses(
        (status = 200, description = "Student inserted", body = MessageResponse),
        (status = 500, description = "Store rejected the insert", body = MessageResponse)
    ),
    tag = "DALUMN",
    operation_id = "createStudent"
)]
pub async fn create_student(
    State(state): State<AppState>,
    StudentBody(payload): StudentBody,
) -> Result<Json<MessageResponse>> {
    state.repo.create(&payload).await?;
    debug!(id = ?payload.id, "Inserted student");

    Ok(Json(MessageResponse::inserted()))
}

/// Handler for PUT /dalumn/{id}
///
/// Reports success whenever the statement runs, including when no row
/// matched `id`.
#[utoipa::path(
    put,
    path = "/dalumn/{id}",
    params(("id" = String, Path, description = "Student identifier")),
    request_body = StudentPayload,
    responses(
        (status = 200, description = "Update statement executed", body = MessageResponse),
        (status = 500, description = "Store error", body = MessageResponse)
    ),
    tag = "DALUMN",
    operation_id = "updateStudent"
)]
pub async fn update_student(
    State(state): State<AppState>,
    Path(id): Path<String>,
    StudentBody(payload): StudentBody,
) -> Result<Json<MessageResponse>> {
    let affected = state.repo.update(&id, &payload).await?;
    debug!(%id, affected, "Updated student");

    Ok(Json(MessageResponse::updated()))
}

/// Handler for DELETE /dalumn/{id}
#[utoipa::path(
    delete,
    path = "/dalumn/{id}",
    params(("id" = String, Path, description = "Student identifier")),
    responses(
        (status = 200, description = "Student deleted", body = MessageResponse),
        (status = 404, description = "No student with this identifier", body = MessageResponse),
        (status = 500, description = "Store error", body = MessageResponse)
    ),
    tag = "DALUMN",
    operation_id = "deleteStudent"
)]
pub async fn delete_student(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>> {
    if state.repo.delete(&id).await? == 0 {
        return Err(ApiError::student_not_found());
    }
    debug!(%id, "Deleted student");

    Ok(Json(MessageResponse::deleted()))
}

/// Handler for GET /options
///
/// Returns the base API-description document as loaded at startup.
/// The document is sent as a JSON object, not as the file text wrapped in
/// a JSON string.
pub async fn options_handler(State(state): State<AppState>) -> Json<serde_json::Value> {
    Json(state.options.as_ref().clone())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::InMemoryStudentRepository;

    fn create_test_state() -> AppState {
        AppState::new(Arc::new(InMemoryStudentRepository::new()))
    }

    fn ana(id: &str) -> StudentPayload {
        StudentPayload {
            id: Some(id.to_string()),
            paternal_surname: Some("Garcia".to_string()),
            maternal_surname: Some("Lopez".to_string()),
            given_name: Some("Ana".to_string()),
            sex: Some("F".to_string()),
            birth_date: Some("2000-01-01".to_string()),
            birth_place: Some("CDMX".to_string()),
            tax_id: Some("GALA000101XXX".to_string()),
            national_id: Some("GALA000101MDFXXX09".to_string()),
            school_id: Some("1".to_string()),
            email: Some("ana@example.com".to_string()),
        }
    }

    #[tokio::test]
    async fn test_create_and_get_handler() {
        let state = create_test_state();

        let result = create_student(State(state.clone()), StudentBody(ana("A001"))).await;
        assert_eq!(result.unwrap().0, MessageResponse::inserted());

        let response = get_student(State(state), Path("A001".to_string()))
            .await
            .unwrap();
        assert_eq!(StudentPayload::from(response.0), ana("A001"));
    }

    #[tokio::test]
    async fn test_get_nonexistent_student() {
        let state = create_test_state();

        let result = get_student(State(state), Path("nonexistent".to_string())).await;
        assert!(matches!(result, Err(ApiError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_list_handler() {
        let state = create_test_state();
        for id in ["A001", "A002"] {
            create_student(State(state.clone()), StudentBody(ana(id)))
                .await
                .unwrap();
        }

        let response = list_students(State(state)).await.unwrap();
        assert_eq!(response.0.len(), 2);
    }

    #[tokio::test]
    async fn test_duplicate_create_surfaces_store_message() {
        let state = create_test_state();
        create_student(State(state.clone()), StudentBody(ana("A001")))
            .await
            .unwrap();

        let result = create_student(State(state), StudentBody(ana("A001"))).await;
        match result {
            Err(ApiError::Database(message)) => assert!(message.contains("Duplicate entry")),
            _ => panic!("expected a database error"),
        }
    }

    #[tokio::test]
    async fn test_update_nonexistent_reports_success() {
        let state = create_test_state();

        let result = update_student(
            State(state.clone()),
            Path("ghost".to_string()),
            StudentBody(ana("ghost")),
        )
        .await;
        assert_eq!(result.unwrap().0, MessageResponse::updated());

        let list = list_students(State(state)).await.unwrap();
        assert!(list.0.is_empty());
    }

    #[tokio::test]
    async fn test_delete_handler() {
        let state = create_test_state();
        create_student(State(state.clone()), StudentBody(ana("A001")))
            .await
            .unwrap();

        let result = delete_student(State(state.clone()), Path("A001".to_string())).await;
        assert_eq!(result.unwrap().0, MessageResponse::deleted());

        // Second delete finds nothing
        let result = delete_student(State(state), Path("A001".to_string())).await;
        assert!(matches!(result, Err(ApiError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_options_handler_returns_document() {
        let state = create_test_state().with_options(serde_json::json!({ "openapi": "3.0.0" }));

        let response = options_handler(State(state)).await;
        assert_eq!(response.0["openapi"], "3.0.0");
    }
}
