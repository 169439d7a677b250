//! API Routes
//!
//! Configures the Axum router. The student routes are registered once per
//! prefix by [`mount_students`], so `/dalumn` and `/Alumno` share handlers.

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use utoipa_swagger_ui::SwaggerUi;

use super::handlers::{
    create_student, delete_student, get_student, list_students, options_handler, update_student,
    AppState,
};
use super::upload::{upload_file, MAX_UPLOAD_BYTES};
use crate::docs;

/// Prefix the documentation is written against
pub const STUDENT_PREFIX: &str = "/dalumn";

/// Second historical prefix with identical semantics
pub const LEGACY_STUDENT_PREFIX: &str = "/Alumno";

/// Every prefix the student routes are mounted at
pub const STUDENT_PREFIXES: [&str; 2] = [STUDENT_PREFIX, LEGACY_STUDENT_PREFIX];

/// Registers the five student routes under `prefix`.
pub fn mount_students(router: Router<AppState>, prefix: &str) -> Router<AppState> {
    router
        .route(prefix, get(list_students).post(create_student))
        .route(
            &format!("{}/{{id}}", prefix),
            get(get_student).put(update_student).delete(delete_student),
        )
}

/// Creates the main router with all endpoints configured.
///
/// # Endpoints
/// - `GET|POST /dalumn`, `GET|PUT|DELETE /dalumn/{id}` - Student records
/// - The same five under `/Alumno`
/// - `POST /upload` - Single-file upload (`archivo` field)
/// - `GET /options` - Base API-description document
/// - `GET /api-docs` - Swagger UI
/// - `GET /api-docs-json` - Generated OpenAPI document
///
/// # Middleware
/// - CORS: Allows any origin
/// - Tracing: Logs all requests
pub fn create_router(state: AppState) -> Router {
    // Configure CORS middleware
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let swagger =
        SwaggerUi::new("/api-docs").url("/api-docs-json", docs::api_description(&state.options));

    STUDENT_PREFIXES
        .iter()
        .fold(Router::new(), |router, prefix| mount_students(router, prefix))
        .route("/options", get(options_handler))
        .route(
            "/upload",
            post(upload_file).layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES)),
        )
        .merge(swagger)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
