//! services/api/src/web/router.rs
//!
//! Assembles the application router. Factored out of the binary so tests
//! can drive the full middleware/handler stack in-process.

use crate::web::principal::require_principal;
use crate::web::rest::{
    create_lecture_handler, delete_lecture_handler, get_lecture_handler, get_progress_handler,
    list_lectures_handler, mark_complete_handler,
};
use crate::web::state::AppState;
use axum::{
    extract::DefaultBodyLimit,
    http::{
        header::{HeaderName, ACCEPT, CONTENT_TYPE},
        Method,
    },
    middleware as axum_middleware,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};

async fn health_handler() -> &'static str {
    "ok"
}

/// Builds the complete application router over the given state.
pub fn router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::DELETE, Method::OPTIONS])
        .allow_headers([
            CONTENT_TYPE,
            ACCEPT,
            HeaderName::from_static("x-user-id"),
            HeaderName::from_static("x-user-role"),
        ]);

    // Everything except the health probe requires principal context.
    let gated = Router::new()
        .route(
            "/courses/{course_id}/lectures",
            get(list_lectures_handler).post(create_lecture_handler),
        )
        .route(
            "/lectures/{lecture_id}",
            get(get_lecture_handler).delete(delete_lecture_handler),
        )
        .route(
            "/users/{user_id}/courses/{course_id}/progress",
            get(get_progress_handler),
        )
        .route(
            "/users/{user_id}/courses/{course_id}/lectures/{lecture_id}/complete",
            post(mark_complete_handler),
        )
        .layer(axum_middleware::from_fn(require_principal))
        .layer(DefaultBodyLimit::max(state.config.max_upload_bytes));

    Router::new()
        .route("/health", get(health_handler))
        .merge(gated)
        .layer(cors)
        .with_state(state)
}
