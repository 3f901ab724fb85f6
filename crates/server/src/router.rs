use super::{handlers, state::AppState};
use axum::extract::DefaultBodyLimit;
use axum::{
    routing::{get, post},
    Router,
};
use tower_http::trace::TraceLayer;

/// Creates the Axum router with all the application routes.
pub fn create_router(app_state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::root))
        .route("/health", get(handlers::health_check))
        .route("/get_resources", get(handlers::get_resources_handler))
        .route(
            "/upload_resource",
            post(handlers::upload_resource_handler).layer(DefaultBodyLimit::max(10 * 1024 * 1024)),
        )
        .route("/clear_resources", post(handlers::clear_resources_handler))
        .route("/generate_prompt", post(handlers::generate_prompt_handler))
        .route(
            "/translate_snippet",
            post(handlers::translate_snippet_handler),
        )
        .route("/verify_key", post(handlers::verify_key_handler))
        .with_state(app_state)
        .layer(TraceLayer::new_for_http())
}
