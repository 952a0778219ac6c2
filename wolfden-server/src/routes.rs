use axum::{
    extract::DefaultBodyLimit,
    routing::{get, get_service, MethodRouter},
    Router,
};
use tower_http::{
    services::{ServeDir, ServeFile},
    trace::TraceLayer,
};

use crate::config::ServerConfig;
use crate::handlers;
use crate::state::AppState;

/// Builds the application router: the JSON API under `/api`, the entry page
/// at `/`, and every other GET served as a static file from the root.
pub fn build_router(app_state: AppState, config: &ServerConfig) -> Router {
    // Non-GET requests outside the API routes are answered with a JSON 404.
    let static_files: MethodRouter =
        get_service(ServeDir::new(&config.root)).fallback(handlers::api_not_found);

    Router::new()
        .route(
            "/",
            get_service(ServeFile::new(config.entry_path())).fallback(handlers::api_not_found),
        )
        .route(
            "/api/config",
            get(handlers::get_config)
                .post(handlers::update_config)
                .fallback(handlers::api_not_found),
        )
        .route(
            "/api/default_prompt",
            get(handlers::get_default_prompt).fallback(handlers::api_not_found),
        )
        .route(
            "/api/saves",
            get(handlers::list_saves).fallback(handlers::api_not_found),
        )
        .route(
            "/api/saves/*name",
            get(handlers::get_save)
                .post(handlers::put_save)
                .delete(handlers::delete_save)
                .fallback(handlers::api_not_found),
        )
        .route(
            "/api/presets",
            get(handlers::list_presets).fallback(handlers::api_not_found),
        )
        .route(
            "/api/presets/*name",
            get(handlers::get_preset)
                .post(handlers::put_preset)
                .delete(handlers::delete_preset)
                .fallback(handlers::api_not_found),
        )
        .fallback_service(static_files)
        .layer(DefaultBodyLimit::max(config.body_limit))
        .layer(TraceLayer::new_for_http())
        .with_state(app_state)
}
