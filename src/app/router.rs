use crate::app::handlers;
use crate::app::state::AppState;
use axum::routing::{get, post};
use axum::Router;
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health))
        .route("/reports", get(handlers::fetch_reports))
        .route("/extract/text", post(handlers::extract_text))
        .route("/extract/tables", post(handlers::extract_tables))
        .route("/extract/metrics", post(handlers::extract_metrics))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(
                    CorsLayer::new()
                        .allow_origin(Any)
                        .allow_methods(Any)
                        .allow_headers(Any),
                ),
        )
        .with_state(state)
}
