//! HTTP API server

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

pub mod handlers;
pub mod state;

pub use state::AppState;

/// Build the API router with permissive CORS enabled
pub fn create_router(state: AppState) -> Router {
    create_router_with_cors(state, true)
}

/// Build the API router, optionally attaching a permissive CORS layer
pub fn create_router_with_cors(state: AppState, cors: bool) -> Router {
    let router = Router::new()
        .route("/health", get(handlers::health))
        .route("/summary", get(handlers::summary))
        .route("/top-heat-days", get(handlers::top_heat_days))
        .route("/hello", get(handlers::hello))
        .route("/echo", post(handlers::echo))
        .route("/items", get(handlers::list_items))
        .route(
            "/items/:id",
            get(handlers::get_item)
                .post(handlers::create_item)
                .put(handlers::update_item)
                .delete(handlers::delete_item),
        )
        .with_state(state)
        .layer(TraceLayer::new_for_http());

    if cors {
        router.layer(CorsLayer::permissive())
    } else {
        router
    }
}
