//! Route table

use axum::{
    routing::{get, post, put},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::api::handlers::{auth, pickups, waste};
use crate::api::state::AppState;

/// Builds the full application router
pub fn create_router(state: AppState) -> Router {
    // Configure CORS
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let api = Router::new()
        // Auth routes
        .route("/auth/register", post(auth::register))
        .route("/auth/login", post(auth::login))
        // Pickup routes
        .route("/pickups", post(pickups::create_pickup))
        .route("/pickups/customer", get(pickups::list_for_customer))
        .route("/pickups/collector/available", get(pickups::list_available))
        .route("/pickups/collector/active", get(pickups::list_active))
        .route("/pickups/collector/history", get(pickups::list_history))
        .route("/pickups/accept/:id", put(pickups::accept_pickup))
        .route("/pickups/complete/:id", put(pickups::complete_pickup))
        .route("/pickups/cancel/:id", put(pickups::cancel_pickup))
        .route("/pickups/:id", get(pickups::get_pickup))
        // Waste image classification
        .route("/waste/detect", post(waste::detect_waste));

    Router::new()
        .route("/", get(auth::root))
        .route("/health", get(auth::health_check))
        .nest("/api", api)
        // Middleware
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        // Shared state
        .with_state(state)
}
