//! HTTP surface (axum). Routes the chat proxy, itinerary locations and reverse geocoding.

pub mod error;
pub mod handlers;
pub mod state;

pub use error::ApiError;
pub use state::AppState;

use axum::{
    Router,
    routing::{get, post},
};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health))
        .route("/api/ai/chat", post(handlers::chat))
        .route(
            "/api/trips/:trip_id/locations",
            post(handlers::add_location).get(handlers::list_locations),
        )
        .route("/api/geo/reverse", get(handlers::reverse_geocode))
        .with_state(state)
}
