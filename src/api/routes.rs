use axum::{
    middleware,
    routing::{delete, get, post},
    Router,
};
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::middleware::request_id::{make_span_with_request_id, request_id_middleware};

use super::handlers;
use super::AppState;

/// Creates the main API router with all routes
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health_check))
        .route("/household", get(handlers::get_household))
        // Pantry
        .route("/pantry", get(handlers::get_pantry))
        .route("/pantry", post(handlers::upsert_pantry_item))
        .route("/pantry/:name", delete(handlers::delete_pantry_item))
        // Ratings and predictions
        .route("/ratings", get(handlers::get_ratings))
        .route("/ratings", post(handlers::submit_rating))
        .route("/predictions", get(handlers::get_prediction))
        // Recommendations
        .route("/recommendations", post(handlers::recommend))
        .with_state(state)
        // Request ID first so the trace span can record it
        .layer(
            ServiceBuilder::new()
                .layer(middleware::from_fn(request_id_middleware))
                .layer(TraceLayer::new_for_http().make_span_with(make_span_with_request_id))
                .layer(CorsLayer::permissive()),
        )
}
