/**
 * Router Configuration
 *
 * This module provides the main router creation function that combines
 * all route configurations into a single Axum router.
 *
 * # Layers
 *
 * Both are stacked with `tower::ServiceBuilder`, outermost first:
 *
 * - `TraceLayer` logs every request through `tracing`
 * - `CorsLayer::permissive()` lets the browser client call the API from
 *   another origin
 *
 * Unknown paths answer 404 with the usual `{"error": ...}` body.
 */

use axum::Router;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::backend::error::BackendError;
use crate::backend::routes::api_routes::configure_api_routes;
use crate::backend::server::state::AppState;

/// Create the Axum router with all routes configured
pub fn create_router(app_state: AppState) -> Router<()> {
    let router = configure_api_routes(Router::new());

    // Fallback handler for 404
    let router = router.fallback(|| async { BackendError::not_found("Route not found") });

    // Trace must wrap Cors: Cors needs a response body with a Default impl
    let middleware = ServiceBuilder::new()
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    router.layer(middleware).with_state(app_state)
}
