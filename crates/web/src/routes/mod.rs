//! HTTP routes

pub mod health;
pub mod leads;
pub mod pages;

use axum::{
    extract::DefaultBodyLimit,
    middleware,
    routing::{get, post},
    Router,
};
use tower_http::cors::{Any, CorsLayer};

use crate::{middleware::tenant_middleware, state::AppState};

/// Create all routes
pub fn create_router(state: AppState) -> Router {
    // Health check routes (at root level for infrastructure monitoring)
    let health_routes = Router::new()
        .route("/health", get(health::health))
        .route("/health/live", get(health::liveness))
        .route("/health/ready", get(health::readiness));

    // Public API routes - under /api/v1
    let mut public_api_routes = Router::new();

    // Lead capture - only mounted when a webhook receiver is configured
    if state.config.lead_webhook_url.is_some() {
        public_api_routes = public_api_routes.route("/leads", post(leads::submit_lead));
    }

    // Tenant sites are served from their own (sub)domains, so the public API
    // allows cross-origin calls.
    let public_api_routes = public_api_routes.layer(
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any),
    );

    // Tenant-facing pages
    let page_routes = Router::new()
        .route("/", get(pages::home))
        .route("/dashboard", get(pages::dashboard))
        .route("/login", get(pages::login))
        .route("/signup", get(pages::signup));

    // Combine all routes; tenant resolution runs on every request and
    // short-circuits the reserved bypass prefixes itself.
    Router::new()
        .merge(health_routes)
        .merge(page_routes)
        .nest("/api/v1", public_api_routes)
        .layer(middleware::from_fn_with_state(
            state.clone(),
            tenant_middleware,
        ))
        .layer(DefaultBodyLimit::max(1024 * 1024)) // 1MB request body limit
        .with_state(state)
}
