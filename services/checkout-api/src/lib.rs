//! Coursepay Checkout API
//!
//! HTTP service for course purchases through Konnect.
//!
//! ## REST Endpoints
//!
//! - `POST /api/v1/purchase/checkout/create-checkout-session` - Start a Konnect checkout
//! - `GET /api/v1/purchase/course/{courseId}/detail-with-status` - Course plus purchase flag
//! - `GET /api/v1/purchase` - Completed purchases with their courses
//! - `GET|POST /api/payments/webhook?payment_ref=` - Konnect payment notification
//!
//! ## Health Endpoints
//!
//! - `GET /health` - Liveness probe
//! - `GET /ready` - Readiness probe
//! - `GET /metrics` - Prometheus metrics

pub mod auth;
pub mod config;
pub mod error;
pub mod handlers;
pub mod state;

use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::Router;
use metrics_exporter_prometheus::PrometheusHandle;
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

use crate::handlers::{health, ready};
use crate::state::AppState;

pub use crate::config::{Config, ConfigError};

/// Build the HTTP router with middleware
pub fn build_router(state: AppState, metrics_handle: Option<PrometheusHandle>) -> Router {
    let request_timeout = state.request_timeout();

    // API v1 purchase routes
    let api_v1 = Router::new()
        .route("/purchase", get(handlers::list_purchased_courses))
        .route(
            "/purchase/checkout/create-checkout-session",
            post(handlers::create_checkout_session),
        )
        .route(
            "/purchase/course/{courseId}/detail-with-status",
            get(handlers::course_detail_with_status),
        );

    // Konnect may deliver the notification as GET or POST
    let webhook_routes = Router::new().route(
        "/api/payments/webhook",
        get(handlers::konnect_webhook).post(handlers::konnect_webhook),
    );

    // Health routes (no timeout)
    let health_routes = Router::new()
        .route("/health", get(health))
        .route("/ready", get(ready));

    // Metrics route (no timeout)
    let metrics_route = if let Some(handle) = metrics_handle {
        Router::new().route("/metrics", get(move || async move { handle.render() }))
    } else {
        Router::new()
    };

    // Outermost first
    let middleware = ServiceBuilder::new()
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            request_timeout,
        ));

    Router::new()
        .nest("/api/v1", api_v1)
        .merge(webhook_routes)
        .layer(middleware)
        .merge(health_routes)
        .merge(metrics_route)
        .with_state(state)
}
