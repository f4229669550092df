//! HTTP API Layer
//!
//! REST API for the customer service using Axum.
//!
//! # Architecture
//!
//! - **Handlers**: Request handlers for customers and health
//! - **Extract**: `ValidatedJson`, which runs field and object validation
//! - **Middleware**: Request ids, tracing, audit logging
//! - **Error Handling**: Consistent error responses
//!
//! # Example
//!
//! ```rust,ignore
//! use interface_api::create_router;
//!
//! let app = create_router(Arc::new(service));
//! axum::serve(listener, app).await?;
//! ```

pub mod config;
pub mod error;
pub mod extract;
pub mod handlers;
pub mod middleware;

use std::sync::Arc;

use axum::{middleware as axum_middleware, routing::get, Router};
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::trace::TraceLayer;

use domain_customer::CustomerService;

use crate::handlers::{customer, health};
use crate::middleware::audit_middleware;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub customers: Arc<CustomerService>,
}

/// Creates the main API router
pub fn create_router(customers: Arc<CustomerService>) -> Router {
    let state = AppState { customers };

    let public_routes = Router::new()
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_check));

    // Static stats paths are matched before `/:id`
    let customer_routes = Router::new()
        .route(
            "/",
            get(customer::list_customers).post(customer::create_customer),
        )
        .route("/stats", get(customer::get_stats))
        .route("/stats/average-age", get(customer::get_average_age))
        .route(
            "/stats/age-standard-deviation",
            get(customer::get_age_standard_deviation),
        )
        .route(
            "/:id",
            get(customer::get_customer)
                .patch(customer::update_customer)
                .delete(customer::delete_customer),
        )
        .layer(axum_middleware::from_fn(audit_middleware));

    Router::new()
        .merge(public_routes)
        .nest("/api/customers", customer_routes)
        .layer(
            ServiceBuilder::new()
                .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
                .layer(TraceLayer::new_for_http())
                .layer(PropagateRequestIdLayer::x_request_id()),
        )
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}
