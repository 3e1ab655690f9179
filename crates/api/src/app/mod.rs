//! HTTP API application wiring (Axum router + service wiring).
//!
//! - `services.rs`: store selection and dispatcher construction
//! - `routes/`: HTTP routes + handlers
//! - `dto.rs`: response bodies that are not user projections
//! - `errors.rs`: consistent error responses

use std::sync::Arc;

use axum::{Extension, Router, routing::get};
use tower::ServiceBuilder;

use crate::middleware;

pub mod dto;
pub mod errors;
pub mod routes;
pub mod services;

pub use services::AppServices;

/// Build the full HTTP router (public entrypoint used by `main.rs` and tests).
pub fn build_app(services: AppServices) -> Router {
    let context_state = middleware::ContextState {
        shutdown: services.shutdown.clone(),
    };
    let services = Arc::new(services);

    Router::new()
        .route("/health", get(routes::system::health))
        .merge(routes::router())
        .layer(
            ServiceBuilder::new()
                .layer(axum::middleware::from_fn_with_state(
                    context_state,
                    middleware::request_context,
                ))
                .layer(Extension(services)),
        )
}
