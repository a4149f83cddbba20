//! HTTP server
//!
//! Exposes the grid pricing engine over REST:
//! - `POST /api/black-scholes` - fetch history, price the 20x20 grid
//! - `GET /api/health` - health check
//!
//! CORS is fully permissive so a browser frontend can be served from any
//! origin; the layer also answers preflight OPTIONS requests.

pub mod error;
pub mod handlers;

pub use error::ServerError;

use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};

/// Build the application router
pub fn create_router() -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/api/black-scholes", post(handlers::black_scholes))
        .route("/api/health", get(handlers::health))
        .layer(cors)
}
