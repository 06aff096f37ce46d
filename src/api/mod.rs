//! API layer - HTTP surface under `/api`
//!
//! - Handlers per resource, report, backup and currency endpoints
//! - Middleware (JWT authentication, Redis rate limiting)
//! - Validated JSON extractor
//! - Router and OpenAPI document

pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod openapi;
pub mod routes;
pub mod state;

pub use openapi::ApiDoc;
pub use routes::create_router;
pub use state::AppState;
