//! HTTP API: patient CRUD routes plus health, readiness and metrics endpoints.

pub mod handlers;
pub mod openapi;
pub mod patients;
pub mod routes;

pub use handlers::AppState;
pub use openapi::ApiDoc;
pub use routes::create_router;
