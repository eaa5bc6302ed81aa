//! HTTP CRUD service for hospital patient records.
//!
//! A single `patients` table behind five JSON endpoints:
//!
//! ```text
//! GET  /v1/patients/              list every patient
//! POST /v1/patients               create a patient
//! GET  /v1/patients/{id}          fetch one patient
//! PUT  /v1/patients/{id}          update phone, address, admission
//! GET  /v1/patients/search?name=  case-insensitive substring search
//! ```
//!
//! Patients are never deleted, and `name`/`age` cannot change after creation.
//!
//! # Modules
//!
//! - [`config`]: Configuration loading from environment
//! - [`error`]: Startup and request error types
//! - [`models`]: Patient record and request payloads
//! - [`db`]: SQLite pool, schema and the patient store
//! - [`api`]: HTTP routes and handlers
//! - [`metrics`]: Prometheus metrics
//! - [`utils`]: Utility functions

pub mod api;
pub mod config;
pub mod db;
pub mod error;
pub mod metrics;
pub mod models;
pub mod utils;

pub use config::Config;
pub use error::{ApiError, Result, ServiceError};
