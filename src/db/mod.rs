//! SQLite persistence for patient records.
//!
//! - [`pool`]: connection pool construction
//! - [`schema`]: table bootstrap
//! - [`patients`]: the [`PatientStore`] CRUD operations

pub mod patients;
pub mod pool;
pub mod schema;

pub use patients::PatientStore;
pub use pool::create_pool;
pub use schema::ensure_schema;
