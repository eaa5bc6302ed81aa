//! Patient record types and request payloads.

pub mod patient;
pub mod requests;

pub use patient::{NewPatient, Patient, PatientChanges};
pub use requests::{CreatePatientRequest, UpdatePatientRequest};
