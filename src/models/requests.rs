//! Request bodies for creating and updating patients.
//!
//! Every field is optional at the serde level so that a missing key becomes a
//! typed validation error instead of an extractor rejection.

use serde::Deserialize;
use utoipa::ToSchema;

use super::patient::{
    NewPatient, PatientChanges, ADDRESS_MAX_LEN, ADMISSION_MAX_LEN, NAME_MAX_LEN,
};
use crate::error::ApiError;

/// Body of `POST /v1/patients`.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct CreatePatientRequest {
    pub name: Option<String>,
    pub age: Option<i32>,
    pub address: Option<String>,
    pub admission: Option<String>,
    pub phone: Option<i64>,
}

impl CreatePatientRequest {
    /// Check that every field is present and within its column width.
    pub fn validate(self) -> Result<NewPatient, ApiError> {
        let name = required(self.name, "name")?;
        let age = required(self.age, "age")?;
        let address = required(self.address, "address")?;
        let admission = required(self.admission, "admission")?;
        let phone = required(self.phone, "phone")?;

        check_len(&name, "name", NAME_MAX_LEN)?;
        check_len(&address, "address", ADDRESS_MAX_LEN)?;
        check_len(&admission, "admission", ADMISSION_MAX_LEN)?;

        Ok(NewPatient {
            name,
            age,
            address,
            admission,
            phone,
        })
    }
}

/// Body of `PUT /v1/patients/{id}`.
///
/// Only `phone`, `address` and `admission` can change. Any other keys in the
/// body, `name` and `age` included, are ignored.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct UpdatePatientRequest {
    pub phone: Option<i64>,
    pub address: Option<String>,
    pub admission: Option<String>,
}

impl UpdatePatientRequest {
    /// Check the widths of the fields that are present.
    pub fn validate(self) -> Result<PatientChanges, ApiError> {
        if let Some(address) = &self.address {
            check_len(address, "address", ADDRESS_MAX_LEN)?;
        }
        if let Some(admission) = &self.admission {
            check_len(admission, "admission", ADMISSION_MAX_LEN)?;
        }

        Ok(PatientChanges {
            phone: self.phone,
            address: self.address,
            admission: self.admission,
        })
    }
}

fn required<T>(value: Option<T>, field: &str) -> Result<T, ApiError> {
    value.ok_or_else(|| ApiError::InvalidPayload(format!("missing required field `{field}`")))
}

fn check_len(value: &str, field: &str, max: usize) -> Result<(), ApiError> {
    if value.chars().count() > max {
        return Err(ApiError::InvalidPayload(format!(
            "`{field}` must be at most {max} characters"
        )));
    }
    Ok(())
}
