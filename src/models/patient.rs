//! The patient record as stored and served.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Maximum length of a patient name, in characters.
pub const NAME_MAX_LEN: usize = 80;
/// Maximum length of an address, in characters.
pub const ADDRESS_MAX_LEN: usize = 120;
/// Maximum length of an admission note, in characters.
pub const ADMISSION_MAX_LEN: usize = 120;

/// A stored patient row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
pub struct Patient {
    /// Database-assigned identifier.
    pub id: i64,
    /// Full name.
    pub name: String,
    /// Age in years.
    pub age: i32,
    /// Postal address.
    pub address: String,
    /// Admission details.
    pub admission: String,
    /// Contact number.
    pub phone: i64,
}

impl Patient {
    /// Apply a change set, touching only the fields it carries.
    ///
    /// `name` and `age` are fixed at creation and have no counterpart here.
    pub fn apply(&mut self, changes: PatientChanges) {
        if let Some(phone) = changes.phone {
            self.phone = phone;
        }
        if let Some(address) = changes.address {
            self.address = address;
        }
        if let Some(admission) = changes.admission {
            self.admission = admission;
        }
    }
}

/// A validated patient ready for insertion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPatient {
    pub name: String,
    pub age: i32,
    pub address: String,
    pub admission: String,
    pub phone: i64,
}

/// Validated partial update. `None` leaves the stored value untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PatientChanges {
    pub phone: Option<i64>,
    pub address: Option<String>,
    pub admission: Option<String>,
}

impl PatientChanges {
    /// True when the change set carries no fields.
    pub fn is_empty(&self) -> bool {
        self.phone.is_none() && self.address.is_none() && self.admission.is_none()
    }
}
