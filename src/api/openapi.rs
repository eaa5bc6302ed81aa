//! OpenAPI document for the patient routes.

use utoipa::OpenApi;

use super::patients::{self, ErrorBody, MessageBody, PatientList, PatientMessage};
use crate::models::{CreatePatientRequest, Patient, UpdatePatientRequest};

/// OpenAPI 3 description served at `/api-docs/openapi.json`.
#[derive(OpenApi)]
#[openapi(
    info(title = "Patients API", description = "CRUD and name search over patient records"),
    paths(
        patients::list_patients,
        patients::create_patient,
        patients::get_patient,
        patients::update_patient,
        patients::search_patients
    ),
    components(schemas(
        Patient,
        CreatePatientRequest,
        UpdatePatientRequest,
        PatientList,
        PatientMessage,
        ErrorBody,
        MessageBody
    )),
    tags((name = "patients", description = "Patient records"))
)]
pub struct ApiDoc;
