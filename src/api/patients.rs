//! Patient CRUD handlers.

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, Query, State,
    },
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use super::handlers::AppState;
use crate::error::{ApiError, ApiResult};
use crate::metrics;
use crate::models::{CreatePatientRequest, Patient, UpdatePatientRequest};

/// A list of patients.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct PatientList {
    pub patients: Vec<Patient>,
}

/// Confirmation message with the affected patient.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct PatientMessage {
    pub message: String,
    pub patient: Patient,
}

/// Body of every `error` response.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorBody {
    pub error: String,
}

/// Body of the empty-search response.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct MessageBody {
    pub message: String,
}

/// Query string of the name search.
#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct SearchParams {
    /// Substring of the patient name.
    pub name: Option<String>,
}

/// List every patient.
#[utoipa::path(
    get,
    path = "/v1/patients/",
    tag = "patients",
    responses(
        (status = 200, description = "All patients", body = PatientList),
        (status = 500, description = "Database error", body = ErrorBody)
    )
)]
pub async fn list_patients(State(state): State<AppState>) -> ApiResult<Json<PatientList>> {
    let patients = state.store.list().await?;
    Ok(Json(PatientList { patients }))
}

/// Create a patient from a complete payload.
#[utoipa::path(
    post,
    path = "/v1/patients",
    tag = "patients",
    request_body = CreatePatientRequest,
    responses(
        (status = 201, description = "Patient created", body = PatientMessage),
        (status = 400, description = "Missing or invalid field", body = ErrorBody),
        (status = 500, description = "Database error", body = ErrorBody)
    )
)]
pub async fn create_patient(
    State(state): State<AppState>,
    payload: Result<Json<CreatePatientRequest>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<PatientMessage>)> {
    let Json(request) = payload.map_err(|e| ApiError::InvalidPayload(e.body_text()))?;
    let new_patient = request.validate()?;

    let patient = state.store.insert(new_patient).await?;
    metrics::inc_patients_created();

    Ok((
        StatusCode::CREATED,
        Json(PatientMessage {
            message: "Patient added successfully".to_string(),
            patient,
        }),
    ))
}

/// Fetch one patient.
#[utoipa::path(
    get,
    path = "/v1/patients/{id}",
    tag = "patients",
    params(("id" = i64, Path, description = "Patient id")),
    responses(
        (status = 200, description = "The patient", body = Patient),
        (status = 400, description = "Id is not an integer", body = ErrorBody),
        (status = 404, description = "No patient with this id", body = ErrorBody)
    )
)]
pub async fn get_patient(
    State(state): State<AppState>,
    path: Result<Path<i64>, PathRejection>,
) -> ApiResult<Json<Patient>> {
    let Path(id) = path.map_err(|e| ApiError::InvalidPayload(e.body_text()))?;

    state
        .store
        .get(id)
        .await?
        .map(Json)
        .ok_or(ApiError::PatientNotFound { id })
}

/// Update `phone`, `address` and/or `admission` of a patient.
#[utoipa::path(
    put,
    path = "/v1/patients/{id}",
    tag = "patients",
    params(("id" = i64, Path, description = "Patient id")),
    request_body = UpdatePatientRequest,
    responses(
        (status = 200, description = "Patient updated", body = PatientMessage),
        (status = 400, description = "Invalid payload", body = ErrorBody),
        (status = 404, description = "No patient with this id", body = ErrorBody),
        (status = 500, description = "Database error", body = ErrorBody)
    )
)]
pub async fn update_patient(
    State(state): State<AppState>,
    path: Result<Path<i64>, PathRejection>,
    payload: Result<Json<UpdatePatientRequest>, JsonRejection>,
) -> ApiResult<Json<PatientMessage>> {
    let Path(id) = path.map_err(|e| ApiError::InvalidPayload(e.body_text()))?;
    let Json(request) = payload.map_err(|e| ApiError::InvalidPayload(e.body_text()))?;
    let changes = request.validate()?;

    let patient = state
        .store
        .update(id, changes)
        .await?
        .ok_or(ApiError::PatientNotFound { id })?;
    metrics::inc_patients_updated();

    Ok(Json(PatientMessage {
        message: "Patient updated successfully".to_string(),
        patient,
    }))
}

/// Case-insensitive substring search on the patient name.
#[utoipa::path(
    get,
    path = "/v1/patients/search",
    tag = "patients",
    params(SearchParams),
    responses(
        (status = 200, description = "Matching patients", body = PatientList),
        (status = 400, description = "`name` missing", body = ErrorBody),
        (status = 404, description = "No matches", body = MessageBody)
    )
)]
pub async fn search_patients(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> ApiResult<Json<PatientList>> {
    let name = params
        .name
        .filter(|name| !name.is_empty())
        .ok_or(ApiError::MissingQueryParam("name"))?;

    let patients = state.store.search_by_name(&name).await?;
    metrics::inc_patient_searches(!patients.is_empty());

    if patients.is_empty() {
        return Err(ApiError::NoMatches { name });
    }

    Ok(Json(PatientList { patients }))
}
