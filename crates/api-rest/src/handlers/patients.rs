//! `/patients` and `/patients/:id`.

use api_shared::{ErrorBody, PageParams};
use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Path, Query, State,
    },
    http::StatusCode,
    Json,
};
use neurocase_core::{
    PatientCreate, PatientPublic, PatientService, PatientUpdate, PatientsPublic, RecordId,
};

use crate::error::ApiResult;
use crate::AppState;

#[utoipa::path(
    get,
    path = "/patients",
    params(PageParams),
    responses(
        (status = 200, description = "One page of patients and the total count", body = PatientsPublic),
        (status = 400, description = "Malformed skip or limit", body = ErrorBody),
        (status = 422, description = "limit was zero", body = ErrorBody)
    )
)]
#[axum::debug_handler]
pub async fn list_patients(
    State(state): State<AppState>,
    params: Result<Query<PageParams>, QueryRejection>,
) -> ApiResult<Json<PatientsPublic>> {
    let Query(page) = params?;
    let patients = PatientService::new(state.cfg).list_patients(page.skip, page.limit)?;
    Ok(Json(patients))
}

#[utoipa::path(
    get,
    path = "/patients/{id}",
    params(("id" = String, Path, description = "Patient id")),
    responses(
        (status = 200, description = "The patient", body = PatientPublic),
        (status = 400, description = "Malformed id", body = ErrorBody),
        (status = 404, description = "No such patient", body = ErrorBody)
    )
)]
#[axum::debug_handler]
pub async fn get_patient(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<PatientPublic>> {
    let id = RecordId::parse(&id)?;
    Ok(Json(PatientService::new(state.cfg).get_patient(id)?))
}

#[utoipa::path(
    post,
    path = "/patients",
    request_body = PatientCreate,
    responses(
        (status = 201, description = "Patient created", body = PatientPublic),
        (status = 422, description = "Missing or invalid fields", body = ErrorBody)
    )
)]
/// Registers a patient. Any `id` in the body is ignored and a fresh one is generated.
#[axum::debug_handler]
pub async fn create_patient(
    State(state): State<AppState>,
    payload: Result<Json<PatientCreate>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<PatientPublic>)> {
    let Json(patient) = payload?;
    let created = PatientService::new(state.cfg).create_patient(patient)?;
    Ok((StatusCode::CREATED, Json(created)))
}

#[utoipa::path(
    patch,
    path = "/patients/{id}",
    params(("id" = String, Path, description = "Patient id")),
    request_body = PatientUpdate,
    responses(
        (status = 200, description = "Updated patient", body = PatientPublic),
        (status = 404, description = "No such patient", body = ErrorBody),
        (status = 422, description = "Invalid fields", body = ErrorBody)
    )
)]
#[axum::debug_handler]
pub async fn update_patient(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<PatientUpdate>, JsonRejection>,
) -> ApiResult<Json<PatientPublic>> {
    let id = RecordId::parse(&id)?;
    let Json(update) = payload?;
    Ok(Json(PatientService::new(state.cfg).update_patient(id, update)?))
}
