//! Records owned by a patient: vitals, lab results, the neurologist consultation and the
//! composite report.

use api_shared::ErrorBody;
use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    Json,
};
use neurocase_core::{
    AllReportData, ConsultationService, LabResultsCreate, LabResultsPublic, LabResultsService,
    NeurologistConsultationCreate, NeurologistConsultationPublic, RecordId, ReportService,
    VitalsCreate, VitalsPublic, VitalsService,
};

use crate::error::ApiResult;
use crate::AppState;

#[utoipa::path(
    get,
    path = "/patients/{id}/vitals",
    params(("id" = String, Path, description = "Patient id")),
    responses(
        (status = 200, description = "Vitals readings, oldest first", body = [VitalsPublic]),
        (status = 400, description = "Malformed id", body = ErrorBody)
    )
)]
#[axum::debug_handler]
pub async fn list_vitals(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<Vec<VitalsPublic>>> {
    let id = RecordId::parse(&id)?;
    Ok(Json(VitalsService::new(state.cfg).get_vitals_by_patient(id)?))
}

#[utoipa::path(
    post,
    path = "/patients/{id}/vitals",
    params(("id" = String, Path, description = "Patient id")),
    request_body = VitalsCreate,
    responses(
        (status = 201, description = "Reading recorded", body = VitalsPublic),
        (status = 409, description = "Unknown patient", body = ErrorBody),
        (status = 422, description = "Invalid measurement", body = ErrorBody)
    )
)]
#[axum::debug_handler]
pub async fn create_vitals(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<VitalsCreate>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<VitalsPublic>)> {
    let id = RecordId::parse(&id)?;
    let Json(reading) = payload?;
    let created = VitalsService::new(state.cfg).create_vitals(id, reading)?;
    Ok((StatusCode::CREATED, Json(created)))
}

#[utoipa::path(
    get,
    path = "/patients/{id}/lab-results",
    params(("id" = String, Path, description = "Patient id")),
    responses(
        (status = 200, description = "Lab results, oldest first", body = [LabResultsPublic]),
        (status = 400, description = "Malformed id", body = ErrorBody)
    )
)]
#[axum::debug_handler]
pub async fn list_lab_results(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<Vec<LabResultsPublic>>> {
    let id = RecordId::parse(&id)?;
    Ok(Json(
        LabResultsService::new(state.cfg).get_lab_results_by_patient(id)?,
    ))
}

#[utoipa::path(
    post,
    path = "/patients/{id}/lab-results",
    params(("id" = String, Path, description = "Patient id")),
    request_body = LabResultsCreate,
    responses(
        (status = 201, description = "Lab results recorded", body = LabResultsPublic),
        (status = 409, description = "Unknown patient", body = ErrorBody),
        (status = 422, description = "Invalid value", body = ErrorBody)
    )
)]
#[axum::debug_handler]
pub async fn create_lab_results(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<LabResultsCreate>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<LabResultsPublic>)> {
    let id = RecordId::parse(&id)?;
    let Json(results) = payload?;
    let created = LabResultsService::new(state.cfg).create_lab_results(id, results)?;
    Ok((StatusCode::CREATED, Json(created)))
}

#[utoipa::path(
    get,
    path = "/patients/{id}/consultation",
    params(("id" = String, Path, description = "Patient id")),
    responses(
        (status = 200, description = "The consultation", body = NeurologistConsultationPublic),
        (status = 404, description = "No consultation recorded", body = ErrorBody)
    )
)]
#[axum::debug_handler]
pub async fn get_consultation(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<NeurologistConsultationPublic>> {
    let id = RecordId::parse(&id)?;
    Ok(Json(
        ConsultationService::new(state.cfg).get_consultation_by_patient(id)?,
    ))
}

#[utoipa::path(
    post,
    path = "/patients/{id}/consultation",
    params(("id" = String, Path, description = "Patient id")),
    request_body = NeurologistConsultationCreate,
    responses(
        (status = 201, description = "Consultation recorded", body = NeurologistConsultationPublic),
        (status = 409, description = "Unknown patient or consultation already recorded", body = ErrorBody)
    )
)]
#[axum::debug_handler]
pub async fn create_consultation(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<NeurologistConsultationCreate>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<NeurologistConsultationPublic>)> {
    let id = RecordId::parse(&id)?;
    let Json(consultation) = payload?;
    let created = ConsultationService::new(state.cfg).create_consultation(id, consultation)?;
    Ok((StatusCode::CREATED, Json(created)))
}

#[utoipa::path(
    get,
    path = "/patients/{id}/report",
    params(("id" = String, Path, description = "Patient id")),
    responses(
        (status = 200, description = "Latest vitals merged with latest lab results", body = AllReportData),
        (status = 404, description = "No such patient", body = ErrorBody)
    )
)]
/// Export projection for one patient.
#[axum::debug_handler]
pub async fn get_report(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<AllReportData>> {
    let id = RecordId::parse(&id)?;
    Ok(Json(ReportService::new(state.cfg).report_for_patient(id)?))
}
