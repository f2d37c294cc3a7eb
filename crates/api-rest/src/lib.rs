//! # API REST
//!
//! REST API for the neurocase intake record.
//!
//! Handles:
//! - HTTP endpoints with axum
//! - OpenAPI/Swagger documentation
//! - REST-specific concerns (JSON bodies, error bodies, CORS, request tracing)
//!
//! Every request builds its service from the shared [`CoreConfig`] and runs one unit of work
//! against the store.

#![warn(rust_2018_idioms)]

pub mod error;
pub mod handlers;

use std::sync::Arc;

use axum::{
    http::{header, HeaderValue, Method},
    routing::get,
    Router,
};
use neurocase_core::CoreConfig;
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    trace::TraceLayer,
};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

pub use error::{ApiError, ApiResult};

/// Origins allowed when `NEUROCASE_CORS_ORIGINS` is unset.
pub const DEFAULT_CORS_ORIGINS: &str = "http://localhost,http://localhost:8080";

/// Application state shared by every handler.
#[derive(Clone)]
pub struct AppState {
    pub cfg: Arc<CoreConfig>,
}

#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::health,
        handlers::patients::list_patients,
        handlers::patients::get_patient,
        handlers::patients::create_patient,
        handlers::patients::update_patient,
        handlers::records::list_vitals,
        handlers::records::create_vitals,
        handlers::records::list_lab_results,
        handlers::records::create_lab_results,
        handlers::records::get_consultation,
        handlers::records::create_consultation,
        handlers::records::get_report,
    ),
    components(schemas(
        api_shared::HealthRes,
        api_shared::ErrorBody,
        api_shared::ErrorDetail,
        neurocase_core::PatientCreate,
        neurocase_core::PatientPublic,
        neurocase_core::PatientUpdate,
        neurocase_core::PatientsPublic,
        neurocase_core::VitalsCreate,
        neurocase_core::VitalsPublic,
        neurocase_core::LabResultsCreate,
        neurocase_core::LabResultsPublic,
        neurocase_core::NeurologistConsultationCreate,
        neurocase_core::NeurologistConsultationPublic,
        neurocase_core::AllReportData,
    ))
)]
pub struct ApiDoc;

/// Parse a comma-separated origin list, falling back to [`DEFAULT_CORS_ORIGINS`].
///
/// Blank entries are skipped.
///
/// # Errors
///
/// Returns an error if an entry is not a valid header value.
pub fn cors_origins_from_env_value(
    value: Option<String>,
) -> Result<Vec<HeaderValue>, header::InvalidHeaderValue> {
    let raw = value
        .filter(|v| !v.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_CORS_ORIGINS.to_owned());

    raw.split(',')
        .map(str::trim)
        .filter(|origin| !origin.is_empty())
        .map(HeaderValue::from_str)
        .collect()
}

fn cors_layer(origins: Vec<HeaderValue>) -> CorsLayer {
    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([Method::GET, Method::POST, Method::PATCH])
        .allow_headers([header::CONTENT_TYPE])
}

/// Build the full REST router: API routes, Swagger UI, CORS and request tracing.
pub fn router(state: AppState, cors_origins: Vec<HeaderValue>) -> Router {
    use handlers::{patients, records};

    Router::new()
        .route("/health", get(handlers::health))
        .route(
            "/patients",
            get(patients::list_patients).post(patients::create_patient),
        )
        .route(
            "/patients/:id",
            get(patients::get_patient).patch(patients::update_patient),
        )
        .route(
            "/patients/:id/vitals",
            get(records::list_vitals).post(records::create_vitals),
        )
        .route(
            "/patients/:id/lab-results",
            get(records::list_lab_results).post(records::create_lab_results),
        )
        .route(
            "/patients/:id/consultation",
            get(records::get_consultation).post(records::create_consultation),
        )
        .route("/patients/:id/report", get(records::get_report))
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(cors_layer(cors_origins))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
