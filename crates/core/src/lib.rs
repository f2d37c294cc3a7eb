//! # Neurocase Core
//!
//! Core data model and persistence for the neurocase stroke-intake record system.
//!
//! This crate contains:
//! - Entity shapes for patients, vitals readings, lab results and neurologist consultations,
//!   each in a *create* (client input) and *public* (server output) projection
//! - The SQLite store: connection setup, schema migrations and the per-call unit of work
//! - Access-layer services that translate create/read/update requests into rows and back
//!
//! **No API concerns**: HTTP routing, CORS and response serialisation belong in `api-rest`.

pub mod config;
pub mod constants;
pub mod db;
pub mod error;
pub mod models;
pub mod repositories;
pub mod validation;

#[cfg(test)]
pub(crate) mod test_support;

pub use config::CoreConfig;
pub use error::{RecordError, RecordResult};
pub use models::{
    AllReportData, LabResultsCreate, LabResultsPublic, NeurologistConsultationCreate,
    NeurologistConsultationPublic, PatientCreate, PatientPublic, PatientUpdate, PatientsPublic,
    VitalsCreate, VitalsPublic,
};
pub use repositories::{
    consultations::ConsultationService, lab_results::LabResultsService,
    patients::{CascadeSummary, PatientService},
    reports::ReportService,
    vitals::VitalsService,
};

pub use neurocase_types::{NonEmptyText, TextError};
pub use neurocase_uuid::{RecordId, UuidError};
