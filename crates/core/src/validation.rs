//! Input validation utilities.
//!
//! Shape checks (required fields, value kinds) happen during deserialisation. The functions
//! here apply the clinical range checks that a well-typed payload can still fail, and always
//! run before anything is written.

use crate::constants::{AGE_MAX, NIHSS_MAX};
use crate::models::{LabResultsCreate, PatientCreate, PatientUpdate, VitalsCreate};
use crate::{RecordError, RecordResult};
use std::ops::RangeInclusive;

fn check_range(field: &str, value: Option<i32>, range: RangeInclusive<i32>) -> RecordResult<()> {
    match value {
        Some(v) if !range.contains(&v) => Err(RecordError::Validation(format!(
            "{field} must be between {} and {}, got {v}",
            range.start(),
            range.end()
        ))),
        _ => Ok(()),
    }
}

fn check_measurement(field: &str, value: Option<f64>) -> RecordResult<()> {
    match value {
        Some(v) if !v.is_finite() || v < 0.0 => Err(RecordError::Validation(format!(
            "{field} must be a non-negative finite number, got {v}"
        ))),
        _ => Ok(()),
    }
}

/// Validates a patient registration payload.
///
/// # Errors
///
/// Returns [`RecordError::Validation`] if `age` is outside `0..=150` or `nihss_score` is
/// outside `0..=42`.
pub fn validate_patient(patient: &PatientCreate) -> RecordResult<()> {
    check_range("age", patient.age, 0..=AGE_MAX)?;
    check_range("nihss_score", patient.nihss_score, 0..=NIHSS_MAX)
}

/// Validates a partial patient update. Only fields present in `update` are checked.
///
/// # Errors
///
/// Returns [`RecordError::Validation`] if `age` is present and outside `0..=150`.
pub fn validate_patient_update(update: &PatientUpdate) -> RecordResult<()> {
    check_range("age", update.age, 0..=AGE_MAX)
}

/// Validates a vitals reading. Rates and pressures must be non-negative and
/// `oxygen_saturation` is a percentage.
pub fn validate_vitals(reading: &VitalsCreate) -> RecordResult<()> {
    check_range(
        "blood_pressure_systolic",
        reading.blood_pressure_systolic,
        0..=i32::MAX,
    )?;
    check_range(
        "blood_pressure_diastolic",
        reading.blood_pressure_diastolic,
        0..=i32::MAX,
    )?;
    check_range("heart_rate", reading.heart_rate, 0..=i32::MAX)?;
    check_range("respiratory_rate", reading.respiratory_rate, 0..=i32::MAX)?;
    check_range("oxygen_saturation", reading.oxygen_saturation, 0..=100)?;
    check_range("platelet_count", reading.platelet_count, 0..=i32::MAX)?;
    validate_lab_results(&reading.lab_fields())
}

/// Validates lab values: glucose and creatinine must be finite and non-negative.
pub fn validate_lab_results(results: &LabResultsCreate) -> RecordResult<()> {
    check_measurement("bmp_glucose", results.bmp_glucose)?;
    check_measurement("creatinine", results.creatinine)
}
