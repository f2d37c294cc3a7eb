//! Lab results, one row per panel drawn.

use crate::config::CoreConfig;
use crate::constants::LAB_RESULTS_TABLE;
use crate::db::with_unit_of_work;
use crate::error::{RecordError, RecordResult};
use crate::models::{LabResultsCreate, LabResultsPublic};
use crate::repositories::helpers::{id_column, require_patient};
use crate::validation::validate_lab_results;
use chrono::Utc;
use neurocase_uuid::RecordId;
use rusqlite::{params, Connection, OptionalExtension, Row};
use std::sync::Arc;

const LAB_COLUMNS: &str = "id, patient_id, cbc, bmp_glucose, creatinine, coagulation";

/// Insert one set of lab results, stamping it with the current time.
///
/// # Arguments
/// * `conn` - Open connection or transaction
/// * `id` - Identifier for the new row
/// * `patient_id` - Owning patient; must already exist
/// * `results` - Values to store
pub fn insert_lab_results(
    conn: &Connection,
    id: RecordId,
    patient_id: RecordId,
    results: &LabResultsCreate,
) -> RecordResult<()> {
    conn.execute(
        &format!(
            "INSERT INTO {LAB_RESULTS_TABLE} ({LAB_COLUMNS}, recorded_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)"
        ),
        params![
            id.to_string(),
            patient_id.to_string(),
            results.cbc,
            results.bmp_glucose,
            results.creatinine,
            results.coagulation,
            Utc::now(),
        ],
    )?;
    Ok(())
}

/// All lab results for a patient, oldest first.
///
/// # Returns
/// An empty vector if the patient has none, including when the patient does not exist.
pub fn lab_results_for_patient(
    conn: &Connection,
    patient_id: RecordId,
) -> RecordResult<Vec<LabResultsPublic>> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {LAB_COLUMNS} FROM {LAB_RESULTS_TABLE}
         WHERE patient_id = ?1
         ORDER BY recorded_at ASC, rowid ASC"
    ))?;
    let rows = stmt.query_map(params![patient_id.to_string()], row_to_lab_results)?;
    rows.collect::<Result<Vec<_>, _>>().map_err(RecordError::from)
}

/// The most recent lab results for a patient, if any.
pub fn latest_lab_results(
    conn: &Connection,
    patient_id: RecordId,
) -> RecordResult<Option<LabResultsPublic>> {
    let latest = conn
        .query_row(
            &format!(
                "SELECT {LAB_COLUMNS} FROM {LAB_RESULTS_TABLE}
                 WHERE patient_id = ?1
                 ORDER BY recorded_at DESC, rowid DESC
                 LIMIT 1"
            ),
            params![patient_id.to_string()],
            row_to_lab_results,
        )
        .optional()?;
    Ok(latest)
}

fn row_to_lab_results(row: &Row<'_>) -> rusqlite::Result<LabResultsPublic> {
    Ok(LabResultsPublic {
        id: id_column(row, 0)?,
        patient_id: id_column(row, 1)?,
        results: LabResultsCreate {
            cbc: row.get(2)?,
            bmp_glucose: row.get(3)?,
            creatinine: row.get(4)?,
            coagulation: row.get(5)?,
        },
    })
}

#[derive(Clone, Debug)]
pub struct LabResultsService {
    cfg: Arc<CoreConfig>,
}

impl LabResultsService {
    pub fn new(cfg: Arc<CoreConfig>) -> Self {
        Self { cfg }
    }

    /// Records lab results for an existing patient.
    ///
    /// # Errors
    ///
    /// Returns [`RecordError::Validation`] for negative or non-finite values and
    /// [`RecordError::Integrity`] if the patient does not exist.
    pub fn create_lab_results(
        &self,
        patient_id: RecordId,
        results: LabResultsCreate,
    ) -> RecordResult<LabResultsPublic> {
        validate_lab_results(&results)?;

        let id = RecordId::new();
        with_unit_of_work(&self.cfg, |tx| {
            require_patient(tx, patient_id)?;
            insert_lab_results(tx, id, patient_id, &results)
        })?;
        tracing::info!(patient_id = %patient_id, lab_results_id = %id, "recorded lab results");

        Ok(LabResultsPublic {
            id,
            patient_id,
            results,
        })
    }

    /// Lists a patient's lab results, oldest first.
    pub fn get_lab_results_by_patient(
        &self,
        patient_id: RecordId,
    ) -> RecordResult<Vec<LabResultsPublic>> {
        with_unit_of_work(&self.cfg, |tx| lab_results_for_patient(tx, patient_id))
    }
}
