//! Vitals readings: a time series per patient.

use crate::config::CoreConfig;
use crate::constants::VITALS_TABLE;
use crate::db::with_unit_of_work;
use crate::error::{RecordError, RecordResult};
use crate::models::{VitalsCreate, VitalsPublic};
use crate::repositories::helpers::{id_column, require_patient};
use crate::validation::validate_vitals;
use chrono::Utc;
use neurocase_uuid::RecordId;
use rusqlite::{params, Connection, OptionalExtension, Row};
use std::sync::Arc;

const VITALS_COLUMNS: &str = "id, patient_id, blood_pressure_systolic, blood_pressure_diastolic, \
     heart_rate, respiratory_rate, oxygen_saturation, significant_head_trauma, recent_surgery, \
     recent_myocardial_infarction, recent_hemorrhage, platelet_count, cbc, bmp_glucose, \
     creatinine, coagulation";

/// Insert one vitals reading, stamping it with the current time.
///
/// # Arguments
/// * `conn` - Open connection or transaction
/// * `id` - Identifier for the new reading
/// * `patient_id` - Owning patient; must already exist
/// * `reading` - Measurements to store
///
/// # Errors
///
/// Returns [`RecordError::Integrity`] if `patient_id` names no patient.
pub fn insert_vitals(
    conn: &Connection,
    id: RecordId,
    patient_id: RecordId,
    reading: &VitalsCreate,
) -> RecordResult<()> {
    conn.execute(
        &format!(
            "INSERT INTO {VITALS_TABLE} ({VITALS_COLUMNS}, recorded_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15, ?16, ?17)"
        ),
        params![
            id.to_string(),
            patient_id.to_string(),
            reading.blood_pressure_systolic,
            reading.blood_pressure_diastolic,
            reading.heart_rate,
            reading.respiratory_rate,
            reading.oxygen_saturation,
            reading.significant_head_trauma,
            reading.recent_surgery,
            reading.recent_myocardial_infarction,
            reading.recent_hemorrhage,
            reading.platelet_count,
            reading.cbc,
            reading.bmp_glucose,
            reading.creatinine,
            reading.coagulation,
            Utc::now(),
        ],
    )?;
    Ok(())
}

/// All readings for a patient, oldest first.
pub fn vitals_for_patient(conn: &Connection, patient_id: RecordId) -> RecordResult<Vec<VitalsPublic>> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {VITALS_COLUMNS} FROM {VITALS_TABLE}
         WHERE patient_id = ?1
         ORDER BY recorded_at ASC, rowid ASC"
    ))?;
    let rows = stmt.query_map(params![patient_id.to_string()], row_to_vitals)?;
    rows.collect::<Result<Vec<_>, _>>().map_err(RecordError::from)
}

/// The most recent reading for a patient, if any.
pub fn latest_vitals(conn: &Connection, patient_id: RecordId) -> RecordResult<Option<VitalsPublic>> {
    let latest = conn
        .query_row(
            &format!(
                "SELECT {VITALS_COLUMNS} FROM {VITALS_TABLE}
                 WHERE patient_id = ?1
                 ORDER BY recorded_at DESC, rowid DESC
                 LIMIT 1"
            ),
            params![patient_id.to_string()],
            row_to_vitals,
        )
        .optional()?;
    Ok(latest)
}

fn row_to_vitals(row: &Row<'_>) -> rusqlite::Result<VitalsPublic> {
    Ok(VitalsPublic {
        id: id_column(row, 0)?,
        patient_id: id_column(row, 1)?,
        reading: VitalsCreate {
            blood_pressure_systolic: row.get(2)?,
            blood_pressure_diastolic: row.get(3)?,
            heart_rate: row.get(4)?,
            respiratory_rate: row.get(5)?,
            oxygen_saturation: row.get(6)?,
            significant_head_trauma: row.get(7)?,
            recent_surgery: row.get(8)?,
            recent_myocardial_infarction: row.get(9)?,
            recent_hemorrhage: row.get(10)?,
            platelet_count: row.get(11)?,
            cbc: row.get(12)?,
            bmp_glucose: row.get(13)?,
            creatinine: row.get(14)?,
            coagulation: row.get(15)?,
        },
    })
}

/// Vitals operations. Each call runs in its own unit of work.
#[derive(Clone, Debug)]
pub struct VitalsService {
    cfg: Arc<CoreConfig>,
}

impl VitalsService {
    pub fn new(cfg: Arc<CoreConfig>) -> Self {
        Self { cfg }
    }

    /// Records a new vitals reading for an existing patient.
    ///
    /// # Errors
    ///
    /// Returns [`RecordError::Validation`] if a measurement is out of range and
    /// [`RecordError::Integrity`] if the patient does not exist. Nothing is written in
    /// either case.
    pub fn create_vitals(&self, patient_id: RecordId, reading: VitalsCreate) -> RecordResult<VitalsPublic> {
        validate_vitals(&reading)?;

        let id = RecordId::new();
        with_unit_of_work(&self.cfg, |tx| {
            require_patient(tx, patient_id)?;
            insert_vitals(tx, id, patient_id, &reading)
        })?;
        tracing::info!(patient_id = %patient_id, vitals_id = %id, "recorded vitals");

        Ok(VitalsPublic {
            id,
            patient_id,
            reading,
        })
    }

    /// Every vitals reading owned by `patient_id`, oldest first.
    ///
    /// A patient with no readings (or an id with no patient) yields an empty vector.
    pub fn get_vitals_by_patient(&self, patient_id: RecordId) -> RecordResult<Vec<VitalsPublic>> {
        with_unit_of_work(&self.cfg, |tx| vitals_for_patient(tx, patient_id))
    }
}
