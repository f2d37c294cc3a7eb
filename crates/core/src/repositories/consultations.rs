//! Neurologist consultations. At most one per patient, enforced by a UNIQUE constraint on
//! `patient_id`.

use crate::config::CoreConfig;
use crate::constants::CONSULTATION_TABLE;
use crate::db::with_unit_of_work;
use crate::error::{RecordError, RecordResult};
use crate::models::{NeurologistConsultationCreate, NeurologistConsultationPublic};
use crate::repositories::helpers::{id_column, is_unique_violation, require_patient};
use chrono::Utc;
use neurocase_uuid::RecordId;
use rusqlite::{params, Connection, OptionalExtension, Row};
use std::sync::Arc;

const CONSULTATION_COLUMNS: &str =
    "id, patient_id, neurologist_notes, diagnosis, treatment_plan";

/// Insert the consultation row for `patient_id`.
///
/// # Arguments
/// * `conn` - Open connection or transaction
/// * `id` - Identifier for the new row
/// * `patient_id` - Owning patient
/// * `consultation` - Fields to store
///
/// # Errors
///
/// A second consultation for the same patient is reported as [`RecordError::Integrity`] naming
/// the patient. Other constraint failures keep SQLite's own message.
pub fn insert_consultation(
    conn: &Connection,
    id: RecordId,
    patient_id: RecordId,
    consultation: &NeurologistConsultationCreate,
) -> RecordResult<()> {
    conn.execute(
        &format!(
            "INSERT INTO {CONSULTATION_TABLE} ({CONSULTATION_COLUMNS}, recorded_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)"
        ),
        params![
            id.to_string(),
            patient_id.to_string(),
            consultation.neurologist_notes,
            consultation.diagnosis,
            consultation.treatment_plan,
            Utc::now(),
        ],
    )
    .map_err(|e| {
        if is_unique_violation(&e) {
            RecordError::Integrity(format!(
                "patient {patient_id} already has a neurologist consultation"
            ))
        } else {
            e.into()
        }
    })?;
    Ok(())
}

/// Fetch the consultation owned by `patient_id`, or `None` if none was recorded.
pub fn find_consultation(
    conn: &Connection,
    patient_id: RecordId,
) -> RecordResult<Option<NeurologistConsultationPublic>> {
    let found = conn
        .query_row(
            &format!(
                "SELECT {CONSULTATION_COLUMNS} FROM {CONSULTATION_TABLE} WHERE patient_id = ?1"
            ),
            params![patient_id.to_string()],
            row_to_consultation,
        )
        .optional()?;
    Ok(found)
}

fn row_to_consultation(row: &Row<'_>) -> rusqlite::Result<NeurologistConsultationPublic> {
    Ok(NeurologistConsultationPublic {
        id: id_column(row, 0)?,
        patient_id: id_column(row, 1)?,
        consultation: NeurologistConsultationCreate {
            neurologist_notes: row.get(2)?,
            diagnosis: row.get(3)?,
            treatment_plan: row.get(4)?,
        },
    })
}

#[derive(Clone, Debug)]
pub struct ConsultationService {
    cfg: Arc<CoreConfig>,
}

impl ConsultationService {
    pub fn new(cfg: Arc<CoreConfig>) -> Self {
        Self { cfg }
    }

    /// Records the neurologist consultation for a patient.
    ///
    /// # Errors
    ///
    /// Returns [`RecordError::Integrity`] if the patient does not exist or already has a
    /// consultation.
    pub fn create_consultation(
        &self,
        patient_id: RecordId,
        consultation: NeurologistConsultationCreate,
    ) -> RecordResult<NeurologistConsultationPublic> {
        let id = RecordId::new();
        with_unit_of_work(&self.cfg, |tx| {
            require_patient(tx, patient_id)?;
            insert_consultation(tx, id, patient_id, &consultation)
        })?;
        tracing::info!(patient_id = %patient_id, consultation_id = %id, "recorded consultation");

        Ok(NeurologistConsultationPublic {
            id,
            patient_id,
            consultation,
        })
    }

    /// # Errors
    ///
    /// Returns [`RecordError::NotFound`] if the patient has no consultation.
    pub fn get_consultation_by_patient(
        &self,
        patient_id: RecordId,
    ) -> RecordResult<NeurologistConsultationPublic> {
        with_unit_of_work(&self.cfg, |tx| {
            find_consultation(tx, patient_id)?
                .ok_or_else(|| RecordError::not_found("neurologist consultation", patient_id))
        })
    }
}
