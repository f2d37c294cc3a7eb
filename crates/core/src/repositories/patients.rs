//! Patient records.
//!
//! Patients are the root entity: every vitals reading, lab result and consultation row is
//! owned by exactly one patient and is removed with it.
//!
//! ## Ordering
//!
//! [`PatientService::list_patients`] pages in insertion order (SQLite `rowid`), which is
//! stable across calls as long as no patient is deleted in between.

use crate::config::CoreConfig;
use crate::constants::{
    CONSULTATION_TABLE, LAB_RESULTS_TABLE, MAX_PAGE_LIMIT, PATIENTS_TABLE, VITALS_TABLE,
};
use crate::db::with_unit_of_work;
use crate::error::{RecordError, RecordResult};
use crate::models::{PatientCreate, PatientPublic, PatientUpdate, PatientsPublic};
use crate::repositories::helpers::{id_column, text_column};
use crate::validation::{validate_patient, validate_patient_update};
use neurocase_uuid::RecordId;
use rusqlite::{params, Connection, OptionalExtension, Row};
use std::sync::Arc;

const PATIENT_COLUMNS: &str =
    "id, name, age, sex, chief_complaint, medical_history, nihss_score";

/// Insert a patient row under `id`.
pub fn insert_patient(conn: &Connection, id: RecordId, patient: &PatientCreate) -> RecordResult<()> {
    conn.execute(
        &format!("INSERT INTO {PATIENTS_TABLE} ({PATIENT_COLUMNS}) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)"),
        params![
            id.to_string(),
            patient.name.as_str(),
            patient.age,
            patient.sex.as_str(),
            patient.chief_complaint,
            patient.medical_history,
            patient.nihss_score,
        ],
    )?;
    Ok(())
}

/// Fetch one patient, or `None` if no row has this id.
pub fn find_patient(conn: &Connection, id: RecordId) -> RecordResult<Option<PatientPublic>> {
    let patient = conn
        .query_row(
            &format!("SELECT {PATIENT_COLUMNS} FROM {PATIENTS_TABLE} WHERE id = ?1"),
            params![id.to_string()],
            row_to_patient,
        )
        .optional()?;
    Ok(patient)
}

/// Overwrite every mutable column of an existing patient.
fn replace_patient(conn: &Connection, patient: &PatientPublic) -> RecordResult<()> {
    let fields = &patient.fields;
    conn.execute(
        &format!(
            "UPDATE {PATIENTS_TABLE}
             SET name = ?2, age = ?3, sex = ?4, chief_complaint = ?5, medical_history = ?6, nihss_score = ?7
             WHERE id = ?1"
        ),
        params![
            patient.id.to_string(),
            fields.name.as_str(),
            fields.age,
            fields.sex.as_str(),
            fields.chief_complaint,
            fields.medical_history,
            fields.nihss_score,
        ],
    )?;
    Ok(())
}

/// Total number of stored patients.
pub fn count_patients(conn: &Connection) -> RecordResult<u64> {
    let count: i64 = conn.query_row(
        &format!("SELECT COUNT(*) FROM {PATIENTS_TABLE}"),
        [],
        |row| row.get(0),
    )?;
    Ok(count.max(0) as u64)
}

/// A page of patients in insertion order.
pub fn page_patients(conn: &Connection, skip: u32, limit: u32) -> RecordResult<Vec<PatientPublic>> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {PATIENT_COLUMNS} FROM {PATIENTS_TABLE} ORDER BY rowid LIMIT ?1 OFFSET ?2"
    ))?;
    let rows = stmt.query_map(params![i64::from(limit), i64::from(skip)], row_to_patient)?;
    rows.collect::<Result<Vec<_>, _>>().map_err(RecordError::from)
}

fn delete_owned_rows(conn: &Connection, table: &str, patient_id: &str) -> RecordResult<usize> {
    let removed = conn.execute(
        &format!("DELETE FROM {table} WHERE patient_id = ?1"),
        params![patient_id],
    )?;
    Ok(removed)
}

fn row_to_patient(row: &Row<'_>) -> rusqlite::Result<PatientPublic> {
    Ok(PatientPublic {
        id: id_column(row, 0)?,
        fields: PatientCreate {
            name: text_column(row, 1)?,
            age: row.get(2)?,
            sex: text_column(row, 3)?,
            chief_complaint: row.get(4)?,
            medical_history: row.get(5)?,
            nihss_score: row.get(6)?,
        },
    })
}

/// Number of child rows removed alongside a patient.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CascadeSummary {
    pub vitals: usize,
    pub lab_results: usize,
    pub consultations: usize,
}

impl CascadeSummary {
    pub fn total(&self) -> usize {
        self.vitals + self.lab_results + self.consultations
    }
}

/// Pure patient data operations - no API concerns.
#[derive(Clone, Debug)]
pub struct PatientService {
    cfg: Arc<CoreConfig>,
}

impl PatientService {
    pub fn new(cfg: Arc<CoreConfig>) -> Self {
        Self { cfg }
    }

    /// Lists one page of patients along with the total number of patients stored.
    ///
    /// `limit` values above [`MAX_PAGE_LIMIT`] are clamped. The page and the count are read in
    /// the same transaction, so they agree with each other.
    ///
    /// # Errors
    ///
    /// Returns [`RecordError::Validation`] if `limit` is zero.
    pub fn list_patients(&self, skip: u32, limit: u32) -> RecordResult<PatientsPublic> {
        if limit == 0 {
            return Err(RecordError::Validation("limit must be at least 1".into()));
        }
        let limit = limit.min(MAX_PAGE_LIMIT);

        with_unit_of_work(&self.cfg, |tx| {
            let count = count_patients(tx)?;
            let patients = page_patients(tx, skip, limit)?;
            tracing::debug!(skip, limit, returned = patients.len(), count, "listed patients");
            Ok(PatientsPublic { patients, count })
        })
    }

    /// Fetches a patient by id.
    ///
    /// # Errors
    ///
    /// Returns [`RecordError::NotFound`] if no patient has this id.
    pub fn get_patient(&self, id: RecordId) -> RecordResult<PatientPublic> {
        with_unit_of_work(&self.cfg, |tx| {
            find_patient(tx, id)?.ok_or_else(|| RecordError::not_found("patient", id))
        })
    }

    /// Registers a new patient under a freshly generated id.
    ///
    /// # Errors
    ///
    /// Returns [`RecordError::Validation`] if a range check fails; nothing is written.
    pub fn create_patient(&self, patient: PatientCreate) -> RecordResult<PatientPublic> {
        validate_patient(&patient)?;

        let id = RecordId::new();
        with_unit_of_work(&self.cfg, |tx| insert_patient(tx, id, &patient))?;
        tracing::info!(patient_id = %id, "created patient");

        Ok(PatientPublic {
            id,
            fields: patient,
        })
    }

    /// Overwrites the fields present in `update` and returns the stored record.
    ///
    /// An empty update is not an error; it returns the record unchanged.
    ///
    /// # Errors
    ///
    /// Returns [`RecordError::NotFound`] if no patient has this id and
    /// [`RecordError::Validation`] if a range check fails.
    pub fn update_patient(&self, id: RecordId, update: PatientUpdate) -> RecordResult<PatientPublic> {
        validate_patient_update(&update)?;

        with_unit_of_work(&self.cfg, |tx| {
            let mut patient =
                find_patient(tx, id)?.ok_or_else(|| RecordError::not_found("patient", id))?;
            if update.is_empty() {
                return Ok(patient);
            }
            update.apply_to(&mut patient.fields);
            replace_patient(tx, &patient)?;
            tracing::info!(patient_id = %id, "updated patient");
            Ok(patient)
        })
    }

    /// Deletes a patient and every record it owns in one transaction.
    ///
    /// Child rows are removed explicitly before the patient row, inside the same transaction.
    ///
    /// # Errors
    ///
    /// Returns [`RecordError::NotFound`] if no patient has this id.
    pub fn delete_patient(&self, id: RecordId) -> RecordResult<CascadeSummary> {
        with_unit_of_work(&self.cfg, |tx| {
            let key = id.to_string();
            let summary = CascadeSummary {
                vitals: delete_owned_rows(tx, VITALS_TABLE, &key)?,
                lab_results: delete_owned_rows(tx, LAB_RESULTS_TABLE, &key)?,
                consultations: delete_owned_rows(tx, CONSULTATION_TABLE, &key)?,
            };

            let deleted = tx.execute(
                &format!("DELETE FROM {PATIENTS_TABLE} WHERE id = ?1"),
                params![key],
            )?;
            if deleted == 0 {
                return Err(RecordError::not_found("patient", id));
            }

            tracing::info!(patient_id = %id, children = summary.total(), "deleted patient");
            Ok(summary)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::open_connection;
    use crate::models::{LabResultsCreate, NeurologistConsultationCreate, VitalsCreate};
    use crate::test_support::{create_test_patient, patient_payload, test_cfg};
    use crate::{ConsultationService, LabResultsService, NonEmptyText, VitalsService};
    use std::collections::HashSet;
    use tempfile::TempDir;

    fn row_count(cfg: &CoreConfig, table: &str) -> i64 {
        let conn = open_connection(cfg).unwrap();
        conn.query_row(&format!("SELECT COUNT(*) FROM {table}"), [], |row| {
            row.get(0)
        })
        .unwrap()
    }

    #[test]
    fn test_create_then_get_returns_identical_record() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let service = PatientService::new(test_cfg(temp_dir.path()));

        let created = service
            .create_patient(patient_payload("Jane Doe", "F", Some(54)))
            .expect("create_patient should succeed");

        assert_eq!(created.fields.name, "Jane Doe");
        assert_eq!(created.fields.age, Some(54));
        assert_eq!(created.fields.chief_complaint, None);
        assert_eq!(created.fields.medical_history, None);
        assert_eq!(created.fields.nihss_score, None);

        let fetched = service.get_patient(created.id).expect("get_patient should succeed");
        assert_eq!(fetched, created);
    }

    #[test]
    fn test_created_ids_are_unique() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let cfg = test_cfg(temp_dir.path());

        let ids: HashSet<RecordId> = (0..25)
            .map(|i| create_test_patient(&cfg, &format!("Patient {i}")).id)
            .collect();
        assert_eq!(ids.len(), 25);
    }

    #[test]
    fn test_get_unknown_patient_is_not_found() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let service = PatientService::new(test_cfg(temp_dir.path()));

        let err = service
            .get_patient(RecordId::new())
            .expect_err("unknown id should fail");
        assert!(matches!(err, RecordError::NotFound { entity: "patient", .. }));
    }

    #[test]
    fn test_list_pages_and_counts() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let cfg = test_cfg(temp_dir.path());
        let service = PatientService::new(cfg.clone());

        let a = create_test_patient(&cfg, "Alice");
        let b = create_test_patient(&cfg, "Bob");
        let c = create_test_patient(&cfg, "Carol");

        let first = service.list_patients(0, 1).unwrap();
        assert_eq!(first.count, 3);
        assert_eq!(first.patients, vec![a.clone()]);

        let rest = service.list_patients(1, 100).unwrap();
        assert_eq!(rest.count, 3);
        assert_eq!(rest.patients, vec![b, c]);

        let all = service.list_patients(0, 100).unwrap();
        assert_eq!(all.patients.len(), 3);
        assert_eq!(all.patients[0], a);

        let beyond = service.list_patients(10, 5).unwrap();
        assert!(beyond.patients.is_empty());
        assert_eq!(beyond.count, 3);
    }

    #[test]
    fn test_list_on_empty_store() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let service = PatientService::new(test_cfg(temp_dir.path()));

        let page = service.list_patients(0, 100).unwrap();
        assert!(page.patients.is_empty());
        assert_eq!(page.count, 0);
    }

    #[test]
    fn test_list_rejects_zero_limit_and_clamps_large_limit() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let cfg = test_cfg(temp_dir.path());
        let service = PatientService::new(cfg.clone());
        create_test_patient(&cfg, "Alice");

        assert!(matches!(
            service.list_patients(0, 0),
            Err(RecordError::Validation(_))
        ));

        let page = service.list_patients(0, u32::MAX).unwrap();
        assert_eq!(page.patients.len(), 1);
    }

    #[test]
    fn test_create_rejects_out_of_range_and_persists_nothing() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let cfg = test_cfg(temp_dir.path());
        let service = PatientService::new(cfg.clone());

        let mut payload = patient_payload("Jane", "F", Some(54));
        payload.nihss_score = Some(99);

        let err = service.create_patient(payload).expect_err("should fail");
        assert!(matches!(err, RecordError::Validation(_)));
        assert_eq!(row_count(&cfg, PATIENTS_TABLE), 0);
    }

    #[test]
    fn test_update_overwrites_only_present_fields() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let cfg = test_cfg(temp_dir.path());
        let service = PatientService::new(cfg.clone());

        let mut payload = patient_payload("Jane", "F", Some(54));
        payload.chief_complaint = Some("left-sided weakness".into());
        let created = service.create_patient(payload).unwrap();

        let updated = service
            .update_patient(
                created.id,
                PatientUpdate {
                    name: Some(NonEmptyText::new("Jane Roe").unwrap()),
                    age: None,
                    sex: None,
                },
            )
            .expect("update should succeed");

        assert_eq!(updated.fields.name, "Jane Roe");
        assert_eq!(updated.fields.age, Some(54));
        assert_eq!(
            updated.fields.chief_complaint.as_deref(),
            Some("left-sided weakness")
        );
        assert_eq!(service.get_patient(created.id).unwrap(), updated);
    }

    #[test]
    fn test_update_unknown_patient_is_not_found() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let service = PatientService::new(test_cfg(temp_dir.path()));

        let err = service
            .update_patient(RecordId::new(), PatientUpdate::default())
            .expect_err("unknown id should fail");
        assert!(matches!(err, RecordError::NotFound { .. }));
    }

    #[test]
    fn test_delete_cascades_to_all_children() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let cfg = test_cfg(temp_dir.path());
        let service = PatientService::new(cfg.clone());

        let doomed = create_test_patient(&cfg, "Doomed");
        let kept = create_test_patient(&cfg, "Kept");

        let vitals = VitalsService::new(cfg.clone());
        vitals.create_vitals(doomed.id, VitalsCreate::default()).unwrap();
        vitals.create_vitals(doomed.id, VitalsCreate::default()).unwrap();
        vitals.create_vitals(kept.id, VitalsCreate::default()).unwrap();
        LabResultsService::new(cfg.clone())
            .create_lab_results(doomed.id, LabResultsCreate::default())
            .unwrap();
        ConsultationService::new(cfg.clone())
            .create_consultation(doomed.id, NeurologistConsultationCreate::default())
            .unwrap();

        let summary = service.delete_patient(doomed.id).expect("delete should succeed");
        assert_eq!(
            summary,
            CascadeSummary {
                vitals: 2,
                lab_results: 1,
                consultations: 1
            }
        );

        assert!(matches!(
            service.get_patient(doomed.id),
            Err(RecordError::NotFound { .. })
        ));
        assert_eq!(row_count(&cfg, "vitals"), 1);
        assert_eq!(row_count(&cfg, "lab_results"), 0);
        assert_eq!(row_count(&cfg, "neurologist_consultation"), 0);
        assert_eq!(vitals.get_vitals_by_patient(kept.id).unwrap().len(), 1);
    }

    #[test]
    fn test_database_level_cascade_removes_children() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let cfg = test_cfg(temp_dir.path());
        let patient = create_test_patient(&cfg, "Raw");
        VitalsService::new(cfg.clone())
            .create_vitals(patient.id, VitalsCreate::default())
            .unwrap();

        let conn = open_connection(&cfg).unwrap();
        conn.execute(
            "DELETE FROM patients WHERE id = ?1",
            params![patient.id.to_string()],
        )
        .unwrap();
        drop(conn);

        assert_eq!(row_count(&cfg, "vitals"), 0);
    }

    #[test]
    fn test_delete_unknown_patient_is_not_found() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let service = PatientService::new(test_cfg(temp_dir.path()));

        assert!(matches!(
            service.delete_patient(RecordId::new()),
            Err(RecordError::NotFound { .. })
        ));
    }
}
