//! Row-mapping and ownership helpers shared by the repository modules.

use crate::constants::PATIENTS_TABLE;
use crate::{RecordError, RecordResult};
use neurocase_types::NonEmptyText;
use neurocase_uuid::RecordId;
use rusqlite::types::Type;
use rusqlite::{params, Connection, OptionalExtension, Row};

/// Read a TEXT id column back into a [`RecordId`].
pub(crate) fn id_column(row: &Row<'_>, idx: usize) -> rusqlite::Result<RecordId> {
    let raw: String = row.get(idx)?;
    RecordId::parse(&raw)
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e)))
}

/// Read a required TEXT column back into a [`NonEmptyText`].
pub(crate) fn text_column(row: &Row<'_>, idx: usize) -> rusqlite::Result<NonEmptyText> {
    let raw: String = row.get(idx)?;
    NonEmptyText::new(raw)
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e)))
}

pub(crate) fn patient_exists(conn: &Connection, patient_id: RecordId) -> RecordResult<bool> {
    let found = conn
        .query_row(
            &format!("SELECT 1 FROM {PATIENTS_TABLE} WHERE id = ?1"),
            params![patient_id.to_string()],
            |_| Ok(()),
        )
        .optional()?;
    Ok(found.is_some())
}

/// True if `err` is a UNIQUE or PRIMARY KEY violation, as opposed to any other constraint.
pub(crate) fn is_unique_violation(err: &rusqlite::Error) -> bool {
    matches!(
        err,
        rusqlite::Error::SqliteFailure(e, _)
            if e.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE
    )
}

/// Fail with [`RecordError::Integrity`] unless `patient_id` names an existing patient.
///
/// Used before inserting child rows so the caller gets a precise message rather than a bare
/// foreign-key failure. The foreign key still guards the write itself.
pub(crate) fn require_patient(conn: &Connection, patient_id: RecordId) -> RecordResult<()> {
    if patient_exists(conn, patient_id)? {
        Ok(())
    } else {
        Err(RecordError::Integrity(format!(
            "patient {patient_id} does not exist"
        )))
    }
}
