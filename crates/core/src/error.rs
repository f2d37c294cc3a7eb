use neurocase_types::TextError;
use neurocase_uuid::{RecordId, UuidError};

#[derive(Debug, thiserror::Error)]
pub enum RecordError {
    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: String },
    #[error("validation failed: {0}")]
    Validation(String),
    #[error("integrity constraint violated: {0}")]
    Integrity(String),
    #[error(transparent)]
    InvalidId(#[from] UuidError),
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("failed to create database directory: {0}")]
    DatabaseDirCreation(std::io::Error),
    #[error("database error: {0}")]
    Database(rusqlite::Error),
    #[error("migration to version {version} failed: {reason}")]
    MigrationFailed { version: i64, reason: String },
}

impl RecordError {
    pub fn not_found(entity: &'static str, id: RecordId) -> Self {
        Self::NotFound {
            entity,
            id: id.to_string(),
        }
    }
}

impl From<TextError> for RecordError {
    fn from(err: TextError) -> Self {
        Self::Validation(err.to_string())
    }
}

/// Constraint violations (foreign key, unique, check) become [`RecordError::Integrity`];
/// everything else is an opaque storage failure.
impl From<rusqlite::Error> for RecordError {
    fn from(err: rusqlite::Error) -> Self {
        match &err {
            rusqlite::Error::SqliteFailure(e, msg)
                if e.code == rusqlite::ErrorCode::ConstraintViolation =>
            {
                Self::Integrity(msg.clone().unwrap_or_else(|| e.to_string()))
            }
            _ => Self::Database(err),
        }
    }
}

pub type RecordResult<T> = std::result::Result<T, RecordError>;
