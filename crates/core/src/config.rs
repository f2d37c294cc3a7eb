//! Core runtime configuration.
//!
//! Configuration is resolved once at process startup and passed into core services as an
//! `Arc<CoreConfig>`. Services never read environment variables while handling a request.

use crate::constants::{DEFAULT_BUSY_TIMEOUT_MS, DEFAULT_DATABASE_PATH};
use crate::{RecordError, RecordResult};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Core configuration resolved at startup.
#[derive(Clone, Debug)]
pub struct CoreConfig {
    database_path: PathBuf,
    busy_timeout: Duration,
}

impl CoreConfig {
    /// Create a new `CoreConfig`.
    ///
    /// # Errors
    ///
    /// Returns [`RecordError::InvalidConfig`] if `database_path` is empty or names an existing
    /// directory.
    pub fn new(database_path: PathBuf, busy_timeout: Duration) -> RecordResult<Self> {
        if database_path.as_os_str().is_empty() {
            return Err(RecordError::InvalidConfig(
                "database path cannot be empty".into(),
            ));
        }
        if database_path.is_dir() {
            return Err(RecordError::InvalidConfig(format!(
                "database path is a directory: {}",
                database_path.display()
            )));
        }

        Ok(Self {
            database_path,
            busy_timeout,
        })
    }

    pub fn database_path(&self) -> &Path {
        &self.database_path
    }

    pub fn busy_timeout(&self) -> Duration {
        self.busy_timeout
    }
}

/// Resolve the database path from an optional raw value, falling back to
/// [`DEFAULT_DATABASE_PATH`] when unset or blank.
pub fn database_path_from_env_value(value: Option<String>) -> PathBuf {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_DATABASE_PATH))
}

/// Parse the busy timeout (milliseconds) from an optional raw value.
///
/// If `value` is `None` or blank, returns [`DEFAULT_BUSY_TIMEOUT_MS`].
pub fn busy_timeout_from_env_value(value: Option<String>) -> RecordResult<Duration> {
    let value = value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty());

    let millis = match value {
        Some(v) => v.parse::<u64>().map_err(|e| {
            RecordError::InvalidConfig(format!("busy timeout must be whole milliseconds: {e}"))
        })?,
        None => DEFAULT_BUSY_TIMEOUT_MS,
    };

    Ok(Duration::from_millis(millis))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_new_rejects_empty_path() {
        let err = CoreConfig::new(PathBuf::new(), Duration::from_secs(1))
            .expect_err("empty path should be rejected");
        assert!(matches!(err, RecordError::InvalidConfig(_)));
    }

    #[test]
    fn test_new_rejects_directory_path() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let err = CoreConfig::new(temp_dir.path().to_path_buf(), Duration::from_secs(1))
            .expect_err("directory path should be rejected");
        assert!(matches!(err, RecordError::InvalidConfig(_)));
    }

    #[test]
    fn test_database_path_defaults_when_blank() {
        assert_eq!(
            database_path_from_env_value(None),
            PathBuf::from(DEFAULT_DATABASE_PATH)
        );
        assert_eq!(
            database_path_from_env_value(Some("   ".into())),
            PathBuf::from(DEFAULT_DATABASE_PATH)
        );
        assert_eq!(
            database_path_from_env_value(Some(" /var/lib/neurocase.db ".into())),
            PathBuf::from("/var/lib/neurocase.db")
        );
    }

    #[test]
    fn test_busy_timeout_parsing() {
        assert_eq!(
            busy_timeout_from_env_value(None).unwrap(),
            Duration::from_millis(DEFAULT_BUSY_TIMEOUT_MS)
        );
        assert_eq!(
            busy_timeout_from_env_value(Some("250".into())).unwrap(),
            Duration::from_millis(250)
        );
        assert!(matches!(
            busy_timeout_from_env_value(Some("soon".into())),
            Err(RecordError::InvalidConfig(_))
        ));
    }
}
