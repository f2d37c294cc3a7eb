//! Fixtures shared by the core test modules.

use crate::{db, CoreConfig, NonEmptyText, PatientCreate, PatientPublic, PatientService};
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

/// A migrated database file inside `dir`.
pub(crate) fn test_cfg(dir: &Path) -> Arc<CoreConfig> {
    let cfg = CoreConfig::new(dir.join("test.db"), Duration::from_millis(500))
        .expect("CoreConfig::new should succeed");
    db::migrate(&cfg).expect("migrate should succeed");
    Arc::new(cfg)
}

pub(crate) fn patient_payload(name: &str, sex: &str, age: Option<i32>) -> PatientCreate {
    PatientCreate {
        name: NonEmptyText::new(name).unwrap(),
        age,
        sex: NonEmptyText::new(sex).unwrap(),
        chief_complaint: None,
        medical_history: None,
        nihss_score: None,
    }
}

pub(crate) fn create_test_patient(cfg: &Arc<CoreConfig>, name: &str) -> PatientPublic {
    PatientService::new(cfg.clone())
        .create_patient(patient_payload(name, "F", Some(60)))
        .expect("create_patient should succeed")
}
