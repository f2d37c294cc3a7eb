//! Composite report export.

use crate::config::CoreConfig;
use crate::db::with_unit_of_work;
use crate::error::{RecordError, RecordResult};
use crate::models::AllReportData;
use crate::repositories::helpers::patient_exists;
use crate::repositories::lab_results::latest_lab_results;
use crate::repositories::vitals::latest_vitals;
use neurocase_uuid::RecordId;
use std::sync::Arc;

#[derive(Clone, Debug)]
pub struct ReportService {
    cfg: Arc<CoreConfig>,
}

impl ReportService {
    pub fn new(cfg: Arc<CoreConfig>) -> Self {
        Self { cfg }
    }

    /// Builds the [`AllReportData`] projection for a patient from its latest vitals reading
    /// and latest lab result, read in one transaction.
    ///
    /// # Errors
    ///
    /// Returns [`RecordError::NotFound`] if the patient does not exist.
    pub fn report_for_patient(&self, patient_id: RecordId) -> RecordResult<AllReportData> {
        with_unit_of_work(&self.cfg, |tx| {
            if !patient_exists(tx, patient_id)? {
                return Err(RecordError::not_found("patient", patient_id));
            }
            let vitals = latest_vitals(tx, patient_id)?.map(|v| v.reading);
            let lab = latest_lab_results(tx, patient_id)?.map(|l| l.results);
            Ok(AllReportData::compose(patient_id, vitals, lab))
        })
    }
}
