//! Read-only reporting projection.

use neurocase_uuid::RecordId;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::{LabResultsCreate, VitalsCreate};

/// Vitals- and lab-shaped fields for one patient, merged for export.
///
/// Not persisted. Built from the patient's most recent vitals reading and most recent lab
/// result; see [`AllReportData::compose`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct AllReportData {
    #[schema(value_type = String, format = Uuid)]
    pub patient_id: RecordId,
    #[serde(flatten)]
    pub data: VitalsCreate,
}

impl AllReportData {
    /// Merge the latest vitals reading with the latest lab result.
    ///
    /// Lab-shaped fields come from the lab result when it has a value, otherwise from the
    /// vitals reading. Missing inputs leave their fields `None`.
    pub fn compose(
        patient_id: RecordId,
        latest_vitals: Option<VitalsCreate>,
        latest_lab: Option<LabResultsCreate>,
    ) -> Self {
        let mut data = latest_vitals.unwrap_or_default();
        if let Some(lab) = latest_lab {
            data.cbc = lab.cbc.or(data.cbc);
            data.bmp_glucose = lab.bmp_glucose.or(data.bmp_glucose);
            data.creatinine = lab.creatinine.or(data.creatinine);
            data.coagulation = lab.coagulation.or(data.coagulation);
        }

        Self { patient_id, data }
    }
}
