use neurocase_uuid::RecordId;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct LabResultsCreate {
    pub cbc: Option<String>,
    pub bmp_glucose: Option<f64>,
    pub creatinine: Option<f64>,
    pub coagulation: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct LabResultsPublic {
    #[schema(value_type = String, format = Uuid)]
    pub id: RecordId,
    #[schema(value_type = String, format = Uuid)]
    pub patient_id: RecordId,
    #[serde(flatten)]
    pub results: LabResultsCreate,
}
