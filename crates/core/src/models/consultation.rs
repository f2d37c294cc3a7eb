use neurocase_uuid::RecordId;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Free-text outcome of a neurologist consultation. A patient has at most one.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct NeurologistConsultationCreate {
    pub neurologist_notes: Option<String>,
    pub diagnosis: Option<String>,
    pub treatment_plan: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct NeurologistConsultationPublic {
    #[schema(value_type = String, format = Uuid)]
    pub id: RecordId,
    #[schema(value_type = String, format = Uuid)]
    pub patient_id: RecordId,
    #[serde(flatten)]
    pub consultation: NeurologistConsultationCreate,
}
