use neurocase_uuid::RecordId;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::lab_results::LabResultsCreate;

/// One bedside reading for a patient. Every measurement is optional.
///
/// The lab-shaped fields (`cbc`, `bmp_glucose`, `creatinine`, `coagulation`) are carried here
/// too because intake often records point-of-care values alongside the vitals.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct VitalsCreate {
    pub blood_pressure_systolic: Option<i32>,
    pub blood_pressure_diastolic: Option<i32>,
    pub heart_rate: Option<i32>,
    pub respiratory_rate: Option<i32>,
    /// SpO2 percentage, 0 to 100.
    pub oxygen_saturation: Option<i32>,
    pub significant_head_trauma: Option<bool>,
    pub recent_surgery: Option<bool>,
    pub recent_myocardial_infarction: Option<bool>,
    pub recent_hemorrhage: Option<bool>,
    pub platelet_count: Option<i32>,
    pub cbc: Option<String>,
    pub bmp_glucose: Option<f64>,
    pub creatinine: Option<f64>,
    pub coagulation: Option<String>,
}

impl VitalsCreate {
    /// The lab-shaped subset of this reading.
    pub fn lab_fields(&self) -> LabResultsCreate {
        LabResultsCreate {
            cbc: self.cbc.clone(),
            bmp_glucose: self.bmp_glucose,
            creatinine: self.creatinine,
            coagulation: self.coagulation.clone(),
        }
    }
}

/// A persisted vitals reading.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct VitalsPublic {
    #[schema(value_type = String, format = Uuid)]
    pub id: RecordId,
    #[schema(value_type = String, format = Uuid)]
    pub patient_id: RecordId,
    #[serde(flatten)]
    pub reading: VitalsCreate,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn empty_body_is_a_valid_reading() {
        let reading: VitalsCreate = serde_json::from_value(json!({})).unwrap();
        assert_eq!(reading, VitalsCreate::default());
    }

    #[test]
    fn flags_must_be_booleans() {
        let as_string =
            serde_json::from_value::<VitalsCreate>(json!({"recent_surgery": "true"}));
        assert!(as_string.is_err());

        let as_int = serde_json::from_value::<VitalsCreate>(json!({"recent_surgery": 1}));
        assert!(as_int.is_err());
    }

    #[test]
    fn glucose_accepts_integral_json_numbers() {
        let reading: VitalsCreate =
            serde_json::from_value(json!({"bmp_glucose": 110, "creatinine": 0.9})).unwrap();
        assert_eq!(reading.bmp_glucose, Some(110.0));
        assert_eq!(reading.creatinine, Some(0.9));
    }

    #[test]
    fn lab_fields_projects_shared_subset() {
        let reading = VitalsCreate {
            heart_rate: Some(80),
            cbc: Some("normal".into()),
            creatinine: Some(1.1),
            ..Default::default()
        };
        let lab = reading.lab_fields();
        assert_eq!(lab.cbc.as_deref(), Some("normal"));
        assert_eq!(lab.creatinine, Some(1.1));
        assert_eq!(lab.bmp_glucose, None);
    }
}
