use neurocase_types::NonEmptyText;
use neurocase_uuid::RecordId;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Fields a client supplies to register a patient.
///
/// `name` and `sex` are required and must not be blank; everything else may be omitted.
/// Unknown fields, including any client-chosen `id`, are ignored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct PatientCreate {
    #[schema(value_type = String, example = "Jane Doe")]
    pub name: NonEmptyText,
    #[schema(example = 54)]
    pub age: Option<i32>,
    #[schema(value_type = String, example = "F")]
    pub sex: NonEmptyText,
    pub chief_complaint: Option<String>,
    pub medical_history: Option<String>,
    /// NIH Stroke Scale total, 0 to 42.
    pub nihss_score: Option<i32>,
}

/// A persisted patient.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct PatientPublic {
    #[schema(value_type = String, format = Uuid)]
    pub id: RecordId,
    #[serde(flatten)]
    pub fields: PatientCreate,
}

/// Partial overwrite of a patient's identity fields. Absent fields are left unchanged.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct PatientUpdate {
    #[schema(value_type = Option<String>)]
    pub name: Option<NonEmptyText>,
    pub age: Option<i32>,
    #[schema(value_type = Option<String>)]
    pub sex: Option<NonEmptyText>,
}

impl PatientUpdate {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.age.is_none() && self.sex.is_none()
    }

    /// Overwrite the fields present in this update onto `target`.
    pub fn apply_to(self, target: &mut PatientCreate) {
        if let Some(name) = self.name {
            target.name = name;
        }
        if let Some(age) = self.age {
            target.age = Some(age);
        }
        if let Some(sex) = self.sex {
            target.sex = sex;
        }
    }
}

/// One page of patients plus the total number stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct PatientsPublic {
    pub patients: Vec<PatientPublic>,
    pub count: u64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn create_defaults_optional_fields_to_none() {
        let payload: PatientCreate =
            serde_json::from_value(json!({"name": "Jane Doe", "sex": "F", "age": 54})).unwrap();

        assert_eq!(payload.name, "Jane Doe");
        assert_eq!(payload.age, Some(54));
        assert_eq!(payload.chief_complaint, None);
        assert_eq!(payload.medical_history, None);
        assert_eq!(payload.nihss_score, None);
    }

    #[test]
    fn create_requires_name_and_sex() {
        let missing_name = serde_json::from_value::<PatientCreate>(json!({"sex": "F"}));
        assert!(missing_name.unwrap_err().to_string().contains("name"));

        let missing_sex = serde_json::from_value::<PatientCreate>(json!({"name": "Jane"}));
        assert!(missing_sex.unwrap_err().to_string().contains("sex"));

        let blank_name = serde_json::from_value::<PatientCreate>(json!({"name": " ", "sex": "F"}));
        assert!(blank_name.is_err());
    }

    #[test]
    fn create_rejects_cross_kind_values() {
        let age_as_string =
            serde_json::from_value::<PatientCreate>(json!({"name": "J", "sex": "F", "age": "54"}));
        assert!(age_as_string.is_err());

        let name_as_number =
            serde_json::from_value::<PatientCreate>(json!({"name": 7, "sex": "F"}));
        assert!(name_as_number.is_err());
    }

    #[test]
    fn create_ignores_client_supplied_id() {
        let payload: PatientCreate = serde_json::from_value(json!({
            "id": "550e8400-e29b-41d4-a716-446655440000",
            "name": "Jane",
            "sex": "F"
        }))
        .unwrap();
        let out = serde_json::to_value(&payload).unwrap();
        assert!(out.get("id").is_none());
    }

    #[test]
    fn public_serialises_flat_with_nulls() {
        let id = RecordId::new();
        let public = PatientPublic {
            id,
            fields: serde_json::from_value(json!({"name": "Jane Doe", "sex": "F", "age": 54}))
                .unwrap(),
        };

        let value = serde_json::to_value(&public).unwrap();
        assert_eq!(
            value,
            json!({
                "id": id.to_string(),
                "name": "Jane Doe",
                "age": 54,
                "sex": "F",
                "chief_complaint": null,
                "medical_history": null,
                "nihss_score": null
            })
        );
    }

    #[test]
    fn update_only_overwrites_present_fields() {
        let mut target: PatientCreate =
            serde_json::from_value(json!({"name": "Jane", "sex": "F", "age": 54, "nihss_score": 7}))
                .unwrap();
        let update: PatientUpdate = serde_json::from_value(json!({"age": 55})).unwrap();

        update.apply_to(&mut target);
        assert_eq!(target.name, "Jane");
        assert_eq!(target.age, Some(55));
        assert_eq!(target.nihss_score, Some(7));
    }

    #[test]
    fn openapi_schema_carries_uuid_format_and_examples() {
        let (name, schema) = <PatientPublic as utoipa::ToSchema>::schema();
        assert_eq!(name, "PatientPublic");
        let rendered = serde_json::to_string(&schema).unwrap();
        assert!(rendered.contains(r#""format":"uuid""#), "{rendered}");

        let (_, schema) = <PatientCreate as utoipa::ToSchema>::schema();
        let rendered = serde_json::to_string(&schema).unwrap();
        assert!(rendered.contains("Jane Doe"), "{rendered}");
    }
}
