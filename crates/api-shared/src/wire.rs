use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

/// Page size used by list endpoints and the CLI when the caller does not supply one.
pub const DEFAULT_PAGE_LIMIT: u32 = 100;

/// Body of every non-2xx JSON response: `{ "error": { "code", "message" } }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ErrorBody {
    pub error: ErrorDetail,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ErrorDetail {
    /// Stable machine-readable code, e.g. `NOT_FOUND`.
    pub code: String,
    pub message: String,
}

impl ErrorBody {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            error: ErrorDetail {
                code: code.into(),
                message: message.into(),
            },
        }
    }
}

/// `?skip=&limit=` query parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct PageParams {
    /// Number of records to skip.
    #[serde(default)]
    #[param(minimum = 0)]
    pub skip: u32,
    /// Maximum number of records to return. Values above 1000 are clamped.
    #[serde(default = "default_limit")]
    #[param(minimum = 1, default = default_limit)]
    pub limit: u32,
}

impl Default for PageParams {
    fn default() -> Self {
        Self {
            skip: 0,
            limit: DEFAULT_PAGE_LIMIT,
        }
    }
}

fn default_limit() -> u32 {
    DEFAULT_PAGE_LIMIT
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn page_params_default_when_absent() {
        let params: PageParams = serde_json::from_value(json!({})).unwrap();
        assert_eq!(params, PageParams::default());
        assert_eq!(params.limit, DEFAULT_PAGE_LIMIT);
    }

    #[test]
    fn page_params_reject_negative_values() {
        assert!(serde_json::from_value::<PageParams>(json!({"skip": -1})).is_err());
    }

    #[test]
    fn page_params_document_default_limit() {
        use utoipa::IntoParams;

        let params = PageParams::into_params(|| Some(utoipa::openapi::path::ParameterIn::Query));
        let rendered = serde_json::to_value(&params).unwrap();
        let limit = rendered
            .as_array()
            .unwrap()
            .iter()
            .find(|p| p["name"] == "limit")
            .expect("limit parameter");
        assert_eq!(limit["schema"]["default"], json!(DEFAULT_PAGE_LIMIT));
    }

    #[test]
    fn error_body_shape() {
        let body = ErrorBody::new("NOT_FOUND", "patient x not found");
        assert_eq!(
            serde_json::to_value(&body).unwrap(),
            json!({"error": {"code": "NOT_FOUND", "message": "patient x not found"}})
        );
    }
}
