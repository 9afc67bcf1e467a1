use serde::{Deserialize, Serialize};

pub const TOOL_GUIDE_ENDPOINT: &str = "/api/tool-guide";
pub const GENERATE_CODE_ENDPOINT: &str = "/api/generate-code";

/// Body of `GET /api/tool-guide`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolGuideResponse {
    pub content: String,
}

/// Body of `POST /api/generate-code`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerateCodeRequest {
    pub task_description: String,
}

/// Successful body of `POST /api/generate-code`. The `code` field is
/// permitted to be absent or empty; the controller degrades to a failure
/// placeholder in that case.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerateCodeResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
}

/// Flat error body the service attaches to non-2xx API responses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiErrorBody {
    pub error: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generate_request_serializes_snake_case_field() {
        let body = serde_json::to_value(GenerateCodeRequest {
            task_description: "清洗订单数据".to_string(),
        })
        .expect("serialize request");
        assert_eq!(body, serde_json::json!({"task_description": "清洗订单数据"}));
    }

    #[test]
    fn generate_response_tolerates_missing_code_field() {
        let parsed: GenerateCodeResponse =
            serde_json::from_str("{}").expect("parse empty object");
        assert_eq!(parsed.code, None);
    }

    #[test]
    fn generate_response_round_trips_code_field() {
        let parsed: GenerateCodeResponse =
            serde_json::from_str(r#"{"code": "print(1)"}"#).expect("parse response");
        assert_eq!(parsed.code.as_deref(), Some("print(1)"));
    }

    #[test]
    fn tool_guide_response_uses_content_field() {
        let body = serde_json::to_value(ToolGuideResponse {
            content: "GUIDE TEXT".to_string(),
        })
        .expect("serialize guide");
        assert_eq!(body, serde_json::json!({"content": "GUIDE TEXT"}));
    }
}
