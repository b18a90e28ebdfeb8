//! JSON bodies exchanged with the diagram server

use serde::{Deserialize, Serialize};
use wiredit_preview::{RenderFormat, RenderResponse};

use crate::error::{ClientError, ClientResult};

pub const GENERATE_DIAGRAM_PATH: &str = "/api/generate-diagram";
pub const CHAT_PATH: &str = "/api/chat";

#[derive(Debug, Serialize)]
pub struct GenerateDiagramRequest<'a> {
    pub yaml_content: &'a str,
    pub format: RenderFormat,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct GenerateDiagramResponse {
    pub success: bool,
    #[serde(default)]
    pub diagram_data: Option<String>,
    #[serde(default)]
    pub bom_data: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub format: Option<RenderFormat>,
}

impl GenerateDiagramResponse {
    /// A result with `success: false` becomes a service error carrying its message
    pub fn into_render_response(self) -> ClientResult<RenderResponse> {
        if !self.success {
            let detail = self
                .error
                .filter(|e| !e.trim().is_empty())
                .unwrap_or_else(|| "Failed to generate diagram".to_string());
            return Err(ClientError::service(detail));
        }

        Ok(RenderResponse {
            diagram_artifact: self.diagram_data,
            parts_list: self.bom_data,
        })
    }
}

#[derive(Debug, Serialize)]
pub struct ChatRequest<'a> {
    pub content: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_yaml: Option<&'a str>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ChatEnvelope {
    pub response: ChatReply,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ChatReply {
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub yaml_generated: Option<String>,
    #[serde(default)]
    pub suggestions: Option<Vec<String>>,
}

/// Body of a non-2xx answer
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ErrorEnvelope {
    pub detail: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_request_body() {
        let body = GenerateDiagramRequest {
            yaml_content: "connectors: {}",
            format: RenderFormat::Png,
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "yaml_content": "connectors: {}", "format": "png" })
        );
    }

    #[test]
    fn test_successful_render_response() {
        let response: GenerateDiagramResponse = serde_json::from_str(
            r#"{"success": true, "diagram_data": "<svg/>", "bom_data": "Id\tQty\n1\t1", "error": null, "format": "svg"}"#,
        )
        .unwrap();
        assert_eq!(response.format, Some(RenderFormat::Svg));

        let render = response.into_render_response().unwrap();
        assert_eq!(render.diagram_artifact.as_deref(), Some("<svg/>"));
        assert!(render.parts_list.is_some());
    }

    #[test]
    fn test_failed_render_response_carries_error() {
        let response: GenerateDiagramResponse = serde_json::from_str(
            r#"{"success": false, "error": "Unknown connector X9", "format": "svg"}"#,
        )
        .unwrap();
        let err = response.into_render_response().unwrap_err();
        assert_eq!(err.to_string(), "Unknown connector X9");
    }

    #[test]
    fn test_failed_render_response_without_message() {
        let response: GenerateDiagramResponse =
            serde_json::from_str(r#"{"success": false}"#).unwrap();
        let err = response.into_render_response().unwrap_err();
        assert_eq!(err.to_string(), "Failed to generate diagram");
    }

    #[test]
    fn test_chat_request_omits_missing_document() {
        let body = ChatRequest {
            content: "add a ground wire",
            current_yaml: None,
        };
        assert_eq!(
            serde_json::to_string(&body).unwrap(),
            r#"{"content":"add a ground wire"}"#
        );
    }

    #[test]
    fn test_chat_reply_tolerates_nulls() {
        let envelope: ChatEnvelope = serde_json::from_str(
            r#"{"response": {"content": "Done.", "yaml_generated": null, "suggestions": null}}"#,
        )
        .unwrap();
        assert_eq!(envelope.response.content, "Done.");
        assert!(envelope.response.yaml_generated.is_none());
        assert!(envelope.response.suggestions.is_none());
    }
}
