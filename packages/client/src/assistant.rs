//! Assistant boundary: natural-language instruction in, narrative and an
//! optional replacement document out.

use async_trait::async_trait;
use std::time::Duration;

use crate::error::{ClientError, ClientResult};
use crate::http::ServerClient;
use crate::schema::{ChatEnvelope, ChatRequest, CHAT_PATH};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssistantRequest {
    pub instruction: String,
    pub current_document: Option<String>,
}

impl AssistantRequest {
    /// Blank instructions are rejected before anything is sent
    pub fn new(
        instruction: impl Into<String>,
        current_document: Option<String>,
    ) -> ClientResult<Self> {
        let instruction = instruction.into();
        if instruction.trim().is_empty() {
            return Err(ClientError::Validation(
                "Type an instruction for the assistant first".to_string(),
            ));
        }

        Ok(Self {
            instruction,
            current_document,
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AssistantResponse {
    pub narrative: String,
    pub proposed_document: Option<String>,
    pub suggestions: Vec<String>,
}

impl AssistantResponse {
    /// The proposed document, unless it is missing or blank
    pub fn document(&self) -> Option<&str> {
        self.proposed_document
            .as_deref()
            .filter(|doc| !doc.trim().is_empty())
    }
}

#[async_trait]
pub trait AssistantChannel: Send + Sync {
    async fn ask(&self, request: &AssistantRequest) -> ClientResult<AssistantResponse>;
}

/// [`AssistantChannel`] backed by the server's chat endpoint
#[derive(Debug, Clone)]
pub struct HttpAssistant {
    server: ServerClient,
}

impl HttpAssistant {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> ClientResult<Self> {
        Ok(Self {
            server: ServerClient::new(base_url, timeout)?,
        })
    }

    pub fn from_client(server: ServerClient) -> Self {
        Self { server }
    }
}

#[async_trait]
impl AssistantChannel for HttpAssistant {
    async fn ask(&self, request: &AssistantRequest) -> ClientResult<AssistantResponse> {
        let body = ChatRequest {
            content: &request.instruction,
            current_yaml: request.current_document.as_deref(),
        };
        let envelope: ChatEnvelope = self.server.post_json(CHAT_PATH, &body).await?;
        let reply = envelope.response;

        tracing::debug!(
            has_document = reply.yaml_generated.is_some(),
            "assistant replied"
        );
        Ok(AssistantResponse {
            narrative: reply.content,
            proposed_document: reply.yaml_generated,
            suggestions: reply.suggestions.unwrap_or_default(),
        })
    }
}
