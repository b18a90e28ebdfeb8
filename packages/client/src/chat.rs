//! # Chat Transcript
//!
//! Conversation with the assistant as shown to the user. Every exchange
//! appends the user's instruction and exactly one assistant message, even when
//! the request fails, so the transcript always explains what happened.
//!
//! A failed exchange never yields a proposed document. Only a successful reply
//! with a non-blank document is handed back for reconciliation.

use chrono::{DateTime, Utc};

use crate::assistant::{AssistantChannel, AssistantRequest, AssistantResponse};
use crate::error::{ClientError, ClientResult};

pub const GREETING: &str = "Hello! I'm your wiring assistant. I can help you create and modify \
WireViz diagrams using natural language. Just describe what you need!";

const TRANSPORT_FAILURE: &str =
    "Error connecting to server. Please check if the backend is running.";
const EMPTY_REPLY: &str = "Sorry, I encountered an error.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChatRole {
    User,
    Assistant,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatMessage {
    pub id: u64,
    pub content: String,
    pub role: ChatRole,
    pub timestamp: DateTime<Utc>,
}

impl ChatMessage {
    pub fn is_user(&self) -> bool {
        self.role == ChatRole::User
    }
}

/// What one exchange produced besides transcript messages
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChatTurn {
    /// Non-blank document proposed by the assistant
    pub proposed_document: Option<String>,
    pub suggestions: Vec<String>,

    /// Failure that was reported in the transcript
    pub error: Option<ClientError>,
}

#[derive(Debug, Clone)]
pub struct ChatTranscript {
    messages: Vec<ChatMessage>,
    next_id: u64,
}

impl ChatTranscript {
    pub fn new() -> Self {
        let mut transcript = Self {
            messages: Vec::new(),
            next_id: 1,
        };
        transcript.push(ChatRole::Assistant, GREETING);
        transcript
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn last(&self) -> Option<&ChatMessage> {
        self.messages.last()
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    fn push(&mut self, role: ChatRole, content: impl Into<String>) -> &ChatMessage {
        let id = self.next_id;
        self.next_id += 1;
        self.messages.push(ChatMessage {
            id,
            content: content.into(),
            role,
            timestamp: Utc::now(),
        });
        &self.messages[self.messages.len() - 1]
    }

    /// Send `instruction` with the current document as context.
    ///
    /// A blank instruction is returned as a validation error and leaves the
    /// transcript untouched. Any other failure is recorded as an assistant
    /// message and returned inside the [`ChatTurn`].
    pub async fn send(
        &mut self,
        channel: &dyn AssistantChannel,
        instruction: &str,
        current_document: Option<&str>,
    ) -> ClientResult<ChatTurn> {
        let request = self.begin(instruction, current_document)?;
        let reply = channel.ask(&request).await;
        Ok(self.complete(reply))
    }

    /// First half of [`send`](Self::send): validate the instruction, record
    /// it, and build the request. The caller performs the request and hands
    /// the reply to [`complete`](Self::complete), which lets the editor stay
    /// live while the assistant works.
    pub fn begin(
        &mut self,
        instruction: &str,
        current_document: Option<&str>,
    ) -> ClientResult<AssistantRequest> {
        let request =
            AssistantRequest::new(instruction, current_document.map(ToString::to_string))?;
        self.push(ChatRole::User, instruction);
        Ok(request)
    }

    /// Record the assistant's answer to the oldest outstanding instruction
    pub fn complete(&mut self, reply: ClientResult<AssistantResponse>) -> ChatTurn {
        match reply {
            Ok(response) => {
                let narrative = if response.narrative.trim().is_empty() {
                    EMPTY_REPLY.to_string()
                } else {
                    response.narrative.clone()
                };
                self.push(ChatRole::Assistant, narrative);

                ChatTurn {
                    proposed_document: response.document().map(ToString::to_string),
                    suggestions: response.suggestions,
                    error: None,
                }
            }
            Err(err) => {
                tracing::warn!(error = %err, "assistant request failed");
                let content = match err.kind() {
                    wiredit_common::ErrorKind::Transport => TRANSPORT_FAILURE.to_string(),
                    _ => format!("{EMPTY_REPLY} {err}"),
                };
                self.push(ChatRole::Assistant, content);

                ChatTurn {
                    error: Some(err),
                    ..ChatTurn::default()
                }
            }
        }
    }
}

impl Default for ChatTranscript {
    fn default() -> Self {
        Self::new()
    }
}
