//! # Wiredit Client
//!
//! HTTP implementations of the two remote collaborators of the editor:
//!
//! - [`HttpRenderService`] posts the document to `/api/generate-diagram` and
//!   plugs into the preview pipeline as a [`wiredit_preview::RenderService`].
//! - [`HttpAssistant`] posts an instruction and the current document to
//!   `/api/chat` and returns the assistant's narrative and proposed document.
//!
//! [`ChatTranscript`] keeps the conversation and turns assistant failures into
//! visible messages instead of document changes.

mod assistant;
mod chat;
mod error;
mod http;
mod render;
pub mod schema;

pub use assistant::{AssistantChannel, AssistantRequest, AssistantResponse, HttpAssistant};
pub use chat::{ChatMessage, ChatRole, ChatTranscript, ChatTurn, GREETING};
pub use error::{ClientError, ClientResult};
pub use http::ServerClient;
pub use render::HttpRenderService;
