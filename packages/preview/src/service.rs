//! Render service boundary and the results published to the preview.

use crate::artifact::DiagramArtifact;
use crate::errors::{PreviewError, PreviewResult};
use crate::format::RenderFormat;
use crate::parts::PartsList;
use async_trait::async_trait;
use wiredit_common::ErrorKind;

/// One call to the render service
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderRequest {
    /// Staleness token; higher means newer
    pub token: u64,
    pub document: String,
    pub format: RenderFormat,
}

/// Raw answer of a successful render call
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenderResponse {
    pub diagram_artifact: Option<String>,

    /// Tab-separated parts list
    pub parts_list: Option<String>,
}

/// Remote diagram renderer.
///
/// Implementations report transport problems as [`PreviewError::Transport`]
/// and failures reported by the service itself as [`PreviewError::Service`].
#[async_trait]
pub trait RenderService: Send + Sync + 'static {
    async fn render(&self, request: &RenderRequest) -> PreviewResult<RenderResponse>;
}

/// Successfully decoded render
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedDiagram {
    pub artifact: DiagramArtifact,
    pub parts_list: Option<String>,
}

impl RenderedDiagram {
    /// Parsed parts list, if it holds at least one row
    pub fn parts(&self) -> Option<PartsList> {
        self.parts_list.as_deref().and_then(PartsList::parse)
    }
}

/// Outcome of a render request, as published to the preview
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderResult {
    pub token: u64,
    pub format: RenderFormat,
    pub outcome: Result<RenderedDiagram, PreviewError>,
}

impl RenderResult {
    /// Decode a service answer for the request identified by `token`
    pub fn from_response(
        token: u64,
        format: RenderFormat,
        response: PreviewResult<RenderResponse>,
    ) -> Self {
        let outcome = response.and_then(|response| {
            let raw = response.diagram_artifact.ok_or_else(|| {
                PreviewError::Service("Render service returned no diagram".to_string())
            })?;
            Ok(RenderedDiagram {
                artifact: DiagramArtifact::decode(format, raw)?,
                parts_list: response.parts_list,
            })
        });

        Self {
            token,
            format,
            outcome,
        }
    }

    pub fn is_success(&self) -> bool {
        self.outcome.is_ok()
    }

    pub fn diagram(&self) -> Option<&RenderedDiagram> {
        self.outcome.as_ref().ok()
    }

    pub fn error(&self) -> Option<&PreviewError> {
        self.outcome.as_ref().err()
    }

    pub fn error_kind(&self) -> Option<ErrorKind> {
        self.error().map(PreviewError::kind)
    }
}
