use async_trait::async_trait;
use std::time::Duration;
use wiredit_preview::{PreviewResult, RenderRequest, RenderResponse, RenderService};

use crate::error::ClientResult;
use crate::http::ServerClient;
use crate::schema::{GenerateDiagramRequest, GenerateDiagramResponse, GENERATE_DIAGRAM_PATH};

/// [`RenderService`] backed by the server's diagram endpoint
#[derive(Debug, Clone)]
pub struct HttpRenderService {
    server: ServerClient,
}

impl HttpRenderService {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> ClientResult<Self> {
        Ok(Self {
            server: ServerClient::new(base_url, timeout)?,
        })
    }

    pub fn from_client(server: ServerClient) -> Self {
        Self { server }
    }

    async fn generate(&self, request: &RenderRequest) -> ClientResult<RenderResponse> {
        let body = GenerateDiagramRequest {
            yaml_content: &request.document,
            format: request.format,
        };
        let response: GenerateDiagramResponse =
            self.server.post_json(GENERATE_DIAGRAM_PATH, &body).await?;
        response.into_render_response()
    }
}

#[async_trait]
impl RenderService for HttpRenderService {
    async fn render(&self, request: &RenderRequest) -> PreviewResult<RenderResponse> {
        tracing::debug!(token = request.token, format = %request.format, "rendering over HTTP");
        Ok(self.generate(request).await?)
    }
}
