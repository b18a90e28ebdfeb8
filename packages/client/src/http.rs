use serde::de::DeserializeOwned;
use serde::Serialize;
use std::time::Duration;

use crate::error::{ClientError, ClientResult};
use crate::schema::ErrorEnvelope;

/// JSON-over-HTTP access to one server, with a per-request timeout
#[derive(Debug, Clone)]
pub struct ServerClient {
    client: reqwest::Client,
    base_url: String,
    timeout: Duration,
}

impl ServerClient {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> ClientResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .connect_timeout(timeout.min(Duration::from_secs(10)))
            .build()
            .map_err(|e| ClientError::Transport(format!("failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            timeout,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    pub(crate) async fn post_json<B, R>(&self, path: &str, body: &B) -> ClientResult<R>
    where
        B: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        let url = format!("{}{}", self.base_url, path);
        tracing::debug!(%url, "POST");

        let response = self
            .client
            .post(&url)
            .json(body)
            .send()
            .await
            .map_err(|e| ClientError::from_reqwest(e, self.timeout))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| ClientError::from_reqwest(e, self.timeout))?;

        if !status.is_success() {
            tracing::debug!(status = status.as_u16(), "server returned an error");
            return Err(error_from_body(status.as_u16(), &text));
        }

        Ok(serde_json::from_str(&text)?)
    }
}

/// Error for a non-2xx answer, preferring the `detail` of the error envelope
pub(crate) fn error_from_body(status: u16, body: &str) -> ClientError {
    let detail = match serde_json::from_str::<ErrorEnvelope>(body) {
        Ok(envelope) => envelope.detail,
        Err(_) if body.trim().is_empty() => format!("Server returned HTTP {status}"),
        Err(_) => format!("Server returned HTTP {status}: {}", body.trim()),
    };

    ClientError::Service {
        status: Some(status),
        detail,
    }
}
