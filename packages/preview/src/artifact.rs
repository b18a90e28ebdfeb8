//! # Diagram Artifacts
//!
//! Decoding of the raw artifact string returned by the render service.
//!
//! | Format | Wire payload            | Decoded as                     |
//! |--------|-------------------------|--------------------------------|
//! | svg    | SVG markup              | markup, shown inline           |
//! | png    | base64 of the PNG bytes | raw bytes                      |
//! | html   | full HTML document      | document, embedded sandboxed   |

use crate::errors::{PreviewError, PreviewResult};
use crate::format::RenderFormat;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use wiredit_common::Download;

const PNG_SIGNATURE: &[u8] = b"\x89PNG\r\n\x1a\n";

/// A decoded diagram
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DiagramArtifact {
    Svg(String),
    Png(Vec<u8>),
    Html(String),
}

impl DiagramArtifact {
    /// Decode a raw service payload for `format`
    pub fn decode(format: RenderFormat, raw: String) -> PreviewResult<Self> {
        match format {
            RenderFormat::Svg => Ok(DiagramArtifact::Svg(raw)),
            RenderFormat::Html => Ok(DiagramArtifact::Html(raw)),
            RenderFormat::Png => {
                let compact: String = raw.split_ascii_whitespace().collect();
                let bytes = STANDARD.decode(compact).map_err(|e| PreviewError::Decode {
                    format: format.to_string(),
                    reason: e.to_string(),
                })?;
                if !bytes.starts_with(PNG_SIGNATURE) {
                    tracing::warn!(len = bytes.len(), "decoded PNG lacks the PNG signature");
                }
                Ok(DiagramArtifact::Png(bytes))
            }
        }
    }

    pub fn format(&self) -> RenderFormat {
        match self {
            DiagramArtifact::Svg(_) => RenderFormat::Svg,
            DiagramArtifact::Png(_) => RenderFormat::Png,
            DiagramArtifact::Html(_) => RenderFormat::Html,
        }
    }

    pub fn as_bytes(&self) -> &[u8] {
        match self {
            DiagramArtifact::Svg(markup) => markup.as_bytes(),
            DiagramArtifact::Png(bytes) => bytes,
            DiagramArtifact::Html(document) => document.as_bytes(),
        }
    }

    /// Encode as a download named after the format
    pub fn download(&self) -> Download {
        let format = self.format();
        Download::new(format.download_name(), format.mime_type(), self.as_bytes())
    }
}
