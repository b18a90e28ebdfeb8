use crate::errors::PreviewError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Output format requested from the render service
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RenderFormat {
    /// Raw SVG markup, safe to inject directly
    #[default]
    Svg,

    /// Base64-encoded PNG bytes
    Png,

    /// Standalone HTML document, meant for sandboxed embedding
    Html,
}

impl RenderFormat {
    pub const ALL: [RenderFormat; 3] = [RenderFormat::Svg, RenderFormat::Png, RenderFormat::Html];

    pub fn as_str(self) -> &'static str {
        match self {
            RenderFormat::Svg => "svg",
            RenderFormat::Png => "png",
            RenderFormat::Html => "html",
        }
    }

    pub fn mime_type(self) -> &'static str {
        match self {
            RenderFormat::Svg => "image/svg+xml",
            RenderFormat::Png => "image/png",
            RenderFormat::Html => "text/html",
        }
    }

    /// File name used when the diagram is downloaded
    pub fn download_name(self) -> String {
        format!("wiring-diagram.{}", self.as_str())
    }
}

impl fmt::Display for RenderFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RenderFormat {
    type Err = PreviewError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "svg" => Ok(RenderFormat::Svg),
            "png" => Ok(RenderFormat::Png),
            "html" => Ok(RenderFormat::Html),
            other => Err(PreviewError::UnknownFormat(other.to_string())),
        }
    }
}
