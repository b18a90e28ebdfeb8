//! # Wiredit Preview
//!
//! Debounced, staleness-safe rendering of the edited document.
//!
//! The editor tells the [`RenderPipeline`] whenever the document or output
//! format changes. The pipeline waits for the user to pause, sends the text
//! to a [`RenderService`], and publishes the result only if no newer request
//! has been issued in the meantime.
//!
//! ```no_run
//! use std::sync::Arc;
//! use wiredit_preview::{PipelineConfig, RenderFormat, RenderPipeline, RenderService};
//!
//! async fn preview(service: Arc<dyn RenderService>) {
//!     let pipeline = RenderPipeline::spawn(service, RenderFormat::Svg, PipelineConfig::default());
//!     let mut results = pipeline.subscribe();
//!
//!     pipeline.notify_document_changed("connectors: {}", RenderFormat::Svg);
//!     results.changed().await.unwrap();
//!     let latest = results.borrow().clone();
//!     if let Some(result) = latest {
//!         println!("token {} success={}", result.token, result.is_success());
//!     }
//! }
//! ```

mod artifact;
mod errors;
mod format;
mod parts;
mod pipeline;
mod service;

pub use artifact::DiagramArtifact;
pub use errors::{PreviewError, PreviewResult};
pub use format::RenderFormat;
pub use parts::{parts_list_download, PartsList, PARTS_LIST_FILE_NAME, PARTS_LIST_MIME_TYPE};
pub use pipeline::{PipelineConfig, RenderPipeline, DEFAULT_DEBOUNCE, DEFAULT_RENDER_TIMEOUT};
pub use service::{RenderRequest, RenderResponse, RenderResult, RenderService, RenderedDiagram};
