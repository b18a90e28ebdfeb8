//! # wiredit Editor
//!
//! Document state engine for the wiring editor.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────┐ ┌──────────────┐ ┌──────────────┐
//! │  user edits  │ │ assistant    │ │  file load   │
//! └──────┬───────┘ └──────┬───────┘ └──────┬───────┘
//!        └────────────────┼────────────────┘
//!                         ↓
//! ┌─────────────────────────────────────────────┐
//! │ ReconciliationGuard                         │
//! │  - decides which value becomes the document │
//! │  - records accepted edits in history        │
//! │  - suppresses undo/redo echo                │
//! └─────────────────────────────────────────────┘
//!                         ↓
//! ┌─────────────────────────────────────────────┐
//! │ DocumentHistory: bounded undo/redo log      │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! ## Core Principles
//!
//! 1. **One authoritative document**: every view reads from the guard
//! 2. **History is local**: no remote failure can roll it back
//! 3. **Equality, not timing**: duplicate and echo suppression are value
//!    comparisons; the replay cooldown only bounds the replay state
//!
//! ## Usage
//!
//! ```rust
//! use wiredit_editor::{GuardConfig, ReconciliationGuard};
//!
//! let mut guard = ReconciliationGuard::new(GuardConfig::default());
//! guard.on_user_edit("connectors: {}");
//! guard.on_external_push("connectors: {X1: {}}");
//! assert_eq!(guard.undo().unwrap(), "connectors: {}");
//! ```

mod document;
mod errors;
mod file_io;
mod history;
mod reconcile;
mod template;

pub use document::Document;
pub use errors::{EditorError, EditorResult, HistoryStep};
pub use file_io::{
    copy_document, document_download, Clipboard, DocumentIO, FileName, LoadedFile,
    DEFAULT_FILE_NAME, DOCUMENT_MIME_TYPE,
};
pub use history::{DocumentHistory, DEFAULT_HISTORY_CAPACITY};
pub use reconcile::{
    GuardConfig, GuardState, Reconciliation, ReconciliationGuard, RejectReason,
    DEFAULT_REPLAY_COOLDOWN,
};
pub use template::DEFAULT_TEMPLATE;

// Re-export common types for convenience
pub use wiredit_common::{Download, ErrorKind};
