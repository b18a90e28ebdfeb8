//! # Reconciliation Guard
//!
//! Single authority over the document and its history.
//!
//! Candidate values arrive from three places: the user typing, the assistant
//! pushing a rewritten document, and files being loaded. The guard decides
//! for each one whether it becomes the document and whether it is recorded in
//! history.
//!
//! ## Replay state machine
//!
//! ```text
//!        undo / redo                cooldown elapses
//! Idle ─────────────▶ ReplayingHistory ─────────────▶ Idle
//! ```
//!
//! Undo and redo set the document without pushing the replayed value back
//! into history. Views that observe the change may echo it back through
//! `on_user_edit`; while replaying, an edit equal to the replayed value is
//! applied but not recorded. The cooldown only bounds how long the guard
//! stays in `ReplayingHistory`; the equality checks are what keep history
//! consistent.

use crate::document::Document;
use crate::errors::{EditorResult, HistoryStep};
use crate::file_io::{FileName, LoadedFile};
use crate::history::{DocumentHistory, DEFAULT_HISTORY_CAPACITY};
use crate::template::DEFAULT_TEMPLATE;
use std::time::{Duration, Instant};

/// Default time the guard stays in `ReplayingHistory` after undo/redo
pub const DEFAULT_REPLAY_COOLDOWN: Duration = Duration::from_millis(150);

/// Tunables for [`ReconciliationGuard`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GuardConfig {
    pub history_capacity: usize,
    pub replay_cooldown: Duration,
}

impl Default for GuardConfig {
    fn default() -> Self {
        Self {
            history_capacity: DEFAULT_HISTORY_CAPACITY,
            replay_cooldown: DEFAULT_REPLAY_COOLDOWN,
        }
    }
}

/// Replay state of the guard
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardState {
    Idle,

    /// An undo/redo just set the document to `value`
    ReplayingHistory { value: String, until: Instant },
}

/// Why a candidate value was not applied
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectReason {
    /// Empty or whitespace-only external push
    Blank,

    /// Identical to the current document
    Unchanged,

    /// Identical to the last external value already applied
    Duplicate,
}

/// Outcome of offering a value to the guard
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reconciliation {
    Accepted {
        /// The document text changed
        changed: bool,

        /// A new history entry was recorded
        recorded: bool,
    },
    Rejected(RejectReason),
}

impl Reconciliation {
    /// Whether the value became the document (and a render is due)
    pub fn is_accepted(&self) -> bool {
        matches!(self, Reconciliation::Accepted { .. })
    }

    pub fn changed(&self) -> bool {
        matches!(self, Reconciliation::Accepted { changed: true, .. })
    }

    pub fn recorded(&self) -> bool {
        matches!(self, Reconciliation::Accepted { recorded: true, .. })
    }
}

/// Owner of the authoritative document and its history
#[derive(Debug)]
pub struct ReconciliationGuard {
    document: Document,
    history: DocumentHistory,
    state: GuardState,

    /// Last external push that was applied
    last_external: Option<String>,

    config: GuardConfig,
}

impl ReconciliationGuard {
    /// Start from the built-in template
    pub fn new(config: GuardConfig) -> Self {
        Self::with_document(Document::from_template(), config)
    }

    /// Start from an existing document
    pub fn with_document(document: Document, config: GuardConfig) -> Self {
        let history = DocumentHistory::with_capacity(document.text(), config.history_capacity);
        Self {
            document,
            history,
            state: GuardState::Idle,
            last_external: None,
            config,
        }
    }

    /// The user edited the document directly
    pub fn on_user_edit(&mut self, text: impl Into<String>) -> Reconciliation {
        self.poll_cooldown(Instant::now());
        let outcome = self.accept(text.into());
        tracing::debug!(?outcome, "user edit");
        outcome
    }

    /// The assistant proposed a new document
    pub fn on_external_push(&mut self, text: impl Into<String>) -> Reconciliation {
        self.poll_cooldown(Instant::now());
        let text = text.into();

        let outcome = if text.trim().is_empty() {
            Reconciliation::Rejected(RejectReason::Blank)
        } else if text == self.document.text() {
            Reconciliation::Rejected(RejectReason::Unchanged)
        } else if self.last_external.as_deref() == Some(text.as_str()) {
            Reconciliation::Rejected(RejectReason::Duplicate)
        } else {
            self.last_external = Some(text.clone());
            self.accept(text)
        };

        tracing::debug!(?outcome, "external push");
        outcome
    }

    /// A file was loaded; replaces the document and starts a fresh history
    pub fn on_file_load(&mut self, file: LoadedFile) -> Reconciliation {
        let changed = self.document.text() != file.text;
        self.history.reset(file.text.as_str());
        self.document = Document::loaded(file.text, file.file_name);
        self.state = GuardState::Idle;

        tracing::info!(file = ?self.document.file_name(), "file loaded, history reset");
        Reconciliation::Accepted {
            changed,
            recorded: false,
        }
    }

    /// Replace the document with the template and forget its file name
    pub fn new_document(&mut self) -> Reconciliation {
        let changed = self.document.text() != DEFAULT_TEMPLATE;
        self.document = Document::from_template();
        self.history.reset(DEFAULT_TEMPLATE);
        self.state = GuardState::Idle;

        tracing::info!("new document, history reset");
        Reconciliation::Accepted {
            changed,
            recorded: false,
        }
    }

    pub fn undo(&mut self) -> EditorResult<&str> {
        self.replay(HistoryStep::Undo, Instant::now())
    }

    pub fn redo(&mut self) -> EditorResult<&str> {
        self.replay(HistoryStep::Redo, Instant::now())
    }

    fn replay(&mut self, step: HistoryStep, now: Instant) -> EditorResult<&str> {
        let value = self.history.step(step)?.to_string();
        self.document.set_text(value.as_str());
        self.state = GuardState::ReplayingHistory {
            value,
            until: now + self.config.replay_cooldown,
        };

        tracing::debug!(%step, cursor = self.history.cursor(), "history replay");
        Ok(self.document.text())
    }

    /// Return to `Idle` once the replay cooldown has elapsed
    pub fn poll_cooldown(&mut self, now: Instant) {
        if let GuardState::ReplayingHistory { until, .. } = &self.state {
            if now >= *until {
                self.state = GuardState::Idle;
            }
        }
    }

    /// Record the document as saved under `file_name`
    pub fn mark_saved(&mut self, file_name: FileName) {
        self.document.rename(file_name);
        self.document.mark_saved();
    }

    pub fn rename(&mut self, file_name: FileName) {
        self.document.rename(file_name);
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn text(&self) -> &str {
        self.document.text()
    }

    pub fn history(&self) -> &DocumentHistory {
        &self.history
    }

    pub fn state(&self) -> &GuardState {
        &self.state
    }

    pub fn is_replaying(&self) -> bool {
        matches!(self.state, GuardState::ReplayingHistory { .. })
    }

    pub fn last_external(&self) -> Option<&str> {
        self.last_external.as_deref()
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    fn accept(&mut self, text: String) -> Reconciliation {
        let echo = matches!(
            &self.state,
            GuardState::ReplayingHistory { value, .. } if *value == text
        );

        let changed = self.document.set_text(text.as_str());
        let recorded = !echo && self.history.push(text);

        Reconciliation::Accepted { changed, recorded }
    }
}

impl Default for ReconciliationGuard {
    fn default() -> Self {
        Self::new(GuardConfig::default())
    }
}
