//! # Editing Session
//!
//! Glue between the terminal, the reconciliation guard, the render pipeline
//! and the assistant. The session is the only writer of the document: every
//! change goes through the guard, and every accepted change is forwarded to
//! the pipeline.
//!
//! ```text
//!   stdin line ──► ReplCommand ──► ReconciliationGuard ──► RenderPipeline
//!                      │                    ▲
//!                      └── :ask ──► Assistant ┘ (on_external_push)
//! ```
//!
//! Assistant requests run on their own task. Their replies come back through
//! [`EditSession::next_reply`] and are applied with [`EditSession::receive`],
//! so the user can keep editing while a request is outstanding. A reply that
//! matches what the user has typed in the meantime is rejected by the guard.

use crate::config::Config;
use crate::display::{numbered_lines, print_parts, render_summary};
use crate::output::{DownloadDir, StdoutClipboard};
use crate::repl::{self, ReplCommand, ReplError, HELP, PASTE_TERMINATOR};
use colored::Colorize;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::mpsc;
use wiredit_client::{
    AssistantChannel, AssistantResponse, ChatTranscript, ClientError, ClientResult,
};
use wiredit_common::{CommonError, ErrorKind, RealFileSystem};
use wiredit_editor::{
    copy_document, document_download, DocumentIO, EditorError, FileName, Reconciliation,
    ReconciliationGuard,
};
use wiredit_preview::{parts_list_download, RenderFormat, RenderPipeline, RenderService};

#[derive(Error, Debug)]
pub enum SessionError {
    #[error(transparent)]
    Editor(#[from] EditorError),

    #[error(transparent)]
    Assistant(#[from] ClientError),

    #[error(transparent)]
    Command(#[from] ReplError),

    #[error(transparent)]
    Io(#[from] CommonError),

    #[error("{0}")]
    Unavailable(&'static str),
}

impl SessionError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            SessionError::Editor(e) => e.kind(),
            SessionError::Assistant(e) => e.kind(),
            SessionError::Command(_) | SessionError::Unavailable(_) => ErrorKind::Validation,
            SessionError::Io(e) => e.kind(),
        }
    }
}

pub type SessionResult<T> = Result<T, SessionError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

pub struct EditSession {
    guard: ReconciliationGuard,
    io: DocumentIO<RealFileSystem>,
    pipeline: RenderPipeline,
    assistant: Arc<dyn AssistantChannel>,
    transcript: ChatTranscript,
    format: RenderFormat,
    workdir: PathBuf,
    downloads: DownloadDir,

    /// Directory `:save` writes into; the opened file's directory, if any
    save_dir: PathBuf,

    reply_tx: mpsc::UnboundedSender<ClientResult<AssistantResponse>>,
    replies: mpsc::UnboundedReceiver<ClientResult<AssistantResponse>>,
    pending_asks: usize,

    /// Lines collected by `:paste`
    paste: Option<Vec<String>>,
}

impl EditSession {
    /// Start on the template and schedule the first render.
    /// Must be called inside a tokio runtime.
    pub fn new(
        config: &Config,
        workdir: &Path,
        service: Arc<dyn RenderService>,
        assistant: Arc<dyn AssistantChannel>,
    ) -> Self {
        let format = config.default_format;
        let (reply_tx, replies) = mpsc::unbounded_channel();
        let session = Self {
            guard: ReconciliationGuard::new(config.guard_config()),
            io: DocumentIO::new(RealFileSystem),
            pipeline: RenderPipeline::spawn(service, format, config.pipeline_config()),
            assistant,
            transcript: ChatTranscript::new(),
            format,
            workdir: workdir.to_path_buf(),
            downloads: DownloadDir::new(config.get_preview_dir(workdir)),
            save_dir: workdir.to_path_buf(),
            reply_tx,
            replies,
            pending_asks: 0,
            paste: None,
        };
        session.schedule_render();
        session
    }

    #[cfg(test)]
    pub fn guard(&self) -> &ReconciliationGuard {
        &self.guard
    }

    #[cfg(test)]
    pub fn transcript(&self) -> &ChatTranscript {
        &self.transcript
    }

    pub fn pipeline(&self) -> &RenderPipeline {
        &self.pipeline
    }

    pub fn downloads(&self) -> &DownloadDir {
        &self.downloads
    }

    pub fn is_pasting(&self) -> bool {
        self.paste.is_some()
    }

    pub fn pending_asks(&self) -> usize {
        self.pending_asks
    }

    /// Wait for the next assistant reply
    pub async fn next_reply(&mut self) -> Option<ClientResult<AssistantResponse>> {
        self.replies.recv().await
    }

    /// Handle one input line, reporting any failure on the terminal
    pub fn handle_line(&mut self, line: &str) -> Flow {
        if let Some(buffer) = self.paste.as_mut() {
            if line.trim_end() != PASTE_TERMINATOR {
                buffer.push(line.trim_end_matches(['\r', '\n']).to_string());
                return Flow::Continue;
            }
            let lines = self.paste.take().unwrap_or_default();
            self.finish_paste(lines);
            return Flow::Continue;
        }

        if line.trim().is_empty() {
            return Flow::Continue;
        }

        let result = match repl::parse(line) {
            Ok(command) => self.execute(command),
            Err(err) => Err(err.into()),
        };

        match result {
            Ok(flow) => flow,
            Err(err) => {
                report(&err);
                Flow::Continue
            }
        }
    }

    pub fn execute(&mut self, command: ReplCommand) -> SessionResult<Flow> {
        match command {
            ReplCommand::Help => println!("{HELP}"),
            ReplCommand::Show => println!("{}", numbered_lines(self.guard.text())),
            ReplCommand::Status => self.print_status(),
            ReplCommand::Open(path) => self.open(&path)?,
            ReplCommand::Save => {
                let (name, path) = self.io.save(self.guard.document(), &self.save_dir)?;
                self.guard.mark_saved(name);
                println!("{} Saved {}", "✓".green(), path.display());
            }
            ReplCommand::Rename(input) => match FileName::normalize(&input) {
                Some(name) => {
                    println!("File name set to {}", name.as_str().bright_white());
                    self.guard.rename(name);
                }
                None => println!("File name unchanged: {}", self.display_name()),
            },
            ReplCommand::New => {
                let outcome = self.guard.new_document();
                self.save_dir = self.workdir.clone();
                self.after(outcome);
                println!("Started a new diagram from the template");
            }
            ReplCommand::Undo => {
                self.guard.undo()?;
                self.schedule_render();
            }
            ReplCommand::Redo => {
                self.guard.redo()?;
                self.schedule_render();
            }
            ReplCommand::Format(format) => {
                self.format = format;
                self.pipeline.set_format(format);
                println!("Preview format: {format}");
            }
            ReplCommand::Refresh => self.pipeline.refresh_now(),
            ReplCommand::Ask(instruction) => self.ask(&instruction)?,
            ReplCommand::Copy => copy_document(self.guard.document(), &mut StdoutClipboard)?,
            ReplCommand::Bom => {
                let result = self
                    .pipeline
                    .latest_result()
                    .ok_or(SessionError::Unavailable("No diagram has been rendered yet"))?;
                let diagram = result
                    .diagram()
                    .ok_or(SessionError::Unavailable("The last render failed"))?;
                print_parts(diagram.parts().as_ref());
            }
            ReplCommand::Export => self.export()?,
            ReplCommand::Edit(edit) => {
                let text = edit.apply(self.guard.text())?;
                let outcome = self.guard.on_user_edit(text);
                self.after(outcome);
            }
            ReplCommand::Paste => {
                self.paste = Some(Vec::new());
                println!("Paste the document, then a line with a single '{PASTE_TERMINATOR}'");
            }
            ReplCommand::Quit => {
                if self.guard.document().is_dirty() {
                    println!("{}", "Unsaved changes discarded".yellow());
                }
                return Ok(Flow::Quit);
            }
        }

        Ok(Flow::Continue)
    }

    /// Load a file; relative paths resolve against the working directory
    pub fn open(&mut self, path: &Path) -> SessionResult<()> {
        let path = if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.workdir.join(path)
        };

        let loaded = self.io.load(&path)?;
        if let Some(dir) = loaded.path.parent() {
            self.save_dir = dir.to_path_buf();
        }
        let outcome = self.guard.on_file_load(loaded);
        self.after(outcome);
        println!(
            "{} Loaded {} ({} lines)",
            "✓".green(),
            self.display_name(),
            self.guard.document().line_count()
        );
        Ok(())
    }

    /// Send the instruction with the current document and return at once
    fn ask(&mut self, instruction: &str) -> SessionResult<()> {
        let current = Some(self.guard.text()).filter(|text| !text.trim().is_empty());
        let request = self.transcript.begin(instruction, current)?;

        let assistant = Arc::clone(&self.assistant);
        let replies = self.reply_tx.clone();
        tokio::spawn(async move {
            let reply = assistant.ask(&request).await;
            // the session may already be gone
            let _ = replies.send(reply);
        });
        self.pending_asks += 1;

        println!("{}", "Asking the assistant, keep editing meanwhile...".dimmed());
        Ok(())
    }

    /// Apply an assistant reply to the transcript and, through the guard, to
    /// the document
    pub fn receive(&mut self, reply: ClientResult<AssistantResponse>) {
        self.pending_asks = self.pending_asks.saturating_sub(1);
        let turn = self.transcript.complete(reply);

        if let Some(message) = self.transcript.last() {
            println!("{} {}", "assistant:".cyan().bold(), message.content);
        }
        for suggestion in &turn.suggestions {
            println!("  {} {}", "•".dimmed(), suggestion);
        }

        if let Some(document) = turn.proposed_document {
            let outcome = self.guard.on_external_push(document);
            if outcome.is_accepted() {
                println!("{} Assistant updated the document", "✓".green());
            }
            self.after(outcome);
        }
    }

    fn finish_paste(&mut self, lines: Vec<String>) {
        let mut text = lines.join("\n");
        if !text.is_empty() {
            text.push('\n');
        }
        let outcome = self.guard.on_user_edit(text);
        self.after(outcome);
        println!("Document replaced ({} lines)", lines.len());
    }

    fn export(&self) -> SessionResult<()> {
        let mut written = vec![self.downloads.write(&document_download(self.guard.document()))?];

        if let Some(diagram) = self.pipeline.latest_result().as_ref().and_then(|r| r.diagram()) {
            written.push(self.downloads.write(&diagram.artifact.download())?);
            if let (Some(tsv), Some(_)) = (diagram.parts_list.as_deref(), diagram.parts()) {
                written.push(self.downloads.write(&parts_list_download(tsv))?);
            }
        }

        for path in written {
            println!("  {} {}", "✓".green(), path.display());
        }
        Ok(())
    }

    /// Forward an accepted change to the pipeline
    fn after(&self, outcome: Reconciliation) {
        if outcome.is_accepted() {
            self.schedule_render();
        } else {
            tracing::debug!(?outcome, "change not applied");
        }
    }

    fn schedule_render(&self) {
        self.pipeline
            .notify_document_changed(self.guard.text(), self.format);
    }

    fn display_name(&self) -> String {
        match self.guard.document().file_name() {
            Some(name) => name.to_string(),
            None => format!("{} (unsaved)", FileName::default_name()),
        }
    }

    fn print_status(&self) {
        let document = self.guard.document();
        let history = self.guard.history();
        let dirty = if document.is_dirty() { " *" } else { "" };

        println!("{}{}", self.display_name().bright_white().bold(), dirty);
        println!("  lines:    {}", document.line_count());
        println!(
            "  history:  {} undo / {} redo (capacity {})",
            history.undo_levels(),
            history.redo_levels(),
            history.capacity()
        );
        println!("  format:   {}", self.format);
        println!(
            "  renders:  #{} issued, {} in flight",
            self.pipeline.latest_token(),
            self.pipeline.in_flight()
        );
        if let Some(result) = self.pipeline.latest_result() {
            println!("  preview:  {}", render_summary(&result));
        }
        println!(
            "  messages: {} ({} awaiting a reply)",
            self.transcript.len(),
            self.pending_asks
        );
    }
}

/// Print a failure the way its kind asks for
pub fn report(err: &SessionError) {
    match err.kind() {
        ErrorKind::NoOp => println!("{}", err.to_string().dimmed()),
        ErrorKind::Validation => println!("{} {}", "⚠".yellow(), err.to_string().yellow()),
        ErrorKind::Transport | ErrorKind::Service => {
            eprintln!("{} {}", "Error:".red().bold(), err)
        }
    }
}
