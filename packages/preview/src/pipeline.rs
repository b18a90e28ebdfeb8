//! # Render Request Pipeline
//!
//! Turns a stream of document changes into render requests and publishes the
//! newest result.
//!
//! ```text
//! notify / set_format ──► debounce timer ──► issue(token n) ──► RenderService
//!         refresh_now ─────────────────────►      │                   │
//!                                                  ▼                   ▼
//!                         watch<RenderResult> ◄── arrival: token == newest?
//! ```
//!
//! Every request carries a token from a monotonic counter. A response is
//! published only if its token is still the newest one issued when it
//! arrives, so a slow early response can never replace the preview of a
//! later document. Failures go through the same check and are published in
//! the same slot, which means a later success always clears an earlier
//! error.
//!
//! The pipeline runs as a tokio task owned by the [`RenderPipeline`] handle.
//! Dropping the handle stops the task; requests already in flight finish
//! but their results go nowhere.

use crate::errors::PreviewError;
use crate::format::RenderFormat;
use crate::service::{RenderRequest, RenderResult, RenderService};
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{mpsc, watch};
use tokio::time::{sleep_until, Instant};

pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(1000);
pub const DEFAULT_RENDER_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PipelineConfig {
    /// Quiet period after the last change before a request is issued
    pub debounce: Duration,

    /// Upper bound on a single request
    pub timeout: Duration,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            debounce: DEFAULT_DEBOUNCE,
            timeout: DEFAULT_RENDER_TIMEOUT,
        }
    }
}

#[derive(Debug)]
enum Command {
    Changed { text: String, format: RenderFormat },
    SetFormat(RenderFormat),
    RefreshNow,
}

#[derive(Debug, Default)]
struct Counters {
    latest_token: AtomicU64,
    in_flight: AtomicUsize,
}

/// Handle to a running render pipeline
pub struct RenderPipeline {
    commands: mpsc::UnboundedSender<Command>,
    results: watch::Receiver<Option<RenderResult>>,
    counters: Arc<Counters>,
}

impl RenderPipeline {
    /// Start the pipeline on the current tokio runtime
    pub fn spawn(
        service: Arc<dyn RenderService>,
        format: RenderFormat,
        config: PipelineConfig,
    ) -> Self {
        let (commands, command_rx) = mpsc::unbounded_channel();
        let (publish, results) = watch::channel(None);
        let counters = Arc::new(Counters::default());

        let actor = Actor {
            service,
            config,
            text: String::new(),
            format,
            deadline: None,
            issued: 0,
            counters: counters.clone(),
            publish,
        };
        tokio::spawn(actor.run(command_rx));

        Self {
            commands,
            results,
            counters,
        }
    }

    /// Record new document text and restart the debounce timer
    pub fn notify_document_changed(&self, text: impl Into<String>, format: RenderFormat) {
        self.send(Command::Changed {
            text: text.into(),
            format,
        });
    }

    /// Switch output format; the current text is re-rendered after the debounce
    pub fn set_format(&self, format: RenderFormat) {
        self.send(Command::SetFormat(format));
    }

    /// Issue a request for the current text right away, cancelling any pending debounce
    pub fn refresh_now(&self) {
        self.send(Command::RefreshNow);
    }

    /// Receiver that observes every published result
    pub fn subscribe(&self) -> watch::Receiver<Option<RenderResult>> {
        self.results.clone()
    }

    /// Most recently published result
    pub fn latest_result(&self) -> Option<RenderResult> {
        self.results.borrow().clone()
    }

    /// Token of the newest request issued so far; 0 before the first one
    pub fn latest_token(&self) -> u64 {
        self.counters.latest_token.load(Ordering::SeqCst)
    }

    /// Requests issued whose responses have not arrived yet
    pub fn in_flight(&self) -> usize {
        self.counters.in_flight.load(Ordering::SeqCst)
    }

    fn send(&self, command: Command) {
        if self.commands.send(command).is_err() {
            tracing::warn!("render pipeline task has stopped; command dropped");
        }
    }
}

struct Actor {
    service: Arc<dyn RenderService>,
    config: PipelineConfig,
    text: String,
    format: RenderFormat,
    deadline: Option<Instant>,
    issued: u64,
    counters: Arc<Counters>,
    publish: watch::Sender<Option<RenderResult>>,
}

impl Actor {
    async fn run(mut self, mut commands: mpsc::UnboundedReceiver<Command>) {
        let (completed_tx, mut completed) = mpsc::unbounded_channel();

        loop {
            let deadline = self.deadline;

            tokio::select! {
                command = commands.recv() => match command {
                    Some(command) => self.handle(command, &completed_tx),
                    None => break,
                },
                _ = sleep_until(deadline.unwrap_or_else(Instant::now)), if deadline.is_some() => {
                    self.deadline = None;
                    self.issue(&completed_tx);
                }
                Some(result) = completed.recv() => self.arrive(result),
            }
        }

        tracing::debug!(issued = self.issued, "render pipeline stopped");
    }

    fn handle(&mut self, command: Command, completed: &mpsc::UnboundedSender<RenderResult>) {
        match command {
            Command::Changed { text, format } => {
                self.text = text;
                self.format = format;
                self.arm();
            }
            Command::SetFormat(format) => {
                self.format = format;
                self.arm();
            }
            Command::RefreshNow => {
                self.deadline = None;
                self.issue(completed);
            }
        }
    }

    fn arm(&mut self) {
        self.deadline = Some(Instant::now() + self.config.debounce);
    }

    fn issue(&mut self, completed: &mpsc::UnboundedSender<RenderResult>) {
        self.issued += 1;
        let request = RenderRequest {
            token: self.issued,
            document: self.text.clone(),
            format: self.format,
        };

        self.counters.latest_token.store(request.token, Ordering::SeqCst);
        self.counters.in_flight.fetch_add(1, Ordering::SeqCst);
        tracing::debug!(
            token = request.token,
            format = %request.format,
            bytes = request.document.len(),
            "issuing render request"
        );

        let service = self.service.clone();
        let timeout = self.config.timeout;
        let completed = completed.clone();
        tokio::spawn(async move {
            let response = match tokio::time::timeout(timeout, service.render(&request)).await {
                Ok(response) => response,
                Err(_) => Err(PreviewError::Timeout(timeout)),
            };
            let result = RenderResult::from_response(request.token, request.format, response);
            let _ = completed.send(result);
        });
    }

    fn arrive(&mut self, result: RenderResult) {
        self.counters.in_flight.fetch_sub(1, Ordering::SeqCst);

        if result.token != self.issued {
            tracing::debug!(
                token = result.token,
                newest = self.issued,
                "discarding stale render result"
            );
            return;
        }

        match &result.outcome {
            Ok(_) => tracing::info!(token = result.token, format = %result.format, "preview updated"),
            Err(err) => tracing::warn!(token = result.token, error = %err, "render failed"),
        }
        self.publish.send_replace(Some(result));
    }
}
