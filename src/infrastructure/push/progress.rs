//! Bundling progress polling

use std::thread;
use std::time::{Duration, Instant};

use serde::Deserialize;

use crate::domain::ports::PushError;

use super::frontend::FrontendClient;

/// Default delay between two progress requests
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(1);

/// Bundling state reported by the frontend.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BundleStatus {
    #[default]
    Pending,
    Running,
    Succeeded,
    Failed,
    #[serde(other)]
    Unknown,
}

impl BundleStatus {
    pub fn is_finished(&self) -> bool {
        matches!(self, BundleStatus::Succeeded | BundleStatus::Failed)
    }
}

/// Progress document served at the progress URI.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ProgressDocument {
    #[serde(default)]
    pub status: BundleStatus,
    /// Log lines so far, oldest first
    #[serde(default)]
    pub messages: Vec<String>,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub links: ProgressLinks,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ProgressLinks {
    /// Where the bundled app can be opened
    #[serde(default)]
    pub app: Option<String>,
}

impl ProgressDocument {
    pub fn parse(body: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(body)
    }

    fn failure_message(&self) -> String {
        self.error
            .clone()
            .or_else(|| self.messages.last().cloned())
            .unwrap_or_else(|| "the frontend reported a failure".to_string())
    }
}

/// Tracks what was already seen across polls.
#[derive(Debug)]
pub struct ProgressTracker {
    seen_messages: usize,
    status: BundleStatus,
    last_progress: Instant,
    idle_timeout: Duration,
}

impl ProgressTracker {
    pub fn new(idle_timeout: Duration, now: Instant) -> Self {
        Self {
            seen_messages: 0,
            status: BundleStatus::Pending,
            last_progress: now,
            idle_timeout,
        }
    }

    /// Record a poll result. Returns the messages not seen before.
    pub fn observe<'a>(&mut self, doc: &'a ProgressDocument, now: Instant) -> &'a [String] {
        let fresh = doc.messages.get(self.seen_messages..).unwrap_or(&[]);
        if !fresh.is_empty() || doc.status != self.status {
            self.last_progress = now;
        }
        self.seen_messages = self.seen_messages.max(doc.messages.len());
        self.status = doc.status;
        fresh
    }

    pub fn is_idle(&self, now: Instant) -> bool {
        now.saturating_duration_since(self.last_progress) >= self.idle_timeout
    }
}

/// Poll `uri` until bundling finishes, fails, or stalls.
pub fn wait_for_bundle(
    client: &FrontendClient,
    uri: &str,
    poll_interval: Duration,
    idle_timeout: Duration,
    verbose: bool,
) -> Result<ProgressDocument, PushError> {
    let mut tracker = ProgressTracker::new(idle_timeout, Instant::now());

    loop {
        match fetch(client, uri) {
            Ok(doc) => {
                for message in tracker.observe(&doc, Instant::now()) {
                    log::info!("{message}");
                }
                match doc.status {
                    BundleStatus::Succeeded => return Ok(doc),
                    BundleStatus::Failed => {
                        return Err(PushError::BundlingFailed(doc.failure_message()))
                    }
                    _ => {}
                }
            }
            Err(e) if verbose => log::warn!("progress poll failed: {e}"),
            Err(e) => log::debug!("progress poll failed: {e}"),
        }

        if tracker.is_idle(Instant::now()) {
            return Err(PushError::IdleTimeout(idle_timeout));
        }
        thread::sleep(poll_interval);
    }
}

fn fetch(client: &FrontendClient, uri: &str) -> Result<ProgressDocument, PushError> {
    let request_failed = |message: String| PushError::Request {
        uri: uri.to_string(),
        message,
    };

    let response = client
        .http()
        .get(uri)
        .send()
        .map_err(|e| request_failed(e.to_string()))?;
    if !response.status().is_success() {
        return Err(request_failed(format!("status {}", response.status())));
    }
    let body = response.text().map_err(|e| request_failed(e.to_string()))?;
    ProgressDocument::parse(&body).map_err(|e| request_failed(e.to_string()))
}
