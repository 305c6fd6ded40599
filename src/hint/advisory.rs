//! Advisory hint text from an external service
//!
//! Hints are advisory only. A request runs on a worker thread and the result
//! lands in an [`AdvisorySlot`] that the interaction loop polls without
//! blocking. Failures of any kind resolve to a static fallback text. Nothing
//! here can see or change a puzzle session.

use std::fmt;
use std::sync::Arc;
use std::sync::mpsc::{self, Receiver, RecvTimeoutError, TryRecvError};
use std::thread;
use std::time::Duration;

use log::warn;

use crate::io::configuration::FALLBACK_HINT;
use crate::render::layout::{MediaKind, MediaSource};

/// Failure reported by a hint provider
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HintError {
    reason: String,
}

impl HintError {
    /// Create an error with a human-readable reason
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

impl fmt::Display for HintError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Hint request failed: {}", self.reason)
    }
}

impl std::error::Error for HintError {}

/// Stateless request/response hint service
pub trait HintProvider: Send + Sync {
    /// Produce advisory text for a media source
    ///
    /// # Errors
    ///
    /// Returns an error if the service cannot produce a hint
    fn hint(&self, source: &MediaSource) -> Result<String, HintError>;
}

impl<F> HintProvider for F
where
    F: Fn(&MediaSource) -> Result<String, HintError> + Send + Sync,
{
    fn hint(&self, source: &MediaSource) -> Result<String, HintError> {
        self(source)
    }
}

/// Built-in provider that needs no network
#[derive(Debug, Clone, Copy, Default)]
pub struct OfflineHints;

impl HintProvider for OfflineHints {
    fn hint(&self, source: &MediaSource) -> Result<String, HintError> {
        let name = source
            .location()
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .filter(|stem| !stem.is_empty())
            .ok_or_else(|| HintError::new("media source has no name"))?;

        Ok(match source.kind() {
            MediaKind::Image => format!(
                "Follow the strong edges and colour bands of '{name}'; they run across neighbouring rods."
            ),
            MediaKind::Video => format!(
                "Wait for a still moment in '{name}' and match the rods by the background."
            ),
        })
    }
}

/// Slot holding the latest hint text
///
/// At most one request is in flight; a new request supersedes the previous
/// one, whose result is discarded.
#[derive(Debug)]
pub struct AdvisorySlot {
    text: Option<String>,
    pending: Option<Receiver<String>>,
    fallback: String,
}

impl Default for AdvisorySlot {
    fn default() -> Self {
        Self::new()
    }
}

impl AdvisorySlot {
    /// Create an empty slot using the default fallback text
    pub fn new() -> Self {
        Self::with_fallback(FALLBACK_HINT)
    }

    /// Create an empty slot with a custom fallback text
    pub fn with_fallback(fallback: impl Into<String>) -> Self {
        Self {
            text: None,
            pending: None,
            fallback: fallback.into(),
        }
    }

    /// Ask `provider` for a hint about `source` without blocking
    pub fn request(&mut self, provider: Arc<dyn HintProvider>, source: MediaSource) {
        let (sender, receiver) = mpsc::channel();
        let fallback = self.fallback.clone();

        let spawned = thread::Builder::new()
            .name("hint-request".to_string())
            .spawn(move || {
                let text = provider.hint(&source).unwrap_or_else(|err| {
                    warn!("{err}; using fallback hint");
                    fallback
                });
                // The slot may have been dropped or superseded
                let _ = sender.send(text);
            });

        match spawned {
            Ok(_) => self.pending = Some(receiver),
            Err(err) => {
                warn!("Could not start hint request: {err}; using fallback hint");
                self.pending = None;
                self.text = Some(self.fallback.clone());
            }
        }
    }

    /// Whether a request is still in flight
    pub const fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Latest hint text, if any has arrived
    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }

    /// Collect a finished request, if any, and return the current text
    pub fn poll(&mut self) -> Option<&str> {
        let received = self.pending.as_ref().map(Receiver::try_recv);
        match received {
            Some(Ok(text)) => self.settle(Some(text)),
            Some(Err(TryRecvError::Disconnected)) => self.settle(None),
            Some(Err(TryRecvError::Empty)) | None => {}
        }
        self.text()
    }

    /// Wait up to `timeout` for the in-flight request, then return the text
    pub fn wait(&mut self, timeout: Duration) -> Option<&str> {
        let received = self
            .pending
            .as_ref()
            .map(|receiver| receiver.recv_timeout(timeout));
        match received {
            Some(Ok(text)) => self.settle(Some(text)),
            Some(Err(RecvTimeoutError::Disconnected)) => self.settle(None),
            Some(Err(RecvTimeoutError::Timeout)) | None => {}
        }
        self.text()
    }

    fn settle(&mut self, text: Option<String>) {
        self.pending = None;
        self.text = Some(text.unwrap_or_else(|| {
            warn!("Hint request ended without a result; using fallback hint");
            self.fallback.clone()
        }));
    }
}
