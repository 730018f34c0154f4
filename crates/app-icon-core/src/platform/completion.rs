use std::sync::Mutex;

use tokio::sync::oneshot;
use tracing::{debug, warn};

/// Outcome a host reports for one switch request: `Err` carries its message.
pub(crate) type HostOutcome = std::result::Result<(), String>;

/// One-shot completion handle passed to the host with each switch request.
///
/// The host reports through [`complete`](Self::complete), from any thread.
/// Only the first report is delivered; later ones are dropped and logged.
/// This keeps a misbehaving host from resolving a request twice.
#[derive(Debug)]
pub struct IconChangeCompletion {
    sender: Mutex<Option<oneshot::Sender<HostOutcome>>>,
}

impl IconChangeCompletion {
    pub(crate) fn channel() -> (Self, oneshot::Receiver<HostOutcome>) {
        let (tx, rx) = oneshot::channel();
        (
            Self {
                sender: Mutex::new(Some(tx)),
            },
            rx,
        )
    }

    /// Report the host's answer: `None` for success, `Some(message)` for an
    /// error.
    ///
    /// Returns `true` if this call settled the request, `false` if it had
    /// already been settled or the caller stopped waiting.
    pub fn complete(&self, error: Option<String>) -> bool {
        // Recover from poison: the Option is still valid data.
        let sender = self
            .sender
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .take();

        let Some(sender) = sender else {
            warn!(error = ?error, "Icon change completion invoked more than once, ignoring");
            return false;
        };

        let outcome = match error {
            None => Ok(()),
            Some(message) => Err(message),
        };

        if sender.send(outcome).is_err() {
            debug!("Icon change completion arrived after caller stopped waiting");
            return false;
        }

        true
    }

    /// Whether a result has already been reported.
    pub fn is_completed(&self) -> bool {
        self.sender
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .is_none()
    }
}
