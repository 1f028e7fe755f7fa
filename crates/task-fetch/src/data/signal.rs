//! Cancellation tokens passed through [`crate::RequestInit`].

use std::sync::Arc;

use tokio::sync::watch;

use crate::error::{ABORT_MESSAGE, AbortError};

/// Owner side of an [`AbortSignal`].
#[derive(Debug, Clone)]
pub struct AbortController {
    sender: Arc<watch::Sender<Option<String>>>,
    signal: AbortSignal,
}

impl AbortController {
    pub fn new() -> Self {
        let (sender, receiver) = watch::channel(None);
        Self {
            sender: Arc::new(sender),
            signal: AbortSignal { receiver },
        }
    }

    pub fn signal(&self) -> AbortSignal { self.signal.clone() }

    pub fn abort(&self) { self.abort_with(ABORT_MESSAGE) }

    /// Abort with a custom reason. Only the first call has any effect.
    pub fn abort_with(&self, reason: impl Into<String>) {
        self.sender.send_if_modified(|state| {
            if state.is_some() {
                return false;
            }
            *state = Some(reason.into());
            true
        });
    }
}

impl Default for AbortController {
    fn default() -> Self { Self::new() }
}

/// Observer side of a cancellation request.
#[derive(Debug, Clone)]
pub struct AbortSignal {
    receiver: watch::Receiver<Option<String>>,
}

impl AbortSignal {
    /// A signal that is already aborted.
    pub fn abort(reason: impl Into<String>) -> Self {
        let (_, receiver) = watch::channel(Some(reason.into()));
        Self { receiver }
    }

    pub fn is_aborted(&self) -> bool { self.receiver.borrow().is_some() }

    pub fn reason(&self) -> Option<String> { self.receiver.borrow().clone() }

    /// Resolves with the abort reason once the signal fires.
    ///
    /// Pends forever if the controller is dropped without aborting.
    pub async fn aborted(&self) -> String {
        let mut receiver = self.receiver.clone();
        let reason = match receiver.wait_for(Option::is_some).await {
            Ok(state) => state.clone(),
            Err(_) => None,
        };
        match reason {
            Some(reason) => reason,
            None => std::future::pending().await,
        }
    }

    /// The error a capability should reject with once this signal fired.
    pub fn to_error(&self) -> AbortError {
        self.reason()
            .map(AbortError::new)
            .unwrap_or_default()
    }
}
