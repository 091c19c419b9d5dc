//! Per-call deadline and cancellation.

use std::future::Future;
use std::time::Duration;

use tokio::sync::watch;
use tokio::time::Instant;

use crate::error::{CmcError, Result};

/// Deadline and cancellation signal shared by one or more client calls.
///
/// The default context never expires and cannot be cancelled; the transport
/// timeout still bounds every round trip.
#[derive(Debug, Clone, Default)]
pub struct CallContext {
    deadline: Option<Instant>,
    cancel_rx: Option<watch::Receiver<bool>>,
}

/// Cancels every call running under the context it was created with.
#[derive(Debug)]
pub struct CancelHandle {
    tx: watch::Sender<bool>,
}

impl CancelHandle {
    pub fn cancel(&self) {
        self.tx.send_replace(true);
    }
}

impl CallContext {
    pub fn background() -> Self {
        Self::default()
    }

    /// Sets an absolute deadline, keeping an earlier one if already set.
    pub fn with_deadline(mut self, deadline: Instant) -> Self {
        self.deadline = Some(match self.deadline {
            Some(current) => current.min(deadline),
            None => deadline,
        });
        self
    }

    /// Sets a deadline `timeout` from now. A timeout too large to represent
    /// leaves the context without that deadline.
    pub fn with_timeout(self, timeout: Duration) -> Self {
        match Instant::now().checked_add(timeout) {
            Some(deadline) => self.with_deadline(deadline),
            None => self,
        }
    }

    /// Attaches a cancellation signal and returns the handle that fires it.
    pub fn with_cancel(mut self) -> (Self, CancelHandle) {
        let (tx, rx) = watch::channel(false);
        self.cancel_rx = Some(rx);
        (self, CancelHandle { tx })
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancel_rx.as_ref().is_some_and(|rx| *rx.borrow())
    }

    /// Drives `fut` until it completes, the context is cancelled, or the
    /// deadline passes. A context that is already done never polls `fut`.
    pub async fn run<F, T>(&self, fut: F) -> Result<T>
    where
        F: Future<Output = Result<T>>,
    {
        if self.is_cancelled() {
            return Err(CmcError::Cancelled);
        }
        if self.deadline.is_some_and(|d| d <= Instant::now()) {
            return Err(CmcError::DeadlineExceeded);
        }

        tokio::select! {
            res = fut => res,
            _ = wait_cancelled(self.cancel_rx.clone()) => Err(CmcError::Cancelled),
            _ = wait_deadline(self.deadline) => Err(CmcError::DeadlineExceeded),
        }
    }
}

async fn wait_cancelled(rx: Option<watch::Receiver<bool>>) {
    if let Some(mut rx) = rx {
        if rx.wait_for(|cancelled| *cancelled).await.is_ok() {
            return;
        }
    }
    // Handle dropped without cancelling, or no signal attached.
    std::future::pending::<()>().await
}

async fn wait_deadline(deadline: Option<Instant>) {
    match deadline {
        Some(deadline) => tokio::time::sleep_until(deadline).await,
        None => std::future::pending::<()>().await,
    }
}
