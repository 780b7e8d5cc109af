//! Per-call cancellation.
//!
//! One [`CancelHandle`] exists per chat call. It is handed to the caller
//! before any network work starts and is shared with the call's timeout
//! timer; whichever cancels first wins and later cancels are no-ops.

use std::future::Future;
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::debug;

use crate::core::error::SdkError;

/// A handle that can be used to request cancellation of one chat call.
#[derive(Clone, Debug, Default)]
pub struct CancelHandle {
    token: CancellationToken,
}

impl CancelHandle {
    pub fn new() -> Self {
        Self {
            token: CancellationToken::new(),
        }
    }

    /// Request cancellation. Idempotent.
    pub fn cancel(&self) {
        self.token.cancel();
    }

    pub fn is_cancelled(&self) -> bool {
        self.token.is_cancelled()
    }

    /// A future that resolves when cancellation is requested.
    pub fn cancelled(&self) -> tokio_util::sync::WaitForCancellationFuture<'_> {
        self.token.cancelled()
    }

    /// Drive `fut` unless cancellation fires first.
    ///
    /// Cancellation is checked before `fut` is polled, so an already-cancelled
    /// handle never lets the operation start.
    pub async fn run<F>(&self, fut: F) -> Result<F::Output, SdkError>
    where
        F: Future,
    {
        tokio::select! {
            biased;
            _ = self.token.cancelled() => Err(SdkError::Cancelled),
            out = fut => Ok(out),
        }
    }

    /// Arm a timer that cancels this handle after `after` elapses.
    pub fn arm_timeout(&self, after: Duration) -> TimeoutGuard {
        let handle = self.clone();
        let task = tokio::spawn(async move {
            tokio::time::sleep(after).await;
            if !handle.is_cancelled() {
                debug!(
                    target: "chat_adapter::cancel",
                    timeout_ms = after.as_millis() as u64,
                    "request timeout elapsed; cancelling call"
                );
            }
            handle.cancel();
        });
        TimeoutGuard { task }
    }
}

/// Pending timeout timer; dropping the guard disarms it.
#[derive(Debug)]
pub struct TimeoutGuard {
    task: JoinHandle<()>,
}

impl TimeoutGuard {
    /// Disarm the timer explicitly.
    pub fn clear(self) {}
}

impl Drop for TimeoutGuard {
    fn drop(&mut self) {
        self.task.abort();
    }
}
