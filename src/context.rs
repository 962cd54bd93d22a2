//! Call context passed through every client and connector operation.
//!
//! The translation layer itself is pure computation and never blocks; only
//! the connector call may block. `CallContext` is the token a connector is
//! expected to honor: an optional deadline plus an optional cancel signal
//! delivered over a `crossbeam-channel`. Dropping the [`CancelHandle`]
//! without calling [`CancelHandle::cancel`] leaves the context active.

use crossbeam_channel::{bounded, Receiver, Sender};
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};

/// Cancellation and deadline token for a single logical call.
///
/// # Example
///
/// ```
/// use dockhand::CallContext;
///
/// let (ctx, handle) = CallContext::cancellable();
/// assert!(!ctx.is_cancelled());
/// handle.cancel();
/// assert!(ctx.is_cancelled());
/// ```
#[derive(Debug)]
pub struct CallContext {
    deadline: Option<Instant>,
    cancel: Option<Receiver<()>>,
    // Latched so a consumed cancel message keeps reporting cancelled.
    cancelled: AtomicBool,
}

/// Handle used to cancel an in-flight [`CallContext`].
#[derive(Debug)]
pub struct CancelHandle {
    tx: Sender<()>,
}

impl CancelHandle {
    /// Signal cancellation to the paired context.
    pub fn cancel(&self) {
        // A full buffer means a cancel is already pending; that is fine.
        let _ = self.tx.try_send(());
    }
}

impl CallContext {
    /// A context that is never cancelled and has no deadline.
    pub fn background() -> Self {
        CallContext {
            deadline: None,
            cancel: None,
            cancelled: AtomicBool::new(false),
        }
    }

    /// A context that expires after `timeout`.
    pub fn with_timeout(timeout: Duration) -> Self {
        CallContext {
            deadline: Some(Instant::now() + timeout),
            cancel: None,
            cancelled: AtomicBool::new(false),
        }
    }

    /// A context paired with a [`CancelHandle`] for manual cancellation.
    pub fn cancellable() -> (Self, CancelHandle) {
        let (tx, rx) = bounded(1);
        let ctx = CallContext {
            deadline: None,
            cancel: Some(rx),
            cancelled: AtomicBool::new(false),
        };
        (ctx, CancelHandle { tx })
    }

    /// The deadline, if one was set.
    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    /// Whether this call has been cancelled or its deadline has passed.
    ///
    /// Connectors should check this before and during blocking work.
    pub fn is_cancelled(&self) -> bool {
        if self.cancelled.load(Ordering::Relaxed) {
            return true;
        }
        if let Some(deadline) = self.deadline {
            if Instant::now() >= deadline {
                self.cancelled.store(true, Ordering::Relaxed);
                return true;
            }
        }
        if let Some(rx) = &self.cancel {
            if rx.try_recv().is_ok() {
                self.cancelled.store(true, Ordering::Relaxed);
                return true;
            }
        }
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_background_is_never_cancelled() {
        let ctx = CallContext::background();
        assert!(!ctx.is_cancelled());
        assert!(ctx.deadline().is_none());
    }

    #[test]
    fn test_cancel_handle_latches() {
        let (ctx, handle) = CallContext::cancellable();
        assert!(!ctx.is_cancelled());
        handle.cancel();
        assert!(ctx.is_cancelled());
        // The latch holds even after the cancel message was consumed.
        assert!(ctx.is_cancelled());
    }

    #[test]
    fn test_dropping_handle_does_not_cancel() {
        let (ctx, handle) = CallContext::cancellable();
        drop(handle);
        assert!(!ctx.is_cancelled());
    }

    #[test]
    fn test_expired_deadline_cancels() {
        let ctx = CallContext::with_timeout(Duration::from_secs(0));
        assert!(ctx.is_cancelled());
    }
}
