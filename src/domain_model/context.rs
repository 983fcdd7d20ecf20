use nanoid::nanoid;
use std::future::IntoFuture;
use std::time::Duration;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum Interrupted {
    #[error("operation cancelled")]
    Cancelled,
    #[error("deadline exceeded")]
    TimedOut,
}

/// Per-request deadline, cancellation signal and correlation id, handed down
/// from the handler to every store call made on the request's behalf.
#[derive(Debug, Clone)]
pub struct RequestContext {
    request_id: String,
    deadline: Instant,
    cancel: CancellationToken,
}

impl RequestContext {
    pub fn with_timeout(timeout: Duration) -> Self {
        Self::new(CancellationToken::new(), timeout)
    }

    /// Context that is also cancelled when `parent` is, e.g. the server-wide
    /// token tripped on shutdown.
    pub fn with_parent(parent: &CancellationToken, timeout: Duration) -> Self {
        Self::new(parent.child_token(), timeout)
    }

    fn new(cancel: CancellationToken, timeout: Duration) -> Self {
        Self {
            request_id: nanoid!(10),
            deadline: Instant::now() + timeout,
            cancel,
        }
    }

    pub fn request_id(&self) -> &str {
        &self.request_id
    }

    #[cfg(test)]
    pub(crate) fn cancel(&self) {
        self.cancel.cancel();
    }

    #[cfg(test)]
    pub(crate) fn is_cancelled(&self) -> bool {
        self.cancel.is_cancelled()
    }

    /// Drive `op` until it completes, the request is cancelled or the deadline
    /// passes. On the latter two `op` is dropped, aborting the store call.
    pub async fn run<F>(&self, op: F) -> Result<F::Output, Interrupted>
    where
        F: IntoFuture,
    {
        let op = op.into_future();
        tokio::select! {
            biased;
            _ = self.cancel.cancelled() => Err(Interrupted::Cancelled),
            _ = tokio::time::sleep_until(self.deadline) => Err(Interrupted::TimedOut),
            out = op => Ok(out),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicBool, Ordering};

    #[tokio::test]
    async fn completes_within_deadline() {
        let ctx = RequestContext::with_timeout(Duration::from_secs(5));
        assert_eq!(ctx.run(async { 42 }).await, Ok(42));
    }

    #[tokio::test]
    async fn cancelled_context_never_polls_the_operation() {
        let ctx = RequestContext::with_timeout(Duration::from_secs(5));
        ctx.cancel();

        let polled = Arc::new(AtomicBool::new(false));
        let flag = polled.clone();
        let result = ctx
            .run(async move {
                flag.store(true, Ordering::SeqCst);
            })
            .await;

        assert_eq!(result, Err(Interrupted::Cancelled));
        assert!(!polled.load(Ordering::SeqCst));
    }

    #[tokio::test]
    async fn slow_operation_times_out() {
        let ctx = RequestContext::with_timeout(Duration::from_millis(20));
        let result = ctx
            .run(tokio::time::sleep(Duration::from_secs(10)))
            .await;
        assert_eq!(result, Err(Interrupted::TimedOut));
    }

    #[tokio::test]
    async fn cancellation_aborts_in_flight_operation() {
        let ctx = RequestContext::with_timeout(Duration::from_secs(10));
        let canceller = ctx.clone();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(10)).await;
            canceller.cancel();
        });

        let result = ctx
            .run(tokio::time::sleep(Duration::from_secs(10)))
            .await;
        assert_eq!(result, Err(Interrupted::Cancelled));
        assert!(ctx.is_cancelled());
    }

    #[tokio::test]
    async fn cancelling_the_parent_interrupts_children() {
        let parent = CancellationToken::new();
        let ctx = RequestContext::with_parent(&parent, Duration::from_secs(10));
        let canceller = parent.clone();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(10)).await;
            canceller.cancel();
        });

        let result = ctx
            .run(tokio::time::sleep(Duration::from_secs(10)))
            .await;
        assert_eq!(result, Err(Interrupted::Cancelled));
        assert!(ctx.is_cancelled());
        assert!(!RequestContext::with_timeout(Duration::from_secs(1)).is_cancelled());
    }

    #[test]
    fn request_ids_are_distinct() {
        let a = RequestContext::with_timeout(Duration::from_secs(1));
        let b = RequestContext::with_timeout(Duration::from_secs(1));
        assert_eq!(a.request_id().len(), 10);
        assert_ne!(a.request_id(), b.request_id());
    }
}
