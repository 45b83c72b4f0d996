//! Per-request cancellation and deadline propagation.

use std::future::Future;
use std::time::Duration;

use tokio::time::Instant;
use tokio_util::sync::CancellationToken;

use crate::error::ModelReadError;

/// Carries a deadline and a cancellation signal through to model reads.
///
/// Cloning shares the cancellation token, so cancelling any clone cancels
/// every read issued under it.
#[derive(Debug, Clone, Default)]
pub struct RequestContext {
    deadline: Option<Instant>,
    cancellation: CancellationToken,
}

impl RequestContext {
    /// Creates a context with no deadline that is never cancelled unless
    /// [`cancel`](Self::cancel) is called.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a context that expires `timeout` from now.
    ///
    /// A timeout too large to represent as an instant leaves the context
    /// without a deadline.
    pub fn with_timeout(timeout: Duration) -> Self {
        Self {
            deadline: Instant::now().checked_add(timeout),
            cancellation: CancellationToken::new(),
        }
    }

    /// Creates a context that expires at `deadline`.
    pub fn with_deadline(deadline: Instant) -> Self {
        Self {
            deadline: Some(deadline),
            cancellation: CancellationToken::new(),
        }
    }

    /// Uses `token` as the cancellation signal.
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancellation = token;
        self
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    pub fn cancel(&self) {
        self.cancellation.cancel();
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancellation.is_cancelled()
    }

    /// Fails if the context is already cancelled or past its deadline.
    ///
    /// Cancellation is reported in preference to an expired deadline.
    pub fn check(&self) -> Result<(), ModelReadError> {
        if self.is_cancelled() {
            return Err(ModelReadError::Cancelled);
        }
        match self.deadline {
            Some(deadline) if Instant::now() >= deadline => Err(ModelReadError::DeadlineExceeded),
            _ => Ok(()),
        }
    }

    /// Runs `read` under this context.
    ///
    /// The read is not started if the context is already done, and is
    /// abandoned if the context is cancelled or the deadline passes while
    /// it is in flight.
    pub async fn run<T, F>(&self, read: F) -> Result<T, ModelReadError>
    where
        F: Future<Output = Result<T, ModelReadError>>,
    {
        self.check()?;

        let bounded = async {
            match self.deadline {
                Some(deadline) => match tokio::time::timeout_at(deadline, read).await {
                    Ok(result) => result,
                    Err(_elapsed) => Err(ModelReadError::DeadlineExceeded),
                },
                None => read.await,
            }
        };

        tokio::select! {
            biased;
            _ = self.cancellation.cancelled() => Err(ModelReadError::Cancelled),
            result = bounded => result,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicBool, Ordering};

    #[tokio::test]
    async fn test_fresh_context_runs_read() {
        let ctx = RequestContext::new();
        assert!(ctx.check().is_ok());
        assert!(ctx.deadline().is_none());

        let value = ctx.run(async { Ok::<_, ModelReadError>(7) }).await.unwrap();
        assert_eq!(value, 7);
    }

    #[tokio::test]
    async fn test_cancelled_context_does_not_start_read() {
        let ctx = RequestContext::new();
        ctx.cancel();

        let polled = AtomicBool::new(false);
        let result = ctx
            .run(async {
                polled.store(true, Ordering::SeqCst);
                Ok::<_, ModelReadError>(())
            })
            .await;
        assert!(matches!(result, Err(ModelReadError::Cancelled)));
        assert!(!polled.load(Ordering::SeqCst));
    }

    #[tokio::test]
    async fn test_cancellation_is_shared_between_clones() {
        let token = CancellationToken::new();
        let ctx = RequestContext::new().with_cancellation(token.clone());
        let clone = ctx.clone();

        token.cancel();
        assert!(ctx.is_cancelled());
        assert!(matches!(clone.check(), Err(ModelReadError::Cancelled)));
    }

    #[tokio::test(start_paused = true)]
    async fn test_expired_deadline_fails_before_read() {
        let ctx = RequestContext::with_timeout(Duration::from_millis(10));
        tokio::time::advance(Duration::from_millis(20)).await;

        assert!(matches!(ctx.check(), Err(ModelReadError::DeadlineExceeded)));
        let result = ctx.run(async { Ok::<_, ModelReadError>(()) }).await;
        assert!(matches!(result, Err(ModelReadError::DeadlineExceeded)));
    }

    #[tokio::test]
    async fn test_unrepresentable_timeout_means_no_deadline() {
        let ctx = RequestContext::with_timeout(Duration::MAX);
        assert!(ctx.deadline().is_none());

        let value = ctx.run(async { Ok::<_, ModelReadError>(7) }).await.unwrap();
        assert_eq!(value, 7);
    }

    #[tokio::test(start_paused = true)]
    async fn test_deadline_interrupts_slow_read() {
        let ctx = RequestContext::with_timeout(Duration::from_millis(50));

        let result = ctx
            .run(async {
                tokio::time::sleep(Duration::from_secs(5)).await;
                Ok::<_, ModelReadError>(())
            })
            .await;
        assert!(matches!(result, Err(ModelReadError::DeadlineExceeded)));
    }

    #[tokio::test]
    async fn test_cancel_interrupts_in_flight_read() {
        let ctx = RequestContext::new();
        let canceller = ctx.clone();

        let handle = tokio::spawn(async move {
            ctx.run(async {
                tokio::time::sleep(Duration::from_secs(30)).await;
                Ok::<_, ModelReadError>(())
            })
            .await
        });

        tokio::task::yield_now().await;
        canceller.cancel();

        let result = handle.await.unwrap();
        assert!(matches!(result, Err(ModelReadError::Cancelled)));
    }
}
