//! Cooperative cancellation shared between the render loop and task threads.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::error::UiError;

/// Cooperative cancellation token using an atomic flag.
///
/// # Example
/// ```
/// use clui_core::progress::CancellationToken;
///
/// let token = CancellationToken::new();
/// assert!(!token.is_cancelled());
///
/// token.cancel();
/// assert!(token.is_cancelled());
/// assert!(token.check_cancelled().is_err());
/// ```
#[derive(Debug, Clone)]
pub struct CancellationToken {
    cancelled: Arc<AtomicBool>,
    parent: Option<Box<CancellationToken>>,
}

impl CancellationToken {
    #[must_use]
    pub fn new() -> Self {
        Self {
            cancelled: Arc::new(AtomicBool::new(false)),
            parent: None,
        }
    }

    /// A token cancelled along with `self` that can also be cancelled on
    /// its own without touching `self`.
    #[must_use]
    pub fn child(&self) -> Self {
        Self {
            cancelled: Arc::new(AtomicBool::new(false)),
            parent: Some(Box::new(self.clone())),
        }
    }

    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Relaxed)
            || self.parent.as_ref().is_some_and(|p| p.is_cancelled())
    }

    /// Request cancellation. Every clone observes it.
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Relaxed);
    }

    /// Checkpoint for task loops.
    pub fn check_cancelled(&self) -> Result<(), UiError> {
        if self.is_cancelled() {
            Err(UiError::Cancelled)
        } else {
            Ok(())
        }
    }
}

impl Default for CancellationToken {
    fn default() -> Self {
        Self::new()
    }
}

/// A cancellation token with an optional deadline.
///
/// Cancelled when `cancel()` was called on the inner token or the
/// deadline has passed.
#[derive(Debug, Clone)]
pub struct TimeoutCancellationToken {
    inner: CancellationToken,
    deadline: Option<Instant>,
    timeout: Option<Duration>,
}

impl TimeoutCancellationToken {
    /// Fresh token expiring after `timeout`.
    #[must_use]
    pub fn new(timeout: Duration) -> Self {
        Self::with_token(CancellationToken::new(), Some(timeout))
    }

    /// Wrap an existing token. `None`, or a timeout too large to put a
    /// deadline on, never expires.
    #[must_use]
    pub fn with_token(inner: CancellationToken, timeout: Option<Duration>) -> Self {
        Self {
            inner,
            deadline: timeout.and_then(|t| Instant::now().checked_add(t)),
            timeout,
        }
    }

    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.inner.is_cancelled() || self.is_expired()
    }

    pub fn cancel(&self) {
        self.inner.cancel();
    }

    /// `Cancelled` takes precedence over `Timeout`.
    pub fn check_cancelled(&self) -> Result<(), UiError> {
        self.inner.check_cancelled()?;
        if self.is_expired() {
            let timeout = self.timeout.unwrap_or_default();
            return Err(UiError::Timeout(format!("{timeout:?}")));
        }
        Ok(())
    }

    /// Time left before the deadline, `None` without one.
    #[must_use]
    pub fn remaining(&self) -> Option<Duration> {
        self.deadline
            .map(|d| d.saturating_duration_since(Instant::now()))
    }

    #[must_use]
    pub fn token(&self) -> &CancellationToken {
        &self.inner
    }

    fn is_expired(&self) -> bool {
        self.deadline.is_some_and(|d| Instant::now() >= d)
    }
}
