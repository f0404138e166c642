//! Cooperative cancellation for the streaming parser.
//!
//! A [`CancellationToken`] is a cloneable handle over a shared flag. The
//! producer checks it once per physical line, so cancellation takes effect
//! at line granularity; work on the line in flight is not preempted.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

#[derive(Default)]
struct Inner {
    canceled: AtomicBool,
    reason: Mutex<Option<String>>,
}

/// Cloneable cancellation signal with an associated reason.
///
/// All clones observe the same state. The first `cancel` call wins; later
/// calls do not overwrite the recorded reason.
#[derive(Clone, Default)]
pub struct CancellationToken {
    inner: Arc<Inner>,
}

impl CancellationToken {
    /// A fresh, untriggered token.
    pub fn new() -> Self {
        Self::default()
    }

    /// Trigger cancellation, recording `reason` if none was set yet.
    pub fn cancel(&self, reason: impl Into<String>) {
        let mut slot = self
            .inner
            .reason
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        if !self.inner.canceled.load(Ordering::Acquire) {
            *slot = Some(reason.into());
            self.inner.canceled.store(true, Ordering::Release);
        }
    }

    /// Whether cancellation has been requested.
    pub fn is_canceled(&self) -> bool {
        self.inner.canceled.load(Ordering::Acquire)
    }

    /// The recorded reason, or a generic placeholder if the token was
    /// never canceled (or canceled with an empty reason).
    pub fn reason(&self) -> String {
        self.inner
            .reason
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
            .unwrap_or_else(|| "canceled".to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_token_is_not_canceled() {
        let token = CancellationToken::new();
        assert!(!token.is_canceled());
        assert_eq!(token.reason(), "canceled");
    }

    #[test]
    fn clones_share_state() {
        let token = CancellationToken::new();
        let other = token.clone();
        token.cancel("stop");
        assert!(other.is_canceled());
        assert_eq!(other.reason(), "stop");
    }

    #[test]
    fn first_reason_wins() {
        let token = CancellationToken::new();
        token.cancel("first");
        token.cancel("second");
        assert_eq!(token.reason(), "first");
    }
}
