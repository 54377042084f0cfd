//! Cooperative cancellation for long-running valuations.
//!
//! Large lattices and Monte Carlo runs can take long enough that the
//! caller loses interest (a stale interactive request, a timed-out
//! batch job). Pricers accept a [`CancelToken`] and poll it between
//! outer backward-induction steps; a cancelled call unwinds promptly
//! with [`PricingError::Cancelled`] instead of running to completion.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use super::error::PricingError;

/// Shared cancellation flag.
///
/// Cloning is cheap and all clones observe the same flag, so the caller
/// keeps one clone and hands another to the pricing call (typically on a
/// worker task). Cancellation is cooperative: the computation notices at
/// its next checkpoint.
///
/// # Examples
/// ```
/// use fairval_core::types::{CancelToken, PricingError};
///
/// let token = CancelToken::new();
/// assert!(token.checkpoint().is_ok());
///
/// token.cancel();
/// assert_eq!(token.checkpoint(), Err(PricingError::Cancelled));
/// ```
#[derive(Clone, Debug, Default)]
pub struct CancelToken {
    cancelled: Arc<AtomicBool>,
}

impl CancelToken {
    /// Creates a token in the not-cancelled state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Requests cancellation. Idempotent.
    #[inline]
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Relaxed);
    }

    /// Returns whether cancellation has been requested.
    #[inline]
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Relaxed)
    }

    /// Returns `Err(PricingError::Cancelled)` once cancellation has been
    /// requested, so pricers can write `token.checkpoint()?` at the top
    /// of each outer induction step.
    #[inline]
    pub fn checkpoint(&self) -> Result<(), PricingError> {
        if self.is_cancelled() {
            Err(PricingError::Cancelled)
        } else {
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fresh_token_not_cancelled() {
        let token = CancelToken::new();
        assert!(!token.is_cancelled());
        assert!(token.checkpoint().is_ok());
    }

    #[test]
    fn test_cancel_is_observed_by_clones() {
        let token = CancelToken::new();
        let clone = token.clone();

        token.cancel();

        assert!(clone.is_cancelled());
        assert_eq!(clone.checkpoint(), Err(PricingError::Cancelled));
    }

    #[test]
    fn test_cancel_idempotent() {
        let token = CancelToken::new();
        token.cancel();
        token.cancel();
        assert!(token.is_cancelled());
    }

    #[test]
    fn test_cancel_across_threads() {
        let token = CancelToken::new();
        let clone = token.clone();

        let handle = std::thread::spawn(move || clone.cancel());
        handle.join().unwrap();

        assert!(token.is_cancelled());
    }
}
