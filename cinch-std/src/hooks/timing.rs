//! Elapsed-time checks around the wrapped call.
//!
//! The engine has no cancellation, so a slow call always runs to completion.
//! [`TimingAround`] measures it afterwards and either logs the overrun or
//! turns it into a [`HookError::Timeout`].

use cinch_core::{AroundHook, BoxError, HookError, Message, Proceed};
use std::time::{Duration, Instant};

/// A wrapping entry that measures the rest of the pipeline against a
/// threshold.
///
/// # Example
///
/// ```rust,ignore
/// // Fail jobs whose push takes longer than 250ms.
/// around.add(TimingAround::millis(250).fail_on_exceed(), Some("deadline"));
/// ```
#[derive(Debug, Clone, Copy)]
pub struct TimingAround {
    threshold: Duration,
    fail_on_exceed: bool,
}

impl TimingAround {
    /// Create a timing entry that logs calls slower than `threshold`.
    pub const fn new(threshold: Duration) -> Self {
        Self {
            threshold,
            fail_on_exceed: false,
        }
    }

    /// Create a timing entry with the threshold specified in milliseconds.
    pub const fn millis(millis: u64) -> Self {
        Self::new(Duration::from_millis(millis))
    }

    /// Return [`HookError::Timeout`] instead of only logging an overrun.
    pub const fn fail_on_exceed(mut self) -> Self {
        self.fail_on_exceed = true;
        self
    }

    /// Get the configured threshold.
    pub fn threshold(&self) -> Duration {
        self.threshold
    }
}

impl<A: Message> AroundHook<A> for TimingAround {
    fn around(&self, _args: &A, proceed: Proceed<'_>) -> Result<(), BoxError> {
        let started = Instant::now();
        proceed.proceed()?;
        let elapsed = started.elapsed();
        if elapsed <= self.threshold {
            return Ok(());
        }

        #[cfg(feature = "tracing")]
        {
            tracing::warn!(?elapsed, threshold = ?self.threshold, "wrapped call exceeded threshold");
        }
        if self.fail_on_exceed {
            return Err(HookError::Timeout(self.threshold).into());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cinch_core::AroundChain;
    use std::thread;

    #[test]
    fn test_fast_call_passes() {
        let mut chain = AroundChain::new();
        chain.add(TimingAround::millis(1_000).fail_on_exceed(), Some("deadline"));

        assert_eq!(chain.invoke(&1u8, || Ok("fast")).unwrap(), Some("fast"));
    }

    #[test]
    fn test_slow_call_fails_when_configured() {
        let mut chain = AroundChain::new();
        chain.add(TimingAround::millis(5).fail_on_exceed(), Some("deadline"));

        let err = chain
            .invoke(&1u8, || {
                thread::sleep(Duration::from_millis(30));
                Ok(())
            })
            .unwrap_err();

        let timeout = err.downcast_ref::<HookError>().unwrap();
        assert!(matches!(timeout, HookError::Timeout(d) if *d == Duration::from_millis(5)));
    }

    #[test]
    fn test_slow_call_only_logged_by_default() {
        let mut chain = AroundChain::new();
        chain.add(TimingAround::millis(1), Some("timing"));

        let result = chain
            .invoke(&1u8, || {
                thread::sleep(Duration::from_millis(10));
                Ok(1)
            })
            .unwrap();
        assert_eq!(result, Some(1));
    }
}
