//! Retry entry.

use cinch_core::{AroundHook, BoxError, Message, Proceed};

/// A wrapping entry that re-runs the rest of the pipeline when it fails.
///
/// The remainder runs at most `max_retries + 1` times. The last error is
/// returned once retries are exhausted. Entries further down, and the final
/// action, run again on every attempt.
///
/// # Example
///
/// ```rust,ignore
/// around.add(RetryAround::new(3), Some("retry"));
/// ```
#[derive(Debug, Clone, Copy)]
pub struct RetryAround {
    max_retries: usize,
}

impl RetryAround {
    /// Allow up to `max_retries` extra attempts.
    pub const fn new(max_retries: usize) -> Self {
        Self { max_retries }
    }

    /// Get the configured number of extra attempts.
    pub fn max_retries(&self) -> usize {
        self.max_retries
    }
}

impl Default for RetryAround {
    fn default() -> Self {
        Self::new(3)
    }
}

impl<A: Message> AroundHook<A> for RetryAround {
    fn around(&self, _args: &A, proceed: Proceed<'_>) -> Result<(), BoxError> {
        let mut attempt = 0;
        loop {
            match proceed.proceed() {
                Ok(()) => return Ok(()),
                Err(error) if attempt < self.max_retries => {
                    attempt += 1;
                    #[cfg(feature = "tracing")]
                    {
                        tracing::warn!(
                            attempt,
                            max = self.max_retries,
                            %error,
                            "retrying wrapped call"
                        );
                    }
                    #[cfg(not(feature = "tracing"))]
                    {
                        let _ = error;
                    }
                }
                Err(error) => return Err(error),
            }
        }
    }
}
