//! Logging entries for call observation.

use cinch_core::{AroundHook, BoxError, Hook, HookResult, Message, Proceed};
use std::fmt::Debug;
#[cfg(feature = "tracing")]
use std::time::Instant;

/// A terminal-style entry that logs the call arguments and lets the chain
/// continue.
#[derive(Debug, Clone, Copy)]
pub struct LoggingHook {
    label: &'static str,
}

impl LoggingHook {
    /// Create a logging hook that tags its events with `label`.
    pub const fn new(label: &'static str) -> Self {
        Self { label }
    }

    /// The label attached to every logged event.
    pub fn label(&self) -> &'static str {
        self.label
    }
}

impl<A: Message + Debug> Hook<A> for LoggingHook {
    fn run(&self, args: &A) -> Result<HookResult, BoxError> {
        #[cfg(feature = "tracing")]
        {
            tracing::debug!(hook = self.label(), ?args, "hook invoked");
        }
        #[cfg(not(feature = "tracing"))]
        {
            let _ = args; // Suppress unused warning
        }
        Ok(HookResult::Next)
    }
}

/// A wrapping entry that logs entry into and exit from the rest of the
/// pipeline, with the elapsed time. Failures are logged at `warn` and
/// returned unchanged.
#[derive(Debug, Clone, Copy)]
pub struct LoggingAround {
    label: &'static str,
}

impl LoggingAround {
    /// Create a logging around entry that tags its events with `label`.
    pub const fn new(label: &'static str) -> Self {
        Self { label }
    }

    /// The label attached to every logged event.
    pub fn label(&self) -> &'static str {
        self.label
    }
}

impl<A: Message + Debug> AroundHook<A> for LoggingAround {
    fn around(&self, args: &A, proceed: Proceed<'_>) -> Result<(), BoxError> {
        #[cfg(feature = "tracing")]
        let started = Instant::now();
        #[cfg(feature = "tracing")]
        {
            tracing::debug!(hook = self.label(), ?args, "entering wrapped call");
        }
        #[cfg(not(feature = "tracing"))]
        {
            let _ = args;
        }

        let result = proceed.proceed();

        #[cfg(feature = "tracing")]
        {
            let elapsed = started.elapsed();
            match &result {
                Ok(()) => tracing::debug!(hook = self.label(), ?elapsed, "wrapped call completed"),
                Err(error) => {
                    tracing::warn!(hook = self.label(), ?elapsed, %error, "wrapped call failed")
                }
            }
        }
        result
    }
}
